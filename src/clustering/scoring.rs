use crate::clustering::alignment::Alignment;
use crate::core::types::GAP;

/// Safely convert usize to f64 for percentage calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Percent identity of two gap-padded sequences, in `[0, 100]`.
///
/// Counts columns where both strings carry the same byte, so a gap opposite a
/// residue is a mismatch. The count is divided by the length of the shorter
/// *unpadded* sequence rather than the alignment length, which keeps heavy
/// padding of a long sequence from diluting the score.
///
/// Returns 0.0 when the shorter unpadded sequence is empty.
#[must_use]
pub fn percent_identity(first: &[u8], second: &[u8]) -> f64 {
    debug_assert_eq!(
        first.len(),
        second.len(),
        "aligned sequences must be equal length"
    );

    let matches = first.iter().zip(second).filter(|(a, b)| a == b).count();

    let shorter = residue_count(first).min(residue_count(second));
    if shorter == 0 {
        return 0.0;
    }

    (count_to_f64(matches) * 100.0 / count_to_f64(shorter)).min(100.0)
}

/// Percent identity of an [`Alignment`]
#[must_use]
pub fn alignment_identity(alignment: &Alignment) -> f64 {
    percent_identity(&alignment.first, &alignment.second)
}

fn residue_count(padded: &[u8]) -> usize {
    padded.iter().filter(|&&b| b != GAP).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences() {
        assert!((percent_identity(b"ACGTACGT", b"ACGTACGT") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_by_shorter_unpadded_length() {
        // 4 matching columns; shorter raw sequence is 4 long
        let identity = percent_identity(b"ACGTTTTT", b"ACGT----");
        assert!((identity - 100.0).abs() < 1e-9);

        // 3 of 4 residues of the shorter sequence match
        let identity = percent_identity(b"ACGTTTTT", b"ACGA----");
        assert!((identity - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_opposite_residue_is_a_mismatch() {
        // Shorter raw length is 5 ("AC-GTA" -> "ACGTA"), 4 matching columns
        let identity = percent_identity(b"AC-GTA", b"ACTGT-");
        assert!((identity - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_matches() {
        assert!(percent_identity(b"AAAA", b"CCCC").abs() < 1e-9);
    }

    #[test]
    fn test_stays_within_bounds() {
        // Gap-vs-gap columns count as matches but never push past 100
        let identity = percent_identity(b"A--", b"A--");
        assert!((identity - 100.0).abs() < 1e-9);

        for (a, b) in [
            (&b"ACGT"[..], &b"TGCA"[..]),
            (b"A-C-", b"-A-C"),
            (b"AAAA", b"AAA-"),
        ] {
            let identity = percent_identity(a, b);
            assert!((0.0..=100.0).contains(&identity), "{identity}");
        }
    }

    #[test]
    fn test_empty_sequence_scores_zero() {
        assert!(percent_identity(b"", b"").abs() < 1e-9);
        assert!(percent_identity(b"---", b"ACG").abs() < 1e-9);
    }

    #[test]
    fn test_alignment_identity() {
        let alignment = Alignment {
            first: b"ACGT".to_vec(),
            second: b"ACGA".to_vec(),
        };
        assert!((alignment_identity(&alignment) - 75.0).abs() < 1e-9);
    }
}
