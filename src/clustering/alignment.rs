//! Global pairwise alignment.
//!
//! [`AlignmentProvider`] is the seam the clusterer depends on; any backend that
//! returns two equal-length, gap-padded sequences can be plugged in.
//! [`GlobalAligner`] is the built-in Needleman-Wunsch implementation with
//! Gotoh affine gap penalties.

use thiserror::Error;

use crate::core::types::{Sequence, GAP};
use crate::parsing::matrix::ScoringMatrix;

/// Penalty for opening a gap
pub const DEFAULT_GAP_OPEN: i32 = -1;

/// Penalty for each additional position of an open gap
pub const DEFAULT_GAP_EXTEND: i32 = -1;

/// Avoids overflow when penalties are added to an unreachable cell
const UNREACHABLE: i32 = i32::MIN / 4;

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Residue '{residue}' at position {position} is not in the scoring matrix")]
    UnknownResidue { residue: char, position: usize },

    #[error("Cannot align an empty sequence")]
    EmptySequence,

    #[error("Alignment backend failed: {0}")]
    Backend(String),
}

/// Two gap-padded sequences of equal length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub first: Vec<u8>,
    pub second: Vec<u8>,
}

/// Capability to globally align two sequences
pub trait AlignmentProvider {
    /// Align `first` against `second`, returning both padded with [`GAP`]
    ///
    /// # Errors
    ///
    /// Returns an `AlignError` if the pair cannot be aligned.
    fn align(&self, first: &Sequence, second: &Sequence) -> Result<Alignment, AlignError>;
}

/// Gap penalties; a gap of length `k` costs `open + (k - 1) * extend`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapPenalties {
    pub open: i32,
    pub extend: i32,
}

impl Default for GapPenalties {
    fn default() -> Self {
        Self {
            open: DEFAULT_GAP_OPEN,
            extend: DEFAULT_GAP_EXTEND,
        }
    }
}

/// DP state a cell was reached through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Residue aligned to residue
    Diagonal,
    /// Residue of the first sequence against a gap
    GapInSecond,
    /// Gap against a residue of the second sequence
    GapInFirst,
}

/// Needleman-Wunsch global aligner with affine gaps
#[derive(Debug, Clone)]
pub struct GlobalAligner {
    matrix: ScoringMatrix,
    gaps: GapPenalties,
}

impl GlobalAligner {
    pub fn new(matrix: ScoringMatrix) -> Self {
        Self::with_gaps(matrix, GapPenalties::default())
    }

    pub fn with_gaps(matrix: ScoringMatrix, gaps: GapPenalties) -> Self {
        Self { matrix, gaps }
    }

    fn encode(&self, seq: &Sequence) -> Result<Vec<usize>, AlignError> {
        if seq.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        seq.as_bytes()
            .iter()
            .enumerate()
            .map(|(position, &b)| {
                let residue = char::from(b);
                let unknown = AlignError::UnknownResidue { residue, position };
                self.matrix.index_of(b).ok_or(unknown)
            })
            .collect()
    }
}

/// Best of three predecessor scores, preferring earlier entries on ties
fn best(candidates: [(i32, State); 3]) -> (i32, State) {
    let mut winner = candidates[0];
    for c in &candidates[1..] {
        if c.0 > winner.0 {
            winner = *c;
        }
    }
    winner
}

impl AlignmentProvider for GlobalAligner {
    fn align(&self, first: &Sequence, second: &Sequence) -> Result<Alignment, AlignError> {
        let a = self.encode(first)?;
        let b = self.encode(second)?;
        let (n, m) = (a.len(), b.len());
        let width = m + 1;
        let cells = (n + 1) * width;
        let GapPenalties { open, extend } = self.gaps;

        // Score and back-pointer per state, row-major over (i, j)
        let mut diag = vec![UNREACHABLE; cells];
        let mut up = vec![UNREACHABLE; cells];
        let mut left = vec![UNREACHABLE; cells];
        let mut diag_from = vec![State::Diagonal; cells];
        let mut up_from = vec![State::Diagonal; cells];
        let mut left_from = vec![State::Diagonal; cells];

        diag[0] = 0;

        for i in 0..=n {
            for j in 0..=m {
                let cell = i * width + j;
                if i > 0 && j > 0 {
                    let prev = (i - 1) * width + (j - 1);
                    let (score, from) = best([
                        (diag[prev], State::Diagonal),
                        (up[prev], State::GapInSecond),
                        (left[prev], State::GapInFirst),
                    ]);
                    diag[cell] = score + self.matrix.score_at(a[i - 1], b[j - 1]);
                    diag_from[cell] = from;
                }
                if i > 0 {
                    let prev = (i - 1) * width + j;
                    let (score, from) = best([
                        (diag[prev] + open, State::Diagonal),
                        (up[prev] + extend, State::GapInSecond),
                        (left[prev] + open, State::GapInFirst),
                    ]);
                    up[cell] = score;
                    up_from[cell] = from;
                }
                if j > 0 {
                    let prev = i * width + (j - 1);
                    let (score, from) = best([
                        (diag[prev] + open, State::Diagonal),
                        (up[prev] + open, State::GapInSecond),
                        (left[prev] + extend, State::GapInFirst),
                    ]);
                    left[cell] = score;
                    left_from[cell] = from;
                }
            }
        }

        let last = n * width + m;
        let (_, mut state) = best([
            (diag[last], State::Diagonal),
            (up[last], State::GapInSecond),
            (left[last], State::GapInFirst),
        ]);

        let first = first.as_bytes();
        let second = second.as_bytes();
        let mut padded_first = Vec::with_capacity(n + m);
        let mut padded_second = Vec::with_capacity(n + m);
        let (mut i, mut j) = (n, m);

        while i > 0 || j > 0 {
            let cell = i * width + j;
            match state {
                State::Diagonal => {
                    padded_first.push(first[i - 1]);
                    padded_second.push(second[j - 1]);
                    state = diag_from[cell];
                    i -= 1;
                    j -= 1;
                }
                State::GapInSecond => {
                    padded_first.push(first[i - 1]);
                    padded_second.push(GAP);
                    state = up_from[cell];
                    i -= 1;
                }
                State::GapInFirst => {
                    padded_first.push(GAP);
                    padded_second.push(second[j - 1]);
                    state = left_from[cell];
                    j -= 1;
                }
            }
        }

        padded_first.reverse();
        padded_second.reverse();

        Ok(Alignment {
            first: padded_first,
            second: padded_second,
        })
    }
}
