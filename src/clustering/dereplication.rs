use std::collections::HashMap;

use tracing::info;

use crate::core::otu::Candidate;
use crate::core::types::Sequence;

/// Default minimum sequence length for dereplication
pub const DEFAULT_MIN_SEQ_LEN: usize = 400;

/// Default minimum occurrence count for dereplication
pub const DEFAULT_MIN_COUNT: usize = 10;

/// Filters applied while collapsing duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DereplicationConfig {
    /// Sequences shorter than this are ignored
    pub min_length: usize,
    /// Unique sequences seen fewer times than this are discarded
    pub min_count: usize,
}

impl Default for DereplicationConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_SEQ_LEN,
            min_count: DEFAULT_MIN_COUNT,
        }
    }
}

/// Collapse a sequence stream into the ranked candidate list.
///
/// The stream is drained once. Every distinct sequence of at least
/// `min_length` residues is counted; those seen at least `min_count` times are
/// returned sorted by count descending. Equal counts keep the order in which
/// the sequences first appeared in the stream.
///
/// # Errors
///
/// Returns the first error produced by the stream.
pub fn dereplicate<I, E>(sequences: I, config: DereplicationConfig) -> Result<Vec<Candidate>, E>
where
    I: IntoIterator<Item = Result<Sequence, E>>,
{
    // sequence -> (count, first appearance)
    let mut counts: HashMap<Sequence, (usize, usize)> = HashMap::new();
    let mut total = 0usize;

    for result in sequences {
        let sequence = result?;
        if sequence.len() < config.min_length {
            continue;
        }
        let first_seen = counts.len();
        counts.entry(sequence).or_insert((0, first_seen)).0 += 1;
        total += 1;
    }

    let unique = counts.len();
    let mut ranked: Vec<(Sequence, usize, usize)> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= config.min_count)
        .map(|(sequence, (count, first_seen))| (sequence, count, first_seen))
        .collect();

    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));

    info!(
        sequences = total,
        unique,
        candidates = ranked.len(),
        min_count = config.min_count,
        "Dereplicated input"
    );

    Ok(ranked
        .into_iter()
        .map(|(sequence, count, _)| Candidate { sequence, count })
        .collect())
}
