use tracing::{debug, info};

use crate::clustering::alignment::{AlignError, AlignmentProvider};
use crate::clustering::scoring::alignment_identity;
use crate::core::otu::{Candidate, OtuSet};

/// Identity (percent) above which a candidate joins an existing OTU
pub const DEFAULT_IDENTITY_THRESHOLD: f64 = 97.0;

/// Configuration for the greedy clusterer
#[derive(Debug, Clone, Copy)]
pub struct ClusteringConfig {
    /// A candidate is absorbed when its identity to a representative is
    /// strictly greater than this value
    pub identity_threshold: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            identity_threshold: DEFAULT_IDENTITY_THRESHOLD,
        }
    }
}

/// Outcome of clustering one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assignment {
    /// The candidate became a new representative at this index
    NewOtu { index: usize },
    /// The candidate matched the representative at `otu` and was dropped
    Absorbed { otu: usize, identity: f64 },
}

/// Abundance-greedy clustering engine.
///
/// Candidates must arrive most abundant first. Each one is compared against
/// the accepted representatives oldest first, and the first representative it
/// exceeds the identity threshold against absorbs it. A candidate that matches
/// none becomes a new representative. This is a first-match decision, not a
/// best-match search, so the result depends on candidate order.
pub struct GreedyClusterer<'a, P: AlignmentProvider> {
    aligner: &'a P,
    config: ClusteringConfig,
}

impl<'a, P: AlignmentProvider> GreedyClusterer<'a, P> {
    pub fn new(aligner: &'a P, config: ClusteringConfig) -> Self {
        Self { aligner, config }
    }

    /// Cluster a ranked candidate list into a fresh OTU set
    ///
    /// # Errors
    ///
    /// Returns the first `AlignError` from the provider; no partial result is kept.
    pub fn cluster(&self, candidates: &[Candidate]) -> Result<OtuSet, AlignError> {
        self.extend(OtuSet::new(), candidates)
    }

    /// Continue clustering into an existing OTU set
    ///
    /// # Errors
    ///
    /// Returns the first `AlignError` from the provider.
    pub fn extend(
        &self,
        mut otus: OtuSet,
        candidates: &[Candidate],
    ) -> Result<OtuSet, AlignError> {
        let mut absorbed = 0usize;

        for candidate in candidates {
            match self.assign(&mut otus, candidate)? {
                Assignment::NewOtu { index } => {
                    debug!(
                        otu = index + 1,
                        count = candidate.count,
                        length = candidate.sequence.len(),
                        "New OTU"
                    );
                }
                Assignment::Absorbed { otu, identity } => {
                    absorbed += 1;
                    debug!(
                        otu = otu + 1,
                        count = candidate.count,
                        identity,
                        "Candidate absorbed"
                    );
                }
            }
        }

        info!(
            candidates = candidates.len(),
            otus = otus.len(),
            absorbed,
            "Greedy clustering complete"
        );

        Ok(otus)
    }

    /// Decide membership for one candidate, appending it when it is new
    ///
    /// # Errors
    ///
    /// Returns an `AlignError` if aligning against any representative fails.
    pub fn assign(
        &self,
        otus: &mut OtuSet,
        candidate: &Candidate,
    ) -> Result<Assignment, AlignError> {
        for (otu, representative) in otus.iter().enumerate() {
            let alignment = self
                .aligner
                .align(&candidate.sequence, &representative.sequence)?;
            let identity = alignment_identity(&alignment);

            if identity > self.config.identity_threshold {
                return Ok(Assignment::Absorbed { otu, identity });
            }
        }

        let index = otus.push(candidate.clone());
        Ok(Assignment::NewOtu { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::alignment::{Alignment, GlobalAligner};
    use crate::core::types::Sequence;
    use crate::parsing::matrix::ScoringMatrix;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Builds a 100-column alignment whose identity is exactly `percent`
    fn alignment_with_identity(percent: usize) -> Alignment {
        let first = vec![b'A'; 100];
        let mut second = vec![b'A'; 100];
        for b in second.iter_mut().skip(percent) {
            *b = b'C';
        }
        Alignment { first, second }
    }

    /// Returns fixed identities per (candidate, representative) pair and
    /// records every call
    #[derive(Default)]
    struct StubAligner {
        identities: HashMap<(String, String), usize>,
        calls: RefCell<Vec<(String, String)>>,
        fail_on: Option<String>,
    }

    impl StubAligner {
        fn with(mut self, a: &str, b: &str, percent: usize) -> Self {
            self.identities.insert((a.to_string(), b.to_string()), percent);
            self
        }
    }

    impl AlignmentProvider for StubAligner {
        fn align(&self, first: &Sequence, second: &Sequence) -> Result<Alignment, AlignError> {
            let key = (first.to_string(), second.to_string());
            self.calls.borrow_mut().push(key.clone());
            if self.fail_on.as_deref() == Some(key.0.as_str()) {
                return Err(AlignError::Backend("matrix unavailable".to_string()));
            }
            let percent = self.identities.get(&key).copied().unwrap_or(0);
            Ok(alignment_with_identity(percent))
        }
    }

    fn sequences(otus: &OtuSet) -> Vec<(String, usize)> {
        otus.iter()
            .map(|c| (c.sequence.to_string(), c.count))
            .collect()
    }

    #[test]
    fn test_empty_candidates() {
        let stub = StubAligner::default();
        let otus = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[])
            .unwrap();
        assert!(otus.is_empty());
        assert!(stub.calls.borrow().is_empty());
    }

    #[test]
    fn test_single_candidate_is_an_otu() {
        let stub = StubAligner::default();
        let otus = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[Candidate::new("AAAA", 10)])
            .unwrap();
        assert_eq!(sequences(&otus), vec![("AAAA".to_string(), 10)]);
    }

    #[test]
    fn test_similar_candidate_is_absorbed() {
        let stub = StubAligner::default().with("CCCC", "AAAA", 98);
        let otus = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[Candidate::new("AAAA", 50), Candidate::new("CCCC", 40)])
            .unwrap();
        assert_eq!(sequences(&otus), vec![("AAAA".to_string(), 50)]);
    }

    #[test]
    fn test_dissimilar_candidates_both_kept_in_order() {
        let stub = StubAligner::default().with("CCCC", "AAAA", 96);
        let otus = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[Candidate::new("AAAA", 50), Candidate::new("CCCC", 40)])
            .unwrap();
        assert_eq!(
            sequences(&otus),
            vec![("AAAA".to_string(), 50), ("CCCC".to_string(), 40)]
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let stub = StubAligner::default().with("CCCC", "AAAA", 97);
        let otus = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[Candidate::new("AAAA", 50), Candidate::new("CCCC", 40)])
            .unwrap();
        assert_eq!(otus.len(), 2);
    }

    #[test]
    fn test_first_match_short_circuits() {
        // GGGG matches both representatives; only the oldest is consulted
        let stub = StubAligner::default()
            .with("GGGG", "AAAA", 99)
            .with("GGGG", "CCCC", 100);
        let clusterer = GreedyClusterer::new(&stub, ClusteringConfig::default());

        let mut otus = clusterer
            .cluster(&[Candidate::new("AAAA", 50), Candidate::new("CCCC", 40)])
            .unwrap();
        stub.calls.borrow_mut().clear();

        let assignment = clusterer
            .assign(&mut otus, &Candidate::new("GGGG", 30))
            .unwrap();

        assert_eq!(
            assignment,
            Assignment::Absorbed {
                otu: 0,
                identity: 99.0
            }
        );
        assert_eq!(
            *stub.calls.borrow(),
            vec![("GGGG".to_string(), "AAAA".to_string())]
        );
        assert_eq!(otus.len(), 2);
    }

    #[test]
    fn test_compares_against_representatives_oldest_first() {
        let stub = StubAligner::default().with("TTTT", "CCCC", 99);
        let clusterer = GreedyClusterer::new(&stub, ClusteringConfig::default());
        let otus = clusterer
            .cluster(&[
                Candidate::new("AAAA", 50),
                Candidate::new("CCCC", 40),
                Candidate::new("TTTT", 30),
            ])
            .unwrap();

        assert_eq!(otus.len(), 2);
        let calls = stub.calls.borrow();
        assert_eq!(
            calls.last().cloned(),
            Some(("TTTT".to_string(), "CCCC".to_string()))
        );
        assert_eq!(
            calls[calls.len() - 2],
            ("TTTT".to_string(), "AAAA".to_string())
        );
    }

    #[test]
    fn test_absorbed_candidates_never_become_comparison_targets() {
        // CCCC is absorbed by AAAA; TTTT would match CCCC but must not see it
        let stub = StubAligner::default()
            .with("CCCC", "AAAA", 99)
            .with("TTTT", "CCCC", 100);
        let otus = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[
                Candidate::new("AAAA", 50),
                Candidate::new("CCCC", 40),
                Candidate::new("TTTT", 30),
            ])
            .unwrap();

        assert_eq!(
            sequences(&otus),
            vec![("AAAA".to_string(), 50), ("TTTT".to_string(), 30)]
        );
    }

    #[test]
    fn test_extend_keeps_existing_representatives() {
        let stub = StubAligner::default();
        let clusterer = GreedyClusterer::new(&stub, ClusteringConfig::default());
        let otus = clusterer.cluster(&[Candidate::new("AAAA", 50)]).unwrap();
        let before = otus.clone();

        let otus = clusterer.extend(otus, &[Candidate::new("CCCC", 40)]).unwrap();

        assert_eq!(otus.len(), 2);
        assert_eq!(otus.as_slice()[0], before.as_slice()[0]);
    }

    #[test]
    fn test_alignment_failure_aborts() {
        let stub = StubAligner {
            fail_on: Some("CCCC".to_string()),
            ..StubAligner::default()
        };
        let result = GreedyClusterer::new(&stub, ClusteringConfig::default())
            .cluster(&[Candidate::new("AAAA", 50), Candidate::new("CCCC", 40)]);
        assert!(matches!(result, Err(AlignError::Backend(_))));
    }

    #[test]
    fn test_custom_threshold() {
        let stub = StubAligner::default().with("CCCC", "AAAA", 90);
        let config = ClusteringConfig {
            identity_threshold: 85.0,
        };
        let otus = GreedyClusterer::new(&stub, config)
            .cluster(&[Candidate::new("AAAA", 50), Candidate::new("CCCC", 40)])
            .unwrap();
        assert_eq!(otus.len(), 1);
    }

    #[test]
    fn test_deterministic_with_real_aligner() {
        let aligner = GlobalAligner::new(ScoringMatrix::embedded().unwrap());
        let base = "ACGT".repeat(25);
        let mut variant = base.clone().into_bytes();
        variant[50] = b'T';
        let variant = String::from_utf8(variant).unwrap();
        let other = "A".repeat(100);

        let candidates = vec![
            Candidate::new(base.as_str(), 50),
            Candidate::new(variant.as_str(), 40),
            Candidate::new(other.as_str(), 30),
        ];

        let clusterer = GreedyClusterer::new(&aligner, ClusteringConfig::default());
        let first = clusterer.cluster(&candidates).unwrap();
        let second = clusterer.cluster(&candidates).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|c| c.count).collect::<Vec<_>>(),
            vec![50, 30]
        );
    }
}
