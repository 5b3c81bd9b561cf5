use crate::core::types::Sequence;

/// A unique sequence with the number of raw input occurrences it collapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub sequence: Sequence,
    pub count: usize,
}

impl Candidate {
    pub fn new(sequence: impl Into<Sequence>, count: usize) -> Self {
        Self {
            sequence: sequence.into(),
            count,
        }
    }
}

/// The accepted OTU representatives, in acceptance order.
///
/// Representatives can only be appended. Nothing is removed, merged or
/// reordered once accepted, so index `i` always maps to `OTU_{i + 1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtuSet {
    representatives: Vec<Candidate>,
}

impl OtuSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a new representative and return its 0-based index
    pub fn push(&mut self, candidate: Candidate) -> usize {
        self.representatives.push(candidate);
        self.representatives.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.representatives.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Candidate] {
        &self.representatives
    }
}

impl<'a> IntoIterator for &'a OtuSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
