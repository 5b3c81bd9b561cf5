use std::fmt;

/// Gap symbol emitted by alignment providers in padded sequences
pub const GAP: u8 = b'-';

/// An immutable sequence over a small residue alphabet (e.g. `ACGTN`).
///
/// Stored as raw bytes because FASTA bodies are ASCII and every downstream
/// operation (hashing, alignment, output) works on bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(Vec<u8>);

impl Sequence {
    pub fn new(residues: impl Into<Vec<u8>>) -> Self {
        Self(residues.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Sequence {
    fn from(residues: Vec<u8>) -> Self {
        Self(residues)
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_equality_is_exact() {
        assert_eq!(Sequence::from("ACGT"), Sequence::new(b"ACGT".to_vec()));
        assert_ne!(Sequence::from("ACGT"), Sequence::from("acgt"));
        assert_ne!(Sequence::from("ACGT"), Sequence::from("ACGTA"));
    }

    #[test]
    fn test_sequence_display() {
        let seq = Sequence::from("ACGTN");
        assert_eq!(seq.to_string(), "ACGTN");
        assert_eq!(seq.len(), 5);
        assert!(!seq.is_empty());
        assert!(Sequence::from("").is_empty());
    }
}
