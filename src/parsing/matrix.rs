//! Parser for substitution matrices in the NCBI text layout.
//!
//! ```text
//! #  comment
//!    A  C  G  T
//! A  5 -4 -4 -4
//! C -4  5 -4 -4
//! G -4 -4  5 -4
//! T -4 -4 -4  5
//! ```
//!
//! Residue lookup is case-insensitive. An embedded nucleotide matrix is
//! available through [`ScoringMatrix::embedded`].

use std::path::Path;

use thiserror::Error;

use crate::core::types::GAP;

/// Default nucleotide matrix, validated by `build.rs`
const EMBEDDED_MATRIX: &str = include_str!("../../data/MATCH");

const NO_RESIDUE: u8 = u8::MAX;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("IO error reading matrix: {0}")]
    Io(#[from] std::io::Error),

    #[error("Matrix has no header line")]
    MissingHeader,

    #[error("Invalid residue symbol '{0}' in matrix header (expected a single character)")]
    InvalidSymbol(String),

    #[error("Residue '{0}' is reserved for alignment gaps")]
    ReservedSymbol(char),

    #[error("Duplicate residue '{0}' in matrix header")]
    DuplicateResidue(char),

    #[error("Line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    #[error("Matrix has {rows} rows but {columns} columns")]
    NotSquare { rows: usize, columns: usize },

    #[error("Matrix is not symmetric: score({a}, {b}) != score({b}, {a})")]
    Asymmetric { a: char, b: char },
}

/// A symmetric substitution matrix over a residue alphabet
#[derive(Debug, Clone)]
pub struct ScoringMatrix {
    alphabet: Vec<u8>,
    /// Byte -> alphabet index, `NO_RESIDUE` when absent
    lookup: [u8; 256],
    scores: Vec<i32>,
}

impl ScoringMatrix {
    /// Load the matrix compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns a `MatrixError` only if the embedded matrix is malformed, which
    /// `build.rs` rules out.
    pub fn embedded() -> Result<Self, MatrixError> {
        Self::parse(EMBEDDED_MATRIX)
    }

    /// Load a matrix from a file
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Io` if the file cannot be read, or any other
    /// `MatrixError` if its content is malformed.
    pub fn from_file(path: &Path) -> Result<Self, MatrixError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a matrix from its text form
    ///
    /// # Errors
    ///
    /// Returns a `MatrixError` if the header is missing or invalid, a row is
    /// malformed, the matrix is not square, or it is not symmetric.
    pub fn parse(text: &str) -> Result<Self, MatrixError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let (_, header) = lines.next().ok_or(MatrixError::MissingHeader)?;
        let alphabet = parse_symbols(header)?;
        let n = alphabet.len();

        let mut lookup = [NO_RESIDUE; 256];
        for (i, &residue) in alphabet.iter().enumerate() {
            if lookup[usize::from(residue)] != NO_RESIDUE {
                return Err(MatrixError::DuplicateResidue(char::from(residue)));
            }
            #[allow(clippy::cast_possible_truncation)] // alphabet is at most 255 symbols
            let index = i as u8;
            lookup[usize::from(residue.to_ascii_uppercase())] = index;
            lookup[usize::from(residue.to_ascii_lowercase())] = index;
        }

        // Rows may come in any order; place each by its label
        let mut scores = vec![0i32; n * n];
        let mut seen = vec![false; n];
        let mut rows = 0usize;

        for (line_no, line) in lines {
            let mut fields = line.split_whitespace();
            let label = fields.next().unwrap_or_default();
            let row = single_symbol(label)
                .map(|b| lookup[usize::from(b)])
                .filter(|&idx| idx != NO_RESIDUE)
                .ok_or_else(|| MatrixError::InvalidRow {
                    line: line_no,
                    message: format!("row label '{label}' is not a header residue"),
                })?;
            let row = usize::from(row);

            if seen[row] {
                return Err(MatrixError::InvalidRow {
                    line: line_no,
                    message: format!("duplicate row for residue '{label}'"),
                });
            }

            let values: Vec<i32> = fields
                .map(str::parse::<i32>)
                .collect::<Result<_, _>>()
                .map_err(|e| MatrixError::InvalidRow {
                    line: line_no,
                    message: format!("invalid score: {e}"),
                })?;

            if values.len() != n {
                return Err(MatrixError::InvalidRow {
                    line: line_no,
                    message: format!("expected {n} scores, found {}", values.len()),
                });
            }

            scores[row * n..(row + 1) * n].copy_from_slice(&values);
            seen[row] = true;
            rows += 1;
        }

        if rows != n {
            return Err(MatrixError::NotSquare { rows, columns: n });
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if scores[i * n + j] != scores[j * n + i] {
                    return Err(MatrixError::Asymmetric {
                        a: char::from(alphabet[i]),
                        b: char::from(alphabet[j]),
                    });
                }
            }
        }

        Ok(Self {
            alphabet,
            lookup,
            scores,
        })
    }

    /// Residue symbols in header order
    #[must_use]
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Alphabet index of a residue, if the matrix knows it
    #[must_use]
    pub fn index_of(&self, residue: u8) -> Option<usize> {
        match self.lookup[usize::from(residue)] {
            NO_RESIDUE => None,
            idx => Some(usize::from(idx)),
        }
    }

    /// Score for two alphabet indices as returned by [`Self::index_of`]
    #[must_use]
    pub fn score_at(&self, i: usize, j: usize) -> i32 {
        self.scores[i * self.alphabet.len() + j]
    }

    /// Score for two residues
    #[must_use]
    pub fn score(&self, a: u8, b: u8) -> Option<i32> {
        Some(self.score_at(self.index_of(a)?, self.index_of(b)?))
    }
}

fn single_symbol(field: &str) -> Option<u8> {
    match field.as_bytes() {
        [b] if b.is_ascii_graphic() => Some(*b),
        _ => None,
    }
}

fn parse_symbols(header: &str) -> Result<Vec<u8>, MatrixError> {
    let mut symbols = Vec::new();
    for field in header.split_whitespace() {
        match single_symbol(field) {
            Some(GAP) => return Err(MatrixError::ReservedSymbol(char::from(GAP))),
            Some(symbol) => symbols.push(symbol),
            None => return Err(MatrixError::InvalidSymbol(field.to_string())),
        }
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "# test matrix\n   A  C\nA  2 -1\nC -1  2\n";

    #[test]
    fn test_parse_small_matrix() {
        let matrix = ScoringMatrix::parse(SMALL).unwrap();
        assert_eq!(matrix.alphabet(), b"AC");
        assert_eq!(matrix.score(b'A', b'A'), Some(2));
        assert_eq!(matrix.score(b'A', b'C'), Some(-1));
        assert_eq!(matrix.score(b'C', b'A'), Some(-1));
        assert_eq!(matrix.score(b'A', b'G'), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let matrix = ScoringMatrix::parse(SMALL).unwrap();
        assert_eq!(matrix.score(b'a', b'c'), Some(-1));
        assert_eq!(matrix.index_of(b'c'), matrix.index_of(b'C'));
    }

    #[test]
    fn test_rows_in_any_order() {
        let text = "   A  C\nC -1  3\nA  2 -1\n";
        let matrix = ScoringMatrix::parse(text).unwrap();
        assert_eq!(matrix.score(b'C', b'C'), Some(3));
        assert_eq!(matrix.score(b'A', b'A'), Some(2));
    }

    #[test]
    fn test_embedded_matrix() {
        let matrix = ScoringMatrix::embedded().unwrap();
        assert_eq!(matrix.alphabet(), b"ACGTN");
        assert_eq!(matrix.score(b'A', b'A'), Some(5));
        assert_eq!(matrix.score(b'A', b'T'), Some(-4));
        assert_eq!(matrix.score(b'N', b'G'), Some(-2));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            ScoringMatrix::parse("# only comments\n\n"),
            Err(MatrixError::MissingHeader)
        ));
    }

    #[test]
    fn test_gap_symbol_is_not_a_residue() {
        let text = "   A  -\nA  5 -1\n- -1  5\n";
        assert!(matches!(
            ScoringMatrix::parse(text),
            Err(MatrixError::ReservedSymbol('-'))
        ));
        assert!(matches!(
            ScoringMatrix::parse("   A  C\n-  1  1\nA 1 1\nC 1 1\n"),
            Err(MatrixError::InvalidRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let text = "   A  C\nA  2 -1\nC -3  2\n";
        assert!(matches!(
            ScoringMatrix::parse(text),
            Err(MatrixError::Asymmetric { .. })
        ));
    }

    #[test]
    fn test_missing_row() {
        let text = "   A  C\nA  2 -1\n";
        assert!(matches!(
            ScoringMatrix::parse(text),
            Err(MatrixError::NotSquare {
                rows: 1,
                columns: 2
            })
        ));
    }

    #[test]
    fn test_bad_rows() {
        // Unknown label
        assert!(matches!(
            ScoringMatrix::parse("   A\nG 1\n"),
            Err(MatrixError::InvalidRow { line: 2, .. })
        ));
        // Wrong number of scores
        assert!(matches!(
            ScoringMatrix::parse("   A  C\nA  2\nC -1 2\n"),
            Err(MatrixError::InvalidRow { line: 2, .. })
        ));
        // Non-numeric score
        assert!(matches!(
            ScoringMatrix::parse("   A\nA x\n"),
            Err(MatrixError::InvalidRow { .. })
        ));
        // Duplicate header residue
        assert!(matches!(
            ScoringMatrix::parse("   A  a\nA 1 1\n"),
            Err(MatrixError::DuplicateResidue('a'))
        ));
    }
}
