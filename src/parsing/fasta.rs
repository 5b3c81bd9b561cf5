//! Streaming reader for amplicon FASTA files using noodles.
//!
//! Yields the sequence body of every record whose length is at least the
//! configured minimum. Multi-line bodies are concatenated and record names are
//! discarded, since dereplication only looks at residues.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::debug;

use crate::core::types::Sequence;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Lazy, single-pass producer of sequences from a FASTA stream.
///
/// The reader can only be restarted by opening the source again.
pub struct SequenceReader<R> {
    inner: fasta::io::Reader<R>,
    min_length: usize,
    definition: String,
    records_read: usize,
    records_skipped: usize,
    done: bool,
}

impl SequenceReader<Box<dyn BufRead>> {
    /// Open a plain or gzip-compressed FASTA file.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn open(path: &Path, min_length: usize) -> Result<Self, ParseError> {
        let file = File::open(path)?;

        let reader: Box<dyn BufRead> = if is_gzipped(path) {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self::new(reader, min_length))
    }
}

impl<R: BufRead> SequenceReader<R> {
    pub fn new(reader: R, min_length: usize) -> Self {
        Self {
            inner: fasta::io::Reader::new(reader),
            min_length,
            definition: String::new(),
            records_read: 0,
            records_skipped: 0,
            done: false,
        }
    }

    /// Number of records parsed so far, including skipped ones
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Number of records dropped for being empty or shorter than the minimum length
    #[must_use]
    pub fn records_skipped(&self) -> usize {
        self.records_skipped
    }

    fn read_record(&mut self) -> Result<Option<Vec<u8>>, ParseError> {
        // Blank lines before a header carry no record
        loop {
            self.definition.clear();
            let n = self
                .inner
                .read_definition(&mut self.definition)
                .map_err(|e| {
                    ParseError::Noodles(format!("Failed to read FASTA definition: {e}"))
                })?;

            if n == 0 {
                return Ok(None);
            }
            if !self.definition.trim().is_empty() {
                break;
            }
        }

        if !self.definition.starts_with('>') {
            return Err(ParseError::InvalidFormat(format!(
                "expected a '>' header line, found: {}",
                self.definition.chars().take(40).collect::<String>()
            )));
        }

        let mut residues = Vec::new();
        self.inner
            .read_sequence(&mut residues)
            .map_err(|e| ParseError::Noodles(format!("Failed to read FASTA sequence: {e}")))?;
        residues.retain(|b| !b.is_ascii_whitespace());

        Ok(Some(residues))
    }
}

impl<R: BufRead> Iterator for SequenceReader<R> {
    type Item = Result<Sequence, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.read_record() {
                Ok(Some(residues)) => {
                    self.records_read += 1;
                    if residues.is_empty() || residues.len() < self.min_length {
                        self.records_skipped += 1;
                        continue;
                    }
                    return Some(Ok(Sequence::from(residues)));
                }
                Ok(None) => {
                    self.done = true;
                    debug!(
                        read = self.records_read,
                        skipped = self.records_skipped,
                        "Finished reading FASTA stream"
                    );
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
