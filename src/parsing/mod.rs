//! Parsers for the inputs of a clustering run.
//!
//! This module provides parsers for:
//!
//! - **Amplicon FASTA files**: Plain or gzip/bgzip compressed, read lazily as a
//!   stream of [`Sequence`](crate::core::types::Sequence)s above a minimum length
//! - **Substitution matrices**: NCBI-style text matrices used by the global aligner
//!
//! ## Example
//!
//! ```rust,no_run
//! use otu_cluster::parsing::fasta::SequenceReader;
//! use std::path::Path;
//!
//! let reader = SequenceReader::open(Path::new("amplicon.fasta.gz"), 400).unwrap();
//! for sequence in reader {
//!     println!("{} bp", sequence.unwrap().len());
//! }
//! ```
//!
//! ## Matrix Layout
//!
//! | Line | Content |
//! |------|---------|
//! | `#...` | Comment, ignored |
//! | first non-comment | Column residue symbols |
//! | following | Row symbol, then one integer score per column |

pub mod fasta;
pub mod matrix;
