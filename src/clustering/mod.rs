//! Dereplication and abundance-greedy OTU clustering.
//!
//! This module provides the clustering pipeline:
//!
//! - [`dereplicate`]: Collapses a sequence stream into a ranked [`Candidate`] list
//! - [`GlobalAligner`]: Affine-gap Needleman-Wunsch behind the [`AlignmentProvider`] seam
//! - [`percent_identity`]: Identity of two padded sequences over the shorter raw length
//! - [`GreedyClusterer`]: Assigns candidates to OTUs, most abundant first
//!
//! ## Algorithm
//!
//! 1. **Dereplicate**: count exact duplicates, drop rare sequences, sort by count
//! 2. **Cluster**: for each candidate, align it against every accepted
//!    representative in acceptance order and stop at the first one it is more
//!    than 97% identical to
//! 3. **Accept**: a candidate that matched nothing becomes a new representative
//!
//! Worst case is O(n²) alignments for n unique sequences.
//!
//! ## Example
//!
//! ```rust,no_run
//! use otu_cluster::clustering::{dereplicate, DereplicationConfig};
//! use otu_cluster::{ClusteringConfig, GlobalAligner, GreedyClusterer, ScoringMatrix};
//! use otu_cluster::parsing::fasta::SequenceReader;
//! use std::path::Path;
//!
//! let config = DereplicationConfig::default();
//! let reader = SequenceReader::open(Path::new("amplicon.fasta.gz"), config.min_length).unwrap();
//! let candidates = dereplicate(reader, config).unwrap();
//!
//! let aligner = GlobalAligner::new(ScoringMatrix::embedded().unwrap());
//! let otus = GreedyClusterer::new(&aligner, ClusteringConfig::default())
//!     .cluster(&candidates)
//!     .unwrap();
//!
//! for (i, otu) in otus.iter().enumerate() {
//!     println!("OTU_{} occurrence:{}", i + 1, otu.count);
//! }
//! ```
//!
//! [`Candidate`]: crate::core::otu::Candidate

pub mod alignment;
pub mod dereplication;
pub mod engine;
pub mod scoring;

pub use alignment::{AlignError, Alignment, AlignmentProvider, GapPenalties, GlobalAligner};
pub use dereplication::{dereplicate, DereplicationConfig};
pub use engine::{Assignment, ClusteringConfig, GreedyClusterer};
pub use scoring::{alignment_identity, percent_identity};
