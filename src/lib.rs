//! # otu-cluster
//!
//! A library for clustering DNA amplicon sequences into Operational Taxonomic
//! Units (OTUs) with an abundance-greedy algorithm.
//!
//! Amplicon sequencing produces many reads that differ only by sequencing
//! error. `otu-cluster` collapses exact duplicates, ranks the survivors by how
//! often they were observed, and lets each sequence either join the first more
//! abundant OTU it is more than 97% identical to or start an OTU of its own.
//!
//! ## Features
//!
//! - **Dereplication**: Exact-duplicate counting with length and count filters
//! - **Global alignment**: Affine-gap Needleman-Wunsch over a substitution matrix
//! - **Greedy clustering**: Most abundant first, first match wins
//! - **Pluggable aligner**: Any [`AlignmentProvider`] can drive the clusterer
//! - **Compressed input**: Plain or gzip/bgzip FASTA
//!
//! ## Example
//!
//! ```rust
//! use otu_cluster::{Candidate, ClusteringConfig, GlobalAligner, GreedyClusterer, ScoringMatrix};
//!
//! let aligner = GlobalAligner::new(ScoringMatrix::embedded().unwrap());
//! let clusterer = GreedyClusterer::new(&aligner, ClusteringConfig::default());
//!
//! let candidates = vec![
//!     Candidate::new("ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT", 50),
//!     Candidate::new("ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGA", 40),
//!     Candidate::new("TTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTT", 30),
//! ];
//!
//! let otus = clusterer.cluster(&candidates).unwrap();
//! assert_eq!(otus.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`clustering`]: Dereplication, alignment, identity and greedy clustering
//! - [`core`]: Sequence, candidate and OTU set types
//! - [`parsing`]: FASTA and substitution matrix parsers
//! - [`output`]: OTU FASTA writer
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod clustering;
pub mod core;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use clustering::alignment::{AlignError, Alignment, AlignmentProvider, GlobalAligner};
pub use clustering::engine::{ClusteringConfig, GreedyClusterer};
pub use core::otu::{Candidate, OtuSet};
pub use core::types::Sequence;
pub use parsing::matrix::ScoringMatrix;
