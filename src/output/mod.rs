//! Writers for clustering results.
//!
//! - [`fasta`]: OTU representatives as `>OTU_<n> occurrence:<count>` records

pub mod fasta;
