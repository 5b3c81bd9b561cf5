//! Core data types for amplicon clustering.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Sequence`]: An immutable residue string; equality is exact byte equality
//! - [`Candidate`]: A dereplicated sequence paired with its occurrence count
//! - [`OtuSet`]: The append-only, acceptance-ordered list of OTU representatives
//!
//! ## Ordering
//!
//! Two orderings matter and both are externally visible:
//!
//! | List | Order |
//! |------|-------|
//! | Candidate list | count descending, ties by first appearance in the input |
//! | OTU set | acceptance order (first accepted = `OTU_1`) |
//!
//! [`Sequence`]: types::Sequence
//! [`Candidate`]: otu::Candidate
//! [`OtuSet`]: otu::OtuSet

pub mod otu;
pub mod types;
