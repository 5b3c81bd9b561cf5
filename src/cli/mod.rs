//! Command-line interface for otu-cluster.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **cluster**: Dereplicate amplicons and write abundance-greedy OTUs as FASTA
//! - **dereplicate**: Print the ranked candidate list without clustering
//!
//! ## Usage
//!
//! ```text
//! # Cluster with default thresholds (length >= 400, count >= 10)
//! otu-cluster cluster -i amplicon.fasta.gz -o OTU.fasta
//!
//! # Lower thresholds, JSON run summary
//! otu-cluster --format json cluster -i amplicon.fasta.gz -s 200 -m 2
//!
//! # Inspect dereplication only
//! otu-cluster dereplicate -i amplicon.fasta.gz --format tsv
//! ```

use clap::{Parser, Subcommand};

pub mod cluster;
pub mod dereplicate;

#[derive(Parser)]
#[command(name = "otu-cluster")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Abundance-greedy OTU clustering of amplicon sequences")]
#[command(
    long_about = "otu-cluster groups amplicon sequences into Operational Taxonomic Units.\n\nSequences are dereplicated, ranked by abundance, and each one either joins the first existing OTU it is more than 97% identical to or seeds a new OTU:\n- Exact duplicates are collapsed and counted\n- Rare and short sequences are filtered out\n- Identity comes from a global affine-gap alignment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the run summary
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster amplicons into OTUs and write them as FASTA
    Cluster(cluster::ClusterArgs),

    /// Print dereplicated sequences with their counts
    Dereplicate(dereplicate::DereplicateArgs),
}

/// Input options shared by every command
#[derive(clap::Args)]
pub struct InputArgs {
    /// Amplicon file (FASTA, optionally gzip compressed: .fasta.gz)
    #[arg(
        short = 'i',
        long = "amplicon-file",
        alias = "amplicon_file",
        required = true,
        value_parser = crate::utils::validation::existing_file
    )]
    pub amplicon_file: std::path::PathBuf,

    /// Minimum sequence length for dereplication
    #[arg(
        short = 's',
        long,
        alias = "min-seq-len",
        default_value_t = crate::clustering::dereplication::DEFAULT_MIN_SEQ_LEN
    )]
    pub minseqlen: usize,

    /// Minimum count for dereplication
    #[arg(
        short = 'm',
        long,
        alias = "min-count",
        default_value_t = crate::clustering::dereplication::DEFAULT_MIN_COUNT
    )]
    pub mincount: usize,
}

impl InputArgs {
    #[must_use]
    pub fn dereplication_config(&self) -> crate::clustering::DereplicationConfig {
        crate::clustering::DereplicationConfig {
            min_length: self.minseqlen,
            min_count: self.mincount,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
