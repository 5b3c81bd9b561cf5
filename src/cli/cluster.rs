use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::{InputArgs, OutputFormat};
use crate::clustering::{dereplicate, ClusteringConfig, GlobalAligner, GreedyClusterer};
use crate::core::otu::OtuSet;
use crate::output::fasta::write_otu_file;
use crate::parsing::fasta::SequenceReader;
use crate::parsing::matrix::ScoringMatrix;

#[derive(Args)]
pub struct ClusterArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output OTU FASTA file
    #[arg(short = 'o', long, alias = "output_file", default_value = "OTU.fasta")]
    pub output_file: PathBuf,

    /// Substitution matrix in NCBI text format (built-in nucleotide matrix by default)
    #[arg(long)]
    pub matrix: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OtuSummary {
    id: String,
    count: usize,
    length: usize,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    input: String,
    output: String,
    min_seq_len: usize,
    min_count: usize,
    candidates: usize,
    otus: Vec<OtuSummary>,
}

impl RunSummary {
    fn new(args: &ClusterArgs, candidates: usize, otus: &OtuSet) -> Self {
        Self {
            input: args.input.amplicon_file.display().to_string(),
            output: args.output_file.display().to_string(),
            min_seq_len: args.input.minseqlen,
            min_count: args.input.mincount,
            candidates,
            otus: otus
                .iter()
                .enumerate()
                .map(|(i, otu)| OtuSummary {
                    id: format!("OTU_{}", i + 1),
                    count: otu.count,
                    length: otu.sequence.len(),
                })
                .collect(),
        }
    }
}

/// Execute cluster subcommand
///
/// The output file is only written once clustering has succeeded.
///
/// # Errors
///
/// Returns an error if the input or matrix cannot be read, an alignment
/// fails, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ClusterArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.input.dereplication_config();

    // Fail on a bad matrix before reading any sequences
    let matrix = match &args.matrix {
        Some(path) => ScoringMatrix::from_file(path)
            .with_context(|| format!("Failed to load scoring matrix {}", path.display()))?,
        None => ScoringMatrix::embedded()?,
    };

    let reader = SequenceReader::open(&args.input.amplicon_file, config.min_length)
        .with_context(|| format!("Failed to open {}", args.input.amplicon_file.display()))?;
    let candidates = dereplicate(reader, config)?;

    if verbose {
        eprintln!(
            "Dereplicated {} candidate sequences (length >= {}, count >= {})",
            candidates.len(),
            config.min_length,
            config.min_count
        );
    }

    let aligner = GlobalAligner::new(matrix);
    let clusterer = GreedyClusterer::new(&aligner, ClusteringConfig::default());
    let otus = clusterer.cluster(&candidates)?;

    write_otu_file(&otus, &args.output_file)
        .with_context(|| format!("Failed to write {}", args.output_file.display()))?;

    let summary = RunSummary::new(&args, candidates.len(), &otus);
    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn print_text_summary(summary: &RunSummary) {
    println!("Clustering Results");
    println!("{}", "=".repeat(60));
    println!("\nInput: {}", summary.input);
    println!("  Minimum length: {}", summary.min_seq_len);
    println!("  Minimum count: {}", summary.min_count);
    println!("  Candidates after dereplication: {}", summary.candidates);
    println!("\nOutput: {}", summary.output);
    println!("  OTUs: {}", summary.otus.len());

    for otu in &summary.otus {
        println!("  {}\t{} reads\t{} bp", otu.id, otu.count, otu.length);
    }
}

fn print_tsv_summary(summary: &RunSummary) {
    println!("otu\tcount\tlength");
    for otu in &summary.otus {
        println!("{}\t{}\t{}", otu.id, otu.count, otu.length);
    }
}
