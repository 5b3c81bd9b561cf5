use anyhow::Context;
use clap::Args;

use crate::cli::{InputArgs, OutputFormat};
use crate::clustering::dereplicate;
use crate::core::otu::Candidate;
use crate::parsing::fasta::SequenceReader;

#[derive(Args)]
pub struct DereplicateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute dereplicate subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DereplicateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.input.dereplication_config();
    let reader = SequenceReader::open(&args.input.amplicon_file, config.min_length)
        .with_context(|| format!("Failed to open {}", args.input.amplicon_file.display()))?;
    let candidates = dereplicate(reader, config)?;

    if verbose {
        eprintln!("Dereplicated {} candidate sequences", candidates.len());
    }

    match format {
        OutputFormat::Text => print_text_candidates(&candidates),
        OutputFormat::Json => print_json_candidates(&candidates)?,
        OutputFormat::Tsv => print_tsv_candidates(&candidates),
    }

    Ok(())
}

fn print_text_candidates(candidates: &[Candidate]) {
    if candidates.is_empty() {
        eprintln!("No sequences passed the length and count filters.");
        return;
    }
    for (rank, candidate) in candidates.iter().enumerate() {
        println!(
            "{:>6}  count={:<8} length={}",
            rank + 1,
            candidate.count,
            candidate.sequence.len()
        );
    }
}

fn print_json_candidates(candidates: &[Candidate]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = candidates
        .iter()
        .map(|c| {
            serde_json::json!({
                "sequence": c.sequence.to_string(),
                "count": c.count,
                "length": c.sequence.len(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_candidates(candidates: &[Candidate]) {
    println!("sequence\tcount");
    for c in candidates {
        println!("{}\t{}", c.sequence, c.count);
    }
}
