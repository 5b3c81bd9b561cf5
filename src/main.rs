use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod clustering;
mod core;
mod output;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("otu_cluster=debug,info")
    } else {
        EnvFilter::new("otu_cluster=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Cluster(args) => {
            cli::cluster::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Dereplicate(args) => {
            cli::dereplicate::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
