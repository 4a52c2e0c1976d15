use clap::Parser;
use tracing_subscriber::EnvFilter;

use varmerge::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("varmerge=debug,info")
    } else {
        EnvFilter::new("varmerge=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Merge(args) => {
            cli::merge::run(&args, cli.format, cli.verbose)?;
        }
        cli::Commands::Matrix(args) => {
            cli::export::run_matrix(&args)?;
        }
        cli::Commands::Effect(args) => {
            cli::export::run_effect(&args)?;
        }
    }

    Ok(())
}
