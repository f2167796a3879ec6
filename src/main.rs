//! npyfixtures - writes the `.npy` fixture set used by parser tests

use clap::Parser;
use npyfixtures::{FixtureConfig, FixtureGenerator, Result, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "npyfixtures",
    about = "Generate .npy test fixtures with checkable random contents",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Output directory
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Random seed for reproducible fixtures
    #[arg(long)]
    seed: Option<u64>,

    /// Show progress bar
    #[arg(short = 'p', long)]
    progress: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "npyfixtures=debug"
    } else {
        "npyfixtures=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = FixtureConfig::default().with_output_dir(cli.output);

    let mut generator = FixtureGenerator::new(config);
    if let Some(seed) = cli.seed {
        generator = generator.with_seed(seed);
    }
    if cli.progress {
        generator = generator.with_progress();
    }

    let result = generator.run()?;
    result.print_summary();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_fixed_table() {
        let cli = Cli::parse_from(["npyfixtures"]);
        assert_eq!(cli.output, PathBuf::from("test/data"));
        assert!(cli.seed.is_none());
    }
}
