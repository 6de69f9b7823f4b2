//! Command-line interface for noise-inject
//!
//! # Usage Examples
//!
//! ## Inspect
//! ```bash
//! noise-inject list
//! noise-inject list --format yaml
//! ```
//!
//! ## Statistical noise
//! ```bash
//! noise-inject random --input field.bin --output noisy.bin \
//!   --dtype f32 --dims 64x64 \
//!   --dist-name normal_distribution --dist-args 0,0.01
//! ```
//!
//! ## Bit faults
//! ```bash
//! NOISE_INJECT_SEED=7 noise-inject fault --input field.bin --output bad.bin \
//!   --dtype f64 --injections 4 --mode unset --compressor zlib
//! ```
//!
//! ## Pipelines
//! ```bash
//! noise-inject run --config pipeline.yaml --input field.bin --output packed.bin --dtype f32
//! noise-inject run --config pipeline.yaml --input packed.bin --output restored.bin --decompress
//! ```

use clap::{Parser, Subcommand};
use noise_inject::commands::{
    run_fault, run_list, run_pipeline, run_random, FaultArgs, ListArgs, RandomArgs, RunArgs,
};

#[derive(Parser)]
#[command(name = "noise-inject")]
#[command(about = "A tool for injecting statistical noise and bit faults into numeric buffers")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the registered generators, distributions and injection modes
    List(ListArgs),

    /// Add distributed noise to every element, then compress
    Random(RandomArgs),

    /// Compress, then corrupt bits of the compressed output
    Fault(FaultArgs),

    /// Compress or decompress with a pipeline loaded from YAML or TOML
    Run(RunArgs),
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List(args) => run_list(args),
        Commands::Random(args) => run_random(args),
        Commands::Fault(args) => run_fault(args),
        Commands::Run(args) => run_pipeline(args),
    }
}
