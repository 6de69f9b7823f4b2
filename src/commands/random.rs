//! Random command handler.

use crate::config::resolve_compressor;
use crate::BufferOpts;
use clap::Parser;
use compressor::Compressor;
use error_injector::{RandomErrorInjector, RandomErrorInjectorOptions};

#[derive(Parser, Clone, Debug)]
pub struct RandomArgs {
    #[command(flatten)]
    pub buffer: BufferOpts,

    /// Seed for reproducible runs (default: drawn from entropy)
    #[arg(long, env = "NOISE_INJECT_SEED")]
    pub seed: Option<u32>,

    /// Generator name (see `noise-inject list`)
    #[arg(long, default_value = "mt19937_64")]
    pub gen_name: String,

    /// Distribution name (see `noise-inject list`)
    #[arg(long, default_value = "uniform_real_distribution")]
    pub dist_name: String,

    /// Comma separated distribution parameters, e.g. "0,0.01"
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub dist_args: Vec<f64>,

    /// Wrapped compressor: "noop", "zlib" or a YAML/TOML pipeline file
    #[arg(long, default_value = "noop")]
    pub compressor: String,
}

impl RandomArgs {
    pub fn to_options(&self) -> anyhow::Result<RandomErrorInjectorOptions> {
        Ok(RandomErrorInjectorOptions {
            seed: self.seed,
            gen_name: Some(self.gen_name.clone()),
            dist_name: Some(self.dist_name.clone()),
            dist_args: Some(self.dist_args.clone()),
            compressor: Some(Box::new(resolve_compressor(&self.compressor)?)),
        })
    }
}

/// Run the random command.
pub fn run_random(args: RandomArgs) -> anyhow::Result<()> {
    tracing::info!(
        generator = %args.gen_name,
        distribution = %args.dist_name,
        args = ?args.dist_args,
        "Running random error injection"
    );

    let injector = RandomErrorInjector::from_options(args.to_options()?)?;
    let input = super::read_input(&args.buffer)?;
    let output = injector.compress(&input)?;

    super::report_difference(&input, &output);
    crate::io::write_buffer(&args.buffer.output, &output)
}
