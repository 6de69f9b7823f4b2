//! Fault command handler.

use crate::config::resolve_compressor;
use crate::BufferOpts;
use clap::Parser;
use compressor::Compressor;
use error_injector::{FaultInjector, FaultInjectorOptions};

#[derive(Parser, Clone, Debug)]
pub struct FaultArgs {
    #[command(flatten)]
    pub buffer: BufferOpts,

    /// Seed for reproducible runs (default: drawn from entropy)
    #[arg(long, env = "NOISE_INJECT_SEED")]
    pub seed: Option<u32>,

    /// Number of bits to corrupt
    #[arg(long, default_value = "1")]
    pub injections: u32,

    /// Bit operation: set, unset or flip
    #[arg(long, default_value = "flip")]
    pub mode: String,

    /// Wrapped compressor: "noop", "zlib" or a YAML/TOML pipeline file
    #[arg(long, default_value = "noop")]
    pub compressor: String,
}

impl FaultArgs {
    pub fn to_options(&self) -> anyhow::Result<FaultInjectorOptions> {
        Ok(FaultInjectorOptions {
            seed: self.seed,
            injections: Some(self.injections),
            injection_mode: None,
            injection_mode_str: Some(self.mode.clone()),
            compressor: Some(Box::new(resolve_compressor(&self.compressor)?)),
        })
    }
}

/// Run the fault command.
pub fn run_fault(args: FaultArgs) -> anyhow::Result<()> {
    tracing::info!(
        injections = args.injections,
        mode = %args.mode,
        compressor = %args.compressor,
        "Running bit fault injection"
    );

    let injector = FaultInjector::from_options(args.to_options()?)?;
    let input = super::read_input(&args.buffer)?;
    let output = injector.compress(&input)?;

    super::report_difference(&input, &output);
    crate::io::write_buffer(&args.buffer.output, &output)
}
