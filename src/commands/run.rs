//! Run command handler.

use crate::config::load_compressor_config;
use crate::BufferOpts;
use anyhow::Context;
use clap::Parser;
use compressor::Compressor;
use numeric_buffer::ElementType;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
pub struct RunArgs {
    /// Pipeline file (.yaml, .yml or .toml)
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub buffer: BufferOpts,

    /// Decompress the input instead of compressing it. The input is read
    /// as bytes and `--dtype`/`--dims` are ignored.
    #[arg(long)]
    pub decompress: bool,
}

/// Run the pipeline command.
pub fn run_pipeline(args: RunArgs) -> anyhow::Result<()> {
    let config = load_compressor_config(&args.config)?;
    let compressor = config
        .build()
        .with_context(|| format!("Failed to build pipeline from {:?}", args.config))?;
    tracing::info!(
        compressor = compressor.name(),
        decompress = args.decompress,
        "Running pipeline"
    );

    if args.decompress {
        let input = crate::io::read_buffer(&args.buffer.input, ElementType::U8, None)?;
        let output = compressor.decompress(&input)?;
        tracing::info!(
            element_type = %output.element_type(),
            dims = ?output.dims(),
            "decompressed buffer"
        );
        return crate::io::write_buffer(&args.buffer.output, &output);
    }

    let input = super::read_input(&args.buffer)?;
    let output = compressor.compress(&input)?;
    super::report_difference(&input, &output);
    crate::io::write_buffer(&args.buffer.output, &output)
}
