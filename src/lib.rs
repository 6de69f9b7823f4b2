//! noise-inject library
//!
//! Command handlers and shared options behind the `noise-inject` binary.
//! The binary reads raw little-endian numeric files, runs them through an
//! injector pipeline, and writes the result back as raw bytes.
//!
//! # CLI Usage
//!
//! ```bash
//! # Add N(0, 0.01) noise to a 64x64 f32 field
//! noise-inject random --input field.bin --output noisy.bin \
//!   --dtype f32 --dims 64x64 \
//!   --dist-name normal_distribution --dist-args 0,0.01 --seed 42
//!
//! # Flip three bits of the zlib output
//! noise-inject fault --input field.bin --output corrupted.bin \
//!   --dtype f32 --injections 3 --mode flip --compressor zlib
//!
//! # Run a pipeline described in YAML or TOML
//! noise-inject run --config pipeline.yaml --input field.bin --output out.bin
//! ```

use clap::Parser;
use numeric_buffer::ElementType;
use std::path::PathBuf;

pub mod commands;
pub mod config;
pub mod io;

/// Input and output file options shared by the compute subcommands.
#[derive(Parser, Clone, Debug)]
pub struct BufferOpts {
    /// Raw little-endian input file
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// File the result is written to
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Element type of the input file
    #[arg(long, default_value = "f64")]
    pub dtype: ElementType,

    /// Logical shape of the input, e.g. "64x64" (default: one dimension)
    #[arg(long)]
    pub dims: Option<String>,
}
