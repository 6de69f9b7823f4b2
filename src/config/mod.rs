//! Configuration parsing for the CLI.

pub mod dims;
pub mod pipeline;

pub use dims::parse_dims;
pub use pipeline::{load_compressor_config, resolve_compressor};
