//! Declarative compressor pipelines.

use crate::error::InjectionError;
use crate::fault::{FaultInjector, FaultInjectorOptions};
use crate::random::{RandomErrorInjector, RandomErrorInjectorOptions};
use compressor::{Compressor, NoopCompressor, ZlibCompressor};
use serde::{Deserialize, Serialize};

/// A compressor and, for injectors, the compressor it wraps.
///
/// # YAML Format
///
/// ```yaml
/// name: fault_injector
/// seed: 7
/// injections: 3
/// injection_mode_str: flip
/// compressor:
///   name: zlib
///   level: 9
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum CompressorConfig {
    #[default]
    Noop,
    Zlib {
        #[serde(default = "default_zlib_level")]
        level: u32,
    },
    RandomErrorInjector(RandomErrorInjectorOptions),
    FaultInjector(FaultInjectorOptions),
}

fn default_zlib_level() -> u32 {
    ZlibCompressor::DEFAULT_LEVEL
}

impl CompressorConfig {
    /// Name the built compressor reports.
    pub fn name(&self) -> &'static str {
        match self {
            CompressorConfig::Noop => "noop",
            CompressorConfig::Zlib { .. } => "zlib",
            CompressorConfig::RandomErrorInjector(_) => crate::random::PLUGIN_NAME,
            CompressorConfig::FaultInjector(_) => crate::fault::PLUGIN_NAME,
        }
    }

    /// Construct the compressor, recursively building wrapped ones.
    pub fn build(&self) -> Result<Box<dyn Compressor>, InjectionError> {
        let compressor: Box<dyn Compressor> = match self {
            CompressorConfig::Noop => Box::new(NoopCompressor),
            CompressorConfig::Zlib { level } => Box::new(ZlibCompressor::new(*level)),
            CompressorConfig::RandomErrorInjector(options) => {
                Box::new(RandomErrorInjector::from_options(options.clone())?)
            }
            CompressorConfig::FaultInjector(options) => {
                Box::new(FaultInjector::from_options(options.clone())?)
            }
        };
        tracing::debug!(compressor = compressor.name(), "built compressor");
        Ok(compressor)
    }
}
