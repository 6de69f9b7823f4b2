//! Bit fault injector.
//!
//! Compresses with the wrapped compressor, then corrupts individual bits of
//! the compressed bytes. Decompression is left to the wrapped compressor,
//! so the corruption shows up as it would on a damaged storage medium.

use crate::config::CompressorConfig;
use crate::error::InjectionError;
use crate::info::InjectorConfiguration;
use compressor::{Compressor, CompressorError, NoopCompressor};
use numeric_buffer::NumericBuffer;
use rand::Rng;
use random_engine::engines::Mt19937_64;
use random_engine::GeneratorAdapter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PLUGIN_NAME: &str = "fault_injector";

/// How a selected bit is corrupted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitAction {
    /// Invert the bit.
    #[default]
    Flip = 1,
    /// Clear the bit.
    Unset = 2,
    /// Set the bit.
    Set = 4,
}

impl BitAction {
    pub const ALL: [BitAction; 3] = [BitAction::Set, BitAction::Unset, BitAction::Flip];

    pub fn as_str(&self) -> &'static str {
        match self {
            BitAction::Set => "set",
            BitAction::Unset => "unset",
            BitAction::Flip => "flip",
        }
    }

    /// Numeric mode value accepted by `injection_mode`.
    pub fn value(&self) -> u32 {
        *self as u32
    }

    /// Apply the action to bit `bit` (0 is the least significant) of `byte`.
    pub fn apply(&self, byte: u8, bit: u8) -> u8 {
        let mask = 1u8 << (bit & 7);
        match self {
            BitAction::Set => byte | mask,
            BitAction::Unset => byte & !mask,
            BitAction::Flip => byte ^ mask,
        }
    }
}

impl fmt::Display for BitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitAction {
    type Err = InjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BitAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| InjectionError::InvalidModeString(s.to_string()))
    }
}

impl TryFrom<u32> for BitAction {
    type Error = InjectionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        BitAction::ALL
            .into_iter()
            .find(|action| action.value() == value)
            .ok_or(InjectionError::InvalidModeValue(value))
    }
}

/// Options accepted by [`FaultInjector::set_options`]. Absent fields leave
/// the current setting in place. When both mode fields are given,
/// `injection_mode_str` wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultInjectorOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_mode_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressor: Option<Box<CompressorConfig>>,
}

/// Corrupts bits of the wrapped compressor's output.
#[derive(Debug)]
pub struct FaultInjector {
    seed: Option<u32>,
    injections: u32,
    action: BitAction,
    compressor_config: CompressorConfig,
    compressor: Box<dyn Compressor>,
}

impl FaultInjector {
    pub const DEFAULT_INJECTIONS: u32 = 1;

    pub fn new() -> Self {
        Self {
            seed: None,
            injections: Self::DEFAULT_INJECTIONS,
            action: BitAction::default(),
            compressor_config: CompressorConfig::Noop,
            compressor: Box::new(NoopCompressor),
        }
    }

    pub fn from_options(options: FaultInjectorOptions) -> Result<Self, InjectionError> {
        let mut injector = Self::new();
        injector.set_options(options)?;
        Ok(injector)
    }

    /// Apply `options`. Nothing changes unless every value is valid.
    pub fn set_options(&mut self, options: FaultInjectorOptions) -> Result<(), InjectionError> {
        let action = match (&options.injection_mode_str, options.injection_mode) {
            (Some(mode), _) => Some(mode.parse::<BitAction>()?),
            (None, Some(value)) => Some(BitAction::try_from(value)?),
            (None, None) => None,
        };
        let compressor = match options.compressor {
            Some(config) => Some((config.build()?, *config)),
            None => None,
        };

        if let Some(seed) = options.seed {
            self.seed = Some(seed);
        }
        if let Some(injections) = options.injections {
            self.injections = injections;
        }
        if let Some(action) = action {
            self.action = action;
        }
        if let Some((compressor, config)) = compressor {
            self.compressor = compressor;
            self.compressor_config = config;
        }
        Ok(())
    }

    /// Current settings, with every field populated. Both mode fields
    /// describe the same action.
    pub fn options(&self) -> FaultInjectorOptions {
        FaultInjectorOptions {
            seed: self.seed,
            injections: Some(self.injections),
            injection_mode: Some(self.action.value()),
            injection_mode_str: Some(self.action.as_str().to_string()),
            compressor: Some(Box::new(self.compressor_config.clone())),
        }
    }

    pub fn action(&self) -> BitAction {
        self.action
    }

    pub fn clear_seed(&mut self) {
        self.seed = None;
    }

    pub fn configuration(&self) -> InjectorConfiguration {
        InjectorConfiguration::new(
            BitAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
        )
    }

    /// Compress `input`, then corrupt the compressed bytes.
    pub fn try_compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, InjectionError> {
        let mut output = self.compressor.compress(input)?;

        let seed = self.seed.unwrap_or_else(|| {
            let seed = rand::random();
            tracing::debug!(seed, "seeded from entropy");
            seed
        });
        let mut rng = GeneratorAdapter::new(Mt19937_64::new(u64::from(seed)));

        output.with_bytes_mut(|bytes| inject_faults(bytes, &mut rng, self.injections, self.action));
        Ok(output)
    }
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for FaultInjector {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        self.try_compress(input)
            .map_err(|e| e.into_compressor_error(PLUGIN_NAME))
    }

    fn decompress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        self.compressor.decompress(input)
    }
}

/// Apply `action` to `injections` uniformly chosen bits of `bytes`.
///
/// Each injection draws the byte offset first, then the bit index. An empty
/// slice is left alone.
pub fn inject_faults<R: Rng + ?Sized>(
    bytes: &mut [u8],
    rng: &mut R,
    injections: u32,
    action: BitAction,
) {
    if bytes.is_empty() {
        if injections > 0 {
            tracing::warn!(injections, "skipping bit injection into an empty buffer");
        }
        return;
    }

    for _ in 0..injections {
        let offset = rng.gen_range(0..bytes.len());
        let bit = rng.gen_range(0..8u8);
        tracing::trace!(offset, bit, action = %action, "injecting bit fault");
        bytes[offset] = action.apply(bytes[offset], bit);
    }
}
