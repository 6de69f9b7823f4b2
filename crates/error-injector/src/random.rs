//! Statistical error injector.
//!
//! Adds one sample of a configurable distribution to every element of a
//! private copy of the input, then hands the copy to the wrapped
//! compressor.

use crate::config::CompressorConfig;
use crate::error::InjectionError;
use crate::info::InjectorConfiguration;
use compressor::{Compressor, CompressorError, NoopCompressor};
use numeric_buffer::{dispatch, NumericBuffer};
use random_engine::{
    generator_registry, is_known_distribution, BitGenerator, SampleElement, SeedSequence,
};
use serde::{Deserialize, Serialize};

pub const PLUGIN_NAME: &str = "random_error_injector";

pub const DEFAULT_GENERATOR: &str = "mt19937_64";
pub const DEFAULT_DISTRIBUTION: &str = "uniform_real_distribution";

/// Options accepted by [`RandomErrorInjector::set_options`]. Absent fields
/// leave the current setting in place.
///
/// # YAML Format
///
/// ```yaml
/// seed: 42
/// gen_name: mt19937_64
/// dist_name: normal_distribution
/// dist_args: [0.0, 0.01]
/// compressor:
///   name: zlib
///   level: 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomErrorInjectorOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_args: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressor: Option<Box<CompressorConfig>>,
}

/// Adds distributed noise to every element before compression.
#[derive(Debug)]
pub struct RandomErrorInjector {
    seed: Option<u32>,
    gen_name: String,
    dist_name: String,
    dist_args: Vec<f64>,
    compressor_config: CompressorConfig,
    compressor: Box<dyn Compressor>,
}

impl RandomErrorInjector {
    /// Injector with the default generator and distribution, no fixed
    /// seed, no arguments, and a `noop` downstream compressor.
    pub fn new() -> Self {
        Self {
            seed: None,
            gen_name: DEFAULT_GENERATOR.to_string(),
            dist_name: DEFAULT_DISTRIBUTION.to_string(),
            dist_args: Vec::new(),
            compressor_config: CompressorConfig::Noop,
            compressor: Box::new(NoopCompressor),
        }
    }

    /// Build an injector from options, validating them first.
    pub fn from_options(options: RandomErrorInjectorOptions) -> Result<Self, InjectionError> {
        let mut injector = Self::new();
        injector.set_options(options)?;
        Ok(injector)
    }

    /// Apply `options`. Every provided value is validated before anything
    /// is changed, so on error the injector keeps its previous settings.
    pub fn set_options(&mut self, options: RandomErrorInjectorOptions) -> Result<(), InjectionError> {
        if let Some(name) = &options.gen_name {
            if !generator_registry().contains(name) {
                return Err(InjectionError::UnknownGenerator(name.clone()));
            }
        }
        if let Some(name) = &options.dist_name {
            if !is_known_distribution(name) {
                return Err(InjectionError::UnknownDistribution {
                    name: name.clone(),
                    element_type: "any".to_string(),
                });
            }
        }
        let compressor = match options.compressor {
            Some(config) => Some((config.build()?, *config)),
            None => None,
        };

        if let Some(seed) = options.seed {
            self.seed = Some(seed);
        }
        if let Some(name) = options.gen_name {
            self.gen_name = name;
        }
        if let Some(name) = options.dist_name {
            self.dist_name = name;
        }
        if let Some(args) = options.dist_args {
            self.dist_args = args;
        }
        if let Some((compressor, config)) = compressor {
            self.compressor = compressor;
            self.compressor_config = config;
        }
        Ok(())
    }

    /// Current settings, with every field populated.
    pub fn options(&self) -> RandomErrorInjectorOptions {
        RandomErrorInjectorOptions {
            seed: self.seed,
            gen_name: Some(self.gen_name.clone()),
            dist_name: Some(self.dist_name.clone()),
            dist_args: Some(self.dist_args.clone()),
            compressor: Some(Box::new(self.compressor_config.clone())),
        }
    }

    /// Drop a previously configured seed so later runs draw from entropy.
    pub fn clear_seed(&mut self) {
        self.seed = None;
    }

    /// Registered generators and distributions this injector can select.
    pub fn configuration(&self) -> InjectorConfiguration {
        InjectorConfiguration::new(Vec::new())
    }

    /// Return a noisy copy of `input`. The input itself is never modified.
    ///
    /// The generator and distribution are resolved, seeded, and configured
    /// before any element is touched.
    pub fn inject(&self, input: &NumericBuffer) -> Result<NumericBuffer, InjectionError> {
        let mut generator = generator_registry()
            .build(&self.gen_name)
            .ok_or_else(|| InjectionError::UnknownGenerator(self.gen_name.clone()))?;

        let mut output = input.clone();
        dispatch!(output.data_mut(), values => self.add_noise(values, generator.as_mut()))?;
        Ok(output)
    }

    /// Inject noise, then compress with the wrapped compressor.
    pub fn try_compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, InjectionError> {
        let noisy = self.inject(input)?;
        Ok(self.compressor.compress(&noisy)?)
    }

    fn add_noise<T: SampleElement>(
        &self,
        values: &mut [T],
        generator: &mut dyn BitGenerator,
    ) -> Result<(), InjectionError> {
        let mut distribution = T::distributions().build(&self.dist_name).ok_or_else(|| {
            InjectionError::UnknownDistribution {
                name: self.dist_name.clone(),
                element_type: T::ELEMENT_TYPE.to_string(),
            }
        })?;

        generator.reseed(&self.seed_sequence());
        distribution.configure(&self.dist_args)?;

        tracing::debug!(
            generator = %self.gen_name,
            distribution = %self.dist_name,
            args = ?self.dist_args,
            element_type = %T::ELEMENT_TYPE,
            elements = values.len(),
            "injecting random errors"
        );

        for value in values.iter_mut() {
            value.accumulate(distribution.sample(generator));
        }
        Ok(())
    }

    fn seed_sequence(&self) -> SeedSequence {
        match self.seed {
            Some(seed) => SeedSequence::from_seed(seed),
            None => {
                let seeds = SeedSequence::from_entropy();
                tracing::debug!(seed_words = ?seeds.words(), "seeded from entropy");
                seeds
            }
        }
    }
}

impl Default for RandomErrorInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for RandomErrorInjector {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn options(dist_name: &str, dist_args: Vec<f64>) -> RandomErrorInjectorOptions {
        RandomErrorInjectorOptions {
            seed: Some(1234),
            dist_name: Some(dist_name.to_string()),
            dist_args: Some(dist_args),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let injector =
            RandomErrorInjector::from_options(options("normal_distribution", vec![0.0, 1.0]))
                .unwrap();
        let input = NumericBuffer::from_vec(vec![0.0f64; 256]);
        let a = injector.inject(&input).unwrap();
        let b = injector.inject(&input).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, input);
        assert_eq!(input.as_slice::<f64>().unwrap(), &[0.0; 256][..]);
    }

    #[test]
    fn test_zero_stddev_leaves_values_unchanged() {
        let injector =
            RandomErrorInjector::from_options(options("normal_distribution", vec![0.0, 0.0]))
                .unwrap();
        let input = NumericBuffer::from_vec(vec![1.5f32, -2.0, 3.25, 0.0]);
        let output = injector.inject(&input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_uniform_noise_bounded() {
        let injector = RandomErrorInjector::from_options(options(
            "uniform_real_distribution",
            vec![-0.5, 0.5],
        ))
        .unwrap();
        let input = NumericBuffer::from_vec(vec![10.0f64; 1000]);
        let output = injector.inject(&input).unwrap();
        let diff = output.max_abs_difference(&input).unwrap();
        assert!(diff > 0.0 && diff <= 0.5);
    }

    #[test]
    fn test_integer_buffer_wraps() {
        let injector = RandomErrorInjector::from_options(options(
            "uniform_int_distribution",
            vec![1.0, 1.0],
        ))
        .unwrap();
        let input = NumericBuffer::from_vec(vec![u8::MAX, 0, 7]);
        let output = injector.inject(&input).unwrap();
        assert_eq!(output.as_slice::<u8>().unwrap(), &[0, 1, 8][..]);
    }

    #[test]
    fn test_distribution_checked_per_element_type() {
        let injector =
            RandomErrorInjector::from_options(options("normal_distribution", vec![0.0, 1.0]))
                .unwrap();
        let err = injector
            .inject(&NumericBuffer::from_vec(vec![1i32, 2, 3]))
            .unwrap_err();
        assert_eq!(
            err,
            InjectionError::UnknownDistribution {
                name: "normal_distribution".into(),
                element_type: "i32".into(),
            }
        );
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_argument_count_errors() {
        let injector =
            RandomErrorInjector::from_options(options("exponential_distribution", vec![]))
                .unwrap();
        let err = injector
            .inject(&NumericBuffer::from_vec(vec![1.0f64]))
            .unwrap_err();
        assert!(matches!(err, InjectionError::InvalidArgumentCount { count: 0, .. }));
        assert_eq!(err.code(), 1);

        let injector = RandomErrorInjector::from_options(options(
            "exponential_distribution",
            vec![1.0, 2.0],
        ))
        .unwrap();
        let err = injector
            .inject(&NumericBuffer::from_vec(vec![1.0f64]))
            .unwrap_err();
        assert!(matches!(err, InjectionError::InvalidArgumentCount { count: 2, .. }));
    }

    #[test]
    fn test_invalid_parameter_error() {
        let injector =
            RandomErrorInjector::from_options(options("normal_distribution", vec![0.0, -3.0]))
                .unwrap();
        let err = injector
            .inject(&NumericBuffer::from_vec(vec![1.0f32]))
            .unwrap_err();
        assert!(matches!(err, InjectionError::InvalidParameter(_)));
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_set_options_is_all_or_nothing() {
        let mut injector = RandomErrorInjector::new();
        let before = injector.options();
        let err = injector
            .set_options(RandomErrorInjectorOptions {
                seed: Some(9),
                gen_name: Some("lfsr".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, InjectionError::UnknownGenerator("lfsr".into()));
        assert_eq!(injector.options(), before);

        let err = injector
            .set_options(RandomErrorInjectorOptions {
                dist_name: Some("zipf_distribution".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, InjectionError::UnknownDistribution { .. }));
        assert_eq!(injector.options(), before);
    }

    #[test]
    fn test_options_roundtrip() {
        let mut injector = RandomErrorInjector::new();
        injector
            .set_options(RandomErrorInjectorOptions {
                seed: Some(3),
                gen_name: Some("ranlux48_base".into()),
                compressor: Some(Box::new(CompressorConfig::Zlib { level: 1 })),
                ..Default::default()
            })
            .unwrap();
        let options = injector.options();
        assert_eq!(options.seed, Some(3));
        assert_eq!(options.gen_name.as_deref(), Some("ranlux48_base"));
        assert_eq!(options.dist_name.as_deref(), Some(DEFAULT_DISTRIBUTION));
        assert_eq!(
            options.compressor.as_deref(),
            Some(&CompressorConfig::Zlib { level: 1 })
        );
    }

    #[test]
    fn test_compress_passes_noisy_copy_downstream() {
        let injector = RandomErrorInjector::from_options(RandomErrorInjectorOptions {
            compressor: Some(Box::new(CompressorConfig::Zlib { level: 6 })),
            ..options("uniform_real_distribution", vec![0.0, 0.001])
        })
        .unwrap();
        let input = NumericBuffer::from_vec(vec![1.0f64; 64]);
        let compressed = injector.compress(&input).unwrap();
        let restored = injector.decompress(&compressed).unwrap();
        assert_eq!(restored, injector.inject(&input).unwrap());
    }

    #[derive(Debug)]
    struct FailingCompressor;

    impl Compressor for FailingCompressor {
        fn name(&self) -> &str {
            "failing"
        }

        fn compress(&self, _input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
            Err(CompressorError::new("failing", 7, "quota exceeded"))
        }

        fn decompress(&self, _input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
            Err(CompressorError::new("failing", 8, "bad header"))
        }
    }

    #[test]
    fn test_compress_errors_pass_through() {
        let mut injector =
            RandomErrorInjector::from_options(options("normal_distribution", vec![0.0, 1.0]))
                .unwrap();
        injector.compressor = Box::new(FailingCompressor);

        let input = NumericBuffer::from_vec(vec![1.0f64; 8]);
        let err = injector.compress(&input).unwrap_err();
        assert_eq!(err, CompressorError::new("failing", 7, "quota exceeded"));
        assert_eq!(err.plugin, "failing");
        assert_eq!(err.code, 7);
        assert_eq!(
            injector.decompress(&input).unwrap_err(),
            CompressorError::new("failing", 8, "bad header")
        );
    }

    #[test]
    fn test_unseeded_runs_differ() {
        let mut injector = RandomErrorInjector::new();
        injector
            .set_options(RandomErrorInjectorOptions {
                dist_args: Some(vec![0.0, 1.0]),
                ..Default::default()
            })
            .unwrap();
        let input = NumericBuffer::from_vec(vec![0.0f64; 32]);
        let a = injector.inject(&input).unwrap();
        let b = injector.inject(&input).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_every_generator_drives_injection() {
        let input = NumericBuffer::from_vec(vec![0.0f32; 16]);
        for generator in random_engine::generator_names() {
            let injector = RandomErrorInjector::from_options(RandomErrorInjectorOptions {
                gen_name: Some(generator.to_string()),
                ..options("normal_distribution", vec![0.0, 1.0])
            })
            .unwrap();
            let output = injector.inject(&input).unwrap();
            assert_eq!(output.dims(), input.dims(), "{generator}");
            assert_ne!(output, input, "{generator}");
        }
    }
}
