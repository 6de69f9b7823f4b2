//! Error types for the injectors.

use compressor::CompressorError;
use random_engine::DistributionError;

/// Errors raised while configuring or running an injector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InjectionError {
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("unknown distribution {name} for {element_type} elements")]
    UnknownDistribution { name: String, element_type: String },

    #[error("invalid number of arguments passed {count}: expected {expected}")]
    InvalidArgumentCount { count: usize, expected: &'static str },

    #[error("{0}")]
    InvalidParameter(String),

    #[error("invalid injection mode string: {0:?}, expected one of set, unset, flip")]
    InvalidModeString(String),

    #[error("invalid injection mode value: {0}, expected 4 (set), 2 (unset) or 1 (flip)")]
    InvalidModeValue(u32),

    /// Failure of the wrapped compressor, forwarded unchanged.
    #[error(transparent)]
    Compressor(#[from] CompressorError),
}

impl InjectionError {
    pub const ARGUMENT_CODE: i32 = 1;
    pub const VALUE_CODE: i32 = 2;

    /// Numeric error code: 1 for argument and mode errors, 2 for unknown
    /// names and parameter values, the downstream code for compressor
    /// failures.
    pub fn code(&self) -> i32 {
        match self {
            InjectionError::InvalidArgumentCount { .. }
            | InjectionError::InvalidModeString(_)
            | InjectionError::InvalidModeValue(_) => Self::ARGUMENT_CODE,
            InjectionError::UnknownGenerator(_)
            | InjectionError::UnknownDistribution { .. }
            | InjectionError::InvalidParameter(_) => Self::VALUE_CODE,
            InjectionError::Compressor(err) => err.code,
        }
    }

    /// Convert for the `Compressor` interface. Downstream compressor errors
    /// pass through as they are; anything else is attributed to `plugin`.
    pub fn into_compressor_error(self, plugin: &str) -> CompressorError {
        match self {
            InjectionError::Compressor(err) => err,
            other => CompressorError::new(plugin, other.code(), other.to_string()),
        }
    }
}

impl From<DistributionError> for InjectionError {
    fn from(err: DistributionError) -> Self {
        match err {
            DistributionError::InvalidArgumentCount { count, expected } => {
                InjectionError::InvalidArgumentCount { count, expected }
            }
            err @ DistributionError::InvalidParameter { .. } => {
                InjectionError::InvalidParameter(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            InjectionError::InvalidArgumentCount {
                count: 3,
                expected: "1"
            }
            .code(),
            1
        );
        assert_eq!(InjectionError::InvalidModeValue(8).code(), 1);
        assert_eq!(InjectionError::UnknownGenerator("x".into()).code(), 2);
        assert_eq!(InjectionError::InvalidParameter("bad".into()).code(), 2);
        assert_eq!(
            InjectionError::from(CompressorError::new("zlib", 7, "boom")).code(),
            7
        );
    }

    #[test]
    fn test_argument_count_message_contains_count() {
        let err = InjectionError::from(DistributionError::InvalidArgumentCount {
            count: 5,
            expected: "1 or 2",
        });
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_downstream_error_passes_through() {
        let downstream = CompressorError::new("zlib", 2, "stream error");
        let converted =
            InjectionError::Compressor(downstream.clone()).into_compressor_error("fault_injector");
        assert_eq!(converted, downstream);

        let converted =
            InjectionError::UnknownGenerator("pcg".into()).into_compressor_error("fault_injector");
        assert_eq!(converted.plugin, "fault_injector");
        assert_eq!(converted.code, 2);
        assert!(converted.message.contains("pcg"));
    }
}
