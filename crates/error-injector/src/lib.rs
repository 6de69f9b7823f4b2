//! Error injectors for noise-inject.
//!
//! Both injectors implement [`compressor::Compressor`] and wrap another
//! compressor, so they can be stacked into pipelines described by
//! [`CompressorConfig`]:
//!
//! - [`RandomErrorInjector`] - Adds distributed noise to every element
//!   before compression
//! - [`FaultInjector`] - Corrupts bits of the compressed output
//!
//! # Example
//!
//! ```rust
//! use compressor::Compressor;
//! use error_injector::{RandomErrorInjector, RandomErrorInjectorOptions};
//! use numeric_buffer::NumericBuffer;
//!
//! let injector = RandomErrorInjector::from_options(RandomErrorInjectorOptions {
//!     seed: Some(42),
//!     dist_name: Some("normal_distribution".into()),
//!     dist_args: Some(vec![0.0, 0.01]),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let input = NumericBuffer::from_vec(vec![1.0f64; 8]);
//! let noisy = injector.compress(&input).unwrap();
//! assert!(noisy.max_abs_difference(&input).unwrap() < 1.0);
//! ```

pub mod config;
pub mod error;
pub mod fault;
pub mod info;
pub mod random;

pub use config::CompressorConfig;
pub use error::InjectionError;
pub use fault::{inject_faults, BitAction, FaultInjector, FaultInjectorOptions};
pub use info::{InjectorConfiguration, ThreadSafety};
pub use random::{RandomErrorInjector, RandomErrorInjectorOptions};
