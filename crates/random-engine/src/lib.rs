//! Polymorphic random engine for noise-inject.
//!
//! This crate turns statically typed random algorithms into runtime
//! selectable components:
//!
//! - [`SeedSequence`] - Reproducible seeding from a list of 32-bit words
//! - [`BitGenerator`] - Object-safe generator interface, looked up by name in
//!   [`generator_registry`]
//! - [`DynDistribution`] - Object-safe distribution interface, looked up by
//!   name in the registry of each element type via
//!   [`SampleElement::distributions`]
//! - [`ParamArity`] - Binding of runtime argument lists to native parameters
//!
//! # Example
//!
//! ```rust
//! use random_engine::{generator_registry, SampleElement, SeedSequence};
//!
//! let mut generator = generator_registry().build("mt19937_64").unwrap();
//! generator.reseed(&SeedSequence::from_seed(42));
//!
//! let mut normal = f64::distributions().build("normal_distribution").unwrap();
//! normal.configure(&[0.0, 0.5]).unwrap();
//! let noise = normal.sample(generator.as_mut());
//! assert!(noise.is_finite());
//! ```

pub mod binder;
pub mod distribution;
pub mod distributions;
pub mod element;
pub mod engines;
pub mod generator;
pub mod registry;
pub mod seed;

pub use binder::{FromArg, FromOneParam, FromTwoParams, ParamArity, Unary, UnaryOrBinary};
pub use distribution::{
    BoxedDistribution, DistributionAdapter, DistributionError, DynDistribution,
    NativeDistribution,
};
pub use element::{
    distribution_names, integer_distribution_names, is_known_distribution,
    real_distribution_names, DistributionRegistry, SampleElement,
};
pub use generator::{
    generator_registry, register_builtin_generators, BitGenerator, BoxedGenerator,
    GeneratorAdapter, GeneratorRegistry,
};
pub use registry::Registry;
pub use seed::SeedSequence;

/// Names of the registered generators, in registration order.
pub fn generator_names() -> Vec<&'static str> {
    generator_registry().names().collect()
}
