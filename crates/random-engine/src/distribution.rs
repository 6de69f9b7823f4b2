//! Runtime distribution interface.
//!
//! [`NativeDistribution`] is the statically typed side: a concrete law
//! over a concrete result type, sampled from any `rand::Rng`.
//! [`DistributionAdapter`] lifts it to [`DynDistribution`], the object-safe
//! interface stored in the per-element-type registries.

use crate::binder::ParamArity;
use crate::BitGenerator;
use rand::Rng;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Errors raised while configuring a distribution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    #[error("invalid number of arguments passed {count}: expected {expected}")]
    InvalidArgumentCount { count: usize, expected: &'static str },

    #[error("invalid parameters for {distribution}: {reason}")]
    InvalidParameter {
        distribution: &'static str,
        reason: String,
    },
}

impl DistributionError {
    pub(crate) fn invalid(distribution: &'static str, reason: impl fmt::Display) -> Self {
        DistributionError::InvalidParameter {
            distribution,
            reason: reason.to_string(),
        }
    }
}

/// A concrete distribution with a statically known result type.
///
/// Equality compares the configured parameters only. Sampling state that a
/// distribution keeps between draws never takes part in it.
pub trait NativeDistribution<T>: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Registry name.
    const NAME: &'static str;

    /// Arguments for the instance a registry factory returns.
    const STANDARD_ARGS: &'static [f64];

    /// Declared parameter arity.
    type Arity: ParamArity<Self>;

    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> T;

    /// Lower bound of the support.
    fn min(&self) -> T;

    /// Upper bound of the support.
    fn max(&self) -> T;

    /// Forget any state carried between samples.
    fn reset(&mut self) {}
}

/// Object-safe distribution over result type `T`.
pub trait DynDistribution<T>: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn sample(&mut self, generator: &mut dyn BitGenerator) -> T;

    /// Rebuild the distribution from a runtime argument list. On error the
    /// previous configuration is kept.
    fn configure(&mut self, args: &[f64]) -> Result<(), DistributionError>;

    fn reset(&mut self);

    /// Same concrete distribution with the same parameters.
    fn equals(&self, other: &dyn DynDistribution<T>) -> bool;

    fn clone_box(&self) -> BoxedDistribution<T>;

    fn as_any(&self) -> &dyn Any;

    fn min(&self) -> T;

    fn max(&self) -> T;
}

pub type BoxedDistribution<T> = Box<dyn DynDistribution<T>>;

impl<T> Clone for BoxedDistribution<T> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<T> PartialEq for dyn DynDistribution<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Lifts a [`NativeDistribution`] to a [`DynDistribution`].
pub struct DistributionAdapter<T, D> {
    native: D,
    _result: PhantomData<fn() -> T>,
}

impl<T: 'static, D: NativeDistribution<T>> DistributionAdapter<T, D> {
    pub fn new(native: D) -> Self {
        Self {
            native,
            _result: PhantomData,
        }
    }

    /// Instance configured with the distribution's standard arguments.
    pub fn standard() -> Self {
        let native = <D::Arity as ParamArity<D>>::bind(D::STANDARD_ARGS)
            .expect("standard arguments are valid for every built-in distribution");
        Self::new(native)
    }

    pub fn native(&self) -> &D {
        &self.native
    }
}

impl<T, D: Clone> Clone for DistributionAdapter<T, D> {
    fn clone(&self) -> Self {
        Self {
            native: self.native.clone(),
            _result: PhantomData,
        }
    }
}

impl<T, D: fmt::Debug> fmt::Debug for DistributionAdapter<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionAdapter")
            .field("native", &self.native)
            .finish()
    }
}

impl<T: 'static, D: NativeDistribution<T>> DynDistribution<T> for DistributionAdapter<T, D> {
    fn name(&self) -> &'static str {
        D::NAME
    }

    fn sample(&mut self, generator: &mut dyn BitGenerator) -> T {
        self.native.sample(generator)
    }

    fn configure(&mut self, args: &[f64]) -> Result<(), DistributionError> {
        self.native = <D::Arity as ParamArity<D>>::bind(args)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.native.reset();
    }

    fn equals(&self, other: &dyn DynDistribution<T>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other.native == self.native)
    }

    fn clone_box(&self) -> BoxedDistribution<T> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn min(&self) -> T {
        self.native.min()
    }

    fn max(&self) -> T {
        self.native.max()
    }
}

/// Sampler derived from the configured parameters.
#[derive(Debug, Clone)]
pub(crate) struct Sampler<S>(pub(crate) S);
