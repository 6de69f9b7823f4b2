//! Built-in native distributions.
//!
//! Real-valued laws live in [`real`], integer-valued laws in [`integer`].
//! Each family is generic over its element type and implemented for every
//! primitive of that family.

/// Equality over the named parameter fields. The cached sampler is
/// rebuilt from those fields and never compared.
macro_rules! params_eq {
    ($($dist:ident<$g:ident: $bound:path> { $($field:ident),+ });* $(;)?) => {
        $(
            impl<$g: $bound> PartialEq for $dist<$g> {
                fn eq(&self, other: &Self) -> bool {
                    $(self.$field == other.$field)&&+
                }
            }
        )*
    };
}

pub mod integer;
pub mod real;

pub use integer::{
    BernoulliDistribution, BinomialDistribution, GeometricDistribution, IntegerElement,
    PoissonDistribution, UniformIntDistribution,
};
pub use real::{
    CauchyDistribution, ChiSquaredDistribution, ExponentialDistribution,
    ExtremeValueDistribution, FisherFDistribution, GammaDistribution, LognormalDistribution,
    NormalDistribution, RealElement, StudentTDistribution, UniformRealDistribution,
    WeibullDistribution,
};

use rand_distr::Distribution;
use std::fmt;

/// A `rand_distr` sampler that can be cached inside a native distribution.
pub trait Law<T>: Distribution<T> + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T, L> Law<T> for L where L: Distribution<T> + Clone + fmt::Debug + Send + Sync + 'static {}
