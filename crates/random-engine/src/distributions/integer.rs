//! Integer-valued distributions for the eight integer buffer types.

use super::Law;
use crate::binder::{FromOneParam, FromTwoParams, Unary, UnaryOrBinary};
use crate::distribution::{DistributionError, NativeDistribution, Sampler};
use rand::distributions::{Bernoulli, Uniform};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Geometric, Poisson};
use std::fmt;
use std::marker::PhantomData;

/// Integer element type together with its uniform sampler type.
pub trait IntegerElement: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    type Uniform: Law<Self>;
}

/// Uniform on the closed range `[a, b]`.
#[derive(Debug, Clone)]
pub struct UniformIntDistribution<I: IntegerElement> {
    a: I,
    b: I,
    sampler: Sampler<I::Uniform>,
}

/// Yields 1 with probability `p`, otherwise 0.
#[derive(Debug, Clone)]
pub struct BernoulliDistribution<I> {
    p: f64,
    sampler: Sampler<Bernoulli>,
    _result: PhantomData<fn() -> I>,
}

/// Number of successes in `t` trials with success probability `p`.
#[derive(Debug, Clone)]
pub struct BinomialDistribution<I> {
    t: I,
    p: f64,
    sampler: Sampler<Binomial>,
}

/// Number of failures before the first success.
#[derive(Debug, Clone)]
pub struct GeometricDistribution<I> {
    p: f64,
    sampler: Sampler<Geometric>,
    _result: PhantomData<fn() -> I>,
}

#[derive(Debug, Clone)]
pub struct PoissonDistribution<I> {
    mean: f64,
    sampler: Sampler<Poisson<f64>>,
    _result: PhantomData<fn() -> I>,
}

params_eq! {
    UniformIntDistribution<I: IntegerElement> { a, b };
    BernoulliDistribution<I: PartialEq> { p };
    BinomialDistribution<I: PartialEq> { t, p };
    GeometricDistribution<I: PartialEq> { p };
    PoissonDistribution<I: PartialEq> { mean };
}

const UNIFORM_INT: &str = "uniform_int_distribution";
const BERNOULLI: &str = "bernoulli_distribution";
const BINOMIAL: &str = "binomial_distribution";
const GEOMETRIC: &str = "geometric_distribution";
const POISSON: &str = "poisson_distribution";

macro_rules! impl_integer {
    ($($i:ty),*) => {
        $(
            impl IntegerElement for $i {
                type Uniform = Uniform<$i>;
            }

            impl FromOneParam for UniformIntDistribution<$i> {
                type Param = $i;

                fn from_one(a: $i) -> Result<Self, DistributionError> {
                    Self::from_two(a, <$i>::MAX)
                }
            }

            impl FromTwoParams for UniformIntDistribution<$i> {
                fn from_two(a: $i, b: $i) -> Result<Self, DistributionError> {
                    if a > b {
                        return Err(DistributionError::invalid(
                            UNIFORM_INT,
                            format!("requires a <= b, got a={a}, b={b}"),
                        ));
                    }
                    Ok(Self {
                        a,
                        b,
                        sampler: Sampler(Uniform::new_inclusive(a, b)),
                    })
                }
            }

            impl NativeDistribution<$i> for UniformIntDistribution<$i> {
                const NAME: &'static str = UNIFORM_INT;
                const STANDARD_ARGS: &'static [f64] = &[0.0, <$i>::MAX as f64];
                type Arity = UnaryOrBinary;

                fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> $i {
                    self.sampler.0.sample(rng)
                }

                fn min(&self) -> $i {
                    self.a
                }

                fn max(&self) -> $i {
                    self.b
                }
            }

            impl FromOneParam for BernoulliDistribution<$i> {
                type Param = f64;

                fn from_one(p: f64) -> Result<Self, DistributionError> {
                    let law = Bernoulli::new(p).map_err(|e| DistributionError::invalid(BERNOULLI, e))?;
                    Ok(Self {
                        p,
                        sampler: Sampler(law),
                        _result: PhantomData,
                    })
                }
            }

            impl NativeDistribution<$i> for BernoulliDistribution<$i> {
                const NAME: &'static str = BERNOULLI;
                const STANDARD_ARGS: &'static [f64] = &[0.5];
                type Arity = Unary;

                fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> $i {
                    let success: bool = self.sampler.0.sample(rng);
                    <$i>::from(success)
                }

                fn min(&self) -> $i {
                    0
                }

                fn max(&self) -> $i {
                    1
                }
            }

            impl FromOneParam for BinomialDistribution<$i> {
                type Param = f64;

                fn from_one(t: f64) -> Result<Self, DistributionError> {
                    Self::from_two(t, 0.5)
                }
            }

            impl FromTwoParams for BinomialDistribution<$i> {
                fn from_two(t: f64, p: f64) -> Result<Self, DistributionError> {
                    if !(t >= 0.0 && t.fract() == 0.0 && t <= <$i>::MAX as f64) {
                        return Err(DistributionError::invalid(
                            BINOMIAL,
                            format!("trial count must be an integer in [0, {}], got {t}", <$i>::MAX),
                        ));
                    }
                    let law = Binomial::new(t as u64, p)
                        .map_err(|e| DistributionError::invalid(BINOMIAL, e))?;
                    Ok(Self {
                        t: t as $i,
                        p,
                        sampler: Sampler(law),
                    })
                }
            }

            impl NativeDistribution<$i> for BinomialDistribution<$i> {
                const NAME: &'static str = BINOMIAL;
                const STANDARD_ARGS: &'static [f64] = &[1.0, 0.5];
                type Arity = UnaryOrBinary;

                fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> $i {
                    let count: u64 = self.sampler.0.sample(rng);
                    <$i>::try_from(count).unwrap_or(<$i>::MAX)
                }

                fn min(&self) -> $i {
                    0
                }

                fn max(&self) -> $i {
                    self.t
                }
            }

            impl FromOneParam for GeometricDistribution<$i> {
                type Param = f64;

                fn from_one(p: f64) -> Result<Self, DistributionError> {
                    let law = Geometric::new(p).map_err(|e| DistributionError::invalid(GEOMETRIC, e))?;
                    Ok(Self {
                        p,
                        sampler: Sampler(law),
                        _result: PhantomData,
                    })
                }
            }

            impl NativeDistribution<$i> for GeometricDistribution<$i> {
                const NAME: &'static str = GEOMETRIC;
                const STANDARD_ARGS: &'static [f64] = &[0.5];
                type Arity = Unary;

                fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> $i {
                    let count: u64 = self.sampler.0.sample(rng);
                    <$i>::try_from(count).unwrap_or(<$i>::MAX)
                }

                fn min(&self) -> $i {
                    0
                }

                fn max(&self) -> $i {
                    <$i>::MAX
                }
            }

            impl FromOneParam for PoissonDistribution<$i> {
                type Param = f64;

                fn from_one(mean: f64) -> Result<Self, DistributionError> {
                    let law = Poisson::new(mean).map_err(|e| DistributionError::invalid(POISSON, e))?;
                    Ok(Self {
                        mean,
                        sampler: Sampler(law),
                        _result: PhantomData,
                    })
                }
            }

            impl NativeDistribution<$i> for PoissonDistribution<$i> {
                const NAME: &'static str = POISSON;
                const STANDARD_ARGS: &'static [f64] = &[1.0];
                type Arity = Unary;

                fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> $i {
                    let count: f64 = self.sampler.0.sample(rng);
                    // Float to integer casts saturate.
                    count as $i
                }

                fn min(&self) -> $i {
                    0
                }

                fn max(&self) -> $i {
                    <$i>::MAX
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl<I> BernoulliDistribution<I> {
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl<I: Copy> BinomialDistribution<I> {
    pub fn trials(&self) -> I {
        self.t
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::ParamArity;
    use crate::engines::Mt19937;
    use crate::GeneratorAdapter;

    fn bind<T, D: NativeDistribution<T>>(args: &[f64]) -> Result<D, DistributionError> {
        <D::Arity as ParamArity<D>>::bind(args)
    }

    fn rng() -> GeneratorAdapter<Mt19937> {
        GeneratorAdapter::new(Mt19937::new(17))
    }

    #[test]
    fn test_uniform_int_defaults_upper_bound() {
        let dist: UniformIntDistribution<u8> = bind::<u8, _>(&[250.0]).unwrap();
        assert_eq!(dist.min(), 250);
        assert_eq!(dist.max(), u8::MAX);

        let mut dist: UniformIntDistribution<i16> = bind::<i16, _>(&[-3.0, 3.0]).unwrap();
        let mut rng = rng();
        for _ in 0..1000 {
            let v = dist.sample(&mut rng);
            assert!((-3..=3).contains(&v));
        }
    }

    #[test]
    fn test_uniform_int_rejects_inverted_range() {
        assert!(matches!(
            bind::<i32, UniformIntDistribution<i32>>(&[5.0, 1.0]),
            Err(DistributionError::InvalidParameter {
                distribution: "uniform_int_distribution",
                ..
            })
        ));
    }

    #[test]
    fn test_standard_uniform_int_covers_type() {
        let dist: UniformIntDistribution<u64> =
            bind::<u64, _>(<UniformIntDistribution<u64> as NativeDistribution<u64>>::STANDARD_ARGS)
                .unwrap();
        assert_eq!((dist.min(), dist.max()), (0, u64::MAX));
    }

    #[test]
    fn test_bernoulli_yields_zero_or_one() {
        let mut dist: BernoulliDistribution<u32> = bind::<u32, _>(&[0.3]).unwrap();
        let mut rng = rng();
        let ones = (0..2000).filter(|_| dist.sample(&mut rng) == 1).count();
        assert!(ones > 0 && ones < 2000);
        assert!(bind::<u32, BernoulliDistribution<u32>>(&[1.5]).is_err());
    }

    #[test]
    fn test_binomial_bounded_by_trials() {
        let mut dist: BinomialDistribution<i8> = bind::<i8, _>(&[10.0, 0.9]).unwrap();
        assert_eq!(dist.trials(), 10);
        let mut rng = rng();
        for _ in 0..500 {
            assert!((0..=10).contains(&dist.sample(&mut rng)));
        }
        assert!(bind::<i8, BinomialDistribution<i8>>(&[200.0]).is_err());
        assert!(bind::<i8, BinomialDistribution<i8>>(&[2.5]).is_err());
    }

    #[test]
    fn test_geometric_saturates() {
        let mut dist: GeometricDistribution<u8> = bind::<u8, _>(&[0.001]).unwrap();
        let mut rng = rng();
        let saturated = (0..200).any(|_| dist.sample(&mut rng) == u8::MAX);
        assert!(saturated);
    }

    #[test]
    fn test_poisson_requires_positive_mean() {
        assert!(bind::<u16, PoissonDistribution<u16>>(&[-1.0]).is_err());
        let mut dist: PoissonDistribution<u16> = bind::<u16, _>(&[4.0]).unwrap();
        let mut rng = rng();
        let total: u64 = (0..1000).map(|_| dist.sample(&mut rng) as u64).sum();
        assert!(total > 2000 && total < 6000);
    }

    #[test]
    fn test_equality_compares_parameters() {
        let a: BinomialDistribution<u16> = bind::<u16, _>(&[10.0]).unwrap();
        let b: BinomialDistribution<u16> = bind::<u16, _>(&[10.0, 0.5]).unwrap();
        let c: BinomialDistribution<u16> = bind::<u16, _>(&[10.0, 0.25]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let x: UniformIntDistribution<i8> = bind::<i8, _>(&[-4.0]).unwrap();
        let y: UniformIntDistribution<i8> = bind::<i8, _>(&[-4.0, 127.0]).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_unary_integer_laws_reject_two_arguments() {
        assert!(matches!(
            bind::<i64, GeometricDistribution<i64>>(&[0.5, 0.5]),
            Err(DistributionError::InvalidArgumentCount { count: 2, .. })
        ));
        assert!(matches!(
            bind::<i64, PoissonDistribution<i64>>(&[]),
            Err(DistributionError::InvalidArgumentCount { count: 0, .. })
        ));
    }
}
