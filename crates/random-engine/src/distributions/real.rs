//! Real-valued distributions for `f32` and `f64` buffers.

use super::Law;
use crate::binder::{FromOneParam, FromTwoParams, Unary, UnaryOrBinary};
use crate::distribution::{DistributionError, NativeDistribution, Sampler};
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{
    Cauchy, ChiSquared, Distribution, Exp, FisherF, Gamma, Gumbel, LogNormal, Normal, StudentT,
    Weibull,
};
use std::fmt;

/// Floating point element type together with the sampler types used for it.
pub trait RealElement: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    type Uniform: Law<Self>;
    type Normal: Law<Self>;
    type LogNormal: Law<Self>;
    type Cauchy: Law<Self>;
    type ChiSquared: Law<Self>;
    type Gumbel: Law<Self>;
    type FisherF: Law<Self>;
    type Gamma: Law<Self>;
    type StudentT: Law<Self>;
    type Weibull: Law<Self>;
    type Exp: Law<Self>;
}

/// Uniform on `[a, b)`.
#[derive(Debug, Clone)]
pub struct UniformRealDistribution<F: RealElement> {
    a: F,
    b: F,
    sampler: Sampler<F::Uniform>,
}

/// Gaussian with the given mean and standard deviation.
#[derive(Debug, Clone)]
pub struct NormalDistribution<F: RealElement> {
    mean: F,
    stddev: F,
    sampler: Sampler<F::Normal>,
}

/// Log-normal whose logarithm has mean `m` and standard deviation `s`.
#[derive(Debug, Clone)]
pub struct LognormalDistribution<F: RealElement> {
    m: F,
    s: F,
    sampler: Sampler<F::LogNormal>,
}

/// Cauchy with location `a` and scale `b`.
#[derive(Debug, Clone)]
pub struct CauchyDistribution<F: RealElement> {
    a: F,
    b: F,
    sampler: Sampler<F::Cauchy>,
}

#[derive(Debug, Clone)]
pub struct ChiSquaredDistribution<F: RealElement> {
    n: F,
    sampler: Sampler<F::ChiSquared>,
}

/// Type I extreme value (Gumbel) with location `a` and scale `b`.
#[derive(Debug, Clone)]
pub struct ExtremeValueDistribution<F: RealElement> {
    a: F,
    b: F,
    sampler: Sampler<F::Gumbel>,
}

#[derive(Debug, Clone)]
pub struct FisherFDistribution<F: RealElement> {
    m: F,
    n: F,
    sampler: Sampler<F::FisherF>,
}

/// Gamma with shape `alpha` and scale `beta`.
#[derive(Debug, Clone)]
pub struct GammaDistribution<F: RealElement> {
    alpha: F,
    beta: F,
    sampler: Sampler<F::Gamma>,
}

#[derive(Debug, Clone)]
pub struct StudentTDistribution<F: RealElement> {
    n: F,
    sampler: Sampler<F::StudentT>,
}

/// Weibull with shape `a` and scale `b`.
#[derive(Debug, Clone)]
pub struct WeibullDistribution<F: RealElement> {
    a: F,
    b: F,
    sampler: Sampler<F::Weibull>,
}

/// Exponential with rate `lambda`.
#[derive(Debug, Clone)]
pub struct ExponentialDistribution<F: RealElement> {
    lambda: F,
    sampler: Sampler<F::Exp>,
}

params_eq! {
    UniformRealDistribution<F: RealElement> { a, b };
    NormalDistribution<F: RealElement> { mean, stddev };
    LognormalDistribution<F: RealElement> { m, s };
    CauchyDistribution<F: RealElement> { a, b };
    ChiSquaredDistribution<F: RealElement> { n };
    ExtremeValueDistribution<F: RealElement> { a, b };
    FisherFDistribution<F: RealElement> { m, n };
    GammaDistribution<F: RealElement> { alpha, beta };
    StudentTDistribution<F: RealElement> { n };
    WeibullDistribution<F: RealElement> { a, b };
    ExponentialDistribution<F: RealElement> { lambda };
}

const UNIFORM_REAL: &str = "uniform_real_distribution";
const NORMAL: &str = "normal_distribution";
const LOGNORMAL: &str = "lognormal_distribution";
const CAUCHY: &str = "cauchy_distribution";
const CHI_SQUARED: &str = "chi_squared_distribution";
const EXTREME_VALUE: &str = "extreme_value_distribution";
const FISHER_F: &str = "fisher_f_distribution";
const GAMMA: &str = "gamma_distribution";
const STUDENT_T: &str = "student_t_distribution";
const WEIBULL: &str = "weibull_distribution";
const EXPONENTIAL: &str = "exponential_distribution";

/// Implement `NativeDistribution` and the parameter constructors of a
/// real distribution whose sampler is read from `self.sampler`.
macro_rules! native_real {
    (
        $f:ty, $dist:ident, $name:expr, $arity:ty, $standard:expr,
        support = |$d:pat_param| ($lo:expr, $hi:expr)
    ) => {
        impl NativeDistribution<$f> for $dist<$f> {
            const NAME: &'static str = $name;
            const STANDARD_ARGS: &'static [f64] = $standard;
            type Arity = $arity;

            fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> $f {
                self.sampler.0.sample(rng)
            }

            #[allow(unused_variables)]
            fn min(&self) -> $f {
                let $d = self;
                $lo
            }

            #[allow(unused_variables)]
            fn max(&self) -> $f {
                let $d = self;
                $hi
            }
        }
    };
}

macro_rules! impl_real {
    ($f:ty) => {
        impl RealElement for $f {
            type Uniform = Uniform<$f>;
            type Normal = Normal<$f>;
            type LogNormal = LogNormal<$f>;
            type Cauchy = Cauchy<$f>;
            type ChiSquared = ChiSquared<$f>;
            type Gumbel = Gumbel<$f>;
            type FisherF = FisherF<$f>;
            type Gamma = Gamma<$f>;
            type StudentT = StudentT<$f>;
            type Weibull = Weibull<$f>;
            type Exp = Exp<$f>;
        }

        impl FromOneParam for UniformRealDistribution<$f> {
            type Param = $f;

            fn from_one(a: $f) -> Result<Self, DistributionError> {
                Self::from_two(a, 1.0)
            }
        }

        impl FromTwoParams for UniformRealDistribution<$f> {
            fn from_two(a: $f, b: $f) -> Result<Self, DistributionError> {
                if !(a < b) || !(b - a).is_finite() {
                    return Err(DistributionError::invalid(
                        UNIFORM_REAL,
                        format!("requires finite a < b, got a={a}, b={b}"),
                    ));
                }
                Ok(Self {
                    a,
                    b,
                    sampler: Sampler(Uniform::new(a, b)),
                })
            }
        }

        native_real!($f, UniformRealDistribution, UNIFORM_REAL, UnaryOrBinary, &[0.0, 1.0],
            support = |d| (d.a, d.b));

        impl FromOneParam for NormalDistribution<$f> {
            type Param = $f;

            fn from_one(mean: $f) -> Result<Self, DistributionError> {
                Self::from_two(mean, 1.0)
            }
        }

        impl FromTwoParams for NormalDistribution<$f> {
            fn from_two(mean: $f, stddev: $f) -> Result<Self, DistributionError> {
                let law = Normal::new(mean, stddev)
                    .map_err(|e| DistributionError::invalid(NORMAL, e))?;
                Ok(Self {
                    mean,
                    stddev,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, NormalDistribution, NORMAL, UnaryOrBinary, &[0.0, 1.0],
            support = |_| (<$f>::NEG_INFINITY, <$f>::INFINITY));

        impl FromOneParam for LognormalDistribution<$f> {
            type Param = $f;

            fn from_one(m: $f) -> Result<Self, DistributionError> {
                Self::from_two(m, 1.0)
            }
        }

        impl FromTwoParams for LognormalDistribution<$f> {
            fn from_two(m: $f, s: $f) -> Result<Self, DistributionError> {
                let law = LogNormal::new(m, s)
                    .map_err(|e| DistributionError::invalid(LOGNORMAL, e))?;
                Ok(Self {
                    m,
                    s,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, LognormalDistribution, LOGNORMAL, UnaryOrBinary, &[0.0, 1.0],
            support = |_| (0.0, <$f>::INFINITY));

        impl FromOneParam for CauchyDistribution<$f> {
            type Param = $f;

            fn from_one(a: $f) -> Result<Self, DistributionError> {
                Self::from_two(a, 1.0)
            }
        }

        impl FromTwoParams for CauchyDistribution<$f> {
            fn from_two(a: $f, b: $f) -> Result<Self, DistributionError> {
                let law = Cauchy::new(a, b).map_err(|e| DistributionError::invalid(CAUCHY, e))?;
                Ok(Self {
                    a,
                    b,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, CauchyDistribution, CAUCHY, UnaryOrBinary, &[0.0, 1.0],
            support = |_| (<$f>::NEG_INFINITY, <$f>::INFINITY));

        impl FromOneParam for ChiSquaredDistribution<$f> {
            type Param = $f;

            fn from_one(n: $f) -> Result<Self, DistributionError> {
                let law = ChiSquared::new(n)
                    .map_err(|e| DistributionError::invalid(CHI_SQUARED, e))?;
                Ok(Self {
                    n,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, ChiSquaredDistribution, CHI_SQUARED, Unary, &[1.0],
            support = |_| (0.0, <$f>::INFINITY));

        impl FromOneParam for ExtremeValueDistribution<$f> {
            type Param = $f;

            fn from_one(a: $f) -> Result<Self, DistributionError> {
                Self::from_two(a, 1.0)
            }
        }

        impl FromTwoParams for ExtremeValueDistribution<$f> {
            fn from_two(a: $f, b: $f) -> Result<Self, DistributionError> {
                let law = Gumbel::new(a, b)
                    .map_err(|e| DistributionError::invalid(EXTREME_VALUE, e))?;
                Ok(Self {
                    a,
                    b,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, ExtremeValueDistribution, EXTREME_VALUE, UnaryOrBinary, &[0.0, 1.0],
            support = |_| (<$f>::NEG_INFINITY, <$f>::INFINITY));

        impl FromOneParam for FisherFDistribution<$f> {
            type Param = $f;

            fn from_one(m: $f) -> Result<Self, DistributionError> {
                Self::from_two(m, 1.0)
            }
        }

        impl FromTwoParams for FisherFDistribution<$f> {
            fn from_two(m: $f, n: $f) -> Result<Self, DistributionError> {
                let law = FisherF::new(m, n).map_err(|e| DistributionError::invalid(FISHER_F, e))?;
                Ok(Self {
                    m,
                    n,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, FisherFDistribution, FISHER_F, UnaryOrBinary, &[1.0, 1.0],
            support = |_| (0.0, <$f>::INFINITY));

        impl FromOneParam for GammaDistribution<$f> {
            type Param = $f;

            fn from_one(alpha: $f) -> Result<Self, DistributionError> {
                Self::from_two(alpha, 1.0)
            }
        }

        impl FromTwoParams for GammaDistribution<$f> {
            fn from_two(alpha: $f, beta: $f) -> Result<Self, DistributionError> {
                let law = Gamma::new(alpha, beta).map_err(|e| DistributionError::invalid(GAMMA, e))?;
                Ok(Self {
                    alpha,
                    beta,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, GammaDistribution, GAMMA, UnaryOrBinary, &[1.0, 1.0],
            support = |_| (0.0, <$f>::INFINITY));

        impl FromOneParam for StudentTDistribution<$f> {
            type Param = $f;

            fn from_one(n: $f) -> Result<Self, DistributionError> {
                let law = StudentT::new(n).map_err(|e| DistributionError::invalid(STUDENT_T, e))?;
                Ok(Self {
                    n,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, StudentTDistribution, STUDENT_T, Unary, &[1.0],
            support = |_| (<$f>::NEG_INFINITY, <$f>::INFINITY));

        impl FromOneParam for WeibullDistribution<$f> {
            type Param = $f;

            fn from_one(a: $f) -> Result<Self, DistributionError> {
                Self::from_two(a, 1.0)
            }
        }

        impl FromTwoParams for WeibullDistribution<$f> {
            fn from_two(a: $f, b: $f) -> Result<Self, DistributionError> {
                // rand_distr takes (scale, shape).
                let law = Weibull::new(b, a).map_err(|e| DistributionError::invalid(WEIBULL, e))?;
                Ok(Self {
                    a,
                    b,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, WeibullDistribution, WEIBULL, UnaryOrBinary, &[1.0, 1.0],
            support = |_| (0.0, <$f>::INFINITY));

        impl FromOneParam for ExponentialDistribution<$f> {
            type Param = $f;

            fn from_one(lambda: $f) -> Result<Self, DistributionError> {
                let law = Exp::new(lambda).map_err(|e| DistributionError::invalid(EXPONENTIAL, e))?;
                Ok(Self {
                    lambda,
                    sampler: Sampler(law),
                })
            }
        }

        native_real!($f, ExponentialDistribution, EXPONENTIAL, Unary, &[1.0],
            support = |_| (0.0, <$f>::INFINITY));
    };
}

impl_real!(f32);
impl_real!(f64);

impl<F: RealElement> UniformRealDistribution<F> {
    pub fn bounds(&self) -> (F, F) {
        (self.a, self.b)
    }
}

impl<F: RealElement> NormalDistribution<F> {
    pub fn mean(&self) -> F {
        self.mean
    }

    pub fn stddev(&self) -> F {
        self.stddev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::ParamArity;
    use crate::engines::Mt19937_64;
    use crate::GeneratorAdapter;

    fn bind<D: NativeDistribution<f64>>(args: &[f64]) -> Result<D, DistributionError> {
        <D::Arity as ParamArity<D>>::bind(args)
    }

    #[test]
    fn test_uniform_real_defaults_and_bounds() {
        let dist: UniformRealDistribution<f64> = bind(&[-2.0]).unwrap();
        assert_eq!(dist.bounds(), (-2.0, 1.0));
        assert_eq!(dist.min(), -2.0);
        assert_eq!(dist.max(), 1.0);

        let mut rng = GeneratorAdapter::<Mt19937_64>::default();
        let mut dist: UniformRealDistribution<f64> = bind(&[10.0, 11.0]).unwrap();
        for _ in 0..1000 {
            let v = dist.sample(&mut rng);
            assert!((10.0..11.0).contains(&v));
        }
    }

    #[test]
    fn test_uniform_real_rejects_empty_range() {
        let err = bind::<UniformRealDistribution<f64>>(&[1.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::InvalidParameter {
                distribution: "uniform_real_distribution",
                ..
            }
        ));
        assert!(bind::<UniformRealDistribution<f64>>(&[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_normal_rejects_negative_stddev() {
        let err = bind::<NormalDistribution<f64>>(&[0.0, -1.0]).unwrap_err();
        assert!(err.to_string().contains("normal_distribution"));
    }

    #[test]
    fn test_zero_stddev_samples_mean() {
        let mut rng = GeneratorAdapter::<Mt19937_64>::default();
        let mut dist: NormalDistribution<f64> = bind(&[3.5, 0.0]).unwrap();
        for _ in 0..100 {
            assert_eq!(dist.sample(&mut rng), 3.5);
        }
    }

    #[test]
    fn test_unary_laws_reject_two_arguments() {
        assert!(matches!(
            bind::<ChiSquaredDistribution<f64>>(&[1.0, 2.0]),
            Err(DistributionError::InvalidArgumentCount { count: 2, .. })
        ));
        assert!(matches!(
            bind::<StudentTDistribution<f64>>(&[]),
            Err(DistributionError::InvalidArgumentCount { count: 0, .. })
        ));
        assert!(bind::<ExponentialDistribution<f64>>(&[2.0]).is_ok());
    }

    #[test]
    fn test_positive_support_laws() {
        let mut rng = GeneratorAdapter::<Mt19937_64>::new(Mt19937_64::new(99));
        let mut gamma: GammaDistribution<f64> = bind(&[2.0, 3.0]).unwrap();
        let mut weibull: WeibullDistribution<f64> = bind(&[1.5]).unwrap();
        let mut exp: ExponentialDistribution<f64> = bind(&[0.5]).unwrap();
        for _ in 0..500 {
            assert!(gamma.sample(&mut rng) >= 0.0);
            assert!(weibull.sample(&mut rng) >= 0.0);
            assert!(exp.sample(&mut rng) >= 0.0);
        }
        assert_eq!(gamma.min(), 0.0);
        assert_eq!(gamma.max(), f64::INFINITY);
    }

    #[test]
    fn test_equality_compares_parameters() {
        let a: GammaDistribution<f64> = bind(&[2.0, 1.0]).unwrap();
        let b: GammaDistribution<f64> = bind(&[2.0]).unwrap();
        let c: GammaDistribution<f64> = bind(&[2.0, 2.0]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut rng = GeneratorAdapter::<Mt19937_64>::new(Mt19937_64::new(3));
        let mut sampled: NormalDistribution<f32> = bind_f32(&[1.0, 0.5]);
        let fresh: NormalDistribution<f32> = bind_f32(&[1.0, 0.5]);
        for _ in 0..10 {
            sampled.sample(&mut rng);
        }
        assert_eq!(sampled, fresh);
        assert_ne!(fresh, bind_f32::<NormalDistribution<f32>>(&[1.0, 0.25]));
    }

    fn bind_f32<D: NativeDistribution<f32>>(args: &[f64]) -> D {
        <D::Arity as ParamArity<D>>::bind(args).unwrap()
    }

    #[test]
    fn test_f32_laws_sample() {
        let mut rng = GeneratorAdapter::<Mt19937_64>::default();
        let mut dist = <<CauchyDistribution<f32> as NativeDistribution<f32>>::Arity as ParamArity<
            CauchyDistribution<f32>,
        >>::bind(&[0.0, 2.0])
        .unwrap();
        let v: f32 = dist.sample(&mut rng);
        assert!(!v.is_nan());
    }
}
