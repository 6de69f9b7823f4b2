//! Per-element-type distribution registries.

use crate::distribution::{BoxedDistribution, DistributionAdapter, NativeDistribution};
use crate::distributions::{
    BernoulliDistribution, BinomialDistribution, CauchyDistribution, ChiSquaredDistribution,
    ExponentialDistribution, ExtremeValueDistribution, FisherFDistribution,
    GammaDistribution, GeometricDistribution, LognormalDistribution, NormalDistribution,
    PoissonDistribution, StudentTDistribution, UniformIntDistribution,
    UniformRealDistribution, WeibullDistribution,
};
use crate::registry::Registry;
use numeric_buffer::{Element, ElementType};
use std::sync::LazyLock;

pub type DistributionRegistry<T> = Registry<BoxedDistribution<T>>;

/// A buffer element type that distributions can sample and add into.
pub trait SampleElement: Element {
    /// Distributions producing this element type.
    fn distributions() -> &'static DistributionRegistry<Self>;

    /// Add one sample into an element. Integers wrap on overflow.
    fn accumulate(&mut self, sample: Self);
}

/// Register `D` under its native name with its standard arguments.
pub fn register_distribution<T, D>(registry: &mut DistributionRegistry<T>)
where
    T: 'static,
    D: NativeDistribution<T>,
{
    registry.register(D::NAME, || -> BoxedDistribution<T> {
        Box::new(DistributionAdapter::<T, D>::standard())
    });
}

macro_rules! real_elements {
    ($($f:ty => $registry:ident, $builtin:ident);* $(;)?) => {
        $(
            static $registry: LazyLock<DistributionRegistry<$f>> = LazyLock::new(|| {
                let mut registry = Registry::new();
                $builtin(&mut registry);
                let element_type = <$f as Element>::ELEMENT_TYPE;
                tracing::debug!(
                    element_type = %element_type,
                    count = registry.len(),
                    "registered built-in distributions"
                );
                registry
            });

            /// Register the built-in real distributions.
            pub fn $builtin(registry: &mut DistributionRegistry<$f>) {
                register_distribution::<$f, UniformRealDistribution<$f>>(registry);
                register_distribution::<$f, NormalDistribution<$f>>(registry);
                register_distribution::<$f, LognormalDistribution<$f>>(registry);
                register_distribution::<$f, CauchyDistribution<$f>>(registry);
                register_distribution::<$f, ChiSquaredDistribution<$f>>(registry);
                register_distribution::<$f, ExtremeValueDistribution<$f>>(registry);
                register_distribution::<$f, FisherFDistribution<$f>>(registry);
                register_distribution::<$f, GammaDistribution<$f>>(registry);
                register_distribution::<$f, StudentTDistribution<$f>>(registry);
                register_distribution::<$f, WeibullDistribution<$f>>(registry);
                register_distribution::<$f, ExponentialDistribution<$f>>(registry);
            }

            impl SampleElement for $f {
                fn distributions() -> &'static DistributionRegistry<Self> {
                    &$registry
                }

                fn accumulate(&mut self, sample: Self) {
                    *self += sample;
                }
            }
        )*
    };
}

macro_rules! integer_elements {
    ($($i:ty => $registry:ident, $builtin:ident);* $(;)?) => {
        $(
            static $registry: LazyLock<DistributionRegistry<$i>> = LazyLock::new(|| {
                let mut registry = Registry::new();
                $builtin(&mut registry);
                let element_type = <$i as Element>::ELEMENT_TYPE;
                tracing::debug!(
                    element_type = %element_type,
                    count = registry.len(),
                    "registered built-in distributions"
                );
                registry
            });

            /// Register the built-in integer distributions.
            pub fn $builtin(registry: &mut DistributionRegistry<$i>) {
                register_distribution::<$i, UniformIntDistribution<$i>>(registry);
                register_distribution::<$i, BernoulliDistribution<$i>>(registry);
                register_distribution::<$i, BinomialDistribution<$i>>(registry);
                register_distribution::<$i, GeometricDistribution<$i>>(registry);
                register_distribution::<$i, PoissonDistribution<$i>>(registry);
            }

            impl SampleElement for $i {
                fn distributions() -> &'static DistributionRegistry<Self> {
                    &$registry
                }

                fn accumulate(&mut self, sample: Self) {
                    *self = self.wrapping_add(sample);
                }
            }
        )*
    };
}

real_elements! {
    f32 => F32_DISTRIBUTIONS, register_builtin_f32_distributions;
    f64 => F64_DISTRIBUTIONS, register_builtin_f64_distributions;
}

integer_elements! {
    i8 => I8_DISTRIBUTIONS, register_builtin_i8_distributions;
    i16 => I16_DISTRIBUTIONS, register_builtin_i16_distributions;
    i32 => I32_DISTRIBUTIONS, register_builtin_i32_distributions;
    i64 => I64_DISTRIBUTIONS, register_builtin_i64_distributions;
    u8 => U8_DISTRIBUTIONS, register_builtin_u8_distributions;
    u16 => U16_DISTRIBUTIONS, register_builtin_u16_distributions;
    u32 => U32_DISTRIBUTIONS, register_builtin_u32_distributions;
    u64 => U64_DISTRIBUTIONS, register_builtin_u64_distributions;
}

/// Names of the distributions registered for `element_type`, in
/// registration order.
pub fn distribution_names(element_type: ElementType) -> Vec<&'static str> {
    fn names<T: SampleElement>() -> Vec<&'static str> {
        T::distributions().names().collect()
    }

    match element_type {
        ElementType::F32 => names::<f32>(),
        ElementType::F64 => names::<f64>(),
        ElementType::I8 => names::<i8>(),
        ElementType::I16 => names::<i16>(),
        ElementType::I32 => names::<i32>(),
        ElementType::I64 => names::<i64>(),
        ElementType::U8 => names::<u8>(),
        ElementType::U16 => names::<u16>(),
        ElementType::U32 => names::<u32>(),
        ElementType::U64 => names::<u64>(),
    }
}

/// Real distribution names, as reported for `f32`.
pub fn real_distribution_names() -> Vec<&'static str> {
    distribution_names(ElementType::F32)
}

/// Integer distribution names, as reported for `i32`.
pub fn integer_distribution_names() -> Vec<&'static str> {
    distribution_names(ElementType::I32)
}

/// Whether `name` is registered for any element type.
pub fn is_known_distribution(name: &str) -> bool {
    f32::distributions().contains(name) || i32::distributions().contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generator_registry, SeedSequence};

    #[test]
    fn test_every_registered_distribution_builds() {
        for ty in ElementType::ALL {
            assert!(!distribution_names(ty).is_empty(), "{ty} has no distributions");
        }
        for name in f64::distributions().names() {
            let dist = f64::distributions().build(name).unwrap();
            assert_eq!(dist.name(), name);
        }
        for name in u64::distributions().names() {
            let dist = u64::distributions().build(name).unwrap();
            assert_eq!(dist.name(), name);
        }
    }

    #[test]
    fn test_families_are_disjoint() {
        let real = real_distribution_names();
        let integer = integer_distribution_names();
        for ty in ElementType::ALL {
            let names = distribution_names(ty);
            let (own, other) = if ty.is_floating() {
                (&real, &integer)
            } else {
                (&integer, &real)
            };
            assert_eq!(&names, own, "{ty}");
            for name in other {
                assert!(!names.contains(name), "{ty} resolves {name}");
            }
        }
        assert!(f32::distributions().build("uniform_int_distribution").is_none());
        assert!(u8::distributions().build("uniform_real_distribution").is_none());
    }

    #[test]
    fn test_reported_name_lists() {
        let real = real_distribution_names();
        assert_eq!(real.first(), Some(&"uniform_real_distribution"));
        assert_eq!(real.len(), 11);
        let integer = integer_distribution_names();
        assert_eq!(integer.first(), Some(&"uniform_int_distribution"));
        assert_eq!(integer.len(), 5);
        assert!(is_known_distribution("gamma_distribution"));
        assert!(is_known_distribution("geometric_distribution"));
        assert!(!is_known_distribution("zipf_distribution"));
    }

    #[test]
    fn test_configure_keeps_previous_on_error() {
        let mut dist = f64::distributions().build("normal_distribution").unwrap();
        dist.configure(&[5.0, 2.0]).unwrap();
        let before = dist.clone();
        assert!(dist.configure(&[0.0, -1.0]).is_err());
        assert!(dist.configure(&[1.0, 2.0, 3.0]).is_err());
        assert!(before.equals(dist.as_ref()));
    }

    #[test]
    fn test_clone_equality_survives_reset() {
        let mut original = f32::distributions().build("gamma_distribution").unwrap();
        original.configure(&[2.0, 0.5]).unwrap();
        let mut copy = original.clone();
        assert!(*original == *copy);
        copy.reset();
        assert!(*original == *copy);
        original.reset();
        assert!(*copy == *original);

        let other = f32::distributions().build("gamma_distribution").unwrap();
        assert!(*original != *other);
        let different_law = f32::distributions().build("weibull_distribution").unwrap();
        assert!(!other.equals(different_law.as_ref()));
    }

    #[test]
    fn test_support_bounds_follow_configuration() {
        let mut dist = i16::distributions().build("uniform_int_distribution").unwrap();
        assert_eq!((dist.min(), dist.max()), (0, i16::MAX));
        dist.configure(&[-5.0, 5.0]).unwrap();
        assert_eq!((dist.min(), dist.max()), (-5, 5));
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let draw = || {
            let mut generator = generator_registry().build("mt19937").unwrap();
            generator.reseed(&SeedSequence::from_seed(5));
            let mut dist = f64::distributions().build("normal_distribution").unwrap();
            dist.configure(&[0.0, 3.0]).unwrap();
            (0..32)
                .map(|_| dist.sample(generator.as_mut()))
                .collect::<Vec<f64>>()
        };
        assert_eq!(draw(), draw());
    }

    #[test]
    fn test_accumulate() {
        let mut x = 250u8;
        x.accumulate(10);
        assert_eq!(x, 4);
        let mut y = 1.5f32;
        y.accumulate(0.25);
        assert_eq!(y, 1.75);
    }
}
