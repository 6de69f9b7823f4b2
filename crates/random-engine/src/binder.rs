//! Binding runtime argument lists to native distribution parameters.
//!
//! A native distribution declares how many parameters it accepts through
//! its [`NativeDistribution::Arity`](crate::NativeDistribution::Arity)
//! type. [`Unary`] accepts exactly one argument. [`UnaryOrBinary`] accepts
//! one or two and requires the two-parameter constructor to exist.

use crate::DistributionError;

/// Conversion from a runtime `f64` argument to a native parameter type.
pub trait FromArg: Copy {
    fn from_arg(arg: f64) -> Self;
}

macro_rules! impl_from_arg {
    ($($ty:ty),*) => {
        $(
            impl FromArg for $ty {
                fn from_arg(arg: f64) -> Self {
                    arg as $ty
                }
            }
        )*
    };
}

impl_from_arg!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

/// Construction from the first native parameter alone. Remaining
/// parameters take their defaults.
pub trait FromOneParam: Sized {
    type Param: FromArg;

    fn from_one(a: Self::Param) -> Result<Self, DistributionError>;
}

/// Construction from both native parameters.
pub trait FromTwoParams: FromOneParam {
    fn from_two(a: Self::Param, b: Self::Param) -> Result<Self, DistributionError>;
}

/// Resolve an argument list into a native distribution.
pub trait ParamArity<D> {
    fn bind(args: &[f64]) -> Result<D, DistributionError>;
}

/// Exactly one parameter.
#[derive(Debug, Clone, Copy)]
pub struct Unary;

/// One parameter (second defaulted) or two parameters.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOrBinary;

impl<D: FromOneParam> ParamArity<D> for Unary {
    fn bind(args: &[f64]) -> Result<D, DistributionError> {
        match args {
            [a] => D::from_one(<D::Param as FromArg>::from_arg(*a)),
            _ => Err(DistributionError::InvalidArgumentCount {
                count: args.len(),
                expected: "1",
            }),
        }
    }
}

impl<D: FromTwoParams> ParamArity<D> for UnaryOrBinary {
    fn bind(args: &[f64]) -> Result<D, DistributionError> {
        match args {
            [a] => D::from_one(<D::Param as FromArg>::from_arg(*a)),
            [a, b] => D::from_two(
                <D::Param as FromArg>::from_arg(*a),
                <D::Param as FromArg>::from_arg(*b),
            ),
            _ => Err(DistributionError::InvalidArgumentCount {
                count: args.len(),
                expected: "1 or 2",
            }),
        }
    }
}
