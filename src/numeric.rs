/*!
 * Numerical type definitions
 *
 * The differentiation types are generic over a [Real] number type, in practice `f32` or
 * `f64`. The elementary functions and powers are defined as traits here rather than
 * inherent methods so that the same generic code can be written once and run with
 * plain numbers, [Records](crate::differentiation::Record) or
 * [Traces](crate::differentiation::Trace).
 */

use num_traits::Float;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/**
 * A real number type that the differentiation types can be generic over.
 *
 * Anything which implements all the super traits will automatically implement this trait
 * too, which covers `f32` and `f64`.
 */
pub trait Real: Float + Debug + Display + Sum + 'static {}

impl<T> Real for T where T: Float + Debug + Display + Sum + 'static {}

/**
 * The elementary single variable functions which can be differentiated.
 *
 * This is implemented by `f32` and `f64` by value, where it simply computes the function,
 * and by the differentiation types, where it also tracks the derivative.
 *
 * `log` is the natural logarithm.
 */
pub trait Elementary: Sized {
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn exp(self) -> Self;
    fn log(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;
}

macro_rules! elementary_float {
    ($T:ty) => {
        impl Elementary for $T {
            #[inline]
            fn sin(self) -> $T {
                <$T>::sin(self)
            }
            #[inline]
            fn cos(self) -> $T {
                <$T>::cos(self)
            }
            #[inline]
            fn tan(self) -> $T {
                <$T>::tan(self)
            }
            #[inline]
            fn exp(self) -> $T {
                <$T>::exp(self)
            }
            #[inline]
            fn log(self) -> $T {
                <$T>::ln(self)
            }
            #[inline]
            fn sinh(self) -> $T {
                <$T>::sinh(self)
            }
            #[inline]
            fn cosh(self) -> $T {
                <$T>::cosh(self)
            }
            #[inline]
            fn tanh(self) -> $T {
                <$T>::tanh(self)
            }
            #[inline]
            fn asin(self) -> $T {
                <$T>::asin(self)
            }
            #[inline]
            fn acos(self) -> $T {
                <$T>::acos(self)
            }
            #[inline]
            fn atan(self) -> $T {
                <$T>::atan(self)
            }
            #[inline]
            fn asinh(self) -> $T {
                <$T>::asinh(self)
            }
            #[inline]
            fn acosh(self) -> $T {
                <$T>::acosh(self)
            }
            #[inline]
            fn atanh(self) -> $T {
                <$T>::atanh(self)
            }
        }
    };
}

elementary_float!(f32);
elementary_float!(f64);

/**
 * A type which can compute self^rhs.
 *
 * This is implemented by `f32` and `f64` for all combinations of
 * by value and by reference.
 */
pub trait Pow<Rhs = Self> {
    type Output;
    fn pow(self, rhs: Rhs) -> Self::Output;
}

macro_rules! pow_float {
    ($T:ty) => {
        // T ^ T
        impl Pow<$T> for $T {
            type Output = $T;
            #[inline]
            fn pow(self, rhs: Self) -> Self::Output {
                self.powf(rhs)
            }
        }
        // T ^ &T
        impl<'a> Pow<&'a $T> for $T {
            type Output = $T;
            #[inline]
            fn pow(self, rhs: &Self) -> Self::Output {
                self.powf(*rhs)
            }
        }
        // &T ^ T
        impl<'a> Pow<$T> for &'a $T {
            type Output = $T;
            #[inline]
            fn pow(self, rhs: $T) -> Self::Output {
                self.powf(rhs)
            }
        }
        // &T ^ &T
        impl<'a> Pow<&'a $T> for &'a $T {
            type Output = $T;
            #[inline]
            fn pow(self, rhs: Self) -> Self::Output {
                self.powf(*rhs)
            }
        }
    };
}

pow_float!(f32);
pow_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_natural_logarithm() {
        assert!((Elementary::log(std::f64::consts::E) - 1.0).abs() < 1e-15);
        assert_eq!(Elementary::log(1.0_f32), 0.0);
    }

    #[test]
    fn pow_by_reference() {
        let x = 2.0_f64;
        assert_eq!((&x).pow(&3.0), 8.0);
        assert_eq!(x.pow(-1.0), 0.5);
    }
}
