/*!
 * Operator implementations for Traces
 *
 * These implementations are written here but Rust docs will display them on the
 * [Trace] struct page.
 *
 * Traces implement all the standard library traits for addition, subtraction,
 * multiplication, division and negation, so you can use the normal `+ - * /` operators
 * as you can with normal number types. As a convenience, these operations can also be
 * used with a plain number on either side, which is treated as a constant, so you can do
 *
 * ```
 * use easy_adjoint::differentiation::Trace;
 * let x: Trace<f32> = Trace::variable(2.0);
 * let y: f32 = 2.0;
 * let z: Trace<f32> = x * y;
 * assert_eq!(z.number, 4.0);
 * ```
 *
 * or more succinctly
 *
 * ```
 * use easy_adjoint::differentiation::Trace;
 * assert_eq!((Trace::variable(2.0) * 2.0).number, 4.0);
 * ```
 *
 * Traces also implement [Pow] and the [Elementary] functions, using the same derivative
 * rules that the backward pass of a [Tape](super::Tape) applies.
 */

use crate::differentiation::{BinaryOperation, Trace, UnaryFunction};
use crate::numeric::{Elementary, Pow, Real};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/**
 * A trace is displayed by showing its number component.
 */
impl<T: std::fmt::Display> std::fmt::Display for Trace<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

/**
 * Traces are equal if both their numbers and their derivatives are equal.
 */
impl<T: PartialEq> PartialEq for Trace<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.derivative == other.derivative
    }
}

/**
 * Any trace of a Real type implements Sum, which is
 * the same as adding a bunch of Trace types together.
 */
impl<T: Real> Sum for Trace<T> {
    #[inline]
    fn sum<I>(iter: I) -> Trace<T>
    where
        I: Iterator<Item = Trace<T>>,
    {
        iter.fold(Trace::constant(T::zero()), |total, next| total + next)
    }
}

/**
 * Applies a binary operation to two traces with the chain rule.
 */
#[inline]
fn binary<T: Real>(kind: BinaryOperation, lhs: &Trace<T>, rhs: &Trace<T>) -> Trace<T> {
    let (d_lhs, d_rhs) = kind.partials(lhs.number, rhs.number);
    Trace {
        number: kind.apply(lhs.number, rhs.number),
        derivative: d_lhs * lhs.derivative + d_rhs * rhs.derivative,
    }
}

/**
 * Applies a binary operation to a trace and a constant, with the constant on the right
 * unless `swapped`. Only the partial with respect to the trace is used, so a partial
 * with respect to the constant which is undefined at this point does not leak into
 * the derivative.
 */
#[inline]
fn binary_constant<T: Real>(
    kind: BinaryOperation,
    trace: &Trace<T>,
    constant: T,
    swapped: bool,
) -> Trace<T> {
    if swapped {
        let (_, d_trace) = kind.partials(constant, trace.number);
        Trace {
            number: kind.apply(constant, trace.number),
            derivative: d_trace * trace.derivative,
        }
    } else {
        let (d_trace, _) = kind.partials(trace.number, constant);
        Trace {
            number: kind.apply(trace.number, constant),
            derivative: d_trace * trace.derivative,
        }
    }
}

macro_rules! trace_operator_impl {
    (impl $op:tt for Trace { fn $method:ident } as $kind:expr) => {
        /**
         * Operation for two traces of the same type with both referenced.
         */
        impl<'l, 'r, T: Real> $op<&'r Trace<T>> for &'l Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: &Trace<T>) -> Self::Output {
                binary($kind, self, rhs)
            }
        }

        /**
         * Operation for two traces of the same type.
         */
        impl<T: Real> $op for Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: Trace<T>) -> Self::Output {
                binary($kind, &self, &rhs)
            }
        }

        /**
         * Operation for two traces of the same type with the right referenced.
         */
        impl<T: Real> $op<&Trace<T>> for Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: &Trace<T>) -> Self::Output {
                binary($kind, &self, rhs)
            }
        }

        /**
         * Operation for two traces of the same type with the left referenced.
         */
        impl<T: Real> $op<Trace<T>> for &Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: Trace<T>) -> Self::Output {
                binary($kind, self, &rhs)
            }
        }

        /**
         * Operation for a trace and a constant of the same type.
         */
        impl<T: Real> $op<T> for Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                binary_constant($kind, &self, rhs, false)
            }
        }

        /**
         * Operation for a trace and a constant of the same type with the right referenced.
         */
        impl<T: Real> $op<&T> for Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: &T) -> Self::Output {
                binary_constant($kind, &self, *rhs, false)
            }
        }

        /**
         * Operation for a trace and a constant of the same type with the left referenced.
         */
        impl<T: Real> $op<T> for &Trace<T> {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                binary_constant($kind, self, rhs, false)
            }
        }
    };
}

trace_operator_impl!(impl Add for Trace { fn add } as BinaryOperation::Add);
trace_operator_impl!(impl Sub for Trace { fn sub } as BinaryOperation::Sub);
trace_operator_impl!(impl Mul for Trace { fn mul } as BinaryOperation::Mul);
trace_operator_impl!(impl Div for Trace { fn div } as BinaryOperation::Div);

macro_rules! real_trace_operator_impl {
    (impl $op:tt for $T:ty { fn $method:ident } as $kind:expr) => {
        /**
         * Operation for a constant and a trace of the same type.
         */
        impl $op<Trace<$T>> for $T {
            type Output = Trace<$T>;
            #[inline]
            fn $method(self, rhs: Trace<$T>) -> Self::Output {
                binary_constant($kind, &rhs, self, true)
            }
        }

        /**
         * Operation for a constant and a trace of the same type with the right referenced.
         */
        impl $op<&Trace<$T>> for $T {
            type Output = Trace<$T>;
            #[inline]
            fn $method(self, rhs: &Trace<$T>) -> Self::Output {
                binary_constant($kind, rhs, self, true)
            }
        }
    };
}

macro_rules! real_trace_operators {
    ($T:ty) => {
        real_trace_operator_impl!(impl Add for $T { fn add } as BinaryOperation::Add);
        real_trace_operator_impl!(impl Sub for $T { fn sub } as BinaryOperation::Sub);
        real_trace_operator_impl!(impl Mul for $T { fn mul } as BinaryOperation::Mul);
        real_trace_operator_impl!(impl Div for $T { fn div } as BinaryOperation::Div);
    };
}

real_trace_operators!(f32);
real_trace_operators!(f64);

/**
 * Negation of a trace by reference.
 */
impl<T: Real> Neg for &Trace<T> {
    type Output = Trace<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        Trace {
            number: -self.number,
            derivative: -self.derivative,
        }
    }
}

/**
 * Negation of a trace by value.
 */
impl<T: Real> Neg for Trace<T> {
    type Output = Trace<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

/**
 * Power of one Trace to another, ie self^rhs for two traces of
 * the same type.
 */
impl<T: Real> Pow<Trace<T>> for Trace<T> {
    type Output = Trace<T>;
    #[inline]
    fn pow(self, rhs: Trace<T>) -> Self::Output {
        binary(BinaryOperation::Pow, &self, &rhs)
    }
}

/**
 * Power of one Trace to another with both referenced.
 */
impl<'l, 'r, T: Real> Pow<&'r Trace<T>> for &'l Trace<T> {
    type Output = Trace<T>;
    #[inline]
    fn pow(self, rhs: &Trace<T>) -> Self::Output {
        binary(BinaryOperation::Pow, self, rhs)
    }
}

/**
 * Power of a Trace to a constant of the same type.
 */
impl<T: Real> Pow<T> for Trace<T> {
    type Output = Trace<T>;
    #[inline]
    fn pow(self, rhs: T) -> Self::Output {
        binary_constant(BinaryOperation::Pow, &self, rhs, false)
    }
}

/**
 * Power of a constant to a Trace of the same type.
 */
impl<T: Real> Pow<Trace<T>> for T {
    type Output = Trace<T>;
    #[inline]
    fn pow(self, rhs: Trace<T>) -> Self::Output {
        binary_constant(BinaryOperation::Pow, &rhs, self, true)
    }
}

macro_rules! trace_elementary_impl {
    ($($method:ident => $kind:expr),* $(,)?) => {
        /**
         * The elementary functions of a Trace, applying the chain rule to the derivative.
         */
        impl<T: Real> Elementary for Trace<T> {
            $(
                #[inline]
                fn $method(self) -> Self {
                    Trace {
                        number: $kind.apply(self.number),
                        derivative: $kind.derivative(self.number) * self.derivative,
                    }
                }
            )*
        }
    };
}

trace_elementary_impl!(
    sin => UnaryFunction::Sin,
    cos => UnaryFunction::Cos,
    tan => UnaryFunction::Tan,
    exp => UnaryFunction::Exp,
    log => UnaryFunction::Log,
    sinh => UnaryFunction::Sinh,
    cosh => UnaryFunction::Cosh,
    tanh => UnaryFunction::Tanh,
    asin => UnaryFunction::Asin,
    acos => UnaryFunction::Acos,
    atan => UnaryFunction::Atan,
    asinh => UnaryFunction::Asinh,
    acosh => UnaryFunction::Acosh,
    atanh => UnaryFunction::Atanh,
);
