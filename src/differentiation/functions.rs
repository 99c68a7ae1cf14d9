/*!
 * Free function forms of the elementary functions and powers.
 *
 * Each function accepts anything which implements [Elementary] (or [Pow]), so the same
 * expression can be written once and evaluated with plain numbers, with
 * [Traces](super::Trace) for forward mode or with [Records](super::Record) for
 * reverse mode.
 *
 * ```
 * use easy_adjoint::differentiation::functions::{cos, sin};
 * use easy_adjoint::differentiation::{Tape, Trace};
 * use easy_adjoint::numeric::Elementary;
 *
 * fn f<E: Elementary + std::ops::Mul<Output = E> + Copy>(x: E) -> E {
 *     sin(x) * cos(x)
 * }
 *
 * let tape = Tape::new();
 * let x = tape.variable(0.25_f64);
 * let reverse = f(x).derivative(&[x]).unwrap()[0];
 * let forward = Trace::derivative(f, 0.25_f64);
 * assert!((reverse - forward).abs() < 1e-12);
 * assert_eq!(f(0.25_f64), f(x).value());
 * ```
 */

use crate::numeric::{Elementary, Pow};

macro_rules! elementary_function {
    ($(#[$attribute:meta])* $name:ident) => {
        $(#[$attribute])*
        #[inline]
        pub fn $name<E: Elementary>(x: E) -> E {
            x.$name()
        }
    };
}

elementary_function!(
    /** Sine of x. */
    sin
);
elementary_function!(
    /** Cosine of x. */
    cos
);
elementary_function!(
    /** Tangent of x. */
    tan
);
elementary_function!(
    /** e raised to the power of x. */
    exp
);
elementary_function!(
    /**
     * Natural logarithm of x. Not defined for x <= 0, where the result is NaN or
     * negative infinity rather than an error.
     */
    log
);
elementary_function!(sinh);
elementary_function!(cosh);
elementary_function!(tanh);
elementary_function!(
    /** Inverse sine of x, NaN outside of [-1, 1]. */
    asin
);
elementary_function!(
    /** Inverse cosine of x, NaN outside of [-1, 1]. */
    acos
);
elementary_function!(atan);
elementary_function!(asinh);
elementary_function!(
    /** Inverse hyperbolic cosine of x, NaN below 1. */
    acosh
);
elementary_function!(
    /** Inverse hyperbolic tangent of x, NaN outside of [-1, 1]. */
    atanh
);

/**
 * Computes base^exponent, where either side may be a plain number, a Trace or a Record
 * (but not a Trace and a Record).
 *
 * ```
 * use easy_adjoint::differentiation::functions::pow;
 * use easy_adjoint::differentiation::Tape;
 * let tape = Tape::new();
 * let x = tape.variable(3.0_f64);
 * let y = pow(2.0, x);
 * assert_eq!(y.value(), 8.0);
 * assert_eq!(pow(2.0_f64, 3.0), 8.0);
 * ```
 */
#[inline]
pub fn pow<B, E>(base: B, exponent: E) -> B::Output
where
    B: Pow<E>,
{
    base.pow(exponent)
}
