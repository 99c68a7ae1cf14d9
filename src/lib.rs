/*!
 * Easy Adjoint computes first order derivatives of scalar expressions built out of
 * arithmetic and the elementary functions.
 *
 * Two modes of automatic differentiation are provided:
 * - [Record](differentiation::Record) for reverse mode (adjoint / backpropagation), where
 *   every operation is recorded onto a [Tape](differentiation::Tape) and the derivatives
 *   with respect to any number of inputs are computed in one backward pass.
 * - [Trace](differentiation::Trace) for forward mode, a dual number which carries its
 *   derivative along with its value and needs no tape.
 *
 * See the [usage](differentiation::usage) page for a walk through of both.
 *
 * ```
 * use easy_adjoint::differentiation::Tape;
 * use easy_adjoint::numeric::Elementary;
 * let tape = Tape::new();
 * let x1 = tape.variable(2.0);
 * let x2 = tape.variable(3.0);
 * let y = x1 * x2 + x1.sin();
 * let derivatives = y.derivative(&[x1, x2]).unwrap();
 * assert_eq!(derivatives, vec![3.0 + 2.0_f64.cos(), 2.0]);
 * ```
 *
 * # Features
 * - `serde`: derives `Serialize` and `Deserialize` for [Trace](differentiation::Trace)
 *   and the [Operation](differentiation::Operation)s recorded on a tape.
 */

pub mod differentiation;
pub mod error;
pub mod numeric;
