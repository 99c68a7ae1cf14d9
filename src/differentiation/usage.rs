/*!
 * # Usage of Record and Trace
 *
 * Both [Trace](super::Trace) and [Record](super::Record) for forward and reverse
 * automatic differentiation respectively implement the arithmetic operators,
 * [Pow](crate::numeric::Pow) and [Elementary](crate::numeric::Elementary), and can
 * generally be treated as normal numbers just like `f32` and `f64`.
 *
 * `Trace` is implemented as a dual number, and is more or less a one to one
 * substitution. `Record` requires building a tape of the values and dependencies of each
 * operation performed on them. This means performing operations on records has side
 * effects, they append entries onto a [Tape](super::Tape). Create a Tape before you
 * start creating Records, and every Record of that computation borrows it.
 *
 * Given some function from N inputs to M outputs you can pass it `Trace`s or `Record`s
 * and retrieve the first derivative from the outputs for all combinations of N and M.
 * If N >> M then you should use `Record` as one backward pass computes the derivative
 * with respect to every input. If N << M then you should use `Trace`, which needs one
 * pass per input but no tape.
 *
 * For this example we use a function which takes two inputs, r and a, and returns two
 * outputs, x and y.
 *
 * ## Using Trace
 *
 * ```
 * use easy_adjoint::differentiation::Trace;
 * use easy_adjoint::numeric::Elementary;
 * fn cartesian(r: Trace<f32>, angle: Trace<f32>) -> (Trace<f32>, Trace<f32>) {
 *     let x = r * angle.cos();
 *     let y = r * angle.sin();
 *     (x, y)
 * }
 * // first find dx/dr and dy/dr
 * let (x, y) = cartesian(Trace::variable(1.0), Trace::constant(2.0));
 * let dx_dr = x.derivative;
 * let dy_dr = y.derivative;
 * // now find dx/da and dy/da
 * let (x, y) = cartesian(Trace::constant(1.0), Trace::variable(2.0));
 * let dx_da = x.derivative;
 * let dy_da = y.derivative;
 * assert_eq!(dx_dr, 2.0_f32.cos());
 * assert_eq!(dy_dr, 2.0_f32.sin());
 * assert_eq!(dx_da, -2.0_f32.sin());
 * assert_eq!(dy_da, 2.0_f32.cos());
 * ```
 *
 * ## Using Record
 *
 * ```
 * use easy_adjoint::differentiation::{Record, Tape};
 * use easy_adjoint::numeric::Elementary;
 * // the lifetimes tell the rust compiler that our inputs and outputs
 * // can all live as long as the Tape
 * fn cartesian<'a>(
 *     r: Record<'a, f32>,
 *     angle: Record<'a, f32>
 * ) -> (Record<'a, f32>, Record<'a, f32>) {
 *     let x = r * angle.cos();
 *     let y = r * angle.sin();
 *     (x, y)
 * }
 * // first we must construct a Tape to create records from
 * let tape = Tape::new();
 * let r = tape.variable(1.0);
 * let a = tape.variable(2.0);
 * let (x, y) = cartesian(r, a);
 * // one backward pass per output gives the derivatives for every input
 * let x_derivatives = x.derivative(&[r, a]).unwrap();
 * let y_derivatives = y.derivative(&[r, a]).unwrap();
 * assert_eq!(x_derivatives, vec![2.0_f32.cos(), -2.0_f32.sin()]);
 * assert_eq!(y_derivatives, vec![2.0_f32.sin(), 2.0_f32.cos()]);
 * ```
 *
 * ## Reusing a Tape
 *
 * A Tape keeps growing as long as operations are performed on its Records. To start an
 * unrelated computation, either create a new Tape or [clear](super::Tape::clear) the
 * old one. Clearing needs the Tape mutably, so the compiler rejects any attempt to keep
 * using Records from before the clear.
 *
 * ```
 * use easy_adjoint::differentiation::Tape;
 * let mut tape = Tape::new();
 * for i in 0..3 {
 *     {
 *         let x = tape.variable(i as f64);
 *         let y = x * x * x;
 *         assert_eq!(y.derivative(&[x]).unwrap(), vec![3.0 * (i * i) as f64]);
 *     }
 *     tape.clear();
 * }
 * ```
 *
 * ```compile_fail
 * use easy_adjoint::differentiation::Tape;
 * let mut tape = Tape::new();
 * let x = tape.variable(1.0);
 * tape.clear();
 * let y = x * 2.0;
 * ```
 *
 * ## Writing generic functions
 *
 * Since plain numbers, Traces and Records all implement the same traits, a function can
 * be written once and then evaluated, or differentiated in either mode.
 *
 * ```
 * use easy_adjoint::differentiation::{Tape, Trace};
 * use easy_adjoint::differentiation::functions::{exp, log};
 * use easy_adjoint::numeric::Elementary;
 * use std::ops::{Add, Mul};
 *
 * fn softplus_squared<E>(x: E) -> E
 * where
 *     E: Elementary + Add<f64, Output = E> + Mul<Output = E> + Copy,
 * {
 *     let softplus = log(exp(x) + 1.0);
 *     softplus * softplus
 * }
 *
 * let tape = Tape::new();
 * let x = tape.variable(0.5);
 * let reverse = softplus_squared(x).derivative(&[x]).unwrap()[0];
 * let forward = Trace::derivative(softplus_squared, 0.5);
 * assert!((reverse - forward).abs() < 1e-12);
 * ```
 */
