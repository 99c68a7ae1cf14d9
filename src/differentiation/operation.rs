/*!
 * The entries recorded onto a [Tape](super::Tape).
 *
 * Each arithmetic operation or elementary function applied to a
 * [Record](super::Record) appends one [Operation] naming what was computed and the
 * indexes of the nodes it read from and wrote to. The forward values and the local
 * derivative rules for every kind live here so the backward pass is a single match
 * over the kinds of operation.
 */

use crate::numeric::Real;

/**
 * The binary operations which can be recorded.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperation {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/**
 * The elementary single variable functions which can be recorded.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sinh,
    Cosh,
    Tanh,
    Asin,
    Acos,
    Atan,
    Asinh,
    Acosh,
    Atanh,
}

/**
 * One entry on a tape.
 *
 * All fields are indexes of nodes on the same tape. The output is always a fresh node
 * created for this operation, so its index is larger than any of its inputs and the
 * insertion order of operations is a topological order of the computation graph.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    Binary {
        kind: BinaryOperation,
        lhs: usize,
        rhs: usize,
        output: usize,
    },
    Unary {
        kind: UnaryFunction,
        input: usize,
        output: usize,
    },
}

impl BinaryOperation {
    /**
     * Computes the forward value of this operation.
     */
    #[inline]
    pub fn apply<T: Real>(self, lhs: T, rhs: T) -> T {
        match self {
            BinaryOperation::Add => lhs + rhs,
            BinaryOperation::Sub => lhs - rhs,
            BinaryOperation::Mul => lhs * rhs,
            BinaryOperation::Div => lhs / rhs,
            BinaryOperation::Pow => lhs.powf(rhs),
        }
    }

    /**
     * Computes the partial derivatives of this operation with respect to its left and
     * right inputs, evaluated at the given input values.
     */
    pub fn partials<T: Real>(self, lhs: T, rhs: T) -> (T, T) {
        match self {
            // δ(lhs + rhs) / δlhs = 1, δ(lhs + rhs) / δrhs = 1
            BinaryOperation::Add => (T::one(), T::one()),
            // δ(lhs - rhs) / δlhs = 1, δ(lhs - rhs) / δrhs = -1
            BinaryOperation::Sub => (T::one(), -T::one()),
            // δ(lhs * rhs) / δlhs = rhs, δ(lhs * rhs) / δrhs = lhs
            BinaryOperation::Mul => (rhs, lhs),
            // δ(lhs / rhs) / δlhs = 1 / rhs, δ(lhs / rhs) / δrhs = -lhs / rhs^2
            BinaryOperation::Div => (T::one() / rhs, -lhs / (rhs * rhs)),
            // δ(lhs^rhs) / δlhs = rhs * lhs^(rhs-1), δ(lhs^rhs) / δrhs = ln(lhs) * lhs^rhs
            BinaryOperation::Pow => (
                rhs * lhs.powf(rhs - T::one()),
                lhs.ln() * lhs.powf(rhs),
            ),
        }
    }
}

impl UnaryFunction {
    /**
     * Computes the forward value of this function.
     */
    pub fn apply<T: Real>(self, x: T) -> T {
        match self {
            UnaryFunction::Sin => x.sin(),
            UnaryFunction::Cos => x.cos(),
            UnaryFunction::Tan => x.tan(),
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Log => x.ln(),
            UnaryFunction::Sinh => x.sinh(),
            UnaryFunction::Cosh => x.cosh(),
            UnaryFunction::Tanh => x.tanh(),
            UnaryFunction::Asin => x.asin(),
            UnaryFunction::Acos => x.acos(),
            UnaryFunction::Atan => x.atan(),
            UnaryFunction::Asinh => x.asinh(),
            UnaryFunction::Acosh => x.acosh(),
            UnaryFunction::Atanh => x.atanh(),
        }
    }

    /**
     * Computes the derivative of this function, evaluated at x.
     */
    pub fn derivative<T: Real>(self, x: T) -> T {
        let one = T::one();
        match self {
            UnaryFunction::Sin => x.cos(),
            UnaryFunction::Cos => -x.sin(),
            UnaryFunction::Tan => one / (x.cos() * x.cos()),
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Log => one / x,
            UnaryFunction::Sinh => x.cosh(),
            UnaryFunction::Cosh => x.sinh(),
            UnaryFunction::Tanh => one / (x.cosh() * x.cosh()),
            UnaryFunction::Asin => one / (one - x * x).sqrt(),
            UnaryFunction::Acos => -one / (one - x * x).sqrt(),
            UnaryFunction::Atan => one / (one + x * x),
            UnaryFunction::Asinh => one / (x * x + one).sqrt(),
            UnaryFunction::Acosh => one / ((x - one).sqrt() * (x + one).sqrt()),
            UnaryFunction::Atanh => one / (one - x * x),
        }
    }
}

impl Operation {
    /**
     * The index of the node this operation produced.
     */
    pub fn output(&self) -> usize {
        match *self {
            Operation::Binary { output, .. } => output,
            Operation::Unary { output, .. } => output,
        }
    }

    /**
     * The indexes of the nodes this operation read from, in argument order.
     */
    pub fn inputs(&self) -> Vec<usize> {
        match *self {
            Operation::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Operation::Unary { input, .. } => vec![input],
        }
    }

    /**
     * Applies the local adjoint rule of this operation, reading the forward values from
     * `values` and accumulating the output's adjoint onto its inputs' adjoints.
     *
     * Inputs are accumulated onto rather than assigned, as the same node may be an input
     * to many operations, or to both sides of one.
     *
     * An operation whose output adjoint is zero contributes nothing and is skipped, so
     * an infinite local derivative off the path to the root cannot turn into NaN.
     */
    pub(crate) fn backpropagate<T: Real>(&self, values: &[T], adjoints: &mut [T]) {
        if adjoints[self.output()].is_zero() {
            return;
        }
        match *self {
            Operation::Binary {
                kind,
                lhs,
                rhs,
                output,
            } => {
                let adjoint = adjoints[output];
                let (d_lhs, d_rhs) = kind.partials(values[lhs], values[rhs]);
                adjoints[lhs] = adjoints[lhs] + d_lhs * adjoint;
                adjoints[rhs] = adjoints[rhs] + d_rhs * adjoint;
            }
            Operation::Unary {
                kind,
                input,
                output,
            } => {
                let adjoint = adjoints[output];
                adjoints[input] = adjoints[input] + kind.derivative(values[input]) * adjoint;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FUNCTIONS: [UnaryFunction; 14] = [
        UnaryFunction::Sin,
        UnaryFunction::Cos,
        UnaryFunction::Tan,
        UnaryFunction::Exp,
        UnaryFunction::Log,
        UnaryFunction::Sinh,
        UnaryFunction::Cosh,
        UnaryFunction::Tanh,
        UnaryFunction::Asin,
        UnaryFunction::Acos,
        UnaryFunction::Atan,
        UnaryFunction::Asinh,
        UnaryFunction::Acosh,
        UnaryFunction::Atanh,
    ];

    fn central_difference(function: UnaryFunction, x: f64) -> f64 {
        let h = 1e-6;
        (function.apply(x + h) - function.apply(x - h)) / (2.0 * h)
    }

    #[test]
    fn unary_derivatives_match_finite_differences() {
        for function in FUNCTIONS {
            // every function is defined here, acosh needs x > 1 and the rest need |x| < 1
            let x = if function == UnaryFunction::Acosh { 1.7 } else { 0.3 };
            assert_relative_eq!(
                function.derivative(x),
                central_difference(function, x),
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn binary_partials() {
        assert_eq!(BinaryOperation::Add.partials(2.0, 3.0), (1.0, 1.0));
        assert_eq!(BinaryOperation::Sub.partials(2.0, 3.0), (1.0, -1.0));
        assert_eq!(BinaryOperation::Mul.partials(2.0, 3.0), (3.0, 2.0));
        assert_eq!(BinaryOperation::Div.partials(2.0, 4.0), (0.25, -0.125));
        let (d_base, d_exponent) = BinaryOperation::Pow.partials(2.0_f64, 3.0);
        assert_eq!(d_base, 12.0);
        assert_relative_eq!(d_exponent, 8.0 * 2.0_f64.ln());
    }

    #[test]
    fn domain_errors_are_not_caught() {
        assert!(BinaryOperation::Div.apply(1.0, 0.0_f64).is_infinite());
        assert!(UnaryFunction::Log.apply(-1.0_f64).is_nan());
        assert!(UnaryFunction::Asin.apply(2.0_f64).is_nan());
    }

    #[test]
    fn zero_output_adjoint_is_skipped() {
        // log(0) at index 1 from x at index 0, not on the path to the root
        let operation = Operation::Unary {
            kind: UnaryFunction::Log,
            input: 0,
            output: 1,
        };
        let values = [0.0, f64::NEG_INFINITY];
        let mut adjoints = [0.0, 0.0];
        operation.backpropagate(&values, &mut adjoints);
        assert_eq!(adjoints[0], 0.0);
    }

    #[test]
    fn fan_out_accumulates() {
        // x * x with x at index 0 and the output at index 1
        let operation = Operation::Binary {
            kind: BinaryOperation::Mul,
            lhs: 0,
            rhs: 0,
            output: 1,
        };
        let values = [3.0, 9.0];
        let mut adjoints = [0.0, 1.0];
        operation.backpropagate(&values, &mut adjoints);
        assert_eq!(adjoints[0], 6.0);
        assert_eq!(operation.inputs(), vec![0, 0]);
        assert_eq!(operation.output(), 1);
    }
}
