/*!
 * (Automatic) Differentiation helpers
 *
 * # Automatic Differentiation
 *
 * This module provides structs for performing Forward and Reverse Automatic Differentiation
 *
 * ## Automatic Differentiation is not [Numerical Differentiation](https://en.wikipedia.org/wiki/Numerical_differentiation)
 *
 * You were probably introduced to differentiation as numeric differentiation,
 * ie if you have a function 3x<sup>2</sup> then you can estimate its gradient
 * at some value x by computing 3x<sup>2</sup> and 3(x+ε)<sup>2</sup> where ε
 * is a very small number and dividing the difference by ε. This is slow and
 * inexact. Automatic Differentiation instead computes the exact first order
 * derivative of the function as a side effect of computing the function itself,
 * by applying the chain rule to every elementary operation along the way.
 *
 * ## Forward mode
 *
 * [Trace] is a dual number. Each Trace carries its derivative with respect to one
 * chosen input alongside its number, so computing a function of Traces computes the
 * derivative with respect to that input at the same time. This needs one pass per input.
 *
 * ## Reverse mode
 *
 * [Record] instead records every operation performed on it onto a [Tape]. Asking a
 * Record for its derivative then walks the tape backwards, accumulating the adjoint
 * (sensitivity) of every node, so the derivatives with respect to every input are
 * computed in one pass. This is the same algorithm as backpropagation.
 *
 * A Tape is a session: all the Records of one computation must share the same Tape,
 * and a Tape can only be [cleared](Tape::clear) once no Records borrow it.
 *
 * See the [usage] page for worked examples.
 */

pub mod functions;
pub mod operand;
mod operation;
mod record_operations;
mod trace_operations;
pub mod usage;

pub use operand::Operand;
pub use operation::{BinaryOperation, Operation, UnaryFunction};

use crate::error::AutodiffError;
use crate::numeric::Real;

use std::cell::RefCell;

/**
 * A dual number which traces a real number and keeps track of its derivative.
 * This is used to perform Forward Automatic Differentiation.
 *
 * Trace implements only first order differentiation. For example, given a function
 * 3x<sup>2</sup>, you can use calculus to work out that its derivative with respect
 * to x is 6x. By instead writing the function 3x<sup>2</sup> in code using Trace types
 * as your numbers you can compute the first order derivative for a given value of x by
 * passing your function `Trace { number: x, derivative: 1.0 }`.
 *
 * ```
 * use easy_adjoint::differentiation::Trace;
 * let x = Trace { number: 3.2, derivative: 1.0 };
 * let dx = Trace::constant(3.0) * x * x;
 * assert_eq!(dx.derivative, 3.2 * 6.0);
 * ```
 *
 * No history is kept, so a Trace needs no [Tape] and has no backward pass.
 */
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace<T> {
    /**
     * The real number
     */
    pub number: T,
    /**
     * The first order derivative of this number.
     */
    pub derivative: T,
}

impl<T: Real> Trace<T> {
    /**
     * Creates a Trace from a number and its derivative (tangent).
     */
    #[inline]
    pub fn new(number: T, derivative: T) -> Trace<T> {
        Trace { number, derivative }
    }

    /**
     * Constants are lifted to Traces with a derivative of 0
     */
    #[inline]
    pub fn constant(c: T) -> Trace<T> {
        Trace {
            number: c,
            derivative: T::zero(),
        }
    }

    /**
     * To lift a variable that you want to find the derivative of
     * a function to, the Trace starts with a derivative of 1
     */
    #[inline]
    pub fn variable(x: T) -> Trace<T> {
        Trace {
            number: x,
            derivative: T::one(),
        }
    }

    /**
     * Computes the derivative of a function with respect to x.
     *
     * This is a shorthand for `(function(Trace::variable(x))).derivative`
     */
    pub fn derivative(function: impl FnOnce(Trace<T>) -> Trace<T>, x: T) -> T {
        (function(Trace::variable(x))).derivative
    }

    /**
     * Lifts any value to a constant Trace, failing if it is not a real number.
     *
     * ```
     * use easy_adjoint::differentiation::Trace;
     * use easy_adjoint::error::AutodiffError;
     * assert_eq!(Trace::<f64>::lift(&2).unwrap(), Trace::constant(2.0));
     * assert_eq!(
     *     Trace::<f64>::lift(&"frog"),
     *     Err(AutodiffError::TypeMismatch { found: "&str" })
     * );
     * ```
     */
    pub fn lift<V: std::any::Any>(value: &V) -> Result<Trace<T>, AutodiffError> {
        operand::lift_real(value).map(Trace::constant)
    }
}

/**
 * A session for reverse mode differentiation: an arena of nodes and the list of
 * [Operation]s performed on them, in the order they were performed.
 *
 * Every [Record] borrows the Tape it was created on, and every operation on Records
 * appends onto that Tape. Since clearing the Tape needs exclusive access, no Record from
 * before a clear can ever be used with the operations recorded after it.
 *
 * ```
 * use easy_adjoint::differentiation::Tape;
 * let mut tape = Tape::new();
 * {
 *     let x = tape.variable(2.0);
 *     let y = x * x;
 *     assert_eq!(y.derivative(&[x]).unwrap(), vec![4.0]);
 * }
 * tape.clear();
 * assert!(tape.is_empty());
 * ```
 *
 * A Tape is not `Sync`, each thread building expressions should own its own Tape.
 */
#[derive(Debug, Default)]
pub struct Tape<T> {
    // the number and the accumulated adjoint of each node, indexed alike
    values: RefCell<Vec<T>>,
    adjoints: RefCell<Vec<T>>,
    operations: RefCell<Vec<Operation>>,
}

/**
 * A wrapper around a real number which records every operation performed on it onto a
 * [Tape]. This is used to perform Reverse Automatic Differentiation.
 *
 * A Record is a cheap copyable handle to one node on the tape, so using the same Record
 * twice in an expression refers to the same node and the derivatives from both uses
 * accumulate. Two Records with equal numbers are still different nodes.
 *
 * ```
 * use easy_adjoint::differentiation::Tape;
 * let tape = Tape::new();
 * let x = tape.variable(2.0);
 * let y = x + x;
 * assert_eq!(y.derivative(&[x]).unwrap(), vec![2.0]);
 * ```
 */
pub struct Record<'a, T> {
    number: T,
    tape: &'a Tape<T>,
    index: usize,
}

impl<T: Real> Tape<T> {
    /**
     * Creates a new empty Tape.
     */
    pub fn new() -> Tape<T> {
        Tape {
            values: RefCell::new(Vec::new()),
            adjoints: RefCell::new(Vec::new()),
            operations: RefCell::new(Vec::new()),
        }
    }

    /**
     * Creates a Record for an input to a function, with an initial adjoint of 0.
     */
    pub fn variable(&self, value: T) -> Record<'_, T> {
        self.variable_with_adjoint(value, T::zero())
    }

    /**
     * Creates a Record for an input to a function with the given initial adjoint.
     *
     * The seed is only visible through [Record::adjoint] until a derivative is requested
     * with respect to this Record, at which point it is reset.
     */
    pub fn variable_with_adjoint(&self, value: T, adjoint: T) -> Record<'_, T> {
        let index = self.push_node(value, adjoint);
        Record {
            number: value,
            tape: self,
            index,
        }
    }

    /**
     * Lifts a plain number to a Record on this tape, with an adjoint of 0.
     *
     * This is the conversion every operator applies when one of its operands is a plain
     * number. The node is a leaf of the computation graph just like a variable.
     */
    pub fn constant(&self, value: T) -> Record<'_, T> {
        self.variable(value)
    }

    /**
     * Lifts any value to a constant Record on this tape, failing with
     * [TypeMismatch](AutodiffError::TypeMismatch) if it is not a real number.
     *
     * ```
     * use easy_adjoint::differentiation::Tape;
     * use easy_adjoint::error::AutodiffError;
     * let tape = Tape::<f64>::new();
     * assert_eq!(tape.lift(&5).unwrap().value(), 5.0);
     * assert_eq!(
     *     tape.lift(&"frog").unwrap_err(),
     *     AutodiffError::TypeMismatch { found: "&str" }
     * );
     * ```
     */
    pub fn lift<V: std::any::Any>(&self, value: &V) -> Result<Record<'_, T>, AutodiffError> {
        operand::lift_real(value).map(|value| self.constant(value))
    }

    /**
     * The number of operations recorded so far.
     */
    pub fn len(&self) -> usize {
        self.operations.borrow().len()
    }

    /**
     * True if no operations have been recorded.
     */
    pub fn is_empty(&self) -> bool {
        self.operations.borrow().is_empty()
    }

    /**
     * The number of nodes (variables, constants and operation outputs) on this tape.
     */
    pub fn node_count(&self) -> usize {
        self.values.borrow().len()
    }

    /**
     * A copy of the operations recorded so far, in the order they were performed.
     */
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    /**
     * Discards every node and operation so this Tape can be reused for an unrelated
     * computation.
     */
    pub fn clear(&mut self) {
        log::debug!(
            "clearing tape of {} operations over {} nodes",
            self.operations.get_mut().len(),
            self.values.get_mut().len()
        );
        self.values.get_mut().clear();
        self.adjoints.get_mut().clear();
        self.operations.get_mut().clear();
    }

    /**
     * Computes the derivatives of `root` with respect to each of the `inputs`, in the
     * order requested. See [Record::derivative].
     */
    pub fn derivative(
        &self,
        root: &Record<'_, T>,
        inputs: &[Record<'_, T>],
    ) -> Result<Vec<T>, AutodiffError> {
        if !std::ptr::eq(self, root.tape) || inputs.iter().any(|input| !root.same_tape(input)) {
            log::warn!("derivative requested with records from a different tape");
            return Err(AutodiffError::TapeMismatch);
        }
        let requested: Vec<usize> = inputs.iter().map(|input| input.index).collect();
        let adjoints = self.backward(root.index, &requested);
        Ok(requested.iter().map(|&index| adjoints[index]).collect())
    }

    /**
     * Records a binary operation, lifting any plain number operand onto the tape of the
     * other operand.
     *
     * This is the fallible counterpart of the operator overloads, which panic instead.
     *
     * ```
     * use easy_adjoint::differentiation::{BinaryOperation, Tape};
     * use easy_adjoint::error::AutodiffError;
     * let tape = Tape::new();
     * let x = tape.variable(3.0);
     * let y = Tape::try_binary(BinaryOperation::Sub, 5.0, x).unwrap();
     * assert_eq!(y.value(), 2.0);
     * assert_eq!(y.derivative(&[x]).unwrap(), vec![-1.0]);
     * assert_eq!(
     *     Tape::<f64>::try_binary(BinaryOperation::Add, 1.0, 2.0).unwrap_err(),
     *     AutodiffError::NoTape
     * );
     * ```
     */
    pub fn try_binary<'a>(
        kind: BinaryOperation,
        lhs: impl Into<Operand<'a, T>>,
        rhs: impl Into<Operand<'a, T>>,
    ) -> Result<Record<'a, T>, AutodiffError> {
        let (lhs, rhs) = operand::lift_pair(lhs.into(), rhs.into())?;
        Ok(lhs.tape.record_binary(kind, &lhs, &rhs))
    }

    fn push_node(&self, value: T, adjoint: T) -> usize {
        let mut values = self.values.borrow_mut();
        let index = values.len();
        values.push(value);
        self.adjoints.borrow_mut().push(adjoint);
        index
    }

    /**
     * Computes the forward value of a binary operation on two records of this tape,
     * appends the operation and returns its output.
     */
    pub(crate) fn record_binary(
        &self,
        kind: BinaryOperation,
        lhs: &Record<'_, T>,
        rhs: &Record<'_, T>,
    ) -> Record<'_, T> {
        let number = kind.apply(lhs.number, rhs.number);
        let output = self.push_node(number, T::zero());
        self.operations.borrow_mut().push(Operation::Binary {
            kind,
            lhs: lhs.index,
            rhs: rhs.index,
            output,
        });
        Record {
            number,
            tape: self,
            index: output,
        }
    }

    /**
     * Computes the forward value of a function of a record of this tape, appends the
     * operation and returns its output.
     */
    pub(crate) fn record_unary(&self, kind: UnaryFunction, input: &Record<'_, T>) -> Record<'_, T> {
        let number = kind.apply(input.number);
        let output = self.push_node(number, T::zero());
        self.operations.borrow_mut().push(Operation::Unary {
            kind,
            input: input.index,
            output,
        });
        Record {
            number,
            tape: self,
            index: output,
        }
    }

    /**
     * Runs the backward pass from `root`, resetting the adjoints of the `requested`
     * nodes and of every operation output first, and returns a copy of every node's
     * adjoint afterwards.
     */
    fn backward(&self, root: usize, requested: &[usize]) -> Vec<T> {
        let operations = self.operations.borrow();
        let values = self.values.borrow();
        let mut adjoints = self.adjoints.borrow_mut();
        log::trace!(
            "backward pass from node {} over {} operations for {} inputs",
            root,
            operations.len(),
            requested.len()
        );
        for &index in requested {
            adjoints[index] = T::zero();
        }
        for operation in operations.iter() {
            adjoints[operation.output()] = T::zero();
        }
        adjoints[root] = T::one();
        for operation in operations.iter().rev() {
            operation.backpropagate(&values, &mut adjoints);
        }
        adjoints.to_vec()
    }
}

impl<'a, T: Real> Record<'a, T> {
    /**
     * Creates a Record for an input to a function on the given tape, this is the
     * same as [Tape::variable].
     */
    pub fn variable(x: T, tape: &'a Tape<T>) -> Record<'a, T> {
        tape.variable(x)
    }

    /**
     * The number this Record wraps, ie the forward value of the expression.
     */
    #[inline]
    pub fn value(&self) -> T {
        self.number
    }

    /**
     * The adjoint currently accumulated for this Record's node. After a derivative has
     * been requested this is the derivative of that root with respect to this Record,
     * for any Record which was reset by it.
     */
    pub fn adjoint(&self) -> T {
        self.tape.adjoints.borrow()[self.index]
    }

    /**
     * The index of this Record's node on its tape. Two Records are the same node
     * exactly when they are on the same tape with the same index.
     */
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /**
     * The tape this Record is recorded onto.
     */
    #[inline]
    pub fn tape(&self) -> &'a Tape<T> {
        self.tape
    }

    /**
     * True if both Records refer to the same node, as opposed to merely equal numbers.
     */
    pub fn is_same_node(&self, other: &Record<'_, T>) -> bool {
        self.same_tape(other) && self.index == other.index
    }

    pub(crate) fn same_tape(&self, other: &Record<'_, T>) -> bool {
        std::ptr::eq(self.tape, other.tape)
    }

    /**
     * Computes the derivatives of this Record with respect to each of the inputs, in the
     * order they are given.
     *
     * The adjoints of the inputs and of every operation output on the tape are reset
     * before the backward pass, so calling this repeatedly gives the same results. An
     * input this Record does not depend on has a derivative of 0.
     *
     * Fails with [TapeMismatch](AutodiffError::TapeMismatch) if any input is
     * from a different tape.
     *
     * ```
     * use easy_adjoint::differentiation::Tape;
     * let tape = Tape::new();
     * let x1 = tape.variable(2.0);
     * let x2 = tape.variable(3.0);
     * let unused = tape.variable(4.0);
     * let y = x1 * x2;
     * assert_eq!(y.derivative(&[x1, x2, unused]).unwrap(), vec![3.0, 2.0, 0.0]);
     * ```
     */
    pub fn derivative(&self, inputs: &[Record<'_, T>]) -> Result<Vec<T>, AutodiffError> {
        self.tape.derivative(self, inputs)
    }

    /**
     * Performs a backward pass from this Record and returns the derivatives with respect
     * to every node on the tape.
     *
     * ```
     * use easy_adjoint::differentiation::Tape;
     * let tape = Tape::new();
     * let x = tape.variable(2.0);
     * let y = tape.variable(5.0);
     * let z = x * y + 1.0;
     * let derivatives = z.derivatives();
     * assert_eq!(derivatives[&x], 5.0);
     * assert_eq!(derivatives[&y], 2.0);
     * ```
     */
    pub fn derivatives(&self) -> Derivatives<'a, T> {
        let every_node: Vec<usize> = (0..self.tape.node_count()).collect();
        Derivatives {
            tape: self.tape,
            derivatives: self.tape.backward(self.index, &every_node),
        }
    }
}

/**
 * The derivatives of one Record with respect to every node on its tape, as computed by
 * [Record::derivatives].
 *
 * Nodes which the Record does not depend on have a derivative of 0.
 */
#[derive(Debug, Clone)]
pub struct Derivatives<'a, T> {
    tape: &'a Tape<T>,
    derivatives: Vec<T>,
}

impl<'a, T: Real> Derivatives<'a, T> {
    /**
     * Queries the derivative at the provided Record as input.
     *
     * # Panics
     *
     * If the Record is from a different tape, or was created after these derivatives
     * were computed.
     */
    #[track_caller]
    pub fn at(&self, input: &Record<'_, T>) -> T {
        match self.try_at(input) {
            Ok(derivative) => derivative,
            Err(error) => panic!("{}", error),
        }
    }

    /**
     * Queries the derivative at the provided Record as input, failing with
     * [TapeMismatch](AutodiffError::TapeMismatch) if the Record is from a
     * different tape.
     */
    pub fn try_at(&self, input: &Record<'_, T>) -> Result<T, AutodiffError> {
        self.lookup(input).copied()
    }

    fn lookup(&self, input: &Record<'_, T>) -> Result<&T, AutodiffError> {
        if !std::ptr::eq(self.tape, input.tape) {
            return Err(AutodiffError::TapeMismatch);
        }
        self.derivatives
            .get(input.index)
            .ok_or(AutodiffError::TapeMismatch)
    }
}

impl<'a, 'r, T: Real> std::ops::Index<&Record<'r, T>> for Derivatives<'a, T> {
    type Output = T;
    /**
     * Queries the derivative at the provided index into the tape, see [Derivatives::at].
     */
    #[track_caller]
    fn index(&self, input: &Record<'r, T>) -> &Self::Output {
        match self.lookup(input) {
            Ok(derivative) => derivative,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<'a, T> From<Derivatives<'a, T>> for Vec<T> {
    /**
     * Converts the Derivatives struct into a Vec of derivatives that
     * can be indexed with `usize`s, in the order the nodes were created on the tape.
     */
    fn from(derivatives: Derivatives<'a, T>) -> Self {
        derivatives.derivatives
    }
}
