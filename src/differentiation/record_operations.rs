/*!
 * Operator implementations for Records.
 *
 * These implementations are written here but Rust docs will display them on the
 * [Record](super::Record) struct page.
 *
 * Records implement all the standard library traits for addition, subtraction,
 * multiplication, division and negation, so you can use the normal `+ - * /` operators
 * as you can with normal number types. Each operation computes its number, appends an
 * [Operation](super::Operation) onto the Tape of its operands and returns the Record of
 * the result. These operations can also be used with a plain number on either side,
 * which is first lifted onto the Tape of the Record, so you can do
 *
 * ```
 * use easy_adjoint::differentiation::{Record, Tape};
 * let tape = Tape::new();
 * let x: Record<f32> = tape.variable(2.0);
 * let y: f32 = 2.0;
 * let z: Record<f32> = y - x * y;
 * assert_eq!(z.value(), -2.0);
 * ```
 *
 * Records also implement [Pow] and the [Elementary] functions. Note that to use a method
 * defined in a trait you have to import the trait as well as have a type that
 * implements it! [Elementary] is implemented for Records by value only, as each function
 * returns the same type it is called on. Since Records are `Copy`, calling one of these
 * methods on a `&Record` copies the Record out of the reference, so `(&x).sin()` works
 * all the same.
 *
 * Combining Records from two different Tapes with an operator panics, use
 * [Tape::try_binary](super::Tape::try_binary) to get an error instead.
 */

use crate::differentiation::{BinaryOperation, Record, UnaryFunction};
use crate::error::AutodiffError;
use crate::numeric::{Elementary, Pow, Real};
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

/**
 * A record is displayed by showing its number component.
 */
impl<'a, T: std::fmt::Display> std::fmt::Display for Record<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

/**
 * A record is debug formatted by its number and the index of its node, the tape
 * itself is omitted.
 */
impl<'a, T: std::fmt::Debug> std::fmt::Debug for Record<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("number", &self.number)
            .field("index", &self.index)
            .finish()
    }
}

/**
 * Any record of a Cloneable type implements clone. The clone refers to the same node.
 */
impl<'a, T: Clone> Clone for Record<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Record {
            number: self.number.clone(),
            tape: self.tape,
            index: self.index,
        }
    }
}

/**
 * Any record of a Copy type implements Copy
 */
impl<'a, T: Copy> Copy for Record<'a, T> {}

/**
 * Any record of a PartialEq type implements PartialEq
 *
 * Note that as a Record is intended to be substitutable with its
 * type T only the number parts of the record are compared. Use
 * [is_same_node](Record::is_same_node) to compare identity.
 */
impl<'a, T: PartialEq> PartialEq for Record<'a, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

/**
 * Any record of a PartialOrd type implements PartialOrd
 *
 * Note that as a Record is intended to be substitutable with its
 * type T only the number parts of the record are compared.
 */
impl<'a, T: PartialOrd> PartialOrd for Record<'a, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.number.partial_cmp(&other.number)
    }
}

/**
 * Records a binary operation on two records, which must share a tape.
 */
#[track_caller]
#[inline]
fn binary<'a, T: Real>(
    kind: BinaryOperation,
    lhs: &Record<'a, T>,
    rhs: &Record<'a, T>,
) -> Record<'a, T> {
    assert!(lhs.same_tape(rhs), "{}", AutodiffError::TapeMismatch);
    lhs.tape.record_binary(kind, lhs, rhs)
}

/**
 * Records a binary operation on a record and a constant lifted onto its tape, with the
 * constant on the right unless `swapped`.
 */
#[inline]
fn binary_constant<'a, T: Real>(
    kind: BinaryOperation,
    record: &Record<'a, T>,
    constant: T,
    swapped: bool,
) -> Record<'a, T> {
    let constant = record.tape.constant(constant);
    if swapped {
        record.tape.record_binary(kind, &constant, record)
    } else {
        record.tape.record_binary(kind, record, &constant)
    }
}

macro_rules! record_operator_impl {
    (impl $op:tt for Record { fn $method:ident } as $kind:expr) => {
        /**
         * Operation for two records of the same type with both referenced and
         * both using the same Tape.
         */
        impl<'a, 'l, 'r, T: Real> $op<&'r Record<'a, T>> for &'l Record<'a, T> {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: &Record<'a, T>) -> Self::Output {
                binary($kind, self, rhs)
            }
        }

        /**
         * Operation for two records of the same type.
         */
        impl<'a, T: Real> $op for Record<'a, T> {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: Record<'a, T>) -> Self::Output {
                binary($kind, &self, &rhs)
            }
        }

        /**
         * Operation for two records of the same type with the right referenced.
         */
        impl<'a, T: Real> $op<&Record<'a, T>> for Record<'a, T> {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: &Record<'a, T>) -> Self::Output {
                binary($kind, &self, rhs)
            }
        }

        /**
         * Operation for two records of the same type with the left referenced.
         */
        impl<'a, T: Real> $op<Record<'a, T>> for &Record<'a, T> {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: Record<'a, T>) -> Self::Output {
                binary($kind, self, &rhs)
            }
        }

        /**
         * Operation for a record and a constant of the same type.
         */
        impl<'a, T: Real> $op<T> for Record<'a, T> {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                binary_constant($kind, &self, rhs, false)
            }
        }

        /**
         * Operation for a record and a constant of the same type with the right referenced.
         */
        impl<'a, T: Real> $op<&T> for Record<'a, T> {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: &T) -> Self::Output {
                binary_constant($kind, &self, *rhs, false)
            }
        }

        /**
         * Operation for a record and a constant of the same type with the left referenced.
         */
        impl<'a, T: Real> $op<T> for &Record<'a, T> {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                binary_constant($kind, self, rhs, false)
            }
        }

        /**
         * Operation for a record and a constant of the same type with both referenced.
         */
        impl<'a, T: Real> $op<&T> for &Record<'a, T> {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: &T) -> Self::Output {
                binary_constant($kind, self, *rhs, false)
            }
        }
    };
}

record_operator_impl!(impl Add for Record { fn add } as BinaryOperation::Add);
record_operator_impl!(impl Sub for Record { fn sub } as BinaryOperation::Sub);
record_operator_impl!(impl Mul for Record { fn mul } as BinaryOperation::Mul);
record_operator_impl!(impl Div for Record { fn div } as BinaryOperation::Div);

// A generic `impl<T> Add<Record<T>> for T` is not allowed for the std operator traits,
// so the constant on the left hand side versions are written out per float type.
macro_rules! real_record_operator_impl {
    (impl $op:tt for $T:ty { fn $method:ident } as $kind:expr) => {
        /**
         * Operation for a constant and a record of the same type.
         */
        impl<'a> $op<Record<'a, $T>> for $T {
            type Output = Record<'a, $T>;
            #[inline]
            fn $method(self, rhs: Record<'a, $T>) -> Self::Output {
                binary_constant($kind, &rhs, self, true)
            }
        }

        /**
         * Operation for a constant and a record of the same type with the right referenced.
         */
        impl<'a> $op<&Record<'a, $T>> for $T {
            type Output = Record<'a, $T>;
            #[inline]
            fn $method(self, rhs: &Record<'a, $T>) -> Self::Output {
                binary_constant($kind, rhs, self, true)
            }
        }

        /**
         * Operation for a constant and a record of the same type with the left referenced.
         */
        impl<'a> $op<Record<'a, $T>> for &$T {
            type Output = Record<'a, $T>;
            #[inline]
            fn $method(self, rhs: Record<'a, $T>) -> Self::Output {
                binary_constant($kind, &rhs, *self, true)
            }
        }

        /**
         * Operation for a constant and a record of the same type with both referenced.
         */
        impl<'a> $op<&Record<'a, $T>> for &$T {
            type Output = Record<'a, $T>;
            #[inline]
            fn $method(self, rhs: &Record<'a, $T>) -> Self::Output {
                binary_constant($kind, rhs, *self, true)
            }
        }
    };
}

macro_rules! real_record_operators {
    ($T:ty) => {
        real_record_operator_impl!(impl Add for $T { fn add } as BinaryOperation::Add);
        real_record_operator_impl!(impl Sub for $T { fn sub } as BinaryOperation::Sub);
        real_record_operator_impl!(impl Mul for $T { fn mul } as BinaryOperation::Mul);
        real_record_operator_impl!(impl Div for $T { fn div } as BinaryOperation::Div);
    };
}

real_record_operators!(f32);
real_record_operators!(f64);

/**
 * Negation of a record by reference, recorded as a subtraction from zero.
 */
impl<'a, T: Real> Neg for &Record<'a, T> {
    type Output = Record<'a, T>;
    #[inline]
    fn neg(self) -> Self::Output {
        binary_constant(BinaryOperation::Sub, self, T::zero(), true)
    }
}

/**
 * Negation of a record by value, recorded as a subtraction from zero.
 */
impl<'a, T: Real> Neg for Record<'a, T> {
    type Output = Record<'a, T>;
    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

/**
 * Power of one Record to another, ie self^rhs for two records of
 * the same type with both referenced and both using the same Tape.
 */
impl<'a, 'l, 'r, T: Real> Pow<&'r Record<'a, T>> for &'l Record<'a, T> {
    type Output = Record<'a, T>;
    #[track_caller]
    #[inline]
    fn pow(self, rhs: &Record<'a, T>) -> Self::Output {
        binary(BinaryOperation::Pow, self, rhs)
    }
}

impl<'a, T: Real> Pow<Record<'a, T>> for Record<'a, T> {
    type Output = Record<'a, T>;
    #[track_caller]
    #[inline]
    fn pow(self, rhs: Record<'a, T>) -> Self::Output {
        binary(BinaryOperation::Pow, &self, &rhs)
    }
}

/**
 * Power of a Record to a constant of the same type.
 */
impl<'a, T: Real> Pow<T> for Record<'a, T> {
    type Output = Record<'a, T>;
    #[inline]
    fn pow(self, rhs: T) -> Self::Output {
        binary_constant(BinaryOperation::Pow, &self, rhs, false)
    }
}

/**
 * Power of a Record to a constant of the same type with both referenced.
 */
impl<'a, T: Real> Pow<&T> for &Record<'a, T> {
    type Output = Record<'a, T>;
    #[inline]
    fn pow(self, rhs: &T) -> Self::Output {
        binary_constant(BinaryOperation::Pow, self, *rhs, false)
    }
}

/**
 * Power of a constant to a Record of the same type.
 */
impl<'a, T: Real> Pow<Record<'a, T>> for T {
    type Output = Record<'a, T>;
    #[inline]
    fn pow(self, rhs: Record<'a, T>) -> Self::Output {
        binary_constant(BinaryOperation::Pow, &rhs, self, true)
    }
}

/**
 * Power of a constant to a Record of the same type with both referenced.
 */
impl<'a, T: Real> Pow<&Record<'a, T>> for &T {
    type Output = Record<'a, T>;
    #[inline]
    fn pow(self, rhs: &Record<'a, T>) -> Self::Output {
        binary_constant(BinaryOperation::Pow, rhs, *self, true)
    }
}

macro_rules! record_elementary_impl {
    ($($method:ident => $kind:expr),* $(,)?) => {
        /**
         * The elementary functions of a Record, each recorded as a unary operation.
         */
        impl<'a, T: Real> Elementary for Record<'a, T> {
            $(
                #[inline]
                fn $method(self) -> Self {
                    self.tape.record_unary($kind, &self)
                }
            )*
        }
    };
}

record_elementary_impl!(
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

#[cfg(test)]
mod tests {
    use crate::differentiation::{BinaryOperation, Operation, Tape};
    use crate::numeric::{Elementary, Pow};

    #[test]
    fn reflected_subtraction_keeps_operand_order() {
        let tape = Tape::new();
        let x = tape.variable(2.0_f64);
        let y = 5.0 - x;
        let z = x - 5.0;
        assert_eq!(y.value(), 3.0);
        assert_eq!(z.value(), -3.0);
        assert_eq!(y.derivative(&[x]).unwrap(), vec![-1.0]);
        assert_eq!(z.derivative(&[x]).unwrap(), vec![1.0]);
        // the lifted 5.0 is the left input of the first subtraction
        assert_eq!(
            tape.operations()[0],
            Operation::Binary {
                kind: BinaryOperation::Sub,
                lhs: 1,
                rhs: 0,
                output: 2,
            }
        );
    }

    #[test]
    fn reflected_division() {
        let tape = Tape::new();
        let x = tape.variable(4.0_f64);
        let y = 2.0 / x;
        assert_eq!(y.value(), 0.5);
        assert_eq!(y.derivative(&[x]).unwrap(), vec![-2.0 / 16.0]);
        let z = x / 2.0;
        assert_eq!(z.value(), 2.0);
        assert_eq!(z.derivative(&[x]).unwrap(), vec![0.5]);
    }

    #[test]
    fn negation() {
        let tape = Tape::new();
        let x = tape.variable(1.5_f32);
        let y = -(x * x);
        assert_eq!(y.value(), -2.25);
        assert_eq!(y.derivative(&[x]).unwrap(), vec![-3.0]);
    }

    #[test]
    fn reference_and_value_operands_agree() {
        let tape = Tape::new();
        let x = tape.variable(3.0);
        let y = tape.variable(2.0);
        let by_reference = &x * &y;
        let by_value = x * y;
        let mixed = &x * y + x * &y;
        assert_eq!(by_reference, by_value);
        assert_eq!(by_reference.derivative(&[x, y]), by_value.derivative(&[x, y]));
        assert_eq!(mixed.derivative(&[x, y]).unwrap(), vec![4.0, 6.0]);
    }

    #[test]
    fn referenced_constants_on_the_left() {
        let tape = Tape::new();
        let x = tape.variable(4.0_f64);
        let c = 2.0_f64;
        let y = &c / &x;
        assert_eq!(y.value(), 0.5);
        assert_eq!(y.derivative(&[x]).unwrap(), vec![-2.0 / 16.0]);
        let z = &c - x;
        assert_eq!(z.derivative(&[x]).unwrap(), vec![-1.0]);
        let by_reference = (&x).sin();
        assert_eq!(by_reference.value(), 4.0_f64.sin());
        assert_eq!(by_reference.derivative(&[x]).unwrap(), vec![4.0_f64.cos()]);
    }

    #[test]
    fn powers() {
        let tape = Tape::new();
        let x = tape.variable(2.0_f64);
        let y = tape.variable(3.0_f64);
        let z = x.pow(y);
        assert_eq!(z.value(), 8.0);
        let derivatives = z.derivative(&[x, y]).unwrap();
        assert_eq!(derivatives[0], 12.0);
        assert_eq!(derivatives[1], 2.0_f64.ln() * 8.0);
        assert_eq!(x.pow(2.0).derivative(&[x]).unwrap(), vec![4.0]);
        assert_eq!(2.0_f64.pow(y).derivative(&[y]).unwrap(), vec![2.0_f64.ln() * 8.0]);
    }

    #[test]
    fn elementary_functions_are_recorded() {
        let tape = Tape::new();
        let x = tape.variable(0.5_f64);
        let y = x.sin().exp();
        assert_eq!(y.value(), 0.5_f64.sin().exp());
        assert_eq!(tape.len(), 2);
        assert_eq!(
            y.derivative(&[x]).unwrap(),
            vec![0.5_f64.cos() * 0.5_f64.sin().exp()]
        );
    }

    #[test]
    #[should_panic(expected = "records must be using the same Tape")]
    fn mixing_tapes_panics() {
        let tape = Tape::new();
        let other = Tape::new();
        let x = tape.variable(1.0);
        let y = other.variable(1.0);
        let _ = x + y;
    }
}
