/*!
 * Conversions of operands to [Records](super::Record).
 *
 * Every binary operation accepts either a Record or a plain real number on either side.
 * A plain number is lifted to a Record on the tape of the other operand with
 * [Tape::constant](super::Tape::constant) before the operation is recorded, so the
 * operation always has two nodes as inputs.
 *
 * Values of unknown type can be converted with [lift_real], which is where a
 * [TypeMismatch](AutodiffError::TypeMismatch) comes from.
 */

use crate::differentiation::Record;
use crate::error::AutodiffError;
use crate::numeric::Real;

use std::any::{Any, type_name};

/**
 * One side of a binary operation, either a differentiable Record or a plain real number.
 */
#[derive(Debug)]
pub enum Operand<'a, T> {
    Record(Record<'a, T>),
    Real(T),
}

impl<'a, T: Real> From<Record<'a, T>> for Operand<'a, T> {
    #[inline]
    fn from(record: Record<'a, T>) -> Self {
        Operand::Record(record)
    }
}

impl<'a, T: Real> From<&Record<'a, T>> for Operand<'a, T> {
    #[inline]
    fn from(record: &Record<'a, T>) -> Self {
        Operand::Record(*record)
    }
}

macro_rules! operand_from_real {
    ($T:ty) => {
        impl<'a> From<$T> for Operand<'a, $T> {
            #[inline]
            fn from(number: $T) -> Self {
                Operand::Real(number)
            }
        }
    };
}

operand_from_real!(f32);
operand_from_real!(f64);

/**
 * Converts a value of any type to the real number type `T`.
 *
 * Floating point and integer primitives are converted (integers which `T` cannot
 * represent exactly are rounded). Anything else fails with
 * [TypeMismatch](AutodiffError::TypeMismatch) naming the type of the value.
 *
 * ```
 * use easy_adjoint::differentiation::operand::lift_real;
 * use easy_adjoint::error::AutodiffError;
 * assert_eq!(lift_real::<f64, _>(&3_u8), Ok(3.0));
 * assert!(matches!(
 *     lift_real::<f64, _>(&String::from("frog")),
 *     Err(AutodiffError::TypeMismatch { .. })
 * ));
 * ```
 */
pub fn lift_real<T: Real, V: Any>(value: &V) -> Result<T, AutodiffError> {
    let value: &dyn Any = value;
    let converted = if let Some(&x) = value.downcast_ref::<f64>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<f32>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<i8>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<i16>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<i32>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<i64>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<u8>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<u16>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<u32>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<u64>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<isize>() {
        T::from(x)
    } else if let Some(&x) = value.downcast_ref::<usize>() {
        T::from(x)
    } else {
        None
    };
    converted.ok_or(AutodiffError::TypeMismatch {
        found: type_name::<V>(),
    })
}

/**
 * Lifts both sides of a binary operation to Records on a shared tape.
 *
 * Fails with [TapeMismatch](AutodiffError::TapeMismatch) if both are Records on
 * different tapes and with [NoTape](AutodiffError::NoTape) if neither is a Record.
 */
pub(crate) fn lift_pair<'a, T: Real>(
    lhs: Operand<'a, T>,
    rhs: Operand<'a, T>,
) -> Result<(Record<'a, T>, Record<'a, T>), AutodiffError> {
    match (lhs, rhs) {
        (Operand::Record(lhs), Operand::Record(rhs)) => {
            if lhs.same_tape(&rhs) {
                Ok((lhs, rhs))
            } else {
                log::warn!("binary operation requested with records from different tapes");
                Err(AutodiffError::TapeMismatch)
            }
        }
        (Operand::Record(lhs), Operand::Real(rhs)) => Ok((lhs, lhs.tape().constant(rhs))),
        (Operand::Real(lhs), Operand::Record(rhs)) => Ok((rhs.tape().constant(lhs), rhs)),
        (Operand::Real(_), Operand::Real(_)) => Err(AutodiffError::NoTape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differentiation::Tape;

    #[test]
    fn lifts_numeric_primitives() {
        assert_eq!(lift_real::<f64, _>(&2.5_f32), Ok(2.5));
        assert_eq!(lift_real::<f64, _>(&-7_i64), Ok(-7.0));
        assert_eq!(lift_real::<f32, _>(&usize::MAX), Ok(usize::MAX as f32));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            lift_real::<f64, _>(&"frog"),
            Err(AutodiffError::TypeMismatch { found: "&str" })
        );
        match lift_real::<f64, _>(&Some(1.0)) {
            Err(AutodiffError::TypeMismatch { found }) => assert!(found.contains("Option")),
            other => panic!("expected a type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn lifts_reals_onto_the_record_tape() {
        let tape = Tape::new();
        let x = tape.variable(1.0);
        let (lhs, rhs) = lift_pair(Operand::Real(4.0), Operand::from(x)).unwrap();
        assert!(rhs.is_same_node(&x));
        assert!(lhs.same_tape(&x));
        assert_eq!(lhs.value(), 4.0);
        assert_eq!(lhs.adjoint(), 0.0);
        assert_eq!(tape.node_count(), 2);
    }

    #[test]
    fn rejects_mismatched_tapes() {
        let tape = Tape::new();
        let other = Tape::new();
        let x = tape.variable(1.0);
        let y = other.variable(1.0);
        assert_eq!(
            lift_pair(Operand::from(x), Operand::from(y)).unwrap_err(),
            AutodiffError::TapeMismatch
        );
        assert_eq!(
            lift_pair::<f64>(Operand::Real(1.0), Operand::Real(2.0)).unwrap_err(),
            AutodiffError::NoTape
        );
    }
}
