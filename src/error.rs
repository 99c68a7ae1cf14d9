//! Error types for easy-adjoint.

use thiserror::Error;

/// Errors that can occur while building or differentiating expressions.
///
/// Numeric domain errors such as division by zero or the logarithm of a negative number
/// are never reported here, they surface as NaN or infinite values just like they would
/// for plain floating point arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutodiffError {
    /// An operand was neither a differentiable value nor a plain real number.
    #[error("type mismatch: expected a Record or a real number, found {found}")]
    TypeMismatch { found: &'static str },

    /// Records belonging to different tapes were combined in one operation or derivative.
    #[error("records must be using the same Tape")]
    TapeMismatch,

    /// A binary operation was dispatched with two plain numbers, so there is no tape
    /// to record it onto.
    #[error("at least one operand must be a Record to record the operation onto its Tape")]
    NoTape,
}
