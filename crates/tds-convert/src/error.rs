//! Type conversion error types.

use thiserror::Error;

use crate::types::TypeId;

/// Errors that can occur during type conversion.
///
/// `NoConversion` is a caller setup mistake and fatal to the operation that
/// triggered it. `Syntax` and `Overflow` are per-value data errors a caller
/// can recover from (skip or null the value). `OutOfMemory` aborts the
/// enclosing marshaling operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// No conversion path exists between the two types.
    #[error("no conversion available from {from:?} to {to:?}")]
    NoConversion {
        /// Source type.
        from: TypeId,
        /// Destination type.
        to: TypeId,
    },

    /// The source text does not parse as the destination's grammar.
    #[error("source value does not parse as the destination type")]
    Syntax,

    /// The value parses but exceeds the destination's representable range,
    /// precision, or declared maximum length.
    #[error("value out of range for the destination type")]
    Overflow,

    /// Allocation failed for a variable-length result.
    #[error("out of memory allocating conversion result")]
    OutOfMemory,

    /// Unspecified internal failure.
    #[error("conversion failed")]
    Fail,
}
