//! # tds-convert
//!
//! Conversion engine for TDS wire scalar values: any source type to any
//! destination type, with the overflow, truncation and syntax-error
//! semantics SQL Server and Sybase clients rely on.
//!
//! The engine works on raw wire bytes plus a [`TypeInfo`] descriptor on each
//! side. Callers supply the wire-declared source length; buffers are never
//! scanned for terminators and never read past their declared end, because
//! column data on the wire is not NUL-terminated and may embed NULs.
//!
//! ## Example
//!
//! ```rust
//! use tds_convert::{convert, ConvResult, TypeId, TypeInfo};
//!
//! let result = convert(
//!     &TypeInfo::new(TypeId::VarChar),
//!     b"32767",
//!     &TypeInfo::new(TypeId::Int2),
//! )?;
//! assert_eq!(result, ConvResult::SmallInt(32767));
//! # Ok::<(), tds_convert::ConvertError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod convert;
pub mod datetime;
pub mod error;
pub mod numeric;
pub mod types;
pub mod value;

pub use convert::{convert, guid_from_wire, guid_to_wire, willconvert};
pub use error::ConvertError;
pub use numeric::{MAX_PRECISION, Numeric, bytes_per_precision};
pub use types::{TypeId, TypeInfo};
pub use value::{ConvResult, Money, Money4};
