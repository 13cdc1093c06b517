//! TDS data type definitions.
//!
//! This module defines the SQL Server/Sybase data types as they appear on the
//! TDS wire, plus the descriptor callers hand to the conversion engine.

/// TDS data type identifiers.
///
/// These correspond to the type bytes sent in column metadata and parameter
/// definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeId {
    /// Bit (boolean).
    Bit = 0x32,
    /// 8-bit unsigned integer (TINYINT).
    Int1 = 0x30,
    /// 16-bit signed integer.
    Int2 = 0x34,
    /// 32-bit signed integer.
    Int4 = 0x38,
    /// 64-bit signed integer.
    Int8 = 0x7F,
    /// 32-bit floating point.
    Float4 = 0x3B,
    /// 64-bit floating point.
    Float8 = 0x3E,
    /// 4-byte money (scaled by 10,000).
    Money4 = 0x7A,
    /// 8-byte money (scaled by 10,000).
    Money = 0x3C,
    /// 4-byte small datetime (days + minutes).
    DateTime4 = 0x3A,
    /// 8-byte datetime (days + 300ths of a second).
    DateTime = 0x3D,
    /// Date (3 bytes, days since 0001-01-01).
    Date = 0x28,
    /// Time with variable precision.
    Time = 0x29,
    /// DateTime2 with variable precision.
    DateTime2 = 0x2A,
    /// DateTimeOffset with variable precision.
    DateTimeOffset = 0x2B,
    /// Exact decimal with explicit precision and scale.
    Decimal = 0x37,
    /// Exact numeric with explicit precision and scale.
    Numeric = 0x3F,
    /// Fixed-length character.
    Char = 0x2F,
    /// Variable-length character.
    VarChar = 0x27,
    /// Text (long character).
    Text = 0x23,
    /// Fixed-length Unicode character (UTF-16LE).
    NChar = 0xEF,
    /// Variable-length Unicode character (UTF-16LE).
    NVarChar = 0xE7,
    /// NText (long Unicode character).
    NText = 0x63,
    /// Fixed-length binary.
    Binary = 0x2D,
    /// Variable-length binary.
    VarBinary = 0x25,
    /// Image (long binary).
    Image = 0x22,
    /// 16-byte unique identifier.
    Guid = 0x24,
}

impl TypeId {
    /// Single-byte-unit character types.
    #[must_use]
    pub fn is_narrow_char(self) -> bool {
        matches!(self, TypeId::Char | TypeId::VarChar | TypeId::Text)
    }

    /// UTF-16LE character types.
    #[must_use]
    pub fn is_wide_char(self) -> bool {
        matches!(self, TypeId::NChar | TypeId::NVarChar | TypeId::NText)
    }

    /// Any character type, narrow or wide.
    #[must_use]
    pub fn is_char(self) -> bool {
        self.is_narrow_char() || self.is_wide_char()
    }

    /// Any binary type.
    #[must_use]
    pub fn is_binary(self) -> bool {
        matches!(self, TypeId::Binary | TypeId::VarBinary | TypeId::Image)
    }

    /// Any fixed-width integer type (`Bit` excluded).
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, TypeId::Int1 | TypeId::Int2 | TypeId::Int4 | TypeId::Int8)
    }

    /// Either floating point type.
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, TypeId::Float4 | TypeId::Float8)
    }

    /// Either fixed-point money type.
    #[must_use]
    pub fn is_money(self) -> bool {
        matches!(self, TypeId::Money | TypeId::Money4)
    }

    /// Numeric or decimal.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, TypeId::Numeric | TypeId::Decimal)
    }

    /// The whole date/time family, legacy and SQL-2008.
    #[must_use]
    pub fn is_datetime(self) -> bool {
        matches!(
            self,
            TypeId::DateTime
                | TypeId::DateTime4
                | TypeId::Date
                | TypeId::Time
                | TypeId::DateTime2
                | TypeId::DateTimeOffset
        )
    }

    /// Wire width of fixed-size types; `None` for variable-width ones.
    ///
    /// `Time`, `DateTime2` and `DateTimeOffset` widths depend on scale and
    /// are also `None` here; see [`crate::datetime::time_bytes_for_scale`].
    #[must_use]
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            TypeId::Bit | TypeId::Int1 => Some(1),
            TypeId::Int2 => Some(2),
            TypeId::Date => Some(3),
            TypeId::Int4 | TypeId::Float4 | TypeId::Money4 | TypeId::DateTime4 => Some(4),
            TypeId::Int8 | TypeId::Float8 | TypeId::Money | TypeId::DateTime => Some(8),
            TypeId::Guid => Some(16),
            _ => None,
        }
    }
}

/// Type descriptor supplied with each conversion source and destination.
///
/// The engine never guesses lengths: variable-width sources are exactly the
/// byte slice handed in, and variable-width destinations are bounded by
/// `max_length` when one is declared.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// The wire type tag.
    pub type_id: TypeId,
    /// Declared maximum byte length for variable destination types.
    pub max_length: Option<u32>,
    /// Precision for numeric/decimal (1–38).
    pub precision: Option<u8>,
    /// Scale for numeric/decimal and the scaled time types.
    pub scale: Option<u8>,
}

impl TypeInfo {
    /// Descriptor for a type with no length, precision or scale.
    #[must_use]
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            max_length: None,
            precision: None,
            scale: None,
        }
    }

    /// Descriptor for a variable-length character or binary type.
    #[must_use]
    pub fn variable(type_id: TypeId, max_length: u32) -> Self {
        Self {
            type_id,
            max_length: Some(max_length),
            precision: None,
            scale: None,
        }
    }

    /// Descriptor for numeric/decimal with explicit precision and scale.
    #[must_use]
    pub fn numeric(precision: u8, scale: u8) -> Self {
        Self {
            type_id: TypeId::Numeric,
            max_length: None,
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    /// Descriptor for a scaled time-class type.
    #[must_use]
    pub fn time(type_id: TypeId, scale: u8) -> Self {
        Self {
            type_id,
            max_length: None,
            precision: None,
            scale: Some(scale),
        }
    }
}

impl From<TypeId> for TypeInfo {
    fn from(type_id: TypeId) -> Self {
        TypeInfo::new(type_id)
    }
}
