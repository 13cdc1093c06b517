//! Conversion results and the fixed-point money types.

use bytes::Bytes;
use uuid::Uuid;

use crate::datetime::{Date, DateTime, DateTime2, DateTime4, DateTimeOffset, Time};
use crate::error::ConvertError;
use crate::numeric::Numeric;

/// 8-byte fixed-point money, scaled by 10,000.
///
/// On the wire the value travels as two 32-bit halves, most significant
/// first, each little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub i64);

/// 4-byte fixed-point money, scaled by 10,000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money4(pub i32);

impl Money {
    /// Decode the split high/low wire form.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() != 8 {
            return Err(ConvertError::Fail);
        }
        let high = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let low = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(Self((i64::from(high) << 32) | i64::from(low)))
    }

    /// Encode the split high/low wire form.
    #[must_use]
    pub fn to_wire(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&(((self.0 >> 32) as i32).to_le_bytes()));
        out[4..].copy_from_slice(&((self.0 as u32).to_le_bytes()));
        out
    }

    /// Whole units, truncated toward zero.
    #[must_use]
    pub fn units(self) -> i64 {
        self.0 / 10_000
    }
}

impl Money4 {
    /// Decode the 4-byte wire form.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() != 4 {
            return Err(ConvertError::Fail);
        }
        Ok(Self(i32::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ])))
    }

    /// Encode the 4-byte wire form.
    #[must_use]
    pub fn to_wire(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

/// The result of one conversion, tagged by destination family.
///
/// Variable-length payloads (`Char`, `Binary`) are owned by the result and
/// never longer than the produced length the engine reports.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvResult {
    /// Bit destination (0 or 1).
    Bit(bool),
    /// 8-bit unsigned integer.
    TinyInt(u8),
    /// 16-bit signed integer.
    SmallInt(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    BigInt(i64),
    /// 32-bit float.
    Real(f32),
    /// 64-bit float.
    Float(f64),
    /// 4-byte money.
    Money4(Money4),
    /// 8-byte money.
    Money(Money),
    /// Legacy datetime.
    DateTime(DateTime),
    /// Legacy small datetime.
    DateTime4(DateTime4),
    /// SQL-2008 date.
    Date(Date),
    /// SQL-2008 time.
    Time(Time),
    /// SQL-2008 datetime2.
    DateTime2(DateTime2),
    /// SQL-2008 datetimeoffset.
    DateTimeOffset(DateTimeOffset),
    /// Exact numeric/decimal.
    Numeric(Numeric),
    /// Character payload; narrow destinations carry the bytes as produced,
    /// wide destinations carry UTF-16LE.
    Char(Bytes),
    /// Binary payload.
    Binary(Bytes),
    /// Unique identifier.
    Guid(Uuid),
}

impl ConvResult {
    /// Byte length of the produced value: the fixed wire width for scalar
    /// destinations, the payload length for character/binary ones.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match self {
            ConvResult::Bit(_) | ConvResult::TinyInt(_) => 1,
            ConvResult::SmallInt(_) => 2,
            ConvResult::Date(_) => 3,
            ConvResult::Int(_)
            | ConvResult::Real(_)
            | ConvResult::Money4(_)
            | ConvResult::DateTime4(_) => 4,
            ConvResult::BigInt(_)
            | ConvResult::Float(_)
            | ConvResult::Money(_)
            | ConvResult::DateTime(_) => 8,
            ConvResult::Time(t) => crate::datetime::time_bytes_for_scale(t.scale),
            ConvResult::DateTime2(d) => crate::datetime::time_bytes_for_scale(d.time.scale) + 3,
            ConvResult::DateTimeOffset(d) => {
                crate::datetime::time_bytes_for_scale(d.datetime.time.scale) + 5
            }
            ConvResult::Numeric(n) => crate::numeric::bytes_per_precision(n.precision()),
            ConvResult::Char(b) | ConvResult::Binary(b) => b.len(),
            ConvResult::Guid(_) => 16,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_money_wire_split_order() {
        let m = Money(-1_230_000);
        let wire = m.to_wire();
        assert_eq!(Money::from_wire(&wire).unwrap(), m);
        // High half first: a small negative value has all-ones in the high
        // word.
        assert_eq!(&wire[..4], &[0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_money4_roundtrip() {
        let m = Money4(1_234_567);
        assert_eq!(Money4::from_wire(&m.to_wire()).unwrap(), m);
    }

    #[test]
    fn test_byte_lens() {
        assert_eq!(ConvResult::Int(5).byte_len(), 4);
        assert_eq!(ConvResult::Money(Money(0)).byte_len(), 8);
        assert_eq!(ConvResult::Char(Bytes::from_static(b"abc")).byte_len(), 3);
        assert_eq!(ConvResult::Guid(Uuid::nil()).byte_len(), 16);
    }
}
