//! End-to-end conversion contracts.
//!
//! These pin the exact legacy parsing behaviors callers depend on for
//! unterminated wire buffers, plus round-trip properties across the
//! conversion matrix.

#![allow(clippy::unwrap_used)]

use bytes::Bytes;
use proptest::prelude::*;
use tds_convert::{ConvResult, ConvertError, Money, Money4, TypeId, TypeInfo, convert, willconvert};

fn conv(src: TypeId, bytes: &[u8], dst: TypeId) -> Result<ConvResult, ConvertError> {
    convert(&TypeInfo::new(src), bytes, &TypeInfo::new(dst))
}

#[test]
fn smallint_boundary_is_exact() {
    assert_eq!(
        conv(TypeId::VarChar, b"32767", TypeId::Int2).unwrap(),
        ConvResult::SmallInt(32767)
    );
    assert_eq!(
        conv(TypeId::VarChar, b"32768", TypeId::Int2),
        Err(ConvertError::Overflow)
    );
}

#[test]
fn unterminated_buffer_parses_at_declared_length() {
    // The canonical regression: five bytes of " - 12345" are " - 12".
    assert_eq!(
        conv(TypeId::VarChar, &b" - 12345"[..5], TypeId::Int4).unwrap(),
        ConvResult::Int(-12)
    );
    assert_eq!(
        conv(TypeId::VarChar, b"12345", TypeId::Int4).unwrap(),
        ConvResult::Int(12345)
    );
    assert_eq!(
        conv(TypeId::VarChar, &b"-1234567"[..4], TypeId::Money4).unwrap(),
        ConvResult::Money4(Money4(-1_230_000))
    );
}

#[test]
fn money_legacy_grammar() {
    let cases: &[(&[u8], i32)] = &[
        (b"", 0),
        (b".", 0),
        (b".12", 1200),
        (b"   -123", -1_230_000),
        (b"   +123", 1_230_000),
        (b"++++-123", -1_230_000),
        (b"+123.1234", 1_231_234),
        (b"+123.123411", 1_231_234),
    ];
    for &(text, expected) in cases {
        assert_eq!(
            conv(TypeId::VarChar, text, TypeId::Money4).unwrap(),
            ConvResult::Money4(Money4(expected)),
            "input {:?}",
            String::from_utf8_lossy(text)
        );
    }
    assert_eq!(
        conv(TypeId::VarChar, b"+123.12.3411", TypeId::Money4),
        Err(ConvertError::Syntax)
    );
    assert_eq!(
        conv(TypeId::VarChar, b"pippo", TypeId::Money4),
        Err(ConvertError::Syntax)
    );
}

#[test]
fn bit_never_fails_for_integers() {
    for v in [-1i32, 0, 1, 2, i32::MAX, i32::MIN] {
        let res = conv(TypeId::Int4, &v.to_le_bytes(), TypeId::Bit).unwrap();
        assert_eq!(res, ConvResult::Bit(v != 0));
    }
}

#[test]
fn char_capacity_is_respected() {
    let src = TypeInfo::new(TypeId::Int4);
    let dst = TypeInfo::variable(TypeId::VarChar, 4);
    assert_eq!(
        convert(&src, &12345i32.to_le_bytes(), &dst),
        Err(ConvertError::Overflow)
    );
    let ok = convert(&src, &1234i32.to_le_bytes(), &dst).unwrap();
    assert_eq!(ok, ConvResult::Char(Bytes::from_static(b"1234")));
    assert_eq!(ok.byte_len(), 4);
}

#[test]
fn numeric_rescaling_is_exact() {
    let p20 = TypeInfo::numeric(20, 4);
    let ConvResult::Numeric(n) =
        convert(&TypeInfo::new(TypeId::VarChar), b"12345.6789", &p20).unwrap()
    else {
        panic!("expected numeric");
    };
    let wire = n.to_wire();

    // Widening the scale multiplies by an exact power of ten.
    let ConvResult::Numeric(wide) = convert(&p20, &wire, &TypeInfo::numeric(25, 8)).unwrap() else {
        panic!("expected numeric");
    };
    assert_eq!(wide.to_string(), "12345.67890000");

    // Narrowing the precision below the integral digits overflows.
    assert_eq!(
        convert(&p20, &wire, &TypeInfo::numeric(6, 4)),
        Err(ConvertError::Overflow)
    );
}

#[test]
fn willconvert_is_consistent_with_convert() {
    let probe: &[(TypeId, &[u8])] = &[
        (TypeId::VarChar, b"1"),
        (TypeId::Int4, &[1, 0, 0, 0]),
        (TypeId::Float8, &[0, 0, 0, 0, 0, 0, 0xf0, 0x3f]),
        (TypeId::Guid, &[0; 16]),
        (TypeId::DateTime, &[0; 8]),
    ];
    let dests = [
        TypeId::VarChar,
        TypeId::VarBinary,
        TypeId::Int4,
        TypeId::Money,
        TypeId::Numeric,
        TypeId::DateTime,
        TypeId::Guid,
        TypeId::Bit,
    ];
    for &(src, bytes) in probe {
        for &dst in &dests {
            let allowed = willconvert(src, dst);
            let got = conv(src, bytes, dst);
            let was_no_conversion = matches!(got, Err(ConvertError::NoConversion { .. }));
            assert_eq!(
                allowed, !was_no_conversion,
                "willconvert({src:?}, {dst:?}) disagrees with convert"
            );
        }
    }
}

#[test]
fn datetime_survives_char_roundtrip() {
    let ConvResult::DateTime(dt) =
        conv(TypeId::VarChar, b"2024-03-15 13:45:30", TypeId::DateTime).unwrap()
    else {
        panic!("expected datetime");
    };
    let ConvResult::Char(text) = conv(TypeId::DateTime, &dt.to_wire(), TypeId::VarChar).unwrap()
    else {
        panic!("expected char");
    };
    assert_eq!(&text[..], b"2024-03-15 13:45:30.000");
}

proptest! {
    // Canonical decimal text of any in-range integer round-trips through the
    // integer destination and back to text.
    #[test]
    fn int_text_roundtrip(v in any::<i32>()) {
        let text = v.to_string();
        let ConvResult::Int(parsed) =
            conv(TypeId::VarChar, text.as_bytes(), TypeId::Int4).unwrap()
        else {
            panic!("expected int");
        };
        prop_assert_eq!(parsed, v);

        let ConvResult::Char(rendered) =
            conv(TypeId::Int4, &v.to_le_bytes(), TypeId::VarChar).unwrap()
        else {
            panic!("expected char");
        };
        prop_assert_eq!(&rendered[..], text.as_bytes());
    }

    // Well-formed money text (sign run, digits, one optional point) always
    // converts and scales by exactly 10,000.
    #[test]
    fn money_scaling_property(units in -200_000i64..200_000, cents in 0u32..10_000) {
        let text = format!("{}{}.{:04}", if units < 0 { "-" } else { "" }, units.abs(), cents);
        let expected = if units < 0 {
            -(units.abs() * 10_000 + i64::from(cents))
        } else {
            units * 10_000 + i64::from(cents)
        };
        let ConvResult::Money(m) =
            conv(TypeId::VarChar, text.as_bytes(), TypeId::Money).unwrap()
        else {
            panic!("expected money");
        };
        prop_assert_eq!(m, Money(expected));
    }

    // An i64 widened through the numeric path comes back out intact.
    #[test]
    fn int_numeric_roundtrip(v in any::<i64>()) {
        let src = TypeInfo::new(TypeId::Int8);
        let dst = TypeInfo::numeric(19, 0);
        let ConvResult::Numeric(n) = convert(&src, &v.to_le_bytes(), &dst).unwrap() else {
            panic!("expected numeric");
        };
        let back = convert(&dst, &n.to_wire(), &TypeInfo::new(TypeId::Int8)).unwrap();
        prop_assert_eq!(back, ConvResult::BigInt(v));
    }
}
