//! The conversion engine: any wire scalar type to any other.
//!
//! [`convert`] takes a source descriptor plus its exact wire bytes and a
//! destination descriptor, and produces a [`ConvResult`] or a typed failure.
//! [`willconvert`] is the pure predicate over the same conversion matrix,
//! used by binders to validate a cast before allocating anything.
//!
//! Callers must supply the wire-declared source length; the engine never
//! scans for terminators and never reads past the slice it is given.

use bytes::Bytes;
use uuid::Uuid;

use crate::datetime::{
    Date, DateTime, DateTime2, DateTime4, DateTimeOffset, Time, format_datetime,
    parse_datetime_text,
};
use crate::error::ConvertError;
use crate::numeric::{MAX_PRECISION, Numeric};
use crate::types::{TypeId, TypeInfo};
use crate::value::{ConvResult, Money, Money4};

/// Whether a conversion path exists between two types.
///
/// Agrees exactly with what [`convert`] will accept; a `false` here means
/// [`convert`] returns [`ConvertError::NoConversion`] for the pair.
#[must_use]
pub fn willconvert(src: TypeId, dst: TypeId) -> bool {
    if src.is_char() {
        // Character sources parse into every destination grammar.
        return true;
    }
    if src.is_binary() {
        return dst.is_char()
            || dst.is_binary()
            || dst.is_integer()
            || dst.is_float()
            || dst.is_money();
    }
    if src == TypeId::Bit || src.is_integer() || src.is_float() || src.is_money() || src.is_numeric()
    {
        return dst.is_char()
            || dst.is_binary()
            || dst.is_integer()
            || dst.is_float()
            || dst.is_money()
            || dst == TypeId::Bit
            || dst.is_numeric();
    }
    if src.is_datetime() {
        if dst.is_char() || dst.is_binary() {
            return true;
        }
        if !dst.is_datetime() {
            return false;
        }
        // A bare date has no time to give and vice versa.
        return !matches!(
            (src, dst),
            (TypeId::Date, TypeId::Time) | (TypeId::Time, TypeId::Date)
        );
    }
    if src == TypeId::Guid {
        return dst.is_char() || dst.is_binary() || dst == TypeId::Guid;
    }
    false
}

/// Convert `src_bytes`, described by `src`, into the type described by `dst`.
///
/// For variable destination types the produced payload is checked against
/// `dst.max_length` when one is declared; exceeding it is an overflow, and
/// no bytes beyond the reported length are ever produced.
pub fn convert(
    src: &TypeInfo,
    src_bytes: &[u8],
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    let no_conversion = Err(ConvertError::NoConversion {
        from: src.type_id,
        to: dst.type_id,
    });
    match src.type_id {
        t if t.is_narrow_char() => convert_char(src_bytes, dst),
        t if t.is_wide_char() => {
            let text = decode_utf16le(src_bytes)?;
            convert_char(text.as_bytes(), dst)
        }
        t if t.is_binary() => convert_binary(src_bytes, src.type_id, dst),
        TypeId::Bit => {
            let byte = *src_bytes.first().ok_or(ConvertError::Fail)?;
            convert_int_value(i64::from(byte != 0), 1, src.type_id, dst)
        }
        TypeId::Int1 => {
            let v = fixed_bytes::<1>(src_bytes)?[0];
            convert_int_value(i64::from(v), 1, src.type_id, dst)
        }
        TypeId::Int2 => {
            let v = i16::from_le_bytes(fixed_bytes(src_bytes)?);
            convert_int_value(i64::from(v), 2, src.type_id, dst)
        }
        TypeId::Int4 => {
            let v = i32::from_le_bytes(fixed_bytes(src_bytes)?);
            convert_int_value(i64::from(v), 4, src.type_id, dst)
        }
        TypeId::Int8 => {
            let v = i64::from_le_bytes(fixed_bytes(src_bytes)?);
            convert_int_value(v, 8, src.type_id, dst)
        }
        TypeId::Float4 => {
            let v = f32::from_le_bytes(fixed_bytes(src_bytes)?);
            convert_float_value(f64::from(v), true, src.type_id, dst)
        }
        TypeId::Float8 => {
            let v = f64::from_le_bytes(fixed_bytes(src_bytes)?);
            convert_float_value(v, false, src.type_id, dst)
        }
        TypeId::Money4 => convert_money4(Money4::from_wire(src_bytes)?, src.type_id, dst),
        TypeId::Money => convert_money(Money::from_wire(src_bytes)?, src.type_id, dst),
        TypeId::DateTime => convert_datetime(DateTime::from_wire(src_bytes)?, src.type_id, dst),
        TypeId::DateTime4 => convert_datetime4(DateTime4::from_wire(src_bytes)?, src.type_id, dst),
        TypeId::Date => convert_date(Date::from_wire(src_bytes)?, src.type_id, dst),
        TypeId::Time => {
            let t = Time::from_wire(src_bytes, src.scale.unwrap_or(7))?;
            convert_time(t, src.type_id, dst)
        }
        TypeId::DateTime2 => {
            let dt2 = DateTime2::from_wire(src_bytes, src.scale.unwrap_or(7))?;
            convert_datetime2(dt2, src.type_id, dst)
        }
        TypeId::DateTimeOffset => {
            let dto = DateTimeOffset::from_wire(src_bytes, src.scale.unwrap_or(7))?;
            convert_datetimeoffset(dto, src.type_id, dst)
        }
        t if t.is_numeric() => {
            let n = Numeric::from_wire(
                src_bytes,
                src.precision.unwrap_or(MAX_PRECISION),
                src.scale.unwrap_or(0),
            )?;
            convert_numeric(&n, src.type_id, dst)
        }
        TypeId::Guid => convert_guid(src_bytes, src.type_id, dst),
        _ => no_conversion,
    }
}

fn fixed_bytes<const N: usize>(src: &[u8]) -> Result<[u8; N], ConvertError> {
    src.try_into().map_err(|_| ConvertError::Fail)
}

fn no_conv(from: TypeId, to: TypeId) -> ConvertError {
    ConvertError::NoConversion { from, to }
}

// ---------------------------------------------------------------------------
// Result builders
// ---------------------------------------------------------------------------

fn bounded(bytes: Vec<u8>, max: Option<u32>) -> Result<Bytes, ConvertError> {
    if let Some(max) = max {
        if bytes.len() > max as usize {
            return Err(ConvertError::Overflow);
        }
    }
    Ok(Bytes::from(bytes))
}

/// Package produced text for a character destination, encoding UTF-16LE for
/// wide ones and enforcing the declared maximum length.
fn char_result(text: &str, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    let bytes = if dst.type_id.is_wide_char() {
        encode_utf16le(text)
    } else {
        text.as_bytes().to_vec()
    };
    Ok(ConvResult::Char(bounded(bytes, dst.max_length)?))
}

/// Package raw character bytes (client charset, uninterpreted) for a narrow
/// destination, or re-encode them for a wide one.
fn char_bytes_result(bytes: &[u8], dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    if dst.type_id.is_wide_char() {
        let text = std::str::from_utf8(bytes).map_err(|_| ConvertError::Syntax)?;
        let wide = encode_utf16le(text);
        return Ok(ConvResult::Char(bounded(wide, dst.max_length)?));
    }
    Ok(ConvResult::Char(bounded(bytes.to_vec(), dst.max_length)?))
}

fn binary_result(bytes: Vec<u8>, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    Ok(ConvResult::Binary(bounded(bytes, dst.max_length)?))
}

fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

fn decode_utf16le(bytes: &[u8]) -> Result<String, ConvertError> {
    if bytes.len() % 2 != 0 {
        return Err(ConvertError::Syntax);
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| ConvertError::Syntax)
}

// ---------------------------------------------------------------------------
// Text parsing
// ---------------------------------------------------------------------------

fn skip_blanks(mut p: &[u8]) -> &[u8] {
    while let Some((b' ', rest)) = p.split_first() {
        p = rest;
    }
    p
}

/// Parse integer text the way the server does: embedded blanks around the
/// sign and number are tolerated (`" - 13 "` is `-13`), anything else after
/// the digit run is a syntax error.
fn parse_int_text(buf: &[u8]) -> Result<i64, ConvertError> {
    let mut p = skip_blanks(buf);
    if p.is_empty() {
        return Err(ConvertError::Syntax);
    }

    let mut negative = false;
    match p[0] {
        b'-' => {
            negative = true;
            p = skip_blanks(&p[1..]);
        }
        b'+' => {
            p = skip_blanks(&p[1..]);
        }
        _ => {}
    }
    if p.is_empty() {
        return Err(ConvertError::Syntax);
    }

    // Unsigned accumulation gives the cleanest overflow check.
    let mut num: u64 = 0;
    let mut i = 0;
    while i < p.len() {
        let c = p[i];
        if c == b' ' {
            if !skip_blanks(&p[i..]).is_empty() {
                return Err(ConvertError::Syntax);
            }
            break;
        }
        if !c.is_ascii_digit() {
            return Err(ConvertError::Syntax);
        }
        if num > (1u64 << 63) / 10 {
            return Err(ConvertError::Overflow);
        }
        num = num * 10 + u64::from(c - b'0');
        i += 1;
    }

    if negative {
        if num > 1u64 << 63 {
            return Err(ConvertError::Overflow);
        }
        Ok(0i64.wrapping_sub(num as i64))
    } else {
        if num >= 1u64 << 63 {
            return Err(ConvertError::Overflow);
        }
        Ok(num as i64)
    }
}

/// Parse money text into its scaled-by-10,000 integer form.
///
/// The grammar is deliberately lax, matching the server: optional run of
/// sign characters where the last one wins, at most one decimal point, at
/// most four fractional digits kept (the rest dropped), and an empty numeral
/// converts to zero.
fn parse_money_text(buf: &[u8]) -> Result<i64, ConvertError> {
    let mut p = skip_blanks(buf);

    let mut negative = false;
    while let Some((&c, rest)) = p.split_first() {
        match c {
            b'-' => negative = true,
            b'+' => negative = false,
            _ => break,
        }
        p = rest;
    }
    p = skip_blanks(p);

    let mut value: i64 = 0;
    let mut places: u8 = 0;
    let mut point_found = false;
    let mut i = 0;
    while i < p.len() {
        let c = p[i];
        if c.is_ascii_digit() {
            // No more than four decimal digits contribute.
            if !point_found || places < 4 {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(c - b'0')))
                    .ok_or(ConvertError::Overflow)?;
            }
            if point_found {
                places = places.saturating_add(1);
            }
        } else if c == b'.' {
            if point_found {
                return Err(ConvertError::Syntax);
            }
            point_found = true;
        } else if c == b' ' {
            if !skip_blanks(&p[i..]).is_empty() {
                return Err(ConvertError::Syntax);
            }
            break;
        } else {
            return Err(ConvertError::Syntax);
        }
        i += 1;
    }

    for _ in places.min(4)..4 {
        value = value.checked_mul(10).ok_or(ConvertError::Overflow)?;
    }
    Ok(if negative { -value } else { value })
}

fn parse_float_text(buf: &[u8]) -> Result<f64, ConvertError> {
    let text = std::str::from_utf8(buf).map_err(|_| ConvertError::Syntax)?;
    let trimmed = text.trim_matches(' ');
    if trimmed.is_empty() {
        return Err(ConvertError::Syntax);
    }
    let v: f64 = trimmed.parse().map_err(|_| ConvertError::Syntax)?;
    if v.is_infinite() {
        return Err(ConvertError::Overflow);
    }
    Ok(v)
}

/// Parse hexadecimal text into bytes: optional `0x` prefix, trailing blanks
/// and NULs ignored, an odd digit count gets an implied leading zero.
fn parse_hex_text(buf: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let mut p = buf;
    if p.len() >= 2 && p[0] == b'0' && (p[1] == b'x' || p[1] == b'X') {
        p = &p[2..];
    }
    while let Some((&c, rest)) = p.split_last() {
        if c == b' ' || c == b'\0' {
            p = rest;
        } else {
            break;
        }
    }

    fn nibble(c: u8) -> Result<u8, ConvertError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ConvertError::Syntax),
        }
    }

    let mut out = Vec::with_capacity(p.len() / 2 + 1);
    let mut iter = p.iter();
    if p.len() % 2 == 1 {
        // "ABC" reads as 0x0A 0xBC.
        out.push(nibble(*iter.next().ok_or(ConvertError::Syntax)?)?);
    }
    let rest = iter.as_slice();
    for pair in rest.chunks_exact(2) {
        out.push(nibble(pair[0])? << 4 | nibble(pair[1])?);
    }
    Ok(out)
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn to_hex_text(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        s.push(HEX_DIGITS[usize::from(b >> 4)] as char);
        s.push(HEX_DIGITS[usize::from(b & 0xf)] as char);
    }
    s
}

fn parse_guid_text(buf: &[u8]) -> Result<Uuid, ConvertError> {
    let text = std::str::from_utf8(buf).map_err(|_| ConvertError::Syntax)?;
    let mut inner = text.trim_matches(' ');
    if let Some(stripped) = inner.strip_prefix('{') {
        inner = stripped.strip_suffix('}').ok_or(ConvertError::Syntax)?;
    }
    let segments: Vec<&str> = inner.split('-').collect();
    let lens: Vec<usize> = segments.iter().map(|s| s.len()).collect();
    // Standard five-segment form, or the legacy form missing the last hyphen.
    if lens != [8, 4, 4, 4, 12] && lens != [8, 4, 4, 16] {
        return Err(ConvertError::Syntax);
    }
    let joined: String = segments.concat();
    Uuid::try_parse(&joined).map_err(|_| ConvertError::Syntax)
}

// ---------------------------------------------------------------------------
// Per-source-type conversion
// ---------------------------------------------------------------------------

fn convert_char(src_bytes: &[u8], dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        t if t.is_char() => char_bytes_result(src_bytes, dst),
        t if t.is_binary() => binary_result(parse_hex_text(src_bytes)?, dst),
        TypeId::Int1 => {
            let v = parse_int_text(src_bytes)?;
            u8::try_from(v)
                .map(ConvResult::TinyInt)
                .map_err(|_| ConvertError::Overflow)
        }
        TypeId::Int2 => {
            let v = parse_int_text(src_bytes)?;
            i16::try_from(v)
                .map(ConvResult::SmallInt)
                .map_err(|_| ConvertError::Overflow)
        }
        TypeId::Int4 => {
            let v = parse_int_text(src_bytes)?;
            i32::try_from(v)
                .map(ConvResult::Int)
                .map_err(|_| ConvertError::Overflow)
        }
        TypeId::Int8 => Ok(ConvResult::BigInt(parse_int_text(src_bytes)?)),
        TypeId::Bit => Ok(ConvResult::Bit(parse_int_text(src_bytes)? != 0)),
        TypeId::Float4 => {
            let v = parse_float_text(src_bytes)?;
            if v.abs() > f64::from(f32::MAX) {
                return Err(ConvertError::Overflow);
            }
            Ok(ConvResult::Real(v as f32))
        }
        TypeId::Float8 => Ok(ConvResult::Float(parse_float_text(src_bytes)?)),
        TypeId::Money => Ok(ConvResult::Money(Money(parse_money_text(src_bytes)?))),
        TypeId::Money4 => {
            let v = parse_money_text(src_bytes)?;
            i32::try_from(v)
                .map(|v| ConvResult::Money4(Money4(v)))
                .map_err(|_| ConvertError::Overflow)
        }
        t if t.is_numeric() => Numeric::parse_text(
            src_bytes,
            dst.precision.unwrap_or(MAX_PRECISION),
            dst.scale.unwrap_or(0),
        )
        .map(ConvResult::Numeric),
        t if t.is_datetime() => {
            let text = std::str::from_utf8(src_bytes).map_err(|_| ConvertError::Syntax)?;
            let naive = parse_datetime_text(text)?;
            naive_to_datetime_result(naive, dst)
        }
        TypeId::Guid => Ok(ConvResult::Guid(parse_guid_text(src_bytes)?)),
        _ => Err(no_conv(TypeId::VarChar, dst_id)),
    }
}

fn convert_binary(
    src_bytes: &[u8],
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        t if t.is_char() => char_result(&to_hex_text(src_bytes), dst),
        t if t.is_binary() => binary_result(src_bytes.to_vec(), dst),
        // Reinterpretation: bytes are copied and zero-padded up to the
        // destination's fixed width.
        TypeId::Int1 => Ok(ConvResult::TinyInt(padded::<1>(src_bytes)[0])),
        TypeId::Int2 => Ok(ConvResult::SmallInt(i16::from_le_bytes(padded(src_bytes)))),
        TypeId::Int4 => Ok(ConvResult::Int(i32::from_le_bytes(padded(src_bytes)))),
        TypeId::Int8 => Ok(ConvResult::BigInt(i64::from_le_bytes(padded(src_bytes)))),
        TypeId::Float4 => Ok(ConvResult::Real(f32::from_le_bytes(padded(src_bytes)))),
        TypeId::Float8 => Ok(ConvResult::Float(f64::from_le_bytes(padded(src_bytes)))),
        TypeId::Money4 => Money4::from_wire(&padded::<4>(src_bytes)).map(ConvResult::Money4),
        TypeId::Money => Money::from_wire(&padded::<8>(src_bytes)).map(ConvResult::Money),
        _ => Err(no_conv(src_id, dst_id)),
    }
}

fn padded<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let n = src.len().min(N);
    out[..n].copy_from_slice(&src[..n]);
    out
}

/// Shared destination handling for the bit and integer sources.
fn convert_int_value(
    v: i64,
    src_width: usize,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        t if t.is_char() => char_result(&v.to_string(), dst),
        t if t.is_binary() => binary_result(v.to_le_bytes()[..src_width].to_vec(), dst),
        TypeId::Int1 => u8::try_from(v)
            .map(ConvResult::TinyInt)
            .map_err(|_| ConvertError::Overflow),
        TypeId::Int2 => i16::try_from(v)
            .map(ConvResult::SmallInt)
            .map_err(|_| ConvertError::Overflow),
        TypeId::Int4 => i32::try_from(v)
            .map(ConvResult::Int)
            .map_err(|_| ConvertError::Overflow),
        TypeId::Int8 => Ok(ConvResult::BigInt(v)),
        TypeId::Bit => Ok(ConvResult::Bit(v != 0)),
        TypeId::Float4 => Ok(ConvResult::Real(v as f32)),
        TypeId::Float8 => Ok(ConvResult::Float(v as f64)),
        TypeId::Money4 => {
            if !(-214_748..=214_748).contains(&v) {
                return Err(ConvertError::Overflow);
            }
            Ok(ConvResult::Money4(Money4((v * 10_000) as i32)))
        }
        TypeId::Money => v
            .checked_mul(10_000)
            .map(|m| ConvResult::Money(Money(m)))
            .ok_or(ConvertError::Overflow),
        t if t.is_numeric() => Numeric::parse_text(
            v.to_string().as_bytes(),
            dst.precision.unwrap_or(MAX_PRECISION),
            dst.scale.unwrap_or(0),
        )
        .map(ConvResult::Numeric),
        _ => Err(no_conv(src_id, dst_id)),
    }
}

/// Shared destination handling for the float sources.
fn convert_float_value(
    v: f64,
    from_f32: bool,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        t if t.is_char() => {
            let text = if from_f32 {
                (v as f32).to_string()
            } else {
                v.to_string()
            };
            char_result(&text, dst)
        }
        t if t.is_binary() => {
            let bytes = if from_f32 {
                (v as f32).to_le_bytes().to_vec()
            } else {
                v.to_le_bytes().to_vec()
            };
            binary_result(bytes, dst)
        }
        TypeId::Int1 => float_to_int(v, 0.0, 255.0).map(|i| ConvResult::TinyInt(i as u8)),
        TypeId::Int2 => float_to_int(v, f64::from(i16::MIN), f64::from(i16::MAX))
            .map(|i| ConvResult::SmallInt(i as i16)),
        TypeId::Int4 => float_to_int(v, f64::from(i32::MIN), f64::from(i32::MAX))
            .map(|i| ConvResult::Int(i as i32)),
        TypeId::Int8 => float_to_int(v, -9.223_372_036_854_776e18, 9.223_372_036_854_775e18)
            .map(ConvResult::BigInt),
        TypeId::Bit => Ok(ConvResult::Bit(v != 0.0)),
        TypeId::Float4 => {
            if v.abs() > f64::from(f32::MAX) {
                return Err(ConvertError::Overflow);
            }
            Ok(ConvResult::Real(v as f32))
        }
        TypeId::Float8 => Ok(ConvResult::Float(v)),
        TypeId::Money => {
            let scaled = v * 10_000.0;
            float_to_int(scaled, -9.223_372_036_854_776e18, 9.223_372_036_854_775e18)
                .map(|m| ConvResult::Money(Money(m)))
        }
        TypeId::Money4 => {
            let scaled = v * 10_000.0;
            float_to_int(scaled, f64::from(i32::MIN), f64::from(i32::MAX))
                .map(|m| ConvResult::Money4(Money4(m as i32)))
        }
        t if t.is_numeric() => {
            let scale = dst.scale.unwrap_or(0);
            let text = format!("{v:.prec$}", prec = usize::from(scale));
            Numeric::parse_text(
                text.as_bytes(),
                dst.precision.unwrap_or(MAX_PRECISION),
                scale,
            )
            .map(ConvResult::Numeric)
        }
        _ => Err(no_conv(src_id, dst_id)),
    }
}

fn float_to_int(v: f64, min: f64, max: f64) -> Result<i64, ConvertError> {
    if !v.is_finite() || v < min || v > max {
        return Err(ConvertError::Overflow);
    }
    Ok(v as i64)
}

fn convert_money4(m: Money4, src_id: TypeId, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        t if t.is_char() => {
            // Two decimal digits, rounded, as the server renders it.
            let v = i64::from(m.0);
            let cents = if v < 0 { -((-v / 50 + 1) / 2) } else { (v / 50 + 1) / 2 };
            let text = format!(
                "{}{}.{:02}",
                if cents < 0 { "-" } else { "" },
                cents.abs() / 100,
                cents.abs() % 100
            );
            char_result(&text, dst)
        }
        t if t.is_binary() => binary_result(m.to_wire().to_vec(), dst),
        TypeId::Money => Ok(ConvResult::Money(Money(i64::from(m.0)))),
        TypeId::Money4 => Ok(ConvResult::Money4(m)),
        t if t.is_numeric() => Numeric::parse_text(
            money_decimal_text(i64::from(m.0)).as_bytes(),
            dst.precision.unwrap_or(MAX_PRECISION),
            dst.scale.unwrap_or(0),
        )
        .map(ConvResult::Numeric),
        TypeId::Bit => Ok(ConvResult::Bit(m.0 != 0)),
        TypeId::Float4 => Ok(ConvResult::Real((f64::from(m.0) / 10_000.0) as f32)),
        TypeId::Float8 => Ok(ConvResult::Float(f64::from(m.0) / 10_000.0)),
        t if t.is_integer() => {
            convert_int_value(i64::from(m.0) / 10_000, 4, src_id, dst).map_err(|e| match e {
                ConvertError::NoConversion { .. } => no_conv(src_id, dst_id),
                other => other,
            })
        }
        _ => Err(no_conv(src_id, dst_id)),
    }
}

fn convert_money(m: Money, src_id: TypeId, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        // The full four decimal places, exactly.
        t if t.is_char() => char_result(&money_decimal_text(m.0), dst),
        t if t.is_binary() => binary_result(m.to_wire().to_vec(), dst),
        TypeId::Money => Ok(ConvResult::Money(m)),
        TypeId::Money4 => i32::try_from(m.0)
            .map(|v| ConvResult::Money4(Money4(v)))
            .map_err(|_| ConvertError::Overflow),
        t if t.is_numeric() => Numeric::parse_text(
            money_decimal_text(m.0).as_bytes(),
            dst.precision.unwrap_or(MAX_PRECISION),
            dst.scale.unwrap_or(0),
        )
        .map(ConvResult::Numeric),
        TypeId::Bit => Ok(ConvResult::Bit(m.0 != 0)),
        TypeId::Float4 => Ok(ConvResult::Real((m.0 as f64 / 10_000.0) as f32)),
        TypeId::Float8 => Ok(ConvResult::Float(m.0 as f64 / 10_000.0)),
        t if t.is_integer() => {
            convert_int_value(m.units(), 8, src_id, dst).map_err(|e| match e {
                ConvertError::NoConversion { .. } => no_conv(src_id, dst_id),
                other => other,
            })
        }
        _ => Err(no_conv(src_id, dst_id)),
    }
}

fn money_decimal_text(scaled: i64) -> String {
    let mag = scaled.unsigned_abs();
    format!(
        "{}{}.{:04}",
        if scaled < 0 { "-" } else { "" },
        mag / 10_000,
        mag % 10_000
    )
}

fn convert_datetime(
    dt: DateTime,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        t if t.is_char() => char_result(&format_datetime(dt.to_naive()?, 3), dst),
        t if t.is_binary() => binary_result(dt.to_wire().to_vec(), dst),
        TypeId::DateTime => Ok(ConvResult::DateTime(dt)),
        TypeId::DateTime4 => {
            if !(0..=i32::from(u16::MAX)).contains(&dt.days) {
                return Err(ConvertError::Overflow);
            }
            Ok(ConvResult::DateTime4(DateTime4::from(dt)))
        }
        t if t.is_datetime() => naive_to_datetime_result(dt.to_naive()?, dst),
        other => Err(no_conv(src_id, other)),
    }
}

fn convert_datetime4(
    dt4: DateTime4,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        t if t.is_char() => char_result(&format_datetime(dt4.to_naive()?, 0), dst),
        t if t.is_binary() => binary_result(dt4.to_wire().to_vec(), dst),
        TypeId::DateTime => Ok(ConvResult::DateTime(DateTime::from(dt4))),
        TypeId::DateTime4 => Ok(ConvResult::DateTime4(dt4)),
        t if t.is_datetime() => naive_to_datetime_result(dt4.to_naive()?, dst),
        other => Err(no_conv(src_id, other)),
    }
}

fn convert_date(d: Date, src_id: TypeId, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        t if t.is_char() => char_result(&d.to_naive()?.format("%Y-%m-%d").to_string(), dst),
        t if t.is_binary() => binary_result(d.to_wire().to_vec(), dst),
        TypeId::Date => Ok(ConvResult::Date(d)),
        TypeId::Time => Err(no_conv(src_id, TypeId::Time)),
        t if t.is_datetime() => {
            naive_to_datetime_result(d.to_naive()?.and_time(chrono::NaiveTime::default()), dst)
        }
        other => Err(no_conv(src_id, other)),
    }
}

fn convert_time(t: Time, src_id: TypeId, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        d if d.is_char() => {
            let naive = t.to_naive()?;
            let base = naive.format("%H:%M:%S").to_string();
            let text = if t.scale == 0 {
                base
            } else {
                use chrono::Timelike;
                let frac = u64::from(naive.nanosecond()) / 10u64.pow(9 - u32::from(t.scale));
                format!("{base}.{frac:0width$}", width = usize::from(t.scale))
            };
            char_result(&text, dst)
        }
        d if d.is_binary() => binary_result(t.to_wire(), dst),
        TypeId::Time => Ok(ConvResult::Time(Time::from_naive(
            t.to_naive()?,
            dst.scale.unwrap_or(t.scale),
        ))),
        TypeId::Date => Err(no_conv(src_id, TypeId::Date)),
        d if d.is_datetime() => {
            // A bare time is anchored to the 1900-01-01 epoch.
            let naive = chrono::NaiveDate::from_ymd_opt(1900, 1, 1)
                .unwrap_or_default()
                .and_time(t.to_naive()?);
            naive_to_datetime_result(naive, dst)
        }
        other => Err(no_conv(src_id, other)),
    }
}

fn convert_datetime2(
    dt2: DateTime2,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        t if t.is_char() => char_result(&format_datetime(dt2.to_naive()?, dt2.time.scale), dst),
        t if t.is_binary() => binary_result(dt2.to_wire(), dst),
        t if t.is_datetime() => naive_to_datetime_result(dt2.to_naive()?, dst),
        other => Err(no_conv(src_id, other)),
    }
}

fn convert_datetimeoffset(
    dto: DateTimeOffset,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        t if t.is_char() => {
            let local = dto.datetime.to_naive()?;
            let off = i32::from(dto.offset_minutes).abs();
            let text = format!(
                "{} {}{:02}:{:02}",
                format_datetime(local, dto.datetime.time.scale),
                if dto.offset_minutes < 0 { '-' } else { '+' },
                off / 60,
                off % 60
            );
            char_result(&text, dst)
        }
        t if t.is_binary() => binary_result(dto.to_wire(), dst),
        TypeId::DateTimeOffset => Ok(ConvResult::DateTimeOffset(dto)),
        // Other date/time destinations take the local clock reading.
        t if t.is_datetime() => naive_to_datetime_result(dto.datetime.to_naive()?, dst),
        other => Err(no_conv(src_id, other)),
    }
}

/// Build any date/time-family destination from a naive datetime.
fn naive_to_datetime_result(
    naive: chrono::NaiveDateTime,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    match dst.type_id {
        TypeId::DateTime => DateTime::from_naive(naive).map(ConvResult::DateTime),
        TypeId::DateTime4 => DateTime4::from_naive(naive).map(ConvResult::DateTime4),
        TypeId::Date => Date::from_naive(naive.date()).map(ConvResult::Date),
        TypeId::Time => Ok(ConvResult::Time(Time::from_naive(
            naive.time(),
            dst.scale.unwrap_or(7),
        ))),
        TypeId::DateTime2 => {
            DateTime2::from_naive(naive, dst.scale.unwrap_or(7)).map(ConvResult::DateTime2)
        }
        TypeId::DateTimeOffset => {
            let dt2 = DateTime2::from_naive(naive, dst.scale.unwrap_or(7))?;
            Ok(ConvResult::DateTimeOffset(DateTimeOffset {
                datetime: dt2,
                offset_minutes: 0,
            }))
        }
        _ => Err(ConvertError::Fail),
    }
}

fn convert_guid(src_bytes: &[u8], src_id: TypeId, dst: &TypeInfo) -> Result<ConvResult, ConvertError> {
    let wire = fixed_bytes::<16>(src_bytes)?;
    let uuid = guid_from_wire(wire);
    match dst.type_id {
        t if t.is_char() => {
            char_result(&uuid.hyphenated().to_string().to_ascii_uppercase(), dst)
        }
        t if t.is_binary() => binary_result(wire.to_vec(), dst),
        TypeId::Guid => Ok(ConvResult::Guid(uuid)),
        other => Err(no_conv(src_id, other)),
    }
}

/// Decode the mixed-endian GUID wire layout: the first three groups are
/// little-endian, the final eight bytes are as-is.
#[must_use]
pub fn guid_from_wire(wire: [u8; 16]) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[0] = wire[3];
    bytes[1] = wire[2];
    bytes[2] = wire[1];
    bytes[3] = wire[0];
    bytes[4] = wire[5];
    bytes[5] = wire[4];
    bytes[6] = wire[7];
    bytes[7] = wire[6];
    bytes[8..].copy_from_slice(&wire[8..]);
    Uuid::from_bytes(bytes)
}

/// Encode the mixed-endian GUID wire layout.
#[must_use]
pub fn guid_to_wire(uuid: &Uuid) -> [u8; 16] {
    let b = uuid.as_bytes();
    let mut wire = [0u8; 16];
    wire[0] = b[3];
    wire[1] = b[2];
    wire[2] = b[1];
    wire[3] = b[0];
    wire[4] = b[5];
    wire[5] = b[4];
    wire[6] = b[7];
    wire[7] = b[6];
    wire[8..].copy_from_slice(&b[8..]);
    wire
}

fn convert_numeric(
    n: &Numeric,
    src_id: TypeId,
    dst: &TypeInfo,
) -> Result<ConvResult, ConvertError> {
    let dst_id = dst.type_id;
    match dst_id {
        t if t.is_char() => char_result(&n.to_string(), dst),
        t if t.is_binary() => binary_result(n.to_wire(), dst),
        TypeId::Int1 => {
            let v = n.to_scaled_i64(0)?;
            u8::try_from(v)
                .map(ConvResult::TinyInt)
                .map_err(|_| ConvertError::Overflow)
        }
        TypeId::Int2 => {
            let v = n.to_scaled_i64(0)?;
            i16::try_from(v)
                .map(ConvResult::SmallInt)
                .map_err(|_| ConvertError::Overflow)
        }
        TypeId::Int4 => {
            let v = n.to_scaled_i64(0)?;
            i32::try_from(v)
                .map(ConvResult::Int)
                .map_err(|_| ConvertError::Overflow)
        }
        TypeId::Int8 => Ok(ConvResult::BigInt(n.to_scaled_i64(0)?)),
        TypeId::Bit => Ok(ConvResult::Bit(!n.is_zero())),
        TypeId::Float4 => {
            let v: f64 = n.to_string().parse().map_err(|_| ConvertError::Fail)?;
            Ok(ConvResult::Real(v as f32))
        }
        TypeId::Float8 => {
            let v: f64 = n.to_string().parse().map_err(|_| ConvertError::Fail)?;
            Ok(ConvResult::Float(v))
        }
        TypeId::Money => Ok(ConvResult::Money(Money(n.to_scaled_i64(4)?))),
        TypeId::Money4 => {
            let v = n.to_scaled_i64(4)?;
            i32::try_from(v)
                .map(|v| ConvResult::Money4(Money4(v)))
                .map_err(|_| ConvertError::Overflow)
        }
        t if t.is_numeric() => n
            .rescale(
                dst.precision.unwrap_or(n.precision()),
                dst.scale.unwrap_or(n.scale()),
            )
            .map(ConvResult::Numeric),
        _ => Err(no_conv(src_id, dst_id)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn conv(src: TypeId, bytes: &[u8], dst: TypeId) -> Result<ConvResult, ConvertError> {
        convert(&TypeInfo::new(src), bytes, &TypeInfo::new(dst))
    }

    #[test]
    fn test_char_to_smallint_boundary() {
        assert_eq!(
            conv(TypeId::VarChar, b"32767", TypeId::Int2).unwrap(),
            ConvResult::SmallInt(32767)
        );
        assert_eq!(
            conv(TypeId::VarChar, b"32768", TypeId::Int2),
            Err(ConvertError::Overflow)
        );
        assert_eq!(
            conv(TypeId::VarChar, b"-32768", TypeId::Int2).unwrap(),
            ConvResult::SmallInt(-32768)
        );
    }

    #[test]
    fn test_char_to_int_embedded_blanks() {
        assert_eq!(
            conv(TypeId::VarChar, b" - 13 ", TypeId::Int4).unwrap(),
            ConvResult::Int(-13)
        );
    }

    #[test]
    fn test_char_truncated_at_declared_length() {
        // " - 12345" presented as five bytes is " - 12".
        assert_eq!(
            conv(TypeId::VarChar, &b" - 12345"[..5], TypeId::Int4).unwrap(),
            ConvResult::Int(-12)
        );
        // "-1234567" presented as four bytes is "-123".
        assert_eq!(
            conv(TypeId::VarChar, &b"-1234567"[..4], TypeId::Money4).unwrap(),
            ConvResult::Money4(Money4(-1_230_000))
        );
    }

    #[test]
    fn test_money_grammar() {
        let money = |s: &[u8]| conv(TypeId::VarChar, s, TypeId::Money4);
        assert_eq!(money(b"").unwrap(), ConvResult::Money4(Money4(0)));
        assert_eq!(money(b".").unwrap(), ConvResult::Money4(Money4(0)));
        assert_eq!(money(b".12").unwrap(), ConvResult::Money4(Money4(1200)));
        assert_eq!(
            money(b"   -123").unwrap(),
            ConvResult::Money4(Money4(-1_230_000))
        );
        assert_eq!(
            money(b"++++-123").unwrap(),
            ConvResult::Money4(Money4(-1_230_000))
        );
        assert_eq!(
            money(b"+123.1234").unwrap(),
            ConvResult::Money4(Money4(1_231_234))
        );
        assert_eq!(
            money(b"+123.123411").unwrap(),
            ConvResult::Money4(Money4(1_231_234))
        );
        assert_eq!(money(b"+123.12.3411"), Err(ConvertError::Syntax));
        assert_eq!(money(b"pippo"), Err(ConvertError::Syntax));
    }

    #[test]
    fn test_int_to_money_overflow() {
        let bytes = 1_234_678i32.to_le_bytes();
        assert_eq!(
            conv(TypeId::Int4, &bytes, TypeId::Money4),
            Err(ConvertError::Overflow)
        );
        let ok = (-8765i32).to_le_bytes();
        assert_eq!(
            conv(TypeId::Int4, &ok, TypeId::Money4).unwrap(),
            ConvResult::Money4(Money4(-87_650_000))
        );
    }

    #[test]
    fn test_bit_destinations() {
        assert_eq!(
            conv(TypeId::Int4, &2i32.to_le_bytes(), TypeId::Bit).unwrap(),
            ConvResult::Bit(true)
        );
        assert_eq!(
            conv(TypeId::Int4, &0i32.to_le_bytes(), TypeId::Bit).unwrap(),
            ConvResult::Bit(false)
        );
        assert_eq!(
            conv(TypeId::Int4, &(-1i32).to_le_bytes(), TypeId::Bit).unwrap(),
            ConvResult::Bit(true)
        );
    }

    #[test]
    fn test_int_to_char() {
        assert_eq!(
            conv(TypeId::Int4, &12345i32.to_le_bytes(), TypeId::VarChar).unwrap(),
            ConvResult::Char(Bytes::from_static(b"12345"))
        );
    }

    #[test]
    fn test_char_to_char_capacity() {
        let dst = TypeInfo::variable(TypeId::VarChar, 3);
        assert_eq!(
            convert(&TypeInfo::new(TypeId::VarChar), b"abcd", &dst),
            Err(ConvertError::Overflow)
        );
        assert_eq!(
            convert(&TypeInfo::new(TypeId::VarChar), b"abc", &dst).unwrap(),
            ConvResult::Char(Bytes::from_static(b"abc"))
        );
    }

    #[test]
    fn test_hex_binary_both_ways() {
        assert_eq!(
            conv(TypeId::VarChar, b"616263", TypeId::VarBinary).unwrap(),
            ConvResult::Binary(Bytes::from_static(b"abc"))
        );
        assert_eq!(
            conv(TypeId::VarChar, b"0xABC", TypeId::VarBinary).unwrap(),
            ConvResult::Binary(Bytes::from_static(&[0x0a, 0xbc]))
        );
        assert_eq!(
            conv(TypeId::VarChar, b"hello!", TypeId::VarBinary),
            Err(ConvertError::Syntax)
        );
        assert_eq!(
            conv(TypeId::VarBinary, b"\x01\xfe", TypeId::VarChar).unwrap(),
            ConvResult::Char(Bytes::from_static(b"01fe"))
        );
    }

    #[test]
    fn test_binary_reinterpret_pads() {
        assert_eq!(
            conv(TypeId::VarBinary, &[0x2a, 0x00], TypeId::Int4).unwrap(),
            ConvResult::Int(42)
        );
    }

    #[test]
    fn test_money_to_char_rendering() {
        let m4 = Money4(1_231_234).to_wire();
        assert_eq!(
            conv(TypeId::Money4, &m4, TypeId::VarChar).unwrap(),
            ConvResult::Char(Bytes::from_static(b"123.12"))
        );
        let m = Money(-1_231_234).to_wire();
        assert_eq!(
            conv(TypeId::Money, &m, TypeId::VarChar).unwrap(),
            ConvResult::Char(Bytes::from_static(b"-123.1234"))
        );
    }

    #[test]
    fn test_money_money4_range() {
        let big = Money(i64::from(i32::MAX) + 1).to_wire();
        assert_eq!(
            conv(TypeId::Money, &big, TypeId::Money4),
            Err(ConvertError::Overflow)
        );
    }

    #[test]
    fn test_numeric_roundtrip_via_char() {
        let dst = TypeInfo::numeric(10, 2);
        let n = convert(&TypeInfo::new(TypeId::VarChar), b"-170.5", &dst).unwrap();
        let ConvResult::Numeric(n) = n else {
            panic!("expected numeric")
        };
        assert_eq!(n.to_string(), "-170.50");
        let back = convert_numeric(&n, TypeId::Numeric, &TypeInfo::new(TypeId::VarChar)).unwrap();
        assert_eq!(back, ConvResult::Char(Bytes::from_static(b"-170.50")));
    }

    #[test]
    fn test_numeric_rescale_path() {
        let src = TypeInfo::numeric(10, 2);
        let n = convert(&TypeInfo::new(TypeId::VarChar), b"99.99", &src).unwrap();
        let ConvResult::Numeric(n) = n else {
            panic!("expected numeric")
        };
        let wire = n.to_wire();
        let narrow = convert(&src, &wire, &TypeInfo::numeric(3, 1)).unwrap();
        let ConvResult::Numeric(narrow) = narrow else {
            panic!("expected numeric")
        };
        assert_eq!(narrow.to_string(), "99.9");
        assert_eq!(
            convert(&src, &wire, &TypeInfo::numeric(2, 1)),
            Err(ConvertError::Overflow)
        );
    }

    #[test]
    fn test_numeric_to_money() {
        let src = TypeInfo::numeric(10, 2);
        let n = convert(&TypeInfo::new(TypeId::VarChar), b"123.45", &src).unwrap();
        let ConvResult::Numeric(n) = n else {
            panic!("expected numeric")
        };
        assert_eq!(
            convert_numeric(&n, TypeId::Numeric, &TypeInfo::new(TypeId::Money)).unwrap(),
            ConvResult::Money(Money(1_234_500))
        );
    }

    #[test]
    fn test_datetime_to_smalldatetime() {
        let dt = DateTime {
            days: 100,
            time300: 300 * 90, // 90 seconds past midnight
        };
        let res = conv(TypeId::DateTime, &dt.to_wire(), TypeId::DateTime4).unwrap();
        assert_eq!(
            res,
            ConvResult::DateTime4(DateTime4 {
                days: 100,
                minutes: 1
            })
        );
    }

    #[test]
    fn test_char_to_datetime_and_back() {
        let res = conv(TypeId::VarChar, b"2024-01-02 15:04:05", TypeId::DateTime).unwrap();
        let ConvResult::DateTime(dt) = res else {
            panic!("expected datetime")
        };
        let text = conv(TypeId::DateTime, &dt.to_wire(), TypeId::VarChar).unwrap();
        assert_eq!(
            text,
            ConvResult::Char(Bytes::from_static(b"2024-01-02 15:04:05.000"))
        );
    }

    #[test]
    fn test_guid_text_forms() {
        let canonical = b"6F9619FF-8B86-D011-B42D-00C04FC964FF";
        let ConvResult::Guid(u) = conv(TypeId::VarChar, canonical, TypeId::Guid).unwrap() else {
            panic!("expected guid")
        };
        let braced = b"{6F9619FF-8B86-D011-B42D-00C04FC964FF}";
        assert_eq!(
            conv(TypeId::VarChar, braced, TypeId::Guid).unwrap(),
            ConvResult::Guid(u)
        );
        let no_last_dash = b"6F9619FF-8B86-D011-B42D00C04FC964FF";
        assert_eq!(
            conv(TypeId::VarChar, no_last_dash, TypeId::Guid).unwrap(),
            ConvResult::Guid(u)
        );
        assert_eq!(
            conv(TypeId::VarChar, b"not-a-guid", TypeId::Guid),
            Err(ConvertError::Syntax)
        );
    }

    #[test]
    fn test_guid_wire_roundtrip() {
        let wire: [u8; 16] = [
            0xff, 0x19, 0x96, 0x6f, 0x86, 0x8b, 0x11, 0xd0, 0xb4, 0x2d, 0x00, 0xc0, 0x4f, 0xc9,
            0x64, 0xff,
        ];
        let ConvResult::Char(text) = conv(TypeId::Guid, &wire, TypeId::VarChar).unwrap() else {
            panic!("expected char")
        };
        assert_eq!(&text[..], b"6F9619FF-8B86-D011-B42D-00C04FC964FF");
        let ConvResult::Guid(u) = conv(TypeId::Guid, &wire, TypeId::Guid).unwrap() else {
            panic!("expected guid")
        };
        assert_eq!(guid_to_wire(&u), wire);
    }

    #[test]
    fn test_wide_char_source() {
        let wide = encode_utf16le("32767");
        assert_eq!(
            conv(TypeId::NVarChar, &wide, TypeId::Int2).unwrap(),
            ConvResult::SmallInt(32767)
        );
    }

    #[test]
    fn test_narrow_to_wide_char() {
        let res = conv(TypeId::VarChar, b"ab", TypeId::NVarChar).unwrap();
        assert_eq!(
            res,
            ConvResult::Char(Bytes::from_static(&[0x61, 0x00, 0x62, 0x00]))
        );
    }

    #[test]
    fn test_willconvert_matches_convert() {
        assert!(willconvert(TypeId::VarChar, TypeId::Money));
        assert!(willconvert(TypeId::Int4, TypeId::Numeric));
        assert!(!willconvert(TypeId::Guid, TypeId::Int4));
        assert!(!willconvert(TypeId::DateTime, TypeId::Int4));
        assert!(!willconvert(TypeId::Date, TypeId::Time));
        assert!(!willconvert(TypeId::Time, TypeId::Date));
        assert!(willconvert(TypeId::Time, TypeId::DateTime2));

        let guid_bytes = [0u8; 16];
        assert_eq!(
            conv(TypeId::Guid, &guid_bytes, TypeId::Int4),
            Err(ConvertError::NoConversion {
                from: TypeId::Guid,
                to: TypeId::Int4
            })
        );
    }

    #[test]
    fn test_float_conversions() {
        let pi = 3.5f64.to_le_bytes();
        assert_eq!(
            conv(TypeId::Float8, &pi, TypeId::Int4).unwrap(),
            ConvResult::Int(3)
        );
        let big = 3.0e9f64.to_le_bytes();
        assert_eq!(
            conv(TypeId::Float8, &big, TypeId::Int4),
            Err(ConvertError::Overflow)
        );
        assert_eq!(
            conv(TypeId::VarChar, b" 2.5 ", TypeId::Float8).unwrap(),
            ConvResult::Float(2.5)
        );
        assert_eq!(
            conv(TypeId::VarChar, b"2.5x", TypeId::Float8),
            Err(ConvertError::Syntax)
        );
        assert_eq!(
            conv(TypeId::Float8, &2.5f64.to_le_bytes(), TypeId::Money).unwrap(),
            ConvResult::Money(Money(25_000))
        );
    }
}
