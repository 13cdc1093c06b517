//! Exact decimal (`NUMERIC`/`DECIMAL`) representation and rescaling.
//!
//! A numeric value carries a precision (1–38), a scale (0..=precision), a
//! sign, and a big-endian magnitude whose significant byte count is a fixed
//! function of the precision. Rescaling between differing precision/scale
//! pairs multiplies or divides the magnitude by the exact power-of-ten
//! difference using multiprecision arithmetic; a result whose digits no
//! longer fit the destination precision is an overflow, never a silent
//! truncation of significant digits.

use std::fmt;

use tds_smp::Smp;

use crate::error::ConvertError;

/// Highest supported precision.
pub const MAX_PRECISION: u8 = 38;

/// Bytes required to store a value of the indexed precision, sign included.
///
/// Indexed directly by precision; entry 0 is unused.
const BYTES_PER_PREC: [u8; 39] = [
    0, 2, 2, 3, 3, 4, 4, 4, 5, 5, //
    6, 6, 6, 7, 7, 8, 8, 9, 9, 9, //
    10, 10, 11, 11, 11, 12, 12, 13, 13, 14, //
    14, 14, 15, 15, 16, 16, 16, 17, 17,
];

/// An exact decimal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric {
    precision: u8,
    scale: u8,
    negative: bool,
    /// Big-endian magnitude, right-aligned in the full 16 bytes.
    magnitude: [u8; 16],
}

/// Bytes needed on the wire for the given precision, including the sign byte.
#[must_use]
pub fn bytes_per_precision(precision: u8) -> usize {
    BYTES_PER_PREC[usize::from(precision.clamp(1, MAX_PRECISION))] as usize
}

/// 10^n as a multiprecision value, `None` past 128 bits.
fn pow10(n: u8) -> Option<Smp> {
    let mut p = Smp::ONE;
    for _ in 0..n {
        p = p.checked_mul_small(10)?;
    }
    Some(p)
}

fn check_precision(precision: u8, scale: u8) -> Result<(), ConvertError> {
    if precision == 0 || precision > MAX_PRECISION || scale > precision {
        return Err(ConvertError::Fail);
    }
    Ok(())
}

impl Numeric {
    /// Build a value from a non-negative multiprecision magnitude.
    ///
    /// Fails with `Overflow` if the magnitude has more digits than
    /// `precision` allows.
    pub fn from_smp(
        mag: Smp,
        negative: bool,
        precision: u8,
        scale: u8,
    ) -> Result<Self, ConvertError> {
        check_precision(precision, scale)?;
        if let Some(limit) = pow10(precision) {
            if mag >= limit {
                return Err(ConvertError::Overflow);
            }
        }
        let le = mag.to_le_bytes();
        let mut magnitude = [0u8; 16];
        for (i, b) in le.iter().enumerate() {
            magnitude[15 - i] = *b;
        }
        Ok(Self {
            precision,
            scale,
            negative: negative && !mag.is_zero(),
            magnitude,
        })
    }

    /// The magnitude as a non-negative multiprecision value.
    #[must_use]
    pub fn to_smp(&self) -> Smp {
        let mut le = [0u8; 16];
        for (i, b) in le.iter_mut().enumerate() {
            *b = self.magnitude[15 - i];
        }
        Smp::from_le_bytes(le)
    }

    /// Declared precision.
    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Declared scale.
    #[must_use]
    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// True for values below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True when the magnitude is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.iter().all(|&b| b == 0)
    }

    /// The significant big-endian magnitude bytes for this precision.
    #[must_use]
    pub fn magnitude(&self) -> &[u8] {
        let len = bytes_per_precision(self.precision) - 1;
        &self.magnitude[16 - len..]
    }

    /// Convert to a different precision and scale.
    ///
    /// The magnitude is multiplied or divided by the exact power-of-ten
    /// scale difference. Fractional digits dropped by a scale reduction are
    /// truncated; integral digits that no longer fit the destination
    /// precision raise `Overflow`.
    pub fn rescale(&self, precision: u8, scale: u8) -> Result<Numeric, ConvertError> {
        check_precision(precision, scale)?;
        let mut mag = self.to_smp();
        if scale >= self.scale {
            for _ in 0..scale - self.scale {
                mag = mag.checked_mul_small(10).ok_or(ConvertError::Overflow)?;
            }
        } else {
            for _ in 0..self.scale - scale {
                mag = mag.div_rem_small(10).0;
            }
        }
        Numeric::from_smp(mag, self.negative, precision, scale)
    }

    /// The value scaled to `target_scale` as a 64-bit integer, truncating
    /// dropped fractional digits.
    pub fn to_scaled_i64(&self, target_scale: u8) -> Result<i64, ConvertError> {
        let mut mag = self.to_smp();
        if target_scale >= self.scale {
            for _ in 0..target_scale - self.scale {
                mag = mag.checked_mul_small(10).ok_or(ConvertError::Overflow)?;
            }
        } else {
            for _ in 0..self.scale - target_scale {
                mag = mag.div_rem_small(10).0;
            }
        }
        let wide = u128::from_le_bytes(mag.to_le_bytes());
        if self.negative {
            if wide > 1u128 << 63 {
                return Err(ConvertError::Overflow);
            }
            Ok((wide as i128).wrapping_neg() as i64)
        } else {
            i64::try_from(wide).map_err(|_| ConvertError::Overflow)
        }
    }

    /// Decode the wire form: one sign byte (non-zero means positive) followed
    /// by the little-endian magnitude.
    pub fn from_wire(bytes: &[u8], precision: u8, scale: u8) -> Result<Self, ConvertError> {
        check_precision(precision, scale)?;
        let (sign, mag_bytes) = bytes.split_first().ok_or(ConvertError::Syntax)?;
        if mag_bytes.len() > 16 {
            return Err(ConvertError::Overflow);
        }
        let mut le = [0u8; 16];
        le[..mag_bytes.len()].copy_from_slice(mag_bytes);
        Numeric::from_smp(Smp::from_le_bytes(le), *sign == 0, precision, scale)
    }

    /// Encode the wire form for this precision.
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mag = self.magnitude();
        let mut out = Vec::with_capacity(mag.len() + 1);
        out.push(u8::from(!self.negative));
        out.extend(mag.iter().rev());
        out
    }

    /// Parse decimal text into a value of the given precision and scale.
    ///
    /// Leading blanks and a single sign are accepted; at most one decimal
    /// point; anything else is a syntax error. Fractional digits beyond the
    /// scale are truncated; integral digits beyond what the precision can
    /// hold raise `Overflow`.
    pub fn parse_text(text: &[u8], precision: u8, scale: u8) -> Result<Self, ConvertError> {
        check_precision(precision, scale)?;

        let mut p = text;
        while let Some((b' ', rest)) = p.split_first() {
            p = rest;
        }
        let negative = match p.split_first() {
            Some((b'-', rest)) => {
                p = rest;
                true
            }
            Some((b'+', rest)) => {
                p = rest;
                false
            }
            _ => false,
        };

        let mut int_digits: Vec<u8> = Vec::new();
        let mut frac_digits: Vec<u8> = Vec::new();
        let mut point_found = false;
        for &c in p {
            if c.is_ascii_digit() {
                if point_found {
                    frac_digits.push(c - b'0');
                } else {
                    int_digits.push(c - b'0');
                }
            } else if c == b'.' {
                if point_found {
                    return Err(ConvertError::Syntax);
                }
                point_found = true;
            } else {
                return Err(ConvertError::Syntax);
            }
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(ConvertError::Syntax);
        }

        // Truncate fractional digits past the scale, pad the rest.
        frac_digits.truncate(usize::from(scale));
        frac_digits.resize(usize::from(scale), 0);

        // Significant integral digits must leave room for the scale.
        let significant = int_digits.iter().skip_while(|&&d| d == 0).count();
        if significant + usize::from(scale) > usize::from(precision) {
            return Err(ConvertError::Overflow);
        }

        let mut mag = Smp::ZERO;
        for d in int_digits.into_iter().chain(frac_digits) {
            mag = mag
                .checked_mul_small(10)
                .ok_or(ConvertError::Overflow)?
                .add(Smp::from_i64(i64::from(d)));
        }
        Numeric::from_smp(mag, negative, precision, scale)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.to_smp().to_string();
        let scale = usize::from(self.scale);
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        if self.negative {
            f.write_str("-")?;
        }
        if scale == 0 {
            f.write_str(&padded)
        } else {
            let split = padded.len() - scale;
            write!(f, "{}.{}", &padded[..split], &padded[split..])
        }
    }
}
