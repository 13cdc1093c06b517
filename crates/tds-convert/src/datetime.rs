//! Date and time wire values.
//!
//! Two generations of encodings exist on the wire: the legacy pair
//! (`DATETIME`, 4-byte days-since-1900 plus 300ths of a second, and
//! `SMALLDATETIME`, days plus minutes) and the SQL-2008 family (`DATE`,
//! `TIME`, `DATETIME2`, `DATETIMEOFFSET`) with scaled fractional seconds.
//! Conversions pivot through chrono's naive types.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ConvertError;

/// Days between 0001-01-01 and 1900-01-01, the two wire epochs.
const DAYS_1900: i64 = 693_595;

fn epoch_1900() -> NaiveDateTime {
    // Constant date, cannot fail.
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
}

fn epoch_0001() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
}

/// Legacy 8-byte datetime: days since 1900-01-01 and 300ths of a second
/// since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    /// Days since 1900-01-01 (may be negative).
    pub days: i32,
    /// 300ths of a second since midnight.
    pub time300: u32,
}

/// Legacy 4-byte small datetime: days since 1900-01-01 and minutes since
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime4 {
    /// Days since 1900-01-01.
    pub days: u16,
    /// Minutes since midnight.
    pub minutes: u16,
}

/// SQL-2008 date: days since 0001-01-01, three bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    /// Days since 0001-01-01.
    pub days: u32,
}

/// SQL-2008 time: 10^-scale second increments since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    /// Increments of 10^-scale seconds since midnight.
    pub increments: u64,
    /// Fractional-second scale, 0–7.
    pub scale: u8,
}

/// SQL-2008 datetime2: a [`Time`] and a [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime2 {
    /// Time of day.
    pub time: Time,
    /// Date part.
    pub date: Date,
}

/// SQL-2008 datetimeoffset: a [`DateTime2`] plus a UTC offset in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeOffset {
    /// Local date and time.
    pub datetime: DateTime2,
    /// Offset from UTC in minutes.
    pub offset_minutes: i16,
}

/// Wire bytes used by `TIME`-class values at the given scale.
#[must_use]
pub fn time_bytes_for_scale(scale: u8) -> usize {
    match scale {
        0..=2 => 3,
        3..=4 => 4,
        _ => 5,
    }
}

fn read_le_u64(bytes: &[u8]) -> u64 {
    let mut out = [0u8; 8];
    out[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(out)
}

impl DateTime {
    /// Decode the 8-byte wire form.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() != 8 {
            return Err(ConvertError::Fail);
        }
        let days = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let time300 = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(Self { days, time300 })
    }

    /// Encode the 8-byte wire form.
    #[must_use]
    pub fn to_wire(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.days.to_le_bytes());
        out[4..].copy_from_slice(&self.time300.to_le_bytes());
        out
    }

    /// The value as a naive datetime (milliseconds resolution).
    pub fn to_naive(self) -> Result<NaiveDateTime, ConvertError> {
        let ms = (u64::from(self.time300) * 1000) / 300;
        epoch_1900()
            .checked_add_signed(
                chrono::Duration::days(i64::from(self.days))
                    + chrono::Duration::milliseconds(ms as i64),
            )
            .ok_or(ConvertError::Overflow)
    }

    /// Build from a naive datetime, truncating below 1/300 s.
    pub fn from_naive(dt: NaiveDateTime) -> Result<Self, ConvertError> {
        let days = (dt.date() - epoch_1900().date()).num_days();
        let days = i32::try_from(days).map_err(|_| ConvertError::Overflow)?;
        let secs = u64::from(dt.time().num_seconds_from_midnight());
        let nanos = u64::from(dt.time().nanosecond());
        let time300 = secs * 300 + (nanos * 3) / 10_000_000;
        Ok(Self {
            days,
            time300: u32::try_from(time300).map_err(|_| ConvertError::Overflow)?,
        })
    }
}

impl DateTime4 {
    /// Decode the 4-byte wire form.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() != 4 {
            return Err(ConvertError::Fail);
        }
        Ok(Self {
            days: u16::from_le_bytes([bytes[0], bytes[1]]),
            minutes: u16::from_le_bytes([bytes[2], bytes[3]]),
        })
    }

    /// Encode the 4-byte wire form.
    #[must_use]
    pub fn to_wire(self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out[..2].copy_from_slice(&self.days.to_le_bytes());
        out[2..].copy_from_slice(&self.minutes.to_le_bytes());
        out
    }

    /// The value as a naive datetime.
    pub fn to_naive(self) -> Result<NaiveDateTime, ConvertError> {
        epoch_1900()
            .checked_add_signed(
                chrono::Duration::days(i64::from(self.days))
                    + chrono::Duration::minutes(i64::from(self.minutes)),
            )
            .ok_or(ConvertError::Overflow)
    }

    /// Build from a naive datetime, truncating seconds.
    pub fn from_naive(dt: NaiveDateTime) -> Result<Self, ConvertError> {
        let days = (dt.date() - epoch_1900().date()).num_days();
        let days = u16::try_from(days).map_err(|_| ConvertError::Overflow)?;
        let minutes = (dt.time().num_seconds_from_midnight() / 60) as u16;
        Ok(Self { days, minutes })
    }
}

impl From<DateTime> for DateTime4 {
    /// Minute-resolution narrowing used by DATETIME → SMALLDATETIME; may
    /// lose sub-minute detail but the day range is checked by callers via
    /// [`DateTime4::from_naive`].
    fn from(dt: DateTime) -> Self {
        DateTime4 {
            days: dt.days as u16,
            minutes: ((dt.time300 / 300) / 60) as u16,
        }
    }
}

impl From<DateTime4> for DateTime {
    fn from(dt4: DateTime4) -> Self {
        DateTime {
            days: i32::from(dt4.days),
            time300: u32::from(dt4.minutes) * 60 * 300,
        }
    }
}

impl Date {
    /// Decode the 3-byte wire form.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() != 3 {
            return Err(ConvertError::Fail);
        }
        Ok(Self {
            days: u32::from(bytes[0]) | u32::from(bytes[1]) << 8 | u32::from(bytes[2]) << 16,
        })
    }

    /// Encode the 3-byte wire form.
    #[must_use]
    pub fn to_wire(self) -> [u8; 3] {
        [
            (self.days & 0xff) as u8,
            (self.days >> 8 & 0xff) as u8,
            (self.days >> 16 & 0xff) as u8,
        ]
    }

    /// The value as a naive date.
    pub fn to_naive(self) -> Result<NaiveDate, ConvertError> {
        epoch_0001()
            .checked_add_signed(chrono::Duration::days(i64::from(self.days)))
            .ok_or(ConvertError::Overflow)
    }

    /// Build from a naive date; years before 1 CE do not exist on the wire.
    pub fn from_naive(date: NaiveDate) -> Result<Self, ConvertError> {
        let days = (date - epoch_0001()).num_days();
        if !(0..=0x00ff_ffff).contains(&days) || date.year() > 9999 {
            return Err(ConvertError::Overflow);
        }
        Ok(Self { days: days as u32 })
    }
}

impl Time {
    /// Decode the scaled wire form (3–5 bytes depending on scale).
    pub fn from_wire(bytes: &[u8], scale: u8) -> Result<Self, ConvertError> {
        if scale > 7 || bytes.len() != time_bytes_for_scale(scale) {
            return Err(ConvertError::Fail);
        }
        Ok(Self {
            increments: read_le_u64(bytes),
            scale,
        })
    }

    /// Encode the scaled wire form.
    #[must_use]
    pub fn to_wire(self) -> Vec<u8> {
        self.increments.to_le_bytes()[..time_bytes_for_scale(self.scale)].to_vec()
    }

    /// The value as a naive time.
    pub fn to_naive(self) -> Result<NaiveTime, ConvertError> {
        let nanos = self
            .increments
            .checked_mul(10u64.pow(9 - u32::from(self.scale.min(7))))
            .ok_or(ConvertError::Overflow)?;
        NaiveTime::from_num_seconds_from_midnight_opt(
            (nanos / 1_000_000_000) as u32,
            (nanos % 1_000_000_000) as u32,
        )
        .ok_or(ConvertError::Overflow)
    }

    /// Build from a naive time at the given scale, truncating finer digits.
    #[must_use]
    pub fn from_naive(time: NaiveTime, scale: u8) -> Self {
        let scale = scale.min(7);
        let nanos =
            u64::from(time.num_seconds_from_midnight()) * 1_000_000_000 + u64::from(time.nanosecond());
        Self {
            increments: nanos / 10u64.pow(9 - u32::from(scale)),
            scale,
        }
    }
}

impl DateTime2 {
    /// Decode the scaled wire form: time bytes then the 3-byte date.
    pub fn from_wire(bytes: &[u8], scale: u8) -> Result<Self, ConvertError> {
        let time_len = time_bytes_for_scale(scale);
        if bytes.len() != time_len + 3 {
            return Err(ConvertError::Fail);
        }
        Ok(Self {
            time: Time::from_wire(&bytes[..time_len], scale)?,
            date: Date::from_wire(&bytes[time_len..])?,
        })
    }

    /// Encode the scaled wire form.
    #[must_use]
    pub fn to_wire(self) -> Vec<u8> {
        let mut out = self.time.to_wire();
        out.extend_from_slice(&self.date.to_wire());
        out
    }

    /// The value as a naive datetime.
    pub fn to_naive(self) -> Result<NaiveDateTime, ConvertError> {
        Ok(self.date.to_naive()?.and_time(self.time.to_naive()?))
    }

    /// Build from a naive datetime at the given scale.
    pub fn from_naive(dt: NaiveDateTime, scale: u8) -> Result<Self, ConvertError> {
        Ok(Self {
            time: Time::from_naive(dt.time(), scale),
            date: Date::from_naive(dt.date())?,
        })
    }
}

impl DateTimeOffset {
    /// Decode the scaled wire form: datetime2 bytes then a 2-byte offset.
    pub fn from_wire(bytes: &[u8], scale: u8) -> Result<Self, ConvertError> {
        let dt2_len = time_bytes_for_scale(scale) + 3;
        if bytes.len() != dt2_len + 2 {
            return Err(ConvertError::Fail);
        }
        Ok(Self {
            datetime: DateTime2::from_wire(&bytes[..dt2_len], scale)?,
            offset_minutes: i16::from_le_bytes([bytes[dt2_len], bytes[dt2_len + 1]]),
        })
    }

    /// Encode the scaled wire form.
    #[must_use]
    pub fn to_wire(self) -> Vec<u8> {
        let mut out = self.datetime.to_wire();
        out.extend_from_slice(&self.offset_minutes.to_le_bytes());
        out
    }
}

/// Formats accepted when parsing date/time text, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%b %d %Y %I:%M:%S%p",
    "%b %d %Y %I:%M%p",
    "%m/%d/%Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d %Y", "%d %b %Y", "%m/%d/%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S%p", "%I:%M%p"];

/// Parse date/time text in any accepted form into a naive datetime.
///
/// Date-only input yields midnight; time-only input is anchored to the
/// 1900-01-01 epoch, matching how a bare time converts to `DATETIME`.
pub fn parse_datetime_text(text: &str) -> Result<NaiveDateTime, ConvertError> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(ConvertError::Syntax);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&normalized, fmt) {
            return Ok(d.and_time(NaiveTime::default()));
        }
    }
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(&normalized, fmt) {
            return Ok(epoch_1900().date().and_time(t));
        }
    }
    Err(ConvertError::Syntax)
}

/// Render a naive datetime with the given count of fractional digits.
#[must_use]
pub fn format_datetime(dt: NaiveDateTime, frac_digits: u8) -> String {
    let base = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    if frac_digits == 0 {
        return base;
    }
    let frac = u64::from(dt.time().nanosecond()) / 10u64.pow(9 - u32::from(frac_digits.min(7)));
    format!("{base}.{frac:0width$}", width = usize::from(frac_digits.min(7)))
}
