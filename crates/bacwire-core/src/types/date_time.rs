use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::EncodeError;

/// Byte value meaning "any" in every date and time field.
pub const WILDCARD: u8 = 0xFF;
/// Day-field markers.
pub const DAY_LAST: u8 = 32;
pub const DAY_ODD: u8 = 33;
pub const DAY_EVEN: u8 = 34;
/// Month-field markers.
pub const MONTH_ODD: u8 = 13;
pub const MONTH_EVEN: u8 = 14;

/// The four date bytes exactly as they travel on the wire.
///
/// `year` is an offset from 1900. Weekday runs from 1 (Monday) to 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawDate {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub wday: u8,
}

impl RawDate {
    pub const WILDCARD: Self = Self::new(WILDCARD, WILDCARD, WILDCARD, WILDCARD);

    pub const fn new(year: u8, month: u8, day: u8, wday: u8) -> Self {
        Self {
            year,
            month,
            day,
            wday,
        }
    }

    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.year, self.month, self.day, self.wday]
    }

    pub const fn has_wildcard(&self) -> bool {
        self.year == WILDCARD
            || self.month == WILDCARD
            || self.day == WILDCARD
            || self.wday == WILDCARD
    }

    /// Checks every field against the ranges a device accepts.
    pub fn validate(&self) -> Result<(), EncodeError> {
        check_raw_field("month", self.month, 1, 14)?;
        check_raw_field("day", self.day, 1, 34)?;
        check_raw_field("wday", self.wday, 1, 7)
    }

    fn to_calendar(self) -> Option<NaiveDate> {
        if self.has_wildcard() || self.month > 12 || self.day > 31 {
            return None;
        }
        NaiveDate::from_ymd_opt(
            1900 + self.year as i32,
            self.month as u32,
            self.day as u32,
        )
    }
}

fn check_raw_field(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), EncodeError> {
    if value == WILDCARD || (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EncodeError::InvalidRawDate { field, value })
    }
}

/// Calendar projection of a BACnet date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarDate {
    /// The date is a pattern (some field is a wildcard or marker) or does not
    /// exist on the calendar.
    Zero,
    Date(NaiveDate),
}

impl CalendarDate {
    pub const fn as_naive(&self) -> Option<NaiveDate> {
        match self {
            Self::Zero => None,
            Self::Date(d) => Some(*d),
        }
    }
}

/// A decoded BACnet date: the calendar projection plus the raw bytes it came
/// from. Encoding always writes `raw`, so patterns survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    value: CalendarDate,
    raw: RawDate,
}

impl Date {
    /// The "unspecified" date. Encodes as `FF FF FF FF`.
    pub const ZERO: Self = Self {
        value: CalendarDate::Zero,
        raw: RawDate::WILDCARD,
    };

    /// Wraps wire bytes. Any wildcard, marker or impossible day collapses the
    /// calendar projection to [`CalendarDate::Zero`].
    pub fn from_raw(raw: RawDate) -> Self {
        let value = raw
            .to_calendar()
            .map_or(CalendarDate::Zero, CalendarDate::Date);
        Self { value, raw }
    }

    /// Builds the wire form of a real calendar date.
    ///
    /// Years from 1900 through 2154 are stored as an offset. Years below 256
    /// are taken to already be an offset and stored as is.
    pub fn from_calendar(date: NaiveDate) -> Result<Self, EncodeError> {
        let year = date.year();
        let offset = if (1900..=2154).contains(&year) {
            year - 1900
        } else if (0..=254).contains(&year) {
            year
        } else {
            return Err(EncodeError::InvalidYear(year));
        };
        let raw = RawDate::new(
            offset as u8,
            date.month() as u8,
            date.day() as u8,
            date.weekday().number_from_monday() as u8,
        );
        Ok(Self::from_raw(raw))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, EncodeError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            EncodeError::payload(format!("invalid calendar date {year}-{month}-{day}"))
        })?;
        Self::from_calendar(date)
    }

    pub const fn value(&self) -> CalendarDate {
        self.value
    }

    pub const fn raw(&self) -> RawDate {
        self.raw
    }

    pub const fn is_zero(&self) -> bool {
        matches!(self.value, CalendarDate::Zero)
    }
}

/// The ways a caller can hand a date to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Concrete(NaiveDate),
    Raw(RawDate),
    Wrapped(Date),
}

impl DateInput {
    pub const ZERO: Self = Self::Wrapped(Date::ZERO);

    /// Validates and converts to the form that goes on the wire.
    pub fn resolve(self) -> Result<Date, EncodeError> {
        let date = match self {
            Self::Concrete(d) => Date::from_calendar(d)?,
            Self::Raw(raw) => Date::from_raw(raw),
            Self::Wrapped(d) => d,
        };
        date.raw.validate()?;
        Ok(date)
    }
}

impl From<Date> for DateInput {
    fn from(value: Date) -> Self {
        Self::Wrapped(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Concrete(value)
    }
}

impl From<RawDate> for DateInput {
    fn from(value: RawDate) -> Self {
        Self::Raw(value)
    }
}

/// BACnet time of day. Any field may be [`WILDCARD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

impl Time {
    pub const WILDCARD: Self = Self::new(WILDCARD, WILDCARD, WILDCARD, WILDCARD);

    pub const fn new(hour: u8, minute: u8, second: u8, hundredths: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            hundredths,
        }
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        let hundredths = (time.nanosecond() / 10_000_000).min(99);
        Self::new(
            time.hour() as u8,
            time.minute() as u8,
            time.second() as u8,
            hundredths as u8,
        )
    }

    pub fn to_naive(&self) -> Option<NaiveTime> {
        if self.has_wildcard() {
            return None;
        }
        NaiveTime::from_hms_milli_opt(
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
            self.hundredths as u32 * 10,
        )
    }

    pub const fn has_wildcard(&self) -> bool {
        self.hour == WILDCARD
            || self.minute == WILDCARD
            || self.second == WILDCARD
            || self.hundredths == WILDCARD
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.hour, self.minute, self.second, self.hundredths]
    }

    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

/// Combines a date and a time when both are concrete.
pub fn to_naive_date_time(date: &Date, time: &Time) -> Option<NaiveDateTime> {
    Some(date.value().as_naive()?.and_time(time.to_naive()?))
}
