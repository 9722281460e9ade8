use crate::types::{DataValue, Date, DateInput, ObjectId, Time, WILDCARD};
use crate::EncodeError;

/// A recurring-day pattern: month (13/14 odd/even), week of month (6 means
/// the last seven days) and weekday, each possibly [`WILDCARD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekNDay {
    pub month: u8,
    pub week: u8,
    pub wday: u8,
}

impl WeekNDay {
    pub const WILDCARD: Self = Self::new(WILDCARD, WILDCARD, WILDCARD);

    pub const fn new(month: u8, week: u8, wday: u8) -> Self {
        Self { month, week, wday }
    }

    pub fn validate(&self) -> Result<(), EncodeError> {
        check_field("week-n-day month", self.month, 1, 14)?;
        check_field("week-n-day week", self.week, 1, 6)?;
        check_field("week-n-day wday", self.wday, 1, 7)
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.month, self.week, self.wday]
    }
}

fn check_field(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), EncodeError> {
    if value == WILDCARD || (min..=max).contains(&value) {
        return Ok(());
    }
    Err(EncodeError::OutOfRange {
        field,
        value: value as i64,
        min: min as i64,
        max: max as i64,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// One entry of a calendar date list or exception-schedule period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarEntry {
    Date(Date),
    Range(DateRange),
    WeekNDay(WeekNDay),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeValue {
    pub time: Time,
    pub value: DataValue,
}

impl TimeValue {
    pub fn new(time: Time, value: DataValue) -> Self {
        Self { time, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialEventPeriod {
    Entry(CalendarEntry),
    CalendarReference(ObjectId),
}

/// A decoded exception-schedule entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialEvent {
    pub period: SpecialEventPeriod,
    pub events: Vec<TimeValue>,
    pub priority: u8,
}

/// Encoder-side calendar entry. Date ranges are lists so a wrong number of
/// dates is reported instead of being impossible to express.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEntryInput {
    Date(DateInput),
    Range(Vec<DateInput>),
    WeekNDay(WeekNDay),
}

impl From<CalendarEntry> for CalendarEntryInput {
    fn from(value: CalendarEntry) -> Self {
        match value {
            CalendarEntry::Date(d) => Self::Date(d.into()),
            CalendarEntry::Range(r) => Self::Range(vec![r.start.into(), r.end.into()]),
            CalendarEntry::WeekNDay(w) => Self::WeekNDay(w),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecialEventPeriodInput {
    Entry(CalendarEntryInput),
    CalendarReference(ObjectId),
}

/// Encoder-side exception-schedule entry. `priority` must be present and
/// within 1 to 16.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialEventInput {
    pub period: SpecialEventPeriodInput,
    pub events: Vec<TimeValue>,
    pub priority: Option<u32>,
}

impl From<SpecialEvent> for SpecialEventInput {
    fn from(value: SpecialEvent) -> Self {
        let period = match value.period {
            SpecialEventPeriod::Entry(e) => SpecialEventPeriodInput::Entry(e.into()),
            SpecialEventPeriod::CalendarReference(id) => {
                SpecialEventPeriodInput::CalendarReference(id)
            }
        };
        Self {
            period,
            events: value.events,
            priority: Some(value.priority as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WeekNDay;
    use crate::EncodeError;

    #[test]
    fn week_n_day_ranges() {
        assert!(WeekNDay::new(2, 2, 2).validate().is_ok());
        assert!(WeekNDay::new(14, 6, 7).validate().is_ok());
        assert!(WeekNDay::WILDCARD.validate().is_ok());
        assert_eq!(
            WeekNDay::new(1, 7, 1).validate(),
            Err(EncodeError::OutOfRange {
                field: "week-n-day week",
                value: 7,
                min: 1,
                max: 6
            })
        );
        assert!(WeekNDay::new(0, 1, 1).validate().is_err());
        assert!(WeekNDay::new(1, 1, 0).validate().is_err());
    }
}
