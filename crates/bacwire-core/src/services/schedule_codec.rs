//! Schedule and calendar structures: weekly schedules, exception schedules
//! (special events), effective periods and calendar date lists.
//!
//! Encoders check their whole input before the first byte is written and run
//! inside [`Writer::transaction`], so a rejected payload leaves the buffer
//! as it was.

use crate::encoding::{
    primitives::{
        decode_app_time, decode_date, decode_unsigned, encode_app_date, encode_app_time,
        encode_closing_tag, encode_ctx_date, encode_ctx_object_id, encode_ctx_unsigned,
        encode_opening_tag,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::services::value_codec::{decode_application_data, encode_application_data, DecodeContext};
use crate::services::expect_closing;
use crate::types::{
    CalendarEntry, CalendarEntryInput, Date, DateInput, DateRange, ObjectId, SpecialEvent,
    SpecialEventInput, SpecialEventPeriod, SpecialEventPeriodInput, TimeValue, WeekNDay,
};
use crate::{DecodeError, EncodeError};

pub const DAYS_PER_WEEK: usize = 7;

pub fn encode_weekly_schedule(
    w: &mut Writer<'_>,
    days: &[Vec<TimeValue>],
) -> Result<(), EncodeError> {
    if days.len() != DAYS_PER_WEEK {
        return Err(EncodeError::payload(format!(
            "weekly schedule should have exactly 7 days, got {}",
            days.len()
        )));
    }
    w.transaction(|w| {
        for day in days {
            encode_opening_tag(w, 0)?;
            encode_time_values(w, day)?;
            encode_closing_tag(w, 0)?;
        }
        Ok(())
    })
}

pub fn encode_exception_schedule(
    w: &mut Writer<'_>,
    events: &[SpecialEventInput],
) -> Result<(), EncodeError> {
    let resolved = events
        .iter()
        .map(resolve_special_event)
        .collect::<Result<Vec<_>, _>>()?;
    w.transaction(|w| {
        for (event, (period, priority)) in events.iter().zip(resolved) {
            match period {
                SpecialEventPeriod::Entry(entry) => {
                    encode_opening_tag(w, 0)?;
                    encode_calendar_entry(w, &entry)?;
                    encode_closing_tag(w, 0)?;
                }
                SpecialEventPeriod::CalendarReference(id) => {
                    encode_ctx_object_id(w, 1, id.raw())?;
                }
            }
            encode_opening_tag(w, 2)?;
            encode_time_values(w, &event.events)?;
            encode_closing_tag(w, 2)?;
            encode_ctx_unsigned(w, 3, priority as u32)?;
        }
        Ok(())
    })
}

pub fn encode_effective_period(w: &mut Writer<'_>, dates: &[DateInput]) -> Result<(), EncodeError> {
    let [start, end] = dates else {
        return Err(EncodeError::payload(format!(
            "effective period should have a length of 2, got {}",
            dates.len()
        )));
    };
    let range = DateRange {
        start: start.resolve()?,
        end: end.resolve()?,
    };
    w.transaction(|w| encode_date_range(w, &range))
}

pub fn encode_calendar_date_list(
    w: &mut Writer<'_>,
    entries: &[CalendarEntryInput],
) -> Result<(), EncodeError> {
    let resolved = entries
        .iter()
        .map(|e| resolve_calendar_entry(e, "calendar date list"))
        .collect::<Result<Vec<_>, _>>()?;
    w.transaction(|w| {
        for entry in &resolved {
            encode_calendar_entry(w, entry)?;
        }
        Ok(())
    })
}

/// Two application-tagged dates.
pub(crate) fn encode_date_range(w: &mut Writer<'_>, range: &DateRange) -> Result<(), EncodeError> {
    encode_app_date(w, &range.start)?;
    encode_app_date(w, &range.end)
}

/// BACnetCalendarEntry: `[0]` date, `[1]` date range, `[2]` week-n-day.
pub(crate) fn encode_calendar_entry(
    w: &mut Writer<'_>,
    entry: &CalendarEntry,
) -> Result<(), EncodeError> {
    match entry {
        CalendarEntry::Date(date) => encode_ctx_date(w, 0, date),
        CalendarEntry::Range(range) => {
            encode_opening_tag(w, 1)?;
            encode_date_range(w, range)?;
            encode_closing_tag(w, 1)
        }
        CalendarEntry::WeekNDay(pattern) => {
            pattern.validate()?;
            Tag::Context { tag_num: 2, len: 3 }.encode(w)?;
            w.write_all(&pattern.to_bytes())
        }
    }
}

fn encode_time_values(w: &mut Writer<'_>, values: &[TimeValue]) -> Result<(), EncodeError> {
    for tv in values {
        encode_app_time(w, &tv.time)?;
        encode_application_data(w, &tv.value)?;
    }
    Ok(())
}

fn resolve_calendar_entry(
    input: &CalendarEntryInput,
    owner: &str,
) -> Result<CalendarEntry, EncodeError> {
    match input {
        CalendarEntryInput::Date(date) => Ok(CalendarEntry::Date(date.resolve()?)),
        CalendarEntryInput::Range(dates) => match dates.as_slice() {
            [start, end] => Ok(CalendarEntry::Range(DateRange {
                start: start.resolve()?,
                end: end.resolve()?,
            })),
            _ => Err(EncodeError::payload(format!(
                "{owner} date range must have exactly 2 dates, got {}",
                dates.len()
            ))),
        },
        CalendarEntryInput::WeekNDay(pattern) => {
            pattern.validate()?;
            Ok(CalendarEntry::WeekNDay(*pattern))
        }
    }
}

fn resolve_special_event(
    input: &SpecialEventInput,
) -> Result<(SpecialEventPeriod, u8), EncodeError> {
    let period = match &input.period {
        SpecialEventPeriodInput::Entry(entry) => {
            SpecialEventPeriod::Entry(resolve_calendar_entry(entry, "exception schedule")?)
        }
        SpecialEventPeriodInput::CalendarReference(id) => SpecialEventPeriod::CalendarReference(*id),
    };
    let priority = match input.priority {
        Some(p @ 1..=16) => p as u8,
        Some(p) => {
            return Err(EncodeError::OutOfRange {
                field: "exception schedule priority",
                value: p as i64,
                min: 1,
                max: 16,
            })
        }
        None => {
            return Err(EncodeError::payload(
                "exception schedule priority must be between 1 and 16",
            ))
        }
    };
    Ok((period, priority))
}

/// Reads day lists (`[0] (time value)* [0]`) until something else follows.
/// Decodes the seven day lists of a weekly schedule. Any other number of
/// `[0]` lists is `InvalidValue`; an eighth list is not consumed.
pub fn decode_weekly_schedule(r: &mut Reader<'_>) -> Result<Vec<Vec<TimeValue>>, DecodeError> {
    let mut days = Vec::with_capacity(DAYS_PER_WEEK);
    while !r.is_empty() && Tag::peek(r)?.is_opening(0) {
        if days.len() == DAYS_PER_WEEK {
            return Err(DecodeError::InvalidValue);
        }
        Tag::decode(r)?;
        days.push(decode_time_values(r, 0)?);
    }
    if days.len() != DAYS_PER_WEEK {
        return Err(DecodeError::InvalidValue);
    }
    Ok(days)
}

pub fn decode_exception_schedule(r: &mut Reader<'_>) -> Result<Vec<SpecialEvent>, DecodeError> {
    let mut events = Vec::new();
    while !r.is_empty() {
        let period = match Tag::peek(r)? {
            Tag::Opening { tag_num: 0 } => {
                Tag::decode(r)?;
                let entry = decode_calendar_entry(r)?;
                expect_closing(r, 0)?;
                SpecialEventPeriod::Entry(entry)
            }
            Tag::Context { tag_num: 1, len } => {
                Tag::decode(r)?;
                SpecialEventPeriod::CalendarReference(ObjectId::from_raw(decode_unsigned(
                    r,
                    len as usize,
                )?))
            }
            _ => break,
        };
        match Tag::decode(r)? {
            Tag::Opening { tag_num: 2 } => {}
            _ => return Err(DecodeError::InvalidTag),
        }
        let list = decode_time_values(r, 2)?;
        let priority = match Tag::decode(r)? {
            Tag::Context { tag_num: 3, len }
            | Tag::Application {
                tag: AppTag::UnsignedInt,
                len,
            } => decode_unsigned(r, len as usize)?,
            _ => return Err(DecodeError::InvalidTag),
        };
        if !(1..=16).contains(&priority) {
            return Err(DecodeError::InvalidValue);
        }
        events.push(SpecialEvent {
            period,
            events: list,
            priority: priority as u8,
        });
    }
    Ok(events)
}

/// Two dates, application-tagged or context-tagged with length 4.
pub fn decode_effective_period(r: &mut Reader<'_>) -> Result<DateRange, DecodeError> {
    let start = decode_any_date(r)?;
    let end = decode_any_date(r)?;
    Ok(DateRange { start, end })
}

pub fn decode_calendar_date_list(r: &mut Reader<'_>) -> Result<Vec<CalendarEntry>, DecodeError> {
    let mut entries = Vec::new();
    while !r.is_empty() && is_calendar_entry_start(Tag::peek(r)?) {
        entries.push(decode_calendar_entry(r)?);
    }
    Ok(entries)
}

pub(crate) fn is_calendar_entry_start(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::Context { tag_num: 0, .. } | Tag::Opening { tag_num: 1 } | Tag::Context { tag_num: 2, .. }
    )
}

pub(crate) fn decode_calendar_entry(r: &mut Reader<'_>) -> Result<CalendarEntry, DecodeError> {
    match Tag::decode(r)? {
        Tag::Context { tag_num: 0, len } => Ok(CalendarEntry::Date(decode_date(r, len as usize)?)),
        Tag::Opening { tag_num: 1 } => {
            let range = decode_effective_period(r)?;
            expect_closing(r, 1)?;
            Ok(CalendarEntry::Range(range))
        }
        Tag::Context { tag_num: 2, len: 3 } => {
            let [month, week, wday] = r.read_array()?;
            Ok(CalendarEntry::WeekNDay(WeekNDay::new(month, week, wday)))
        }
        Tag::Context { tag_num: 2, .. } => Err(DecodeError::InvalidLength),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub(crate) fn is_date_tag(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::Application {
            tag: AppTag::Date,
            ..
        } | Tag::Context { len: 4, .. }
    )
}

fn decode_any_date(r: &mut Reader<'_>) -> Result<Date, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Date,
            len,
        }
        | Tag::Context { len, .. } => decode_date(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

fn decode_time_values(r: &mut Reader<'_>, closing: u8) -> Result<Vec<TimeValue>, DecodeError> {
    let mut out = Vec::new();
    loop {
        if Tag::peek(r)?.is_closing(closing) {
            Tag::decode(r)?;
            return Ok(out);
        }
        let time = decode_app_time(r)?;
        let value = decode_application_data(r, DecodeContext::NONE)?;
        out.push(TimeValue { time, value });
    }
}
