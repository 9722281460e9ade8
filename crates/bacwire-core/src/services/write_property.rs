use crate::encoding::{
    primitives::{
        decode_unsigned, encode_closing_tag, encode_ctx_object_id, encode_ctx_unsigned,
        encode_opening_tag,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::schedule_codec::{
    encode_calendar_date_list, encode_effective_period, encode_exception_schedule,
    encode_weekly_schedule,
};
use crate::services::value_codec::{decode_value_list, encode_application_data, DecodeContext};
use crate::services::{
    check_priority, decode_optional_array_index, decode_required_ctx_object_id,
    decode_required_ctx_unsigned, encode_array_index, expect_opening, ConfirmedService,
    DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY,
};
use crate::types::{
    CalendarEntryInput, DataValue, DateInput, ObjectId, ObjectType, PropertyId,
    SpecialEventInput, TimeValue,
};
use crate::{DecodeError, EncodeError};

pub const SERVICE_WRITE_PROPERTY: u8 = 0x0F;

/// What goes between the `[3]` tags.
///
/// Schedule weekly/exception schedules, schedule effective periods and
/// calendar date lists are structures rather than value lists; they have
/// their own variants so the shape can be checked before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub enum WritePropertyValues {
    List(Vec<DataValue>),
    WeeklySchedule(Vec<Vec<TimeValue>>),
    ExceptionSchedule(Vec<SpecialEventInput>),
    EffectivePeriod(Vec<DateInput>),
    CalendarDateList(Vec<CalendarEntryInput>),
}

impl From<Vec<DataValue>> for WritePropertyValues {
    fn from(values: Vec<DataValue>) -> Self {
        Self::List(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Structure {
    WeeklySchedule,
    ExceptionSchedule,
    EffectivePeriod,
    CalendarDateList,
}

impl Structure {
    fn of(object_type: ObjectType, property_id: PropertyId) -> Option<Self> {
        match (object_type, property_id) {
            (ObjectType::Schedule, PropertyId::WeeklySchedule) => Some(Self::WeeklySchedule),
            (ObjectType::Schedule, PropertyId::ExceptionSchedule) => Some(Self::ExceptionSchedule),
            (ObjectType::Schedule, PropertyId::EffectivePeriod) => Some(Self::EffectivePeriod),
            (ObjectType::Calendar, PropertyId::DateList) => Some(Self::CalendarDateList),
            _ => None,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::WeeklySchedule => "weekly schedule",
            Self::ExceptionSchedule => "exception schedule values",
            Self::EffectivePeriod => "effective period",
            Self::CalendarDateList => "calendar date list",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritePropertyRequest {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    /// `None` and [`BACNET_ARRAY_ALL`](crate::services::BACNET_ARRAY_ALL) both
    /// leave the index out.
    pub array_index: Option<u32>,
    pub values: WritePropertyValues,
    /// 1 to 16. Decoded requests without a priority carry 16.
    pub priority: Option<u8>,
}

impl WritePropertyRequest {
    pub fn new(object_id: ObjectId, property_id: PropertyId, values: impl Into<WritePropertyValues>) -> Self {
        Self {
            object_id,
            property_id,
            array_index: None,
            values: values.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_array_index(mut self, array_index: u32) -> Self {
        self.array_index = Some(array_index);
        self
    }

    fn encode_values(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let structure = Structure::of(self.object_id.object_type(), self.property_id);
        match (structure, &self.values) {
            (None, WritePropertyValues::List(values)) => {
                for value in values {
                    encode_application_data(w, value)?;
                }
                Ok(())
            }
            (None, _) => Err(EncodeError::payload(format!(
                "structured values cannot be written to {:?} {:?}",
                self.object_id.object_type(),
                self.property_id
            ))),
            (Some(Structure::WeeklySchedule), WritePropertyValues::WeeklySchedule(days)) => {
                encode_weekly_schedule(w, days)
            }
            (Some(Structure::ExceptionSchedule), WritePropertyValues::ExceptionSchedule(events)) => {
                encode_exception_schedule(w, events)
            }
            (Some(Structure::EffectivePeriod), WritePropertyValues::EffectivePeriod(dates)) => {
                encode_effective_period(w, dates)
            }
            (Some(Structure::CalendarDateList), WritePropertyValues::CalendarDateList(entries)) => {
                encode_calendar_date_list(w, entries)
            }
            (Some(structure), WritePropertyValues::List(values)) => {
                encode_decoded_structure(w, structure, values)
            }
            (Some(structure), _) => Err(EncodeError::payload(format!(
                "{} should be an array",
                structure.label()
            ))),
        }
    }
}

/// Accepts the value list a read of the same property produced.
fn encode_decoded_structure(
    w: &mut Writer<'_>,
    structure: Structure,
    values: &[DataValue],
) -> Result<(), EncodeError> {
    match (structure, values) {
        (Structure::WeeklySchedule, [DataValue::WeeklySchedule(days)]) => {
            encode_weekly_schedule(w, days)
        }
        (Structure::ExceptionSchedule, [DataValue::SpecialEvents(events)]) => {
            let events: Vec<SpecialEventInput> = events.iter().cloned().map(Into::into).collect();
            encode_exception_schedule(w, &events)
        }
        (Structure::EffectivePeriod, [DataValue::DateRange(range)]) => {
            encode_effective_period(w, &[range.start.into(), range.end.into()])
        }
        (Structure::CalendarDateList, [DataValue::CalendarEntries(entries)]) => {
            let entries: Vec<CalendarEntryInput> = entries.iter().copied().map(Into::into).collect();
            encode_calendar_date_list(w, &entries)
        }
        _ => Err(EncodeError::payload(format!(
            "{} should be an array",
            structure.label()
        ))),
    }
}

impl ConfirmedService for WritePropertyRequest {
    const NAME: &'static str = "WriteProperty";
    const SERVICE_CHOICE: u8 = SERVICE_WRITE_PROPERTY;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        check_priority(self.priority)?;
        w.transaction(|w| {
            encode_ctx_object_id(w, 0, self.object_id.raw())?;
            encode_ctx_unsigned(w, 1, self.property_id.to_u32())?;
            encode_array_index(w, 2, self.array_index)?;
            encode_opening_tag(w, 3)?;
            self.encode_values(w)?;
            encode_closing_tag(w, 3)?;
            if let Some(priority) = self.priority {
                encode_ctx_unsigned(w, 4, priority as u32)?;
            }
            Ok(())
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_array_index(r, 2)?;
        expect_opening(r, 3)?;
        let values = decode_value_list(r, 3, DecodeContext::for_object(object_id, property_id))?;

        let mut priority = DEFAULT_PRIORITY;
        if !r.is_empty() {
            if let Tag::Context { tag_num: 4, len } = Tag::peek(r)? {
                Tag::decode(r)?;
                let p = decode_unsigned(r, len as usize)?;
                if !(MIN_PRIORITY as u32..=MAX_PRIORITY as u32).contains(&p) {
                    return Err(DecodeError::InvalidValue);
                }
                priority = p as u8;
            }
        }

        Ok(Self {
            object_id,
            property_id,
            array_index,
            values: WritePropertyValues::List(values),
            priority: Some(priority),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apdu::ConfirmedRequestHeader;
    use crate::types::{Date, Time, WeekNDay};

    fn encode(req: &WritePropertyRequest) -> Result<Vec<u8>, EncodeError> {
        let mut buf = [0u8; 256];
        let mut w = Writer::new(&mut buf);
        req.encode(&mut w)?;
        Ok(w.as_written().to_vec())
    }

    fn decode(bytes: &[u8]) -> WritePropertyRequest {
        let mut r = Reader::new(bytes);
        let req = WritePropertyRequest::decode(&mut r).unwrap();
        assert!(r.is_empty());
        req
    }

    #[test]
    fn encode_write_property_with_character_string() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::AnalogValue, 3),
            PropertyId::Description,
            vec![DataValue::character_string("loop tuning pending")],
        );

        let mut buf = [0u8; 256];
        let mut w = Writer::new(&mut buf);
        req.encode_request(4, &mut w).unwrap();

        let mut r = Reader::new(w.as_written());
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(hdr.service_choice, SERVICE_WRITE_PROPERTY);
        assert_eq!(hdr.invoke_id, 4);
        let got = WritePropertyRequest::decode(&mut r).unwrap();
        assert_eq!(got.values, req.values);
        assert_eq!(got.priority, Some(16));
    }

    #[test]
    fn present_value_bytes() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::AnalogValue, 1),
            PropertyId::PresentValue,
            vec![DataValue::Real(21.5)],
        )
        .with_priority(8);
        assert_eq!(
            encode(&req).unwrap(),
            vec![
                0x0C, 0x00, 0x80, 0x00, 0x01, 0x19, 0x55, 0x3E, 0x44, 0x41, 0xAC, 0x00, 0x00,
                0x3F, 0x49, 0x08
            ]
        );
    }

    #[test]
    fn priority_bounds() {
        let base = WritePropertyRequest::new(
            ObjectId::new(ObjectType::AnalogValue, 1),
            PropertyId::PresentValue,
            vec![DataValue::Unsigned(1)],
        );
        for p in [1u8, 16] {
            let got = decode(&encode(&base.clone().with_priority(p)).unwrap());
            assert_eq!(got.priority, Some(p));
        }
        for p in [0u8, 17] {
            let err = encode(&base.clone().with_priority(p)).unwrap_err();
            assert!(err.to_string().contains("priority"), "{err}");
        }
    }

    #[test]
    fn out_of_range_priority_on_the_wire_is_malformed() {
        let bytes = [0x0C, 0x00, 0x80, 0x00, 0x01, 0x19, 0x55, 0x3E, 0x00, 0x3F, 0x49, 0x11];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            WritePropertyRequest::decode(&mut r),
            Err(DecodeError::InvalidValue)
        );
    }

    #[test]
    fn array_all_leaves_the_index_out() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::AnalogValue, 1),
            PropertyId::PriorityArray,
            vec![DataValue::Null],
        )
        .with_array_index(crate::services::BACNET_ARRAY_ALL);
        let bytes = encode(&req).unwrap();
        assert_eq!(bytes[7], 0x3E);
        assert_eq!(decode(&bytes).array_index, None);

        let bytes = encode(&req.with_array_index(5)).unwrap();
        assert_eq!(&bytes[7..9], &[0x29, 0x05]);
        assert_eq!(decode(&bytes).array_index, Some(5));
    }

    #[test]
    fn weekly_schedule_write_decodes_with_property_context() {
        let mut days = vec![Vec::new(); 7];
        days[0].push(TimeValue::new(Time::new(4, 30, 0, 0), DataValue::Unsigned(2)));
        days[6].push(TimeValue::new(Time::new(13, 15, 0, 0), DataValue::Unsigned(1)));
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::Schedule, 1),
            PropertyId::WeeklySchedule,
            WritePropertyValues::WeeklySchedule(days.clone()),
        );
        let got = decode(&encode(&req).unwrap());
        assert_eq!(
            got.values,
            WritePropertyValues::List(vec![DataValue::WeeklySchedule(days)])
        );
        // A decoded request can be written back unchanged.
        assert_eq!(encode(&got).unwrap()[..], encode(&req.with_priority(16)).unwrap()[..]);
    }

    #[test]
    fn weekly_schedule_rejects_eight_days() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::Schedule, 1),
            PropertyId::WeeklySchedule,
            WritePropertyValues::WeeklySchedule(vec![Vec::new(); 8]),
        );
        let err = encode(&req).unwrap_err();
        assert!(err.to_string().contains("exactly 7 days"));
    }

    #[test]
    fn structured_property_needs_structured_values() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::Schedule, 1),
            PropertyId::WeeklySchedule,
            vec![DataValue::Unsigned(1)],
        );
        let err = encode(&req).unwrap_err();
        assert_eq!(err.to_string(), "could not encode: weekly schedule should be an array");

        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::AnalogValue, 1),
            PropertyId::PresentValue,
            WritePropertyValues::EffectivePeriod(vec![DateInput::ZERO, DateInput::ZERO]),
        );
        assert!(encode(&req).is_err());
    }

    #[test]
    fn effective_period_write() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::Schedule, 2),
            PropertyId::EffectivePeriod,
            WritePropertyValues::EffectivePeriod(vec![
                Date::from_ymd(2024, 1, 1).unwrap().into(),
                DateInput::ZERO,
            ]),
        );
        let bytes = encode(&req).unwrap();
        assert_eq!(
            &bytes[7..],
            &[0x3E, 0xA4, 124, 1, 1, 1, 0xA4, 0xFF, 0xFF, 0xFF, 0xFF, 0x3F]
        );
        let err = encode(&WritePropertyRequest::new(
            ObjectId::new(ObjectType::Schedule, 2),
            PropertyId::EffectivePeriod,
            WritePropertyValues::EffectivePeriod(vec![DateInput::ZERO; 3]),
        ))
        .unwrap_err();
        assert!(err.to_string().contains("should have a length of 2"));
    }

    #[test]
    fn calendar_date_list_write() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::Calendar, 1),
            PropertyId::DateList,
            WritePropertyValues::CalendarDateList(vec![
                CalendarEntryInput::WeekNDay(WeekNDay::new(0xFF, 3, 2)),
            ]),
        );
        let bytes = encode(&req).unwrap();
        assert_eq!(&bytes[7..], &[0x3E, 0x2B, 0xFF, 0x03, 0x02, 0x3F]);
    }

    #[test]
    fn failed_write_leaves_buffer_untouched() {
        let req = WritePropertyRequest::new(
            ObjectId::new(ObjectType::Calendar, 1),
            PropertyId::DateList,
            WritePropertyValues::CalendarDateList(vec![CalendarEntryInput::Range(vec![
                DateInput::ZERO,
            ])]),
        );
        let mut buf = [0u8; 64];
        let mut w = Writer::new(&mut buf);
        assert!(req.encode_request(1, &mut w).is_err());
        assert_eq!(w.position(), 0);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
