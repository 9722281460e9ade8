//! Application-data codec: one [`DataValue`] at a time, including the
//! composite shapes whose layout depends on the object type and property
//! they belong to.

use crate::encoding::{
    primitives::{
        decode_bit_string, decode_character_string, decode_date, decode_double, decode_real,
        decode_signed, decode_time, decode_unsigned, encode_app_bit_string, encode_app_boolean,
        encode_app_character_string, encode_app_date, encode_app_double, encode_app_enumerated,
        encode_app_null, encode_app_object_id, encode_app_octet_string, encode_app_real,
        encode_app_signed, encode_app_time, encode_app_unsigned, encode_closing_tag,
        encode_ctx_object_id, encode_ctx_unsigned, encode_opening_tag,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::services::schedule_codec::{
    decode_calendar_date_list, decode_effective_period, decode_exception_schedule,
    decode_weekly_schedule, encode_calendar_entry, encode_date_range, encode_exception_schedule,
    encode_weekly_schedule, is_calendar_entry_start, is_date_tag,
};
use crate::services::error::{decode_service_error, encode_service_error};
use crate::services::{
    decode_optional_ctx_unsigned, decode_required_ctx_object_id, decode_required_ctx_unsigned,
    expect_closing, expect_opening,
};
use crate::types::{
    DataValue, DeviceObjectReference, ObjectId, ObjectType, PropertyAccess, PropertyId,
    PropertyResult, ReadAccessResult, SpecialEventInput, WeekNDay,
};
use crate::{DecodeError, EncodeError};

/// The object type and property a value belongs to. Some properties put
/// structures on the wire that only make sense with this knowledge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeContext {
    pub object_type: Option<ObjectType>,
    pub property_id: Option<PropertyId>,
}

impl DecodeContext {
    pub const NONE: Self = Self {
        object_type: None,
        property_id: None,
    };

    pub const fn new(object_type: ObjectType, property_id: PropertyId) -> Self {
        Self {
            object_type: Some(object_type),
            property_id: Some(property_id),
        }
    }

    pub const fn for_object(object_id: ObjectId, property_id: PropertyId) -> Self {
        Self::new(object_id.object_type(), property_id)
    }
}

/// Encodes one value. On error nothing is left in `w`.
pub fn encode_application_data(w: &mut Writer<'_>, value: &DataValue) -> Result<(), EncodeError> {
    w.transaction(|w| encode_value(w, value))
}

fn encode_value(w: &mut Writer<'_>, value: &DataValue) -> Result<(), EncodeError> {
    match value {
        DataValue::Null => encode_app_null(w),
        DataValue::Boolean(v) => encode_app_boolean(w, *v),
        DataValue::Unsigned(v) => encode_app_unsigned(w, *v),
        DataValue::Signed(v) => encode_app_signed(w, *v),
        DataValue::Real(v) => encode_app_real(w, *v),
        DataValue::Double(v) => encode_app_double(w, *v),
        DataValue::OctetString(v) => encode_app_octet_string(w, v),
        DataValue::CharacterString(v) => encode_app_character_string(w, v),
        DataValue::BitString(v) => encode_app_bit_string(w, v),
        DataValue::Enumerated(v) => encode_app_enumerated(w, *v),
        DataValue::Date(v) => encode_app_date(w, v),
        DataValue::Time(v) => encode_app_time(w, v),
        DataValue::ObjectId(v) => encode_app_object_id(w, v.raw()),
        DataValue::DateRange(v) => encode_date_range(w, v),
        DataValue::WeekNDay(v) => encode_week_n_day(w, v),
        DataValue::WeeklySchedule(days) => encode_weekly_schedule(w, days),
        DataValue::SpecialEvents(events) => {
            let inputs: Vec<SpecialEventInput> = events.iter().cloned().map(Into::into).collect();
            encode_exception_schedule(w, &inputs)
        }
        DataValue::CalendarEntries(entries) => {
            for entry in entries {
                encode_calendar_entry(w, entry)?;
            }
            Ok(())
        }
        DataValue::DeviceObjectReference(v) => encode_device_object_reference(w, v),
        DataValue::Error(v) => encode_service_error(w, v),
        DataValue::ReadAccessResult(v) => encode_read_access_result(w, v),
        DataValue::Constructed { tag_num, values } => {
            encode_opening_tag(w, *tag_num)?;
            for child in values {
                encode_value(w, child)?;
            }
            encode_closing_tag(w, *tag_num)
        }
        DataValue::ContextSpecific { tag_num, data } => {
            let len = u32::try_from(data.len()).map_err(|_| EncodeError::ValueOutOfRange)?;
            Tag::Context {
                tag_num: *tag_num,
                len,
            }
            .encode(w)?;
            w.write_all(data)
        }
    }
}

fn encode_week_n_day(w: &mut Writer<'_>, value: &WeekNDay) -> Result<(), EncodeError> {
    value.validate()?;
    Tag::Application {
        tag: AppTag::WeekNDay,
        len: 3,
    }
    .encode(w)?;
    w.write_all(&value.to_bytes())
}

/// `[0]` device (optional) then `[1]` object.
pub fn encode_device_object_reference(
    w: &mut Writer<'_>,
    value: &DeviceObjectReference,
) -> Result<(), EncodeError> {
    if let Some(device) = value.device_id {
        encode_ctx_object_id(w, 0, device.raw())?;
    }
    encode_ctx_object_id(w, 1, value.object_id.raw())
}

pub fn decode_device_object_reference(
    r: &mut Reader<'_>,
) -> Result<DeviceObjectReference, DecodeError> {
    let device_id = match Tag::peek(r)? {
        Tag::Context { tag_num: 0, .. } => Some(decode_required_ctx_object_id(r, 0)?),
        _ => None,
    };
    let object_id = decode_required_ctx_object_id(r, 1)?;
    Ok(DeviceObjectReference {
        device_id,
        object_id,
    })
}

pub fn encode_read_access_result(
    w: &mut Writer<'_>,
    value: &ReadAccessResult,
) -> Result<(), EncodeError> {
    encode_ctx_object_id(w, 0, value.object_id.raw())?;
    encode_opening_tag(w, 1)?;
    for result in &value.results {
        encode_ctx_unsigned(w, 2, result.property_id.to_u32())?;
        if let Some(index) = result.array_index {
            encode_ctx_unsigned(w, 3, index)?;
        }
        match &result.access {
            PropertyAccess::Values(values) => {
                encode_opening_tag(w, 4)?;
                for v in values {
                    encode_value(w, v)?;
                }
                encode_closing_tag(w, 4)?;
            }
            PropertyAccess::Error(err) => {
                encode_opening_tag(w, 5)?;
                encode_service_error(w, err)?;
                encode_closing_tag(w, 5)?;
            }
        }
    }
    encode_closing_tag(w, 1)
}

pub fn decode_read_access_result(r: &mut Reader<'_>) -> Result<ReadAccessResult, DecodeError> {
    let object_id = decode_required_ctx_object_id(r, 0)?;
    expect_opening(r, 1)?;
    let mut results = Vec::new();
    loop {
        if Tag::peek(r)?.is_closing(1) {
            Tag::decode(r)?;
            break;
        }
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 2)?);
        let array_index = decode_optional_ctx_unsigned(r, 3)?;
        let access = match Tag::decode(r)? {
            Tag::Opening { tag_num: 4 } => PropertyAccess::Values(decode_value_list(
                r,
                4,
                DecodeContext::for_object(object_id, property_id),
            )?),
            Tag::Opening { tag_num: 5 } => {
                let err = decode_service_error(r)?;
                expect_closing(r, 5)?;
                PropertyAccess::Error(err)
            }
            _ => return Err(DecodeError::InvalidTag),
        };
        results.push(PropertyResult {
            property_id,
            array_index,
            access,
        });
    }
    Ok(ReadAccessResult { object_id, results })
}

/// Deepest run of nested opening tags a constructed value may contain.
pub const MAX_NESTING: usize = 32;

/// Decodes one value, picking a structured decoder when `ctx` names a
/// property with a known composite layout.
pub fn decode_application_data(
    r: &mut Reader<'_>,
    ctx: DecodeContext,
) -> Result<DataValue, DecodeError> {
    decode_value_at(r, ctx, 0)
}

fn decode_value_at(
    r: &mut Reader<'_>,
    ctx: DecodeContext,
    depth: usize,
) -> Result<DataValue, DecodeError> {
    let next = Tag::peek(r)?;
    match (ctx.object_type, ctx.property_id) {
        (Some(ObjectType::Schedule), Some(PropertyId::WeeklySchedule)) if next.is_opening(0) => {
            // A single day (an indexed read) or a partial week stays generic.
            let mut week = *r;
            if let Ok(days) = decode_weekly_schedule(&mut week) {
                *r = week;
                return Ok(DataValue::WeeklySchedule(days));
            }
        }
        (Some(ObjectType::Schedule), Some(PropertyId::ExceptionSchedule))
            if next.is_opening(0) || matches!(next, Tag::Context { tag_num: 1, .. }) =>
        {
            return Ok(DataValue::SpecialEvents(decode_exception_schedule(r)?));
        }
        (Some(ObjectType::Schedule), Some(PropertyId::EffectivePeriod)) if is_date_tag(next) => {
            return Ok(DataValue::DateRange(decode_effective_period(r)?));
        }
        (Some(ObjectType::Calendar), Some(PropertyId::DateList))
            if is_calendar_entry_start(next) =>
        {
            return Ok(DataValue::CalendarEntries(decode_calendar_date_list(r)?));
        }
        (Some(ObjectType::StructuredView), Some(PropertyId::SubordinateList))
            if matches!(next, Tag::Context { tag_num: 0 | 1, .. }) =>
        {
            return Ok(DataValue::DeviceObjectReference(
                decode_device_object_reference(r)?,
            ));
        }
        _ => {}
    }
    let tag = Tag::decode(r)?;
    decode_from_tag_at(r, tag, ctx, depth)
}

/// Decodes the payload of an already-read tag.
pub fn decode_application_data_from_tag(
    r: &mut Reader<'_>,
    tag: Tag,
    ctx: DecodeContext,
) -> Result<DataValue, DecodeError> {
    decode_from_tag_at(r, tag, ctx, 0)
}

fn decode_from_tag_at(
    r: &mut Reader<'_>,
    tag: Tag,
    ctx: DecodeContext,
    depth: usize,
) -> Result<DataValue, DecodeError> {
    match tag {
        Tag::Application { tag, len } => decode_application_payload(r, tag, len as usize),
        Tag::Opening { tag_num } => Ok(DataValue::Constructed {
            tag_num,
            values: decode_list_at(r, tag_num, ctx, depth + 1)?,
        }),
        Tag::Context { tag_num, len } => Ok(DataValue::ContextSpecific {
            tag_num,
            data: r.read_exact(len as usize)?.to_vec(),
        }),
        Tag::Closing { .. } => Err(DecodeError::InvalidTag),
    }
}

fn decode_application_payload(
    r: &mut Reader<'_>,
    tag: AppTag,
    len: usize,
) -> Result<DataValue, DecodeError> {
    Ok(match tag {
        AppTag::Null => DataValue::Null,
        AppTag::Boolean => DataValue::Boolean(len != 0),
        AppTag::UnsignedInt => DataValue::Unsigned(decode_unsigned(r, len)?),
        AppTag::SignedInt => DataValue::Signed(decode_signed(r, len)?),
        AppTag::Real => DataValue::Real(decode_real(r, len)?),
        AppTag::Double => DataValue::Double(decode_double(r, len)?),
        AppTag::OctetString => DataValue::OctetString(r.read_exact(len)?.to_vec()),
        AppTag::CharacterString => DataValue::CharacterString(decode_character_string(r, len)?),
        AppTag::BitString => DataValue::BitString(decode_bit_string(r, len)?),
        AppTag::Enumerated => DataValue::Enumerated(decode_unsigned(r, len)?),
        AppTag::Date => DataValue::Date(decode_date(r, len)?),
        AppTag::Time => DataValue::Time(decode_time(r, len)?),
        AppTag::ObjectId => {
            if len != 4 {
                return Err(DecodeError::InvalidLength);
            }
            DataValue::ObjectId(ObjectId::from_raw(r.read_be_u32()?))
        }
        AppTag::WeekNDay => {
            let b = r.read_exact(len)?;
            match b {
                [month, week, wday] => DataValue::WeekNDay(WeekNDay::new(*month, *week, *wday)),
                // Some devices send other lengths; keep going with an all-wildcard pattern.
                _ => DataValue::WeekNDay(WeekNDay::WILDCARD),
            }
        }
        AppTag::Other(_) => return Err(DecodeError::Unsupported),
    })
}

/// Decodes values up to and including the closing tag `closing_tag`.
///
/// Constructed values inside the list may nest at most [`MAX_NESTING`]
/// levels deep.
pub fn decode_value_list(
    r: &mut Reader<'_>,
    closing_tag: u8,
    ctx: DecodeContext,
) -> Result<Vec<DataValue>, DecodeError> {
    decode_list_at(r, closing_tag, ctx, 0)
}

fn decode_list_at(
    r: &mut Reader<'_>,
    closing_tag: u8,
    ctx: DecodeContext,
    depth: usize,
) -> Result<Vec<DataValue>, DecodeError> {
    if depth > MAX_NESTING {
        return Err(DecodeError::NestingTooDeep { max: MAX_NESTING });
    }
    let mut values = Vec::new();
    while r.remaining() > 1 {
        if Tag::peek(r)?.is_closing(closing_tag) {
            break;
        }
        values.push(decode_value_at(r, ctx, depth)?);
    }
    expect_closing(r, closing_tag)?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BitString, Date, DateRange, ErrorClass, ErrorCode, RawDate, ServiceError, Time,
        TimeValue,
    };
    use proptest::prelude::*;

    fn roundtrip(value: &DataValue, ctx: DecodeContext) -> DataValue {
        let mut buf = [0u8; 512];
        let mut w = Writer::new(&mut buf);
        encode_application_data(&mut w, value).unwrap();
        let mut r = Reader::new(w.as_written());
        let got = decode_application_data(&mut r, ctx).unwrap();
        assert!(r.is_empty(), "{value:?} left {} bytes", r.remaining());
        got
    }

    #[test]
    fn primitive_values_roundtrip() {
        let values = [
            DataValue::Null,
            DataValue::Boolean(true),
            DataValue::Boolean(false),
            DataValue::Unsigned(123),
            DataValue::Signed(-123),
            DataValue::Real(12.5),
            DataValue::Double(42.25),
            DataValue::OctetString(vec![1, 2, 3]),
            DataValue::character_string("hello"),
            DataValue::BitString(BitString::new(3, vec![0b1010_0000])),
            DataValue::Enumerated(9),
            DataValue::Date(Date::from_ymd(2024, 2, 3).unwrap()),
            DataValue::Date(Date::ZERO),
            DataValue::Time(Time::new(1, 2, 3, 4)),
            DataValue::ObjectId(ObjectId::new(ObjectType::Device, 1)),
            DataValue::WeekNDay(WeekNDay::new(2, 2, 2)),
        ];
        for v in &values {
            assert_eq!(&roundtrip(v, DecodeContext::NONE), v);
        }
    }

    #[test]
    fn constructed_values_roundtrip() {
        let value = DataValue::Constructed {
            tag_num: 2,
            values: vec![
                DataValue::Unsigned(42),
                DataValue::character_string("test"),
                DataValue::Constructed {
                    tag_num: 0,
                    values: vec![DataValue::Boolean(true), DataValue::Real(3.5)],
                },
                DataValue::ContextSpecific {
                    tag_num: 1,
                    data: vec![0x12, 0x34],
                },
            ],
        };
        assert_eq!(roundtrip(&value, DecodeContext::NONE), value);
    }

    #[test]
    fn week_n_day_with_wrong_length_decodes_as_wildcard() {
        let bytes = [0xF2, 101, 0x02, 0x03, 0x21, 0x07];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            decode_application_data(&mut r, DecodeContext::NONE).unwrap(),
            DataValue::WeekNDay(WeekNDay::WILDCARD)
        );
        assert_eq!(r.position(), 4);
        assert_eq!(
            decode_application_data(&mut r, DecodeContext::NONE).unwrap(),
            DataValue::Unsigned(7)
        );
    }

    #[test]
    fn week_n_day_encodes_with_pseudo_tag() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        encode_application_data(&mut w, &DataValue::WeekNDay(WeekNDay::new(0xFF, 3, 2))).unwrap();
        assert_eq!(w.as_written(), &[0xF3, 101, 0xFF, 3, 2]);
        let err = encode_application_data(&mut w, &DataValue::WeekNDay(WeekNDay::new(1, 9, 1)))
            .unwrap_err();
        assert!(err.to_string().contains("week-n-day week"));
        assert_eq!(w.position(), 5);
    }

    #[test]
    fn failed_encode_rolls_back_the_whole_value() {
        let value = DataValue::Constructed {
            tag_num: 3,
            values: vec![
                DataValue::Unsigned(1),
                DataValue::Date(Date::from_raw(RawDate::new(120, 0, 1, 1))),
            ],
        };
        let mut buf = [0u8; 32];
        let mut w = Writer::new(&mut buf);
        let err = encode_application_data(&mut w, &value).unwrap_err();
        assert_eq!(err.to_string(), "invalid raw date month: 0");
        assert_eq!(w.position(), 0);
    }

    #[test]
    fn closing_tag_is_not_a_value() {
        let mut r = Reader::new(&[0x3F]);
        assert_eq!(
            decode_application_data(&mut r, DecodeContext::NONE),
            Err(DecodeError::InvalidTag)
        );
    }

    #[test]
    fn unknown_application_tag_is_unsupported() {
        let mut r = Reader::new(&[0xF1, 50, 0]);
        assert_eq!(
            decode_application_data(&mut r, DecodeContext::NONE),
            Err(DecodeError::Unsupported)
        );
    }

    #[test]
    fn value_list_stops_at_closing_tag() {
        let bytes = [0x21, 0x01, 0x00, 0x3F, 0x49, 0x10];
        let mut r = Reader::new(&bytes);
        let values = decode_value_list(&mut r, 3, DecodeContext::NONE).unwrap();
        assert_eq!(values, vec![DataValue::Unsigned(1), DataValue::Null]);
        assert_eq!(r.rest(), &[0x49, 0x10]);
    }

    #[test]
    fn value_list_without_closing_tag_is_malformed() {
        let mut r = Reader::new(&[0x21, 0x01, 0x21]);
        let err = decode_value_list(&mut r, 3, DecodeContext::NONE).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn runaway_opening_tags_fail_instead_of_recursing() {
        let bytes = vec![0x0E; 200_000];
        let mut r = Reader::new(&bytes);
        let err = decode_application_data(&mut r, DecodeContext::NONE).unwrap_err();
        assert_eq!(err, DecodeError::NestingTooDeep { max: MAX_NESTING });
        assert!(err.is_malformed());

        let mut r = Reader::new(&bytes);
        assert!(decode_value_list(&mut r, 0, DecodeContext::NONE).is_err());
    }

    #[test]
    fn nesting_up_to_the_limit_decodes() {
        let mut bytes = vec![0x0E; MAX_NESTING];
        bytes.extend(std::iter::repeat(0x0F).take(MAX_NESTING));
        let mut r = Reader::new(&bytes);
        let mut value = decode_application_data(&mut r, DecodeContext::NONE).unwrap();
        assert!(r.is_empty());
        let mut levels = 1;
        while let DataValue::Constructed { mut values, .. } = value {
            match values.pop() {
                Some(inner) => {
                    levels += 1;
                    value = inner;
                }
                None => break,
            }
        }
        assert_eq!(levels, MAX_NESTING);

        let mut deeper = vec![0x0E; MAX_NESTING + 1];
        deeper.extend(std::iter::repeat(0x0F).take(MAX_NESTING + 1));
        let mut r = Reader::new(&deeper);
        assert_eq!(
            decode_application_data(&mut r, DecodeContext::NONE),
            Err(DecodeError::NestingTooDeep { max: MAX_NESTING })
        );
    }

    #[test]
    fn context_selects_weekly_schedule() {
        let mut days = vec![Vec::new(); 7];
        days[0].push(TimeValue::new(Time::new(8, 0, 0, 0), DataValue::Boolean(true)));
        days[6].push(TimeValue::new(Time::new(17, 0, 0, 0), DataValue::Boolean(false)));
        let value = DataValue::WeeklySchedule(days);
        let ctx = DecodeContext::new(ObjectType::Schedule, PropertyId::WeeklySchedule);
        assert_eq!(roundtrip(&value, ctx), value);
    }

    #[test]
    fn single_day_under_schedule_context_stays_constructed() {
        let bytes = [0x0E, 0xB4, 8, 0, 0, 0, 0x11, 0x0F];
        let ctx = DecodeContext::new(ObjectType::Schedule, PropertyId::WeeklySchedule);
        let mut r = Reader::new(&bytes);
        let got = decode_application_data(&mut r, ctx).unwrap();
        assert!(r.is_empty());
        assert!(matches!(got, DataValue::Constructed { tag_num: 0, ref values } if values.len() == 2));
    }

    #[test]
    fn same_bytes_without_context_are_constructed() {
        let bytes = [0x0E, 0xB4, 8, 0, 0, 0, 0x11, 0x0F];
        let mut r = Reader::new(&bytes);
        let got = decode_application_data(&mut r, DecodeContext::NONE).unwrap();
        assert_eq!(
            got,
            DataValue::Constructed {
                tag_num: 0,
                values: vec![
                    DataValue::Time(Time::new(8, 0, 0, 0)),
                    DataValue::Boolean(true)
                ],
            }
        );
    }

    #[test]
    fn context_selects_effective_period() {
        let value = DataValue::DateRange(DateRange {
            start: Date::from_ymd(2024, 1, 1).unwrap(),
            end: Date::ZERO,
        });
        let ctx = DecodeContext::new(ObjectType::Schedule, PropertyId::EffectivePeriod);
        assert_eq!(roundtrip(&value, ctx), value);
    }

    #[test]
    fn context_selects_subordinate_reference() {
        let value = DataValue::DeviceObjectReference(DeviceObjectReference {
            device_id: Some(ObjectId::new(ObjectType::Device, 7)),
            object_id: ObjectId::new(ObjectType::AnalogInput, 1),
        });
        let ctx = DecodeContext::new(ObjectType::StructuredView, PropertyId::SubordinateList);
        assert_eq!(roundtrip(&value, ctx), value);
    }

    #[test]
    fn read_access_result_roundtrip() {
        let value = ReadAccessResult {
            object_id: ObjectId::new(ObjectType::AnalogInput, 4),
            results: vec![
                PropertyResult {
                    property_id: PropertyId::PresentValue,
                    array_index: None,
                    access: PropertyAccess::Values(vec![DataValue::Real(21.5)]),
                },
                PropertyResult {
                    property_id: PropertyId::PriorityArray,
                    array_index: Some(3),
                    access: PropertyAccess::Error(ServiceError::new(
                        ErrorClass::Property,
                        ErrorCode::UnknownProperty,
                    )),
                },
            ],
        };
        let mut buf = [0u8; 64];
        let mut w = Writer::new(&mut buf);
        encode_application_data(&mut w, &DataValue::ReadAccessResult(value.clone())).unwrap();
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_read_access_result(&mut r).unwrap(), value);
        assert!(r.is_empty());
    }

    #[test]
    fn service_error_is_two_enumerateds() {
        let err = ServiceError::new(ErrorClass::Object, ErrorCode::UnknownObject);
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        encode_application_data(&mut w, &DataValue::Error(err)).unwrap();
        assert_eq!(w.as_written(), &[0x91, 0x01, 0x91, 0x1F]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_service_error(&mut r).unwrap(), err);
    }

    proptest! {
        #[test]
        fn character_strings_roundtrip(s in ".{0,64}") {
            let v = DataValue::CharacterString(s);
            prop_assert_eq!(roundtrip(&v, DecodeContext::NONE), v);
        }

        #[test]
        fn decoding_arbitrary_bytes_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut r = Reader::new(&bytes);
            let ctx = DecodeContext::new(ObjectType::Schedule, PropertyId::ExceptionSchedule);
            let _ = decode_application_data(&mut r, ctx);
        }
    }
}
