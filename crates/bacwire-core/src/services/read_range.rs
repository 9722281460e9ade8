use crate::encoding::{
    primitives::{
        decode_app_date, decode_app_signed, decode_app_time, decode_app_unsigned,
        decode_bit_string, decode_boolean, decode_real, decode_signed, decode_unsigned,
        encode_app_date, encode_app_signed, encode_app_time, encode_app_unsigned,
        encode_closing_tag, encode_ctx_bit_string, encode_ctx_object_id, encode_ctx_unsigned,
        encode_opening_tag,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::services::error::decode_service_error;
use crate::services::value_codec::{decode_value_list, DecodeContext};
use crate::services::{
    decode_optional_array_index, decode_optional_ctx_unsigned, decode_required_ctx_object_id,
    decode_required_ctx_unsigned, expect_closing, expect_opening, ConfirmedService,
};
use crate::types::{BitString, DataValue, Date, ObjectId, PropertyId, ServiceError, Time};
use crate::{DecodeError, EncodeError};

pub const SERVICE_READ_RANGE: u8 = 0x1A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadRangeSpecifier {
    ByPosition { reference_index: u32, count: i32 },
    BySequenceNumber { reference_sequence: u32, count: i32 },
    ByTime { date: Date, time: Time, count: i32 },
    ReadAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRangeRequest {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub range: ReadRangeSpecifier,
}

impl ReadRangeRequest {
    pub const fn read_all(object_id: ObjectId, property_id: PropertyId) -> Self {
        Self {
            object_id,
            property_id,
            array_index: None,
            range: ReadRangeSpecifier::ReadAll,
        }
    }

    pub const fn by_position(
        object_id: ObjectId,
        property_id: PropertyId,
        reference_index: u32,
        count: i32,
    ) -> Self {
        Self {
            range: ReadRangeSpecifier::ByPosition {
                reference_index,
                count,
            },
            ..Self::read_all(object_id, property_id)
        }
    }

    pub const fn by_sequence_number(
        object_id: ObjectId,
        property_id: PropertyId,
        reference_sequence: u32,
        count: i32,
    ) -> Self {
        Self {
            range: ReadRangeSpecifier::BySequenceNumber {
                reference_sequence,
                count,
            },
            ..Self::read_all(object_id, property_id)
        }
    }

    pub const fn by_time(
        object_id: ObjectId,
        property_id: PropertyId,
        date: Date,
        time: Time,
        count: i32,
    ) -> Self {
        Self {
            range: ReadRangeSpecifier::ByTime { date, time, count },
            ..Self::read_all(object_id, property_id)
        }
    }
}

/// ReadRange result. `range_data` is kept as raw application data; its
/// layout depends on the property that was read (see [`decode_log_records`]
/// for trend logs).
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRangeAck {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub result_flags: BitString,
    pub item_count: u32,
    pub range_data: Vec<u8>,
    pub first_sequence: Option<u32>,
}

impl ConfirmedService for ReadRangeRequest {
    const NAME: &'static str = "ReadRange";
    const SERVICE_CHOICE: u8 = SERVICE_READ_RANGE;
    type Ack = ReadRangeAck;

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            encode_ctx_object_id(w, 0, self.object_id.raw())?;
            encode_ctx_unsigned(w, 1, self.property_id.to_u32())?;
            crate::services::encode_array_index(w, 2, self.array_index)?;
            match self.range {
                ReadRangeSpecifier::ByPosition {
                    reference_index,
                    count,
                } => {
                    encode_opening_tag(w, 3)?;
                    encode_app_unsigned(w, reference_index)?;
                    encode_app_signed(w, count)?;
                    encode_closing_tag(w, 3)
                }
                ReadRangeSpecifier::BySequenceNumber {
                    reference_sequence,
                    count,
                } => {
                    encode_opening_tag(w, 6)?;
                    encode_app_unsigned(w, reference_sequence)?;
                    encode_app_signed(w, count)?;
                    encode_closing_tag(w, 6)
                }
                ReadRangeSpecifier::ByTime { date, time, count } => {
                    encode_opening_tag(w, 7)?;
                    encode_app_date(w, &date)?;
                    encode_app_time(w, &time)?;
                    encode_app_signed(w, count)?;
                    encode_closing_tag(w, 7)
                }
                ReadRangeSpecifier::ReadAll => Ok(()),
            }
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_array_index(r, 2)?;
        if r.is_empty() {
            return Ok(Self {
                object_id,
                property_id,
                array_index,
                range: ReadRangeSpecifier::ReadAll,
            });
        }

        let range = match Tag::decode(r)? {
            Tag::Opening { tag_num: 3 } => ReadRangeSpecifier::ByPosition {
                reference_index: decode_app_unsigned(r)?,
                count: decode_app_signed(r)?,
            },
            Tag::Opening { tag_num: 6 } => ReadRangeSpecifier::BySequenceNumber {
                reference_sequence: decode_app_unsigned(r)?,
                count: decode_app_signed(r)?,
            },
            Tag::Opening { tag_num: 7 } => ReadRangeSpecifier::ByTime {
                date: decode_app_date(r)?,
                time: decode_app_time(r)?,
                count: decode_app_signed(r)?,
            },
            _ => return Err(DecodeError::InvalidTag),
        };
        let closing = match range {
            ReadRangeSpecifier::ByPosition { .. } => 3,
            ReadRangeSpecifier::BySequenceNumber { .. } => 6,
            _ => 7,
        };
        expect_closing(r, closing)?;

        Ok(Self {
            object_id,
            property_id,
            array_index,
            range,
        })
    }

    /// The range data is copied only when `item_count` is non-zero, and the
    /// first sequence number is written only in that case too.
    fn encode_acknowledge(ack: &ReadRangeAck, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            encode_ctx_object_id(w, 0, ack.object_id.raw())?;
            encode_ctx_unsigned(w, 1, ack.property_id.to_u32())?;
            crate::services::encode_array_index(w, 2, ack.array_index)?;
            encode_ctx_bit_string(w, 3, &ack.result_flags)?;
            encode_ctx_unsigned(w, 4, ack.item_count)?;
            encode_opening_tag(w, 5)?;
            if ack.item_count != 0 {
                w.write_all(&ack.range_data)?;
            }
            encode_closing_tag(w, 5)?;
            match ack.first_sequence {
                Some(seq) if ack.item_count != 0 => encode_ctx_unsigned(w, 6, seq),
                _ => Ok(()),
            }
        })
    }

    fn decode_acknowledge(r: &mut Reader<'_>) -> Result<ReadRangeAck, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_array_index(r, 2)?;
        let result_flags = match Tag::decode(r)? {
            Tag::Context { tag_num: 3, len } => decode_bit_string(r, len as usize)?,
            _ => return Err(DecodeError::InvalidTag),
        };
        let item_count = decode_required_ctx_unsigned(r, 4)?;
        expect_opening(r, 5)?;
        let range_data = take_until_closing(r, 5)?.to_vec();
        expect_closing(r, 5)?;
        let first_sequence = decode_optional_ctx_unsigned(r, 6)?;

        Ok(ReadRangeAck {
            object_id,
            property_id,
            array_index,
            result_flags,
            item_count,
            range_data,
            first_sequence,
        })
    }
}

/// Returns the bytes up to the closing tag matching an opening tag that was
/// just consumed, leaving the reader on that closing tag.
fn take_until_closing<'a>(r: &mut Reader<'a>, tag_num: u8) -> Result<&'a [u8], DecodeError> {
    let start = r.rest();
    let begin = r.position();
    let mut depth = 0usize;
    loop {
        let tag = Tag::peek(r)?;
        if depth == 0 && tag.is_closing(tag_num) {
            break;
        }
        Tag::decode(r)?;
        match tag {
            Tag::Opening { .. } => depth += 1,
            Tag::Closing { .. } => depth = depth.checked_sub(1).ok_or(DecodeError::InvalidTag)?,
            // Application booleans keep their value in the length field.
            Tag::Application {
                tag: AppTag::Boolean,
                ..
            } => {}
            Tag::Application { len, .. } | Tag::Context { len, .. } => {
                r.skip(len as usize)?;
            }
        }
    }
    Ok(&start[..r.position() - begin])
}

/// One entry of a trend log buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub date: Date,
    pub time: Time,
    pub datum: LogDatum,
    pub status_flags: Option<BitString>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogDatum {
    LogStatus(BitString),
    Boolean(bool),
    Real(f32),
    Enumerated(u32),
    Unsigned(u32),
    Signed(i32),
    BitString(BitString),
    Null,
    Failure(ServiceError),
    TimeChange(f32),
    Any(Vec<DataValue>),
}

/// Interprets the `range_data` of a trend log ReadRange as log records.
pub fn decode_log_records(range_data: &[u8]) -> Result<Vec<LogRecord>, DecodeError> {
    let mut r = Reader::new(range_data);
    let mut records = Vec::new();
    while !r.is_empty() {
        records.push(decode_log_record(&mut r)?);
    }
    Ok(records)
}

fn decode_log_record(r: &mut Reader<'_>) -> Result<LogRecord, DecodeError> {
    expect_opening(r, 0)?;
    let date = decode_app_date(r)?;
    let time = decode_app_time(r)?;
    expect_closing(r, 0)?;

    expect_opening(r, 1)?;
    let datum = match Tag::decode(r)? {
        Tag::Context { tag_num: 0, len } => LogDatum::LogStatus(decode_bit_string(r, len as usize)?),
        Tag::Context { tag_num: 1, len } => LogDatum::Boolean(decode_boolean(r, len as usize)?),
        Tag::Context { tag_num: 2, len } => LogDatum::Real(decode_real(r, len as usize)?),
        Tag::Context { tag_num: 3, len } => LogDatum::Enumerated(decode_unsigned(r, len as usize)?),
        Tag::Context { tag_num: 4, len } => LogDatum::Unsigned(decode_unsigned(r, len as usize)?),
        Tag::Context { tag_num: 5, len } => LogDatum::Signed(decode_signed(r, len as usize)?),
        Tag::Context { tag_num: 6, len } => LogDatum::BitString(decode_bit_string(r, len as usize)?),
        Tag::Context { tag_num: 7, len: 0 } => LogDatum::Null,
        Tag::Opening { tag_num: 8 } => {
            let error = decode_service_error(r)?;
            expect_closing(r, 8)?;
            LogDatum::Failure(error)
        }
        Tag::Context { tag_num: 9, len } => LogDatum::TimeChange(decode_real(r, len as usize)?),
        Tag::Opening { tag_num: 10 } => {
            LogDatum::Any(decode_value_list(r, 10, DecodeContext::NONE)?)
        }
        _ => return Err(DecodeError::InvalidTag),
    };
    expect_closing(r, 1)?;

    let mut status_flags = None;
    if !r.is_empty() {
        if let Tag::Context { tag_num: 2, len } = Tag::peek(r)? {
            Tag::decode(r)?;
            status_flags = Some(decode_bit_string(r, len as usize)?);
        }
    }

    Ok(LogRecord {
        date,
        time,
        datum,
        status_flags,
    })
}
