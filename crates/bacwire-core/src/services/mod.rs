//! Service payload encoders and decoders.
//!
//! Confirmed services implement [`ConfirmedService`]; their `encode` writes
//! the service payload only and `encode_request` frames it behind a
//! confirmed-request header.

pub mod alarm_summary;
pub mod cov_notification;
pub mod error;
pub mod event_notification;
pub mod life_safety_operation;
pub mod list_element;
pub mod read_property;
pub mod read_range;
pub mod schedule_codec;
pub mod value_codec;
pub mod write_property;
pub mod write_property_multiple;

use crate::apdu::ConfirmedRequestHeader;
use crate::encoding::{
    primitives::{
        decode_date, decode_time, decode_unsigned, encode_app_date, encode_app_time,
        encode_closing_tag, encode_ctx_time, encode_ctx_unsigned, encode_opening_tag,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::{ObjectId, TimeStamp};
use crate::{DecodeError, EncodeError};

/// Array index meaning "the whole array". It is never written; the index
/// field is left out instead.
pub const BACNET_ARRAY_ALL: u32 = 0xFFFF_FFFF;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 16;
/// Priority assumed when a write carries none.
pub const DEFAULT_PRIORITY: u8 = 16;

pub trait ConfirmedService {
    const NAME: &'static str;
    const SERVICE_CHOICE: u8;
    type Ack;

    /// Writes the service payload, without any APDU header.
    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError>;

    /// Reads the service payload, without any APDU header.
    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError>
    where
        Self: Sized;

    fn encode_request(&self, invoke_id: u8, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            ConfirmedRequestHeader::new(Self::SERVICE_CHOICE, invoke_id).encode(w)?;
            self.encode(w)
        })
    }

    fn encode_acknowledge(_ack: &Self::Ack, _w: &mut Writer<'_>) -> Result<(), EncodeError> {
        Err(EncodeError::AckNotSupported {
            service: Self::NAME,
        })
    }

    fn decode_acknowledge(_r: &mut Reader<'_>) -> Result<Self::Ack, DecodeError> {
        Err(DecodeError::AckNotSupported {
            service: Self::NAME,
        })
    }
}

pub(crate) fn check_priority(priority: Option<u8>) -> Result<(), EncodeError> {
    match priority {
        Some(p) if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&p) => Err(EncodeError::OutOfRange {
            field: "priority",
            value: p as i64,
            min: MIN_PRIORITY as i64,
            max: MAX_PRIORITY as i64,
        }),
        _ => Ok(()),
    }
}

/// Writes `[tag_num]` array index unless it is absent or [`BACNET_ARRAY_ALL`].
pub(crate) fn encode_array_index(
    w: &mut Writer<'_>,
    tag_num: u8,
    array_index: Option<u32>,
) -> Result<(), EncodeError> {
    match array_index {
        Some(index) if index != BACNET_ARRAY_ALL => encode_ctx_unsigned(w, tag_num, index),
        _ => Ok(()),
    }
}

/// Decode a required context-tagged unsigned integer at the expected tag number.
pub(crate) fn decode_required_ctx_unsigned(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<u32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Context { tag_num, len } if tag_num == expected_tag_num => {
            decode_unsigned(r, len as usize)
        }
        _ => Err(DecodeError::InvalidTag),
    }
}

/// Decode a required context-tagged BACnet object identifier at the expected tag number.
pub(crate) fn decode_required_ctx_object_id(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<ObjectId, DecodeError> {
    match Tag::decode(r)? {
        Tag::Context { tag_num, len: 4 } if tag_num == expected_tag_num => {
            Ok(ObjectId::from_raw(r.read_be_u32()?))
        }
        Tag::Context { tag_num, .. } if tag_num == expected_tag_num => {
            Err(DecodeError::InvalidLength)
        }
        _ => Err(DecodeError::InvalidTag),
    }
}

/// Reads a context unsigned if the next tag is `[tag_num]`.
pub(crate) fn decode_optional_ctx_unsigned(
    r: &mut Reader<'_>,
    tag_num: u8,
) -> Result<Option<u32>, DecodeError> {
    if r.is_empty() {
        return Ok(None);
    }
    match Tag::peek(r)? {
        Tag::Context { tag_num: t, .. } if t == tag_num => {
            decode_required_ctx_unsigned(r, tag_num).map(Some)
        }
        _ => Ok(None),
    }
}

/// Like [`decode_optional_ctx_unsigned`], with [`BACNET_ARRAY_ALL`] read as absent.
pub(crate) fn decode_optional_array_index(
    r: &mut Reader<'_>,
    tag_num: u8,
) -> Result<Option<u32>, DecodeError> {
    Ok(decode_optional_ctx_unsigned(r, tag_num)?.filter(|&i| i != BACNET_ARRAY_ALL))
}

pub(crate) fn expect_opening(r: &mut Reader<'_>, tag_num: u8) -> Result<(), DecodeError> {
    if Tag::decode(r)?.is_opening(tag_num) {
        Ok(())
    } else {
        Err(DecodeError::InvalidTag)
    }
}

pub(crate) fn expect_closing(r: &mut Reader<'_>, tag_num: u8) -> Result<(), DecodeError> {
    if Tag::decode(r)?.is_closing(tag_num) {
        Ok(())
    } else {
        Err(DecodeError::InvalidTag)
    }
}

/// Writes a BACnetTimeStamp wrapped in opening/closing `[tag_num]`.
pub(crate) fn encode_timestamp(
    w: &mut Writer<'_>,
    tag_num: u8,
    ts: &TimeStamp,
) -> Result<(), EncodeError> {
    encode_opening_tag(w, tag_num)?;
    match ts {
        TimeStamp::Time(t) => encode_ctx_time(w, 0, t)?,
        TimeStamp::SequenceNumber(n) => encode_ctx_unsigned(w, 1, *n)?,
        TimeStamp::DateTime { date, time } => {
            encode_opening_tag(w, 2)?;
            encode_app_date(w, date)?;
            encode_app_time(w, time)?;
            encode_closing_tag(w, 2)?;
        }
    }
    encode_closing_tag(w, tag_num)
}

pub(crate) fn decode_timestamp(r: &mut Reader<'_>, tag_num: u8) -> Result<TimeStamp, DecodeError> {
    expect_opening(r, tag_num)?;
    let ts = match Tag::decode(r)? {
        Tag::Context { tag_num: 0, len } => TimeStamp::Time(decode_time(r, len as usize)?),
        Tag::Context { tag_num: 1, len } => {
            TimeStamp::SequenceNumber(decode_unsigned(r, len as usize)?)
        }
        Tag::Opening { tag_num: 2 } => {
            let date = match Tag::decode(r)? {
                Tag::Application {
                    tag: AppTag::Date,
                    len,
                } => decode_date(r, len as usize)?,
                _ => return Err(DecodeError::InvalidTag),
            };
            let time = match Tag::decode(r)? {
                Tag::Application {
                    tag: AppTag::Time,
                    len,
                } => decode_time(r, len as usize)?,
                _ => return Err(DecodeError::InvalidTag),
            };
            expect_closing(r, 2)?;
            TimeStamp::DateTime { date, time }
        }
        _ => return Err(DecodeError::InvalidTag),
    };
    expect_closing(r, tag_num)?;
    Ok(ts)
}
