use crate::apdu::UnconfirmedRequestHeader;
use crate::encoding::{
    primitives::{encode_closing_tag, encode_ctx_object_id, encode_ctx_unsigned, encode_opening_tag},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::value_codec::{decode_value_list, encode_application_data, DecodeContext};
use crate::services::{
    decode_optional_array_index, decode_optional_ctx_unsigned, decode_required_ctx_object_id,
    decode_required_ctx_unsigned, encode_array_index, expect_closing, expect_opening,
    ConfirmedService,
};
use crate::types::{DataValue, ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};

pub const SERVICE_CONFIRMED_COV_NOTIFICATION: u8 = 0x01;
pub const SERVICE_UNCONFIRMED_COV_NOTIFICATION: u8 = 0x02;

/// BACnetPropertyValue.
#[derive(Debug, Clone, PartialEq)]
pub struct CovPropertyValue {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub values: Vec<DataValue>,
    pub priority: Option<u8>,
}

impl CovPropertyValue {
    pub fn new(property_id: PropertyId, value: DataValue) -> Self {
        Self {
            property_id,
            array_index: None,
            values: vec![value],
            priority: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CovNotification {
    pub subscriber_process_id: u32,
    pub initiating_device_id: ObjectId,
    pub monitored_object_id: ObjectId,
    pub time_remaining_seconds: u32,
    pub values: Vec<CovPropertyValue>,
}

impl CovNotification {
    pub fn encode_unconfirmed(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            UnconfirmedRequestHeader::new(SERVICE_UNCONFIRMED_COV_NOTIFICATION).encode(w)?;
            self.encode(w)
        })
    }
}

impl ConfirmedService for CovNotification {
    const NAME: &'static str = "CovNotification";
    const SERVICE_CHOICE: u8 = SERVICE_CONFIRMED_COV_NOTIFICATION;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            encode_ctx_unsigned(w, 0, self.subscriber_process_id)?;
            encode_ctx_object_id(w, 1, self.initiating_device_id.raw())?;
            encode_ctx_object_id(w, 2, self.monitored_object_id.raw())?;
            encode_ctx_unsigned(w, 3, self.time_remaining_seconds)?;
            encode_opening_tag(w, 4)?;
            for pv in &self.values {
                encode_ctx_unsigned(w, 0, pv.property_id.to_u32())?;
                encode_array_index(w, 1, pv.array_index)?;
                encode_opening_tag(w, 2)?;
                for value in &pv.values {
                    encode_application_data(w, value)?;
                }
                encode_closing_tag(w, 2)?;
                if let Some(priority) = pv.priority {
                    encode_ctx_unsigned(w, 3, priority as u32)?;
                }
            }
            encode_closing_tag(w, 4)
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let subscriber_process_id = decode_required_ctx_unsigned(r, 0)?;
        let initiating_device_id = decode_required_ctx_object_id(r, 1)?;
        let monitored_object_id = decode_required_ctx_object_id(r, 2)?;
        let time_remaining_seconds = decode_required_ctx_unsigned(r, 3)?;

        expect_opening(r, 4)?;
        let mut values = Vec::new();
        while !Tag::peek(r)?.is_closing(4) {
            let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 0)?);
            let array_index = decode_optional_array_index(r, 1)?;
            expect_opening(r, 2)?;
            let ctx = DecodeContext::for_object(monitored_object_id, property_id);
            let property_values = decode_value_list(r, 2, ctx)?;
            let priority = decode_optional_ctx_unsigned(r, 3)?
                .map(|p| u8::try_from(p).map_err(|_| DecodeError::InvalidValue))
                .transpose()?;
            values.push(CovPropertyValue {
                property_id,
                array_index,
                values: property_values,
                priority,
            });
        }
        expect_closing(r, 4)?;

        Ok(Self {
            subscriber_process_id,
            initiating_device_id,
            monitored_object_id,
            time_remaining_seconds,
            values,
        })
    }
}
