use crate::encoding::{
    primitives::{encode_closing_tag, encode_ctx_object_id, encode_ctx_unsigned, encode_opening_tag},
    reader::Reader,
    writer::Writer,
};
use crate::services::value_codec::{decode_value_list, encode_application_data, DecodeContext};
use crate::services::{
    decode_optional_array_index, decode_required_ctx_object_id, decode_required_ctx_unsigned,
    encode_array_index, expect_opening, ConfirmedService,
};
use crate::types::{DataValue, ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};

pub const SERVICE_READ_PROPERTY: u8 = 0x0C;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPropertyRequest {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
}

impl ReadPropertyRequest {
    pub const fn new(object_id: ObjectId, property_id: PropertyId) -> Self {
        Self {
            object_id,
            property_id,
            array_index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropertyAck {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub values: Vec<DataValue>,
}

impl ConfirmedService for ReadPropertyRequest {
    const NAME: &'static str = "ReadProperty";
    const SERVICE_CHOICE: u8 = SERVICE_READ_PROPERTY;
    type Ack = ReadPropertyAck;

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_ctx_object_id(w, 0, self.object_id.raw())?;
        encode_ctx_unsigned(w, 1, self.property_id.to_u32())?;
        encode_array_index(w, 2, self.array_index)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_array_index(r, 2)?;
        Ok(Self {
            object_id,
            property_id,
            array_index,
        })
    }

    fn encode_acknowledge(ack: &ReadPropertyAck, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            encode_ctx_object_id(w, 0, ack.object_id.raw())?;
            encode_ctx_unsigned(w, 1, ack.property_id.to_u32())?;
            encode_array_index(w, 2, ack.array_index)?;
            encode_opening_tag(w, 3)?;
            for value in &ack.values {
                encode_application_data(w, value)?;
            }
            encode_closing_tag(w, 3)
        })
    }

    /// Values are decoded with the object type and property as context, so
    /// schedule and calendar structures come back as their own variants.
    fn decode_acknowledge(r: &mut Reader<'_>) -> Result<ReadPropertyAck, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_array_index(r, 2)?;
        expect_opening(r, 3)?;
        let values = decode_value_list(r, 3, DecodeContext::for_object(object_id, property_id))?;
        Ok(ReadPropertyAck {
            object_id,
            property_id,
            array_index,
            values,
        })
    }
}
