use crate::encoding::{
    primitives::{
        decode_character_string, encode_ctx_character_string, encode_ctx_enumerated,
        encode_ctx_object_id, encode_ctx_unsigned,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::{
    decode_required_ctx_object_id, decode_required_ctx_unsigned, ConfirmedService,
};
use crate::types::ObjectId;
use crate::{DecodeError, EncodeError};

pub const SERVICE_LIFE_SAFETY_OPERATION: u8 = 0x1B;

/// BACnetLifeSafetyOperation, kept as a raw number so proprietary values
/// survive.
pub type LifeSafetyOperationCode = u32;

pub const OPERATION_NONE: LifeSafetyOperationCode = 0;
pub const OPERATION_SILENCE: LifeSafetyOperationCode = 1;
pub const OPERATION_RESET: LifeSafetyOperationCode = 4;

/// Answered with a Simple-ACK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeSafetyOperationRequest {
    pub process_id: u32,
    pub requesting_source: String,
    pub operation: LifeSafetyOperationCode,
    pub target_object_id: ObjectId,
}

impl ConfirmedService for LifeSafetyOperationRequest {
    const NAME: &'static str = "LifeSafetyOperation";
    const SERVICE_CHOICE: u8 = SERVICE_LIFE_SAFETY_OPERATION;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            encode_ctx_unsigned(w, 0, self.process_id)?;
            encode_ctx_character_string(w, 1, &self.requesting_source)?;
            encode_ctx_enumerated(w, 2, self.operation)?;
            encode_ctx_object_id(w, 3, self.target_object_id.raw())
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let process_id = decode_required_ctx_unsigned(r, 0)?;
        let requesting_source = match Tag::decode(r)? {
            Tag::Context { tag_num: 1, len } => decode_character_string(r, len as usize)?,
            _ => return Err(DecodeError::InvalidTag),
        };
        let operation = decode_required_ctx_unsigned(r, 2)?;
        let target_object_id = decode_required_ctx_object_id(r, 3)?;
        Ok(Self {
            process_id,
            requesting_source,
            operation,
            target_object_id,
        })
    }
}
