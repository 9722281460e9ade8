use crate::encoding::{
    primitives::{
        decode_bit_string, decode_unsigned, encode_ctx_bit_string, encode_ctx_enumerated,
        encode_ctx_object_id,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::services::ConfirmedService;
use crate::types::{BitString, EventState, ObjectId};
use crate::{DecodeError, EncodeError};

pub const SERVICE_GET_ALARM_SUMMARY: u8 = 0x03;

const TAG_OBJECT_ID: u8 = 12;
const TAG_ALARM_STATE: u8 = 9;
const TAG_ACKED_TRANSITIONS: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmSummaryItem {
    pub object_id: ObjectId,
    pub alarm_state: EventState,
    pub acknowledged_transitions: BitString,
}

/// GetAlarmSummary list. There is no acknowledge payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmSummary {
    pub alarms: Vec<AlarmSummaryItem>,
}

impl ConfirmedService for AlarmSummary {
    const NAME: &'static str = "AlarmSummary";
    const SERVICE_CHOICE: u8 = SERVICE_GET_ALARM_SUMMARY;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            for alarm in &self.alarms {
                encode_ctx_object_id(w, TAG_OBJECT_ID, alarm.object_id.raw())?;
                encode_ctx_enumerated(w, TAG_ALARM_STATE, alarm.alarm_state.to_u32())?;
                encode_ctx_bit_string(w, TAG_ACKED_TRANSITIONS, &alarm.acknowledged_transitions)?;
            }
            Ok(())
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut alarms = Vec::new();
        while !r.is_empty() {
            let len = expect_numbered(r, TAG_OBJECT_ID)?;
            if len != 4 {
                return Err(DecodeError::InvalidLength);
            }
            let object_id = ObjectId::from_raw(r.read_be_u32()?);
            let len = expect_numbered(r, TAG_ALARM_STATE)?;
            let alarm_state = EventState::from_u32(decode_unsigned(r, len)?);
            let len = expect_numbered(r, TAG_ACKED_TRANSITIONS)?;
            let acknowledged_transitions = decode_bit_string(r, len)?;
            alarms.push(AlarmSummaryItem {
                object_id,
                alarm_state,
                acknowledged_transitions,
            });
        }
        Ok(Self { alarms })
    }
}

/// The summary is written context-tagged, but some devices send application
/// tags with the same numbers, so either class is accepted.
fn expect_numbered(r: &mut Reader<'_>, tag_num: u8) -> Result<usize, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application { tag, len } if tag != AppTag::Boolean && tag.to_u8() == tag_num => {
            Ok(len as usize)
        }
        Tag::Context { tag_num: t, len } if t == tag_num => Ok(len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}
