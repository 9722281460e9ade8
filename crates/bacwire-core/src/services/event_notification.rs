use crate::apdu::UnconfirmedRequestHeader;
use crate::encoding::{
    primitives::{
        decode_bit_string, decode_boolean, decode_character_string, decode_real,
        decode_unsigned, encode_closing_tag, encode_ctx_bit_string, encode_ctx_boolean,
        encode_ctx_character_string, encode_ctx_enumerated, encode_ctx_object_id,
        encode_ctx_real, encode_ctx_unsigned, encode_opening_tag,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::{
    decode_optional_array_index, decode_required_ctx_object_id, decode_required_ctx_unsigned,
    decode_timestamp, encode_array_index, encode_timestamp, expect_closing, expect_opening,
    ConfirmedService,
};
use crate::types::{
    BitString, DeviceObjectPropertyReference, EventState, EventType, NotifyType, ObjectId,
    PropertyId, TimeStamp,
};
use crate::{DecodeError, EncodeError};

pub const SERVICE_CONFIRMED_EVENT_NOTIFICATION: u8 = 0x02;
pub const SERVICE_UNCONFIRMED_EVENT_NOTIFICATION: u8 = 0x03;

/// BACnetPropertyStates, as carried by change-of-state notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyState {
    Boolean(bool),
    UnsignedValue(u32),
    /// Any of the enumerated choices, keyed by their context tag.
    Enumerated { tag_num: u8, value: u32 },
}

const PROPERTY_STATE_UNSIGNED: u8 = 11;

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeOfValue {
    ChangedBits(BitString),
    ChangedValue(f32),
}

/// Event values carried under `[12]`, one variant per supported event type.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValues {
    ChangeOfBitstring {
        referenced_bitstring: BitString,
        status_flags: BitString,
    },
    ChangeOfState {
        new_state: PropertyState,
        status_flags: BitString,
    },
    ChangeOfValue {
        new_value: ChangeOfValue,
        status_flags: BitString,
    },
    FloatingLimit {
        reference_value: f32,
        status_flags: BitString,
        setpoint_value: f32,
        error_limit: f32,
    },
    OutOfRange {
        exceeding_value: f32,
        status_flags: BitString,
        deadband: f32,
        exceeded_limit: f32,
    },
    ChangeOfLifeSafety {
        new_state: u32,
        new_mode: u32,
        status_flags: BitString,
        operation_expected: u32,
    },
    BufferReady {
        buffer_property: DeviceObjectPropertyReference,
        previous_notification: u32,
        current_notification: u32,
    },
    UnsignedRange {
        exceeding_value: u32,
        status_flags: BitString,
        exceeded_limit: u32,
    },
}

impl EventValues {
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::ChangeOfBitstring { .. } => EventType::ChangeOfBitstring,
            Self::ChangeOfState { .. } => EventType::ChangeOfState,
            Self::ChangeOfValue { .. } => EventType::ChangeOfValue,
            Self::FloatingLimit { .. } => EventType::FloatingLimit,
            Self::OutOfRange { .. } => EventType::OutOfRange,
            Self::ChangeOfLifeSafety { .. } => EventType::ChangeOfLifeSafety,
            Self::BufferReady { .. } => EventType::BufferReady,
            Self::UnsignedRange { .. } => EventType::UnsignedRange,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventNotification {
    pub process_id: u32,
    pub initiating_device_id: ObjectId,
    pub event_object_id: ObjectId,
    pub timestamp: TimeStamp,
    pub notification_class: u32,
    pub priority: u8,
    pub event_type: EventType,
    pub message_text: Option<String>,
    pub notify_type: NotifyType,
    /// Only carried for alarm and event notifications.
    pub ack_required: bool,
    pub from_state: EventState,
    pub to_state: EventState,
    pub event_values: Option<EventValues>,
}

impl EventNotification {
    /// Frames the notification as an Unconfirmed-Request.
    pub fn encode_unconfirmed(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            UnconfirmedRequestHeader::new(SERVICE_UNCONFIRMED_EVENT_NOTIFICATION).encode(w)?;
            self.encode(w)
        })
    }

    fn check_encodable(&self) -> Result<(), EncodeError> {
        match self.notify_type {
            NotifyType::AckNotification => {
                return Err(EncodeError::NotImplemented("ack notification"))
            }
            NotifyType::Alarm | NotifyType::Event => {}
        }
        match self.event_type {
            EventType::Extended => return Err(EncodeError::NotImplemented("extended event")),
            EventType::CommandFailure => {
                return Err(EncodeError::NotImplemented("command failure event"))
            }
            EventType::Other(_) => return Err(EncodeError::NotImplemented("event type")),
            _ => {}
        }
        match &self.event_values {
            Some(values) if values.event_type() == self.event_type => Ok(()),
            Some(values) => Err(EncodeError::payload(format!(
                "event values {:?} do not match event type {:?}",
                values.event_type(),
                self.event_type
            ))),
            None => Err(EncodeError::payload("alarm and event notifications need event values")),
        }
    }
}

impl ConfirmedService for EventNotification {
    const NAME: &'static str = "EventNotification";
    const SERVICE_CHOICE: u8 = SERVICE_CONFIRMED_EVENT_NOTIFICATION;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        self.check_encodable()?;
        w.transaction(|w| {
            encode_ctx_unsigned(w, 0, self.process_id)?;
            encode_ctx_object_id(w, 1, self.initiating_device_id.raw())?;
            encode_ctx_object_id(w, 2, self.event_object_id.raw())?;
            encode_timestamp(w, 3, &self.timestamp)?;
            encode_ctx_unsigned(w, 4, self.notification_class)?;
            encode_ctx_unsigned(w, 5, self.priority as u32)?;
            encode_ctx_enumerated(w, 6, self.event_type.to_u32())?;
            if let Some(text) = self.message_text.as_deref().filter(|t| !t.is_empty()) {
                encode_ctx_character_string(w, 7, text)?;
            }
            encode_ctx_enumerated(w, 8, self.notify_type.to_u32())?;
            encode_ctx_boolean(w, 9, self.ack_required)?;
            encode_ctx_enumerated(w, 10, self.from_state.to_u32())?;
            encode_ctx_enumerated(w, 11, self.to_state.to_u32())?;
            if let Some(values) = &self.event_values {
                encode_opening_tag(w, 12)?;
                encode_event_values(w, values)?;
                encode_closing_tag(w, 12)?;
            }
            Ok(())
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let process_id = decode_required_ctx_unsigned(r, 0)?;
        let initiating_device_id = decode_required_ctx_object_id(r, 1)?;
        let event_object_id = decode_required_ctx_object_id(r, 2)?;
        let timestamp = decode_timestamp(r, 3)?;
        let notification_class = decode_required_ctx_unsigned(r, 4)?;
        let priority =
            u8::try_from(decode_required_ctx_unsigned(r, 5)?).map_err(|_| DecodeError::InvalidValue)?;
        let event_type = EventType::from_u32(decode_required_ctx_unsigned(r, 6)?);

        let message_text = match Tag::peek(r)? {
            Tag::Context { tag_num: 7, len } => {
                Tag::decode(r)?;
                Some(decode_character_string(r, len as usize)?)
            }
            _ => None,
        };

        let notify_type = NotifyType::from_u32(decode_required_ctx_unsigned(r, 8)?)
            .ok_or(DecodeError::InvalidValue)?;

        let (ack_required, from_state) = match notify_type {
            NotifyType::Alarm | NotifyType::Event => {
                let ack_required = match Tag::decode(r)? {
                    Tag::Context { tag_num: 9, len } => decode_boolean(r, len as usize)?,
                    _ => return Err(DecodeError::InvalidTag),
                };
                (ack_required, decode_event_state(r, 10)?)
            }
            NotifyType::AckNotification => (false, EventState::Normal),
        };
        let to_state = decode_event_state(r, 11)?;

        let mut event_values = None;
        if !r.is_empty() && Tag::peek(r)?.is_opening(12) {
            Tag::decode(r)?;
            event_values = Some(decode_event_values(r)?);
            expect_closing(r, 12)?;
        }

        Ok(Self {
            process_id,
            initiating_device_id,
            event_object_id,
            timestamp,
            notification_class,
            priority,
            event_type,
            message_text,
            notify_type,
            ack_required,
            from_state,
            to_state,
            event_values,
        })
    }
}

fn decode_event_state(r: &mut Reader<'_>, tag_num: u8) -> Result<EventState, DecodeError> {
    decode_required_ctx_unsigned(r, tag_num).map(EventState::from_u32)
}

fn encode_event_values(w: &mut Writer<'_>, values: &EventValues) -> Result<(), EncodeError> {
    let tag = values.event_type().to_u32() as u8;
    encode_opening_tag(w, tag)?;
    match values {
        EventValues::ChangeOfBitstring {
            referenced_bitstring,
            status_flags,
        } => {
            encode_ctx_bit_string(w, 0, referenced_bitstring)?;
            encode_ctx_bit_string(w, 1, status_flags)?;
        }
        EventValues::ChangeOfState {
            new_state,
            status_flags,
        } => {
            encode_opening_tag(w, 0)?;
            match *new_state {
                PropertyState::Boolean(v) => encode_ctx_boolean(w, 0, v)?,
                PropertyState::UnsignedValue(v) => {
                    encode_ctx_unsigned(w, PROPERTY_STATE_UNSIGNED, v)?
                }
                PropertyState::Enumerated { tag_num, value } => {
                    encode_ctx_enumerated(w, tag_num, value)?
                }
            }
            encode_closing_tag(w, 0)?;
            encode_ctx_bit_string(w, 1, status_flags)?;
        }
        EventValues::ChangeOfValue {
            new_value,
            status_flags,
        } => {
            encode_opening_tag(w, 0)?;
            match new_value {
                ChangeOfValue::ChangedBits(bits) => encode_ctx_bit_string(w, 0, bits)?,
                ChangeOfValue::ChangedValue(v) => encode_ctx_real(w, 1, *v)?,
            }
            encode_closing_tag(w, 0)?;
            encode_ctx_bit_string(w, 1, status_flags)?;
        }
        EventValues::FloatingLimit {
            reference_value,
            status_flags,
            setpoint_value,
            error_limit,
        } => {
            encode_ctx_real(w, 0, *reference_value)?;
            encode_ctx_bit_string(w, 1, status_flags)?;
            encode_ctx_real(w, 2, *setpoint_value)?;
            encode_ctx_real(w, 3, *error_limit)?;
        }
        EventValues::OutOfRange {
            exceeding_value,
            status_flags,
            deadband,
            exceeded_limit,
        } => {
            encode_ctx_real(w, 0, *exceeding_value)?;
            encode_ctx_bit_string(w, 1, status_flags)?;
            encode_ctx_real(w, 2, *deadband)?;
            encode_ctx_real(w, 3, *exceeded_limit)?;
        }
        EventValues::ChangeOfLifeSafety {
            new_state,
            new_mode,
            status_flags,
            operation_expected,
        } => {
            encode_ctx_enumerated(w, 0, *new_state)?;
            encode_ctx_enumerated(w, 1, *new_mode)?;
            encode_ctx_bit_string(w, 2, status_flags)?;
            encode_ctx_enumerated(w, 3, *operation_expected)?;
        }
        EventValues::BufferReady {
            buffer_property,
            previous_notification,
            current_notification,
        } => {
            encode_opening_tag(w, 0)?;
            encode_property_reference(w, buffer_property)?;
            encode_closing_tag(w, 0)?;
            encode_ctx_unsigned(w, 1, *previous_notification)?;
            encode_ctx_unsigned(w, 2, *current_notification)?;
        }
        EventValues::UnsignedRange {
            exceeding_value,
            status_flags,
            exceeded_limit,
        } => {
            encode_ctx_unsigned(w, 0, *exceeding_value)?;
            encode_ctx_bit_string(w, 1, status_flags)?;
            encode_ctx_unsigned(w, 2, *exceeded_limit)?;
        }
    }
    encode_closing_tag(w, tag)
}

fn decode_event_values(r: &mut Reader<'_>) -> Result<EventValues, DecodeError> {
    let tag_num = match Tag::decode(r)? {
        Tag::Opening { tag_num } => tag_num,
        _ => return Err(DecodeError::InvalidTag),
    };
    let values = match EventType::from_u32(tag_num as u32) {
        EventType::ChangeOfBitstring => EventValues::ChangeOfBitstring {
            referenced_bitstring: decode_ctx_bit_string(r, 0)?,
            status_flags: decode_ctx_bit_string(r, 1)?,
        },
        EventType::ChangeOfState => {
            expect_opening(r, 0)?;
            let new_state = match Tag::decode(r)? {
                Tag::Context { tag_num: 0, len } => {
                    PropertyState::Boolean(decode_boolean(r, len as usize)?)
                }
                Tag::Context {
                    tag_num: PROPERTY_STATE_UNSIGNED,
                    len,
                } => PropertyState::UnsignedValue(decode_unsigned(r, len as usize)?),
                Tag::Context { tag_num, len } => PropertyState::Enumerated {
                    tag_num,
                    value: decode_unsigned(r, len as usize)?,
                },
                _ => return Err(DecodeError::InvalidTag),
            };
            expect_closing(r, 0)?;
            EventValues::ChangeOfState {
                new_state,
                status_flags: decode_ctx_bit_string(r, 1)?,
            }
        }
        EventType::ChangeOfValue => {
            expect_opening(r, 0)?;
            let new_value = match Tag::decode(r)? {
                Tag::Context { tag_num: 0, len } => {
                    ChangeOfValue::ChangedBits(decode_bit_string(r, len as usize)?)
                }
                Tag::Context { tag_num: 1, len } => {
                    ChangeOfValue::ChangedValue(decode_real(r, len as usize)?)
                }
                _ => return Err(DecodeError::InvalidTag),
            };
            expect_closing(r, 0)?;
            EventValues::ChangeOfValue {
                new_value,
                status_flags: decode_ctx_bit_string(r, 1)?,
            }
        }
        EventType::FloatingLimit => EventValues::FloatingLimit {
            reference_value: decode_ctx_real(r, 0)?,
            status_flags: decode_ctx_bit_string(r, 1)?,
            setpoint_value: decode_ctx_real(r, 2)?,
            error_limit: decode_ctx_real(r, 3)?,
        },
        EventType::OutOfRange => EventValues::OutOfRange {
            exceeding_value: decode_ctx_real(r, 0)?,
            status_flags: decode_ctx_bit_string(r, 1)?,
            deadband: decode_ctx_real(r, 2)?,
            exceeded_limit: decode_ctx_real(r, 3)?,
        },
        EventType::ChangeOfLifeSafety => EventValues::ChangeOfLifeSafety {
            new_state: decode_required_ctx_unsigned(r, 0)?,
            new_mode: decode_required_ctx_unsigned(r, 1)?,
            status_flags: decode_ctx_bit_string(r, 2)?,
            operation_expected: decode_required_ctx_unsigned(r, 3)?,
        },
        EventType::BufferReady => {
            expect_opening(r, 0)?;
            let buffer_property = decode_property_reference(r)?;
            expect_closing(r, 0)?;
            EventValues::BufferReady {
                buffer_property,
                previous_notification: decode_required_ctx_unsigned(r, 1)?,
                current_notification: decode_required_ctx_unsigned(r, 2)?,
            }
        }
        EventType::UnsignedRange => EventValues::UnsignedRange {
            exceeding_value: decode_required_ctx_unsigned(r, 0)?,
            status_flags: decode_ctx_bit_string(r, 1)?,
            exceeded_limit: decode_required_ctx_unsigned(r, 2)?,
        },
        EventType::CommandFailure | EventType::Extended | EventType::Other(_) => {
            return Err(DecodeError::Unsupported)
        }
    };
    expect_closing(r, tag_num)?;
    Ok(values)
}

fn decode_ctx_bit_string(r: &mut Reader<'_>, tag_num: u8) -> Result<BitString, DecodeError> {
    match Tag::decode(r)? {
        Tag::Context { tag_num: t, len } if t == tag_num => decode_bit_string(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

fn decode_ctx_real(r: &mut Reader<'_>, tag_num: u8) -> Result<f32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Context { tag_num: t, len } if t == tag_num => decode_real(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

fn encode_property_reference(
    w: &mut Writer<'_>,
    reference: &DeviceObjectPropertyReference,
) -> Result<(), EncodeError> {
    encode_ctx_object_id(w, 0, reference.object_id.raw())?;
    encode_ctx_enumerated(w, 1, reference.property_id.to_u32())?;
    encode_array_index(w, 2, reference.array_index)?;
    if let Some(device_id) = reference.device_id {
        encode_ctx_object_id(w, 3, device_id.raw())?;
    }
    Ok(())
}

fn decode_property_reference(
    r: &mut Reader<'_>,
) -> Result<DeviceObjectPropertyReference, DecodeError> {
    let object_id = decode_required_ctx_object_id(r, 0)?;
    let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
    let array_index = decode_optional_array_index(r, 2)?;
    let device_id = match Tag::peek(r)? {
        Tag::Context { tag_num: 3, .. } => Some(decode_required_ctx_object_id(r, 3)?),
        _ => None,
    };
    Ok(DeviceObjectPropertyReference {
        object_id,
        property_id,
        array_index,
        device_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apdu::ConfirmedRequestHeader;
    use crate::types::{Date, ObjectType, Time};

    fn status_ok() -> BitString {
        BitString::from_bits(&[false; 4])
    }

    fn notification(event_type: EventType, values: Option<EventValues>) -> EventNotification {
        EventNotification {
            process_id: 1,
            initiating_device_id: ObjectId::new(ObjectType::Device, 100),
            event_object_id: ObjectId::new(ObjectType::AnalogInput, 3),
            timestamp: TimeStamp::DateTime {
                date: Date::from_ymd(2024, 3, 1).unwrap(),
                time: Time::new(9, 30, 0, 0),
            },
            notification_class: 5,
            priority: 100,
            event_type,
            message_text: Some("high temp".into()),
            notify_type: NotifyType::Alarm,
            ack_required: true,
            from_state: EventState::Normal,
            to_state: EventState::HighLimit,
            event_values: values,
        }
    }

    fn roundtrip(n: &EventNotification) -> EventNotification {
        let mut buf = [0u8; 256];
        let mut w = Writer::new(&mut buf);
        n.encode_request(4, &mut w).unwrap();
        let mut r = Reader::new(w.as_written());
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(hdr.service_choice, SERVICE_CONFIRMED_EVENT_NOTIFICATION);
        let decoded = EventNotification::decode(&mut r).unwrap();
        assert!(r.is_empty());
        decoded
    }

    #[test]
    fn every_supported_event_type_roundtrips() {
        let all = [
            EventValues::ChangeOfBitstring {
                referenced_bitstring: BitString::from_bits(&[true, false, true]),
                status_flags: status_ok(),
            },
            EventValues::ChangeOfState {
                new_state: PropertyState::Enumerated {
                    tag_num: 1,
                    value: 1,
                },
                status_flags: status_ok(),
            },
            EventValues::ChangeOfState {
                new_state: PropertyState::UnsignedValue(12),
                status_flags: status_ok(),
            },
            EventValues::ChangeOfValue {
                new_value: ChangeOfValue::ChangedValue(21.5),
                status_flags: status_ok(),
            },
            EventValues::ChangeOfValue {
                new_value: ChangeOfValue::ChangedBits(BitString::from_bits(&[true])),
                status_flags: status_ok(),
            },
            EventValues::FloatingLimit {
                reference_value: 30.0,
                status_flags: status_ok(),
                setpoint_value: 25.0,
                error_limit: 2.0,
            },
            EventValues::OutOfRange {
                exceeding_value: 81.0,
                status_flags: status_ok(),
                deadband: 1.0,
                exceeded_limit: 80.0,
            },
            EventValues::ChangeOfLifeSafety {
                new_state: 2,
                new_mode: 1,
                status_flags: status_ok(),
                operation_expected: 0,
            },
            EventValues::BufferReady {
                buffer_property: DeviceObjectPropertyReference {
                    object_id: ObjectId::new(ObjectType::TrendLog, 1),
                    property_id: PropertyId::LogBuffer,
                    array_index: None,
                    device_id: Some(ObjectId::new(ObjectType::Device, 100)),
                },
                previous_notification: 10,
                current_notification: 20,
            },
            EventValues::UnsignedRange {
                exceeding_value: 101,
                status_flags: status_ok(),
                exceeded_limit: 100,
            },
        ];
        for values in all {
            let n = notification(values.event_type(), Some(values));
            assert_eq!(roundtrip(&n), n);
        }
    }

    #[test]
    fn unimplemented_branches_fail_without_writing() {
        let mut buf = [0u8; 128];
        let mut w = Writer::new(&mut buf);
        for event_type in [EventType::Extended, EventType::CommandFailure] {
            let err = notification(event_type, None).encode(&mut w).unwrap_err();
            assert!(matches!(err, EncodeError::NotImplemented(_)));
        }
        let mut ack = notification(
            EventType::UnsignedRange,
            Some(EventValues::UnsignedRange {
                exceeding_value: 1,
                status_flags: status_ok(),
                exceeded_limit: 0,
            }),
        );
        ack.notify_type = NotifyType::AckNotification;
        assert_eq!(
            ack.encode(&mut w),
            Err(EncodeError::NotImplemented("ack notification"))
        );
        assert_eq!(w.position(), 0);
    }

    #[test]
    fn values_must_match_event_type() {
        let n = notification(
            EventType::OutOfRange,
            Some(EventValues::UnsignedRange {
                exceeding_value: 1,
                status_flags: status_ok(),
                exceeded_limit: 0,
            }),
        );
        let mut buf = [0u8; 128];
        let mut w = Writer::new(&mut buf);
        assert!(matches!(n.encode(&mut w), Err(EncodeError::InvalidPayload(_))));
        assert_eq!(w.position(), 0);
    }

    #[test]
    fn empty_message_text_is_omitted() {
        let mut n = notification(
            EventType::ChangeOfBitstring,
            Some(EventValues::ChangeOfBitstring {
                referenced_bitstring: BitString::from_bits(&[true]),
                status_flags: status_ok(),
            }),
        );
        n.message_text = Some(String::new());
        let decoded = roundtrip(&n);
        assert_eq!(decoded.message_text, None);
    }

    #[test]
    fn unconfirmed_framing() {
        let n = notification(
            EventType::ChangeOfBitstring,
            Some(EventValues::ChangeOfBitstring {
                referenced_bitstring: BitString::from_bits(&[true]),
                status_flags: status_ok(),
            }),
        );
        let mut buf = [0u8; 128];
        let mut w = Writer::new(&mut buf);
        n.encode_unconfirmed(&mut w).unwrap();
        assert_eq!(&w.as_written()[..4], &[0x10, 0x03, 0x09, 0x01]);
        let mut r = Reader::new(w.as_written());
        UnconfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(EventNotification::decode(&mut r).unwrap(), n);
    }

    #[test]
    fn ack_notification_decodes_without_ack_fields() {
        let mut buf = [0u8; 64];
        let mut w = Writer::new(&mut buf);
        encode_ctx_unsigned(&mut w, 0, 1).unwrap();
        encode_ctx_object_id(&mut w, 1, ObjectId::new(ObjectType::Device, 1).raw()).unwrap();
        encode_ctx_object_id(&mut w, 2, ObjectId::new(ObjectType::BinaryInput, 2).raw()).unwrap();
        encode_timestamp(&mut w, 3, &TimeStamp::SequenceNumber(9)).unwrap();
        encode_ctx_unsigned(&mut w, 4, 1).unwrap();
        encode_ctx_unsigned(&mut w, 5, 3).unwrap();
        encode_ctx_enumerated(&mut w, 6, 1).unwrap();
        encode_ctx_enumerated(&mut w, 8, 2).unwrap();
        encode_ctx_enumerated(&mut w, 11, 2).unwrap();

        let n = EventNotification::decode(&mut Reader::new(w.as_written())).unwrap();
        assert_eq!(n.notify_type, NotifyType::AckNotification);
        assert_eq!(n.to_state, EventState::Offnormal);
        assert!(!n.ack_required);
        assert_eq!(n.event_values, None);
    }

    #[test]
    fn oversized_priority_is_invalid() {
        let mut buf = [0u8; 64];
        let mut w = Writer::new(&mut buf);
        encode_ctx_unsigned(&mut w, 0, 1).unwrap();
        encode_ctx_object_id(&mut w, 1, ObjectId::new(ObjectType::Device, 1).raw()).unwrap();
        encode_ctx_object_id(&mut w, 2, ObjectId::new(ObjectType::Device, 1).raw()).unwrap();
        encode_timestamp(&mut w, 3, &TimeStamp::SequenceNumber(9)).unwrap();
        encode_ctx_unsigned(&mut w, 4, 1).unwrap();
        encode_ctx_unsigned(&mut w, 5, 256).unwrap();
        assert_eq!(
            EventNotification::decode(&mut Reader::new(w.as_written())),
            Err(DecodeError::InvalidValue)
        );
    }
}
