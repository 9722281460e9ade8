use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::services::error::{decode_error_payload, encode_service_error};
use crate::types::{MaxApdu, ServiceError};
use crate::{DecodeError, EncodeError};

/// Max-APDU code put on outgoing requests.
pub const DEFAULT_MAX_APDU: u8 = MaxApdu::UpTo1476 as u8;

const SEGMENTED: u8 = 0b0000_1000;
const MORE_FOLLOWS: u8 = 0b0000_0100;
const SEGMENTED_RESPONSE_ACCEPTED: u8 = 0b0000_0010;

/// Segmentation fields. Only present when the segmented flag is set, which
/// is the only case where the sequence number and window size go on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub sequence_number: u8,
    pub window_size: u8,
    pub more_follows: bool,
}

impl Segment {
    fn flags(segment: Option<&Self>) -> u8 {
        match segment {
            Some(s) if s.more_follows => SEGMENTED | MORE_FOLLOWS,
            Some(_) => SEGMENTED,
            None => 0,
        }
    }

    fn write(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(self.sequence_number)?;
        w.write_u8(self.window_size)
    }

    fn read(first_octet: u8, r: &mut Reader<'_>) -> Result<Option<Self>, DecodeError> {
        if first_octet & SEGMENTED == 0 {
            return Ok(None);
        }
        let [sequence_number, window_size] = r.read_array()?;
        Ok(Some(Self {
            sequence_number,
            window_size,
            more_follows: first_octet & MORE_FOLLOWS != 0,
        }))
    }
}

/// Header of a BACnet-Confirmed-Request-PDU, up to and including the
/// service choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedRequestHeader {
    pub segmented_response_accepted: bool,
    /// Max-segments code in the high nibble of the second octet.
    pub max_segments: u8,
    /// Max-APDU code, see [`MaxApdu`].
    pub max_apdu: u8,
    pub invoke_id: u8,
    pub segment: Option<Segment>,
    pub service_choice: u8,
}

impl ConfirmedRequestHeader {
    /// An unsegmented request that accepts a segmented response.
    pub const fn new(service_choice: u8, invoke_id: u8) -> Self {
        Self {
            segmented_response_accepted: true,
            max_segments: 0,
            max_apdu: DEFAULT_MAX_APDU,
            invoke_id,
            segment: None,
            service_choice,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let mut first =
            ApduType::ConfirmedRequest.first_octet() | Segment::flags(self.segment.as_ref());
        if self.segmented_response_accepted {
            first |= SEGMENTED_RESPONSE_ACCEPTED;
        }
        w.write_u8(first)?;
        w.write_u8((self.max_segments << 4) | (self.max_apdu & 0x0f))?;
        w.write_u8(self.invoke_id)?;
        if let Some(segment) = &self.segment {
            segment.write(w)?;
        }
        w.write_u8(self.service_choice)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = ApduType::ConfirmedRequest.read_first_octet(r)?;
        let [limits, invoke_id] = r.read_array()?;
        let segment = Segment::read(first, r)?;
        Ok(Self {
            segmented_response_accepted: first & SEGMENTED_RESPONSE_ACCEPTED != 0,
            max_segments: limits >> 4,
            max_apdu: limits & 0x0f,
            invoke_id,
            segment,
            service_choice: r.read_u8()?,
        })
    }

    /// Octets the sender accepts in a reply, or `None` for a reserved code.
    pub fn max_apdu_octets(&self) -> Option<u16> {
        MaxApdu::from_u32(u32::from(self.max_apdu)).map(MaxApdu::octets)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexAckHeader {
    pub invoke_id: u8,
    pub segment: Option<Segment>,
    pub service_choice: u8,
}

impl ComplexAckHeader {
    pub const fn new(service_choice: u8, invoke_id: u8) -> Self {
        Self {
            invoke_id,
            segment: None,
            service_choice,
        }
    }

    pub fn is_segmented(&self) -> bool {
        self.segment.is_some()
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::ComplexAck.first_octet() | Segment::flags(self.segment.as_ref()))?;
        w.write_u8(self.invoke_id)?;
        if let Some(segment) = &self.segment {
            segment.write(w)?;
        }
        w.write_u8(self.service_choice)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = ApduType::ComplexAck.read_first_octet(r)?;
        let invoke_id = r.read_u8()?;
        let segment = Segment::read(first, r)?;
        Ok(Self {
            invoke_id,
            segment,
            service_choice: r.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleAck {
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl SimpleAck {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::SimpleAck.first_octet())?;
        w.write_u8(self.invoke_id)?;
        w.write_u8(self.service_choice)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ApduType::SimpleAck.read_first_octet(r)?;
        Ok(Self {
            invoke_id: r.read_u8()?,
            service_choice: r.read_u8()?,
        })
    }
}

/// Error-PDU. The class/code pair is optional on decode since some stacks
/// send the bare header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacnetErrorPdu {
    pub invoke_id: u8,
    pub service_choice: u8,
    pub error: Option<ServiceError>,
}

impl BacnetErrorPdu {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::Error.first_octet())?;
        w.write_u8(self.invoke_id)?;
        w.write_u8(self.service_choice)?;
        match &self.error {
            Some(err) => encode_service_error(w, err),
            None => Ok(()),
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ApduType::Error.read_first_octet(r)?;
        let invoke_id = r.read_u8()?;
        let service_choice = r.read_u8()?;
        let error = if r.is_empty() {
            None
        } else {
            Some(decode_error_payload(r)?)
        };
        Ok(Self {
            invoke_id,
            service_choice,
            error,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectPdu {
    pub invoke_id: u8,
    pub reason: u8,
}

impl RejectPdu {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::Reject.first_octet())?;
        w.write_u8(self.invoke_id)?;
        w.write_u8(self.reason)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ApduType::Reject.read_first_octet(r)?;
        Ok(Self {
            invoke_id: r.read_u8()?,
            reason: r.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortPdu {
    pub server: bool,
    pub invoke_id: u8,
    pub reason: u8,
}

impl AbortPdu {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let mut b0 = ApduType::Abort.first_octet();
        if self.server {
            b0 |= 0x01;
        }
        w.write_u8(b0)?;
        w.write_u8(self.invoke_id)?;
        w.write_u8(self.reason)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = ApduType::Abort.read_first_octet(r)?;
        Ok(Self {
            server: (b0 & 0x01) != 0,
            invoke_id: r.read_u8()?,
            reason: r.read_u8()?,
        })
    }
}
