use crate::encoding::reader::Reader;
use crate::DecodeError;

/// PDU type, carried in the high nibble of an APDU's first octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApduType {
    ConfirmedRequest = 0,
    UnconfirmedRequest = 1,
    SimpleAck = 2,
    ComplexAck = 3,
    SegmentAck = 4,
    Error = 5,
    Reject = 6,
    Abort = 7,
}

impl ApduType {
    const ALL: [Self; 8] = [
        Self::ConfirmedRequest,
        Self::UnconfirmedRequest,
        Self::SimpleAck,
        Self::ComplexAck,
        Self::SegmentAck,
        Self::Error,
        Self::Reject,
        Self::Abort,
    ];

    /// Classifies an APDU by its first octet. Types 8 to 15 are reserved.
    pub fn of(first_octet: u8) -> Option<Self> {
        Self::ALL.get(usize::from(first_octet >> 4)).copied()
    }

    /// The first octet with every flag bit clear.
    pub const fn first_octet(self) -> u8 {
        (self as u8) << 4
    }

    /// Reads the first octet, returning it for its flag bits, and fails with
    /// `InvalidValue` if it announces another PDU type.
    pub(crate) fn read_first_octet(self, r: &mut Reader<'_>) -> Result<u8, DecodeError> {
        let b0 = r.read_u8()?;
        if Self::of(b0) == Some(self) {
            Ok(b0)
        } else {
            Err(DecodeError::InvalidValue)
        }
    }
}
