use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Application tag numbers.
///
/// 0 to 12 are the primitive BACnet types. `WeekNDay` is the pseudo tag some
/// peers put on the wire for a bare week-n-day pattern; it needs the extended
/// tag-number byte. Anything else is carried through as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTag {
    Null,
    Boolean,
    UnsignedInt,
    SignedInt,
    Real,
    Double,
    OctetString,
    CharacterString,
    BitString,
    Enumerated,
    Date,
    Time,
    ObjectId,
    WeekNDay,
    Other(u8),
}

impl AppTag {
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Boolean => 1,
            Self::UnsignedInt => 2,
            Self::SignedInt => 3,
            Self::Real => 4,
            Self::Double => 5,
            Self::OctetString => 6,
            Self::CharacterString => 7,
            Self::BitString => 8,
            Self::Enumerated => 9,
            Self::Date => 10,
            Self::Time => 11,
            Self::ObjectId => 12,
            Self::WeekNDay => 101,
            Self::Other(v) => v,
        }
    }

    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Null,
            1 => Self::Boolean,
            2 => Self::UnsignedInt,
            3 => Self::SignedInt,
            4 => Self::Real,
            5 => Self::Double,
            6 => Self::OctetString,
            7 => Self::CharacterString,
            8 => Self::BitString,
            9 => Self::Enumerated,
            10 => Self::Date,
            11 => Self::Time,
            12 => Self::ObjectId,
            101 => Self::WeekNDay,
            v => Self::Other(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag: AppTag, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

const CONTEXT_CLASS: u8 = 0b0000_1000;
const EXTENDED_TAG_NUMBER: u8 = 0x0F;
const EXTENDED_LENGTH: u8 = 5;
const OPENING: u8 = 6;
const CLOSING: u8 = 7;

impl Tag {
    pub fn encode(self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        match self {
            Tag::Application { tag, len } => write_sized(w, tag.to_u8(), 0, len),
            Tag::Context { tag_num, len } => write_sized(w, tag_num, CONTEXT_CLASS, len),
            Tag::Opening { tag_num } => write_header(w, tag_num, CONTEXT_CLASS | OPENING),
            Tag::Closing { tag_num } => write_header(w, tag_num, CONTEXT_CLASS | CLOSING),
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = r.read_u8()?;
        let tag_num = match first >> 4 {
            EXTENDED_TAG_NUMBER => r.read_u8()?,
            n => n,
        };
        let context = first & CONTEXT_CLASS != 0;
        match (context, first & 0x07) {
            (true, OPENING) => Ok(Tag::Opening { tag_num }),
            (true, CLOSING) => Ok(Tag::Closing { tag_num }),
            (true, code) => Ok(Tag::Context {
                tag_num,
                len: read_length(r, code)?,
            }),
            (false, code) => Ok(Tag::Application {
                tag: AppTag::from_u8(tag_num),
                len: read_length(r, code)?,
            }),
        }
    }

    /// Decodes the next tag without consuming it.
    pub fn peek(r: &Reader<'_>) -> Result<Self, DecodeError> {
        let mut ahead = *r;
        Tag::decode(&mut ahead)
    }

    pub const fn is_closing(self, expected: u8) -> bool {
        matches!(self, Tag::Closing { tag_num } if tag_num == expected)
    }

    pub const fn is_opening(self, expected: u8) -> bool {
        matches!(self, Tag::Opening { tag_num } if tag_num == expected)
    }
}

/// Writes the initial octet plus the extended tag-number octet when the
/// number does not fit the high nibble.
fn write_header(w: &mut Writer<'_>, tag_num: u8, low_bits: u8) -> Result<(), EncodeError> {
    if tag_num < EXTENDED_TAG_NUMBER {
        w.write_u8((tag_num << 4) | low_bits)
    } else {
        w.write_u8((EXTENDED_TAG_NUMBER << 4) | low_bits)?;
        w.write_u8(tag_num)
    }
}

fn write_sized(w: &mut Writer<'_>, tag_num: u8, class: u8, len: u32) -> Result<(), EncodeError> {
    match u8::try_from(len) {
        Ok(short) if short < EXTENDED_LENGTH => write_header(w, tag_num, class | short),
        Ok(short) if short <= 253 => {
            write_header(w, tag_num, class | EXTENDED_LENGTH)?;
            w.write_u8(short)
        }
        _ => {
            write_header(w, tag_num, class | EXTENDED_LENGTH)?;
            match u16::try_from(len) {
                Ok(medium) => {
                    w.write_u8(254)?;
                    w.write_be_u16(medium)
                }
                Err(_) => {
                    w.write_u8(255)?;
                    w.write_be_u32(len)
                }
            }
        }
    }
}

fn read_length(r: &mut Reader<'_>, code: u8) -> Result<u32, DecodeError> {
    if code < EXTENDED_LENGTH {
        return Ok(u32::from(code));
    }
    if code > EXTENDED_LENGTH {
        return Err(DecodeError::InvalidLength);
    }
    match r.read_u8()? {
        254 => r.read_be_u16().map(u32::from),
        255 => r.read_be_u32(),
        short => Ok(u32::from(short)),
    }
}
