use crate::encoding::{
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::{BitString, Date, RawDate, Time};
use crate::{DecodeError, EncodeError};

/// Character set byte for UTF-8 (ANSI X3.4 compatible).
pub const CHARSET_UTF8: u8 = 0;
pub const CHARSET_UCS2: u8 = 4;
pub const CHARSET_ISO_8859_1: u8 = 5;

/// Octets left once redundant leading zero octets are dropped; never zero.
const fn unsigned_width(value: u32) -> usize {
    let width = 4 - value.leading_zeros() as usize / 8;
    if width == 0 {
        1
    } else {
        width
    }
}

/// Like [`unsigned_width`], but one sign bit has to survive.
const fn signed_width(value: i32) -> usize {
    let redundant = if value < 0 {
        value.leading_ones()
    } else {
        value.leading_zeros()
    };
    4 - (redundant as usize - 1) / 8
}

/// Writes `value` big-endian in as few octets as possible and returns the
/// count.
pub fn encode_unsigned(w: &mut Writer<'_>, value: u32) -> Result<usize, EncodeError> {
    let width = unsigned_width(value);
    w.write_all(&value.to_be_bytes()[4 - width..])?;
    Ok(width)
}

/// Two's complement, minimal width.
pub fn encode_signed(w: &mut Writer<'_>, value: i32) -> Result<usize, EncodeError> {
    let width = signed_width(value);
    w.write_all(&value.to_be_bytes()[4 - width..])?;
    Ok(width)
}

fn integer_octets<'a>(r: &mut Reader<'a>, len: usize) -> Result<&'a [u8], DecodeError> {
    if !(1..=4).contains(&len) {
        return Err(DecodeError::InvalidLength);
    }
    r.read_exact(len)
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u32, DecodeError> {
    let octets = integer_octets(r, len)?;
    Ok(octets
        .iter()
        .fold(0u32, |acc, &octet| (acc << 8) | u32::from(octet)))
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i32, DecodeError> {
    let octets = integer_octets(r, len)?;
    let sign_fill = if octets[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut word = [sign_fill; 4];
    word[4 - len..].copy_from_slice(octets);
    Ok(i32::from_be_bytes(word))
}

pub fn decode_real(r: &mut Reader<'_>, len: usize) -> Result<f32, DecodeError> {
    if len != 4 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(f32::from_be_bytes(r.read_array()?))
}

pub fn decode_double(r: &mut Reader<'_>, len: usize) -> Result<f64, DecodeError> {
    if len != 8 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(f64::from_be_bytes(r.read_array()?))
}

/// Decodes a character string payload of `len` bytes, charset byte included.
pub fn decode_character_string(r: &mut Reader<'_>, len: usize) -> Result<String, DecodeError> {
    if len == 0 {
        return Err(DecodeError::InvalidLength);
    }
    let raw = r.read_exact(len)?;
    let body = &raw[1..];
    match raw[0] {
        CHARSET_UTF8 => core::str::from_utf8(body)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidValue),
        CHARSET_UCS2 => {
            if body.len() % 2 != 0 {
                return Err(DecodeError::InvalidLength);
            }
            let units = body
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]));
            char::decode_utf16(units)
                .collect::<Result<String, _>>()
                .map_err(|_| DecodeError::InvalidValue)
        }
        CHARSET_ISO_8859_1 => Ok(body.iter().map(|&b| b as char).collect()),
        _ => Err(DecodeError::Unsupported),
    }
}

pub fn decode_bit_string(r: &mut Reader<'_>, len: usize) -> Result<BitString, DecodeError> {
    if len == 0 {
        return Err(DecodeError::InvalidLength);
    }
    let raw = r.read_exact(len)?;
    BitString::from_wire(raw[0], &raw[1..]).ok_or(DecodeError::InvalidValue)
}

pub fn decode_date(r: &mut Reader<'_>, len: usize) -> Result<Date, DecodeError> {
    if len != 4 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(Date::from_raw(RawDate::from_bytes(r.read_array()?)))
}

pub fn decode_time(r: &mut Reader<'_>, len: usize) -> Result<Time, DecodeError> {
    if len != 4 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(Time::from_bytes(r.read_array()?))
}

pub fn decode_boolean(r: &mut Reader<'_>, len: usize) -> Result<bool, DecodeError> {
    if len != 1 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(r.read_u8()? != 0)
}

fn u32_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::ValueOutOfRange)
}

/// Writes a tag header followed by its payload. If the payload does not fit,
/// the header is rolled back with it.
fn write_primitive(
    w: &mut Writer<'_>,
    tag: Tag,
    payload: impl FnOnce(&mut Writer<'_>) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    w.transaction(|w| {
        tag.encode(w)?;
        payload(w)
    })
}

fn encode_tagged_unsigned(w: &mut Writer<'_>, tag: Tag, value: u32) -> Result<(), EncodeError> {
    write_primitive(w, with_len(tag, unsigned_width(value) as u32), |w| {
        encode_unsigned(w, value).map(drop)
    })
}

fn encode_tagged_signed(w: &mut Writer<'_>, tag: Tag, value: i32) -> Result<(), EncodeError> {
    write_primitive(w, with_len(tag, signed_width(value) as u32), |w| {
        encode_signed(w, value).map(drop)
    })
}

fn with_len(tag: Tag, len: u32) -> Tag {
    match tag {
        Tag::Application { tag, .. } => Tag::Application { tag, len },
        Tag::Context { tag_num, .. } => Tag::Context { tag_num, len },
        other => other,
    }
}

const fn app(tag: AppTag) -> Tag {
    Tag::Application { tag, len: 0 }
}

const fn ctx(tag_num: u8) -> Tag {
    Tag::Context { tag_num, len: 0 }
}

fn encode_bit_string_body(w: &mut Writer<'_>, tag: Tag, value: &BitString) -> Result<(), EncodeError> {
    let tag = with_len(tag, u32_len(value.data().len() + 1)?);
    write_primitive(w, tag, |w| {
        w.write_u8(value.unused_bits())?;
        w.write_all(value.data())
    })
}

fn encode_date_body(w: &mut Writer<'_>, tag: Tag, value: &Date) -> Result<(), EncodeError> {
    let raw = value.raw();
    raw.validate()?;
    write_primitive(w, with_len(tag, 4), |w| w.write_all(&raw.to_bytes()))
}

fn encode_string_body(w: &mut Writer<'_>, tag: Tag, value: &str) -> Result<(), EncodeError> {
    let bytes = value.as_bytes();
    write_primitive(w, with_len(tag, u32_len(bytes.len() + 1)?), |w| {
        w.write_u8(CHARSET_UTF8)?;
        w.write_all(bytes)
    })
}

pub fn encode_app_null(w: &mut Writer<'_>) -> Result<(), EncodeError> {
    app(AppTag::Null).encode(w)
}

pub fn encode_app_boolean(w: &mut Writer<'_>, value: bool) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::Boolean,
        len: value as u32,
    }
    .encode(w)
}

pub fn encode_app_unsigned(w: &mut Writer<'_>, value: u32) -> Result<(), EncodeError> {
    encode_tagged_unsigned(w, app(AppTag::UnsignedInt), value)
}

pub fn encode_app_enumerated(w: &mut Writer<'_>, value: u32) -> Result<(), EncodeError> {
    encode_tagged_unsigned(w, app(AppTag::Enumerated), value)
}

pub fn encode_app_object_id(w: &mut Writer<'_>, object_id_raw: u32) -> Result<(), EncodeError> {
    write_primitive(w, with_len(app(AppTag::ObjectId), 4), |w| {
        w.write_be_u32(object_id_raw)
    })
}

pub fn encode_app_signed(w: &mut Writer<'_>, value: i32) -> Result<(), EncodeError> {
    encode_tagged_signed(w, app(AppTag::SignedInt), value)
}

pub fn encode_app_real(w: &mut Writer<'_>, value: f32) -> Result<(), EncodeError> {
    write_primitive(w, with_len(app(AppTag::Real), 4), |w| {
        w.write_all(&value.to_be_bytes())
    })
}

pub fn encode_app_double(w: &mut Writer<'_>, value: f64) -> Result<(), EncodeError> {
    write_primitive(w, with_len(app(AppTag::Double), 8), |w| {
        w.write_all(&value.to_be_bytes())
    })
}

pub fn encode_app_octet_string(w: &mut Writer<'_>, value: &[u8]) -> Result<(), EncodeError> {
    let tag = with_len(app(AppTag::OctetString), u32_len(value.len())?);
    write_primitive(w, tag, |w| w.write_all(value))
}

pub fn encode_app_character_string(w: &mut Writer<'_>, value: &str) -> Result<(), EncodeError> {
    encode_string_body(w, app(AppTag::CharacterString), value)
}

pub fn encode_app_bit_string(w: &mut Writer<'_>, value: &BitString) -> Result<(), EncodeError> {
    encode_bit_string_body(w, app(AppTag::BitString), value)
}

pub fn encode_app_date(w: &mut Writer<'_>, value: &Date) -> Result<(), EncodeError> {
    encode_date_body(w, app(AppTag::Date), value)
}

pub fn encode_app_time(w: &mut Writer<'_>, value: &Time) -> Result<(), EncodeError> {
    write_primitive(w, with_len(app(AppTag::Time), 4), |w| {
        w.write_all(&value.to_bytes())
    })
}

pub fn decode_app_unsigned(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::UnsignedInt,
            len,
        } => decode_unsigned(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_app_enumerated(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Enumerated,
            len,
        } => decode_unsigned(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_app_signed(r: &mut Reader<'_>) -> Result<i32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::SignedInt,
            len,
        } => decode_signed(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_app_real(r: &mut Reader<'_>) -> Result<f32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Real,
            len,
        } => decode_real(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_app_date(r: &mut Reader<'_>) -> Result<Date, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Date,
            len,
        } => decode_date(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_app_time(r: &mut Reader<'_>) -> Result<Time, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Time,
            len,
        } => decode_time(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn encode_ctx_unsigned(w: &mut Writer<'_>, tag_num: u8, value: u32) -> Result<(), EncodeError> {
    encode_tagged_unsigned(w, ctx(tag_num), value)
}

pub fn encode_ctx_enumerated(
    w: &mut Writer<'_>,
    tag_num: u8,
    value: u32,
) -> Result<(), EncodeError> {
    encode_tagged_unsigned(w, ctx(tag_num), value)
}

pub fn encode_ctx_object_id(
    w: &mut Writer<'_>,
    tag_num: u8,
    object_id_raw: u32,
) -> Result<(), EncodeError> {
    write_primitive(w, with_len(ctx(tag_num), 4), |w| {
        w.write_be_u32(object_id_raw)
    })
}

pub fn encode_ctx_signed(w: &mut Writer<'_>, tag_num: u8, value: i32) -> Result<(), EncodeError> {
    encode_tagged_signed(w, ctx(tag_num), value)
}

pub fn encode_ctx_real(w: &mut Writer<'_>, tag_num: u8, value: f32) -> Result<(), EncodeError> {
    write_primitive(w, with_len(ctx(tag_num), 4), |w| {
        w.write_all(&value.to_be_bytes())
    })
}

/// Context booleans carry their value in a one-byte payload, unlike the
/// application form.
pub fn encode_ctx_boolean(w: &mut Writer<'_>, tag_num: u8, value: bool) -> Result<(), EncodeError> {
    write_primitive(w, with_len(ctx(tag_num), 1), |w| w.write_u8(u8::from(value)))
}

pub fn encode_ctx_character_string(
    w: &mut Writer<'_>,
    tag_num: u8,
    value: &str,
) -> Result<(), EncodeError> {
    encode_string_body(w, ctx(tag_num), value)
}

pub fn encode_ctx_bit_string(
    w: &mut Writer<'_>,
    tag_num: u8,
    value: &BitString,
) -> Result<(), EncodeError> {
    encode_bit_string_body(w, ctx(tag_num), value)
}

pub fn encode_ctx_date(w: &mut Writer<'_>, tag_num: u8, value: &Date) -> Result<(), EncodeError> {
    encode_date_body(w, ctx(tag_num), value)
}

pub fn encode_ctx_time(w: &mut Writer<'_>, tag_num: u8, value: &Time) -> Result<(), EncodeError> {
    write_primitive(w, with_len(ctx(tag_num), 4), |w| {
        w.write_all(&value.to_bytes())
    })
}

pub fn encode_opening_tag(w: &mut Writer<'_>, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Opening { tag_num }.encode(w)
}

pub fn encode_closing_tag(w: &mut Writer<'_>, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Closing { tag_num }.encode(w)
}

#[cfg(test)]
mod tests {
    use super::{
        decode_app_date, decode_app_signed, decode_app_unsigned, decode_bit_string,
        decode_character_string, decode_signed, decode_unsigned, encode_app_date, encode_app_real,
        encode_app_signed, encode_app_unsigned, encode_ctx_bit_string, encode_ctx_boolean,
        encode_ctx_character_string, encode_signed, encode_unsigned,
    };
    use crate::encoding::{reader::Reader, tag::Tag, writer::Writer};
    use crate::types::{BitString, Date, RawDate};
    use crate::{DecodeError, EncodeError};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn app_integers_roundtrip(u in any::<u32>(), i in any::<i32>()) {
            let mut b = [0u8; 16];
            let mut w = Writer::new(&mut b);
            encode_app_unsigned(&mut w, u).unwrap();
            encode_app_signed(&mut w, i).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_app_unsigned(&mut r).unwrap(), u);
            prop_assert_eq!(decode_app_signed(&mut r).unwrap(), i);
            prop_assert!(r.is_empty());
        }

        #[test]
        fn raw_date_roundtrip(year in any::<u8>(), month in 1u8..=14, day in 1u8..=34, wday in 1u8..=7) {
            let date = Date::from_raw(RawDate::new(year, month, day, wday));
            let mut b = [0u8; 8];
            let mut w = Writer::new(&mut b);
            encode_app_date(&mut w, &date).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_app_date(&mut r).unwrap(), date);
        }
    }

    #[test]
    fn unsigned_uses_minimal_width() {
        for (value, width) in [
            (1u32, 1usize),
            (255, 1),
            (256, 2),
            (65535, 2),
            (65536, 3),
            (16_777_215, 3),
            (16_777_216, 4),
            (4_294_967_295, 4),
        ] {
            let mut b = [0u8; 4];
            let mut w = Writer::new(&mut b);
            assert_eq!(encode_unsigned(&mut w, value).unwrap(), width, "{value}");
            let mut r = Reader::new(w.as_written());
            assert_eq!(decode_unsigned(&mut r, width).unwrap(), value);
        }
    }

    #[test]
    fn signed_keeps_one_sign_bit() {
        for (value, wire) in [
            (0i32, &[0x00][..]),
            (127, &[0x7F][..]),
            (128, &[0x00, 0x80][..]),
            (-128, &[0x80][..]),
            (-129, &[0xFF, 0x7F][..]),
            (8_388_607, &[0x7F, 0xFF, 0xFF][..]),
            (-8_388_609, &[0xFF, 0x7F, 0xFF, 0xFF][..]),
            (i32::MIN, &[0x80, 0x00, 0x00, 0x00][..]),
        ] {
            let mut b = [0u8; 4];
            let mut w = Writer::new(&mut b);
            assert_eq!(encode_signed(&mut w, value).unwrap(), wire.len(), "{value}");
            assert_eq!(w.as_written(), wire);
            let mut r = Reader::new(wire);
            assert_eq!(decode_signed(&mut r, wire.len()).unwrap(), value);
        }
    }

    #[test]
    fn integer_length_must_be_one_to_four() {
        let mut r = Reader::new(&[0; 8]);
        assert_eq!(decode_unsigned(&mut r, 0), Err(DecodeError::InvalidLength));
        assert_eq!(decode_signed(&mut r, 5), Err(DecodeError::InvalidLength));
    }

    #[test]
    fn short_buffer_leaves_no_orphan_tag() {
        let mut b = [0u8; 4];
        let mut w = Writer::new(&mut b);
        w.write_u8(0xAA).unwrap();
        assert_eq!(
            encode_ctx_character_string(&mut w, 2, "hello"),
            Err(EncodeError::BufferTooSmall)
        );
        assert_eq!(encode_app_real(&mut w, 1.0), Err(EncodeError::BufferTooSmall));
        assert_eq!(
            encode_app_unsigned(&mut w, 0x0001_0000),
            Err(EncodeError::BufferTooSmall)
        );
        assert_eq!(w.as_written(), &[0xAA]);
        encode_app_unsigned(&mut w, 0x0102).unwrap();
        assert_eq!(w.as_written(), &[0xAA, 0x22, 0x01, 0x02]);
    }

    #[test]
    fn ctx_character_string_roundtrip() {
        let mut b = [0u8; 32];
        let mut w = Writer::new(&mut b);
        encode_ctx_character_string(&mut w, 2, "hello").unwrap();
        let mut r = Reader::new(w.as_written());
        match Tag::decode(&mut r).unwrap() {
            Tag::Context { tag_num: 2, len } => {
                let got = decode_character_string(&mut r, len as usize).unwrap();
                assert_eq!(got, "hello");
            }
            other => panic!("unexpected tag: {other:?}"),
        }
    }

    #[test]
    fn decodes_ucs2_and_latin1() {
        let mut r = Reader::new(&[4, 0x00, 0x48, 0x00, 0xE9]);
        assert_eq!(decode_character_string(&mut r, 5).unwrap(), "Hé");
        let mut r = Reader::new(&[5, 0x48, 0xE9]);
        assert_eq!(decode_character_string(&mut r, 3).unwrap(), "Hé");
        let mut r = Reader::new(&[1, 0x48]);
        assert!(decode_character_string(&mut r, 2).is_err());
    }

    #[test]
    fn bit_string_edges() {
        let mut b = [0u8; 16];
        let mut w = Writer::new(&mut b);
        encode_ctx_bit_string(&mut w, 3, &BitString::new(0, Vec::new())).unwrap();
        assert_eq!(w.as_written(), &[0x39, 0x00]);

        let mut b = [0u8; 16];
        let mut w = Writer::new(&mut b);
        let wide = BitString::new(35, vec![0xFF; 5]);
        encode_ctx_bit_string(&mut w, 3, &wide).unwrap();
        assert_eq!(
            w.as_written(),
            &[0x3D, 6, 5, 0xFF, 0xFF, 0xFF, 0xFF, 0xE0]
        );
        let mut r = Reader::new(&w.as_written()[2..]);
        let got = decode_bit_string(&mut r, 6).unwrap();
        assert_eq!(got.bits_used(), 35);
        assert_eq!(got, wide);
    }

    #[test]
    fn ctx_boolean_has_payload_byte() {
        let mut b = [0u8; 4];
        let mut w = Writer::new(&mut b);
        encode_ctx_boolean(&mut w, 9, true).unwrap();
        assert_eq!(w.as_written(), &[0x99, 0x01]);
    }

    #[test]
    fn invalid_raw_date_is_rejected_before_writing() {
        let mut b = [0u8; 8];
        let mut w = Writer::new(&mut b);
        let date = Date::from_raw(RawDate::new(0xFF, 42, 0xFF, 0xFF));
        assert_eq!(
            encode_app_date(&mut w, &date),
            Err(EncodeError::InvalidRawDate {
                field: "month",
                value: 42
            })
        );
        assert_eq!(w.position(), 0);
    }

    #[test]
    fn raw_pattern_dates_encode_verbatim() {
        let mut b = [0u8; 8];
        let mut w = Writer::new(&mut b);
        encode_app_date(&mut w, &Date::from_raw(RawDate::new(0xFF, 14, 0xFF, 0xFF))).unwrap();
        assert_eq!(w.as_written(), &[0xA4, 0xFF, 0x0E, 0xFF, 0xFF]);
    }
}
