//! Error payloads: the class/code pair carried by Error-PDUs, log record
//! failures and ReadPropertyMultiple results.

use crate::encoding::{
    primitives::{decode_app_enumerated, decode_unsigned, encode_app_enumerated},
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::services::expect_closing;
use crate::types::ServiceError;
use crate::{DecodeError, EncodeError};

/// Error class and code as two application enumerateds.
pub fn encode_service_error(w: &mut Writer<'_>, value: &ServiceError) -> Result<(), EncodeError> {
    w.transaction(|w| {
        encode_app_enumerated(w, value.error_class)?;
        encode_app_enumerated(w, value.error_code)
    })
}

pub fn decode_service_error(r: &mut Reader<'_>) -> Result<ServiceError, DecodeError> {
    let error_class = decode_app_enumerated(r)?;
    let error_code = decode_app_enumerated(r)?;
    Ok(ServiceError {
        error_class,
        error_code,
    })
}

/// Reads the payload of an Error-PDU.
///
/// Devices disagree on the shape: besides the plain application form, the
/// pair may be context tagged `[0]`/`[1]` or wrapped in opening/closing `[0]`.
pub fn decode_error_payload(r: &mut Reader<'_>) -> Result<ServiceError, DecodeError> {
    let first = Tag::decode(r)?;
    let wrapped = first.is_opening(0);
    let class_tag = if wrapped { Tag::decode(r)? } else { first };
    let error_class = decode_error_value(r, class_tag, 0)?;
    let code_tag = Tag::decode(r)?;
    let error_code = decode_error_value(r, code_tag, 1)?;
    if wrapped {
        expect_closing(r, 0)?;
    }
    Ok(ServiceError {
        error_class,
        error_code,
    })
}

fn decode_error_value(r: &mut Reader<'_>, tag: Tag, ctx_tag: u8) -> Result<u32, DecodeError> {
    match tag {
        Tag::Context { tag_num, len } if tag_num == ctx_tag => decode_unsigned(r, len as usize),
        Tag::Application {
            tag: AppTag::Enumerated,
            len,
        } => decode_unsigned(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorClass, ErrorCode};

    fn unknown_object() -> ServiceError {
        ServiceError::new(ErrorClass::Object, ErrorCode::UnknownObject)
    }

    #[test]
    fn application_form_bytes() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        encode_service_error(&mut w, &unknown_object()).unwrap();
        assert_eq!(w.as_written(), &[0x91, 0x01, 0x91, 0x1F]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_service_error(&mut r).unwrap(), unknown_object());
    }

    #[test]
    fn error_payload_accepts_all_forms() {
        let forms: [&[u8]; 3] = [
            &[0x91, 0x01, 0x91, 0x1F],
            &[0x09, 0x01, 0x19, 0x1F],
            &[0x0E, 0x91, 0x01, 0x91, 0x1F, 0x0F],
        ];
        for bytes in forms {
            let mut r = Reader::new(bytes);
            assert_eq!(decode_error_payload(&mut r).unwrap(), unknown_object());
            assert!(r.is_empty());
        }
    }

    #[test]
    fn error_payload_rejects_wrong_tags() {
        let mut r = Reader::new(&[0x19, 0x01, 0x09, 0x1F]);
        assert_eq!(decode_error_payload(&mut r), Err(DecodeError::InvalidTag));
        let mut r = Reader::new(&[0x0E, 0x91, 0x01, 0x91, 0x1F]);
        assert!(decode_error_payload(&mut r).unwrap_err().is_malformed());
    }

    #[test]
    fn message_names_class_and_code() {
        assert_eq!(
            unknown_object().to_string(),
            "BacnetError Class: Object (1) Code: UnknownObject (31)"
        );
        let unknown = ServiceError {
            error_class: 77,
            error_code: 900,
        };
        assert_eq!(
            unknown.to_string(),
            "BacnetError Class: Unknown (77) Code: Unknown (900)"
        );
    }
}
