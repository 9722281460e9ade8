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

pub const SERVICE_ADD_LIST_ELEMENT: u8 = 0x08;
pub const SERVICE_REMOVE_LIST_ELEMENT: u8 = 0x09;

/// Payload shared by AddListElement and RemoveListElement.
#[derive(Debug, Clone, PartialEq)]
pub struct ListElementPayload {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub elements: Vec<DataValue>,
}

impl ListElementPayload {
    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.transaction(|w| {
            encode_ctx_object_id(w, 0, self.object_id.raw())?;
            encode_ctx_unsigned(w, 1, self.property_id.to_u32())?;
            encode_array_index(w, 2, self.array_index)?;
            encode_opening_tag(w, 3)?;
            for value in &self.elements {
                encode_application_data(w, value)?;
            }
            encode_closing_tag(w, 3)
        })
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_array_index(r, 2)?;
        expect_opening(r, 3)?;
        let elements = decode_value_list(r, 3, DecodeContext::for_object(object_id, property_id))?;
        Ok(Self {
            object_id,
            property_id,
            array_index,
            elements,
        })
    }
}

/// Answered with a Simple-ACK, so there is no acknowledge payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AddListElementRequest(pub ListElementPayload);

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveListElementRequest(pub ListElementPayload);

impl ConfirmedService for AddListElementRequest {
    const NAME: &'static str = "AddListElement";
    const SERVICE_CHOICE: u8 = SERVICE_ADD_LIST_ELEMENT;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        self.0.encode(w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ListElementPayload::decode(r).map(Self)
    }
}

impl ConfirmedService for RemoveListElementRequest {
    const NAME: &'static str = "RemoveListElement";
    const SERVICE_CHOICE: u8 = SERVICE_REMOVE_LIST_ELEMENT;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        self.0.encode(w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ListElementPayload::decode(r).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apdu::ConfirmedRequestHeader;
    use crate::types::ObjectType;

    fn payload() -> ListElementPayload {
        ListElementPayload {
            object_id: ObjectId::new(ObjectType::AnalogValue, 1),
            property_id: PropertyId::Proprietary(512),
            array_index: None,
            elements: vec![DataValue::Unsigned(1), DataValue::Unsigned(2)],
        }
    }

    #[test]
    fn add_list_element_roundtrip() {
        let req = AddListElementRequest(payload());
        let mut buf = [0u8; 128];
        let mut w = Writer::new(&mut buf);
        req.encode_request(7, &mut w).unwrap();
        let mut r = Reader::new(w.as_written());
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(hdr.service_choice, SERVICE_ADD_LIST_ELEMENT);
        assert_eq!(AddListElementRequest::decode(&mut r).unwrap(), req);
        assert!(r.is_empty());
    }

    #[test]
    fn remove_list_element_roundtrip_with_index() {
        let req = RemoveListElementRequest(ListElementPayload {
            object_id: ObjectId::new(ObjectType::TrendLog, 1),
            array_index: Some(4),
            elements: vec![DataValue::Enumerated(3)],
            ..payload()
        });
        let mut buf = [0u8; 128];
        let mut w = Writer::new(&mut buf);
        req.encode_request(8, &mut w).unwrap();
        let mut r = Reader::new(w.as_written());
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(hdr.service_choice, SERVICE_REMOVE_LIST_ELEMENT);
        assert_eq!(RemoveListElementRequest::decode(&mut r).unwrap(), req);
    }

    #[test]
    fn acknowledge_is_not_supported() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        let err = AddListElementRequest::encode_acknowledge(&(), &mut w).unwrap_err();
        assert_eq!(
            err.to_string(),
            "AddListElement does not support acknowledge operations"
        );
        let err = RemoveListElementRequest::decode_acknowledge(&mut Reader::new(&[0x00]))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::AckNotSupported {
                service: "RemoveListElement"
            }
        );
    }

    #[test]
    fn missing_opening_tag_is_malformed() {
        let bytes = [0x0C, 0x00, 0x80, 0x00, 0x01, 0x1A, 0x02, 0x00, 0x21, 0x01];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            AddListElementRequest::decode(&mut r),
            Err(DecodeError::InvalidTag)
        );
    }
}
