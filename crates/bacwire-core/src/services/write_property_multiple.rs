use crate::encoding::{
    primitives::{encode_closing_tag, encode_ctx_object_id, encode_ctx_unsigned, encode_opening_tag},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::value_codec::{decode_application_data, encode_application_data, DecodeContext};
use crate::services::{
    check_priority, decode_optional_array_index, decode_optional_ctx_unsigned,
    decode_required_ctx_object_id, decode_required_ctx_unsigned, encode_array_index,
    ConfirmedService, MAX_PRIORITY, MIN_PRIORITY,
};
use crate::types::{DataValue, ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};

pub const SERVICE_WRITE_PROPERTY_MULTIPLE: u8 = 0x10;

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyWriteSpec {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub values: Vec<DataValue>,
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteAccessSpecification {
    pub object_id: ObjectId,
    pub properties: Vec<PropertyWriteSpec>,
}

impl WriteAccessSpecification {
    /// `[0]` object, then `[1]` around the property list.
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        for p in &self.properties {
            check_priority(p.priority)?;
        }
        w.transaction(|w| {
            encode_ctx_object_id(w, 0, self.object_id.raw())?;
            encode_opening_tag(w, 1)?;
            for p in &self.properties {
                encode_ctx_unsigned(w, 0, p.property_id.to_u32())?;
                encode_array_index(w, 1, p.array_index)?;
                encode_opening_tag(w, 2)?;
                for value in &p.values {
                    encode_application_data(w, value)?;
                }
                encode_closing_tag(w, 2)?;
                if let Some(priority) = p.priority {
                    encode_ctx_unsigned(w, 3, priority as u32)?;
                }
            }
            encode_closing_tag(w, 1)
        })
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = decode_required_ctx_object_id(r, 0)?;
        let mut tags = TagStack::default();
        tags.open(r, 1)?;
        let mut properties = Vec::new();
        while !tags.at_close(r)? {
            let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 0)?);
            let array_index = decode_optional_array_index(r, 1)?;
            let ctx = DecodeContext::for_object(object_id, property_id);

            tags.open(r, 2)?;
            let mut values = Vec::new();
            while !tags.at_close(r)? {
                values.push(decode_application_data(r, ctx)?);
            }
            tags.close(r)?;

            let priority = match decode_optional_ctx_unsigned(r, 3)? {
                Some(p) if (MIN_PRIORITY as u32..=MAX_PRIORITY as u32).contains(&p) => {
                    Some(p as u8)
                }
                Some(_) => return Err(DecodeError::InvalidValue),
                None => None,
            };
            properties.push(PropertyWriteSpec {
                property_id,
                array_index,
                values,
                priority,
            });
        }
        tags.close(r)?;
        Ok(Self {
            object_id,
            properties,
        })
    }
}

/// Open constructed tags, innermost last. Property lists (`[1]`) and value
/// lists (`[2]`) nest, and values can contain constructed data of their
/// own, so closing tags are matched against this rather than counted.
#[derive(Debug, Default)]
struct TagStack(Vec<u8>);

impl TagStack {
    fn open(&mut self, r: &mut Reader<'_>, tag_num: u8) -> Result<(), DecodeError> {
        match Tag::decode(r)? {
            Tag::Opening { tag_num: t } if t == tag_num => {
                self.0.push(tag_num);
                Ok(())
            }
            _ => Err(DecodeError::InvalidTag),
        }
    }

    fn at_close(&self, r: &Reader<'_>) -> Result<bool, DecodeError> {
        let top = self.0.last().copied().ok_or(DecodeError::InvalidTag)?;
        Ok(Tag::peek(r)?.is_closing(top))
    }

    fn close(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        let top = self.0.pop().ok_or(DecodeError::InvalidTag)?;
        if Tag::decode(r)?.is_closing(top) {
            Ok(())
        } else {
            Err(DecodeError::InvalidTag)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritePropertyMultipleRequest {
    pub objects: Vec<WriteAccessSpecification>,
}

impl WritePropertyMultipleRequest {
    /// Decodes every object batch in `r`.
    pub fn decode_all(r: &mut Reader<'_>) -> Result<Vec<WriteAccessSpecification>, DecodeError> {
        let mut objects = Vec::new();
        while !r.is_empty() {
            objects.push(WriteAccessSpecification::decode(r)?);
        }
        Ok(objects)
    }
}

/// Writes several object batches back to back.
pub fn encode_objects(
    w: &mut Writer<'_>,
    objects: &[WriteAccessSpecification],
) -> Result<(), EncodeError> {
    w.transaction(|w| objects.iter().try_for_each(|o| o.encode(w)))
}

impl ConfirmedService for WritePropertyMultipleRequest {
    const NAME: &'static str = "WritePropertyMultiple";
    const SERVICE_CHOICE: u8 = SERVICE_WRITE_PROPERTY_MULTIPLE;
    type Ack = ();

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_objects(w, &self.objects)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            objects: Self::decode_all(r)?,
        })
    }
}
