use core::fmt;

use crate::types::ObjectType;

/// Highest instance number; also the "unconfigured" device instance.
pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

const TYPE_MASK: u32 = 0x03FF;

/// BACnetObjectIdentifier as it travels on the wire: 10 bits of type above
/// 22 bits of instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self::from_parts(object_type.to_u16(), instance)
    }

    /// Packs a numeric type and an instance. Bits beyond 10 and 22 are
    /// dropped.
    pub const fn from_parts(object_type: u16, instance: u32) -> Self {
        Self(((object_type as u32 & TYPE_MASK) << 22) | (instance & MAX_INSTANCE))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn object_type(self) -> ObjectType {
        ObjectType::from_u16(self.type_number())
    }

    /// The type as a number, so proprietary types need no matching.
    pub const fn type_number(self) -> u16 {
        ((self.0 >> 22) & TYPE_MASK) as u16
    }

    pub const fn instance(self) -> u32 {
        self.0 & MAX_INSTANCE
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_type() {
            ObjectType::Proprietary(t) => write!(f, "{t}:{}", self.instance()),
            t => write!(f, "{t:?}:{}", self.instance()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjectId, MAX_INSTANCE};
    use crate::types::ObjectType;

    #[test]
    fn packs_type_above_instance() {
        let id = ObjectId::new(ObjectType::AnalogValue, 1);
        assert_eq!(id.raw(), 0x0080_0001);
        assert_eq!(id.object_type(), ObjectType::AnalogValue);
        assert_eq!(id.instance(), 1);
    }

    #[test]
    fn proprietary_types_survive_packing() {
        let id = ObjectId::from_parts(600, 600);
        assert_eq!(id.raw().to_be_bytes(), [150, 0, 2, 88]);
        assert_eq!(id.type_number(), 600);
        assert_eq!(id.object_type(), ObjectType::Proprietary(600));
        assert_eq!(ObjectId::new(ObjectType::Proprietary(600), 600), id);
        assert_eq!(ObjectId::from_parts(1023, MAX_INSTANCE).raw(), u32::MAX);
    }

    #[test]
    fn display_names_the_type() {
        assert_eq!(ObjectId::new(ObjectType::Device, 7).to_string(), "Device:7");
        assert_eq!(ObjectId::from_parts(700, 3).to_string(), "700:3");
    }
}
