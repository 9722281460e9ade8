use crate::types::{DataValue, ObjectId, PropertyId, ServiceError};

/// BACnetDeviceObjectReference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceObjectReference {
    pub device_id: Option<ObjectId>,
    pub object_id: ObjectId,
}

/// BACnetDeviceObjectPropertyReference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceObjectPropertyReference {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub device_id: Option<ObjectId>,
}

/// Outcome of reading one property inside a ReadAccessResult.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyAccess {
    Values(Vec<DataValue>),
    Error(ServiceError),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyResult {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub access: PropertyAccess,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadAccessResult {
    pub object_id: ObjectId,
    pub results: Vec<PropertyResult>,
}
