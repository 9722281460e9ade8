/// BACnet property identifiers.
///
/// Properties this crate gives special treatment to, plus the common ones,
/// are named variants; everything else uses [`Proprietary`](Self::Proprietary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyId {
    DateList,
    Description,
    EffectivePeriod,
    EventState,
    ExceptionSchedule,
    LogBuffer,
    ObjectIdentifier,
    ObjectName,
    ObjectType,
    OutOfService,
    PresentValue,
    PriorityArray,
    RecordCount,
    StatusFlags,
    SubordinateList,
    Units,
    VendorName,
    WeeklySchedule,
    Proprietary(u32),
}

impl PropertyId {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::DateList => 23,
            Self::Description => 28,
            Self::EffectivePeriod => 32,
            Self::EventState => 36,
            Self::ExceptionSchedule => 38,
            Self::LogBuffer => 131,
            Self::ObjectIdentifier => 75,
            Self::ObjectName => 77,
            Self::ObjectType => 79,
            Self::OutOfService => 81,
            Self::PresentValue => 85,
            Self::PriorityArray => 87,
            Self::RecordCount => 141,
            Self::StatusFlags => 111,
            Self::SubordinateList => 211,
            Self::Units => 117,
            Self::VendorName => 121,
            Self::WeeklySchedule => 123,
            Self::Proprietary(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            23 => Self::DateList,
            28 => Self::Description,
            32 => Self::EffectivePeriod,
            36 => Self::EventState,
            38 => Self::ExceptionSchedule,
            131 => Self::LogBuffer,
            75 => Self::ObjectIdentifier,
            77 => Self::ObjectName,
            79 => Self::ObjectType,
            81 => Self::OutOfService,
            85 => Self::PresentValue,
            87 => Self::PriorityArray,
            141 => Self::RecordCount,
            111 => Self::StatusFlags,
            211 => Self::SubordinateList,
            117 => Self::Units,
            121 => Self::VendorName,
            123 => Self::WeeklySchedule,
            v => Self::Proprietary(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyId;

    #[test]
    fn numbers_roundtrip() {
        for id in [
            PropertyId::WeeklySchedule,
            PropertyId::ExceptionSchedule,
            PropertyId::EffectivePeriod,
            PropertyId::DateList,
            PropertyId::SubordinateList,
            PropertyId::Proprietary(4_000),
        ] {
            assert_eq!(PropertyId::from_u32(id.to_u32()), id);
        }
    }
}
