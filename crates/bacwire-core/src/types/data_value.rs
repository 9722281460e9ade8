use crate::types::{
    BitString, CalendarEntry, Date, DateRange, DeviceObjectReference, ObjectId, ReadAccessResult,
    ServiceError, SpecialEvent, Time, TimeValue, WeekNDay,
};

/// A decoded application value. The variant alone decides how it is encoded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataValue {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Signed(i32),
    Real(f32),
    Double(f64),
    OctetString(Vec<u8>),
    CharacterString(String),
    BitString(BitString),
    Enumerated(u32),
    Date(Date),
    Time(Time),
    ObjectId(ObjectId),
    DateRange(DateRange),
    WeekNDay(WeekNDay),
    /// Seven day lists, Monday first.
    WeeklySchedule(Vec<Vec<TimeValue>>),
    SpecialEvents(Vec<SpecialEvent>),
    CalendarEntries(Vec<CalendarEntry>),
    DeviceObjectReference(DeviceObjectReference),
    Error(ServiceError),
    ReadAccessResult(ReadAccessResult),
    /// Values found between an opening and closing context tag.
    Constructed {
        tag_num: u8,
        values: Vec<DataValue>,
    },
    /// A primitive context-tagged value whose type depends on where it sits.
    ContextSpecific { tag_num: u8, data: Vec<u8> },
}

impl DataValue {
    pub fn character_string(value: impl Into<String>) -> Self {
        Self::CharacterString(value.into())
    }
}
