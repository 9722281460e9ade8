use crate::types::{Date, Time};

/// BACnetEventState. Values from 64 up are vendor states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventState {
    Normal,
    Fault,
    Offnormal,
    HighLimit,
    LowLimit,
    LifeSafetyAlarm,
    Proprietary(u32),
}

impl EventState {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Fault => 1,
            Self::Offnormal => 2,
            Self::HighLimit => 3,
            Self::LowLimit => 4,
            Self::LifeSafetyAlarm => 5,
            Self::Proprietary(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::Fault,
            2 => Self::Offnormal,
            3 => Self::HighLimit,
            4 => Self::LowLimit,
            5 => Self::LifeSafetyAlarm,
            v => Self::Proprietary(v),
        }
    }
}

/// BACnetEventType. Only the numeric value travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    ChangeOfBitstring,
    ChangeOfState,
    ChangeOfValue,
    CommandFailure,
    FloatingLimit,
    OutOfRange,
    ChangeOfLifeSafety,
    Extended,
    BufferReady,
    UnsignedRange,
    Other(u32),
}

impl EventType {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::ChangeOfBitstring => 0,
            Self::ChangeOfState => 1,
            Self::ChangeOfValue => 2,
            Self::CommandFailure => 3,
            Self::FloatingLimit => 4,
            Self::OutOfRange => 5,
            Self::ChangeOfLifeSafety => 8,
            Self::Extended => 9,
            Self::BufferReady => 10,
            Self::UnsignedRange => 11,
            Self::Other(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::ChangeOfBitstring,
            1 => Self::ChangeOfState,
            2 => Self::ChangeOfValue,
            3 => Self::CommandFailure,
            4 => Self::FloatingLimit,
            5 => Self::OutOfRange,
            8 => Self::ChangeOfLifeSafety,
            9 => Self::Extended,
            10 => Self::BufferReady,
            11 => Self::UnsignedRange,
            v => Self::Other(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum NotifyType {
    Alarm = 0,
    Event = 1,
    AckNotification = 2,
}

impl NotifyType {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Alarm),
            1 => Some(Self::Event),
            2 => Some(Self::AckNotification),
            _ => None,
        }
    }
}

/// BACnetTimeStamp choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeStamp {
    Time(Time),
    SequenceNumber(u32),
    DateTime { date: Date, time: Time },
}
