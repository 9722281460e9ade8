use core::fmt;

/// Maximum APDU length accepted by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MaxApdu {
    UpTo50 = 0,
    UpTo128 = 1,
    UpTo206 = 2,
    UpTo480 = 3,
    UpTo1024 = 4,
    UpTo1476 = 5,
}

/// BACnet error class reported in Error PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorClass {
    Device = 0,
    Object = 1,
    Property = 2,
    Resources = 3,
    Security = 4,
    Services = 5,
    Vt = 6,
    Communication = 7,
}

/// BACnet error code reported in Error PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ErrorCode {
    Other = 0,
    ConfigurationInProgress = 2,
    DeviceBusy = 3,
    InconsistentParameters = 7,
    InvalidDataType = 9,
    MissingRequiredParameter = 16,
    NoSpaceForObject = 18,
    PropertyIsNotAList = 22,
    ObjectDeletionNotPermitted = 23,
    ServiceRequestDenied = 29,
    Timeout = 30,
    UnknownObject = 31,
    UnknownProperty = 32,
    UnsupportedObjectType = 36,
    ValueOutOfRange = 37,
    WriteAccessDenied = 40,
    InvalidArrayIndex = 42,
    DatatypeNotSupported = 47,
    PropertyIsNotAnArray = 50,
    ListElementNotFound = 81,
}

impl MaxApdu {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Largest APDU, in octets, the code stands for.
    pub const fn octets(self) -> u16 {
        match self {
            Self::UpTo50 => 50,
            Self::UpTo128 => 128,
            Self::UpTo206 => 206,
            Self::UpTo480 => 480,
            Self::UpTo1024 => 1024,
            Self::UpTo1476 => 1476,
        }
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::UpTo50),
            1 => Some(Self::UpTo128),
            2 => Some(Self::UpTo206),
            3 => Some(Self::UpTo480),
            4 => Some(Self::UpTo1024),
            5 => Some(Self::UpTo1476),
            _ => None,
        }
    }
}

impl ErrorClass {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Device),
            1 => Some(Self::Object),
            2 => Some(Self::Property),
            3 => Some(Self::Resources),
            4 => Some(Self::Security),
            5 => Some(Self::Services),
            6 => Some(Self::Vt),
            7 => Some(Self::Communication),
            _ => None,
        }
    }
}

impl ErrorCode {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Other),
            2 => Some(Self::ConfigurationInProgress),
            3 => Some(Self::DeviceBusy),
            7 => Some(Self::InconsistentParameters),
            9 => Some(Self::InvalidDataType),
            16 => Some(Self::MissingRequiredParameter),
            18 => Some(Self::NoSpaceForObject),
            22 => Some(Self::PropertyIsNotAList),
            23 => Some(Self::ObjectDeletionNotPermitted),
            29 => Some(Self::ServiceRequestDenied),
            30 => Some(Self::Timeout),
            31 => Some(Self::UnknownObject),
            32 => Some(Self::UnknownProperty),
            36 => Some(Self::UnsupportedObjectType),
            37 => Some(Self::ValueOutOfRange),
            40 => Some(Self::WriteAccessDenied),
            42 => Some(Self::InvalidArrayIndex),
            47 => Some(Self::DatatypeNotSupported),
            50 => Some(Self::PropertyIsNotAnArray),
            81 => Some(Self::ListElementNotFound),
            _ => None,
        }
    }
}

/// An error class/code pair as carried in Error PDUs and property results.
///
/// Raw numbers are kept so proprietary values survive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceError {
    pub error_class: u32,
    pub error_code: u32,
}

impl ServiceError {
    pub const fn new(class: ErrorClass, code: ErrorCode) -> Self {
        Self {
            error_class: class.to_u32(),
            error_code: code.to_u32(),
        }
    }

    pub const fn class(&self) -> Option<ErrorClass> {
        ErrorClass::from_u32(self.error_class)
    }

    pub const fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_u32(self.error_code)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BacnetError Class: ")?;
        match self.class() {
            Some(class) => write!(f, "{class:?}")?,
            None => f.write_str("Unknown")?,
        }
        write!(f, " ({}) Code: ", self.error_class)?;
        match self.code() {
            Some(code) => write!(f, "{code:?}")?,
            None => f.write_str("Unknown")?,
        }
        write!(f, " ({})", self.error_code)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorClass, ErrorCode, ServiceError};

    #[test]
    fn service_error_message() {
        let err = ServiceError::new(ErrorClass::Property, ErrorCode::UnknownProperty);
        assert_eq!(
            err.to_string(),
            "BacnetError Class: Property (2) Code: UnknownProperty (32)"
        );
        let err = ServiceError {
            error_class: 900,
            error_code: 1_000,
        };
        assert_eq!(
            err.to_string(),
            "BacnetError Class: Unknown (900) Code: Unknown (1000)"
        );
    }
}
