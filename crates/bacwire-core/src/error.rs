use thiserror::Error;

/// Failure while producing bytes.
///
/// The precondition variants name the offending field so callers can report
/// bad input without re-validating it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("value out of range")]
    ValueOutOfRange,
    #[error("invalid length")]
    InvalidLength,
    #[error("operation unsupported")]
    Unsupported,
    #[error("invalid raw date {field}: {value}")]
    InvalidRawDate { field: &'static str, value: u8 },
    #[error("invalid year: {0}")]
    InvalidYear(i32),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("could not encode: {0}")]
    InvalidPayload(String),
    #[error("{service} does not support acknowledge operations")]
    AckNotSupported { service: &'static str },
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl EncodeError {
    pub(crate) fn payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

/// Failure while reading bytes.
///
/// `UnexpectedEof`, `InvalidTag`, `InvalidLength`, `InvalidValue` and
/// `NestingTooDeep` mean the input is malformed; list decoders stop on them. The remaining variants
/// report a well-formed request for something this crate does not do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid tag")]
    InvalidTag,
    #[error("invalid length")]
    InvalidLength,
    #[error("invalid value")]
    InvalidValue,
    #[error("constructed values nested deeper than {max} levels")]
    NestingTooDeep { max: usize },
    #[error("operation unsupported")]
    Unsupported,
    #[error("{service} does not support acknowledge operations")]
    AckNotSupported { service: &'static str },
}

impl DecodeError {
    /// True when the input bytes themselves are at fault.
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof
                | Self::InvalidTag
                | Self::InvalidLength
                | Self::InvalidValue
                | Self::NestingTooDeep { .. }
        )
    }
}
