/// Confirmed-service request and response headers.
pub mod confirmed;
/// APDU type discriminant.
pub mod pdu;
/// Unconfirmed-service request header.
pub mod unconfirmed;

pub use confirmed::{
    AbortPdu, BacnetErrorPdu, ComplexAckHeader, ConfirmedRequestHeader, RejectPdu, Segment,
    SimpleAck, DEFAULT_MAX_APDU,
};
pub use pdu::ApduType;
pub use unconfirmed::UnconfirmedRequestHeader;
