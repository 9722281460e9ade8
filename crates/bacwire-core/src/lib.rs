//! BACnet application-layer encoding and decoding in pure Rust.
//!
//! `bacwire-core` covers the ASN.1 tag codec, the recursive application-data
//! codec (including schedule and calendar structures) and the payload codecs
//! of the confirmed and unconfirmed services a client or device needs to
//! talk to third-party equipment. Everything here is synchronous and writes
//! into caller-owned buffers through [`encoding::writer::Writer`].
//!
//! # Feature flags
//!
//! - **`serde`**: derives `Serialize`/`Deserialize` on the value model.

/// APDU headers for confirmed/unconfirmed requests and their replies.
pub mod apdu;
/// Binary encoding primitives, tag system, and zero-copy reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// BACnet service request and response codecs.
pub mod services;
/// Core BACnet data types: object identifiers, dates, schedules and data values.
pub mod types;

pub use error::{DecodeError, EncodeError};
