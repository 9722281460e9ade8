//! Request correlation for BACnet confirmed services.
//!
//! A [`RequestManager`] hands out a [`PendingRequest`] future per invoke ID and
//! expires the ones nobody answers. [`route_reply`] feeds inbound reply APDUs
//! back into it. Transport is left to the caller.

pub mod config;
pub mod error;
pub mod request_manager;
pub mod routing;

pub use config::RequestManagerConfig;
pub use error::ClientError;
pub use request_manager::{PendingRequest, RequestManager};
pub use routing::route_reply;
