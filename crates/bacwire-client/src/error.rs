use bacwire_core::types::{ErrorClass, ErrorCode, ServiceError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("encode error: {0}")]
    Encode(#[from] bacwire_core::EncodeError),
    #[error("decode error: {0}")]
    Decode(#[from] bacwire_core::DecodeError),
    #[error("request {invoke_id} timed out")]
    Timeout { invoke_id: u8 },
    #[error("request {invoke_id} was cancelled")]
    Cancelled { invoke_id: u8 },
    #[error("remote service error for service choice {service_choice}")]
    RemoteServiceError {
        service_choice: u8,
        error_class_raw: Option<u32>,
        error_code_raw: Option<u32>,
        error_class: Option<ErrorClass>,
        error_code: Option<ErrorCode>,
    },
    #[error("remote reject reason {reason}")]
    RemoteReject { reason: u8 },
    #[error("remote abort reason {reason} (server={server})")]
    RemoteAbort { reason: u8, server: bool },
}

impl ClientError {
    pub(crate) fn remote_service_error(service_choice: u8, error: Option<ServiceError>) -> Self {
        Self::RemoteServiceError {
            service_choice,
            error_class_raw: error.map(|e| e.error_class),
            error_code_raw: error.map(|e| e.error_code),
            error_class: error.and_then(|e| e.class()),
            error_code: error.and_then(|e| e.code()),
        }
    }
}
