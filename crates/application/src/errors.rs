//! Application Layer Errors
//!
//! Every failure a service call can surface. Store and domain errors keep
//! their own message so callers can show it unchanged.

use domain::entities::RecordId;
use domain::errors::DomainError;
use domain::repositories::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request failed or the store refused it
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input rejected before reaching the store
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A stored record did not match the entity shape
    #[error("Malformed {kind} record: {message}")]
    Decode { kind: &'static str, message: String },

    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    /// First field-level error of a failed batch record
    #[error("{field}: {message}")]
    FieldRejected { field: String, message: String },

    /// Message of the first failed batch record without field errors
    #[error("{0}")]
    RecordFailed(String),

    /// The store accepted the batch but returned no record data
    #[error("Store returned no {0} record")]
    EmptyResult(&'static str),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(kind: &'static str, id: RecordId) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get error category for logs and CLI exit reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Domain(_) => "validation",
            Self::Decode { .. } => "decode",
            Self::NotFound { .. } => "not_found",
            Self::FieldRejected { .. } | Self::RecordFailed(_) => "rejected",
            Self::EmptyResult(_) => "empty_result",
        }
    }
}
