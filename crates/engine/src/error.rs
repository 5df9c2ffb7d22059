//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InsufficientBalance`] thrown when an operation asks for more stock than
//!   an [`Asset`] currently holds.
//! - [`NotFound`] thrown when a referenced row is absent.
//!
//! [`InsufficientBalance`]: EngineError::InsufficientBalance
//! [`NotFound`]: EngineError::NotFound
//! [`Asset`]: super::assets::Asset
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("Not enough balance to {0}")]
    InsufficientBalance(String),
    #[error("{0}")]
    Precondition(String),
    #[error("Concurrent update on {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::AlreadyExists(a), Self::AlreadyExists(b)) => a == b,
            (Self::InsufficientBalance(a), Self::InsufficientBalance(b)) => a == b,
            (Self::Precondition(a), Self::Precondition(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
