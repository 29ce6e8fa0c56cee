//! Crate-level error type returned by the repository.

use crate::builder::BuildError;
use crate::checkpoint::CheckpointError;
use crate::core::{FieldError, HistoryError, ParseKindError, ShipmentId, TransitionError};
use crate::validation::{Violation, Violations};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors surfaced by repository operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShipmentError {
    #[error("shipment {0} not found")]
    NotFound(ShipmentId),

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error(transparent)]
    InvalidField(#[from] FieldError),

    #[error("validation failed: {0}")]
    Validation(Violations),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("incomplete shipment draft: {0}")]
    Draft(#[from] BuildError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

impl From<HistoryError> for ShipmentError {
    fn from(error: HistoryError) -> Self {
        match error {
            HistoryError::NothingToUndo => Self::NothingToUndo,
            HistoryError::NothingToRedo => Self::NothingToRedo,
        }
    }
}

impl From<Violations> for ShipmentError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

impl From<Violation> for ShipmentError {
    fn from(violation: Violation) -> Self {
        Self::Validation(violation.into())
    }
}

impl From<ParseKindError> for ShipmentError {
    fn from(error: ParseKindError) -> Self {
        Violation::UnknownKind(error.0).into()
    }
}

/// Stable classification of a [`ShipmentError`] for API layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    InvalidTransition,
    InvalidField,
    ValidationError,
    NothingToUndo,
    NothingToRedo,
}

impl ErrorKind {
    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidTransition => "invalid_transition",
            Self::InvalidField => "invalid_field",
            Self::ValidationError => "validation_error",
            Self::NothingToUndo => "nothing_to_undo",
            Self::NothingToRedo => "nothing_to_redo",
        }
    }

    /// Suggested HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidTransition | Self::NothingToUndo | Self::NothingToRedo => 409,
            Self::InvalidField => 400,
            Self::ValidationError => 422,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl ShipmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidTransition(_) => ErrorKind::InvalidTransition,
            Self::InvalidField(_) => ErrorKind::InvalidField,
            Self::Validation(_) | Self::Draft(_) | Self::Checkpoint(_) => {
                ErrorKind::ValidationError
            }
            Self::NothingToUndo => ErrorKind::NothingToUndo,
            Self::NothingToRedo => ErrorKind::NothingToRedo,
        }
    }

    /// Violations behind a validation failure, if any.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation(violations) => Some(violations),
            _ => None,
        }
    }
}

pub type Result<T, E = ShipmentError> = std::result::Result<T, E>;
