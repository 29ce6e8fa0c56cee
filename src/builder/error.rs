//! Build errors for shipment drafts.

use thiserror::Error;

/// Errors that can occur when building a shipment draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Shipment type not specified. Call .kind(kind) before .build()")]
    MissingKind,

    #[error("Sender not specified. Call .sender(name)")]
    MissingSender,

    #[error("Recipient not specified. Call .recipient(name)")]
    MissingRecipient,

    #[error("Origin address not specified. Call .origin(address)")]
    MissingOrigin,

    #[error("Destination address not specified. Call .destination(address)")]
    MissingDestination,

    #[error("Weight not specified. Call .weight_kg(weight)")]
    MissingWeight,
}
