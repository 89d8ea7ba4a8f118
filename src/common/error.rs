use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Missing input for shipment {shipment_id}: {missing}")]
    MissingInput { shipment_id: String, missing: String },

    #[error("Malformed shipment {shipment_id}: {reason}")]
    MalformedShipment { shipment_id: String, reason: String },

    #[error("Route generation failed: {reason}")]
    RouteGeneration { reason: String },

    #[error("Reconciliation failed: {reason}")]
    Reconciliation { reason: String },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
