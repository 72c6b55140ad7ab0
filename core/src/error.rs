use crate::types::CustomerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThermostatError {
    #[error("Invalid cost threshold: {0} (must be finite and >= 0)")]
    InvalidThreshold(f64),

    #[error("Invalid record for customer {customer_id}: {reason}")]
    InvalidRecord {
        customer_id: CustomerId,
        reason: String,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ThermostatResult<T> = Result<T, ThermostatError>;
