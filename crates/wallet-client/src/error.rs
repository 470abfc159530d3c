//! error types for the wallet client

use thiserror::Error;

/// failure reported by the external wallet capability (portal, paymaster,
/// or chain). the message is whatever the capability said, verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CapabilityError {
    pub message: String,
}

impl CapabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0} already in flight")]
    InFlight(&'static str),

    #[error("wallet not connected")]
    NotConnected,

    #[error("{0}")]
    Capability(String),
}

impl WalletError {
    /// detected locally, before anything reaches the capability
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::InvalidAmount(_))
    }

    /// rejected because an operation is already running
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::InFlight(_))
    }
}

impl From<CapabilityError> for WalletError {
    fn from(e: CapabilityError) -> Self {
        WalletError::Capability(e.message)
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
