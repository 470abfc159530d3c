//! wallet capability provider interface
//!
//! everything non-trivial (passkey authentication, transaction signing,
//! fee sponsorship) lives behind this trait. the controllers never see a
//! key, a signature, or a wire format.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::TransferOptions;
use crate::error::CapabilityError;

/// an authenticated, provisioned smart-wallet account. the address string
/// is owned by the provider and held here by value but never interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletHandle {
    /// smart wallet address, as reported by the provider
    pub address: String,
    /// platform the passkey was provisioned on
    pub platform: String,
}

impl WalletHandle {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            platform: "web".into(),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// short display form, `XXXXXXXX...XXXXXXXX`
    pub fn abbreviated(&self) -> String {
        if self.address.len() <= 16 {
            return self.address.clone();
        }
        format!(
            "{}...{}",
            &self.address[..8],
            &self.address[self.address.len() - 8..]
        )
    }
}

/// provider-assigned identifier of an accepted transfer, used for later
/// status lookup
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmationId(pub String);

impl ConfirmationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// the external wallet capability
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// run the passkey ceremony and provision (or restore) the smart wallet
    async fn authenticate(&self) -> Result<WalletHandle, CapabilityError>;

    /// release the provider-side session
    async fn teardown(&self) -> Result<(), CapabilityError>;

    /// sign a transfer of `minor_amount` from `sender` to `recipient` and
    /// submit it, with fees debited per `options.fee_token`
    async fn sign_and_submit(
        &self,
        sender: &WalletHandle,
        recipient: &Address,
        minor_amount: u64,
        options: &TransferOptions,
    ) -> Result<ConfirmationId, CapabilityError>;
}
