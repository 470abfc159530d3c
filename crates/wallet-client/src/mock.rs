//! in-memory wallet provider for tests and the demo binary
//!
//! deterministic: no network, no keys. failure injection and hold-open
//! gates let tests pin the controllers in their transient states.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::address::Address;
use crate::config::TransferOptions;
use crate::error::CapabilityError;
use crate::provider::{ConfirmationId, WalletHandle, WalletProvider};

/// what `sign_and_submit` was called with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub sender: String,
    pub recipient: String,
    pub minor_amount: u64,
    pub options: TransferOptions,
}

pub struct MockWalletProvider {
    wallet: WalletHandle,
    confirmation: String,
    fail_authenticate: Option<String>,
    fail_teardown: Option<String>,
    fail_submit: Option<String>,
    hold_authenticate: Option<Arc<Notify>>,
    hold_submit: Option<Arc<Notify>>,
    authenticate_calls: AtomicUsize,
    teardown_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    submissions: Mutex<Vec<RecordedSubmission>>,
}

impl MockWalletProvider {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            wallet: WalletHandle::new(address),
            confirmation: "4oBFNe4qY8gNTvvMjhEiNGpRqbm4T7a4S2jRPtv1dJzw".into(),
            fail_authenticate: None,
            fail_teardown: None,
            fail_submit: None,
            hold_authenticate: None,
            hold_submit: None,
            authenticate_calls: AtomicUsize::new(0),
            teardown_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// confirmation id returned on successful submission
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = confirmation.into();
        self
    }

    pub fn with_authenticate_error(mut self, message: impl Into<String>) -> Self {
        self.fail_authenticate = Some(message.into());
        self
    }

    pub fn with_teardown_error(mut self, message: impl Into<String>) -> Self {
        self.fail_teardown = Some(message.into());
        self
    }

    pub fn with_submit_error(mut self, message: impl Into<String>) -> Self {
        self.fail_submit = Some(message.into());
        self
    }

    /// park `authenticate` until the gate is notified
    pub fn hold_authenticate(mut self, gate: Arc<Notify>) -> Self {
        self.hold_authenticate = Some(gate);
        self
    }

    /// park `sign_and_submit` until the gate is notified
    pub fn hold_submit(mut self, gate: Arc<Notify>) -> Self {
        self.hold_submit = Some(gate);
        self
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    pub fn teardown_calls(&self) -> usize {
        self.teardown_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn authenticate(&self) -> Result<WalletHandle, CapabilityError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.hold_authenticate {
            gate.notified().await;
        }
        if let Some(message) = &self.fail_authenticate {
            return Err(CapabilityError::new(message.clone()));
        }
        Ok(self.wallet.clone())
    }

    async fn teardown(&self) -> Result<(), CapabilityError> {
        self.teardown_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_teardown {
            return Err(CapabilityError::new(message.clone()));
        }
        Ok(())
    }

    async fn sign_and_submit(
        &self,
        sender: &WalletHandle,
        recipient: &Address,
        minor_amount: u64,
        options: &TransferOptions,
    ) -> Result<ConfirmationId, CapabilityError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.hold_submit {
            gate.notified().await;
        }
        if let Some(message) = &self.fail_submit {
            return Err(CapabilityError::new(message.clone()));
        }
        self.submissions
            .lock()
            .map_err(|_| CapabilityError::new("mock submission log poisoned"))?
            .push(RecordedSubmission {
                sender: sender.address.clone(),
                recipient: recipient.to_string(),
                minor_amount,
                options: options.clone(),
            });
        Ok(ConfirmationId(self.confirmation.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_submissions() {
        let provider = MockWalletProvider::new("wallet").with_confirmation("sig123");
        let sender = WalletHandle::new("wallet");
        let recipient: Address = "11111111111111111111111111111111".parse().unwrap();

        let confirmation = provider
            .sign_and_submit(&sender, &recipient, 42, &TransferOptions::default())
            .await
            .unwrap();
        assert_eq!(confirmation.as_str(), "sig123");
        assert_eq!(provider.submit_calls(), 1);
        assert_eq!(provider.submissions()[0].minor_amount, 42);
    }

    #[tokio::test]
    async fn test_failed_submission_is_not_recorded() {
        let provider = MockWalletProvider::new("wallet").with_submit_error("rejected");
        let sender = WalletHandle::new("wallet");
        let recipient: Address = "11111111111111111111111111111111".parse().unwrap();

        assert!(provider
            .sign_and_submit(&sender, &recipient, 42, &TransferOptions::default())
            .await
            .is_err());
        assert_eq!(provider.submit_calls(), 1);
        assert!(provider.submissions().is_empty());
    }
}
