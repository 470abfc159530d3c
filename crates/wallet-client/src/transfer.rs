//! transfer submission lifecycle

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::{watch, RwLock};

use crate::address::Address;
use crate::amount::{self, NATIVE_DECIMALS};
use crate::config::TransferOptions;
use crate::connection::ConnectionState;
use crate::error::{Result, WalletError};
use crate::provider::{ConfirmationId, WalletProvider};

/// outcome of the single in-flight transfer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    Idle,
    Submitting,
    Succeeded { confirmation: ConfirmationId },
    Failed { error: String },
}

impl Default for TransferOutcome {
    fn default() -> Self {
        Self::Idle
    }
}

/// uncommitted form input, as typed. malformed or partial drafts are kept
/// verbatim and rejected on submit, not while typing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub recipient: String,
    pub amount: String,
}

impl TransferDraft {
    fn clear(&mut self) {
        self.recipient.clear();
        self.amount.clear();
    }
}

/// a validated transfer, immutable once submitted
#[derive(Clone, Debug, PartialEq)]
pub struct TransferRequest {
    pub recipient: Address,
    pub amount: Decimal,
}

impl TransferRequest {
    /// validate raw input into a request. fails with a validation error
    /// before anything reaches the capability.
    pub fn parse(recipient: &str, amount: &str) -> Result<Self> {
        let recipient: Address = recipient.parse()?;
        let amount = amount::parse_amount(amount)?;
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(format!(
                "must be positive, got {amount}"
            )));
        }
        Ok(Self { recipient, amount })
    }
}

/// validates and submits one transfer at a time via the wallet capability.
/// usable only while the connection reports `Connected`; concurrent
/// submissions are rejected, never queued.
pub struct TransferController<P: WalletProvider> {
    provider: Arc<P>,
    connection: watch::Receiver<ConnectionState>,
    options: TransferOptions,
    outcome: watch::Sender<TransferOutcome>,
    draft: RwLock<TransferDraft>,
}

impl<P: WalletProvider> TransferController<P> {
    pub fn new(
        provider: Arc<P>,
        connection: watch::Receiver<ConnectionState>,
        options: TransferOptions,
    ) -> Self {
        let (outcome, _) = watch::channel(TransferOutcome::Idle);
        Self {
            provider,
            connection,
            options,
            outcome,
            draft: RwLock::new(TransferDraft::default()),
        }
    }

    pub async fn set_recipient(&self, recipient: impl Into<String>) {
        self.draft.write().await.recipient = recipient.into();
    }

    pub async fn set_amount(&self, amount: impl Into<String>) {
        self.draft.write().await.amount = amount.into();
    }

    pub async fn draft(&self) -> TransferDraft {
        self.draft.read().await.clone()
    }

    /// validate the current draft and submit it
    pub async fn submit(&self) -> Result<ConfirmationId> {
        let draft = self.draft.read().await.clone();
        let request = TransferRequest::parse(&draft.recipient, &draft.amount)?;
        self.submit_request(&request).await
    }

    /// submit an already-built request.
    ///
    /// exactly one capability call per successful submission; no automatic
    /// retries. a retry is a fresh `submit` once the outcome is terminal.
    pub async fn submit_request(&self, request: &TransferRequest) -> Result<ConfirmationId> {
        if matches!(&*self.outcome.borrow(), TransferOutcome::Submitting) {
            return Err(WalletError::InFlight("transfer"));
        }
        let sender = match &*self.connection.borrow() {
            ConnectionState::Connected { wallet } => wallet.clone(),
            _ => return Err(WalletError::NotConnected),
        };
        // validation leaves the outcome untouched
        let minor_amount = amount::to_minor_units(request.amount, NATIVE_DECIMALS)?;

        // claim the in-flight slot; a racing submit loses here
        let mut claimed = false;
        self.outcome.send_modify(|outcome| {
            if !matches!(outcome, TransferOutcome::Submitting) {
                *outcome = TransferOutcome::Submitting;
                claimed = true;
            }
        });
        if !claimed {
            return Err(WalletError::InFlight("transfer"));
        }

        tracing::info!(
            recipient = %request.recipient,
            amount = %request.amount,
            minor_amount,
            fee_token = self.options.fee_token.symbol(),
            "submitting transfer"
        );
        match self
            .provider
            .sign_and_submit(&sender, &request.recipient, minor_amount, &self.options)
            .await
        {
            Ok(confirmation) => {
                tracing::info!(%confirmation, "transfer confirmed");
                self.outcome.send_replace(TransferOutcome::Succeeded {
                    confirmation: confirmation.clone(),
                });
                Ok(confirmation)
            }
            Err(err) => {
                // capability message passes through verbatim
                tracing::warn!(%err, "transfer failed");
                self.outcome.send_replace(TransferOutcome::Failed {
                    error: err.message.clone(),
                });
                Err(err.into())
            }
        }
    }

    /// return to `Idle` and clear the draft. rejected while a submission
    /// is in flight.
    pub async fn reset(&self) -> Result<()> {
        let mut cleared = false;
        self.outcome.send_modify(|outcome| {
            if !matches!(outcome, TransferOutcome::Submitting) {
                *outcome = TransferOutcome::Idle;
                cleared = true;
            }
        });
        if !cleared {
            return Err(WalletError::InFlight("transfer"));
        }
        self.draft.write().await.clear();
        Ok(())
    }

    /// current outcome, pure read
    pub fn outcome(&self) -> TransferOutcome {
        self.outcome.borrow().clone()
    }

    /// observe outcome transitions
    pub fn subscribe(&self) -> watch::Receiver<TransferOutcome> {
        self.outcome.subscribe()
    }

    pub fn options(&self) -> &TransferOptions {
        &self.options
    }
}
