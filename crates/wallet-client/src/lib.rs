//! wallet-client: passkey wallet connection and gasless transfers
//!
//! thin lifecycle layer over an external wallet capability: passkey
//! authentication, transaction signing, and fee sponsorship all live
//! behind [`WalletProvider`]; this crate owns only the state machines
//!
//! connect → connected → submit → pending → success/error → reset
//!
//! and exposes them as watch channels any consumer can subscribe to.
//!
//! ## usage
//!
//! ```rust,ignore
//! let provider = Arc::new(MockWalletProvider::new(address));
//! let connection = ConnectionController::new(provider.clone());
//! connection.connect().await?;
//!
//! let transfer = TransferController::new(
//!     provider,
//!     connection.subscribe(),
//!     TransferOptions::default(), // fees sponsored in USDC
//! );
//! transfer.set_recipient("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").await;
//! transfer.set_amount("0.1").await;
//! let confirmation = transfer.submit().await?;
//! ```

pub mod address;
pub mod amount;
pub mod config;
pub mod connection;
pub mod error;
pub mod mock;
pub mod provider;
pub mod transfer;

pub use address::{Address, ADDRESS_LEN};
pub use amount::{parse_amount, to_minor_units, NATIVE_DECIMALS};
pub use config::{FeeToken, PaymasterConfig, TransferOptions, WalletConfig};
pub use connection::{ConnectionController, ConnectionState};
pub use error::{CapabilityError, Result, WalletError};
pub use mock::{MockWalletProvider, RecordedSubmission};
pub use provider::{ConfirmationId, WalletHandle, WalletProvider};
pub use transfer::{TransferController, TransferDraft, TransferOutcome, TransferRequest};
