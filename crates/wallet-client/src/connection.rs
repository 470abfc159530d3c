//! wallet connection lifecycle

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Result, WalletError};
use crate::provider::{WalletHandle, WalletProvider};

/// connection state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected { wallet: WalletHandle },
    Failed { error: String },
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::Disconnected
    }
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }
}

/// mediates connect/disconnect requests against the wallet capability and
/// publishes the current state on a watch channel for any consumer (ui or
/// test harness) to read or subscribe
pub struct ConnectionController<P: WalletProvider> {
    provider: Arc<P>,
    state: watch::Sender<ConnectionState>,
}

impl<P: WalletProvider> ConnectionController<P> {
    pub fn new(provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self { provider, state }
    }

    /// connect via the passkey ceremony.
    ///
    /// from `Disconnected` or `Failed` this moves to `Connecting` before
    /// the provider call, so the transition is observable synchronously.
    /// while `Connecting` or already `Connected` the call is a no-op and
    /// returns the current state; a double-click triggers exactly one
    /// authenticate.
    pub async fn connect(&self) -> Result<ConnectionState> {
        let mut begin = false;
        self.state.send_modify(|state| match state {
            ConnectionState::Connecting | ConnectionState::Connected { .. } => {}
            _ => {
                *state = ConnectionState::Connecting;
                begin = true;
            }
        });
        if !begin {
            return Ok(self.state());
        }

        tracing::info!("authenticating with passkey portal");
        match self.provider.authenticate().await {
            Ok(wallet) if wallet.address.is_empty() => {
                let error = "provider returned an empty wallet address".to_string();
                tracing::warn!("authentication failed: {error}");
                self.state
                    .send_replace(ConnectionState::Failed { error: error.clone() });
                Err(WalletError::Capability(error))
            }
            Ok(wallet) => {
                tracing::info!(address = %wallet.address, "wallet connected");
                let next = ConnectionState::Connected { wallet };
                self.state.send_replace(next.clone());
                Ok(next)
            }
            Err(err) => {
                tracing::warn!(%err, "authentication failed");
                self.state.send_replace(ConnectionState::Failed {
                    error: err.message.clone(),
                });
                Err(err.into())
            }
        }
    }

    /// disconnect, best-effort. teardown failures are logged, never
    /// surfaced: whatever the provider does, the state ends `Disconnected`.
    pub async fn disconnect(&self) {
        let connected = self.state.borrow().is_connected();
        if connected {
            if let Err(err) = self.provider.teardown().await {
                tracing::warn!(%err, "teardown failed, dropping session anyway");
            }
        }
        self.state.send_replace(ConnectionState::Disconnected);
        tracing::info!("wallet disconnected");
    }

    /// current state, pure read
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// the connected wallet, if any
    pub fn wallet(&self) -> Option<WalletHandle> {
        match &*self.state.borrow() {
            ConnectionState::Connected { wallet } => Some(wallet.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockWalletProvider;
    use tokio::sync::Notify;

    const WALLET: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";

    #[tokio::test]
    async fn test_initial_state_disconnected() {
        let provider = Arc::new(MockWalletProvider::new(WALLET));
        let connection = ConnectionController::new(provider);
        assert_eq!(connection.state(), ConnectionState::Disconnected);
        assert!(connection.wallet().is_none());
    }

    #[tokio::test]
    async fn test_connect_success() {
        let provider = Arc::new(MockWalletProvider::new(WALLET));
        let connection = ConnectionController::new(provider.clone());

        let state = connection.connect().await.unwrap();
        assert!(state.is_connected());
        assert_eq!(connection.wallet().unwrap().address, WALLET);
        assert_eq!(provider.authenticate_calls(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_preserves_message() {
        let provider =
            Arc::new(MockWalletProvider::new(WALLET).with_authenticate_error("user cancelled"));
        let connection = ConnectionController::new(provider);

        let err = connection.connect().await.unwrap_err();
        assert_eq!(err.to_string(), "user cancelled");
        assert_eq!(
            connection.state(),
            ConnectionState::Failed {
                error: "user cancelled".into()
            }
        );
    }

    #[tokio::test]
    async fn test_connect_after_failure_is_fresh_attempt() {
        let provider =
            Arc::new(MockWalletProvider::new(WALLET).with_authenticate_error("portal unreachable"));
        let connection = ConnectionController::new(provider.clone());

        assert!(connection.connect().await.is_err());
        assert!(connection.connect().await.is_err());
        assert_eq!(provider.authenticate_calls(), 2);
    }

    #[tokio::test]
    async fn test_double_connect_single_authenticate() {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(MockWalletProvider::new(WALLET).hold_authenticate(gate.clone()));
        let connection = Arc::new(ConnectionController::new(provider.clone()));

        let background = tokio::spawn({
            let connection = connection.clone();
            async move { connection.connect().await }
        });
        let mut rx = connection.subscribe();
        rx.wait_for(|state| matches!(state, ConnectionState::Connecting))
            .await
            .unwrap();

        // second click while the ceremony is still running
        let second = connection.connect().await.unwrap();
        assert_eq!(second, ConnectionState::Connecting);

        gate.notify_one();
        let first = background.await.unwrap().unwrap();
        assert!(first.is_connected());
        assert_eq!(provider.authenticate_calls(), 1);
    }

    #[tokio::test]
    async fn test_connect_while_connected_is_noop() {
        let provider = Arc::new(MockWalletProvider::new(WALLET));
        let connection = ConnectionController::new(provider.clone());

        connection.connect().await.unwrap();
        let again = connection.connect().await.unwrap();
        assert!(again.is_connected());
        assert_eq!(provider.authenticate_calls(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_best_effort() {
        let provider =
            Arc::new(MockWalletProvider::new(WALLET).with_teardown_error("portal timeout"));
        let connection = ConnectionController::new(provider.clone());

        connection.connect().await.unwrap();
        connection.disconnect().await;
        assert_eq!(connection.state(), ConnectionState::Disconnected);
        assert_eq!(provider.teardown_calls(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_without_session_skips_teardown() {
        let provider = Arc::new(MockWalletProvider::new(WALLET));
        let connection = ConnectionController::new(provider.clone());

        connection.disconnect().await;
        assert_eq!(connection.state(), ConnectionState::Disconnected);
        assert_eq!(provider.teardown_calls(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_sees_final_state() {
        let provider = Arc::new(MockWalletProvider::new(WALLET));
        let connection = ConnectionController::new(provider);
        let rx = connection.subscribe();

        connection.connect().await.unwrap();
        assert!(rx.borrow().is_connected());
    }
}
