//! provider endpoints and fee sponsorship configuration

use serde::{Deserialize, Serialize};

/// wallet provider configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletConfig {
    /// chain rpc endpoint
    pub rpc_url: String,
    /// passkey portal endpoint (hosts the WebAuthn ceremony)
    pub portal_url: String,
    /// fee sponsorship service
    pub paymaster: PaymasterConfig,
}

impl WalletConfig {
    /// devnet cluster
    pub fn devnet() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".into(),
            portal_url: "https://portal.lazor.sh".into(),
            paymaster: PaymasterConfig {
                endpoint: "https://paymaster-devnet.lazor.sh".into(),
                api_key: None,
            },
        }
    }

    /// mainnet cluster
    pub fn mainnet() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".into(),
            portal_url: "https://portal.lazor.sh".into(),
            paymaster: PaymasterConfig {
                endpoint: "https://paymaster.lazor.sh".into(),
                api_key: None,
            },
        }
    }
}

/// paymaster service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymasterConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

/// asset debited to cover transaction fees, independent of the
/// transferred asset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeToken {
    /// native token (regular, non-sponsored fees)
    Native,
    /// usdc via the paymaster (gasless for the native asset)
    #[default]
    Usdc,
}

impl FeeToken {
    pub fn symbol(&self) -> &'static str {
        match self {
            FeeToken::Native => "SOL",
            FeeToken::Usdc => "USDC",
        }
    }
}

/// per-submission options passed through to the signing capability
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptions {
    pub fee_token: FeeToken,
    pub compute_unit_limit: u32,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            fee_token: FeeToken::Usdc,
            compute_unit_limit: 200_000,
        }
    }
}
