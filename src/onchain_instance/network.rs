//! Network context and the ledger client used to reach the RPC node.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{ hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction };
use tracing::debug;
use url::Url;

use crate::config::{ parse_rpc_url, Commitment };
use crate::error::EnrollResult;

/// Immutable pairing of an RPC endpoint and a commitment level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContext {
    rpc_url: Url,
    commitment: Commitment,
}

impl NetworkContext {
    /// Validate `rpc_url` and bind it to `commitment`. Performs no I/O.
    pub fn new(rpc_url: &str, commitment: Commitment) -> EnrollResult<Self> {
        Ok(Self {
            rpc_url: parse_rpc_url(rpc_url)?,
            commitment,
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    /// Build the RPC-backed ledger client. The connection is opened on first use.
    pub fn connect(&self) -> RpcLedger {
        RpcLedger::new(self)
    }
}

/// Ledger operations the enrollment flow needs
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn latest_blockhash(&self) -> EnrollResult<Hash>;

    async fn account_exists(&self, address: &Pubkey) -> EnrollResult<bool>;

    /// Submit and wait for confirmation at the context's commitment level
    async fn send_and_confirm(&self, transaction: &Transaction) -> EnrollResult<Signature>;
}

/// JSON-RPC backed ledger client
pub struct RpcLedger {
    rpc: RpcClient,
}

impl RpcLedger {
    pub fn new(context: &NetworkContext) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(
                context.rpc_url.to_string(),
                context.commitment.to_config()
            ),
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedger {
    async fn latest_blockhash(&self) -> EnrollResult<Hash> {
        let hash = self.rpc.get_latest_blockhash().await?;
        debug!("Latest blockhash: {}", hash);
        Ok(hash)
    }

    async fn account_exists(&self, address: &Pubkey) -> EnrollResult<bool> {
        let response = self.rpc.get_account_with_commitment(address, self.rpc.commitment()).await?;
        Ok(response.value.is_some())
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> EnrollResult<Signature> {
        Ok(self.rpc.send_and_confirm_transaction(transaction).await?)
    }
}
