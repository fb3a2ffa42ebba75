//! In-memory ledger used by tests.
//!
//! Models just enough of the prerequisite program to reject a second write to the
//! same prereqs account, and records every call it receives.

use std::collections::HashSet;
use std::sync::atomic::{ AtomicUsize, Ordering };

use async_trait::async_trait;
use parking_lot::Mutex;
use solana_sdk::{ hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction };

use crate::error::{ EnrollError, EnrollResult };
use crate::onchain_instance::instance::discriminator;
use crate::onchain_instance::network::LedgerClient;

#[derive(Default)]
pub struct MockLedger {
    calls: AtomicUsize,
    offline: bool,
    account_check_fails: bool,
    initialized: Mutex<HashSet<Pubkey>>,
    submitted: Mutex<HashSet<Pubkey>>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the endpoint were unreachable
    pub fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }

    /// Only `account_exists` fails; everything else behaves normally
    pub fn account_check_failing() -> Self {
        Self { account_check_fails: true, ..Self::default() }
    }

    pub fn with_initialized(account: Pubkey) -> Self {
        let ledger = Self::default();
        ledger.initialized.lock().insert(account);
        ledger
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> EnrollResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(EnrollError::NetworkFailure("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn latest_blockhash(&self) -> EnrollResult<Hash> {
        self.record()?;
        Ok(Hash::new_unique())
    }

    async fn account_exists(&self, address: &Pubkey) -> EnrollResult<bool> {
        self.record()?;
        if self.account_check_fails {
            return Err(EnrollError::NetworkFailure("getAccountInfo timed out".to_string()));
        }
        Ok(self.initialized.lock().contains(address))
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> EnrollResult<Signature> {
        self.record()?;
        transaction
            .verify()
            .map_err(|e| EnrollError::SimulationOrProgramRejection(e.to_string()))?;

        let ix = &transaction.message.instructions[0];
        let keys = &transaction.message.account_keys;
        let account = keys[ix.accounts[1] as usize];
        let tag = &ix.data[..8];

        let target = if tag == discriminator("initialize") {
            &self.initialized
        } else if tag == discriminator("submit_ts") {
            &self.submitted
        } else {
            return Err(
                EnrollError::SimulationOrProgramRejection(
                    "custom program error: InstructionFallbackNotFound".to_string()
                )
            );
        };
        if !target.lock().insert(account) {
            return Err(
                EnrollError::SimulationOrProgramRejection(
                    format!("account {} already in use", account)
                )
            );
        }

        self.sent.lock().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}
