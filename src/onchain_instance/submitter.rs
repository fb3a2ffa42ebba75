//! One-shot transaction submission.
//!
//! A [`Submitter`] moves through `NotSubmitted -> Submitting -> {Submitted | Failed}`
//! exactly once. There is no retry transition: a terminal submitter stays terminal.

use solana_sdk::{ signature::{ Keypair, Signature, Signer }, transaction::Transaction };
use tracing::{ debug, error, info };

use crate::error::{ EnrollError, EnrollResult };
use crate::onchain_instance::network::LedgerClient;
use crate::state_structs::TransactionRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    NotSubmitted,
    Submitting,
    Submitted(Signature),
    Failed(String),
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Submitted(_) | SubmissionState::Failed(_))
    }
}

pub struct Submitter<'a> {
    ledger: &'a dyn LedgerClient,
    state: SubmissionState,
}

impl<'a> Submitter<'a> {
    pub fn new(ledger: &'a dyn LedgerClient) -> Self {
        Self {
            ledger,
            state: SubmissionState::NotSubmitted,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!("Submission state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Sign `request` with `signers`, submit it once and wait for confirmation
    pub async fn submit(
        &mut self,
        request: &TransactionRequest,
        signers: &[&Keypair]
    ) -> EnrollResult<Signature> {
        if self.state.is_terminal() {
            return Err(
                EnrollError::InvalidState(
                    format!("submission already finished: {:?}", self.state)
                )
            );
        }
        if self.state == SubmissionState::Submitting {
            return Err(EnrollError::InvalidState("submission already in flight".to_string()));
        }
        self.transition(SubmissionState::Submitting);

        match self.sign_and_send(request, signers).await {
            Ok(signature) => {
                info!("{} confirmed: {}", request.method, signature);
                self.transition(SubmissionState::Submitted(signature));
                Ok(signature)
            }
            Err(e) => {
                error!("{} failed: {}", request.method, e);
                self.transition(SubmissionState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn sign_and_send(
        &self,
        request: &TransactionRequest,
        signers: &[&Keypair]
    ) -> EnrollResult<Signature> {
        let payer = request
            .fee_payer()
            .ok_or_else(|| EnrollError::InvalidState(format!("{} has no signers", request.method)))?;

        for required in &request.signers {
            if !signers.iter().any(|kp| kp.pubkey() == *required) {
                return Err(
                    EnrollError::InvalidState(
                        format!("missing signature for {} on {}", required, request.method)
                    )
                );
            }
        }

        let blockhash = self.ledger.latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(&[request.to_instruction()], Some(payer));
        transaction
            .try_sign(signers, blockhash)
            .map_err(|e| EnrollError::InvalidState(format!("signing failed: {}", e)))?;

        debug!("Submitting {} with {} signer(s)", request.method, request.signers.len());
        for binding in &request.accounts {
            debug!(
                "  {} = {}{}",
                binding.role,
                binding.pubkey,
                if binding.is_signer { " (signer)" } else { "" }
            );
        }
        self.ledger.send_and_confirm(&transaction).await
    }
}
