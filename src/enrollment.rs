//! # Enrollment Flow
//!
//! Load identity, derive addresses, build the phase's instruction, submit once.

use solana_sdk::signature::{ Keypair, Signature, Signer };
use tracing::{ info, warn };

use crate::config::{ Config, Phase };
use crate::error::EnrollResult;
use crate::state_structs::AccountRole;
use crate::onchain_instance::{
    identity,
    instance::PrereqProgramInstance,
    network::LedgerClient,
    submitter::Submitter,
};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct EnrollmentOutcome {
    pub phase: Phase,
    pub signature: Signature,
    pub explorer_url: String,
}

pub fn explorer_url(signature: &Signature, cluster: &str) -> String {
    format!("https://explorer.solana.com/tx/{}?cluster={}", signature, cluster)
}

/// Run the configured phase against `ledger`.
///
/// The key file is decoded before the ledger is touched.
pub async fn run(config: &Config, ledger: &dyn LedgerClient) -> EnrollResult<EnrollmentOutcome> {
    let user = identity::load_keypair_file(&config.wallet_path)?;
    info!("👛 Wallet: {}", user.pubkey());

    let program = PrereqProgramInstance::new(&config.program);
    info!("📜 Program: {}", program.program_id());
    let (account, account_bump) = program.prereqs_account(&user.pubkey())?;
    info!("📒 Prereqs account: {} (bump {})", account, account_bump);

    let signature = match config.phase {
        Phase::Initialize => {
            let request = program.initialize_request(user.pubkey(), &config.github_handle)?;
            info!("📝 Registering GitHub handle '{}'", config.github_handle);
            Submitter::new(ledger).submit(&request, &[&user]).await?
        }
        Phase::Submit => {
            let (authority, authority_bump) = program.collection_authority()?;
            info!(
                "🏛️  Collection {} with authority {} (bump {})",
                program.collection_mint(),
                authority,
                authority_bump
            );

            let mint = Keypair::new();
            info!("🪙 New mint: {}", mint.pubkey());

            let request = program.submit_ts_request(user.pubkey(), mint.pubkey())?;
            if let Some(prereqs) = request.account(AccountRole::PrereqsAccount) {
                match ledger.account_exists(prereqs).await {
                    Ok(true) => {}
                    Ok(false) => {
                        warn!(
                            "Prereqs account {} not found; the initialize phase may not have run",
                            prereqs
                        )
                    }
                    Err(e) => warn!("Could not check prereqs account {}: {}", prereqs, e),
                }
            }

            Submitter::new(ledger).submit(&request, &[&user, &mint]).await?
        }
    };

    Ok(EnrollmentOutcome {
        phase: config.phase,
        signature,
        explorer_url: explorer_url(&signature, &config.network.explorer_cluster),
    })
}
