use anchor_lang::{ system_program, AnchorSerialize };
use once_cell::sync::Lazy;
use solana_sdk::{ hash::hash, pubkey::Pubkey };

use crate::config::ProgramConfig;
use crate::error::{ EnrollError, EnrollResult };
use crate::onchain_instance::pda;
use crate::state_structs::{ AccountRole, RoleBinding, TransactionRequest };

pub const INITIALIZE_METHOD: &str = "initialize";
pub const SUBMIT_TS_METHOD: &str = "submitTs";

static INITIALIZE_DISCRIMINATOR: Lazy<[u8; 8]> = Lazy::new(|| discriminator("initialize"));
static SUBMIT_TS_DISCRIMINATOR: Lazy<[u8; 8]> = Lazy::new(|| discriminator("submit_ts"));

/// Anchor instruction discriminator: first 8 bytes of sha256("global:<name>")
pub fn discriminator(snake_case_name: &str) -> [u8; 8] {
    let digest = hash(format!("global:{}", snake_case_name).as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest.to_bytes()[..8]);
    out
}

/// Prerequisite program client for building enrollment instructions
#[derive(Debug, Clone)]
pub struct PrereqProgramInstance {
    program_id: Pubkey,
    mpl_core_program_id: Pubkey,
    collection_mint: Pubkey,
}

impl PrereqProgramInstance {
    pub fn new(config: &ProgramConfig) -> Self {
        Self {
            program_id: config.program_id,
            mpl_core_program_id: config.mpl_core_program_id,
            collection_mint: config.collection_mint,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn collection_mint(&self) -> &Pubkey {
        &self.collection_mint
    }

    pub fn prereqs_account(&self, user: &Pubkey) -> EnrollResult<(Pubkey, u8)> {
        pda::derive_prereqs_account(user, &self.program_id)
    }

    pub fn collection_authority(&self) -> EnrollResult<(Pubkey, u8)> {
        pda::derive_collection_authority(&self.collection_mint, &self.program_id)
    }

    /// Register the user's prereqs account under `github` handle
    pub fn initialize_request(&self, user: Pubkey, github: &str) -> EnrollResult<TransactionRequest> {
        let (account, _) = self.prereqs_account(&user)?;

        let mut data = INITIALIZE_DISCRIMINATOR.to_vec();
        github
            .to_string()
            .serialize(&mut data)
            .map_err(|e| EnrollError::InvalidState(format!("failed to encode github handle: {}", e)))?;

        Ok(TransactionRequest {
            method: INITIALIZE_METHOD,
            program_id: self.program_id,
            accounts: vec![
                RoleBinding::writable(AccountRole::User, user, true),
                RoleBinding::writable(AccountRole::PrereqsAccount, account, false),
                RoleBinding::readonly(AccountRole::SystemProgram, system_program::ID)
            ],
            data,
            signers: vec![user],
        })
    }

    /// Mint the completion asset `mint` into the collection
    pub fn submit_ts_request(&self, user: Pubkey, mint: Pubkey) -> EnrollResult<TransactionRequest> {
        let (account, _) = self.prereqs_account(&user)?;
        let (authority, _) = self.collection_authority()?;

        Ok(TransactionRequest {
            method: SUBMIT_TS_METHOD,
            program_id: self.program_id,
            accounts: vec![
                RoleBinding::writable(AccountRole::User, user, true),
                RoleBinding::writable(AccountRole::PrereqsAccount, account, false),
                RoleBinding::writable(AccountRole::Mint, mint, true),
                RoleBinding::writable(AccountRole::Collection, self.collection_mint, false),
                RoleBinding::readonly(AccountRole::Authority, authority),
                RoleBinding::readonly(AccountRole::MplCoreProgram, self.mpl_core_program_id),
                RoleBinding::readonly(AccountRole::SystemProgram, system_program::ID)
            ],
            data: SUBMIT_TS_DISCRIMINATOR.to_vec(),
            signers: vec![user, mint],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn instance() -> PrereqProgramInstance {
        PrereqProgramInstance::new(&Config::default().program)
    }

    #[test]
    fn discriminators_follow_anchor_convention() {
        let digest = hash(b"global:submit_ts").to_bytes();
        assert_eq!(discriminator("submit_ts"), digest[..8]);
        assert_ne!(discriminator("submit_ts"), discriminator("initialize"));
    }

    #[test]
    fn submit_ts_accounts_are_in_program_order() {
        let program = instance();
        let user = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let request = program.submit_ts_request(user, mint).unwrap();
        let roles: Vec<AccountRole> = request.accounts.iter().map(|b| b.role).collect();
        assert_eq!(roles, vec![
            AccountRole::User,
            AccountRole::PrereqsAccount,
            AccountRole::Mint,
            AccountRole::Collection,
            AccountRole::Authority,
            AccountRole::MplCoreProgram,
            AccountRole::SystemProgram
        ]);
        assert_eq!(request.signers, vec![user, mint]);
        assert_eq!(request.data, discriminator("submit_ts").to_vec());

        let ix = request.to_instruction();
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(ix.accounts[2].is_signer && ix.accounts[2].is_writable);
        assert!(!ix.accounts[4].is_writable);
        assert_eq!(ix.program_id, *program.program_id());
    }

    #[test]
    fn submit_ts_binds_derived_addresses() {
        let program = instance();
        let user = Pubkey::new_unique();
        let request = program.submit_ts_request(user, Pubkey::new_unique()).unwrap();

        let expected_account = Pubkey::find_program_address(
            &[b"prereqs", user.as_ref()],
            program.program_id()
        ).0;
        let expected_authority = Pubkey::find_program_address(
            &[b"collection", program.collection_mint().as_ref()],
            program.program_id()
        ).0;

        assert_eq!(request.account(AccountRole::PrereqsAccount), Some(&expected_account));
        assert_eq!(request.account(AccountRole::Authority), Some(&expected_authority));
        assert_eq!(request.account(AccountRole::Collection), Some(program.collection_mint()));
    }

    #[test]
    fn initialize_encodes_github_handle() {
        let program = instance();
        let user = Pubkey::new_unique();
        let request = program.initialize_request(user, "octocat").unwrap();

        let mut expected = discriminator("initialize").to_vec();
        expected.extend_from_slice(&7u32.to_le_bytes());
        expected.extend_from_slice(b"octocat");

        assert_eq!(request.data, expected);
        assert_eq!(request.accounts.len(), 3);
        assert_eq!(request.signers, vec![user]);
        assert_eq!(request.fee_payer(), Some(&user));
    }

    #[test]
    fn system_program_is_the_native_loader_address() {
        let request = instance().initialize_request(Pubkey::new_unique(), "octocat").unwrap();
        assert_eq!(
            request.account(AccountRole::SystemProgram).map(|key| key.to_string()),
            Some("11111111111111111111111111111111".to_string())
        );
    }
}
