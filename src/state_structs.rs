// --- Transaction request structs matching the prerequisite program interface ---
use solana_sdk::{ instruction::{ AccountMeta, Instruction }, pubkey::Pubkey };
use std::fmt;

/// Account roles declared by the prerequisite program's instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    User,
    PrereqsAccount,
    Mint,
    Collection,
    Authority,
    MplCoreProgram,
    SystemProgram,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountRole::User => "user",
            AccountRole::PrereqsAccount => "account",
            AccountRole::Mint => "mint",
            AccountRole::Collection => "collection",
            AccountRole::Authority => "authority",
            AccountRole::MplCoreProgram => "mpl_core_program",
            AccountRole::SystemProgram => "system_program",
        };
        write!(f, "{}", name)
    }
}

/// A role bound to a concrete account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBinding {
    pub role: AccountRole,
    pub pubkey: Pubkey,
    pub is_writable: bool,
    pub is_signer: bool,
}

impl RoleBinding {
    pub fn writable(role: AccountRole, pubkey: Pubkey, is_signer: bool) -> Self {
        Self { role, pubkey, is_writable: true, is_signer }
    }

    pub fn readonly(role: AccountRole, pubkey: Pubkey) -> Self {
        Self { role, pubkey, is_writable: false, is_signer: false }
    }

    pub fn to_account_meta(&self) -> AccountMeta {
        if self.is_writable {
            AccountMeta::new(self.pubkey, self.is_signer)
        } else {
            AccountMeta::new_readonly(self.pubkey, self.is_signer)
        }
    }
}

/// One instruction call ready to be signed and submitted
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    /// Method name as it appears in the program interface
    pub method: &'static str,
    pub program_id: Pubkey,
    /// Ordered as the program expects them
    pub accounts: Vec<RoleBinding>,
    /// Discriminator followed by encoded arguments
    pub data: Vec<u8>,
    /// Fee payer first
    pub signers: Vec<Pubkey>,
}

impl TransactionRequest {
    pub fn account(&self, role: AccountRole) -> Option<&Pubkey> {
        self.accounts
            .iter()
            .find(|binding| binding.role == role)
            .map(|binding| &binding.pubkey)
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.signers.first()
    }

    pub fn to_instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts.iter().map(RoleBinding::to_account_meta).collect(),
            data: self.data.clone(),
        }
    }
}
