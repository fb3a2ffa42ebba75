//! PDA derivation for the prerequisite program.
//!
//! Seeds must match the on-chain program exactly, so keep them stable.

use solana_sdk::pubkey::{ Pubkey, MAX_SEEDS, MAX_SEED_LEN };

use crate::error::{ EnrollError, EnrollResult };

/// Seed for the per-user enrollment account
pub const PREREQS_SEED: &[u8] = b"prereqs";

/// Seed for the collection authority
pub const COLLECTION_SEED: &[u8] = b"collection";

/// Derive a program address and its bump from `seeds`.
///
/// Fails when the seeds are malformed or when no bump yields an off-curve address.
pub fn derive(seeds: &[&[u8]], owner: &Pubkey) -> EnrollResult<(Pubkey, u8)> {
    // the bump occupies one seed slot
    if seeds.len() >= MAX_SEEDS {
        return Err(
            EnrollError::AddressDerivationFailure(
                format!("{} seeds given, at most {} allowed", seeds.len(), MAX_SEEDS - 1)
            )
        );
    }
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(
            EnrollError::AddressDerivationFailure(
                format!("seed of {} bytes exceeds {} bytes", seed.len(), MAX_SEED_LEN)
            )
        );
    }

    Pubkey::try_find_program_address(seeds, owner).ok_or_else(||
        EnrollError::AddressDerivationFailure(
            format!("no valid bump found for program {}", owner)
        )
    )
}

/// The user's prereqs account
pub fn derive_prereqs_account(user: &Pubkey, program_id: &Pubkey) -> EnrollResult<(Pubkey, u8)> {
    derive(&[PREREQS_SEED, user.as_ref()], program_id)
}

/// The authority PDA that controls `collection_mint`
pub fn derive_collection_authority(
    collection_mint: &Pubkey,
    program_id: &Pubkey
) -> EnrollResult<(Pubkey, u8)> {
    derive(&[COLLECTION_SEED, collection_mint.as_ref()], program_id)
}
