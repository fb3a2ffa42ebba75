//! Signing identity loading from JSON secret key files.

use std::{ fs, path::Path };
use solana_sdk::signature::{ keypair_from_seed, Keypair, Signer };
use tracing::debug;

use crate::error::{ EnrollError, EnrollResult };

/// Full keypair length: 32 secret bytes followed by 32 public bytes
pub const KEYPAIR_LENGTH: usize = 64;
const SECRET_LENGTH: usize = 32;

/// Load a keypair from a file holding a JSON array of byte values
pub fn load_keypair_file<P: AsRef<Path>>(path: P) -> EnrollResult<Keypair> {
    let path = path.as_ref();
    let raw = fs
        ::read_to_string(path)
        .map_err(|e|
            EnrollError::InvalidKeyMaterial(format!("cannot read {}: {}", path.display(), e))
        )?;
    let bytes = parse_key_json(&raw)?;
    let keypair = keypair_from_bytes(&bytes)?;
    debug!("Loaded signing identity {} from {}", keypair.pubkey(), path.display());
    Ok(keypair)
}

/// Decode a JSON array of integers into raw bytes
pub fn parse_key_json(raw: &str) -> EnrollResult<Vec<u8>> {
    serde_json
        ::from_str::<Vec<u8>>(raw)
        .map_err(|e| EnrollError::InvalidKeyMaterial(format!("expected a JSON array of bytes: {}", e)))
}

/// Build a keypair from 64 raw bytes, checking that the public half matches the secret half
pub fn keypair_from_bytes(bytes: &[u8]) -> EnrollResult<Keypair> {
    if bytes.len() != KEYPAIR_LENGTH {
        return Err(
            EnrollError::InvalidKeyMaterial(
                format!("expected {} bytes, found {}", KEYPAIR_LENGTH, bytes.len())
            )
        );
    }

    let (secret, public) = bytes.split_at(SECRET_LENGTH);
    let derived = keypair_from_seed(secret).map_err(|e|
        EnrollError::InvalidKeyMaterial(format!("secret key rejected: {}", e))
    )?;
    if derived.pubkey().as_ref() != public {
        return Err(
            EnrollError::InvalidKeyMaterial(
                "public key does not match secret key".to_string()
            )
        );
    }

    Ok(derived)
}
