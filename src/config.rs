//! Configuration module for environment variables and enrollment settings

use std::{ env, fmt, str::FromStr };
use solana_sdk::{ commitment_config::CommitmentConfig, pubkey::Pubkey };
use url::Url;

use crate::error::{ EnrollError, EnrollResult };

pub const DEFAULT_WALLET_PATH: &str = "Turbin3-wallet.json";
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_EXPLORER_CLUSTER: &str = "devnet";
pub const DEFAULT_PREREQ_PROGRAM_ID: &str = "TRBZyQHB3m68FGeVsqTK39Wm4xejadjVhP5MAZaKWDM";
pub const DEFAULT_MPL_CORE_PROGRAM_ID: &str = "CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d";
pub const DEFAULT_COLLECTION_MINT: &str = "5ebsp5RChCGK7ssRZMVMufgVZhd2kFbNaotcZ5UvytN2";
pub const DEFAULT_GITHUB_HANDLE: &str = "Shubbu03";

/// Which enrollment instruction this run sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Register the prereqs account with a GitHub handle
    Initialize,
    /// Mint the completion asset into the collection
    Submit,
}

impl FromStr for Phase {
    type Err = EnrollError;

    fn from_str(s: &str) -> EnrollResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "initialize" | "init" => Ok(Phase::Initialize),
            "submit" | "submit_ts" | "submitts" => Ok(Phase::Submit),
            other => Err(EnrollError::Configuration(format!("unknown phase '{}'", other))),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initialize => write!(f, "initialize"),
            Phase::Submit => write!(f, "submit"),
        }
    }
}

/// Commitment levels accepted by the network context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = EnrollError;

    fn from_str(s: &str) -> EnrollResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(EnrollError::Configuration(format!("unknown commitment level '{}'", other))),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        };
        write!(f, "{}", s)
    }
}

/// Enrollment configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON secret key file
    pub wallet_path: String,

    /// Network configuration
    pub network: NetworkConfig,

    /// On-chain program addresses
    pub program: ProgramConfig,

    /// GitHub handle registered by the initialize phase
    pub github_handle: String,

    pub phase: Phase,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub rpc_url: Url,
    pub commitment: Commitment,
    /// `cluster` query parameter for explorer links
    pub explorer_cluster: String,
}

#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub program_id: Pubkey,
    pub mpl_core_program_id: Pubkey,
    pub collection_mint: Pubkey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet_path: DEFAULT_WALLET_PATH.to_string(),
            network: NetworkConfig {
                rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC URL is valid"),
                commitment: Commitment::Confirmed,
                explorer_cluster: DEFAULT_EXPLORER_CLUSTER.to_string(),
            },
            program: ProgramConfig {
                program_id: solana_sdk::pubkey!("TRBZyQHB3m68FGeVsqTK39Wm4xejadjVhP5MAZaKWDM"),
                mpl_core_program_id: solana_sdk::pubkey!("CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d"),
                collection_mint: solana_sdk::pubkey!("5ebsp5RChCGK7ssRZMVMufgVZhd2kFbNaotcZ5UvytN2"),
            },
            github_handle: DEFAULT_GITHUB_HANDLE.to_string(),
            phase: Phase::Submit,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> EnrollResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> EnrollResult<Self> where F: Fn(&str) -> Option<String> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            wallet_path: get("WALLET_PATH", DEFAULT_WALLET_PATH),

            network: NetworkConfig {
                rpc_url: parse_rpc_url(&get("SOLANA_RPC_URL", DEFAULT_RPC_URL))?,
                commitment: get("SOLANA_COMMITMENT", "confirmed").parse()?,
                explorer_cluster: get("EXPLORER_CLUSTER", DEFAULT_EXPLORER_CLUSTER),
            },

            program: ProgramConfig {
                program_id: parse_pubkey(
                    "PREREQ_PROGRAM_ID",
                    &get("PREREQ_PROGRAM_ID", DEFAULT_PREREQ_PROGRAM_ID)
                )?,
                mpl_core_program_id: parse_pubkey(
                    "MPL_CORE_PROGRAM_ID",
                    &get("MPL_CORE_PROGRAM_ID", DEFAULT_MPL_CORE_PROGRAM_ID)
                )?,
                collection_mint: parse_pubkey(
                    "COLLECTION_MINT",
                    &get("COLLECTION_MINT", DEFAULT_COLLECTION_MINT)
                )?,
            },

            github_handle: get("GITHUB_HANDLE", DEFAULT_GITHUB_HANDLE),

            phase: get("ENROLL_PHASE", "submit").parse()?,
        })
    }
}

/// Only absolute http(s) URLs are accepted
pub fn parse_rpc_url(raw: &str) -> EnrollResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e|
        EnrollError::Configuration(format!("invalid RPC URL '{}': {}", raw, e))
    )?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(EnrollError::Configuration(format!("unsupported RPC URL scheme '{}'", scheme))),
    }
}

fn parse_pubkey(name: &str, raw: &str) -> EnrollResult<Pubkey> {
    Pubkey::from_str(raw.trim()).map_err(|e|
        EnrollError::Configuration(format!("{} is not a valid public key: {}", name, e))
    )
}
