//! # Onchain Program Instance Module
//!
//! Everything needed to talk to the prerequisite program deployed on Solana.
//!
//! ## Features
//! - Signing identity loading from JSON key files
//! - Network context and RPC-backed ledger client
//! - PDA derivation for the prereqs account and collection authority
//! - Instruction building and one-shot submission

/// Signing identity loader
pub mod identity;

/// Prerequisite program instance and instruction builders
pub mod instance;

/// Network context and ledger client
pub mod network;

/// Program-derived addresses
pub mod pda;

/// One-shot transaction submission
pub mod submitter;

#[cfg(test)]
pub mod mock_ledger;
