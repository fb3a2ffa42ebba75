//! # Prereq Enroll
//!
//! One-shot enrollment client for the Turbin3 prerequisite program on Solana.
//! Loads a local wallet, derives the program addresses it needs and submits a
//! single transaction, then prints a block-explorer link for it.
//!
//! ## Phases
//! - `initialize`: registers the wallet's prereqs account with a GitHub handle
//! - `submit` (default): mints the completion asset into the prerequisite collection
//!
//! ## Architecture
//! - `config`: Environment variable configuration with documented defaults
//! - `error`: Error taxonomy shared by every step
//! - `onchain_instance`: Identity loading, network context, PDAs, instruction building and submission
//! - `enrollment`: The linear pipeline tying those together
//!
//! ## Environment Setup
//! Settings are read from the environment, optionally through a `.env` file:
//! ```bash
//! WALLET_PATH=Turbin3-wallet.json
//! ENROLL_PHASE=submit
//! SOLANA_RPC_URL=https://api.devnet.solana.com
//! ```
//!
//! ## Running
//! ```bash
//! cargo run
//! ```
//! Each run submits at most one transaction and never retries.

mod config;
mod enrollment;
mod error;
mod onchain_instance;
mod state_structs;

use std::process::ExitCode;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt, EnvFilter };

use crate::config::{ Config, Phase };
use crate::onchain_instance::network::NetworkContext;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply
    dotenv::dotenv().ok();

    tracing_subscriber
        ::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt
                ::layer()
                .with_target(false)
                .compact()
        )
        .init();

    tracing::info!("🏁 Starting enrollment...");
    tracing::info!("📦 Package: {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("🏗️  Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("Oops, something went wrong: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let network = match NetworkContext::new(config.network.rpc_url.as_str(), config.network.commitment) {
        Ok(network) => network,
        Err(e) => {
            tracing::error!("Failed to build network context: {}", e);
            eprintln!("Oops, something went wrong: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("🌐 RPC: {} ({})", network.rpc_url(), network.commitment());
    tracing::info!("🚦 Phase: {}", config.phase);
    let ledger = network.connect();

    match enrollment::run(&config, &ledger).await {
        Ok(outcome) => {
            tracing::info!("✅ Signature: {}", outcome.signature);
            match outcome.phase {
                Phase::Initialize => println!("Initialize TX: {}", outcome.explorer_url),
                Phase::Submit => {
                    println!("Success! Check out your TX here:\n{}", outcome.explorer_url)
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Enrollment failed: {}", e);
            eprintln!("Oops, something went wrong: {}", e);
            ExitCode::FAILURE
        }
    }
}
