use alloy_primitives::Address;
use meridian_types::{ChainVariant, Network};
use std::path::PathBuf;
use thiserror::Error;

use crate::contract_call::ReceiptSummary;

#[derive(Debug, Error)]
pub enum EvmClientError {
    #[error("HD index must be zero when using a private key (use mnemonic instead)")]
    DerivationWithPrivateKey,

    #[error("Unable to parse endpoint: {0}")]
    ParseEndpoint(String),

    #[error("Unable to create web socket provider: {0:#?}")]
    WebSocketProvider(anyhow::Error),

    #[error("Unable to sign: {0:#?}")]
    Signing(anyhow::Error),

    #[error("Could not get contract code at {0}: {1:?}")]
    FailedGetCode(Address, anyhow::Error),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No deployment artifact for {network} ({variant}) at {}", .path.display())]
    MissingArtifact {
        network: Network,
        variant: ChainVariant,
        path: PathBuf,
    },

    #[error("Could not read deployment artifact at {}: {source}", .path.display())]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Contract {target} references missing source {missing_source}")]
    DanglingSource { target: String, missing_source: String },
}

/// One variant per failure domain of a contract call - the phase that failed
/// is carried to the user, and no variant is fatal to the session
#[derive(Debug, Error)]
pub enum CallError {
    #[error("Unable to encode call arguments: {0:#}")]
    Encode(anyhow::Error),

    #[error("Call failed: {0:#}")]
    Call(anyhow::Error),

    #[error("Unable to decode return data: {0:#}")]
    Decode(anyhow::Error),

    #[error("Unable to stage transaction: {0:#}")]
    Stage(anyhow::Error),

    #[error("Unable to submit transaction: {0:#}")]
    Submit(anyhow::Error),

    #[error("No transaction receipt: {0:#}")]
    Receipt(anyhow::Error),

    #[error("Transaction reverted on-chain: {}", .0.transaction_hash)]
    Reverted(Box<ReceiptSummary>),

    #[error("No signing credential configured - set one in the config file or environment")]
    NoSigner,
}
