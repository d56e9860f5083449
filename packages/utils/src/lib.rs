pub mod config;
pub mod contract_call;
pub mod error;
pub mod evm_client;
pub mod registry;
pub mod serde;
