use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utils::{config::CliEnvExt, serde::deserialize_vec_string};

#[derive(Debug, Parser)]
#[command(name = "meridian-cli", version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub env: EnvArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Dump protocol state for the configured network
    Status,
    /// Browse deployed contracts and execute calls interactively
    Interact,
}

/// This struct is used for both args and environment variables
/// the basic idea is that every env var can be overriden by a cli arg
/// and these override the config file
/// env vars follow the pattern of MERIDIAN_CLI_{UPPERCASE_ARG_NAME}
#[derive(Debug, Clone, Args, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnvArgs {
    /// The home directory of the application, where the meridian-cli.toml configuration file is stored
    /// if not provided here or in an env var, a series of default directories will be tried
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<PathBuf>,

    /// The path to an optional dotenv file to try and load
    /// if not set, will be the current working directory's .env
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dotenv: Option<PathBuf>,

    /// The target network (mainnet, sepolia, local)
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// The network variant (l1 or l2)
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// The RPC endpoint, http(s) or ws(s)
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// The directory holding deployment artifacts, one folder per network/variant
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployments: Option<PathBuf>,

    /// Mnemonic or 0x-prefixed private key for submitting transactions
    /// (usually leave this as None and override in env)
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    /// HD derivation index for mnemonic credentials
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hd_index: Option<u32>,

    /// Gas price override in gwei
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<f64>,

    /// Gas limit override
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,

    /// Pin reads to this block instead of latest
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<u64>,

    /// Currency keys for the exchange-rates section of the status report
    #[arg(long, global = true, value_delimiter = ',')]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub currency_keys: Vec<String>,

    /// Log level in the format of comma-separated tracing directives
    #[arg(long, global = true, value_delimiter = ',')]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub log_level: Vec<String>,
}

impl CliEnvExt for EnvArgs {
    const ENV_VAR_PREFIX: &'static str = "MERIDIAN_CLI";
    const TOML_IDENTIFIER: &'static str = "cli";

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn dotenv_path(&self) -> Option<PathBuf> {
        self.dotenv.clone()
    }
}

#[cfg(test)]
mod tests;
