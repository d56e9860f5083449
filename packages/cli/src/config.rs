use meridian_types::{ChainVariant, Credential, Network};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utils::{config::ConfigExt, contract_call::GasSettings, serde::deserialize_vec_string};

/// The fully parsed and validated config struct we use in the application
/// this is built up from the ConfigBuilder which can load from multiple sources (in order of preference):
///
/// 1. cli args
/// 2. environment variables
/// 3. config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// The target network
    pub network: Network,
    /// The network variant - deployments differ between l1 and l2
    pub variant: ChainVariant,
    /// The RPC endpoint, http(s) or ws(s)
    /// Default is `http://127.0.0.1:8545`
    pub endpoint: String,
    /// The directory holding deployment artifacts, one folder per network/variant
    pub deployments: PathBuf,

    /// Mnemonic or private key for submitting transactions (usually None, set via env var)
    pub credential: Option<Credential>,
    /// HD derivation index for mnemonic credentials
    pub hd_index: Option<u32>,

    /// Gas price override in gwei - unset means the current chain price
    pub gas_price: Option<f64>,
    /// Gas limit override - unset means a padded estimate
    pub gas_limit: Option<u64>,
    /// Multiplier applied to gas estimates
    pub gas_estimate_multiplier: Option<f32>,

    /// Pin reads to this block instead of latest
    pub block: Option<u64>,

    /// Currency keys reported in the exchange-rates section
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub currency_keys: Vec<String>,

    /// The log-level to use, in the format of [tracing directives](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives).
    /// Default is `["info"]`
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub log_level: Vec<String>,
}

impl Config {
    pub fn gas_settings(&self) -> GasSettings {
        GasSettings {
            gas_price: self.gas_price.map(|gwei| (gwei * 1e9) as u128),
            gas_limit: self.gas_limit,
        }
    }
}

impl ConfigExt for Config {
    const FILENAME: &'static str = "meridian-cli.toml";
    const DIRNAME: &'static str = "meridian";

    fn expand_paths(&mut self) {
        self.deployments = shellexpand::tilde(&self.deployments.to_string_lossy())
            .to_string()
            .into();
    }

    fn log_levels(&self) -> impl Iterator<Item = &str> {
        self.log_level.iter().map(|s| s.as_str())
    }
}

/// Default values for the config struct
/// these are only used to fill in holes after all the parsing and loading is done
impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::Local,
            variant: ChainVariant::L1,
            endpoint: "http://127.0.0.1:8545".to_string(),
            deployments: PathBuf::from("./deployments"),
            credential: None,
            hd_index: None,
            gas_price: None,
            gas_limit: None,
            gas_estimate_multiplier: None,
            block: None,
            currency_keys: vec!["mUSD".to_string(), "mBTC".to_string(), "mETH".to_string()],
            log_level: vec!["info".to_string()],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gas_settings_convert_gwei() {
        let config = Config {
            gas_price: Some(2.5),
            gas_limit: Some(500_000),
            ..Config::default()
        };

        let gas = config.gas_settings();
        assert_eq!(gas.gas_price, Some(2_500_000_000));
        assert_eq!(gas.gas_limit, Some(500_000));
    }

    #[test]
    fn default_gas_comes_from_the_chain() {
        let gas = Config::default().gas_settings();
        assert!(gas.gas_price.is_none());
        assert!(gas.gas_limit.is_none());
    }
}
