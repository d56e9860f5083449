use anyhow::{Context as _, Result};
use std::str::FromStr;
use utils::{
    contract_call::EvmContractCaller,
    evm_client::{EvmEndpoint, EvmQueryClient, EvmSigningClient, EvmSigningClientConfig},
    registry::Registry,
};

use crate::config::Config;

/// Everything a command needs for one session: the resolved config, the
/// contract registry for the configured network, and the chain caller.
/// Built once and passed explicitly to each command entry point
pub struct CliContext {
    pub config: Config,
    pub registry: Registry,
    pub caller: EvmContractCaller,
}

impl CliContext {
    pub async fn try_new(config: Config) -> Result<Self> {
        let endpoint = EvmEndpoint::from_str(&config.endpoint)
            .with_context(|| format!("invalid endpoint {}", config.endpoint))?;

        let query = EvmQueryClient::new(endpoint.clone()).await?;

        let signing = match &config.credential {
            Some(credential) => {
                let mut signing_config =
                    EvmSigningClientConfig::new(endpoint, credential.clone());
                signing_config.hd_index = config.hd_index;
                signing_config.gas_estimate_multiplier = config.gas_estimate_multiplier;

                Some(EvmSigningClient::new(signing_config).await?)
            }
            None => None,
        };

        let registry = Registry::load(&config.deployments, config.network, config.variant)?;

        let caller = EvmContractCaller {
            query,
            signing,
            gas: config.gas_settings(),
            block: config.block,
        };

        Ok(Self {
            config,
            registry,
            caller,
        })
    }
}
