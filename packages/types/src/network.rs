use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Unknown network: {0} (expected one of mainnet, sepolia, local)")]
    UnknownNetwork(String),
    #[error("Unknown variant: {0} (expected l1 or l2)")]
    UnknownVariant(String),
}

/// The networks the protocol is deployed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Mainnet,
    Sepolia,
    Local,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Sepolia, Network::Local];

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Sepolia => 11155111,
            Network::Local => 31337,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Local => "local",
        }
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "sepolia" => Ok(Network::Sepolia),
            "local" => Ok(Network::Local),
            _ => Err(NetworkError::UnknownNetwork(s.to_string())),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The layer flavor of a network - deployments differ between the base chain
/// and its rollup counterpart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainVariant {
    #[default]
    L1,
    L2,
}

impl ChainVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainVariant::L1 => "l1",
            ChainVariant::L2 => "l2",
        }
    }
}

impl FromStr for ChainVariant {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l1" => Ok(ChainVariant::L1),
            "l2" => Ok(ChainVariant::L2),
            _ => Err(NetworkError::UnknownVariant(s.to_string())),
        }
    }
}

impl std::fmt::Display for ChainVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The directory name a deployment artifact lives under, e.g. `mainnet` or `mainnet-l2`
pub fn deployment_folder(network: Network, variant: ChainVariant) -> String {
    match variant {
        ChainVariant::L1 => network.as_str().to_string(),
        ChainVariant::L2 => format!("{}-l2", network.as_str()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for network in Network::ALL {
            assert_eq!(network.as_str().parse::<Network>().unwrap(), network);
        }

        assert!(matches!(
            "goerli".parse::<Network>(),
            Err(NetworkError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn folder_names() {
        assert_eq!(
            deployment_folder(Network::Mainnet, ChainVariant::L1),
            "mainnet"
        );
        assert_eq!(
            deployment_folder(Network::Sepolia, ChainVariant::L2),
            "sepolia-l2"
        );
    }
}
