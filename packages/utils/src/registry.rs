use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::Address;
use meridian_types::{deployment_folder, ChainVariant, DeploymentArtifact, Network, SourceArtifact};
use std::path::Path;

use crate::error::RegistryError;

pub const ARTIFACT_FILENAME: &str = "deployment.json";

/// The contract registry for one network/variant, backed by the protocol's
/// published deployment artifact
#[derive(Debug, Clone)]
pub struct Registry {
    pub network: Network,
    pub variant: ChainVariant,
    artifact: DeploymentArtifact,
}

/// One resolved contract: everything needed to call it
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    pub name: String,
    pub address: Address,
    pub abi: JsonAbi,
}

impl ContractDescriptor {
    /// The first ABI entry with this name, if any (overloads beyond the first
    /// are not reachable by name alone)
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.abi.function(name).and_then(|overloads| overloads.first())
    }
}

impl Registry {
    pub fn load(
        deployments_dir: &Path,
        network: Network,
        variant: ChainVariant,
    ) -> Result<Self, RegistryError> {
        let path = deployments_dir
            .join(deployment_folder(network, variant))
            .join(ARTIFACT_FILENAME);

        if !path.exists() {
            return Err(RegistryError::MissingArtifact {
                network,
                variant,
                path,
            });
        }

        let bytes = std::fs::read(&path).map_err(|e| RegistryError::ReadArtifact {
            path: path.clone(),
            source: e.into(),
        })?;

        let artifact: DeploymentArtifact =
            serde_json::from_slice(&bytes).map_err(|e| RegistryError::ReadArtifact {
                path: path.clone(),
                source: e.into(),
            })?;

        tracing::debug!(
            "loaded deployment artifact from {} ({} targets)",
            path.display(),
            artifact.targets.len()
        );

        Ok(Self::from_artifact(network, variant, artifact))
    }

    pub fn from_artifact(
        network: Network,
        variant: ChainVariant,
        artifact: DeploymentArtifact,
    ) -> Self {
        Self {
            network,
            variant,
            artifact,
        }
    }

    pub fn contract_names(&self) -> Vec<String> {
        self.artifact.targets.keys().cloned().collect()
    }

    pub fn resolve(&self, name: &str) -> Result<ContractDescriptor, RegistryError> {
        let target = self
            .artifact
            .targets
            .get(name)
            .ok_or_else(|| RegistryError::UnknownContract(name.to_string()))?;

        let source = self.artifact.sources.get(&target.source).ok_or_else(|| {
            RegistryError::DanglingSource {
                target: name.to_string(),
                missing_source: target.source.clone(),
            }
        })?;

        Ok(ContractDescriptor {
            name: target.name.clone(),
            address: target.address,
            abi: source.abi.clone(),
        })
    }

    pub fn resolve_source(&self, name: &str) -> Result<&SourceArtifact, RegistryError> {
        self.artifact
            .sources
            .get(name)
            .ok_or_else(|| RegistryError::UnknownSource(name.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ARTIFACT: &str = r#"{
        "targets": {
            "Meridian": {
                "name": "Meridian",
                "address": "0x0000000000000000000000000000000000000001",
                "source": "Meridian"
            },
            "FeePool": {
                "name": "FeePool",
                "address": "0x0000000000000000000000000000000000000002",
                "source": "Missing"
            }
        },
        "sources": {
            "Meridian": {
                "abi": [
                    {
                        "type": "function",
                        "name": "totalSupply",
                        "inputs": [],
                        "outputs": [{"name": "", "type": "uint256"}],
                        "stateMutability": "view"
                    }
                ],
                "bytecode": "0x6080"
            }
        }
    }"#;

    fn registry() -> Registry {
        Registry::from_artifact(
            Network::Local,
            ChainVariant::L1,
            serde_json::from_str(ARTIFACT).unwrap(),
        )
    }

    #[test]
    fn resolve_contract() {
        let descriptor = registry().resolve("Meridian").unwrap();
        assert_eq!(descriptor.name, "Meridian");
        assert_eq!(
            descriptor.address,
            "0x0000000000000000000000000000000000000001"
                .parse::<Address>()
                .unwrap()
        );
        assert!(descriptor.function("totalSupply").is_some());
        assert!(descriptor.function("transfer").is_none());
    }

    #[test]
    fn resolve_unknown_contract() {
        let err = registry().resolve("Nope").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownContract(name) if name == "Nope"));
    }

    #[test]
    fn resolve_dangling_source() {
        let err = registry().resolve("FeePool").unwrap_err();
        assert!(matches!(err, RegistryError::DanglingSource { .. }));
    }

    #[test]
    fn resolve_source() {
        let registry = registry();
        assert!(registry.resolve_source("Meridian").is_ok());
        assert!(matches!(
            registry.resolve_source("Nope").unwrap_err(),
            RegistryError::UnknownSource(_)
        ));
    }

    #[test]
    fn load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("sepolia-l2");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join(ARTIFACT_FILENAME), ARTIFACT).unwrap();

        let registry = Registry::load(dir.path(), Network::Sepolia, ChainVariant::L2).unwrap();
        assert_eq!(registry.contract_names(), vec!["FeePool", "Meridian"]);

        // no artifact for this variant
        let err = Registry::load(dir.path(), Network::Sepolia, ChainVariant::L1).unwrap_err();
        assert!(matches!(err, RegistryError::MissingArtifact { .. }));
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("local");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join(ARTIFACT_FILENAME), "not json").unwrap();

        let err = Registry::load(dir.path(), Network::Local, ChainVariant::L1).unwrap_err();
        assert!(matches!(err, RegistryError::ReadArtifact { .. }));
    }
}
