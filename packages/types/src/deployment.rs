use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The published deployment artifact for one network/variant, mapping contract
/// names to their deployed targets and source names to their compiled artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentArtifact {
    pub targets: BTreeMap<String, DeployedTarget>,
    pub sources: BTreeMap<String, SourceArtifact>,
}

/// One deployed contract: where it lives and which source artifact describes it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedTarget {
    pub name: String,
    pub address: Address,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceArtifact {
    pub abi: JsonAbi,
    #[serde(default)]
    pub bytecode: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn artifact_deserializes() {
        let artifact: DeploymentArtifact = serde_json::from_str(
            r#"{
                "targets": {
                    "Meridian": {
                        "name": "Meridian",
                        "address": "0x0000000000000000000000000000000000000001",
                        "source": "Meridian"
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
            }"#,
        )
        .unwrap();

        let target = &artifact.targets["Meridian"];
        assert_eq!(target.source, "Meridian");

        let source = &artifact.sources["Meridian"];
        assert_eq!(source.abi.functions().count(), 1);
        assert_eq!(source.bytecode, "0x6080");
    }
}
