use alloy_signer::k256::SecretKey;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use anyhow::Result;

use crate::error::EvmClientError;

/// Build a signer from a credential: a `0x`-prefixed private key, or a
/// mnemonic phrase with an optional HD derivation index
pub fn make_signer(credential: &str, hd_index: Option<u32>) -> Result<PrivateKeySigner> {
    let hd_index = hd_index.unwrap_or_default();

    match credential.strip_prefix("0x") {
        Some(stripped) => {
            // if the string begins with `0x`, it is a private key
            // and so we can't derive additional keys from it
            if hd_index > 0 {
                return Err(EvmClientError::DerivationWithPrivateKey.into());
            }
            let private_key = const_hex::decode(stripped)?;
            let secret_key = SecretKey::from_slice(&private_key)?;
            Ok(PrivateKeySigner::from_signing_key(secret_key.into()))
        }
        None => Ok(MnemonicBuilder::<English>::default()
            .phrase(credential)
            .index(hd_index)?
            .build()?),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[test]
    fn signer_from_mnemonic() {
        let first = make_signer(TEST_MNEMONIC, None).unwrap();
        let derived = make_signer(TEST_MNEMONIC, Some(1)).unwrap();
        assert_ne!(first.address(), derived.address());
    }

    #[test]
    fn signer_from_private_key() {
        // the first well-known anvil dev key
        let signer = make_signer(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            None,
        )
        .unwrap();
        assert_eq!(
            signer.address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn private_key_rejects_derivation() {
        let err = make_signer(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            Some(1),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EvmClientError>(),
            Some(EvmClientError::DerivationWithPrivateKey)
        ));
    }
}
