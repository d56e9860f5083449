use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash};
use alloy_provider::{PendingTransactionBuilder, Provider};
use alloy_rpc_types_eth::{BlockId, TransactionReceipt, TransactionRequest};
use async_trait::async_trait;

use crate::{
    error::{CallError, EvmClientError},
    evm_client::{EvmQueryClient, EvmSigningClient},
};

// EIP-1559 has a default 30m gas limit per block, a higher limit is rejected
// with 'intrinsic gas too high -- tx.gas_limit > env.block.gas_limit'
const MAX_GAS_LIMIT: u64 = 30_000_000;

/// Gas settings applied when staging a transaction
/// unset fields fall back to the chain (current gas price, padded estimate)
#[derive(Debug, Clone, Copy, Default)]
pub struct GasSettings {
    pub gas_price: Option<u128>,
    pub gas_limit: Option<u64>,
}

/// A transaction that has been built and gas-filled, but not broadcast
#[derive(Debug, Clone)]
pub struct StagedTransaction {
    pub request: TransactionRequest,
    pub gas_limit: u64,
    pub gas_price: u128,
}

#[derive(Debug, Clone)]
pub struct ReceiptSummary {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

impl From<&TransactionReceipt> for ReceiptSummary {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        }
    }
}

/// The execution seam between the interactive driver and the chain.
///
/// View calls are one method; mutating calls go through three, so that each
/// failure domain (staging, submission, receipt-wait) surfaces on its own
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// The signer address, if a signing credential is configured
    fn signer_address(&self) -> Option<Address>;

    async fn bytecode_present(&self, address: Address) -> Result<bool, EvmClientError>;

    async fn view(
        &self,
        to: Address,
        function: &Function,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, CallError>;

    async fn stage(
        &self,
        to: Address,
        function: &Function,
        args: &[DynSolValue],
    ) -> Result<StagedTransaction, CallError>;

    async fn submit(&self, staged: StagedTransaction) -> Result<TxHash, CallError>;

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<ReceiptSummary, CallError>;
}

pub struct EvmContractCaller {
    pub query: EvmQueryClient,
    pub signing: Option<EvmSigningClient>,
    pub gas: GasSettings,
    /// Pin every read to this block instead of latest
    pub block: Option<u64>,
}

impl EvmContractCaller {
    fn signing(&self) -> Result<&EvmSigningClient, CallError> {
        self.signing.as_ref().ok_or(CallError::NoSigner)
    }
}

#[async_trait]
impl ContractCaller for EvmContractCaller {
    fn signer_address(&self) -> Option<Address> {
        self.signing.as_ref().map(|client| client.address())
    }

    async fn bytecode_present(&self, address: Address) -> Result<bool, EvmClientError> {
        let code = self
            .query
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| EvmClientError::FailedGetCode(address, e.into()))?;

        Ok(!code.is_empty())
    }

    async fn view(
        &self,
        to: Address,
        function: &Function,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, CallError> {
        let input = function
            .abi_encode_input(args)
            .map_err(|e| CallError::Encode(e.into()))?;

        let request = TransactionRequest::default().with_to(to).with_input(input);

        let mut call = self.query.provider.call(request);
        if let Some(block) = self.block {
            call = call.block(BlockId::number(block));
        }

        let returned = call.await.map_err(|e| CallError::Call(e.into()))?;

        function
            .abi_decode_output(&returned)
            .map_err(|e| CallError::Decode(e.into()))
    }

    async fn stage(
        &self,
        to: Address,
        function: &Function,
        args: &[DynSolValue],
    ) -> Result<StagedTransaction, CallError> {
        let signing = self.signing()?;

        let input = function
            .abi_encode_input(args)
            .map_err(|e| CallError::Encode(e.into()))?;

        let request = TransactionRequest::default()
            .with_from(signing.address())
            .with_to(to)
            .with_input(input);

        let gas_price = match self.gas.gas_price {
            Some(gas_price) => gas_price,
            None => signing
                .provider
                .get_gas_price()
                .await
                .map_err(|e| CallError::Stage(e.into()))?,
        };

        let gas_limit = match self.gas.gas_limit {
            Some(gas_limit) => gas_limit.min(MAX_GAS_LIMIT),
            None => {
                let estimate = signing
                    .provider
                    .estimate_gas(request.clone())
                    .await
                    .map_err(|e| CallError::Stage(e.into()))?;

                // pad it with a multiplier to account for gas fluctuations
                ((estimate as f32) * signing.gas_estimate_multiplier()) as u64
            }
        };

        let request = request.with_gas_limit(gas_limit).with_gas_price(gas_price);

        Ok(StagedTransaction {
            request,
            gas_limit,
            gas_price,
        })
    }

    async fn submit(&self, staged: StagedTransaction) -> Result<TxHash, CallError> {
        let signing = self.signing()?;

        let pending = signing
            .provider
            .send_transaction(staged.request)
            .await
            .map_err(|e| CallError::Submit(e.into()))?;

        Ok(*pending.tx_hash())
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<ReceiptSummary, CallError> {
        let signing = self.signing()?;

        let receipt =
            PendingTransactionBuilder::new(signing.provider.root().clone(), tx_hash)
                .get_receipt()
                .await
                .map_err(|e| CallError::Receipt(e.into()))?;

        let summary = ReceiptSummary::from(&receipt);
        match summary.success {
            true => Ok(summary),
            false => Err(CallError::Reverted(Box::new(summary))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gas_settings_default_to_chain() {
        let gas = GasSettings::default();
        assert!(gas.gas_price.is_none());
        assert!(gas.gas_limit.is_none());
    }
}
