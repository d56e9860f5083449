use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::Address;
use anyhow::Result;
use utils::{
    contract_call::{ContractCaller, ReceiptSummary},
    error::CallError,
};

use super::prompt::Prompt;
use crate::display;

/// The result of one driven call, used only for the report that follows it
#[derive(Debug)]
pub enum CallOutcome {
    /// Decoded outputs of a view call
    Values(Vec<DynSolValue>),
    /// Receipt of a confirmed mutating call
    Receipt(ReceiptSummary),
    /// The failure of whichever phase broke first
    Failed(CallError),
}

/// Execute the selected function: view calls run directly, mutating calls go
/// through confirm -> stage -> submit -> await-receipt. Returns `None` when
/// the user declines the confirmation (nothing is staged or submitted)
pub async fn execute(
    caller: &dyn ContractCaller,
    prompt: &mut dyn Prompt,
    address: Address,
    function: &Function,
    args: &[DynSolValue],
) -> Result<Option<CallOutcome>> {
    if display::is_view(function) {
        return Ok(Some(match caller.view(address, function, args).await {
            Ok(values) => CallOutcome::Values(values),
            Err(e) => CallOutcome::Failed(e),
        }));
    }

    if !prompt.confirm(&format!("Submit {} transaction?", function.name))? {
        return Ok(None);
    }

    Ok(Some(match mutate(caller, address, function, args).await {
        Ok(receipt) => CallOutcome::Receipt(receipt),
        Err(e) => CallOutcome::Failed(e),
    }))
}

// a failure in any phase short-circuits the phases after it
async fn mutate(
    caller: &dyn ContractCaller,
    address: Address,
    function: &Function,
    args: &[DynSolValue],
) -> Result<ReceiptSummary, CallError> {
    let staged = caller.stage(address, function, args).await?;
    tracing::info!(
        "staged transaction: gas limit {}, gas price {}",
        staged.gas_limit,
        staged.gas_price
    );

    let tx_hash = caller.submit(staged).await?;
    tracing::info!("submitted transaction {tx_hash}");

    caller.await_receipt(tx_hash).await
}
