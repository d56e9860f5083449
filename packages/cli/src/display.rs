use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::{Function, Param, StateMutability};
use alloy_primitives::utils::format_units;
use meridian_types::decode_word;
use utils::contract_call::ReceiptSummary;

use crate::interact::driver::CallOutcome;

pub fn is_view(function: &Function) -> bool {
    matches!(
        function.state_mutability,
        StateMutability::View | StateMutability::Pure
    )
}

/// Render a function the way an operator reads it in the selector list,
/// e.g. `transfer(address to, uint256 value)` or
/// `rateForCurrency(bytes32 key) view returns(uint256)`
pub fn function_signature(function: &Function) -> String {
    let mut out = format!("{}({})", function.name, param_list(&function.inputs));

    if is_view(function) {
        out.push_str(" view");
    }

    if !function.outputs.is_empty() {
        out.push_str(&format!(" returns({})", param_list(&function.outputs)));
    }

    out
}

fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| match param.name.is_empty() {
            true => param.ty.clone(),
            false => format!("{} {}", param.ty, param.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One display form per value kind - numbers show both raw and 18-decimal
/// scaled form, fixed words show their decoded string alongside the hex
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => match format_units(*i, "ether") {
            Ok(scaled) => format!("{i} ({scaled})"),
            Err(_) => i.to_string(),
        },
        DynSolValue::Uint(u, _) => match format_units(*u, "ether") {
            Ok(scaled) => format!("{u} ({scaled})"),
            Err(_) => u.to_string(),
        },
        DynSolValue::FixedBytes(word, size) => {
            let hex = format!("0x{}", const_hex::encode(&word.as_slice()[..(*size).min(32)]));
            match (*size == 32).then(|| decode_word(word)).flatten() {
                Some(decoded) if !decoded.is_empty() => format!("{hex} (\"{decoded}\")"),
                _ => hex,
            }
        }
        DynSolValue::Address(address) => address.to_string(),
        DynSolValue::Function(function) => format!("0x{}", const_hex::encode(function.as_slice())),
        DynSolValue::Bytes(bytes) => format!("0x{}", const_hex::encode(bytes)),
        DynSolValue::String(s) => format!("\"{s}\""),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            let items = values.iter().map(format_value).collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        DynSolValue::Tuple(values) => {
            let items = values.iter().map(format_value).collect::<Vec<_>>();
            format!("({})", items.join(", "))
        }
    }
}

/// Print decoded outputs, each labeled by its declared name/type
pub fn print_outputs(params: &[Param], values: &[DynSolValue]) {
    if values.is_empty() {
        println!("(no return data)");
        return;
    }

    for (index, value) in values.iter().enumerate() {
        let label = match params.get(index) {
            Some(param) if !param.name.is_empty() => format!("{} ({})", param.name, param.ty),
            Some(param) => format!("out{index} ({})", param.ty),
            None => format!("out{index}"),
        };
        println!("{label}: {}", format_value(value));
    }
}

pub fn print_receipt(receipt: &ReceiptSummary) {
    println!("transaction hash: {}", receipt.transaction_hash);
    if let Some(block_number) = receipt.block_number {
        println!("block: {block_number}");
    }
    println!("gas used: {}", receipt.gas_used);
}

/// Report one finished call - success or failure, the loop continues either way
pub fn report_outcome(function: &Function, outcome: &CallOutcome) {
    match outcome {
        CallOutcome::Values(values) => {
            println!("\n--- RESULT ---");
            print_outputs(&function.outputs, values);
        }
        CallOutcome::Receipt(receipt) => {
            println!("\n--- TRANSACTION ---");
            print_receipt(receipt);
        }
        CallOutcome::Failed(e) => tracing::error!("{e}"),
    }
}
