use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::U256;
use anyhow::{Context, Result};
use meridian_types::CurrencyKey;
use utils::contract_call::ContractCaller;

use crate::{context::CliContext, display};

/// Dumps protocol state section by section - a failing section is reported
/// as a warning and the rest of the report continues
pub struct Status;

impl Status {
    pub async fn run(ctx: &CliContext) -> Result<()> {
        println!("--- MERIDIAN STATUS ---");
        println!("network: {} ({})", ctx.config.network, ctx.config.variant);
        match ctx.config.block {
            Some(block) => println!("block: {block}"),
            None => println!("block: latest"),
        }

        for (title, result) in [
            ("system", Self::system(ctx).await),
            ("supply", Self::supply(ctx).await),
            ("fee pool", Self::fee_pool(ctx).await),
            ("exchange rates", Self::exchange_rates(ctx).await),
            ("debt", Self::debt(ctx).await),
        ] {
            if let Err(e) = result {
                tracing::warn!("{title} section unavailable: {e:#}");
            }
        }

        Ok(())
    }

    /// Resolve a contract, find the named function, and read it at the
    /// configured block - the same path the interactive driver uses
    async fn read(
        ctx: &CliContext,
        contract: &str,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<(Function, Vec<DynSolValue>)> {
        let descriptor = ctx.registry.resolve(contract)?;
        let function = descriptor
            .function(name)
            .with_context(|| format!("{contract} has no function {name}"))?
            .clone();

        let values = ctx.caller.view(descriptor.address, &function, args).await?;
        Ok((function, values))
    }

    async fn single(
        ctx: &CliContext,
        contract: &str,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<DynSolValue> {
        let (_, values) = Self::read(ctx, contract, name, args).await?;
        values.into_iter().next().context("empty return data")
    }

    async fn system(ctx: &CliContext) -> Result<()> {
        println!("\n--- SYSTEM ---");
        let suspended = Self::single(ctx, "SystemStatus", "systemSuspended", &[]).await?;
        println!("suspended: {}", display::format_value(&suspended));
        Ok(())
    }

    async fn supply(ctx: &CliContext) -> Result<()> {
        println!("\n--- SUPPLY ---");

        let total = Self::single(ctx, "Meridian", "totalSupply", &[]).await?;
        println!("total supply: {}", display::format_value(&total));

        let mintable = Self::single(ctx, "SupplySchedule", "mintableSupply", &[]).await?;
        println!("mintable supply: {}", display::format_value(&mintable));

        let last_mint = Self::single(ctx, "SupplySchedule", "lastMintEvent", &[]).await?;
        println!("last mint event: {}", display::format_value(&last_mint));

        Ok(())
    }

    async fn fee_pool(ctx: &CliContext) -> Result<()> {
        println!("\n--- FEE POOL ---");

        let duration = Self::single(ctx, "FeePool", "feePeriodDuration", &[]).await?;
        println!("fee period duration: {}", display::format_value(&duration));

        let index = DynSolValue::Uint(U256::ZERO, 256);
        let (function, values) = Self::read(ctx, "FeePool", "recentFeePeriods", &[index]).await?;
        println!("current period:");
        display::print_outputs(&function.outputs, &values);

        Ok(())
    }

    async fn exchange_rates(ctx: &CliContext) -> Result<()> {
        println!("\n--- EXCHANGE RATES ---");

        for key in &ctx.config.currency_keys {
            let key = CurrencyKey::new(key);
            let word = DynSolValue::FixedBytes(key.word()?, 32);

            let rate =
                Self::single(ctx, "ExchangeRates", "rateForCurrency", &[word.clone()]).await?;
            let stale = Self::single(ctx, "ExchangeRates", "rateIsStale", &[word]).await?;

            println!(
                "{key}: {} (stale: {})",
                display::format_value(&rate),
                display::format_value(&stale)
            );
        }

        Ok(())
    }

    async fn debt(ctx: &CliContext) -> Result<()> {
        println!("\n--- DEBT ---");
        let (function, values) = Self::read(ctx, "DebtCache", "cacheInfo", &[]).await?;
        display::print_outputs(&function.outputs, &values);
        Ok(())
    }
}
