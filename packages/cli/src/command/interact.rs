use anyhow::Result;
use utils::{
    contract_call::ContractCaller,
    registry::{ContractDescriptor, Registry},
};

use crate::{
    context::CliContext,
    display,
    interact::{
        coerce::{coerce_arg, param_label},
        driver,
        navigator::contract_choices,
        prompt::{Prompt, StdinPrompt},
        selector::{function_choices, FunctionChoice},
    },
};

/// The interactive session: an explicit two-state loop over contract choice
/// and function choice. There is deliberately no exit transition - the
/// session ends via interrupt, or the input stream closing
pub struct Interact;

enum SessionState {
    AtContractChoice,
    AtFunctionChoice(ContractDescriptor),
}

enum Transition {
    Back,
    Stay,
}

impl Interact {
    pub async fn run(ctx: &CliContext) -> Result<()> {
        let mut prompt = StdinPrompt;
        Self::run_loop(&ctx.registry, &ctx.caller, &mut prompt).await
    }

    pub async fn run_loop(
        registry: &Registry,
        caller: &dyn ContractCaller,
        prompt: &mut dyn Prompt,
    ) -> Result<()> {
        match caller.signer_address() {
            Some(address) => println!("signer: {address}"),
            None => println!("read-only session (no signing credential configured)"),
        }

        let names = registry.contract_names();
        let mut state = SessionState::AtContractChoice;

        loop {
            state = match state {
                SessionState::AtContractChoice => {
                    let descriptor =
                        Self::choose_contract(registry, caller, prompt, &names).await?;
                    SessionState::AtFunctionChoice(descriptor)
                }
                SessionState::AtFunctionChoice(descriptor) => {
                    match Self::choose_and_execute(caller, prompt, &descriptor).await? {
                        Transition::Back => SessionState::AtContractChoice,
                        Transition::Stay => SessionState::AtFunctionChoice(descriptor),
                    }
                }
            };
        }
    }

    async fn choose_contract(
        registry: &Registry,
        caller: &dyn ContractCaller,
        prompt: &mut dyn Prompt,
        names: &[String],
    ) -> Result<ContractDescriptor> {
        loop {
            let query = prompt.line("contract (search)")?;
            let choices = contract_choices(names, &query);

            if choices.is_empty() {
                println!("no contracts match {query:?}");
                continue;
            }

            for (index, name) in choices.iter().enumerate() {
                println!("  [{index}] {name}");
            }

            let Ok(picked) = prompt.line("select #")?.parse::<usize>() else {
                continue;
            };
            let Some(name) = choices.get(picked) else {
                continue;
            };

            let descriptor = match registry.resolve(name) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    tracing::error!("{e}");
                    continue;
                }
            };

            println!("{}: {}", descriptor.name, descriptor.address);

            // an address without code is worth a warning, but not a dead end -
            // a call against it will fail on its own terms
            match caller.bytecode_present(descriptor.address).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(
                    "no bytecode at {} - {} looks like an unconfigured address",
                    descriptor.address,
                    descriptor.name
                ),
                Err(e) => tracing::warn!("{e}"),
            }

            return Ok(descriptor);
        }
    }

    async fn choose_and_execute(
        caller: &dyn ContractCaller,
        prompt: &mut dyn Prompt,
        descriptor: &ContractDescriptor,
    ) -> Result<Transition> {
        let query = prompt.line(&format!("{}: function (search)", descriptor.name))?;
        let choices = function_choices(&descriptor.abi, &query);

        if choices.is_empty() {
            println!("no functions match {query:?}");
            return Ok(Transition::Stay);
        }

        for (index, choice) in choices.iter().enumerate() {
            match choice {
                FunctionChoice::Back => println!("  [{index}] (back)"),
                FunctionChoice::Function(function) => {
                    println!("  [{index}] {}", display::function_signature(function))
                }
            }
        }

        let Ok(picked) = prompt.line("select #")?.parse::<usize>() else {
            return Ok(Transition::Stay);
        };
        let Some(choice) = choices.get(picked) else {
            return Ok(Transition::Stay);
        };

        let function = match choice {
            FunctionChoice::Back => return Ok(Transition::Back),
            FunctionChoice::Function(function) => function,
        };

        let mut args = Vec::with_capacity(function.inputs.len());
        for param in &function.inputs {
            let raw = prompt.line(&param_label(param))?;
            match coerce_arg(param, &raw) {
                Ok(value) => args.push(value),
                Err(e) => {
                    tracing::error!("invalid input: {e:#}");
                    return Ok(Transition::Stay);
                }
            }
        }

        match driver::execute(caller, prompt, descriptor.address, function, &args).await? {
            None => tracing::info!("transaction abandoned"),
            Some(outcome) => display::report_outcome(function, &outcome),
        }

        Ok(Transition::Stay)
    }
}
