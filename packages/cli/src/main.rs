use clap::Parser;
use meridian_cli::{
    args::{CliArgs, Command},
    command::{interact::Interact, status::Status},
    config::Config,
    context::CliContext,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utils::config::{ConfigBuilder, ConfigExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // the one fatal path: print the full error chain and exit non-zero
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let CliArgs { command, env } = CliArgs::parse();

    let config: Config = ConfigBuilder::new(env).build()?;

    // setup tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false),
        )
        .with(config.tracing_env_filter()?)
        .try_init()?;

    let ctx = CliContext::try_new(config).await?;

    match command {
        Command::Status => Status::run(&ctx).await,
        Command::Interact => Interact::run(&ctx).await,
    }
}
