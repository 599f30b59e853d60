//! reagent CLI binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reagent::agent_loop::{LoopEvent, ReactLoop, RunOutcome};
use reagent::cli::{print_event, Cli};
use reagent::config::AgentConfig;
use reagent::error::AgentError;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reagent=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AgentError> {
    let config = cli.apply_overrides(AgentConfig::load(cli.config.as_deref())?);

    let react = ReactLoop::from_config(&config)?
        .with_event_sink(Arc::new(|event: LoopEvent| print_event(&event)));
    let result = react.run(&cli.question).await?;

    if let RunOutcome::TurnBudgetExhausted { .. } = result.outcome {
        eprintln!(
            "warning: no final answer after {} turns (turn budget exhausted)",
            result.turns
        );
    }

    Ok(())
}
