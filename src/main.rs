use anyhow::Result;
use clap::Parser;

use jurist::{
    cli::Cli,
    runtime::{build_controller, format_result, open_session, resolve_config, NonInteractiveRunner, Orchestrator},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Check if running in non-interactive mode
    if let Some(prompt) = cli.prompt.clone() {
        run_non_interactive(cli, prompt).await
    } else {
        let orchestrator = Orchestrator::new(cli)?;
        orchestrator.run().await
    }
}

/// Run in non-interactive mode
async fn run_non_interactive(cli: Cli, prompt: String) -> Result<()> {
    let config = resolve_config(&cli)?;
    let controller = build_controller(&config)?;
    let session = open_session(&controller, cli.jurisdiction.as_deref())?;

    let result = NonInteractiveRunner::new(&controller, session)
        .execute(prompt)
        .await;

    println!("{}", format_result(&result, cli.output_format));

    // Exit with appropriate code
    if !result.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
