use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    console::Notice,
    jurisdictions::FileDocumentSource,
    models::{ChatCompletionsResponder, Responder},
};

use super::Commands;

/// Handle CLI subcommands. Returns false when the chat should start.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing Jurist configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::List => {
            list_jurisdictions(config)?;
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to chat interface
    }
}

/// List supported jurisdictions, default first
pub fn list_jurisdictions(config: &Config) -> Result<()> {
    let registry = config.registry()?;
    println!("Supported jurisdictions:");
    for (index, jurisdiction) in registry.iter().enumerate() {
        let suffix = if index == 0 { " (default)" } else { "" };
        println!(
            "  • {} {}{}",
            jurisdiction.id.green(),
            jurisdiction.name,
            suffix
        );
    }
    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("Jurist v{}", env!("CARGO_PKG_VERSION"));
    println!("   A constitution-grounded legal information assistant");
}

/// Show status of data files and the model endpoint
async fn show_status(config: &Config) -> Result<()> {
    println!("Jurist Status:");
    println!();

    let registry = config.registry()?;
    let documents = FileDocumentSource::from_registry(&config.data_dir, &registry);
    let issues = documents.check_data_files();
    if issues.is_empty() {
        println!(
            "  [OK] Constitutions: {} files in {}",
            registry.len(),
            documents.data_dir().display()
        );
    } else {
        for issue in &issues {
            match Notice::from(issue) {
                Notice::Error(text) => println!("  [ERROR] {}", text),
                notice => println!("  [WARNING] {}", notice.text()),
            }
        }
    }

    let responder = ChatCompletionsResponder::new(&config.responder)?;
    if responder.validate_connection().await.unwrap_or(false) {
        println!(
            "  [OK] Model endpoint: {} ({})",
            config.responder.base_url,
            responder.name()
        );
    } else {
        println!(
            "  [ERROR] Model endpoint: not reachable at {}",
            config.responder.base_url
        );
    }

    if let Ok(dir) = get_config_dir() {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            println!("  [OK] Configuration: {}", config_path.display());
        } else {
            println!("  [WARNING] Configuration: Not found (using defaults)");
        }
    }

    println!("\n  Environment:");
    if std::env::var(&config.responder.api_key_env).is_ok() {
        println!("    • {}: Set", config.responder.api_key_env);
    } else {
        println!("    • {}: Not set", config.responder.api_key_env);
    }

    println!();
    Ok(())
}
