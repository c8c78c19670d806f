use anyhow::{Context, Result};
use tokio::io::BufReader;

use crate::{
    app::{load_config, Config},
    cli::{handle_command, Cli},
    console::{ChatLoop, Notice, Presenter, TerminalPresenter},
    jurisdictions::FileDocumentSource,
    models::ChatCompletionsResponder,
    session::{Session, SessionController},
};

/// Load configuration and apply command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(model) = &cli.model {
        config.responder.model = model.clone();
    }

    Ok(config)
}

/// Wire the file-backed documents and the HTTP responder into a controller
pub fn build_controller(config: &Config) -> Result<SessionController> {
    let registry = config.registry().context("Cannot start without a jurisdiction")?;
    let documents = FileDocumentSource::from_registry(&config.data_dir, &registry);
    let responder = ChatCompletionsResponder::new(&config.responder)?;

    Ok(SessionController::new(
        registry,
        Box::new(documents),
        Box::new(responder),
    ))
}

/// Start a session, honouring an explicitly requested jurisdiction
pub fn open_session(controller: &SessionController, jurisdiction: Option<&str>) -> Result<Session> {
    let mut session = controller.new_session();
    if let Some(id) = jurisdiction {
        controller.select_jurisdiction(&mut session, id)?;
    }
    Ok(session)
}

/// Main runtime orchestrator for interactive use
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let config = resolve_config(&cli)?;
        Ok(Self { cli, config })
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        // Handle subcommands
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(()); // Command handled, exit
            }
        }

        let controller = build_controller(&self.config)?;
        let session = open_session(&controller, self.cli.jurisdiction.as_deref())?;

        let mut presenter = TerminalPresenter::stdout();
        for issue in controller.check_documents() {
            tracing::warn!("{}", issue);
            presenter.show_notice(&Notice::from(&issue));
        }

        tracing::info!(
            jurisdiction = session.jurisdiction(),
            model = controller.responder().name(),
            "starting interactive session"
        );

        let mut chat = ChatLoop::new(&controller, session, presenter);
        chat.run(BufReader::new(tokio::io::stdin())).await
    }
}
