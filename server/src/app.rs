//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, EffortArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_TARGET, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::domain::{EffortQuery, EffortService};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub effort: Arc<EffortService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config)?;

        match command {
            Some(Commands::Effort(args)) => app.run_effort_command(&args).await,
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let effort = Arc::new(
            EffortService::new(&config.toggl).context("Failed to initialize Toggl client")?,
        );

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            effort,
        })
    }

    /// One-shot lookup: prints `<value> <unit>` and the report link
    async fn run_effort_command(&self, args: &EffortArgs) -> Result<()> {
        let query = EffortQuery::from_params(
            args.month.as_deref(),
            args.sprint.as_deref(),
            args.project.as_deref(),
            args.task.as_deref(),
            args.units.as_deref(),
        )?;

        let effort = self.effort.effort(&query).await?;
        println!("{} {}", effort.value, effort.units);
        println!("{}", effort.link);
        Ok(())
    }

    fn init_logging(debug: bool) {
        let level = if debug { "debug" } else { "info" };
        let default_filter = format!("{level},{APP_TARGET}={level}");

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.config.toggl.workspace_id,
        );

        let server = ApiServer::new(
            app.config.server.clone(),
            app.effort.clone(),
            app.shutdown.clone(),
        );
        server.start().await?;

        tracing::debug!("Shutdown complete");
        Ok(())
    }
}
