use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use mailtui::core::config::{self, BackendKind, CliOverrides, ConfigError, ResolvedConfig};
use mailtui::core::router::Router;
use mailtui::mail::{BackendError, FakeBackend, ImapBackend, MailBackend};
use mailtui::tui::{self, Theme};

#[derive(Parser)]
#[command(name = "mailtui", about = "Terminal email client")]
struct Args {
    /// Mail backend to use
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,

    /// IMAP server address (host:port)
    #[arg(long)]
    imap_address: Option<String>,

    /// IMAP username
    #[arg(short, long)]
    username: Option<String>,

    /// JSON inbox for the fake backend
    #[arg(long)]
    fixture: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            backend: self.backend,
            imap_address: self.imap_address.clone(),
            username: self.username.clone(),
            fixture: self.fixture.clone(),
        }
    }
}

/// Anything that stops mailtui before or while taking over the terminal.
#[derive(Debug)]
enum StartupError {
    Config(ConfigError),
    Fixture { path: PathBuf, source: std::io::Error },
    Backend(BackendError),
    Terminal(std::io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "{e}"),
            StartupError::Fixture { path, source } => {
                write!(f, "failed to load fixture {}: {source}", path.display())
            }
            StartupError::Backend(e) => write!(f, "failed to create IMAP backend: {e}"),
            StartupError::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    match run(args).await {
        Ok(()) => {
            info!("mailtui exiting cleanly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("mailtui: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), StartupError> {
    let file_config = config::load_config().map_err(StartupError::Config)?;
    let resolved = config::resolve(&file_config, &args.overrides());
    init_logging(&resolved);

    info!(
        "mailtui starting up with backend: {:?}",
        resolved.backend
    );

    let backend = build_backend(&resolved).await?;
    let theme = Theme::from_accent(&resolved.accent);

    tui::run(Router::new(), backend, theme).map_err(StartupError::Terminal)
}

/// File logger; the terminal belongs to the UI.
fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match File::create(&config.log_file) {
        Ok(file) => {
            let _ = WriteLogger::init(config.log_level, log_config, file);
        }
        Err(e) => eprintln!(
            "mailtui: cannot open log file {}: {e}",
            config.log_file.display()
        ),
    }
}

async fn build_backend(config: &ResolvedConfig) -> Result<Arc<dyn MailBackend>, StartupError> {
    match config.backend {
        BackendKind::Fake => {
            let backend = match &config.fixture {
                Some(path) => FakeBackend::from_fixture(path, config.fake_latency).map_err(
                    |source| StartupError::Fixture {
                        path: path.clone(),
                        source,
                    },
                )?,
                None => FakeBackend::new(config.fake_latency),
            };
            Ok(Arc::new(backend))
        }
        BackendKind::Imap => {
            let settings = config.imap.clone();
            info!("Connecting to IMAP server at {}", settings.address);
            // Login is blocking network I/O
            let backend = tokio::task::spawn_blocking(move || ImapBackend::connect(&settings))
                .await
                .map_err(|e| {
                    StartupError::Backend(BackendError::Transport(format!(
                        "connect task failed: {e}"
                    )))
                })?
                .map_err(StartupError::Backend)?;
            Ok(Arc::new(backend))
        }
    }
}
