//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mailtui/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::mail::ImapSettings;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub imap: ImapConfig,
    #[serde(default)]
    pub fake: FakeConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub backend: Option<BackendKind>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ImapConfig {
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub mailbox: Option<String>,
    pub tls: Option<bool>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FakeConfig {
    pub latency_ms: Option<u64>,
    pub fixture: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub accent: Option<String>,
}

/// Which mail backend to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Fake,
    Imap,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fake" => Ok(BackendKind::Fake),
            "imap" => Ok(BackendKind::Imap),
            other => Err(format!("unknown backend '{other}' (expected 'fake' or 'imap')")),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "mailtui.log";
pub const DEFAULT_IMAP_ADDRESS: &str = "localhost:1143";
pub const DEFAULT_IMAP_USERNAME: &str = "bob";
pub const DEFAULT_MAILBOX: &str = "INBOX";
pub const DEFAULT_IMAP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FAKE_LATENCY_MS: u64 = 1000;
pub const DEFAULT_ACCENT: &str = "magenta";

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend: Option<BackendKind>,
    pub imap_address: Option<String>,
    pub username: Option<String>,
    pub fixture: Option<PathBuf>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: BackendKind,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub imap: ImapSettings,
    pub fake_latency: Duration,
    pub fixture: Option<PathBuf>,
    pub accent: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mailtui/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mailtui").join("config.toml"))
}

/// Load config from `~/.mailtui/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MailConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MailConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(MailConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<MailConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MailConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MailConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config with the password masked.
fn redacted(config: &MailConfig) -> String {
    format!("{:?}", config).replace(
        &format!("{:?}", config.imap.password),
        if config.imap.password.is_some() { "Some(\"***\")" } else { "None" },
    )
}

/// Written on first run. Every line is a comment, so it loads as defaults.
const DEFAULT_CONFIG: &str = r##"# mailtui Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# backend = "fake"                   # "fake" or "imap" (MAILTUI_BACKEND, --backend)
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "mailtui.log"

# [imap]
# address = "localhost:1143"         # host:port (MAILTUI_IMAP_ADDRESS, --imap-address)
# username = "bob"                   # MAILTUI_IMAP_USERNAME, --username
# password = "pass"                  # Prefer MAILTUI_IMAP_PASSWORD
# mailbox = "INBOX"
# tls = false
# timeout_secs = 30

# [fake]
# latency_ms = 1000                  # Simulated delay on every backend call
# fixture = "inbox.json"             # Load the inbox from JSON instead of the demo messages

# [theme]
# accent = "magenta"                 # Any ratatui colour name or "#rrggbb"
"##;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MailConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &MailConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli
        .backend
        .or_else(|| {
            env("MAILTUI_BACKEND").and_then(|raw| match raw.parse() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    warn!("Ignoring MAILTUI_BACKEND: {}", e);
                    None
                }
            })
        })
        .or(config.general.backend)
        .unwrap_or_default();

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|raw| match raw.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log_level '{}', using debug", raw);
                None
            }
        })
        .unwrap_or(LevelFilter::Debug);

    let imap = ImapSettings {
        address: cli
            .imap_address
            .clone()
            .or_else(|| env("MAILTUI_IMAP_ADDRESS"))
            .or_else(|| config.imap.address.clone())
            .unwrap_or_else(|| DEFAULT_IMAP_ADDRESS.to_string()),
        username: cli
            .username
            .clone()
            .or_else(|| env("MAILTUI_IMAP_USERNAME"))
            .or_else(|| config.imap.username.clone())
            .unwrap_or_else(|| DEFAULT_IMAP_USERNAME.to_string()),
        // Password: env → config (never a flag)
        password: env("MAILTUI_IMAP_PASSWORD")
            .or_else(|| config.imap.password.clone())
            .unwrap_or_default(),
        mailbox: config
            .imap
            .mailbox
            .clone()
            .unwrap_or_else(|| DEFAULT_MAILBOX.to_string()),
        tls: config.imap.tls.unwrap_or(false),
        timeout: Duration::from_secs(
            config
                .imap
                .timeout_secs
                .unwrap_or(DEFAULT_IMAP_TIMEOUT_SECS),
        ),
    };

    ResolvedConfig {
        backend,
        log_level,
        log_file: config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        imap,
        fake_latency: Duration::from_millis(
            config.fake.latency_ms.unwrap_or(DEFAULT_FAKE_LATENCY_MS),
        ),
        fixture: cli.fixture.clone().or_else(|| config.fake.fixture.clone()),
        accent: config
            .theme
            .accent
            .clone()
            .unwrap_or_else(|| DEFAULT_ACCENT.to_string()),
    }
}
