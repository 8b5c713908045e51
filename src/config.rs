//! Application configuration.
//!
//! Values are resolved with priority: `config.toml` > environment
//! (including `.env`) > built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;

// ==================== Server Configuration ====================

/// Default address to bind to
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// ==================== Session Configuration ====================

/// Name of the cookie carrying the exercise session id
pub const SESSION_COOKIE_NAME: &str = "sv_session";

/// Default inactivity window before a session is dropped
pub const DEFAULT_SESSION_EXPIRY_MINUTES: i64 = 60;

/// Probability threshold for session cleanup (0-255, lower = less frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  pub server_addr: String,
  pub server_port: u16,
  pub content_dir: PathBuf,
  pub session_expiry_minutes: i64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_addr: DEFAULT_SERVER_ADDR.to_string(),
      server_port: DEFAULT_SERVER_PORT,
      content_dir: PathBuf::from(paths::lessons_dir()),
      session_expiry_minutes: DEFAULT_SESSION_EXPIRY_MINUTES,
    }
  }
}

impl AppConfig {
  /// Get the full server bind address
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.server_addr, self.server_port)
  }
}

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  server: Option<ServerSection>,
  content: Option<ContentSection>,
  session: Option<SessionSection>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
  addr: Option<String>,
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ContentSection {
  dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionSection {
  expiry_minutes: Option<i64>,
}

/// Load configuration from `config.toml` in the working directory.
pub fn load() -> AppConfig {
  load_from(Path::new("config.toml"))
}

/// Load configuration from the given file, falling back to env and defaults.
pub fn load_from(path: &Path) -> AppConfig {
  // Load .env file if present
  let _ = dotenvy::dotenv();

  let file = match std::fs::read_to_string(path) {
    Ok(contents) => parse_config_file(&contents).unwrap_or_else(|e| {
      tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
      ConfigFile::default()
    }),
    Err(_) => ConfigFile::default(),
  };

  resolve(file, |key| std::env::var(key).ok())
}

fn parse_config_file(contents: &str) -> Result<ConfigFile, toml::de::Error> {
  toml::from_str(contents)
}

/// Merge file values over environment values over defaults.
fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> AppConfig {
  let defaults = AppConfig::default();

  let server_addr = file
    .server
    .as_ref()
    .and_then(|s| s.addr.clone())
    .or_else(|| env("SERVER_ADDR"))
    .unwrap_or(defaults.server_addr);

  let server_port = file
    .server
    .as_ref()
    .and_then(|s| s.port)
    .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
    .unwrap_or(defaults.server_port);

  let content_dir = file
    .content
    .and_then(|c| c.dir)
    .or_else(|| env("CONTENT_DIR"))
    .map(PathBuf::from)
    .unwrap_or(defaults.content_dir);

  let session_expiry_minutes = file
    .session
    .and_then(|s| s.expiry_minutes)
    .or_else(|| env("SESSION_EXPIRY_MINUTES").and_then(|m| m.parse().ok()))
    .filter(|m| *m > 0)
    .unwrap_or(defaults.session_expiry_minutes);

  tracing::info!("Using lesson content from {}", content_dir.display());

  AppConfig {
    server_addr,
    server_port,
    content_dir,
    session_expiry_minutes,
  }
}
