//! Server configuration
//!
//! Everything has a default; environment variables only override.

use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DATABASE_FILE_NAME: &str = "contacts.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    pub database_path: PathBuf,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_path: default_database_path(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Read `BIND_ADDRESS`, `DATABASE_PATH` and `LOG_FORMAT` on top of the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_address = lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address);
        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);
        let json_logs = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(defaults.json_logs);

        Self {
            bind_address,
            database_path,
            json_logs,
        }
    }

    pub fn log_summary(&self) {
        info!(
            "Config loaded: bind={}, db={}",
            self.bind_address,
            self.database_path.display()
        );
    }
}

/// `contacts.db` next to the running executable, or in the working
/// directory if the executable path can't be resolved.
fn default_database_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DATABASE_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
}
