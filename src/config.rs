//! Configuration loading and resolution.
//!
//! Settings follow a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`BOOKSHELF_*`, handled by clap)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which record store backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite database file (or ":memory:")
    Sqlite,
    /// Process-local store, lost on shutdown
    Memory,
}

/// Command-line arguments for bookshelf
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Book catalog HTTP service")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "BOOKSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (host:port)
    #[arg(short, long, env = "BOOKSHELF_LISTEN")]
    pub listen: Option<String>,

    /// Record store backend
    #[arg(long, value_enum, env = "BOOKSHELF_STORE")]
    pub store: Option<StoreBackend>,

    /// SQLite database path (":memory:" for a transient database)
    #[arg(long, env = "BOOKSHELF_DATABASE")]
    pub database: Option<PathBuf>,

    /// Fail on dangling book references instead of skipping them
    #[arg(long, env = "BOOKSHELF_STRICT")]
    pub strict: bool,

    /// Start from an empty catalog instead of the demo rows
    #[arg(long)]
    pub no_seed: bool,
}

/// On-disk configuration (TOML). Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub listen: Option<String>,
    pub store: Option<StoreBackend>,
    pub database: Option<PathBuf>,
    pub strict: Option<bool>,
    pub seed: Option<bool>,
}

impl FileConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub store: StoreBackend,
    pub database: PathBuf,
    pub strict: bool,
    pub seed: bool,
}

impl Config {
    pub const DEFAULT_LISTEN: &'static str = "127.0.0.1:3000";

    /// Resolve the runtime configuration from CLI arguments, the config
    /// file, and compiled defaults. Environment variables are folded into
    /// the CLI layer by clap.
    pub fn resolve(cli: &Cli) -> Result<Config, ConfigError> {
        let file = match config_file_path(cli) {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                FileConfig::load(&path)?
            }
            None => FileConfig::default(),
        };

        let listen_str = cli
            .listen
            .clone()
            .or(file.listen)
            .unwrap_or_else(|| Self::DEFAULT_LISTEN.to_string());
        let listen: SocketAddr = listen_str
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid listen address: {}", listen_str)))?;

        let store = cli.store.or(file.store).unwrap_or(StoreBackend::Sqlite);

        let database = cli
            .database
            .clone()
            .or(file.database)
            .unwrap_or_else(default_database_path);

        // Boolean flags can only be switched on from a higher layer, never
        // back off
        let strict = cli.strict || file.strict.unwrap_or(false);
        let seed = if cli.no_seed {
            false
        } else {
            file.seed.unwrap_or(true)
        };

        Ok(Config {
            listen,
            store,
            database,
            strict,
            seed,
        })
    }
}

/// Config file location: an explicit `--config` path wins; otherwise the
/// platform config directory is consulted, and only used if the file exists.
fn config_file_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.config {
        return Some(path.clone());
    }

    let default = dirs::config_dir()?.join("bookshelf").join("config.toml");
    default.exists().then_some(default)
}

/// OS-dependent default database path (platform data dir)
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bookshelf"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookshelf.db")
}
