use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ElibraryError, Result};
use crate::service::LibraryService;

/// Root application configuration, loaded from `~/.config/elibrary/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Load `seed_books` into the catalog at startup.
    pub preload: bool,
    pub seed_books: Vec<SeedBook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBook {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for CatalogConfig {
    fn default() -> Self {
        let seed = |title: &str, author: &str| SeedBook {
            title: title.to_string(),
            author: author.to_string(),
        };
        Self {
            preload: true,
            seed_books: vec![
                seed("The Alchemist", "Paulo Coelho"),
                seed("1984", "George Orwell"),
                seed("Python Programming", "John Zelle"),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/elibrary/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("ELIBRARY_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("elibrary")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Parsed log level for the subscriber.
    pub fn log_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(self.logging.level.trim()).map_err(|_| {
            ElibraryError::ConfigError(format!("unknown log level: {}", self.logging.level))
        })
    }

    /// Add the configured seed books to `service`, in order.
    /// Returns how many were added.
    pub fn seed(&self, service: &mut LibraryService) -> usize {
        if !self.catalog.preload {
            return 0;
        }
        for book in &self.catalog.seed_books {
            service.add(book.title.as_str(), book.author.as_str());
        }
        tracing::info!(count = self.catalog.seed_books.len(), "catalog seeded");
        self.catalog.seed_books.len()
    }
}
