//! Configuration management for todopad.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! application data directory (see [`DataStorage`]). A missing file is not an
//! error: [`Config::read`] falls back to [`Config::default`], so the
//! application runs without any setup.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use todopad::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db_path = config.db_path()?;
//! println!("Database: {}", db_path.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default SQLite database file name.
pub const DEFAULT_DB_FILE_NAME: &str = "todopad.db";

/// Where the task database lives.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StorageConfig {
    /// File name of the SQLite database inside the data directory.
    pub db_file_name: String,

    /// Overrides the platform data directory for the database file.
    ///
    /// The configuration file itself always stays in the platform directory,
    /// otherwise it could not be found on the next start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            data_dir: None,
        }
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Loads `config.json`, or the defaults when it does not exist yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. Returns `false` when there was nothing to remove.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Data directory used for the database file.
    pub fn storage(&self) -> DataStorage {
        match &self.storage.data_dir {
            Some(dir) => DataStorage::with_base_path(dir),
            None => DataStorage::new(),
        }
    }

    /// Full path of the task database, creating its directory if needed.
    pub fn db_path(&self) -> Result<PathBuf> {
        self.storage().get_path(&self.storage.db_file_name)
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigModuleStorage);

        let db_file_name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDbFileName.to_string())
            .default(current.storage.db_file_name.clone())
            .interact_text()?;

        let default_dir = current
            .storage
            .data_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        let data_dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDataDir.to_string())
            .default(default_dir)
            .allow_empty(true)
            .interact_text()?;

        let data_dir = data_dir.trim();
        Ok(Config {
            storage: StorageConfig {
                db_file_name: db_file_name.trim().to_string(),
                data_dir: if data_dir.is_empty() { None } else { Some(PathBuf::from(data_dir)) },
            },
        })
    }
}
