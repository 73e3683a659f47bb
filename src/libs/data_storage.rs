//! Platform data directory resolution.
//!
//! All files owned by the application (the SQLite database and `config.json`)
//! live in a per-user directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\todopad`
//! - **macOS**: `~/Library/Application Support/lacodda/todopad`
//! - **Linux**: `~/.local/share/lacodda/todopad`

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const VENDOR_NAME: &str = "lacodda";
pub const APP_NAME: &str = "todopad";

#[derive(Clone, Debug)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Uses `base_path` as the data directory instead of the platform default.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the full path of `file_name`, creating the data directory if needed.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_path_creates_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = temp_dir.path().join("nested").join("todopad");
        let storage = DataStorage::with_base_path(&base);

        let path = storage.get_path("todopad.db").unwrap();

        assert!(base.is_dir());
        assert_eq!(path, base.join("todopad.db"));
    }
}
