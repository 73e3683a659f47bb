#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use todopad::libs::config::{Config, StorageConfig, CONFIG_FILE_NAME, DEFAULT_DB_FILE_NAME};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the platform data directory at a temporary home.
    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { temp_dir }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.db_file_name, DEFAULT_DB_FILE_NAME);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = serde_json::from_str(r#"{"storage":{"db_file_name":"work.db"}}"#).unwrap();
        assert_eq!(config.storage.db_file_name, "work.db");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_data_dir_overrides_db_location() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join("custom");
        let config = Config {
            storage: StorageConfig {
                db_file_name: "mine.db".to_string(),
                data_dir: Some(data_dir.clone()),
            },
        };

        let db_path = config.db_path().unwrap();

        assert_eq!(db_path, data_dir.join("mine.db"));
        assert!(data_dir.is_dir());
    }

    // Environment-dependent steps share one test so parallel tests never race on HOME.
    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_read_delete_cycle(ctx: &mut ConfigTestContext) {
        assert_eq!(Config::read().unwrap(), Config::default());
        assert!(!Config::delete().unwrap());

        let config = Config {
            storage: StorageConfig {
                db_file_name: "saved.db".to_string(),
                data_dir: Some(PathBuf::from("/tmp/todopad-data")),
            },
        };
        config.save().unwrap();

        let config_files: Vec<_> = walk(ctx.temp_dir.path())
            .into_iter()
            .filter(|path| path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME))
            .collect();
        assert_eq!(config_files.len(), 1);

        assert_eq!(Config::read().unwrap(), config);

        assert!(Config::delete().unwrap());
        assert_eq!(Config::read().unwrap(), Config::default());
    }

    fn walk(dir: &std::path::Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files.extend(walk(&path));
            } else {
                files.push(path);
            }
        }
        files
    }
}
