//! Application configuration. Data directory, storage backend, input file.
//!
//! Only wires collaborators; the registration rule tables are not configurable.

use crate::domain::DomainError;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Which SpeakerRepoPort implementation the binary builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoBackend {
    #[default]
    Sqlite,
    Jsonl,
    Memory,
}

impl std::str::FromStr for RepoBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "jsonl" => Ok(Self::Jsonl),
            "memory" => Ok(Self::Memory),
            other => Err(DomainError::Config(format!(
                "unknown repo backend '{}' (expected sqlite, jsonl or memory)",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory for speakers.db / speakers.jsonl. Read from SPEAKER_REG_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Storage backend. Read from SPEAKER_REG_REPO_BACKEND.
    #[serde(default)]
    pub repo_backend: Option<RepoBackend>,

    /// Speaker JSON to register when no CLI argument is given. Read from SPEAKER_REG_SPEAKER_FILE.
    #[serde(default)]
    pub speaker_file: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("SPEAKER_REG"));
        if let Ok(path) = std::env::var("SPEAKER_REG_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to ./data.
    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    /// Returns the storage backend. Defaults to SQLite.
    pub fn repo_backend_or_default(&self) -> RepoBackend {
        self.repo_backend.unwrap_or_default()
    }

    /// CLI argument wins over the configured speaker file.
    pub fn speaker_file(&self, cli_arg: Option<String>) -> Option<PathBuf> {
        cli_arg
            .or_else(|| self.speaker_file.clone())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.data_dir_or_default(), PathBuf::from("./data"));
        assert_eq!(cfg.repo_backend_or_default(), RepoBackend::Sqlite);
        assert_eq!(cfg.speaker_file(None), None);
    }

    #[test]
    fn test_cli_arg_overrides_speaker_file() {
        let cfg = AppConfig {
            speaker_file: Some("from_env.json".into()),
            ..Default::default()
        };
        assert_eq!(
            cfg.speaker_file(Some("cli.json".into())),
            Some(PathBuf::from("cli.json"))
        );
        assert_eq!(cfg.speaker_file(None), Some(PathBuf::from("from_env.json")));
    }

    #[test]
    fn test_repo_backend_from_str() {
        assert_eq!("JSONL".parse::<RepoBackend>().unwrap(), RepoBackend::Jsonl);
        assert_eq!(" memory ".parse::<RepoBackend>().unwrap(), RepoBackend::Memory);
        assert!(matches!(
            "postgres".parse::<RepoBackend>(),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_deserialize_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("speaker_reg.toml");
        std::fs::write(&path, "data_dir = \"/tmp/reg\"\nrepo_backend = \"jsonl\"\n").unwrap();

        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.data_dir_or_default(), PathBuf::from("/tmp/reg"));
        assert_eq!(cfg.repo_backend_or_default(), RepoBackend::Jsonl);
    }
}
