//! Cross-cutting concerns shared by the binary and adapters.

pub mod config;

pub use config::{AppConfig, RepoBackend};
