//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Speaker};

/// Repository port. Persist a fully evaluated speaker with its sessions.
#[async_trait::async_trait]
pub trait SpeakerRepoPort: Send + Sync {
    /// Store the speaker and return the newly assigned id.
    async fn save_speaker(&self, speaker: &Speaker) -> Result<i64, DomainError>;
}
