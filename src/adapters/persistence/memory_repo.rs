//! Implements SpeakerRepoPort in memory.
//!
//! Ids are assigned sequentially from 1. Useful for dry runs and tests.

use crate::domain::{DomainError, Speaker};
use crate::ports::SpeakerRepoPort;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory speaker store. Can be built to reject every save.
pub struct InMemorySpeakerRepo {
    speakers: RwLock<Vec<Speaker>>,
    fail_saves: bool,
}

impl InMemorySpeakerRepo {
    pub fn new() -> Self {
        Self {
            speakers: RwLock::new(Vec::new()),
            fail_saves: false,
        }
    }

    /// Repo whose `save_speaker` always returns `DomainError::Repo`.
    pub fn failing() -> Self {
        Self {
            speakers: RwLock::new(Vec::new()),
            fail_saves: true,
        }
    }

    /// Snapshot of saved speakers in save order (index + 1 = id).
    pub async fn saved(&self) -> Vec<Speaker> {
        self.speakers.read().await.clone()
    }
}

impl Default for InMemorySpeakerRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpeakerRepoPort for InMemorySpeakerRepo {
    async fn save_speaker(&self, speaker: &Speaker) -> Result<i64, DomainError> {
        if self.fail_saves {
            return Err(DomainError::Repo("in-memory repo configured to fail".into()));
        }
        let mut speakers = self.speakers.write().await;
        speakers.push(speaker.clone());
        let id = speakers.len() as i64;
        info!(speaker_id = id, "[MEMORY] stored speaker");
        Ok(id)
    }
}
