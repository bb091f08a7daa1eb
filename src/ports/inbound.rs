//! Inbound port. Host application calls into the registration use case.

use crate::domain::{RegistrationError, Speaker};

/// Input port: run one speaker through the registration pipeline.
#[async_trait::async_trait]
pub trait RegisterSpeaker: Send + Sync {
    /// Validate, approve sessions, compute the fee and persist.
    ///
    /// Returns the assigned speaker id, or `None` if the save collaborator failed.
    /// Rule violations are returned as `RegistrationError`.
    async fn register(&self, speaker: &mut Speaker) -> Result<Option<i64>, RegistrationError>;
}
