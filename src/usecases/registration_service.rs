//! Registration pipeline: required fields -> eligibility -> session approval -> fee -> save.
//!
//! - Each stage returns the first failure and aborts the rest
//! - Only the session `approved` flags and the fee are mutated
//! - Save failures are logged and reported as "no id", never as an error

use crate::domain::{BrowserName, RegistrationError, RegistrationPolicy, Speaker};
use crate::ports::{RegisterSpeaker, SpeakerRepoPort};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registration service. Applies the fixed rule tables and hands accepted speakers to the repo.
pub struct RegistrationService {
    repo: Arc<dyn SpeakerRepoPort>,
    policy: RegistrationPolicy,
}

impl RegistrationService {
    pub fn new(repo: Arc<dyn SpeakerRepoPort>) -> Self {
        Self::with_policy(repo, RegistrationPolicy::standard())
    }

    pub fn with_policy(repo: Arc<dyn SpeakerRepoPort>, policy: RegistrationPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn policy(&self) -> &RegistrationPolicy {
        &self.policy
    }

    /// Register a speaker. Returns the id assigned by the repository.
    pub async fn register(&self, speaker: &mut Speaker) -> Result<Option<i64>, RegistrationError> {
        self.validate_registration(speaker)?;
        self.calculate_registration_fee(speaker);
        Ok(self.save_speaker(speaker).await)
    }

    /// Runs the rule stages: required fields, eligibility, session approval.
    pub fn validate_registration(&self, speaker: &mut Speaker) -> Result<(), RegistrationError> {
        self.validate_required_fields(speaker)?;
        if !self.is_eligible(speaker) {
            debug!(email = %speaker.email, "speaker rejected by eligibility rules");
            return Err(RegistrationError::NotEligible);
        }
        self.approve_sessions(speaker)
    }

    /// Checks first name, last name, email (in that order), then the session list.
    pub fn validate_required_fields(&self, speaker: &Speaker) -> Result<(), RegistrationError> {
        let required = [
            ("First name", &speaker.first_name),
            ("Last name", &speaker.last_name),
            ("Email", &speaker.email),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(RegistrationError::MissingField { field: *field });
        }
        if speaker.sessions.is_empty() {
            return Err(RegistrationError::NoSessions);
        }
        Ok(())
    }

    /// Credential bar OR not (restricted domain / legacy browser).
    pub fn is_eligible(&self, speaker: &Speaker) -> bool {
        self.has_requirements_complete(speaker) || !self.is_in_domain_or_browser(speaker)
    }

    pub fn has_requirements_complete(&self, speaker: &Speaker) -> bool {
        speaker.years_experience.is_some_and(|years| years > 10)
            || speaker.has_blog
            || speaker.certifications.len() > 3
            || self.is_in_employer_list(speaker)
    }

    pub fn is_in_employer_list(&self, speaker: &Speaker) -> bool {
        self.policy
            .preferred_employers
            .iter()
            .any(|employer| *employer == speaker.employer)
    }

    pub fn is_in_domain_or_browser(&self, speaker: &Speaker) -> bool {
        self.is_in_domain_list(speaker) || self.is_legacy_browser(speaker)
    }

    /// Domain is whatever follows the last '@' (the whole address if there is none).
    pub fn is_in_domain_list(&self, speaker: &Speaker) -> bool {
        let domain = speaker.email.rsplit('@').next().unwrap_or_default();
        self.policy.restricted_domains.iter().any(|d| *d == domain)
    }

    pub fn is_legacy_browser(&self, speaker: &Speaker) -> bool {
        speaker.browser.name == BrowserName::InternetExplorer
            && speaker.browser.major_version < self.policy.min_ie_major_version
    }

    /// Mark each session approved or rejected against the legacy keyword list.
    ///
    /// Keywords are scanned in order. A miss marks the session approved and moves on; a hit
    /// marks it rejected and stops the scan for that session. With an empty keyword list the
    /// flags are left untouched.
    pub fn approve_sessions(&self, speaker: &mut Speaker) -> Result<(), RegistrationError> {
        for session in speaker.sessions.iter_mut() {
            for technology in self.policy.legacy_technologies {
                if session.title.contains(technology) || session.description.contains(technology)
                {
                    session.approved = false;
                    debug!(title = %session.title, technology, "session rejected");
                    break;
                }
                session.approved = true;
            }
        }

        if !speaker.sessions.iter().any(|s| s.approved) {
            return Err(RegistrationError::NoApprovedSessions);
        }
        Ok(())
    }

    /// Reset the fee to 0, then apply the first tier containing the speaker's experience.
    pub fn calculate_registration_fee(&self, speaker: &mut Speaker) {
        speaker.registration_fee = self
            .policy
            .fee_for(speaker.years_experience)
            .unwrap_or(0);
    }

    async fn save_speaker(&self, speaker: &Speaker) -> Option<i64> {
        match self.repo.save_speaker(speaker).await {
            Ok(id) => {
                info!(
                    speaker_id = id,
                    fee = speaker.registration_fee,
                    sessions = speaker.sessions.len(),
                    "speaker registered"
                );
                Some(id)
            }
            Err(e) => {
                warn!(email = %speaker.email, error = %e, "failed to save speaker");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl RegisterSpeaker for RegistrationService {
    async fn register(&self, speaker: &mut Speaker) -> Result<Option<i64>, RegistrationError> {
        RegistrationService::register(self, speaker).await
    }
}
