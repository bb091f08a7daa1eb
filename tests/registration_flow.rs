//! End-to-end registration through the public API with the in-memory and JSONL repos.

use speaker_registration::adapters::persistence::{InMemorySpeakerRepo, JsonlSpeakerRepo};
use speaker_registration::domain::{
    BrowserName, RegistrationError, Session, Speaker, WebBrowser,
};
use speaker_registration::ports::RegisterSpeaker;
use speaker_registration::usecases::RegistrationService;
use std::sync::Arc;

fn ada() -> Speaker {
    Speaker {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        years_experience: Some(12),
        browser: WebBrowser::new(BrowserName::Chrome, 120),
        sessions: vec![Session::new("Modern Web APIs", "...")],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_experienced_speaker_registers_without_fee() {
    let repo = Arc::new(InMemorySpeakerRepo::new());
    let service: Arc<dyn RegisterSpeaker> = Arc::new(RegistrationService::new(repo.clone()));
    let mut speaker = ada();

    let id = service.register(&mut speaker).await.unwrap();

    assert_eq!(id, Some(1));
    assert_eq!(speaker.registration_fee, 0);
    assert!(speaker.sessions[0].approved);
    assert_eq!(repo.saved().await, vec![speaker]);
}

#[tokio::test]
async fn test_hotmail_novice_is_not_eligible() {
    let repo = Arc::new(InMemorySpeakerRepo::new());
    let service = RegistrationService::new(repo.clone());
    let mut speaker = Speaker {
        email: "x@hotmail.com".into(),
        years_experience: Some(1),
        has_blog: false,
        employer: "Acme".into(),
        ..ada()
    };

    let result = service.register(&mut speaker).await;

    assert_eq!(result, Err(RegistrationError::NotEligible));
    assert!(!speaker.sessions[0].approved);
    assert_eq!(speaker.registration_fee, 0);
    assert!(repo.saved().await.is_empty());
}

#[tokio::test]
async fn test_blogger_on_old_ie_is_admitted() {
    let service = RegistrationService::new(Arc::new(InMemorySpeakerRepo::new()));
    let mut speaker = Speaker {
        email: "old@aol.com".into(),
        years_experience: Some(3),
        has_blog: true,
        blog_url: Some("https://blog.example.com".into()),
        browser: WebBrowser::new(BrowserName::InternetExplorer, 6),
        ..ada()
    };

    assert_eq!(service.register(&mut speaker).await, Ok(Some(1)));
    assert_eq!(speaker.registration_fee, 250);
}

#[tokio::test]
async fn test_mixed_sessions_keep_individual_flags() {
    let service = RegistrationService::new(Arc::new(InMemorySpeakerRepo::new()));
    let mut speaker = Speaker {
        years_experience: Some(5),
        sessions: vec![
            Session::new("Cobol in 2024", "legacy"),
            Session::new("Async Rust", "tokio internals"),
            Session::new("Scripting", "VBScript and friends"),
        ],
        ..ada()
    };

    service.register(&mut speaker).await.unwrap();

    let flags: Vec<bool> = speaker.sessions.iter().map(|s| s.approved).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(speaker.registration_fee, 100);
}

#[tokio::test]
async fn test_missing_email_reported_before_empty_sessions() {
    let service = RegistrationService::new(Arc::new(InMemorySpeakerRepo::new()));
    let mut speaker = Speaker {
        email: String::new(),
        sessions: vec![],
        ..ada()
    };

    assert_eq!(
        service.register(&mut speaker).await,
        Err(RegistrationError::MissingField { field: "Email" })
    );
}

#[tokio::test]
async fn test_save_failure_yields_no_id() {
    let service = RegistrationService::new(Arc::new(InMemorySpeakerRepo::failing()));
    let mut speaker = ada();

    assert_eq!(service.register(&mut speaker).await, Ok(None));
    assert!(speaker.sessions[0].approved);
}

#[tokio::test]
async fn test_registered_speaker_lands_in_jsonl() {
    let dir = tempfile::TempDir::new().unwrap();
    let repo = Arc::new(JsonlSpeakerRepo::new(dir.path()));
    let service = RegistrationService::new(repo.clone());
    let mut speaker = Speaker {
        years_experience: Some(0),
        ..ada()
    };

    let id = service.register(&mut speaker).await.unwrap();

    let records = repo.load_all().await.unwrap();
    assert_eq!(id, Some(1));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].speaker.registration_fee, 500);
    assert!(records[0].speaker.sessions[0].approved);
}
