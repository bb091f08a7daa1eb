//! Wiring & DI. Entry point: load config, build the repo adapter, register one speaker.
//! No business logic here; rules live in RegistrationService.

use speaker_registration::adapters::persistence::{
    InMemorySpeakerRepo, JsonlSpeakerRepo, SqliteSpeakerRepo,
};
use speaker_registration::domain::Speaker;
use speaker_registration::ports::{RegisterSpeaker, SpeakerRepoPort};
use speaker_registration::shared::{AppConfig, RepoBackend};
use speaker_registration::usecases::RegistrationService;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    let Some(speaker_path) = cfg.speaker_file(std::env::args().nth(1)) else {
        anyhow::bail!("Usage: speaker-registration <speaker.json> (or set SPEAKER_REG_SPEAKER_FILE)");
    };
    let mut speaker = read_speaker(&speaker_path).await?;

    let repo = build_repo(&cfg).await?;
    let service: Arc<dyn RegisterSpeaker> = Arc::new(RegistrationService::new(repo));

    match service.register(&mut speaker).await {
        Ok(Some(id)) => println!("Registered speaker #{} (fee: ${})", id, speaker.registration_fee),
        Ok(None) => println!(
            "Speaker accepted (fee: ${}) but could not be saved; see log",
            speaker.registration_fee
        ),
        Err(e) => {
            eprintln!("Registration rejected: {}", e);
            std::process::exit(1);
        }
    }
    for session in &speaker.sessions {
        let status = if session.approved { "approved" } else { "rejected" };
        println!("  [{}] {}", status, session.title);
    }

    Ok(())
}

async fn read_speaker(path: &Path) -> anyhow::Result<Speaker> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {}", path.display(), e))?;
    let speaker = serde_json::from_str(&json)
        .map_err(|e| anyhow::anyhow!("parse {}: {}", path.display(), e))?;
    Ok(speaker)
}

async fn build_repo(cfg: &AppConfig) -> anyhow::Result<Arc<dyn SpeakerRepoPort>> {
    let data_dir = cfg.data_dir_or_default();
    let backend = cfg.repo_backend_or_default();
    info!(?backend, path = %data_dir.display(), "speaker repository");

    let repo: Arc<dyn SpeakerRepoPort> = match backend {
        RepoBackend::Sqlite => Arc::new(
            SqliteSpeakerRepo::connect(&data_dir)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        ),
        RepoBackend::Jsonl => Arc::new(JsonlSpeakerRepo::new(&data_dir)),
        RepoBackend::Memory => Arc::new(InMemorySpeakerRepo::new()),
    };
    Ok(repo)
}
