//! SQLite-backed speaker repository via libsql. Implements SpeakerRepoPort.
//!
//! Two tables: `speakers` (one row per registration) and `sessions` (ordered by `position`).
//! A save writes the speaker and all sessions in one transaction. Database file: data/speakers.db

use crate::domain::{BrowserName, DomainError, Session, Speaker, WebBrowser};
use crate::ports::SpeakerRepoPort;
use libsql::{Database, params};
use std::path::{Path, PathBuf};
use tracing::info;

const SPEAKERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS speakers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    years_experience INTEGER,
    has_blog INTEGER NOT NULL DEFAULT 0,
    blog_url TEXT,
    browser_name TEXT NOT NULL,
    browser_major_version INTEGER NOT NULL,
    certifications_json TEXT NOT NULL DEFAULT '[]',
    employer TEXT NOT NULL DEFAULT '',
    registration_fee INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
)"#;

const SESSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    speaker_id INTEGER NOT NULL REFERENCES speakers (id),
    position INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    approved INTEGER NOT NULL,
    PRIMARY KEY (speaker_id, position)
)"#;

/// SQLite repository. One database file (speakers.db) in the given base directory.
pub struct SqliteSpeakerRepo {
    db: Database,
    db_path: PathBuf,
}

impl SqliteSpeakerRepo {
    /// Connect to (or create) the SQLite database and ensure the schema exists.
    /// Call this once at startup; the returned repo is safe to share via Arc.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Repo(e.to_string()))?;
        let db_path = base.join("speakers.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Repo(e.to_string()))?;

        // PRAGMA returns a row; query and drain instead of execute.
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .is_some()
        {}

        conn.execute(SPEAKERS_TABLE, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        conn.execute(SESSIONS_TABLE, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db, db_path })
    }

    /// Read a stored speaker back with its sessions in submission order.
    pub async fn load_speaker(&self, id: i64) -> Result<Option<Speaker>, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let mut rows = conn
            .query(
                r#"
                SELECT first_name, last_name, email, years_experience, has_blog, blog_url,
                       browser_name, browser_major_version, certifications_json, employer,
                       registration_fee
                FROM speakers
                WHERE id = ?1
                "#,
                params![id],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        else {
            return Ok(None);
        };

        let browser_name: String = row.get(6).map_err(|e| DomainError::Repo(e.to_string()))?;
        let certifications_json: String =
            row.get(8).map_err(|e| DomainError::Repo(e.to_string()))?;
        let mut speaker = Speaker {
            first_name: row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
            last_name: row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?,
            email: row.get(2).map_err(|e| DomainError::Repo(e.to_string()))?,
            years_experience: row.get::<i32>(3).ok(),
            has_blog: row.get::<i64>(4).unwrap_or(0) != 0,
            blog_url: row.get::<String>(5).ok(),
            browser: WebBrowser::new(
                BrowserName::parse(&browser_name),
                row.get(7).map_err(|e| DomainError::Repo(e.to_string()))?,
            ),
            certifications: serde_json::from_str(&certifications_json)
                .map_err(|e| DomainError::Repo(e.to_string()))?,
            employer: row.get::<String>(9).unwrap_or_default(),
            registration_fee: row.get(10).map_err(|e| DomainError::Repo(e.to_string()))?,
            sessions: Vec::new(),
        };

        let mut rows = conn
            .query(
                r#"
                SELECT title, description, approved
                FROM sessions
                WHERE speaker_id = ?1
                ORDER BY position
                "#,
                params![id],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            speaker.sessions.push(Session {
                title: row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
                description: row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?,
                approved: row.get::<i64>(2).unwrap_or(0) != 0,
            });
        }

        Ok(Some(speaker))
    }
}

#[async_trait::async_trait]
impl SpeakerRepoPort for SqliteSpeakerRepo {
    async fn save_speaker(&self, speaker: &Speaker) -> Result<i64, DomainError> {
        let certifications_json = serde_json::to_string(&speaker.certifications)
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        let mut rows = tx
            .query(
                r#"
                INSERT INTO speakers (first_name, last_name, email, years_experience, has_blog,
                    blog_url, browser_name, browser_major_version, certifications_json, employer,
                    registration_fee, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                RETURNING id
                "#,
                params![
                    speaker.first_name.as_str(),
                    speaker.last_name.as_str(),
                    speaker.email.as_str(),
                    speaker.years_experience,
                    speaker.has_blog as i64,
                    speaker.blog_url.clone(),
                    speaker.browser.name.as_str(),
                    speaker.browser.major_version,
                    certifications_json,
                    speaker.employer.as_str(),
                    speaker.registration_fee,
                    now
                ],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let id: i64 = match rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            Some(row) => row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
            None => return Err(DomainError::Repo("insert returned no id".into())),
        };
        drop(rows);

        for (position, session) in speaker.sessions.iter().enumerate() {
            tx.execute(
                r#"
                INSERT INTO sessions (speaker_id, position, title, description, approved)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    id,
                    position as i64,
                    session.title.as_str(),
                    session.description.as_str(),
                    session.approved as i64
                ],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        info!(
            path = %self.db_path.display(),
            speaker_id = id,
            sessions = speaker.sessions.len(),
            "saved speaker to disk"
        );
        Ok(id)
    }
}
