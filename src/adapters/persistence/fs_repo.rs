//! Implements SpeakerRepoPort as JSON Lines (JSONL).
//! Single file: {base_dir}/speakers.jsonl, one `{id, speaker}` record per line. Append-only.
//! The next id comes from the last record, found by scanning backwards from EOF.

use crate::domain::{DomainError, Speaker};
use crate::ports::SpeakerRepoPort;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::info;

/// Block size for reverse reads.
const REVERSE_READ_BLOCK: u64 = 4096;

const SPEAKERS_FILE: &str = "speakers.jsonl";

/// One line of the JSONL file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerRecord {
    pub id: i64,
    pub speaker: Speaker,
}

/// File-system repository. Saves are serialized so ids stay unique.
pub struct JsonlSpeakerRepo {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlSpeakerRepo {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(SPEAKERS_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Read every stored record in file order. Blank or corrupt lines are skipped.
    pub async fn load_all(&self) -> Result<Vec<SpeakerRecord>, DomainError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(DomainError::Repo(e.to_string())),
        };
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect())
    }

    /// Id of the last record, or 0 for a missing/empty file.
    async fn last_id(&self) -> Result<i64, DomainError> {
        let line = Self::read_last_line(&self.path).await?;
        match line.as_deref().map(str::trim) {
            None | Some("") => Ok(0),
            Some(l) => serde_json::from_str::<SpeakerRecord>(l)
                .map(|r| r.id)
                .map_err(|e| DomainError::Repo(format!("corrupt last record: {}", e))),
        }
    }

    /// Last non-empty line of the file, read backwards in fixed-size blocks.
    async fn read_last_line(path: &Path) -> Result<Option<String>, DomainError> {
        let mut f = match fs::File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Repo(e.to_string())),
        };
        let mut pos = f
            .metadata()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .len();

        let mut pending: Vec<u8> = Vec::new();
        while pos > 0 {
            let read_start = pos.saturating_sub(REVERSE_READ_BLOCK);
            let mut block = vec![0u8; (pos - read_start) as usize];
            f.seek(SeekFrom::Start(read_start))
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?;
            f.read_exact(&mut block)
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?;
            pos = read_start;

            // File order: block (nearer BOF) then pending (nearer EOF)
            block.extend(pending.drain(..));
            pending = block;

            // Ignore the trailing newline(s) written after the last record
            while pending.last() == Some(&b'\n') {
                pending.pop();
            }
            if let Some(nl) = pending.iter().rposition(|&b| b == b'\n') {
                let line = String::from_utf8_lossy(&pending[nl + 1..]).into_owned();
                return Ok(Some(line));
            }
        }

        if pending.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&pending).into_owned()))
        }
    }
}

#[async_trait::async_trait]
impl SpeakerRepoPort for JsonlSpeakerRepo {
    async fn save_speaker(&self, speaker: &Speaker) -> Result<i64, DomainError> {
        let _guard = self.write_lock.lock().await;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?;
        }

        let id = self.last_id().await? + 1;
        let record = SpeakerRecord {
            id,
            speaker: speaker.clone(),
        };
        let mut line =
            serde_json::to_string(&record).map_err(|e| DomainError::Repo(e.to_string()))?;
        line.push('\n');

        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        f.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        info!(path = %self.path.display(), speaker_id = id, "saved speaker (JSONL)");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;
    use tempfile::TempDir;

    fn speaker(first_name: &str) -> Speaker {
        Speaker {
            first_name: first_name.into(),
            last_name: "Test".into(),
            email: "t@example.com".into(),
            sessions: vec![Session::new("Title", "Description")],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonlSpeakerRepo::new(temp_dir.path());

        assert_eq!(repo.save_speaker(&speaker("A")).await.unwrap(), 1);
        assert_eq!(repo.save_speaker(&speaker("B")).await.unwrap(), 2);

        let records = repo.load_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].speaker.first_name, "B");
    }

    #[tokio::test]
    async fn test_ids_continue_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        JsonlSpeakerRepo::new(temp_dir.path())
            .save_speaker(&speaker("A"))
            .await
            .unwrap();

        let repo = JsonlSpeakerRepo::new(temp_dir.path());
        assert_eq!(repo.save_speaker(&speaker("B")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_last_line_spanning_blocks() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonlSpeakerRepo::new(temp_dir.path());
        let mut big = speaker("Big");
        big.sessions[0].description = "x".repeat(3 * REVERSE_READ_BLOCK as usize);

        repo.save_speaker(&speaker("A")).await.unwrap();
        repo.save_speaker(&big).await.unwrap();
        assert_eq!(repo.save_speaker(&speaker("C")).await.unwrap(), 3);
        assert_eq!(repo.last_id().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonlSpeakerRepo::new(temp_dir.path().join("nope"));
        assert!(repo.load_all().await.unwrap().is_empty());
        assert_eq!(repo.last_id().await.unwrap(), 0);
    }
}
