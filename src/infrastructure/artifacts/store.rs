use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::fs;
use uuid::Uuid;

use crate::domain::speech::dto::AudioFormat;
use crate::error::AppError;

/// How many expired entries one lock acquisition may claim during a sweep,
/// so request handlers are never starved for the whole pass
const SWEEP_BATCH: usize = 32;

/// Metadata record of one persisted audio file. Write-once: never mutated
/// after registration, destroyed only by the sweep or explicit removal.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    pub duration_seconds: f32,
    pub format: AudioFormat,
}

impl Artifact {
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or(Duration::ZERO)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("audio '{0}' not found or expired")]
    NotFound(Uuid),
    #[error("refusing to persist empty audio")]
    EmptyAudio,
    #[error("artifact storage failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ArtifactStoreError> for AppError {
    fn from(err: ArtifactStoreError) -> Self {
        match err {
            ArtifactStoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            ArtifactStoreError::EmptyAudio => AppError::SynthesisFailed(err.to_string()),
            ArtifactStoreError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// On-disk lifecycle of generated audio: one file per artifact under `root`,
/// named `<id>.<ext>`, with the metadata table held in memory and rebuildable
/// from a directory scan.
///
/// The metadata lock is never held across an `.await`; files are written to
/// a temp path and renamed into place, so a reader can never observe a
/// half-written artifact.
pub struct ArtifactStore {
    root: PathBuf,
    artifacts: Mutex<HashMap<Uuid, Artifact>>,
}

impl ArtifactStore {
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, ArtifactStoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            artifacts: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh collision-free identifier. Pure, no I/O; ids are never reused
    /// for the process lifetime, so a stale reference can never resolve to a
    /// newer artifact.
    pub fn allocate(&self) -> Uuid {
        Uuid::new_v4()
    }

    pub fn path_for(&self, id: Uuid, format: AudioFormat) -> PathBuf {
        self.root.join(format!("{}.{}", id, format.extension()))
    }

    /// Write audio bytes and register the artifact. All-or-nothing: the
    /// bytes land in a temp file first and are renamed into place before the
    /// metadata entry appears.
    pub async fn persist(
        &self,
        id: Uuid,
        audio: &[u8],
        format: AudioFormat,
        duration_seconds: f32,
    ) -> Result<Artifact, ArtifactStoreError> {
        if audio.is_empty() {
            return Err(ArtifactStoreError::EmptyAudio);
        }

        let final_path = self.path_for(id, format);
        let tmp_path = self.root.join(format!("{}.{}.tmp", id, format.extension()));

        fs::write(&tmp_path, audio).await?;
        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            // Leave nothing behind on a failed rename
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        let artifact = Artifact {
            id,
            file_name: format!("{}.{}", id, format.extension()),
            created_at: Utc::now(),
            size_bytes: audio.len() as u64,
            duration_seconds,
            format,
        };

        self.lock().insert(id, artifact.clone());

        tracing::debug!(
            artifact_id = %id,
            size_bytes = artifact.size_bytes,
            format = %format,
            "Artifact persisted"
        );

        Ok(artifact)
    }

    /// Metadata lookup for an artifact that may since have expired
    pub fn get(&self, id: Uuid) -> Result<Artifact, ArtifactStoreError> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or(ArtifactStoreError::NotFound(id))
    }

    /// Metadata plus file contents. An artifact deleted between lookup and
    /// read maps to NotFound; files are immutable post-write, so there are
    /// no torn reads.
    pub async fn read(&self, id: Uuid) -> Result<(Artifact, Vec<u8>), ArtifactStoreError> {
        let artifact = self.get(id)?;
        let path = self.path_for(id, artifact.format);
        match fs::read(&path).await {
            Ok(bytes) => Ok((artifact, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ArtifactStoreError::NotFound(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Explicitly delete one artifact. Metadata goes first so no reader can
    /// resolve the id while the file is being unlinked; a file that is
    /// already gone counts as deleted.
    pub async fn remove(&self, id: Uuid) -> bool {
        let Some(artifact) = self.lock().remove(&id) else {
            return false;
        };
        self.delete_file(&artifact).await;
        true
    }

    /// Delete every artifact older than `max_age`, in bounded batches so the
    /// metadata lock is released between rounds. Returns how many were
    /// reclaimed.
    pub async fn sweep_expired(&self, max_age: Duration) -> usize {
        let now = Utc::now();
        let mut deleted = 0;

        loop {
            let batch: Vec<Artifact> = {
                let mut artifacts = self.lock();
                let expired: Vec<Uuid> = artifacts
                    .values()
                    .filter(|a| a.age_at(now) > max_age)
                    .map(|a| a.id)
                    .take(SWEEP_BATCH)
                    .collect();
                expired
                    .iter()
                    .filter_map(|id| artifacts.remove(id))
                    .collect()
            };

            if batch.is_empty() {
                break;
            }
            for artifact in &batch {
                self.delete_file(artifact).await;
            }
            deleted += batch.len();
        }

        deleted
    }

    /// Rebuild the metadata table from files surviving under the root
    /// directory, for restarts. Ids come from file names, timestamps from
    /// file mtimes; unparseable files are skipped.
    pub async fn rescan(&self) -> Result<usize, ArtifactStoreError> {
        let mut recovered = 0;
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(artifact) = Self::artifact_from_path(&path, &entry).await else {
                continue;
            };
            self.lock().insert(artifact.id, artifact);
            recovered += 1;
        }

        Ok(recovered)
    }

    /// Gauges for the stats reporter: artifact count and total bytes
    pub fn usage(&self) -> (usize, u64) {
        let artifacts = self.lock();
        let total_bytes = artifacts.values().map(|a| a.size_bytes).sum();
        (artifacts.len(), total_bytes)
    }

    async fn artifact_from_path(
        path: &Path,
        entry: &fs::DirEntry,
    ) -> Option<Artifact> {
        let id = Uuid::parse_str(path.file_stem()?.to_str()?).ok()?;
        let format = AudioFormat::from_extension(path.extension()?.to_str()?)?;
        let meta = entry.metadata().await.ok()?;
        if !meta.is_file() {
            return None;
        }
        let created_at = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Some(Artifact {
            id,
            file_name: path.file_name()?.to_str()?.to_string(),
            created_at,
            size_bytes: meta.len(),
            duration_seconds: 0.0,
            format,
        })
    }

    async fn delete_file(&self, artifact: &Artifact) {
        let path = self.path_for(artifact.id, artifact.format);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            // Already gone: an expected race, not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    artifact_id = %artifact.id,
                    error = %e,
                    "Failed to delete artifact file"
                );
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Artifact>> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
