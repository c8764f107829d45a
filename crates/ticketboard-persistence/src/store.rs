//! State stores.
//!
//! `StateStore` is the seam between the board and its durable storage. The
//! real implementation writes a JSON envelope to disk with
//! write-temp-then-rename atomicity; the in-memory implementation backs
//! tests and ephemeral sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use ticketboard_core::{BoardError, BoardResult};

use crate::snapshot::PersistedState;

const FORMAT_VERSION: u32 = 1;

/// Metadata recorded alongside every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMetadata {
    /// ID of the process instance that performed the save.
    pub instance_id: Uuid,
    /// When this state was saved.
    pub saved_at: DateTime<Utc>,
}

/// Abstract storage for the persisted board state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Persist the state, last write wins.
    async fn save(&self, state: &PersistedState) -> BoardResult<StateMetadata>;

    /// Load the stored state, or `None` when nothing has been saved yet.
    async fn load(&self) -> BoardResult<Option<PersistedState>>;

    /// Load the stored state, falling back to the default on any failure.
    /// Storage being unavailable must never take the application down.
    async fn load_or_default(&self) -> PersistedState {
        match self.load().await {
            Ok(Some(state)) => state,
            Ok(None) => PersistedState::default(),
            Err(e) => {
                tracing::warn!("Failed to load stored state, starting empty: {e}");
                PersistedState::default()
            }
        }
    }
}

/// Wrapper structure for the on-disk JSON format.
#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    metadata: StateMetadata,
    state: PersistedState,
}

/// JSON file-backed state store.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
    instance_id: Uuid,
}

impl JsonStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Write via a temp file in the same directory, then rename into place,
    /// so a crash mid-write never leaves a torn state file.
    async fn write_atomic(&self, data: &[u8]) -> BoardResult<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        tokio::fs::write(&temp_path, data).await?;
        temp_path
            .persist(&self.path)
            .map_err(|e| BoardError::Io(e.error))?;
        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn save(&self, state: &PersistedState) -> BoardResult<StateMetadata> {
        let metadata = StateMetadata {
            instance_id: self.instance_id,
            saved_at: Utc::now(),
        };
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: metadata.clone(),
            state: state.clone(),
        };

        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        self.write_atomic(&json_bytes).await?;

        tracing::debug!(
            "Saved {} tickets to {}",
            state.tickets.len(),
            self.path.display()
        );
        Ok(metadata)
    }

    async fn load(&self) -> BoardResult<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file_bytes = tokio::fs::read(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(BoardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        tracing::debug!(
            "Loaded {} tickets from {}",
            envelope.state.tickets.len(),
            self.path.display()
        );
        Ok(Some(envelope.state))
    }
}

/// In-memory state store for tests and sessions without a state file.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: Mutex<Option<PersistedState>>,
    instance_id: Uuid,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
            instance_id: Uuid::new_v4(),
        }
    }

    /// Start with state already present, as if a previous session saved it.
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            instance_id: Uuid::new_v4(),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn save(&self, state: &PersistedState) -> BoardResult<StateMetadata> {
        *self.state.lock().await = Some(state.clone());
        Ok(StateMetadata {
            instance_id: self.instance_id,
            saved_at: Utc::now(),
        })
    }

    async fn load(&self) -> BoardResult<Option<PersistedState>> {
        Ok(self.state.lock().await.clone())
    }
}
