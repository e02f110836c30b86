//! Project persistence: the async store port and the debounced saver.
//!
//! Saves are triggered after a quiet period following any committed change;
//! a forced-save path bypasses the debounce. Rescheduling cancels the
//! in-flight timer so the latest scheduled save always wins. Save failures
//! are never fatal: the status indicator reflects them and the next attempt
//! proceeds normally.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use plankit_core::{PersistenceError, Project};

use crate::serialization::{project_from_json, project_to_json};

/// Default quiet period between the last change and the save.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// External project storage.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn save(&self, project: &Project) -> Result<(), PersistenceError>;
    async fn load(&self, id: Uuid) -> Result<Project, PersistenceError>;
}

/// Save-status indicator exposed to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    /// A save is scheduled and waiting out the quiet period.
    Pending,
    Saving,
    /// The last save attempt failed; the next attempt is unaffected.
    Failed,
}

/// In-memory store, used in tests and as the offline fallback.
///
/// Projects are held in their serialized form so saves exercise the same
/// encoding path a real backend would.
#[derive(Default)]
pub struct MemoryStore {
    projects: Mutex<HashMap<Uuid, String>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes subsequent saves fail until turned off again.
    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn save(&self, project: &Project) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::SaveFailed {
                reason: "store unavailable".to_string(),
            });
        }
        let json = project_to_json(project)?;
        self.projects.lock().insert(project.id, json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Project, PersistenceError> {
        let json = self
            .projects
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::LoadFailed {
                id: id.to_string(),
                reason: "not found".to_string(),
            })?;
        project_from_json(&json)
    }
}

/// File-backed store: one pretty-printed JSON file per project.
pub struct FileStore {
    directory: std::path::PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path_for(&self, id: Uuid) -> std::path::PathBuf {
        self.directory.join(format!("{id}.json"))
    }
}

#[async_trait]
impl ProjectStore for FileStore {
    async fn save(&self, project: &Project) -> Result<(), PersistenceError> {
        let json = project_to_json(project)?;
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| PersistenceError::SaveFailed {
                reason: e.to_string(),
            })?;
        tokio::fs::write(self.path_for(project.id), json)
            .await
            .map_err(|e| PersistenceError::SaveFailed {
                reason: e.to_string(),
            })?;
        tracing::debug!(project = %project.id, "wrote project file");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Project, PersistenceError> {
        let json = tokio::fs::read_to_string(self.path_for(id))
            .await
            .map_err(|e| PersistenceError::LoadFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        project_from_json(&json)
    }
}

/// Debounced save scheduler.
///
/// `schedule` arms (or re-arms) a timer for the quiet period; when it fires,
/// the project snapshot captured at scheduling time is saved. `flush` saves
/// immediately and cancels any armed timer, so forced saves and debounce
/// timers never double-fire.
pub struct DebouncedSaver {
    store: Arc<dyn ProjectStore>,
    quiet_period: Duration,
    status: Arc<Mutex<SaveStatus>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebouncedSaver {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self::with_quiet_period(store, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(store: Arc<dyn ProjectStore>, quiet_period: Duration) -> Self {
        Self {
            store,
            quiet_period,
            status: Arc::new(Mutex::new(SaveStatus::Idle)),
            pending: Mutex::new(None),
        }
    }

    /// The current save status.
    pub fn status(&self) -> SaveStatus {
        *self.status.lock()
    }

    /// Schedules a save after the quiet period, cancelling any save already
    /// scheduled. The latest snapshot always wins.
    pub fn schedule(&self, project: Project) {
        let store = self.store.clone();
        let status = self.status.clone();
        let quiet_period = self.quiet_period;

        *self.status.lock() = SaveStatus::Pending;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            *status.lock() = SaveStatus::Saving;
            match store.save(&project).await {
                Ok(()) => {
                    tracing::debug!(project = %project.id, "debounced save complete");
                    *status.lock() = SaveStatus::Idle;
                }
                Err(err) => {
                    tracing::error!(%err, project = %project.id, "debounced save failed");
                    *status.lock() = SaveStatus::Failed;
                }
            }
        });
        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Saves immediately, bypassing and cancelling the debounce timer.
    pub async fn flush(&self, project: &Project) -> Result<(), PersistenceError> {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
        *self.status.lock() = SaveStatus::Saving;
        match self.store.save(project).await {
            Ok(()) => {
                *self.status.lock() = SaveStatus::Idle;
                Ok(())
            }
            Err(err) => {
                tracing::error!(%err, project = %project.id, "forced save failed");
                *self.status.lock() = SaveStatus::Failed;
                Err(err)
            }
        }
    }
}

impl Drop for DebouncedSaver {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.abort();
        }
    }
}
