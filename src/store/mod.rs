//! Flat-file task store.
//!
//! Holds the authoritative in-memory copy of all tasks and keeps it
//! synchronized with a single JSON file on disk. The file contains the
//! whole database keyed by table name (`{"tasks": [...]}`); every
//! mutation rewrites it in full via a temp-file-then-rename, so a crash
//! mid-write never leaves a truncated database behind.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The only table in the database.
pub const TABLE_TASKS: &str = "tasks";

/// A single task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, immutable identifier
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// `None` means the task is not completed
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

/// Partial update for an existing task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist database: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize database: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Database = HashMap<String, Vec<Task>>;

/// In-memory store backed by a single JSON file.
///
/// All read-modify-write cycles run under one `RwLock`, so concurrent
/// mutations cannot interleave on the in-memory collections or on the
/// persisted file. Persistence is awaited by every mutating call and
/// its failure is returned to the caller.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tables: Arc<RwLock<Database>>,
    storage_path: PathBuf,
}

impl TaskStore {
    /// Open the store, loading the database file if present.
    ///
    /// A missing or unreadable file initializes an empty database,
    /// which is written out immediately.
    pub async fn open(storage_path: PathBuf) -> Result<Self, StoreError> {
        let store = Self {
            tables: Arc::new(RwLock::new(Database::new())),
            storage_path,
        };

        match store.load_from_disk() {
            Ok(loaded) => {
                let mut tables = store.tables.write().await;
                *tables = loaded;
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not read database file: {}. Starting empty.", e);
                }
                let tables = store.tables.read().await;
                store.persist(&tables)?;
            }
        }

        Ok(store)
    }

    fn load_from_disk(&self) -> Result<Database, std::io::Error> {
        let contents = std::fs::read_to_string(&self.storage_path)?;
        serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Rewrite the whole database file. The serialized database goes to
    /// a temp file in the same directory first, then replaces the old
    /// copy with a rename.
    fn persist(&self, tables: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(tables)?;
        let tmp = self.storage_path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.storage_path)?;
        Ok(())
    }

    /// Current tasks of a table, empty if the table does not exist.
    pub async fn list(&self, table: &str) -> Vec<Task> {
        let tables = self.tables.read().await;
        tables.get(table).cloned().unwrap_or_default()
    }

    /// Create a task with a fresh id and current timestamps, append it
    /// to the table (initializing the table if absent), and persist.
    pub async fn create(&self, table: &str, fields: NewTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .push(task.clone());
        self.persist(&tables)?;

        Ok(task)
    }

    /// Apply the provided fields to a task and persist.
    ///
    /// `updated_at` is refreshed only when at least one field is
    /// provided. Returns `None` if the id is unknown.
    pub async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|t| t.id == id))
        else {
            return Ok(None);
        };

        if !patch.is_empty() {
            task.updated_at = Utc::now();

            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
        }

        let updated = task.clone();
        self.persist(&tables)?;

        Ok(Some(updated))
    }

    /// Flip a task's completion: unset becomes the current time, set
    /// becomes unset. Persists like every other mutation. Returns
    /// `None` if the id is unknown.
    pub async fn toggle_completed(
        &self,
        table: &str,
        id: Uuid,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|t| t.id == id))
        else {
            return Ok(None);
        };

        task.completed_at = match task.completed_at {
            Some(_) => None,
            None => Some(Utc::now()),
        };

        let toggled = task.clone();
        self.persist(&tables)?;

        Ok(Some(toggled))
    }

    /// Remove a task from its table and persist. Returns the removed
    /// record, or `None` if the id is unknown.
    pub async fn remove(&self, table: &str, id: Uuid) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(None);
        };
        let Some(index) = rows.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let removed = rows.remove(index);
        self.persist(&tables)?;

        Ok(Some(removed))
    }
}

/// Shared store type.
pub type SharedTaskStore = Arc<TaskStore>;
