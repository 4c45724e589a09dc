//! Project store — multi-project persistence over a keyed storage backend.
//!
//! DESIGN
//! ======
//! Two top-level keys: one holding the ordered project list, one holding the
//! selected project id. The store is hydrated once at startup and flushed
//! after every mutation. Persistence is a convenience, not a correctness
//! requirement: write failures are logged and swallowed so the in-memory
//! state stays authoritative, and malformed persisted records degrade
//! per-entry to defaults instead of failing the load.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::geometry::{Project, ProjectId};

/// Storage key for the ordered project list (JSON array).
pub const PROJECTS_KEY: &str = "dashgen_projects";

/// Storage key for the selected project id (plain id string).
pub const ACTIVE_PROJECT_KEY: &str = "dashgen_active_project";

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage write failed: {0}")]
    Write(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from project-level operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectError {
    /// The last remaining project cannot be deleted.
    #[error("cannot delete the last project")]
    LastProject,
    /// No project with the given id exists.
    #[error("unknown project: {0}")]
    UnknownProject(ProjectId),
}

/// Keyed string storage, the local-storage analog.
pub trait StorageBackend: Send {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing medium rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile in-memory backend for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create the backend, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Process-wide persisted state: all projects plus the active selection.
pub struct ProjectStore {
    projects: Vec<Project>,
    active: ProjectId,
    storage: Box<dyn StorageBackend>,
}

impl ProjectStore {
    /// Hydrate the store from persisted state. Malformed or absent state
    /// degrades to a single default project; an unknown active id falls back
    /// to the first project. Never a fatal load error.
    #[must_use]
    pub fn load(storage: Box<dyn StorageBackend>) -> Self {
        let mut projects = storage
            .get(PROJECTS_KEY)
            .map(|raw| parse_projects(&raw))
            .unwrap_or_default();
        if projects.is_empty() {
            projects.push(Project::new("Untitled"));
        }

        let active = storage
            .get(ACTIVE_PROJECT_KEY)
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .filter(|id| projects.iter().any(|p| p.id == *id))
            .unwrap_or(projects[0].id);

        info!(projects = projects.len(), %active, "project store loaded");
        Self { projects, active, storage }
    }

    /// All projects, in stored order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The selected project id.
    #[must_use]
    pub fn active_id(&self) -> ProjectId {
        self.active
    }

    /// The selected project.
    #[must_use]
    pub fn active_project(&self) -> &Project {
        // Selection is repaired on load and delete, so this always resolves.
        self.projects
            .iter()
            .find(|p| p.id == self.active)
            .unwrap_or(&self.projects[0])
    }

    /// Mutable access to the selected project. Callers flush after mutating.
    pub fn active_project_mut(&mut self) -> &mut Project {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == self.active)
            .unwrap_or(0);
        &mut self.projects[idx]
    }

    /// Create, select, and persist a new empty project.
    pub fn create_project(&mut self, name: impl Into<String>) -> ProjectId {
        let project = Project::new(name);
        let id = project.id;
        self.projects.push(project);
        self.active = id;
        info!(%id, "project created");
        self.flush();
        id
    }

    /// Rename a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownProject`] when no such project exists.
    pub fn rename_project(&mut self, id: ProjectId, name: impl Into<String>) -> Result<(), ProjectError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProjectError::UnknownProject(id))?;
        project.name = name.into();
        self.flush();
        Ok(())
    }

    /// Delete a project. Deleting the selected project reselects the first
    /// survivor.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::LastProject`] when only one project remains,
    /// or [`ProjectError::UnknownProject`] when no such project exists.
    pub fn delete_project(&mut self, id: ProjectId) -> Result<(), ProjectError> {
        if self.projects.len() <= 1 {
            return Err(ProjectError::LastProject);
        }
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProjectError::UnknownProject(id))?;
        self.projects.remove(idx);
        if self.active == id {
            self.active = self.projects[0].id;
        }
        info!(%id, "project deleted");
        self.flush();
        Ok(())
    }

    /// Select the active project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownProject`] when no such project exists.
    pub fn select(&mut self, id: ProjectId) -> Result<(), ProjectError> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(ProjectError::UnknownProject(id));
        }
        self.active = id;
        self.flush();
        Ok(())
    }

    /// Serialize and write both keys. Fire-and-forget: failures are logged,
    /// never propagated, and the in-memory state stays authoritative.
    pub fn flush(&mut self) {
        let payload = match serde_json::to_string(&self.projects) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "project serialization failed; skipping flush");
                return;
            }
        };
        if let Err(e) = self.storage.set(PROJECTS_KEY, &payload) {
            warn!(error = %e, "project flush failed");
        }
        if let Err(e) = self.storage.set(ACTIVE_PROJECT_KEY, &self.active.to_string()) {
            warn!(error = %e, "active-project flush failed");
        }
    }
}

/// Parse the persisted project list, skipping malformed entries.
fn parse_projects(raw: &str) -> Vec<Project> {
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(raw) else {
        warn!("persisted project list malformed; starting fresh");
        return Vec::new();
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Project>(entry) {
            Ok(project) => Some(project),
            Err(e) => {
                warn!(error = %e, "skipping malformed project record");
                None
            }
        })
        .collect()
}
