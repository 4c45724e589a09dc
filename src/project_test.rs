use serde_json::json;
use uuid::Uuid;

use super::*;

fn memory_store() -> ProjectStore {
    ProjectStore::load(Box::new(MemoryStorage::new()))
}

// =============================================================
// Load
// =============================================================

#[test]
fn empty_storage_loads_default_project() {
    let store = memory_store();
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.projects()[0].name, "Untitled");
    assert_eq!(store.active_id(), store.projects()[0].id);
}

#[test]
fn malformed_project_list_starts_fresh() {
    let mut backend = MemoryStorage::new();
    backend.set(PROJECTS_KEY, "{not json").unwrap();
    let store = ProjectStore::load(Box::new(backend));
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.projects()[0].name, "Untitled");
}

#[test]
fn malformed_entries_are_skipped_per_record() {
    let good = Project::new("Kept");
    let payload = json!([serde_json::to_value(&good).unwrap(), { "junk": true }]);
    let mut backend = MemoryStorage::new();
    backend.set(PROJECTS_KEY, &payload.to_string()).unwrap();
    let store = ProjectStore::load(Box::new(backend));
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.projects()[0].name, "Kept");
}

#[test]
fn unknown_active_id_falls_back_to_first() {
    let good = Project::new("Only");
    let mut backend = MemoryStorage::new();
    backend.set(PROJECTS_KEY, &json!([good]).to_string()).unwrap();
    backend.set(ACTIVE_PROJECT_KEY, &Uuid::new_v4().to_string()).unwrap();
    let store = ProjectStore::load(Box::new(backend));
    assert_eq!(store.active_id(), store.projects()[0].id);
}

#[test]
fn persisted_active_id_is_honored() {
    let a = Project::new("A");
    let b = Project::new("B");
    let b_id = b.id;
    let mut backend = MemoryStorage::new();
    backend.set(PROJECTS_KEY, &json!([a, b]).to_string()).unwrap();
    backend.set(ACTIVE_PROJECT_KEY, &b_id.to_string()).unwrap();
    let store = ProjectStore::load(Box::new(backend));
    assert_eq!(store.active_id(), b_id);
    assert_eq!(store.active_project().name, "B");
}

// =============================================================
// Project operations
// =============================================================

#[test]
fn create_selects_new_project() {
    let mut store = memory_store();
    let id = store.create_project("Sales");
    assert_eq!(store.projects().len(), 2);
    assert_eq!(store.active_id(), id);
    assert_eq!(store.active_project().name, "Sales");
}

#[test]
fn rename_project_updates_name() {
    let mut store = memory_store();
    let id = store.active_id();
    store.rename_project(id, "Q3 Review").unwrap();
    assert_eq!(store.active_project().name, "Q3 Review");
}

#[test]
fn rename_unknown_project_errors() {
    let mut store = memory_store();
    let ghost = Uuid::new_v4();
    assert_eq!(store.rename_project(ghost, "x"), Err(ProjectError::UnknownProject(ghost)));
}

#[test]
fn delete_last_project_is_refused() {
    let mut store = memory_store();
    let id = store.active_id();
    assert_eq!(store.delete_project(id), Err(ProjectError::LastProject));
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn delete_active_reselects_first_survivor() {
    let mut store = memory_store();
    let first = store.active_id();
    let second = store.create_project("Second");
    assert_eq!(store.active_id(), second);
    store.delete_project(second).unwrap();
    assert_eq!(store.active_id(), first);
}

#[test]
fn delete_inactive_keeps_selection() {
    let mut store = memory_store();
    let first = store.active_id();
    let second = store.create_project("Second");
    store.delete_project(first).unwrap();
    assert_eq!(store.active_id(), second);
}

#[test]
fn select_unknown_project_errors() {
    let mut store = memory_store();
    let ghost = Uuid::new_v4();
    assert_eq!(store.select(ghost), Err(ProjectError::UnknownProject(ghost)));
}

#[test]
fn select_switches_active_project() {
    let mut store = memory_store();
    let first = store.active_id();
    store.create_project("Second");
    store.select(first).unwrap();
    assert_eq!(store.active_id(), first);
}

// =============================================================
// Persistence round trip
// =============================================================

#[test]
fn file_storage_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let storage = JsonFileStorage::new(dir.path()).unwrap();
    let mut store = ProjectStore::load(Box::new(storage));
    let kept = store.create_project("Persisted");
    store.rename_project(kept, "Persisted v2").unwrap();

    let storage = JsonFileStorage::new(dir.path()).unwrap();
    let reloaded = ProjectStore::load(Box::new(storage));
    assert_eq!(reloaded.projects().len(), 2);
    assert_eq!(reloaded.active_id(), kept);
    assert_eq!(reloaded.active_project().name, "Persisted v2");
}

#[test]
fn file_storage_get_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path()).unwrap();
    assert_eq!(storage.get("nothing_here"), None);
}

#[test]
fn flush_writes_both_keys_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ProjectStore::load(Box::new(JsonFileStorage::new(dir.path()).unwrap()));
    store.create_project("Flushed");

    let raw = std::fs::read_to_string(dir.path().join(format!("{PROJECTS_KEY}.json"))).unwrap();
    let list: Vec<Project> = serde_json::from_str(&raw).unwrap();
    assert_eq!(list.len(), 2);

    let raw = std::fs::read_to_string(dir.path().join(format!("{ACTIVE_PROJECT_KEY}.json"))).unwrap();
    assert_eq!(raw.trim(), store.active_id().to_string());
}
