//! In-process recipe store.
//!
//! All records live in one `Vec` behind a single `RwLock`: readers share it,
//! and every mutation holds the write guard for its whole read-modify-write.

use super::{RecipeStore, StoreError};
use crate::models::{Recipe, RecipeRequest};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Insertion order is the listing order
    recipes: RwLock<Vec<Recipe>>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A seed record. Missing identity is filled in at load time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecipe {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store preloaded from a JSON array of recipes.
    ///
    /// A missing or malformed file is logged and the store starts empty.
    pub fn from_seed_file(path: &Path) -> Self {
        match Self::load_seed(path) {
            Ok(recipes) => {
                tracing::info!(
                    "Loaded {} recipes from seed file {}",
                    recipes.len(),
                    path.display()
                );
                Self {
                    recipes: RwLock::new(recipes),
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring seed file {}: {}; starting with no recipes",
                    path.display(),
                    e
                );
                Self::new()
            }
        }
    }

    fn load_seed(path: &Path) -> Result<Vec<Recipe>, SeedError> {
        let data = std::fs::read_to_string(path)?;
        let seeds: Vec<SeedRecipe> = serde_json::from_str(&data)?;

        let loaded_at = Utc::now();
        let mut seen = HashSet::new();
        let mut recipes = Vec::with_capacity(seeds.len());

        for seed in seeds {
            let id = match seed.id {
                Some(id) if !id.is_empty() => id,
                _ => new_id(),
            };
            if !seen.insert(id.clone()) {
                tracing::warn!("Skipping seed recipe with duplicate id {}", id);
                continue;
            }
            recipes.push(Recipe {
                id,
                name: seed.name,
                tags: seed.tags,
                ingredients: seed.ingredients,
                instructions: seed.instructions,
                published_at: seed.published_at.unwrap_or(loaded_at),
            });
        }

        Ok(recipes)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Recipe>> {
        self.recipes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Recipe>> {
        self.recipes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecipeStore for MemoryStore {
    fn create(&self, request: RecipeRequest) -> Result<Recipe, StoreError> {
        let mut recipes = self.write();

        // At most one record per id
        let mut id = new_id();
        while recipes.iter().any(|r| r.id == id) {
            id = new_id();
        }

        let recipe = Recipe::from_request(id, Utc::now(), request);
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.read().clone())
    }

    fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        self.read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, StoreError> {
        Ok(self
            .read()
            .iter()
            .filter(|r| r.has_tag(tag))
            .cloned()
            .collect())
    }

    fn update(&self, id: &str, request: RecipeRequest) -> Result<Recipe, StoreError> {
        let mut recipes = self.write();
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        recipe.apply(request);
        Ok(recipe.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut recipes = self.write();
        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        recipes.remove(index);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn request(name: &str, tags: &[&str]) -> RecipeRequest {
        RecipeRequest {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec!["Water".to_string()],
            instructions: vec!["Boil".to_string(), "Steep".to_string()],
        }
    }

    fn seed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_list_empty() {
        let store = MemoryStore::new();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let store = MemoryStore::new();
        let before = Utc::now();
        let created = store.create(request("Tea", &["Drink"])).unwrap();

        assert!(!created.id.is_empty());
        assert!(created.published_at >= before);

        let all = store.list().unwrap();
        assert_eq!(all, vec![created]);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let first = store.create(request("First", &[])).unwrap();
        let second = store.create(request("Second", &[])).unwrap();
        let third = store.create(request("Third", &[])).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn test_get() {
        let store = MemoryStore::new();
        let created = store.create(request("Tea", &[])).unwrap();
        assert_eq!(store.get(&created.id).unwrap(), created);
        assert!(matches!(store.get("missing"), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_find_by_tag() {
        let store = MemoryStore::new();
        let carbonara = store.create(request("Carbonara", &["Italian", "Pasta"])).unwrap();
        store.create(request("Tacos", &["Mexican"])).unwrap();

        for query in ["italian", "ITALIAN", "Italian", "pAsTa"] {
            assert_eq!(store.find_by_tag(query).unwrap(), vec![carbonara.clone()]);
        }
        assert!(store.find_by_tag("thai").unwrap().is_empty());
        assert!(store.find_by_tag("").unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_id_and_published_at() {
        let store = MemoryStore::new();
        let created = store.create(request("Tea", &["Drink"])).unwrap();

        let updated = store
            .update(&created.id, request("Green Tea", &["Drink", "Hot"]))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.published_at, created.published_at);
        assert_eq!(updated.name, "Green Tea");
        assert_eq!(updated.tags, vec!["Drink", "Hot"]);
        assert_eq!(store.list().unwrap(), vec![updated]);
    }

    #[test]
    fn test_update_missing_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let created = store.create(request("Tea", &[])).unwrap();

        let result = store.update("nope", request("Coffee", &[]));
        assert!(matches!(result, Err(StoreError::NotFound)));
        assert_eq!(store.list().unwrap(), vec![created]);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let tea = store.create(request("Tea", &[])).unwrap();
        let coffee = store.create(request("Coffee", &[])).unwrap();

        store.delete(&tea.id).unwrap();
        assert_eq!(store.list().unwrap(), vec![coffee.clone()]);
        assert!(matches!(store.delete(&tea.id), Err(StoreError::NotFound)));

        // Later records keep their ids, and new ones never reuse a deleted id
        assert_eq!(store.get(&coffee.id).unwrap().id, coffee.id);
        let juice = store.create(request("Juice", &[])).unwrap();
        assert_ne!(juice.id, tea.id);
    }

    #[test]
    fn test_concurrent_creates_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        store.create(request(&format!("r{}-{}", i, j), &[])).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let all = store.list().unwrap();
        assert_eq!(all.len(), 200);
        let ids: HashSet<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_seed_file_loads_records() {
        let file = seed_file(
            r#"[
                {"id": "c0m1", "name": "Carbonara", "tags": ["Italian"], "ingredients": ["Eggs"],
                 "instructions": ["Boil pasta"], "publishedAt": "2021-01-17T19:28:52.803062+01:00"},
                {"name": "Tea"}
            ]"#,
        );
        let store = MemoryStore::from_seed_file(file.path());
        let all = store.list().unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "c0m1");
        assert_eq!(all[0].published_at.to_rfc3339(), "2021-01-17T18:28:52.803062+00:00");
        assert!(!all[1].id.is_empty());
        assert!(all[1].tags.is_empty());
    }

    #[test]
    fn test_seed_file_skips_duplicate_ids() {
        let file = seed_file(r#"[{"id": "a", "name": "One"}, {"id": "a", "name": "Two"}]"#);
        let store = MemoryStore::from_seed_file(file.path());
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "One");
    }

    #[test]
    fn test_missing_seed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::from_seed_file(&dir.path().join("recipes.json"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_seed_file_starts_empty() {
        let file = seed_file("{ not json");
        let store = MemoryStore::from_seed_file(file.path());
        assert!(store.list().unwrap().is_empty());
    }
}
