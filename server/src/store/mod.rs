//! Recipe storage.
//!
//! Handlers only ever see `dyn RecipeStore`, so the in-memory and Postgres
//! backends are interchangeable at startup.

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;

use crate::models::{Recipe, RecipeRequest};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found")]
    NotFound,

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Custody of the recipe collection.
///
/// Identifiers are taken as text. A backend that cannot parse one reports
/// `NotFound`, the same as an id that parses but matches nothing.
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Insert a new record with a fresh id and the current time as `published_at`.
    fn create(&self, request: RecipeRequest) -> Result<Recipe, StoreError>;

    /// Every record, in a stable order.
    fn list(&self) -> Result<Vec<Recipe>, StoreError>;

    fn get(&self, id: &str) -> Result<Recipe, StoreError>;

    /// Records carrying a tag equal to `tag`, ignoring case.
    fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, StoreError>;

    /// Replace name, tags, ingredients and instructions; keep id and `published_at`.
    fn update(&self, id: &str, request: RecipeRequest) -> Result<Recipe, StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Backend name for startup logs (e.g., "memory", "postgres").
    fn backend_name(&self) -> &'static str;
}
