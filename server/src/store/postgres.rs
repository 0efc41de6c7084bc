//! Postgres-backed recipe store.
//!
//! Each operation is a single statement on a pooled connection; consistency
//! comes from Postgres' per-statement atomicity.

use super::{RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipeRow, Recipe, RecipeRequest, RecipeRow};
use crate::schema::recipes;
use crate::tag_in_array;
use chrono::Utc;
use diesel::prelude::*;
use std::fmt;
use uuid::Uuid;

pub struct PgStore {
    pool: DbPool,
}

impl fmt::Debug for PgStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgStore")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => StoreError::NotFound,
            other => StoreError::Storage(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for StoreError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        StoreError::Storage(format!("failed to get DB connection: {}", e))
    }
}

/// Ids that are not UUIDs can never match a row.
fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::NotFound)
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RecipeStore for PgStore {
    fn create(&self, request: RecipeRequest) -> Result<Recipe, StoreError> {
        let mut conn = self.pool.get()?;

        let new_recipe = NewRecipeRow {
            id: Uuid::new_v4(),
            name: &request.name,
            tags: &request.tags,
            ingredients: &request.ingredients,
            instructions: &request.instructions,
            published_at: Utc::now(),
        };

        let row: RecipeRow = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<RecipeRow> = recipes::table
            .select(RecipeRow::as_select())
            .order((recipes::published_at.asc(), recipes::id.asc()))
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        let id = parse_id(id)?;
        let mut conn = self.pool.get()?;

        let row: RecipeRow = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(tag_in_array!(tag))
            .select(RecipeRow::as_select())
            .order((recipes::published_at.asc(), recipes::id.asc()))
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    fn update(&self, id: &str, request: RecipeRequest) -> Result<Recipe, StoreError> {
        let id = parse_id(id)?;
        let mut conn = self.pool.get()?;

        // id and published_at never appear in the SET list
        let row: RecipeRow = diesel::update(recipes::table.find(id))
            .set((
                recipes::name.eq(&request.name),
                recipes::tags.eq(&request.tags),
                recipes::ingredients.eq(&request.ingredients),
                recipes::instructions.eq(&request.instructions),
            ))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(recipes::table.find(id)).execute(&mut conn)?;

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
