use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored recipe, as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Server-assigned identifier, never reused
    pub id: String,
    #[schema(example = "Spaghetti Carbonara")]
    pub name: String,
    #[schema(example = json!(["Italian", "Pasta", "Dinner"]))]
    pub tags: Vec<String>,
    #[schema(example = json!(["Eggs", "Parmesan Cheese", "Bacon", "Spaghetti"]))]
    pub ingredients: Vec<String>,
    /// Steps, in order
    #[schema(example = json!(["Boil pasta", "Cook bacon", "Mix eggs with cheese", "Combine everything"]))]
    pub instructions: Vec<String>,
    /// Set once at creation
    pub published_at: DateTime<Utc>,
}

/// Body accepted by create and update. Any `id` or `publishedAt` sent by the
/// client is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeRequest {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Build a new record from a request, stamping identity and publication time.
    pub fn from_request(id: String, published_at: DateTime<Utc>, request: RecipeRequest) -> Self {
        Self {
            id,
            name: request.name,
            tags: request.tags,
            ingredients: request.ingredients,
            instructions: request.instructions,
            published_at,
        }
    }

    /// Replace the mutable fields. `id` and `published_at` are left alone.
    pub fn apply(&mut self, request: RecipeRequest) {
        self.name = request.name;
        self.tags = request.tags;
        self.ingredients = request.ingredients;
        self.instructions = request.instructions;
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}

#[cfg(feature = "postgres")]
pub use rows::{NewRecipeRow, RecipeRow};

#[cfg(feature = "postgres")]
mod rows {
    use super::Recipe;
    use chrono::{DateTime, Utc};
    use diesel::prelude::*;
    use uuid::Uuid;

    #[derive(Queryable, Selectable, Debug)]
    #[diesel(table_name = crate::schema::recipes)]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct RecipeRow {
        pub id: Uuid,
        pub name: String,
        pub tags: Vec<String>,
        pub ingredients: Vec<String>,
        pub instructions: Vec<String>,
        pub published_at: DateTime<Utc>,
    }

    #[derive(Insertable)]
    #[diesel(table_name = crate::schema::recipes)]
    pub struct NewRecipeRow<'a> {
        pub id: Uuid,
        pub name: &'a str,
        pub tags: &'a Vec<String>,
        pub ingredients: &'a Vec<String>,
        pub instructions: &'a Vec<String>,
        pub published_at: DateTime<Utc>,
    }

    impl From<RecipeRow> for Recipe {
        fn from(row: RecipeRow) -> Self {
            Self {
                id: row.id.to_string(),
                name: row.name,
                tags: row.tags,
                ingredients: row.ingredients,
                instructions: row.instructions,
                published_at: row.published_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, tags: &[&str]) -> RecipeRequest {
        RecipeRequest {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec![],
            instructions: vec![],
        }
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let recipe = Recipe::from_request(
            "a".into(),
            Utc::now(),
            request("Carbonara", &["Italian", "Pasta"]),
        );
        assert!(recipe.has_tag("italian"));
        assert!(recipe.has_tag("PASTA"));
        assert!(!recipe.has_tag("mexican"));
    }

    #[test]
    fn test_empty_tag_only_matches_empty_tag() {
        let plain = Recipe::from_request("a".into(), Utc::now(), request("Plain", &["Dinner"]));
        let odd = Recipe::from_request("b".into(), Utc::now(), request("Odd", &[""]));
        assert!(!plain.has_tag(""));
        assert!(odd.has_tag(""));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let published_at = Utc::now();
        let mut recipe =
            Recipe::from_request("keep-me".into(), published_at, request("Old", &[]));
        recipe.apply(request("New", &["Fresh"]));
        assert_eq!(recipe.id, "keep-me");
        assert_eq!(recipe.published_at, published_at);
        assert_eq!(recipe.name, "New");
        assert_eq!(recipe.tags, vec!["Fresh"]);
    }

    #[test]
    fn test_request_ignores_client_identity() {
        let body = r#"{"id":"x","publishedAt":"2001-01-01T00:00:00Z","name":"Tea"}"#;
        let parsed: RecipeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.name, "Tea");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe::from_request("a".into(), Utc::now(), request("Tea", &[]));
        let value = serde_json::to_value(&recipe).unwrap();
        assert!(value.get("publishedAt").is_some());
        assert!(value.get("published_at").is_none());
    }
}
