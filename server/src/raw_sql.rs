//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! User input is ALWAYS passed via `.bind()` parameters, never interpolated.

/// Filter expression for case-insensitive tag membership in `recipes.tags`.
///
/// Expands the array with `unnest()` and compares lowercased values, so an
/// empty tag only matches recipes that carry an empty-string tag.
///
/// # Safety
/// The tag value is passed via `.bind()`, not interpolated.
///
/// # Why raw SQL?
/// Diesel has no DSL for `unnest()` or for comparing inside an array.
#[macro_export]
macro_rules! tag_in_array {
    ($tag:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>(
            "EXISTS (SELECT 1 FROM unnest(recipes.tags) AS t WHERE lower(t) = lower(",
        )
        .bind::<diesel::sql_types::Text, _>($tag)
        .sql("))")
    };
}
