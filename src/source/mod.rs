mod mealdb;

pub use mealdb::MealDbSource;

use crate::error::DishDiveError;
use crate::model::MealRecord;
use async_trait::async_trait;

/// Unified interface over the upstream recipe lookup service.
///
/// Implementations return an empty vec for well-formed "no matches"
/// responses; `Err` is reserved for transport or decode failures.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Free-text search against the service's name index.
    async fn search_by_text(&self, text: &str) -> Result<Vec<MealRecord>, DishDiveError>;

    /// List full records for a cuisine.
    ///
    /// Partial success is the default: a failed detail lookup drops that
    /// record rather than failing the whole call, and a failed category
    /// listing yields an empty sequence.
    async fn list_by_category(&self, category: &str) -> Result<Vec<MealRecord>, DishDiveError>;
}
