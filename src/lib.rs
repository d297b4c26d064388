pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod source;

pub use config::AppConfig;
pub use error::DishDiveError;
pub use model::{MealRecord, Query, ResultSet, SortOrder, SourceLabel, Theme};
pub use pipeline::Resolver;
pub use render::{CardDescriptor, HtmlSink, RenderSink};
pub use settings::{FileStore, MemoryStore, PreferenceStore, Settings};
pub use source::{MealDbSource, MealSource};

/// Resolve a query against the live recipe service configured in `config`.
///
/// Convenience wrapper for hosts that don't need to hold onto the resolver;
/// builds a fresh adapter per call, which is fine since nothing is cached
/// across searches.
pub async fn search(query: &Query, config: &AppConfig) -> Result<ResultSet, DishDiveError> {
    let source = MealDbSource::new(config)?;
    let resolver = Resolver::new(Box::new(source), config.default_cuisine.clone());
    Ok(resolver.resolve(query).await)
}
