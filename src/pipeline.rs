use crate::error::DishDiveError;
use crate::model::{Query, ResultSet, SourceLabel};
use crate::source::MealSource;
use log::{debug, error};

/// Search-resolution pipeline.
///
/// Given a query, decides which sources to consult and in what order:
///
/// 1. Non-empty text: direct search (cuisine-filtered if one is selected),
///    then the selected cuisine, then the default cuisine.
/// 2. No text but a cuisine: browse that cuisine.
/// 3. Neither: browse the default cuisine.
///
/// The first branch yielding records wins. Stateless across calls.
pub struct Resolver {
    source: Box<dyn MealSource>,
    default_cuisine: String,
}

impl Resolver {
    pub fn new(source: Box<dyn MealSource>, default_cuisine: impl Into<String>) -> Self {
        Resolver {
            source,
            default_cuisine: default_cuisine.into(),
        }
    }

    /// Resolve a query to a result set.
    ///
    /// Never fails: any network failure is downgraded to an `Empty` result
    /// carrying a user-facing message.
    pub async fn resolve(&self, query: &Query) -> ResultSet {
        match self.resolve_inner(query).await {
            Ok(result) => {
                debug!(
                    "Resolved {:?} to {:?} with {} records",
                    query.text,
                    result.source,
                    result.records.len()
                );
                result
            }
            Err(e) => {
                error!("Search resolution failed: {}", e);
                ResultSet::empty("Error fetching recipes. Try again later.")
            }
        }
    }

    async fn resolve_inner(&self, query: &Query) -> Result<ResultSet, DishDiveError> {
        if !query.text.is_empty() {
            return self.resolve_text(&query.text, query.cuisine.as_deref()).await;
        }

        if let Some(cuisine) = query.cuisine.as_deref() {
            let records = self.source.list_by_category(cuisine).await?;
            return Ok(if records.is_empty() {
                ResultSet::empty(format!("No dishes found for {}.", cuisine))
            } else {
                ResultSet::new(
                    records,
                    SourceLabel::CuisineFallback,
                    Some(format!("Browsing {} dishes:", cuisine)),
                )
            });
        }

        let records = self.source.list_by_category(&self.default_cuisine).await?;
        Ok(if records.is_empty() {
            ResultSet::empty("Start by entering an ingredient or choosing a cuisine.")
        } else {
            ResultSet::new(
                records,
                SourceLabel::DefaultCuisine,
                Some(format!(
                    "Showing popular {} dishes by default. Try searching or choosing a cuisine.",
                    self.default_cuisine
                )),
            )
        })
    }

    async fn resolve_text(
        &self,
        text: &str,
        cuisine: Option<&str>,
    ) -> Result<ResultSet, DishDiveError> {
        let mut records = self.source.search_by_text(text).await?;

        if let Some(cuisine) = cuisine {
            records.retain(|r| {
                r.area
                    .as_deref()
                    .is_some_and(|a| a.eq_ignore_ascii_case(cuisine))
            });
        }

        if !records.is_empty() {
            return Ok(ResultSet::new(records, SourceLabel::DirectMatch, None));
        }

        if let Some(cuisine) = cuisine {
            let fallback = self.source.list_by_category(cuisine).await?;
            if !fallback.is_empty() {
                return Ok(ResultSet::new(
                    fallback,
                    SourceLabel::CuisineFallback,
                    Some(format!(
                        "No exact matches for \"{}\". Showing {} dishes.",
                        text, cuisine
                    )),
                ));
            }
        }

        let default = self.source.list_by_category(&self.default_cuisine).await?;
        if !default.is_empty() {
            return Ok(ResultSet::new(
                default,
                SourceLabel::DefaultCuisine,
                Some(format!(
                    "No exact matches for \"{}\". Here are popular {} dishes:",
                    text, self.default_cuisine
                )),
            ));
        }

        Ok(ResultSet::empty(format!(
            "No recipes found for \"{}\". Try another search or choose a cuisine.",
            text
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MealRecord, SortOrder};
    use async_trait::async_trait;

    fn record(id: &str, title: &str, area: Option<&str>) -> MealRecord {
        MealRecord {
            id: id.to_string(),
            title: title.to_string(),
            thumbnail_url: format!("https://example.com/{}.jpg", id),
            category: None,
            area: area.map(str::to_string),
            recipe_url: None,
            video_url: None,
        }
    }

    /// Canned source: fixed responses for search and per-category lists.
    struct StubSource {
        search: Result<Vec<MealRecord>, ()>,
        categories: Vec<(String, Vec<MealRecord>)>,
    }

    impl StubSource {
        fn new(search: Vec<MealRecord>) -> Self {
            StubSource {
                search: Ok(search),
                categories: Vec::new(),
            }
        }

        fn failing_search() -> Self {
            StubSource {
                search: Err(()),
                categories: Vec::new(),
            }
        }

        fn with_category(mut self, name: &str, records: Vec<MealRecord>) -> Self {
            self.categories.push((name.to_string(), records));
            self
        }
    }

    #[async_trait]
    impl MealSource for StubSource {
        async fn search_by_text(&self, _text: &str) -> Result<Vec<MealRecord>, DishDiveError> {
            match &self.search {
                Ok(records) => Ok(records.clone()),
                Err(()) => Err(DishDiveError::InvalidArgument(
                    "simulated upstream failure".to_string(),
                )),
            }
        }

        async fn list_by_category(&self, category: &str) -> Result<Vec<MealRecord>, DishDiveError> {
            Ok(self
                .categories
                .iter()
                .find(|(name, _)| name == category)
                .map(|(_, records)| records.clone())
                .unwrap_or_default())
        }
    }

    fn resolver(source: StubSource) -> Resolver {
        Resolver::new(Box::new(source), "Indian")
    }

    #[tokio::test]
    async fn test_direct_match_unfiltered() {
        let source = StubSource::new(vec![
            record("1", "Chicken Handi", Some("Indian")),
            record("2", "Chicken Parmentier", Some("French")),
        ]);
        let query = Query::new("chicken", None, SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::DirectMatch);
        assert_eq!(result.records.len(), 2);
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn test_direct_match_cuisine_filter() {
        let source = StubSource::new(vec![
            record("1", "Chicken Handi", Some("Indian")),
            record("2", "Chicken Parmentier", Some("French")),
        ]);
        let query = Query::new("chicken", Some("french"), SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::DirectMatch);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].title, "Chicken Parmentier");
    }

    #[tokio::test]
    async fn test_filter_empties_matches_falls_to_cuisine() {
        // Direct search matches, but none are Italian; the pipeline must
        // fall through to cuisine browsing, not report Empty.
        let source = StubSource::new(vec![record("1", "Chicken Handi", Some("Indian"))])
            .with_category("Italian", vec![record("9", "Lasagne", Some("Italian"))]);
        let query = Query::new("chicken", Some("Italian"), SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::CuisineFallback);
        assert_eq!(result.records.len(), 1);
        let message = result.message.expect("fallback carries a message");
        assert!(message.contains("chicken"));
        assert!(message.contains("Italian"));
    }

    #[tokio::test]
    async fn test_no_matches_falls_to_default_cuisine() {
        let source = StubSource::new(Vec::new()).with_category(
            "Indian",
            vec![
                record("1", "Dal", Some("Indian")),
                record("2", "Biryani", Some("Indian")),
                record("3", "Korma", Some("Indian")),
                record("4", "Rogan Josh", Some("Indian")),
                record("5", "Butter Chicken", Some("Indian")),
            ],
        );
        let query = Query::new("chiken", Some("All"), SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::DefaultCuisine);
        assert_eq!(result.records.len(), 5);
        assert!(result.message.expect("has message").contains("chiken"));
    }

    #[tokio::test]
    async fn test_everything_empty() {
        let source = StubSource::new(Vec::new());
        let query = Query::new("xyzzy", None, SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::Empty);
        assert!(result.is_empty());
        assert!(result.message.expect("has message").contains("xyzzy"));
    }

    #[tokio::test]
    async fn test_browse_cuisine_without_text() {
        let source = StubSource::new(Vec::new())
            .with_category("Mexican", vec![record("7", "Tacos", Some("Mexican"))]);
        let query = Query::new("", Some("Mexican"), SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::CuisineFallback);
        assert_eq!(
            result.message.as_deref(),
            Some("Browsing Mexican dishes:")
        );
    }

    #[tokio::test]
    async fn test_browse_empty_cuisine() {
        let source = StubSource::new(Vec::new());
        let query = Query::new("", Some("Italian"), SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::Empty);
        assert_eq!(
            result.message.as_deref(),
            Some("No dishes found for Italian.")
        );
    }

    #[tokio::test]
    async fn test_no_input_shows_default_cuisine() {
        let source = StubSource::new(Vec::new())
            .with_category("Indian", vec![record("1", "Dal", Some("Indian"))]);
        let query = Query::new("", None, SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::DefaultCuisine);
        assert!(result
            .message
            .expect("has message")
            .contains("Showing popular Indian dishes by default"));
    }

    #[tokio::test]
    async fn test_no_input_no_data_prompts() {
        let source = StubSource::new(Vec::new());
        let query = Query::new("", None, SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::Empty);
        assert_eq!(
            result.message.as_deref(),
            Some("Start by entering an ingredient or choosing a cuisine.")
        );
    }

    #[tokio::test]
    async fn test_transport_error_downgraded() {
        let source = StubSource::failing_search();
        let query = Query::new("chicken", None, SortOrder::Relevance);

        let result = resolver(source).resolve(&query).await;
        assert_eq!(result.source, SourceLabel::Empty);
        assert_eq!(
            result.message.as_deref(),
            Some("Error fetching recipes. Try again later.")
        );
    }
}
