use super::MealSource;
use crate::config::AppConfig;
use crate::error::DishDiveError;
use crate::model::MealRecord;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

/// Envelope shared by every endpoint: `{"meals": [...]}` or `{"meals": null}`.
#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    meals: Option<Vec<WireMeal>>,
}

/// One meal as it appears on the wire. Every field is nullable.
#[derive(Debug, Deserialize)]
struct WireMeal {
    #[serde(rename = "idMeal")]
    id: Option<String>,
    #[serde(rename = "strMeal")]
    title: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strSource")]
    source: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl WireMeal {
    fn into_record(self) -> MealRecord {
        MealRecord {
            id: self.id.unwrap_or_default(),
            title: non_empty(self.title).unwrap_or_else(|| "Untitled".to_string()),
            thumbnail_url: self.thumbnail.unwrap_or_default(),
            category: non_empty(self.category),
            area: non_empty(self.area),
            recipe_url: non_empty(self.source),
            video_url: non_empty(self.youtube),
        }
    }
}

/// Adapter over TheMealDB's `search.php` / `filter.php` / `lookup.php`
/// endpoints.
pub struct MealDbSource {
    client: Client,
    base_url: String,
    detail_cap: usize,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl MealDbSource {
    pub fn new(config: &AppConfig) -> Result<Self, DishDiveError> {
        let mut builder = Client::builder().user_agent("Mozilla/5.0 (compatible; DishDive/1.0)");
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(MealDbSource {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            detail_cap: config.detail_cap,
            retry_attempts: config.retry_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    async fn fetch_envelope(&self, url: &str, param: (&str, &str)) -> Result<MealsEnvelope, reqwest::Error> {
        let response = self.client.get(url).query(&[param]).send().await?;
        response.json::<MealsEnvelope>().await
    }

    /// GET an endpoint with the configured retry policy (one attempt by
    /// default: fail fast) and unwrap the `meals` envelope.
    async fn get_meals(
        &self,
        endpoint: &str,
        param: (&str, &str),
    ) -> Result<Vec<WireMeal>, DishDiveError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt = 1;

        loop {
            debug!(
                "GET {}?{}={} (attempt {}/{})",
                url, param.0, param.1, attempt, self.retry_attempts
            );

            match self.fetch_envelope(&url, param).await {
                Ok(envelope) => return Ok(envelope.meals.unwrap_or_default()),
                Err(e) => {
                    if attempt >= self.retry_attempts {
                        return Err(e.into());
                    }
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        url, attempt, self.retry_attempts, e
                    );
                    sleep(self.retry_delay * attempt).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Fetch the full record for one meal id. Failures and empty responses
/// drop the record instead of failing the batch.
async fn lookup_detail(client: Client, url: String, id: String) -> Option<MealRecord> {
    let result = async {
        let response = client.get(&url).query(&[("i", id.as_str())]).send().await?;
        response.json::<MealsEnvelope>().await
    }
    .await;

    match result {
        Ok(envelope) => envelope
            .meals
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(WireMeal::into_record),
        Err(e) => {
            warn!("Detail lookup for meal {} failed, dropping it: {}", id, e);
            None
        }
    }
}

#[async_trait]
impl MealSource for MealDbSource {
    async fn search_by_text(&self, text: &str) -> Result<Vec<MealRecord>, DishDiveError> {
        let records = self
            .get_meals("search.php", ("s", text))
            .await?
            .into_iter()
            .map(WireMeal::into_record)
            .collect();
        Ok(records)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<MealRecord>, DishDiveError> {
        // A failed category listing is "nothing to browse", not an error.
        let ids: Vec<String> = match self.get_meals("filter.php", ("a", category)).await {
            Ok(meals) => meals.into_iter().filter_map(|m| m.id).collect(),
            Err(e) => {
                warn!("Category listing for {} failed: {}", category, e);
                return Ok(Vec::new());
            }
        };

        // The list endpoint only returns ids; cap the detail lookups and
        // run them concurrently, preserving listing order in the output.
        let lookup_url = format!("{}/lookup.php", self.base_url);
        let tasks: Vec<_> = ids
            .into_iter()
            .take(self.detail_cap)
            .map(|id| tokio::spawn(lookup_detail(self.client.clone(), lookup_url.clone(), id)))
            .collect();

        let mut records = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => warn!("Detail lookup task aborted: {}", e),
            }
        }

        debug!("Category {} resolved to {} records", category, records.len());
        Ok(records)
    }
}
