//! One-shot scrape of the shuttle page: fetch, parse, extract, aggregate.

use shuttle_core::AppConfig;

use crate::client::ShuttleClient;
use crate::document::parse_document;
use crate::error::ScraperError;
use crate::routes::extract_routes;
use crate::schedules::extract_schedules;
use crate::types::ScrapeResult;

/// Scrapes a single schedule page.
///
/// Holds no state between calls: every [`get_all_shuttle_data`] performs a
/// fresh fetch and builds a fresh [`ScrapeResult`].
///
/// [`get_all_shuttle_data`]: ShuttleScraper::get_all_shuttle_data
pub struct ShuttleScraper {
    client: ShuttleClient,
    url: String,
}

impl ShuttleScraper {
    #[must_use]
    pub fn new(client: ShuttleClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Builds a scraper for `config.schedule_url` using the configured
    /// timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = ShuttleClient::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self::new(client, config.schedule_url.clone()))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the page and extracts routes and schedules.
    ///
    /// Never fails: fetch and parse errors come back as a result with
    /// `success == false`, an error message, and empty maps.
    pub async fn get_all_shuttle_data(&self) -> ScrapeResult {
        match self.client.fetch_page(&self.url).await {
            Ok(markup) => Self::scrape_markup(&markup, &self.url),
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "failed to fetch shuttle schedule page");
                ScrapeResult::failure(&self.url, e.to_string())
            }
        }
    }

    /// Runs the parse and extract steps over markup already in hand.
    ///
    /// Deterministic: identical markup always yields an identical result.
    #[must_use]
    pub fn scrape_markup(markup: &str, url: &str) -> ScrapeResult {
        let document = match parse_document(markup) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to parse shuttle schedule page");
                return ScrapeResult::failure(url, e.to_string());
            }
        };

        let routes = extract_routes(&document);
        let schedules = extract_schedules(&document);
        tracing::info!(
            url,
            routes = routes.len(),
            schedules = schedules.len(),
            "scraped shuttle schedule page"
        );

        ScrapeResult::success(url, routes, schedules)
    }
}
