//! GIPHY API client
//!
//! [`GiphyClient`] maps each API operation to one GET request. It only
//! assembles URLs and query parameters; sending and error handling are left
//! to the [`RequestExecutor`].

use crate::params::{
    API_KEY_PARAM, CategoriesParams, IdsParams, MediaType, PageParams, QueryParams, RandomParams,
    SearchParams, TranslateParams, TrendingParams,
};
use crate::request_executor::{Operation, PendingRequest, RequestDescriptor, RequestExecutor};
use std::env;
use thiserror::Error;
use url::Url;

/// Base URL of the public GIPHY API
pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GIPHY_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "GIPHY_BASE_URL";

/// Errors that can occur while configuring a client
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No API key was provided
    #[error("No API key configured (set it on the builder or via GIPHY_API_KEY)")]
    MissingApiKey,

    /// The base URL is not an absolute http(s) URL
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Builder for configuring a [`GiphyClient`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Sets the API key sent with every request
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the base URL, e.g. to point at a mock server
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Uses a preconfigured HTTP client (proxies, timeouts, ...)
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`GiphyClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if no API key was set or the base URL is not a valid
    /// absolute http(s) URL.
    pub fn build(self) -> Result<GiphyClient, ConfigError> {
        let api_key = self.api_key.ok_or(ConfigError::MissingApiKey)?;
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        Ok(GiphyClient {
            api_key,
            base_url: validate_base_url(base_url)?,
            executor: RequestExecutor::new(self.http_client.unwrap_or_default()),
        })
    }
}

/// Checks the base URL and strips trailing slashes
fn validate_base_url(base_url: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

/// Client for the GIPHY API.
///
/// Every operation returns a [`PendingRequest`] which can either be awaited or
/// given a completion callback. The API key is read when the operation is
/// called, so changing it with [`GiphyClient::set_credentials`] affects only
/// requests created afterwards.
///
/// # Examples
///
/// ```no_run
/// use giphy_client::{GiphyClient, MediaType, SearchParams};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GiphyClient::new("my-api-key");
///
/// let body = client
///     .search(MediaType::Gifs, &SearchParams::new("cats").with_limit(5))
///     .await?;
///
/// for gif in body["data"].as_array().into_iter().flatten() {
///     println!("{}", gif["url"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GiphyClient {
    api_key: String,
    base_url: String,
    executor: RequestExecutor,
}

impl GiphyClient {
    /// Creates a client for the public API using the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            executor: RequestExecutor::default(),
        }
    }

    /// Creates a builder for a custom configured client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Creates a client from the `GIPHY_API_KEY` and optional
    /// `GIPHY_BASE_URL` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a client from variables resolved by `lookup`.
    ///
    /// Empty or whitespace-only values count as unset.
    fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value: &String| !value.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(api_key) = read(API_KEY_ENV) {
            builder = builder.api_key(api_key);
        }
        if let Some(base_url) = read(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }

        builder.build()
    }

    /// Replaces the API key used for all subsequent requests
    pub fn set_credentials(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// The currently configured API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches GIFs or stickers for a word or phrase
    pub fn search(&self, media: MediaType, params: &SearchParams) -> PendingRequest {
        self.request(Operation::Search, format!("/v1/{media}/search"), params)
    }

    /// Fetches the currently trending GIFs or stickers
    pub fn trending(&self, media: MediaType, params: &TrendingParams) -> PendingRequest {
        self.request(Operation::Trending, format!("/v1/{media}/trending"), params)
    }

    /// Translates a phrase into a single GIF or sticker
    pub fn translate(&self, media: MediaType, params: &TranslateParams) -> PendingRequest {
        self.request(Operation::Translate, format!("/v1/{media}/translate"), params)
    }

    /// Fetches a random GIF or sticker, optionally limited by tag
    pub fn random(&self, media: MediaType, params: &RandomParams) -> PendingRequest {
        self.request(Operation::Random, format!("/v1/{media}/random"), params)
    }

    /// Fetches a single GIF by its id
    pub fn gif_by_id(&self, id: &str) -> PendingRequest {
        self.request(Operation::GifById, format!("/v1/gifs/{id}"), &NoParams)
    }

    /// Fetches several GIFs by id, in one request
    pub fn gifs_by_ids(&self, params: &IdsParams) -> PendingRequest {
        self.request(Operation::GifsByIds, "/v1/gifs".to_string(), params)
    }

    /// Lists the GIF categories
    pub fn categories(&self, params: &CategoriesParams) -> PendingRequest {
        self.request(
            Operation::Categories,
            "/v1/gifs/categories".to_string(),
            params,
        )
    }

    /// Lists the subcategories of a category
    pub fn subcategories(&self, subcategory: &str, params: &PageParams) -> PendingRequest {
        self.request(
            Operation::Subcategories,
            format!("/v1/gifs/categories/{subcategory}"),
            params,
        )
    }

    /// Lists the GIFs of a category's subcategory
    pub fn gifs_by_category(
        &self,
        category: &str,
        subcategory: &str,
        params: &PageParams,
    ) -> PendingRequest {
        self.request(
            Operation::GifsByCategory,
            format!("/v1/gifs/categories/{category}/{subcategory}"),
            params,
        )
    }

    /// Fetches search terms related to `term`.
    ///
    /// Unlike the other operations this endpoint takes no parameters besides
    /// the API key, so none are accepted here.
    pub fn term_suggestions(&self, term: &str) -> PendingRequest {
        self.request(
            Operation::TermSuggestions,
            format!("/v1/queries/suggest/{term}"),
            &NoParams,
        )
    }

    /// Assembles the descriptor for `path` and wraps it for execution.
    ///
    /// Path segments are inserted as given, reserved characters in them are the
    /// caller's responsibility. The API key always comes first and cannot be
    /// overridden by `params`.
    fn request(
        &self,
        operation: Operation,
        path: String,
        params: &impl QueryParams,
    ) -> PendingRequest {
        let mut query = vec![(API_KEY_PARAM.to_string(), self.api_key.clone())];
        params.append_to(&mut query);

        let descriptor = RequestDescriptor::get(format!("{}{}", self.base_url, path), query);
        PendingRequest::new(operation, descriptor, self.executor.clone())
    }
}

/// Parameters of operations that only send the API key
struct NoParams;

impl QueryParams for NoParams {
    fn append_to(&self, _query: &mut Vec<(String, String)>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Rating;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    fn client() -> GiphyClient {
        GiphyClient::new("abc123")
    }

    #[test]
    fn test_search_scenario() {
        let request = client().search(MediaType::Gifs, &SearchParams::new("cats").with_limit(5));
        let descriptor = request.descriptor();

        assert_eq!(request.operation(), Operation::Search);
        assert_eq!(descriptor.method(), &reqwest::Method::GET);
        assert_eq!(descriptor.url(), "https://api.giphy.com/v1/gifs/search");
        assert_eq!(
            descriptor.query(),
            &[pair("api_key", "abc123"), pair("q", "cats"), pair("limit", "5")]
        );
    }

    #[test]
    fn test_gifs_by_category_scenario() {
        let request =
            client().gifs_by_category("reactions", "love", &PageParams::default().with_limit(10));

        assert_eq!(
            request.descriptor().to_url().unwrap().as_str(),
            "https://api.giphy.com/v1/gifs/categories/reactions/love?api_key=abc123&limit=10"
        );
    }

    #[test]
    fn test_every_operation_carries_api_key() {
        let client = client();
        let requests = vec![
            client.search(MediaType::Stickers, &SearchParams::default()),
            client.trending(MediaType::Gifs, &TrendingParams::default()),
            client.translate(MediaType::Gifs, &TranslateParams::default()),
            client.random(MediaType::Stickers, &RandomParams::default()),
            client.gif_by_id("xT4uQulxzV39haRFjG"),
            client.gifs_by_ids(&IdsParams::default()),
            client.categories(&CategoriesParams::default()),
            client.subcategories("actions", &PageParams::default()),
            client.gifs_by_category("actions", "dancing", &PageParams::default()),
            client.term_suggestions("cat"),
        ];

        for request in requests {
            let api_keys: Vec<_> = request
                .descriptor()
                .query()
                .iter()
                .filter(|(name, _)| name == "api_key")
                .collect();
            assert_eq!(
                api_keys,
                vec![&pair("api_key", "abc123")],
                "{}",
                request.operation()
            );
        }
    }

    #[test]
    fn test_paths_per_operation() {
        let client = client();
        let cases = [
            (
                client.trending(MediaType::Stickers, &TrendingParams::default()),
                "/v1/stickers/trending",
            ),
            (
                client.translate(MediaType::Gifs, &TranslateParams::new("hi")),
                "/v1/gifs/translate",
            ),
            (
                client.random(MediaType::Gifs, &RandomParams::default()),
                "/v1/gifs/random",
            ),
            (client.gif_by_id("feqkVgjJpYtjy"), "/v1/gifs/feqkVgjJpYtjy"),
            (client.gifs_by_ids(&IdsParams::new(["a"])), "/v1/gifs"),
            (
                client.categories(&CategoriesParams::default()),
                "/v1/gifs/categories",
            ),
            (
                client.subcategories("actions", &PageParams::default()),
                "/v1/gifs/categories/actions",
            ),
            (client.term_suggestions("cat"), "/v1/queries/suggest/cat"),
        ];

        for (request, expected_path) in cases {
            assert_eq!(
                request.descriptor().url(),
                format!("{DEFAULT_BASE_URL}{expected_path}")
            );
        }
    }

    #[test]
    fn test_gifs_by_ids_joins_ids() {
        let client = client();

        let request = client.gifs_by_ids(&IdsParams::new(["a", "b", "c"]));
        assert_eq!(request.descriptor().query_value("ids"), Some("a,b,c"));

        let request = client.gifs_by_ids(&IdsParams::new(Vec::<String>::new()));
        assert_eq!(request.descriptor().query_value("ids"), Some(""));
    }

    #[test]
    fn test_term_suggestions_sends_only_api_key() {
        let request = client().term_suggestions("funny");
        assert_eq!(request.descriptor().query(), &[pair("api_key", "abc123")]);
    }

    #[test]
    fn test_caller_cannot_override_api_key() {
        let params = SearchParams::new("cats").with_extra("api_key", "spoofed");
        let request = client().search(MediaType::Gifs, &params);

        assert_eq!(request.descriptor().query_value("api_key"), Some("abc123"));
        assert!(
            !request
                .descriptor()
                .query()
                .iter()
                .any(|(_, value)| value == "spoofed")
        );
    }

    #[test]
    fn test_set_credentials_affects_only_later_requests() {
        let mut client = client();
        let before = client.trending(MediaType::Gifs, &TrendingParams::default());

        client.set_credentials("new-key");
        let after = client.trending(MediaType::Gifs, &TrendingParams::default());

        assert_eq!(client.api_key(), "new-key");
        assert_eq!(before.descriptor().query_value("api_key"), Some("abc123"));
        assert_eq!(after.descriptor().query_value("api_key"), Some("new-key"));
    }

    #[test]
    fn test_path_parameters_are_not_escaped() {
        let request = client().term_suggestions("funny cat");
        assert_eq!(
            request.descriptor().url(),
            "https://api.giphy.com/v1/queries/suggest/funny cat"
        );
    }

    #[test]
    fn test_builder_configuration() {
        let client = GiphyClient::builder()
            .api_key("abc123")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.gif_by_id("x").descriptor().url(),
            "http://localhost:8080/v1/gifs/x"
        );
    }

    #[test]
    fn test_builder_errors() {
        assert_eq!(
            GiphyClient::builder().build().unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert!(matches!(
            GiphyClient::builder()
                .api_key("k")
                .base_url("ftp://example.com")
                .build(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            GiphyClient::builder().api_key("k").base_url("not a url").build(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_from_lookup_treats_empty_values_as_unset() {
        let client = GiphyClient::from_lookup(|name| match name {
            API_KEY_ENV => Some("abc123".to_string()),
            BASE_URL_ENV => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);

        let client = GiphyClient::from_lookup(|name| match name {
            API_KEY_ENV => Some("abc123".to_string()),
            BASE_URL_ENV => Some("http://localhost:9000".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");

        assert_eq!(
            GiphyClient::from_lookup(|name| (name == API_KEY_ENV).then(String::new)).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/stickers/search"))
            .and(query_param("api_key", "abc123"))
            .and(query_param("q", "cats"))
            .and(query_param("rating", "pg-13"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "sticker-1"}],
                "pagination": {"count": 1, "offset": 0}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GiphyClient::builder()
            .api_key("abc123")
            .base_url(mock_server.uri())
            .build()
            .unwrap();

        let body = client
            .search(
                MediaType::Stickers,
                &SearchParams::new("cats").with_rating(Rating::Pg13),
            )
            .await
            .unwrap();

        assert_eq!(body["data"][0]["id"], "sticker-1");
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = GiphyClient::builder()
            .api_key("abc123")
            .base_url(mock_server.uri())
            .build()
            .unwrap();

        let (a, b, c) = tokio::join!(
            client
                .trending(MediaType::Gifs, &TrendingParams::default())
                .send(),
            client.categories(&CategoriesParams::default()).send(),
            client.term_suggestions("cat").send(),
        );

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_api_key_is_normalized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/gifs/random"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "Invalid API key"})),
            )
            .mount(&mock_server)
            .await;

        let client = GiphyClient::builder()
            .api_key("wrong")
            .base_url(mock_server.uri())
            .build()
            .unwrap();

        let error = client
            .random(MediaType::Gifs, &RandomParams::default().with_tag("cat"))
            .await
            .unwrap_err();

        assert_eq!(error.operation(), Operation::Random);
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.message(), Some("Invalid API key"));
    }
}
