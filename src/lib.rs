//! giphy_client - Typed async client for the GIPHY API
//!
//! This library turns GIPHY operations (search, trending, translate, random,
//! lookups by id, categories and term suggestions) into GET requests and
//! returns the decoded JSON response.
//!
//! Every operation returns a [`PendingRequest`]. Await it for the result, or
//! hand it a completion callback with [`PendingRequest::on_complete`]. Both
//! report failures as a [`RequestError`].
//!
//! # Examples
//!
//! ```no_run
//! use giphy_client::{GiphyClient, IdsParams, MediaType, PageParams, TrendingParams};
//!
//! # async fn demo() -> Result<(), giphy_client::RequestError> {
//! let client = GiphyClient::new("my-api-key");
//!
//! let trending = client
//!     .trending(MediaType::Stickers, &TrendingParams::default().with_limit(10))
//!     .await?;
//! let gifs = client.gifs_by_ids(&IdsParams::new(["feqkVgjJpYtjy", "7rzbxdu0ZEXLy"])).await?;
//! let love = client
//!     .gifs_by_category("reactions", "love", &PageParams::default())
//!     .await?;
//! # let _ = (trending, gifs, love);
//! # Ok(())
//! # }
//! ```

mod client;
mod params;
mod request_executor;

pub use client::{
    API_KEY_ENV, BASE_URL_ENV, ClientBuilder, ConfigError, DEFAULT_BASE_URL, GiphyClient,
};
pub use params::{
    CategoriesParams, IdsParams, MediaType, PageParams, ParseParamError, QueryParams,
    RandomParams, Rating, SearchParams, TranslateParams, TrendingParams,
};
pub use request_executor::{
    ErrorKind, Operation, PendingRequest, RequestDescriptor, RequestError, RequestExecutor,
};
