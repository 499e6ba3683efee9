//! Typed request parameters
//!
//! Every GIPHY operation gets its own parameter structure listing the options
//! the API understands. Options not modelled here can still be passed through
//! the `extra` map of each structure.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the query parameter carrying the API key
pub(crate) const API_KEY_PARAM: &str = "api_key";

/// Errors that can occur while parsing parameter values from strings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseParamError {
    /// The value is not a known media type
    #[error("Unknown media type '{0}', expected 'gifs' or 'stickers'")]
    UnknownMediaType(String),

    /// The value is not a known content rating
    #[error("Unknown rating '{0}', expected one of y, g, pg, pg-13, r")]
    UnknownRating(String),
}

/// Selects between the two media families sharing the same endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// Animated GIFs
    #[default]
    Gifs,
    /// Stickers (GIFs with transparent backgrounds)
    Stickers,
}

impl MediaType {
    /// Path segment used in endpoint URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Gifs => "gifs",
            MediaType::Stickers => "stickers",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gifs" | "gif" => Ok(MediaType::Gifs),
            "stickers" | "sticker" => Ok(MediaType::Stickers),
            _ => Err(ParseParamError::UnknownMediaType(s.to_string())),
        }
    }
}

/// Content rating filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    /// Suitable for all ages, illustrated content
    Y,
    /// General audiences
    G,
    /// Parental guidance suggested
    Pg,
    /// Parents strongly cautioned
    Pg13,
    /// Restricted
    R,
}

impl Rating {
    /// Value as expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Y => "y",
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::Pg13 => "pg-13",
            Rating::R => "r",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "y" => Ok(Rating::Y),
            "g" => Ok(Rating::G),
            "pg" => Ok(Rating::Pg),
            "pg-13" | "pg13" => Ok(Rating::Pg13),
            "r" => Ok(Rating::R),
            _ => Err(ParseParamError::UnknownRating(s.to_string())),
        }
    }
}

/// Trait for parameter structures that contribute query pairs to a request
///
/// Implementors append their set options in a stable order. Unset options
/// are omitted entirely rather than sent as empty values.
pub trait QueryParams {
    /// Appends this structure's query pairs to `query`
    fn append_to(&self, query: &mut Vec<(String, String)>);
}

fn push<V: ToString>(query: &mut Vec<(String, String)>, name: &str, value: &Option<V>) {
    if let Some(value) = value {
        query.push((name.to_string(), value.to_string()));
    }
}

/// Appends pass-through parameters.
///
/// Names already present in `query` (typed options that are set, or the API
/// key) are skipped, as is anything named like the API key.
fn push_extra(query: &mut Vec<(String, String)>, extra: &BTreeMap<String, String>) {
    for (name, value) in extra {
        if name == API_KEY_PARAM || query.iter().any(|(existing, _)| existing == name) {
            continue;
        }
        query.push((name.clone(), value.clone()));
    }
}

/// Parameters for the search endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    /// Search query term or phrase
    pub q: String,
    /// Number of results to return (API maximum 100, default 25)
    pub limit: Option<u32>,
    /// Results offset (default 0)
    pub offset: Option<u32>,
    /// Limit results to the given rating
    pub rating: Option<Rating>,
    /// Two-letter ISO 639-1 language code for regional content
    pub lang: Option<String>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl SearchParams {
    /// Creates search parameters for the given query
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Sets the maximum number of results
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the results offset
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limits results to the given rating
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the language code for regional content
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for SearchParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        query.push(("q".to_string(), self.q.clone()));
        push(query, "limit", &self.limit);
        push(query, "offset", &self.offset);
        push(query, "rating", &self.rating);
        push(query, "lang", &self.lang);
        push_extra(query, &self.extra);
    }
}

/// Parameters for the trending endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingParams {
    /// Number of results to return (API maximum 100, default 25)
    pub limit: Option<u32>,
    /// Results offset (default 0)
    pub offset: Option<u32>,
    /// Limit results to the given rating
    pub rating: Option<Rating>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl TrendingParams {
    /// Sets the maximum number of results
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the results offset
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limits results to the given rating
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for TrendingParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        push(query, "limit", &self.limit);
        push(query, "offset", &self.offset);
        push(query, "rating", &self.rating);
        push_extra(query, &self.extra);
    }
}

/// Parameters for the translate endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateParams {
    /// Term or phrase to translate into a single GIF
    pub s: Option<String>,
    /// Limit results to the given rating
    pub rating: Option<Rating>,
    /// Two-letter ISO 639-1 language code for regional content
    pub lang: Option<String>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl TranslateParams {
    /// Creates translate parameters for the given phrase
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            s: Some(s.into()),
            ..Default::default()
        }
    }

    /// Limits results to the given rating
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the language code for regional content
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for TranslateParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        push(query, "s", &self.s);
        push(query, "rating", &self.rating);
        push(query, "lang", &self.lang);
        push_extra(query, &self.extra);
    }
}

/// Parameters for the random endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandomParams {
    /// Tag to limit randomness by
    pub tag: Option<String>,
    /// Limit results to the given rating
    pub rating: Option<Rating>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl RandomParams {
    /// Limits randomness to the given tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Limits results to the given rating
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for RandomParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        push(query, "tag", &self.tag);
        push(query, "rating", &self.rating);
        push_extra(query, &self.extra);
    }
}

/// Parameters for looking up several GIFs by id at once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdsParams {
    /// GIF ids, sent as a single comma-separated value
    pub ids: Vec<String>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl IdsParams {
    /// Creates lookup parameters for the given ids, preserving their order
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for IdsParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        // An empty id list is sent as an empty value, the API reports the problem
        query.push(("ids".to_string(), self.ids.join(",")));
        push_extra(query, &self.extra);
    }
}

/// Parameters for the category listing endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriesParams {
    /// Sort key for the returned categories
    pub sort: Option<String>,
    /// Number of categories to return
    pub limit: Option<u32>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl CategoriesParams {
    /// Sets the sort key
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the maximum number of results
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for CategoriesParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        push(query, "sort", &self.sort);
        push(query, "limit", &self.limit);
        push_extra(query, &self.extra);
    }
}

/// Pagination parameters shared by the subcategory and categorized listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageParams {
    /// Number of results to return (API maximum 100, default 25)
    pub limit: Option<u32>,
    /// Results offset (default 0)
    pub offset: Option<u32>,
    /// Additional parameters passed through as-is
    pub extra: BTreeMap<String, String>,
}

impl PageParams {
    /// Sets the maximum number of results
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the results offset
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Adds a pass-through parameter; ignored if it repeats a set option
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl QueryParams for PageParams {
    fn append_to(&self, query: &mut Vec<(String, String)>) {
        push(query, "limit", &self.limit);
        push(query, "offset", &self.offset);
        push_extra(query, &self.extra);
    }
}
