use reqwest::{Client, StatusCode, Url};
use serde_json::Value as JsonValue;
use std::{str::FromStr, time::Duration};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    infrastructure::Catalog,
};

pub const DEFAULT_CATALOG_URL: &str = "http://isbndb.com/api/v2/json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct CatalogClientConfig {
    pub catalog_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl CatalogClientConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            api_key: api_key.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fields a multi-book search can be run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchIndex {
    Title,
    Author,
    Publisher,
}

impl SearchIndex {
    /// The catalog's `i` parameter. Titles are its default index.
    fn catalog_field(&self) -> Option<&'static str> {
        match self {
            SearchIndex::Title => None,
            SearchIndex::Author => Some("author_name"),
            SearchIndex::Publisher => Some("publisher_name"),
        }
    }
}

impl FromStr for SearchIndex {
    type Err = Error;

    fn from_str(index: &str) -> Result<Self> {
        match index {
            "title" => Ok(SearchIndex::Title),
            "author" => Ok(SearchIndex::Author),
            "publisher" => Ok(SearchIndex::Publisher),
            _ => Err(Error::validation("Invalid search index")),
        }
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> Result<Self> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        let base_url = Url::parse(&config.catalog_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidCatalogUrl(config.catalog_url.clone()))?;

        Ok(Self {
            http_client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// GETs `segments` below the keyed catalog root and hands back its JSON
    /// body.
    ///
    /// Anything but a 200 is a transport failure. A 200 whose body carries
    /// an `error` member is a failure too, see
    /// [`Error::from_upstream_message`].
    pub async fn fetch_json(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<JsonValue> {
        // The key is part of the path, keep it out of the logs.
        let path = segments.join("/");
        let path = path.as_str();
        debug!(path, ?query, "requesting catalog");

        let request = self
            .http_client
            .get(self.resolve_resource_uri(segments)?)
            .query(query)
            .build()?;

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| {
                warn!(path, %error, "catalog unreachable");
                Error::UpstreamTransport
            })?;

        if response.status() != StatusCode::OK {
            warn!(path, status = %response.status(), "catalog request failed");
            return Err(Error::UpstreamTransport);
        }

        let body = response.bytes().await.map_err(|error| {
            warn!(path, %error, "catalog response interrupted");
            Error::UpstreamTransport
        })?;
        let payload: JsonValue = serde_json::from_slice(&body)?;

        if let Some(error) = payload.get("error") {
            let message = match error {
                JsonValue::String(message) => message.clone(),
                otherwise => otherwise.to_string(),
            };
            warn!(path, %message, "catalog reported an error");
            return Err(Error::from_upstream_message(message));
        }

        Ok(payload)
    }

    /// Each segment is percent-encoded on its own, so a `/`, `?` or `#`
    /// in a code or subject stays inside its segment.
    fn resolve_resource_uri(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidCatalogUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&self.api_key)
            .extend(segments);
        Ok(url)
    }
}

impl Catalog for CatalogClient {
    async fn lookup_by_code(&self, code: &str) -> Result<JsonValue> {
        self.fetch_json(&["book", code], &[]).await
    }

    async fn search_books(
        &self,
        query: &str,
        index: &str,
        page: Option<&str>,
    ) -> Result<JsonValue> {
        let index: SearchIndex = index.parse()?;

        let mut params = vec![("q", query)];
        if let Some(field) = index.catalog_field() {
            params.push(("i", field));
        }
        // Handed on as given, the catalog decides what a page is.
        if let Some(page) = page.filter(|page| !page.is_empty()) {
            params.push(("p", page));
        }

        self.fetch_json(&["books"], &params).await
    }

    async fn search_by_subject(&self, query: &str) -> Result<JsonValue> {
        let subject = query.to_lowercase();
        self.fetch_json(&["subject", subject.as_str()], &[]).await
    }
}
