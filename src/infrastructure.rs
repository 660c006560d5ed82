use serde_json::Value as JsonValue;
use std::future::Future;

use crate::error::Result;

pub mod catalog;

/// The upstream book catalog. Every call is a single request whose parsed
/// JSON body is returned untouched; callers normalize it.
///
/// The futures have to be Send because the HTTP handlers hold them across
/// awaits.
pub trait Catalog {
    fn lookup_by_code(&self, code: &str) -> impl Future<Output = Result<JsonValue>> + Send;

    /// `index` is one of `title`, `author` or `publisher`; anything else is
    /// rejected without contacting the catalog.
    fn search_books(
        &self,
        query: &str,
        index: &str,
        page: Option<&str>,
    ) -> impl Future<Output = Result<JsonValue>> + Send;

    fn search_by_subject(&self, query: &str) -> impl Future<Output = Result<JsonValue>> + Send;
}
