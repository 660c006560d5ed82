use tracing::debug;

use crate::{
    error::{Error, Result},
    infrastructure::Catalog,
};
use model::{BookRecord, BooksQuery, BooksResult, SUBJECT_INDEX};

pub mod model;

/// Turns inbound requests into catalog calls and their answers into
/// [`model`] values. One catalog call per request, nothing is kept.
pub struct Application<C> {
    catalog: C,
}

impl<C> Application<C>
where
    C: Catalog,
{
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// `code` is an ISBN-10, an ISBN-13 or a catalog id. It is passed on
    /// as is; the catalog rejects what it does not know.
    pub async fn resolve_book_by_code(&self, code: &str) -> Result<BookRecord> {
        debug!(code, "book lookup");
        let payload = self.catalog.lookup_by_code(code).await?;
        model::normalize_book_lookup(payload)
    }

    pub async fn resolve_books_query(&self, query: BooksQuery) -> Result<BooksResult> {
        let BooksQuery { query, index, page } = query;

        let index = index.ok_or_else(|| Error::validation("Index must be in query params"))?;
        let query =
            query.ok_or_else(|| Error::validation("Query string (q) must be in query params"))?;

        debug!(%index, %query, ?page, "books search");
        if index == SUBJECT_INDEX {
            let payload = self.catalog.search_by_subject(&query).await?;
            Ok(BooksResult::Subjects(model::normalize_subject_result(payload)?))
        } else {
            let payload = self
                .catalog
                .search_books(&query, &index, page.as_deref())
                .await?;
            Ok(BooksResult::Books(model::normalize_book_list(payload)?))
        }
    }
}
