use serde::{Deserialize, Serialize};

use crate::core::model as domain;

/// `/books` query parameters. A repeated parameter keeps its last value,
/// unknown ones are ignored.
#[derive(Debug, Default, PartialEq)]
pub struct BooksParams {
    pub q: Option<String>,
    pub index: Option<String>,
    pub page: Option<String>,
}

impl FromIterator<(String, String)> for BooksParams {
    fn from_iter<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |mut params, (name, value)| {
                match name.as_str() {
                    "q" => params.q = Some(value),
                    "index" => params.index = Some(value),
                    "page" => params.page = Some(value),
                    _ => {}
                }
                params
            })
    }
}

impl From<BooksParams> for domain::BooksQuery {
    fn from(BooksParams { q, index, page }: BooksParams) -> Self {
        Self {
            query: q,
            index,
            page,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}
