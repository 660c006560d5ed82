use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use subject::subject_id_to_label;

pub mod subject;

/// Subject listings carry no page size of their own; the catalog pages
/// them by ten.
pub const SUBJECT_PAGE_SIZE: u64 = 10;

pub const SUBJECT_INDEX: &str = "subject";

/// Inbound parameters of a multi-book search, as received.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BooksQuery {
    pub query: Option<String>,
    pub index: Option<String>,
    pub page: Option<String>,
}

/// One book as the catalog describes it.
#[derive(Clone, Debug, Deserialize)]
pub struct RawBook {
    pub title: Option<String>,
    pub title_long: Option<String>,
    #[serde(default)]
    pub author_data: JsonValue,
    #[serde(default)]
    pub subject_ids: Vec<String>,
    pub publisher_name: Option<String>,
    pub physical_description_text: Option<String>,
    pub summary: Option<String>,
    pub edition_info: Option<String>,
    pub isbn10: Option<String>,
    pub isbn13: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BookLookupPayload {
    data: Vec<RawBook>,
}

#[derive(Debug, Deserialize)]
struct BookListPayload {
    data: Vec<RawBook>,
    page_count: JsonValue,
    result_count: JsonValue,
    current_page: JsonValue,
}

#[derive(Debug, Deserialize)]
struct SubjectPayload {
    data: Vec<RawSubject>,
}

#[derive(Debug, Deserialize)]
struct RawSubject {
    books_count: JsonValue,
    book_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookRecord {
    pub title: Option<String>,
    pub title_long: Option<String>,
    pub author_data: JsonValue,
    pub subjects: Vec<String>,
    pub publisher_name: Option<String>,
    pub physical_description_text: Option<String>,
    pub summary: Option<String>,
    pub edition_info: Option<String>,
    pub isbn10: Option<String>,
    pub isbn13: Option<String>,
}

/// Pagination figures are handed on exactly as the catalog sent them,
/// strings included.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookSearchResult {
    pub books: Vec<BookRecord>,
    pub page_count: JsonValue,
    pub result_count: JsonValue,
    pub current_page: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubjectBook {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubjectSearchResult {
    pub books_count: JsonValue,
    pub page_count: u64,
    pub books: Vec<SubjectBook>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BooksResult {
    Books(BookSearchResult),
    Subjects(SubjectSearchResult),
}

pub fn normalize_book(
    RawBook {
        title,
        title_long,
        author_data,
        subject_ids,
        publisher_name,
        physical_description_text,
        summary,
        edition_info,
        isbn10,
        isbn13,
    }: RawBook,
) -> BookRecord {
    BookRecord {
        title,
        title_long,
        author_data,
        subjects: subject_ids
            .iter()
            .map(|id| subject_id_to_label(id))
            .collect(),
        publisher_name,
        physical_description_text,
        summary,
        edition_info,
        isbn10,
        isbn13,
    }
}

/// A lookup by code answers with a one element `data` list.
pub fn normalize_book_lookup(payload: JsonValue) -> Result<BookRecord> {
    let BookLookupPayload { data } = serde_json::from_value(payload)?;
    data.into_iter()
        .next()
        .map(normalize_book)
        .ok_or_else(|| Error::MalformedPayload("book lookup returned no data".to_owned()))
}

pub fn normalize_book_list(payload: JsonValue) -> Result<BookSearchResult> {
    let BookListPayload {
        data,
        page_count,
        result_count,
        current_page,
    } = serde_json::from_value(payload)?;

    Ok(BookSearchResult {
        books: data.into_iter().map(normalize_book).collect(),
        page_count,
        result_count,
        current_page,
    })
}

pub fn normalize_subject_result(payload: JsonValue) -> Result<SubjectSearchResult> {
    let SubjectPayload { data } = serde_json::from_value(payload)?;
    let RawSubject {
        books_count,
        book_ids,
    } = data
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedPayload("subject search returned no data".to_owned()))?;

    let page_count = parse_count(&books_count)? / SUBJECT_PAGE_SIZE;
    let books = book_ids
        .into_iter()
        .map(|id| SubjectBook {
            title: subject_id_to_label(&id),
            id,
        })
        .collect();

    Ok(SubjectSearchResult {
        books_count,
        page_count,
        books,
    })
}

// The catalog is inconsistent about quoting its numbers.
fn parse_count(count: &JsonValue) -> Result<u64> {
    match count {
        JsonValue::Number(number) => number.as_u64(),
        JsonValue::String(text) => text.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::MalformedPayload(format!("books_count `{count}` is not a count")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_book(subject_ids: &[&str]) -> JsonValue {
        json!({
            "title": "Extreme programming explained",
            "title_long": "Extreme programming explained: embrace change",
            "author_data": [{"id": "beck_kent", "name": "Beck, Kent"}],
            "subject_ids": subject_ids,
            "publisher_name": "Addison-Wesley",
            "physical_description_text": "xxi, 190 p. ; 24 cm.",
            "summary": "",
            "edition_info": "(pbk.)",
            "isbn10": "0201616416",
            "isbn13": "9780201616415",
            "dewey_decimal": "005.1",
        })
    }

    #[test]
    fn normalize_book_labels_subjects_in_order() {
        let raw: RawBook = serde_json::from_value(raw_book(&["a_b", "c"])).unwrap();
        let book = normalize_book(raw);

        assert_eq!(book.subjects, vec!["A B", "C"]);
        assert_eq!(book.title.as_deref(), Some("Extreme programming explained"));
        assert_eq!(book.isbn13.as_deref(), Some("9780201616415"));
        assert_eq!(
            book.author_data,
            json!([{"id": "beck_kent", "name": "Beck, Kent"}])
        );
    }

    #[test]
    fn normalize_book_lookup_takes_first_entry() {
        let payload = json!({
            "index_searched": "isbn",
            "data": [raw_book(&["computer_software_development"])],
        });
        let book = normalize_book_lookup(payload).unwrap();

        assert!(book
            .subjects
            .contains(&"Computer Software Development".to_owned()));
    }

    #[test]
    fn normalize_book_lookup_without_data_is_malformed() {
        let error = normalize_book_lookup(json!({ "data": [] })).unwrap_err();
        assert!(matches!(error, Error::MalformedPayload(..)));
        assert_eq!(error.status(), 500);
    }

    #[test]
    fn normalize_book_list_passes_pagination_through() {
        let payload = json!({
            "page_count": 28,
            "result_count": "276",
            "current_page": "3",
            "data": [raw_book(&["x"]), raw_book(&["y_z"])],
        });
        let result = normalize_book_list(payload).unwrap();

        assert_eq!(result.books.len(), 2);
        assert_eq!(result.books[1].subjects, vec!["Y Z"]);
        assert_eq!(result.page_count, json!(28));
        assert_eq!(result.result_count, json!("276"));
        assert_eq!(result.current_page, json!("3"));
    }

    #[test]
    fn normalize_subject_result_counts_pages_of_ten() {
        let payload = json!({
            "data": [{
                "books_count": "127",
                "book_ids": ["a_history_of_disease", "germs"],
            }]
        });
        let result = normalize_subject_result(payload).unwrap();

        assert_eq!(result.books_count, json!("127"));
        assert_eq!(result.page_count, 12);
        assert_eq!(
            result.books,
            vec![
                SubjectBook {
                    id: "a_history_of_disease".to_owned(),
                    title: "A History Of Disease".to_owned(),
                },
                SubjectBook {
                    id: "germs".to_owned(),
                    title: "Germs".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn normalize_subject_result_accepts_numeric_count() {
        let payload = json!({ "data": [{ "books_count": 9, "book_ids": [] }] });
        let result = normalize_subject_result(payload).unwrap();

        assert_eq!(result.books_count, json!(9));
        assert_eq!(result.page_count, 0);
    }

    #[test]
    fn normalize_subject_result_rejects_non_numeric_count() {
        let payload = json!({ "data": [{ "books_count": "many", "book_ids": [] }] });
        let error = normalize_subject_result(payload).unwrap_err();
        assert!(matches!(error, Error::MalformedPayload(..)));
    }

    #[test]
    fn book_results_serialize_without_a_tag() {
        let result = BooksResult::Subjects(SubjectSearchResult {
            books_count: json!(10),
            page_count: 1,
            books: vec![],
        });
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({ "books_count": 10, "page_count": 1, "books": [] })
        );
    }
}
