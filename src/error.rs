use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Error trying to request ISBNdb API")]
    UpstreamTransport,

    #[error("{message}")]
    UpstreamApplication { message: String, status: u16 },

    #[error("HTTP client failed {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog URL `{0}` cannot take path segments")]
    InvalidCatalogUrl(String),

    #[error("Failed to marshall json data {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected catalog payload: {0}")]
    MalformedPayload(String),

    #[error("IO error {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    pub const UNABLE_TO_LOCATE: &'static str = "Unable to locate";

    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_owned())
    }

    /// Classifies the `error` text of an otherwise successful catalog
    /// response. Lookups of unknown codes are reported by the catalog as
    /// "Unable to locate ..." and become a not-found.
    pub fn from_upstream_message(message: String) -> Self {
        let status = if message.contains(Self::UNABLE_TO_LOCATE) {
            404
        } else {
            500
        };
        Self::UpstreamApplication { message, status }
    }

    pub fn status(&self) -> u16 {
        match self {
            Error::Validation(..) => 400,
            Error::UpstreamApplication { status, .. } => *status,
            Error::UpstreamTransport
            | Error::Http(..)
            | Error::InvalidCatalogUrl(..)
            | Error::Json(..)
            | Error::MalformedPayload(..)
            | Error::IoError(..) => 500,
        }
    }
}

pub type Result<A> = std::result::Result<A, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unable_to_locate_is_not_found() {
        let error = Error::from_upstream_message("Unable to locate asdfg".to_owned());
        assert_eq!(error.status(), 404);
        assert_eq!(error.to_string(), "Unable to locate asdfg");
    }

    #[test]
    fn other_upstream_messages_are_internal() {
        let error = Error::from_upstream_message("Invalid api key: bad_key".to_owned());
        assert_eq!(error.status(), 500);
        assert_eq!(error.to_string(), "Invalid api key: bad_key");
    }

    #[test]
    fn transport_failure_has_fixed_message() {
        let error = Error::UpstreamTransport;
        assert_eq!(error.status(), 500);
        assert_eq!(error.to_string(), "Error trying to request ISBNdb API");
    }

    #[test]
    fn validation_is_bad_request() {
        let error = Error::validation("Invalid search index");
        assert_eq!(error.status(), 400);
        assert_eq!(error.to_string(), "Invalid search index");
    }
}
