// src/utils/error.rs
use thiserror::Error;

use crate::wiki::models::EntityType;

// Request-level failures. Expected absences (unmatched dates, missing sections) are
// Option/empty results and never appear here.
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Bad request: {0}")]
    BadRequest(String), // Malformed id, language code, month or page, checked before any I/O

    #[error("{0} Not Found")]
    NotFound(String), // Origin reported the document as missing

    #[error("Only {expected} pages are supported. ({detected})")]
    UnsupportedType {
        detected: EntityType,
        expected: &'static str,
    },

    #[error("Translation failed: {0}")]
    TranslationFailure(String),

    #[error("Failed to fetch document: {0}")]
    Fetch(String),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),
}

impl WikiError {
    /// HTTP-style status class a presentation layer should report for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            WikiError::BadRequest(_) => 400,
            WikiError::NotFound(_) | WikiError::UnsupportedType { .. } => 404,
            _ => 500,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Wiki request failed: {0}")]
    Wiki(#[from] WikiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
