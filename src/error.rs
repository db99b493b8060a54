//! Error types

use thiserror::Error;

/// Failure to obtain the raw recipe table. Fatal to the initial load; the
/// browser keeps an empty repository afterwards.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("could not find the spreadsheet payload in the response")]
    Envelope,

    #[error("malformed spreadsheet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error on line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// The dispatcher task that owns the browser state has gone away.
#[derive(Debug, Error)]
#[error("recipe browser dispatcher has stopped")]
pub struct DispatchError;
