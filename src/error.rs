use std::{path::PathBuf, time::Duration};

use thirtyfour::error::WebDriverError;

use crate::services::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("There are no results matching \"{phrase}\"")]
    NoResults { phrase: String },

    #[error("Topic \"{name}\" is not listed in the topics filter")]
    CategoryNotFound { name: String },

    #[error("Failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: DownloadError,
    },

    #[error("Timed out after {timeout:?} waiting for {locator}")]
    Timeout { locator: String, timeout: Duration },

    #[error("Cannot move session from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },

    #[error("Failed to write workbook {}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: ExportError,
    },

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server answered with status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to save file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to prepare destination: {0}")]
    Io(#[from] std::io::Error),
}
