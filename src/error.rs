use thiserror::Error;

/// Errors produced while talking to the browser or acting on extracted links
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The page belongs to a privileged scheme and must never be scripted
    #[error("Scripting denied for {url}")]
    ScriptingDenied { url: String },

    /// Injection ran but produced nothing usable
    #[error("Link extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Failed to write to clipboard: {0}")]
    ClipboardWriteFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BrowserError>;
