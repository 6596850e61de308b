use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Path segment of the export endpoint, also used as the file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest<'a> {
    pub keyword: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest<'a> {
    pub keyword: &'a str,
    pub keywords: &'a [String],
}

/// Body of `/api/generate`. Both the success and the failure shape decode
/// into this; unknown fields such as a server traceback are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    pub keywords: Option<Vec<String>>,
    pub error: Option<String>,
}

/// Fallback decode used when the full shape does not match.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerateFinished {
        keyword: String,
        result: Result<Vec<String>, ServiceError>,
    },
    DownloadFinished {
        format: ExportFormat,
        result: Result<PathBuf, ExportError>,
    },
    HealthChecked(Result<HealthStatus, ServiceError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Message the server itself supplied, if it rejected the request with one.
    pub fn server_reason(&self) -> Option<&str> {
        match &self.kind {
            FailureKind::Rejected { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// True when a response was received (as opposed to a transport failure).
    pub fn is_rejection(&self) -> bool {
        matches!(self.kind, FailureKind::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Encode,
    /// The server answered but did not deliver a usable result.
    Rejected { status: u16, reason: Option<String> },
    Network,
    /// The worker dropped the request before it completed.
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Encode => write!(f, "request encoding failed"),
            FailureKind::Rejected { status, .. } => write!(f, "rejected (http status {status})"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Aborted => write!(f, "aborted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("{}", .0.message)]
    Transport(ServiceError),
    #[error("{0}")]
    Save(String),
}
