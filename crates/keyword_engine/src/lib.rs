//! Keyword scout engine: HTTP round trips, payload persistence and clipboard IO.
mod client;
mod clipboard;
mod engine;
mod filename;
mod persist;
mod types;

pub use client::{ClientSettings, KeywordService, ReqwestKeywordService, DEFAULT_BASE_URL};
pub use clipboard::{
    ClipboardBackend, ClipboardError, ClipboardUtility, CopyOutcome, SystemClipboard,
    TerminalClipboard,
};
pub use engine::{EngineError, EngineHandle};
pub use filename::download_filename;
pub use persist::{DownloadSaver, PersistError};
pub use types::{
    DownloadRequest, EngineEvent, ExportError, ExportFormat, FailureKind, GenerateRequest,
    HealthStatus, ServiceError,
};
