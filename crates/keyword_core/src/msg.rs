use std::time::Duration;

use crate::ExportKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the seed keyword input.
    SeedInputChanged(String),
    /// User submitted the seed form.
    GenerateSubmitted,
    /// Engine finished a generation round trip.
    GenerateFinished(Result<Vec<String>, GenerateFailure>),
    /// User edited the filter input (every keystroke).
    FilterChanged(String),
    /// User clicked one of the export controls.
    DownloadClicked(ExportKind),
    /// Engine finished an export round trip. `Ok` carries the saved location.
    DownloadFinished {
        kind: ExportKind,
        result: Result<String, String>,
    },
    /// User clicked "copy all".
    CopyAllClicked,
    /// User clicked a displayed keyword (index into the filtered projection).
    ItemClicked(usize),
    /// Time elapsed since the previous tick.
    Tick(Duration),
}

/// Why a generation round trip did not yield a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateFailure {
    /// The server answered but reported failure, or the body was malformed.
    Service { message: Option<String> },
    /// The request never produced a response.
    Transport { message: String },
}

pub(crate) const GENERIC_GENERATE_ERROR: &str = "An error occurred while generating keywords";

impl GenerateFailure {
    pub fn display_message(&self) -> String {
        match self {
            GenerateFailure::Service { message: Some(m) } => m.clone(),
            GenerateFailure::Service { message: None } => GENERIC_GENERATE_ERROR.to_string(),
            GenerateFailure::Transport { message } => format!("Network error: {message}"),
        }
    }
}
