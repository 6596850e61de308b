use std::fmt;

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Generate {
        keyword: String,
    },
    Download {
        kind: ExportKind,
        keyword: String,
        keywords: Vec<String>,
    },
    CopyToClipboard {
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Csv,
    Json,
}

impl ExportKind {
    pub const ALL: [ExportKind; 2] = [ExportKind::Csv, ExportKind::Json];

    /// Lower-case form used in endpoint paths and file extensions.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Csv => "csv",
            ExportKind::Json => "json",
        }
    }

    pub(crate) fn idle_label(self) -> &'static str {
        match self {
            ExportKind::Csv => "Download CSV",
            ExportKind::Json => "Download JSON",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ExportKind::Csv => 0,
            ExportKind::Json => 1,
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
