use crate::{ExportKind, Phase, ResultList};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub phase: Phase,
    pub seed_input: String,
    pub filter_query: String,
    pub submit_enabled: bool,
    pub generate_label: &'static str,
    pub results_visible: bool,
    pub count: usize,
    pub list: ResultList,
    pub error: Option<String>,
    pub current_seed: Option<String>,
    pub downloads: Vec<DownloadControlView>,
    pub toasts: Vec<ToastView>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn download(&self, kind: ExportKind) -> Option<&DownloadControlView> {
        self.downloads.iter().find(|control| control.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadControlView {
    pub kind: ExportKind,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: u64,
    pub message: String,
    pub fading: bool,
}
