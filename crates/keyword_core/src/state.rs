use crate::filter::filter_keywords;
use crate::render::{render_keywords, KeywordItem, ResultList};
use crate::toast::ToastStack;
use crate::view_model::{AppViewModel, DownloadControlView, ToastView};
use crate::ExportKind;

pub(crate) const BUSY_LABEL: &str = "Preparing...";

/// Mutually exclusive UI mode; governs section visibility and submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error,
    Results,
}

/// The seed and the result set it produced. Only ever replaced as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    seed: Option<String>,
    results: Vec<String>,
}

impl Session {
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Seed and results for an export, or `None` when there is nothing to export.
    pub(crate) fn exportable(&self) -> Option<(&str, &[String])> {
        match self.seed.as_deref() {
            Some(seed) if !self.results.is_empty() => Some((seed, &self.results)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadControl {
    kind: ExportKind,
    label: String,
    enabled: bool,
    saved_label: Option<String>,
}

impl DownloadControl {
    fn new(kind: ExportKind) -> Self {
        Self {
            kind,
            label: kind.idle_label().to_string(),
            enabled: true,
            saved_label: None,
        }
    }

    fn mark_busy(&mut self) {
        let previous = std::mem::replace(&mut self.label, BUSY_LABEL.to_string());
        self.saved_label = Some(previous);
        self.enabled = false;
    }

    fn restore(&mut self) {
        if let Some(label) = self.saved_label.take() {
            self.label = label;
        }
        self.enabled = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    session: Session,
    seed_input: String,
    filter_query: String,
    pending_seed: Option<String>,
    phase: Phase,
    error: Option<String>,
    count: usize,
    list: ResultList,
    downloads: [DownloadControl; 2],
    toasts: ToastStack,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::default(),
            seed_input: String::new(),
            filter_query: String::new(),
            pending_seed: None,
            phase: Phase::Idle,
            error: None,
            count: 0,
            list: ResultList::default(),
            downloads: ExportKind::ALL.map(DownloadControl::new),
            toasts: ToastStack::default(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.phase == Phase::Loading;
        AppViewModel {
            phase: self.phase,
            seed_input: self.seed_input.clone(),
            filter_query: self.filter_query.clone(),
            submit_enabled: !loading,
            generate_label: if loading { "Generating..." } else { "Generate" },
            results_visible: self.phase == Phase::Results,
            count: self.count,
            list: self.list.clone(),
            error: self.error.clone(),
            current_seed: self.session.seed.clone(),
            downloads: self
                .downloads
                .iter()
                .map(|control| DownloadControlView {
                    kind: control.kind,
                    label: control.label.clone(),
                    enabled: control.enabled,
                })
                .collect(),
            toasts: self
                .toasts
                .iter()
                .map(|toast| ToastView {
                    id: toast.id,
                    message: toast.message.clone(),
                    fading: toast.is_fading(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_seed_input(&mut self, text: String) {
        if self.seed_input != text {
            self.seed_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn seed_input(&self) -> &str {
        &self.seed_input
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn begin_generation(&mut self, keyword: String) {
        self.phase = Phase::Loading;
        self.error = None;
        self.filter_query.clear();
        self.pending_seed = Some(keyword);
        self.mark_dirty();
    }

    pub(crate) fn take_pending_seed(&mut self) -> Option<String> {
        self.pending_seed.take()
    }

    pub(crate) fn accept_results(&mut self, seed: String, keywords: Vec<String>) {
        self.session = Session {
            seed: Some(seed),
            results: keywords,
        };
        // Fresh results are shown unfiltered.
        self.filter_query.clear();
        let (count, list) = render_keywords(&self.session.results);
        self.show_rendered(count, list);
    }

    pub(crate) fn reject_results(&mut self, message: String) {
        self.session = Session::default();
        let (count, list) = render_keywords(&self.session.results);
        self.count = count;
        self.list = list;
        self.phase = Phase::Error;
        self.error = Some(message);
        self.mark_dirty();
    }

    /// Re-renders the filtered projection. The result set is left untouched.
    pub(crate) fn apply_filter(&mut self, query: String) {
        let filtered = filter_keywords(&self.session.results, &query);
        self.filter_query = query;
        let (count, list) = render_keywords(&filtered);
        if self.phase == Phase::Loading {
            self.count = count;
            self.list = list;
            self.mark_dirty();
        } else {
            self.show_rendered(count, list);
        }
    }

    fn show_rendered(&mut self, count: usize, list: ResultList) {
        self.count = count;
        self.list = list;
        self.phase = Phase::Results;
        self.mark_dirty();
    }

    pub(crate) fn displayed_item(&self, index: usize) -> Option<&KeywordItem> {
        self.list.get(index)
    }

    pub(crate) fn download_enabled(&self, kind: ExportKind) -> bool {
        self.downloads[kind.index()].enabled
    }

    pub(crate) fn mark_download_busy(&mut self, kind: ExportKind) {
        self.downloads[kind.index()].mark_busy();
        self.mark_dirty();
    }

    pub(crate) fn restore_download(&mut self, kind: ExportKind) {
        self.downloads[kind.index()].restore();
        self.mark_dirty();
    }

    pub(crate) fn push_toast(&mut self, message: impl Into<String>) {
        self.toasts.push(message);
        self.mark_dirty();
    }

    pub(crate) fn advance_toasts(&mut self, elapsed: std::time::Duration) {
        if self.toasts.advance(elapsed) {
            self.mark_dirty();
        }
    }
}
