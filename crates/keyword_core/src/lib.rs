//! Keyword scout core: pure state machine, filtering and view-model helpers.
mod effect;
mod filter;
mod msg;
mod render;
mod state;
mod toast;
mod update;
mod view_model;

pub use effect::{Effect, ExportKind};
pub use filter::filter_keywords;
pub use msg::{GenerateFailure, Msg};
pub use render::{render_keywords, KeywordItem, ResultList, NO_RESULTS_TEXT};
pub use state::{AppState, Phase, Session};
pub use toast::{Toast, ToastStack, TOAST_DISPLAY, TOAST_FADE};
pub use update::update;
pub use view_model::{AppViewModel, DownloadControlView, ToastView};
