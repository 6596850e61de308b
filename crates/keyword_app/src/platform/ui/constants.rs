use std::time::Duration;

pub const APP_TITLE: &str = "Keyword Scout";

/// Upper bound on how long the loop waits for terminal input before ticking.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub const SEED_TITLE: &str = "Seed keyword";
pub const FILTER_TITLE: &str = "Filter";
pub const COPY_ALL_LABEL: &str = "Copy all";

pub const IDLE_HINT: &str = "Type a topic and press Enter to generate keyword ideas.";
pub const LOADING_HINT: &str = "Generating...";

pub const KEY_HINTS: &str =
    "Tab focus  Enter generate/copy  Ctrl+A copy all  Ctrl+S csv  Ctrl+J json  Esc quit";
