use std::time::Duration;

/// How long a toast stays fully visible.
pub const TOAST_DISPLAY: Duration = Duration::from_millis(2000);
/// Length of the fade-out that follows the display period.
pub const TOAST_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    age: Duration,
}

impl Toast {
    pub fn is_fading(&self) -> bool {
        self.age >= TOAST_DISPLAY
    }

    fn is_expired(&self) -> bool {
        self.age >= TOAST_DISPLAY + TOAST_FADE
    }
}

/// Independent, stacked notifications. No dedup, no queueing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStack {
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            age: Duration::ZERO,
        });
        id
    }

    /// Ages every toast and drops the expired ones. Returns true when the
    /// visible set changed (a toast started fading or was removed).
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let mut changed = false;
        for toast in &mut self.toasts {
            let was_fading = toast.is_fading();
            toast.age = toast.age.saturating_add(elapsed);
            changed |= toast.is_fading() != was_fading;
        }
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired());
        changed || self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
