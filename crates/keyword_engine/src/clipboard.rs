//! Clipboard writes with a fallback path.
//!
//! The system clipboard is tried first. When it is unavailable (headless
//! session, missing display server) the text goes through a native copy tool
//! fed by a short-lived child process, and finally through an OSC 52 terminal
//! escape. Callers never see an error: failures are logged and reported as
//! [`CopyOutcome::Failed`].

use std::io::Write;
use std::process::{Command, Stdio};

use keyword_logging::{kw_debug, kw_error, kw_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard: {0}")]
    System(#[from] arboard::Error),
    #[error("terminal clipboard: {0}")]
    Terminal(String),
}

pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard using arboard. The handle is created lazily and kept
/// alive, since some platforms drop the contents with the owner.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(text.to_string())?;
        }
        Ok(())
    }
}

/// Legacy path: native copy tools, then the OSC 52 escape sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalClipboard;

impl ClipboardBackend for TerminalClipboard {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if try_native_tools(text) {
            return Ok(());
        }
        write_osc52(text)
    }
}

fn try_native_tools(text: &str) -> bool {
    let try_command = |cmd: &str, args: &[&str]| -> bool {
        Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .ok()
            .and_then(|mut child| {
                // Dropping stdin closes the pipe so the tool sees EOF.
                let written = child
                    .stdin
                    .take()
                    .map(|mut stdin| stdin.write_all(text.as_bytes()).is_ok())
                    .unwrap_or(false);
                let status = child.wait().ok()?;
                (written && status.success()).then_some(())
            })
            .is_some()
    };

    if std::env::var("WAYLAND_DISPLAY").is_ok() && try_command("wl-copy", &[]) {
        return true;
    }
    try_command("xclip", &["-selection", "clipboard"])
        || try_command("xsel", &["--clipboard", "--input"])
        || try_command("pbcopy", &[])
}

fn write_osc52(text: &str) -> Result<(), ClipboardError> {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);

    let sequence = if std::env::var("TMUX").is_ok() {
        format!("\x1bPtmux;\x1b\x1b]52;c;{encoded}\x07\x1b\\")
    } else {
        format!("\x1b]52;c;{encoded}\x07")
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(sequence.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|err| ClipboardError::Terminal(err.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    Failed,
}

pub struct ClipboardUtility {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl ClipboardUtility {
    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemClipboard::new()), Box::new(TerminalClipboard))
    }

    pub fn copy_text(&mut self, text: &str) -> CopyOutcome {
        match self.primary.set_text(text) {
            Ok(()) => {
                kw_debug!("Copied {} chars via {}", text.len(), self.primary.name());
                return CopyOutcome::Primary;
            }
            Err(err) => kw_warn!("Failed to copy via {}: {}", self.primary.name(), err),
        }

        match self.fallback.set_text(text) {
            Ok(()) => {
                kw_debug!("Copied {} chars via {}", text.len(), self.fallback.name());
                CopyOutcome::Fallback
            }
            Err(err) => {
                kw_error!("Fallback copy via {} failed: {}", self.fallback.name(), err);
                CopyOutcome::Failed
            }
        }
    }
}
