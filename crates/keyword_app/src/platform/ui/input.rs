//! Key handling. Focus and list selection live here, outside the core state,
//! since they only matter to the terminal front end.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keyword_core::{AppViewModel, ExportKind, Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Seed,
    Filter,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Seed => Focus::Filter,
            Focus::Filter => Focus::Results,
            Focus::Results => Focus::Seed,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Seed => Focus::Results,
            Focus::Filter => Focus::Seed,
            Focus::Results => Focus::Filter,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub focus: Focus,
    pub selected: usize,
}

impl UiState {
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Ignore,
    Quit,
    /// Only front-end state changed.
    Redraw,
    Dispatch(Msg),
}

pub fn handle_key(ui: &mut UiState, view: &AppViewModel, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('a') if ctrl => return KeyAction::Dispatch(Msg::CopyAllClicked),
        KeyCode::Char('s') if ctrl => {
            return KeyAction::Dispatch(Msg::DownloadClicked(ExportKind::Csv))
        }
        KeyCode::Char('j') if ctrl => {
            return KeyAction::Dispatch(Msg::DownloadClicked(ExportKind::Json))
        }
        KeyCode::Tab => {
            ui.focus = ui.focus.next();
            return KeyAction::Redraw;
        }
        KeyCode::BackTab => {
            ui.focus = ui.focus.previous();
            return KeyAction::Redraw;
        }
        _ => {}
    }

    match ui.focus {
        Focus::Seed => match key.code {
            KeyCode::Enter => KeyAction::Dispatch(Msg::GenerateSubmitted),
            _ => edit_text(&view.seed_input, key)
                .map(|text| KeyAction::Dispatch(Msg::SeedInputChanged(text)))
                .unwrap_or(KeyAction::Ignore),
        },
        Focus::Filter => match key.code {
            KeyCode::Enter | KeyCode::Down => {
                ui.focus = Focus::Results;
                KeyAction::Redraw
            }
            _ => edit_text(&view.filter_query, key)
                .map(|text| KeyAction::Dispatch(Msg::FilterChanged(text)))
                .unwrap_or(KeyAction::Ignore),
        },
        Focus::Results => handle_results_key(ui, view, key.code),
    }
}

fn handle_results_key(ui: &mut UiState, view: &AppViewModel, code: KeyCode) -> KeyAction {
    let len = if view.results_visible { view.list.len() } else { 0 };
    if len == 0 {
        return KeyAction::Ignore;
    }
    let last = len - 1;
    let selected = match code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            return KeyAction::Dispatch(Msg::ItemClicked(ui.selected.min(last)));
        }
        KeyCode::Up => ui.selected.saturating_sub(1),
        KeyCode::Down => (ui.selected + 1).min(last),
        KeyCode::PageUp => ui.selected.saturating_sub(10),
        KeyCode::PageDown => (ui.selected + 10).min(last),
        KeyCode::Home => 0,
        KeyCode::End => last,
        _ => return KeyAction::Ignore,
    };
    ui.selected = selected;
    KeyAction::Redraw
}

/// Applies a single-line edit; `None` when the key does not change the text.
fn edit_text(current: &str, key: KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('u') if ctrl => (!current.is_empty()).then(String::new),
        KeyCode::Char(c) if !ctrl && !alt => {
            let mut text = current.to_string();
            text.push(c);
            Some(text)
        }
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop().map(|_| text)
        }
        _ => None,
    }
}
