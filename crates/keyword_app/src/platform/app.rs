use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyEvent};
use keyword_core::{update, AppState, AppViewModel, Msg};
use keyword_engine::{ClientSettings, ClipboardUtility, EngineHandle, ReqwestKeywordService};
use keyword_logging::{kw_error, kw_info};
use ratatui::{backend::Backend, Terminal};

use super::effects::EffectRunner;
use super::ui;
use super::ui::input::{KeyAction, UiState};
use crate::settings::Settings;

pub fn run_app(settings: Settings) -> anyhow::Result<()> {
    let service = ReqwestKeywordService::new(ClientSettings {
        base_url: settings.server.clone(),
    })
    .with_context(|| format!("Invalid server address {}", settings.server))?;
    kw_info!(
        "Starting against {} (downloads to {})",
        service.base_url(),
        settings.download_dir.display()
    );
    let server = service.base_url().to_string();

    let engine = EngineHandle::new(Arc::new(service), settings.download_dir)?;
    let runner = EffectRunner::new(engine, ClipboardUtility::system());
    runner.check_health();

    let mut app = App::new(runner, server);

    // try_init also installs a panic hook that restores the terminal.
    let mut terminal = ratatui::try_init()?;
    let result = {
        let _restore = RestoreGuard::new(ratatui::restore);
        app.run(&mut terminal)
    };

    if let Err(err) = &result {
        kw_error!("Event loop failed: {:#}", err);
    }
    result
}

/// Runs `restore` when dropped, on normal exit, early return and unwind alike.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

struct App {
    state: AppState,
    view: AppViewModel,
    ui: UiState,
    runner: EffectRunner,
    server: String,
    needs_redraw: bool,
    should_quit: bool,
}

impl App {
    fn new(runner: EffectRunner, server: String) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            ui: UiState::default(),
            runner,
            server,
            needs_redraw: true,
            should_quit: false,
        }
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();
        while !self.should_quit {
            if self.needs_redraw {
                self.ui.clamp_selection(self.view.list.len());
                terminal.draw(|frame| ui::render::draw(frame, &self.view, &self.ui, &self.server))?;
                self.needs_redraw = false;
            }

            if let Some(event) = poll_event(ui::constants::POLL_INTERVAL)? {
                match event {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }

            for msg in self.runner.drain_events() {
                self.dispatch_msg(msg);
            }

            let now = Instant::now();
            let elapsed = now.duration_since(last_tick);
            last_tick = now;
            self.dispatch_msg(Msg::Tick(elapsed));
        }
        kw_info!("Quit requested");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::input::handle_key(&mut self.ui, &self.view, key) {
            KeyAction::Ignore => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Redraw => self.needs_redraw = true,
            KeyAction::Dispatch(msg) => self.dispatch_msg(msg),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);
        while let Some(msg) = pending.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            if state.consume_dirty() {
                self.view = state.view();
                self.needs_redraw = true;
            }
            self.state = state;
            pending.extend(self.runner.run(effects));
        }
    }
}

fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    use super::RestoreGuard;

    #[test]
    fn restore_runs_on_normal_exit() {
        let restored = Cell::new(0);
        {
            let _guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
        }
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn restore_runs_when_loop_returns_error() {
        let restored = Cell::new(false);
        let run = || -> anyhow::Result<()> {
            let _guard = RestoreGuard::new(|| restored.set(true));
            anyhow::bail!("draw failed")
        };
        assert!(run().is_err());
        assert!(restored.get());
    }

    #[test]
    fn restore_runs_when_loop_panics() {
        let restored = Cell::new(false);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = RestoreGuard::new(|| restored.set(true));
            panic!("render bug");
        }));
        assert!(outcome.is_err());
        assert!(restored.get());
    }
}
