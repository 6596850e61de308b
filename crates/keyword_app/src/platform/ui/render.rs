use keyword_core::{AppViewModel, Phase, ResultList};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::constants::{
    APP_TITLE, COPY_ALL_LABEL, FILTER_TITLE, IDLE_HINT, KEY_HINTS, LOADING_HINT, SEED_TITLE,
};
use super::input::{Focus, UiState};
use super::layout::{self, Areas};

pub fn draw(frame: &mut Frame, view: &AppViewModel, ui: &UiState, server: &str) {
    let areas = layout::split(frame.area());

    draw_header(frame, areas.header, view, server);
    draw_input(frame, areas.seed, SEED_TITLE, &view.seed_input, ui.focus == Focus::Seed);
    draw_button(frame, areas.generate, view.generate_label, view.submit_enabled);
    draw_input(
        frame,
        areas.filter,
        FILTER_TITLE,
        &view.filter_query,
        ui.focus == Focus::Filter,
    );
    draw_count(frame, areas.count, view);
    draw_results(frame, areas.results, view, ui);
    draw_actions(frame, &areas, view);
    draw_status(frame, areas.status, view);
    frame.render_widget(
        Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
        areas.hints,
    );
    draw_toasts(frame, areas.status.y, view);

    place_cursor(frame, &areas, view, ui.focus);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &AppViewModel, server: &str) {
    let mut spans = vec![
        Span::styled(
            format!(" {APP_TITLE} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(server.to_string(), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(seed) = &view.current_seed {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("topic: {seed}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, text: &str, focused: bool) {
    let block = Block::bordered()
        .title(title.to_string())
        .border_style(focus_style(focused));
    frame.render_widget(Paragraph::new(text.to_string()).block(block), area);
}

fn draw_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(label.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_style(style)),
        area,
    );
}

fn draw_count(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let text = if view.results_visible {
        format!("{} keywords", view.count)
    } else {
        String::new()
    };
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        area,
    );
}

fn draw_results(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let block = Block::bordered()
        .title("Results")
        .border_style(focus_style(ui.focus == Focus::Results));

    if !view.results_visible {
        let hint = match view.phase {
            Phase::Loading => LOADING_HINT,
            Phase::Idle => IDLE_HINT,
            Phase::Error | Phase::Results => "",
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    match &view.list {
        ResultList::Placeholder(text) => frame.render_widget(
            Paragraph::new(*text)
                .style(Style::default().add_modifier(Modifier::ITALIC))
                .block(block),
            area,
        ),
        ResultList::Items(items) => {
            let rows: Vec<ListItem> = items
                .iter()
                .map(|item| ListItem::new(item.text.as_str()))
                .collect();
            let list = List::new(rows)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            if ui.focus == Focus::Results {
                state.select(Some(ui.selected));
            }
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn draw_actions(frame: &mut Frame, areas: &Areas, view: &AppViewModel) {
    for (control, area) in view.downloads.iter().zip(areas.actions) {
        draw_button(frame, area, &control.label, control.enabled);
    }
    let copy_enabled = view.results_visible && view.count > 0;
    draw_button(frame, areas.actions[2], COPY_ALL_LABEL, copy_enabled);
}

fn draw_status(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    if let Some(error) = &view.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            area,
        );
    }
}

/// Stacked notifications, newest last; fading ones are dimmed.
fn draw_toasts(frame: &mut Frame, bottom: u16, view: &AppViewModel) {
    let width = view
        .toasts
        .iter()
        .map(|toast| toast.message.chars().count())
        .max()
        .unwrap_or(0);
    let Some(area) = layout::toast_area(frame.area(), bottom, view.toasts.len(), width) else {
        return;
    };

    let lines: Vec<Line> = view
        .toasts
        .iter()
        .map(|toast| {
            let style = if toast.fading {
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
            } else {
                Style::default().fg(Color::Green)
            };
            Line::styled(toast.message.clone(), style)
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::Green))),
        area,
    );
}

fn place_cursor(frame: &mut Frame, areas: &Areas, view: &AppViewModel, focus: Focus) {
    let (area, text) = match focus {
        Focus::Seed => (areas.seed, view.seed_input.as_str()),
        Focus::Filter => (areas.filter, view.filter_query.as_str()),
        Focus::Results => return,
    };
    let inner_width = area.width.saturating_sub(2);
    if inner_width == 0 || area.height < 3 {
        return;
    }
    let offset = u16::try_from(text.chars().count())
        .unwrap_or(u16::MAX)
        .min(inner_width - 1);
    frame.set_cursor_position(Position::new(area.x + 1 + offset, area.y + 1));
}
