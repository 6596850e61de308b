use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub seed: Rect,
    pub generate: Rect,
    pub filter: Rect,
    pub count: Rect,
    pub results: Rect,
    pub actions: [Rect; 3],
    pub status: Rect,
    pub hints: Rect,
}

pub fn split(area: Rect) -> Areas {
    let [header, seed_row, filter_row, results, actions_row, status, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let [seed, generate] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(18)]).areas(seed_row);
    let [filter, count] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(18)]).areas(filter_row);
    let [csv, json, copy_all, _] = Layout::horizontal([
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Min(0),
    ])
    .areas(actions_row);

    Areas {
        header,
        seed,
        generate,
        filter,
        count,
        results,
        actions: [csv, json, copy_all],
        status,
        hints,
    }
}

/// Bottom-centre box for the toast stack, sitting just above `bottom`.
/// Returns `None` when there is nothing to show or no room.
pub fn toast_area(screen: Rect, bottom: u16, lines: usize, text_width: usize) -> Option<Rect> {
    if lines == 0 {
        return None;
    }
    let height = u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2);
    let width = u16::try_from(text_width)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(screen.width);
    let top = bottom.saturating_sub(height).max(screen.y);
    let height = height.min(bottom.saturating_sub(top));
    if width == 0 || height < 3 {
        return None;
    }
    let x = screen.x + (screen.width - width) / 2;
    Some(Rect::new(x, top, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let areas = split(Rect::new(0, 0, 100, 30));
        assert_eq!(areas.header.y, 0);
        assert_eq!(areas.seed.y, 1);
        assert_eq!(areas.filter.y, 4);
        assert_eq!(areas.results.y, 7);
        assert_eq!(areas.hints.y, 29);
        assert_eq!(areas.status.y, 28);
        assert_eq!(areas.results.height, 30 - 1 - 3 - 3 - 3 - 1 - 1);
        assert_eq!(areas.generate.width, 18);
    }

    #[test]
    fn toast_box_is_centred_above_bottom() {
        let screen = Rect::new(0, 0, 80, 24);
        let area = toast_area(screen, 22, 2, 20).unwrap();
        assert_eq!(area, Rect::new(28, 18, 24, 4));
    }

    #[test]
    fn toast_box_is_clamped_to_screen() {
        let screen = Rect::new(0, 0, 30, 6);
        let area = toast_area(screen, 5, 10, 200).unwrap();
        assert_eq!(area.width, 30);
        assert_eq!(area.y, 0);
        assert_eq!(area.height, 5);
        assert_eq!(toast_area(screen, 5, 0, 10), None);
    }
}
