// Screen layout for the draft room.
//
// +--------------------------------------------------+
// | Header (3 rows): league, live badge, on the clock |
// +--------------------------------------------------+
// | Toolbar (1 row): view tabs | team carousel        |
// +-------------------------+------------------------+
// | Main (fill)              | Market sidebar (40%)   |
// |  roster | pitch, or board|  (optional)            |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone of the draft room.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    pub toolbar: Rect,
    /// Roster/pitch or board.
    pub main: Rect,
    /// Market list. `None` when the sidebar is closed.
    pub sidebar: Option<Rect>,
    pub help_bar: Rect,
}

/// Build the draft-room layout from the available terminal area.
pub fn build_layout(area: Rect, sidebar_open: bool) -> AppLayout {
    // Vertical: header(3) | toolbar(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let middle = vertical[2];
    let (main, sidebar) = if sidebar_open {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(middle);
        (horizontal[0], Some(horizontal[1]))
    } else {
        (middle, None)
    };

    AppLayout {
        header: vertical[0],
        toolbar: vertical[1],
        main,
        sidebar,
        help_bar: vertical[3],
    }
}

/// Split the main area into the roster list (left) and the pitch (right).
pub fn split_main(main: Rect) -> (Rect, Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main);
    (halves[0], halves[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
