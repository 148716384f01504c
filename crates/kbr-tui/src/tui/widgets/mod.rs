// TUI widget modules for each panel of the draft room.

pub mod alert;
pub mod board;
pub mod carousel;
pub mod confirm;
pub mod header;
pub mod help_bar;
pub mod market;
pub mod pitch;
pub mod player_card;
pub mod roster;
pub mod setup;
pub mod toolbar;

/// Flatten a TestBackend buffer into one string per row.
#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
