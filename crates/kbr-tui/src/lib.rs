// Library root: re-exports the controller, protocol and TUI so the binary
// and integration tests share one API.

pub mod app;
pub mod protocol;
pub mod tui;
