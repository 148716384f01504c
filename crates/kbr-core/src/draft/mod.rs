// Draft data as served by the backend, plus read-only views derived from it.

pub mod board;
pub mod player;
pub mod roster;
pub mod state;
