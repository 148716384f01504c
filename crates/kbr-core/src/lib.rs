// Library root: data contracts, the draft API client, and the pure
// derivations (market, roster, board) shared by the terminal front end.

pub mod api;
pub mod config;
pub mod draft;
pub mod export;
pub mod logo;
pub mod market;
