//! Background Tasks Module
//!
//! Contains the background tasks a cache instance owns.
//!
//! # Tasks
//! - Reaper: removes stale cache entries once per cache interval

mod reaper;

pub use reaper::spawn_reaper;
