//! Per-course settings.
//!
//! Every course carries one JSON settings document. Components read and
//! write their own subtree of it through typed accessors; unset keys fall
//! back to the component's defaults.

pub mod document;
pub mod leaderboard;

pub use document::{cast_boolean, SettingsDocument};
pub use leaderboard::{LeaderboardComponent, LeaderboardSettings};
