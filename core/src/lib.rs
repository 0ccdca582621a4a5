//! Score keeping for a party card game: a bounded roster of players and the
//! rules for settling a round between one winner, an optional drawer and the
//! losers.

pub mod config;
pub mod round;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{GameConfig, MAX_PLAYERS, STARTING_POINTS};
pub use round::{RoundError, RoundPhase, RoundResolver};
pub use store::RosterStore;
pub use types::{Player, PlayerId, PlayerInput, Roster, RosterError, RosterSnapshot};
