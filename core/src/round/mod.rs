//! Resolving a round: choosing a winner and optionally a drawer, then moving
//! points from every loser to the winner.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PlayerId;

pub mod deltas;
pub mod resolver;
pub mod selection;

#[cfg(test)]
mod tests_props;

pub use crate::config::STARTING_POINTS;
pub use deltas::{compute_deltas, preview, RoundDeltas};
pub use resolver::RoundResolver;
pub use selection::{PlayerStatus, RoundSelection};

/// Where a round is in its lifecycle, as seen by the resolver.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum RoundPhase {
    Idle,
    WinnerChosen,
    /// A drawer was picked before any winner.
    DrawerChosen,
    WinnerAndDrawerChosen,
    /// Deltas were applied to the roster. Any further interaction starts a
    /// new round from `Idle`.
    Applied,
}

/// The part a player plays in a round.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum Role {
    Winner,
    Drawer,
    Loser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Winner => "winner",
            Role::Drawer => "drawer",
            Role::Loser => "loser",
        })
    }
}

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundError {
    #[error("Player {player} is already the {held}")]
    ConflictingRole { player: PlayerId, held: Role },
    #[error("Invalid round: {0}")]
    InvalidRound(#[from] InvalidRound),
}

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvalidRound {
    #[error("a winner must be chosen")]
    NoWinner,
    #[error("at least two players are needed")]
    NotEnoughPlayers,
    #[error("player {0} is not on the roster")]
    UnknownPlayer(PlayerId),
    #[error("player {0}'s score would overflow")]
    ScoreOverflow(PlayerId),
}
