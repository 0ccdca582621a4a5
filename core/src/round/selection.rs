use serde::{Deserialize, Serialize};

use super::{Role, RoundError, RoundPhase};
use crate::types::PlayerId;

/// The winner and drawer picked for the round in progress. A player can hold
/// at most one of the two roles; everyone else on the roster loses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct RoundSelection {
    winner: Option<PlayerId>,
    drawer: Option<PlayerId>,
}

/// How a player is marked in the round-result picker.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct PlayerStatus {
    pub is_winner: bool,
    pub is_drawer: bool,
    /// Only set once a winner has been chosen.
    pub is_loser: bool,
    /// Another player is already the winner.
    pub winner_disabled: bool,
    /// Another player is already the drawer.
    pub drawer_disabled: bool,
}

impl RoundSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn winner(&self) -> Option<&'_ PlayerId> {
        self.winner.as_ref()
    }

    pub fn drawer(&self) -> Option<&'_ PlayerId> {
        self.drawer.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.winner.is_none() && self.drawer.is_none()
    }

    pub fn phase(&self) -> RoundPhase {
        match (&self.winner, &self.drawer) {
            (None, None) => RoundPhase::Idle,
            (Some(_), None) => RoundPhase::WinnerChosen,
            (None, Some(_)) => RoundPhase::DrawerChosen,
            (Some(_), Some(_)) => RoundPhase::WinnerAndDrawerChosen,
        }
    }

    /// Make `player_id` the winner, or clear the winner if they already are.
    /// A previously chosen winner is replaced. Fails if `player_id` is the
    /// drawer.
    pub fn toggle_winner(&self, player_id: &PlayerId) -> Result<Self, RoundError> {
        if self.drawer.as_ref() == Some(player_id) {
            return Err(RoundError::ConflictingRole {
                player: player_id.clone(),
                held: Role::Drawer,
            });
        }
        Ok(Self {
            winner: toggled(&self.winner, player_id),
            drawer: self.drawer.clone(),
        })
    }

    /// Make `player_id` the drawer, or clear the drawer if they already are.
    /// Fails if `player_id` is the winner.
    pub fn toggle_drawer(&self, player_id: &PlayerId) -> Result<Self, RoundError> {
        if self.winner.as_ref() == Some(player_id) {
            return Err(RoundError::ConflictingRole {
                player: player_id.clone(),
                held: Role::Winner,
            });
        }
        Ok(Self {
            winner: self.winner.clone(),
            drawer: toggled(&self.drawer, player_id),
        })
    }

    /// The role `player_id` would play if the round were resolved now.
    /// `None` until a winner is chosen, unless they are the drawer.
    pub fn role_of(&self, player_id: &PlayerId) -> Option<Role> {
        if self.winner.as_ref() == Some(player_id) {
            Some(Role::Winner)
        } else if self.drawer.as_ref() == Some(player_id) {
            Some(Role::Drawer)
        } else if self.winner.is_some() {
            Some(Role::Loser)
        } else {
            None
        }
    }

    pub fn status(&self, player_id: &PlayerId) -> PlayerStatus {
        let role = self.role_of(player_id);
        let is_winner = role == Some(Role::Winner);
        let is_drawer = role == Some(Role::Drawer);
        PlayerStatus {
            is_winner,
            is_drawer,
            is_loser: role == Some(Role::Loser),
            winner_disabled: self.winner.is_some() && !is_winner,
            drawer_disabled: self.drawer.is_some() && !is_drawer,
        }
    }
}

fn toggled(current: &Option<PlayerId>, player_id: &PlayerId) -> Option<PlayerId> {
    match current {
        Some(c) if c == player_id => None,
        _ => Some(player_id.clone()),
    }
}
