use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{Player, PlayerId, PlayerInput};
use crate::config::MAX_PLAYERS;

/// Player names longer than this (in bytes) are rejected.
pub const MAX_NAME_LENGTH: usize = 128;

/// The players in the current game, plus the bench of players who are known
/// but not currently playing.
///
/// Every mutation returns a new `Roster` and leaves `self` untouched, so a
/// rejected mutation never leaves a partially updated roster behind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Roster {
    /// Current players, in the order they were added.
    players: Vec<Player>,
    /// Players who can be brought back into a game. Not bounded.
    available: Vec<Player>,
    max_players: usize,
}

/// The persisted form of a `Roster`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct RosterSnapshot {
    pub players: Vec<Player>,
    #[serde(default)]
    pub available_players: Vec<Player>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::with_capacity(MAX_PLAYERS)
    }

    pub fn with_capacity(max_players: usize) -> Self {
        Self {
            players: vec![],
            available: vec![],
            max_players,
        }
    }

    /// Rebuild a roster from a snapshot. Players past the capacity and
    /// repeated ids are dropped, keeping the earliest entry.
    pub fn from_snapshot(snapshot: RosterSnapshot, max_players: usize) -> Self {
        fn dedup(list: Vec<Player>, kind: &str) -> Vec<Player> {
            let mut out: Vec<Player> = Vec::with_capacity(list.len());
            for p in list {
                if out.iter().any(|o| o.id == p.id) {
                    warn!(player_id = %p.id, kind, "dropping duplicate player from snapshot");
                } else {
                    out.push(p);
                }
            }
            out
        }

        let mut players = dedup(snapshot.players, "current");
        if players.len() > max_players {
            warn!(
                count = players.len(),
                max_players, "snapshot exceeds roster capacity, truncating"
            );
            players.truncate(max_players);
        }

        Self {
            players,
            available: dedup(snapshot.available_players, "available"),
            max_players,
        }
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            players: self.players.clone(),
            available_players: self.available.clone(),
        }
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn can_add_player(&self) -> bool {
        self.players.len() < self.max_players
    }

    pub fn remaining_slots(&self) -> usize {
        self.max_players.saturating_sub(self.players.len())
    }

    /// The current players, in the order they were added.
    pub fn players(&self) -> &'_ [Player] {
        &self.players
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &'_ PlayerId> {
        self.players.iter().map(|p| &p.id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&'_ Player> {
        self.players.iter().find(|p| p.id == *id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// The current players, highest score first. Ties keep insertion order.
    pub fn standings(&self) -> Vec<&'_ Player> {
        let mut sorted: Vec<&Player> = self.players.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// Players on the bench, in the order they were added.
    pub fn available_players(&self) -> &'_ [Player] {
        &self.available
    }

    /// Add a player to the current game, returning the new `Roster` and the
    /// player's id. Fails without changes if the roster is full.
    pub fn add_player(&self, input: PlayerInput) -> Result<(Self, PlayerId), RosterError> {
        self.add_player_with_rng(input, &mut rand::thread_rng())
    }

    pub fn add_player_with_rng<R: Rng + ?Sized>(
        &self,
        input: PlayerInput,
        rng: &mut R,
    ) -> Result<(Self, PlayerId), RosterError> {
        if !self.can_add_player() {
            return Err(RosterError::RosterFull(self.max_players));
        }
        let player = validate(input, rng)?;
        if self.contains(&player.id) {
            return Err(RosterError::DuplicatePlayer(player.id));
        }

        let id = player.id.clone();
        let mut self_ = self.clone();
        self_.players.push(player);
        Ok((self_, id))
    }

    /// Remove a player from the current game. Returns `None` if there was no
    /// such player.
    pub fn remove_player(&self, id: &PlayerId) -> Option<Self> {
        let idx = self.players.iter().position(|p| p.id == *id)?;
        let mut self_ = self.clone();
        self_.players.remove(idx);
        Some(self_)
    }

    /// Add `delta` to a player's score. Scores have no floor, but saturate
    /// at the bounds of `i64`. Returns `None` if there was no such player.
    pub fn adjust_score(&self, id: &PlayerId, delta: i64) -> Option<Self> {
        self.update_player(id, |p| p.score = p.score.saturating_add(delta))
    }

    /// Overwrite a player's score. Returns `None` if there was no such player.
    pub fn set_score(&self, id: &PlayerId, value: i64) -> Option<Self> {
        self.update_player(id, |p| p.score = value)
    }

    /// Apply a batch of score adjustments at once, saturating like
    /// `adjust_score`. Ids that are not on the roster are skipped.
    pub fn adjust_scores<'a, I>(&self, deltas: I) -> Self
    where
        I: IntoIterator<Item = (&'a PlayerId, i64)>,
    {
        let mut self_ = self.clone();
        for (id, delta) in deltas {
            if let Some(p) = self_.players.iter_mut().find(|p| p.id == *id) {
                p.score = p.score.saturating_add(delta);
            }
        }
        self_
    }

    /// Reset all current players' scores to zero.
    pub fn reset_all_scores(&self) -> Self {
        let mut self_ = self.clone();
        for p in self_.players.iter_mut() {
            p.score = 0;
        }
        self_
    }

    /// Remove every current player. The bench is kept.
    pub fn clear(&self) -> Self {
        Self {
            players: vec![],
            available: self.available.clone(),
            max_players: self.max_players,
        }
    }

    pub fn add_available_player(&self, input: PlayerInput) -> Result<(Self, PlayerId), RosterError> {
        self.add_available_player_with_rng(input, &mut rand::thread_rng())
    }

    pub fn add_available_player_with_rng<R: Rng + ?Sized>(
        &self,
        input: PlayerInput,
        rng: &mut R,
    ) -> Result<(Self, PlayerId), RosterError> {
        let player = validate(input, rng)?;
        if self.available.iter().any(|p| p.id == player.id) {
            return Err(RosterError::DuplicatePlayer(player.id));
        }

        let id = player.id.clone();
        let mut self_ = self.clone();
        self_.available.push(player);
        Ok((self_, id))
    }

    pub fn remove_available_player(&self, id: &PlayerId) -> Option<Self> {
        let idx = self.available.iter().position(|p| p.id == *id)?;
        let mut self_ = self.clone();
        self_.available.remove(idx);
        Some(self_)
    }

    pub fn set_available_player_score(&self, id: &PlayerId, value: i64) -> Option<Self> {
        let idx = self.available.iter().position(|p| p.id == *id)?;
        let mut self_ = self.clone();
        self_.available[idx].score = value;
        Some(self_)
    }

    pub fn clear_available_players(&self) -> Self {
        Self {
            players: self.players.clone(),
            available: vec![],
            max_players: self.max_players,
        }
    }

    fn update_player(&self, id: &PlayerId, f: impl FnOnce(&mut Player)) -> Option<Self> {
        let idx = self.players.iter().position(|p| p.id == *id)?;
        let mut self_ = self.clone();
        f(&mut self_.players[idx]);
        Some(self_)
    }
}

fn validate<R: Rng + ?Sized>(input: PlayerInput, rng: &mut R) -> Result<Player, RosterError> {
    if input.name.len() > MAX_NAME_LENGTH {
        return Err(RosterError::PlayerNameTooLong);
    }
    Ok(input.into_player(rng))
}

#[derive(Error, Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum RosterError {
    #[error("Roster is full ({0} players max)")]
    RosterFull(usize),
    #[error("Player {0} is already on the roster")]
    DuplicatePlayer(PlayerId),
    #[error("Player name is too long")]
    PlayerNameTooLong,
}
