use tracing::debug;

use super::{
    compute_deltas, preview, PlayerStatus, RoundDeltas, RoundError, RoundPhase, RoundSelection,
};
use crate::config::GameConfig;
use crate::storage::Storage;
use crate::store::RosterStore;
use crate::types::{PlayerId, Roster};

/// Drives one round-result interaction: the player toggles winner and drawer,
/// looks at the previewed scores, then either applies or cancels.
///
/// Nothing touches the roster until `apply`, which computes every delta up
/// front and hands them to the store as one batch.
#[derive(Debug, Clone)]
pub struct RoundResolver {
    stake: i64,
    selection: RoundSelection,
    /// Set by a successful `apply` until the next interaction.
    applied: Option<RoundDeltas>,
}

impl Default for RoundResolver {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl RoundResolver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            stake: config.stake,
            selection: RoundSelection::new(),
            applied: None,
        }
    }

    pub fn stake(&self) -> i64 {
        self.stake
    }

    pub fn phase(&self) -> RoundPhase {
        if self.applied.is_some() {
            RoundPhase::Applied
        } else {
            self.selection.phase()
        }
    }

    pub fn selection(&self) -> &RoundSelection {
        &self.selection
    }

    /// The deltas from the last `apply`, while still in `Applied`.
    pub fn last_applied(&self) -> Option<&RoundDeltas> {
        self.applied.as_ref()
    }

    pub fn toggle_winner(&mut self, player_id: &PlayerId) -> Result<(), RoundError> {
        self.applied = None;
        self.selection = self.selection.toggle_winner(player_id)?;
        Ok(())
    }

    pub fn toggle_drawer(&mut self, player_id: &PlayerId) -> Result<(), RoundError> {
        self.applied = None;
        self.selection = self.selection.toggle_drawer(player_id)?;
        Ok(())
    }

    pub fn status(&self, player_id: &PlayerId) -> PlayerStatus {
        self.selection.status(player_id)
    }

    pub fn deltas(&self, roster: &Roster) -> Result<RoundDeltas, RoundError> {
        compute_deltas(roster, &self.selection, self.stake)
    }

    /// The score `player_id` would end up with if the round were applied now.
    pub fn preview(&self, roster: &Roster, player_id: &PlayerId) -> Option<i64> {
        preview(roster, &self.selection, player_id, self.stake)
    }

    /// Apply the round to `store`. On failure neither the roster nor the
    /// selection changes.
    pub fn apply<S: Storage>(
        &mut self,
        store: &mut RosterStore<S>,
    ) -> Result<RoundDeltas, RoundError> {
        let deltas = self.deltas(store.roster())?;
        debug!(
            winner = ?self.selection.winner(),
            drawer = ?self.selection.drawer(),
            players = deltas.len(),
            "applying round"
        );
        store.adjust_scores(deltas.iter());
        self.selection = RoundSelection::new();
        self.applied = Some(deltas.clone());
        Ok(deltas)
    }

    /// Drop the selection without touching the roster. Also closes out an
    /// applied round.
    pub fn cancel(&mut self) {
        self.selection = RoundSelection::new();
        self.applied = None;
    }
}
