//! The roster store: the single owner of the current `Roster`.
//!
//! Each successful mutation replaces the roster, saves a snapshot through the
//! `Storage` and then notifies subscribers. Saves are best-effort: a failure
//! is logged and otherwise ignored, and the in-memory roster stays
//! authoritative. Mutations that change nothing (e.g. removing an unknown
//! player) neither save nor notify.

use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::storage::Storage;
use crate::types::{PlayerId, PlayerInput, Roster, RosterError};

/// Handle returned by `RosterStore::subscribe`.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Roster)>;

pub struct RosterStore<S: Storage> {
    config: GameConfig,
    roster: Roster,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    hydrated: bool,
}

impl<S: Storage> RosterStore<S> {
    /// Create a store, restoring whatever `storage` last saved. A snapshot
    /// that can't be loaded is logged and the store starts empty.
    pub fn open(config: GameConfig, storage: S) -> Self {
        let (roster, hydrated) = match storage.load() {
            Ok(Some(snapshot)) => {
                let roster = Roster::from_snapshot(snapshot, config.max_players);
                debug!(players = roster.len(), "restored roster");
                (roster, true)
            }
            Ok(None) => (Roster::with_capacity(config.max_players), true),
            Err(e) => {
                warn!(error = %e, "couldn't load roster, starting empty");
                (Roster::with_capacity(config.max_players), false)
            }
        };

        Self {
            config,
            roster,
            storage,
            listeners: vec![],
            next_subscription: 0,
            hydrated,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether the stored roster was read successfully (or nothing had been
    /// saved yet). `false` means the store started empty after a load error.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Register a listener called with the new roster after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&Roster) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn add_player(&mut self, input: PlayerInput) -> Result<PlayerId, RosterError> {
        let (roster, id) = self.roster.add_player(input)?;
        debug!(player_id = %id, "added player");
        self.commit(roster);
        Ok(id)
    }

    /// Like `add_player`, but only reports whether the player was added.
    pub fn try_add_player(&mut self, input: PlayerInput) -> bool {
        match self.add_player(input) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "player not added");
                false
            }
        }
    }

    /// Returns `true` if the player was on the roster.
    pub fn remove_player(&mut self, id: &PlayerId) -> bool {
        let roster = self.roster.remove_player(id);
        self.commit_if_changed(roster, "removed player", id)
    }

    pub fn adjust_score(&mut self, id: &PlayerId, delta: i64) -> bool {
        let roster = self.roster.adjust_score(id, delta);
        self.commit_if_changed(roster, "adjusted score", id)
    }

    pub fn set_score(&mut self, id: &PlayerId, value: i64) -> bool {
        let roster = self.roster.set_score(id, value);
        self.commit_if_changed(roster, "set score", id)
    }

    /// Apply several score adjustments as one change: a single save and a
    /// single notification.
    pub fn adjust_scores<'a, I>(&mut self, deltas: I)
    where
        I: IntoIterator<Item = (&'a PlayerId, i64)>,
    {
        let roster = self.roster.adjust_scores(deltas);
        debug!("adjusted scores");
        self.commit(roster);
    }

    pub fn reset_all_scores(&mut self) {
        let roster = self.roster.reset_all_scores();
        debug!("reset all scores");
        self.commit(roster);
    }

    pub fn clear(&mut self) {
        let roster = self.roster.clear();
        debug!("cleared roster");
        self.commit(roster);
    }

    pub fn add_available_player(&mut self, input: PlayerInput) -> Result<PlayerId, RosterError> {
        let (roster, id) = self.roster.add_available_player(input)?;
        debug!(player_id = %id, "added available player");
        self.commit(roster);
        Ok(id)
    }

    pub fn remove_available_player(&mut self, id: &PlayerId) -> bool {
        let roster = self.roster.remove_available_player(id);
        self.commit_if_changed(roster, "removed available player", id)
    }

    pub fn set_available_player_score(&mut self, id: &PlayerId, value: i64) -> bool {
        let roster = self.roster.set_available_player_score(id, value);
        self.commit_if_changed(roster, "set available player score", id)
    }

    pub fn clear_available_players(&mut self) {
        let roster = self.roster.clear_available_players();
        debug!("cleared available players");
        self.commit(roster);
    }

    fn commit_if_changed(&mut self, roster: Option<Roster>, action: &str, id: &PlayerId) -> bool {
        match roster {
            Some(roster) => {
                debug!(player_id = %id, "{}", action);
                self.commit(roster);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, roster: Roster) {
        self.roster = roster;
        if let Err(e) = self.storage.save(&self.roster.snapshot()) {
            warn!(error = %e, "couldn't save roster");
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.roster);
        }
    }
}
