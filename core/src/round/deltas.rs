use serde::{Deserialize, Serialize};

use super::{InvalidRound, RoundError, RoundSelection};
use crate::types::{PlayerId, Roster};

/// The score change for every player on the roster for one round, in roster
/// order. Always sums to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct RoundDeltas {
    entries: Vec<(PlayerId, i64)>,
}

impl RoundDeltas {
    pub fn get(&self, player_id: &PlayerId) -> Option<i64> {
        self.entries
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, delta)| *delta)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'_ PlayerId, i64)> {
        self.entries.iter().map(|(id, delta)| (id, *delta))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, delta)| delta).sum()
    }
}

/// Work out each player's score change for a round.
///
/// Every loser pays `stake` into a pool that goes to the winner; the drawer,
/// if any, neither pays nor receives. The deltas don't depend on anyone's
/// current score, but a round that would push a score outside `i64` is
/// rejected with `ScoreOverflow`.
pub fn compute_deltas(
    roster: &Roster,
    selection: &RoundSelection,
    stake: i64,
) -> Result<RoundDeltas, RoundError> {
    let winner = selection.winner().ok_or(InvalidRound::NoWinner)?;
    if roster.len() < 2 {
        return Err(InvalidRound::NotEnoughPlayers.into());
    }
    for id in std::iter::once(winner).chain(selection.drawer()) {
        if !roster.contains(id) {
            return Err(InvalidRound::UnknownPlayer(id.clone()).into());
        }
    }

    let drawer = selection.drawer();
    let num_losers = roster.len() - 1 - if drawer.is_some() { 1 } else { 0 };
    let overflow = |id: &PlayerId| RoundError::from(InvalidRound::ScoreOverflow(id.clone()));
    let pool = (num_losers as i64)
        .checked_mul(stake)
        .ok_or_else(|| overflow(winner))?;
    let loss = stake.checked_neg().ok_or_else(|| overflow(winner))?;

    // Reject the whole round if any resulting score would leave the range of
    // `i64`, so nothing is applied.
    let entries = roster
        .players()
        .iter()
        .map(|p| {
            let delta = if p.id() == winner {
                pool
            } else if Some(p.id()) == drawer {
                0
            } else {
                loss
            };
            match p.score().checked_add(delta) {
                Some(_) => Ok((p.id().clone(), delta)),
                None => Err(overflow(p.id())),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoundDeltas { entries })
}

/// The score `player_id` would have if the round were applied now. While the
/// round can't be resolved yet (e.g. no winner), that's the current score.
/// Returns `None` if the player isn't on the roster.
pub fn preview(
    roster: &Roster,
    selection: &RoundSelection,
    player_id: &PlayerId,
    stake: i64,
) -> Option<i64> {
    let score = roster.player(player_id)?.score();
    let delta = compute_deltas(roster, selection, stake)
        .ok()
        .and_then(|d| d.get(player_id))
        .unwrap_or(0);
    Some(score.saturating_add(delta))
}
