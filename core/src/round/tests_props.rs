//! Property tests for round scoring (pure, no storage).

use proptest::prelude::*;

use crate::round::{compute_deltas, RoundSelection, STARTING_POINTS};
use crate::types::{PlayerId, PlayerInput, Roster};

/// A roster of 2..=6 players with arbitrary scores, plus a winner index and
/// an optional drawer index distinct from the winner.
fn round_setup() -> impl Strategy<Value = (Vec<i64>, usize, Option<usize>)> {
    prop::collection::vec(-1_000i64..1_000, 2..=6).prop_flat_map(|scores| {
        let n = scores.len();
        (Just(scores), 0..n, prop::option::of(0..n))
            .prop_map(|(scores, w, d)| (scores, w, d.filter(|d| *d != w)))
    })
}

fn build(scores: &[i64]) -> (Roster, Vec<PlayerId>) {
    let mut roster = Roster::new();
    let mut ids = vec![];
    for (i, score) in scores.iter().enumerate() {
        let input = PlayerInput::new(format!("p{}", i))
            .with_id(format!("p{}", i))
            .with_score(*score);
        let (r, id) = roster.add_player(input).unwrap();
        roster = r;
        ids.push(id);
    }
    (roster, ids)
}

fn select(ids: &[PlayerId], winner: usize, drawer: Option<usize>) -> RoundSelection {
    let s = RoundSelection::new().toggle_winner(&ids[winner]).unwrap();
    match drawer {
        Some(d) => s.toggle_drawer(&ids[d]).unwrap(),
        None => s,
    }
}

proptest! {
    /// Property: every valid round is zero-sum.
    #[test]
    fn prop_deltas_sum_to_zero((scores, w, d) in round_setup()) {
        let (roster, ids) = build(&scores);
        let deltas = compute_deltas(&roster, &select(&ids, w, d), STARTING_POINTS).unwrap();
        prop_assert_eq!(deltas.total(), 0);
        prop_assert_eq!(deltas.len(), scores.len());
    }

    /// Property: the winner collects one stake per loser, the drawer gets
    /// nothing and each loser pays one stake, whatever the prior scores.
    #[test]
    fn prop_delta_per_role((scores, w, d) in round_setup()) {
        let (roster, ids) = build(&scores);
        let deltas = compute_deltas(&roster, &select(&ids, w, d), STARTING_POINTS).unwrap();

        let has_drawer = if d.is_some() { 1 } else { 0 };
        let expected_pool = STARTING_POINTS * (scores.len() as i64 - 1 - has_drawer);
        prop_assert_eq!(deltas.get(&ids[w]), Some(expected_pool));

        for (i, id) in ids.iter().enumerate() {
            if i == w {
                continue;
            }
            let expected = if Some(i) == d { 0 } else { -STARTING_POINTS };
            prop_assert_eq!(deltas.get(id), Some(expected));
        }
    }

    /// Property: a full roster rejects new players and stays the same size.
    #[test]
    fn prop_full_roster_rejects((scores, _, _) in round_setup(), name in "[a-z]{1,12}") {
        let (mut roster, _) = build(&scores);
        while roster.can_add_player() {
            roster = roster.add_player(PlayerInput::new("filler")).unwrap().0;
        }
        prop_assert!(roster.add_player(PlayerInput::new(name)).is_err());
        prop_assert_eq!(roster.len(), 6);
    }

    /// Property: resetting scores keeps membership and zeroes every score.
    #[test]
    fn prop_reset_keeps_membership((scores, _, _) in round_setup()) {
        let (roster, ids) = build(&scores);
        let reset = roster.reset_all_scores();
        let reset_ids: Vec<PlayerId> = reset.player_ids().cloned().collect();
        prop_assert_eq!(reset_ids, ids);
        prop_assert!(reset.players().iter().all(|p| p.score() == 0));
    }

    /// Property: toggling the same winner twice returns to an empty selection.
    #[test]
    fn prop_double_toggle_is_identity(id in "[a-z0-9]{1,8}") {
        let id = PlayerId::from(id);
        let s = RoundSelection::new()
            .toggle_winner(&id)
            .unwrap()
            .toggle_winner(&id)
            .unwrap();
        prop_assert_eq!(s, RoundSelection::new());
    }
}
