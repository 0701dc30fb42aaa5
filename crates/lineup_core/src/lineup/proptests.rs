//! Property tests over random operation sequences.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;
use crate::formation::{formations_by_game_mode, GameMode};
use crate::models::{NaturalPosition, PlayerId, PlayerRef};

const POOL: usize = 16;

fn pool() -> Vec<PlayerRef> {
    (0..POOL)
        .map(|i| {
            let position = match i % 5 {
                0 => NaturalPosition::Goalkeeper,
                1 => NaturalPosition::Defender,
                2 => NaturalPosition::Midfielder,
                3 => NaturalPosition::Forward,
                _ => NaturalPosition::Unknown,
            };
            PlayerRef::new(format!("{i}"), format!("Player {i}"), None, position)
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Step {
    Assign { player: usize, line: Line, index: usize, mode: Option<GameMode> },
    Bench(usize),
    Swap(usize, usize),
    Auto(usize),
    Formation(GameMode, usize),
}

fn line_strategy() -> impl Strategy<Value = Line> {
    prop_oneof![
        Just(Line::Goalkeeper),
        Just(Line::Defense),
        Just(Line::Midfield),
        Just(Line::Forward),
    ]
}

fn mode_strategy() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Eleven), Just(GameMode::Seven)]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..POOL, line_strategy(), 0..6usize, prop::option::weighted(0.1, mode_strategy()))
            .prop_map(|(player, line, index, mode)| Step::Assign { player, line, index, mode }),
        1 => (0..POOL).prop_map(Step::Bench),
        2 => (0..POOL, 0..POOL).prop_map(|(a, b)| Step::Swap(a, b)),
        2 => (0..POOL).prop_map(Step::Auto),
        1 => (mode_strategy(), 0..8usize).prop_map(|(mode, i)| Step::Formation(mode, i)),
    ]
}

fn apply(ops: &mut LineupOps<'_>, players: &[PlayerRef], step: &Step) -> OpResult {
    match step {
        Step::Assign { player, line, index, mode } => {
            ops.assign_player_to_slot(players[*player].clone(), *line, *index, *mode)
        }
        Step::Bench(p) => ops.move_to_bench(&players[*p].id),
        Step::Swap(field, bench) => ops.swap_player_with_bench(&players[*field].id, &players[*bench].id),
        Step::Auto(p) => ops.auto_assign_player(players[*p].clone()),
        Step::Formation(mode, i) => {
            let catalog = formations_by_game_mode(*mode);
            ops.set_formation(catalog[i % catalog.len()].clone())
        }
    }
}

fn id_set(lineup: &Lineup) -> BTreeSet<PlayerId> {
    lineup.all_player_ids().into_iter().collect()
}

/// Lineup with the whole pool on the bench.
fn seeded() -> (Lineup, Vec<PlayerRef>) {
    let players = pool();
    let mut lineup = Lineup::for_game_mode(GameMode::Eleven);
    let mut ops = lineup.ops(AssignmentPolicy::LENIENT);
    for player in &players {
        let _ = ops.add_to_bench(player.clone());
    }
    (lineup, players)
}

proptest! {
    /// Property: no sequence of operations produces a duplicate or a misshapen line
    #[test]
    fn prop_lineup_stays_valid(strict in any::<bool>(), steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut lineup = Lineup::for_game_mode(GameMode::Eleven);
        let players = pool();
        for step in &steps {
            let _ = apply(&mut lineup.ops(AssignmentPolicy::new(strict)), &players, step);
            prop_assert!(lineup.validate().is_ok(), "invalid after {:?}: {:?}", step, lineup.validate());
        }
    }

    /// Property: moving players around never adds or loses anyone
    #[test]
    fn prop_players_are_conserved(strict in any::<bool>(), steps in prop::collection::vec(step_strategy(), 0..60)) {
        let (mut lineup, players) = seeded();
        let expected = id_set(&lineup);
        prop_assert_eq!(expected.len(), POOL);
        for step in &steps {
            let _ = apply(&mut lineup.ops(AssignmentPolicy::new(strict)), &players, step);
            prop_assert_eq!(id_set(&lineup), expected.clone());
            prop_assert_eq!(lineup.all_player_ids().len(), POOL);
        }
    }

    /// Property: a rejected or no-op step leaves the lineup untouched
    #[test]
    fn prop_rejections_and_noops_do_not_mutate(strict in any::<bool>(), steps in prop::collection::vec(step_strategy(), 0..60)) {
        let (mut lineup, players) = seeded();
        for step in &steps {
            let before = lineup.clone();
            let result = apply(&mut lineup.ops(AssignmentPolicy::new(strict)), &players, step);
            match result {
                Err(_) | Ok(OpOutcome::Unchanged) => {
                    prop_assert_eq!(&lineup, &before);
                }
                Ok(OpOutcome::Applied) => {}
            }
        }
    }

    /// Property: auto-assigning the same player twice changes nothing the second time
    #[test]
    fn prop_auto_assign_is_idempotent(
        steps in prop::collection::vec(step_strategy(), 0..30),
        target in 0..POOL,
    ) {
        let mut lineup = Lineup::for_game_mode(GameMode::Seven);
        let players = pool();
        for step in &steps {
            let _ = apply(&mut lineup.ops(AssignmentPolicy::STRICT), &players, step);
        }
        let mut ops = lineup.ops(AssignmentPolicy::STRICT);
        let _ = ops.auto_assign_player(players[target].clone());
        let after_first = ops.lineup().clone();
        prop_assert_eq!(ops.auto_assign_player(players[target].clone()), Ok(OpOutcome::Unchanged));
        prop_assert_eq!(&lineup, &after_first);
    }

    /// Property: a successful swap exchanges exactly the two players
    #[test]
    fn prop_swap_exchanges_locations(
        steps in prop::collection::vec(step_strategy(), 0..40),
        field in 0..POOL,
        bench in 0..POOL,
    ) {
        let (mut lineup, players) = seeded();
        for step in &steps {
            let _ = apply(&mut lineup.ops(AssignmentPolicy::LENIENT), &players, step);
        }
        let (field_id, bench_id) = (&players[field].id, &players[bench].id);
        let before_field = lineup.find_player_position(field_id);
        let before_bench = lineup.find_player_position(bench_id);

        let result = lineup.ops(AssignmentPolicy::LENIENT).swap_player_with_bench(field_id, bench_id);
        if result.is_ok() {
            prop_assert_eq!(lineup.find_player_position(bench_id), before_field);
            prop_assert_eq!(lineup.find_player_position(field_id), before_bench);
        }
    }

    /// Property: after a formation change every line has exactly the new size
    #[test]
    fn prop_formation_change_fits_lines(
        steps in prop::collection::vec(step_strategy(), 0..40),
        mode in mode_strategy(),
        choice in 0..8usize,
    ) {
        let (mut lineup, players) = seeded();
        for step in &steps {
            let _ = apply(&mut lineup.ops(AssignmentPolicy::LENIENT), &players, step);
        }
        let catalog = formations_by_game_mode(mode);
        let target = catalog[choice % catalog.len()].clone();
        let kept_before = lineup.occupancy().filled;

        lineup.ops(AssignmentPolicy::LENIENT).set_formation(target.clone()).unwrap();

        for line in Line::ALL {
            prop_assert_eq!(lineup.slots(line).len(), target.line_size(line));
        }
        prop_assert!(lineup.occupancy().filled <= kept_before);
        prop_assert_eq!(lineup.all_player_ids().len(), POOL);
    }
}
