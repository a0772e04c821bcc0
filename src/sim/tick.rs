//! Fixed timestep simulation tick
//!
//! Order within a tick:
//! 1. win/lose evaluation (lose wins ties)
//! 2. on a win, advance to the next level or finish the game
//! 3. otherwise steer the player, move everything, run the collision scan
//!
//! Evaluation happens before movement, so anything the scan does in tick N
//! is judged at the start of tick N+1.

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::movement::{Direction, move_all, steer_player};
use super::score::Verdict;
use super::state::{GameEvent, GamePhase, GameState};
use super::touch::{TouchContext, collide_all};
use crate::error::EngineError;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Direction held by the player (last command wins)
    pub direction: Direction,
}

impl TickInput {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

/// Advance the game state by one fixed timestep and return the new phase.
///
/// Terminal phases are sticky: ticking a finished game does nothing.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<GamePhase, EngineError> {
    if state.phase.is_terminal() {
        return Ok(state.phase);
    }
    state.time_ticks += 1;

    let collectibles = state.registry.count_kind(EntityKind::Collectible);
    // A run without a player cannot be continued
    let player_infected = state.registry.player().is_none_or(|p| p.infected());

    match state.tracker.evaluate(collectibles, player_infected) {
        Verdict::Lost => {
            state.phase = GamePhase::Lost;
            let score = state.tracker.score();
            log::info!("You Lose!!! Final score {}", score);
            state.events.push(GameEvent::PlayerLost { score });
        }
        Verdict::Won => {
            state.phase = GamePhase::WonLevel;
            log::info!("You Win!! {} cleared", state.current_level().name());
            state.events.push(GameEvent::LevelWon {
                index: state.level_index,
            });
            if !state.advance_level()? {
                state.phase = GamePhase::GameComplete;
                let score = state.tracker.score();
                log::info!("You beat the game! Final score {}", score);
                state.events.push(GameEvent::GameComplete { score });
            }
        }
        Verdict::Continue => step(state, input),
    }

    Ok(state.phase)
}

/// Movement followed by the collision scan
fn step(state: &mut GameState, input: &TickInput) {
    steer_player(&mut state.registry, input.direction, state.tuning.player_speed);
    move_all(&mut state.registry, &state.bounds);

    let mut ctx = TouchContext {
        registry: &mut state.registry,
        tracker: &mut state.tracker,
        tuning: &state.tuning,
        events: &mut state.events,
    };
    let report = collide_all(&mut ctx);
    if report.kills > 0 {
        log::debug!(
            "tick {}: {} touches, {} removed, {} live",
            state.time_ticks,
            report.touches,
            report.kills,
            state.registry.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ManifestLoader;
    use crate::settings::Settings;
    use crate::sim::level::{Campaign, LevelSequence};
    use crate::Bounds;
    use glam::Vec2;
    use proptest::prelude::*;

    fn settings() -> Settings {
        Settings {
            playfield: Bounds::new(-1000.0, -1000.0, 1000.0, 1000.0),
            ..Settings::default()
        }
    }

    fn state_from(json: &str) -> GameState {
        let seq = LevelSequence::from(Campaign::from_json(json).unwrap());
        GameState::new(&settings(), seq, &mut ManifestLoader).unwrap()
    }

    const TWO_LEVELS: &str = r#"{ "levels": [
        { "name": "first", "background": "bg.png", "spawns": [
            { "kind": "player", "sprite": "p.png", "at": [0, 0] },
            { "kind": "collectible", "sprite": "c.png", "at": [500, 500] }
        ]},
        { "name": "second", "background": "bg.png", "spawns": [
            { "kind": "player", "sprite": "p.png", "at": [0, 0] },
            { "kind": "collectible", "sprite": "c.png", "at": [0, 0] }
        ]}
    ]}"#;

    #[test]
    fn test_player_walks_to_collectible_and_level_advances() {
        let mut state = state_from(TWO_LEVELS);
        let right = TickInput::new(Direction::Right);
        let down = TickInput::new(Direction::Down);

        // 25 px per tick; overlap begins once the gap drops below 80 px
        for _ in 0..18 {
            tick(&mut state, &right).unwrap();
        }
        // Overlap on the 17th step down (gap 75 px)
        for _ in 0..17 {
            tick(&mut state, &down).unwrap();
        }
        assert_eq!(state.registry.count_kind(EntityKind::Collectible), 0);
        assert_eq!(state.score(), state.tuning.collectible_bonus);
        assert_eq!(state.current_level().name(), "first");

        assert_eq!(tick(&mut state, &TickInput::default()).unwrap(), GamePhase::Playing);
        assert_eq!(state.current_level().name(), "second");
        assert_eq!(state.level_index, 1);
    }

    #[test]
    fn test_last_level_win_completes_game() {
        let mut state = state_from(TWO_LEVELS);
        state.advance_level().unwrap();
        let idle = TickInput::default();

        tick(&mut state, &idle).unwrap(); // eats the coin at spawn
        assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::GameComplete);
        let ticks = state.time_ticks;

        // Terminal: nothing more happens
        assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::GameComplete);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.contains(&GameEvent::GameComplete { score: 100 }));
    }

    #[test]
    fn test_infection_is_judged_next_tick_and_latches() {
        let mut state = state_from(
            r#"{ "levels": [{ "name": "l", "background": "bg.png", "spawns": [
                { "kind": "player", "sprite": "p.png", "at": [0, 0] },
                { "kind": "hazard", "sprite": "z.png", "at": [40, 0], "infected": true },
                { "kind": "collectible", "sprite": "c.png", "at": [800, 800] }
            ]}]}"#,
        );
        let idle = TickInput::default();
        assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::Playing);
        assert!(state.registry.player().unwrap().infected());

        assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::Lost);
        assert!(state.tracker.lost());
        assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::Lost);
    }

    #[test]
    fn test_speed_up_compounds_per_collectible() {
        let mut state = state_from(
            r#"{ "levels": [{ "name": "l", "background": "bg.png", "spawns": [
                { "kind": "player", "sprite": "p.png", "at": [0, 0] },
                { "kind": "collectible", "sprite": "c.png", "at": [0, 0], "count": 3 },
                { "kind": "collectible", "sprite": "c.png", "at": [900, -900] },
                { "kind": "wanderer", "sprite": "w.png", "at": [-500, 500], "velocity": [1, -0.5] }
            ]}]}"#,
        );
        tick(&mut state, &TickInput::default()).unwrap();

        let factor = state.tuning.speed_up_factor;
        let wanderer = state.registry.iter().find(|e| e.kind == EntityKind::Wanderer).unwrap();
        assert_eq!(wanderer.vel, Vec2::new(1.0, -0.5) * factor.powi(3));
        assert_eq!(state.score(), 3 * state.tuning.collectible_bonus);
        assert_eq!(state.registry.count_kind(EntityKind::Collectible), 1);
    }

    fn scatter_level(coins: &[(f32, f32)], seed_json: &str) -> String {
        let coins: Vec<String> = coins
            .iter()
            .map(|(x, y)| format!(r#"{{ "kind": "collectible", "sprite": "c.png", "at": [{x}, {y}] }}"#))
            .collect();
        let mut spawns = vec![r#"{ "kind": "player", "sprite": "p.png", "at": [0, 0] }"#.to_string()];
        spawns.extend(coins);
        spawns.push(seed_json.to_string());
        format!(
            r#"{{ "levels": [
                {{ "name": "scatter", "background": "bg.png", "spawns": [{}] }},
                {{ "name": "next", "background": "bg.png", "spawns": [
                    {{ "kind": "collectible", "sprite": "c.png", "at": [900, 900] }}
                ]}}
            ]}}"#,
            spawns.join(",")
        )
    }

    proptest! {
        #[test]
        fn prop_win_iff_no_collectibles_and_score_tracks_consumption(
            coins in proptest::collection::vec((-900.0f32..900.0, -900.0f32..900.0), 0..8),
            moves in proptest::collection::vec(0u8..5, 1..40),
        ) {
            let json = scatter_level(
                &coins,
                r#"{ "kind": "wanderer", "sprite": "w.png", "count": 3, "speed": 6 }"#,
            );
            let mut state = state_from(&json);
            let mut consumed = 0u64;
            let mut last_score = 0;

            for m in moves {
                let direction = match m {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    3 => Direction::Right,
                    _ => Direction::Stopped,
                };
                let level_before = state.level_index;
                let phase_before = state.phase;
                let coins_before = state.registry.count_kind(EntityKind::Collectible);

                tick(&mut state, &TickInput::new(direction)).unwrap();
                consumed += state
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::CollectibleConsumed { .. }))
                    .count() as u64;

                if phase_before == GamePhase::Playing && !state.tracker.lost() {
                    // A level ends exactly when it started the tick with no collectibles
                    let level_ended = state.level_index != level_before
                        || state.phase == GamePhase::GameComplete;
                    prop_assert_eq!(coins_before == 0, level_ended);
                }
                prop_assert!(state.score() >= last_score);
                prop_assert_eq!(state.score(), consumed * state.tuning.collectible_bonus);
                last_score = state.score();
                if state.phase.is_terminal() {
                    break;
                }
            }
        }

        #[test]
        fn prop_registry_shrinks_by_exactly_the_kills(
            coins in proptest::collection::vec((-200.0f32..200.0, -200.0f32..200.0), 1..10),
        ) {
            let json = scatter_level(
                &coins,
                r#"{ "kind": "hazard", "sprite": "z.png", "at": [700, 700] }"#,
            );
            let mut state = state_from(&json);
            let before = state.registry.len();
            tick(&mut state, &TickInput::default()).unwrap();

            let kills = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::CollectibleConsumed { .. }))
                .count();
            prop_assert_eq!(state.registry.len(), before - kills);
            prop_assert_eq!(state.registry.slot_count(), state.registry.len());
        }
    }
}
