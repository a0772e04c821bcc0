//! End-to-end scenarios against the public API: level setup, ticking, the
//! collision scan and the terminal states a host sees.

use glam::Vec2;

use contagion::assets::{ManifestLoader, SpriteId};
use contagion::error::{EngineError, ExitStatus};
use contagion::sim::{
    Campaign, Entity, EntityKind, GameEvent, GamePhase, GameState, LevelSequence, Registry,
    ScoreTracker, TickInput, TouchContext, collide_all, tick,
};
use contagion::{Bounds, Settings, Tuning};

fn settings() -> Settings {
    Settings {
        playfield: Bounds::new(-500.0, -500.0, 500.0, 500.0),
        ..Settings::default()
    }
}

fn start(json: &str) -> Result<GameState, EngineError> {
    let campaign = Campaign::from_json(json).expect("valid campaign");
    GameState::new(&settings(), LevelSequence::from(campaign), &mut ManifestLoader)
}

fn entity(kind: EntityKind, x: f32, y: f32) -> Entity {
    Entity::new(kind, Vec2::new(x, y), Vec2::splat(80.0), SpriteId(0))
}

#[test]
fn scenario_a_player_eats_collectible_then_wins() {
    let mut state = start(
        r#"{ "levels": [
            { "name": "one", "background": "bg.png", "spawns": [
                { "kind": "player", "sprite": "p.png", "at": [0, 0] },
                { "kind": "collectible", "sprite": "c.png", "at": [0, 0] }
            ]},
            { "name": "two", "background": "bg.png", "spawns": [
                { "kind": "collectible", "sprite": "c.png", "at": [300, 300] }
            ]}
        ]}"#,
    )
    .unwrap();
    let idle = TickInput::default();

    assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::Playing);
    assert_eq!(state.score(), Tuning::default().collectible_bonus);
    assert_eq!(state.registry.count_kind(EntityKind::Collectible), 0);
    assert_eq!(state.registry.len(), 1);

    // Next evaluation: zero collectibles, so the level is won and the next one starts
    tick(&mut state, &idle).unwrap();
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::LevelWon { index: 0 }));
    assert!(events.contains(&GameEvent::LevelStarted {
        index: 1,
        name: "two".into()
    }));
    assert_eq!(state.current_level().name(), "two");
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn scenario_b_lose_beats_simultaneous_win() {
    let mut state = start(
        r#"{ "levels": [{ "name": "one", "background": "bg.png", "spawns": [
            { "kind": "player", "sprite": "p.png", "at": [0, 0] },
            { "kind": "collectible", "sprite": "c.png", "at": [0, 0] },
            { "kind": "hazard", "sprite": "z.png", "at": [30, 0], "infected": true }
        ]}]}"#,
    )
    .unwrap();
    let idle = TickInput::default();

    // One tick: the player is infected and the last collectible is gone
    assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::Playing);
    assert!(state.registry.player().unwrap().infected());
    assert_eq!(state.registry.count_kind(EntityKind::Collectible), 0);

    // Both conditions hold at the next evaluation; losing takes precedence
    assert_eq!(tick(&mut state, &idle).unwrap(), GamePhase::Lost);
    assert!(state.tracker.lost());
    assert!(!state.tracker.won());
    assert_eq!(
        contagion::platform::RunOutcome {
            phase: state.phase,
            ticks: 2,
            score: state.score()
        }
        .exit_status(),
        ExitStatus::PlayerLost
    );
}

#[test]
fn scenario_c_no_levels_aborts_before_any_tick() {
    let err = start(r#"{ "levels": [] }"#).unwrap_err();
    assert!(matches!(err, EngineError::NoLevels));
    assert_eq!(ExitStatus::from(&err), ExitStatus::NoLevels);
    assert_eq!(ExitStatus::from(&err).code(), 99);
}

#[test]
fn scenario_d_kill_mid_scan_keeps_remaining_pairs() {
    let tuning = Tuning::default();
    let mut registry = Registry::new();
    registry.spawn(entity(EntityKind::Player, 0.0, 0.0));
    let first = registry.spawn(entity(EntityKind::Collectible, 10.0, 0.0));
    let second = registry.spawn(entity(EntityKind::Collectible, 0.0, 10.0));
    let watcher = registry.spawn(entity(EntityKind::Wanderer, 400.0, 400.0).with_velocity(Vec2::new(1.0, 1.0)));

    let mut tracker = ScoreTracker::new();
    let mut events = Vec::new();
    let mut ctx = TouchContext {
        registry: &mut registry,
        tracker: &mut tracker,
        tuning: &tuning,
        events: &mut events,
    };
    let report = collide_all(&mut ctx);

    // Killing the entity at slot 1 must not hide slot 2 from the player
    assert_eq!(report.kills, 2);
    // (P,C1) and (P,C2) only: both coins die before their own rows
    assert_eq!(report.touches, 2);
    assert!(registry.get(first).is_none());
    assert!(registry.get(second).is_none());
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.slot_count(), 2);

    // Each collectible was eaten exactly once
    assert_eq!(tracker.score(), 2 * tuning.collectible_bonus);
    let consumed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CollectibleConsumed { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(consumed, vec![first, second]);
    let factor = tuning.speed_up_factor;
    assert_eq!(
        registry.get(watcher).unwrap().vel,
        Vec2::new(1.0, 1.0) * factor * factor
    );
}

#[test]
fn scenario_d_infection_still_reaches_shifted_entity() {
    let tuning = Tuning::default();
    let mut registry = Registry::new();
    let player = registry.spawn(entity(EntityKind::Player, 0.0, 0.0));
    registry.spawn(entity(EntityKind::Collectible, 10.0, 0.0));
    let carrier = registry.spawn(entity(EntityKind::Hazard, 0.0, 10.0).with_infection(true));

    let mut tracker = ScoreTracker::new();
    let mut events = Vec::new();
    let mut ctx = TouchContext {
        registry: &mut registry,
        tracker: &mut tracker,
        tuning: &tuning,
        events: &mut events,
    };
    let report = collide_all(&mut ctx);
    assert_eq!(report.kills, 1);
    // (P,C) (P,H) then (H,P); the coin's row and column are gone
    assert_eq!(report.touches, 3);

    assert!(registry.get(player).unwrap().infected());
    let infections: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Infected { .. }))
        .collect();
    assert_eq!(
        infections,
        vec![&GameEvent::Infected {
            id: player,
            by: carrier
        }]
    );
}
