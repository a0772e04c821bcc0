//! Touch resolution and the pairwise collision scan
//!
//! When two hitboxes overlap, the entity in the outer loop "touches" the
//! other one. What a touch does depends on the toucher's kind:
//!
//! | kind          | effect                                                   |
//! |---------------|----------------------------------------------------------|
//! | any           | catches infection from an infected party                 |
//! | `Player`      | also eats collectibles: bonus, kill, speed up non-players |

use super::collision::overlaps;
use super::entity::{EntityId, EntityKind};
use super::registry::Registry;
use super::score::ScoreTracker;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Mutable world handed to touch handlers
pub struct TouchContext<'a> {
    pub registry: &'a mut Registry,
    pub tracker: &'a mut ScoreTracker,
    pub tuning: &'a Tuning,
    pub events: &'a mut Vec<GameEvent>,
}

/// What one scan did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Overlapping ordered pairs that were resolved
    pub touches: usize,
    pub kills: usize,
}

/// Run the all-pairs scan and compact the registry afterwards.
///
/// Every ordered pair of live slots is tested once. A slot killed during the
/// scan is skipped from then on, and an outer entity that dies ends its row.
pub fn collide_all(ctx: &mut TouchContext<'_>) -> ScanReport {
    let before = ctx.registry.len();
    let n = ctx.registry.slot_count();
    let mut touches = 0;

    for i in 0..n {
        for x in 0..n {
            if i == x {
                continue;
            }
            let Some(this) = ctx.registry.slot(i) else {
                break;
            };
            let Some(other) = ctx.registry.slot(x) else {
                continue;
            };
            if overlaps(this.hitbox(), other.hitbox()) {
                resolve_touch(ctx, i, x);
                touches += 1;
            }
        }
    }

    let kills = before - ctx.registry.len();
    ctx.registry.compact();
    ScanReport { touches, kills }
}

/// Apply the toucher's behavior for one overlapping pair
pub fn resolve_touch(ctx: &mut TouchContext<'_>, this: usize, other: usize) {
    let Some(kind) = ctx.registry.slot(this).map(|e| e.kind) else {
        return;
    };
    match kind {
        EntityKind::Player => player_touch(ctx, this, other),
        EntityKind::Collectible | EntityKind::Hazard | EntityKind::Wanderer => {
            catch_infection(ctx, this, other)
        }
    }
}

fn catch_infection(ctx: &mut TouchContext<'_>, this: usize, other: usize) {
    let Some(source) = ctx.registry.slot(other).filter(|o| o.infected()).map(|o| o.id) else {
        return;
    };
    if let Some(target) = ctx.registry.slot_mut(this) {
        if !target.infected() {
            target.infect();
            log::debug!("{:?} {} infected by {}", target.kind, target.id, source);
            ctx.events.push(GameEvent::Infected {
                id: target.id,
                by: source,
            });
        }
    }
}

fn player_touch(ctx: &mut TouchContext<'_>, this: usize, other: usize) {
    catch_infection(ctx, this, other);

    let Some(collectible) = ctx
        .registry
        .slot(other)
        .filter(|o| o.kind == EntityKind::Collectible)
        .map(|o| o.id)
    else {
        return;
    };
    consume(ctx, other, collectible);
}

fn consume(ctx: &mut TouchContext<'_>, slot: usize, id: EntityId) {
    let points = ctx.tuning.collectible_bonus;
    ctx.tracker.award(points);
    ctx.registry.kill_slot(slot);
    ctx.events.push(GameEvent::CollectibleConsumed { id, points });

    let factor = ctx.tuning.speed_up_factor;
    let mut boosted = 0;
    for entity in ctx.registry.iter_mut().filter(|e| !e.player_controlled()) {
        entity.speed_up(factor);
        boosted += 1;
    }
    log::debug!("collectible {} eaten, {} entities sped up x{}", id, boosted, factor);
    ctx.events.push(GameEvent::SpeedUp { factor, boosted });
}
