//! Type-aware ranking over candidate pools.
//!
//! The selection loop picks one candidate per round. When the pool is
//! homogeneous it uses the specialized creature or land ranking; otherwise
//! it falls back to generic cost/value ranking. All helpers resolve ties
//! by pool order, which the pool builder keeps sorted by id.

use crate::game_state::GameState;
use crate::ids::ObjectId;
use crate::object::Permanent;
use crate::oracle::AiOracle;
use crate::types::CardType;

/// True if every resolvable candidate has the given type.
pub fn all_of_type(game: &GameState, pool: &[ObjectId], card_type: CardType) -> bool {
    !pool.is_empty()
        && pool
            .iter()
            .filter_map(|&id| game.permanent(id))
            .all(|permanent| permanent.has_type(card_type))
}

fn pick_by_key(
    game: &GameState,
    pool: &[ObjectId],
    mut key: impl FnMut(&Permanent) -> i64,
) -> Option<ObjectId> {
    let mut best: Option<(ObjectId, i64)> = None;
    for &id in pool {
        let Some(permanent) = game.permanent(id) else {
            continue;
        };
        let score = key(permanent);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((id, score)),
        }
    }
    best.map(|(id, _)| id)
}

/// Highest-valued creature in the pool.
pub fn best_creature(
    game: &GameState,
    oracle: &dyn AiOracle,
    pool: &[ObjectId],
) -> Option<ObjectId> {
    pick_by_key(game, pool, |permanent| oracle.evaluate(game, permanent) as i64)
}

/// Lowest-valued creature in the pool.
pub fn worst_creature(
    game: &GameState,
    oracle: &dyn AiOracle,
    pool: &[ObjectId],
) -> Option<ObjectId> {
    pick_by_key(game, pool, |permanent| -(oracle.evaluate(game, permanent) as i64))
}

/// Lowest-valued permanent of any type (transform-worst tactic).
pub fn worst_permanent(
    game: &GameState,
    oracle: &dyn AiOracle,
    pool: &[ObjectId],
) -> Option<ObjectId> {
    pick_by_key(game, pool, |permanent| -(oracle.evaluate(game, permanent) as i64))
}

/// The land whose destruction hurts its controller most: nonbasic lands
/// first, then basics the controller holds the fewest copies of.
pub fn best_land(game: &GameState, pool: &[ObjectId]) -> Option<ObjectId> {
    pick_by_key(game, pool, |land| land_denial_score(game, land))
}

fn land_denial_score(game: &GameState, land: &Permanent) -> i64 {
    if !land.produces_mana {
        return 5;
    }
    if !land.is_basic_land() {
        return 60 + land.mana_value as i64;
    }
    let copies = game
        .lands_controlled_by(land.controller)
        .into_iter()
        .filter(|other| other.name == land.name)
        .count() as i64;
    (40 - 10 * copies).max(10)
}

/// Most valuable permanent by generic cost-then-value ranking.
pub fn most_expensive(
    game: &GameState,
    oracle: &dyn AiOracle,
    pool: &[ObjectId],
) -> Option<ObjectId> {
    // Mana value dominates; the oracle score only breaks ties.
    pick_by_key(game, pool, |permanent| {
        permanent.mana_value as i64 * 1_000_000 + oracle.evaluate(game, permanent) as i64
    })
}

/// Cheapest permanent by mana value (triggered-ability backfill).
pub fn cheapest(game: &GameState, pool: &[ObjectId]) -> Option<ObjectId> {
    pick_by_key(game, pool, |permanent| -(permanent.mana_value as i64))
}
