//! Candidate pool construction and the ordered filter pipeline.
//!
//! A pool is a plain `Vec<ObjectId>` threaded through the whole decision:
//! built once, narrowed by tactics and filters, consumed by the selection
//! loop. Pools only ever shrink. Each pipeline stage is a named predicate
//! so it can be tested in isolation; the stages run in a fixed order and
//! the pipeline stops early once the pool is empty.

use crate::ability::{AbilityDescriptor, TargetRestrictions};
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::object::Permanent;
use crate::types::{CounterKind, Keyword};

/// Opponents' battlefield permanents legal under the restriction.
pub fn build_opponent_pool(
    game: &GameState,
    agent: PlayerId,
    restrictions: &TargetRestrictions,
) -> Vec<ObjectId> {
    collect_pool(game, agent, restrictions, |permanent| {
        game.opponents_of(agent).contains(&permanent.controller)
    })
}

/// The agent's own battlefield permanents legal under the restriction
/// (transform-worst tactic).
pub fn build_own_pool(
    game: &GameState,
    agent: PlayerId,
    restrictions: &TargetRestrictions,
) -> Vec<ObjectId> {
    collect_pool(game, agent, restrictions, |permanent| {
        permanent.controller == agent
    })
}

/// Every battlefield permanent legal under the restriction, any controller
/// (triggered-ability variant).
pub fn build_full_pool(
    game: &GameState,
    agent: PlayerId,
    restrictions: &TargetRestrictions,
) -> Vec<ObjectId> {
    collect_pool(game, agent, restrictions, |_| true)
}

fn collect_pool(
    game: &GameState,
    agent: PlayerId,
    restrictions: &TargetRestrictions,
    side: impl Fn(&Permanent) -> bool,
) -> Vec<ObjectId> {
    let mut pool: Vec<ObjectId> = game
        .battlefield()
        .filter(|permanent| side(permanent))
        .filter(|permanent| restrictions.filter.can_target(game, agent, permanent))
        .map(|permanent| permanent.id)
        .collect();
    // Arena iteration order is arbitrary; sort for deterministic tie-breaks.
    pool.sort();
    pool
}

/// Indestructible-equivalent: destroy effects cannot remove this permanent.
pub fn is_immune(permanent: &Permanent) -> bool {
    permanent.has_keyword(Keyword::Indestructible)
}

/// The permanent would survive destruction on its own: it already holds a
/// regeneration shield or its controller can regenerate it in response.
pub fn can_save_itself(permanent: &Permanent) -> bool {
    permanent.shield_count > 0 || permanent.regeneration_available
}

/// The controller holds an immediately payable ability that sacrifices
/// this permanent, denying the removal any value.
pub fn can_sacrifice_in_response(game: &GameState, permanent: &Permanent) -> bool {
    permanent.activated_abilities.iter().any(|ability| {
        ability.cost.sacrifice_source
            && game.player(permanent.controller).available_mana >= ability.cost.mana
    })
}

/// Dying upgrades the creature (undying without a +1/+1 counter yet).
pub fn upgrades_on_death(permanent: &Permanent) -> bool {
    permanent.has_keyword(Keyword::Undying)
        && permanent.counters(CounterKind::PlusOnePlusOne) == 0
}

/// Run the generic filter pipeline over `pool`, in order:
///
/// 1. drop immune candidates;
/// 2. unless the ability denies regeneration, drop candidates that can
///    save themselves;
/// 3. unless the ability is reusable at will, drop candidates whose
///    controller can dodge or even profit from the removal (sacrifice in
///    response, expendable by design, upgrades on death).
///
/// Stops as soon as the pool is empty; the caller treats an empty result
/// as refusal.
pub fn apply_filter_pipeline(
    game: &GameState,
    ability: &AbilityDescriptor,
    pool: &mut Vec<ObjectId>,
) {
    pool.retain(|&id| game.permanent(id).is_some_and(|p| !is_immune(p)));
    if pool.is_empty() {
        return;
    }

    if !ability.no_regen {
        pool.retain(|&id| game.permanent(id).is_some_and(|p| !can_save_itself(p)));
        if pool.is_empty() {
            return;
        }
    }

    if !ability.reusable {
        pool.retain(|&id| {
            game.permanent(id).is_some_and(|p| {
                !can_sacrifice_in_response(game, p) && !p.expendable && !upgrades_on_death(p)
            })
        });
    }
}
