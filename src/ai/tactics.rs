//! Named special-case policies.
//!
//! Each removal-effect family gets exactly one policy, dispatched by an
//! exhaustive match over `Tactic`. A policy may veto the activation,
//! force one specific target, narrow the candidate pool, or defer to the
//! generic pipeline. Policies are pure: a veto leaves pool and selection
//! untouched, so the caller can refuse without any rollback.

use crate::ability::{AbilityDescriptor, Tactic, TargetRestrictions};
use crate::ai::{pool, rank};
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::object::Permanent;
use crate::oracle::AiOracle;
use crate::tuning;
use crate::types::Phase;

/// A pool-level policy's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolVerdict {
    /// Refuse the activation outright.
    Veto,
    /// Keep going with a narrowed pool.
    Narrowed(Vec<ObjectId>),
    /// No pool-level opinion; the generic pipeline proceeds unchanged.
    Defer(Vec<ObjectId>),
}

/// Apply the ability's pool-level tactic, if any.
///
/// Only the cheap-targets and better-than-source tactics rewrite the pool;
/// the remaining tactics act at other stages (short-circuit, choice time,
/// or the defined-targets path) and defer here.
pub fn adjust_pool(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    ability: &AbilityDescriptor,
    candidates: Vec<ObjectId>,
) -> PoolVerdict {
    match ability.tactic {
        Some(Tactic::CheapTargetsOnly) => {
            let cap = cheap_removal_cap(game, agent);
            let narrowed = candidates
                .into_iter()
                .filter(|&id| game.permanent(id).is_some_and(|p| p.mana_value <= cap))
                .collect();
            PoolVerdict::Narrowed(narrowed)
        }
        Some(Tactic::BetterThanSource) => {
            match narrow_better_than_source(game, oracle, agent, ability.source, candidates) {
                Some(narrowed) => PoolVerdict::Narrowed(narrowed),
                None => PoolVerdict::Veto,
            }
        }
        Some(
            Tactic::TransformWorst
            | Tactic::AvoidMutualRuin
            | Tactic::TokenReplacement
            | Tactic::LandDenial
            | Tactic::SelfWipe,
        )
        | None => PoolVerdict::Defer(candidates),
    }
}

/// Mana-value ceiling for the cheap-removal tactic, relaxed once the agent
/// has already lost a permanent this turn.
pub fn cheap_removal_cap(game: &GameState, agent: PlayerId) -> u32 {
    if game.player(agent).lost_permanent_this_turn {
        tuning::CHEAP_REMOVAL_MANA_CAP_RELAXED
    } else {
        tuning::CHEAP_REMOVAL_MANA_CAP
    }
}

/// Better-than-source narrowing, shared by the activated and triggered
/// paths.
///
/// Returns `None` to veto: the source already wears a beneficial aura the
/// agent controls, so trading it away throws that investment away. An aura
/// someone else controls leaves the pool unchanged. Otherwise candidates
/// must beat the source's value by a fixed margin.
pub fn narrow_better_than_source(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    source: ObjectId,
    candidates: Vec<ObjectId>,
) -> Option<Vec<ObjectId>> {
    let Some(source_permanent) = game.permanent(source) else {
        return Some(candidates);
    };
    if let Some(&first_aura) = source_permanent.enchanted_by.first() {
        if game
            .permanent(first_aura)
            .is_some_and(|aura| aura.controller == agent)
        {
            return None;
        }
        return Some(candidates);
    }
    let floor = oracle.evaluate(game, source_permanent) + tuning::BETTER_THAN_SOURCE_MARGIN;
    Some(
        candidates
            .into_iter()
            .filter(|&id| {
                game.permanent(id)
                    .is_some_and(|p| oracle.evaluate(game, p) > floor)
            })
            .collect(),
    )
}

/// Transform-worst short-circuit: the effect turns one of the agent's own
/// permanents into something else, so feed it the most expendable body.
///
/// An indestructible candidate is ideal (the destruction half fizzles and
/// the upside remains). Otherwise take the least valuable candidate, but
/// refuse when even the worst one is a real creature or a card that cost
/// real mana. `None` means refuse.
pub fn transform_worst(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    restrictions: &TargetRestrictions,
) -> Option<ObjectId> {
    let candidates = pool::build_own_pool(game, agent, restrictions);
    if candidates.is_empty() {
        return None;
    }
    for &id in &candidates {
        if game.permanent(id).is_some_and(pool::is_immune) {
            return Some(id);
        }
    }
    let worst = rank::worst_permanent(game, oracle, &candidates)?;
    let permanent = game.permanent(worst)?;
    if permanent.is_creature()
        && oracle.evaluate(game, permanent) >= tuning::TRANSFORM_CREATURE_VALUE_CAP
    {
        return None;
    }
    if !permanent.is_creature() && permanent.mana_value > tuning::TRANSFORM_NONCREATURE_MANA_CAP {
        return None;
    }
    Some(worst)
}

/// Mutual-destruction gate: the effect also costs the agent its best
/// creature, so only proceed when the chosen target is clearly better.
pub fn mutual_ruin_approves(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    choice: &Permanent,
) -> bool {
    let own = game.creatures_controlled_by(agent);
    let own_ids: Vec<ObjectId> = own.iter().map(|c| c.id).collect();
    let Some(best_own) = rank::best_creature(game, oracle, &own_ids) else {
        // Nothing of the agent's to lose.
        return true;
    };
    let Some(best_own) = game.permanent(best_own) else {
        return true;
    };
    oracle.evaluate(game, best_own) <= oracle.evaluate(game, choice) - tuning::MUTUAL_RUIN_MARGIN
}

/// Token-replacement gate: destruction hands the controller a replacement
/// token, so the trade must still net enough value. Before blockers are
/// declared the token cannot ambush the agent in combat, so early
/// activations always proceed.
pub fn token_replacement_approves(
    game: &GameState,
    oracle: &dyn AiOracle,
    ability: &AbilityDescriptor,
    choice: &Permanent,
) -> bool {
    let Some(token) = oracle.replacement_token(game, choice.controller, ability) else {
        // No linked token: plain removal.
        return true;
    };
    if game.turn.phase.is_before(Phase::DeclareBlockers) {
        return true;
    }
    oracle.evaluate(game, choice) * tuning::TOKEN_TRADE_DEN
        >= oracle.evaluate(game, &token) * tuning::TOKEN_TRADE_NUM
}

/// Self-wipe gate for defined-target board wipes that hit the agent's own
/// side: refuse whenever the blowup lands at a bad moment for the agent.
pub fn self_wipe_approves(game: &GameState, agent: PlayerId, ability: &AbilityDescriptor) -> bool {
    if game
        .permanent(ability.source)
        .is_some_and(|source| source.controller == agent)
    {
        return false;
    }
    let own_creatures = game.creatures_controlled_by(agent).len();
    let most_opposing = game
        .opponents_of(agent)
        .into_iter()
        .map(|opponent| game.creatures_controlled_by(opponent).len())
        .max()
        .unwrap_or(0);
    if own_creatures < most_opposing {
        return false;
    }
    if !game.is_player_turn(agent) {
        return false;
    }
    game.player(agent).life > tuning::SELF_WIPE_LIFE_FLOOR
}
