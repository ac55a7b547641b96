//! The removal decision engine.
//!
//! One synchronous call per activation attempt: given the game-state
//! snapshot, the oracles and an ability descriptor, decide whether to act
//! and which targets to commit. Every strategic infeasibility is a normal
//! `Refuse`; only malformed input from the rules engine is an error. The
//! returned target set is fresh and immutable — the caller commits it to
//! the ability in a single step on `Proceed`, so no rollback is ever
//! needed here.
//!
//! Pipeline: cost feasibility and the repetition guard run first; the
//! ability's tactic may short-circuit (transform-worst) or veto; otherwise
//! the candidate pool is built, narrowed by the tactic, reduced by the
//! filter pipeline, bounded by the count resolver and consumed by the
//! selection loop.

pub mod count;
pub mod pool;
pub mod rank;
pub mod select;
pub mod tactics;
pub mod tempo;

use crate::ability::{AbilityDescriptor, Tactic, TargetMode};
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::oracle::AiOracle;
use crate::tuning;

pub use select::SelectionOutcome;
pub use tactics::PoolVerdict;

/// The engine's answer for one activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovalDecision {
    /// Act, committing this target set (order-independent; size within the
    /// resolved minimum/maximum, possibly empty for untargeted effects).
    Proceed(Vec<ObjectId>),
    /// Do not act now. Strategic, not an error.
    Refuse,
}

impl RemovalDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, RemovalDecision::Proceed(_))
    }

    pub fn targets(&self) -> Option<&[ObjectId]> {
        match self {
            RemovalDecision::Proceed(targets) => Some(targets),
            RemovalDecision::Refuse => None,
        }
    }
}

/// Programmer errors from the calling rules engine. These are never
/// strategic refusals: masking a malformed call as "the agent chose not
/// to act" would hide the caller's bug.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionError {
    /// The ability's source object is not in the arena.
    MissingSource(ObjectId),
    /// The target restriction's bounds are inconsistent.
    MalformedRestrictions { min: u32, max: u32 },
}

impl std::fmt::Display for DecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionError::MissingSource(id) => {
                write!(f, "ability source {id:?} does not exist")
            }
            DecisionError::MalformedRestrictions { min, max } => {
                write!(f, "target restriction min {min} exceeds max {max}")
            }
        }
    }
}

impl std::error::Error for DecisionError {}

fn validate(game: &GameState, ability: &AbilityDescriptor) -> Result<(), DecisionError> {
    if game.permanent(ability.source).is_none() {
        return Err(DecisionError::MissingSource(ability.source));
    }
    if let Some(restrictions) = ability.restrictions() {
        if restrictions.min_targets > restrictions.max_targets {
            return Err(DecisionError::MalformedRestrictions {
                min: restrictions.min_targets,
                max: restrictions.max_targets,
            });
        }
    }
    Ok(())
}

/// Decide whether to activate a removal effect the agent controls, and
/// with which targets.
pub fn decide_removal(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    ability: &AbilityDescriptor,
) -> Result<RemovalDecision, DecisionError> {
    validate(game, ability)?;

    if !oracle.can_pay_sacrifice(game, agent, &ability.cost, ability.source)
        || !oracle.can_pay_life(game, agent, &ability.cost, tuning::LIFE_PAYMENT_MARGIN)
        || !oracle.can_pay_discard(game, agent, &ability.cost)
    {
        return Ok(RemovalDecision::Refuse);
    }
    if oracle.is_overactivated(ability) {
        return Ok(RemovalDecision::Refuse);
    }

    match &ability.target_mode {
        TargetMode::Targeted(restrictions) => {
            if ability.tactic == Some(Tactic::TransformWorst) {
                return Ok(match tactics::transform_worst(game, oracle, agent, restrictions) {
                    Some(target) => RemovalDecision::Proceed(vec![target]),
                    None => RemovalDecision::Refuse,
                });
            }

            let candidates = pool::build_opponent_pool(game, agent, restrictions);
            let mut candidates =
                match tactics::adjust_pool(game, oracle, agent, ability, candidates) {
                    PoolVerdict::Veto => return Ok(RemovalDecision::Refuse),
                    PoolVerdict::Narrowed(narrowed) | PoolVerdict::Defer(narrowed) => narrowed,
                };

            pool::apply_filter_pipeline(game, ability, &mut candidates);
            if candidates.is_empty() {
                return Ok(RemovalDecision::Refuse);
            }

            let max_targets =
                count::resolve_max_targets(game, oracle, agent, ability, restrictions);
            if max_targets == 0 {
                return Ok(RemovalDecision::Refuse);
            }

            Ok(
                match select::run_selection(
                    game,
                    oracle,
                    agent,
                    ability,
                    restrictions,
                    candidates,
                    max_targets,
                ) {
                    SelectionOutcome::Success(targets) | SelectionOutcome::Partial(targets) => {
                        RemovalDecision::Proceed(targets)
                    }
                    SelectionOutcome::Abort => RemovalDecision::Refuse,
                },
            )
        }
        TargetMode::Defined(defined) => Ok(decide_defined(game, agent, ability, defined)),
        TargetMode::None => Ok(RemovalDecision::Proceed(Vec::new())),
    }
}

/// Defined-target path: the effect names its own targets; the agent only
/// decides whether firing it is acceptable.
fn decide_defined(
    game: &GameState,
    agent: PlayerId,
    ability: &AbilityDescriptor,
    defined: &[ObjectId],
) -> RemovalDecision {
    if ability.tactic == Some(Tactic::SelfWipe)
        && !tactics::self_wipe_approves(game, agent, ability)
    {
        return RemovalDecision::Refuse;
    }

    let present: Vec<&crate::object::Permanent> = defined
        .iter()
        .filter_map(|&id| game.permanent(id))
        .filter(|permanent| permanent.zone == crate::types::Zone::Battlefield)
        .collect();
    if present.is_empty() {
        return RemovalDecision::Refuse;
    }
    if present.iter().all(|permanent| permanent.controller == agent) {
        return RemovalDecision::Refuse;
    }
    if present.iter().all(|permanent| pool::is_immune(permanent)) {
        return RemovalDecision::Refuse;
    }
    RemovalDecision::Proceed(present.into_iter().map(|permanent| permanent.id).collect())
}

/// Decide targets for the triggered variant: the effect will resolve
/// regardless of preference, so selection prefers good targets but can be
/// forced to take bad ones when `mandatory`.
pub fn decide_triggered_removal(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    ability: &AbilityDescriptor,
    mandatory: bool,
) -> Result<RemovalDecision, DecisionError> {
    validate(game, ability)?;

    match &ability.target_mode {
        TargetMode::Targeted(restrictions) => Ok(
            match select::run_forced_selection(
                game,
                oracle,
                agent,
                ability,
                restrictions,
                mandatory,
            ) {
                Some(targets) => RemovalDecision::Proceed(targets),
                None => RemovalDecision::Refuse,
            },
        ),
        TargetMode::Defined(defined) if mandatory => Ok(RemovalDecision::Proceed(
            defined
                .iter()
                .copied()
                .filter(|&id| game.permanent(id).is_some())
                .collect(),
        )),
        TargetMode::None if mandatory => Ok(RemovalDecision::Proceed(Vec::new())),
        _ => Ok(decide_optional_untargeted(game, agent, ability)),
    }
}

/// Optional trigger without open targeting: worth taking only when the
/// defined set reads like a generic activation would.
fn decide_optional_untargeted(
    game: &GameState,
    agent: PlayerId,
    ability: &AbilityDescriptor,
) -> RemovalDecision {
    match &ability.target_mode {
        TargetMode::Defined(defined) => decide_defined(game, agent, ability, defined),
        _ => RemovalDecision::Refuse,
    }
}
