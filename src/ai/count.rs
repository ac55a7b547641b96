//! Target-count resolution.

use crate::ability::AbilityDescriptor;
use crate::ability::TargetRestrictions;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::oracle::AiOracle;

/// Effective maximum number of targets for this activation.
///
/// Starts from the restriction's declared maximum; an X cost caps it at
/// the largest affordable amount, and a card-data hint caps it further.
/// Zero means the activation cannot target anything and must be refused.
pub fn resolve_max_targets(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    ability: &AbilityDescriptor,
    restrictions: &TargetRestrictions,
) -> u32 {
    let mut max = restrictions.max_targets;
    if ability.cost.has_x {
        max = max.min(oracle.max_affordable_x(game, agent, ability));
    }
    if let Some(hint) = ability.max_targets_hint {
        max = max.min(hint.resolve(game, agent));
    }
    max
}
