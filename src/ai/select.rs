//! The incremental target-selection loop.
//!
//! Selection is a small state machine: SELECTING until the resolved
//! maximum is reached (SUCCESS), the pool runs dry above the minimum
//! (PARTIAL_SUCCESS) or something forces a bail-out (ABORT). The loop
//! builds a fresh local selection and returns it by value; an abort simply
//! drops it, so no partial selection is ever visible to the caller.

use crate::ability::{AbilityDescriptor, Tactic, TargetRestrictions};
use crate::ai::{pool, rank, tactics, tempo};
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::oracle::AiOracle;
use crate::tuning;
use crate::types::{CardType, Keyword};

/// Terminal state of one selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Resolved maximum reached.
    Success(Vec<ObjectId>),
    /// Pool ran dry, but the selection satisfies the resolved minimum.
    Partial(Vec<ObjectId>),
    /// No acceptable selection; nothing is kept.
    Abort,
}

impl SelectionOutcome {
    pub fn targets(&self) -> Option<&[ObjectId]> {
        match self {
            SelectionOutcome::Success(targets) | SelectionOutcome::Partial(targets) => {
                Some(targets)
            }
            SelectionOutcome::Abort => None,
        }
    }
}

/// Run the generic selection loop over an already-filtered pool.
pub fn run_selection(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    ability: &AbilityDescriptor,
    restrictions: &TargetRestrictions,
    mut candidates: Vec<ObjectId>,
    max_targets: u32,
) -> SelectionOutcome {
    let mut chosen: Vec<ObjectId> = Vec::new();

    while (chosen.len() as u32) < max_targets {
        if candidates.is_empty() {
            return stop_short(chosen, restrictions.min_targets);
        }

        let picked = if rank::all_of_type(game, &candidates, CardType::Creature) {
            let Some(pick) = rank::best_creature(game, oracle, &candidates) else {
                return stop_short(chosen, restrictions.min_targets);
            };
            let Some(permanent) = game.permanent(pick) else {
                return stop_short(chosen, restrictions.min_targets);
            };
            if ability.tactic == Some(Tactic::AvoidMutualRuin)
                && !tactics::mutual_ruin_approves(game, oracle, agent, permanent)
            {
                return SelectionOutcome::Abort;
            }
            if ability.tactic == Some(Tactic::TokenReplacement)
                && !tactics::token_replacement_approves(game, oracle, ability, permanent)
            {
                return SelectionOutcome::Abort;
            }
            pick
        } else if rank::all_of_type(game, &candidates, CardType::Land) {
            let Some(pick) = rank::best_land(game, &candidates) else {
                return stop_short(chosen, restrictions.min_targets);
            };
            if ability.tactic == Some(Tactic::LandDenial) {
                let Some(permanent) = game.permanent(pick) else {
                    return stop_short(chosen, restrictions.min_targets);
                };
                if !tempo::approves_land_removal(game, agent, permanent) {
                    return SelectionOutcome::Abort;
                }
            }
            pick
        } else {
            let Some(pick) = rank::most_expensive(game, oracle, &candidates) else {
                return stop_short(chosen, restrictions.min_targets);
            };
            pick
        };

        // Holding single-shot removal for a better moment only makes sense
        // for one optional target.
        if !ability.is_trigger
            && restrictions.max_targets == 1
            && should_hold_removal(game, oracle, agent, picked)
        {
            return SelectionOutcome::Abort;
        }

        let mut committed = redirect_stolen(game, agent, restrictions, picked);
        if chosen.contains(&committed) {
            // The stealing aura is already targeted; fall back to the
            // original pick rather than double-targeting.
            committed = picked;
        }
        candidates.retain(|&id| id != picked && id != committed);
        chosen.push(committed);
    }

    SelectionOutcome::Success(chosen)
}

fn stop_short(chosen: Vec<ObjectId>, min_targets: u32) -> SelectionOutcome {
    if !chosen.is_empty() && chosen.len() as u32 >= min_targets {
        SelectionOutcome::Partial(chosen)
    } else {
        SelectionOutcome::Abort
    }
}

/// Whether a clearly better opposing creature is currently out of reach
/// (untargetable or protected), making it worth saving the removal.
fn should_hold_removal(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    choice: ObjectId,
) -> bool {
    let Some(choice) = game.permanent(choice) else {
        return false;
    };
    if !choice.is_creature() {
        return false;
    }
    let chosen_value = oracle.evaluate(game, choice);
    game.opponents_of(agent)
        .into_iter()
        .flat_map(|opponent| game.creatures_controlled_by(opponent))
        .filter(|threat| threat.id != choice.id && is_out_of_reach(threat))
        .any(|threat| oracle.evaluate(game, threat) > chosen_value + tuning::HOLD_REMOVAL_MARGIN)
}

// Indestructible is deliberately absent: a window never opens for a
// permanently immune threat, so it is not worth holding removal for.
fn is_out_of_reach(threat: &crate::object::Permanent) -> bool {
    threat.has_keyword(Keyword::Hexproof)
        || threat.has_keyword(Keyword::Shroud)
        || threat.shield_count > 0
}

/// Don't destroy the agent's own stolen card: when the chosen permanent is
/// owned by the agent but held by a control-stealing aura, and that aura
/// is itself a legal target, point the removal at the aura instead.
fn redirect_stolen(
    game: &GameState,
    agent: PlayerId,
    restrictions: &TargetRestrictions,
    choice: ObjectId,
) -> ObjectId {
    let Some(permanent) = game.permanent(choice) else {
        return choice;
    };
    if permanent.owner != agent {
        return choice;
    }
    for &aura_id in &permanent.enchanted_by {
        let Some(aura) = game.permanent(aura_id) else {
            continue;
        };
        if aura.steals_control
            && aura.controller != agent
            && restrictions.filter.can_target(game, agent, aura)
        {
            return aura_id;
        }
    }
    choice
}

/// Selection for the triggered variant: the effect will resolve whether or
/// not the agent benefits, so fill from a preferred pool first and backfill
/// from everything else.
///
/// `None` means refuse. The preferred pool is opponent-controlled,
/// non-immune and unshielded (unless regeneration is denied anyway);
/// the fallback pool is every other legal candidate, drained
/// worst-creature-first (or cheapest-first) until the minimum is met.
pub fn run_forced_selection(
    game: &GameState,
    oracle: &dyn AiOracle,
    agent: PlayerId,
    ability: &AbilityDescriptor,
    restrictions: &TargetRestrictions,
    mandatory: bool,
) -> Option<Vec<ObjectId>> {
    let full = pool::build_full_pool(game, agent, restrictions);
    if full.is_empty() || (full.len() as u32) < restrictions.min_targets {
        return None;
    }

    let opponents = game.opponents_of(agent);
    let mut preferred: Vec<ObjectId> = full
        .iter()
        .copied()
        .filter(|&id| {
            game.permanent(id).is_some_and(|permanent| {
                opponents.contains(&permanent.controller)
                    && !pool::is_immune(permanent)
                    && (ability.no_regen || permanent.shield_count == 0)
            })
        })
        .collect();

    if ability.tactic == Some(Tactic::BetterThanSource) {
        preferred = tactics::narrow_better_than_source(
            game,
            oracle,
            agent,
            ability.source,
            preferred,
        )
        .unwrap_or_default();
    }

    let mut fallback: Vec<ObjectId> = full
        .iter()
        .copied()
        .filter(|id| !preferred.contains(id))
        .collect();

    if preferred.is_empty() && !mandatory {
        return None;
    }

    let mut chosen: Vec<ObjectId> = Vec::new();
    while (chosen.len() as u32) < restrictions.max_targets && !preferred.is_empty() {
        let pick = if rank::all_of_type(game, &preferred, CardType::Creature) {
            rank::best_creature(game, oracle, &preferred)
        } else if rank::all_of_type(game, &preferred, CardType::Land) {
            rank::best_land(game, &preferred)
        } else {
            rank::most_expensive(game, oracle, &preferred)
        };
        let Some(pick) = pick else { break };
        preferred.retain(|&id| id != pick);
        chosen.push(pick);
    }

    while (chosen.len() as u32) < restrictions.min_targets && !fallback.is_empty() {
        let pick = if rank::all_of_type(game, &fallback, CardType::Creature) {
            rank::worst_creature(game, oracle, &fallback)
        } else {
            rank::cheapest(game, &fallback)
        };
        let Some(pick) = pick else { break };
        fallback.retain(|&id| id != pick);
        chosen.push(pick);
    }

    if (chosen.len() as u32) < restrictions.min_targets && !mandatory {
        return None;
    }
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{TargetFilter, TargetMode};
    use crate::cost::Cost;
    use crate::object::PermanentBuilder;
    use crate::oracle::StandardOracle;

    fn agent() -> PlayerId {
        PlayerId::from_index(0)
    }

    fn opponent() -> PlayerId {
        PlayerId::from_index(1)
    }

    fn creature_removal(game: &mut GameState, min: u32, max: u32) -> AbilityDescriptor {
        let source = game.add_permanent(
            PermanentBuilder::new("Dark Banishing")
                .controller(agent())
                .zone(crate::types::Zone::Stack)
                .build(),
        );
        AbilityDescriptor::new(
            source,
            Cost::free(),
            TargetMode::Targeted(TargetRestrictions::counted(
                min,
                max,
                TargetFilter::of_type(CardType::Creature),
            )),
        )
    }

    #[test]
    fn test_success_when_max_reached() {
        let mut game = GameState::new(2);
        let prey = game.add_permanent(
            PermanentBuilder::creature("Sengir Vampire", 4, 4).controller(opponent()).build(),
        );
        let ability = creature_removal(&mut game, 1, 1);
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![prey],
            1,
        );
        assert_eq!(outcome, SelectionOutcome::Success(vec![prey]));
    }

    #[test]
    fn test_partial_when_pool_dries_above_min() {
        let mut game = GameState::new(2);
        let only = game.add_permanent(
            PermanentBuilder::creature("Alpine Grizzly", 4, 2).controller(opponent()).build(),
        );
        let ability = creature_removal(&mut game, 1, 3);
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![only],
            3,
        );
        assert_eq!(outcome, SelectionOutcome::Partial(vec![only]));
    }

    #[test]
    fn test_abort_when_pool_dries_below_min() {
        let mut game = GameState::new(2);
        let only = game.add_permanent(
            PermanentBuilder::creature("Alpine Grizzly", 4, 2).controller(opponent()).build(),
        );
        let ability = creature_removal(&mut game, 2, 3);
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![only],
            3,
        );
        assert_eq!(outcome, SelectionOutcome::Abort);
    }

    #[test]
    fn test_stops_at_resolved_max_with_pool_left() {
        let mut game = GameState::new(2);
        let mut ids = Vec::new();
        for (name, power) in [("Azure Drake", 2), ("Fire Drake", 3), ("Canopy Dragon", 4)] {
            ids.push(game.add_permanent(
                PermanentBuilder::creature(name, power, 3).controller(opponent()).build(),
            ));
        }
        let ability = creature_removal(&mut game, 1, 5);
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            ids.clone(),
            2,
        );
        let targets = outcome.targets().unwrap();
        assert_eq!(targets.len(), 2);
        // best-first: the two biggest drakes go first.
        assert!(targets.contains(&ids[2]));
        assert!(targets.contains(&ids[1]));
    }

    #[test]
    fn test_mixed_pool_picks_most_expensive() {
        let mut game = GameState::new(2);
        let cheap_creature = game.add_permanent(
            PermanentBuilder::creature("Goblin Raider", 1, 1)
                .controller(opponent())
                .mana_value(2)
                .build(),
        );
        let pricey_artifact = game.add_permanent(
            PermanentBuilder::new("Colossus of Sardia")
                .card_type(CardType::Artifact)
                .controller(opponent())
                .mana_value(9)
                .build(),
        );
        let source = game.add_permanent(
            PermanentBuilder::new("Vindicate")
                .controller(agent())
                .zone(crate::types::Zone::Stack)
                .build(),
        );
        let ability = AbilityDescriptor::new(
            source,
            Cost::free(),
            TargetMode::Targeted(TargetRestrictions::single(TargetFilter::any())),
        );
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![cheap_creature, pricey_artifact],
            1,
        );
        assert_eq!(outcome, SelectionOutcome::Success(vec![pricey_artifact]));
    }

    #[test]
    fn test_hold_removal_for_protected_threat() {
        let mut game = GameState::new(2);
        let lesser = game.add_permanent(
            PermanentBuilder::creature("Gray Ogre", 2, 2).controller(opponent()).build(),
        );
        // A far better threat hides behind shroud; hold the removal.
        game.add_permanent(
            PermanentBuilder::creature("Autochthon Wurm", 9, 14)
                .controller(opponent())
                .keyword(Keyword::Shroud)
                .build(),
        );
        let ability = creature_removal(&mut game, 1, 1);
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![lesser],
            1,
        );
        assert_eq!(outcome, SelectionOutcome::Abort);
    }

    #[test]
    fn test_trigger_ignores_hold_gate() {
        let mut game = GameState::new(2);
        let lesser = game.add_permanent(
            PermanentBuilder::creature("Gray Ogre", 2, 2).controller(opponent()).build(),
        );
        game.add_permanent(
            PermanentBuilder::creature("Autochthon Wurm", 9, 14)
                .controller(opponent())
                .keyword(Keyword::Shroud)
                .build(),
        );
        let ability = creature_removal(&mut game, 1, 1).as_trigger();
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![lesser],
            1,
        );
        assert_eq!(outcome, SelectionOutcome::Success(vec![lesser]));
    }

    #[test]
    fn test_stolen_permanent_redirects_to_aura() {
        let mut game = GameState::new(2);
        let aura = game.add_permanent(
            PermanentBuilder::new("Control Magic")
                .card_type(crate::types::CardType::Enchantment)
                .controller(opponent())
                .steals_control()
                .build(),
        );
        let stolen = game.add_permanent(
            PermanentBuilder::creature("Air Elemental", 4, 4)
                .owner(agent())
                .controlled_by(opponent())
                .enchanted_by(aura)
                .build(),
        );
        let source = game.add_permanent(
            PermanentBuilder::new("Vindicate")
                .controller(agent())
                .zone(crate::types::Zone::Stack)
                .build(),
        );
        // Restriction loose enough that the aura is also targetable.
        let ability = AbilityDescriptor::new(
            source,
            Cost::free(),
            TargetMode::Targeted(TargetRestrictions::single(TargetFilter::any())),
        );
        let restrictions = ability.restrictions().unwrap().clone();
        let outcome = run_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            vec![stolen],
            1,
        );
        assert_eq!(outcome, SelectionOutcome::Success(vec![aura]));
    }

    #[test]
    fn test_forced_fills_from_preferred_first() {
        let mut game = GameState::new(2);
        let own = game.add_permanent(
            PermanentBuilder::creature("Eager Cadet", 1, 1).controller(agent()).build(),
        );
        let theirs = game.add_permanent(
            PermanentBuilder::creature("Sengir Vampire", 4, 4).controller(opponent()).build(),
        );
        let ability = creature_removal(&mut game, 1, 1).as_trigger();
        let restrictions = ability.restrictions().unwrap().clone();
        let chosen = run_forced_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            false,
        )
        .unwrap();
        assert_eq!(chosen, vec![theirs]);
        assert!(!chosen.contains(&own));
    }

    #[test]
    fn test_forced_backfills_worst_creature_when_mandatory() {
        let mut game = GameState::new(2);
        // All the agent's own creatures: preferred pool is empty.
        let weakest = game.add_permanent(
            PermanentBuilder::creature("Ornithopter", 0, 2).controller(agent()).build(),
        );
        game.add_permanent(PermanentBuilder::creature("Hill Giant", 3, 3).controller(agent()).build());
        game.add_permanent(PermanentBuilder::creature("Craw Wurm", 6, 4).controller(agent()).build());
        let ability = creature_removal(&mut game, 1, 1).as_trigger();
        let restrictions = ability.restrictions().unwrap().clone();

        // Optional trigger refuses with no preferred candidates.
        assert_eq!(
            run_forced_selection(
                &game,
                &StandardOracle::new(),
                agent(),
                &ability,
                &restrictions,
                false,
            ),
            None
        );

        // Mandatory trigger backfills the least valuable creature.
        let chosen = run_forced_selection(
            &game,
            &StandardOracle::new(),
            agent(),
            &ability,
            &restrictions,
            true,
        )
        .unwrap();
        assert_eq!(chosen, vec![weakest]);
    }

    #[test]
    fn test_forced_refuses_below_min_candidates() {
        let mut game = GameState::new(2);
        game.add_permanent(PermanentBuilder::creature("Gray Ogre", 2, 2).controller(opponent()).build());
        let ability = creature_removal(&mut game, 2, 2).as_trigger();
        let restrictions = ability.restrictions().unwrap().clone();
        assert_eq!(
            run_forced_selection(
                &game,
                &StandardOracle::new(),
                agent(),
                &ability,
                &restrictions,
                true,
            ),
            None
        );
    }
}
