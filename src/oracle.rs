//! Collaborator oracles.
//!
//! The engine consults external judgment through `AiOracle`: board-value
//! scoring, cost feasibility, mana affordability for X costs, linked-token
//! lookups and the caller-side anti-loop guard. `StandardOracle` is the
//! stock implementation; tests substitute their own to pin exact values.
//!
//! Scores must be stable within one decision call; the engine may evaluate
//! the same permanent several times and assumes it gets the same answer.

use crate::ability::AbilityDescriptor;
use crate::cost::Cost;
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::object::Permanent;
use crate::tuning;
use crate::types::{CardType, CounterKind, Keyword, Supertype};

/// External judgment consumed by the decision engine.
pub trait AiOracle {
    /// Monotonic proxy for how much board value `permanent` represents.
    fn evaluate(&self, game: &GameState, permanent: &Permanent) -> i32;

    /// Whether sacrificing to pay `cost` is acceptable for `player` now.
    fn can_pay_sacrifice(
        &self,
        game: &GameState,
        player: PlayerId,
        cost: &Cost,
        source: ObjectId,
    ) -> bool;

    /// Whether paying the life component of `cost` keeps `margin` life in
    /// reserve.
    fn can_pay_life(&self, game: &GameState, player: PlayerId, cost: &Cost, margin: i32) -> bool;

    /// Whether `player` can afford the discard component of `cost`.
    fn can_pay_discard(&self, game: &GameState, player: PlayerId, cost: &Cost) -> bool;

    /// Largest X the player could pay for this ability right now.
    fn max_affordable_x(
        &self,
        game: &GameState,
        player: PlayerId,
        ability: &AbilityDescriptor,
    ) -> u32;

    /// The token the ability's linked effect would hand `controller` in
    /// place of a destroyed permanent, if any.
    fn replacement_token(
        &self,
        game: &GameState,
        controller: PlayerId,
        ability: &AbilityDescriptor,
    ) -> Option<Permanent>;

    /// Caller-side repetition guard: true if the agent has been activating
    /// this ability in a loop without making progress.
    fn is_overactivated(&self, ability: &AbilityDescriptor) -> bool;
}

/// Stock oracle implementation.
///
/// The creature evaluator is a deliberately coarse linear score: stats
/// dominate, evasion and combat keywords add a flat bonus, mana value
/// nudges expensive cards upward. It only needs to rank permanents
/// consistently, not appraise them precisely.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOracle;

impl StandardOracle {
    pub fn new() -> Self {
        Self
    }

    fn evaluate_creature(&self, permanent: &Permanent) -> i32 {
        let mut value =
            30 * permanent.effective_power() + 20 * permanent.effective_toughness();
        value += 5 * permanent.mana_value as i32;
        for keyword in [
            Keyword::Flying,
            Keyword::Deathtouch,
            Keyword::Lifelink,
            Keyword::Trample,
        ] {
            if permanent.has_keyword(keyword) {
                value += 15;
            }
        }
        if permanent.has_keyword(Keyword::Indestructible) {
            value += 25;
        }
        if permanent.has_supertype(Supertype::Legendary) {
            value += 20;
        }
        value
    }
}

impl AiOracle for StandardOracle {
    fn evaluate(&self, _game: &GameState, permanent: &Permanent) -> i32 {
        if permanent.is_creature() {
            self.evaluate_creature(permanent)
        } else if permanent.is_land() {
            if permanent.produces_mana { 40 } else { 10 }
        } else if permanent.has_type(CardType::Planeswalker) {
            // A planeswalker's remaining loyalty is most of its worth.
            35 * permanent.mana_value as i32
                + 20 * permanent.counters(CounterKind::Loyalty) as i32
        } else {
            35 * permanent.mana_value as i32
        }
    }

    fn can_pay_sacrifice(
        &self,
        game: &GameState,
        player: PlayerId,
        cost: &Cost,
        source: ObjectId,
    ) -> bool {
        if cost.sacrifice_source {
            // The source pays for itself; nothing else is given up.
            return true;
        }
        let Some(filter) = &cost.sacrifice else {
            return true;
        };
        // Acceptable only if some matching permanent is expendable, either
        // flagged as such by card data or simply low-value.
        game.permanents_controlled_by(player).into_iter().any(|permanent| {
            permanent.id != source
                && filter.matches(permanent)
                && (permanent.expendable
                    || self.evaluate(game, permanent) < tuning::SACRIFICE_VALUE_CEILING)
        })
    }

    fn can_pay_life(&self, game: &GameState, player: PlayerId, cost: &Cost, margin: i32) -> bool {
        if cost.life == 0 {
            return true;
        }
        game.player(player).life - cost.life as i32 > margin
    }

    fn can_pay_discard(&self, game: &GameState, player: PlayerId, cost: &Cost) -> bool {
        cost.discard == 0 || game.cards_in_hand(player).len() >= cost.discard as usize
    }

    fn max_affordable_x(
        &self,
        game: &GameState,
        player: PlayerId,
        ability: &AbilityDescriptor,
    ) -> u32 {
        game.player(player)
            .available_mana
            .saturating_sub(ability.cost.mana)
    }

    fn replacement_token(
        &self,
        _game: &GameState,
        controller: PlayerId,
        ability: &AbilityDescriptor,
    ) -> Option<Permanent> {
        ability
            .spawns_token
            .as_ref()
            .map(|blueprint| blueprint.materialize(controller))
    }

    fn is_overactivated(&self, _ability: &AbilityDescriptor) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::SacrificeFilter;
    use crate::object::PermanentBuilder;
    use crate::types::CardType;

    #[test]
    fn test_bigger_creature_scores_higher() {
        let game = GameState::new(2);
        let oracle = StandardOracle::new();
        let small = PermanentBuilder::creature("Mons's Goblin Raiders", 1, 1).build();
        let big = PermanentBuilder::creature("Craw Wurm", 6, 4).mana_value(6).build();
        assert!(oracle.evaluate(&game, &big) > oracle.evaluate(&game, &small));
    }

    #[test]
    fn test_keywords_raise_value() {
        let game = GameState::new(2);
        let oracle = StandardOracle::new();
        let vanilla = PermanentBuilder::creature("Grizzly Bears", 2, 2).build();
        let flyer = PermanentBuilder::creature("Azure Drake", 2, 2)
            .keyword(Keyword::Flying)
            .build();
        assert!(oracle.evaluate(&game, &flyer) > oracle.evaluate(&game, &vanilla));
    }

    #[test]
    fn test_legendary_raises_value() {
        let game = GameState::new(2);
        let oracle = StandardOracle::new();
        let plain = PermanentBuilder::creature("Hill Giant", 3, 3).build();
        let legend = PermanentBuilder::creature("Jedit Ojanen", 3, 3)
            .supertype(crate::types::Supertype::Legendary)
            .build();
        assert_eq!(
            oracle.evaluate(&game, &legend),
            oracle.evaluate(&game, &plain) + 20
        );
    }

    #[test]
    fn test_planeswalker_value_tracks_loyalty() {
        let game = GameState::new(2);
        let oracle = StandardOracle::new();
        let fresh = PermanentBuilder::new("Jace Beleren")
            .card_type(CardType::Planeswalker)
            .mana_value(3)
            .counters(crate::types::CounterKind::Loyalty, 3)
            .build();
        let spent = PermanentBuilder::new("Jace Beleren")
            .card_type(CardType::Planeswalker)
            .mana_value(3)
            .counters(crate::types::CounterKind::Loyalty, 1)
            .build();
        assert!(oracle.evaluate(&game, &fresh) > oracle.evaluate(&game, &spent));
    }

    #[test]
    fn test_life_payment_keeps_margin() {
        let mut game = GameState::new(2);
        let agent = PlayerId::from_index(0);
        let oracle = StandardOracle::new();
        let cost = Cost::free().with_life(3);
        assert!(oracle.can_pay_life(&game, agent, &cost, 4));
        game.player_mut(agent).life = 7;
        assert!(!oracle.can_pay_life(&game, agent, &cost, 4));
    }

    #[test]
    fn test_sacrifice_needs_expendable_material() {
        let mut game = GameState::new(2);
        let agent = PlayerId::from_index(0);
        let oracle = StandardOracle::new();
        let source = ObjectId::new();
        let cost = Cost::free().with_sacrifice(SacrificeFilter::of_type(CardType::Creature));

        assert!(!oracle.can_pay_sacrifice(&game, agent, &cost, source));
        game.add_permanent(
            PermanentBuilder::creature("Festering Goblin", 1, 1)
                .controller(agent)
                .build(),
        );
        assert!(oracle.can_pay_sacrifice(&game, agent, &cost, source));
    }

    #[test]
    fn test_sacrifice_refuses_when_only_prized_material() {
        let mut game = GameState::new(2);
        let agent = PlayerId::from_index(0);
        let oracle = StandardOracle::new();
        let source = ObjectId::new();
        let cost = Cost::free().with_sacrifice(SacrificeFilter::of_type(CardType::Creature));
        game.add_permanent(
            PermanentBuilder::creature("Serra Angel", 4, 4)
                .controller(agent)
                .keyword(Keyword::Flying)
                .mana_value(5)
                .build(),
        );
        assert!(!oracle.can_pay_sacrifice(&game, agent, &cost, source));
    }

    #[test]
    fn test_max_affordable_x_subtracts_fixed_mana() {
        let mut game = GameState::new(2);
        let agent = PlayerId::from_index(0);
        game.player_mut(agent).available_mana = 5;
        let oracle = StandardOracle::new();
        let ability = AbilityDescriptor::new(
            ObjectId::new(),
            Cost::mana(3).with_x(),
            crate::ability::TargetMode::None,
        );
        assert_eq!(oracle.max_affordable_x(&game, agent, &ability), 2);
    }
}
