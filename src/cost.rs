//! Activation costs.
//!
//! A `Cost` is the conjunction of everything that must be paid to use an
//! ability: mana (possibly with a player-chosen X component), sacrificed
//! permanents, life, and discarded cards. The decision engine never pays
//! costs itself; it only asks the cost-feasibility oracle whether each
//! gated component is currently acceptable.

use crate::object::Permanent;
use crate::types::CardType;

/// Filter for permanents eligible to be sacrificed as part of a cost.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct SacrificeFilter {
    /// Required card type (`None` accepts any permanent).
    pub card_type: Option<CardType>,
}

impl SacrificeFilter {
    /// Accept any permanent.
    pub fn any() -> Self {
        Self::default()
    }

    /// Accept only permanents of the given type.
    pub fn of_type(card_type: CardType) -> Self {
        Self {
            card_type: Some(card_type),
        }
    }

    pub fn matches(&self, permanent: &Permanent) -> bool {
        match self.card_type {
            Some(card_type) => permanent.has_type(card_type),
            None => true,
        }
    }
}

/// A complete activation cost.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    /// Fixed generic mana component.
    pub mana: u32,
    /// Whether the mana cost carries a player-chosen X amount.
    pub has_x: bool,
    /// Whether paying requires sacrificing the ability's own source.
    pub sacrifice_source: bool,
    /// Sacrifice of another permanent matching the filter, if any.
    pub sacrifice: Option<SacrificeFilter>,
    /// Life payment component.
    pub life: u32,
    /// Number of cards to discard.
    pub discard: u32,
}

impl Cost {
    /// A free cost (triggered abilities, auras already on the battlefield).
    pub fn free() -> Self {
        Self::default()
    }

    /// A plain mana cost.
    pub fn mana(amount: u32) -> Self {
        Self {
            mana: amount,
            ..Self::default()
        }
    }

    /// Add an X component to the mana cost.
    pub fn with_x(mut self) -> Self {
        self.has_x = true;
        self
    }

    /// Add a life payment.
    pub fn with_life(mut self, amount: u32) -> Self {
        self.life = amount;
        self
    }

    /// Add a discard requirement.
    pub fn with_discard(mut self, cards: u32) -> Self {
        self.discard = cards;
        self
    }

    /// Add a sacrifice of another permanent.
    pub fn with_sacrifice(mut self, filter: SacrificeFilter) -> Self {
        self.sacrifice = Some(filter);
        self
    }

    /// Require sacrificing the source itself.
    pub fn sacrificing_source(mut self) -> Self {
        self.sacrifice_source = true;
        self
    }

    /// True if any sacrifice component is present.
    pub fn has_sacrifice(&self) -> bool {
        self.sacrifice_source || self.sacrifice.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;
    use crate::object::PermanentBuilder;

    #[test]
    fn test_cost_builders_compose() {
        let cost = Cost::mana(2)
            .with_x()
            .with_life(3)
            .with_sacrifice(SacrificeFilter::of_type(CardType::Creature));
        assert_eq!(cost.mana, 2);
        assert!(cost.has_x);
        assert_eq!(cost.life, 3);
        assert!(cost.has_sacrifice());
        assert!(!cost.sacrifice_source);
    }

    #[test]
    fn test_sacrifice_filter_matches_type() {
        let creature = PermanentBuilder::creature("Gray Ogre", 2, 2)
            .controller(PlayerId::from_index(0))
            .build();
        assert!(SacrificeFilter::any().matches(&creature));
        assert!(SacrificeFilter::of_type(CardType::Creature).matches(&creature));
        assert!(!SacrificeFilter::of_type(CardType::Land).matches(&creature));
    }
}
