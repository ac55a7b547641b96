//! Read-only permanent projections.
//!
//! The decision engine never owns live rules-engine objects. It works over
//! `Permanent`, a flat snapshot of everything a removal heuristic needs:
//! identity, controller/owner, type and keyword tags, counters, protective
//! state (shields, regeneration), attachment relations, and the game-data
//! hints the surrounding engine attaches to cards.

use std::collections::{HashMap, HashSet};

use crate::cost::Cost;
use crate::ids::{ObjectId, PlayerId};
use crate::types::{CardType, CounterKind, Keyword, Supertype, Zone};

/// An activated ability carried by a permanent, reduced to its cost.
///
/// The engine only inspects costs here: a permanent whose controller can
/// pay an ability that sacrifices the permanent itself can dodge removal
/// in response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivatedAbility {
    pub cost: Cost,
}

impl ActivatedAbility {
    pub fn with_cost(cost: Cost) -> Self {
        Self { cost }
    }
}

/// Snapshot of a game object as seen by the decision engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Permanent {
    pub id: ObjectId,
    pub name: String,
    pub owner: PlayerId,
    pub controller: PlayerId,
    pub zone: Zone,
    pub card_types: Vec<CardType>,
    pub supertypes: Vec<Supertype>,
    pub keywords: HashSet<Keyword>,
    pub counters: HashMap<CounterKind, u32>,
    /// Converted cost of the card, used as a generic value proxy.
    pub mana_value: u32,
    pub power: i32,
    pub toughness: i32,
    /// One-shot regeneration shields already paid for.
    pub shield_count: u32,
    /// Whether the controller could regenerate this permanent right now.
    pub regeneration_available: bool,
    /// Whether this land (or other permanent) taps for mana.
    pub produces_mana: bool,
    /// Game-data hint: this card prefers to be sacrificed for value.
    pub expendable: bool,
    /// Auras and equipment attached to this permanent, by id.
    pub enchanted_by: Vec<ObjectId>,
    /// True on auras whose effect steals control of the enchanted permanent.
    pub steals_control: bool,
    /// Activated abilities, reduced to their costs.
    pub activated_abilities: Vec<ActivatedAbility>,
    pub token: bool,
}

impl Permanent {
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    pub fn is_creature(&self) -> bool {
        self.has_type(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.has_type(CardType::Land)
    }

    pub fn is_basic_land(&self) -> bool {
        self.is_land() && self.has_supertype(Supertype::Basic)
    }

    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    pub fn counters(&self, kind: CounterKind) -> u32 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    /// Power including +1/+1 counters.
    pub fn effective_power(&self) -> i32 {
        self.power + self.counters(CounterKind::PlusOnePlusOne) as i32
    }

    /// Toughness including +1/+1 counters.
    pub fn effective_toughness(&self) -> i32 {
        self.toughness + self.counters(CounterKind::PlusOnePlusOne) as i32
    }

    pub fn has_supertype(&self, supertype: Supertype) -> bool {
        self.supertypes.contains(&supertype)
    }
}

/// Blueprint for a token a linked effect would create in place of a
/// destroyed permanent (exile-and-replace removal).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenBlueprint {
    pub name: String,
    pub power: i32,
    pub toughness: i32,
    pub keywords: Vec<Keyword>,
}

impl TokenBlueprint {
    pub fn new(name: impl Into<String>, power: i32, toughness: i32) -> Self {
        Self {
            name: name.into(),
            power,
            toughness,
            keywords: Vec::new(),
        }
    }

    /// Materialize the token as a battlefield permanent under `controller`.
    pub fn materialize(&self, controller: PlayerId) -> Permanent {
        PermanentBuilder::creature(self.name.clone(), self.power, self.toughness)
            .controller(controller)
            .keywords(&self.keywords)
            .token()
            .build()
    }
}

/// Builder for `Permanent` snapshots.
///
/// Tests and the rules-engine adapter both construct projections through
/// this builder so defaults stay in one place.
#[derive(Debug, Clone)]
pub struct PermanentBuilder {
    permanent: Permanent,
}

impl PermanentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            permanent: Permanent {
                id: ObjectId::new(),
                name: name.into(),
                owner: PlayerId::from_index(0),
                controller: PlayerId::from_index(0),
                zone: Zone::Battlefield,
                card_types: Vec::new(),
                supertypes: Vec::new(),
                keywords: HashSet::new(),
                counters: HashMap::new(),
                mana_value: 0,
                power: 0,
                toughness: 0,
                shield_count: 0,
                regeneration_available: false,
                produces_mana: false,
                expendable: false,
                enchanted_by: Vec::new(),
                steals_control: false,
                activated_abilities: Vec::new(),
                token: false,
            },
        }
    }

    /// Shorthand for a creature with the given stats.
    pub fn creature(name: impl Into<String>, power: i32, toughness: i32) -> Self {
        let mut builder = Self::new(name);
        builder.permanent.card_types.push(CardType::Creature);
        builder.permanent.power = power;
        builder.permanent.toughness = toughness;
        builder
    }

    /// Shorthand for a basic land that taps for mana.
    pub fn basic_land(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name);
        builder.permanent.card_types.push(CardType::Land);
        builder.permanent.supertypes.push(Supertype::Basic);
        builder.permanent.produces_mana = true;
        builder
    }

    /// Shorthand for a nonbasic land that taps for mana.
    pub fn nonbasic_land(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name);
        builder.permanent.card_types.push(CardType::Land);
        builder.permanent.produces_mana = true;
        builder
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        if !self.permanent.card_types.contains(&card_type) {
            self.permanent.card_types.push(card_type);
        }
        self
    }

    pub fn supertype(mut self, supertype: Supertype) -> Self {
        self.permanent.supertypes.push(supertype);
        self
    }

    pub fn owner(mut self, player: PlayerId) -> Self {
        self.permanent.owner = player;
        self
    }

    /// Set controller, and owner too if it has not diverged.
    pub fn controller(mut self, player: PlayerId) -> Self {
        if self.permanent.owner == self.permanent.controller {
            self.permanent.owner = player;
        }
        self.permanent.controller = player;
        self
    }

    /// Set controller without touching ownership (stolen permanents).
    pub fn controlled_by(mut self, player: PlayerId) -> Self {
        self.permanent.controller = player;
        self
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.permanent.zone = zone;
        self
    }

    pub fn mana_value(mut self, value: u32) -> Self {
        self.permanent.mana_value = value;
        self
    }

    pub fn keyword(mut self, keyword: Keyword) -> Self {
        self.permanent.keywords.insert(keyword);
        self
    }

    pub fn keywords(mut self, keywords: &[Keyword]) -> Self {
        self.permanent.keywords.extend(keywords.iter().copied());
        self
    }

    pub fn counters(mut self, kind: CounterKind, amount: u32) -> Self {
        self.permanent.counters.insert(kind, amount);
        self
    }

    pub fn shields(mut self, count: u32) -> Self {
        self.permanent.shield_count = count;
        self
    }

    pub fn regeneration_available(mut self) -> Self {
        self.permanent.regeneration_available = true;
        self
    }

    pub fn produces_mana(mut self, value: bool) -> Self {
        self.permanent.produces_mana = value;
        self
    }

    pub fn expendable(mut self) -> Self {
        self.permanent.expendable = true;
        self
    }

    pub fn enchanted_by(mut self, aura: ObjectId) -> Self {
        self.permanent.enchanted_by.push(aura);
        self
    }

    pub fn steals_control(mut self) -> Self {
        self.permanent.steals_control = true;
        self
    }

    pub fn activated_ability(mut self, cost: Cost) -> Self {
        self.permanent
            .activated_abilities
            .push(ActivatedAbility::with_cost(cost));
        self
    }

    pub fn token(mut self) -> Self {
        self.permanent.token = true;
        self
    }

    pub fn build(self) -> Permanent {
        self.permanent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_builder_defaults() {
        let creature = PermanentBuilder::creature("Hill Giant", 3, 3)
            .mana_value(4)
            .build();
        assert!(creature.is_creature());
        assert!(!creature.is_land());
        assert_eq!(creature.zone, Zone::Battlefield);
        assert_eq!(creature.effective_power(), 3);
        assert_eq!(creature.shield_count, 0);
    }

    #[test]
    fn test_counters_modify_effective_stats() {
        let creature = PermanentBuilder::creature("Young Wolf", 1, 1)
            .keyword(Keyword::Undying)
            .counters(CounterKind::PlusOnePlusOne, 1)
            .build();
        assert_eq!(creature.effective_power(), 2);
        assert_eq!(creature.effective_toughness(), 2);
        assert!(creature.has_keyword(Keyword::Undying));
    }

    #[test]
    fn test_basic_land_tags() {
        let land = PermanentBuilder::basic_land("Swamp").build();
        assert!(land.is_basic_land());
        assert!(land.produces_mana);
        let nonbasic = PermanentBuilder::nonbasic_land("Barren Moor").build();
        assert!(nonbasic.is_land());
        assert!(!nonbasic.is_basic_land());
    }

    #[test]
    fn test_stolen_permanent_keeps_owner() {
        let thief = PlayerId::from_index(1);
        let stolen = PermanentBuilder::creature("Ageless Sentinels", 4, 4)
            .owner(PlayerId::from_index(0))
            .controlled_by(thief)
            .build();
        assert_eq!(stolen.owner, PlayerId::from_index(0));
        assert_eq!(stolen.controller, thief);
    }

    #[test]
    fn test_token_materialize() {
        let blueprint = TokenBlueprint::new("Ape", 3, 3);
        let token = blueprint.materialize(PlayerId::from_index(1));
        assert!(token.token);
        assert!(token.is_creature());
        assert_eq!(token.controller, PlayerId::from_index(1));
        assert_eq!(token.power, 3);
    }
}
