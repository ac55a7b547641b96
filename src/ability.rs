//! Ability descriptors for removal effects.
//!
//! An `AbilityDescriptor` is the immutable view of one effect the agent is
//! considering: its cost, its targeting shape, and the hints the card data
//! attaches — which special-case tactic applies, whether regeneration is
//! denied, whether the effect is reusable at will or resolves as a trigger.
//! The descriptor is read-only to the engine; the decision it produces is
//! returned to the caller rather than written back here.

use crate::cost::Cost;
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::object::{Permanent, TokenBlueprint};
use crate::types::{CardType, Keyword, Zone};

/// Which player's permanents a filter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerScope {
    /// Any controller.
    #[default]
    Any,
    /// Only permanents controlled by the acting player's opponents.
    Opponent,
    /// Only permanents the acting player controls.
    You,
}

/// The legal-target predicate of a target restriction.
///
/// Kept as data rather than a closure so individual stages of the filter
/// pipeline stay independently testable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetFilter {
    /// Accepted card types; empty accepts any permanent.
    pub card_types: Vec<CardType>,
    pub controller: ControllerScope,
}

impl TargetFilter {
    /// Accept any permanent.
    pub fn any() -> Self {
        Self::default()
    }

    /// Accept only the given card type.
    pub fn of_type(card_type: CardType) -> Self {
        Self {
            card_types: vec![card_type],
            ..Self::default()
        }
    }

    /// Restrict to opponents' permanents.
    pub fn opponents_only(mut self) -> Self {
        self.controller = ControllerScope::Opponent;
        self
    }

    /// True if `permanent` is a legal target for `actor` under this filter,
    /// including the targetability keywords.
    pub fn can_target(&self, game: &GameState, actor: PlayerId, permanent: &Permanent) -> bool {
        if permanent.zone != Zone::Battlefield {
            return false;
        }
        if !self.card_types.is_empty()
            && !self.card_types.iter().any(|&t| permanent.has_type(t))
        {
            return false;
        }
        let controller_ok = match self.controller {
            ControllerScope::Any => true,
            ControllerScope::Opponent => {
                game.opponents_of(actor).contains(&permanent.controller)
            }
            ControllerScope::You => permanent.controller == actor,
        };
        if !controller_ok {
            return false;
        }
        if permanent.has_keyword(Keyword::Shroud) {
            return false;
        }
        // Hexproof only stops opponents of the permanent's controller.
        if permanent.has_keyword(Keyword::Hexproof) && permanent.controller != actor {
            return false;
        }
        true
    }
}

/// Minimum and maximum target counts plus the legal-target predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRestrictions {
    pub min_targets: u32,
    pub max_targets: u32,
    pub filter: TargetFilter,
}

impl TargetRestrictions {
    /// Exactly one target matching `filter`.
    pub fn single(filter: TargetFilter) -> Self {
        Self {
            min_targets: 1,
            max_targets: 1,
            filter,
        }
    }

    /// Between `min` and `max` targets matching `filter`.
    pub fn counted(min: u32, max: u32, filter: TargetFilter) -> Self {
        Self {
            min_targets: min,
            max_targets: max,
            filter,
        }
    }
}

/// How the effect selects what it affects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    /// Open selection under a target restriction.
    Targeted(TargetRestrictions),
    /// A fixed set decided by the effect itself (e.g. "destroy all
    /// permanents you control"); no selection loop runs.
    Defined(Vec<ObjectId>),
    /// The effect takes no targets.
    None,
}

/// Card-data override capping the number of targets, for abilities whose
/// real ceiling the cost model cannot predict (e.g. "sacrifice X creatures"
/// additional costs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxTargetsHint {
    /// A literal cap.
    Fixed(u32),
    /// Capped by how many of the agent's own creatures could be sacrificed
    /// to pay per-target costs.
    SacrificeableCreatures,
}

impl MaxTargetsHint {
    /// Evaluate the hint against the current game state.
    pub fn resolve(self, game: &GameState, actor: PlayerId) -> u32 {
        match self {
            MaxTargetsHint::Fixed(cap) => cap,
            MaxTargetsHint::SacrificeableCreatures => {
                game.creatures_controlled_by(actor).len() as u32
            }
        }
    }
}

/// Named special-case policies, one per removal-effect family.
///
/// A closed enumeration instead of free-form strategy names: the dispatcher
/// matches exhaustively, so an unknown tactic is a compile error rather
/// than a silent fallthrough to the generic pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Tactic {
    /// Remove the agent's own least valuable permanent (the effect turns it
    /// into something else); indestructible candidates are ideal.
    TransformWorst,
    /// Only worth spending on cheap permanents; the ceiling relaxes when
    /// the agent already lost a permanent this turn.
    CheapTargetsOnly,
    /// Only trade the source away for something clearly better than it.
    BetterThanSource,
    /// The effect destroys one of the agent's creatures too; avoid it
    /// unless the exchange is clearly favorable.
    AvoidMutualRuin,
    /// Destruction hands the target's controller a replacement token.
    TokenReplacement,
    /// Generic land destruction; gated by the tempo heuristic.
    LandDenial,
    /// Defined-target board wipe that hits the agent's own side.
    SelfWipe,
}

/// Immutable description of one removal effect under consideration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDescriptor {
    /// The permanent (or spell) the effect comes from.
    pub source: ObjectId,
    pub cost: Cost,
    pub target_mode: TargetMode,
    pub tactic: Option<Tactic>,
    /// The effect denies regeneration, so shields don't matter.
    pub no_regen: bool,
    /// The ability can be activated again at will (repeatable permanents as
    /// opposed to one-shot spells).
    pub reusable: bool,
    /// The effect resolves as a triggered ability rather than a choice the
    /// agent initiates.
    pub is_trigger: bool,
    pub max_targets_hint: Option<MaxTargetsHint>,
    /// Token the linked sub-effect would create for the target's controller.
    pub spawns_token: Option<TokenBlueprint>,
}

impl AbilityDescriptor {
    pub fn new(source: ObjectId, cost: Cost, target_mode: TargetMode) -> Self {
        Self {
            source,
            cost,
            target_mode,
            tactic: None,
            no_regen: false,
            reusable: false,
            is_trigger: false,
            max_targets_hint: None,
            spawns_token: None,
        }
    }

    pub fn with_tactic(mut self, tactic: Tactic) -> Self {
        self.tactic = Some(tactic);
        self
    }

    pub fn no_regen(mut self) -> Self {
        self.no_regen = true;
        self
    }

    pub fn reusable(mut self) -> Self {
        self.reusable = true;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn with_max_targets_hint(mut self, hint: MaxTargetsHint) -> Self {
        self.max_targets_hint = Some(hint);
        self
    }

    pub fn with_replacement_token(mut self, blueprint: TokenBlueprint) -> Self {
        self.spawns_token = Some(blueprint);
        self
    }

    pub fn restrictions(&self) -> Option<&TargetRestrictions> {
        match &self.target_mode {
            TargetMode::Targeted(restrictions) => Some(restrictions),
            _ => None,
        }
    }
}
