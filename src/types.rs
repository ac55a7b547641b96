//! Core type tags shared across the crate: card types, keywords, counters,
//! zones, and the turn phase ordering used by timing-sensitive heuristics.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Supertype {
    Basic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Planeswalker,
}

/// Keyword abilities relevant to removal decisions.
///
/// `Indestructible` makes a permanent immune to destroy effects.
/// `Undying` returns a creature with a +1/+1 counter unless it already
/// carries one, which makes destroying it a net loss. `Hexproof` and
/// `Shroud` restrict targetability rather than destruction itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    Indestructible,
    Undying,
    Hexproof,
    Shroud,
    Flying,
    Deathtouch,
    Lifelink,
    Trample,
}

/// Counter kinds tracked on permanents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterKind {
    PlusOnePlusOne,
    Loyalty,
}

/// Game zones. Only `Battlefield` contents are ever legal removal targets;
/// `Hand` is read by the tempo heuristic to count lands held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Stack,
    Exile,
}

/// Phases and combat steps of a turn, flattened into one ordered sequence
/// so heuristics can ask "before declare blockers" or "after the second
/// main phase" directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Beginning,
    FirstMain,
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,
    SecondMain,
    Ending,
}

impl Phase {
    /// True if this phase occurs strictly before `other` in turn order.
    pub fn is_before(self, other: Phase) -> bool {
        self < other
    }

    /// True if this phase occurs strictly after `other` in turn order.
    pub fn is_after(self, other: Phase) -> bool {
        self > other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ordering() {
        assert!(Phase::FirstMain.is_before(Phase::DeclareBlockers));
        assert!(Phase::Ending.is_after(Phase::SecondMain));
        assert!(!Phase::SecondMain.is_before(Phase::SecondMain));
        assert!(!Phase::SecondMain.is_after(Phase::SecondMain));
    }

    #[test]
    fn test_combat_steps_sit_between_mains() {
        assert!(Phase::FirstMain.is_before(Phase::BeginCombat));
        assert!(Phase::CombatDamage.is_before(Phase::SecondMain));
        assert!(Phase::DeclareAttackers.is_before(Phase::DeclareBlockers));
    }
}
