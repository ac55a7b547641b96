//! Player projections.

use crate::ids::PlayerId;

/// Snapshot of a player as seen by the decision engine.
///
/// Zone contents live in the arena (`GameState`); the player record keeps
/// the scalar state heuristics read: life, loosely-approximated available
/// mana, land-drop history and the "a permanent you controlled left the
/// battlefield this turn" flag used to relax cheap-removal thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub life: i32,
    /// Mana the player could produce right now, as a single generic amount.
    pub available_mana: u32,
    pub lands_played_this_turn: u32,
    pub lands_played_last_turn: u32,
    pub lost_permanent_this_turn: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            life: 20,
            available_mana: 0,
            lands_played_this_turn: 0,
            lands_played_last_turn: 1,
            lost_permanent_this_turn: false,
        }
    }
}
