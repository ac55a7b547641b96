//! Game-state view.
//!
//! `GameState` is the read-only snapshot the decision engine works against:
//! an arena of permanents keyed by `ObjectId`, the player records, and the
//! current turn context. The surrounding rules engine guarantees the
//! snapshot does not change for the duration of one decision call.

use std::collections::HashMap;

use crate::ids::{ObjectId, PlayerId};
use crate::object::Permanent;
use crate::player::Player;
use crate::types::{Phase, Zone};

/// Whose turn it is and where in it we are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub active_player: PlayerId,
    pub phase: Phase,
    pub number: u32,
}

/// Arena of game objects plus player and turn state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    players: Vec<Player>,
    permanents: HashMap<ObjectId, Permanent>,
    pub turn: Turn,
}

impl GameState {
    /// Create a state with `player_count` players at starting life, player 0
    /// active in their first main phase.
    pub fn new(player_count: u8) -> Self {
        let players = (0..player_count)
            .map(|index| Player::new(PlayerId::from_index(index)))
            .collect();
        Self {
            players,
            permanents: HashMap::new(),
            turn: Turn {
                active_player: PlayerId::from_index(0),
                phase: Phase::FirstMain,
                number: 1,
            },
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// All other players. The engine treats every non-agent player as an
    /// opponent; team formats are out of scope.
    pub fn opponents_of(&self, id: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .map(|player| player.id)
            .filter(|&other| other != id)
            .collect()
    }

    pub fn is_player_turn(&self, id: PlayerId) -> bool {
        self.turn.active_player == id
    }

    /// Insert a permanent into the arena and return its id.
    pub fn add_permanent(&mut self, permanent: Permanent) -> ObjectId {
        let id = permanent.id;
        self.permanents.insert(id, permanent);
        id
    }

    pub fn permanent(&self, id: ObjectId) -> Option<&Permanent> {
        self.permanents.get(&id)
    }

    /// Everything on the battlefield, any controller.
    pub fn battlefield(&self) -> impl Iterator<Item = &Permanent> {
        self.permanents
            .values()
            .filter(|permanent| permanent.zone == Zone::Battlefield)
    }

    /// Battlefield permanents controlled by `player`.
    pub fn permanents_controlled_by(&self, player: PlayerId) -> Vec<&Permanent> {
        self.battlefield()
            .filter(|permanent| permanent.controller == player)
            .collect()
    }

    /// Battlefield creatures controlled by `player`.
    pub fn creatures_controlled_by(&self, player: PlayerId) -> Vec<&Permanent> {
        self.battlefield()
            .filter(|permanent| permanent.controller == player && permanent.is_creature())
            .collect()
    }

    /// Battlefield lands controlled by `player`.
    pub fn lands_controlled_by(&self, player: PlayerId) -> Vec<&Permanent> {
        self.battlefield()
            .filter(|permanent| permanent.controller == player && permanent.is_land())
            .collect()
    }

    /// Cards in `player`'s hand.
    pub fn cards_in_hand(&self, player: PlayerId) -> Vec<&Permanent> {
        self.permanents
            .values()
            .filter(|card| card.zone == Zone::Hand && card.owner == player)
            .collect()
    }

    /// Mana-producing lands `player` holds in hand.
    pub fn mana_lands_in_hand(&self, player: PlayerId) -> usize {
        self.cards_in_hand(player)
            .into_iter()
            .filter(|card| card.is_land() && card.produces_mana)
            .count()
    }

    /// Mana-producing lands `player` controls on the battlefield.
    pub fn mana_lands_in_play(&self, player: PlayerId) -> usize {
        self.lands_controlled_by(player)
            .into_iter()
            .filter(|land| land.produces_mana)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PermanentBuilder;

    fn two_player_state() -> GameState {
        GameState::new(2)
    }

    #[test]
    fn test_opponents_excludes_self() {
        let game = two_player_state();
        let agent = PlayerId::from_index(0);
        assert_eq!(game.opponents_of(agent), vec![PlayerId::from_index(1)]);
    }

    #[test]
    fn test_battlefield_filters_by_zone_and_controller() {
        let mut game = two_player_state();
        let agent = PlayerId::from_index(0);
        let opponent = PlayerId::from_index(1);
        game.add_permanent(
            PermanentBuilder::creature("Runeclaw Bear", 2, 2)
                .controller(agent)
                .build(),
        );
        game.add_permanent(PermanentBuilder::basic_land("Island").controller(opponent).build());
        game.add_permanent(
            PermanentBuilder::basic_land("Forest")
                .controller(agent)
                .zone(Zone::Hand)
                .build(),
        );

        assert_eq!(game.battlefield().count(), 2);
        assert_eq!(game.creatures_controlled_by(agent).len(), 1);
        assert_eq!(game.lands_controlled_by(opponent).len(), 1);
        assert_eq!(game.mana_lands_in_hand(agent), 1);
    }

    #[test]
    fn test_hand_membership_uses_owner() {
        let mut game = two_player_state();
        let agent = PlayerId::from_index(0);
        game.add_permanent(
            PermanentBuilder::basic_land("Mountain")
                .controller(agent)
                .zone(Zone::Hand)
                .build(),
        );
        assert_eq!(game.cards_in_hand(agent).len(), 1);
        assert_eq!(game.cards_in_hand(PlayerId::from_index(1)).len(), 0);
    }
}
