//! Land-denial tempo heuristic.
//!
//! Destroying a land is only worth a card when it actually sets the
//! opponent back: a mana-lock on a stumbling opponent, a color-lock on a
//! uniquely-held basic, or a nonbasic worth answering on principle. On the
//! agent's side, the heuristic refuses unless the agent can absorb the
//! tempo cost of spending a spell on mana denial.

use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::object::Permanent;
use crate::tuning;
use crate::types::Phase;

/// True if the land's controller failed to make a recent land drop: either
/// they played nothing last turn (seen from the agent's turn), or their own
/// turn is nearly over and they still have not played one.
pub fn skipped_land_drop(game: &GameState, agent: PlayerId, controller: PlayerId) -> bool {
    let record = game.player(controller);
    (record.lands_played_last_turn == 0 && game.is_player_turn(agent))
        || (record.lands_played_this_turn == 0
            && game.is_player_turn(controller)
            && game.turn.phase.is_after(Phase::SecondMain))
}

/// The controller is low on lands and stumbling; removal may lock them
/// out of the game.
pub fn can_mana_lock(game: &GameState, agent: PlayerId, target: &Permanent) -> bool {
    let lands_in_play = game.lands_controlled_by(target.controller).len();
    lands_in_play <= tuning::MANA_LOCK_LAND_CEILING
        && skipped_land_drop(game, agent, target.controller)
}

/// The target is the controller's only copy of a basic land, so removing
/// it may cut them off a color entirely.
pub fn can_color_lock(game: &GameState, agent: PlayerId, target: &Permanent) -> bool {
    if !skipped_land_drop(game, agent, target.controller) || !target.is_basic_land() {
        return false;
    }
    game.lands_controlled_by(target.controller)
        .into_iter()
        .filter(|land| land.name == target.name)
        .count()
        == 1
}

/// Whether destroying `target` is a worthwhile use of the agent's card.
///
/// Approve if the agent's mana base is already comfortable, or if the
/// agent holds a land in hand and any of the denial conditions pays off:
/// enough total lands to spare the tempo, a mana-lock, a color-lock, or a
/// nonbasic target.
pub fn approves_land_removal(game: &GameState, agent: PlayerId, target: &Permanent) -> bool {
    let lands_in_hand = game.mana_lands_in_hand(agent);
    let lands_in_play = game.mana_lands_in_play(agent);
    lands_in_play > tuning::TEMPO_LAND_COMFORT
        || (lands_in_hand > 0
            && (lands_in_hand + lands_in_play > tuning::TEMPO_MIN_TOTAL_LANDS
                || can_mana_lock(game, agent, target)
                || can_color_lock(game, agent, target)
                || !target.is_basic_land()))
}
