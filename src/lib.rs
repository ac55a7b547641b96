pub mod ability;
pub mod ai;
pub mod cost;
pub mod game_state;
pub mod ids;
pub mod object;
pub mod oracle;
pub mod player;
pub mod tuning;
pub mod types;

pub use ability::{
    AbilityDescriptor, ControllerScope, MaxTargetsHint, Tactic, TargetFilter, TargetMode,
    TargetRestrictions,
};
pub use ai::{DecisionError, RemovalDecision, decide_removal, decide_triggered_removal};
pub use cost::{Cost, SacrificeFilter};
pub use game_state::{GameState, Turn};
pub use ids::{ObjectId, PlayerId};
pub use object::{Permanent, PermanentBuilder, TokenBlueprint};
pub use oracle::{AiOracle, StandardOracle};
pub use player::Player;
pub use types::{CardType, CounterKind, Keyword, Phase, Supertype, Zone};
