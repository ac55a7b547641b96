//! Named heuristic thresholds.
//!
//! Every numeric tie-break the engine uses lives here so its behavior can
//! be audited and tested independently of the surrounding logic.

/// Life the agent must keep in reserve after paying a life cost.
pub const LIFE_PAYMENT_MARGIN: i32 = 4;

/// Transform-worst tactic: refuse if the sacrificial creature is worth at
/// least this much.
pub const TRANSFORM_CREATURE_VALUE_CAP: i32 = 200;

/// Transform-worst tactic: refuse if a noncreature sacrifice costs more
/// than this much mana.
pub const TRANSFORM_NONCREATURE_MANA_CAP: u32 = 1;

/// Better-than-source tactic: a candidate must beat the source's value by
/// at least this margin.
pub const BETTER_THAN_SOURCE_MARGIN: i32 = 30;

/// Mutual-ruin tactic: the agent's best creature must be worth at least
/// this much less than the chosen target.
pub const MUTUAL_RUIN_MARGIN: i32 = 40;

/// Token-replacement tactic: the destroyed permanent must be worth at
/// least `NUM/DEN` times the replacement token.
pub const TOKEN_TRADE_NUM: i32 = 3;
pub const TOKEN_TRADE_DEN: i32 = 2;

/// Cheap-removal tactic mana-value ceilings (relaxed when a permanent the
/// agent controlled left the battlefield this turn).
pub const CHEAP_REMOVAL_MANA_CAP: u32 = 2;
pub const CHEAP_REMOVAL_MANA_CAP_RELAXED: u32 = 4;

/// Self-wipe tactic: refuse at or below this life total.
pub const SELF_WIPE_LIFE_FLOOR: i32 = 5;

/// Tempo heuristic: with more than this many lands in play the agent can
/// always afford land destruction.
pub const TEMPO_LAND_COMFORT: usize = 5;

/// Tempo heuristic: minimum combined lands (hand + battlefield) before
/// speculative land destruction is acceptable.
pub const TEMPO_MIN_TOTAL_LANDS: usize = 2;

/// Mana-lock check: an opponent at or below this many lands who missed a
/// land drop is worth locking out.
pub const MANA_LOCK_LAND_CEILING: usize = 3;

/// Hold-removal gate: a protected opposing creature must beat the current
/// choice by this margin before the agent saves its removal for later.
pub const HOLD_REMOVAL_MARGIN: i32 = 60;

/// Cost feasibility: never sacrifice a permanent worth this much or more
/// just to pay an activation cost.
pub const SACRIFICE_VALUE_CEILING: i32 = 120;
