//! Core combat constants
//!
//! Values that are fixed by the rules rather than tuned through the
//! constants file (see `world::config` for the tunable ones).

/// Fixed-point denominator used by hit chances
pub const HUNDRED_PCT: i32 = 10_000;

/// Portion of every hit chance that always hits
pub const ALWAYS_HIT: i32 = 1_200;

/// Portion of every hit chance that always misses
pub const ALWAYS_MISS: i32 = 500;

/// Lowest effective to-hit value fed into the hit formula
pub const MIN_TO_HIT: i32 = 9;

/// Skill points per point of to-hit bonus
pub const BTH_PLUS_ADJ: i32 = 3;

/// Maximum player level
pub const PY_MAX_LEVEL: i32 = 50;

/// Level from which racial vulnerabilities are "covered"
pub const COVERED_VULN_LEVEL: i32 = 30;

/// Energy needed for one normal-speed action
pub const MOVE_ENERGY: i32 = 100;

/// Longest projection path we ever compute
pub const MAX_PATH: usize = 256;

/// Maximum ranged-attack distance
pub const MAX_RANGE: i32 = 20;

/// Armour class beyond which physical blows are not further reduced
pub const MAX_BLOW_AC: i32 = 240;

/// Damage needed from an IMPACT weapon to trigger an earthquake
pub const IMPACT_QUAKE_DAMAGE: i32 = 50;

/// Radius of an IMPACT earthquake
pub const IMPACT_QUAKE_RADIUS: i32 = 10;

/// Radius of the secondary blast from an exploding bow brand
pub const BOW_BRAND_BALL_RADIUS: i32 = 1;
