//! Tunable combat constants
//!
//! Critical-hit tables, scale factors and PvP tuning live here rather
//! than in code so server operators can rebalance without a rebuild.
//! The on-disk format is JSON; every field is optional and falls back to
//! the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::errors::{ConfigError, check_range};
use crate::combat::MsgType;
use crate::consts::MAX_RANGE;

/// One row of a critical table: `dam = add + mult * dam` below `cutoff`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalLevel {
    pub cutoff: i32,
    pub mult: i32,
    pub add: i32,
    pub msg: MsgType,
}

impl CriticalLevel {
    pub const fn new(cutoff: i32, mult: i32, add: i32, msg: MsgType) -> Self {
        Self {
            cutoff,
            mult,
            add,
            msg,
        }
    }
}

/// Scale factors and tiers for one family of critical hits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalConfig {
    /// Extra to-hit against debuffed targets
    pub debuff_toh: i32,
    pub chance_weight_scl: i32,
    pub chance_toh_scl: i32,
    pub chance_level_scl: i32,
    /// Melee skill factor
    #[serde(default)]
    pub chance_toh_skill_scl: i32,
    /// Bow skill factor for launched missiles
    #[serde(default)]
    pub chance_launched_toh_skill_scl: i32,
    /// Throwing skill factor for thrown objects
    #[serde(default)]
    pub chance_thrown_toh_skill_scl: i32,
    pub chance_offset: i32,
    pub chance_range: i32,
    pub power_weight_scl: i32,
    pub power_random: i32,
    /// Tiers ordered by ascending cutoff; empty disables criticals
    pub levels: Vec<CriticalLevel>,
}

impl CriticalConfig {
    pub fn melee_defaults() -> Self {
        Self {
            debuff_toh: 10,
            chance_weight_scl: 1,
            chance_toh_scl: 5,
            chance_level_scl: 3,
            chance_toh_skill_scl: 0,
            chance_launched_toh_skill_scl: 0,
            chance_thrown_toh_skill_scl: 0,
            chance_offset: 0,
            chance_range: 5000,
            power_weight_scl: 1,
            power_random: 650,
            levels: vec![
                CriticalLevel::new(400, 2, 5, MsgType::HitGood),
                CriticalLevel::new(700, 2, 10, MsgType::HitGreat),
                CriticalLevel::new(900, 3, 15, MsgType::HitSuperb),
                CriticalLevel::new(1300, 3, 20, MsgType::HitHiGreat),
                CriticalLevel::new(10000, 4, 20, MsgType::HitHiSuperb),
            ],
        }
    }

    pub fn ranged_defaults() -> Self {
        Self {
            debuff_toh: 10,
            chance_weight_scl: 1,
            chance_toh_scl: 4,
            chance_level_scl: 2,
            chance_toh_skill_scl: 0,
            chance_launched_toh_skill_scl: 0,
            chance_thrown_toh_skill_scl: 0,
            chance_offset: 0,
            chance_range: 5000,
            power_weight_scl: 1,
            power_random: 500,
            levels: vec![
                CriticalLevel::new(500, 2, 5, MsgType::HitGood),
                CriticalLevel::new(1000, 2, 10, MsgType::HitGreat),
                CriticalLevel::new(10000, 3, 15, MsgType::HitSuperb),
            ],
        }
    }

    /// Message of the highest tier, used by forced criticals
    pub fn top_message(&self) -> MsgType {
        self.levels.last().map_or(MsgType::HitHiSuperb, |l| l.msg)
    }

    fn validate(&self, table: &'static str) -> Result<(), ConfigError> {
        if self.chance_range <= 0 {
            return Err(ConfigError::InvalidChanceRange {
                table,
                value: self.chance_range,
            });
        }
        check_range("power_random", self.power_random, 0, i32::MAX)?;
        for pair in self.levels.windows(2) {
            if pair[1].cutoff <= pair[0].cutoff {
                return Err(ConfigError::UnsortedCriticalLevels {
                    table,
                    prev: pair[0].cutoff,
                    next: pair[1].cutoff,
                });
            }
        }
        Ok(())
    }
}

/// Who may hurt whom among players
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PvpHostility {
    /// Players can never hurt each other
    Safe,
    /// Only after declaring hostility
    #[default]
    Hostile,
    /// Everybody is fair game
    Brutal,
}

/// All tunable combat constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConstants {
    #[serde(default = "CriticalConfig::melee_defaults")]
    pub melee_critical: CriticalConfig,
    #[serde(default = "CriticalConfig::ranged_defaults")]
    pub ranged_critical: CriticalConfig,
    /// Percent chance for touch of death to quadruple a blow
    pub touch_of_death_chance: i32,
    /// Ticks before the narrow-escape clamp can trigger again
    pub narrow_escape_cooldown: i32,
    /// Percent of damage kept when a player hits a player
    pub pvp_damage_percent: i32,
    pub pvp_hostility: PvpHostility,
    /// Below this level bad shooters fumble launched missiles
    pub bad_shooter_level: i32,
    /// Below this level clumsy throwers fumble throwing weapons
    pub clumsy_thrower_level: i32,
    pub max_range: i32,
    /// Length of a day/night cycle, in units of ten game turns
    pub day_length: u64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        Self {
            melee_critical: CriticalConfig::melee_defaults(),
            ranged_critical: CriticalConfig::ranged_defaults(),
            touch_of_death_chance: 25,
            narrow_escape_cooldown: 1000,
            pvp_damage_percent: 50,
            pvp_hostility: PvpHostility::Hostile,
            bad_shooter_level: 25,
            clumsy_thrower_level: 25,
            max_range: MAX_RANGE,
            day_length: 10_000,
        }
    }
}

impl CombatConstants {
    /// Load and validate constants from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let constants = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded combat constants");
        Ok(constants)
    }

    /// Parse and validate constants from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let constants: Self = serde_json::from_str(contents)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Serialize to pretty JSON, e.g. to seed a new constants file
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.melee_critical.validate("melee")?;
        self.ranged_critical.validate("ranged")?;
        check_range("touch_of_death_chance", self.touch_of_death_chance, 0, 100)?;
        check_range("pvp_damage_percent", self.pvp_damage_percent, 0, 100)?;
        check_range("narrow_escape_cooldown", self.narrow_escape_cooldown, 0, i32::MAX)?;
        check_range("max_range", self.max_range, 1, MAX_RANGE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CombatConstants::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let constants = CombatConstants::from_json_str("{}").unwrap();
        assert_eq!(constants, CombatConstants::default());
    }

    #[test]
    fn test_partial_override() {
        let constants =
            CombatConstants::from_json_str(r#"{ "pvp_damage_percent": 75, "pvp_hostility": "brutal" }"#)
                .unwrap();
        assert_eq!(constants.pvp_damage_percent, 75);
        assert_eq!(constants.pvp_hostility, PvpHostility::Brutal);
        assert_eq!(constants.melee_critical, CriticalConfig::melee_defaults());
    }

    #[test]
    fn test_roundtrip() {
        let constants = CombatConstants::default();
        let json = constants.to_json_string().unwrap();
        assert_eq!(CombatConstants::from_json_str(&json).unwrap(), constants);
    }

    #[test]
    fn test_rejects_unsorted_levels() {
        let mut constants = CombatConstants::default();
        constants.ranged_critical.levels.swap(0, 1);
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::UnsortedCriticalLevels { table: "ranged", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_chance_range() {
        let mut constants = CombatConstants::default();
        constants.melee_critical.chance_range = 0;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::InvalidChanceRange { table: "melee", .. })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            CombatConstants::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CombatConstants::load_from_file(Path::new("/nonexistent/constants.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
