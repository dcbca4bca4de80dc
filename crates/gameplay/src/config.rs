use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Tunables for all three behaviors. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameplayConfig {
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub player: PlayerControllerConfig,
}

impl GameplayConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        let cfg: GameplayConfig = toml::from_str(data)?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Overrides fields from `HEALTH_*`, `INVENTORY_*` and `PLAYER_*` variables.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        override_with(&mut self.health.max_health, parse_as(&lookup, "HEALTH_MAX"));
        override_with(&mut self.health.current_health, parse_as(&lookup, "HEALTH_CURRENT"));
        override_with(&mut self.health.regen_rate, parse_as(&lookup, "HEALTH_REGEN_RATE"));
        override_with(&mut self.inventory.capacity, parse_as(&lookup, "INVENTORY_CAPACITY"));
        override_with(&mut self.inventory.auto_sort, parse_as(&lookup, "INVENTORY_AUTO_SORT"));
        override_with(&mut self.player.move_speed, parse_as(&lookup, "PLAYER_MOVE_SPEED"));
        override_with(&mut self.player.jump_height, parse_as(&lookup, "PLAYER_JUMP_HEIGHT"));
        override_with(
            &mut self.player.can_double_jump,
            parse_as(&lookup, "PLAYER_CAN_DOUBLE_JUMP"),
        );
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.health.validate()?;
        self.inventory.validate()?;
        self.player.validate()
    }
}

fn parse_as<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|val| val.trim().parse().ok())
}

fn override_with<T: std::fmt::Debug>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        debug!(target: "gameplay.config", ?value, "env override");
        *slot = value;
    }
}

fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a finite number"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: f32,
    pub current_health: f32,
    pub regen_rate: f32,
}

impl HealthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("health.max_health", self.max_health)?;
        ensure_finite("health.current_health", self.current_health)?;
        ensure_finite("health.regen_rate", self.regen_rate)?;
        if self.max_health <= 0.0 {
            return Err(ConfigError::invalid("health.max_health", "must be positive"));
        }
        if !(0.0..=self.max_health).contains(&self.current_health) {
            return Err(ConfigError::invalid(
                "health.current_health",
                format!("must be within 0..={}", self.max_health),
            ));
        }
        if self.regen_rate < 0.0 {
            return Err(ConfigError::invalid("health.regen_rate", "must not be negative"));
        }
        Ok(())
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            current_health: 85.0,
            regen_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub capacity: usize,
    pub auto_sort: bool,
}

impl InventoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::invalid(
                "inventory.capacity",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            auto_sort: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerControllerConfig {
    pub move_speed: f32,
    pub jump_height: f32,
    pub can_double_jump: bool,
}

impl PlayerControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("player.move_speed", self.move_speed)?;
        ensure_finite("player.jump_height", self.jump_height)?;
        if self.move_speed < 0.0 {
            return Err(ConfigError::invalid("player.move_speed", "must not be negative"));
        }
        if self.jump_height < 0.0 {
            return Err(ConfigError::invalid("player.jump_height", "must not be negative"));
        }
        Ok(())
    }
}

impl Default for PlayerControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.5,
            jump_height: 2.0,
            can_double_jump: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = GameplayConfig::from_toml("").unwrap();
        assert_eq!(GameplayConfig::default(), cfg);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameplayConfig::from_toml(
            r#"
            [health]
            regen_rate = 4.0

            [inventory]
            capacity = 5
            "#,
        )
        .unwrap();
        assert_eq!(4.0, cfg.health.regen_rate);
        assert_eq!(100.0, cfg.health.max_health);
        assert_eq!(5, cfg.inventory.capacity);
        assert!(cfg.inventory.auto_sort);
        assert_eq!(5.5, cfg.player.move_speed);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameplayConfig::from_toml("[health\nmax_health = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameplayConfig::from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn overrides_apply_and_bad_values_are_ignored() {
        let vars: HashMap<&str, &str> = [
            ("HEALTH_MAX", "150"),
            ("HEALTH_REGEN_RATE", "not-a-number"),
            ("INVENTORY_CAPACITY", " 8 "),
            ("INVENTORY_AUTO_SORT", "false"),
            ("PLAYER_CAN_DOUBLE_JUMP", "false"),
        ]
        .into_iter()
        .collect();
        let cfg = GameplayConfig::default()
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(150.0, cfg.health.max_health);
        assert_eq!(1.0, cfg.health.regen_rate);
        assert_eq!(8, cfg.inventory.capacity);
        assert!(!cfg.inventory.auto_sort);
        assert!(!cfg.player.can_double_jump);
        assert_eq!(2.0, cfg.player.jump_height);
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut cfg = GameplayConfig::default();
        cfg.health.current_health = 120.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "health.current_health", .. })
        ));

        let mut cfg = GameplayConfig::default();
        cfg.health.regen_rate = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = GameplayConfig::default();
        cfg.inventory.capacity = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = GameplayConfig::default();
        cfg.player.move_speed = f32::INFINITY;
        assert!(cfg.validate().is_err());
    }
}
