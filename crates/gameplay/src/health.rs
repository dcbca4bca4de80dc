use serde::Serialize;
use tracing::{debug, info};

use crate::config::HealthConfig;
use crate::host::Behavior;
use crate::non_negative;

const DEFAULT_MAX_HEALTH: f32 = 100.0;
const DEFAULT_CURRENT_HEALTH: f32 = 85.0;
const DEFAULT_REGEN_RATE: f32 = 1.0;

/// Result of a single [`Health::take_damage`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageOutcome {
    Damaged,
    /// Health is at or below zero after this hit.
    Killed,
}

/// Health pool that regenerates over time.
///
/// Regeneration and healing clamp to `max_health`. Damage is not clamped, so
/// `current_health` can drop below zero, and every hit that leaves it there
/// reports a death.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Health {
    max_health: f32,
    current_health: f32,
    regen_rate: f32,
    deaths: u32,
}

impl Health {
    pub fn new() -> Self {
        Self {
            max_health: DEFAULT_MAX_HEALTH,
            current_health: DEFAULT_CURRENT_HEALTH,
            regen_rate: DEFAULT_REGEN_RATE,
            deaths: 0,
        }
    }

    /// Builds a pool from tunables. Call [`HealthConfig::validate`] first; this
    /// only guards the regen rate and the upper bound.
    pub fn from_config(config: &HealthConfig) -> Self {
        Self {
            max_health: config.max_health,
            current_health: config.current_health.min(config.max_health),
            regen_rate: config.regen_rate.max(0.0),
            deaths: 0,
        }
    }

    pub fn update(&mut self, delta_time: f32) {
        let delta_time = non_negative(delta_time, "health", "delta_time");
        if self.current_health < self.max_health {
            self.current_health += self.regen_rate * delta_time;
            self.current_health = self.current_health.min(self.max_health);
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let amount = non_negative(amount, "health", "amount");
        self.current_health -= amount;
        debug!(
            target: "gameplay.health",
            current = self.current_health,
            max = self.max_health,
            amount,
            "damage taken"
        );
        if self.current_health <= 0.0 {
            self.on_death();
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged
        }
    }

    pub fn heal(&mut self, amount: f32) {
        let amount = non_negative(amount, "health", "amount");
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    pub fn on_death(&mut self) {
        self.deaths += 1;
        info!(target: "gameplay.health", deaths = self.deaths, "player died");
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn regen_rate(&self) -> f32 {
        self.regen_rate
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0.0
    }

    /// Number of times the death notification has fired.
    pub fn deaths(&self) -> u32 {
        self.deaths
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Health {
    fn update(&mut self, delta_time: f32) {
        Health::update(self, delta_time);
    }
}
