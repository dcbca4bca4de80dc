//! Gameplay behaviors attached to game objects and driven by a per-frame host loop.

pub mod config;
pub mod health;
pub mod host;
pub mod inventory;
pub mod player_controller;

pub use config::{
    ConfigError, GameplayConfig, HealthConfig, InventoryConfig, PlayerControllerConfig,
};
pub use health::{DamageOutcome, Health};
pub use host::{run_frames, Behavior, FrameParams};
pub use inventory::{Inventory, InventoryError, Item, ItemId};
pub use player_controller::{Direction, PlayerController};

/// Clamps negative or NaN inputs to zero so a bad frame never runs time backwards.
pub(crate) fn non_negative(value: f32, target: &'static str, field: &'static str) -> f32 {
    if value >= 0.0 {
        value
    } else {
        tracing::warn!(target: "gameplay.input", component = target, field, value, "ignoring negative input");
        0.0
    }
}
