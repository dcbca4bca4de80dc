use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::config::PlayerControllerConfig;
use crate::host::Behavior;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub x: f32,
    pub y: f32,
}

impl Direction {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement tunables plus input callbacks. The callbacks only report; they
/// never change the tunables.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerController {
    move_speed: f32,
    jump_height: f32,
    can_double_jump: bool,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::from_config(&PlayerControllerConfig::default())
    }

    pub fn from_config(config: &PlayerControllerConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            jump_height: config.jump_height,
            can_double_jump: config.can_double_jump,
        }
    }

    pub fn update(&self, delta_time: f32) {
        trace!(target: "gameplay.player_controller", delta_time, "player controller update");
    }

    pub fn on_jump(&self) {
        info!(target: "gameplay.player_controller", "player jumped");
    }

    pub fn on_move(&self, direction: Direction) {
        info!(target: "gameplay.player_controller", %direction, "player moved");
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn jump_height(&self) -> f32 {
        self.jump_height
    }

    pub fn can_double_jump(&self) -> bool {
        self.can_double_jump
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for PlayerController {
    fn update(&mut self, delta_time: f32) {
        PlayerController::update(self, delta_time);
    }
}
