//! Flashlight behaviour: on/off toggle, idle sway with walk bobbing, and
//! aiming toward whatever the camera ray hits.

use glam::{Mat3, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Sway and bobbing tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    /// Bob phase advance per fixed tick while walking
    pub bobbing_speed: f32,
    /// Vertical bob amplitude
    pub bobbing_amount: f32,
    /// Resting local Y while walking
    pub midpoint: f32,
    /// Circular sway amplitude, also the idle lift
    pub sway_amount: f32,
    /// Circular sway frequency
    pub sway_speed: f32,
    /// Rate at which the light eases toward its target
    pub transition_speed: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            bobbing_speed: 0.05,
            bobbing_amount: 0.04,
            midpoint: 0.22,
            sway_amount: 0.02,
            sway_speed: 1.0,
            transition_speed: 2.0,
        }
    }
}

/// Local-space sway state of a hand-held light
#[derive(Debug, Clone)]
pub struct FlashlightSway {
    config: SwayConfig,
    rest_position: Vec3,
    target_position: Vec3,
    bob_timer: f32,
    moving: bool,
}

impl FlashlightSway {
    /// Create sway around a resting local position
    pub fn new(config: SwayConfig, rest_position: Vec3) -> Self {
        Self {
            config,
            rest_position,
            target_position: rest_position,
            bob_timer: 0.0,
            moving: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn bob_timer(&self) -> f32 {
        self.bob_timer
    }

    /// Per-frame input: any non-zero axis counts as walking
    pub fn update(&mut self, axes: Vec2) {
        self.moving = axes.x != 0.0 || axes.y != 0.0;
        self.target_position = if self.moving {
            self.rest_position
        } else {
            self.rest_position + Vec3::Y * self.config.sway_amount
        };
    }

    /// Fixed tick: returns the new local position given the current one.
    ///
    /// `time` is seconds since start, `delta_time` the tick length.
    pub fn fixed_update(&mut self, current: Vec3, time: f32, delta_time: f32) -> Vec3 {
        let mut wave = 0.0;
        if self.moving {
            wave = self.bob_timer.sin();
            self.bob_timer += self.config.bobbing_speed;
            if self.bob_timer > TAU {
                self.bob_timer -= TAU;
            }
        } else {
            self.bob_timer = 0.0;
        }

        let phase = time * self.config.sway_speed;
        let t = (delta_time * self.config.transition_speed).clamp(0.0, 1.0);
        let mut next = current.lerp(self.target_position, t);
        next.x += phase.sin() * self.config.sway_amount;
        next.z += phase.cos() * self.config.sway_amount;
        if self.moving {
            next.y = self.config.midpoint + wave * self.config.bobbing_amount;
        }
        next
    }
}

/// Aiming tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Max ray distance the host should cast
    pub max_distance: f32,
    /// Rotation blend rate per second
    pub rotation_speed: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            rotation_speed: 0.5,
        }
    }
}

/// Rotation whose +Z axis points along `direction`
pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let right = up.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// Ease the light's rotation toward a hit point; unchanged when nothing was hit
pub fn aim_toward(
    config: &AimConfig,
    current: Quat,
    light_position: Vec3,
    hit_point: Option<Vec3>,
    delta_time: f32,
) -> Quat {
    let Some(hit) = hit_point else {
        return current;
    };
    if light_position.distance(hit) > config.max_distance {
        return current;
    }
    let Some(target) = look_rotation(hit - light_position, Vec3::Y) else {
        return current;
    };
    let t = (config.rotation_speed * delta_time).clamp(0.0, 1.0);
    current.lerp(target, t).normalize()
}

/// On/off light switch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightToggle {
    on: bool,
}

impl LightToggle {
    /// Lights start switched off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Flip on a key-down edge; returns the new state
    pub fn update(&mut self, pressed_this_frame: bool) -> bool {
        if pressed_this_frame {
            self.on = !self.on;
            log::debug!("Flashlight {}", if self.on { "on" } else { "off" });
        }
        self.on
    }
}
