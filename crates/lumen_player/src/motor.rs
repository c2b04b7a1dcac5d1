//! Player motor
//!
//! Turns input axes into commands for the host's physics body. Nothing here
//! integrates velocity; the host applies the commands on its own tick.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Motor tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Walk speed in units per second
    pub move_speed: f32,
    /// Degrees of rotation per unit of mouse input
    pub look_sensitivity: f32,
    /// Upward impulse applied on jump
    pub jump_force: f32,
    /// Extra downward acceleration while airborne
    pub gravity_multiplier: f32,
    /// Length of the downward ground probe
    pub ground_probe_distance: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_sensitivity: 2.0,
            jump_force: 7.0,
            gravity_multiplier: 2.0,
            ground_probe_distance: 1.1,
        }
    }
}

/// Pitch limit in degrees
pub const PITCH_LIMIT: f32 = 90.0;

/// Movement to apply this fixed tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorCommand {
    /// Position delta for a kinematic move
    pub displacement: Vec3,
    /// Acceleration to add (extra gravity)
    pub acceleration: Vec3,
}

/// A jump to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpCommand {
    /// Zero the body's vertical velocity before the impulse
    pub reset_vertical_velocity: bool,
    /// Impulse to add
    pub impulse: Vec3,
}

/// First-person motor state
#[derive(Debug, Clone)]
pub struct PlayerMotor {
    config: MotorConfig,
    /// Body yaw in degrees
    yaw: f32,
    /// Camera pitch in degrees, positive looks down
    pitch: f32,
}

impl PlayerMotor {
    /// Create a motor facing +Z
    pub fn new(config: MotorConfig) -> Self {
        Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Get the config
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Body rotation
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Camera rotation (body yaw then pitch)
    pub fn camera_rotation(&self) -> Quat {
        self.body_rotation() * Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Planar forward direction
    pub fn forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::Z
    }

    /// Planar right direction
    pub fn right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }

    /// Apply mouse deltas
    pub fn look(&mut self, mouse: Vec2) {
        self.yaw = (self.yaw + mouse.x * self.config.look_sensitivity).rem_euclid(360.0);
        self.pitch = (self.pitch - mouse.y * self.config.look_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Compute this fixed tick's movement from (horizontal, vertical) axes
    pub fn fixed_update(&self, axes: Vec2, grounded: bool, delta_time: f32) -> MotorCommand {
        let direction = self.forward() * axes.y + self.right() * axes.x;
        let acceleration = if grounded {
            Vec3::ZERO
        } else {
            Vec3::NEG_Y * self.config.gravity_multiplier
        };

        MotorCommand {
            displacement: direction * self.config.move_speed * delta_time,
            acceleration,
        }
    }

    /// Jump if standing on the ground
    pub fn jump(&self, grounded: bool) -> Option<JumpCommand> {
        if !grounded {
            return None;
        }
        log::debug!("Jumped");
        Some(JumpCommand {
            reset_vertical_velocity: true,
            impulse: Vec3::Y * self.config.jump_force,
        })
    }

    /// Check a host ground-probe hit distance against the probe length
    pub fn is_grounded(&self, probe_hit_distance: Option<f32>) -> bool {
        probe_hit_distance.is_some_and(|d| d <= self.config.ground_probe_distance)
    }
}

impl Default for PlayerMotor {
    fn default() -> Self {
        Self::new(MotorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_move() {
        let motor = PlayerMotor::default();
        let command = motor.fixed_update(Vec2::new(0.0, 1.0), true, 0.02);

        assert_relative_eq!(command.displacement.z, 0.1, epsilon = 1e-6);
        assert_relative_eq!(command.displacement.x, 0.0, epsilon = 1e-6);
        assert_eq!(command.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_yawed_strafe() {
        let mut motor = PlayerMotor::default();
        // 45 units * 2.0 sensitivity = 90 degrees: right now points to -Z
        motor.look(Vec2::new(45.0, 0.0));
        assert_relative_eq!(motor.yaw(), 90.0);

        let command = motor.fixed_update(Vec2::new(1.0, 0.0), true, 1.0);
        assert_relative_eq!(command.displacement.z, -5.0, epsilon = 1e-4);
        assert_relative_eq!(command.displacement.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut motor = PlayerMotor::default();

        motor.look(Vec2::new(0.0, -100.0));
        assert_eq!(motor.pitch(), PITCH_LIMIT);

        motor.look(Vec2::new(0.0, 500.0));
        assert_eq!(motor.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_airborne_extra_gravity() {
        let motor = PlayerMotor::default();
        let command = motor.fixed_update(Vec2::ZERO, false, 0.02);

        assert_eq!(command.displacement, Vec3::ZERO);
        assert_eq!(command.acceleration, Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let motor = PlayerMotor::default();

        assert!(motor.jump(false).is_none());
        let jump = motor.jump(true).unwrap();
        assert!(jump.reset_vertical_velocity);
        assert_eq!(jump.impulse, Vec3::new(0.0, 7.0, 0.0));
    }

    #[test]
    fn test_ground_probe() {
        let motor = PlayerMotor::default();

        assert!(motor.is_grounded(Some(1.0)));
        assert!(!motor.is_grounded(Some(1.5)));
        assert!(!motor.is_grounded(None));
    }
}
