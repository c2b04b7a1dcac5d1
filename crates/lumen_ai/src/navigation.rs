//! Navigation agent seam
//!
//! Pathfinding over the baked walkable surface belongs to the host. AI code
//! only talks to agents through [`NavAgent`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Something that moves toward a destination at a given speed
pub trait NavAgent {
    /// Current world position
    fn position(&self) -> Vec3;
    /// Set movement speed
    fn set_speed(&mut self, speed: f32);
    /// Set the point to move toward
    fn set_destination(&mut self, destination: Vec3);
}

/// Straight-line agent with no obstacle awareness, for headless runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicAgent {
    /// Current position
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Movement speed
    pub speed: f32,
    /// Where the agent is heading
    pub destination: Option<Vec3>,
    /// Arrival threshold
    pub arrival_threshold: f32,
}

impl KinematicAgent {
    /// Create a new agent at a position
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            speed,
            destination: None,
            arrival_threshold: 0.1,
        }
    }

    /// Clear the destination and stop
    pub fn stop(&mut self) {
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    /// Check if has reached destination
    pub fn has_arrived(&self) -> bool {
        self.distance_to_destination() <= self.arrival_threshold
    }

    /// Get distance to destination
    pub fn distance_to_destination(&self) -> f32 {
        self.destination
            .map_or(0.0, |dest| self.position.distance(dest))
    }

    /// Update agent movement
    pub fn update(&mut self, delta_time: f32) {
        let Some(dest) = self.destination else {
            return;
        };
        if delta_time <= 0.0 {
            return;
        }

        let offset = dest - self.position;
        let distance = offset.length();
        if distance <= self.arrival_threshold {
            self.velocity = Vec3::ZERO;
            return;
        }

        let step = (self.speed * delta_time).min(distance);
        let movement = offset / distance * step;
        self.velocity = movement / delta_time;
        self.position += movement;
    }
}

impl NavAgent for KinematicAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_agent_moves_toward_destination() {
        let mut agent = KinematicAgent::new(Vec3::ZERO, 5.0);
        agent.set_destination(Vec3::new(10.0, 0.0, 0.0));

        agent.update(0.5);
        assert_relative_eq!(agent.position.x, 2.5);
        assert_relative_eq!(agent.velocity.x, 5.0);
        assert!(!agent.has_arrived());
    }

    #[test]
    fn test_agent_arrival() {
        let mut agent = KinematicAgent::new(Vec3::ZERO, 10.0);
        agent.set_destination(Vec3::new(1.0, 0.0, 0.0));

        for _ in 0..100 {
            agent.update(0.1);
            if agent.has_arrived() {
                break;
            }
        }

        assert!(agent.has_arrived());
        // Never overshoots
        assert_relative_eq!(agent.position.x, 1.0);
    }

    #[test]
    fn test_agent_without_destination_stays() {
        let mut agent = KinematicAgent::new(Vec3::new(1.0, 2.0, 3.0), 10.0);
        agent.update(1.0);

        assert_eq!(agent.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(agent.has_arrived());
    }

    #[test]
    fn test_speed_change() {
        let mut agent = KinematicAgent::new(Vec3::ZERO, 1.0);
        agent.set_speed(4.0);
        agent.set_destination(Vec3::new(0.0, 0.0, -10.0));
        agent.update(1.0);

        assert_relative_eq!(agent.position.z, -4.0);
    }
}
