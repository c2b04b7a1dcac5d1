//! Enemy pursuit brain
//!
//! The enemy patrols until the player comes within the detection radius,
//! then chases, re-targeting the player's position every tick. Leaving the
//! radius drops it back to patrol speed.

use crate::navigation::NavAgent;
use crate::state_machine::{StateChange, StateMachine};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pursuit states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuitState {
    Patrol,
    Chasing,
}

impl fmt::Display for PursuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patrol => write!(f, "patrol"),
            Self::Chasing => write!(f, "chasing"),
        }
    }
}

/// Tuning for the pursuit brain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Speed while patrolling
    pub patrol_speed: f32,
    /// Speed while chasing
    pub chase_speed: f32,
    /// Distance under which the player is detected
    pub detection_radius: f32,
    /// Seconds between player position hints
    pub hint_interval: f32,
    /// Preferred spawn distance from the player
    pub minimal_distance: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 3.0,
            chase_speed: 5.0,
            detection_radius: 10.0,
            hint_interval: 30.0,
            minimal_distance: 15.0,
        }
    }
}

/// Per-tick view of the world the brain decides on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitContext {
    /// Enemy position this tick
    pub enemy_position: Vec3,
    /// Player position this tick
    pub player_position: Vec3,
    /// Detection radius copied from config
    pub detection_radius: f32,
}

impl PursuitContext {
    /// Distance between enemy and player
    pub fn distance(&self) -> f32 {
        self.enemy_position.distance(self.player_position)
    }

    /// Whether the player is strictly inside the detection radius
    pub fn player_detected(&self) -> bool {
        self.distance() < self.detection_radius
    }
}

/// Enemy AI driving a [`NavAgent`]
pub struct PursuitBrain {
    config: PursuitConfig,
    fsm: StateMachine<PursuitState, PursuitContext>,
    hint_timer: f32,
    last_player_hint: Vec3,
}

impl PursuitBrain {
    /// Create a brain in patrol and set the agent to patrol speed
    pub fn new(config: PursuitConfig, agent: &mut impl NavAgent) -> Self {
        let mut fsm = StateMachine::new(PursuitState::Patrol);
        fsm.add_transition(PursuitState::Patrol, PursuitState::Chasing, |ctx: &PursuitContext| {
            ctx.player_detected()
        });
        fsm.add_transition(PursuitState::Chasing, PursuitState::Patrol, |ctx: &PursuitContext| {
            !ctx.player_detected()
        });

        agent.set_speed(config.patrol_speed);
        Self {
            last_player_hint: agent.position(),
            config,
            fsm,
            hint_timer: 0.0,
        }
    }

    /// Get the config
    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> PursuitState {
        *self.fsm.current()
    }

    /// Check if chasing the player
    pub fn is_chasing(&self) -> bool {
        self.fsm.is_in(&PursuitState::Chasing)
    }

    /// Player position sampled on the last hint tick; not consumed by the brain
    pub fn last_player_hint(&self) -> Vec3 {
        self.last_player_hint
    }

    /// Run one frame of decision making
    pub fn update(
        &mut self,
        player_position: Vec3,
        agent: &mut impl NavAgent,
        delta_time: f32,
    ) -> Option<StateChange<PursuitState>> {
        let context = PursuitContext {
            enemy_position: agent.position(),
            player_position,
            detection_radius: self.config.detection_radius,
        };

        let change = self.fsm.update(&context, delta_time);
        match &change {
            Some(StateChange {
                to: PursuitState::Chasing,
                ..
            }) => {
                agent.set_speed(self.config.chase_speed);
                agent.set_destination(player_position);
                log::info!("Chasing player!");
            }
            Some(StateChange {
                to: PursuitState::Patrol,
                ..
            }) => {
                agent.set_speed(self.config.patrol_speed);
                log::info!("Lost player, resuming patrol.");
            }
            None => match self.state() {
                PursuitState::Chasing => agent.set_destination(player_position),
                PursuitState::Patrol => agent.set_speed(self.config.patrol_speed),
            },
        }

        self.hint_timer += delta_time;
        if self.hint_timer >= self.config.hint_interval {
            self.last_player_hint = player_position;
            self.hint_timer = 0.0;
            log::debug!("Player hint recorded at {}", player_position);
        }

        change
    }
}
