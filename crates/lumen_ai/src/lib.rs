//! Lumen AI - Enemy Behaviour
//!
//! This crate provides the enemy's decision making for Lumen.
//!
//! # Features
//!
//! - Finite State Machines (FSM) with prioritised and global transitions
//! - Patrol/chase pursuit brain
//! - `NavAgent` seam to the host's navigation
//! - Straight-line kinematic agent for headless runs
//!
//! # Example
//!
//! ```ignore
//! use lumen_ai::prelude::*;
//!
//! let mut agent = KinematicAgent::new(spawn, 0.0);
//! let mut brain = PursuitBrain::new(PursuitConfig::default(), &mut agent);
//! brain.update(player_position, &mut agent, dt);
//! agent.update(dt);
//! ```

pub mod navigation;
pub mod pursuit;
pub mod state_machine;

pub mod prelude {
    pub use crate::navigation::{KinematicAgent, NavAgent};
    pub use crate::pursuit::{PursuitBrain, PursuitConfig, PursuitContext, PursuitState};
    pub use crate::state_machine::{State, StateChange, StateMachine, Transition};
}

pub use prelude::*;
