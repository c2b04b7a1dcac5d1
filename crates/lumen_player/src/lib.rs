//! Lumen Player - Player-Side State
//!
//! Per-frame player logic expressed as pure updates over explicit inputs.
//! Raycasts, physics bodies and UI widgets live in the host; this crate
//! decides what they should do.
//!
//! # Features
//!
//! - Held interaction (pick up key, use exit)
//! - Exit trigger zone
//! - First-person motor commands
//! - Flashlight toggle, sway and aim

pub mod exit;
pub mod flashlight;
pub mod interaction;
pub mod motor;

pub mod prelude {
    pub use crate::exit::{ExitEvent, ExitZone};
    pub use crate::flashlight::{aim_toward, AimConfig, FlashlightSway, LightToggle, SwayConfig};
    pub use crate::interaction::{
        GazeHit, InteractableId, InteractableKind, InteractionConfig, InteractionEvent,
        InteractionInput, Interactor,
    };
    pub use crate::motor::{JumpCommand, MotorCommand, MotorConfig, PlayerMotor};
}

pub use prelude::*;
