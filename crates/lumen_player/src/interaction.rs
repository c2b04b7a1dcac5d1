//! Held interaction
//!
//! Looking at an interactable within reach and holding the interact key
//! fills a timer. Reaching the hold time fires the interaction once; looking
//! away, releasing the key or switching targets empties the timer.

use serde::{Deserialize, Serialize};

/// Identifier the host uses for an interactable object
pub type InteractableId = u64;

/// What the player can interact with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractableKind {
    Key,
    Exit,
}

/// Result of the host's gaze ray this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeHit {
    pub target: InteractableId,
    pub kind: InteractableKind,
    /// Distance from the camera to the hit
    pub distance: f32,
}

/// Per-frame interaction input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionInput {
    /// What the camera ray hit, if anything
    pub gaze: Option<GazeHit>,
    /// Interact key held
    pub hold: bool,
    /// Frame time in seconds
    pub delta_time: f32,
}

/// Outcome of a completed hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// The key was picked up and should be removed from the world
    KeyCollected(InteractableId),
    /// The exit was used with the key in hand
    Escaped,
}

/// Interaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum gaze distance
    pub interaction_distance: f32,
    /// Seconds the key must be held
    pub interaction_hold_time: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            interaction_distance: 3.0,
            interaction_hold_time: 2.0,
        }
    }
}

/// Player-side interaction state
#[derive(Debug, Clone)]
pub struct Interactor {
    config: InteractionConfig,
    timer: f32,
    target: Option<(InteractableId, InteractableKind)>,
    has_key: bool,
    has_won: bool,
}

impl Interactor {
    /// Create a new interactor
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            timer: 0.0,
            target: None,
            has_key: false,
            has_won: false,
        }
    }

    /// Whether the key has been collected
    pub fn has_key(&self) -> bool {
        self.has_key
    }

    /// Whether the exit has been used
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Current target, if the player is looking at something usable
    pub fn target(&self) -> Option<InteractableKind> {
        self.target.map(|(_, kind)| kind)
    }

    /// Accumulated hold time
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Hold progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.config.interaction_hold_time <= 0.0 {
            return if self.target.is_some() { 1.0 } else { 0.0 };
        }
        (self.timer / self.config.interaction_hold_time).clamp(0.0, 1.0)
    }

    /// Prompt text for the host UI
    pub fn prompt(&self) -> Option<&'static str> {
        match self.target()? {
            InteractableKind::Key => Some("Hold 'E' to pick up the key"),
            InteractableKind::Exit => Some("Hold 'E' to use the exit"),
        }
    }

    fn accepts(&self, hit: &GazeHit) -> bool {
        if hit.distance > self.config.interaction_distance {
            return false;
        }
        match hit.kind {
            InteractableKind::Key => !self.has_key,
            InteractableKind::Exit => self.has_key,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, input: &InteractionInput) -> Option<InteractionEvent> {
        if self.has_won {
            self.target = None;
            self.timer = 0.0;
            return None;
        }

        let target = input
            .gaze
            .filter(|hit| self.accepts(hit))
            .map(|hit| (hit.target, hit.kind));
        if target != self.target {
            self.timer = 0.0;
        }
        self.target = target;

        let Some((id, kind)) = self.target else {
            return None;
        };
        if !input.hold {
            self.timer = 0.0;
            return None;
        }

        self.timer += input.delta_time;
        if self.timer < self.config.interaction_hold_time {
            return None;
        }

        self.timer = 0.0;
        self.target = None;
        match kind {
            InteractableKind::Key => {
                self.has_key = true;
                log::info!("Key picked up!");
                Some(InteractionEvent::KeyCollected(id))
            }
            InteractableKind::Exit => {
                self.has_won = true;
                log::info!("Exiting the maze...");
                Some(InteractionEvent::Escaped)
            }
        }
    }
}

impl Default for Interactor {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: InteractableId = 1;
    const EXIT: InteractableId = 2;

    fn look(target: InteractableId, kind: InteractableKind, hold: bool, dt: f32) -> InteractionInput {
        InteractionInput {
            gaze: Some(GazeHit {
                target,
                kind,
                distance: 1.0,
            }),
            hold,
            delta_time: dt,
        }
    }

    fn hold_until_event(interactor: &mut Interactor, input: InteractionInput) -> Option<InteractionEvent> {
        for _ in 0..1000 {
            if let Some(event) = interactor.update(&input) {
                return Some(event);
            }
        }
        None
    }

    #[test]
    fn test_key_pickup_after_hold_time() {
        let mut interactor = Interactor::default();
        let input = look(KEY, InteractableKind::Key, true, 0.5);

        assert_eq!(interactor.update(&input), None);
        assert_eq!(interactor.update(&input), None);
        assert_eq!(interactor.update(&input), None);
        assert_eq!(interactor.update(&input), Some(InteractionEvent::KeyCollected(KEY)));
        assert!(interactor.has_key());
        assert_eq!(interactor.timer(), 0.0);
    }

    #[test]
    fn test_release_resets_timer() {
        let mut interactor = Interactor::default();

        interactor.update(&look(KEY, InteractableKind::Key, true, 1.5));
        assert_eq!(interactor.timer(), 1.5);
        assert!((interactor.progress() - 0.75).abs() < 1e-6);

        interactor.update(&look(KEY, InteractableKind::Key, false, 0.1));
        assert_eq!(interactor.timer(), 0.0);

        // Needs the full hold again
        assert_eq!(interactor.update(&look(KEY, InteractableKind::Key, true, 1.5)), None);
    }

    #[test]
    fn test_looking_away_resets_timer() {
        let mut interactor = Interactor::default();

        interactor.update(&look(KEY, InteractableKind::Key, true, 1.5));
        interactor.update(&InteractionInput {
            gaze: None,
            hold: true,
            delta_time: 0.1,
        });
        assert_eq!(interactor.timer(), 0.0);
        assert_eq!(interactor.prompt(), None);
    }

    #[test]
    fn test_out_of_reach_is_ignored() {
        let mut interactor = Interactor::default();
        let input = InteractionInput {
            gaze: Some(GazeHit {
                target: KEY,
                kind: InteractableKind::Key,
                distance: 3.5,
            }),
            hold: true,
            delta_time: 5.0,
        };

        assert_eq!(interactor.update(&input), None);
        assert!(!interactor.has_key());
    }

    #[test]
    fn test_exit_requires_key() {
        let mut interactor = Interactor::default();
        let exit = look(EXIT, InteractableKind::Exit, true, 0.5);

        assert_eq!(hold_until_event(&mut interactor, exit), None);
        assert_eq!(interactor.target(), None);
        assert!(!interactor.has_won());

        hold_until_event(&mut interactor, look(KEY, InteractableKind::Key, true, 0.5));
        assert_eq!(interactor.prompt(), None);

        interactor.update(&look(EXIT, InteractableKind::Exit, false, 0.0));
        assert_eq!(interactor.prompt(), Some("Hold 'E' to use the exit"));
        assert_eq!(hold_until_event(&mut interactor, exit), Some(InteractionEvent::Escaped));
        assert!(interactor.has_won());
    }

    #[test]
    fn test_win_fires_once() {
        let mut interactor = Interactor::default();
        hold_until_event(&mut interactor, look(KEY, InteractableKind::Key, true, 1.0));
        let exit = look(EXIT, InteractableKind::Exit, true, 1.0);

        assert_eq!(hold_until_event(&mut interactor, exit), Some(InteractionEvent::Escaped));
        assert_eq!(hold_until_event(&mut interactor, exit), None);
    }

    #[test]
    fn test_switching_target_resets_timer() {
        let mut interactor = Interactor::default();

        interactor.update(&look(KEY, InteractableKind::Key, true, 1.5));
        interactor.update(&look(7, InteractableKind::Key, true, 0.25));
        assert_eq!(interactor.timer(), 0.25);
    }
}
