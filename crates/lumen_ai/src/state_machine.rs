//! Finite State Machine (FSM) implementation
//!
//! Transitions are plain predicates over a caller-supplied context. The
//! machine never runs state behaviour itself: [`StateMachine::update`]
//! reports the change it made so the owner can apply enter/exit effects.

use std::collections::HashMap;
use std::hash::Hash;

/// Marker for types usable as FSM states
pub trait State: Clone + Eq + Hash + std::fmt::Debug {}

impl<T: Clone + Eq + Hash + std::fmt::Debug> State for T {}

/// Transition condition
pub type TransitionCondition<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A state transition
pub struct Transition<S, C> {
    /// Target state
    pub to: S,
    /// Condition function
    pub condition: TransitionCondition<C>,
    /// Priority (higher = checked first)
    pub priority: i32,
}

impl<S, C> Transition<S, C> {
    /// Create a new transition
    pub fn new<F>(to: S, condition: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            to,
            condition: Box::new(condition),
            priority: 0,
        }
    }

    /// Set priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Check if transition should occur
    pub fn should_transition(&self, context: &C) -> bool {
        (self.condition)(context)
    }
}

/// A change of state made during an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange<S> {
    pub from: S,
    pub to: S,
}

/// Finite State Machine
pub struct StateMachine<S, C>
where
    S: State,
{
    current: S,
    previous: Option<S>,
    /// Seconds spent in the current state
    time_in_state: f32,
    /// Transitions from each state, kept sorted by descending priority
    transitions: HashMap<S, Vec<Transition<S, C>>>,
    /// Checked from any state, before state-specific ones
    global_transitions: Vec<Transition<S, C>>,
}

impl<S, C> StateMachine<S, C>
where
    S: State,
{
    /// Create a new state machine
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            previous: None,
            time_in_state: 0.0,
            transitions: HashMap::new(),
            global_transitions: Vec::new(),
        }
    }

    /// Add a transition
    pub fn add_transition<F>(&mut self, from: S, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.push_transition(from, Transition::new(to, condition));
    }

    /// Add a transition with priority
    pub fn add_transition_priority<F>(&mut self, from: S, to: S, condition: F, priority: i32)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.push_transition(from, Transition::new(to, condition).with_priority(priority));
    }

    fn push_transition(&mut self, from: S, transition: Transition<S, C>) {
        let list = self.transitions.entry(from).or_default();
        list.push(transition);
        // Stable sort keeps insertion order among equal priorities
        list.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a global transition (can occur from any state)
    pub fn add_global_transition<F>(&mut self, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.global_transitions.push(Transition::new(to, condition));
    }

    /// Get current state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Get previous state
    pub fn previous(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    /// Seconds since the last state change
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Check if in a specific state
    pub fn is_in(&self, state: &S) -> bool {
        &self.current == state
    }

    /// Force transition to a state
    pub fn force_transition(&mut self, to: S) -> StateChange<S> {
        let from = std::mem::replace(&mut self.current, to.clone());
        self.previous = Some(from.clone());
        self.time_in_state = 0.0;
        StateChange { from, to }
    }

    /// Advance time and take at most one transition
    pub fn update(&mut self, context: &C, delta_time: f32) -> Option<StateChange<S>> {
        self.time_in_state += delta_time;

        let global = self
            .global_transitions
            .iter()
            .find(|t| self.current != t.to && t.should_transition(context))
            .map(|t| t.to.clone());
        if let Some(to) = global {
            return Some(self.force_transition(to));
        }

        let local = self
            .transitions
            .get(&self.current)
            .and_then(|list| list.iter().find(|t| t.should_transition(context)))
            .map(|t| t.to.clone());
        local.map(|to| self.force_transition(to))
    }
}
