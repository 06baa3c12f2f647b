//! Lifecycle management for Talos components

use crate::error::NavError;
use std::any::Any;

/// Trait for components that follow a lifecycle pattern
///
/// Configuration errors are surfaced from `on_configure`, before any
/// control loop is allowed to start.
pub trait LifecycleNode: Send + Sync {
    /// Configure the node, validating its parameters
    fn on_configure(&mut self) -> Result<(), NavError>;

    /// Activate the node
    fn on_activate(&mut self) -> Result<(), NavError>;

    /// Deactivate the node
    fn on_deactivate(&mut self) -> Result<(), NavError>;

    /// Clean up the node
    fn on_cleanup(&mut self) -> Result<(), NavError>;

    /// Convert to Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Base implementation for lifecycle nodes
pub struct LifecycleNodeBase {
    pub name: String,
    state: State,
}

/// State of a lifecycle node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unconfigured,
    Inactive,
    Active,
    Finalized,
}

impl LifecycleNodeBase {
    /// Create a new lifecycle node base
    pub fn new(name: &str) -> Self {
        LifecycleNodeBase {
            name: name.to_string(),
            state: State::Unconfigured,
        }
    }

    /// Get the current state
    pub fn get_state(&self) -> State {
        self.state
    }

    /// Set the state
    pub fn set_state(&mut self, state: State) {
        log::debug!("{}: -> {:?}", self.name, state);
        self.state = state;
    }
}
