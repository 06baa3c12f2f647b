//! Local reactive controllers
//!
//! A local controller turns the robot's current state, the goal and the
//! obstacle map into one motion step. It holds configuration only; per-tick
//! outputs are a pure function of the inputs.

use crate::common::types::Point2D;
use crate::error::NavError;
use crate::navigation::obstacle_map::ObstacleMap;
use std::collections::HashMap;
use std::fmt::Debug;

/// Trait for local reactive control algorithms
pub trait LocalController: Debug + Send + Sync {
    /// Create a new instance with default parameters
    fn new() -> Self
    where
        Self: Sized;

    /// Compute one control step from the current state toward the goal
    fn step(
        &self,
        state: &RobotState,
        goal: &Point2D,
        obstacles: &ObstacleMap,
        steps_taken: usize,
    ) -> Result<StepOutput, NavError>;

    /// Get the name of this controller
    fn name(&self) -> &str;

    /// Configure the controller with parameters
    fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), NavError>;
}

/// Robot state owned by the run loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotState {
    /// Current position in world coordinates
    pub position: Point2D,
    /// Heading in radians, derived from the last applied motion
    pub heading: f64,
}

impl RobotState {
    /// Initial state at a position, facing along +x
    pub fn at(position: Point2D) -> Self {
        RobotState {
            position,
            heading: 0.0,
        }
    }
}

/// Terminal and non-terminal outcomes of a control step
///
/// `Reached` and `Exhausted` are both normal, reportable outcomes; only
/// `Continuing` ticks move the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Continuing,
    Reached,
    Exhausted,
}

/// Per-tick output emitted to the caller
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// Robot state after the tick; unchanged on terminal statuses
    pub state: RobotState,
    /// Indices of obstacles inside the influence radius this tick,
    /// returned for the caller's own display purposes
    pub influential: Vec<usize>,
    /// Outcome of this tick
    pub status: StepStatus,
}

// Re-export specific implementations
pub mod potential_field;

// Default implementation
pub use potential_field::PotentialFieldController as DefaultController;
