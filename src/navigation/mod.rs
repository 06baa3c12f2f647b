//! Navigation module for the Talos robot
pub mod controller;
pub mod obstacle_map;

use self::controller::{DefaultController, LocalController, RobotState, StepOutput, StepStatus};
use self::obstacle_map::{ObstacleMap, ObstacleProvider, StaticObstacleProvider};
use crate::common::types::Point2D;
use crate::error::NavError;
use crate::lifecycle::{LifecycleNode, LifecycleNodeBase, State};
use log::{debug, info};
use std::any::Any;
use std::collections::HashMap;

/// Navigation stack for the robot
///
/// Owns the local controller and the obstacle map, and drives the per-tick
/// control loop. The obstacle map is materialized from the provider at
/// configure time and stays fixed for the duration of a run.
pub struct NavigationStack {
    base: LifecycleNodeBase,
    controller: Box<dyn LocalController>,
    obstacle_provider: Box<dyn ObstacleProvider>,
    obstacle_map: ObstacleMap,
}

/// Terminal summary of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// `Reached` or `Exhausted`
    pub status: StepStatus,
    /// Number of motion ticks taken before termination
    pub steps: usize,
    /// Robot state at termination
    pub final_state: RobotState,
}

impl NavigationStack {
    /// Create a navigation stack with the default controller and no obstacles
    pub fn new() -> Self {
        NavigationStack {
            base: LifecycleNodeBase::new("navigation_stack"),
            controller: Box::new(DefaultController::new()),
            obstacle_provider: Box::new(StaticObstacleProvider::empty()),
            obstacle_map: ObstacleMap::new(),
        }
    }

    /// Create a navigation stack with a specific controller
    pub fn with_controller<T: LocalController + 'static>(controller: T) -> Self {
        NavigationStack {
            base: LifecycleNodeBase::new("navigation_stack"),
            controller: Box::new(controller),
            obstacle_provider: Box::new(StaticObstacleProvider::empty()),
            obstacle_map: ObstacleMap::new(),
        }
    }

    /// Set the obstacle provider
    pub fn set_obstacle_provider<T: ObstacleProvider + 'static>(&mut self, provider: T) {
        self.obstacle_provider = Box::new(provider);
    }

    /// Configure the controller
    pub fn configure_controller(&mut self, params: &HashMap<String, f64>) -> Result<(), NavError> {
        self.controller.configure(params)
    }

    /// Get the name of the current controller
    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    /// Materialize the obstacle map from the provider
    pub fn load_obstacles(&mut self) -> Result<(), NavError> {
        self.obstacle_map = self.obstacle_provider.provide()?;
        info!(
            "loaded {} obstacles from {} provider",
            self.obstacle_map.len(),
            self.obstacle_provider.name()
        );
        Ok(())
    }

    /// Get the current obstacle map
    pub fn obstacle_map(&self) -> &ObstacleMap {
        &self.obstacle_map
    }

    /// Compute a single control step against the loaded obstacle map
    ///
    /// Timing and pacing belong to the caller; this never blocks.
    pub fn step_once(
        &self,
        state: &RobotState,
        goal: &Point2D,
        steps_taken: usize,
    ) -> Result<StepOutput, NavError> {
        self.controller.step(state, goal, &self.obstacle_map, steps_taken)
    }

    /// Run the control loop from `start` until the goal is reached or the
    /// step budget is exhausted
    ///
    /// Every tick, including the terminal one, is emitted to `on_tick` so an
    /// external renderer can display the pose and the influential obstacle
    /// markers without the core knowing about presentation.
    pub fn run<F>(
        &mut self,
        start: Point2D,
        goal: Point2D,
        mut on_tick: F,
    ) -> Result<RunReport, NavError>
    where
        F: FnMut(usize, &StepOutput),
    {
        let mut state = RobotState::at(start);
        let mut steps_taken = 0usize;

        loop {
            let output = self.controller.step(&state, &goal, &self.obstacle_map, steps_taken)?;
            on_tick(steps_taken, &output);
            state = output.state;

            match output.status {
                StepStatus::Continuing => steps_taken += 1,
                StepStatus::Reached | StepStatus::Exhausted => {
                    debug!(
                        "run terminated: {:?} after {} steps at ({:.3}, {:.3})",
                        output.status, steps_taken, state.position.x, state.position.y
                    );
                    return Ok(RunReport {
                        status: output.status,
                        steps: steps_taken,
                        final_state: state,
                    });
                }
            }
        }
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleNode for NavigationStack {
    fn on_configure(&mut self) -> Result<(), NavError> {
        info!("configuring navigation stack");
        self.load_obstacles()?;
        self.base.set_state(State::Inactive);
        Ok(())
    }

    fn on_activate(&mut self) -> Result<(), NavError> {
        info!("activating navigation stack");
        self.base.set_state(State::Active);
        Ok(())
    }

    fn on_deactivate(&mut self) -> Result<(), NavError> {
        info!("deactivating navigation stack");
        self.base.set_state(State::Inactive);
        Ok(())
    }

    fn on_cleanup(&mut self) -> Result<(), NavError> {
        info!("cleaning up navigation stack");
        self.base.set_state(State::Unconfigured);
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
