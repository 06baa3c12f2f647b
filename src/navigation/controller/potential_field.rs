//! Artificial Potential Field controller
//!
//! The goal pulls the robot with a normalized attractive force while every
//! obstacle inside the influence radius pushes it away. The summed force is
//! applied directly as a position delta each tick, so the gains double as
//! step-size controls.

use super::{LocalController, RobotState, StepOutput, StepStatus};
use crate::common::{heading_of, types::Point2D, types::Vec2D};
use crate::error::NavError;
use crate::navigation::obstacle_map::ObstacleMap;
use std::collections::HashMap;

/// Separation below which the reciprocal terms are treated as undefined
const DEGENERATE_DISTANCE: f64 = 1e-9;

/// Gains and limits for the potential field
#[derive(Debug, Clone, Copy)]
pub struct FieldGains {
    /// Attractive gain toward the goal
    pub k_goal: f64,
    /// Repulsive gain away from influential obstacles
    pub k_obstacles: f64,
    /// Distance beyond which an obstacle exerts no force
    pub radius_of_influence: f64,
    /// Distance at which the goal counts as reached
    pub goal_tolerance: f64,
    /// Scale applied to the total force before it becomes a position delta
    pub step_scale: f64,
    /// Iteration budget for a run
    pub max_steps: usize,
}

impl Default for FieldGains {
    fn default() -> Self {
        FieldGains {
            k_goal: 1.5,
            k_obstacles: 200.0,
            radius_of_influence: 2.0,
            goal_tolerance: 0.8,
            step_scale: 1.0,
            max_steps: 400,
        }
    }
}

impl FieldGains {
    /// Check the invariants the field formulas rely on
    pub fn validate(&self) -> Result<(), NavError> {
        if self.radius_of_influence <= 0.0 {
            return Err(NavError::InvalidConfiguration(
                "radius of influence must be positive".to_string(),
            ));
        }
        if self.k_goal < 0.0 {
            return Err(NavError::InvalidConfiguration(
                "attractive gain must be non-negative".to_string(),
            ));
        }
        if self.k_obstacles < 0.0 {
            return Err(NavError::InvalidConfiguration(
                "repulsive gain must be non-negative".to_string(),
            ));
        }
        if self.goal_tolerance <= 0.0 {
            return Err(NavError::InvalidConfiguration(
                "goal tolerance must be positive".to_string(),
            ));
        }
        if self.step_scale <= 0.0 {
            return Err(NavError::InvalidConfiguration(
                "step scale must be positive".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(NavError::InvalidConfiguration(
                "step budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Potential field local controller
#[derive(Debug, Clone)]
pub struct PotentialFieldController {
    gains: FieldGains,
}

impl PotentialFieldController {
    /// Create a controller with explicit gains
    pub fn with_gains(gains: FieldGains) -> Result<Self, NavError> {
        gains.validate()?;
        Ok(PotentialFieldController { gains })
    }

    /// Current gains
    pub fn gains(&self) -> &FieldGains {
        &self.gains
    }

    /// Attractive force for a goal-error vector (robot position minus goal)
    ///
    /// Returns the unit vector toward the goal scaled by the attractive
    /// gain. A zero-magnitude error yields the zero vector; the run loop
    /// checks goal-reached before this can happen.
    pub fn attractive_force(&self, goal_error: &Vec2D) -> Vec2D {
        let error = *goal_error;
        let distance = error.norm();
        if distance < DEGENERATE_DISTANCE {
            return Vec2D::zeros();
        }
        (-self.gains.k_goal / distance) * error
    }

    /// Repulsive force summed over all influential obstacles
    ///
    /// An obstacle is influential when its distance is strictly below the
    /// influence radius; at exactly the radius it contributes nothing.
    /// Returns the force together with the influential index subset.
    pub fn repulsive_force(
        &self,
        robot_pos: &Point2D,
        obstacles: &ObstacleMap,
    ) -> Result<(Vec2D, Vec<usize>), NavError> {
        let r0 = self.gains.radius_of_influence;
        let mut total = Vec2D::zeros();
        let mut influential = Vec::new();

        for (index, obstacle) in obstacles.iter().enumerate() {
            let q = *robot_pos - *obstacle;
            let r = q.norm();
            if r >= r0 {
                continue;
            }
            if r < DEGENERATE_DISTANCE {
                return Err(NavError::DegenerateDistance { index, distance: r });
            }
            influential.push(index);

            // Negative gradient of 0.5 * k * (1/r - 1/r0)^2
            let magnitude = self.gains.k_obstacles * (1.0 / r - 1.0 / r0) / (r * r);
            total += (magnitude / r) * q;
        }

        Ok((total, influential))
    }
}

impl LocalController for PotentialFieldController {
    fn new() -> Self {
        PotentialFieldController {
            gains: FieldGains::default(),
        }
    }

    fn step(
        &self,
        state: &RobotState,
        goal: &Point2D,
        obstacles: &ObstacleMap,
        steps_taken: usize,
    ) -> Result<StepOutput, NavError> {
        let goal_error = state.position - *goal;

        if goal_error.norm() <= self.gains.goal_tolerance {
            return Ok(StepOutput {
                state: *state,
                influential: Vec::new(),
                status: StepStatus::Reached,
            });
        }
        if steps_taken >= self.gains.max_steps {
            return Ok(StepOutput {
                state: *state,
                influential: Vec::new(),
                status: StepStatus::Exhausted,
            });
        }

        let (f_rep, influential) = self.repulsive_force(&state.position, obstacles)?;
        let f_att = self.attractive_force(&goal_error);
        let f_total = f_att + f_rep;

        // The force is the per-tick position delta, modulated only by the
        // explicit step scale
        let next = RobotState {
            position: state.position + self.gains.step_scale * f_total,
            heading: heading_of(&f_total),
        };

        Ok(StepOutput {
            state: next,
            influential,
            status: StepStatus::Continuing,
        })
    }

    fn name(&self) -> &str {
        "PotentialFieldController"
    }

    fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), NavError> {
        if let Some(&k_goal) = params.get("k_goal") {
            if k_goal < 0.0 {
                return Err(NavError::InvalidConfiguration(
                    "attractive gain must be non-negative".to_string(),
                ));
            }
            self.gains.k_goal = k_goal;
        }
        if let Some(&k_obstacles) = params.get("k_obstacles") {
            if k_obstacles < 0.0 {
                return Err(NavError::InvalidConfiguration(
                    "repulsive gain must be non-negative".to_string(),
                ));
            }
            self.gains.k_obstacles = k_obstacles;
        }
        if let Some(&radius) = params.get("radius_of_influence") {
            if radius <= 0.0 {
                return Err(NavError::InvalidConfiguration(
                    "radius of influence must be positive".to_string(),
                ));
            }
            self.gains.radius_of_influence = radius;
        }
        if let Some(&tolerance) = params.get("goal_tolerance") {
            if tolerance <= 0.0 {
                return Err(NavError::InvalidConfiguration(
                    "goal tolerance must be positive".to_string(),
                ));
            }
            self.gains.goal_tolerance = tolerance;
        }
        if let Some(&step_scale) = params.get("step_scale") {
            if step_scale <= 0.0 {
                return Err(NavError::InvalidConfiguration(
                    "step scale must be positive".to_string(),
                ));
            }
            self.gains.step_scale = step_scale;
        }
        if let Some(&n_max_steps) = params.get("n_max_steps") {
            if n_max_steps < 1.0 {
                return Err(NavError::InvalidConfiguration(
                    "step budget must be at least 1".to_string(),
                ));
            }
            self.gains.max_steps = n_max_steps as usize;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn controller() -> PotentialFieldController {
        LocalController::new()
    }

    fn three_obstacle_map() -> ObstacleMap {
        ObstacleMap::from_points(vec![
            Point2D::new(1.1, 2.2),
            Point2D::new(2.4, 1.4),
            Point2D::new(3.5, 4.5),
        ])
    }

    /// Closed-form single-obstacle contribution, kept independent of the
    /// implementation under test
    fn expected_contribution(robot: &Point2D, obstacle: &Point2D, k: f64, r0: f64) -> Vec2D {
        let q = *robot - *obstacle;
        let r = q.norm();
        (k * (1.0 / r - 1.0 / r0) / (r * r) / r) * q
    }

    #[test]
    fn repulsive_force_matches_closed_form_sum() {
        let ctrl = controller();
        let robot = Point2D::new(1.0, 2.0);
        let map = three_obstacle_map();

        let (force, influential) = ctrl.repulsive_force(&robot, &map).unwrap();

        // Only the two obstacles within distance 2 count
        assert_eq!(influential, vec![0, 1]);

        let expected = expected_contribution(&robot, map.get(0).unwrap(), 200.0, 2.0)
            + expected_contribution(&robot, map.get(1).unwrap(), 200.0, 2.0);
        assert!((force - expected).norm() < TOL);

        assert!((force.x - (-7117.98)).abs() < 0.05);
        assert!((force.y - (-14205.83)).abs() < 0.05);
    }

    #[test]
    fn attractive_force_is_normalized_toward_goal() {
        let ctrl = controller();
        let force = ctrl.attractive_force(&Vec2D::new(2.3, 1.4));
        assert!((force.x - (-1.28130)).abs() < 1e-4);
        assert!((force.y - (-0.77992)).abs() < 1e-4);
        // Magnitude is the gain itself
        assert!((force.norm() - 1.5).abs() < TOL);
    }

    #[test]
    fn attractive_force_at_zero_error_is_zero() {
        let ctrl = controller();
        assert_eq!(ctrl.attractive_force(&Vec2D::zeros()), Vec2D::zeros());
    }

    #[test]
    fn no_influential_obstacles_gives_exact_zero() {
        let ctrl = controller();
        let map = ObstacleMap::from_points(vec![
            Point2D::new(10.0, 10.0),
            Point2D::new(-10.0, 3.0),
        ]);
        let (force, influential) = ctrl.repulsive_force(&Point2D::new(0.0, 0.0), &map).unwrap();
        assert_eq!(force, Vec2D::zeros());
        assert!(influential.is_empty());
    }

    #[test]
    fn obstacle_exactly_at_radius_is_not_influential() {
        let ctrl = controller();
        let map = ObstacleMap::from_points(vec![Point2D::new(2.0, 0.0)]);
        let (force, influential) = ctrl.repulsive_force(&Point2D::new(0.0, 0.0), &map).unwrap();
        assert_eq!(force, Vec2D::zeros());
        assert!(influential.is_empty());
    }

    #[test]
    fn repulsion_grows_with_obstacle_gain() {
        let robot = Point2D::new(0.0, 0.0);
        let map = ObstacleMap::from_points(vec![Point2D::new(1.0, 0.0)]);

        let low = PotentialFieldController::with_gains(FieldGains {
            k_obstacles: 200.0,
            ..FieldGains::default()
        })
        .unwrap();
        let high = PotentialFieldController::with_gains(FieldGains {
            k_obstacles: 400.0,
            ..FieldGains::default()
        })
        .unwrap();

        let (f_low, _) = low.repulsive_force(&robot, &map).unwrap();
        let (f_high, _) = high.repulsive_force(&robot, &map).unwrap();
        assert!(f_high.norm() > f_low.norm());
    }

    #[test]
    fn force_operations_are_pure() {
        let ctrl = controller();
        let robot = Point2D::new(1.0, 2.0);
        let map = three_obstacle_map();

        let (f1, i1) = ctrl.repulsive_force(&robot, &map).unwrap();
        let (f2, i2) = ctrl.repulsive_force(&robot, &map).unwrap();
        assert_eq!(f1, f2);
        assert_eq!(i1, i2);

        let error = Vec2D::new(2.3, 1.4);
        assert_eq!(ctrl.attractive_force(&error), ctrl.attractive_force(&error));
    }

    #[test]
    fn robot_on_obstacle_is_a_degenerate_distance_error() {
        let ctrl = controller();
        let map = ObstacleMap::from_points(vec![Point2D::new(1.0, 2.0)]);
        let err = ctrl.repulsive_force(&Point2D::new(1.0, 2.0), &map).unwrap_err();
        match err {
            NavError::DegenerateDistance { index, .. } => assert_eq!(index, 0),
            other => panic!("expected degenerate distance, got {other}"),
        }
    }

    #[test]
    fn step_at_goal_reports_reached_without_moving() {
        let ctrl = controller();
        let state = RobotState::at(Point2D::new(5.0, 5.0));
        let out = ctrl
            .step(&state, &Point2D::new(5.0, 5.0), &ObstacleMap::new(), 0)
            .unwrap();
        assert_eq!(out.status, StepStatus::Reached);
        assert_eq!(out.state.position, state.position);
        assert!(out.influential.is_empty());
    }

    #[test]
    fn step_applies_force_as_position_delta() {
        let ctrl = controller();
        let state = RobotState::at(Point2D::new(0.0, 0.0));
        let goal = Point2D::new(10.0, 0.0);
        let out = ctrl.step(&state, &goal, &ObstacleMap::new(), 0).unwrap();

        assert_eq!(out.status, StepStatus::Continuing);
        // Pure attraction along +x, magnitude k_goal
        assert!((out.state.position.x - 1.5).abs() < TOL);
        assert!(out.state.position.y.abs() < TOL);
        assert!(out.state.heading.abs() < TOL);
    }

    #[test]
    fn step_scale_modulates_the_delta() {
        let ctrl = PotentialFieldController::with_gains(FieldGains {
            step_scale: 0.1,
            ..FieldGains::default()
        })
        .unwrap();
        let state = RobotState::at(Point2D::new(0.0, 0.0));
        let out = ctrl
            .step(&state, &Point2D::new(10.0, 0.0), &ObstacleMap::new(), 0)
            .unwrap();
        assert!((out.state.position.x - 0.15).abs() < TOL);
    }

    #[test]
    fn step_past_budget_reports_exhausted() {
        let ctrl = controller();
        let state = RobotState::at(Point2D::new(0.0, 0.0));
        let out = ctrl
            .step(&state, &Point2D::new(10.0, 0.0), &ObstacleMap::new(), 400)
            .unwrap();
        assert_eq!(out.status, StepStatus::Exhausted);
        assert_eq!(out.state.position, state.position);
    }

    #[test]
    fn configure_applies_and_rejects_parameters() {
        let mut ctrl = controller();

        let mut params = HashMap::new();
        params.insert("k_goal".to_string(), 2.0);
        params.insert("radius_of_influence".to_string(), 3.0);
        params.insert("n_max_steps".to_string(), 50.0);
        ctrl.configure(&params).unwrap();
        assert_eq!(ctrl.gains().k_goal, 2.0);
        assert_eq!(ctrl.gains().radius_of_influence, 3.0);
        assert_eq!(ctrl.gains().max_steps, 50);

        let mut bad = HashMap::new();
        bad.insert("radius_of_influence".to_string(), 0.0);
        assert!(ctrl.configure(&bad).is_err());

        let mut bad = HashMap::new();
        bad.insert("k_goal".to_string(), -1.0);
        assert!(ctrl.configure(&bad).is_err());
    }

    #[test]
    fn invalid_gains_are_rejected_on_construction() {
        assert!(PotentialFieldController::with_gains(FieldGains {
            radius_of_influence: -2.0,
            ..FieldGains::default()
        })
        .is_err());
        assert!(PotentialFieldController::with_gains(FieldGains {
            max_steps: 0,
            ..FieldGains::default()
        })
        .is_err());
    }
}
