use anyhow::{anyhow, Result};
use talos_core::common::types::Point2D;
use talos_core::navigation::controller::{RobotState, StepStatus};
use talos_core::navigation::obstacle_map::RandomObstacleProvider;
use talos_core::navigation::NavigationStack;
use talos_core::TalosCore;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Default parameters
    let n_obstacles = 25;
    let map_size = 10.0;
    let seed = 42;
    let tick_period = Duration::from_millis(50);

    println!(
        "Using parameters: n_obstacles={}, map_size={}, seed={}",
        n_obstacles, map_size, seed
    );

    let mut core = TalosCore::new();

    let mut nav_stack = NavigationStack::new();
    nav_stack.set_obstacle_provider(RandomObstacleProvider::new(n_obstacles, map_size, seed)?);

    let mut params = HashMap::new();
    params.insert("radius_of_influence".to_string(), 2.0);
    params.insert("k_goal".to_string(), 1.5);
    params.insert("k_obstacles".to_string(), 200.0);
    params.insert("goal_tolerance".to_string(), 0.5);
    params.insert("step_scale".to_string(), 0.2);
    params.insert("n_max_steps".to_string(), 400.0);
    nav_stack.configure_controller(&params)?;

    core.register(nav_stack);
    core.init()?;

    let stack = core
        .navigation_stack_mut()
        .ok_or_else(|| anyhow!("navigation stack not registered"))?;

    println!("Obstacle map has {} points", stack.obstacle_map().len());

    let start = Point2D::new(0.5, 0.5);
    let goal = Point2D::new(9.5, 9.5);
    println!(
        "Navigating from ({}, {}) to ({}, {})",
        start.x, start.y, goal.x, goal.y
    );

    // The node owns robot state and pacing; the stack only computes steps
    let mut ticker = time::interval(tick_period);
    let mut state = RobotState::at(start);
    let mut steps_taken = 0usize;

    let (status, steps) = loop {
        ticker.tick().await;

        let output = stack.step_once(&state, &goal, steps_taken)?;
        match output.status {
            StepStatus::Continuing => {
                println!(
                    "step {:3}: pos=({:7.3}, {:7.3}) heading={:6.3} rad influential={:?}",
                    steps_taken,
                    output.state.position.x,
                    output.state.position.y,
                    output.state.heading,
                    output.influential
                );
                state = output.state;
                steps_taken += 1;
            }
            status => break (status, steps_taken),
        }
    };

    println!(
        "Run finished: {:?} after {} steps at ({:.3}, {:.3})",
        status, steps, state.position.x, state.position.y
    );

    core.shutdown()?;
    Ok(())
}
