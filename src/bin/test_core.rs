use anyhow::{anyhow, Result};
use talos_core::common::types::Point2D;
use talos_core::navigation::controller::potential_field::PotentialFieldController;
use talos_core::navigation::controller::LocalController;
use talos_core::navigation::obstacle_map::StaticObstacleProvider;
use talos_core::navigation::NavigationStack;
use talos_core::TalosCore;
use std::collections::HashMap;

fn main() -> Result<()> {
    println!("Initializing Talos Core...");

    let mut core = TalosCore::new();

    // Create a navigation stack with the potential field controller
    let mut nav_stack = NavigationStack::with_controller(PotentialFieldController::new());

    // Configure the controller
    let mut params = HashMap::new();
    params.insert("radius_of_influence".to_string(), 2.0);
    params.insert("k_goal".to_string(), 1.5);
    params.insert("k_obstacles".to_string(), 200.0);
    params.insert("goal_tolerance".to_string(), 0.5);
    params.insert("step_scale".to_string(), 0.2);
    params.insert("n_max_steps".to_string(), 200.0);
    nav_stack.configure_controller(&params)?;

    // Scripted obstacle field between start and goal
    nav_stack.set_obstacle_provider(StaticObstacleProvider::new(vec![
        Point2D::new(4.0, 1.5),
        Point2D::new(6.0, -1.5),
        Point2D::new(5.0, 8.0),
    ]));

    println!("Using controller: {}", nav_stack.controller_name());

    core.register(nav_stack);
    core.init()?;
    println!("Core initialized successfully!");

    let start = Point2D::new(0.0, 0.0);
    let goal = Point2D::new(10.0, 0.0);
    println!(
        "Navigating from ({}, {}) to ({}, {})",
        start.x, start.y, goal.x, goal.y
    );

    let stack = core
        .navigation_stack_mut()
        .ok_or_else(|| anyhow!("navigation stack not registered"))?;

    let report = stack.run(start, goal, |tick, output| {
        println!(
            "step {:3}: pos=({:7.3}, {:7.3}) heading={:6.3} rad influential={:?}",
            tick,
            output.state.position.x,
            output.state.position.y,
            output.state.heading,
            output.influential
        );
    })?;

    println!(
        "Run finished: {:?} after {} steps at ({:.3}, {:.3})",
        report.status, report.steps, report.final_state.position.x, report.final_state.position.y
    );

    core.shutdown()?;
    println!("Core shutdown successfully!");
    Ok(())
}
