//! Point-obstacle world model
//!
//! Obstacles are bare points; the map is materialized once per run and is
//! read-only from the controller's perspective. Map sources (scripted sets,
//! randomized fields) sit behind the `ObstacleProvider` trait so the core
//! never depends on where the points came from.

use crate::common::types::Point2D;
use crate::error::NavError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

/// An ordered, read-only set of point obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleMap {
    points: Vec<Point2D>,
}

impl ObstacleMap {
    /// Create an empty map
    pub fn new() -> Self {
        ObstacleMap { points: Vec::new() }
    }

    /// Create a map from a fixed list of points
    pub fn from_points(points: Vec<Point2D>) -> Self {
        ObstacleMap { points }
    }

    /// Number of obstacles in the map
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the map contains no obstacles
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the obstacle positions in index order
    pub fn iter(&self) -> impl Iterator<Item = &Point2D> {
        self.points.iter()
    }

    /// All obstacle positions, in index order
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Obstacle position by index
    pub fn get(&self, index: usize) -> Option<&Point2D> {
        self.points.get(index)
    }
}

/// Trait for sources of obstacle maps
pub trait ObstacleProvider: Debug + Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Produce the obstacle map for the next run
    fn provide(&mut self) -> Result<ObstacleMap, NavError>;
}

/// Provider returning a fixed, scripted obstacle set
#[derive(Debug, Clone, Default)]
pub struct StaticObstacleProvider {
    map: ObstacleMap,
}

impl StaticObstacleProvider {
    /// Create a provider with no obstacles
    pub fn empty() -> Self {
        StaticObstacleProvider {
            map: ObstacleMap::new(),
        }
    }

    /// Create a provider over a fixed list of points
    pub fn new(points: Vec<Point2D>) -> Self {
        StaticObstacleProvider {
            map: ObstacleMap::from_points(points),
        }
    }
}

impl ObstacleProvider for StaticObstacleProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn provide(&mut self) -> Result<ObstacleMap, NavError> {
        Ok(self.map.clone())
    }
}

/// Provider generating a seeded random field of obstacles
///
/// The seed makes runs reproducible, so randomized maps can still be used
/// as deterministic test inputs.
#[derive(Debug, Clone)]
pub struct RandomObstacleProvider {
    n_obstacles: usize,
    map_size: f64,
    seed: u64,
}

impl RandomObstacleProvider {
    /// Create a provider scattering `n_obstacles` points uniformly over a
    /// `map_size` x `map_size` square
    pub fn new(n_obstacles: usize, map_size: f64, seed: u64) -> Result<Self, NavError> {
        if map_size <= 0.0 {
            return Err(NavError::InvalidConfiguration(
                "map size must be positive".to_string(),
            ));
        }
        Ok(RandomObstacleProvider {
            n_obstacles,
            map_size,
            seed,
        })
    }
}

impl ObstacleProvider for RandomObstacleProvider {
    fn name(&self) -> &str {
        "random"
    }

    fn provide(&mut self) -> Result<ObstacleMap, NavError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let points = (0..self.n_obstacles)
            .map(|_| {
                Point2D::new(
                    rng.gen_range(0.0..self.map_size),
                    rng.gen_range(0.0..self.map_size),
                )
            })
            .collect();
        Ok(ObstacleMap::from_points(points))
    }
}
