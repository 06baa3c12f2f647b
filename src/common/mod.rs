//! Common utilities and types for the Talos robot

/// Common types and utilities used across the codebase
pub mod types {
    /// A 2D position in world coordinates
    pub type Point2D = nalgebra::Point2<f64>;

    /// A 2D force, displacement or error vector
    pub type Vec2D = nalgebra::Vector2<f64>;
}

/// Heading of a vector in radians, in (-pi, pi]
pub fn heading_of(v: &types::Vec2D) -> f64 {
    v.y.atan2(v.x)
}
