//! Stick Hero - stretch a stick, bridge the gap, don't fall
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phase machine, world generation, landing checks)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (world units == CSS pixels at 1x)
    pub const CANVAS_WIDTH: f32 = 375.0;
    pub const CANVAS_HEIGHT: f32 = 375.0;

    /// Platforms are all the same height, measured up from the canvas bottom
    pub const PLATFORM_HEIGHT: f32 = 100.0;

    /// Hero body size
    pub const HERO_WIDTH: f32 = 17.0;
    pub const HERO_HEIGHT: f32 = 30.0;

    /// Starting platform, always the same
    pub const START_PLATFORM_X: f32 = 50.0;
    pub const START_PLATFORM_WIDTH: f32 = 50.0;

    /// Platform generation ranges
    pub const MIN_GAP: f32 = 40.0;
    pub const MAX_GAP: f32 = 200.0;
    pub const MIN_WIDTH: f32 = 20.0;
    pub const MAX_WIDTH: f32 = 100.0;

    /// Platforms generated beyond the starting one
    pub const LOOKAHEAD_PLATFORMS: usize = 4;

    /// Decorative trees
    pub const TREE_COUNT: usize = 10;
    pub const TREE_MIN_GAP: f32 = 30.0;
    pub const TREE_MAX_GAP: f32 = 150.0;
    /// Widest part of a tree, centred on its x
    pub const TREE_CANOPY_WIDTH: f32 = 24.0;

    /// Stick rotation once it has fallen flat (degrees)
    pub const STICK_MAX_ROTATION: f32 = 90.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees / 180.0 * std::f32::consts::PI
}

/// Tip of a stick standing at `base`, rotated clockwise by `rotation` degrees.
///
/// World y grows upward, so an unrotated stick points along +y and a stick
/// rotated by 90 degrees lies flat along +x.
#[inline]
pub fn stick_tip(base: Vec2, length: f32, rotation: f32) -> Vec2 {
    let theta = deg_to_rad(rotation);
    base + Vec2::new(theta.sin(), theta.cos()) * length
}
