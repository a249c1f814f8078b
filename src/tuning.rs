//! Data-driven game balance
//!
//! Speeds are expressed the way the animation loop consumes them: milliseconds
//! of wall-clock time per world unit (or per degree for turning). Bigger is
//! slower.

use serde::{Deserialize, Serialize};

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// ms per unit of stick growth
    pub stretching_speed: f32,
    /// ms per degree of stick rotation
    pub turning_speed: f32,
    /// ms per unit of hero walking
    pub walking_speed: f32,
    /// ms per unit of camera scroll
    pub transitioning_speed: f32,
    /// ms per unit of fall
    pub falling_speed: f32,
    /// Width of the centred "perfect" zone on each platform
    pub perfect_area_size: f32,
    /// Where the hero stands, measured back from the platform's right edge
    pub hero_distance_from_edge: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            stretching_speed: 4.0,
            turning_speed: 4.0,
            walking_speed: 4.0,
            transitioning_speed: 2.0,
            falling_speed: 2.0,
            perfect_area_size: 10.0,
            hero_distance_from_edge: 10.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace unusable values (zero, negative, NaN, infinite) with defaults.
    ///
    /// Speeds are divisors, so anything that isn't strictly positive would
    /// stall or explode the simulation.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            stretching_speed: positive_or(
                "stretching_speed",
                self.stretching_speed,
                defaults.stretching_speed,
            ),
            turning_speed: positive_or("turning_speed", self.turning_speed, defaults.turning_speed),
            walking_speed: positive_or("walking_speed", self.walking_speed, defaults.walking_speed),
            transitioning_speed: positive_or(
                "transitioning_speed",
                self.transitioning_speed,
                defaults.transitioning_speed,
            ),
            falling_speed: positive_or("falling_speed", self.falling_speed, defaults.falling_speed),
            perfect_area_size: non_negative_or(
                "perfect_area_size",
                self.perfect_area_size,
                defaults.perfect_area_size,
            ),
            hero_distance_from_edge: non_negative_or(
                "hero_distance_from_edge",
                self.hero_distance_from_edge,
                defaults.hero_distance_from_edge,
            ),
        }
    }
}

fn positive_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("Tuning {} = {} is not positive, using {}", name, value, fallback);
        fallback
    }
}

fn non_negative_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("Tuning {} = {} is invalid, using {}", name, value, fallback);
        fallback
    }
}
