//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; nothing is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::landing::Landing;
use super::world;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle on a platform, waiting for the player to press
    #[default]
    Waiting,
    /// Press held, stick growing
    Stretching,
    /// Press released, stick falling toward the next platform
    Turning,
    /// Hero walking along the fallen stick
    Walking,
    /// Landed; camera scrolling to the next platform
    Transitioning,
    /// Missed; hero falling off the stick
    Falling,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Waiting => "waiting",
            GamePhase::Stretching => "stretching",
            GamePhase::Turning => "turning",
            GamePhase::Walking => "walking",
            GamePhase::Transitioning => "transitioning",
            GamePhase::Falling => "falling",
        }
    }
}

/// A platform the hero can stand on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Left edge
    pub x: f32,
    pub width: f32,
}

impl Platform {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// The stick the player is stretching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    /// Anchor, the right edge of the platform it stands on
    pub x: f32,
    pub length: f32,
    /// Degrees, 0 = upright, 90 = flat across the gap
    pub rotation: f32,
}

impl Stick {
    /// A fresh upright stick of zero length
    pub fn anchored_at(x: f32) -> Self {
        Self {
            x,
            length: 0.0,
            rotation: 0.0,
        }
    }

    /// Where the stick ends once it lies flat
    pub fn end_x(&self) -> f32 {
        self.x + self.length
    }
}

/// Background tree tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeColor {
    Olive,
    Plum,
    Lavender,
}

impl TreeColor {
    pub const ALL: [TreeColor; 3] = [TreeColor::Olive, TreeColor::Plum, TreeColor::Lavender];
}

/// Decorative tree (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    pub color: TreeColor,
}

/// Something the host may want to react to (HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player pressed; stick started growing
    Stretching,
    /// Stick end landed on the next platform
    Landed { perfect: bool, score: u32 },
    /// Stick end missed the next platform
    Fell,
    /// Hero dropped out of view; restart should be offered
    GameOver,
    /// Camera reached the next platform and a new cycle began
    CycleComplete,
    /// Run was reset
    Restarted,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    /// World generation RNG, seeded from `seed`
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Left to right; `platforms[0]` is the one the hero stands on
    pub platforms: Vec<Platform>,
    pub stick: Stick,
    pub trees: Vec<Tree>,
    pub hero_x: f32,
    /// Fall distance, 0 while grounded
    pub hero_y: f32,
    /// Camera scroll during a transition
    pub scene_offset: f32,
    pub score: u32,
    /// Perfect landings this run (reported only, no score bonus)
    pub perfect_count: u32,
    /// Outcome of the most recent landing check
    pub last_landing: Option<Landing>,
    /// Restart affordance, raised once the hero has fallen out of view
    pub show_restart: bool,
    /// Instructions shown until the first press of a run
    pub show_intro: bool,
    /// Timestamp of the previous tick (ms); `None` means the next tick is a baseline
    pub last_timestamp: Option<f64>,
    /// Pending events for the host, drained with [`GameState::drain_events`]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.sanitized(),
            phase: GamePhase::Waiting,
            platforms: Vec::with_capacity(LOOKAHEAD_PLATFORMS + 1),
            stick: Stick::anchored_at(0.0),
            trees: Vec::with_capacity(TREE_COUNT),
            hero_x: 0.0,
            hero_y: 0.0,
            scene_offset: 0.0,
            score: 0,
            perfect_count: 0,
            last_landing: None,
            show_restart: false,
            show_intro: true,
            last_timestamp: None,
            events: Vec::new(),
        };
        world::populate(&mut state);
        state.place_on_current_platform();
        state
    }

    /// Throw the run away and start over with a new seed, keeping tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
        log::info!("Restarted with seed {}", seed);
        self.events.push(GameEvent::Restarted);
    }

    /// Platform the hero is standing on
    pub fn current_platform(&self) -> Platform {
        self.platforms[0]
    }

    /// Platform the stick has to reach
    pub fn next_platform(&self) -> Platform {
        self.platforms[1]
    }

    /// Fresh stick at the current platform's edge, hero standing just behind it
    pub(crate) fn place_on_current_platform(&mut self) {
        let edge = self.current_platform().right();
        self.stick = Stick::anchored_at(edge);
        self.hero_x = edge - self.tuning.hero_distance_from_edge;
        self.hero_y = 0.0;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.platforms.len(), LOOKAHEAD_PLATFORMS + 1);
        assert_eq!(
            state.platforms[0],
            Platform {
                x: START_PLATFORM_X,
                width: START_PLATFORM_WIDTH
            }
        );
        assert_eq!(state.stick, Stick::anchored_at(100.0));
        assert!((state.hero_x - 90.0).abs() < 0.001);
        assert_eq!(state.hero_y, 0.0);
        assert_eq!(state.trees.len(), TREE_COUNT);
        assert!(state.show_intro);
        assert!(!state.show_restart);
    }

    #[test]
    fn test_restart_keeps_tuning() {
        let tuning = Tuning {
            walking_speed: 1.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning.clone());
        state.score = 12;
        state.restart(2);
        assert_eq!(state.seed, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.tuning, tuning);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_stick_end() {
        let stick = Stick {
            x: 100.0,
            length: 60.0,
            rotation: 90.0,
        };
        assert_eq!(stick.end_x(), 160.0);
    }
}
