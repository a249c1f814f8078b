//! Read-only view of the session for presentation
//!
//! Everything is in world coordinates; the renderer applies the camera.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, Platform, Stick, Tree};
use crate::consts::PLATFORM_HEIGHT;
use crate::stick_tip;

/// What a frame needs to draw and what the HUD needs to show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub platforms: Vec<Platform>,
    pub stick: Stick,
    pub trees: Vec<Tree>,
    /// Hero feet, x = world x, y = fall offset below the platform top
    pub hero: Vec2,
    pub scene_offset: f32,
    pub score: u32,
    pub perfect_count: u32,
    pub show_restart: bool,
    pub show_intro: bool,
    /// The landing that started this transition was perfect
    pub perfect_cue: bool,
    /// Centre of the next platform's perfect zone, while it is still a target
    pub perfect_marker: Option<f32>,
    pub perfect_area_size: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let perfect_cue = state.phase == GamePhase::Transitioning
            && state.last_landing.is_some_and(|l| l.is_perfect());

        // The marker is only a target until the hero has left the platform
        let perfect_marker = match state.phase {
            GamePhase::Transitioning | GamePhase::Falling => None,
            _ => Some(state.next_platform().center()),
        };

        Self {
            phase: state.phase,
            platforms: state.platforms.clone(),
            stick: state.stick,
            trees: state.trees.clone(),
            hero: Vec2::new(state.hero_x, state.hero_y),
            scene_offset: state.scene_offset,
            score: state.score,
            perfect_count: state.perfect_count,
            show_restart: state.show_restart,
            show_intro: state.show_intro,
            perfect_cue,
            perfect_marker,
            perfect_area_size: state.tuning.perfect_area_size,
        }
    }

    /// Stick tip in world space, with y measured up from the canvas bottom
    pub fn stick_tip(&self) -> Vec2 {
        stick_tip(
            Vec2::new(self.stick.x, PLATFORM_HEIGHT),
            self.stick.length,
            self.stick.rotation,
        )
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
