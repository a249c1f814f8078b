//! Build a frame's geometry from a simulation snapshot
//!
//! Output is in canvas space: x from the left edge, y up from the bottom,
//! both in world units. The camera offset is applied here.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Snapshot, TreeColor};

const STICK_THICKNESS: f32 = 2.0;
const TREE_TRUNK_WIDTH: f32 = 4.0;
const TREE_TRUNK_HEIGHT: f32 = 12.0;
const TREE_CANOPY_HEIGHT: f32 = 36.0;
/// Trees stand a little below the platform tops so platforms cover their feet
const TREE_BASE_Y: f32 = PLATFORM_HEIGHT - 20.0;

/// Background clear color for the current settings
pub fn background(settings: &Settings) -> [f32; 4] {
    if settings.high_contrast {
        colors::HC_BACKGROUND
    } else {
        colors::SKY
    }
}

fn tree_color(color: TreeColor) -> [f32; 4] {
    match color {
        TreeColor::Olive => colors::TREE_OLIVE,
        TreeColor::Plum => colors::TREE_PLUM,
        TreeColor::Lavender => colors::TREE_LAVENDER,
    }
}

/// Tessellate the whole scene, back to front
pub fn build(snapshot: &Snapshot, settings: &Settings) -> Vec<Vertex> {
    let fg = |normal: [f32; 4]| {
        if settings.high_contrast {
            colors::HC_FOREGROUND
        } else {
            normal
        }
    };
    let camera = Vec2::new(snapshot.scene_offset, 0.0);
    let mut vertices = Vec::new();

    if settings.show_trees {
        for tree in &snapshot.trees {
            let x = tree.x - snapshot.scene_offset;
            if !(-TREE_CANOPY_WIDTH..=CANVAS_WIDTH + TREE_CANOPY_WIDTH).contains(&x) {
                continue;
            }
            vertices.extend(shapes::rect(
                Vec2::new(x - TREE_TRUNK_WIDTH / 2.0, TREE_BASE_Y),
                Vec2::new(x + TREE_TRUNK_WIDTH / 2.0, TREE_BASE_Y + TREE_TRUNK_HEIGHT),
                fg(colors::TREE_TRUNK),
            ));
            let canopy_y = TREE_BASE_Y + TREE_TRUNK_HEIGHT;
            vertices.extend(shapes::triangle(
                Vec2::new(x - TREE_CANOPY_WIDTH / 2.0, canopy_y),
                Vec2::new(x + TREE_CANOPY_WIDTH / 2.0, canopy_y),
                Vec2::new(x, canopy_y + TREE_CANOPY_HEIGHT),
                fg(tree_color(tree.color)),
            ));
        }
    }

    for platform in &snapshot.platforms {
        let min = Vec2::new(platform.x, 0.0) - camera;
        let max = Vec2::new(platform.right(), PLATFORM_HEIGHT) - camera;
        if max.x < 0.0 || min.x > CANVAS_WIDTH {
            continue;
        }
        vertices.extend(shapes::rect(min, max, fg(colors::PLATFORM)));
    }

    if settings.perfect_marker
        && let Some(center) = snapshot.perfect_marker
    {
        let half = snapshot.perfect_area_size / 2.0;
        vertices.extend(shapes::rect(
            Vec2::new(center - half, PLATFORM_HEIGHT - snapshot.perfect_area_size) - camera,
            Vec2::new(center + half, PLATFORM_HEIGHT) - camera,
            colors::PERFECT_MARKER,
        ));
    }

    // Hero stands on the platform top and sinks as it falls
    let feet = Vec2::new(snapshot.hero.x, PLATFORM_HEIGHT - snapshot.hero.y) - camera;
    vertices.extend(shapes::rect(
        Vec2::new(feet.x - HERO_WIDTH / 2.0, feet.y),
        Vec2::new(feet.x + HERO_WIDTH / 2.0, feet.y + HERO_HEIGHT),
        fg(colors::HERO),
    ));

    let base = Vec2::new(snapshot.stick.x, PLATFORM_HEIGHT) - camera;
    let tip = snapshot.stick_tip() - camera;
    vertices.extend(shapes::line(base, tip, STICK_THICKNESS, fg(colors::STICK)));

    vertices
}
