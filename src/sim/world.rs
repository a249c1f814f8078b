//! World generation
//!
//! Platforms and trees are laid out left to right with bounded random gaps.
//! All randomness comes from the run's seeded RNG.

use rand::Rng;

use super::state::{GameState, Platform, Tree, TreeColor};
use crate::consts::*;

/// Append one platform after the last one.
///
/// An empty sequence gets the fixed starting platform instead.
pub fn generate_platform<R: Rng + ?Sized>(platforms: &mut Vec<Platform>, rng: &mut R) {
    let Some(last) = platforms.last() else {
        platforms.push(Platform {
            x: START_PLATFORM_X,
            width: START_PLATFORM_WIDTH,
        });
        return;
    };

    let x = last.right() + rng.random_range(MIN_GAP..MAX_GAP);
    let width = rng.random_range(MIN_WIDTH..MAX_WIDTH);
    platforms.push(Platform { x, width });
}

/// Append one tree after the furthest one (or after x = 0)
pub fn generate_tree<R: Rng + ?Sized>(trees: &mut Vec<Tree>, rng: &mut R) {
    let furthest_x = trees.last().map(|t| t.x).unwrap_or(0.0);
    let x = furthest_x + rng.random_range(TREE_MIN_GAP..TREE_MAX_GAP);
    let color = TreeColor::ALL[rng.random_range(0..TreeColor::ALL.len())];
    trees.push(Tree { x, color });
}

/// Fill an empty world: starting platform, lookahead platforms and trees
pub fn populate(state: &mut GameState) {
    state.platforms.clear();
    state.trees.clear();

    generate_platform(&mut state.platforms, &mut state.rng);
    for _ in 0..LOOKAHEAD_PLATFORMS {
        generate_platform(&mut state.platforms, &mut state.rng);
    }
    for _ in 0..TREE_COUNT {
        generate_tree(&mut state.trees, &mut state.rng);
    }
}

/// Retire the platform just left behind and extend the lookahead by one.
///
/// The world is then shifted left by the distance scrolled so the new
/// current platform sits where the old one did, which lets the camera
/// offset return to zero without the scene jumping.
pub fn roll_over(state: &mut GameState) {
    let shift = state.next_platform().x - state.current_platform().x;

    state.platforms.remove(0);
    generate_platform(&mut state.platforms, &mut state.rng);

    for platform in &mut state.platforms {
        platform.x -= shift;
    }
    for tree in &mut state.trees {
        tree.x -= shift;
    }

    // Drop a tree only once its whole canopy is past the left edge
    state.trees.retain(|t| t.x >= -TREE_CANOPY_WIDTH);
    while state.trees.len() < TREE_COUNT {
        generate_tree(&mut state.trees, &mut state.rng);
    }
}
