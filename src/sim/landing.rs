//! Landing checks
//!
//! Decides where a flat stick puts the hero: on the next platform, dead
//! centre on it, or into the gap.

use serde::{Deserialize, Serialize};

use super::state::{Platform, Stick};

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landing {
    /// Stick end is on the next platform
    Land {
        /// Stick end is inside the centred perfect zone
        perfect: bool,
    },
    /// Stick is too short or too long
    Miss,
}

impl Landing {
    pub fn is_success(&self) -> bool {
        matches!(self, Landing::Land { .. })
    }

    pub fn is_perfect(&self) -> bool {
        matches!(self, Landing::Land { perfect: true })
    }
}

/// Check where the stick ends relative to the next platform.
///
/// Both platform edges count as a landing. The perfect zone is
/// `perfect_area_size` wide, centred on the platform.
pub fn evaluate_landing(stick: &Stick, next: &Platform, perfect_area_size: f32) -> Landing {
    let end_x = stick.end_x();

    if end_x < next.x || end_x > next.right() {
        return Landing::Miss;
    }

    let perfect = (end_x - next.center()).abs() <= perfect_area_size / 2.0;
    Landing::Land { perfect }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stick(length: f32) -> Stick {
        Stick {
            x: 100.0,
            length,
            rotation: 90.0,
        }
    }

    const NEXT: Platform = Platform {
        x: 140.0,
        width: 30.0,
    };

    #[test]
    fn test_too_long_misses() {
        // 100 + 90 = 190, past 140 + 30
        assert_eq!(evaluate_landing(&stick(90.0), &NEXT, 10.0), Landing::Miss);
    }

    #[test]
    fn test_too_short_misses() {
        assert_eq!(evaluate_landing(&stick(39.0), &NEXT, 10.0), Landing::Miss);
    }

    #[test]
    fn test_inside_lands() {
        // 100 + 60 = 160, inside [140, 170] but 5 past the centre at 155
        let landing = evaluate_landing(&stick(60.0), &NEXT, 8.0);
        assert_eq!(landing, Landing::Land { perfect: false });
        assert!(landing.is_success());
        assert!(!landing.is_perfect());
    }

    #[test]
    fn test_edges_are_inclusive() {
        assert!(evaluate_landing(&stick(40.0), &NEXT, 10.0).is_success());
        assert!(evaluate_landing(&stick(70.0), &NEXT, 10.0).is_success());
    }

    #[test]
    fn test_perfect_zone() {
        assert!(evaluate_landing(&stick(55.0), &NEXT, 10.0).is_perfect());
        assert!(evaluate_landing(&stick(60.0), &NEXT, 10.0).is_perfect());
        assert!(evaluate_landing(&stick(50.0), &NEXT, 10.0).is_perfect());
        assert!(!evaluate_landing(&stick(49.0), &NEXT, 10.0).is_perfect());
        assert!(!evaluate_landing(&stick(61.0), &NEXT, 10.0).is_perfect());
    }
}
