//! Grid model: canonical points for the eight locations, and grid mode derivation

use std::sync::atomic::{AtomicUsize, Ordering};

use glam::{DVec2, dvec2};

use crate::pictograph::MotionData;
use crate::types::{GridLocation, GridMode};

use super::defaults;

/// Static point tables for both grid modes.
pub struct GridModel;

impl GridModel {
    pub fn center() -> DVec2 {
        defaults::GRID_CENTER
    }

    /// Canonical point for `location` in `mode`.
    ///
    /// A mode's own locations sit on its hand points; the other four sit on
    /// its layer-2 points, so every location resolves in every mode.
    pub fn point(mode: GridMode, location: GridLocation) -> DVec2 {
        if GridMode::of_location(location) == mode {
            Self::hand_point(location)
        } else {
            Self::layer2_point(mode, location)
        }
    }

    /// Hand point for a location (diamond for cardinals, box for diagonals).
    pub fn hand_point(location: GridLocation) -> DVec2 {
        let c = defaults::GRID_CENTER;
        let r = defaults::HAND_POINT_RADIUS;
        let d = defaults::BOX_HAND_OFFSET;
        match location {
            GridLocation::North => dvec2(c.x, c.y - r),
            GridLocation::East => dvec2(c.x + r, c.y),
            GridLocation::South => dvec2(c.x, c.y + r),
            GridLocation::West => dvec2(c.x - r, c.y),
            GridLocation::NorthEast => dvec2(c.x + d, c.y - d),
            GridLocation::SouthEast => dvec2(c.x + d, c.y + d),
            GridLocation::SouthWest => dvec2(c.x - d, c.y + d),
            GridLocation::NorthWest => dvec2(c.x - d, c.y - d),
        }
    }

    /// Layer-2 point: where a mode places the locations it has no hand point for.
    fn layer2_point(mode: GridMode, location: GridLocation) -> DVec2 {
        let c = defaults::GRID_CENTER;
        match mode {
            GridMode::Diamond => {
                let d = defaults::DIAMOND_LAYER2_OFFSET;
                c + location.unit_vec().signum() * d
            }
            GridMode::Box => c + location.unit_vec() * defaults::BOX_LAYER2_RADIUS,
        }
    }
}

/// Grid mode implied by both motions' start locations.
///
/// Cardinal starts mean diamond, diagonal starts mean box. When the two
/// disagree, or a start location is missing, diamond is the default.
pub fn derive_grid_mode(blue: &MotionData, red: &MotionData) -> GridMode {
    classify(blue, red).unwrap_or(GridMode::Diamond)
}

fn classify(blue: &MotionData, red: &MotionData) -> Option<GridMode> {
    let blue_mode = GridMode::of_location(blue.start_location?);
    let red_mode = GridMode::of_location(red.start_location?);
    (blue_mode == red_mode).then_some(blue_mode)
}

/// Grid mode derivation that also counts ambiguous pictographs.
#[derive(Debug, Default)]
pub struct GridModeDeriver {
    disagreements: AtomicUsize,
}

impl GridModeDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(&self, blue: &MotionData, red: &MotionData) -> GridMode {
        if blue.start_location.is_none() || red.start_location.is_none() {
            crate::log::warn!(
                blue_start = ?blue.start_location,
                red_start = ?red.start_location,
                "motion is missing its start location, defaulting to diamond"
            );
            return GridMode::Diamond;
        }
        match classify(blue, red) {
            Some(mode) => mode,
            None => {
                self.disagreements.fetch_add(1, Ordering::Relaxed);
                crate::log::warn!(
                    blue_start = ?blue.start_location,
                    red_start = ?red.start_location,
                    "motions imply different grid modes, defaulting to diamond"
                );
                GridMode::Diamond
            }
        }
    }

    /// Number of pictographs whose motions disagreed on the grid mode.
    pub fn disagreements(&self) -> usize {
        self.disagreements.load(Ordering::Relaxed)
    }
}
