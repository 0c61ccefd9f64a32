//! Arrow and prop placement for pictographs
//!
//! This module is organized into submodules:
//! - `defaults`: Canvas constants and default SVG centers
//! - `grid`: Grid points for both grid modes, grid mode derivation
//! - `location`: Arrow location strategies
//! - `dash`: Letter-specific dash location tables
//! - `rotation`: Arrow rotation tables and mirroring
//! - `dataset`: The placement dataset, its sources and provider
//! - `adjustment`: Placement keys and rotated dataset offsets
//! - `prop`: Prop positions, rotation and the origin fallback
//! - `beta`: Beta prop separation

pub mod adjustment;
pub mod beta;
pub mod dash;
pub mod dataset;
pub mod defaults;
pub mod grid;
pub mod location;
pub mod prop;
pub mod rotation;

use std::sync::Arc;

use glam::DVec2;

// Re-export commonly used items
pub use adjustment::{ArrowAdjustmentCalculator, PlacementKeyGenerator};
pub use beta::{BetaPropPositioner, Direction};
pub use dash::{DashContext, DashLocationCalculator};
pub use dataset::{
    BundledSource, DatasetSource, FileSource, PlacementDataProvider, PlacementDataset,
    StaticSource,
};
pub use grid::{GridModeDeriver, GridModel, derive_grid_mode};
pub use location::ArrowLocationCalculator;
pub use prop::{PropPlacementCalculator, PropPosition, Props};
pub use rotation::ArrowRotationCalculator;

use crate::pictograph::{ArrowPlacementData, MotionData, PictographData, PropPlacementData};
use crate::types::{Angle, GridLocation, GridMode, PropColor};

// ============================================================================
// Capabilities
// ============================================================================

/// Resolves the grid location an arrow is centered on.
pub trait LocationCalculator: Send + Sync {
    fn calculate_location(
        &self,
        motion: &MotionData,
        pictograph: &PictographData,
    ) -> GridLocation;
}

/// Rotation and mirroring of an arrow glyph.
pub trait RotationCalculator: Send + Sync {
    fn calculate_rotation(&self, motion: &MotionData, location: GridLocation) -> Angle;
    fn is_mirrored(&self, motion: &MotionData) -> bool;
}

/// Offset added to an arrow's grid point, already rotated into the arrow's frame.
pub trait AdjustmentCalculator: Send + Sync {
    fn calculate_adjustment(
        &self,
        motion: &MotionData,
        pictograph: &PictographData,
        rotation: Angle,
    ) -> DVec2;
}

/// Final positions of both props.
pub trait PropPlacer: Send + Sync {
    fn update_prop_placement(&self, pictograph: &PictographData, mode: GridMode) -> Props;
}

impl LocationCalculator for ArrowLocationCalculator {
    fn calculate_location(
        &self,
        motion: &MotionData,
        pictograph: &PictographData,
    ) -> GridLocation {
        ArrowLocationCalculator::calculate_location(self, motion, pictograph)
    }
}

impl RotationCalculator for ArrowRotationCalculator {
    fn calculate_rotation(&self, motion: &MotionData, location: GridLocation) -> Angle {
        ArrowRotationCalculator::calculate_rotation(self, motion, location)
    }

    fn is_mirrored(&self, motion: &MotionData) -> bool {
        ArrowRotationCalculator::is_mirrored(self, motion)
    }
}

impl AdjustmentCalculator for ArrowAdjustmentCalculator {
    fn calculate_adjustment(
        &self,
        motion: &MotionData,
        pictograph: &PictographData,
        rotation: Angle,
    ) -> DVec2 {
        ArrowAdjustmentCalculator::calculate_adjustment(self, motion, pictograph, rotation)
    }
}

impl PropPlacer for PropPlacementCalculator {
    fn update_prop_placement(&self, pictograph: &PictographData, mode: GridMode) -> Props {
        PropPlacementCalculator::update_prop_placement(self, pictograph, mode)
    }
}

// ============================================================================
// Positioner
// ============================================================================

/// Per-positioner settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionerOptions {
    /// Center of the arrow SVG, subtracted to get its top-left corner
    pub arrow_svg_center: DVec2,
    pub prop_svg_center: DVec2,
}

impl Default for PositionerOptions {
    fn default() -> Self {
        Self {
            arrow_svg_center: defaults::ARROW_SVG_CENTER,
            prop_svg_center: defaults::PROP_SVG_CENTER,
        }
    }
}

/// Computes every placement of a pictograph.
///
/// Each step is a swappable capability; [`PictographPositioner::new`] wires
/// in the standard calculators.
pub struct PictographPositioner {
    location: Box<dyn LocationCalculator>,
    rotation: Box<dyn RotationCalculator>,
    adjustment: Box<dyn AdjustmentCalculator>,
    props: Box<dyn PropPlacer>,
    grid_modes: GridModeDeriver,
    options: PositionerOptions,
}

impl PictographPositioner {
    pub fn new(provider: Arc<PlacementDataProvider>) -> Self {
        Self {
            location: Box::new(ArrowLocationCalculator::new()),
            rotation: Box::new(ArrowRotationCalculator::new()),
            adjustment: Box::new(ArrowAdjustmentCalculator::new(provider)),
            props: Box::new(PropPlacementCalculator::new()),
            grid_modes: GridModeDeriver::new(),
            options: PositionerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PositionerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_location_calculator(mut self, calc: impl LocationCalculator + 'static) -> Self {
        self.location = Box::new(calc);
        self
    }

    pub fn with_rotation_calculator(mut self, calc: impl RotationCalculator + 'static) -> Self {
        self.rotation = Box::new(calc);
        self
    }

    pub fn with_adjustment_calculator(
        mut self,
        calc: impl AdjustmentCalculator + 'static,
    ) -> Self {
        self.adjustment = Box::new(calc);
        self
    }

    pub fn with_prop_placer(mut self, placer: impl PropPlacer + 'static) -> Self {
        self.props = Box::new(placer);
        self
    }

    pub fn options(&self) -> &PositionerOptions {
        &self.options
    }

    /// Pictographs seen so far whose motions implied different grid modes.
    pub fn grid_mode_disagreements(&self) -> usize {
        self.grid_modes.disagreements()
    }

    /// Fill in every placement output of `pictograph`.
    ///
    /// Only output fields and empty derived fields are written; the motions
    /// themselves are never changed. Outputs of invisible motions are reset.
    pub fn position(&self, pictograph: &mut PictographData) {
        let mode = self.fill_derived(pictograph);
        crate::log::debug!(letter = ?pictograph.letter, %mode, "positioning pictograph");

        const COLORS: [PropColor; 2] = [PropColor::Blue, PropColor::Red];

        for color in COLORS {
            let motion = pictograph.motions.get(color);
            let location = motion
                .is_visible
                .then(|| self.location.calculate_location(motion, pictograph));
            let motion = pictograph.motions.get_mut(color);
            motion.arrow_location = location;
            if location.is_none() {
                motion.arrow_placement = ArrowPlacementData::default();
                motion.prop_placement = PropPlacementData::default();
            }
        }

        for color in COLORS {
            let motion = pictograph.motions.get(color);
            let (true, Some(location)) = (motion.is_visible, motion.arrow_location) else {
                continue;
            };
            let placement = self.place_arrow(motion, location, mode, pictograph);
            pictograph.motions.get_mut(color).arrow_placement = placement;
        }

        let props = self.props.update_prop_placement(pictograph, mode);
        for color in COLORS {
            let motion = pictograph.motions.get_mut(color);
            if !motion.is_visible {
                continue;
            }
            let prop = props.get(color);
            let center = self.options.prop_svg_center;
            motion.prop_placement = PropPlacementData {
                position_x: prop.coordinates.x - center.x,
                position_y: prop.coordinates.y - center.y,
                rotation_angle: prop.rotation_angle,
                coordinates: Some(prop.coordinates),
                svg_center: Some(center),
            };
        }
    }

    /// Like [`position`](Self::position), on a copy.
    pub fn positioned(&self, pictograph: &PictographData) -> PictographData {
        let mut out = pictograph.clone();
        self.position(&mut out);
        out
    }

    fn fill_derived(&self, pictograph: &mut PictographData) -> GridMode {
        let mode = match pictograph.grid_mode {
            Some(mode) => mode,
            None => {
                let mode = self
                    .grid_modes
                    .derive(&pictograph.motions.blue, &pictograph.motions.red);
                pictograph.grid_mode = Some(mode);
                mode
            }
        };
        if pictograph.letter_type.is_none() {
            pictograph.letter_type = pictograph.resolved_letter_type();
        }
        if pictograph.start_position.is_none() {
            pictograph.start_position = pictograph.derived_start_position();
        }
        if pictograph.end_position.is_none() {
            pictograph.end_position = pictograph.derived_end_position();
        }
        mode
    }

    fn place_arrow(
        &self,
        motion: &MotionData,
        location: GridLocation,
        mode: GridMode,
        pictograph: &PictographData,
    ) -> ArrowPlacementData {
        let rotation = self.rotation.calculate_rotation(motion, location);
        let mirrored = self.rotation.is_mirrored(motion);
        let adjustment = self
            .adjustment
            .calculate_adjustment(motion, pictograph, rotation);
        let coordinates = GridModel::point(mode, location) + adjustment;
        let center = self.options.arrow_svg_center;

        crate::log::debug!(
            color = %motion.color,
            %location,
            %rotation,
            mirrored,
            x = coordinates.x,
            y = coordinates.y,
            "placed arrow"
        );

        ArrowPlacementData {
            position_x: coordinates.x - center.x,
            position_y: coordinates.y - center.y,
            rotation_angle: rotation,
            svg_mirrored: mirrored,
            coordinates: Some(coordinates),
            svg_center: Some(center),
        }
    }
}
