//! Arrow adjustment: dataset offsets rotated into the arrow's frame
//!
//! Offsets are authored relative to an unrotated arrow. Before they are
//! added to the grid point they are rotated by the inverse of the arrow's
//! rotation angle, so an offset meaning "along the arrow" stays along the
//! arrow whichever way it points.

use std::sync::Arc;

use glam::{DMat2, DVec2};

use crate::letter::Letter;
use crate::pictograph::{MotionData, PictographData};
use crate::types::{Angle, GridMode, MotionType, PropColor, Turns};

use super::dataset::PlacementDataProvider;
use super::grid::derive_grid_mode;

/// Rotate a dataset offset into the frame of an arrow drawn at `angle`.
///
/// Applies `R(-angle)`: at 90° `(x, y)` becomes `(y, -x)`.
pub fn rotate_offset(offset: DVec2, angle: Angle) -> DVec2 {
    DMat2::from_angle(-angle.radians()) * offset
}

/// Derives dataset placement keys such as `pro_to_layer1_alpha`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementKeyGenerator;

impl PlacementKeyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Key for `motion` within `pictograph`, or the bare motion-type key when
    /// the end position is unknown.
    pub fn generate(&self, motion: &MotionData, pictograph: &PictographData) -> String {
        let motion_key = motion.motion_type.key();
        let Some(end) = pictograph.end_position.or_else(|| pictograph.derived_end_position())
        else {
            return motion_key.to_string();
        };
        format!(
            "{motion_key}_to_{}_{}",
            Self::layer(pictograph),
            end.group.key()
        )
    }

    /// Orientation layer: `layer1` when both props end radial (in/out),
    /// `layer2` when neither does, `layer3_blueX_redY` otherwise.
    fn layer(pictograph: &PictographData) -> String {
        let blue = pictograph.motions.blue.end_orientation.is_radial();
        let red = pictograph.motions.red.end_orientation.is_radial();
        match (blue, red) {
            (true, true) => "layer1".to_string(),
            (false, false) => "layer2".to_string(),
            _ => {
                let n = |radial: bool| if radial { 1 } else { 2 };
                format!("layer3_blue{}_red{}", n(blue), n(red))
            }
        }
    }
}

/// Looks up and transforms arrow adjustments.
#[derive(Debug, Clone)]
pub struct ArrowAdjustmentCalculator {
    provider: Arc<PlacementDataProvider>,
    keys: PlacementKeyGenerator,
}

impl ArrowAdjustmentCalculator {
    pub fn new(provider: Arc<PlacementDataProvider>) -> Self {
        Self {
            provider,
            keys: PlacementKeyGenerator::new(),
        }
    }

    /// Default offset for a placement key, falling back to the bare
    /// motion-type key. Zero when nothing matches or the dataset is not loaded.
    pub fn get_default_adjustment(
        &self,
        motion_type: MotionType,
        placement_key: &str,
        turns: Turns,
        grid_mode: GridMode,
    ) -> DVec2 {
        let Some(dataset) = self.provider.dataset() else {
            crate::log::warn!(
                %motion_type,
                placement_key,
                "placement dataset not loaded, using zero adjustment"
            );
            return DVec2::ZERO;
        };

        dataset
            .offset(grid_mode, motion_type, placement_key, turns)
            .or_else(|| dataset.offset(grid_mode, motion_type, motion_type.key(), turns))
            .unwrap_or_else(|| {
                crate::log::debug!(
                    %motion_type,
                    placement_key,
                    %turns,
                    %grid_mode,
                    "no default adjustment"
                );
                DVec2::ZERO
            })
    }

    /// Letter-specific override for one color, if the dataset has one.
    pub fn get_special_adjustment(
        &self,
        letter: Letter,
        color: PropColor,
        turns: (Turns, Turns),
        grid_mode: GridMode,
    ) -> Option<DVec2> {
        self.provider
            .dataset()?
            .special_offset(grid_mode, letter, color, turns)
    }

    /// Final adjustment for `motion`: special over default, rotated by `rotation`.
    pub fn calculate_adjustment(
        &self,
        motion: &MotionData,
        pictograph: &PictographData,
        rotation: Angle,
    ) -> DVec2 {
        let grid_mode = pictograph.grid_mode.unwrap_or_else(|| {
            derive_grid_mode(&pictograph.motions.blue, &pictograph.motions.red)
        });

        let turns = (pictograph.motions.blue.turns, pictograph.motions.red.turns);
        let special = pictograph
            .letter
            .and_then(|letter| self.get_special_adjustment(letter, motion.color, turns, grid_mode));

        let raw = match special {
            Some(offset) => offset,
            None => {
                let key = self.keys.generate(motion, pictograph);
                self.get_default_adjustment(motion.motion_type, &key, motion.turns, grid_mode)
            }
        };
        rotate_offset(raw, rotation)
    }
}
