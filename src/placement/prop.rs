//! Prop placement: default grid positions, prop rotation, beta separation
//! and the origin fallback pass.

use glam::{DVec2, dvec2};

use crate::pictograph::{MotionData, PictographData};
use crate::types::{Angle, GridLocation, GridMode, Orientation, PropColor};

use super::beta::BetaPropPositioner;
use super::defaults;
use super::grid::GridModel;

/// Where one prop ends up, before it is written back to its motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropPosition {
    pub color: PropColor,
    pub location: Option<GridLocation>,
    pub coordinates: DVec2,
    pub rotation_angle: Angle,
}

/// Both props of a pictograph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Props {
    pub blue: PropPosition,
    pub red: PropPosition,
}

impl Props {
    pub fn get(&self, color: PropColor) -> &PropPosition {
        match color {
            PropColor::Blue => &self.blue,
            PropColor::Red => &self.red,
        }
    }

    pub fn get_mut(&mut self, color: PropColor) -> &mut PropPosition {
        match color {
            PropColor::Blue => &mut self.blue,
            PropColor::Red => &mut self.red,
        }
    }

    /// Shift one prop by `delta`.
    pub fn nudge(&mut self, color: PropColor, delta: DVec2) {
        self.get_mut(color).coordinates += delta;
    }
}

/// Puts a prop on the grid point of the location its motion ends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropPositioner;

impl DefaultPropPositioner {
    pub fn new() -> Self {
        Self
    }

    /// Grid point for the prop of `motion`. A motion with no location yields
    /// the origin, which the fallback pass later corrects.
    pub fn position(&self, motion: &MotionData, mode: GridMode) -> DVec2 {
        match motion.prop_location() {
            Some(location) => GridModel::point(mode, location),
            None => DVec2::ZERO,
        }
    }
}

/// Rotation of a prop glyph from its end orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropRotationCalculator;

impl PropRotationCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_rotation(&self, orientation: Orientation, location: GridLocation) -> Angle {
        let outward = location.outward_angle();
        match orientation {
            Orientation::In => outward.offset(180.0),
            Orientation::Out => outward,
            Orientation::Clock => outward.offset(90.0),
            Orientation::Counter => outward.offset(-90.0),
        }
    }
}

/// Fixed positions for props whose calculated position collapsed to the origin.
#[rustfmt::skip]
const PROP_FALLBACKS: [(GridLocation, DVec2); 8] = [
    (GridLocation::North, dvec2(475.0, 330.0)),
    (GridLocation::NorthEast, dvec2(580.0, 370.0)),
    (GridLocation::East, dvec2(620.0, 475.0)),
    (GridLocation::SouthEast, dvec2(580.0, 580.0)),
    (GridLocation::South, dvec2(475.0, 620.0)),
    (GridLocation::SouthWest, dvec2(370.0, 580.0)),
    (GridLocation::West, dvec2(330.0, 475.0)),
    (GridLocation::NorthWest, dvec2(370.0, 370.0)),
];

/// Fallback position for a prop at `location`, or the grid center.
pub fn fallback_position(location: Option<GridLocation>) -> DVec2 {
    location
        .and_then(|loc| {
            PROP_FALLBACKS
                .iter()
                .find(|(l, _)| *l == loc)
                .map(|(_, p)| *p)
        })
        .unwrap_or(defaults::GRID_CENTER)
}

/// Move any prop sitting at (or within [`defaults::ORIGIN_EPSILON`] of) the
/// origin to its fallback position.
pub fn apply_fallbacks(mut props: Props) -> Props {
    for color in [PropColor::Blue, PropColor::Red] {
        let prop = props.get_mut(color);
        if prop.coordinates.length() < defaults::ORIGIN_EPSILON {
            let fallback = fallback_position(prop.location);
            crate::log::warn!(
                %color,
                location = ?prop.location,
                x = fallback.x,
                y = fallback.y,
                "prop collapsed to the origin, using fallback position"
            );
            prop.coordinates = fallback;
        }
    }
    props
}

/// Runs default placement, beta separation and the fallback pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropPlacementCalculator {
    positioner: DefaultPropPositioner,
    rotation: PropRotationCalculator,
    beta: BetaPropPositioner,
}

impl PropPlacementCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default positions and rotations for both props, before separation.
    pub fn initial_props(&self, pictograph: &PictographData, mode: GridMode) -> Props {
        let place = |motion: &MotionData| {
            let location = motion.prop_location();
            PropPosition {
                color: motion.color,
                location,
                coordinates: self.positioner.position(motion, mode),
                rotation_angle: location
                    .map(|loc| self.rotation.calculate_rotation(motion.end_orientation, loc))
                    .unwrap_or(Angle::ZERO),
            }
        };
        Props {
            blue: place(&pictograph.motions.blue),
            red: place(&pictograph.motions.red),
        }
    }

    pub fn update_prop_placement(&self, pictograph: &PictographData, mode: GridMode) -> Props {
        let props = self.initial_props(pictograph, mode);
        let props = self.beta.reposition(pictograph, props);
        apply_fallbacks(props)
    }
}
