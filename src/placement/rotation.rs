//! Arrow rotation angles and mirroring
//!
//! Angles are screen degrees (0° east, clockwise). Each motion family has
//! fixed 8-entry tables keyed by the arrow's calculated location; dashes
//! without rotation are keyed by their start and end instead.

use crate::pictograph::MotionData;
use crate::types::{Angle, GridLocation, MotionType, RotationDirection};

use GridLocation::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

type AngleTable = [(GridLocation, Angle); 8];

const fn a(deg: f64) -> Angle {
    Angle::table(deg)
}

/// Static arrows point at the grid center.
#[rustfmt::skip]
const STATIC: AngleTable = [
    (N, a(90.0)), (NE, a(135.0)), (E, a(180.0)), (SE, a(225.0)),
    (S, a(270.0)), (SW, a(315.0)), (W, a(0.0)), (NW, a(45.0)),
];

#[rustfmt::skip]
const PRO_CLOCKWISE: AngleTable = [
    (N, a(315.0)), (NE, a(0.0)), (E, a(45.0)), (SE, a(90.0)),
    (S, a(135.0)), (SW, a(180.0)), (W, a(225.0)), (NW, a(270.0)),
];

#[rustfmt::skip]
const PRO_COUNTER_CLOCKWISE: AngleTable = [
    (N, a(315.0)), (NE, a(270.0)), (E, a(225.0)), (SE, a(180.0)),
    (S, a(135.0)), (SW, a(90.0)), (W, a(45.0)), (NW, a(0.0)),
];

// Anti arrows bend against the travel direction, so each spin direction
// draws like the opposite pro direction.
#[rustfmt::skip]
const ANTI_CLOCKWISE: AngleTable = [
    (N, a(315.0)), (NE, a(270.0)), (E, a(225.0)), (SE, a(180.0)),
    (S, a(135.0)), (SW, a(90.0)), (W, a(45.0)), (NW, a(0.0)),
];

#[rustfmt::skip]
const ANTI_COUNTER_CLOCKWISE: AngleTable = [
    (N, a(315.0)), (NE, a(0.0)), (E, a(45.0)), (SE, a(90.0)),
    (S, a(135.0)), (SW, a(180.0)), (W, a(225.0)), (NW, a(270.0)),
];

#[rustfmt::skip]
const DASH_CLOCKWISE: AngleTable = [
    (N, a(270.0)), (NE, a(315.0)), (E, a(0.0)), (SE, a(45.0)),
    (S, a(90.0)), (SW, a(135.0)), (W, a(180.0)), (NW, a(225.0)),
];

#[rustfmt::skip]
const DASH_COUNTER_CLOCKWISE: AngleTable = [
    (N, a(270.0)), (NE, a(225.0)), (E, a(180.0)), (SE, a(135.0)),
    (S, a(90.0)), (SW, a(45.0)), (W, a(0.0)), (NW, a(315.0)),
];

/// Dashes without rotation point along their travel axis: (start, end) → angle.
#[rustfmt::skip]
const DASH_NO_ROTATION: [((GridLocation, GridLocation), Angle); 8] = [
    ((N, S), a(90.0)), ((S, N), a(270.0)), ((E, W), a(180.0)), ((W, E), a(0.0)),
    ((NE, SW), a(135.0)), ((SW, NE), a(315.0)), ((NW, SE), a(45.0)), ((SE, NW), a(225.0)),
];

fn lookup(table: &AngleTable, location: GridLocation) -> Option<Angle> {
    table.iter().find(|(loc, _)| *loc == location).map(|(_, angle)| *angle)
}

fn directional(
    clockwise: &'static AngleTable,
    counter_clockwise: &'static AngleTable,
    direction: Option<RotationDirection>,
) -> Option<&'static AngleTable> {
    match direction? {
        RotationDirection::Clockwise => Some(clockwise),
        RotationDirection::CounterClockwise => Some(counter_clockwise),
        RotationDirection::NoRotation => None,
    }
}

/// Calculates the rotation angle of an arrow glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowRotationCalculator;

impl ArrowRotationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Rotation for an arrow already placed at `location`. Lookup misses give 0°.
    pub fn calculate_rotation(&self, motion: &MotionData, location: GridLocation) -> Angle {
        let angle = match motion.motion_type {
            MotionType::Static => lookup(&STATIC, location),
            MotionType::Pro | MotionType::Float => {
                directional(&PRO_CLOCKWISE, &PRO_COUNTER_CLOCKWISE, motion.rotation_direction)
                    .and_then(|table| lookup(table, location))
            }
            MotionType::Anti => {
                directional(&ANTI_CLOCKWISE, &ANTI_COUNTER_CLOCKWISE, motion.rotation_direction)
                    .and_then(|table| lookup(table, location))
            }
            MotionType::Dash => self.dash_rotation(motion, location),
        };

        angle.unwrap_or_else(|| {
            crate::log::warn!(
                color = %motion.color,
                motion_type = %motion.motion_type,
                %location,
                direction = ?motion.rotation_direction,
                "no rotation entry, using 0°"
            );
            Angle::ZERO
        })
    }

    fn dash_rotation(&self, motion: &MotionData, location: GridLocation) -> Option<Angle> {
        match motion.rotation_direction {
            Some(RotationDirection::NoRotation) | None => {
                let key = (motion.start_location?, motion.end_location?);
                DASH_NO_ROTATION
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, angle)| *angle)
            }
            direction => directional(&DASH_CLOCKWISE, &DASH_COUNTER_CLOCKWISE, direction)
                .and_then(|table| lookup(table, location)),
        }
    }

    /// Whether the arrow SVG is flipped horizontally.
    ///
    /// Anti arrows flip when clockwise; every other type flips when
    /// counter-clockwise.
    pub fn is_mirrored(&self, motion: &MotionData) -> bool {
        match (motion.motion_type, motion.rotation_direction) {
            (MotionType::Anti, Some(RotationDirection::Clockwise)) => true,
            (MotionType::Anti, _) => false,
            (_, Some(RotationDirection::CounterClockwise)) => true,
            _ => false,
        }
    }
}

/// Advisory check callers may run before asking for a rotation.
///
/// Calculators never call this themselves; they fall back instead.
pub fn validate_motion_data(motion: &MotionData) -> bool {
    motion.rotation_direction.is_some()
}
