//! Pictograph and motion records exchanged with callers.
//!
//! Callers fill in the motion inputs; the engine only ever writes the
//! placement outputs (`arrow_location`, `arrow_placement`, `prop_placement`)
//! and the pictograph-level derived fields that were left empty.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::letter::{Letter, LetterType};
use crate::types::{
    Angle, GridLocation, GridMode, MotionType, Orientation, PropColor, PropType,
    RotationDirection, Turns,
};

// ============================================================================
// Placement outputs
// ============================================================================

/// Final transform of an arrow glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowPlacementData {
    /// Top-left corner of the SVG (`coordinates - svg_center`)
    pub position_x: f64,
    pub position_y: f64,
    pub rotation_angle: Angle,
    /// Flip the SVG horizontally before rotating
    pub svg_mirrored: bool,
    /// Center of the glyph on the grid, adjustment included
    pub coordinates: Option<DVec2>,
    pub svg_center: Option<DVec2>,
}

/// Final transform of a prop glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropPlacementData {
    pub position_x: f64,
    pub position_y: f64,
    pub rotation_angle: Angle,
    pub coordinates: Option<DVec2>,
    pub svg_center: Option<DVec2>,
}

// ============================================================================
// Motion
// ============================================================================

/// One colored prop's movement within a beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionData {
    pub motion_type: MotionType,
    pub start_location: Option<GridLocation>,
    pub end_location: Option<GridLocation>,
    pub rotation_direction: Option<RotationDirection>,
    #[serde(default)]
    pub turns: Turns,
    #[serde(default)]
    pub start_orientation: Orientation,
    #[serde(default)]
    pub end_orientation: Orientation,
    pub color: PropColor,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub prop_type: PropType,

    // Outputs written by the engine
    #[serde(default)]
    pub arrow_location: Option<GridLocation>,
    #[serde(default)]
    pub arrow_placement: ArrowPlacementData,
    #[serde(default)]
    pub prop_placement: PropPlacementData,
}

fn default_visible() -> bool {
    true
}

impl MotionData {
    pub fn new(
        color: PropColor,
        motion_type: MotionType,
        start: GridLocation,
        end: GridLocation,
        rotation_direction: RotationDirection,
        turns: Turns,
    ) -> Self {
        Self {
            motion_type,
            start_location: Some(start),
            end_location: Some(end),
            rotation_direction: Some(rotation_direction),
            turns,
            start_orientation: Orientation::In,
            end_orientation: Orientation::In,
            color,
            is_visible: true,
            prop_type: PropType::Staff,
            arrow_location: None,
            arrow_placement: ArrowPlacementData::default(),
            prop_placement: PropPlacementData::default(),
        }
    }

    /// A non-moving motion at `loc`.
    pub fn stationary(color: PropColor, loc: GridLocation) -> Self {
        Self::new(
            color,
            MotionType::Static,
            loc,
            loc,
            RotationDirection::NoRotation,
            Turns::ZERO,
        )
    }

    pub fn with_orientations(mut self, start: Orientation, end: Orientation) -> Self {
        self.start_orientation = start;
        self.end_orientation = end;
        self
    }

    pub fn with_prop_type(mut self, prop_type: PropType) -> Self {
        self.prop_type = prop_type;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    /// Where the prop sits once the motion is complete.
    pub fn prop_location(&self) -> Option<GridLocation> {
        self.end_location.or(self.start_location)
    }
}

/// The blue and red motions of one pictograph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motions {
    pub blue: MotionData,
    pub red: MotionData,
}

impl Motions {
    pub fn get(&self, color: PropColor) -> &MotionData {
        match color {
            PropColor::Blue => &self.blue,
            PropColor::Red => &self.red,
        }
    }

    pub fn get_mut(&mut self, color: PropColor) -> &mut MotionData {
        match color {
            PropColor::Blue => &mut self.blue,
            PropColor::Red => &mut self.red,
        }
    }
}

// ============================================================================
// Grid positions
// ============================================================================

/// The three families of two-prop positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    /// Props on opposite locations
    Alpha,
    /// Props on the same location
    Beta,
    /// Props 90° apart
    Gamma,
}

impl PositionGroup {
    pub fn key(self) -> &'static str {
        match self {
            PositionGroup::Alpha => "alpha",
            PositionGroup::Beta => "beta",
            PositionGroup::Gamma => "gamma",
        }
    }
}

/// A two-prop grid position code such as `alpha3` or `gamma11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridPosition {
    pub group: PositionGroup,
    pub number: u8,
}

use GridLocation::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

const fn pos(group: PositionGroup, number: u8) -> GridPosition {
    GridPosition { group, number }
}

/// (position, blue location, red location)
#[rustfmt::skip]
const POSITIONS: [(GridPosition, GridLocation, GridLocation); 32] = [
    (pos(PositionGroup::Alpha, 1), S, N),
    (pos(PositionGroup::Alpha, 2), SW, NE),
    (pos(PositionGroup::Alpha, 3), W, E),
    (pos(PositionGroup::Alpha, 4), NW, SE),
    (pos(PositionGroup::Alpha, 5), N, S),
    (pos(PositionGroup::Alpha, 6), NE, SW),
    (pos(PositionGroup::Alpha, 7), E, W),
    (pos(PositionGroup::Alpha, 8), SE, NW),
    (pos(PositionGroup::Beta, 1), N, N),
    (pos(PositionGroup::Beta, 2), NE, NE),
    (pos(PositionGroup::Beta, 3), E, E),
    (pos(PositionGroup::Beta, 4), SE, SE),
    (pos(PositionGroup::Beta, 5), S, S),
    (pos(PositionGroup::Beta, 6), SW, SW),
    (pos(PositionGroup::Beta, 7), W, W),
    (pos(PositionGroup::Beta, 8), NW, NW),
    (pos(PositionGroup::Gamma, 1), W, N),
    (pos(PositionGroup::Gamma, 2), NW, NE),
    (pos(PositionGroup::Gamma, 3), N, E),
    (pos(PositionGroup::Gamma, 4), NE, SE),
    (pos(PositionGroup::Gamma, 5), E, S),
    (pos(PositionGroup::Gamma, 6), SE, SW),
    (pos(PositionGroup::Gamma, 7), S, W),
    (pos(PositionGroup::Gamma, 8), SW, NW),
    (pos(PositionGroup::Gamma, 9), E, N),
    (pos(PositionGroup::Gamma, 10), SE, NE),
    (pos(PositionGroup::Gamma, 11), S, E),
    (pos(PositionGroup::Gamma, 12), SW, SE),
    (pos(PositionGroup::Gamma, 13), W, S),
    (pos(PositionGroup::Gamma, 14), NW, SW),
    (pos(PositionGroup::Gamma, 15), N, W),
    (pos(PositionGroup::Gamma, 16), NE, NW),
];

impl GridPosition {
    /// Position code for a (blue, red) location pair.
    ///
    /// Pairs that mix a cardinal and a diagonal location have no code.
    pub fn from_locations(blue: GridLocation, red: GridLocation) -> Option<GridPosition> {
        POSITIONS
            .iter()
            .find(|(_, b, r)| *b == blue && *r == red)
            .map(|(p, _, _)| *p)
    }

    /// The (blue, red) locations this position stands for.
    pub fn locations(self) -> Option<(GridLocation, GridLocation)> {
        POSITIONS
            .iter()
            .find(|(p, _, _)| *p == self)
            .map(|(_, b, r)| (*b, *r))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.group.key(), self.number)
    }
}

impl FromStr for GridPosition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::UnknownPosition {
            input: s.to_string(),
        };
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(err)?;
        let (name, digits) = s.split_at(split);
        let group = match name.to_ascii_lowercase().as_str() {
            "alpha" => PositionGroup::Alpha,
            "beta" => PositionGroup::Beta,
            "gamma" => PositionGroup::Gamma,
            _ => return Err(err()),
        };
        let number: u8 = digits.parse().map_err(|_| err())?;
        let candidate = GridPosition { group, number };
        candidate.locations().map(|_| candidate).ok_or_else(err)
    }
}

impl TryFrom<String> for GridPosition {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GridPosition> for String {
    fn from(p: GridPosition) -> String {
        p.to_string()
    }
}

// ============================================================================
// Pictograph
// ============================================================================

/// One beat: a letter plus the simultaneous blue and red motions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictographData {
    #[serde(default)]
    pub letter: Option<Letter>,
    #[serde(default)]
    pub letter_type: Option<LetterType>,
    #[serde(default)]
    pub grid_mode: Option<GridMode>,
    #[serde(default)]
    pub start_position: Option<GridPosition>,
    #[serde(default)]
    pub end_position: Option<GridPosition>,
    pub motions: Motions,
}

impl PictographData {
    pub fn new(letter: Option<Letter>, blue: MotionData, red: MotionData) -> Self {
        Self {
            letter,
            letter_type: letter.map(Letter::letter_type),
            grid_mode: None,
            start_position: None,
            end_position: None,
            motions: Motions { blue, red },
        }
    }

    pub fn with_grid_mode(mut self, mode: GridMode) -> Self {
        self.grid_mode = Some(mode);
        self
    }

    /// The motion of the other color.
    pub fn other_motion(&self, color: PropColor) -> &MotionData {
        self.motions.get(color.other())
    }

    /// Letter type, falling back to the one implied by the letter.
    pub fn resolved_letter_type(&self) -> Option<LetterType> {
        self.letter_type.or(self.letter.map(Letter::letter_type))
    }

    /// Start position derived from the motions' start locations.
    pub fn derived_start_position(&self) -> Option<GridPosition> {
        let blue = self.motions.blue.start_location?;
        let red = self.motions.red.start_location?;
        GridPosition::from_locations(blue, red)
    }

    /// End position derived from where each prop ends up.
    pub fn derived_end_position(&self) -> Option<GridPosition> {
        let blue = self.motions.blue.prop_location()?;
        let red = self.motions.red.prop_location()?;
        GridPosition::from_locations(blue, red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_same_mode_pair_has_a_position() {
        for blue in GridLocation::ALL {
            for red in GridLocation::ALL {
                let p = GridPosition::from_locations(blue, red);
                if blue.is_cardinal() == red.is_cardinal() {
                    let p = p.unwrap();
                    assert_eq!(p.locations(), Some((blue, red)), "{p} for ({blue}, {red})");
                } else {
                    assert_eq!(p, None);
                }
            }
        }
    }

    #[test]
    fn position_groups_follow_separation() {
        for blue in GridLocation::ALL {
            let group = |red| GridPosition::from_locations(blue, red).map(|p| p.group);
            assert_eq!(group(blue), Some(PositionGroup::Beta));
            assert_eq!(group(blue.opposite()), Some(PositionGroup::Alpha));
            assert_eq!(group(blue.rotated_cw()), Some(PositionGroup::Gamma));
            assert_eq!(group(blue.rotated_ccw()), Some(PositionGroup::Gamma));
        }
    }

    #[test]
    fn position_codes_parse() {
        let p: GridPosition = "gamma11".parse().unwrap();
        assert_eq!(p.group, PositionGroup::Gamma);
        assert_eq!(p.number, 11);
        assert_eq!(p.to_string(), "gamma11");
        assert_eq!(p.locations(), Some((GridLocation::South, GridLocation::East)));

        assert!("alpha9".parse::<GridPosition>().is_err());
        assert!("delta1".parse::<GridPosition>().is_err());
        assert!("beta".parse::<GridPosition>().is_err());
    }

    #[test]
    fn motion_record_deserializes_from_camel_case() {
        let json = r#"{
            "motionType": "pro",
            "startLocation": "n",
            "endLocation": "e",
            "rotationDirection": "cw",
            "turns": 1,
            "color": "blue"
        }"#;
        let motion: MotionData = serde_json::from_str(json).unwrap();
        assert_eq!(motion.motion_type, MotionType::Pro);
        assert_eq!(motion.end_location, Some(GridLocation::East));
        assert_eq!(motion.turns, Turns::whole(1));
        assert!(motion.is_visible);
        assert_eq!(motion.arrow_location, None);
    }

    #[test]
    fn end_position_uses_prop_locations() {
        let blue = MotionData::new(
            PropColor::Blue,
            MotionType::Pro,
            N,
            E,
            RotationDirection::Clockwise,
            Turns::ZERO,
        );
        let red = MotionData::stationary(PropColor::Red, E);
        let pictograph = PictographData::new(Some(Letter::Y), blue, red);
        assert_eq!(pictograph.derived_end_position().unwrap().to_string(), "beta3");
        assert_eq!(pictograph.derived_start_position().unwrap().to_string(), "gamma3");
        assert_eq!(pictograph.resolved_letter_type(), Some(LetterType::Type2));
    }
}
