//! Strongly-typed primitives for the placement engine.
//!
//! Design goals:
//! - No raw `f64` angles or turn counts in calculator signatures
//! - Closed enums for every symbolic value (locations, modes, motion types)
//! - Parsing and serde names match the notation's JSON records

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

// ============================================================================
// Angle
// ============================================================================

/// Angle in screen degrees: 0° points east, angles grow clockwise (y is down).
///
/// Always normalized into `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an angle, wrapping it into `[0, 360)`.
    pub fn degrees(val: f64) -> Angle {
        let wrapped = val.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if wrapped >= 360.0 {
            Angle(0.0)
        } else {
            Angle(wrapped)
        }
    }

    /// Const constructor for table entries (caller guarantees `[0, 360)`).
    #[inline]
    pub(crate) const fn table(val: f64) -> Angle {
        Angle(val)
    }

    /// Get the raw value in degrees
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Add an offset in degrees, wrapping the result.
    pub fn offset(self, delta: f64) -> Angle {
        Angle::degrees(self.0 + delta)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

// ============================================================================
// Turns
// ============================================================================

/// Number of turns a prop makes during a motion. Non-negative, may be fractional.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Turns(f64);

impl Turns {
    pub const ZERO: Turns = Turns(0.0);

    /// Create a turn count with validation (rejects NaN, infinite, negative)
    pub fn try_new(val: f64) -> Result<Turns, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Turns(val))
        }
    }

    /// A whole number of turns (const-friendly).
    pub const fn whole(n: u32) -> Turns {
        Turns(n as f64)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Key used by the placement dataset: `"0"`, `"1"`, `"0.5"`, `"2.5"`.
    pub fn key(self) -> String {
        if self.0.fract() == 0.0 {
            format!("{:.0}", self.0)
        } else {
            format!("{}", self.0)
        }
    }
}

impl TryFrom<f64> for Turns {
    type Error = NumericError;

    fn try_from(val: f64) -> Result<Self, Self::Error> {
        Turns::try_new(val)
    }
}

impl From<Turns> for f64 {
    fn from(t: Turns) -> f64 {
        t.0
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

// ============================================================================
// Grid locations
// ============================================================================

/// One of the eight compass locations on the pictograph grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GridLocation {
    #[serde(rename = "n", alias = "north")]
    North,
    #[serde(rename = "ne", alias = "northeast")]
    NorthEast,
    #[serde(rename = "e", alias = "east")]
    East,
    #[serde(rename = "se", alias = "southeast")]
    SouthEast,
    #[serde(rename = "s", alias = "south")]
    South,
    #[serde(rename = "sw", alias = "southwest")]
    SouthWest,
    #[serde(rename = "w", alias = "west")]
    West,
    #[serde(rename = "nw", alias = "northwest")]
    NorthWest,
}

impl GridLocation {
    /// All locations in clockwise order starting at north.
    pub const ALL: [GridLocation; 8] = [
        GridLocation::North,
        GridLocation::NorthEast,
        GridLocation::East,
        GridLocation::SouthEast,
        GridLocation::South,
        GridLocation::SouthWest,
        GridLocation::West,
        GridLocation::NorthWest,
    ];

    pub const CARDINALS: [GridLocation; 4] = [
        GridLocation::North,
        GridLocation::East,
        GridLocation::South,
        GridLocation::West,
    ];

    pub const DIAGONALS: [GridLocation; 4] = [
        GridLocation::NorthEast,
        GridLocation::SouthEast,
        GridLocation::SouthWest,
        GridLocation::NorthWest,
    ];

    /// Position in clockwise order (north = 0).
    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(i: usize) -> GridLocation {
        Self::ALL[i % 8]
    }

    pub fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn is_diagonal(self) -> bool {
        !self.is_cardinal()
    }

    /// The location 180° away.
    pub fn opposite(self) -> GridLocation {
        Self::from_index(self.index() + 4)
    }

    /// The location 90° clockwise.
    pub fn rotated_cw(self) -> GridLocation {
        Self::from_index(self.index() + 2)
    }

    /// The location 90° counter-clockwise.
    pub fn rotated_ccw(self) -> GridLocation {
        Self::from_index(self.index() + 6)
    }

    /// Screen angle of the ray from the grid center through this location.
    pub fn outward_angle(self) -> Angle {
        // north is straight up, which is 270° in y-down screen space
        Angle::degrees(270.0 + 45.0 * self.index() as f64)
    }

    /// Unit vector from the grid center toward this location (y-down).
    pub fn unit_vec(self) -> DVec2 {
        let r = self.outward_angle().radians();
        dvec2(r.cos(), r.sin())
    }

    /// Short lowercase code, as used in the notation's records.
    pub fn code(self) -> &'static str {
        match self {
            GridLocation::North => "n",
            GridLocation::NorthEast => "ne",
            GridLocation::East => "e",
            GridLocation::SouthEast => "se",
            GridLocation::South => "s",
            GridLocation::SouthWest => "sw",
            GridLocation::West => "w",
            GridLocation::NorthWest => "nw",
        }
    }
}

impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GridLocation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let loc = match normalized.as_str() {
            "n" | "north" => GridLocation::North,
            "ne" | "northeast" => GridLocation::NorthEast,
            "e" | "east" => GridLocation::East,
            "se" | "southeast" => GridLocation::SouthEast,
            "s" | "south" => GridLocation::South,
            "sw" | "southwest" => GridLocation::SouthWest,
            "w" | "west" => GridLocation::West,
            "nw" | "northwest" => GridLocation::NorthWest,
            _ => {
                return Err(ParseError::UnknownLocation {
                    input: s.to_string(),
                });
            }
        };
        Ok(loc)
    }
}

/// The two mutually exclusive grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Hand points on the cardinal locations
    #[default]
    Diamond,
    /// Hand points on the diagonal locations
    Box,
}

impl GridMode {
    /// The grid mode whose hand points include `loc`.
    pub fn of_location(loc: GridLocation) -> GridMode {
        if loc.is_cardinal() {
            GridMode::Diamond
        } else {
            GridMode::Box
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            GridMode::Diamond => "diamond",
            GridMode::Box => "box",
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Motion attributes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    Static,
    Pro,
    Anti,
    Dash,
    Float,
}

impl MotionType {
    pub const ALL: [MotionType; 5] = [
        MotionType::Static,
        MotionType::Pro,
        MotionType::Anti,
        MotionType::Dash,
        MotionType::Float,
    ];

    /// Pro, anti and float motions move the prop to an adjacent location.
    pub fn is_shift(self) -> bool {
        matches!(self, MotionType::Pro | MotionType::Anti | MotionType::Float)
    }

    pub fn key(self) -> &'static str {
        match self {
            MotionType::Static => "static",
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Dash => "dash",
            MotionType::Float => "float",
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw", alias = "clockwise")]
    Clockwise,
    #[serde(rename = "ccw", alias = "counter_clockwise")]
    CounterClockwise,
    #[serde(rename = "no_rot", alias = "noRotation")]
    NoRotation,
}

/// Prop orientation at the start or end of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    In,
    Out,
    Clock,
    Counter,
}

impl Orientation {
    /// In/out orientations lie along the ray through the grid center.
    pub fn is_radial(self) -> bool {
        matches!(self, Orientation::In | Orientation::Out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropColor {
    Blue,
    Red,
}

impl PropColor {
    pub fn other(self) -> PropColor {
        match self {
            PropColor::Blue => PropColor::Red,
            PropColor::Red => PropColor::Blue,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PropColor::Blue => "blue",
            PropColor::Red => "red",
        }
    }
}

impl fmt::Display for PropColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    #[default]
    Staff,
    Fan,
    Club,
    Buugeng,
    Hand,
    Triad,
    Minihoop,
    Sword,
    Guitar,
    Ukulele,
    Chicken,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Angle tests ====================

    #[test]
    fn angle_wraps_into_range() {
        assert_eq!(Angle::degrees(360.0).raw(), 0.0);
        assert_eq!(Angle::degrees(-90.0).raw(), 270.0);
        assert_eq!(Angle::degrees(765.0).raw(), 45.0);
        assert_eq!(Angle::degrees(-1e-18).raw(), 0.0);
    }

    #[test]
    fn angle_offset_wraps() {
        assert_eq!(Angle::degrees(315.0).offset(90.0).raw(), 45.0);
        assert_eq!(Angle::degrees(0.0).offset(-90.0).raw(), 270.0);
    }

    // ==================== Turns tests ====================

    #[test]
    fn turns_try_new_rejects_invalid() {
        assert_eq!(Turns::try_new(-1.0), Err(NumericError::Negative));
        assert_eq!(Turns::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Turns::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert!(Turns::try_new(0.0).is_ok());
    }

    #[test]
    fn turns_key_formats_integral_and_fractional() {
        assert_eq!(Turns(0.0).key(), "0");
        assert_eq!(Turns(2.0).key(), "2");
        assert_eq!(Turns(0.5).key(), "0.5");
        assert_eq!(Turns(2.5).key(), "2.5");
    }

    #[test]
    fn turns_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Turns>("-1").is_err());
        assert_eq!(serde_json::from_str::<Turns>("1.5").unwrap(), Turns(1.5));
    }

    // ==================== GridLocation tests ====================

    #[test]
    fn location_opposite_is_involution() {
        for loc in GridLocation::ALL {
            assert_ne!(loc.opposite(), loc);
            assert_eq!(loc.opposite().opposite(), loc);
        }
    }

    #[test]
    fn location_rotation_round_trip() {
        for loc in GridLocation::ALL {
            assert_eq!(loc.rotated_cw().rotated_ccw(), loc);
            assert_eq!(loc.rotated_cw().rotated_cw(), loc.opposite());
        }
        assert_eq!(GridLocation::North.rotated_cw(), GridLocation::East);
        assert_eq!(GridLocation::NorthWest.rotated_cw(), GridLocation::NorthEast);
    }

    #[test]
    fn cardinal_and_diagonal_partition() {
        let cardinals = GridLocation::ALL.iter().filter(|l| l.is_cardinal()).count();
        assert_eq!(cardinals, 4);
        for loc in GridLocation::DIAGONALS {
            assert!(loc.is_diagonal());
        }
    }

    #[test]
    fn outward_angles_follow_screen_convention() {
        assert_eq!(GridLocation::East.outward_angle().raw(), 0.0);
        assert_eq!(GridLocation::South.outward_angle().raw(), 90.0);
        assert_eq!(GridLocation::North.outward_angle().raw(), 270.0);
        assert_eq!(GridLocation::NorthEast.outward_angle().raw(), 315.0);

        let up = GridLocation::North.unit_vec();
        assert!(up.x.abs() < 1e-10);
        assert!((up.y + 1.0).abs() < 1e-10);
    }

    #[test]
    fn location_parses_short_and_long_forms() {
        assert_eq!("n".parse::<GridLocation>().unwrap(), GridLocation::North);
        assert_eq!("NorthEast".parse::<GridLocation>().unwrap(), GridLocation::NorthEast);
        assert_eq!("south_west".parse::<GridLocation>().unwrap(), GridLocation::SouthWest);
        assert!("up".parse::<GridLocation>().is_err());
    }

    #[test]
    fn location_serde_uses_short_codes() {
        let json = serde_json::to_string(&GridLocation::SouthEast).unwrap();
        assert_eq!(json, "\"se\"");
        let back: GridLocation = serde_json::from_str("\"northwest\"").unwrap();
        assert_eq!(back, GridLocation::NorthWest);
    }

    #[test]
    fn grid_mode_of_location() {
        assert_eq!(GridMode::of_location(GridLocation::West), GridMode::Diamond);
        assert_eq!(GridMode::of_location(GridLocation::SouthWest), GridMode::Box);
    }

    #[test]
    fn shift_motion_types() {
        assert!(MotionType::Pro.is_shift());
        assert!(MotionType::Anti.is_shift());
        assert!(MotionType::Float.is_shift());
        assert!(!MotionType::Static.is_shift());
        assert!(!MotionType::Dash.is_shift());
    }
}
