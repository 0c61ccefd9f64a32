//! Arrow location: the grid location an arrow glyph is centered on
//!
//! Each motion type has its own strategy:
//! - static arrows sit on their start location
//! - shift arrows (pro, anti, float) sit on the bisector of start and end
//! - dash arrows defer to the [`DashLocationCalculator`]

use enum_dispatch::enum_dispatch;

use crate::pictograph::{MotionData, PictographData};
use crate::types::{GridLocation, GridMode, MotionType};

use super::dash::{DashContext, DashLocationCalculator};
use super::grid::derive_grid_mode;

/// Pictograph-level inputs a location strategy may need.
#[derive(Debug, Clone, Copy)]
pub struct LocationContext<'a> {
    pub pictograph: &'a PictographData,
    pub grid_mode: GridMode,
}

impl<'a> LocationContext<'a> {
    pub fn new(pictograph: &'a PictographData) -> Self {
        let grid_mode = pictograph.grid_mode.unwrap_or_else(|| {
            derive_grid_mode(&pictograph.motions.blue, &pictograph.motions.red)
        });
        Self {
            pictograph,
            grid_mode,
        }
    }
}

/// Resolves the arrow location for one motion type.
#[enum_dispatch]
pub trait LocationStrategy {
    fn locate(&self, motion: &MotionData, ctx: &LocationContext<'_>) -> GridLocation;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocation;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftLocation;

#[derive(Debug, Clone, Copy, Default)]
pub struct DashLocation {
    calculator: DashLocationCalculator,
}

#[enum_dispatch(LocationStrategy)]
#[derive(Debug, Clone, Copy)]
pub enum LocationStrategyKind {
    StaticLocation,
    ShiftLocation,
    DashLocation,
}

impl LocationStrategyKind {
    pub fn for_motion_type(motion_type: MotionType) -> Self {
        match motion_type {
            MotionType::Static => StaticLocation.into(),
            MotionType::Pro | MotionType::Anti | MotionType::Float => ShiftLocation.into(),
            MotionType::Dash => DashLocation::default().into(),
        }
    }
}

impl LocationStrategy for StaticLocation {
    fn locate(&self, motion: &MotionData, _ctx: &LocationContext<'_>) -> GridLocation {
        motion.start_location.unwrap_or(GridLocation::North)
    }
}

use GridLocation::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

/// Adjacent location pairs and the location bisecting them. Keys are unordered.
#[rustfmt::skip]
const SHIFT_PAIRS: [((GridLocation, GridLocation), GridLocation); 8] = [
    ((N, E), NE), ((E, S), SE), ((S, W), SW), ((W, N), NW),
    ((NE, SE), E), ((SE, SW), S), ((SW, NW), W), ((NW, NE), N),
];

/// Order-independent key for a location pair.
fn pair_key(a: GridLocation, b: GridLocation) -> (GridLocation, GridLocation) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Bisector of an adjacent pair, in either order.
pub fn shift_location(start: GridLocation, end: GridLocation) -> Option<GridLocation> {
    let key = pair_key(start, end);
    SHIFT_PAIRS
        .iter()
        .find(|((a, b), _)| pair_key(*a, *b) == key)
        .map(|(_, loc)| *loc)
}

impl LocationStrategy for ShiftLocation {
    fn locate(&self, motion: &MotionData, _ctx: &LocationContext<'_>) -> GridLocation {
        let start = motion.start_location.unwrap_or(GridLocation::North);
        match motion.end_location {
            Some(end) => shift_location(start, end).unwrap_or(start),
            None => start,
        }
    }
}

impl LocationStrategy for DashLocation {
    fn locate(&self, motion: &MotionData, ctx: &LocationContext<'_>) -> GridLocation {
        let pictograph = ctx.pictograph;
        let other = pictograph.other_motion(motion.color);

        // Derived from the other motion's inputs, never from its placement output.
        let shift = other
            .motion_type
            .is_shift()
            .then(|| ShiftLocation.locate(other, ctx));

        let mut dash_ctx = DashContext::new(motion)
            .with_other(other)
            .with_grid_mode(ctx.grid_mode)
            .with_shift_location(shift);
        if let Some(letter_type) = pictograph.resolved_letter_type() {
            dash_ctx = dash_ctx.with_letter_type(letter_type);
        }
        let dash_ctx = dash_ctx.for_letter(pictograph.letter);

        self.calculator.calculate_dash_location(&dash_ctx)
    }
}

/// Calculates the grid location an arrow is centered on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowLocationCalculator;

impl ArrowLocationCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_location(&self, motion: &MotionData, pictograph: &PictographData) -> GridLocation {
        if motion.start_location.is_none() || motion.end_location.is_none() {
            crate::log::warn!(
                color = %motion.color,
                motion_type = %motion.motion_type,
                start = ?motion.start_location,
                end = ?motion.end_location,
                "motion is missing location data, falling back to its start"
            );
            return motion.start_location.unwrap_or(GridLocation::North);
        }

        let ctx = LocationContext::new(pictograph);
        let strategy = LocationStrategyKind::for_motion_type(motion.motion_type);
        crate::log::debug!(color = %motion.color, ?strategy, "arrow location strategy");
        strategy.locate(motion, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::Letter;
    use crate::types::{PropColor, RotationDirection, Turns};

    fn motion(
        color: PropColor,
        motion_type: MotionType,
        start: GridLocation,
        end: GridLocation,
    ) -> MotionData {
        MotionData::new(
            color,
            motion_type,
            start,
            end,
            RotationDirection::Clockwise,
            Turns::ZERO,
        )
    }

    fn locate(letter: Option<Letter>, blue: MotionData, red: MotionData) -> (GridLocation, GridLocation) {
        let pictograph = PictographData::new(letter, blue, red);
        let calc = ArrowLocationCalculator::new();
        (
            calc.calculate_location(&pictograph.motions.blue, &pictograph),
            calc.calculate_location(&pictograph.motions.red, &pictograph),
        )
    }

    #[test]
    fn static_uses_start_location() {
        let blue = MotionData::stationary(PropColor::Blue, SW);
        let red = MotionData::stationary(PropColor::Red, NE);
        assert_eq!(locate(Some(Letter::Alpha), blue, red), (SW, NE));
    }

    #[test]
    fn pro_north_to_east_is_northeast() {
        let blue = motion(PropColor::Blue, MotionType::Pro, N, E);
        let red = motion(PropColor::Red, MotionType::Pro, S, W);
        assert_eq!(locate(Some(Letter::A), blue, red), (NE, SW));
    }

    #[test]
    fn shift_pairs_are_symmetric() {
        for a in GridLocation::ALL {
            for b in GridLocation::ALL {
                assert_eq!(shift_location(a, b), shift_location(b, a), "{a}/{b}");
            }
        }
    }

    #[test]
    fn every_adjacent_pair_has_a_bisector() {
        for a in GridLocation::ALL {
            let b = a.rotated_cw();
            let mid = shift_location(a, b).unwrap();
            let expected = (a.unit_vec() + b.unit_vec()).normalize();
            assert!(mid.unit_vec().abs_diff_eq(expected, 1e-9), "{a}/{b} -> {mid}");
        }
    }

    #[test]
    fn box_shift_bisects_to_cardinal() {
        let blue = motion(PropColor::Blue, MotionType::Anti, NW, NE);
        let red = motion(PropColor::Red, MotionType::Float, SE, SW);
        assert_eq!(locate(None, blue, red), (N, S));
    }

    #[test]
    fn non_adjacent_shift_falls_back_to_start() {
        let blue = motion(PropColor::Blue, MotionType::Pro, N, S);
        let red = motion(PropColor::Red, MotionType::Pro, E, E);
        assert_eq!(locate(None, blue, red), (N, E));
    }

    #[test]
    fn missing_end_falls_back_to_start() {
        let mut blue = motion(PropColor::Blue, MotionType::Pro, W, N);
        blue.end_location = None;
        let mut red = motion(PropColor::Red, MotionType::Pro, E, S);
        red.start_location = None;
        assert_eq!(locate(None, blue, red), (W, N));
    }

    #[test]
    fn dash_reads_the_shift_arrow_for_type3() {
        // W-: blue shifts N -> E (arrow at NE), red dashes N -> S
        let blue = motion(PropColor::Blue, MotionType::Pro, N, E);
        let mut red = motion(PropColor::Red, MotionType::Dash, N, S);
        red.rotation_direction = Some(RotationDirection::NoRotation);
        assert_eq!(locate(Some(Letter::WDash), blue, red), (NE, W));
    }

    #[test]
    fn dash_ignores_stale_shift_arrow_location() {
        let blue = motion(PropColor::Blue, MotionType::Pro, N, E);
        let mut red = motion(PropColor::Red, MotionType::Dash, N, S);
        red.rotation_direction = Some(RotationDirection::NoRotation);
        let fresh = PictographData::new(Some(Letter::WDash), blue.clone(), red.clone());

        let mut stale = fresh.clone();
        stale.motions.blue.arrow_location = Some(SW);

        let calc = ArrowLocationCalculator::new();
        assert_eq!(calc.calculate_location(&fresh.motions.red, &fresh), W);
        assert_eq!(calc.calculate_location(&stale.motions.red, &stale), W);
    }

    #[test]
    fn dash_without_letter_uses_default_table() {
        let blue = MotionData::stationary(PropColor::Blue, E);
        let mut red = motion(PropColor::Red, MotionType::Dash, W, E);
        red.rotation_direction = Some(RotationDirection::NoRotation);
        assert_eq!(locate(None, blue, red), (E, N));
    }

    #[test]
    fn locations_stay_in_domain() {
        for mt in MotionType::ALL {
            for start in GridLocation::ALL {
                for end in GridLocation::ALL {
                    let blue = motion(PropColor::Blue, mt, start, end);
                    let red = motion(PropColor::Red, mt, end, start);
                    let (b, r) = locate(Some(Letter::PhiDash), blue, red);
                    assert!(GridLocation::ALL.contains(&b));
                    assert!(GridLocation::ALL.contains(&r));
                }
            }
        }
    }
}
