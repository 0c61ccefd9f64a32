//! Dash arrow location resolution
//!
//! A dash crosses the grid center, so its arrow cannot sit on the bisector of
//! start and end the way a shift arrow does. Which side it goes to depends on
//! the letter (Φ-, Ψ-, Λ, Λ-), the turns on both motions, and for Type 3
//! letters, where the co-occurring shift arrow landed.
//!
//! Every rule is a fixed table. The first matching rule wins, and a table
//! miss resolves to the motion's own start location.

use crate::letter::{Letter, LetterType};
use crate::pictograph::MotionData;
use crate::types::{GridLocation, GridMode, PropColor, RotationDirection};

use GridLocation::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

// ============================================================================
// Tables
// ============================================================================

/// (color, start, end) → location
struct ColorPairEntry {
    color: PropColor,
    start: GridLocation,
    end: GridLocation,
    location: GridLocation,
}

/// (start, end, other motion's end) → location
struct TripleEntry {
    start: GridLocation,
    end: GridLocation,
    other_end: GridLocation,
    location: GridLocation,
}

/// (key, key) → location
struct PairEntry {
    first: GridLocation,
    second: GridLocation,
    location: GridLocation,
}

const fn cp(color: PropColor, start: GridLocation, end: GridLocation, location: GridLocation) -> ColorPairEntry {
    ColorPairEntry { color, start, end, location }
}

const fn tr(start: GridLocation, end: GridLocation, other_end: GridLocation, location: GridLocation) -> TripleEntry {
    TripleEntry { start, end, other_end, location }
}

const fn pr(first: GridLocation, second: GridLocation, location: GridLocation) -> PairEntry {
    PairEntry { first, second, location }
}

const BLUE: PropColor = PropColor::Blue;
const RED: PropColor = PropColor::Red;

/// Φ- and Ψ- with no turns on either motion: the arrow sits 90° off the
/// travel axis, red on one side and blue on the other.
#[rustfmt::skip]
const PHI_PSI_DASH: [ColorPairEntry; 16] = [
    cp(RED, N, S, E),   cp(RED, E, W, N),   cp(RED, S, N, E),   cp(RED, W, E, N),
    cp(BLUE, N, S, W),  cp(BLUE, E, W, S),  cp(BLUE, S, N, W),  cp(BLUE, W, E, S),
    cp(RED, NW, SE, NE), cp(RED, NE, SW, SE), cp(RED, SW, NE, SE), cp(RED, SE, NW, NE),
    cp(BLUE, NW, SE, SW), cp(BLUE, NE, SW, NW), cp(BLUE, SW, NE, NW), cp(BLUE, SE, NW, SW),
];

/// Λ with no turns: the arrow goes opposite the other motion's end.
#[rustfmt::skip]
const LAMBDA_ZERO_TURNS: [TripleEntry; 16] = [
    tr(N, S, W, E),   tr(N, S, E, W),   tr(S, N, W, E),   tr(S, N, E, W),
    tr(E, W, N, S),   tr(E, W, S, N),   tr(W, E, N, S),   tr(W, E, S, N),
    tr(NE, SW, NW, SE), tr(NE, SW, SE, NW), tr(SW, NE, NW, SE), tr(SW, NE, SE, NW),
    tr(NW, SE, NE, SW), tr(NW, SE, SW, NE), tr(SE, NW, NE, SW), tr(SE, NW, SW, NE),
];

/// Λ- with no turns. Kept apart from Λ so the two can diverge.
#[rustfmt::skip]
const LAMBDA_DASH_ZERO_TURNS: [TripleEntry; 16] = [
    tr(N, S, W, E),   tr(N, S, E, W),   tr(S, N, W, E),   tr(S, N, E, W),
    tr(E, W, N, S),   tr(E, W, S, N),   tr(W, E, N, S),   tr(W, E, S, N),
    tr(NE, SW, NW, SE), tr(NE, SW, SE, NW), tr(SW, NE, NW, SE), tr(SW, NE, SE, NW),
    tr(NW, SE, NE, SW), tr(NW, SE, SW, NE), tr(SE, NW, NE, SW), tr(SE, NW, SW, NE),
];

/// Type 3 on a diamond grid, keyed by (dash start, shift arrow location):
/// the dash arrow takes the side of its axis away from the shift arrow.
#[rustfmt::skip]
const TYPE3_DIAMOND: [PairEntry; 16] = [
    pr(N, NW, E), pr(N, NE, W), pr(N, SE, W), pr(N, SW, E),
    pr(E, NW, S), pr(E, NE, S), pr(E, SE, N), pr(E, SW, N),
    pr(S, NW, E), pr(S, NE, W), pr(S, SE, W), pr(S, SW, E),
    pr(W, NW, S), pr(W, NE, S), pr(W, SE, N), pr(W, SW, N),
];

/// Type 3 on a box grid, keyed by (dash start, shift arrow location).
#[rustfmt::skip]
const TYPE3_BOX: [PairEntry; 16] = [
    pr(NE, N, SE), pr(NE, E, NW), pr(NE, S, NW), pr(NE, W, SE),
    pr(SE, N, SW), pr(SE, E, SW), pr(SE, S, NE), pr(SE, W, NE),
    pr(SW, N, SE), pr(SW, E, NW), pr(SW, S, NW), pr(SW, W, SE),
    pr(NW, N, SW), pr(NW, E, SW), pr(NW, S, NE), pr(NW, W, NE),
];

/// Zero turns, no letter-specific rule: keyed by (start, end).
#[rustfmt::skip]
const DEFAULT_ZERO_TURNS: [PairEntry; 8] = [
    pr(N, S, E),   pr(E, W, S),   pr(S, N, W),   pr(W, E, N),
    pr(NE, SW, SE), pr(NW, SE, NE), pr(SW, NE, NW), pr(SE, NW, SW),
];

/// Non-zero turns, clockwise: start → arrow location.
#[rustfmt::skip]
const CLOCKWISE_ADVANCE: [(GridLocation, GridLocation); 8] = [
    (N, E), (E, S), (S, W), (W, N),
    (NE, SE), (SE, SW), (SW, NW), (NW, NE),
];

/// Non-zero turns, counter-clockwise: start → arrow location.
#[rustfmt::skip]
const COUNTER_CLOCKWISE_ADVANCE: [(GridLocation, GridLocation); 8] = [
    (N, W), (W, S), (S, E), (E, N),
    (NE, NW), (NW, SW), (SW, SE), (SE, NE),
];

fn lookup_pair(table: &[PairEntry], first: GridLocation, second: GridLocation) -> Option<GridLocation> {
    table
        .iter()
        .find(|e| e.first == first && e.second == second)
        .map(|e| e.location)
}

fn lookup_triple(
    table: &[TripleEntry],
    start: GridLocation,
    end: GridLocation,
    other_end: GridLocation,
) -> Option<GridLocation> {
    table
        .iter()
        .find(|e| e.start == start && e.end == end && e.other_end == other_end)
        .map(|e| e.location)
}

fn lookup_advance(table: &[(GridLocation, GridLocation)], start: GridLocation) -> Option<GridLocation> {
    table.iter().find(|(from, _)| *from == start).map(|(_, to)| *to)
}

// ============================================================================
// Calculator
// ============================================================================

/// Everything the dash rules may consult.
#[derive(Debug, Clone, Copy)]
pub struct DashContext<'a> {
    pub motion: &'a MotionData,
    pub other_motion: Option<&'a MotionData>,
    pub letter_type: Option<LetterType>,
    pub grid_mode: Option<GridMode>,
    /// Arrow location of the co-occurring shift motion, if there is one
    pub shift_location: Option<GridLocation>,
    pub is_phi_dash: bool,
    pub is_psi_dash: bool,
    pub is_lambda: bool,
    pub is_lambda_dash: bool,
}

impl<'a> DashContext<'a> {
    pub fn new(motion: &'a MotionData) -> Self {
        Self {
            motion,
            other_motion: None,
            letter_type: None,
            grid_mode: None,
            shift_location: None,
            is_phi_dash: false,
            is_psi_dash: false,
            is_lambda: false,
            is_lambda_dash: false,
        }
    }

    /// Set the letter flags and letter type from a letter.
    pub fn for_letter(mut self, letter: Option<Letter>) -> Self {
        self.is_phi_dash = letter == Some(Letter::PhiDash);
        self.is_psi_dash = letter == Some(Letter::PsiDash);
        self.is_lambda = letter == Some(Letter::Lambda);
        self.is_lambda_dash = letter == Some(Letter::LambdaDash);
        if self.letter_type.is_none() {
            self.letter_type = letter.map(Letter::letter_type);
        }
        self
    }

    pub fn with_other(mut self, other: &'a MotionData) -> Self {
        self.other_motion = Some(other);
        self
    }

    pub fn with_letter_type(mut self, letter_type: LetterType) -> Self {
        self.letter_type = Some(letter_type);
        self
    }

    pub fn with_grid_mode(mut self, grid_mode: GridMode) -> Self {
        self.grid_mode = Some(grid_mode);
        self
    }

    pub fn with_shift_location(mut self, shift_location: Option<GridLocation>) -> Self {
        self.shift_location = shift_location;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DashLocationCalculator;

impl DashLocationCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_dash_location(&self, ctx: &DashContext<'_>) -> GridLocation {
        let motion = ctx.motion;
        let fallback = motion.start_location.unwrap_or(GridLocation::North);

        if ctx.is_phi_dash || ctx.is_psi_dash {
            if let Some(loc) = self.phi_psi_dash_location(ctx) {
                return loc;
            }
        }

        if motion.turns.is_zero() {
            if let Some(other) = ctx.other_motion {
                if ctx.is_lambda {
                    crate::log::debug!("dash: lambda zero-turns table");
                    return self
                        .triple_location(&LAMBDA_ZERO_TURNS, motion, other)
                        .unwrap_or(fallback);
                }
                if ctx.is_lambda_dash {
                    crate::log::debug!("dash: lambda-dash zero-turns table");
                    return self
                        .triple_location(&LAMBDA_DASH_ZERO_TURNS, motion, other)
                        .unwrap_or(fallback);
                }
            }
            return self.zero_turns_location(ctx).unwrap_or(fallback);
        }

        self.non_zero_turns_location(motion).unwrap_or(fallback)
    }

    /// Φ-/Ψ- rule. `None` means the rule does not apply and resolution continues.
    fn phi_psi_dash_location(&self, ctx: &DashContext<'_>) -> Option<GridLocation> {
        let motion = ctx.motion;
        if !motion.turns.is_zero() {
            return None;
        }
        let fallback = motion.start_location.unwrap_or(GridLocation::North);

        match ctx.other_motion {
            Some(other) if !other.turns.is_zero() => {
                crate::log::debug!("dash: phi/psi opposite of other motion");
                let other_loc = self
                    .non_zero_turns_location(other)
                    .or(other.start_location)
                    .unwrap_or(fallback);
                Some(other_loc.opposite())
            }
            // a missing other motion counts as turn-free
            _ => {
                crate::log::debug!("dash: phi/psi zero-turns table");
                let found = match (motion.start_location, motion.end_location) {
                    (Some(start), Some(end)) => PHI_PSI_DASH
                        .iter()
                        .find(|e| e.color == motion.color && e.start == start && e.end == end)
                        .map(|e| e.location),
                    _ => None,
                };
                Some(found.unwrap_or(fallback))
            }
        }
    }

    fn triple_location(
        &self,
        table: &[TripleEntry],
        motion: &MotionData,
        other: &MotionData,
    ) -> Option<GridLocation> {
        lookup_triple(
            table,
            motion.start_location?,
            motion.end_location?,
            other.end_location?,
        )
    }

    fn zero_turns_location(&self, ctx: &DashContext<'_>) -> Option<GridLocation> {
        let start = ctx.motion.start_location?;

        if ctx.letter_type == Some(LetterType::Type3) {
            if let (Some(mode), Some(shift)) = (ctx.grid_mode, ctx.shift_location) {
                crate::log::debug!(?mode, %shift, "dash: type 3 table");
                let table: &[PairEntry] = match mode {
                    GridMode::Diamond => &TYPE3_DIAMOND,
                    GridMode::Box => &TYPE3_BOX,
                };
                return lookup_pair(table, start, shift);
            }
        }

        lookup_pair(&DEFAULT_ZERO_TURNS, start, ctx.motion.end_location?)
    }

    fn non_zero_turns_location(&self, motion: &MotionData) -> Option<GridLocation> {
        let start = motion.start_location?;
        match motion.rotation_direction? {
            RotationDirection::Clockwise => lookup_advance(&CLOCKWISE_ADVANCE, start),
            RotationDirection::CounterClockwise => lookup_advance(&COUNTER_CLOCKWISE_ADVANCE, start),
            RotationDirection::NoRotation => None,
        }
    }
}
