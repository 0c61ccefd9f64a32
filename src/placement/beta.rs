//! Beta prop separation
//!
//! When both props end on the same location they would be drawn on top of
//! each other. The letter decides which way each prop is pushed; the push is
//! a fixed [`BETA_OFFSET`](super::defaults::BETA_OFFSET) on each axis, so
//! diagonal pushes are longer than cardinal ones.

use glam::{DVec2, dvec2};

use crate::letter::Letter;
use crate::pictograph::{MotionData, PictographData, PositionGroup};
use crate::types::{MotionType, PropColor, RotationDirection};

use super::defaults::BETA_OFFSET;
use super::prop::Props;

/// Screen direction of a beta push (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpRight,
        Direction::UpLeft,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    /// Per-axis step for this direction.
    pub fn offset(self) -> DVec2 {
        let d = BETA_OFFSET;
        match self {
            Direction::Up => dvec2(0.0, -d),
            Direction::Down => dvec2(0.0, d),
            Direction::Left => dvec2(-d, 0.0),
            Direction::Right => dvec2(d, 0.0),
            Direction::UpRight => dvec2(d, -d),
            Direction::UpLeft => dvec2(-d, -d),
            Direction::DownRight => dvec2(d, d),
            Direction::DownLeft => dvec2(-d, d),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpRight => Direction::DownLeft,
            Direction::UpLeft => Direction::DownRight,
            Direction::DownRight => Direction::UpLeft,
            Direction::DownLeft => Direction::UpRight,
        }
    }

    /// Nearest direction by component signs; `None` for a zero vector.
    pub fn from_vector(v: DVec2) -> Option<Direction> {
        const EPS: f64 = 1e-9;
        let sign = |c: f64| {
            if c > EPS {
                1
            } else if c < -EPS {
                -1
            } else {
                0
            }
        };
        match (sign(v.x), sign(v.y)) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (1, -1) => Some(Direction::UpRight),
            (-1, -1) => Some(Direction::UpLeft),
            (1, 1) => Some(Direction::DownRight),
            (-1, 1) => Some(Direction::DownLeft),
            _ => None,
        }
    }
}

/// Whether the pictograph ends with both props on one location.
pub fn ends_with_beta(pictograph: &PictographData) -> bool {
    let end = pictograph
        .end_position
        .or_else(|| pictograph.derived_end_position());
    if end.is_some_and(|p| p.group == PositionGroup::Beta) {
        return true;
    }

    let blue = &pictograph.motions.blue;
    let red = &pictograph.motions.red;
    blue.is_visible
        && red.is_visible
        && blue.prop_location().is_some()
        && blue.prop_location() == red.prop_location()
}

/// Direction a motion pushes its prop.
///
/// Shift motions push along the tangent at their end location, in the sense
/// they travelled; other motions push along the clockwise tangent of where
/// their prop sits.
pub fn motion_direction(motion: &MotionData) -> Option<Direction> {
    if motion.motion_type.is_shift() {
        if let Some(dir) = shift_direction(motion) {
            return Some(dir);
        }
    }
    location_direction(motion)
}

fn shift_direction(motion: &MotionData) -> Option<Direction> {
    let start = motion.start_location?;
    let end = motion.end_location?;
    let ahead = if end == start.rotated_cw() {
        end.rotated_cw()
    } else if end == start.rotated_ccw() {
        end.rotated_ccw()
    } else if motion.rotation_direction == Some(RotationDirection::CounterClockwise) {
        end.rotated_ccw()
    } else {
        end.rotated_cw()
    };
    Direction::from_vector(ahead.unit_vec())
}

/// Clockwise tangent at the prop's own location.
fn location_direction(motion: &MotionData) -> Option<Direction> {
    let location = motion.prop_location()?;
    Direction::from_vector(location.rotated_cw().unit_vec())
}

/// Which separation rule a pictograph uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaRule {
    /// Red follows its motion, blue goes the opposite way
    GH,
    /// The pro prop leads, the anti prop goes the opposite way
    I,
    /// Every prop follows its own motion
    JKL,
    /// The shift prop leads, the other goes the opposite way
    YZ,
    /// Red follows its location, blue goes the opposite way
    NonShift,
}

impl BetaRule {
    pub fn for_pictograph(pictograph: &PictographData) -> BetaRule {
        match pictograph.letter {
            Some(Letter::G | Letter::H) => BetaRule::GH,
            Some(Letter::I) => BetaRule::I,
            Some(Letter::J | Letter::K | Letter::L) => BetaRule::JKL,
            Some(Letter::Y | Letter::Z | Letter::YDash | Letter::ZDash) => BetaRule::YZ,
            Some(Letter::Psi | Letter::PsiDash | Letter::Beta) => BetaRule::NonShift,
            _ => {
                let shifts = [&pictograph.motions.blue, &pictograph.motions.red]
                    .iter()
                    .filter(|m| m.motion_type.is_shift())
                    .count();
                if shifts == 1 {
                    BetaRule::YZ
                } else {
                    BetaRule::NonShift
                }
            }
        }
    }
}

/// Push `lead` along `dir` and the other prop the opposite way.
fn push_apart(mut props: Props, lead: PropColor, dir: Direction) -> Props {
    props.nudge(lead, dir.offset());
    props.nudge(lead.other(), dir.opposite().offset());
    props
}

pub fn reposition_g_h(pictograph: &PictographData, props: Props) -> Props {
    match motion_direction(&pictograph.motions.red) {
        Some(dir) => push_apart(props, PropColor::Red, dir),
        None => props,
    }
}

pub fn reposition_i(pictograph: &PictographData, props: Props) -> Props {
    let motions = &pictograph.motions;
    let pro = [&motions.blue, &motions.red]
        .into_iter()
        .find(|m| m.motion_type == MotionType::Pro);
    let has_anti = [&motions.blue, &motions.red]
        .into_iter()
        .any(|m| m.motion_type == MotionType::Anti);

    match pro {
        Some(pro) if has_anti => match motion_direction(pro) {
            Some(dir) => push_apart(props, pro.color, dir),
            None => props,
        },
        _ => reposition_non_shift(pictograph, props),
    }
}

pub fn reposition_j_k_l(pictograph: &PictographData, mut props: Props) -> Props {
    for motion in [&pictograph.motions.blue, &pictograph.motions.red] {
        if let Some(dir) = motion_direction(motion) {
            props.nudge(motion.color, dir.offset());
        }
    }
    props
}

pub fn reposition_y_z(pictograph: &PictographData, props: Props) -> Props {
    let blue = &pictograph.motions.blue;
    let red = &pictograph.motions.red;
    let shift = match (blue.motion_type.is_shift(), red.motion_type.is_shift()) {
        (true, false) => blue,
        (false, true) => red,
        _ => return reposition_non_shift(pictograph, props),
    };
    match motion_direction(shift) {
        Some(dir) => push_apart(props, shift.color, dir),
        None => props,
    }
}

pub fn reposition_non_shift(pictograph: &PictographData, props: Props) -> Props {
    match location_direction(&pictograph.motions.red) {
        Some(dir) => push_apart(props, PropColor::Red, dir),
        None => props,
    }
}

/// Separates props that share a location.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetaPropPositioner;

impl BetaPropPositioner {
    pub fn new() -> Self {
        Self
    }

    pub fn reposition(&self, pictograph: &PictographData, props: Props) -> Props {
        if !ends_with_beta(pictograph) {
            return props;
        }
        let rule = BetaRule::for_pictograph(pictograph);
        crate::log::debug!(?rule, letter = ?pictograph.letter, "separating beta props");
        match rule {
            BetaRule::GH => reposition_g_h(pictograph, props),
            BetaRule::I => reposition_i(pictograph, props),
            BetaRule::JKL => reposition_j_k_l(pictograph, props),
            BetaRule::YZ => reposition_y_z(pictograph, props),
            BetaRule::NonShift => reposition_non_shift(pictograph, props),
        }
    }
}
