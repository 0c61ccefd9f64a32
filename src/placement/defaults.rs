//! Default sizes and settings (all in canvas units of the 950×950 grid SVG)

use glam::{DVec2, dvec2};

pub const CANVAS_SIZE: f64 = 950.0;
pub const GRID_CENTER: DVec2 = dvec2(475.0, 475.0);
/// Distance from the center to a hand point
pub const HAND_POINT_RADIUS: f64 = 143.1;
/// Axis offset of a box hand point (`HAND_POINT_RADIUS / √2`)
pub const BOX_HAND_OFFSET: f64 = 101.2;
/// Axis offset of a diamond layer-2 point (the corners of the diamond's square)
pub const DIAMOND_LAYER2_OFFSET: f64 = 143.1;
/// Distance from the center to a box layer-2 point
pub const BOX_LAYER2_RADIUS: f64 = 202.4;
/// Step applied to each axis when separating beta props
pub const BETA_OFFSET: f64 = 25.0;
/// Props closer than this to the origin are treated as unplaced
pub const ORIGIN_EPSILON: f64 = 1.0;
pub const ARROW_SVG_CENTER: DVec2 = dvec2(50.0, 50.0);
pub const PROP_SVG_CENTER: DVec2 = dvec2(125.0, 40.0);
