//! Geometry and placement engine for Kinetic Alphabet pictographs.
//!
//! Takes symbolic motion data (motion type, start and end location, rotation
//! direction, turns, orientation) and computes where each arrow and prop
//! glyph is drawn on the 950×950 pictograph grid.

pub mod errors;
pub mod letter;
pub(crate) mod log;
pub mod pictograph;
pub mod placement;
pub mod types;

use std::sync::{Arc, OnceLock};

pub use errors::{DatasetError, ParseError};
pub use letter::{Letter, LetterType};
pub use pictograph::{
    ArrowPlacementData, GridPosition, MotionData, Motions, PictographData, PositionGroup,
    PropPlacementData,
};
pub use placement::{PictographPositioner, PlacementDataProvider, PositionerOptions};
pub use types::{
    Angle, GridLocation, GridMode, MotionType, Orientation, PropColor, PropType,
    RotationDirection, Turns,
};

static BUNDLED: OnceLock<PictographPositioner> = OnceLock::new();

/// Process-wide positioner over the bundled placement dataset.
///
/// The dataset is decoded on first use and shared by every later call.
pub fn bundled_positioner() -> Result<&'static PictographPositioner, DatasetError> {
    if let Some(positioner) = BUNDLED.get() {
        return Ok(positioner);
    }
    let provider = PlacementDataProvider::bundled()?;
    Ok(BUNDLED.get_or_init(|| PictographPositioner::new(Arc::new(provider))))
}

/// Position a pictograph with the bundled placement dataset.
pub fn position_pictograph(pictograph: &mut PictographData) -> Result<(), DatasetError> {
    bundled_positioner()?.position(pictograph);
    Ok(())
}

/// Position a pictograph given as JSON and return it, placements filled in, as JSON.
pub fn position_pictograph_json(input: &str) -> Result<String, miette::Report> {
    let mut pictograph: PictographData = serde_json::from_str(input)
        .map_err(|e| miette::miette!("invalid pictograph: {}", e))?;
    position_pictograph(&mut pictograph)?;
    serde_json::to_string_pretty(&pictograph)
        .map_err(|e| miette::miette!("failed to serialize pictograph: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER_A: &str = r#"{
        "letter": "A",
        "motions": {
            "blue": {
                "motionType": "pro", "color": "blue",
                "startLocation": "n", "endLocation": "e",
                "rotationDirection": "cw", "turns": 0
            },
            "red": {
                "motionType": "pro", "color": "red",
                "startLocation": "s", "endLocation": "w",
                "rotationDirection": "cw", "turns": 0
            }
        }
    }"#;

    #[test]
    fn json_round_trip_fills_outputs() {
        let out = position_pictograph_json(LETTER_A).unwrap();
        let p: PictographData = serde_json::from_str(&out).unwrap();
        assert_eq!(p.grid_mode, Some(GridMode::Diamond));
        assert_eq!(p.motions.blue.arrow_location, Some(GridLocation::NorthEast));
        assert_eq!(p.motions.red.arrow_location, Some(GridLocation::SouthWest));
        assert!(p.motions.blue.arrow_placement.coordinates.is_some());
    }

    #[test]
    fn bundled_dataset_is_decoded_once() {
        let first = bundled_positioner().unwrap();
        let out_a = position_pictograph_json(LETTER_A).unwrap();
        let out_b = position_pictograph_json(LETTER_A).unwrap();
        assert_eq!(out_a, out_b);
        assert!(std::ptr::eq(first, bundled_positioner().unwrap()));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = position_pictograph_json("{ \"letter\": ").unwrap_err();
        assert!(err.to_string().contains("invalid pictograph"), "{err}");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let input = LETTER_A.replace("\"n\"", "\"north-by-northwest\"");
        assert!(position_pictograph_json(&input).is_err());
    }
}
