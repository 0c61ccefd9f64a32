//! Data-driven pictograph scenarios
//!
//! Every `tests/scenarios/*.json` file holds a pictograph and the placements
//! expected once it has been positioned with the bundled dataset.

use std::sync::{Arc, Once};

use datatest_stable::Utf8Path;
use serde::Deserialize;
use tka_placement::{
    ArrowPlacementData, GridLocation, GridMode, GridPosition, MotionData, PictographData,
    PictographPositioner, PlacementDataProvider, PropColor,
};

/// Tolerance for angle comparisons
const ANGLE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    #[allow(dead_code)]
    description: String,
    pictograph: PictographData,
    expect: Expectation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Expectation {
    grid_mode: Option<GridMode>,
    end_position: Option<GridPosition>,
    blue: Option<ArrowExpectation>,
    red: Option<ArrowExpectation>,
    props_separated: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrowExpectation {
    #[serde(default)]
    hidden: bool,
    arrow_location: Option<GridLocation>,
    rotation: Option<f64>,
    mirrored: Option<bool>,
    prop_rotation: Option<f64>,
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn check_motion(
    path: &Utf8Path,
    color: PropColor,
    motion: &MotionData,
    expect: &ArrowExpectation,
) -> Result<(), String> {
    let fail = |what: String| Err(format!("{path} ({color}): {what}"));

    if expect.hidden {
        if motion.arrow_location.is_some()
            || motion.arrow_placement != ArrowPlacementData::default()
        {
            return fail(format!("hidden motion was placed: {motion:?}"));
        }
        return Ok(());
    }

    let placement = &motion.arrow_placement;
    let angle = placement.rotation_angle.raw();
    if !(0.0..360.0).contains(&angle) {
        return fail(format!("rotation {angle} out of range"));
    }
    if placement.coordinates.is_none() {
        return fail("arrow has no coordinates".to_string());
    }

    if let Some(expected) = expect.arrow_location {
        if motion.arrow_location != Some(expected) {
            return fail(format!(
                "arrow location: expected {expected}, got {:?}",
                motion.arrow_location
            ));
        }
    }
    if let Some(expected) = expect.rotation {
        if (angle - expected).abs() > ANGLE_TOLERANCE {
            return fail(format!("rotation: expected {expected}, got {angle}"));
        }
    }
    if let Some(expected) = expect.mirrored {
        if placement.svg_mirrored != expected {
            return fail(format!(
                "mirrored: expected {expected}, got {}",
                placement.svg_mirrored
            ));
        }
    }
    if let Some(expected) = expect.prop_rotation {
        let got = motion.prop_placement.rotation_angle.raw();
        if (got - expected).abs() > ANGLE_TOLERANCE {
            return fail(format!("prop rotation: expected {expected}, got {got}"));
        }
    }
    Ok(())
}

fn test_scenario_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();

    let source = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&source)?;

    let provider = PlacementDataProvider::bundled()?;
    let positioner = PictographPositioner::new(Arc::new(provider));
    let mut pictograph = scenario.pictograph;
    positioner.position(&mut pictograph);

    let expect = &scenario.expect;
    if let Some(mode) = expect.grid_mode {
        if pictograph.grid_mode != Some(mode) {
            return Err(format!(
                "{path}: grid mode: expected {mode}, got {:?}",
                pictograph.grid_mode
            )
            .into());
        }
    }
    if let Some(position) = expect.end_position {
        if pictograph.end_position != Some(position) {
            return Err(format!(
                "{path}: end position: expected {position}, got {:?}",
                pictograph.end_position
            )
            .into());
        }
    }

    for (color, arrow) in [(PropColor::Blue, &expect.blue), (PropColor::Red, &expect.red)] {
        if let Some(arrow) = arrow {
            check_motion(path, color, pictograph.motions.get(color), arrow)?;
        }
    }

    if let Some(separated) = expect.props_separated {
        let blue = pictograph.motions.blue.prop_placement.coordinates;
        let red = pictograph.motions.red.prop_placement.coordinates;
        if (blue != red) != separated {
            return Err(format!(
                "{path}: props separated: expected {separated}, blue {blue:?} red {red:?}"
            )
            .into());
        }
    }

    Ok(())
}

datatest_stable::harness! {
    { test = test_scenario_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scenarios"), pattern = r"\.json$" },
}
