//! Placement adjustment dataset and its provider
//!
//! The dataset is a JSON document keyed
//! `[gridMode][motionType][placementKey][turns] -> [dx, dy]`, plus an optional
//! `special` section of per-letter overrides. It is loaded once through a
//! [`DatasetSource`] into a [`PlacementDataProvider`] and read-only afterwards.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use futures::FutureExt;
use futures::future::BoxFuture;
use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::errors::DatasetError;
use crate::letter::Letter;
use crate::types::{GridMode, MotionType, PropColor, Turns};

/// Offsets for one grid mode: `motion type -> placement key -> turns -> [dx, dy]`.
pub type ModePlacements = BTreeMap<String, BTreeMap<String, BTreeMap<String, [f64; 2]>>>;

/// Per-color override for one letter and turns pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialPlacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<[f64; 2]>,
}

impl SpecialPlacement {
    pub fn for_color(&self, color: PropColor) -> Option<DVec2> {
        let pair = match color {
            PropColor::Blue => self.blue,
            PropColor::Red => self.red,
        };
        pair.map(|[x, y]| dvec2(x, y))
    }
}

/// `mode -> letter symbol -> "(blueTurns, redTurns)" -> overrides`.
pub type SpecialPlacements = BTreeMap<String, BTreeMap<String, BTreeMap<String, SpecialPlacement>>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementDataset {
    #[serde(default)]
    pub diamond: ModePlacements,
    #[serde(default, rename = "box")]
    pub box_placements: ModePlacements,
    #[serde(default)]
    pub special: SpecialPlacements,
}

/// Key used for a turns pair in the `special` section, e.g. `(0, 1.5)`.
pub fn turns_pair_key(blue: Turns, red: Turns) -> String {
    format!("({}, {})", blue.key(), red.key())
}

impl PlacementDataset {
    /// Decode a dataset, reporting JSON errors against `name`.
    pub fn from_json(name: &str, text: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(text).map_err(|err| DatasetError::json(name, text, &err))
    }

    pub fn mode(&self, mode: GridMode) -> &ModePlacements {
        match mode {
            GridMode::Diamond => &self.diamond,
            GridMode::Box => &self.box_placements,
        }
    }

    /// Raw offset for an exact placement key, without any fallback.
    pub fn offset(
        &self,
        mode: GridMode,
        motion_type: MotionType,
        placement_key: &str,
        turns: Turns,
    ) -> Option<DVec2> {
        let [x, y] = *self
            .mode(mode)
            .get(motion_type.key())?
            .get(placement_key)?
            .get(&turns.key())?;
        Some(dvec2(x, y))
    }

    pub fn special_offset(
        &self,
        mode: GridMode,
        letter: Letter,
        color: PropColor,
        turns: (Turns, Turns),
    ) -> Option<DVec2> {
        self.special
            .get(mode.key())?
            .get(letter.symbol())?
            .get(&turns_pair_key(turns.0, turns.1))?
            .for_color(color)
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Somewhere the dataset text can be fetched from.
pub trait DatasetSource: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> String;

    fn fetch(&self) -> BoxFuture<'_, Result<String, DatasetError>>;
}

const BUNDLED_DATASET: &str = include_str!("../../assets/default_placements.json");

/// The dataset embedded in the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl DatasetSource for BundledSource {
    fn name(&self) -> String {
        "default_placements.json".to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, DatasetError>> {
        futures::future::ready(Ok(BUNDLED_DATASET.to_string())).boxed()
    }
}

/// A dataset file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// Reads the file synchronously, before the returned future is polled.
    fn fetch(&self) -> BoxFuture<'_, Result<String, DatasetError>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| DatasetError::Io {
            path: self.path.clone(),
            source,
        });
        futures::future::ready(text).boxed()
    }
}

/// An in-memory dataset, mostly for tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DatasetSource for StaticSource {
    fn name(&self) -> String {
        "<static>".to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, DatasetError>> {
        futures::future::ready(Ok(self.text.clone())).boxed()
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Owns the loaded dataset. Constructed once and shared (usually behind `Arc`).
///
/// Before [`load`](Self::load) completes, adjustment lookups degrade to zero
/// offsets.
#[derive(Debug, Default)]
pub struct PlacementDataProvider {
    dataset: OnceLock<PlacementDataset>,
}

impl PlacementDataProvider {
    /// An empty provider; call [`load`](Self::load) before positioning.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that is ready immediately.
    pub fn with_dataset(dataset: PlacementDataset) -> Self {
        let provider = Self::new();
        let _ = provider.dataset.set(dataset);
        provider
    }

    /// Load the embedded dataset without an executor.
    pub fn bundled() -> Result<Self, DatasetError> {
        let provider = Self::new();
        futures::executor::block_on(provider.load(&BundledSource))?;
        Ok(provider)
    }

    /// Fetch and decode the dataset. Loading an already loaded provider is a no-op.
    pub async fn load(&self, source: &dyn DatasetSource) -> Result<(), DatasetError> {
        if self.is_ready() {
            crate::log::debug!(source = %source.name(), "placement dataset already loaded");
            return Ok(());
        }

        let text = source.fetch().await?;
        let dataset = PlacementDataset::from_json(&source.name(), &text)?;
        // Two loads racing: the first one to finish wins.
        let _ = self.dataset.set(dataset);
        crate::log::debug!(source = %source.name(), "placement dataset loaded");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn dataset(&self) -> Option<&PlacementDataset> {
        self.dataset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    const SMALL: &str = r#"{
        "diamond": {
            "pro": {
                "pro": { "0": [10, -5], "1": [12, -6] },
                "pro_to_layer1_alpha": { "0": [20, 0], "0.5": [1, 2] }
            }
        },
        "special": {
            "diamond": {
                "G": { "(0, 1)": { "blue": [3, 4] } }
            }
        }
    }"#;

    #[test]
    fn missing_sections_default_to_empty() {
        let dataset = PlacementDataset::from_json("test", "{}").unwrap();
        assert!(dataset.diamond.is_empty());
        assert!(dataset.box_placements.is_empty());
        assert!(dataset.special.is_empty());
    }

    #[test]
    fn offsets_are_keyed_by_turns() {
        let dataset = PlacementDataset::from_json("test", SMALL).unwrap();
        let key = "pro_to_layer1_alpha";
        assert_eq!(
            dataset.offset(GridMode::Diamond, MotionType::Pro, key, Turns::ZERO),
            Some(dvec2(20.0, 0.0))
        );
        let half = Turns::try_new(0.5).unwrap();
        assert_eq!(
            dataset.offset(GridMode::Diamond, MotionType::Pro, key, half),
            Some(dvec2(1.0, 2.0))
        );
        assert_eq!(
            dataset.offset(GridMode::Box, MotionType::Pro, key, Turns::ZERO),
            None
        );
    }

    #[test]
    fn special_offsets_are_per_color() {
        let dataset = PlacementDataset::from_json("test", SMALL).unwrap();
        let turns = (Turns::ZERO, Turns::whole(1));
        assert_eq!(
            dataset.special_offset(GridMode::Diamond, Letter::G, PropColor::Blue, turns),
            Some(dvec2(3.0, 4.0))
        );
        assert_eq!(
            dataset.special_offset(GridMode::Diamond, Letter::G, PropColor::Red, turns),
            None
        );
    }

    #[test]
    fn turns_pair_keys() {
        assert_eq!(turns_pair_key(Turns::ZERO, Turns::whole(2)), "(0, 2)");
        assert_eq!(
            turns_pair_key(Turns::try_new(1.5).unwrap(), Turns::ZERO),
            "(1.5, 0)"
        );
    }

    #[test]
    fn provider_is_not_ready_until_loaded() {
        let provider = PlacementDataProvider::new();
        assert!(!provider.is_ready());
        assert!(provider.dataset().is_none());

        block_on(provider.load(&StaticSource::new(SMALL))).unwrap();
        assert!(provider.is_ready());
    }

    #[test]
    fn second_load_is_a_noop() {
        let provider = PlacementDataProvider::new();
        block_on(provider.load(&StaticSource::new(SMALL))).unwrap();
        // would fail to parse if it were fetched again
        block_on(provider.load(&StaticSource::new("not json"))).unwrap();
        let dataset = provider.dataset().unwrap();
        assert!(dataset.diamond.contains_key("pro"));
    }

    #[test]
    fn invalid_json_leaves_provider_empty() {
        let provider = PlacementDataProvider::new();
        let err = block_on(provider.load(&StaticSource::new("{ \"diamond\": 3 }"))).unwrap_err();
        assert!(matches!(err, DatasetError::Json { .. }), "{err:?}");
        assert!(!provider.is_ready());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let provider = PlacementDataProvider::new();
        let source = FileSource::new("/nonexistent/placements.json");
        let err = block_on(provider.load(&source)).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }), "{err:?}");
    }

    #[test]
    fn file_is_read_when_fetched() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/default_placements.json");
        let text = FileSource::new(path).fetch().now_or_never();
        assert!(matches!(text, Some(Ok(ref t)) if t.contains("diamond")));

        let missing = FileSource::new("/nonexistent/placements.json").fetch().now_or_never();
        assert!(matches!(missing, Some(Err(DatasetError::Io { .. }))));
    }

    #[test]
    fn bundled_dataset_covers_every_motion_type() {
        let provider = PlacementDataProvider::bundled().unwrap();
        let dataset = provider.dataset().unwrap();
        for mode in [GridMode::Diamond, GridMode::Box] {
            for mt in MotionType::ALL {
                assert!(
                    dataset.mode(mode).contains_key(mt.key()),
                    "{mode} is missing {mt}"
                );
            }
        }
    }
}
