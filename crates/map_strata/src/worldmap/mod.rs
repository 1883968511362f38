//! World map data model and layered generation.
//!
//! A [`WorldMapData`] is created once per generation run, filled by an
//! ordered list of generators (see [`generator`]), and read-only afterwards.
use crate::worldmap::layer::MapLayer;

pub mod generator;
pub mod height_layer;
pub mod layer;
pub mod poisson_layer;

pub use generator::{MapLayerGenerator, WorldMapGenerator};
pub use height_layer::NoiseHeightGenerator;
pub use layer::{HeightMapLayer, PointSampleLayer, Region, RegionMapLayer};
pub use poisson_layer::PoissonLayerGenerator;

/// Canonical flat index for grid-backed layers: `y * width + x`.
#[inline]
pub fn flat_index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// A generated world map: seed, dimensions, and the layers appended by
/// generators in generation order.
///
/// The model does not enforce one layer per kind; lookup returns the first
/// match, so a generator that runs twice leaves its second layer unreachable
/// through [`WorldMapData::get_layer`].
#[derive(Debug)]
pub struct WorldMapData {
    /// Seed the map was generated from.
    pub seed: u64,
    /// Domain width in grid cells.
    pub width: u32,
    /// Domain height in grid cells.
    pub height: u32,
    layers: Vec<Box<dyn MapLayer>>,
}

impl WorldMapData {
    /// Create an empty map for the given seed and dimensions.
    pub fn new(seed: u64, width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions must be > 0");
        Self {
            seed,
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// Append a layer. Layers are never mutated or removed afterwards.
    pub fn push_layer<L: MapLayer>(&mut self, layer: L) {
        self.layers.push(Box::new(layer));
    }

    /// Look up the first layer of the given concrete type.
    ///
    /// Absence is a normal, checked outcome for optional layers.
    pub fn get_layer<L: MapLayer>(&self) -> Option<&L> {
        self.layers
            .iter()
            .find_map(|layer| layer.as_any().downcast_ref::<L>())
    }

    /// All layers in insertion order.
    pub fn layers(&self) -> &[Box<dyn MapLayer>] {
        &self.layers
    }

    /// Number of layers added so far.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
