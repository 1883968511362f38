//! Generator contract and the world map orchestrator.
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::worldmap::WorldMapData;

/// One step of the generation pipeline.
///
/// Implementations append at most one layer to the map and may read layers
/// added by earlier generators. A generator whose prerequisite layer is
/// absent fails fast with [`Error::MissingLayer`] instead of producing a
/// degenerate layer; existing layers are never mutated.
pub trait MapLayerGenerator: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Mutate `map` by appending this generator's layer.
    fn add_to_world(&self, map: &mut WorldMapData) -> Result<()>;
}

/// Orchestrates an ordered list of generators into a [`WorldMapData`].
///
/// Generators run strictly in the configured order against one accumulating
/// map instance; later generators may depend on earlier layers, so the order
/// is a correctness concern, not a performance detail.
pub struct WorldMapGenerator {
    /// Domain width in grid cells.
    pub width: u32,
    /// Domain height in grid cells.
    pub height: u32,
    generators: Vec<Box<dyn MapLayerGenerator>>,
}

impl WorldMapGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions must be > 0");
        Self {
            width,
            height,
            generators: Vec::new(),
        }
    }

    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "map dimensions must be > 0 in both components".into(),
            ));
        }
        Ok(Self::new(width, height))
    }

    /// Append a generator to the pipeline.
    pub fn with_generator<G: MapLayerGenerator + 'static>(mut self, generator: G) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// Append an already boxed generator to the pipeline.
    pub fn with_boxed_generator(mut self, generator: Box<dyn MapLayerGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    /// Number of configured generators.
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Run every configured generator in order and return the populated map.
    ///
    /// The first generator error aborts the whole run: later generators may
    /// depend on the failed layer.
    pub fn generate_map(&self, seed: u64) -> Result<WorldMapData> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(
                "map dimensions must be > 0 in both components".into(),
            ));
        }

        if self.generators.is_empty() {
            warn!("World map generator has no layer generators.");
        }

        let mut map = WorldMapData::new(seed, self.width, self.height);

        for (index, generator) in self.generators.iter().enumerate() {
            info!("Generator {}: '{}'.", index, generator.name());
            generator.add_to_world(&mut map)?;
        }

        Ok(map)
    }
}
