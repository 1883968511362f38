#![forbid(unsafe_code)]
//! map_strata: Layered procedural world maps with Poisson-disk point sampling.
//!
//! Modules:
//! - sampling: deterministic RNG plumbing, acceleration grid, Poisson disk sampler
//! - worldmap: layer data model, generator contract, orchestrator
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod sampling;
pub mod worldmap;

/// Convenient re-exports for common types. Import with `use map_strata::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::sampling::poisson_disk::{PoissonDiskSampling, DEFAULT_MAX_ATTEMPTS};
    pub use crate::sampling::{rng_from_seed, seed_for_layer};
    pub use crate::worldmap::generator::{MapLayerGenerator, WorldMapGenerator};
    pub use crate::worldmap::height_layer::NoiseHeightGenerator;
    pub use crate::worldmap::layer::{
        HeightMapLayer, MapLayer, PointSampleLayer, Region, RegionMapLayer,
    };
    pub use crate::worldmap::poisson_layer::PoissonLayerGenerator;
    pub use crate::worldmap::{flat_index, WorldMapData};
}
