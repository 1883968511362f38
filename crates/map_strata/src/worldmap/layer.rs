//! Layer types attached to a world map.
//!
//! Each layer is a typed slice of world data. Built-in layers cover heights,
//! regions, and blue-noise sample points; downstream crates add their own by
//! implementing [`MapLayer`].
use std::any::Any;
use std::fmt;

use glam::UVec2;

use crate::worldmap::flat_index;

/// A named, typed slice of world data attached to a
/// [`WorldMapData`](crate::worldmap::WorldMapData).
///
/// Layers are appended by generators and never mutated afterwards. Lookup is
/// by concrete type; the first inserted layer of a type wins.
pub trait MapLayer: Any + Send + Sync + fmt::Debug {
    /// Upcast for type-indexed lookup.
    fn as_any(&self) -> &dyn Any;
}

/// Height values for every grid cell, row-major.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightMapLayer {
    /// Row length of the height grid.
    pub width: u32,
    /// One height per cell, indexed `y * width + x`.
    pub heights: Vec<f32>,
}

impl HeightMapLayer {
    pub fn new(width: u32, heights: Vec<f32>) -> Self {
        debug_assert!(width > 0, "width must be > 0");
        debug_assert_eq!(heights.len() % width as usize, 0);
        Self { width, heights }
    }

    pub fn height_at(&self, x: u32, y: u32) -> f32 {
        self.heights[flat_index(x, y, self.width)]
    }
}

impl MapLayer for HeightMapLayer {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Descriptor for one region of the map.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// 1-based region index as stored in the region map.
    pub index: u32,
    /// Cell the region was grown from.
    pub spawn_point: UVec2,
    /// Cells on the region's border.
    pub border_points: Vec<UVec2>,
}

/// Region assignment for every grid cell plus per-region descriptors.
///
/// `region_map` stores indices offset by one: a value `n > 0` refers to
/// `regions[n - 1]`, while `0` (and anything negative) marks a cell belonging
/// to no region. A freshly zeroed grid is therefore all-invalid without an
/// initialization pass; keep the sentinel when producing region maps.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionMapLayer {
    /// Row length of the region grid.
    pub width: u32,
    /// 1-based region index per cell, `<= 0` meaning no region.
    pub region_map: Vec<i32>,
    /// Descriptors, indexed by `region_map` value minus one.
    pub regions: Vec<Region>,
}

impl RegionMapLayer {
    pub fn new(width: u32, region_map: Vec<i32>, regions: Vec<Region>) -> Self {
        debug_assert!(width > 0, "width must be > 0");
        debug_assert_eq!(region_map.len() % width as usize, 0);
        Self {
            width,
            region_map,
            regions,
        }
    }

    pub fn region_index_at(&self, x: u32, y: u32) -> i32 {
        self.region_map[flat_index(x, y, self.width)]
    }

    /// Whether the cell belongs to any region.
    pub fn is_valid_at(&self, x: u32, y: u32) -> bool {
        self.region_index_at(x, y) > 0
    }

    /// Descriptor of the region covering the cell, if any.
    pub fn region_at(&self, x: u32, y: u32) -> Option<&Region> {
        let index = self.region_index_at(x, y);
        if index <= 0 {
            return None;
        }
        self.regions.get(index as usize - 1)
    }
}

impl MapLayer for RegionMapLayer {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Blue-noise sample points produced by the Poisson layer generator.
///
/// The sequence is unordered; only the spatial distribution carries meaning.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSampleLayer {
    pub points: Vec<UVec2>,
}

impl PointSampleLayer {
    pub fn new(points: Vec<UVec2>) -> Self {
        Self { points }
    }
}

impl MapLayer for PointSampleLayer {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
