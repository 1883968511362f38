//! Poisson-disk point layer generator.
use glam::UVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::sampling::poisson_disk::{PoissonDiskSampling, DEFAULT_MAX_ATTEMPTS};
use crate::sampling::rng_from_seed;
use crate::worldmap::generator::MapLayerGenerator;
use crate::worldmap::layer::{PointSampleLayer, RegionMapLayer};
use crate::worldmap::{flat_index, WorldMapData};

/// Scatters blue-noise points over the map and appends them as a
/// [`PointSampleLayer`].
///
/// With `use_regions` set, points are restricted to cells carrying a valid
/// region index; `edge_avoidance` additionally keeps them a square margin of
/// that many cells away from any invalid cell. The sampler itself knows
/// nothing about regions; the restriction is a predicate composed here.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonLayerGenerator {
    /// Minimum distance between points in grid cells.
    pub radius: f32,
    /// Candidate attempts per active point.
    pub max_samples_per_point: u32,
    /// Restrict points to valid regions of the [`RegionMapLayer`].
    pub use_regions: bool,
    /// Margin in cells kept clear of invalid regions; 0 disables it.
    pub edge_avoidance: u32,
}

impl PoissonLayerGenerator {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            max_samples_per_point: DEFAULT_MAX_ATTEMPTS,
            use_regions: false,
            edge_avoidance: 0,
        }
    }

    /// Set the candidate attempt cap per active point.
    pub fn with_max_samples_per_point(mut self, max_samples_per_point: u32) -> Self {
        self.max_samples_per_point = max_samples_per_point;
        self
    }

    /// Restrict sampling to valid regions.
    pub fn with_regions(mut self) -> Self {
        self.use_regions = true;
        self
    }

    /// Set the edge-avoidance margin in cells.
    pub fn with_edge_avoidance(mut self, edge_avoidance: u32) -> Self {
        self.edge_avoidance = edge_avoidance;
        self
    }

    fn sampling(&self) -> PoissonDiskSampling {
        PoissonDiskSampling::new(self.radius).with_max_attempts(self.max_samples_per_point)
    }

    fn add_default(&self, map: &mut WorldMapData) -> Result<()> {
        let extent = UVec2::new(map.width, map.height);
        let mut rng = rng_from_seed(map.seed);
        let points = self.sampling().generate(extent, &mut rng)?;

        debug!("Poisson layer: {} points.", points.len());
        map.push_layer(PointSampleLayer::new(points));
        Ok(())
    }

    fn add_using_regions(&self, map: &mut WorldMapData) -> Result<()> {
        let width = map.width;
        let height = map.height;
        let edge = self.edge_avoidance;

        let points = {
            let region_layer = map
                .get_layer::<RegionMapLayer>()
                .ok_or(Error::MissingLayer {
                    kind: "RegionMapLayer",
                })?;
            let region_map = &region_layer.region_map;

            let accept = |pt: UVec2| {
                if region_map[flat_index(pt.x, pt.y, width)] <= 0 {
                    return false;
                }
                if edge == 0 {
                    return true;
                }

                // Reject when any cell of the clamped square around the point
                // touches an invalid region.
                let start_x = pt.x.saturating_sub(edge);
                let end_x = (pt.x + edge).min(width - 1);
                let start_y = pt.y.saturating_sub(edge);
                let end_y = (pt.y + edge).min(height - 1);

                for y in start_y..=end_y {
                    for x in start_x..=end_x {
                        if region_map[flat_index(x, y, width)] <= 0 {
                            return false;
                        }
                    }
                }

                true
            };

            let mut rng = rng_from_seed(map.seed);
            self.sampling()
                .generate_where(UVec2::new(width, height), &mut rng, accept)?
        };

        debug!("Poisson layer (region-restricted): {} points.", points.len());
        map.push_layer(PointSampleLayer::new(points));
        Ok(())
    }
}

impl MapLayerGenerator for PoissonLayerGenerator {
    fn name(&self) -> &str {
        "poisson_points"
    }

    fn add_to_world(&self, map: &mut WorldMapData) -> Result<()> {
        if self.use_regions {
            return self.add_using_regions(map);
        }
        self.add_default(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldmap::layer::Region;

    /// 10x10 map with a 4x4 valid region covering cells 3..7 in both axes.
    fn map_with_center_region(seed: u64) -> WorldMapData {
        let mut region_map = vec![0_i32; 100];
        for y in 3..7_u32 {
            for x in 3..7_u32 {
                region_map[flat_index(x, y, 10)] = 1;
            }
        }
        let region = Region {
            index: 1,
            spawn_point: UVec2::new(5, 5),
            border_points: Vec::new(),
        };

        let mut map = WorldMapData::new(seed, 10, 10);
        map.push_layer(RegionMapLayer::new(10, region_map, vec![region]));
        map
    }

    fn adjacent_to_invalid(map: &WorldMapData, pt: UVec2) -> bool {
        let region_layer = map.get_layer::<RegionMapLayer>().unwrap();
        let start_x = pt.x.saturating_sub(1);
        let end_x = (pt.x + 1).min(map.width - 1);
        let start_y = pt.y.saturating_sub(1);
        let end_y = (pt.y + 1).min(map.height - 1);

        for y in start_y..=end_y {
            for x in start_x..=end_x {
                if !region_layer.is_valid_at(x, y) {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn without_regions_a_point_layer_is_appended() {
        let mut map = WorldMapData::new(5, 20, 20);
        PoissonLayerGenerator::new(3.0)
            .add_to_world(&mut map)
            .expect("generation succeeds");

        let layer = map.get_layer::<PointSampleLayer>().expect("layer present");
        assert!(!layer.points.is_empty());
        assert_eq!(map.layer_count(), 1);
    }

    #[test]
    fn missing_region_layer_fails_fast() {
        let mut map = WorldMapData::new(5, 20, 20);
        let err = PoissonLayerGenerator::new(3.0)
            .with_regions()
            .add_to_world(&mut map)
            .expect_err("prerequisite missing");

        assert!(matches!(err, Error::MissingLayer { kind: "RegionMapLayer" }));
        assert_eq!(map.layer_count(), 0);
    }

    #[test]
    fn region_restricted_points_stay_inside_valid_cells() {
        // The valid area is small, so a single seed can legitimately come up
        // empty; sweep a few and require points somewhere.
        let mut total = 0;
        for seed in 1..=8 {
            let mut map = map_with_center_region(seed);
            PoissonLayerGenerator::new(1.5)
                .with_regions()
                .add_to_world(&mut map)
                .expect("generation succeeds");

            let region_layer = map.get_layer::<RegionMapLayer>().unwrap();
            let points = &map.get_layer::<PointSampleLayer>().unwrap().points;
            total += points.len();
            for pt in points {
                assert!(region_layer.is_valid_at(pt.x, pt.y), "{pt} outside region");
            }
        }
        assert!(total > 0);
    }

    #[test]
    fn edge_avoidance_keeps_points_off_the_region_border() {
        // With a margin of one cell, no accepted point may touch an invalid
        // cell, diagonals included.
        let mut total = 0;
        for seed in 1..=8 {
            let mut map = map_with_center_region(seed);
            PoissonLayerGenerator::new(1.0)
                .with_regions()
                .with_edge_avoidance(1)
                .add_to_world(&mut map)
                .expect("generation succeeds");

            let points = map.get_layer::<PointSampleLayer>().unwrap().points.clone();
            total += points.len();
            for pt in &points {
                assert!(
                    !adjacent_to_invalid(&map, *pt),
                    "{pt} is adjacent to an invalid cell"
                );
            }
        }
        assert!(total > 0);
    }

    #[test]
    fn all_invalid_region_map_yields_an_empty_layer() {
        let mut map = WorldMapData::new(3, 10, 10);
        map.push_layer(RegionMapLayer::new(10, vec![0; 100], Vec::new()));

        PoissonLayerGenerator::new(1.0)
            .with_regions()
            .add_to_world(&mut map)
            .expect("empty result is not an error");

        assert!(map.get_layer::<PointSampleLayer>().unwrap().points.is_empty());
    }
}
