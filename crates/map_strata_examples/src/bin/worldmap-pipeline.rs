use glam::UVec2;
use map_strata::prelude::*;
use map_strata_examples::{init_tracing, render_world_map_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let generator = WorldMapGenerator::try_new(128, 128)?
        .with_generator(NoiseHeightGenerator::new().with_frequency(3.0))
        .with_generator(ThresholdRegionGenerator { sea_level: 0.55 })
        .with_generator(
            PoissonLayerGenerator::new(3.0)
                .with_regions()
                .with_edge_avoidance(2),
        );

    let map = generator.generate_map(2026)?;

    let config = RenderConfig::new().with_scale(6).with_point_radius(3);
    render_world_map_to_png(&map, &config, "worldmap-pipeline.png")?;
    Ok(())
}

/// Stand-in for a real region generator: marks everything above `sea_level`
/// as one landmass region, with the usual 1-based index sentinel.
struct ThresholdRegionGenerator {
    sea_level: f32,
}

impl MapLayerGenerator for ThresholdRegionGenerator {
    fn name(&self) -> &str {
        "threshold_regions"
    }

    fn add_to_world(&self, map: &mut WorldMapData) -> Result<()> {
        let (width, height) = (map.width, map.height);

        let (region_map, spawn_point) = {
            let height_layer = map
                .get_layer::<HeightMapLayer>()
                .ok_or(Error::MissingLayer {
                    kind: "HeightMapLayer",
                })?;

            let mut region_map = vec![0_i32; (width * height) as usize];
            let mut spawn_point = UVec2::ZERO;
            let mut best_height = f32::MIN;

            for y in 0..height {
                for x in 0..width {
                    let h = height_layer.height_at(x, y);
                    if h > self.sea_level {
                        region_map[flat_index(x, y, width)] = 1;
                        if h > best_height {
                            best_height = h;
                            spawn_point = UVec2::new(x, y);
                        }
                    }
                }
            }

            (region_map, spawn_point)
        };

        let border_points = collect_border_points(&region_map, width, height);

        let region = Region {
            index: 1,
            spawn_point,
            border_points,
        };
        map.push_layer(RegionMapLayer::new(width, region_map, vec![region]));
        Ok(())
    }
}

/// Valid cells with at least one invalid 4-neighbor.
fn collect_border_points(region_map: &[i32], width: u32, height: u32) -> Vec<UVec2> {
    let mut border = Vec::new();

    let valid = |x: i64, y: i64| {
        x >= 0
            && y >= 0
            && x < width as i64
            && y < height as i64
            && region_map[flat_index(x as u32, y as u32, width)] > 0
    };

    for y in 0..height {
        for x in 0..width {
            if region_map[flat_index(x, y, width)] <= 0 {
                continue;
            }
            let (ix, iy) = (x as i64, y as i64);
            let edge = !valid(ix - 1, iy) || !valid(ix + 1, iy) || !valid(ix, iy - 1)
                || !valid(ix, iy + 1);
            if edge {
                border.push(UVec2::new(x, y));
            }
        }
    }

    border
}
