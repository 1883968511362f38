use glam::UVec2;
use map_strata::prelude::*;
use map_strata_examples::{init_tracing, render_world_map_to_png, RenderConfig};

const SIZE: u32 = 100;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Edge avoidance pulls the samples away from the disk's rim.
    for (edge_avoidance, path) in [(0, "poisson-region-edge-0.png"), (3, "poisson-region-edge-3.png")]
    {
        let mut map = WorldMapData::new(42, SIZE, SIZE);
        map.push_layer(disk_region_layer());

        PoissonLayerGenerator::new(4.0)
            .with_regions()
            .with_edge_avoidance(edge_avoidance)
            .add_to_world(&mut map)?;

        let config = RenderConfig::new().with_scale(8);
        render_world_map_to_png(&map, &config, path)?;
    }

    Ok(())
}

/// A single circular region in the middle of the map.
fn disk_region_layer() -> RegionMapLayer {
    let center = SIZE as f32 / 2.0;
    let radius = SIZE as f32 * 0.35;

    let mut region_map = vec![0_i32; (SIZE * SIZE) as usize];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            if (dx * dx + dy * dy).sqrt() <= radius {
                region_map[flat_index(x, y, SIZE)] = 1;
            }
        }
    }

    let region = Region {
        index: 1,
        spawn_point: UVec2::new(SIZE / 2, SIZE / 2),
        border_points: Vec::new(),
    };

    RegionMapLayer::new(SIZE, region_map, vec![region])
}
