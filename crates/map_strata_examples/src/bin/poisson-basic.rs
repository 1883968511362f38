use glam::UVec2;
use map_strata::prelude::*;
use map_strata_examples::{init_tracing, render_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let extent = UVec2::new(100, 100);
    let sampling = PoissonDiskSampling::new(4.0);

    let mut rng = StdRng::seed_from_u64(42);
    let points = sampling.generate(extent, &mut rng)?;

    let config = RenderConfig::new().with_scale(8);
    render_points_to_png(extent, &points, &config, "poisson-basic.png")?;
    Ok(())
}
