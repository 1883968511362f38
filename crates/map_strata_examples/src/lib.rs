#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, render_points_to_png, render_world_map_to_png, RenderConfig,
};
