//! PNG rendering helpers shared by the example binaries.
use anyhow::Context;
use glam::UVec2;
use image::{Rgb, RgbImage};
use map_strata::prelude::*;

/// Install a fmt subscriber for the example binaries.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}

/// Appearance of rendered maps and point fields.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image pixels per grid cell.
    pub scale: u32,
    /// Background color for cells without height data.
    pub background: [u8; 3],
    /// Color of sample point markers.
    pub point_color: [u8; 3],
    /// Marker radius in image pixels.
    pub point_radius: i32,
    /// Tint palette cycled through by region index.
    pub region_colors: Vec<[u8; 3]>,
    /// Blend factor for region tints in [0, 1].
    pub region_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 6,
            background: [220, 220, 220],
            point_color: [20, 20, 20],
            point_radius: 2,
            region_colors: vec![[46, 139, 87], [70, 130, 180], [205, 133, 63]],
            region_alpha: 0.35,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_point_radius(mut self, point_radius: i32) -> Self {
        self.point_radius = point_radius;
        self
    }
}

/// Render a bare point field onto a plain background.
pub fn render_points_to_png(
    extent: UVec2,
    points: &[UVec2],
    config: &RenderConfig,
    path: &str,
) -> anyhow::Result<()> {
    let mut image = RgbImage::from_pixel(
        extent.x * config.scale,
        extent.y * config.scale,
        Rgb(config.background),
    );

    draw_points(&mut image, points, config);
    image.save(path).with_context(|| format!("writing {path}"))?;

    tracing::info!("Wrote {path} ({} points).", points.len());
    Ok(())
}

/// Render a world map: grayscale heights, region tints, and sample points,
/// depending on which layers are present.
pub fn render_world_map_to_png(
    map: &WorldMapData,
    config: &RenderConfig,
    path: &str,
) -> anyhow::Result<()> {
    let mut image = RgbImage::from_pixel(
        map.width * config.scale,
        map.height * config.scale,
        Rgb(config.background),
    );

    if let Some(height_layer) = map.get_layer::<HeightMapLayer>() {
        for y in 0..map.height {
            for x in 0..map.width {
                let shade = (height_layer.height_at(x, y).clamp(0.0, 1.0) * 255.0) as u8;
                fill_cell(&mut image, x, y, config.scale, [shade, shade, shade]);
            }
        }
    }

    if let Some(region_layer) = map.get_layer::<RegionMapLayer>() {
        if !config.region_colors.is_empty() {
            for y in 0..map.height {
                for x in 0..map.width {
                    let index = region_layer.region_index_at(x, y);
                    if index <= 0 {
                        continue;
                    }
                    let tint =
                        config.region_colors[(index as usize - 1) % config.region_colors.len()];
                    blend_cell(&mut image, x, y, config.scale, tint, config.region_alpha);
                }
            }
        }
    }

    if let Some(point_layer) = map.get_layer::<PointSampleLayer>() {
        draw_points(&mut image, &point_layer.points, config);
    }

    image.save(path).with_context(|| format!("writing {path}"))?;

    tracing::info!("Wrote {path} ({} layers).", map.layer_count());
    Ok(())
}

fn fill_cell(image: &mut RgbImage, x: u32, y: u32, scale: u32, color: [u8; 3]) {
    for py in y * scale..(y + 1) * scale {
        for px in x * scale..(x + 1) * scale {
            image.put_pixel(px, py, Rgb(color));
        }
    }
}

fn blend_cell(image: &mut RgbImage, x: u32, y: u32, scale: u32, color: [u8; 3], alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    for py in y * scale..(y + 1) * scale {
        for px in x * scale..(x + 1) * scale {
            let Rgb(base) = *image.get_pixel(px, py);
            let blended = [
                (color[0] as f32 * alpha + base[0] as f32 * (1.0 - alpha)) as u8,
                (color[1] as f32 * alpha + base[1] as f32 * (1.0 - alpha)) as u8,
                (color[2] as f32 * alpha + base[2] as f32 * (1.0 - alpha)) as u8,
            ];
            image.put_pixel(px, py, Rgb(blended));
        }
    }
}

fn draw_points(image: &mut RgbImage, points: &[UVec2], config: &RenderConfig) {
    let (width, height) = image.dimensions();
    let radius = config.point_radius.max(0);

    for point in points {
        // Center of the cell in image space.
        let cx = (point.x * config.scale + config.scale / 2) as i32;
        let cy = (point.y * config.scale + config.scale / 2) as i32;

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let px = cx + dx;
                let py = cy + dy;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    continue;
                }
                image.put_pixel(px as u32, py as u32, Rgb(config.point_color));
            }
        }
    }
}
