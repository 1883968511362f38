//! Fractal noise height layer generator.
use noise::{NoiseFn, Perlin};
use tracing::debug;

use crate::error::{Error, Result};
use crate::sampling::seed_for_layer;
use crate::worldmap::generator::MapLayerGenerator;
use crate::worldmap::layer::HeightMapLayer;
use crate::worldmap::WorldMapData;

/// Salt mixed into the map seed so the height stream stays decorrelated from
/// other generators.
const HEIGHT_LAYER_SALT: u64 = 0x5A1E_77B3_0C94_D186;

/// Fills a [`HeightMapLayer`] with octaved Perlin noise normalized to `[0, 1]`.
///
/// Coordinates are normalized by the map dimensions, so the same seed
/// produces the same large-scale shapes at any resolution of the same aspect.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseHeightGenerator {
    /// Base frequency applied to normalized coordinates.
    pub frequency: f64,
    /// Number of noise octaves accumulated per cell.
    pub octaves: u32,
    /// Amplitude falloff between octaves.
    pub persistence: f64,
    /// Frequency gain between octaves.
    pub lacunarity: f64,
}

impl Default for NoiseHeightGenerator {
    fn default() -> Self {
        Self {
            frequency: 4.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl NoiseHeightGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 {
            return Err(Error::InvalidConfig("octaves must be > 0".into()));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(Error::InvalidConfig("frequency must be > 0".into()));
        }

        Ok(())
    }

    fn fbm(&self, noise: &Perlin, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_value = 0.0;

        for _ in 0..self.octaves {
            total += noise.get([x * frequency, y * frequency]) * amplitude;
            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        total / max_value
    }
}

impl MapLayerGenerator for NoiseHeightGenerator {
    fn name(&self) -> &str {
        "height_noise"
    }

    fn add_to_world(&self, map: &mut WorldMapData) -> Result<()> {
        self.validate()?;

        let noise = Perlin::new(seed_for_layer(map.seed, HEIGHT_LAYER_SALT) as u32);
        let mut heights = Vec::with_capacity(map.width as usize * map.height as usize);

        for y in 0..map.height {
            for x in 0..map.width {
                let nx = x as f64 / map.width as f64;
                let ny = y as f64 / map.height as f64;
                let value = self.fbm(&noise, nx, ny);
                heights.push(((value * 0.5 + 0.5).clamp(0.0, 1.0)) as f32);
            }
        }

        debug!("Height layer: {} cells.", heights.len());
        map.push_layer(HeightMapLayer::new(map.width, heights));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_octaves_is_a_configuration_error() {
        let mut map = WorldMapData::new(1, 4, 4);
        let err = NoiseHeightGenerator::new()
            .with_octaves(0)
            .add_to_world(&mut map)
            .expect_err("invalid config");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn heights_cover_every_cell_and_stay_normalized() {
        let mut map = WorldMapData::new(11, 32, 16);
        NoiseHeightGenerator::new()
            .add_to_world(&mut map)
            .expect("generation succeeds");

        let layer = map.get_layer::<HeightMapLayer>().expect("layer present");
        assert_eq!(layer.heights.len(), 32 * 16);
        assert_eq!(layer.width, 32);
        assert!(layer.heights.iter().all(|h| (0.0..=1.0).contains(h)));
    }

    #[test]
    fn same_seed_reproduces_the_same_heights() {
        let run = |seed| {
            let mut map = WorldMapData::new(seed, 16, 16);
            NoiseHeightGenerator::new().add_to_world(&mut map).unwrap();
            map.get_layer::<HeightMapLayer>().unwrap().heights.clone()
        };

        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
