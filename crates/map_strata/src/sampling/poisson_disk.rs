//! Poisson disk sampling over an integer grid domain.
use std::f32::consts::PI;

use glam::{UVec2, Vec2};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::sampling::grid::AccelGrid;
use crate::sampling::rand01;

/// Default candidate attempts per active point.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Poisson disk sampling configuration.
///
/// Produces integer grid points inside `[0, width) x [0, height)` whose
/// pairwise Euclidean distance is at least `radius`. Candidates are drawn in
/// continuous space and truncated to their grid cell before any check runs,
/// so the distance guarantee and the acceptance predicate both operate on
/// whole cells and duplicate points cannot occur.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in grid cells.
    pub radius: f32,
    /// Candidate attempts per active point before it is retired.
    pub max_attempts: u32,
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with the specified radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the candidate attempt cap per active point.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validates the configuration against a domain, returning an error if invalid.
    pub fn validate(&self, extent: UVec2) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig("radius must be > 0".into()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        if extent.x == 0 || extent.y == 0 {
            return Err(Error::InvalidConfig(
                "extent must be > 0 in both components".into(),
            ));
        }

        Ok(())
    }

    /// Sample the whole domain without a predicate.
    pub fn generate(&self, extent: UVec2, rng: &mut dyn RngCore) -> Result<Vec<UVec2>> {
        self.generate_where(extent, rng, |_| true)
    }

    /// Sample the domain, keeping only points for which `accept` returns true.
    ///
    /// The predicate receives truncated integer coordinates. An empty result
    /// is a legitimate outcome when the predicate rejects most or all of the
    /// domain; the attempt caps guarantee termination either way.
    pub fn generate_where<F>(
        &self,
        extent: UVec2,
        rng: &mut dyn RngCore,
        accept: F,
    ) -> Result<Vec<UVec2>>
    where
        F: FnMut(UVec2) -> bool,
    {
        self.validate(extent)?;

        let mut sampler = PoissonDiskSampler::new(self.radius, self.max_attempts, extent, accept);
        Ok(sampler.generate(rng))
    }
}

struct PoissonDiskSampler<F> {
    radius: f32,
    radius_squared: f32,
    max_attempts: u32,
    extent: Vec2,
    grid: AccelGrid,
    active: Vec<UVec2>,
    accept: F,
}

impl<F: FnMut(UVec2) -> bool> PoissonDiskSampler<F> {
    fn new(radius: f32, max_attempts: u32, extent: UVec2, accept: F) -> Self {
        Self {
            radius,
            radius_squared: radius * radius,
            max_attempts,
            extent: Vec2::new(extent.x as f32, extent.y as f32),
            grid: AccelGrid::new(radius, extent),
            active: Vec::new(),
            accept,
        }
    }

    /// Truncate a continuous candidate to its grid cell, or None when it
    /// falls outside the domain.
    #[inline]
    fn truncate_to_cell(&self, candidate: Vec2) -> Option<UVec2> {
        let x = candidate.x.floor();
        let y = candidate.y.floor();
        if x < 0.0 || y < 0.0 || x >= self.extent.x || y >= self.extent.y {
            return None;
        }
        Some(UVec2::new(x as u32, y as u32))
    }

    /// Run a candidate through bounds, neighborhood, and predicate checks.
    fn try_accept(&mut self, candidate: Vec2) -> Option<UVec2> {
        let point = self.truncate_to_cell(candidate)?;
        if self.grid.has_neighbor_within(point, self.radius_squared) {
            return None;
        }
        if !(self.accept)(point) {
            return None;
        }
        Some(point)
    }

    /// Draw random starting points until one passes the predicate, bounded by
    /// the same attempt cap used per active point.
    fn initial_point(&mut self, rng: &mut dyn RngCore) -> Option<UVec2> {
        for _ in 0..self.max_attempts {
            let candidate = Vec2::new(
                rand01(rng) * self.extent.x,
                rand01(rng) * self.extent.y,
            );
            if let Some(point) = self.try_accept(candidate) {
                return Some(point);
            }
        }

        None
    }

    fn spawn_around(&mut self, rng: &mut dyn RngCore, parent: UVec2) -> Option<UVec2> {
        for _ in 0..self.max_attempts {
            let angle = rand01(rng) * 2.0 * PI;
            let distance = self.radius + rand01(rng) * self.radius;

            let candidate = Vec2::new(
                parent.x as f32 + angle.cos() * distance,
                parent.y as f32 + angle.sin() * distance,
            );

            if let Some(point) = self.try_accept(candidate) {
                return Some(point);
            }
        }

        None
    }

    fn accept_point(&mut self, point: UVec2) {
        self.grid.insert(point);
        self.active.push(point);
    }

    fn generate(&mut self, rng: &mut dyn RngCore) -> Vec<UVec2> {
        let Some(initial) = self.initial_point(rng) else {
            return Vec::new();
        };
        self.accept_point(initial);

        let mut points = vec![initial];

        while !self.active.is_empty() {
            // rand01 may round up to exactly 1.0, hence the clamp.
            let pick = ((rand01(rng) * self.active.len() as f32) as usize)
                .min(self.active.len() - 1);
            let parent = self.active[pick];

            match self.spawn_around(rng, parent) {
                Some(point) => {
                    self.accept_point(point);
                    points.push(point);
                }
                None => {
                    // Exhausted parents are retired permanently.
                    self.active.swap_remove(pick);
                }
            }
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn pairwise_min_distance(points: &[UVec2]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let a = Vec2::new(points[i].x as f32, points[i].y as f32);
                let b = Vec2::new(points[j].x as f32, points[j].y as f32);
                let dist = (a - b).length();
                if dist < min {
                    min = dist;
                }
            }
        }
        min
    }

    #[test]
    fn invalid_parameters_are_rejected_up_front() {
        let mut rng = StdRng::seed_from_u64(1);

        let zero_radius = PoissonDiskSampling::new(0.0);
        assert!(matches!(
            zero_radius.generate(UVec2::new(10, 10), &mut rng),
            Err(Error::InvalidConfig(_))
        ));

        let nan_radius = PoissonDiskSampling::new(f32::NAN);
        assert!(nan_radius.generate(UVec2::new(10, 10), &mut rng).is_err());

        let zero_attempts = PoissonDiskSampling::new(2.0).with_max_attempts(0);
        assert!(zero_attempts.generate(UVec2::new(10, 10), &mut rng).is_err());

        let empty_domain = PoissonDiskSampling::new(2.0);
        assert!(empty_domain.generate(UVec2::new(0, 10), &mut rng).is_err());
        assert!(empty_domain.generate(UVec2::new(10, 0), &mut rng).is_err());
    }

    #[test]
    fn generated_points_respect_bounds_and_radius() {
        for seed in [3_u64, 17, 99, 1234] {
            let mut rng = StdRng::seed_from_u64(seed);
            let sampling = PoissonDiskSampling::new(4.0);
            let points = sampling
                .generate(UVec2::new(64, 48), &mut rng)
                .expect("valid config");

            assert!(!points.is_empty());
            for p in &points {
                assert!(p.x < 64);
                assert!(p.y < 48);
            }
            if points.len() > 1 {
                assert!(
                    pairwise_min_distance(&points) >= 4.0,
                    "seed {seed} violated the minimum distance"
                );
            }
        }
    }

    #[test]
    fn result_contains_no_duplicate_points() {
        let mut rng = StdRng::seed_from_u64(5);
        let sampling = PoissonDiskSampling::new(1.5);
        let points = sampling
            .generate(UVec2::new(40, 40), &mut rng)
            .expect("valid config");

        let unique: HashSet<_> = points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(unique.len(), points.len());
    }

    #[test]
    fn identical_seeds_reproduce_identical_sequences() {
        let sampling = PoissonDiskSampling::new(3.0);

        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let pa = sampling.generate(UVec2::new(50, 50), &mut rng_a).unwrap();
        let pb = sampling.generate(UVec2::new(50, 50), &mut rng_b).unwrap();
        assert_eq!(pa, pb);

        let mut rng_c = StdRng::seed_from_u64(456);
        let pc = sampling.generate(UVec2::new(50, 50), &mut rng_c).unwrap();
        assert_ne!(pa, pc);
    }

    #[test]
    fn predicate_is_respected_by_every_point() {
        let mut rng = StdRng::seed_from_u64(21);
        let sampling = PoissonDiskSampling::new(2.0);
        let points = sampling
            .generate_where(UVec2::new(40, 40), &mut rng, |p| p.x < 20)
            .expect("valid config");

        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.x < 20));
    }

    #[test]
    fn all_rejecting_predicate_yields_empty_result() {
        let mut rng = StdRng::seed_from_u64(8);
        let sampling = PoissonDiskSampling::new(2.0);
        let points = sampling
            .generate_where(UVec2::new(30, 30), &mut rng, |_| false)
            .expect("valid config");

        assert!(points.is_empty());
    }

    #[test]
    fn radius_larger_than_domain_yields_a_single_point() {
        let mut rng = StdRng::seed_from_u64(2);
        let sampling = PoissonDiskSampling::new(100.0);
        let points = sampling
            .generate(UVec2::new(10, 10), &mut rng)
            .expect("valid config");

        assert_eq!(points.len(), 1);
    }
}
