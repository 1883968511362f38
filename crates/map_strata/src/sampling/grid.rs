//! Background acceleration grid for neighbor queries during rejection sampling.
use glam::UVec2;

/// Coarse cell grid holding at most one accepted point per cell.
///
/// Cell size is `radius / sqrt(2)`, so a cell's diagonal is exactly `radius`
/// and two accepted points can never share a cell. The neighborhood scan
/// covers two cells in every direction; one cell is not enough to bound all
/// points closer than `radius` at this cell size.
///
/// Built fresh per sampling run and discarded afterwards.
#[derive(Debug)]
pub(crate) struct AccelGrid {
    cell_size: f32,
    width: usize,
    height: usize,
    cells: Vec<Option<UVec2>>,
}

impl AccelGrid {
    pub fn new(radius: f32, extent: UVec2) -> Self {
        debug_assert!(radius > 0.0);
        let cell_size = radius / std::f32::consts::SQRT_2;
        let width = (extent.x as f32 / cell_size).ceil() as usize + 1;
        let height = (extent.y as f32 / cell_size).ceil() as usize + 1;

        Self {
            cell_size,
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    fn cell_of(&self, point: UVec2) -> (usize, usize) {
        let x = ((point.x as f32 / self.cell_size) as usize).min(self.width - 1);
        let y = ((point.y as f32 / self.cell_size) as usize).min(self.height - 1);
        (x, y)
    }

    pub fn insert(&mut self, point: UVec2) {
        let (gx, gy) = self.cell_of(point);
        let idx = self.cell_index(gx, gy);
        self.cells[idx] = Some(point);
    }

    /// True if any stored point lies strictly closer than the radius implied
    /// by `radius_squared` to `point`.
    pub fn has_neighbor_within(&self, point: UVec2, radius_squared: f32) -> bool {
        let (gx, gy) = self.cell_of(point);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.width);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                if let Some(existing) = self.cells[self.cell_index(x, y)] {
                    let dx = point.x as f32 - existing.x as f32;
                    let dy = point.y as f32 - existing.y as f32;
                    if dx * dx + dy * dy < radius_squared {
                        return true;
                    }
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions_cover_the_extent() {
        let grid = AccelGrid::new(2.0, UVec2::new(10, 6));
        let cell_size = 2.0 / std::f32::consts::SQRT_2;
        assert_eq!(grid.width, (10.0 / cell_size).ceil() as usize + 1);
        assert_eq!(grid.height, (6.0 / cell_size).ceil() as usize + 1);
    }

    #[test]
    fn neighbor_query_rejects_close_points() {
        let mut grid = AccelGrid::new(4.0, UVec2::new(32, 32));
        grid.insert(UVec2::new(10, 10));

        assert!(grid.has_neighbor_within(UVec2::new(12, 10), 16.0));
        assert!(grid.has_neighbor_within(UVec2::new(10, 10), 16.0));
        assert!(!grid.has_neighbor_within(UVec2::new(16, 10), 16.0));
    }

    #[test]
    fn neighbor_query_sees_points_two_cells_away() {
        // Cell size is radius / sqrt(2) (~2.83 here), so x = 31 and x = 34
        // land two cells apart while only 3.0 < radius apart.
        let radius = 4.0_f32;
        let mut grid = AccelGrid::new(radius, UVec2::new(64, 64));
        grid.insert(UVec2::new(31, 20));

        assert!(grid.has_neighbor_within(UVec2::new(34, 20), radius * radius));
    }

    #[test]
    fn points_at_the_domain_edge_stay_in_bounds() {
        let mut grid = AccelGrid::new(1.5, UVec2::new(9, 9));
        grid.insert(UVec2::new(8, 8));
        assert!(grid.has_neighbor_within(UVec2::new(8, 8), 2.25));
    }
}
