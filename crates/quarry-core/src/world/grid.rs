//! Pixel <-> grid cell conversion

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Geometry of the block grid. Pixel space has y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Width in cells
    pub width: i32,
    /// Height in cells
    pub height: i32,
    /// Side length of one cell in pixels
    pub cell_expanse: f32,
}

impl GridGeometry {
    pub fn new(width: i32, height: i32, cell_expanse: f32) -> Self {
        Self {
            width,
            height,
            cell_expanse,
        }
    }

    /// Cell containing a pixel position
    pub fn xy_to_grid(&self, position: Vec2) -> IVec2 {
        (position / self.cell_expanse).floor().as_ivec2()
    }

    /// Pixel position of a cell's centre
    pub fn grid_to_xy_centre(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_expanse
    }

    /// Snap a pixel position to the centre of its cell
    pub fn snap(&self, position: Vec2) -> Vec2 {
        self.grid_to_xy_centre(self.xy_to_grid(position))
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// World size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.cell_expanse
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(32, 16, 32.0)
    }
}

/// True if two points are no further apart than `range` pixels
pub fn positions_in_range(a: Vec2, b: Vec2, range: f32) -> bool {
    a.distance_squared(b) <= range * range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_to_grid() {
        let grid = GridGeometry::default();
        assert_eq!(grid.xy_to_grid(Vec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(grid.xy_to_grid(Vec2::new(31.9, 32.0)), IVec2::new(0, 1));
        assert_eq!(grid.xy_to_grid(Vec2::new(-1.0, 5.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_centre_round_trip() {
        let grid = GridGeometry::default();
        let centre = grid.grid_to_xy_centre(IVec2::new(3, 8));
        assert_eq!(centre, Vec2::new(112.0, 272.0));
        assert_eq!(grid.xy_to_grid(centre), IVec2::new(3, 8));
        assert_eq!(grid.snap(Vec2::new(100.0, 260.0)), centre);
    }

    #[test]
    fn test_contains_and_size() {
        let grid = GridGeometry::default();
        assert!(grid.contains(IVec2::new(31, 15)));
        assert!(!grid.contains(IVec2::new(32, 0)));
        assert!(!grid.contains(IVec2::new(0, -1)));
        assert_eq!(grid.pixel_size(), Vec2::new(1024.0, 512.0));
    }

    #[test]
    fn test_range_is_inclusive() {
        let a = Vec2::new(0.0, 0.0);
        assert!(positions_in_range(a, Vec2::new(64.0, 0.0), 64.0));
        assert!(!positions_in_range(a, Vec2::new(64.0, 0.1), 64.0));
    }
}
