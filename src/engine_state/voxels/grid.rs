//! # Voxel Grid
//!
//! Dense 3D voxel storage and the column-based terrain fill algorithm.
//!
//! The grid maps every integer coordinate in
//! `[0,size_x) x [0,size_y) x [0,size_z)` to exactly one voxel code. Codes
//! are stored flat in x-major order (`x + size_x * (y + size_y * z)`), which
//! is also the order the raymarching shader indexes the uploaded storage
//! buffer with.

use num_derive::FromPrimitive;

/// Enumerates the voxel codes stored in the grid.
///
/// Code 0 is empty space and code 1 is solid stone; the code space is
/// extensible, and the `FromPrimitive` derive allows converting raw grid
/// values back into the rich enum type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum VoxelCode {
    /// Empty space the ray passes through.
    Empty,

    /// Solid stone terrain.
    Stone,
}

impl VoxelCode {
    /// Converts a raw voxel code into a `VoxelCode`.
    ///
    /// # Arguments
    /// * `code` - The raw code as stored in the grid
    ///
    /// # Returns
    /// The corresponding `VoxelCode`, or `None` for codes outside the
    /// known code space.
    pub fn from_code(code: u32) -> Option<Self> {
        num::FromPrimitive::from_u32(code)
    }
}

/// A dense 3D grid of voxel codes.
///
/// Generated once at startup by the world generator and uploaded verbatim
/// into a GPU storage buffer. The host copy is consumed by the upload and
/// never re-read.
pub struct VoxelGrid {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    codes: Vec<u32>,
}

impl VoxelGrid {
    /// Fills a grid column-by-column from a terrain height sampler.
    ///
    /// For each `(x, z)` column the sampler yields a continuous height value
    /// `h` in roughly `[-1, 1]`, which is mapped to an integer terrain
    /// height `H = (size_y - sea_level) * h`. A cell is solid when
    /// `y < sea_level + H`; afterwards any cell with `y < sea_level` is
    /// forced solid regardless of the terrain test, guaranteeing a filled
    /// base even where the terrain height is negative. The overwrite order
    /// (terrain test first, unconditional sea-level fill second) is part of
    /// the contract.
    ///
    /// # Arguments
    /// * `dimensions` - Grid extents `(size_x, size_y, size_z)`
    /// * `sea_level` - Height below which cells are unconditionally solid
    /// * `height_sampler` - Maps a column `(x, z)` to a continuous height
    ///
    /// # Returns
    /// A fully populated grid; this is a total function over valid
    /// dimensions with no error conditions.
    pub fn generate_with(
        dimensions: (usize, usize, usize),
        sea_level: i32,
        height_sampler: impl Fn(f64, f64) -> f64,
    ) -> Self {
        let (size_x, size_y, size_z) = dimensions;
        let mut codes = vec![VoxelCode::Empty as u32; size_x * size_y * size_z];

        for x in 0..size_x {
            for z in 0..size_z {
                let h = height_sampler(x as f64, z as f64);
                let terrain_height = ((size_y as i32 - sea_level) as f64 * h) as i32;

                for y in 0..size_y {
                    let idx = x + size_x * (y + size_y * z);
                    if (y as i32) < sea_level + terrain_height {
                        codes[idx] = VoxelCode::Stone as u32;
                    } else {
                        codes[idx] = VoxelCode::Empty as u32;
                    }

                    if (y as i32) < sea_level {
                        codes[idx] = VoxelCode::Stone as u32;
                    }
                }
            }
        }

        Self {
            size_x,
            size_y,
            size_z,
            codes,
        }
    }

    /// Gets the raw voxel code at the given coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds; indices outside the
    /// grid are never constructed by callers.
    pub fn get(&self, x: usize, y: usize, z: usize) -> u32 {
        debug_assert!(x < self.size_x && y < self.size_y && z < self.size_z);
        self.codes[x + self.size_x * (y + self.size_y * z)]
    }

    /// Checks whether the cell at the given coordinates is solid.
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.get(x, y, z) != VoxelCode::Empty as u32
    }

    /// The flat code sequence in upload order.
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Grid extents as `(size_x, size_y, size_z)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    /// Total number of cells in the grid.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the grid has zero cells.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_zero_noise_fills_exactly_to_sea_level() {
        let grid = VoxelGrid::generate_with((4, 4, 4), 2, |_, _| 0.0);

        for x in 0..4 {
            for z in 0..4 {
                assert!(grid.is_solid(x, 0, z));
                assert!(grid.is_solid(x, 1, z));
                assert!(!grid.is_solid(x, 2, z));
                assert!(!grid.is_solid(x, 3, z));
            }
        }
    }

    #[test]
    fn cells_below_sea_level_are_solid_even_for_deeply_negative_terrain() {
        // Height -1 drives the terrain test to carve the whole column; the
        // unconditional fill must still win below sea level.
        let grid = VoxelGrid::generate_with((8, 16, 8), 5, |_, _| -1.0);

        for x in 0..8 {
            for z in 0..8 {
                for y in 0..5 {
                    assert!(
                        grid.is_solid(x, y, z),
                        "cell ({x},{y},{z}) below sea level must be solid"
                    );
                }
                for y in 5..16 {
                    assert!(!grid.is_solid(x, y, z));
                }
            }
        }
    }

    #[test]
    fn solid_to_empty_transition_sits_at_terrain_height() {
        let sea_level = 4;
        let size_y = 16usize;
        let sampler = |x: f64, _z: f64| (x / 10.0).min(0.8);
        let grid = VoxelGrid::generate_with((8, size_y, 4), sea_level, sampler);

        for x in 0..8 {
            for z in 0..4 {
                let h = sampler(x as f64, z as f64);
                let terrain_height = ((size_y as i32 - sea_level) as f64 * h) as i32;
                let surface = (sea_level + terrain_height).max(sea_level) as usize;

                for y in 0..surface.min(size_y) {
                    assert!(grid.is_solid(x, y, z), "below surface at ({x},{y},{z})");
                }
                for y in surface..size_y {
                    assert!(!grid.is_solid(x, y, z), "at/above surface at ({x},{y},{z})");
                }
            }
        }
    }

    #[test]
    fn every_cell_holds_a_known_code() {
        let grid = VoxelGrid::generate_with((6, 8, 6), 3, |x, z| ((x + z) * 0.1).sin());

        assert_eq!(grid.len(), 6 * 8 * 6);
        for &code in grid.codes() {
            assert!(VoxelCode::from_code(code).is_some());
        }
    }

    #[test]
    fn voxel_codes_round_trip_through_raw_values() {
        assert_eq!(VoxelCode::from_code(0), Some(VoxelCode::Empty));
        assert_eq!(VoxelCode::from_code(1), Some(VoxelCode::Stone));
        assert_eq!(VoxelCode::from_code(17), None);
    }
}
