// grid.rs - Flat toroidal grid geometry for Conway's Game of Life

use crate::error::ConfigError;

/// Dimensions of the cell grid. Cells live in a flat row-major buffer,
/// indexed by `i = y * width + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    width: usize,
    height: usize,
    size: usize,
}

impl GridSize {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        let size = width
            .checked_mul(height)
            .ok_or(ConfigError::GridTooLarge { width, height })?;
        Ok(Self { width, height, size })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Total number of cells, `width * height`.
    pub fn size(&self) -> usize { self.size }

    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) outside grid");
        y * self.width + x
    }

    pub fn coords(&self, i: usize) -> (usize, usize) {
        (i % self.width, i / self.width)
    }

    /// Wrapped neighbour offsets for the cell at `(x, y)`.
    ///
    /// Edge cells get an offset that jumps to the opposite edge instead of
    /// stepping off the grid, so every neighbour is reached by plain index
    /// arithmetic on the flat buffer.
    pub fn offsets(&self, x: usize, y: usize) -> Offsets {
        let w = self.width as isize;
        let size = self.size as isize;
        Offsets {
            left:   if x > 0 { -1 } else { w - 1 },
            right:  if x < self.width - 1 { 1 } else { -(w - 1) },
            top:    if y > 0 { -w } else { size - w },
            bottom: if y < self.height - 1 { w } else { -(size - w) },
        }
    }

    /// Indices of the 8 neighbours of cell `i` at `(x, y)`, in the order
    /// top-left, top, top-right, left, right, bottom-left, bottom, bottom-right.
    pub fn neighbor_indices(&self, i: usize, x: usize, y: usize) -> [usize; 8] {
        let o = self.offsets(x, y);
        let at = |ofs: isize| i.wrapping_add_signed(ofs);
        [
            at(o.top + o.left),    at(o.top),    at(o.top + o.right),
            at(o.left),                          at(o.right),
            at(o.bottom + o.left), at(o.bottom), at(o.bottom + o.right),
        ]
    }
}

/// Signed flat-buffer offsets to the horizontal and vertical neighbours of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    pub left: isize,
    pub right: isize,
    pub top: isize,
    pub bottom: isize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(GridSize::new(0, 4), Err(ConfigError::ZeroWidth));
        assert_eq!(GridSize::new(4, 0), Err(ConfigError::ZeroHeight));
        assert!(matches!(GridSize::new(usize::MAX, 2), Err(ConfigError::GridTooLarge { .. })));
    }

    #[test]
    fn interior_offsets_step_by_one() {
        let grid = GridSize::new(5, 4).unwrap();
        assert_eq!(grid.offsets(2, 2), Offsets { left: -1, right: 1, top: -5, bottom: 5 });
    }

    #[test]
    fn edge_offsets_wrap_to_opposite_side() {
        let grid = GridSize::new(5, 4).unwrap();
        assert_eq!(grid.offsets(0, 0), Offsets { left: 4, right: 1, top: 15, bottom: 5 });
        assert_eq!(grid.offsets(4, 3), Offsets { left: -1, right: -4, top: -5, bottom: -15 });
    }

    #[test]
    fn corner_cell_has_its_eight_toroidal_neighbours() {
        let grid = GridSize::new(4, 4).unwrap();
        let mut got = grid.neighbor_indices(0, 0, 0).map(|i| grid.coords(i));
        got.sort();
        let mut want = [(3, 3), (3, 0), (0, 3), (1, 0), (0, 1), (1, 1), (3, 1), (1, 3)];
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn neighbour_indices_stay_in_range() {
        for width in 1..=9 {
            for height in 1..=9 {
                let grid = GridSize::new(width, height).unwrap();
                for i in 0..grid.size() {
                    let (x, y) = grid.coords(i);
                    assert_eq!(grid.index(x, y), i);
                    for n in grid.neighbor_indices(i, x, y) {
                        assert!(n < grid.size(), "{width}x{height} cell {i} -> {n}");
                    }
                }
            }
        }
    }
}
