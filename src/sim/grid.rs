//! Broad-phase spatial partitioning
//!
//! A uniform grid over the fixed world bounds. Each ball index goes into the
//! cell holding its center; candidate pairs come from each cell and a
//! half-stencil of its neighbours. As long as no ball diameter exceeds the
//! cell edge, every overlapping pair lands in the same or adjacent cells.

use glam::Vec2;

use super::ball::Ball;

/// Neighbour offsets (right, down, down-right, down-left). Together with the
/// row-major scan each adjacent cell pair is visited exactly once.
const HALF_STENCIL: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// Uniform grid of ball indices, rebuilt every step
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major cells of ball indices
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions as (columns, rows)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Empty every cell (keeps allocations)
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Cell coordinates for a world position, None if outside the grid
    pub fn cell_of(&self, pos: Vec2) -> Option<(usize, usize)> {
        let cx = (pos.x / self.cell_size).floor();
        let cy = (pos.y / self.cell_size).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= self.rows as f32 {
            return None;
        }
        Some((cx as usize, cy as usize))
    }

    /// Insert a ball index at its center position.
    ///
    /// Centers outside the grid are dropped; those balls are on their way out
    /// of the world and get no ball-ball contacts.
    pub fn insert(&mut self, index: usize, pos: Vec2) {
        if let Some((cx, cy)) = self.cell_of(pos) {
            self.cells[cy * self.cols + cx].push(index);
        }
    }

    /// Clear and insert every ball by its index in `balls`
    pub fn rebuild(&mut self, balls: &[Ball]) {
        self.clear();
        for (index, ball) in balls.iter().enumerate() {
            self.insert(index, ball.pos);
        }
    }

    /// Number of indices currently stored
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Fill `out` with candidate index pairs.
    ///
    /// Order is row-major by cell: intra-cell pairs first, then pairs with
    /// each half-stencil neighbour. The list is a superset of the true
    /// contacts and contains each unordered pair at most once.
    pub fn candidate_pairs(&self, out: &mut Vec<(usize, usize)>) {
        out.clear();

        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let cell = &self.cells[cy * self.cols + cx];
                if cell.is_empty() {
                    continue;
                }

                for (i, &a) in cell.iter().enumerate() {
                    for &b in &cell[i + 1..] {
                        out.push((a, b));
                    }
                }

                for (dx, dy) in HALF_STENCIL {
                    let nx = cx as isize + dx;
                    let ny = cy as isize + dy;
                    if nx < 0 || nx >= self.cols as isize || ny >= self.rows as isize {
                        continue;
                    }
                    let neighbor = &self.cells[ny as usize * self.cols + nx as usize];
                    for &a in cell {
                        for &b in neighbor {
                            out.push((a, b));
                        }
                    }
                }
            }
        }
    }
}
