//! Toroidal Conway grid with double-buffered stepping.

use super::random::next_unit;

/// Cell states are single bytes: 0 = dead, 1 = alive. Row-major,
/// `index = row * cols + col`. `cells` is always the readable live
/// generation; `scratch` is write-only during a step and becomes live
/// on the swap.
pub struct LifeGrid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
    scratch: Vec<u8>,
    generation: u64,
}

impl LifeGrid {
    /// Empty 0x0 grid; `initialize` must run before the first `step`.
    pub fn new() -> Self {
        Self {
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            scratch: Vec::new(),
            generation: 0,
        }
    }

    /// Allocate both buffers at cols*rows and seed each cell alive with
    /// probability `density`. Resets the generation counter.
    pub fn initialize(&mut self, cols: usize, rows: usize, density: f32, rng: &mut u32) {
        let density = density.clamp(0.0, 1.0);
        let size = cols * rows;
        self.cols = cols;
        self.rows = rows;
        self.cells.clear();
        self.cells.resize(size, 0);
        self.scratch.clear();
        self.scratch.resize(size, 0);
        self.generation = 0;

        for cell in &mut self.cells {
            if next_unit(rng) < density {
                *cell = 1;
            }
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live cell count. Reporting only, not on the step path.
    pub fn population(&self) -> usize {
        self.cells.iter().map(|&c| c as usize).sum()
    }

    pub fn is_alive(&self, col: usize, row: usize) -> bool {
        self.cells[row * self.cols + col] != 0
    }

    #[cfg(test)]
    pub(crate) fn set_alive(&mut self, col: usize, row: usize) {
        self.cells[row * self.cols + col] = 1;
    }

    #[cfg(test)]
    pub(crate) fn poison_scratch(&mut self, value: u8) {
        self.scratch.fill(value);
    }

    /// Advance one generation under the toroidal B3/S23 rule.
    ///
    /// Full-grid pass into `scratch`, then a buffer swap; the caller
    /// never observes a mid-swap state. No-op on a degenerate grid.
    pub fn step(&mut self) {
        let (cols, rows) = (self.cols, self.rows);
        if cols == 0 || rows == 0 {
            return;
        }

        let cur = &self.cells;
        let next = &mut self.scratch;

        for row in 0..rows {
            let up = (if row == 0 { rows - 1 } else { row - 1 }) * cols;
            let down = (if row + 1 == rows { 0 } else { row + 1 }) * cols;
            let mid = row * cols;

            for col in 0..cols {
                let left = if col == 0 { cols - 1 } else { col - 1 };
                let right = if col + 1 == cols { 0 } else { col + 1 };

                let neighbors = cur[up + left]
                    + cur[up + col]
                    + cur[up + right]
                    + cur[mid + left]
                    + cur[mid + right]
                    + cur[down + left]
                    + cur[down + col]
                    + cur[down + right];

                next[mid + col] = match (cur[mid + col], neighbors) {
                    (1, 2) | (1, 3) => 1, // survives
                    (0, 3) => 1,          // born
                    _ => 0,
                };
            }
        }

        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }
}

impl Default for LifeGrid {
    fn default() -> Self {
        Self::new()
    }
}
