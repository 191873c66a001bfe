/// Fixed-size fire buffer: a flat row-major array of intensity levels.
///
/// Allocated once, zeroed, and mutated in place for the life of the run.
/// Every cell holds a valid palette index; the propagation rule and the
/// intensity mapper are the only writers.
pub struct PixelGrid {
    w: usize,
    h: usize,
    cells: Vec<u8>,
}

impl PixelGrid {
    pub fn new(w: usize, h: usize) -> Self {
        assert!(w > 0 && h > 0, "grid needs at least one cell");
        Self {
            w,
            h,
            cells: vec![0; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(x < self.w && y < self.h, "cell ({x},{y}) out of range");
        y * self.w + x
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, level: u8) {
        let i = self.idx(x, y);
        self.cells[i] = level;
    }

    /// Overwrites the bottom row. The sole injection point for external heat.
    pub fn set_source_row(&mut self, level: u8) {
        for x in 0..self.w {
            self.set(x, self.h - 1, level);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn set_flat(&mut self, i: usize, level: u8) {
        self.cells[i] = level;
    }
}
