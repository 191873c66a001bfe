use std::io::{self, Write};

use crossterm::{
    cursor,
    queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
};

use crate::grid::PixelGrid;
use crate::palette::{Palette, Rgb};

/// The rendered frame: one RGB pixel per grid cell, full opacity.
pub struct Raster {
    w: usize,
    h: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            pixels: vec![Rgb::BLACK; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.w + x]
    }
}

/// Looks every cell up in the palette and writes it into the raster.
/// Levels are in palette range by the engine's invariant; a stray one
/// panics rather than rendering garbage.
pub fn render(grid: &PixelGrid, palette: &Palette, raster: &mut Raster) {
    assert_eq!(
        (grid.width(), grid.height()),
        (raster.width(), raster.height()),
        "raster/grid size mismatch"
    );
    for (px, &level) in raster.pixels.iter_mut().zip(grid.as_slice()) {
        *px = palette.color(level);
    }
}

/// Terminal presenter: paints the raster with half-block cells, two pixel
/// rows per terminal row ('▀' carries the top pixel as fg, bottom as bg).
/// Double-buffered so only changed cells are rewritten each frame.
pub struct Screen {
    cols: u16,
    rows: u16,
    prev: Vec<(Rgb, Rgb)>,
    repaint_all: bool,
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        let cols = w as u16;
        let rows = h.div_ceil(2) as u16;
        Self {
            cols,
            rows,
            prev: vec![(Rgb::BLACK, Rgb::BLACK); usize::from(cols) * usize::from(rows)],
            repaint_all: true,
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Forces a full repaint on the next flush (after a resize, say).
    pub fn invalidate(&mut self) {
        self.repaint_all = true;
    }

    pub fn flush<W: Write>(
        &mut self,
        out: &mut W,
        raster: &Raster,
        origin_x: u16,
        origin_y: u16,
    ) -> io::Result<()> {
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = usize::from(col);
                let top = raster.pixel(x, usize::from(row) * 2);
                let bot_y = usize::from(row) * 2 + 1;
                let bot = if bot_y < raster.height() {
                    raster.pixel(x, bot_y)
                } else {
                    Rgb::BLACK
                };

                let i = usize::from(row) * usize::from(self.cols) + x;
                if !self.repaint_all && self.prev[i] == (top, bot) {
                    continue;
                }
                self.prev[i] = (top, bot);

                queue!(out, cursor::MoveTo(origin_x + col, origin_y + row))?;
                if last_fg != Some(top) {
                    queue!(out, SetForegroundColor(top.to_color()))?;
                    last_fg = Some(top);
                }
                if last_bg != Some(bot) {
                    queue!(out, SetBackgroundColor(bot.to_color()))?;
                    last_bg = Some(bot);
                }
                queue!(out, Print('▀'))?;
            }
        }

        self.repaint_all = false;
        Ok(())
    }
}
