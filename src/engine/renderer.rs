//! Grid painting through a host-provided 2D surface.

use super::grid::LifeGrid;
use super::mask::Mask;
use super::viewport::CELL_SIZE;

/// Painted state reported after each draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub population: usize,
    pub generation: u64,
    pub zoom: f32,
}

/// Minimal 2D drawing surface. The browser implementation is a canvas
/// 2D context; tests record calls.
pub trait Surface {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: &str);
    /// Set the fill color for subsequent `fill_rect` calls.
    fn set_fill(&mut self, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

/// Receives the per-frame stats. The browser implementation writes DOM
/// text nodes and the heartbeat custom property.
pub trait StatsSink {
    fn publish(&mut self, stats: FrameStats);
}

/// Color pair for the backdrop. Plain strings, any encoding the surface
/// accepts; changes apply on the next draw.
pub struct Palette {
    pub live: String,
    pub background: String,
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Update either color; `None` leaves the current value.
    pub fn set_colors(&mut self, live: Option<String>, background: Option<String>) {
        if let Some(live) = live {
            self.palette.live = live;
        }
        if let Some(background) = background {
            self.palette.background = background;
        }
    }

    /// Clear to the background color, paint every alive cell that the
    /// mask does not exclude, then publish stats. The population count
    /// is accumulated during the pass and covers masked cells too.
    pub fn draw(
        &self,
        grid: &LifeGrid,
        mask: &Mask,
        surface: &mut dyn Surface,
        sink: &mut dyn StatsSink,
    ) {
        surface.clear(&self.palette.background);
        surface.set_fill(&self.palette.live);

        let size = CELL_SIZE as f64;
        let mut population = 0usize;

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if !grid.is_alive(col, row) {
                    continue;
                }
                population += 1;
                if mask.is_masked(col as u32, row as u32, CELL_SIZE) {
                    continue;
                }
                surface.fill_rect(col as f64 * size, row as f64 * size, size, size);
            }
        }

        sink.publish(FrameStats {
            population,
            generation: grid.generation(),
            zoom: mask.zoom(),
        });
    }
}
