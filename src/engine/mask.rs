//! Screen-space exclusion rectangle and zoom state.

pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 5.0;
pub const ZOOM_STEP: f32 = 0.2;

/// Rectangle in screen pixels, as reported by the host's layout query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Exclusion region for the renderer. The rect wraps a DOM region that
/// the canvas's own CSS transform does not move, so cell rectangles
/// must be scaled by the same zoom factor before the overlap test.
/// Absent rect means nothing is masked. The rect may be stale between
/// the host's refresh triggers; that staleness is tolerated.
pub struct Mask {
    rect: Option<ScreenRect>,
    zoom: f32,
}

impl Mask {
    pub fn new() -> Self {
        Self {
            rect: None,
            zoom: ZOOM_MIN,
        }
    }

    pub fn set_rect(&mut self, rect: Option<ScreenRect>) {
        self.rect = rect;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + ZOOM_STEP);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - ZOOM_STEP);
        self.zoom
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.zoom = ZOOM_MIN;
        self.zoom
    }

    /// True when the cell's zoom-scaled screen rectangle overlaps the
    /// exclusion rect. Half-open interval semantics: touching edges do
    /// not overlap.
    pub fn is_masked(&self, col: u32, row: u32, cell_size: u32) -> bool {
        let Some(rect) = self.rect else {
            return false;
        };

        let scale = self.zoom as f64;
        let size = cell_size as f64 * scale;
        let left = (col * cell_size) as f64 * scale;
        let top = (row * cell_size) as f64 * scale;

        left + size > rect.left && left < rect.right && top + size > rect.top && top < rect.bottom
    }
}

impl Default for Mask {
    fn default() -> Self {
        Self::new()
    }
}
