//! Backdrop core - the host-agnostic simulation engine.
//!
//! `BackdropCore` only orchestrates; the work lives in the sibling
//! modules. The canvas, the frame callback primitive and the stats
//! display are trait objects injected at construction, so the whole
//! engine runs deterministically under native tests.

mod config;
mod grid;
mod mask;
mod random;
mod renderer;
mod scheduler;
mod viewport;

pub use config::BackdropConfig;
pub use grid::LifeGrid;
pub use mask::{Mask, ScreenRect, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
pub use renderer::{FrameStats, Palette, Renderer, StatsSink, Surface};
pub use scheduler::{Frame, NullTicks, RunState, Scheduler, TickSource, MAX_FPS, MIN_FPS};
pub use viewport::{Viewport, CELL_SIZE, WARMUP_STEPS};

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

/// The backdrop engine: grid + viewport + mask + renderer + scheduler,
/// mutated only through the operations below. All inputs are clamped or
/// ignored; no operation reports an error.
pub struct BackdropCore {
    grid: LifeGrid,
    viewport: Viewport,
    mask: Mask,
    renderer: Renderer,
    scheduler: Scheduler,

    // Settings
    density: f32,

    // State
    rng_state: u32,

    // Host hooks
    surface: Box<dyn Surface>,
    sink: Box<dyn StatsSink>,
    ticks: Box<dyn TickSource>,
}

impl BackdropCore {
    pub fn new(
        config: &BackdropConfig,
        surface: Box<dyn Surface>,
        sink: Box<dyn StatsSink>,
        ticks: Box<dyn TickSource>,
    ) -> Self {
        Self {
            grid: LifeGrid::new(),
            viewport: Viewport::new(),
            mask: Mask::new(),
            renderer: Renderer::new(Palette {
                live: config.live_color.clone(),
                background: config.background_color.clone(),
            }),
            scheduler: Scheduler::new(config.target_fps),
            density: config.density.clamp(0.0, 1.0),
            rng_state: 12345,
            surface,
            sink,
            ticks,
        }
    }

    /// Swap in the real host frame source. The browser hook can only be
    /// built once the core is behind a shared handle, so construction
    /// starts with `NullTicks`.
    pub fn install_ticks(&mut self, ticks: Box<dyn TickSource>) {
        self.ticks = ticks;
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn zoom(&self) -> f32 {
        self.mask.zoom()
    }

    pub fn target_fps(&self) -> u32 {
        self.scheduler.target_fps()
    }

    pub fn run_state(&self) -> RunState {
        self.scheduler.state()
    }

    /// Debounced-resize entry point. Re-derives the grid dimensions and,
    /// when they changed, re-seeds at the current density, warms the
    /// field up and draws immediately. Identical dimensions are a no-op.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        if self.viewport.recompute(width_px, height_px) {
            self.reseed_grid();
            self.draw();
        }
    }

    /// Re-randomize at the current dimensions, warm up, draw, and
    /// resume play.
    pub fn reseed(&mut self) {
        self.reseed_grid();
        self.draw();
        self.play();
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.scheduler.set_target_fps(fps);
    }

    /// Update palette colors and repaint right away so the change is
    /// visible while paused too.
    pub fn set_colors(&mut self, live: Option<String>, background: Option<String>) {
        self.renderer.set_colors(live, background);
        self.draw();
    }

    pub fn set_mask_rect(&mut self, rect: Option<ScreenRect>) {
        self.mask.set_rect(rect);
    }

    /// Returns the new zoom so the host can reapply its visual
    /// transform. The next scheduled frame picks the value up.
    pub fn zoom_in(&mut self) -> f32 {
        self.mask.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.mask.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.mask.reset_zoom()
    }

    pub fn play(&mut self) {
        if self.scheduler.play() {
            self.ticks.request();
        }
    }

    pub fn pause(&mut self) {
        if self.scheduler.pause() {
            self.ticks.cancel();
        }
    }

    /// Force Running and request a callback unconditionally.
    pub fn force_start(&mut self) {
        self.scheduler.force();
        self.ticks.request();
    }

    /// One step + draw regardless of run state; the scheduler is left
    /// untouched.
    pub fn step_once(&mut self) {
        self.grid.step();
        self.draw();
    }

    /// Frame callback entry point; `now_ms` is the host's frame
    /// timestamp. The step fully completes before the draw reads the
    /// grid.
    pub fn on_frame(&mut self, now_ms: f64) {
        match self.scheduler.on_frame(now_ms) {
            Frame::Halt => {}
            Frame::Wait => self.ticks.request(),
            Frame::Step => {
                self.grid.step();
                self.draw();
                self.ticks.request();
            }
        }
    }

    fn reseed_grid(&mut self) {
        self.grid.initialize(
            self.viewport.cols() as usize,
            self.viewport.rows() as usize,
            self.density,
            &mut self.rng_state,
        );
        for _ in 0..WARMUP_STEPS {
            self.grid.step();
        }
    }

    fn draw(&mut self) {
        self.renderer.draw(
            &self.grid,
            &self.mask,
            self.surface.as_mut(),
            self.sink.as_mut(),
        );
    }
}
