//! Public control surface exported to the embedding page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::{BackdropConfig, BackdropCore, NullTicks, RunState};

use super::browser::{self, CanvasSurface, DomStatsSink, HostWiring, RafTicks};

#[wasm_bindgen]
pub struct Backdrop {
    core: Rc<RefCell<BackdropCore>>,
    canvas: HtmlCanvasElement,
    _wiring: HostWiring,
}

/// Locate the canvas, build the engine, wire the browser events and
/// start the frame loop.
///
/// A decorative feature must never break the page: any missing
/// prerequisite (reduced motion active, no window/document, canvas or
/// 2d context unavailable) returns `None` without side effects, and
/// malformed config JSON falls back to the defaults with a console
/// warning.
#[wasm_bindgen(js_name = mountBackdrop)]
pub fn mount_backdrop(config_json: Option<String>) -> Option<Backdrop> {
    let config = match config_json.as_deref() {
        Some(json) => BackdropConfig::from_json(json).unwrap_or_else(|err| {
            web_sys::console::warn_1(&err.into());
            BackdropConfig::default()
        }),
        None => BackdropConfig::default(),
    };

    let window = web_sys::window()?;
    if browser::reduced_motion(&window) {
        return None;
    }
    let document = window.document()?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&config.canvas_id)?
        .dyn_into()
        .ok()?;
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

    let surface = CanvasSurface::new(canvas.clone(), ctx);
    let sink = DomStatsSink::new(&document, &config);

    let core = Rc::new(RefCell::new(BackdropCore::new(
        &config,
        Box::new(surface),
        Box::new(sink),
        Box::new(NullTicks),
    )));
    core.borrow_mut()
        .install_ticks(Box::new(RafTicks::new(window.clone(), Rc::downgrade(&core))));

    // First layout: size the bitmap, seed the grid, paint.
    let (width, height) = browser::fit_canvas(&window, &canvas);
    core.borrow_mut().resize(width, height);
    browser::apply_canvas_zoom(&canvas, core.borrow().zoom());

    if let Some(mask_id) = config.mask_id.as_deref() {
        browser::refresh_mask_rect(&document, mask_id, &core);
    }
    let wiring = browser::wire_events(&window, &document, &canvas, &core, config.mask_id.clone());

    // Enter Running with exactly one callback in flight.
    core.borrow_mut().play();

    Some(Backdrop {
        core,
        canvas,
        _wiring: wiring,
    })
}

#[wasm_bindgen]
impl Backdrop {
    /// Clamped to [1, 60].
    #[wasm_bindgen(js_name = setFPS)]
    pub fn set_fps(&self, fps: u32) {
        self.core.borrow_mut().set_fps(fps);
    }

    pub fn pause(&self) {
        self.core.borrow_mut().pause();
    }

    pub fn play(&self) {
        self.core.borrow_mut().play();
    }

    /// Force Running and schedule a callback unconditionally.
    #[wasm_bindgen(js_name = forceStart)]
    pub fn force_start(&self) {
        self.core.borrow_mut().force_start();
    }

    /// Re-randomize at the current dimensions and resume play.
    pub fn reseed(&self) {
        self.core.borrow_mut().reseed();
    }

    /// Update live/dead colors; either may be omitted. Redraws
    /// immediately.
    #[wasm_bindgen(js_name = setColors)]
    pub fn set_colors(&self, live: Option<String>, dead: Option<String>) {
        self.core.borrow_mut().set_colors(live, dead);
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&self) {
        let zoom = self.core.borrow_mut().zoom_in();
        browser::apply_canvas_zoom(&self.canvas, zoom);
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&self) {
        let zoom = self.core.borrow_mut().zoom_out();
        browser::apply_canvas_zoom(&self.canvas, zoom);
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&self) {
        let zoom = self.core.borrow_mut().reset_zoom();
        browser::apply_canvas_zoom(&self.canvas, zoom);
    }

    /// One step + draw without touching the run state.
    #[wasm_bindgen(js_name = stepOnce)]
    pub fn step_once(&self) {
        self.core.borrow_mut().step_once();
    }

    #[wasm_bindgen(getter)]
    pub fn population(&self) -> usize {
        self.core.borrow().population()
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.core.borrow().generation()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f32 {
        self.core.borrow().zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn fps(&self) -> u32 {
        self.core.borrow().target_fps()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.core.borrow().run_state() == RunState::Running
    }
}
