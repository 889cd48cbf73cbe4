//! Browser implementations of the engine's host traits, plus the event
//! wiring that keeps the engine fed: frame callbacks, visibility,
//! debounced resize, scroll-driven mask refresh.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::engine::{
    BackdropConfig, BackdropCore, FrameStats, ScreenRect, StatsSink, Surface, TickSource,
};

/// Resize events fire per animation frame while dragging; the viewport
/// recompute only runs once the size has settled.
const RESIZE_DEBOUNCE_MS: i32 = 150;

/// The mask element's layout settles late (fonts, images); re-query its
/// rect after these delays rather than on every layout change.
const MASK_REFRESH_DELAYS_MS: [i32; 2] = [1_000, 3_000];

// === Surface ===

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn set_fill(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }
}

// === Stats sink ===

/// Writes the per-frame stats into the configured text nodes (skipping
/// any that are missing) and bumps the heartbeat custom property on the
/// document root so CSS can observe liveness.
pub struct DomStatsSink {
    population: Option<Element>,
    generation: Option<Element>,
    zoom: Option<Element>,
    root: Option<HtmlElement>,
}

impl DomStatsSink {
    pub fn new(document: &Document, config: &BackdropConfig) -> Self {
        let find = |id: &Option<String>| {
            id.as_deref()
                .and_then(|id| document.get_element_by_id(id))
        };
        Self {
            population: find(&config.population_id),
            generation: find(&config.generation_id),
            zoom: find(&config.zoom_id),
            root: document
                .document_element()
                .and_then(|el| el.dyn_into().ok()),
        }
    }
}

impl StatsSink for DomStatsSink {
    fn publish(&mut self, stats: FrameStats) {
        if let Some(el) = &self.population {
            el.set_text_content(Some(&stats.population.to_string()));
        }
        if let Some(el) = &self.generation {
            el.set_text_content(Some(&stats.generation.to_string()));
        }
        if let Some(el) = &self.zoom {
            el.set_text_content(Some(&format!("{:.1}", stats.zoom)));
        }
        if let Some(root) = &self.root {
            let _ = root
                .style()
                .set_property("--life-heartbeat", &stats.generation.to_string());
        }
    }
}

// === Frame source ===

/// requestAnimationFrame-backed tick source. The frame closure holds a
/// weak core handle: the core owns this tick source, and the cycle must
/// not keep the engine alive after the backdrop is dropped.
pub struct RafTicks {
    window: Window,
    raf_id: Option<i32>,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafTicks {
    pub fn new(window: Window, core: Weak<RefCell<BackdropCore>>) -> Self {
        let callback = Closure::wrap(Box::new(move |now: f64| {
            if let Some(core) = core.upgrade() {
                core.borrow_mut().on_frame(now);
            }
        }) as Box<dyn FnMut(f64)>);

        Self {
            window,
            raf_id: None,
            callback,
        }
    }
}

impl TickSource for RafTicks {
    fn request(&mut self) {
        if let Ok(id) = self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            self.raf_id = Some(id);
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

// === Queries ===

pub fn reduced_motion(window: &Window) -> bool {
    matches!(
        window.match_media("(prefers-reduced-motion: reduce)"),
        Ok(Some(mql)) if mql.matches()
    )
}

/// Size the canvas bitmap to the window and report the new dimensions.
pub fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

/// Re-query the mask element's bounding rect. A missing element clears
/// the rect, which disables masking.
pub fn refresh_mask_rect(document: &Document, mask_id: &str, core: &Rc<RefCell<BackdropCore>>) {
    let rect = document.get_element_by_id(mask_id).map(|el| {
        let r = el.get_bounding_client_rect();
        ScreenRect {
            left: r.left(),
            top: r.top(),
            right: r.right(),
            bottom: r.bottom(),
        }
    });
    core.borrow_mut().set_mask_rect(rect);
}

/// The zoom is a CSS transform on the canvas, scaled from the top-left
/// corner so screen coordinates stay aligned with the mask rect.
pub fn apply_canvas_zoom(canvas: &HtmlCanvasElement, zoom: f32) {
    let style = canvas.style();
    let _ = style.set_property("transform-origin", "0 0");
    let _ = style.set_property("transform", &format!("scale({zoom})"));
}

// === Event wiring ===

/// Keeps the event closures alive for the backdrop's lifetime.
pub struct HostWiring {
    _visibility: Closure<dyn FnMut()>,
    _resize: Closure<dyn FnMut()>,
    _resize_apply: Rc<Closure<dyn FnMut()>>,
    _resize_timer: Rc<Cell<Option<i32>>>,
    _mask_refresh: Option<Rc<Closure<dyn FnMut()>>>,
}

pub fn wire_events(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    core: &Rc<RefCell<BackdropCore>>,
    mask_id: Option<String>,
) -> HostWiring {
    // Hidden tab: suspend all work. Visible again: resume.
    let visibility = {
        let document = document.clone();
        let core = Rc::downgrade(core);
        Closure::wrap(Box::new(move || {
            let Some(core) = core.upgrade() else { return };
            if document.hidden() {
                core.borrow_mut().pause();
            } else {
                core.borrow_mut().play();
            }
        }) as Box<dyn FnMut()>)
    };
    let _ = document
        .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref());

    // Resize, debounced: the raw event only re-arms a timeout, the
    // timeout does the expensive recompute.
    let resize_apply = {
        let window = window.clone();
        let canvas = canvas.clone();
        let core = Rc::downgrade(core);
        Rc::new(Closure::wrap(Box::new(move || {
            let Some(core) = core.upgrade() else { return };
            let (width, height) = fit_canvas(&window, &canvas);
            core.borrow_mut().resize(width, height);
        }) as Box<dyn FnMut()>))
    };
    let resize_timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let resize = {
        let window = window.clone();
        let apply = resize_apply.clone();
        let timer = resize_timer.clone();
        Closure::wrap(Box::new(move || {
            if let Some(id) = timer.take() {
                window.clear_timeout_with_handle(id);
            }
            if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                apply.as_ref().as_ref().unchecked_ref(),
                RESIZE_DEBOUNCE_MS,
            ) {
                timer.set(Some(id));
            }
        }) as Box<dyn FnMut()>)
    };
    let _ = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());

    // Mask rect: queried again after the late-layout delays and on
    // every scroll. Between triggers the rect may go stale.
    let mask_refresh = mask_id.map(|id| {
        let document = document.clone();
        let core = Rc::downgrade(core);
        Rc::new(Closure::wrap(Box::new(move || {
            if let Some(core) = core.upgrade() {
                refresh_mask_rect(&document, &id, &core);
            }
        }) as Box<dyn FnMut()>))
    });
    if let Some(refresh) = &mask_refresh {
        for delay in MASK_REFRESH_DELAYS_MS {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                refresh.as_ref().as_ref().unchecked_ref(),
                delay,
            );
        }
        let _ = window
            .add_event_listener_with_callback("scroll", refresh.as_ref().as_ref().unchecked_ref());
    }

    HostWiring {
        _visibility: visibility,
        _resize: resize,
        _resize_apply: resize_apply,
        _resize_timer: resize_timer,
        _mask_refresh: mask_refresh,
    }
}
