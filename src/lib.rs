use wasm_bindgen::prelude::*;

// ============================================================================
// PAINT SPLATTER - Falling, fading paint particles driven by pointer input
// or an autonomous wandering brush
// ============================================================================

pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod picker;
pub mod scheduler;
pub mod sim;
pub mod surface;

pub use color::{Rgb, fade_toward_white, spectrum_value};
pub use config::SimConfig;
pub use error::{Error, Result};
pub use input::{EventKind, GestureSink, InputAdapter, InputOptions, Layout, Movement, Point, PointerEvent};
pub use picker::ColorPicker;
pub use scheduler::FrameScheduler;
pub use sim::World;
pub use surface::{PixelSurface, Surface};

use tracing::info;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Browser-facing handle. JS forwards requestAnimationFrame timestamps,
/// pointer events and settings; it blits `output_ptr`/`picker_ptr` into the
/// two canvases after each frame.
#[wasm_bindgen]
pub struct Splatter {
    world: World<PixelSurface>,
    input: InputAdapter,
    scheduler: FrameScheduler,
}

#[wasm_bindgen]
impl Splatter {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Self {
        let mut input = InputAdapter::new(
            InputOptions { cancel_on_leave: true, auto_track: true },
            Layout::unscaled(w, h),
        );
        input.start();

        let mut world = World::new(PixelSurface::new(w, h), SimConfig::default(), seed());
        world.picker_mut().enable();

        info!(w, h, "splatter created");
        Self {
            world,
            input,
            scheduler: FrameScheduler::new(),
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.scheduler.start(now_ms);
    }

    pub fn pause(&mut self, now_ms: f64) {
        self.scheduler.pause(now_ms);
    }

    pub fn resume(&mut self, now_ms: f64) {
        self.scheduler.resume(now_ms);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Run one frame. Returns false when the scheduler is not running.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        match self.scheduler.tick(now_ms) {
            Some(elapsed) => {
                self.world.frame((elapsed / 1000.0) as f32);
                true
            }
            None => false,
        }
    }

    /// The new logical size matches the displayed size, so the pointer
    /// scale returns to 1 until the next `set_layout`.
    pub fn resize(&mut self, w: u32, h: u32) {
        self.world.resize(w, h);
        let l = *self.input.layout();
        self.input.set_layout(Layout {
            display_width: w as f32,
            width: w,
            height: h,
            ..l
        });
    }

    /// Page placement of the main canvas (bounding rect and CSS width)
    pub fn set_layout(&mut self, left: f32, top: f32, display_width: f32) {
        self.input.set_layout(Layout {
            left,
            top,
            display_width,
            width: self.world.width(),
            height: self.world.height(),
        });
    }

    pub fn set_picker_layout(&mut self, left: f32, top: f32, display_width: f32) {
        self.world.picker_mut().set_layout(left, top, display_width);
    }

    // Main canvas pointer events, page coordinates

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::mouse(EventKind::MouseDown, x, y));
    }
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::mouse(EventKind::MouseMove, x, y));
    }
    pub fn mouse_up(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::mouse(EventKind::MouseUp, x, y));
    }
    pub fn mouse_leave(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::mouse(EventKind::MouseLeave, x, y));
    }
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::touch(EventKind::TouchStart, vec![Point::new(x, y)]));
    }
    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::touch(EventKind::TouchMove, vec![Point::new(x, y)]));
    }
    pub fn touch_end(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::touch(EventKind::TouchEnd, vec![Point::new(x, y)]));
    }

    /// Picker pointer event; `kind` is 0 = down, 1 = move, 2 = up.
    /// Returns true when a color was selected.
    pub fn picker_pointer(&mut self, kind: u8, x: f32, y: f32) -> bool {
        let kind = match kind {
            0 => EventKind::MouseDown,
            1 => EventKind::MouseMove,
            _ => EventKind::MouseUp,
        };
        let event = PointerEvent::mouse(kind, x, y);
        match self.world.picker_mut().handle_pointer(&event) {
            Some(color) => {
                self.world.select_color(color);
                true
            }
            None => false,
        }
    }

    pub fn set_param(&mut self, key: &str, value: f64) -> std::result::Result<(), JsValue> {
        self.world
            .set_param(key, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn load_config(&mut self, json: &str) -> std::result::Result<(), JsValue> {
        let cfg = SimConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.world.set_config(cfg);
        Ok(())
    }

    pub fn config_json(&self) -> std::result::Result<String, JsValue> {
        self.world
            .config()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Packed 0xRRGGBB
    pub fn active_color(&self) -> u32 {
        let c = self.world.picker().active_color();
        (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
    }

    pub fn set_active_color(&mut self, r: u8, g: u8, b: u8) {
        self.world.picker_mut().set_active_color(Rgb::new(r, g, b));
    }

    pub fn particle_count(&self) -> usize { self.world.particles().len() }
    pub fn particles_created(&self) -> f64 { self.world.created() as f64 }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const u8 { self.world.surface().ptr() }
    pub fn output_len(&self) -> usize { self.world.surface().len() }
    pub fn picker_ptr(&self) -> *const u8 { self.world.picker().surface().ptr() }
    pub fn picker_len(&self) -> usize { self.world.picker().surface().len() }
    pub fn width(&self) -> u32 { self.world.width() }
    pub fn height(&self) -> u32 { self.world.height() }
}

impl Splatter {
    fn pointer(&mut self, event: PointerEvent) {
        self.input.dispatch(&event, &mut self.world);
    }

    pub fn world(&self) -> &World<PixelSurface> {
        &self.world
    }
}

#[cfg(target_arch = "wasm32")]
fn seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn seed() -> u64 {
    0x5EED_CAFE
}
