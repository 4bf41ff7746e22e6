// sim/ - Paint splatter simulation
//
// The world owns the particles, the picker holding the active color, the
// wandering path and the drawing surface. One `frame` call trails the
// background, optionally recolors and wanders, then moves, fades, draws and
// culls every particle.

mod particle;
mod wander;

pub use particle::{Particle, Particles};
pub use wander::{Stroke, Wander};

use std::f64::consts::TAU;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, trace};

use crate::color::{Rgb, fade_toward_white, spectrum_value};
use crate::config::SimConfig;
use crate::error::Result;
use crate::input::{GestureSink, Movement, Point};
use crate::picker::ColorPicker;
use crate::surface::Surface;

/// Opacity particles are drawn with
const PARTICLE_ALPHA: f32 = 1.0;

pub struct World<S: Surface> {
    surface: S,
    config: SimConfig,
    picker: ColorPicker,
    particles: Particles,
    wander: Wander,
    created: u64,
    rng: SmallRng,
}

impl<S: Surface> World<S> {
    pub fn new(surface: S, config: SimConfig, seed: u64) -> Self {
        let (w, h) = (surface.width() as f32, surface.height() as f32);
        Self {
            surface,
            config: config.sanitized(),
            picker: ColorPicker::new(),
            particles: Particles::new(),
            wander: Wander::new(w, h),
            created: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Run one frame with `dt` seconds since the previous one
    pub fn frame(&mut self, dt: f32) {
        let (w, h) = (self.surface.width() as f32, self.surface.height() as f32);
        let cfg = &self.config;

        self.surface
            .fill_rect(0.0, 0.0, w, h, Rgb::BLACK, 1.0 - cfg.motion_blur_factor);

        if cfg.auto_color {
            let color = spectrum_value(self.phase(cfg.auto_color_speed), 1.0);
            self.picker.set_active_color(color);
        }

        if self.config.auto_move {
            let phase = self.phase(1.0);
            let stroke = self.wander.advance(dt, phase, w, h, &mut self.rng);
            let color = self.stroke_color();
            self.spawn(stroke.x, stroke.y, color, stroke.size);
        }

        let cfg = &self.config;
        let surface = &mut self.surface;
        self.particles.update(dt, cfg.gravity, cfg.apply_mass, cfg.fade_rate, h, |p| {
            surface.fill_circle(p.x, p.y, p.size, p.color, PARTICLE_ALPHA);
        });
    }

    /// Add a particle (plus splatters when enabled). Sizes that are not
    /// positive and finite are ignored. Returns how many particles were added.
    pub fn spawn(&mut self, x: f32, y: f32, color: Rgb, size: f32) -> usize {
        if !(size > 0.0 && size.is_finite() && x.is_finite() && y.is_finite()) {
            trace!(size, "spawn ignored");
            return 0;
        }
        self.created += 1;
        self.particles
            .spawn(x, y, color, size, self.config.add_splatters, &mut self.rng)
    }

    /// Active color mixed toward white at the current creation phase
    fn stroke_color(&self) -> Rgb {
        fade_toward_white(
            self.picker.active_color(),
            1.0,
            self.phase(self.config.color_fade_damping),
        )
    }

    /// `created * rate` wrapped to one turn. The product is taken in f64 so
    /// the phase keeps moving once the counter outgrows f32 precision.
    fn phase(&self, rate: f32) -> f32 {
        (self.created as f64 * rate as f64 % TAU) as f32
    }

    /// Match the drawing surface to the host's new size
    pub fn resize(&mut self, w: u32, h: u32) {
        self.surface.resize(w, h);
        debug!(w, h, "world resized");
    }

    /// A picker selection took over from automatic coloring
    pub fn select_color(&mut self, color: Rgb) {
        self.picker.set_active_color(color);
        self.config.auto_color = false;
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config.sanitized();
    }

    /// Set one named parameter; the value is clamped like `set_config`
    pub fn set_param(&mut self, key: &str, value: f64) -> Result<()> {
        self.config.set(key, value)
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut ColorPicker {
        &mut self.picker
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn wander(&self) -> &Wander {
        &self.wander
    }

    /// Particles created since start, splatters excluded
    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }
}

/// Pointer gestures on the main surface paint directly
impl<S: Surface> GestureSink for World<S> {
    fn on_start(&mut self, _position: Point) {
        self.config.auto_move = false;
    }

    fn on_move(&mut self, m: Movement) {
        let color = self.stroke_color();
        self.spawn(m.midpoint.x, m.midpoint.y, color, m.distance / 2.0);
    }

    fn on_end(&mut self, _position: Point) {
        self.config.auto_move = true;
    }
}
