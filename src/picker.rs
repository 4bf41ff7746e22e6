// picker.rs - Palette surface with a single active color
//
// Layout (logical 300x100):
//   rows [0, H-30)    32 spectrum bands
//   rows [H-30, H-20) unpainted
//   rows [H-20, H)    active color swatch
//
// Selection samples whatever is painted under the pointer, so clicking the
// swatch re-selects the active color and the unpainted gap selects black.

use tracing::trace;

use crate::color::{Rgb, spectrum_value};
use crate::input::{GestureSink, InputAdapter, InputOptions, Layout, Movement, Point, PointerEvent};
use crate::surface::{PixelSurface, Surface};

pub const PICKER_WIDTH: u32 = 300;
pub const PICKER_HEIGHT: u32 = 100;

const BANDS: u32 = 32;
const BAND_FREQUENCY: f32 = 0.16;
const GRADIENT_MARGIN: f32 = 30.0;
const SWATCH_HEIGHT: f32 = 20.0;

pub struct ColorPicker {
    surface: PixelSurface,
    input: InputAdapter,
    active: Rgb,
}

impl ColorPicker {
    pub fn new() -> Self {
        let surface = PixelSurface::new(PICKER_WIDTH, PICKER_HEIGHT);
        let input = InputAdapter::new(
            InputOptions::default(),
            Layout::unscaled(PICKER_WIDTH, PICKER_HEIGHT),
        );
        let mut picker = Self {
            surface,
            input,
            active: Rgb::WHITE,
        };
        picker.paint_gradient();
        picker
    }

    fn paint_gradient(&mut self) {
        let w = self.surface.width() as f32;
        let h = self.surface.height() as f32;
        let band_w = w / BANDS as f32;

        for i in 0..BANDS {
            let color = spectrum_value(i as f32, BAND_FREQUENCY);
            self.surface
                .fill_rect(i as f32 * band_w - 1.0, 0.0, band_w + 1.0, h - GRADIENT_MARGIN, color, 1.0);
            if i == 0 {
                self.set_active_color(color);
            }
        }
    }

    /// Start listening for pointer input on the picker surface
    pub fn enable(&mut self) {
        self.input.start();
    }

    /// Place the picker on the page so page coordinates map to its pixels
    pub fn set_layout(&mut self, left: f32, top: f32, display_width: f32) {
        self.input.set_layout(Layout {
            left,
            top,
            display_width,
            width: self.surface.width(),
            height: self.surface.height(),
        });
    }

    /// Feed a raw pointer event. Returns the newly selected color if the event
    /// produced a selection.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<Rgb> {
        let mut taps = Taps::default();
        self.input.dispatch(event, &mut taps);
        let p = taps.last?;
        self.select_at(p.x as u32, p.y as u32)
    }

    /// Sample the pixel at (x, y) and make it the active color
    pub fn select_at(&mut self, x: u32, y: u32) -> Option<Rgb> {
        let color = self.surface.pixel(x, y)?;
        self.set_active_color(color);
        trace!(r = color.r, g = color.g, b = color.b, "picker selection");
        Some(color)
    }

    pub fn active_color(&self) -> Rgb {
        self.active
    }

    /// Replace the active color and repaint the swatch
    pub fn set_active_color(&mut self, color: Rgb) {
        self.active = color;
        let w = self.surface.width() as f32;
        let h = self.surface.height() as f32;
        self.surface.fill_rect(0.0, h - SWATCH_HEIGHT, w, SWATCH_HEIGHT, color, 1.0);
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// Down, move and up all count as a sample at the pointer position
#[derive(Default)]
struct Taps {
    last: Option<Point>,
}

impl GestureSink for Taps {
    fn on_start(&mut self, p: Point) {
        self.last = Some(p);
    }
    fn on_move(&mut self, m: Movement) {
        self.last = Some(m.position);
    }
    fn on_end(&mut self, p: Point) {
        self.last = Some(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EventKind;

    #[test]
    fn starts_with_first_band_active() {
        let p = ColorPicker::new();
        let first = spectrum_value(0.0, BAND_FREQUENCY);
        assert_eq!(p.active_color(), first);
        assert_eq!(p.surface().pixel(0, 0), Some(first));
        assert_eq!(p.surface().pixel(150, 95), Some(first));
    }

    #[test]
    fn bands_follow_the_spectrum() {
        let p = ColorPicker::new();
        // Band 10 owns columns 93..=101 once band 11 overdraws its right edge
        assert_eq!(p.surface().pixel(98, 30), Some(spectrum_value(10.0, BAND_FREQUENCY)));
        assert_eq!(p.surface().pixel(299, 30), Some(spectrum_value(31.0, BAND_FREQUENCY)));
    }

    #[test]
    fn gap_between_strips_is_unpainted() {
        let p = ColorPicker::new();
        assert_eq!(p.surface().pixel(10, 75), Some(Rgb::BLACK));
        assert_eq!(p.surface().alpha(10, 75), 0);
    }

    #[test]
    fn select_updates_swatch_and_reports() {
        let mut p = ColorPicker::new();
        let expected = spectrum_value(20.0, BAND_FREQUENCY);
        assert_eq!(p.select_at(192, 10), Some(expected));
        assert_eq!(p.active_color(), expected);
        assert_eq!(p.surface().pixel(5, 90), Some(expected));
    }

    #[test]
    fn selecting_the_swatch_is_a_no_op() {
        let mut p = ColorPicker::new();
        let before = p.active_color();
        assert_eq!(p.select_at(200, 90), Some(before));
        assert_eq!(p.active_color(), before);
    }

    #[test]
    fn set_active_color_repaints_swatch_only() {
        let mut p = ColorPicker::new();
        let c = Rgb::new(1, 2, 3);
        p.set_active_color(c);
        assert_eq!(p.active_color(), c);
        assert_eq!(p.surface().pixel(100, 99), Some(c));
        assert_ne!(p.surface().pixel(100, 10), Some(c));
    }

    #[test]
    fn pointer_input_requires_enable() {
        let mut p = ColorPicker::new();
        let down = PointerEvent::mouse(EventKind::MouseDown, 192.0, 10.0);
        assert_eq!(p.handle_pointer(&down), None);

        p.enable();
        let expected = spectrum_value(20.0, BAND_FREQUENCY);
        assert_eq!(p.handle_pointer(&down), Some(expected));

        let drag = PointerEvent::mouse(EventKind::MouseMove, 2.0, 10.0);
        assert_eq!(p.handle_pointer(&drag), Some(spectrum_value(0.0, BAND_FREQUENCY)));

        let up = PointerEvent::mouse(EventKind::MouseUp, 2.0, 10.0);
        assert!(p.handle_pointer(&up).is_some());
        assert_eq!(p.handle_pointer(&drag), None);
    }

    #[test]
    fn layout_maps_page_coordinates() {
        let mut p = ColorPicker::new();
        p.enable();
        p.set_layout(100.0, 50.0, 150.0);
        let down = PointerEvent::mouse(EventKind::MouseDown, 100.0 + 96.0, 55.0);
        assert_eq!(p.handle_pointer(&down), Some(spectrum_value(20.0, BAND_FREQUENCY)));
    }
}
