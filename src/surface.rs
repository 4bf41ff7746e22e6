// surface.rs - Drawing surfaces
//
// `Surface` is the small immediate-mode API the simulation and the picker draw
// through. `PixelSurface` implements it over an RGBA byte buffer that the
// browser copies into an ImageData each frame (see `ptr`/`len`).

use crate::color::Rgb;

/// Immediate-mode 2D drawing target
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reallocate to new logical dimensions. Contents are cleared.
    fn resize(&mut self, w: u32, h: u32);

    /// Blend a filled rectangle over the surface with the given opacity
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32);

    /// Blend a filled circle over the surface with the given opacity
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb, alpha: f32);

    /// Read back one pixel. `None` outside the surface.
    fn pixel(&self, x: u32, y: u32) -> Option<Rgb>;
}

/// Software RGBA surface
#[derive(Clone, Debug)]
pub struct PixelSurface {
    w: u32,
    h: u32,
    out: Vec<u8>,
}

impl PixelSurface {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            out: vec![0; (w as usize) * (h as usize) * 4],
        }
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        self.out.fill(0);
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.out
    }

    pub fn ptr(&self) -> *const u8 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Alpha channel at (x, y), 0 outside the surface
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.w || y >= self.h {
            return 0;
        }
        self.out[self.index(x, y) + 3]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.w as usize) + x as usize) * 4
    }

    /// Source-over blend of one pixel
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Rgb, alpha: f32) {
        let i = self.index(x, y);
        let px = &mut self.out[i..i + 4];
        if alpha >= 1.0 {
            px[..3].copy_from_slice(&color.to_array());
            px[3] = 255;
            return;
        }
        let inv = 1.0 - alpha;
        for (dst, src) in px[..3].iter_mut().zip(color.to_array()) {
            *dst = (src as f32 * alpha + *dst as f32 * inv).round() as u8;
        }
        px[3] = (255.0 * alpha + px[3] as f32 * inv).round() as u8;
    }

    /// Pixel column/row range whose centers fall inside [lo, hi)
    #[inline]
    fn span(lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().min(limit as f32);
        if end <= start {
            return (0, 0);
        }
        (start as u32, end as u32)
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.w
    }

    fn height(&self) -> u32 {
        self.h
    }

    fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.out.clear();
        self.out.resize((w as usize) * (h as usize) * 4, 0);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || !(w > 0.0 && h > 0.0) {
            return;
        }
        let (x0, x1) = Self::span(x, x + w, self.w);
        let (y0, y1) = Self::span(y, y + h, self.h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, alpha);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || !(r > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let (x0, x1) = Self::span(cx - r, cx + r, self.w);
        let (y0, y1) = Self::span(cy - r, cy + r, self.h);
        let r2 = r * r;
        for py in y0..y1 {
            let dy = py as f32 + 0.5 - cy;
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgb::new(self.out[i], self.out[i + 1], self.out[i + 2]))
    }
}
