// color.rs - RGB colors and the two color curves the toy uses
//
// spectrum_value cycles through the hue wheel with three phase-shifted sines.
// fade_toward_white mixes a color with white along a sine cycle.

use serde::{Deserialize, Serialize};

/// Phase offsets (radians) for the red, green and blue sines
const PHASE_R: f32 = 0.0;
const PHASE_G: f32 = 2.0;
const PHASE_B: f32 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from float channels, rounding and clamping each to [0, 255]
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Subtract `amount` from every channel, rounding to the nearest integer
    /// and stopping at 0.
    pub fn darken(self, amount: f32) -> Self {
        let f = |c: u8| channel(c as f32 - amount);
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Channels as an array, handy for pixel writes
    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

#[inline]
fn channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Color at `step` along a sine-driven spectrum.
///
/// Periodic in `step` with period `2π / frequency`. Channels stay in [1, 255].
pub fn spectrum_value(step: f32, frequency: f32) -> Rgb {
    let wave = |phase: f32| (frequency * step + phase).sin() * 127.0 + 128.0;
    Rgb::from_f32(wave(PHASE_R), wave(PHASE_G), wave(PHASE_B))
}

/// Mix `color` toward white by `(sin(step * damping) + 1) / 2`.
///
/// The mix oscillates: at sin = -1 the color is returned as is, at sin = 1
/// the result is pure white.
pub fn fade_toward_white(color: Rgb, damping: f32, step: f32) -> Rgb {
    let blend = ((step * damping).sin() + 1.0) / 2.0;
    let mix = |c: u8| c as f32 + blend * (255.0 - c as f32);
    Rgb::from_f32(mix(color.r), mix(color.g), mix(color.b))
}
