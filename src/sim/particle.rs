// particle.rs - Falling paint particles
//
// Each particle falls under gravity and loses a little of every color channel
// per second. A particle is gone once it is fully black or has dropped below
// the bottom edge.

use rand::Rng;

use crate::color::Rgb;

/// Splatter scatter square side, in multiples of the primary size
const SCATTER: f32 = 3.0;
const SATELLITE_MIN: f32 = 0.1;
const SATELLITE_SPREAD: f32 = 0.5;
const MAX_SATELLITES: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub color: Rgb,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub mass: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, color: Rgb, size: f32) -> Self {
        Self {
            color,
            x,
            y,
            size,
            mass: (size * 0.1).max(1.0),
        }
    }

    /// Integrate one step of gravity and color decay
    #[inline]
    pub fn advance(&mut self, dt: f32, gravity: f32, apply_mass: bool, fade_rate: f32) {
        let fall = gravity * dt;
        self.y += if apply_mass { fall * self.mass } else { fall };
        self.color = self.color.darken(fade_rate * dt);
    }

    /// Still colored and not yet below the bottom edge
    #[inline]
    pub fn is_alive(&self, surface_h: f32) -> bool {
        !self.color.is_black() && self.y - self.size <= surface_h
    }
}

/// The live particle collection
#[derive(Clone, Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn push(&mut self, p: Particle) {
        self.items.push(p);
    }

    /// Append a particle and, with `splatters`, 1 to 5 satellites scattered in
    /// a 3x-size square around it. Returns how many particles were added.
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        color: Rgb,
        size: f32,
        splatters: bool,
        rng: &mut impl Rng,
    ) -> usize {
        self.items.push(Particle::new(x, y, color, size));
        if !splatters {
            return 1;
        }

        let count = rng.gen_range(1..=MAX_SATELLITES) as usize;
        let half = size * SCATTER / 2.0;
        for _ in 0..count {
            let ox = x + rng.gen_range(0.0..1.0f32) * size * SCATTER - half;
            let oy = y + rng.gen_range(0.0..1.0f32) * size * SCATTER - half;
            let osize = size * SATELLITE_MIN + rng.gen_range(0.0..1.0f32) * size * SATELLITE_SPREAD;
            self.items.push(Particle::new(ox, oy, color, osize));
        }
        count + 1
    }

    /// Advance every particle, call `visit` on survivors in order and drop the
    /// rest. Order of survivors is preserved.
    pub fn update(
        &mut self,
        dt: f32,
        gravity: f32,
        apply_mass: bool,
        fade_rate: f32,
        surface_h: f32,
        mut visit: impl FnMut(&Particle),
    ) {
        let mut write = 0;

        for read in 0..self.items.len() {
            let mut p = self.items[read];
            p.advance(dt, gravity, apply_mass, fade_rate);
            if !p.is_alive(surface_h) {
                continue;
            }
            visit(&p);
            self.items[write] = p;
            write += 1;
        }

        self.items.truncate(write);
    }
}
