// wander.rs - Autonomous wandering path
//
// A point chases a random target at a pulsing speed. When the target is
// within one frame's travel it picks a new target and a new base speed.

use rand::Rng;

const INITIAL_SPEED: f32 = 600.0;
const MIN_SPEED: f32 = 500.0;
const MAX_SPEED: f32 = 2500.0;

/// Where to drop the next particle along the path
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Clone, Debug)]
pub struct Wander {
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub speed: f32,
}

impl Wander {
    /// Start at rest in the middle of a `w` x `h` surface
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            x: w / 2.0,
            y: h / 2.0,
            target_x: w / 2.0,
            target_y: h / 2.0,
            speed: INITIAL_SPEED,
        }
    }

    /// Advance one frame. `phase` follows the particle creation counter and
    /// modulates the speed as `speed * (sin(phase) + 1)`.
    pub fn advance(&mut self, dt: f32, phase: f32, w: f32, h: f32, rng: &mut impl Rng) -> Stroke {
        // The heading uses the target held at the start of the frame, so a
        // fresh target only steers from the next frame on.
        let dx = self.target_x - self.x;
        let dy = self.target_y - self.y;
        if dx.hypot(dy) < self.speed * dt {
            self.target_x = rng.gen_range(0.0..1.0f32) * w;
            self.target_y = rng.gen_range(0.0..1.0f32) * h;
            self.speed = rng.gen_range(MIN_SPEED..MAX_SPEED);
        }

        let angle = dy.atan2(dx);
        let step = self.speed * (phase.sin() + 1.0) * dt;
        let next_x = self.x + step * angle.cos();
        let next_y = self.y + step * angle.sin();

        let stroke = Stroke {
            x: (self.x + next_x) / 2.0,
            y: (self.y + next_y) / 2.0,
            size: step / 2.0,
        };
        self.x = next_x;
        self.y = next_y;
        stroke
    }
}
