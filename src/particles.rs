//! Particle background: a fixed-size field of drifting dots joined by faint
//! lines when close. Drawing goes through [`Surface`] so the field can be
//! driven against a recording mock; the real surface is a 2D canvas context.

use crate::config::ParticleConfig;
use web_sys::CanvasRenderingContext2d;

/// Minimal 2D drawing surface used by the particle renderer.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.begin_path();
        // arc only fails on a negative radius
        if self.arc(x, y, radius, 0.0, std::f64::consts::TAU).is_ok() {
            self.set_fill_style_str(color);
            self.fill();
        }
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.begin_path();
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }
}

// --- Randomness -------------------------------------------------------------

/// xorshift64* generator. Not crypto secure; only used for visual jitter.
#[derive(Clone, Debug)]
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        // zero is a fixed point of xorshift
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

// --- Field --------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    fn random(rng: &mut Rng, width: f64, height: f64, cfg: &ParticleConfig) -> Self {
        Self {
            x: rng.range(0.0, width),
            y: rng.range(0.0, height),
            vx: rng.range(-cfg.max_speed, cfg.max_speed),
            vy: rng.range(-cfg.max_speed, cfg.max_speed),
            radius: rng.range(cfg.min_radius, cfg.max_radius),
            opacity: rng.range(cfg.min_opacity, cfg.max_opacity),
        }
    }

    fn in_bounds(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.x <= width && self.y >= 0.0 && self.y <= height
    }
}

pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    rng: Rng,
    cfg: ParticleConfig,
}

impl ParticleField {
    pub fn new(width: f64, height: f64, cfg: ParticleConfig, seed: u64) -> Self {
        let mut field = Self { width: 0.0, height: 0.0, particles: Vec::new(), rng: Rng::new(seed), cfg };
        field.resize(width, height);
        field
    }

    /// Adopt new canvas dimensions and regenerate every particle.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let (w, h) = (self.width, self.height);
        let rng = &mut self.rng;
        let cfg = &self.cfg;
        self.particles = (0..cfg.count).map(|_| Particle::random(rng, w, h, cfg)).collect();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Move every particle one step; any that leaves the canvas is respawned
    /// at a fresh random position inside it.
    pub fn update(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if !p.in_bounds(w, h) {
                *p = Particle::random(&mut self.rng, w, h, &self.cfg);
            }
        }
    }

    /// Opacity of the line joining two particles `distance` apart, if close enough.
    pub fn link_opacity(&self, distance: f64) -> Option<f64> {
        let max = self.cfg.connect_distance;
        (distance < max).then(|| self.cfg.max_line_opacity * (1.0 - distance / max))
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        let (r, g, b) = self.cfg.color;
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.radius, &format!("rgba({r},{g},{b},{:.3})", p.opacity));
        }
        for (i, a) in self.particles.iter().enumerate() {
            for b_p in &self.particles[i + 1..] {
                let d = (a.x - b_p.x).hypot(a.y - b_p.y);
                if let Some(alpha) = self.link_opacity(d) {
                    surface.line(a.x, a.y, b_p.x, b_p.y, &format!("rgba({r},{g},{b},{alpha:.3})"), 0.5);
                }
            }
        }
    }

    /// One animation frame: advance, then render.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        self.update();
        self.draw(surface);
    }

    #[cfg(test)]
    fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }
}
