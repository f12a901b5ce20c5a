#![allow(missing_docs)]

//! Drifting particle field drawn behind the board.
//!
//! The field only knows its surface size and the theme. Positions and
//! velocities are seeded once; a theme change recolours particles in place.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::ThemeKind;

/// Particle count used when no configuration overrides it.
pub const DEFAULT_PARTICLES: usize = 70;

const MAX_SPEED: f64 = 0.6;
const MIN_SIZE: f64 = 1.0;
const MAX_SIZE: f64 = 4.0;
const HUE_BASE: f64 = 180.0;
const HUE_RANGE: f64 = 240.0;

/// Colour in hue/saturation/lightness, hue in degrees, the rest in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Convert to 8-bit RGB.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let hue = self.hue.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * self.lightness - 1.0).abs()) * self.saturation;
        let x = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
        let (r, g, b) = match hue as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = self.lightness - chroma / 2.0;
        let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

/// One dot of the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub color: Hsl,
}

/// Fixed-size set of particles on a toroidal surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    width: f64,
    height: f64,
    theme: ThemeKind,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl ParticleField {
    /// Scatter `count` particles over a `width` × `height` surface.
    pub fn new(count: usize, width: f64, height: f64, theme: ThemeKind, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.gen::<f64>() * width,
                y: rng.gen::<f64>() * height,
                vx: rng.gen_range(-MAX_SPEED..MAX_SPEED),
                vy: rng.gen_range(-MAX_SPEED..MAX_SPEED),
                size: rng.gen_range(MIN_SIZE..MAX_SIZE),
                color: random_color(&mut rng, theme),
            })
            .collect();
        Self {
            width,
            height,
            theme,
            particles,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Move every particle one frame, wrapping at each edge.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.x = wrap(particle.x + particle.vx, width);
            particle.y = wrap(particle.y + particle.vy, height);
        }
    }

    /// Change the surface size. Particles keep their state.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Recolour for `theme`. Positions and velocities are untouched.
    /// Returns false when the theme did not change.
    pub fn set_theme(&mut self, theme: ThemeKind) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        for particle in &mut self.particles {
            particle.color = random_color(&mut self.rng, theme);
        }
        true
    }
}

fn random_color(rng: &mut ChaCha8Rng, theme: ThemeKind) -> Hsl {
    let hue = (HUE_BASE + rng.gen::<f64>() * HUE_RANGE).rem_euclid(360.0);
    match theme {
        ThemeKind::Dark => Hsl {
            hue,
            saturation: 1.0,
            lightness: 0.65,
        },
        ThemeKind::Light => Hsl {
            hue,
            saturation: 0.8,
            lightness: 0.5,
        },
    }
}

// Leaving one edge re-enters at the opposite edge.
fn wrap(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}
