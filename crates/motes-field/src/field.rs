//! Particle field state and the per-frame step.

use motes_core::{CanvasSize, FieldTuning};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::geometry::{Vec2, Zone};
use crate::particle::Particle;

/// Used when both the measured size and the configured default are unusable.
const FALLBACK_SIZE: CanvasSize = CanvasSize::new(800.0, 400.0);

/// The animated particle field owned by a single hero view.
#[derive(Debug)]
pub struct ParticleField {
    /// Particles of the current canvas epoch.
    particles: Vec<Particle>,
    /// Last known pointer position.
    pointer: Vec2,
    /// Effective canvas size (never degenerate).
    size: CanvasSize,
    /// Tuning values.
    tuning: FieldTuning,
    /// Source for home positions.
    rng: StdRng,
}

impl ParticleField {
    /// Create a field seeded from the operating system's entropy source.
    pub fn new(size: CanvasSize, tuning: FieldTuning) -> Self {
        Self::with_rng(size, tuning, StdRng::from_os_rng())
    }

    /// Create a field with a fixed seed, for reproducible layouts.
    pub fn with_seed(size: CanvasSize, tuning: FieldTuning, seed: u64) -> Self {
        Self::with_rng(size, tuning, StdRng::seed_from_u64(seed))
    }

    #[cfg(test)]
    pub(crate) fn with_particles(size: CanvasSize, particles: Vec<Particle>) -> Self {
        let mut field = Self::with_seed(size, FieldTuning::default(), 0);
        field.particles = particles;
        field
    }

    fn with_rng(size: CanvasSize, tuning: FieldTuning, rng: StdRng) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            pointer: Vec2::default(),
            size: tuning.default_size().or(FALLBACK_SIZE),
            tuning,
            rng,
        };
        field.reseed(size);
        field
    }

    /// Throw away all particles and scatter a fresh set over `size`.
    ///
    /// A zero or unknown size is replaced by the configured default. The pointer
    /// is re-centered.
    pub fn reseed(&mut self, size: CanvasSize) {
        let size = self.effective(size);
        if size != self.size {
            tracing::debug!(
                from_w = self.size.width,
                from_h = self.size.height,
                to_w = size.width,
                to_h = size.height,
                "reseeding particle field"
            );
        }
        self.size = size;

        let count = self.tuning.count;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| {
                let home = Vec2::new(
                    rng.random_range(0.0..size.width),
                    rng.random_range(0.0..size.height),
                );
                Particle::new(home)
            })
            .collect();

        let (cx, cy) = size.center();
        self.pointer = Vec2::new(cx, cy);
    }

    /// Reseed only if the effective size changed. Returns whether it did.
    pub fn resize(&mut self, size: CanvasSize) -> bool {
        if self.effective(size) == self.size {
            return false;
        }
        self.reseed(size);
        true
    }

    fn effective(&self, size: CanvasSize) -> CanvasSize {
        if size.is_degenerate() {
            tracing::trace!("canvas size unknown, using default");
        }
        size.or(self.tuning.default_size().or(FALLBACK_SIZE))
    }

    /// Record the latest pointer position, in canvas units.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Build the exclusion zone for a text block occupying `(left, top, right, bottom)`.
    ///
    /// A block too small to survive the padding inset yields no zone.
    pub fn exclusion_zone(&self, bounds: Option<(f32, f32, f32, f32)>) -> Option<Zone> {
        bounds
            .map(|(left, top, right, bottom)| {
                Zone::inset(left, top, right, bottom, self.tuning.exclusion_padding)
            })
            .filter(|zone| !zone.is_empty())
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self, zone: Option<&Zone>) {
        let pointer = self.pointer;
        for particle in &mut self.particles {
            particle.step(pointer, zone, &self.tuning);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn tuning(&self) -> &FieldTuning {
        &self.tuning
    }
}
