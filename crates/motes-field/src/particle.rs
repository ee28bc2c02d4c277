//! A single dot of the particle field.

use motes_core::FieldTuning;

use crate::geometry::{Vec2, Zone};

/// One particle: a fixed home anchor and a position that wanders around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Spawn anchor, fixed until the field is reseeded.
    home: Vec2,
    /// Current position, moved every frame.
    pos: Vec2,
    /// Whether the last step found the particle inside the exclusion zone.
    suppressed: bool,
}

impl Particle {
    /// Create a particle resting at its home.
    pub fn new(home: Vec2) -> Self {
        Self {
            home,
            pos: home,
            suppressed: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn displaced(home: Vec2, pos: Vec2) -> Self {
        Self {
            home,
            pos,
            suppressed: false,
        }
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Hidden particles are skipped by the renderer.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Where the pointer pulls this particle, or `None` when it should relax home.
    ///
    /// The pull only applies while the pointer is within the attraction radius of
    /// the home anchor, and never exactly on it.
    pub fn target(&self, pointer: Vec2, tuning: &FieldTuning) -> Option<Vec2> {
        let d = pointer - self.home;
        let r = pointer.distance(self.home);
        if r > 0.0 && r < tuning.attraction_radius {
            Some(self.home + d.clamp_axes(tuning.max_move))
        } else {
            None
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, pointer: Vec2, zone: Option<&Zone>, tuning: &FieldTuning) {
        if zone.is_some_and(|z| z.contains(self.pos)) {
            self.suppressed = true;
            return;
        }
        self.suppressed = false;

        let movement = match self.target(pointer, tuning) {
            Some(target) => (target - self.pos) * tuning.move_strength,
            None => (self.home - self.pos) * (tuning.move_strength * tuning.relax_factor),
        };
        self.pos += movement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> FieldTuning {
        FieldTuning::default()
    }

    #[test]
    fn pointer_on_home_does_not_move() {
        let home = Vec2::new(100.0, 100.0);
        let mut p = Particle::new(home);
        assert_eq!(p.target(home, &tuning()), None);
        p.step(home, None, &tuning());
        assert_eq!(p.pos(), home);
        assert!(!p.pos().x.is_nan());
    }

    #[test]
    fn target_is_clamped_per_axis() {
        let home = Vec2::new(100.0, 100.0);
        let p = Particle::new(home);
        let target = p
            .target(Vec2::new(180.0, 90.0), &tuning())
            .expect("pointer is within reach");
        assert_eq!(target, Vec2::new(115.0, 90.0));
        assert!((target - home).x.abs() <= 15.0);
        assert!((target - home).y.abs() <= 15.0);
    }

    #[test]
    fn pointer_at_radius_is_out_of_reach() {
        let p = Particle::new(Vec2::new(0.0, 0.0));
        assert_eq!(p.target(Vec2::new(120.0, 0.0), &tuning()), None);
        assert!(p.target(Vec2::new(119.9, 0.0), &tuning()).is_some());
    }

    #[test]
    fn moves_twelve_percent_toward_target() {
        let home = Vec2::new(100.0, 100.0);
        let mut p = Particle::new(home);
        p.step(Vec2::new(150.0, 100.0), None, &tuning());
        // target is (115, 100); 12% of 15 is 1.8
        assert!((p.pos().x - 101.8).abs() < 1e-4);
        assert!((p.pos().y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn relaxes_six_percent_toward_home() {
        let home = Vec2::new(100.0, 100.0);
        let mut p = Particle::displaced(home, Vec2::new(110.0, 100.0));
        p.step(Vec2::new(500.0, 500.0), None, &tuning());
        assert!((p.pos().x - 109.4).abs() < 1e-4);
    }

    #[test]
    fn relaxation_is_monotonic() {
        let home = Vec2::new(50.0, 60.0);
        let far = Vec2::new(700.0, 380.0);
        let mut p = Particle::displaced(home, Vec2::new(63.0, 47.0));
        let mut last = p.pos().distance(home);
        for _ in 0..200 {
            p.step(far, None, &tuning());
            let now = p.pos().distance(home);
            if last < 1e-3 {
                break;
            }
            assert!(now < last, "distance went from {last} to {now}");
            last = now;
        }
        assert!(last < 0.05);
    }

    #[test]
    fn particle_inside_zone_is_frozen() {
        let home = Vec2::new(100.0, 100.0);
        let mut p = Particle::displaced(home, Vec2::new(104.0, 96.0));
        let zone = Zone::new(90.0, 90.0, 110.0, 110.0);
        let before = p.pos();
        p.step(Vec2::new(130.0, 100.0), Some(&zone), &tuning());
        assert_eq!(p.pos(), before);
        assert!(p.is_suppressed());

        p.step(Vec2::new(130.0, 100.0), None, &tuning());
        assert_ne!(p.pos(), before);
        assert!(!p.is_suppressed());
    }
}
