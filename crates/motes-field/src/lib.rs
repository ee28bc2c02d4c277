//! Pointer-reactive particle field for the motes hero screen.
//!
//! A fixed set of dots is scattered over the canvas. Each frame every dot leans
//! a little toward the pointer when it is close to the dot's home, relaxes back
//! otherwise, and freezes while it sits behind the headline so the text stays
//! readable. The field is drawn into a ratatui buffer with a theme-dependent
//! glow.

mod color;
mod field;
mod geometry;
mod particle;
mod render;
mod schedule;
mod style;

pub use color::Rgb;
pub use field::ParticleField;
pub use geometry::{Vec2, Zone};
pub use particle::Particle;
pub use render::FieldView;
pub use schedule::{Debounce, FrameHandle, FrameLoop, RESIZE_DEBOUNCE};
pub use style::{Backdrop, DotStyle};
