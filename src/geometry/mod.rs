//! Procedural wavy line art: perturbed anchors, spline fitting and the
//! primitives the renderer draws.

pub mod curve;
pub mod style;
pub mod primitive;
pub mod factory;

pub use curve::CIRCLE_SAMPLES;
pub use style::{ColorSpec, LineStyle, CircleStyle};
pub use primitive::{Dash, Material, Primitive, PrimitiveKind};
pub use factory::PrimitiveFactory;
