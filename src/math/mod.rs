pub mod vec3;
pub mod matrix;
pub mod spline;

pub use vec3::{Vec3, Spherical};
pub use matrix::Mat4;
pub use spline::{CatmullRomSpline, evaluate_catmull_rom, evaluate_centripetal, hermite_curve};
