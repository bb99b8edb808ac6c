//! Perturbed anchor generation and spline fitting.
//!
//! Lengths and radii must be positive and segment counts at least 1 (lines)
//! or 3 (circles); [`super::factory::PrimitiveFactory`] checks this first.

use std::f32::consts::TAU;

use crate::math::{CatmullRomSpline, Spherical, Vec3};
use crate::random::Random;

/// Sample count of every circle, independent of its anchor count
pub const CIRCLE_SAMPLES: usize = 360;

/// `segments + 1` anchors spaced evenly along a planar line at `angle`,
/// each axis independently displaced by up to `perturbance`.
pub fn line_anchors(
    rng: &mut Random,
    origin: Vec3,
    angle: f32,
    length: f32,
    perturbance: f32,
    segments: usize,
) -> Vec<Vec3> {
    let segment_length = length / segments as f32;
    let dx = segment_length * angle.cos();
    let dy = segment_length * angle.sin();

    (0..=segments)
        .map(|i| {
            let i = i as f32;
            Vec3::new(
                origin.x + i * dx + rng.range(-perturbance, perturbance),
                origin.y + i * dy + rng.range(-perturbance, perturbance),
                origin.z,
            )
        })
        .collect()
}

/// `segments + 1` anchors along `direction` (its radius is the line length),
/// displaced on all three axes.
pub fn line_anchors_3d(
    rng: &mut Random,
    origin: Vec3,
    direction: Spherical,
    perturbance: f32,
    segments: usize,
) -> Vec<Vec3> {
    let step = direction.to_vec3().scale(1.0 / segments as f32);

    (0..=segments)
        .map(|i| {
            let ideal = origin + step.scale(i as f32);
            Vec3::new(
                ideal.x + rng.range(-perturbance, perturbance),
                ideal.y + rng.range(-perturbance, perturbance),
                ideal.z + rng.range(-perturbance, perturbance),
            )
        })
        .collect()
}

/// `segments` anchors around a circle, each at a radius displaced by up to
/// `perturbance`. A coin flip decides whether they run clockwise or
/// counter-clockwise, which moves where the loop's seam is drawn from.
pub fn circle_anchors(
    rng: &mut Random,
    origin: Vec3,
    radius: f32,
    perturbance: f32,
    segments: usize,
    start_angle: f32,
) -> Vec<Vec3> {
    let segment_rads = TAU / segments as f32;
    let ascending = rng.flip_coin() == 1;

    let mut order: Vec<usize> = (0..segments).collect();
    if !ascending {
        order.reverse();
    }

    order
        .into_iter()
        .map(|i| {
            let r = radius + rng.range(-perturbance, perturbance);
            let a = i as f32 * segment_rads + start_angle;
            Vec3::new(origin.x + r * a.cos(), origin.y + r * a.sin(), origin.z)
        })
        .collect()
}

/// Smooth open curve through `anchors`, resampled to `samples` points
pub fn fit_open(anchors: Vec<Vec3>, samples: usize) -> Vec<Vec3> {
    CatmullRomSpline::open(anchors).sample(samples)
}

/// Smooth closed curve through `anchors`, resampled to `samples` points
/// with the last point landing back on the first.
pub fn fit_closed(anchors: Vec<Vec3>, samples: usize) -> Vec<Vec3> {
    CatmullRomSpline::closed(anchors).sample(samples)
}
