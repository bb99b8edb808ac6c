//! Easing curves for property tweens

use serde::{Deserialize, Serialize};

/// Easing function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic slow start
    QuadIn,
    /// Quadratic fast start, gentle landing (default for ticks and reveals)
    #[default]
    QuadOut,
    QuadInOut,
    /// Near-still start, then a sharp rush
    ExpoIn,
    ExpoInOut,
    /// Very fast start with a long tail, used for fades
    QuartOut,
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::ExpoIn => {
            if t == 0.0 {
                0.0
            } else {
                2f32.powf(10.0 * (t - 1.0))
            }
        }
        Easing::ExpoInOut => {
            if t == 0.0 || t == 1.0 {
                t
            } else if t < 0.5 {
                2f32.powf(20.0 * t - 10.0) / 2.0
            } else {
                (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
            }
        }
        Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
    }
}
