//! Animation module for time-based property changes
//!
//! Hand ticks, dash reveals and ornament fades are all tweens on
//! scene properties, advanced once per frame.

mod easing;
mod tween;

pub use easing::{Easing, ease};
pub use tween::{Animatable, OnComplete, Tween, TweenEngine};
