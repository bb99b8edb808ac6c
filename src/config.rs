//! Clock scene configuration loaded from YAML.
//!
//! Every field has a default, so an empty document (or no document) gives
//! the stock clock. Values are checked by [`ClockConfig::validate`] before a
//! scene is built from them.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::clock::{Hand, HandTiming};
use crate::color::Color;
use crate::error::ConfigError;
use crate::geometry::style::MIN_CIRCLE_SEGMENTS;
use crate::ornament::LeafScatter;
use crate::random::Random;

/// Closed numeric interval sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut Random) -> f32 {
        rng.range(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(invalid(field, format!("min {} exceeds max {}", self.min, self.max)));
        }
        Ok(())
    }

    fn check_non_negative(&self, field: &'static str) -> Result<(), ConfigError> {
        self.check(field)?;
        if self.min < 0.0 {
            return Err(invalid(field, "must not be negative"));
        }
        Ok(())
    }
}

/// Concentric wavy circles forming the dial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub radius: f32,
    /// Circle radii are drawn from `radius..radius + radius_spread`
    pub radius_spread: f32,
    pub circle_count: usize,
    pub perturbance: Span,
    pub segment_count: usize,
    /// Every n-th circle (counting from the first) is drawn solid, not revealed
    pub solid_every: usize,
    /// Dash length the reveal tweens grow to
    pub reveal_dash: f32,
    pub reveal_duration: Span,
    pub reveal_delay: Span,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            radius_spread: 1.0,
            circle_count: 100,
            perturbance: Span::new(0.0, 1.5),
            segment_count: 25,
            solid_every: 99,
            reveal_dash: 20.0,
            reveal_duration: Span::new(2.0, 6.0),
            reveal_delay: Span::new(3.0, 15.0),
        }
    }
}

/// A bundle of wavy lines that together draw one hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandLines {
    pub line_count: usize,
    pub length: f32,
    /// Line lengths are drawn from `length - length_jitter..length`
    pub length_jitter: f32,
    pub perturbance: Span,
    pub segment_count: usize,
}

impl Default for HandLines {
    fn default() -> Self {
        Self {
            line_count: 15,
            length: 9.5,
            length_jitter: 1.0,
            perturbance: Span::new(0.0, 0.5),
            segment_count: 10,
        }
    }
}

impl HandLines {
    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.length <= 0.0 {
            return Err(invalid(field, format!("length {} must be positive", self.length)));
        }
        if self.length_jitter < 0.0 || self.length_jitter >= self.length {
            return Err(invalid(field, "length_jitter must be in [0, length)"));
        }
        if self.segment_count < 1 {
            return Err(invalid(field, "segment_count must be at least 1"));
        }
        self.perturbance.check_non_negative(field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandsConfig {
    pub second: HandLines,
    pub minute: HandLines,
    pub hour: HandLines,
    /// Dash length the hand reveal tweens grow to
    pub reveal_dash: f32,
    pub reveal_duration: f32,
    pub reveal_delay: Span,
    #[serde(flatten)]
    pub timing: HandTiming,
}

impl Default for HandsConfig {
    fn default() -> Self {
        let face_radius = FaceConfig::default().radius;
        let minute = HandLines {
            line_count: 15,
            length: face_radius * 0.95,
            length_jitter: 1.0,
            perturbance: Span::new(0.0, 0.5),
            segment_count: 10,
        };

        Self {
            second: HandLines {
                line_count: 2,
                length_jitter: 0.0,
                perturbance: Span::new(0.0, 0.45),
                ..minute.clone()
            },
            hour: HandLines {
                line_count: 20,
                length: face_radius * 0.6,
                perturbance: Span::new(0.0, 0.7),
                ..minute.clone()
            },
            minute,
            reveal_dash: 20.0,
            reveal_duration: 6.0,
            reveal_delay: Span::new(3.0, 15.0),
            timing: HandTiming::default(),
        }
    }
}

impl HandsConfig {
    pub fn lines(&self, hand: Hand) -> &HandLines {
        match hand {
            Hand::Second => &self.second,
            Hand::Minute => &self.minute,
            Hand::Hour => &self.hour,
        }
    }
}

/// Small knot of circles covering the hands' pivot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    pub circle_count: usize,
    pub radius: f32,
    pub perturbance: Span,
    pub segment_count: usize,
    /// CSS colour name
    pub inner_color: String,
    /// CSS colour name
    pub outer_color: String,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            circle_count: 13,
            radius: 0.25,
            perturbance: Span::new(0.0, 1.0),
            segment_count: 25,
            inner_color: "yellow".to_string(),
            outer_color: "darkgreen".to_string(),
        }
    }
}

impl CenterConfig {
    /// Resolve the gradient colour names
    pub fn colors(&self) -> Result<(Color, Color), ConfigError> {
        let resolve = |field: &'static str, name: &str| {
            Color::from_name(name).ok_or_else(|| invalid(field, format!("unknown colour `{}`", name)))
        };
        Ok((
            resolve("center.inner_color", &self.inner_color)?,
            resolve("center.outer_color", &self.outer_color)?,
        ))
    }
}

/// Initial camera distance and the orbit controls' zoom limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 30.0,
            min_distance: 10.0,
            max_distance: 100.0,
        }
    }
}

/// Complete configuration of the clock scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub face: FaceConfig,
    pub hands: HandsConfig,
    pub center: CenterConfig,
    pub leaves: LeafScatter,
    pub camera: CameraConfig,
    /// `log` level filter name: off, error, warn, info, debug, trace
    pub log_level: String,
    /// Fixed seed for a reproducible scene; random when absent
    pub seed: Option<u64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            face: FaceConfig::default(),
            hands: HandsConfig::default(),
            center: CenterConfig::default(),
            leaves: LeafScatter::default(),
            camera: CameraConfig::default(),
            log_level: "info".to_string(),
            seed: None,
        }
    }
}

impl ClockConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ClockConfig = if yaml.trim().is_empty() {
            ClockConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let face = &self.face;
        if face.radius <= 0.0 {
            return Err(invalid("face.radius", "must be positive"));
        }
        if face.radius_spread < 0.0 {
            return Err(invalid("face.radius_spread", "must not be negative"));
        }
        if face.segment_count < MIN_CIRCLE_SEGMENTS {
            return Err(invalid("face.segment_count", format!("must be at least {}", MIN_CIRCLE_SEGMENTS)));
        }
        if face.solid_every == 0 {
            return Err(invalid("face.solid_every", "must be at least 1"));
        }
        face.perturbance.check_non_negative("face.perturbance")?;
        if face.reveal_dash <= 0.0 {
            return Err(invalid("face.reveal_dash", "must be positive"));
        }
        face.reveal_duration.check_non_negative("face.reveal_duration")?;
        face.reveal_delay.check_non_negative("face.reveal_delay")?;

        let hands = &self.hands;
        hands.second.check("hands.second")?;
        hands.minute.check("hands.minute")?;
        hands.hour.check("hands.hour")?;
        if hands.reveal_dash <= 0.0 {
            return Err(invalid("hands.reveal_dash", "must be positive"));
        }
        if hands.reveal_duration < 0.0 {
            return Err(invalid("hands.reveal_duration", "must not be negative"));
        }
        hands.reveal_delay.check_non_negative("hands.reveal_delay")?;
        if hands.timing.tween_duration < 0.0 {
            return Err(invalid("hands.tween_duration", "must not be negative"));
        }
        if !(hands.timing.zero_epsilon > 0.0 && hands.timing.zero_epsilon < 0.1) {
            return Err(invalid("hands.zero_epsilon", "must be in (0, 0.1)"));
        }

        let center = &self.center;
        if center.radius <= 0.0 {
            return Err(invalid("center.radius", "must be positive"));
        }
        if center.segment_count < MIN_CIRCLE_SEGMENTS {
            return Err(invalid("center.segment_count", format!("must be at least {}", MIN_CIRCLE_SEGMENTS)));
        }
        center.perturbance.check_non_negative("center.perturbance")?;
        center.colors()?;

        let leaves = &self.leaves;
        if leaves.face_band < 0.0 || leaves.face_band >= face.radius {
            return Err(invalid("leaves.face_band", "must be in [0, face.radius)"));
        }
        if leaves.hand_jitter < 0.0 {
            return Err(invalid("leaves.hand_jitter", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&leaves.saturation) {
            return Err(invalid("leaves.saturation", "must be in [0, 1]"));
        }
        leaves.scale.check_non_negative("leaves.scale")?;
        leaves.face_hue.check("leaves.face_hue")?;
        leaves.hand_hue.check("leaves.hand_hue")?;
        leaves.lightness.check_non_negative("leaves.lightness")?;
        leaves.target_opacity.check_non_negative("leaves.target_opacity")?;
        leaves.fade_delay.check_non_negative("leaves.fade_delay")?;
        leaves.fade_duration.check_non_negative("leaves.fade_duration")?;

        let camera = &self.camera;
        if !(camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance) {
            return Err(invalid("camera", "need 0 < min_distance <= max_distance"));
        }

        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| invalid("log_level", format!("unknown level `{}`", self.log_level)))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
