use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::GeometryError;
use super::primitive::Material;

/// Minimum anchors for a closed loop; two would collapse to a line.
pub const MIN_CIRCLE_SEGMENTS: usize = 3;

/// Flat colour or a start/end gradient across the vertices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Solid(Color),
    Gradient(Color, Color),
}

/// Appearance of a wavy line.
///
/// `color: None` draws a random colour from the factory's random source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub width: f32,
    pub color: Option<ColorSpec>,
    /// Max random displacement of each anchor, in scene units
    pub perturbance: f32,
    pub segment_count: usize,
    #[serde(skip)]
    pub material: Option<Material>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: None,
            perturbance: 0.0,
            segment_count: 1,
            material: None,
        }
    }
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(ColorSpec::Solid(color));
        self
    }

    pub fn with_gradient(mut self, start: Color, end: Color) -> Self {
        self.color = Some(ColorSpec::Gradient(start, end));
        self
    }

    pub fn with_perturbance(mut self, perturbance: f32) -> Self {
        self.perturbance = perturbance;
        self
    }

    pub fn with_segments(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Check the fields shared by lines and circles, then the segment floor.
    pub(crate) fn validate(&self, min_segments: usize) -> Result<(), GeometryError> {
        if !(self.width > 0.0) {
            return Err(GeometryError::invalid("width", self.width, "must be positive"));
        }
        if !(self.perturbance >= 0.0) {
            return Err(GeometryError::invalid("perturbance", self.perturbance, "must not be negative"));
        }
        if self.segment_count < min_segments {
            let reason = if min_segments == MIN_CIRCLE_SEGMENTS {
                "circles need at least 3 segments"
            } else {
                "lines need at least 1 segment"
            };
            return Err(GeometryError::invalid("segment_count", self.segment_count as f32, reason));
        }
        Ok(())
    }
}

/// Appearance of a wavy closed loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleStyle {
    #[serde(flatten)]
    pub line: LineStyle,
    /// Angle of the first anchor, radians
    pub start_angle: f32,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            line: LineStyle {
                segment_count: 360,
                ..LineStyle::default()
            },
            start_angle: 0.0,
        }
    }
}

impl CircleStyle {
    pub fn new(line: LineStyle) -> Self {
        Self { line, start_angle: 0.0 }
    }

    pub fn with_start_angle(mut self, start_angle: f32) -> Self {
        self.start_angle = start_angle;
        self
    }
}
