use crate::color::Color;
use crate::math::Vec3;

/// Gap used by the "reveal" material: long enough that only the first dash
/// of any line is ever visible.
pub const REVEAL_GAP: f32 = 1e10;

/// How the renderer joins the sampled points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Open polyline
    Line,
    /// Closed polyline, last point joined back to the first
    LineLoop,
}

/// Line dash pattern, in scene units along the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub dash_size: f32,
    pub gap_size: f32,
}

/// Visual properties of a primitive.
///
/// Geometry is fixed once built; these fields are what tweens animate.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub line_width: f32,
    /// Use the geometry's per-vertex colour buffer instead of `color`
    pub vertex_colors: bool,
    pub dash: Option<Dash>,
}

impl Default for Material {
    fn default() -> Self {
        Self::basic(1.0)
    }
}

impl Material {
    pub fn basic(line_width: f32) -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            line_width,
            vertex_colors: false,
            dash: None,
        }
    }

    /// Dashed material that starts fully hidden; growing `dash_size` draws
    /// the line from its first vertex onwards.
    pub fn dashed_reveal() -> Self {
        Self {
            dash: Some(Dash {
                dash_size: 0.0,
                gap_size: REVEAL_GAP,
            }),
            vertex_colors: true,
            ..Self::basic(1.0)
        }
    }

    pub fn dash_size(&self) -> f32 {
        self.dash.map(|d| d.dash_size).unwrap_or(0.0)
    }

    pub fn set_dash_size(&mut self, size: f32) {
        if let Some(dash) = self.dash.as_mut() {
            dash.dash_size = size;
        }
    }
}

/// Renderable wavy line or loop.
///
/// Owned by whoever placed it in the scene; the factory keeps no reference.
#[derive(Debug, Clone)]
pub struct Primitive {
    kind: PrimitiveKind,
    points: Vec<Vec3>,
    colors: Option<Vec<f32>>,
    line_distances: Vec<f32>,
    pub material: Material,
}

impl Primitive {
    pub(crate) fn new(kind: PrimitiveKind, points: Vec<Vec3>, colors: Option<Vec<f32>>, material: Material) -> Self {
        let line_distances = cumulative_distances(&points);
        Self {
            kind,
            points,
            colors,
            line_distances,
            material,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Per-vertex RGB triples, present for gradient primitives
    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    /// Distance along the polyline from the first vertex to each vertex
    pub fn line_distances(&self) -> &[f32] {
        &self.line_distances
    }

    pub fn total_length(&self) -> f32 {
        self.line_distances.last().copied().unwrap_or(0.0)
    }

    /// Interleaved vertex data for GPU upload.
    /// Layout: position(3) + color(3) + line distance(1) = 7 floats
    pub fn vertex_data(&self) -> Vec<f32> {
        let flat = self.material.color.to_array();
        let mut data = Vec::with_capacity(self.points.len() * 7);

        for (i, p) in self.points.iter().enumerate() {
            data.extend_from_slice(&p.to_array());
            match &self.colors {
                Some(colors) => data.extend_from_slice(&colors[i * 3..i * 3 + 3]),
                None => data.extend_from_slice(&flat),
            }
            data.push(self.line_distances[i]);
        }

        data
    }
}

fn cumulative_distances(points: &[Vec3]) -> Vec<f32> {
    let mut total = 0.0;
    let mut distances = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += points[i - 1].distance(p);
        }
        distances.push(total);
    }
    distances
}
