use crate::color::gradient_buffer;
use crate::error::GeometryError;
use crate::math::{Spherical, Vec3};
use crate::random::Random;
use super::curve::{self, CIRCLE_SAMPLES};
use super::primitive::{Material, Primitive, PrimitiveKind};
use super::style::{CircleStyle, ColorSpec, LineStyle, MIN_CIRCLE_SEGMENTS};

/// Builds wavy lines and loops.
///
/// Each call validates its inputs, generates perturbed anchors, fits a spline
/// through them and attaches either a flat material colour or a per-vertex
/// gradient. The returned [`Primitive`] is not added to any scene.
#[derive(Debug, Clone)]
pub struct PrimitiveFactory {
    rng: Random,
}

impl PrimitiveFactory {
    pub fn new(rng: Random) -> Self {
        Self { rng }
    }

    /// The random source, shared with other scene-building code
    pub fn rng(&mut self) -> &mut Random {
        &mut self.rng
    }

    /// Planar wavy line from `origin` heading `angle` radians for `length`.
    ///
    /// Produces `segment_count + 1` vertices at the origin's depth.
    pub fn create_line(
        &mut self,
        origin: Vec3,
        angle: f32,
        length: f32,
        style: &LineStyle,
    ) -> Result<Primitive, GeometryError> {
        require_positive("length", length)?;
        style.validate(1)?;

        let segments = style.segment_count;
        let anchors = curve::line_anchors(&mut self.rng, origin, angle, length, style.perturbance, segments);
        let points = curve::fit_open(anchors, segments + 1);

        self.finish(PrimitiveKind::Line, points, style)
    }

    /// Wavy line in 3-space; `direction.radius` is the line length.
    pub fn create_line_3d(
        &mut self,
        origin: Vec3,
        direction: Spherical,
        style: &LineStyle,
    ) -> Result<Primitive, GeometryError> {
        require_positive("length", direction.radius)?;
        style.validate(1)?;

        let segments = style.segment_count;
        let anchors = curve::line_anchors_3d(&mut self.rng, origin, direction, style.perturbance, segments);
        let points = curve::fit_open(anchors, segments + 1);

        self.finish(PrimitiveKind::Line, points, style)
    }

    /// Planar wavy loop of 360 vertices; `segment_count` sets how many
    /// perturbed anchors shape it.
    pub fn create_circle(
        &mut self,
        origin: Vec3,
        radius: f32,
        style: &CircleStyle,
    ) -> Result<Primitive, GeometryError> {
        require_positive("radius", radius)?;
        style.line.validate(MIN_CIRCLE_SEGMENTS)?;

        let anchors = curve::circle_anchors(
            &mut self.rng,
            origin,
            radius,
            style.line.perturbance,
            style.line.segment_count,
            style.start_angle,
        );
        let points = curve::fit_closed(anchors, CIRCLE_SAMPLES);

        self.finish(PrimitiveKind::LineLoop, points, &style.line)
    }

    fn finish(
        &mut self,
        kind: PrimitiveKind,
        points: Vec<Vec3>,
        style: &LineStyle,
    ) -> Result<Primitive, GeometryError> {
        let spec = match style.color {
            Some(spec) => spec,
            None => ColorSpec::Solid(self.rng.color()),
        };

        let mut material = style
            .material
            .clone()
            .unwrap_or_else(|| Material::basic(style.width));

        let colors = match spec {
            ColorSpec::Gradient(start, end) => {
                material.vertex_colors = true;
                Some(gradient_buffer(start, end, points.len())?)
            }
            ColorSpec::Solid(color) => {
                material.vertex_colors = false;
                material.color = color;
                None
            }
        };

        log::trace!("built {:?} with {} vertices", kind, points.len());
        Ok(Primitive::new(kind, points, colors, material))
    }
}

fn require_positive(name: &'static str, value: f32) -> Result<(), GeometryError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(name, value, "must be positive"))
    }
}
