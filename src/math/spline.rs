use super::Vec3;

/// Squared-distance threshold below which centripetal knot spacing is
/// treated as coincident.
const KNOT_EPSILON: f32 = 1e-4;

/// Catmull-Rom spline through a list of anchor points.
///
/// Open splines use the uniform parameterization with clamped end tangents.
/// Closed splines wrap around and use the centripetal parameterization, which
/// avoids cusps and self-intersections on irregular loops.
#[derive(Debug, Clone)]
pub struct CatmullRomSpline {
    pub points: Vec<Vec3>,
    pub closed: bool,
}

impl CatmullRomSpline {
    pub fn open(points: Vec<Vec3>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn closed(points: Vec<Vec3>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Evaluate spline at parameter t (0.0 to 1.0 across entire spline)
    pub fn evaluate(&self, t: f32) -> Vec3 {
        if self.points.len() < 2 {
            return self.points.first().cloned().unwrap_or(Vec3::ZERO);
        }

        let t = t.clamp(0.0, 1.0);
        if self.closed {
            self.evaluate_closed(t)
        } else {
            self.evaluate_open(t)
        }
    }

    fn evaluate_open(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let segments = n - 1;
        let total_t = t * segments as f32;
        let segment = (total_t as usize).min(segments - 1);
        let local_t = total_t - segment as f32;

        // Four control points with endpoint clamping
        let p0 = if segment == 0 {
            self.points[0]
        } else {
            self.points[segment - 1]
        };
        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p3 = if segment + 2 >= n {
            self.points[n - 1]
        } else {
            self.points[segment + 2]
        };

        evaluate_catmull_rom(p0, p1, p2, p3, local_t)
    }

    fn evaluate_closed(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let total_t = t * n as f32;
        let segment = total_t.floor() as usize;
        let local_t = total_t - segment as f32;

        let p0 = self.points[(segment + n - 1) % n];
        let p1 = self.points[segment % n];
        let p2 = self.points[(segment + 1) % n];
        let p3 = self.points[(segment + 2) % n];

        evaluate_centripetal(p0, p1, p2, p3, local_t)
    }

    /// Sample spline at N evenly spaced parameters, both ends included.
    ///
    /// For a closed spline the last sample coincides with the first.
    pub fn sample(&self, n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1).max(1) as f32;
                self.evaluate(t)
            })
            .collect()
    }
}

/// Evaluate a uniform Catmull-Rom segment between p1 and p2
pub fn evaluate_catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let m1 = (p2 - p0).scale(0.5);
    let m2 = (p3 - p1).scale(0.5);

    hermite_curve(p1, p2, m1, m2, t)
}

/// Evaluate a centripetal Catmull-Rom segment between p1 and p2
pub fn evaluate_centripetal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    // Knot spacing is distance^0.5, i.e. squared distance^0.25
    let mut dt0 = p0.distance_squared(&p1).powf(0.25);
    let mut dt1 = p1.distance_squared(&p2).powf(0.25);
    let mut dt2 = p2.distance_squared(&p3).powf(0.25);

    if dt1 < KNOT_EPSILON {
        dt1 = 1.0;
    }
    if dt0 < KNOT_EPSILON {
        dt0 = dt1;
    }
    if dt2 < KNOT_EPSILON {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0).scale(1.0 / dt0) - (p2 - p0).scale(1.0 / (dt0 + dt1))
        + (p2 - p1).scale(1.0 / dt1))
        .scale(dt1);
    let m2 = ((p2 - p1).scale(1.0 / dt1) - (p3 - p1).scale(1.0 / (dt1 + dt2))
        + (p3 - p2).scale(1.0 / dt2))
        .scale(dt1);

    hermite_curve(p1, p2, m1, m2, t)
}

/// Cubic Hermite interpolation between p0 and p1 with tangents m0, m1
pub fn hermite_curve(p0: Vec3, p1: Vec3, m0: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p0.scale(h00) + m0.scale(h10) + p1.scale(h01) + m1.scale(h11)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ]
    }

    #[test]
    fn test_open_spline_endpoints() {
        let spline = CatmullRomSpline::open(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);

        let start = spline.evaluate(0.0);
        assert!(start.x.abs() < 0.0001 && start.y.abs() < 0.0001);

        let end = spline.evaluate(1.0);
        assert!((end.x - 2.0).abs() < 0.0001 && end.y.abs() < 0.0001);
    }

    #[test]
    fn test_open_spline_passes_through_anchors() {
        let spline = CatmullRomSpline::open(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            Vec3::new(3.0, 0.5, 0.0),
        ]);
        let p = spline.evaluate(1.0 / 3.0);
        assert!((p.x - 1.0).abs() < 0.001);
        assert!((p.y - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_two_point_open_spline_is_straight() {
        let spline = CatmullRomSpline::open(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let samples = spline.sample(5);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], Vec3::ZERO);
        assert_eq!(samples[4], Vec3::new(10.0, 0.0, 0.0));
        for w in samples.windows(2) {
            assert!(w[1].y.abs() < 0.0001);
            assert!(w[1].x > w[0].x);
        }
    }

    #[test]
    fn test_closed_spline_wraps_to_start() {
        let spline = CatmullRomSpline::closed(square());
        let start = spline.evaluate(0.0);
        let end = spline.evaluate(1.0);
        assert!(start.distance(&end) < 0.0001);
        assert!((start.x - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_closed_spline_passes_through_anchors() {
        let points = square();
        let spline = CatmullRomSpline::closed(points.clone());
        for (i, anchor) in points.iter().enumerate() {
            let p = spline.evaluate(i as f32 / points.len() as f32);
            assert!(p.distance(anchor) < 0.001, "anchor {} missed: {:?}", i, p);
        }
    }

    #[test]
    fn test_closed_spline_approximates_circle() {
        let anchors: Vec<Vec3> = (0..12)
            .map(|i| {
                let a = i as f32 * TAU / 12.0;
                Vec3::new(5.0 * a.cos(), 5.0 * a.sin(), 0.0)
            })
            .collect();
        let samples = CatmullRomSpline::closed(anchors).sample(360);
        for p in &samples {
            assert!((p.length() - 5.0).abs() < 0.05);
        }
        let circumference: f32 = samples.windows(2).map(|w| w[0].distance(&w[1])).sum();
        assert!((circumference - TAU * 5.0).abs() < 0.2);
    }

    #[test]
    fn test_centripetal_tolerates_duplicate_points() {
        let p = Vec3::new(1.0, 1.0, 0.0);
        let v = evaluate_centripetal(p, p, p, Vec3::new(2.0, 1.0, 0.0), 0.5);
        assert!(v.x.is_finite() && v.y.is_finite());
    }

    #[test]
    fn test_hermite_endpoints() {
        let p0 = Vec3::new(0.0, 0.0, 0.0);
        let p1 = Vec3::new(1.0, 1.0, 0.0);
        let m = Vec3::new(1.0, 0.0, 0.0);

        assert!(hermite_curve(p0, p1, m, m, 0.0).x.abs() < 0.0001);
        assert!((hermite_curve(p0, p1, m, m, 1.0).x - 1.0).abs() < 0.0001);
    }
}
