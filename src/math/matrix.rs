use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    /// Counter-clockwise rotation about +z; hand groups pass negative angles
    /// to turn clockwise.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_negative_rotation_turns_clockwise() {
        // Twelve o'clock to three o'clock
        let result = Mat4::rotation_z(-FRAC_PI_2).transform_point(Vec3::UP);
        assert!((result.x - 1.0).abs() < 0.0001);
        assert!(result.y.abs() < 0.0001);
    }

    #[test]
    fn test_model_view_rotates_before_viewing() {
        // A hand at three o'clock seen from +z
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO, Vec3::UP);
        let model_view = view.mul(&Mat4::rotation_z(-FRAC_PI_2));
        let tip = model_view.transform_point(Vec3::UP.scale(5.0));
        assert!((tip.x - 5.0).abs() < 0.0001);
        assert!(tip.y.abs() < 0.0001);
        assert!((tip.z + 30.0).abs() < 0.0001);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 30.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let result = view.transform_point(eye);
        assert!(result.length() < 0.0001);

        let ahead = view.transform_point(Vec3::ZERO);
        assert!((ahead.z + 30.0).abs() < 0.0001);
    }
}
