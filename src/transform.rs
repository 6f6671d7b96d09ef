/// A 4x4 transformation matrix stored in row-major order.
///
/// Flip rotations happen around the X or Y axis, so the matrix carries a
/// perspective row: projecting with [`Transform::apply_to_point`] divides by
/// `w` and the face nearer the camera is drawn larger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Matrix data in row-major order: [row0, row1, row2, row3]
    pub data: [f32; 16],
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, 0.0, // row 1
            0.0, 0.0, 1.0, 0.0, // row 2
            0.0, 0.0, 0.0, 1.0, // row 3
        ],
    };

    pub fn translate(x: f32, y: f32) -> Self {
        let mut data = Self::IDENTITY.data;
        data[3] = x;
        data[7] = y;
        Self { data }
    }

    /// Rotation around the horizontal (X) axis
    pub fn rotate_x_degrees(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, // row 0
                0.0, cos, -sin, 0.0, // row 1
                0.0, sin, cos, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Rotation around the vertical (Y) axis
    pub fn rotate_y_degrees(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            data: [
                cos, 0.0, sin, 0.0, // row 0
                0.0, 1.0, 0.0, 0.0, // row 1
                -sin, 0.0, cos, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Perspective projection for a camera `distance` units in front of the z = 0 plane.
    pub fn perspective(distance: f32) -> Self {
        let mut data = Self::IDENTITY.data;
        if distance > 0.0 {
            data[14] = -1.0 / distance;
        }
        Self { data }
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let a = &self.data;
        let b = &other.data;
        let mut result = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                result[row * 4 + col] = (0..4).map(|k| a[row * 4 + k] * b[k * 4 + col]).sum();
            }
        }
        Transform { data: result }
    }

    /// Map a point on the z = 0 plane and project it back onto that plane.
    pub fn apply_to_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.data;
        let px = m[0] * x + m[1] * y + m[3];
        let py = m[4] * x + m[5] * y + m[7];
        let w = m[12] * x + m[13] * y + m[15];
        if w.abs() < 1e-6 {
            return (px, py);
        }
        (px / w, py / w)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
