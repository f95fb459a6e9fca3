//! Camera utilities.
//!
//! The scene uses a slow automatic orbit around the model anchor. Angle
//! zero matches the original framing: the eye starts on the +Z axis at the
//! configured radius and height.

use glam::{Mat4, Vec3};

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn orbit(target: Vec3, radius: f32, height: f32, angle: f32, aspect: f32) -> Self {
        let offset = Vec3::new(angle.sin() * radius, height, angle.cos() * radius);
        Self {
            eye: target + offset,
            target,
            up: Vec3::Y,
            aspect,
            fovy: 75f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// Orthonormal right/up vectors of the view basis, for billboarding.
    pub fn right_up(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn orbit_angle_zero_sits_on_positive_z() {
        let c = Camera::orbit(Vec3::ZERO, 10.0, 1.0, 0.0, 16.0 / 9.0);
        assert!((c.eye - vec3(0.0, 1.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn billboard_basis_is_orthonormal() {
        let c = Camera::orbit(vec3(0.0, -6.5, 0.0), 10.0, 1.0, 1.3, 1.5);
        let (r, u) = c.right_up();
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
    }
}
