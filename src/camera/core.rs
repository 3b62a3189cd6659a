use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::picking::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Camera {
    /// Camera configured from options, for a viewport of the given size.
    pub fn from_options(options: &CameraOptions, viewport: (u32, u32)) -> Self {
        let mut camera = Self {
            eye: Vec3::from_array(options.eye),
            target: Vec3::from_array(options.target),
            up: Vec3::Y,
            aspect: 1.0,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };
        camera.resize(viewport.0, viewport.1);
        camera
    }

    /// Track a new viewport size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Rotation of the camera about the world Y axis, zero when looking
    /// down -Z. Hovered items turn to this angle to face the viewer.
    pub fn yaw(&self) -> f32 {
        let forward = self.target - self.eye;
        (-forward.x).atan2(-forward.z)
    }

    /// Convert a pixel position to normalized device coordinates
    /// (`[-1, 1]`, +Y up). Returns `None` for an empty viewport.
    pub fn pixel_to_ndc(pixel: Vec2, viewport: (u32, u32)) -> Option<Vec2> {
        let (width, height) = viewport;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Vec2::new(
            (pixel.x / width as f32) * 2.0 - 1.0,
            -(pixel.y / height as f32) * 2.0 + 1.0,
        ))
    }

    /// World-space picking ray through a point in normalized device
    /// coordinates.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.build_matrix().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), (800, 600))
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = camera();
        assert!(cam.yaw().abs() < 1e-6);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut cam = camera();
        cam.resize(0, 100);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
        cam.resize(100, 100);
        assert_eq!(cam.aspect, 1.0);
    }

    #[test]
    fn pixel_to_ndc_maps_corners() {
        let viewport = (200, 100);
        assert_eq!(
            Camera::pixel_to_ndc(Vec2::ZERO, viewport),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(
            Camera::pixel_to_ndc(Vec2::new(100.0, 50.0), viewport),
            Some(Vec2::ZERO)
        );
        assert_eq!(Camera::pixel_to_ndc(Vec2::ZERO, (0, 10)), None);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let cam = camera();
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        let expected = (cam.target - cam.eye).normalize();
        assert!(ray.direction.dot(expected) > 0.9999);
    }

    #[test]
    fn yaw_follows_eye_position() {
        let mut cam = camera();
        cam.eye = Vec3::new(8.0, 0.0, 0.0);
        // Looking down -X is a quarter turn to the right of -Z.
        assert!((cam.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
