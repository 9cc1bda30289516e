//! Fixed look-at camera with a reverse-Z perspective projection.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// View and projection matrices as uploaded to `@group(0)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(CameraUniform, [u8; 128]);

/// Camera looking from `eye` at `target`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Reverse-Z perspective: the near plane maps to depth 1, the far plane to 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Follow the surface size. Zero-height sizes (minimized windows) are ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect_ratio = width as f32 / height as f32;
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(30.0, 20.0, 90.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45f32.to_radians(),
            aspect_ratio: 1024.0 / 576.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
