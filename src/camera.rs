//! Camera, projection and the camera uniform.
//!
//! The camera has no controller of its own: its eye and target are written
//! every frame from the [`CameraRig`](crate::animation::CameraRig).

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Views closer than this to vertical switch to the fallback up vector.
const PARALLEL_EPSILON: f32 = 1e-4;

/// A look-at camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new<E: Into<Point3<f32>>, T: Into<Point3<f32>>>(eye: E, target: T) -> Self {
        Self {
            eye: eye.into(),
            target: target.into(),
        }
    }

    /// The up vector used for the current view direction.
    ///
    /// +Y unless the camera looks straight up or down, where +Y is parallel
    /// to the view and −Z takes over. The overview looks straight down, so
    /// north (−Z) ends up at the top of the screen.
    pub fn up(&self) -> Vector3<f32> {
        up_for(self.target - self.eye)
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let target = if (self.target - self.eye).magnitude2() <= f32::EPSILON {
            // Looking at yourself has no direction; look down instead.
            self.eye - Vector3::unit_y()
        } else {
            self.target
        };
        Matrix4::look_at_rh(self.eye, target, up_for(target - self.eye))
    }
}

fn up_for(forward: Vector3<f32>) -> Vector3<f32> {
    if forward.magnitude2() <= f32::EPSILON {
        return Vector3::unit_y();
    }
    let alignment = forward.normalize().dot(Vector3::unit_y()).abs();
    if 1.0 - alignment < PARALLEL_EPSILON {
        -Vector3::unit_z()
    } else {
        Vector3::unit_y()
    }
}

/// Perspective projection. `fovy` is the vertical field of view.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.eye.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// The camera together with the GPU resources that feed it to the shaders.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
