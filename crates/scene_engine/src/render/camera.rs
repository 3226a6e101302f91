//! Camera: the viewpoint rendering is performed relative to

use crate::foundation::math::{Mat4, Transform};

/// A camera with a transform and a cached view matrix
///
/// `update` runs once per frame before rendering; it refreshes the cached
/// view matrix from the camera transform.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            view: Mat4::identity(),
        }
    }
}

impl Camera {
    /// Create a camera at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// The camera's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the camera's transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Per-frame update: refresh the cached view matrix
    pub fn update(&mut self) {
        self.view = self.transform.inverse().to_matrix();
    }

    /// The view matrix as of the last `update`
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }
}
