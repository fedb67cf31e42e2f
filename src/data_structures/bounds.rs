//! Axis-aligned bounding boxes.
//!
//! Region meshes are framed by the camera through their bounds: the centre is
//! where the camera looks, the horizontal footprint decides how high it flies.

use cgmath::{EuclideanSpace, Point3, Vector3};

/// An axis-aligned box spanned by its `min` and `max` corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |mut acc, p| {
            acc.min.x = acc.min.x.min(p.x);
            acc.min.y = acc.min.y.min(p.y);
            acc.min.z = acc.min.z.min(p.z);
            acc.max.x = acc.max.x.max(p.x);
            acc.max.y = acc.max.y.max(p.y);
            acc.max.z = acc.max.z.max(p.z);
            acc
        }))
    }

    pub fn center(&self) -> Point3<f32> {
        self.min.midpoint(self.max)
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// The larger of the two horizontal extents (x and z).
    pub fn footprint(&self) -> f32 {
        let size = self.size();
        size.x.max(size.z)
    }

    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
