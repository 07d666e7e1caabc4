use crate::error::Result;
use crate::geometry::{ClipPlane2, ClipPlane3};
use crate::math::transform::{place_point, transform_normal};
use crate::math::{Matrix4, Point3, Vector3};

/// Lifts a form-local clip half-plane into a world-space half-space that
/// also contains the projector.
///
/// Transforming the 2D plane by the placement alone would clip the flat
/// screen image but not the tapered membrane running back to the projector.
/// The derived plane passes through the transformed clip line *and* the
/// projector, and keeps the side matching the original orientation.
#[derive(Debug, Clone)]
pub struct DeriveClipPlane {
    local: ClipPlane2,
    placement: Matrix4,
    projector: Point3,
}

impl DeriveClipPlane {
    /// Creates a new `DeriveClipPlane` operation.
    ///
    /// `projector` is in world space; `placement` maps form-local
    /// coordinates (`z = 0`) to world space.
    #[must_use]
    pub fn new(local: ClipPlane2, placement: Matrix4, projector: Point3) -> Self {
        Self {
            local,
            placement,
            projector,
        }
    }

    /// Executes the derivation.
    ///
    /// # Errors
    ///
    /// Returns an error if the local normal is zero-length or the projector
    /// lies on the transformed clip line.
    pub fn execute(&self) -> Result<ClipPlane3> {
        let (a, b) = self.local.boundary_points()?;
        let a = place_point(&self.placement, &a);
        let b = place_point(&self.placement, &b);

        let plane = ClipPlane3::from_coplanar_points(&a, &b, &self.projector)?;

        let local_normal = Vector3::new(self.local.normal.x, self.local.normal.y, 0.0);
        let naive = transform_normal(&self.placement, &local_normal);
        if plane.normal.dot(&naive) < 0.0 {
            Ok(plane.flipped())
        } else {
            Ok(plane)
        }
    }
}
