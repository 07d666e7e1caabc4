use crate::error::{Result, TessellationError};
use crate::math::{Vector3, TOLERANCE};

use super::TriangleMesh;

/// Derives smooth vertex normals for a mesh in place.
///
/// Each triangle's unnormalized face normal (twice its area, so larger faces
/// weigh more) is added to its three vertices, which are then normalized.
/// Vertices only touched by degenerate triangles keep a zero normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeNormals {
    flip: bool,
}

impl ComputeNormals {
    /// Creates a new `ComputeNormals` pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the normals to the back side of the winding instead.
    #[must_use]
    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Executes the pass on `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is out of bounds.
    pub fn execute(&self, mesh: &mut TriangleMesh) -> Result<()> {
        let n = mesh.vertices.len();
        let mut normals = vec![Vector3::zeros(); n];

        for tri in &mesh.indices {
            let [a, b, c] = tri.map(|i| i as usize);
            if a >= n || b >= n || c >= n {
                return Err(TessellationError::InvalidParameters(format!(
                    "triangle {tri:?} indexes past {n} vertices"
                ))
                .into());
            }
            let pa = mesh.vertices[a];
            let face = (mesh.vertices[b] - pa).cross(&(mesh.vertices[c] - pa));
            for i in [a, b, c] {
                normals[i] += face;
            }
        }

        let sign = if self.flip { -1.0 } else { 1.0 };
        for normal in &mut normals {
            let len = normal.norm();
            *normal = if len < TOLERANCE {
                Vector3::zeros()
            } else {
                *normal * (sign / len)
            };
        }

        mesh.normals = normals;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::tessellation::TessellateMembrane;
    use approx::assert_relative_eq;

    fn flat_membrane() -> TriangleMesh {
        let ps = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let qs = vec![Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 1.0, 0.0)];
        TessellateMembrane::new(ps, qs, 2).execute()
    }

    #[test]
    fn flat_mesh_has_uniform_normals() {
        let mut mesh = flat_membrane();
        ComputeNormals::new().execute(&mut mesh).unwrap();
        for n in &mesh.normals {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n.z.abs(), 1.0, epsilon = 1e-12);
        }
        let z = mesh.normals[0].z;
        assert!(mesh.normals.iter().all(|n| (n.z - z).abs() < 1e-12));
    }

    #[test]
    fn flipped_normals_oppose() {
        let mut a = flat_membrane();
        let mut b = flat_membrane();
        ComputeNormals::new().execute(&mut a).unwrap();
        ComputeNormals::new().flipped(true).execute(&mut b).unwrap();
        for (na, nb) in a.normals.iter().zip(&b.normals) {
            assert_relative_eq!(*na, -*nb);
        }
    }

    #[test]
    fn out_of_range_index_fails() {
        let mut mesh = flat_membrane();
        mesh.indices.push([0, 1, 99]);
        assert!(ComputeNormals::new().execute(&mut mesh).is_err());
    }

    #[test]
    fn degenerate_fan_keeps_zero_normals() {
        let apex = Point3::new(0.0, 0.0, 1.0);
        let screen = vec![Point3::origin(), Point3::origin()];
        let mut mesh = TessellateMembrane::projected(apex, screen, 1).execute();
        ComputeNormals::new().execute(&mut mesh).unwrap();
        assert!(mesh.normals.iter().all(|n| n.norm() == 0.0));
    }
}
