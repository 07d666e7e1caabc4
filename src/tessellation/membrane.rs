use crate::math::{lerp3, Point2, Point3, Vector3};

use super::TriangleMesh;

/// Generates the ruled surface between a projector-side and a screen-side
/// point sequence.
///
/// Column `c` interpolates from `ps[c]` to `qs[c]`; `segments` rows of quads
/// subdivide that span. Normals are left zeroed: run
/// [`ComputeNormals`](super::ComputeNormals) when shading needs them.
#[derive(Debug)]
pub struct TessellateMembrane {
    ps: Vec<Point3>,
    qs: Vec<Point3>,
    segments: usize,
    closed: bool,
}

impl TessellateMembrane {
    /// Creates a new membrane tessellation. `segments == 0` is treated as 1.
    #[must_use]
    pub fn new(ps: Vec<Point3>, qs: Vec<Point3>, segments: usize) -> Self {
        Self {
            ps,
            qs,
            segments: segments.max(1),
            closed: false,
        }
    }

    /// A membrane fanning out from a single projector point to `screen`.
    #[must_use]
    pub fn projected(projector: Point3, screen: Vec<Point3>, segments: usize) -> Self {
        let ps = vec![projector; screen.len()];
        Self::new(ps, screen, segments)
    }

    /// Also stitches the last column back to the first.
    #[must_use]
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Executes the tessellation.
    ///
    /// Mismatched or empty point sequences produce an empty mesh, as does
    /// a grid with more vertices than `u32` indices can address.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> TriangleMesh {
        let n = self.ps.len();
        if n != self.qs.len() {
            tracing::warn!(
                projector_points = n,
                screen_points = self.qs.len(),
                "membrane point sequences differ in length; emitting empty mesh"
            );
            return TriangleMesh::default();
        }
        if n == 0 {
            return TriangleMesh::default();
        }

        let rows = self.segments + 1;
        let Some(vertex_count) = rows
            .checked_mul(n)
            .filter(|&count| u32::try_from(count).is_ok())
        else {
            tracing::warn!(
                rows,
                columns = n,
                "membrane has too many vertices for u32 indices; emitting empty mesh"
            );
            return TriangleMesh::default();
        };

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(vertex_count),
            normals: vec![Vector3::zeros(); vertex_count],
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::new(),
        };

        for row in 0..rows {
            let v = row as f64 / self.segments as f64;
            for (col, (p, q)) in self.ps.iter().zip(&self.qs).enumerate() {
                mesh.vertices.push(lerp3(p, q, v));
                mesh.uvs.push(Point2::new(col as f64 / n as f64, v));
            }
        }

        let columns = if self.closed && n > 2 { n } else { n - 1 };
        mesh.indices.reserve(self.segments * columns * 2);
        // Every index is below `vertex_count`, which fits in u32.
        for row in 0..self.segments {
            for col in 0..columns {
                let next = (col + 1) % n;
                let a = (row * n + col) as u32;
                let b = (row * n + next) as u32;
                let c = ((row + 1) * n + next) as u32;
                let d = ((row + 1) * n + col) as u32;
                mesh.indices.push([a, b, d]);
                mesh.indices.push([b, c, d]);
            }
        }

        mesh
    }
}
