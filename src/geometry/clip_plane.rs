use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector2, Vector3, TOLERANCE};

/// A half-plane in form-local 2D space.
///
/// Points with `normal · p + constant >= 0` are kept; the rest are clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane2 {
    pub normal: Vector2,
    pub constant: f64,
}

impl ClipPlane2 {
    /// Creates a half-plane.
    #[must_use]
    pub fn new(normal: Vector2, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// The half-plane keeping the side `normal` points to, bounded by a line through `point`.
    #[must_use]
    pub fn through(point: &Point2, normal: Vector2) -> Self {
        Self::new(normal, -normal.dot(&point.coords))
    }

    /// Signed distance of `p` (scaled by `|normal|`).
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        self.normal.dot(&p.coords) + self.constant
    }

    /// Whether `p` survives the clip.
    #[must_use]
    pub fn keeps(&self, p: &Point2) -> bool {
        self.distance(p) >= 0.0
    }

    /// Two distinct points on the boundary line.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn boundary_points(&self) -> Result<(Point2, Point2)> {
        let len_sq = self.normal.norm_squared();
        if len_sq < TOLERANCE * TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let p0 = Point2::from(-self.normal * (self.constant / len_sq));
        let along = Vector2::new(-self.normal.y, self.normal.x);
        Ok((p0, p0 + along))
    }

    /// The four half-planes keeping the `width × height` rectangle centred on the origin.
    #[must_use]
    pub fn form_boundary(width: f64, height: f64) -> [Self; 4] {
        let (hw, hh) = (width * 0.5, height * 0.5);
        [
            Self::new(Vector2::new(1.0, 0.0), hw),
            Self::new(Vector2::new(-1.0, 0.0), hw),
            Self::new(Vector2::new(0.0, 1.0), hh),
            Self::new(Vector2::new(0.0, -1.0), hh),
        ]
    }
}

/// A half-space in world space: keeps `normal · p + constant >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane3 {
    pub normal: Vector3,
    pub constant: f64,
}

impl ClipPlane3 {
    /// Creates a half-space.
    #[must_use]
    pub fn new(normal: Vector3, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// Plane through three points, normal `(b - a) × (c - a)` normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn from_coplanar_points(a: &Point3, b: &Point3, c: &Point3) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("clip plane points are collinear".into()).into());
        }
        let normal = normal / len;
        Ok(Self::new(normal, -normal.dot(&a.coords)))
    }

    /// Signed distance of `p`.
    #[must_use]
    pub fn distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) + self.constant
    }

    /// Whether `p` survives the clip.
    #[must_use]
    pub fn keeps(&self, p: &Point3) -> bool {
        self.distance(p) >= 0.0
    }

    /// The same plane keeping the other side.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self::new(-self.normal, -self.constant)
    }
}
