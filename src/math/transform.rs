use super::{Matrix4, Point2, Point3, Vector3};

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    if v.w.abs() > super::TOLERANCE && (v.w - 1.0).abs() > super::TOLERANCE {
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    } else {
        Point3::new(v.x, v.y, v.z)
    }
}

/// Transforms a direction vector by a 4x4 matrix (ignoring translation).
#[must_use]
pub fn transform_direction(matrix: &Matrix4, dir: &Vector3) -> Vector3 {
    let v = matrix * nalgebra::Vector4::new(dir.x, dir.y, dir.z, 0.0);
    Vector3::new(v.x, v.y, v.z)
}

/// Transforms a surface normal: inverse transpose of the linear part.
///
/// Falls back to [`transform_direction`] when the matrix is singular.
#[must_use]
pub fn transform_normal(matrix: &Matrix4, normal: &Vector3) -> Vector3 {
    let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    match linear.try_inverse() {
        Some(inv) => inv.transpose() * normal,
        None => transform_direction(matrix, normal),
    }
}

/// Lifts a form-plane point into the placement's world space (`z = 0` locally).
#[must_use]
pub fn place_point(matrix: &Matrix4, point: &Point2) -> Point3 {
    transform_point(matrix, &Point3::new(point.x, point.y, 0.0))
}

/// Placement matrix `T * R_y * S` for a form standing at `position`.
#[must_use]
pub fn placement(position: &Vector3, rotation_y: f64, scale: f64) -> Matrix4 {
    Matrix4::new_translation(position)
        * nalgebra::Rotation3::from_euler_angles(0.0, rotation_y, 0.0).to_homogeneous()
        * Matrix4::new_scaling(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_keeps_points() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(transform_point(&Matrix4::identity(), &p), p);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Matrix4::new_translation(&Vector3::new(5.0, 3.0, 2.0));
        assert_relative_eq!(
            transform_point(&m, &Point3::origin()),
            Point3::new(5.0, 3.0, 2.0)
        );
        assert_relative_eq!(transform_direction(&m, &Vector3::x()), Vector3::x());
    }

    #[test]
    fn normal_survives_non_uniform_scale() {
        let m = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0));
        // Plane x + y = 0 has normal (1, 1, 0); after scaling x by 2 it becomes x/2 + y = 0.
        let n = transform_normal(&m, &Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(n, Vector3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn placement_rotates_about_y() {
        let m = placement(&Vector3::new(0.0, 0.0, -4.0), FRAC_PI_2, 2.0);
        let p = place_point(&m, &Point2::new(1.0, 1.0));
        assert_relative_eq!(p, Point3::new(0.0, 2.0, -6.0), epsilon = 1e-12);
    }
}
