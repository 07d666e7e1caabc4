pub mod newton_2d;
pub mod ramp;
pub mod transform;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Smallest wavelength used when deriving a wavenumber from animated geometry.
pub const MIN_WAVELENGTH: f64 = 1e-3;

/// Wavenumber `2π / λ` with the wavelength clamped away from zero.
#[must_use]
pub fn wavenumber(wavelength: f64) -> f64 {
    let lambda = if wavelength.abs() < MIN_WAVELENGTH {
        MIN_WAVELENGTH.copysign(if wavelength == 0.0 { 1.0 } else { wavelength })
    } else {
        wavelength
    };
    std::f64::consts::TAU / lambda
}

/// Linear interpolation between two 3D points.
#[must_use]
pub fn lerp3(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}
