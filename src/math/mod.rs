pub mod distance_3d;
pub mod quadrature;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rigid placement of a shape in the scene (rotation + translation).
pub type Placement = nalgebra::Isometry3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance below which two geometric values are considered identical.
///
/// Used to decide whether an ellipse is really a circle.
pub const CONFUSION: f64 = 1e-7;
