mod area;
mod distance;
mod length;

pub use area::Area;
pub use distance::{DistanceResult, DistanceShapeShape};
pub use length::Length;
