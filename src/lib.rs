//! Interactive measurement of picked B-rep entities.
//!
//! The crate carries a small boundary-representation kernel (curves,
//! surfaces, arena topology, tessellation and query operations) and the
//! measurement layer built on it: drivers computing positions, circles,
//! distances, lengths, angles and areas, displays rendering them in the
//! user's units, and a controller keeping both in step with a viewport's
//! selection.

pub mod error;
pub mod geometry;
pub mod math;
pub mod measure;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{KernelError, MeasureError, MeasureResult, Result};
