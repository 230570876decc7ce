//! Physical quantities stored in canonical units.
//!
//! Lengths are kept in millimeters, angles in radians and areas in square
//! millimeters. Conversion to display units happens in [`super::unit`].

use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, Mul};

/// Marker for lengths.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct LengthDim;

/// Marker for plane angles.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct AngleDim;

/// Marker for areas.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct AreaDim;

/// A value of dimension `D`, expressed in the canonical unit of that dimension.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Quantity<D> {
    value: f64,
    dimension: PhantomData<D>,
}

/// Length in millimeters.
pub type QuantityLength = Quantity<LengthDim>;
/// Angle in radians.
pub type QuantityAngle = Quantity<AngleDim>;
/// Area in square millimeters.
pub type QuantityArea = Quantity<AreaDim>;

impl<D> Quantity<D> {
    /// Wraps a value already expressed in the canonical unit.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            dimension: PhantomData,
        }
    }

    /// Returns the value in the canonical unit.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }
}

impl QuantityLength {
    #[must_use]
    pub const fn millimeters(value: f64) -> Self {
        Self::new(value)
    }
}

impl QuantityAngle {
    #[must_use]
    pub const fn radians(value: f64) -> Self {
        Self::new(value)
    }

    #[must_use]
    pub fn degrees(value: f64) -> Self {
        Self::new(value.to_radians())
    }
}

impl QuantityArea {
    #[must_use]
    pub const fn square_millimeters(value: f64) -> Self {
        Self::new(value)
    }
}

impl<D> Add for Quantity<D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

impl<D> Mul<f64> for Quantity<D> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}

/// Sums in iteration order.
impl<D> Sum for Quantity<D> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(0.0), Add::add)
    }
}
