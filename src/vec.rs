//! Points and sizes on the layout plane.

use std::ops::{Add, Mul, Neg, Sub};

use num::traits::Zero;

use crate::XY;

/// Simple 2D vector, in pixels.
///
/// Used both for positions (`origin`, `offset`) and for sizes (offers,
/// committed width and height).
pub type Vec2 = XY<f64>;

impl XY<f64> {
    /// Returns a copy with negative coordinates replaced by `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::Vec2;
    /// assert_eq!(Vec2::new(-3.0, 4.0).non_negative(), Vec2::new(0.0, 4.0));
    /// ```
    pub fn non_negative(self) -> Self {
        self.map(|v| v.max(0.0))
    }

    /// Term-by-term minimum.
    pub fn or_min<O: Into<Self>>(self, other: O) -> Self {
        self.zip_map(other.into(), f64::min)
    }

    /// Term-by-term maximum.
    pub fn or_max<O: Into<Self>>(self, other: O) -> Self {
        self.zip_map(other.into(), f64::max)
    }

    /// Returns `true` if `self` could fit inside `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::Vec2;
    /// let v = Vec2::new(1.0, 2.0);
    /// assert!(v.fits_in((1.0, 2.0)));
    /// assert!(!v.fits_in((2.0, 1.5)));
    /// ```
    pub fn fits_in<O: Into<Self>>(&self, other: O) -> bool {
        let other = other.into();
        self.x <= other.x && self.y <= other.y
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if `self` and `other` differ by at most `epsilon` on
    /// each axis.
    pub fn approx_eq<O: Into<Self>>(&self, other: O, epsilon: f64) -> bool {
        let other = other.into();
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl<T: Zero + Clone> Zero for XY<T> {
    fn zero() -> Self {
        Self::both_from(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl<T, O> Add<O> for XY<T>
where
    T: Add<Output = T>,
    O: Into<XY<T>>,
{
    type Output = Self;

    fn add(self, other: O) -> Self {
        self.zip_map(other.into(), Add::add)
    }
}

impl<T, O> Sub<O> for XY<T>
where
    T: Sub<Output = T>,
    O: Into<XY<T>>,
{
    type Output = Self;

    fn sub(self, other: O) -> Self {
        self.zip_map(other.into(), Sub::sub)
    }
}

impl<T: Neg<Output = T>> Neg for XY<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(Neg::neg)
    }
}

impl Mul<f64> for XY<f64> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

/// Term-by-term product, used to scale a slack by an alignment proportion.
impl Mul<XY<f64>> for XY<f64> {
    type Output = Self;

    fn mul(self, rhs: XY<f64>) -> Self {
        self.zip_map(rhs, |a, b| a * b)
    }
}
