use crate::direction::Orientation;
use std::iter;

/// A generic structure with a value for each axis.
///
/// Most of the layout code is written once and run for both axes: the
/// horizontal value lives in `x`, the vertical one in `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XY<T> {
    /// X-axis value
    pub x: T,
    /// Y-axis value
    pub y: T,
}

impl<T> IntoIterator for XY<T> {
    type Item = T;
    type IntoIter = iter::Chain<iter::Once<T>, iter::Once<T>>;

    /// Iterate over x, then y.
    fn into_iter(self) -> Self::IntoIter {
        iter::once(self.x).chain(iter::once(self.y))
    }
}

impl<T> XY<T> {
    /// Creates a new `XY` from the given values.
    pub const fn new(x: T, y: T) -> Self {
        XY { x, y }
    }

    /// Creates a new `XY` by applying `f` to `x` and `y`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::XY;
    /// let xy = XY::new(1, 2);
    ///
    /// assert_eq!(xy.map(|v| v * 2), XY::new(2, 4));
    /// assert_eq!(xy.map(|v| v > 1), XY::new(false, true));
    /// ```
    pub fn map<U, F>(self, f: F) -> XY<U>
    where
        F: Fn(T) -> U,
    {
        XY::new(f(self.x), f(self.y))
    }

    /// Return a `XY` with references to this one's values.
    pub fn as_ref(&self) -> XY<&T> {
        XY::new(&self.x, &self.y)
    }

    /// Returns a reference to the value on the given axis.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::XY;
    /// # use trellis::direction::Orientation;
    /// let xy = XY::new(1, 2);
    /// assert_eq!(xy.get(Orientation::Horizontal), &1);
    /// assert_eq!(xy.get(Orientation::Vertical), &2);
    /// ```
    pub fn get(&self, o: Orientation) -> &T {
        match o {
            Orientation::Horizontal => &self.x,
            Orientation::Vertical => &self.y,
        }
    }

    /// Returns a mutable reference to the value on the given axis.
    pub fn get_mut(&mut self, o: Orientation) -> &mut T {
        match o {
            Orientation::Horizontal => &mut self.x,
            Orientation::Vertical => &mut self.y,
        }
    }

    /// Returns a new `XY` of tuples made by zipping `self` and `other`.
    pub fn zip<U>(self, other: XY<U>) -> XY<(T, U)> {
        XY::new((self.x, other.x), (self.y, other.y))
    }

    /// Returns a new `XY` of tuples made by zipping `self`, `a` and `b`.
    pub fn zip3<U, V>(self, a: XY<U>, b: XY<V>) -> XY<(T, U, V)> {
        XY::new((self.x, a.x, b.x), (self.y, a.y, b.y))
    }

    /// Returns a new `XY` by calling `f` on `self` and `other` for each axis.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::XY;
    /// let a = XY::new(3.0, 1.0);
    /// let b = XY::new(2.0, 5.0);
    /// assert_eq!(a.zip_map(b, f64::min), XY::new(2.0, 1.0));
    /// ```
    pub fn zip_map<U, V, F>(self, other: XY<U>, f: F) -> XY<V>
    where
        F: Fn(T, U) -> V,
    {
        XY::new(f(self.x, other.x), f(self.y, other.y))
    }
}

impl<T: Clone> XY<T> {
    /// Creates a `XY` with both `x` and `y` set to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::XY;
    /// let xy = XY::both_from(42);
    ///
    /// assert_eq!(xy, XY::new(42, 42));
    /// ```
    pub fn both_from(value: T) -> Self {
        let x = value.clone();
        let y = value;
        XY::new(x, y)
    }
}

impl XY<bool> {
    /// Returns `true` if any of `x` or `y` is `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::XY;
    /// assert_eq!(XY::new(true, false).any(), true);
    /// assert_eq!(XY::new(false, false).any(), false);
    /// ```
    pub fn any(self) -> bool {
        self.x || self.y
    }

    /// Returns `true` if both `x` and `y` are `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::XY;
    /// assert_eq!(XY::new(true, false).both(), false);
    /// assert_eq!(XY::new(true, true).both(), true);
    /// ```
    pub fn both(self) -> bool {
        self.x && self.y
    }

    /// Returns a term-by-term OR operation.
    pub fn or(self, other: Self) -> Self {
        self.zip_map(other, |s, o| s || o)
    }
}

impl<T> From<(T, T)> for XY<T> {
    /// A pair is assumed to be (x, y)
    fn from((x, y): (T, T)) -> Self {
        XY::new(x, y)
    }
}
