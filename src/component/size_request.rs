use crate::{Vec2, XY};

/// Minimum size a component asks for, given some offered space.
///
/// Requests are recomputed on every call to
/// [`Component::requested_space`](crate::component::Component::requested_space);
/// a request is not a commitment, and the offer it answers is not a
/// constraint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeRequest {
    /// Minimum width, never negative.
    pub min_width: f64,
    /// Minimum height, never negative.
    pub min_height: f64,
}

impl SizeRequest {
    /// Creates a new request. Negative values are clamped to `0`.
    pub fn new(min_width: f64, min_height: f64) -> Self {
        SizeRequest {
            min_width: min_width.max(0.0),
            min_height: min_height.max(0.0),
        }
    }

    /// A request for no space at all.
    pub const fn zero() -> Self {
        SizeRequest {
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    /// Returns the request as a `(width, height)` vector.
    pub fn as_vec(self) -> Vec2 {
        Vec2::new(self.min_width, self.min_height)
    }

    /// Per-axis maximum of two requests.
    pub fn max(self, other: Self) -> Self {
        Self::from(self.as_vec().or_max(other.as_vec()))
    }

    /// Returns, for each axis, whether this request exceeds `offer`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis::component::SizeRequest;
    /// # use trellis::{Vec2, XY};
    /// let request = SizeRequest::new(120.0, 10.0);
    /// assert_eq!(request.wants_more(Vec2::new(100.0, 40.0)), XY::new(true, false));
    /// ```
    pub fn wants_more(self, offer: Vec2) -> XY<bool> {
        self.as_vec().zip_map(offer, |request, offer| request > offer)
    }
}

impl From<Vec2> for SizeRequest {
    fn from(size: Vec2) -> Self {
        SizeRequest::new(size.x, size.y)
    }
}

impl From<(f64, f64)> for SizeRequest {
    fn from((w, h): (f64, f64)) -> Self {
        SizeRequest::new(w, h)
    }
}
