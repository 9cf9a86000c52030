//! Direction-related structures.
//!
//! The grid solver treats rows and columns symmetrically: everything it does
//! for widths it does for heights. [`Orientation`] names the axis being
//! processed, and is used to pick the matching value out of an [`XY`].
//!
//! [`XY`]: crate::XY

use crate::XY;

/// Describes a vertical or horizontal orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Horizontal orientation: widths, columns.
    Horizontal,
    /// Vertical orientation: heights, rows.
    Vertical,
}

impl Orientation {
    /// Returns a `XY(Horizontal, Vertical)`.
    pub fn pair() -> XY<Orientation> {
        XY::new(Orientation::Horizontal, Orientation::Vertical)
    }
}
