//! Various components to use when creating the layout.
//!
//! * [`Grid`] is the main container: it arranges its children in rows and
//!   columns.
//! * [`Group`] stacks its children on top of each other.
//! * [`Spacer`] and [`FixedSize`] are simple leaves, respectively growing
//!   and fixed.

mod fixed_size;
mod grid;
mod group;
mod spacer;

pub use self::fixed_size::FixedSize;
pub use self::grid::{Grid, MAX_ITERATIONS, WANTS_MORE_BONUS, ZERO_WEIGHT_HEURISTIC};
pub use self::group::Group;
pub use self::spacer::Spacer;
