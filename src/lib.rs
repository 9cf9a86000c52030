//! # Trellis
//!
//! A retained-tree layout engine for rectangular components.
//!
//! Components negotiate their size with their parent: the parent asks what
//! a child needs for some offered space (`requested_space`), then commits it
//! to a final rectangle (`compute_layout`). The [`Grid`] container resolves
//! those negotiations for a whole matrix of cells at once, balancing the
//! space fixed-size cells need against weighted proportional space.
//!
//! Nothing is drawn here: each committed rectangle is reported to a
//! [`Surface`], and layout passes are batched by a
//! [`Scheduler`](scheduler::Scheduler).
//!
//! ## Example
//!
//! ```rust
//! use trellis::components::{FixedSize, Grid, Spacer};
//! use trellis::scheduler::RenderQueue;
//! use trellis::surface::{self, Dummy};
//! use trellis::traits::*;
//!
//! # fn main() -> Result<(), trellis::Error> {
//! let mut grid = Grid::new();
//! grid.add(FixedSize::new(490.0, 20.0)?, 0, 0)?;
//! grid.add(Spacer::new(), 0, 1)?;
//! grid.add(Spacer::new(), 0, 2)?;
//!
//! let mut queue = RenderQueue::new();
//! let root = queue.render_to(grid, surface::shared(Dummy::new((500.0, 20.0))))?;
//!
//! let grid = queue
//!     .root(root)
//!     .and_then(|root| root.downcast_ref::<Grid>())
//!     .unwrap();
//! assert_eq!(grid.component_at(0, 1).and_then(|c| c.width()), Some(5.0));
//! # Ok(())
//! # }
//! ```
//!
//! [`Grid`]: components::Grid
//! [`Surface`]: surface::Surface
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]
#![warn(missing_docs)]

macro_rules! new_default(
    ($c:ty) => {
        impl Default for $c {
            fn default() -> Self {
                Self::new()
            }
        }
    }
);

pub mod align;
pub mod component;
pub mod components;
pub mod config;
pub mod direction;
pub mod error;
pub mod logger;
pub mod scheduler;
pub mod surface;
pub mod traits;
pub mod vec;

mod rect;
mod xy;

pub use self::error::Error;
pub use self::rect::Rect;
pub use self::vec::Vec2;
pub use self::xy::XY;
