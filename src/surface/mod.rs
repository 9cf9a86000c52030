//! Define the drawing surface a component tree is laid out on.
//!
//! The layout engine does not draw anything. It tells its surface how big
//! each component ended up and where it sits, and asks it how much room the
//! root has. Everything else belongs to the host.
//!
//! * [`Dummy`] ignores placements, and simply reports a size.
//! * [`puppet::PuppetSurface`] records placements so they can be inspected,
//!   which is what the tests use.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::ComponentId;
use crate::{Rect, Vec2};

pub mod puppet;

/// Trait defining the required methods to be a drawing surface.
pub trait Surface {
    /// Returns the space available to the root component.
    fn size(&self) -> Vec2;

    /// Called every time a component commits a geometry.
    ///
    /// `geometry.origin` is relative to the parent component.
    fn place(&mut self, id: ComponentId, geometry: Rect);

    /// Called when a component is detached from this surface.
    fn remove(&mut self, id: ComponentId) {
        let _ = id;
    }

    /// Returns a name to identify the surface.
    ///
    /// Mostly used for debugging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Surface shared by every component of a tree.
pub type SharedSurface = Rc<RefCell<dyn Surface>>;

/// Wraps a surface so it can be given to a root component.
pub fn shared<S: Surface + 'static>(surface: S) -> SharedSurface {
    Rc::new(RefCell::new(surface))
}

/// Dummy surface that only reports a size.
///
/// Mostly used for testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dummy {
    size: Vec2,
}

impl Dummy {
    /// Creates a new dummy surface of the given size.
    pub fn new<V: Into<Vec2>>(size: V) -> Self {
        Dummy { size: size.into() }
    }

    /// Changes the reported size.
    pub fn set_size<V: Into<Vec2>>(&mut self, size: V) {
        self.size = size.into();
    }
}

impl Surface for Dummy {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn place(&mut self, _: ComponentId, _: Rect) {}

    fn name(&self) -> &str {
        "dummy"
    }
}
