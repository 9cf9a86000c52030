use log::debug;

use crate::component::{
    adopt, commit_layout, Component, ComponentBase, ComponentContainer, ComponentId,
    IntoBoxedComponent, SizeRequest,
};
use crate::error::Error;
use crate::{Rect, Vec2};

/// Overlays its children in the same rectangle.
///
/// A group asks for the largest request of its children on each axis, and
/// always takes its whole offer. Every child is then laid out at `(0, 0)`
/// with the size of the group, and uses its own alignment inside it.
///
/// # Examples
///
/// ```rust
/// use trellis::components::{FixedSize, Group, Spacer};
///
/// let mut group = Group::new();
/// group.add(Spacer::new()).unwrap();
/// group.add(FixedSize::new(40.0, 12.0).unwrap()).unwrap();
/// assert_eq!(group.len(), 2);
/// ```
#[derive(Default)]
pub struct Group {
    base: ComponentBase,
    children: Vec<Box<dyn Component>>,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Group {
            base: ComponentBase::new(),
            children: Vec::new(),
        }
    }

    /// Adds a child on top of the others.
    ///
    /// The child is detached from any previous surface first.
    pub fn add<C: IntoBoxedComponent>(&mut self, child: C) -> Result<(), Error> {
        let mut child = child.into_boxed_component();
        adopt(self.base.anchor(), &mut *child)?;
        self.children.push(child);
        self.base.invalidate();
        Ok(())
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns a reference to a child.
    pub fn get_child(&self, i: usize) -> Option<&dyn Component> {
        self.children.get(i).map(|child| &**child)
    }

    /// Returns a mutable reference to a child.
    pub fn get_child_mut(&mut self, i: usize) -> Option<&mut dyn Component> {
        self.children.get_mut(i).map(|child| &mut **child)
    }
}

impl Component for Group {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn requested_space(&mut self, available: Vec2) -> SizeRequest {
        self.children
            .iter_mut()
            .map(|child| child.requested_space(available))
            .fold(SizeRequest::zero(), SizeRequest::max)
    }

    fn fixed_width(&self) -> bool {
        self.children.iter().all(|child| child.fixed_width())
    }

    fn fixed_height(&self) -> bool {
        self.children.iter().all(|child| child.fixed_height())
    }

    fn size_from_offer(&mut self, available: Vec2) -> Vec2 {
        available
    }

    fn compute_layout(&mut self, offer: Option<Rect>) -> Result<(), Error> {
        let geometry = commit_layout(self, offer)?;
        debug!("Group {} lays out {} children", self.base.id(), self.len());
        for child in &mut self.children {
            self.base
                .layout_child(&mut **child, Rect::from_zero(geometry.size))?;
        }
        Ok(())
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Component)) {
        for child in &self.children {
            f(&**child);
        }
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Component)) {
        for child in &mut self.children {
            f(&mut **child);
        }
    }
}

impl ComponentContainer for Group {
    fn take_child(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let i = self.children.iter().position(|child| child.id() == id)?;
        Some(self.children.remove(i))
    }
}
