use crate::component::{Anchor, Component, ComponentId};
use crate::error::Error;

/// A component that owns other components.
///
/// Implementors store their children however they like; they only need to
/// give them back through [`take_child`](ComponentContainer::take_child)
/// and enumerate them through [`Component::for_each_child`].
pub trait ComponentContainer: Component {
    /// Removes a direct child from the container storage and returns it.
    ///
    /// This only updates the storage: use [`remove`](Self::remove) to also
    /// detach the child and schedule a new layout.
    fn take_child(&mut self, id: ComponentId) -> Option<Box<dyn Component>>;

    /// Returns `true` if `id` is a direct child of this container.
    fn has(&self, id: ComponentId) -> bool {
        let mut found = false;
        self.for_each_child(&mut |child| found |= child.id() == id);
        found
    }

    /// Ids of the direct children, in container order.
    fn components(&self) -> Vec<ComponentId> {
        let mut ids = Vec::new();
        self.for_each_child(&mut |child| ids.push(child.id()));
        ids
    }

    /// Returns `true` if this container has no child.
    fn is_empty(&self) -> bool {
        self.components().is_empty()
    }

    /// Removes a direct child, detaches it, and requests a new layout.
    ///
    /// Returns `None`, and does nothing, if `id` is not a direct child.
    fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let mut child = self.take_child(id)?;
        child.detach();
        self.base().invalidate();
        Some(child)
    }

    /// Removes and detaches every child.
    fn detach_all(&mut self) -> Vec<Box<dyn Component>> {
        self.components()
            .into_iter()
            .filter_map(|id| self.remove(id))
            .collect()
    }
}

/// Prepares `child` to be stored in a container bound to `anchor`.
///
/// The child is detached from any previous surface, then attached to the
/// container's tree when the container is itself attached.
pub(crate) fn adopt(anchor: Option<&Anchor>, child: &mut dyn Component) -> Result<(), Error> {
    child.base().ensure_alive()?;
    child.detach();
    match anchor {
        Some(anchor) => child.attach(anchor.clone()),
        None => Ok(()),
    }
}
