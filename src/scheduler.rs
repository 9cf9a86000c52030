//! Deferred layout passes.
//!
//! Mutating a component never lays anything out directly. Instead, the
//! component sends the id of its root through a [`LayoutSink`], and the
//! scheduler runs one `compute_layout` per root the next time it is flushed,
//! no matter how many requests it received in between.
//!
//! [`RenderQueue`] is the provided scheduler. It owns the roots it lays out.
//!
//! # Examples
//!
//! ```rust
//! use trellis::components::{Grid, Spacer};
//! use trellis::scheduler::RenderQueue;
//! use trellis::surface::{self, Dummy};
//! use trellis::traits::*;
//!
//! let mut grid = Grid::new();
//! grid.add(Spacer::new(), 0, 0).unwrap();
//!
//! let mut queue = RenderQueue::new();
//! let root = queue.render_to(grid, surface::shared(Dummy::new((80.0, 24.0)))).unwrap();
//! assert_eq!(queue.root(root).and_then(|grid| grid.width()), Some(80.0));
//!
//! queue.call_on_root(root, |grid: &mut Grid| grid.set_row_padding(2.0)).unwrap().unwrap();
//! assert_eq!(queue.pending(), 1);
//! queue.flush().unwrap();
//! ```

use ahash::AHashSet;
use crossbeam_channel::{self, Receiver, Sender};
use log::{debug, warn};

use crate::component::{Component, ComponentId, IntoBoxedComponent};
use crate::error::Error;
use crate::surface::SharedSurface;

/// Channel used by components to request a layout of their root.
pub type LayoutSink = Sender<ComponentId>;

/// Something that runs layout passes on request.
pub trait Scheduler {
    /// Asks for a layout pass of the tree rooted at `root`.
    ///
    /// Nothing happens until the next [`flush`](Scheduler::flush).
    fn enqueue_layout(&mut self, root: ComponentId);

    /// Runs one layout pass per root requested since the last flush.
    fn flush(&mut self) -> Result<(), Error>;
}

/// Coalescing layout queue owning its root components.
pub struct RenderQueue {
    roots: Vec<Box<dyn Component>>,

    sink: LayoutSink,
    source: Receiver<ComponentId>,

    // Requests in arrival order, without duplicates.
    pending: Vec<ComponentId>,
    queued: AHashSet<ComponentId>,
}

new_default!(RenderQueue);

impl RenderQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let (sink, source) = crossbeam_channel::unbounded();
        RenderQueue {
            roots: Vec::new(),
            sink,
            source,
            pending: Vec::new(),
            queued: AHashSet::new(),
        }
    }

    /// Returns a sink for layout requests.
    ///
    /// Components rendered through this queue already hold one.
    pub fn sink(&self) -> &LayoutSink {
        &self.sink
    }

    /// Binds `component` to `surface` as a root, and lays it out.
    ///
    /// Returns the id of the new root. Only this root is laid out: requests
    /// for the other roots stay pending.
    ///
    /// If the first layout fails, the component is detached and dropped,
    /// and the queue is left as it was.
    pub fn render_to<C: IntoBoxedComponent>(
        &mut self,
        component: C,
        surface: SharedSurface,
    ) -> Result<ComponentId, Error> {
        let mut component = component.into_boxed_component();
        let id = component.id();
        component.anchor_to(surface, Some(self.sink.clone()))?;

        if let Err(err) = component.compute_layout(None) {
            warn!("First layout of {} failed: {}", id, err);
            component.detach();
            self.forget(id);
            return Err(err);
        }

        // Already up to date.
        self.forget(id);
        self.roots.push(component);
        Ok(id)
    }

    /// Number of roots waiting for a layout pass.
    pub fn pending(&mut self) -> usize {
        self.drain();
        self.pending.len()
    }

    /// Number of roots owned by this queue.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` if this queue owns no root.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns a reference to a root.
    pub fn root(&self, id: ComponentId) -> Option<&dyn Component> {
        self.roots
            .iter()
            .find(|root| root.id() == id)
            .map(|root| &**root)
    }

    /// Returns a mutable reference to a root.
    pub fn root_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component> {
        self.roots
            .iter_mut()
            .find(|root| root.id() == id)
            .map(|root| &mut **root)
    }

    /// Runs a closure on a root, if it exists and is of type `T`.
    pub fn call_on_root<T, F, R>(&mut self, id: ComponentId, callback: F) -> Option<R>
    where
        T: Component,
        F: FnOnce(&mut T) -> R,
    {
        self.root_mut(id)?.downcast_mut::<T>().map(callback)
    }

    /// Stops managing a root, detaches it and returns it.
    ///
    /// Pending requests for this root are dropped.
    pub fn detach_root(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let i = self.roots.iter().position(|root| root.id() == id)?;
        let mut root = self.roots.remove(i);
        root.detach();
        self.forget(id);
        Some(root)
    }

    // Drops the pending requests for `id`.
    fn forget(&mut self, id: ComponentId) {
        self.drain();
        if self.queued.remove(&id) {
            self.pending.retain(|&pending| pending != id);
        }
    }

    fn drain(&mut self) {
        while let Ok(id) = self.source.try_recv() {
            self.push(id);
        }
    }

    fn push(&mut self, id: ComponentId) {
        if self.queued.insert(id) {
            self.pending.push(id);
        }
    }
}

impl Scheduler for RenderQueue {
    fn enqueue_layout(&mut self, root: ComponentId) {
        self.drain();
        self.push(root);
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.drain();
        let pending = std::mem::take(&mut self.pending);
        self.queued.clear();

        let mut first_error = None;
        for id in pending {
            let root = match self.roots.iter_mut().find(|root| root.id() == id) {
                Some(root) => root,
                None => {
                    debug!("Dropping layout request for unknown root {}", id);
                    continue;
                }
            };

            if let Err(err) = root.compute_layout(None) {
                warn!("Layout of {} failed: {}", id, err);
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentBase;
    use crate::components::{FixedSize, Grid, Spacer};
    use crate::surface::puppet::PuppetSurface;
    use crate::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn puppet(w: f64, h: f64) -> Rc<RefCell<PuppetSurface>> {
        Rc::new(RefCell::new(PuppetSurface::new((w, h))))
    }

    #[test]
    fn render_to_lays_out_immediately() {
        let surface = puppet(120.0, 80.0);
        let mut queue = RenderQueue::new();
        let id = queue.render_to(Spacer::new(), surface.clone()).unwrap();

        assert!(queue.root(id).map_or(false, |root| root.is_root()));
        assert_eq!(surface.borrow().placement(id), Some(Rect::from_zero((120.0, 80.0))));
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn requests_are_coalesced() {
        let surface = puppet(100.0, 100.0);
        let mut queue = RenderQueue::new();
        let id = queue.render_to(Grid::new(), surface.clone()).unwrap();
        let before = surface.borrow().placement_count();

        queue
            .call_on_root(id, |grid: &mut Grid| {
                grid.set_column_padding(4.0)?;
                grid.set_row_padding(2.0)?;
                grid.add(Spacer::new(), 0, 0)?;
                grid.add(Spacer::new(), 0, 1)
            })
            .unwrap()
            .unwrap();
        queue.enqueue_layout(id);
        assert_eq!(queue.pending(), 1);

        queue.flush().unwrap();
        assert_eq!(queue.pending(), 0);
        // One pass: the grid and its two children.
        assert_eq!(surface.borrow().placement_count(), before + 3);

        let grid = queue.root(id).and_then(|c| c.downcast_ref::<Grid>()).unwrap();
        assert_eq!(grid.track_sizes().map(|t| t.x.clone()), Some(vec![48.0, 48.0]));
    }

    #[test]
    fn nested_changes_reach_the_root() {
        let mut inner = Grid::new();
        inner.add(FixedSize::new(10.0, 10.0).unwrap(), 0, 0).unwrap();
        let mut outer = Grid::new();
        outer.add(inner, 0, 0).unwrap();

        let mut queue = RenderQueue::new();
        let id = queue.render_to(outer, puppet(50.0, 50.0)).unwrap();

        queue.call_on_root(id, |outer: &mut Grid| {
            let inner = outer.component_at_mut(0, 0).unwrap();
            inner.set_offset((1.0, 1.0).into()).unwrap();
        });
        assert_eq!(queue.pending(), 1);
        queue.flush().unwrap();
    }

    #[test]
    fn flush_reports_failures() {
        let mut queue = RenderQueue::new();
        let id = queue.render_to(Spacer::new(), puppet(10.0, 10.0)).unwrap();
        queue.root_mut(id).unwrap().destroy();

        queue.enqueue_layout(id);
        assert!(queue.flush().unwrap_err().is_reuse());
        assert_eq!(queue.pending(), 0);
    }

    /// Refuses to be laid out.
    struct Broken {
        base: ComponentBase,
    }

    impl Component for Broken {
        fn base(&self) -> &ComponentBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }

        fn compute_layout(&mut self, _: Option<Rect>) -> Result<(), Error> {
            Err(Error::InvalidLayoutCall("broken"))
        }
    }

    #[test]
    fn failed_render_leaves_the_queue_alone() {
        let mut queue = RenderQueue::new();
        let other = queue.render_to(Spacer::new(), puppet(10.0, 10.0)).unwrap();
        queue.enqueue_layout(other);

        let surface = puppet(10.0, 10.0);
        let broken = Broken {
            base: ComponentBase::new(),
        };
        let err = queue.render_to(broken, surface.clone()).unwrap_err();
        assert_eq!(err, Error::InvalidLayoutCall("broken"));

        assert_eq!(queue.len(), 1);
        assert!(queue.root(other).is_some());
        assert!(surface.borrow().is_empty());
        // The request for the other root was not consumed.
        assert_eq!(queue.pending(), 1);
        queue.flush().unwrap();
    }

    #[test]
    fn detached_roots_are_forgotten() {
        let surface = puppet(10.0, 10.0);
        let mut queue = RenderQueue::new();
        let id = queue.render_to(Spacer::new(), surface.clone()).unwrap();
        queue.enqueue_layout(id);

        let root = queue.detach_root(id).unwrap();
        assert!(!root.is_anchored());
        assert!(queue.is_empty());
        assert_eq!(queue.pending(), 0);
        assert!(surface.borrow().is_empty());

        // Unknown roots are ignored.
        queue.enqueue_layout(id);
        queue.flush().unwrap();
    }
}
