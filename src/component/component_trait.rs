use std::any::Any;

use log::trace;

use crate::align::{Align, HAlign, VAlign};
use crate::component::{
    Anchor, AnyComponent, CallbackHandle, ComponentBase, ComponentId, SizeRequest,
};
use crate::error::Error;
use crate::scheduler::LayoutSink;
use crate::surface::SharedSurface;
use crate::{Rect, Vec2, XY};

/// Main trait defining a component behaviour.
///
/// This is what you should implement to define a custom component.
///
/// Only [`base`](Component::base) and [`base_mut`](Component::base_mut) are
/// required. A leaf usually also overrides `requested_space` and the
/// `fixed_*` methods; a container overrides `compute_layout` to place its
/// children with [`ComponentBase::layout_child`], and the `for_each_child*`
/// methods so the lifecycle reaches them.
pub trait Component: Any + AnyComponent {
    /// Shared component state.
    fn base(&self) -> &ComponentBase;

    /// Shared component state, mutably.
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Returns the minimum size this component needs, given `available`.
    ///
    /// The offer is not a constraint: the answer may exceed it, and a
    /// parent may end up granting less. This must not modify the committed
    /// geometry, and repeated calls with the same offer must give the same
    /// answer.
    ///
    /// Default implementation always returns `(0, 0)`.
    fn requested_space(&mut self, available: Vec2) -> SizeRequest {
        let _ = available;
        SizeRequest::zero()
    }

    /// Returns `true` if this component takes only the width it requests.
    ///
    /// Otherwise it grows to fill the whole width it is offered.
    fn fixed_width(&self) -> bool {
        false
    }

    /// Returns `true` if this component takes only the height it requests.
    fn fixed_height(&self) -> bool {
        false
    }

    /// Size this component takes out of a non-negative offer.
    ///
    /// Fixed axes take `min(available, request)`, growing axes take the
    /// whole offer.
    fn size_from_offer(&mut self, available: Vec2) -> Vec2 {
        let request = self.requested_space(available).as_vec();
        let fixed = XY::new(self.fixed_width(), self.fixed_height());
        available
            .zip3(request, fixed)
            .map(|(available, request, fixed)| {
                if fixed {
                    available.min(request)
                } else {
                    available
                }
            })
    }

    /// Commits the geometry of this component.
    ///
    /// With `Some(offer)`, the component takes its size out of
    /// `offer.size` and positions itself inside `offer` according to its
    /// alignment and offset. With `None`, the component must be a root: the
    /// offer is then the whole surface.
    ///
    /// Containers override this to lay out their children once their own
    /// geometry is committed (see [`commit_layout`]).
    fn compute_layout(&mut self, offer: Option<Rect>) -> Result<(), Error> {
        commit_layout(self, offer).map(drop)
    }

    /// Runs a closure on each direct child.
    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Component)) {
        let _ = f;
    }

    /// Runs a closure on each direct child, mutably.
    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Component)) {
        let _ = f;
    }

    /// Id of this component.
    fn id(&self) -> ComponentId {
        self.base().id()
    }

    /// Last committed geometry.
    fn geometry(&self) -> Option<Rect> {
        self.base().geometry()
    }

    /// Last committed origin, relative to the parent.
    fn origin(&self) -> Option<Vec2> {
        self.geometry().map(|rect| rect.origin)
    }

    /// Last committed origin, relative to the root of the tree.
    fn origin_to_root(&self) -> Option<Vec2> {
        self.base().origin_to_root()
    }

    /// Last committed width.
    fn width(&self) -> Option<f64> {
        self.geometry().map(Rect::width)
    }

    /// Last committed height.
    fn height(&self) -> Option<f64> {
        self.geometry().map(Rect::height)
    }

    /// Current alignment.
    fn align(&self) -> Align {
        self.base().align()
    }

    /// Sets the alignment, applied on the next layout.
    fn set_align(&mut self, align: Align) {
        self.base_mut().set_align(align);
    }

    /// Sets the horizontal alignment, applied on the next layout.
    fn set_h_align(&mut self, h: HAlign) {
        self.base_mut().set_h_align(h);
    }

    /// Sets the vertical alignment, applied on the next layout.
    fn set_v_align(&mut self, v: VAlign) {
        self.base_mut().set_v_align(v);
    }

    /// Current offset.
    fn offset(&self) -> Vec2 {
        self.base().offset()
    }

    /// Sets the offset, applied on the next layout.
    fn set_offset(&mut self, offset: Vec2) -> Result<(), Error> {
        self.base_mut().set_offset(offset)
    }

    /// Sets a callback run with the new size after every layout.
    fn set_on_resize(&mut self, f: Box<dyn FnMut(Vec2)>) {
        self.base_mut().set_on_resize(f);
    }

    /// Adds a callback run every time this component is attached, and right
    /// away if it already is.
    fn on_anchor(&mut self, f: Box<dyn FnMut(ComponentId)>) -> CallbackHandle {
        self.base_mut().on_anchor(f)
    }

    /// Removes a callback added with `on_anchor`.
    fn off_anchor(&mut self, handle: CallbackHandle) -> bool {
        self.base_mut().off_anchor(handle)
    }

    /// Adds a callback run every time this component is detached.
    fn on_detach(&mut self, f: Box<dyn FnMut(ComponentId)>) -> CallbackHandle {
        self.base_mut().on_detach(f)
    }

    /// Removes a callback added with `on_detach`.
    fn off_detach(&mut self, handle: CallbackHandle) -> bool {
        self.base_mut().off_detach(handle)
    }

    /// Returns `true` if this component is attached to a surface.
    fn is_anchored(&self) -> bool {
        self.base().is_anchored()
    }

    /// Returns `true` if this component is directly bound to a surface.
    fn is_root(&self) -> bool {
        self.base().is_root()
    }

    /// Returns `true` once `destroy` was called.
    fn is_destroyed(&self) -> bool {
        self.base().is_destroyed()
    }

    /// Attaches this component and its subtree to `anchor`.
    ///
    /// Fails if a component of the subtree was destroyed. The whole subtree
    /// is then left detached.
    fn attach(&mut self, anchor: Anchor) -> Result<(), Error> {
        self.base().ensure_alive()?;
        let mut result = Ok(());
        self.for_each_child_mut(&mut |child| {
            if result.is_ok() {
                result = child.attach(anchor.clone());
            }
        });
        if result.is_err() {
            self.detach();
            return result;
        }
        self.base_mut().set_anchor(anchor);
        Ok(())
    }

    /// Binds this component as the root of a tree drawn on `surface`.
    ///
    /// Any previous binding is dropped first, even if this fails.
    fn anchor_to(&mut self, surface: SharedSurface, sink: Option<LayoutSink>) -> Result<(), Error> {
        self.base().ensure_alive()?;
        self.detach();
        let anchor = Anchor::new(self.id(), surface, sink);
        self.attach(anchor)
    }

    /// Detaches this component and its subtree from their surface.
    ///
    /// Committed geometries are kept.
    fn detach(&mut self) {
        self.for_each_child_mut(&mut |child| child.detach());
        self.base_mut().release();
    }

    /// Detaches this component for good. It cannot be laid out or attached
    /// again.
    fn destroy(&mut self) {
        self.detach();
        self.base_mut().mark_destroyed();
    }
}

/// Commits the geometry of `component` for the given offer.
///
/// This is the default `compute_layout`. Containers call it first, then lay
/// out their children inside the returned rectangle with
/// [`ComponentBase::layout_child`].
pub fn commit_layout<C>(component: &mut C, offer: Option<Rect>) -> Result<Rect, Error>
where
    C: Component + ?Sized,
{
    component.base().ensure_alive()?;
    let offer = match offer {
        Some(offer) if component.is_anchored() => offer,
        Some(_) => {
            return Err(Error::InvalidLayoutCall(
                "cannot lay out a component that is not attached to a surface",
            ))
        }
        None => {
            let offer = component.base().root_offer()?;
            component.base_mut().clear_parent_origin();
            offer
        }
    };

    let available = offer.size.non_negative();
    let size = component.size_from_offer(available);
    let slack = available - size;
    let base = component.base();
    let origin = offer.origin + base.offset() + slack * base.align().proportions();
    let geometry = Rect::from_size(origin, size);

    trace!("{} committed {:?}", component.id(), geometry);
    component.base_mut().commit(geometry);
    Ok(geometry)
}

impl dyn Component {
    /// Attempts to downcast `self` to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Attempts to downcast `self` to a concrete type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Attempts to downcast `Box<Self>` to a concrete type.
    pub fn downcast<T: Any>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if !self.as_any().is::<T>() {
            return Err(self);
        }
        match self.as_boxed_any().downcast::<T>() {
            Ok(component) => Ok(component),
            Err(_) => unreachable!("type was checked above"),
        }
    }

    /// Checks if this component is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentContainer;
    use crate::components::{FixedSize, Grid, Spacer};
    use crate::surface::puppet::PuppetSurface;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn surface(w: f64, h: f64) -> Rc<RefCell<PuppetSurface>> {
        Rc::new(RefCell::new(PuppetSurface::new((w, h))))
    }

    #[test]
    fn fixed_component_is_aligned() {
        let puppet = surface(300.0, 200.0);
        let mut c = FixedSize::new(100.0, 100.0).unwrap();
        c.set_align(Align::center());
        c.anchor_to(puppet.clone(), None).unwrap();

        c.compute_layout(None).unwrap();
        assert_eq!(c.geometry(), Some(Rect::from_size((100.0, 50.0), (100.0, 100.0))));
        assert_eq!(
            puppet.borrow().placement(c.id()),
            Some(Rect::from_size((100.0, 50.0), (100.0, 100.0)))
        );
    }

    #[test]
    fn growing_component_takes_the_offer() {
        let mut c = Spacer::new();
        c.anchor_to(surface(10.0, 10.0), None).unwrap();
        c.set_align(Align::bot_right());

        let offer = Rect::from_size((5.0, 6.0), (40.0, 30.0));
        c.compute_layout(Some(offer)).unwrap();
        assert_eq!(c.geometry(), Some(offer));

        c.compute_layout(Some(Rect::from_zero((-5.0, 12.0)))).unwrap();
        assert_eq!(c.geometry(), Some(Rect::from_zero((0.0, 12.0))));
    }

    #[test]
    fn fixed_component_is_clamped() {
        let mut c = FixedSize::new(80.0, 10.0).unwrap();
        c.anchor_to(surface(50.0, 50.0), None).unwrap();
        c.compute_layout(None).unwrap();
        assert_eq!(c.width(), Some(50.0));
        assert_eq!(c.height(), Some(10.0));
    }

    #[test]
    fn offset_is_added() {
        let mut c = FixedSize::new(10.0, 10.0).unwrap();
        c.anchor_to(surface(50.0, 50.0), None).unwrap();
        c.set_offset(Vec2::new(3.0, -2.0)).unwrap();
        c.compute_layout(Some(Rect::from_size((1.0, 1.0), (20.0, 20.0))))
            .unwrap();
        assert_eq!(c.origin(), Some(Vec2::new(4.0, -1.0)));
    }

    #[test]
    fn invalid_calls() {
        let mut c = Spacer::new();
        let err = c.compute_layout(None).unwrap_err();
        assert!(err.is_invalid_layout_call());
        let err = c.compute_layout(Some(Rect::from_zero((1.0, 1.0)))).unwrap_err();
        assert!(err.is_invalid_layout_call());
        assert_eq!(c.geometry(), None);
    }

    #[test]
    fn destroyed_components_cannot_be_reused() {
        let puppet = surface(10.0, 10.0);
        let mut c = Spacer::new();
        c.anchor_to(puppet.clone(), None).unwrap();
        c.compute_layout(None).unwrap();
        assert!(puppet.borrow().placement(c.id()).is_some());

        c.destroy();
        assert!(c.is_destroyed());
        assert!(!c.is_anchored());
        assert!(puppet.borrow().placement(c.id()).is_none());
        assert_eq!(c.anchor_to(puppet.clone(), None), Err(Error::Reuse(c.id())));
        assert!(c.compute_layout(None).unwrap_err().is_reuse());
        // Geometry survives destruction.
        assert_eq!(c.width(), Some(10.0));
    }

    #[test]
    fn resize_callback() {
        let seen = Rc::new(Cell::new(Vec2::new(0.0, 0.0)));
        let mut c = Spacer::new();
        c.anchor_to(surface(7.0, 9.0), None).unwrap();
        c.set_on_resize(Box::new({
            let seen = Rc::clone(&seen);
            move |size| seen.set(size)
        }));
        c.compute_layout(None).unwrap();
        assert_eq!(seen.get(), Vec2::new(7.0, 9.0));
    }

    #[test]
    fn downcast() {
        let boxed: Box<dyn Component> = Box::new(Spacer::new());
        assert!(boxed.is::<Spacer>());
        assert!(boxed.downcast_ref::<FixedSize>().is_none());
        let boxed = boxed.downcast::<FixedSize>().unwrap_err();
        assert!(boxed.downcast::<Spacer>().is_ok());
    }

    #[test]
    fn origins_relative_to_the_root() {
        let mut inner = Grid::new();
        inner.add(FixedSize::new(5.0, 5.0).unwrap(), 0, 0).unwrap();
        inner.add(Spacer::new(), 0, 1).unwrap();

        let mut outer = Grid::new();
        outer.set_column_padding(10.0).unwrap();
        outer.add(FixedSize::new(20.0, 20.0).unwrap(), 0, 0).unwrap();
        outer.add(inner, 0, 1).unwrap();
        outer.set_offset(Vec2::new(2.0, 3.0)).unwrap();

        outer.anchor_to(surface(100.0, 100.0), None).unwrap();
        outer.compute_layout(None).unwrap();
        assert_eq!(outer.origin_to_root(), Some(Vec2::new(2.0, 3.0)));

        let inner = outer.component_at(0, 1).unwrap();
        assert_eq!(inner.origin(), Some(Vec2::new(30.0, 0.0)));
        assert_eq!(inner.origin_to_root(), Some(Vec2::new(32.0, 3.0)));

        let spacer = inner
            .downcast_ref::<Grid>()
            .and_then(|inner| inner.component_at(0, 1))
            .unwrap();
        assert_eq!(spacer.origin(), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(spacer.origin_to_root(), Some(Vec2::new(37.0, 3.0)));
    }

    #[test]
    fn lifecycle_callbacks_follow_the_tree() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut spacer = Spacer::new();
        let spacer_id = spacer.id();
        spacer.on_anchor(Box::new({
            let events = Rc::clone(&events);
            move |id: ComponentId| events.borrow_mut().push(("anchor", id))
        }));
        spacer.on_detach(Box::new({
            let events = Rc::clone(&events);
            move |id: ComponentId| events.borrow_mut().push(("detach", id))
        }));

        let mut grid = Grid::new();
        grid.add(spacer, 0, 0).unwrap();
        assert!(events.borrow().is_empty());

        grid.anchor_to(surface(10.0, 10.0), None).unwrap();
        assert_eq!(*events.borrow(), vec![("anchor", spacer_id)]);

        let removed = grid.remove(spacer_id).unwrap();
        assert!(!removed.is_anchored());
        assert_eq!(
            *events.borrow(),
            vec![("anchor", spacer_id), ("detach", spacer_id)]
        );
    }

    #[test]
    fn failed_attach_leaves_the_subtree_detached() {
        let mut inner = Grid::new();
        inner.add(Spacer::new(), 0, 0).unwrap();
        let mut grid = Grid::new();
        grid.add(Spacer::new(), 0, 0).unwrap();
        grid.add(inner, 0, 1).unwrap();

        let puppet = surface(10.0, 10.0);
        grid.anchor_to(puppet.clone(), None).unwrap();
        grid.compute_layout(None).unwrap();

        grid.component_at_mut(0, 1)
            .and_then(|inner| inner.downcast_mut::<Grid>())
            .and_then(|inner| inner.component_at_mut(0, 0))
            .unwrap()
            .destroy();

        let err = grid.anchor_to(puppet.clone(), None).unwrap_err();
        assert!(err.is_reuse());
        assert!(!grid.is_anchored());
        assert!(!grid.component_at(0, 0).unwrap().is_anchored());
        assert!(!grid.component_at(0, 1).unwrap().is_anchored());
        assert!(puppet.borrow().is_empty());
    }
}
