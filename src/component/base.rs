use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::align::{Align, HAlign, VAlign};
use crate::error::{ConfigurationError, Error};
use crate::scheduler::LayoutSink;
use crate::surface::SharedSurface;
use crate::component::Component;
use crate::{Rect, Vec2};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_CALLBACK: AtomicU64 = AtomicU64::new(1);

/// Identifies a component for the lifetime of the process.
///
/// Ids are never reused. They are what containers, the scheduler and the
/// surface use to refer to a component without borrowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Returns a fresh, never used id.
    pub fn next() -> Self {
        ComponentId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value of this id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Binding of a component tree to a drawing surface.
///
/// Every component in an anchored tree holds a clone of the same anchor: the
/// root's id, the surface the root draws on, and (optionally) the channel used
/// to ask the scheduler for a new layout pass.
#[derive(Clone)]
pub struct Anchor {
    root: ComponentId,
    surface: SharedSurface,
    sink: Option<LayoutSink>,
}

impl Anchor {
    /// Creates an anchor for the tree rooted at `root`.
    ///
    /// Without a `sink`, invalidations are recorded but never scheduled; the
    /// host is then expected to call `compute_layout` itself.
    pub fn new(root: ComponentId, surface: SharedSurface, sink: Option<LayoutSink>) -> Self {
        Anchor {
            root,
            surface,
            sink,
        }
    }

    /// Id of the root component.
    pub fn root(&self) -> ComponentId {
        self.root
    }

    /// The surface this tree draws on.
    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    /// Asks the scheduler for a layout pass of the whole tree.
    pub fn request_layout(&self) {
        match self.sink {
            Some(ref sink) => {
                if sink.send(self.root).is_err() {
                    warn!("Layout queue is gone, dropping request for {}", self.root);
                }
            }
            None => debug!("No scheduler for {}, layout left to the host", self.root),
        }
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("root", &self.root)
            .field("surface", &self.surface.borrow().name())
            .field("scheduled", &self.sink.is_some())
            .finish()
    }
}

/// Callback run with the new size every time a component commits a layout.
pub type ResizeCallback = Box<dyn FnMut(Vec2)>;

/// Callback run with the id of a component when it is attached or detached.
pub type LifecycleCallback = Box<dyn FnMut(ComponentId)>;

/// Identifies a registered [`LifecycleCallback`], to remove it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u64);

#[derive(Default)]
struct Callbacks {
    entries: Vec<(CallbackHandle, LifecycleCallback)>,
}

impl Callbacks {
    fn add(&mut self, f: LifecycleCallback) -> CallbackHandle {
        let handle = CallbackHandle(NEXT_CALLBACK.fetch_add(1, Ordering::Relaxed));
        self.entries.push((handle, f));
        handle
    }

    fn remove(&mut self, handle: CallbackHandle) -> bool {
        let len = self.entries.len();
        self.entries.retain(|&(h, _)| h != handle);
        self.entries.len() != len
    }

    fn call(&mut self, id: ComponentId) {
        for (_, f) in &mut self.entries {
            f(id);
        }
    }
}

/// State shared by every component.
///
/// Concrete components embed one and expose it through
/// [`Component::base`](crate::component::Component::base). It holds the
/// placement settings (alignment, offset), the last committed geometry and
/// the lifecycle flags.
pub struct ComponentBase {
    id: ComponentId,
    align: Align,
    offset: Vec2,
    geometry: Option<Rect>,
    anchor: Option<Anchor>,
    destroyed: bool,

    // Origin of the parent, relative to the root.
    parent_origin: Vec2,

    on_resize: Option<ResizeCallback>,
    on_anchor: Callbacks,
    on_detach: Callbacks,
}

new_default!(ComponentBase);

impl ComponentBase {
    /// Creates a detached base with a fresh id, top-left alignment and no
    /// offset.
    pub fn new() -> Self {
        ComponentBase {
            id: ComponentId::next(),
            align: Align::default(),
            offset: Vec2::new(0.0, 0.0),
            geometry: None,
            anchor: None,
            destroyed: false,
            parent_origin: Vec2::new(0.0, 0.0),
            on_resize: None,
            on_anchor: Callbacks::default(),
            on_detach: Callbacks::default(),
        }
    }

    /// Id of this component.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Current alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// Sets the alignment and requests a new layout.
    pub fn set_align(&mut self, align: Align) {
        self.align = align;
        self.invalidate();
    }

    /// Sets the horizontal alignment and requests a new layout.
    pub fn set_h_align(&mut self, h: HAlign) {
        self.set_align(Align::new(h, self.align.v));
    }

    /// Sets the vertical alignment and requests a new layout.
    pub fn set_v_align(&mut self, v: VAlign) {
        self.set_align(Align::new(self.align.h, v));
    }

    /// Current offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Sets the offset added to the committed origin.
    ///
    /// Non-finite coordinates are rejected and the previous offset is kept.
    pub fn set_offset<V: Into<Vec2>>(&mut self, offset: V) -> Result<(), Error> {
        let offset = offset.into();
        for (name, value) in [("offset.x", offset.x), ("offset.y", offset.y)] {
            if !value.is_finite() {
                return Err(ConfigurationError::NotFinite { name, value }.into());
            }
        }
        self.offset = offset;
        self.invalidate();
        Ok(())
    }

    /// Last committed geometry, if `compute_layout` ever succeeded.
    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    /// Last committed origin, relative to the root of the tree.
    ///
    /// Surfaces receive origins relative to the parent; this is where the
    /// component actually is.
    pub fn origin_to_root(&self) -> Option<Vec2> {
        self.geometry.map(|rect| self.parent_origin + rect.origin)
    }

    /// Lays out `child` inside `offer`, given relative to this component.
    ///
    /// Containers call this rather than `child.compute_layout`, so the child
    /// knows where its parent is.
    pub fn layout_child(&self, child: &mut dyn Component, offer: Rect) -> Result<(), Error> {
        child.base_mut().parent_origin = self.origin_to_root().unwrap_or(self.parent_origin);
        child.compute_layout(Some(offer))
    }

    /// The anchor shared with the rest of the tree, if attached.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Returns `true` if this component is attached to a surface.
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns `true` if this component is directly bound to a surface.
    pub fn is_root(&self) -> bool {
        self.anchor
            .as_ref()
            .map_or(false, |anchor| anchor.root == self.id)
    }

    /// Returns `true` once `destroy` was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Sets a callback run with the new size after every committed layout.
    pub fn set_on_resize<F>(&mut self, f: F)
    where
        F: 'static + FnMut(Vec2),
    {
        self.on_resize = Some(Box::new(f));
    }

    /// Adds a callback run every time this component is attached.
    ///
    /// If the component is already attached, the callback also runs right
    /// away.
    pub fn on_anchor<F>(&mut self, f: F) -> CallbackHandle
    where
        F: 'static + FnMut(ComponentId),
    {
        let mut f: LifecycleCallback = Box::new(f);
        if self.is_anchored() {
            f(self.id);
        }
        self.on_anchor.add(f)
    }

    /// Removes a callback added with [`on_anchor`](Self::on_anchor).
    ///
    /// Returns `false` if there was no such callback.
    pub fn off_anchor(&mut self, handle: CallbackHandle) -> bool {
        self.on_anchor.remove(handle)
    }

    /// Adds a callback run every time this component leaves its surface.
    pub fn on_detach<F>(&mut self, f: F) -> CallbackHandle
    where
        F: 'static + FnMut(ComponentId),
    {
        self.on_detach.add(Box::new(f))
    }

    /// Removes a callback added with [`on_detach`](Self::on_detach).
    pub fn off_detach(&mut self, handle: CallbackHandle) -> bool {
        self.on_detach.remove(handle)
    }

    /// Requests a layout pass of the tree this component belongs to.
    ///
    /// Does nothing when detached: the change is only recorded, and used
    /// by the next `compute_layout`.
    pub fn invalidate(&self) {
        if let Some(ref anchor) = self.anchor {
            anchor.request_layout();
        }
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), Error> {
        if self.destroyed {
            Err(Error::Reuse(self.id))
        } else {
            Ok(())
        }
    }

    pub(crate) fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
        self.on_anchor.call(self.id);
    }

    /// Forgets the anchor and removes this component from its surface.
    ///
    /// Detach callbacks only run if there was an anchor to forget.
    pub(crate) fn release(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            anchor.surface.borrow_mut().remove(self.id);
            self.on_detach.call(self.id);
        }
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    /// Offer used by a root called without arguments: the whole surface.
    pub(crate) fn root_offer(&self) -> Result<Rect, Error> {
        match self.anchor {
            Some(ref anchor) if anchor.root == self.id => {
                Ok(Rect::from_zero(anchor.surface.borrow().size()))
            }
            Some(_) => Err(Error::InvalidLayoutCall(
                "only a root component can infer its own offer",
            )),
            None => Err(Error::InvalidLayoutCall(
                "cannot infer an offer for a component that is not attached to a surface",
            )),
        }
    }

    /// Roots have no parent to be relative to.
    pub(crate) fn clear_parent_origin(&mut self) {
        self.parent_origin = Vec2::new(0.0, 0.0);
    }

    /// Stores the new geometry and reports it to the surface.
    pub(crate) fn commit(&mut self, geometry: Rect) {
        self.geometry = Some(geometry);
        if let Some(ref anchor) = self.anchor {
            anchor.surface.borrow_mut().place(self.id, geometry);
        }
        if let Some(ref mut on_resize) = self.on_resize {
            on_resize(geometry.size);
        }
    }
}

impl fmt::Debug for ComponentBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentBase")
            .field("id", &self.id)
            .field("align", &self.align)
            .field("offset", &self.offset)
            .field("geometry", &self.geometry)
            .field("parent_origin", &self.parent_origin)
            .field("anchor", &self.anchor)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
