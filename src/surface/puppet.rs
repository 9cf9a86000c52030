//! Puppet surface
use ahash::AHashMap;
use crossbeam_channel::{self, Receiver, Sender};
use log::warn;

use crate::component::ComponentId;
use crate::surface::Surface;
use crate::{Rect, Vec2};

/// Something that happened to the puppet surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A component committed a geometry.
    Placed(ComponentId, Rect),
    /// A component was detached.
    Removed(ComponentId),
}

/// Puppet surface for testing.
///
/// Remembers the last geometry of every attached component, and counts how
/// many times it was told about a placement.
pub struct PuppetSurface {
    size: Vec2,
    placements: AHashMap<ComponentId, Rect>,
    count: usize,
    stream: (Sender<Placement>, Receiver<Placement>),
}

impl PuppetSurface {
    /// Creates a new puppet surface of the given size.
    pub fn new<V: Into<Vec2>>(size: V) -> Self {
        PuppetSurface {
            size: size.into(),
            placements: AHashMap::new(),
            count: 0,
            stream: crossbeam_channel::unbounded(),
        }
    }

    /// Changes the size reported to the root.
    pub fn set_size<V: Into<Vec2>>(&mut self, size: V) {
        self.size = size.into();
    }

    /// Last geometry placed for `id`, if it is still attached.
    pub fn placement(&self, id: ComponentId) -> Option<Rect> {
        self.placements.get(&id).copied()
    }

    /// Number of components currently placed.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if nothing is placed on this surface.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of `place` calls received so far.
    pub fn placement_count(&self) -> usize {
        self.count
    }

    /// Output stream of every placement and removal, in order.
    pub fn stream(&self) -> Receiver<Placement> {
        self.stream.1.clone()
    }

    fn notify(&self, event: Placement) {
        if self.stream.0.send(event).is_err() {
            warn!("Puppet surface stream is closed");
        }
    }
}

impl Surface for PuppetSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn place(&mut self, id: ComponentId, geometry: Rect) {
        self.count += 1;
        self.placements.insert(id, geometry);
        self.notify(Placement::Placed(id, geometry));
    }

    fn remove(&mut self, id: ComponentId) {
        if self.placements.remove(&id).is_some() {
            self.notify(Placement::Removed(id));
        }
    }

    fn name(&self) -> &str {
        "puppet"
    }
}
