//! Base elements required to build components.
//!
//! Components are the rectangles the layout engine places. A component can
//! own child components, forming a tree. The root of this tree is bound to a
//! drawing [`Surface`](crate::surface::Surface), and every node of the tree
//! shares an [`Anchor`] pointing back at that root.
//!
//! # Layout
//!
//! The layout phase is a negotiation in two steps.
//!
//! First, a parent asks its children how much space they need for some
//! offered space, through [`Component::requested_space`]. This may be called
//! many times with different offers; it must not change any state visible
//! after layout.
//!
//! Then, the parent commits each child to a rectangle through
//! [`Component::compute_layout`]. The child takes its final size out of that
//! rectangle:
//!
//! * on an axis where it is *fixed*, it takes what it requested, but never
//!   more than offered;
//! * on an axis where it *grows*, it takes the whole offer.
//!
//! Any space left over on a fixed axis is distributed around the component
//! according to its [`Align`](crate::align::Align), and its offset is then
//! added to the origin. That origin is relative to the parent; see
//! [`Component::origin_to_root`] for the position in the whole tree.
//!
//! ### Contracts
//!
//! * Requests are never negative, and the same offer always gives the same
//!   request.
//! * A committed width or height is never negative, and never exceeds the
//!   offer on a fixed axis.
//! * Only the root may be laid out without an offer: it then uses the whole
//!   surface.
//!
//! # Invalidation
//!
//! Setters never lay anything out directly. They send the id of the root
//! through the [`LayoutSink`](crate::scheduler::LayoutSink) held by the
//! anchor, and the scheduler runs one layout pass for all the requests it
//! received since its last flush.

mod any;
mod base;
mod component_trait;
mod container;
mod into_boxed_component;
mod size_request;

pub use self::any::AnyComponent;
pub use self::base::{
    Anchor, CallbackHandle, ComponentBase, ComponentId, LifecycleCallback, ResizeCallback,
};
pub use self::component_trait::{commit_layout, Component};
pub use self::container::ComponentContainer;
pub(crate) use self::container::adopt;
pub use self::into_boxed_component::IntoBoxedComponent;
pub use self::size_request::SizeRequest;
