//! Commonly used traits bundled for easy import.
//!
//! This module provides an easy way to import some traits.
//!
//! # Examples
//!
//! ```
//! use trellis::traits::*;
//! ```

#[doc(no_inline)]
pub use crate::component::{Component, ComponentContainer, IntoBoxedComponent};

#[doc(no_inline)]
pub use crate::scheduler::Scheduler;

#[doc(no_inline)]
pub use crate::surface::Surface;
