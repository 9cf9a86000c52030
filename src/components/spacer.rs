use crate::component::{Component, ComponentBase};

/// Empty component that grows to fill whatever it is offered.
///
/// Requests `(0, 0)`. Useful to absorb the proportional space of a grid
/// row or column.
#[derive(Debug, Default)]
pub struct Spacer {
    base: ComponentBase,
}

impl Spacer {
    /// Creates a new `Spacer`.
    pub fn new() -> Self {
        Spacer {
            base: ComponentBase::new(),
        }
    }
}

impl Component for Spacer {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}
