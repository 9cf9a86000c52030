use crate::component::{Component, ComponentBase, SizeRequest};
use crate::error::{ConfigurationError, Error};
use crate::{Vec2, XY};

/// Leaf component asking for a constant size.
///
/// Fixed in both axes by default: it takes the size it asks for, or less
/// when squeezed, and is aligned in any extra space.
///
/// # Examples
///
/// ```rust
/// use trellis::components::FixedSize;
/// use trellis::XY;
///
/// let label = FixedSize::new(120.0, 16.0)
///     .unwrap()
///     .fixed_axes(XY::new(false, true));
/// ```
#[derive(Debug)]
pub struct FixedSize {
    base: ComponentBase,
    size: Vec2,
    fixed: XY<bool>,
}

impl FixedSize {
    /// Creates a new component asking for `width × height`.
    ///
    /// Negative or non-finite sizes are rejected.
    pub fn new(width: f64, height: f64) -> Result<Self, Error> {
        Ok(FixedSize {
            base: ComponentBase::new(),
            size: Self::validate(width, height)?,
            fixed: XY::new(true, true),
        })
    }

    fn validate(width: f64, height: f64) -> Result<Vec2, ConfigurationError> {
        Ok(Vec2::new(
            ConfigurationError::check_non_negative("width", width)?,
            ConfigurationError::check_non_negative("height", height)?,
        ))
    }

    /// Selects the axes on which this component is fixed.
    ///
    /// On the others, it still asks for its size but grows to fill its
    /// offer.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn fixed_axes(mut self, fixed: XY<bool>) -> Self {
        self.set_fixed_axes(fixed);
        self
    }

    /// Selects the axes on which this component is fixed.
    pub fn set_fixed_axes(&mut self, fixed: XY<bool>) {
        self.fixed = fixed;
        self.base.invalidate();
    }

    /// The size this component asks for.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Changes the requested size.
    ///
    /// On error, the previous size is kept.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), Error> {
        self.size = Self::validate(width, height)?;
        self.base.invalidate();
        Ok(())
    }
}

impl Component for FixedSize {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn requested_space(&mut self, _: Vec2) -> SizeRequest {
        SizeRequest::from(self.size)
    }

    fn fixed_width(&self) -> bool {
        self.fixed.x
    }

    fn fixed_height(&self) -> bool {
        self.fixed.y
    }
}
