//! Tools to control component alignment.
//!
//! A component that is fixed in an axis may be offered more space than it
//! takes. Its alignment decides where, inside that offer, it is placed.
//! Growing components always take the whole offer, so alignment has no
//! visible effect on them.

use crate::error::{ConfigurationError, Error};
use crate::Vec2;

/// Specifies the alignment along both horizontal and vertical directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Align {
    /// Horizontal alignment policy
    pub h: HAlign,
    /// Vertical alignment policy
    pub v: VAlign,
}

impl Align {
    /// Creates a new Align object from the given alignments.
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Align { h, v }
    }

    /// Creates a top-left alignment.
    pub const fn top_left() -> Self {
        Align::new(HAlign::Left, VAlign::Top)
    }

    /// Creates a top-right alignment.
    pub const fn top_right() -> Self {
        Align::new(HAlign::Right, VAlign::Top)
    }

    /// Creates a bottom-right alignment.
    pub const fn bot_right() -> Self {
        Align::new(HAlign::Right, VAlign::Bottom)
    }

    /// Creates an alignment centered both horizontally and vertically.
    pub const fn center() -> Self {
        Align::new(HAlign::Center, VAlign::Center)
    }

    /// Returns the fraction of the slack placed before the component, on
    /// each axis.
    pub fn proportions(&self) -> Vec2 {
        Vec2::new(self.h.proportion(), self.v.proportion())
    }
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    /// Place the element to the left of available space
    #[default]
    Left,
    /// Place the element horizontally in the center of available space
    Center,
    /// Place the element to the right of available space
    Right,
}

impl std::str::FromStr for HAlign {
    type Err = Error;

    /// Parses `left`, `center` or `right`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => return Err(ConfigurationError::UnsupportedAlignment(s.to_string()).into()),
        })
    }
}

/// Vertical alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    /// Place the element at the top of available space
    #[default]
    Top,
    /// Place the element vertically in the center of available space
    Center,
    /// Place the element at the bottom of available space
    Bottom,
}

impl std::str::FromStr for VAlign {
    type Err = Error;

    /// Parses `top`, `center` or `bottom`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "top" => Self::Top,
            "center" => Self::Center,
            "bottom" => Self::Bottom,
            _ => return Err(ConfigurationError::UnsupportedAlignment(s.to_string()).into()),
        })
    }
}

impl HAlign {
    /// Fraction of the extra horizontal space placed left of the component.
    pub const fn proportion(&self) -> f64 {
        match *self {
            HAlign::Left => 0.0,
            HAlign::Center => 0.5,
            HAlign::Right => 1.0,
        }
    }

    /// Returns the offset required to position a component.
    ///
    /// When placing content of size `content` inside `container`, starting
    /// at the resulting offset aligns it as desired. Overflowing content is
    /// shifted the other way.
    pub fn get_offset(&self, content: f64, container: f64) -> f64 {
        (container - content) * self.proportion()
    }
}

impl VAlign {
    /// Fraction of the extra vertical space placed above the component.
    pub const fn proportion(&self) -> f64 {
        match *self {
            VAlign::Top => 0.0,
            VAlign::Center => 0.5,
            VAlign::Bottom => 1.0,
        }
    }

    /// Returns the offset required to position a component.
    ///
    /// See [`HAlign::get_offset`].
    pub fn get_offset(&self, content: f64, container: f64) -> f64 {
        (container - content) * self.proportion()
    }
}
