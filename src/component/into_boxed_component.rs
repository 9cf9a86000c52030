use crate::component::Component;

/// Represents a type that can be made into a `Box<dyn Component>`.
///
/// Containers accept any `IntoBoxedComponent`, so children can be given
/// either by value or already boxed.
pub trait IntoBoxedComponent {
    /// Returns a `Box<dyn Component>`.
    fn into_boxed_component(self) -> Box<dyn Component>;
}

impl<T> IntoBoxedComponent for T
where
    T: Component,
{
    fn into_boxed_component(self) -> Box<dyn Component> {
        Box::new(self)
    }
}

impl IntoBoxedComponent for Box<dyn Component> {
    fn into_boxed_component(self) -> Box<dyn Component> {
        self
    }
}
