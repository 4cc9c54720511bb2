//! Binding capability implemented by the rendering layer.
//!
//! The creator never sees a concrete widget type. It resolves a flat row to
//! a parent key or a child value and hands that to an [`ExpandableBinder`],
//! which owns visual construction, data binding and click wiring.

use std::sync::Arc;

/// A click handler attached to a bound visual.
///
/// The handler receives the visual that was clicked.
pub type ClickHandler<V> = Box<dyn Fn(&V) + Send + Sync>;

/// Listener for clicks on header rows.
///
/// Args: (visual, parent key, group ordinal, flat position)
pub type ParentClickListener<P, V> = Arc<dyn Fn(&V, &P, usize, usize) + Send + Sync>;

/// Listener for clicks on child rows.
///
/// Args: (visual, child, offset within group, flat position)
pub type ChildClickListener<C, V> = Arc<dyn Fn(&V, &C, usize, usize) + Send + Sync>;

/// Creates and binds visuals for the rows of an expandable creator.
///
/// # Example
///
/// ```
/// use recurve_adapter::{ClickHandler, ExpandableBinder};
///
/// #[derive(Default)]
/// struct Label {
///     text: String,
///     on_click: Option<ClickHandler<Label>>,
/// }
///
/// struct LabelBinder;
///
/// impl ExpandableBinder<String, String> for LabelBinder {
///     type Container = ();
///     type Visual = Label;
///
///     fn create_parent_visual(&mut self, _container: &()) -> Label {
///         Label::default()
///     }
///
///     fn create_child_visual(&mut self, _container: &()) -> Label {
///         Label::default()
///     }
///
///     fn bind_parent(&mut self, visual: &mut Label, parent: &String, _: usize, _: usize) {
///         visual.text = parent.to_uppercase();
///     }
///
///     fn bind_child(&mut self, visual: &mut Label, child: &String, _: usize, _: usize) {
///         visual.text = format!("  {child}");
///     }
///
///     fn set_on_click(&mut self, visual: &mut Label, handler: ClickHandler<Label>) {
///         visual.on_click = Some(handler);
///     }
/// }
/// ```
pub trait ExpandableBinder<P, C> {
    /// The layout container new visuals are created for.
    type Container: ?Sized;

    /// The visual a row is rendered into.
    type Visual;

    /// Creates a visual for header rows.
    fn create_parent_visual(&mut self, container: &Self::Container) -> Self::Visual;

    /// Creates a visual for child rows.
    fn create_child_visual(&mut self, container: &Self::Container) -> Self::Visual;

    /// Binds a parent key into a header visual.
    fn bind_parent(
        &mut self,
        visual: &mut Self::Visual,
        parent: &P,
        parent_position: usize,
        creator_position: usize,
    );

    /// Binds a child value into a child visual.
    fn bind_child(
        &mut self,
        visual: &mut Self::Visual,
        child: &C,
        child_position: usize,
        creator_position: usize,
    );

    /// Attaches a click handler to a visual, replacing any previous one.
    fn set_on_click(&mut self, visual: &mut Self::Visual, handler: ClickHandler<Self::Visual>);
}
