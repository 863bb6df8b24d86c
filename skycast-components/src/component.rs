//! Component trait for pure UI elements

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A UI element that renders from props and turns key presses into actions
///
/// Props carry all read-only data needed to render. `handle_key` returns
/// actions and never mutates the selection. Widget-local UI state (cursor
/// position, dropdown highlight) may live in `&mut self`.
///
/// # Example
///
/// ```ignore
/// impl Component<Action> for Banner {
///     type Props<'a> = BannerProps<'a>;
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(props.text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle a key press and return actions to dispatch
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_key(
        &mut self,
        key: &KeyEvent,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
