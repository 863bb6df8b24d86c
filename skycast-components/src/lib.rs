//! Terminal widgets for skycast
//!
//! Components implement [`Component<A>`] and emit actions through callback
//! functions passed in their props. None of them mutate the selection.
//!
//! # Components
//!
//! - [`SearchInput`] - city text field
//! - [`CandidateList`] - suggestion dropdown with keyboard highlight
//! - [`ConditionsPanel`] - current conditions, or "Loading..."
//! - [`Backdrop`] - tinted background naming the condition video
//! - [`ErrorView`] - blocking failure screen
//!
//! # Example
//!
//! ```ignore
//! let mut input = SearchInput::new();
//! input.render(frame, area, SearchInputProps {
//!     value: &selection.input_text,
//!     placeholder: "Search for a city",
//!     is_focused: true,
//!     on_change: Action::InputChanged,
//! });
//! ```

mod backdrop;
mod candidate_list;
mod component;
mod conditions_panel;
mod error_view;
mod search_input;
pub mod testing;

pub use backdrop::{Backdrop, BackdropProps};
pub use candidate_list::{CandidateList, CandidateListProps};
pub use component::Component;
pub use conditions_panel::{ConditionsPanel, ConditionsPanelProps};
pub use error_view::{ErrorView, ErrorViewProps};
pub use search_input::{SearchInput, SearchInputProps};
