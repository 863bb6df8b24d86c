//! Dropdown of city suggestions

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};
use skycast_core::Candidate;

use crate::component::Component;

/// Props for CandidateList
pub struct CandidateListProps<'a, A> {
    /// Ranked suggestions, in the search service's order
    pub candidates: &'a [Candidate],
    pub is_focused: bool,
    /// Called with the highlighted candidate on Enter
    pub on_pick: fn(Candidate) -> A,
}

/// Dropdown under the search field
///
/// Up/Down move a local highlight. Enter emits `on_pick` for the
/// highlighted entry. The highlight resets whenever the list changes.
#[derive(Default)]
pub struct CandidateList {
    highlighted: usize,
    scroll_offset: usize,
    /// Labels of the list the highlight refers to
    seen: Vec<String>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Rows needed to show `count` entries inside a border
    pub fn height_for(count: usize, max_rows: u16) -> u16 {
        (count as u16).min(max_rows).saturating_add(2)
    }

    fn sync(&mut self, candidates: &[Candidate]) {
        let same = self.seen.len() == candidates.len()
            && self
                .seen
                .iter()
                .zip(candidates)
                .all(|(label, c)| *label == c.label());
        if !same {
            self.seen = candidates.iter().map(Candidate::label).collect();
            self.highlighted = 0;
            self.scroll_offset = 0;
        }
        self.highlighted = self.highlighted.min(candidates.len().saturating_sub(1));
    }

    fn ensure_visible(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.highlighted < self.scroll_offset {
            self.scroll_offset = self.highlighted;
        } else if self.highlighted >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.highlighted + 1 - viewport_height;
        }
    }
}

impl<A> Component<A> for CandidateList {
    type Props<'a> = CandidateListProps<'a, A>;

    fn handle_key(
        &mut self,
        key: &KeyEvent,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.candidates.is_empty() {
            return None;
        }
        self.sync(props.candidates);
        let last = props.candidates.len() - 1;

        match key.code {
            KeyCode::Down => {
                self.highlighted = (self.highlighted + 1).min(last);
                None
            }
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            KeyCode::Enter => props
                .candidates
                .get(self.highlighted)
                .cloned()
                .map(props.on_pick),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.candidates);
        self.ensure_visible(area.height.saturating_sub(2) as usize);

        let items: Vec<ListItem> = props
            .candidates
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::raw(c.city.as_str()),
                    Span::styled(
                        format!(", {}", c.country_code),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default().with_selected(Some(self.highlighted));
        *state.offset_mut() = self.scroll_offset;

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, RenderHarness};
    use skycast_core::Coordinates;

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Pick(Candidate),
    }

    fn cities() -> Vec<Candidate> {
        vec![
            Candidate::new("London", "GB", Coordinates::new(51.5, -0.13)),
            Candidate::new("London", "CA", Coordinates::new(42.98, -81.25)),
            Candidate::new("Londonderry", "GB", Coordinates::new(55.0, -7.3)),
        ]
    }

    fn press(list: &mut CandidateList, candidates: &[Candidate], name: &str) -> Vec<TestAction> {
        let props = CandidateListProps {
            candidates,
            is_focused: true,
            on_pick: TestAction::Pick,
        };
        list.handle_key(&key(name), props).into_iter().collect()
    }

    #[test]
    fn test_enter_picks_first_by_default() {
        let mut list = CandidateList::new();
        let items = cities();
        assert_eq!(press(&mut list, &items, "enter"), vec![TestAction::Pick(items[0].clone())]);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut list = CandidateList::new();
        let items = cities();

        assert!(press(&mut list, &items, "up").is_empty());
        assert_eq!(list.highlighted(), 0);

        for _ in 0..5 {
            press(&mut list, &items, "down");
        }
        assert_eq!(list.highlighted(), 2);
        assert_eq!(press(&mut list, &items, "enter"), vec![TestAction::Pick(items[2].clone())]);
    }

    #[test]
    fn test_new_results_reset_highlight() {
        let mut list = CandidateList::new();
        let items = cities();
        press(&mut list, &items, "down");
        assert_eq!(list.highlighted(), 1);

        let narrowed = vec![items[2].clone()];
        press(&mut list, &narrowed, "left");
        assert_eq!(list.highlighted(), 0);
    }

    #[test]
    fn test_empty_list_ignores_keys() {
        let mut list = CandidateList::new();
        assert!(press(&mut list, &[], "enter").is_empty());
    }

    #[test]
    fn test_render_shows_labels() {
        let mut render = RenderHarness::new(30, 6);
        let mut list = CandidateList::new();
        let items = cities();

        let output = render.render_to_string_plain(|frame| {
            let props = CandidateListProps {
                candidates: &items,
                is_focused: true,
                on_pick: TestAction::Pick,
            };
            list.render(frame, frame.area(), props);
        });

        assert!(output.contains("London, GB"));
        assert!(output.contains("London, CA"));
        assert!(output.contains("Londonderry, GB"));
    }

    #[test]
    fn test_height_for() {
        assert_eq!(CandidateList::height_for(3, 8), 5);
        assert_eq!(CandidateList::height_for(20, 8), 10);
    }
}
