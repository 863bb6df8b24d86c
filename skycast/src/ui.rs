//! Screen layout and key routing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use skycast_components::{
    Backdrop, BackdropProps, CandidateList, CandidateListProps, Component, ConditionsPanel,
    ConditionsPanelProps, ErrorView, ErrorViewProps, SearchInput, SearchInputProps,
};
use skycast_core::{Action, AssetCatalog, Selection};

use crate::api::Units;
use crate::runtime::{EventOutcome, TermEvent};

const PLACEHOLDER_TEXT: &str = "Search for a city";
const CONTENT_WIDTH: u16 = 60;
const DROPDOWN_ROWS: u16 = 8;

/// All widgets plus the settings they render with
pub struct SkycastUi {
    input: SearchInput,
    dropdown: CandidateList,
    panel: ConditionsPanel,
    backdrop: Backdrop,
    error: ErrorView,
    catalog: AssetCatalog,
    units: Units,
}

impl SkycastUi {
    pub fn new(catalog: AssetCatalog, units: Units) -> Self {
        Self {
            input: SearchInput::new(),
            dropdown: CandidateList::new(),
            panel: ConditionsPanel,
            backdrop: Backdrop,
            error: ErrorView,
            catalog,
            units,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &Selection) {
        <Backdrop as Component<Action>>::render(
            &mut self.backdrop,
            frame,
            area,
            BackdropProps {
                asset: state.asset.as_ref(),
                catalog: &self.catalog,
            },
        );

        let column = centered_column(CONTENT_WIDTH, area);

        if let Some(failure) = state.fatal_error.as_ref() {
            let box_area = Rect {
                height: column.height.min(9),
                ..column
            };
            <ErrorView as Component<Action>>::render(
                &mut self.error,
                frame,
                box_area,
                ErrorViewProps { failure },
            );
            return;
        }

        let [input_area, panel_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(10)]).areas(column);

        self.input.render(frame, input_area, input_props(state));

        <ConditionsPanel as Component<Action>>::render(
            &mut self.panel,
            frame,
            panel_area,
            ConditionsPanelProps {
                selection: state,
                temperature_unit: self.units.temperature_suffix(),
                speed_unit: self.units.speed_suffix(),
            },
        );

        // Dropdown overlays the panel
        if let Some(candidates) = state.candidates.as_deref().filter(|c| !c.is_empty()) {
            let height = CandidateList::height_for(candidates.len(), DROPDOWN_ROWS)
                .min(area.bottom().saturating_sub(input_area.bottom()));
            let dropdown_area = Rect {
                y: input_area.bottom(),
                height,
                ..input_area
            };
            self.dropdown.render(
                frame,
                dropdown_area,
                CandidateListProps {
                    candidates,
                    is_focused: true,
                    on_pick: Action::CandidateSelected,
                },
            );
        }
    }

    /// Route a terminal event to the widget that owns it
    pub fn map_event(&mut self, event: &TermEvent, state: &Selection) -> EventOutcome {
        match event {
            TermEvent::Resize(..) => EventOutcome::needs_render(),
            TermEvent::Key(key) => self.map_key(key, state),
        }
    }

    fn map_key(&mut self, key: &KeyEvent, state: &Selection) -> EventOutcome {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if key.code == KeyCode::Esc || ctrl_c {
            return EventOutcome::action(Action::Quit);
        }
        if state.fatal_error.is_some() {
            return EventOutcome::ignored();
        }

        let dropdown_key = matches!(key.code, KeyCode::Up | KeyCode::Down | KeyCode::Enter);
        if dropdown_key {
            let candidates = match state.candidates.as_deref() {
                Some(candidates) if !candidates.is_empty() => candidates,
                _ => return EventOutcome::ignored(),
            };
            let props = CandidateListProps {
                candidates,
                is_focused: true,
                on_pick: Action::CandidateSelected,
            };
            return EventOutcome::from_actions(self.dropdown.handle_key(key, props));
        }

        EventOutcome::from_actions(self.input.handle_key(key, input_props(state)))
    }
}

fn input_props(state: &Selection) -> SearchInputProps<'_, Action> {
    SearchInputProps {
        value: &state.input_text,
        placeholder: PLACEHOLDER_TEXT,
        is_focused: true,
        on_change: Action::InputChanged,
    }
}

/// A column of at most `width` cells, centered horizontally with a one-row top margin
fn centered_column(width: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.min(1);
    Rect::new(x, y, width, area.height.saturating_sub(y - area.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_components::testing::{key, typed, RenderHarness};
    use skycast_core::{
        reduce, Candidate, Coordinates, Failure, WeatherOutcome, WeatherQuery, WeatherReport,
    };

    fn ui() -> SkycastUi {
        SkycastUi::new(AssetCatalog::default(), Units::Metric)
    }

    fn draw(ui: &mut SkycastUi, state: &Selection) -> String {
        let mut harness = RenderHarness::new(70, 20);
        harness.render_to_string_plain(|frame| ui.render(frame, frame.area(), state))
    }

    /// Feed keys through the UI and the reducer, like the runtime does
    fn drive(ui: &mut SkycastUi, state: &mut Selection, keys: &[KeyEvent]) {
        for k in keys {
            let outcome = ui.map_event(&TermEvent::Key(*k), state);
            for action in outcome.actions {
                reduce(state, action);
            }
        }
    }

    fn with_candidates(state: &mut Selection, prefix: &str, candidates: Vec<Candidate>) {
        reduce(
            state,
            Action::SearchResolved {
                prefix: prefix.into(),
                candidates,
            },
        );
    }

    #[test]
    fn test_typing_emits_input_changes() {
        let mut ui = ui();
        let mut state = Selection::default();
        drive(&mut ui, &mut state, &typed("Par"));
        assert_eq!(state.input_text, "Par");
        assert_eq!(state.pending_search.as_deref(), Some("Par"));
    }

    #[test]
    fn test_dropdown_pick_with_arrows() {
        let mut ui = ui();
        let mut state = Selection::default();
        drive(&mut ui, &mut state, &typed("Spring"));
        with_candidates(
            &mut state,
            "Spring",
            vec![
                Candidate::new("Springfield", "US", Coordinates::new(39.8, -89.6)),
                Candidate::new("Springs", "ZA", Coordinates::new(-26.25, 28.4)),
            ],
        );

        drive(&mut ui, &mut state, &[key("down"), key("enter")]);
        assert_eq!(state.input_text, "Springs, ZA");
        assert_eq!(state.pair(), ("Springs", "ZA"));
        assert!(state.candidates.is_none());
    }

    #[test]
    fn test_enter_without_dropdown_does_nothing() {
        let mut ui = ui();
        let state = Selection::default();
        let outcome = ui.map_event(&TermEvent::Key(key("enter")), &state);
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut ui = ui();
        let state = Selection::default();
        for name in ["esc", "ctrl+c"] {
            let outcome = ui.map_event(&TermEvent::Key(key(name)), &state);
            assert_eq!(outcome.actions, vec![Action::Quit]);
        }
    }

    #[test]
    fn test_failed_blocks_input() {
        let mut ui = ui();
        let mut state = Selection::default();
        state.fatal_error = Some(Failure::Geolocation("denied".into()));
        let outcome = ui.map_event(&TermEvent::Key(key("a")), &state);
        assert!(outcome.actions.is_empty());

        let output = draw(&mut ui, &state);
        assert!(output.contains("Could not determine your location"));
        assert!(!output.contains("Conditions"));
    }

    #[test]
    fn test_render_loading_then_results() {
        let mut ui = ui();
        let mut state = Selection::default();
        assert!(draw(&mut ui, &state).contains("Loading..."));

        reduce(
            &mut state,
            Action::CandidateSelected(Candidate::new(
                "Cairo",
                "EG",
                Coordinates::new(30.04, 31.24),
            )),
        );
        reduce(
            &mut state,
            Action::WeatherResolved {
                query: WeatherQuery::by_name("Cairo", "EG"),
                outcome: WeatherOutcome::Found(WeatherReport {
                    name: "Cairo".into(),
                    country: "EG".into(),
                    coordinates: Coordinates::new(30.04, 31.24),
                    condition: "Dust".into(),
                    description: "dust".into(),
                    icon: "50d".into(),
                    temperature: 31.0,
                    feels_like: 30.2,
                    humidity: 20,
                    wind_speed: 6.2,
                }),
            },
        );

        let output = draw(&mut ui, &state);
        assert!(output.contains("Cairo, EG"));
        assert!(output.contains("31.0°C"));
        assert!(output.contains("fog.mp4 (day)"));
    }

    #[test]
    fn test_render_dropdown_over_panel() {
        let mut ui = ui();
        let mut state = Selection::default();
        drive(&mut ui, &mut state, &typed("Ber"));
        with_candidates(
            &mut state,
            "Ber",
            vec![Candidate::new("Berlin", "DE", Coordinates::new(52.52, 13.4))],
        );

        let output = draw(&mut ui, &state);
        assert!(output.contains("Ber"));
        assert!(output.contains("Berlin, DE"));
    }

    #[test]
    fn test_centered_column() {
        let column = centered_column(60, Rect::new(0, 0, 80, 24));
        assert_eq!(column, Rect::new(10, 1, 60, 23));

        let narrow = centered_column(60, Rect::new(0, 0, 30, 10));
        assert_eq!(narrow.width, 28);
    }
}
