//! Current conditions for the selected place

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycast_core::{Selection, TimeOfDay, WeatherReport};

use crate::component::Component;

/// Props for ConditionsPanel
pub struct ConditionsPanelProps<'a> {
    pub selection: &'a Selection,
    /// Suffix for temperatures, e.g. `"°C"`
    pub temperature_unit: &'a str,
    /// Suffix for wind speed, e.g. `"m/s"`
    pub speed_unit: &'a str,
}

/// Results panel. Shows "Loading..." until the selection has weather to show.
#[derive(Default)]
pub struct ConditionsPanel;

impl ConditionsPanel {
    fn report_lines<'a>(
        report: &'a WeatherReport,
        props: &ConditionsPanelProps<'a>,
    ) -> Vec<Line<'a>> {
        let place = if report.country.is_empty() {
            report.name.clone()
        } else {
            format!("{}, {}", report.name, report.country)
        };
        let label = Style::default().fg(Color::DarkGray);
        let time_of_day = match TimeOfDay::from_icon(&report.icon) {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        };

        vec![
            Line::from(Span::styled(
                place,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw(format!("{} - {}", report.condition, report.description)),
                Span::styled(format!("  [{} {}]", report.icon, time_of_day), label),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Temperature  ", label),
                Span::raw(format!("{:.1}{}", report.temperature, props.temperature_unit)),
            ]),
            Line::from(vec![
                Span::styled("Feels like   ", label),
                Span::raw(format!("{:.1}{}", report.feels_like, props.temperature_unit)),
            ]),
            Line::from(vec![
                Span::styled("Humidity     ", label),
                Span::raw(format!("{}%", report.humidity)),
            ]),
            Line::from(vec![
                Span::styled("Wind         ", label),
                Span::raw(format!("{:.1} {}", report.wind_speed, props.speed_unit)),
            ]),
        ]
    }
}

impl<A> Component<A> for ConditionsPanel {
    type Props<'a> = ConditionsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Conditions ");

        let paragraph = match props.selection.weather.as_ref() {
            Some(report) if props.selection.show_results() => {
                Paragraph::new(Self::report_lines(report, &props))
            }
            _ => Paragraph::new(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::Yellow),
            )))
            .alignment(Alignment::Center),
        };

        frame.render_widget(paragraph.block(block), area);
    }
}
