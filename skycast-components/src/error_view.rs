//! Blocking error screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use skycast_core::Failure;

use crate::component::Component;

/// Props for ErrorView
pub struct ErrorViewProps<'a> {
    pub failure: &'a Failure,
}

/// Replaces the normal screen after a transport failure. There is no retry.
#[derive(Default)]
pub struct ErrorView;

impl<A> Component<A> for ErrorView {
    type Props<'a> = ErrorViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = vec![
            Line::from(Span::styled(
                props.failure.user_message(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                props.failure.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::raw(""),
            Line::from(Span::styled("Esc to quit", Style::default().fg(Color::Gray))),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error "),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}
