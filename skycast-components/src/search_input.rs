//! City search field

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::component::Component;

/// Props for SearchInput
pub struct SearchInputProps<'a, A> {
    /// Current `input_text`
    pub value: &'a str,
    /// Shown dimmed while the field is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Called with the full new text after every edit
    pub on_change: fn(String) -> A,
}

/// Single-line text field for typing a city name
///
/// Every edit emits `on_change` with the whole new value. Cursor position
/// is local to the widget. When the value is replaced from outside (a
/// candidate was picked) the cursor jumps to the end.
#[derive(Default)]
pub struct SearchInput {
    /// Cursor position (byte index)
    cursor: usize,
    /// Value seen on the previous call, used to spot outside replacements
    last_value: String,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor byte offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn sync(&mut self, value: &str) {
        if value != self.last_value {
            self.cursor = value.len();
            self.last_value = value.to_string();
        }
        self.cursor = self.cursor.min(value.len());
    }

    fn prev_boundary(value: &str, from: usize) -> usize {
        value[..from]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(value: &str, from: usize) -> usize {
        value[from..]
            .chars()
            .next()
            .map(|c| from + c.len_utf8())
            .unwrap_or(from)
    }

    /// Record the value we are about to emit so the next sync keeps the cursor.
    fn emit(&mut self, value: String, cursor: usize) -> String {
        self.cursor = cursor;
        self.last_value = value.clone();
        value
    }

    fn edit(&mut self, value: &str, key: &KeyEvent) -> Option<String> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') if !value.is_empty() => Some(self.emit(String::new(), 0)),
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let mut next = String::with_capacity(value.len() + c.len_utf8());
                next.push_str(&value[..self.cursor]);
                next.push(c);
                next.push_str(&value[self.cursor..]);
                let cursor = self.cursor + c.len_utf8();
                Some(self.emit(next, cursor))
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let start = Self::prev_boundary(value, self.cursor);
                let next = format!("{}{}", &value[..start], &value[self.cursor..]);
                Some(self.emit(next, start))
            }
            KeyCode::Delete if self.cursor < value.len() => {
                let end = Self::next_boundary(value, self.cursor);
                let next = format!("{}{}", &value[..self.cursor], &value[end..]);
                let cursor = self.cursor;
                Some(self.emit(next, cursor))
            }
            KeyCode::Left => {
                self.cursor = Self::prev_boundary(value, self.cursor);
                None
            }
            KeyCode::Right => {
                self.cursor = Self::next_boundary(value, self.cursor);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = value.len();
                None
            }
            _ => None,
        }
    }
}

impl<A> Component<A> for SearchInput {
    type Props<'a> = SearchInputProps<'a, A>;

    fn handle_key(
        &mut self,
        key: &KeyEvent,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        self.sync(props.value);
        self.edit(props.value, key).map(props.on_change)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let paragraph = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Enter a city below "),
        );
        frame.render_widget(paragraph, area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let column = props.value[..self.cursor].chars().count() as u16;
            let x = area.x + 1 + column;
            if x < area.x + area.width - 1 {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}
