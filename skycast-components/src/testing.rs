//! Render and key helpers for component tests
//!
//! # Example
//!
//! ```
//! use ratatui::widgets::Paragraph;
//! use skycast_components::testing::RenderHarness;
//!
//! let mut render = RenderHarness::new(20, 3);
//! let output = render.render_to_string_plain(|frame| {
//!     frame.render_widget(Paragraph::new("Oslo, NO"), frame.area());
//! });
//! assert!(output.contains("Oslo, NO"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

/// Renders into an in-memory terminal of fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        // TestBackend never fails to initialize
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => panic!("Failed to create test terminal: {e}"),
        };
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        if let Err(e) = self.terminal.draw(draw) {
            panic!("Failed to draw test frame: {e}");
        }
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row, without styles.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        let buffer = self.render(draw);
        buffer_to_string_plain(buffer)
    }
}

/// Text content of a buffer, rows joined by newlines and trailing spaces kept.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Build a key press from a short name: `"a"`, `"enter"`, `"ctrl+c"`, `"down"`.
///
/// Panics on names it does not know, which is what a test wants.
pub fn key(name: &str) -> KeyEvent {
    let lower = name.to_lowercase();
    let (modifiers, code_part) = match lower.strip_prefix("ctrl+") {
        Some(rest) => (KeyModifiers::CONTROL, rest),
        None => (KeyModifiers::empty(), lower.as_str()),
    };
    let code = match code_part {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        _ => {
            // Single characters keep their original case
            let raw = &name[name.len() - code_part.len()..];
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => panic!("Invalid key name: {name:?}"),
            }
        }
    };
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key presses for every character of `text`, in order.
pub fn typed(text: &str) -> Vec<KeyEvent> {
    text.chars()
        .map(|c| KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        })
        .collect()
}
