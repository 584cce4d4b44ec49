//! Compose box of the chat screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Palette;

/// Longest draft accepted, in characters.
pub const MAX_CHARS: usize = 1000;

/// Draft text and cursor. The draft is presentation state: the session only
/// ever sees the text handed to it on Enter.
#[derive(Debug, Default)]
pub struct ComposeState {
    input: String,
    /// Cursor position (character offset into `input`).
    cursor_pos: usize,
}

impl ComposeState {
    pub fn text(&self) -> &str {
        &self.input
    }

    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor. Ignored once the draft is full.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.char_count() >= MAX_CHARS {
            return false;
        }
        let byte_pos = self.char_to_byte(self.cursor_pos);
        self.input.insert(byte_pos, c);
        self.cursor_pos += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let byte_pos = self.char_to_byte(self.cursor_pos);
            let prev_byte_pos = self.char_to_byte(self.cursor_pos - 1);
            self.input.drain(prev_byte_pos..byte_pos);
            self.cursor_pos -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.char_count() {
            let byte_pos = self.char_to_byte(self.cursor_pos);
            let next_byte_pos = self.char_to_byte(self.cursor_pos + 1);
            self.input.drain(byte_pos..next_byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.char_count() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.char_count();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn char_to_byte(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

/// Height of the compose box: border, input line, hint line, border.
pub const COMPOSE_HEIGHT: u16 = 4;

/// Render the compose box and place the terminal cursor in it.
pub fn render(
    area: Rect,
    frame: &mut Frame,
    state: &ComposeState,
    palette: &Palette,
    placeholder: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let display = compose_display_text(&state.input, state.cursor_pos, inner.width as usize);
    let line = if state.input.is_empty() {
        Line::from(Span::styled(
            format!(" {}", placeholder),
            Style::default().fg(palette.text_secondary),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", display.visible),
            Style::default().fg(palette.text),
        ))
    };
    frame.render_widget(Paragraph::new(line), input_area);
    frame.set_cursor_position((input_area.x + 1 + display.cursor_offset as u16, input_area.y));

    if inner.height >= 2 {
        let hint_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let hints = " C-p +  F2 audio  F3 video";
        let counter = format!("{}/{} ", state.char_count(), MAX_CHARS);
        let counter_style = if state.char_count() >= MAX_CHARS {
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        let pad = (inner.width as usize).saturating_sub(hints.width() + counter.width());
        let line = Line::from(vec![
            Span::styled(hints, Style::default().fg(palette.text_secondary)),
            Span::raw(" ".repeat(pad)),
            Span::styled(counter, counter_style),
        ]);
        frame.render_widget(Paragraph::new(line), hint_area);
    }
}

struct DisplayText {
    visible: String,
    /// Cursor column within `visible`.
    cursor_offset: usize,
}

/// Scroll the draft horizontally so the cursor stays on screen.
fn compose_display_text(input: &str, cursor_pos: usize, width: usize) -> DisplayText {
    // One column of left margin.
    let avail = width.saturating_sub(2);
    let chars: Vec<char> = input.chars().collect();

    if avail == 0 {
        return DisplayText {
            visible: String::new(),
            cursor_offset: 0,
        };
    }

    let scroll_start = if cursor_pos < avail {
        0
    } else {
        cursor_pos - avail + 1
    };
    let end = (scroll_start + avail).min(chars.len());
    DisplayText {
        visible: chars[scroll_start.min(end)..end].iter().collect(),
        cursor_offset: cursor_pos - scroll_start,
    }
}
