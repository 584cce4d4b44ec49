//! Modal popup for [`Notice`]s.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::help::centered_rect;
use super::theme::Palette;
use crate::notice::{ActionStyle, Notice};

const DIALOG_WIDTH: u16 = 56;

/// An open notice and the highlighted button.
#[derive(Debug)]
pub struct NoticeState {
    pub notice: Notice,
    selected: usize,
}

impl NoticeState {
    pub fn new(notice: Notice) -> Self {
        Self {
            notice,
            selected: 0,
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        if !self.notice.actions.is_empty() {
            self.selected = (self.selected + 1) % self.notice.actions.len();
        }
    }

    pub fn prev(&mut self) {
        let len = self.notice.actions.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Press the highlighted button. Returns its label.
    pub fn activate(&self) -> Option<String> {
        self.notice
            .activate(self.selected)
            .map(|action| action.label.clone())
    }
}

/// Terminal rows `body` needs at `text_width` columns.
fn body_rows(body: &str, text_width: usize) -> usize {
    body.lines()
        .map(|l| l.width().max(1).div_ceil(text_width))
        .sum()
}

pub fn render(frame: &mut Frame, state: &NoticeState, palette: &Palette) {
    let area = frame.area();
    let width = DIALOG_WIDTH.min(area.width.saturating_sub(2));
    let text_width = width.saturating_sub(4).max(1) as usize;
    let body_rows = body_rows(&state.notice.body, text_width);
    // Borders, body, blank line, buttons.
    let height = (body_rows as u16 + 4).min(area.height.saturating_sub(2));
    let popup = centered_rect(width, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.card))
        .title(Span::styled(
            format!(" {} ", state.notice.title),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height == 0 {
        return;
    }

    let body_area = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(1),
    );
    frame.render_widget(
        Paragraph::new(state.notice.body.as_str())
            .style(Style::default().fg(palette.text))
            .wrap(Wrap { trim: false }),
        body_area,
    );

    let mut buttons = Vec::new();
    for (i, action) in state.notice.actions.iter().enumerate() {
        let color = match action.style {
            ActionStyle::Destructive => palette.error,
            ActionStyle::Cancel => palette.text_secondary,
            ActionStyle::Default => palette.primary,
        };
        let mut style = Style::default().fg(color);
        if i == state.selected {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        buttons.push(Span::raw(" "));
        buttons.push(Span::styled(format!(" {} ", action.label), style));
    }
    let buttons_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    frame.render_widget(Paragraph::new(Line::from(buttons)), buttons_area);
}
