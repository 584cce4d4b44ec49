//! Building blocks shared by the list tabs: bordered pane, search line,
//! selectable rows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Palette;

/// Search box state of a list tab.
#[derive(Debug, Default, Clone)]
pub struct SearchBox {
    /// Current query, matched as typed.
    pub query: String,
    /// Whether keystrokes go to the query.
    pub editing: bool,
}

impl SearchBox {
    pub fn start(&mut self) {
        self.editing = true;
    }

    /// Stop editing but keep the filter applied.
    pub fn finish(&mut self) {
        self.editing = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.editing = false;
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }
}

/// Outcome of a key press on a list tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInput {
    /// The list used the key.
    Consumed,
    /// Enter on the selected row.
    Activate,
    /// Not a list key; the caller may handle it.
    Ignored,
}

/// Navigation and search keys common to every list tab.
///
/// Pass `None` for lists without a search box. Changing the query moves the
/// selection back to the first row.
pub fn handle_list_key(
    search: Option<&mut SearchBox>,
    selected: &mut usize,
    len: usize,
    key: KeyEvent,
) -> ListInput {
    if let Some(search) = search {
        if search.editing {
            match key.code {
                KeyCode::Esc => search.clear(),
                KeyCode::Enter => search.finish(),
                KeyCode::Backspace => search.backspace(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    search.push(c)
                }
                _ => return ListInput::Ignored,
            }
            *selected = 0;
            return ListInput::Consumed;
        }
        match key.code {
            KeyCode::Char('/') => {
                search.start();
                return ListInput::Consumed;
            }
            KeyCode::Esc if !search.query.is_empty() => {
                search.clear();
                *selected = 0;
                return ListInput::Consumed;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *selected = step(*selected, len, false),
        KeyCode::Down | KeyCode::Char('j') => *selected = step(*selected, len, true),
        KeyCode::Home => *selected = 0,
        KeyCode::End => *selected = len.saturating_sub(1),
        KeyCode::Enter if len > 0 => return ListInput::Activate,
        _ => return ListInput::Ignored,
    }
    ListInput::Consumed
}

/// Move a selection index by one within `len` items.
pub fn step(selected: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}

/// Outer block of a pane; focused panes get a double border.
pub fn pane_block<'a>(palette: &Palette, title: String, focused: bool) -> Block<'a> {
    let (border_type, border_color) = if focused {
        (BorderType::Double, palette.primary)
    } else {
        (BorderType::Plain, palette.border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Render the one-line search field at the top of a list.
pub fn render_search(
    area: Rect,
    buf: &mut Buffer,
    palette: &Palette,
    search: &SearchBox,
    placeholder: &str,
) {
    let line = if search.query.is_empty() && !search.editing {
        Line::from(Span::styled(
            format!(" / {}", placeholder),
            Style::default().fg(palette.text_secondary),
        ))
    } else {
        let cursor = if search.editing { "_" } else { "" };
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(palette.primary)),
            Span::styled(
                format!("{}{}", search.query, cursor),
                Style::default().fg(palette.text),
            ),
            Span::styled("  (Esc)", Style::default().fg(palette.text_secondary)),
        ])
    };
    Paragraph::new(line)
        .style(Style::default().bg(palette.card))
        .render(area, buf);
}

/// First row to draw so that `selected` stays visible.
pub fn compute_scroll_offset(selected: usize, height: usize, total: usize) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    if selected < height {
        return 0;
    }
    let max_offset = total.saturating_sub(height);
    selected.saturating_sub(height - 1).min(max_offset)
}

/// Cut `text` to at most `width` terminal columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Left-aligned text plus a right-aligned badge on a single row.
pub fn render_row(
    buf: &mut Buffer,
    area: Rect,
    left: &str,
    badge: &str,
    text_style: Style,
    badge_style: Style,
) {
    let width = area.width as usize;
    if width == 0 {
        return;
    }

    let badge_w = badge.width();
    let max_left = if badge_w > 0 {
        width.saturating_sub(badge_w + 1)
    } else {
        width
    };
    let left = truncate_to_width(left, max_left);
    let pad = width.saturating_sub(left.width() + badge_w);

    let line = Line::from(vec![
        Span::styled(left, text_style),
        Span::styled(" ".repeat(pad), text_style),
        Span::styled(badge.to_string(), badge_style),
    ]);
    Paragraph::new(line).render(Rect::new(area.x, area.y, area.width, 1), buf);
}

/// Style of a list row depending on selection.
pub fn row_style(palette: &Palette, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(palette.text)
            .bg(palette.card)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    }
}

/// Centered "nothing here" text.
pub fn render_empty(area: Rect, buf: &mut Buffer, palette: &Palette, title: &str, subtitle: &str) {
    if area.height < 2 {
        return;
    }
    let y = area.y + area.height / 3;
    let lines = [
        (title, Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
        (subtitle, Style::default().fg(palette.text_secondary)),
    ];
    for (i, (text, style)) in lines.iter().enumerate() {
        let row_y = y + i as u16;
        if row_y >= area.y + area.height {
            break;
        }
        let text = truncate_to_width(text, area.width as usize);
        let x = area.x + (area.width.saturating_sub(text.width() as u16)) / 2;
        Paragraph::new(Line::from(Span::styled(text, *style)))
            .render(Rect::new(x, row_y, area.width.saturating_sub(x - area.x), 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, 3, false), 0);
        assert_eq!(step(0, 3, true), 1);
        assert_eq!(step(2, 3, true), 2);
        assert_eq!(step(5, 0, true), 0);
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(compute_scroll_offset(0, 5, 3), 0);
        assert_eq!(compute_scroll_offset(4, 5, 10), 0);
        assert_eq!(compute_scroll_offset(5, 5, 10), 1);
        assert_eq!(compute_scroll_offset(9, 5, 10), 5);
    }

    #[test]
    fn test_truncate_counts_columns() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        // Wide glyphs take two columns.
        assert_eq!(truncate_to_width("👩abc", 3), "👩a");
        assert_eq!(truncate_to_width("ab", 10), "ab");
    }

    #[test]
    fn test_render_row_badge_right_aligned() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        render_row(&mut buf, area, "Alice", "2", Style::default(), Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "A");
        assert_eq!(buf[(11, 0)].symbol(), "2");
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_list_keys_search_then_navigate() {
        let mut search = SearchBox::default();
        let mut selected = 2;
        assert_eq!(
            handle_list_key(Some(&mut search), &mut selected, 5, press(KeyCode::Char('/'))),
            ListInput::Consumed
        );
        // 'j' is text while the search box is open.
        handle_list_key(Some(&mut search), &mut selected, 5, press(KeyCode::Char('j')));
        assert_eq!(search.query, "j");
        assert_eq!(selected, 0);
        handle_list_key(Some(&mut search), &mut selected, 5, press(KeyCode::Enter));
        assert!(!search.editing);

        handle_list_key(Some(&mut search), &mut selected, 5, press(KeyCode::Char('j')));
        assert_eq!(selected, 1);
        assert_eq!(
            handle_list_key(Some(&mut search), &mut selected, 5, press(KeyCode::Enter)),
            ListInput::Activate
        );
        handle_list_key(Some(&mut search), &mut selected, 5, press(KeyCode::Esc));
        assert!(search.query.is_empty());
    }

    #[test]
    fn test_list_keys_empty_list() {
        let mut selected = 0;
        assert_eq!(
            handle_list_key(None, &mut selected, 0, press(KeyCode::Enter)),
            ListInput::Ignored
        );
        assert_eq!(
            handle_list_key(None, &mut selected, 0, press(KeyCode::Char('q'))),
            ListInput::Ignored
        );
    }

    #[test]
    fn test_search_box_editing() {
        let mut search = SearchBox::default();
        search.start();
        search.push('b');
        search.push('o');
        search.backspace();
        assert_eq!(search.query, "b");
        search.finish();
        assert!(!search.editing);
        assert_eq!(search.query, "b");
        search.clear();
        assert!(search.query.is_empty());
    }
}
