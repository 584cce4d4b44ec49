//! Chat screen: message bubbles, typing line and compose box.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::Intent;
use super::compose::{self, ComposeState};
use super::list::truncate_to_width;
use super::theme::Palette;
use crate::i18n::Translate;
use crate::models::{CallType, Message, MessageKind};
use crate::notice::Notice;
use crate::session::ChatSession;

/// Widest a bubble gets, as a share of the pane.
const BUBBLE_WIDTH_PERCENT: usize = 75;

/// What a key did on the chat screen.
#[derive(Debug)]
pub enum ChatInput {
    Consumed,
    Back,
    Intent(Intent),
}

/// An open conversation: owns the session for as long as the screen is shown.
pub struct ChatView {
    pub session: ChatSession,
    pub compose: ComposeState,
    /// Lines scrolled up from the newest message.
    scroll_back: usize,
}

impl ChatView {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            compose: ComposeState::default(),
            scroll_back: 0,
        }
    }

    /// Hand the draft to the session. The draft is kept when nothing was sent.
    pub fn submit(&mut self) -> bool {
        if self.session.send_message(self.compose.text()).is_none() {
            return false;
        }
        self.compose.clear();
        self.scroll_back = 0;
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent, tr: &dyn Translate) -> ChatInput {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return ChatInput::Back,
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::F(2) => {
                return ChatInput::Intent(Intent::Show(Notice::chat_call(tr, CallType::Audio)))
            }
            KeyCode::F(3) => {
                return ChatInput::Intent(Intent::Show(Notice::chat_call(tr, CallType::Video)))
            }
            KeyCode::Char('p') if ctrl => {
                return ChatInput::Intent(Intent::Show(Notice::attachment(tr)))
            }
            KeyCode::Char('u') if ctrl => self.compose.clear(),
            KeyCode::Char(c) if !ctrl => {
                self.compose.insert_char(c);
            }
            KeyCode::Backspace => self.compose.backspace(),
            KeyCode::Delete => self.compose.delete(),
            KeyCode::Left => self.compose.move_left(),
            KeyCode::Right => self.compose.move_right(),
            KeyCode::Home => self.compose.move_home(),
            KeyCode::End => self.compose.move_end(),
            KeyCode::Up | KeyCode::PageUp => self.scroll_back += 1,
            KeyCode::Down | KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(1)
            }
            _ => {}
        }
        ChatInput::Consumed
    }

    pub fn render(&self, area: Rect, frame: &mut Frame, tr: &dyn Translate, palette: &Palette) {
        let [header_area, messages_area, typing_area, compose_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(compose::COMPOSE_HEIGHT),
        ])
        .areas(area);

        self.render_header(header_area, frame.buffer_mut(), palette);
        render_messages(
            messages_area,
            frame.buffer_mut(),
            self.session.messages(),
            self.scroll_back,
            palette,
        );
        if self.session.is_peer_typing() {
            let typing = tr.translate("chat.typing", &[("name", self.session.peer_name())]);
            let line = Line::from(Span::styled(
                format!(" {}...", typing),
                Style::default()
                    .fg(palette.text_secondary)
                    .add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(Paragraph::new(line), typing_area);
        }
        compose::render(compose_area, frame, &self.compose, palette, &tr.t("chat.message"));
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(area);
        block.render(area, buf);

        let title = format!(" ‹ {}", self.session.peer_name());
        let actions = "☎ F2  ▶ F3 ";
        let pad = (inner.width as usize).saturating_sub(title.width() + actions.width());
        let line = Line::from(vec![
            Span::styled(
                title,
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(pad)),
            Span::styled(actions, Style::default().fg(palette.primary)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

/// Read mark shown after the time of a sent message.
pub fn read_mark(msg: &Message) -> &'static str {
    if msg.is_read() {
        "✓✓"
    } else {
        "✓"
    }
}

/// Bubble text; non-text messages get a tag in front.
fn body(msg: &Message) -> String {
    let tag = match msg.kind() {
        MessageKind::Text => return msg.text().to_string(),
        MessageKind::Image => "[photo]",
        MessageKind::File => "[file]",
        MessageKind::Audio => "[audio]",
        MessageKind::Video => "[video]",
    };
    format!("{} {}", tag, msg.text())
}

/// Break `text` into lines of at most `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split(' ') {
            let sep = usize::from(!current.is_empty());
            if current.width() + sep + word.width() <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // Words longer than a line are hard-split.
            let mut rest = word;
            while rest.width() > width {
                let mut head = truncate_to_width(rest, width);
                if head.is_empty() {
                    head = rest.chars().take(1).collect();
                }
                rest = &rest[head.len()..];
                lines.push(head);
            }
            current.push_str(rest);
        }
        lines.push(current);
    }
    lines
}

/// Bubble lines for one message: text lines then a meta line.
fn bubble_lines(msg: &Message, width: usize, palette: &Palette) -> Vec<(Line<'static>, bool)> {
    let sent = msg.is_sent();
    let (fg, bg) = if sent {
        (Color::White, palette.primary)
    } else {
        (palette.text, palette.card)
    };
    let inner_width = width.saturating_sub(2).max(1);
    let text_lines = wrap(&body(msg), inner_width);
    let meta = if sent {
        format!("{} {}", msg.time_label(), read_mark(msg))
    } else {
        msg.time_label()
    };
    let bubble_w = text_lines
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(meta.width()))
        .max()
        .unwrap_or(0);

    let mut out: Vec<(Line<'static>, bool)> = text_lines
        .into_iter()
        .map(|l| {
            let pad = bubble_w - l.width();
            let line = Line::from(Span::styled(
                format!(" {}{} ", l, " ".repeat(pad)),
                Style::default().fg(fg).bg(bg),
            ));
            (line, sent)
        })
        .collect();
    let pad = bubble_w - meta.width();
    out.push((
        Line::from(Span::styled(
            format!(" {}{} ", " ".repeat(pad), meta),
            Style::default().fg(palette.text_secondary),
        )),
        sent,
    ));
    out
}

fn render_messages(
    area: Rect,
    buf: &mut Buffer,
    messages: &[Message],
    scroll_back: usize,
    palette: &Palette,
) {
    if area.height == 0 || area.width < 4 {
        return;
    }
    let width = area.width as usize;
    let max_bubble = (width * BUBBLE_WIDTH_PERCENT / 100).max(4);

    let mut lines: Vec<(Line<'static>, bool)> = Vec::new();
    for msg in messages {
        lines.extend(bubble_lines(msg, max_bubble, palette));
        lines.push((Line::from(""), false));
    }

    // Newest at the bottom.
    let height = area.height as usize;
    let end = lines.len().saturating_sub(scroll_back.min(lines.len().saturating_sub(height)));
    let start = end.saturating_sub(height);
    let top = area.y + (height - (end - start)) as u16;

    for (i, (line, right)) in lines[start..end].iter().enumerate() {
        let w = (line.width() as u16).min(area.width);
        let x = if *right {
            area.x + area.width - w
        } else {
            area.x
        };
        Paragraph::new(line.clone()).render(Rect::new(x, top + i as u16, w, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::testing::KeyEcho;
    use crate::models::seed;
    use crate::session::TypingTimings;
    use chrono::Utc;

    fn view() -> ChatView {
        ChatView::new(ChatSession::new(
            "1",
            "Alice Martin",
            seed::chat_messages(Utc::now()),
            TypingTimings::default(),
        ))
    }

    fn type_text(view: &mut ChatView, text: &str) {
        for c in text.chars() {
            view.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), &KeyEcho);
        }
    }

    fn press(view: &mut ChatView, code: KeyCode, modifiers: KeyModifiers) -> ChatInput {
        view.handle_key(KeyEvent::new(code, modifiers), &KeyEcho)
    }

    #[tokio::test]
    async fn test_enter_sends_and_clears_draft() {
        let mut view = view();
        type_text(&mut view, "  Hi there ");
        press(&mut view, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(view.session.messages().len(), 5);
        assert_eq!(view.session.messages()[4].text(), "Hi there");
        assert_eq!(view.compose.text(), "");
    }

    #[tokio::test]
    async fn test_blank_draft_is_kept() {
        let mut view = view();
        type_text(&mut view, "   ");
        assert!(!view.submit());
        assert_eq!(view.session.messages().len(), 4);
        assert_eq!(view.compose.text(), "   ");
        assert!(!view.session.typing_armed());
    }

    #[test]
    fn test_call_keys_show_notices() {
        let mut view = view();
        match press(&mut view, KeyCode::F(3), KeyModifiers::NONE) {
            ChatInput::Intent(Intent::Show(n)) => assert_eq!(n.title, "chat.videoCall"),
            other => panic!("unexpected {:?}", other),
        }
        match press(&mut view, KeyCode::Char('p'), KeyModifiers::CONTROL) {
            ChatInput::Intent(Intent::Show(n)) => assert_eq!(n.title, "chat.shareFile"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            press(&mut view, KeyCode::Esc, KeyModifiers::NONE),
            ChatInput::Back
        ));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut view = view();
        type_text(&mut view, "draft");
        press(&mut view, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(view.compose.text(), "");
    }

    #[test]
    fn test_wrap_words_and_long_tokens() {
        assert_eq!(wrap("Salut ! Comment vas-tu ?", 10), vec!["Salut !", "Comment", "vas-tu ?"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 4), Vec::<String>::new());
    }

    #[test]
    fn test_sent_bubble_right_aligned_with_mark() {
        let messages = vec![Message::outgoing("yo")];
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        render_messages(area, &mut buf, &messages, 0, &Palette::dark());
        let meta_row: String = (0..30).map(|x| buf[(x, 2)].symbol()).collect();
        assert!(meta_row.trim_end().ends_with('✓'), "{:?}", meta_row);
        assert!(!meta_row.contains("✓✓"));
        // The bubble is 9 columns wide and flush with the right edge.
        assert_eq!(buf[(22, 1)].symbol(), "y");
        assert_eq!(buf[(21, 1)].bg, Palette::dark().primary);
        assert_eq!(buf[(20, 1)].bg, ratatui::style::Color::Reset);
    }
}
