//! Discussions tab: conversation list with search.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::app::Intent;
use super::list::{self, ListInput, SearchBox};
use super::theme::Palette;
use crate::i18n::Translate;
use crate::models::{filter_by_name, Conversation};

/// Rows per conversation: name line and preview line.
const ROW_HEIGHT: u16 = 2;

pub struct DiscussionsTab {
    conversations: Vec<Conversation>,
    pub search: SearchBox,
    selected: usize,
}

impl DiscussionsTab {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            search: SearchBox::default(),
            selected: 0,
        }
    }

    /// Conversations matching the current query.
    pub fn visible(&self) -> Vec<&Conversation> {
        filter_by_name(&self.conversations, &self.search.query)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        let len = self.visible().len();
        match list::handle_list_key(Some(&mut self.search), &mut self.selected, len, key) {
            ListInput::Activate => {
                let conv = self.visible().get(self.selected).copied()?;
                Some(Intent::OpenChat {
                    id: conv.id.clone(),
                    name: conv.name.clone(),
                })
            }
            ListInput::Ignored if key.code == KeyCode::Char('n') => {
                tracing::info!("New conversation");
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, tr: &dyn Translate, palette: &Palette) {
        let block = list::pane_block(palette, tr.t("discussions.title"), true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let search_area = Rect::new(inner.x, inner.y, inner.width, 1);
        list::render_search(search_area, buf, palette, &self.search, &tr.t("discussions.search"));

        let rows = Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(2));
        let hits = self.visible();
        if hits.is_empty() {
            list::render_empty(
                rows,
                buf,
                palette,
                &tr.t("discussions.empty"),
                &tr.t("discussions.emptySubtext"),
            );
            return;
        }

        let fits = (rows.height / ROW_HEIGHT) as usize;
        let offset = list::compute_scroll_offset(self.selected, fits, hits.len());
        for (i, conv) in hits.iter().enumerate().skip(offset).take(fits) {
            let y = rows.y + ((i - offset) as u16) * ROW_HEIGHT;
            let selected = i == self.selected;
            let style = list::row_style(palette, selected);

            let mut title = format!(" {} {}", conv.avatar, conv.name);
            if conv.is_group {
                title.push_str(" [#]");
            }
            if conv.is_online {
                title.push_str(" ●");
            }
            list::render_row(
                buf,
                Rect::new(rows.x, y, rows.width, 1),
                &title,
                &format!("{} ", conv.timestamp),
                style,
                style.fg(palette.text_secondary),
            );

            let badge = if conv.unread_count > 0 {
                format!("({}) ", conv.unread_count)
            } else {
                String::new()
            };
            let preview_style = if selected {
                style.fg(palette.text_secondary)
            } else {
                Style::default().fg(palette.text_secondary)
            };
            list::render_row(
                buf,
                Rect::new(rows.x, y + 1, rows.width, 1),
                &format!("     {}", conv.last_message),
                &badge,
                preview_style,
                style.fg(palette.primary),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_query(tab: &mut DiscussionsTab, query: &str) {
        tab.handle_key(press(KeyCode::Char('/')));
        for c in query.chars() {
            tab.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_search_filters_list() {
        let mut tab = DiscussionsTab::new(seed::conversations());
        assert_eq!(tab.visible().len(), 5);
        type_query(&mut tab, "PROJET");
        let names: Vec<&str> = tab.visible().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Projet FortressTalk"]);
    }

    #[test]
    fn test_enter_opens_selected_conversation() {
        let mut tab = DiscussionsTab::new(seed::conversations());
        tab.handle_key(press(KeyCode::Down));
        match tab.handle_key(press(KeyCode::Enter)) {
            Some(Intent::OpenChat { id, name }) => {
                assert_eq!(id, "2");
                assert_eq!(name, "Équipe Développement");
            }
            _ => panic!("expected OpenChat"),
        }
    }

    #[test]
    fn test_enter_on_empty_result_does_nothing() {
        let mut tab = DiscussionsTab::new(seed::conversations());
        type_query(&mut tab, "zzz");
        tab.handle_key(press(KeyCode::Enter));
        assert!(tab.visible().is_empty());
        assert!(tab.handle_key(press(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_empty_state_rendered() {
        let fr = crate::i18n::Catalog::builtin("fr").unwrap();
        let mut tab = DiscussionsTab::new(seed::conversations());
        type_query(&mut tab, "zzz");
        let area = Rect::new(0, 0, 50, 12);
        let mut buf = Buffer::empty(area);
        tab.render(area, &mut buf, &fr, &Palette::dark());
        let text: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect();
        assert!(text.contains(&fr.t("discussions.empty")));
    }
}
