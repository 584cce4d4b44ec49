//! Contacts tab.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::app::Intent;
use super::list::{self, ListInput, SearchBox};
use super::theme::Palette;
use crate::i18n::Translate;
use crate::models::{filter_by_name, Contact, ContactStatus};
use crate::notice::Notice;

pub struct ContactsTab {
    contacts: Vec<Contact>,
    pub search: SearchBox,
    selected: usize,
}

fn status_color(status: ContactStatus, palette: &Palette) -> Color {
    match status {
        ContactStatus::Online => palette.online,
        ContactStatus::Away => palette.away,
        ContactStatus::Offline => palette.offline,
    }
}

impl ContactsTab {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            search: SearchBox::default(),
            selected: 0,
        }
    }

    pub fn visible(&self) -> Vec<&Contact> {
        filter_by_name(&self.contacts, &self.search.query)
    }

    /// Total and online counts over the whole list, whatever the query.
    pub fn stats(&self) -> (usize, usize) {
        let online = self
            .contacts
            .iter()
            .filter(|c| c.status == ContactStatus::Online)
            .count();
        (self.contacts.len(), online)
    }

    pub fn handle_key(&mut self, key: KeyEvent, tr: &dyn Translate) -> Option<Intent> {
        let len = self.visible().len();
        match list::handle_list_key(Some(&mut self.search), &mut self.selected, len, key) {
            ListInput::Activate => {
                let contact = self.visible().get(self.selected).copied()?;
                Some(Intent::Show(Notice::contact_actions(tr, &contact.name)))
            }
            ListInput::Ignored if key.code == KeyCode::Char('a') => {
                Some(Intent::Show(Notice::add_contact(tr)))
            }
            _ => None,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, tr: &dyn Translate, palette: &Palette) {
        let block = list::pane_block(palette, tr.t("contacts.title"), true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        list::render_search(
            Rect::new(inner.x, inner.y, inner.width, 1),
            buf,
            palette,
            &self.search,
            &tr.t("contacts.search"),
        );

        let (total, online) = self.stats();
        let stats = Line::from(vec![
            Span::styled(
                format!(" {} ", total),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(tr.t("contacts.total"), Style::default().fg(palette.text_secondary)),
            Span::styled("  |  ", Style::default().fg(palette.border)),
            Span::styled(
                format!("{} ", online),
                Style::default()
                    .fg(palette.online)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(tr.t("contacts.online"), Style::default().fg(palette.text_secondary)),
        ]);
        Paragraph::new(stats).render(Rect::new(inner.x, inner.y + 1, inner.width, 1), buf);

        let rows = Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(2));
        let hits = self.visible();
        if hits.is_empty() {
            list::render_empty(rows, buf, palette, &tr.t("contacts.empty"), "");
            return;
        }

        let height = rows.height as usize;
        let offset = list::compute_scroll_offset(self.selected, height, hits.len());
        for (i, contact) in hits.iter().enumerate().skip(offset).take(height) {
            let y = rows.y + (i - offset) as u16;
            let style = list::row_style(palette, i == self.selected);
            // Status dot, then the regular row after it.
            Paragraph::new(Line::from(Span::styled(
                " ●",
                style.fg(status_color(contact.status, palette)),
            )))
            .render(Rect::new(rows.x, y, 2.min(rows.width), 1), buf);
            list::render_row(
                buf,
                Rect::new(rows.x + 2, y, rows.width.saturating_sub(2), 1),
                &format!(" {} {}", contact.avatar, contact.name),
                &format!("{} ", contact.last_seen),
                style,
                Style::default().fg(palette.text_secondary),
            );
        }
    }
}
