//! Calls tab: call history.

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::app::Intent;
use super::list::{self, ListInput};
use super::theme::Palette;
use crate::i18n::Translate;
use crate::models::{CallDirection, CallRecord};
use crate::notice::Notice;

pub struct CallsTab {
    calls: Vec<CallRecord>,
    selected: usize,
}

impl CallsTab {
    pub fn new(calls: Vec<CallRecord>) -> Self {
        Self { calls, selected: 0 }
    }

    pub fn handle_key(&mut self, key: KeyEvent, tr: &dyn Translate) -> Option<Intent> {
        match list::handle_list_key(None, &mut self.selected, self.calls.len(), key) {
            ListInput::Activate => {
                let call = self.calls.get(self.selected)?;
                tracing::info!("Call back {} ({:?})", call.name, call.call_type);
                Some(Intent::Show(Notice::history_call(
                    tr,
                    &call.name,
                    call.call_type,
                )))
            }
            _ => None,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, tr: &dyn Translate, palette: &Palette) {
        let block = list::pane_block(palette, tr.t("calls.title"), true);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.calls.is_empty() {
            list::render_empty(inner, buf, palette, &tr.t("calls.empty"), "");
            return;
        }

        let height = inner.height as usize;
        let offset = list::compute_scroll_offset(self.selected, height, self.calls.len());
        for (i, call) in self.calls.iter().enumerate().skip(offset).take(height) {
            let y = inner.y + (i - offset) as u16;
            let style = list::row_style(palette, i == self.selected);
            let name_style = if call.direction == CallDirection::Missed {
                style.fg(palette.error)
            } else {
                style
            };
            let icon = if call.call_type.is_video() { "▶" } else { "☎" };
            let duration = call
                .duration
                .as_deref()
                .map(|d| format!(" · {}", d))
                .unwrap_or_default();
            let badge = format!("{} {}{} {} ", call.direction.marker(), call.timestamp, duration, icon);
            list::render_row(
                buf,
                Rect::new(inner.x, y, inner.width, 1),
                &format!(" {} {}", call.avatar, call.name),
                &badge,
                name_style,
                Style::default().fg(palette.text_secondary),
            );
        }
    }
}
