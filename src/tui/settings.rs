//! Settings tab: profile header, preference switches and stub items.

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::app::Intent;
use super::list::{self, ListInput};
use super::theme::Palette;
use crate::i18n::Translate;
use crate::notice::Notice;
use crate::preferences::{Preference, Preferences};

/// Entries that open a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Sounds,
    ServerConfig,
    InviteLink,
    About,
    Terms,
    Privacy,
}

impl Item {
    fn key(&self) -> &'static str {
        match self {
            Item::Sounds => "sounds",
            Item::ServerConfig => "serverConfig",
            Item::InviteLink => "inviteLink",
            Item::About => "about",
            Item::Terms => "terms",
            Item::Privacy => "privacy",
        }
    }

    /// Whether the string table has a `<key>Subtitle` entry.
    fn has_subtitle(&self) -> bool {
        !matches!(self, Item::Terms | Item::Privacy)
    }

    fn notice(&self, tr: &dyn Translate) -> Notice {
        match self {
            Item::Sounds => Notice::sounds(tr),
            Item::ServerConfig => Notice::server_config(tr),
            Item::InviteLink => Notice::invite_link(tr),
            Item::About => Notice::about(tr),
            Item::Terms => Notice::terms(tr),
            Item::Privacy => Notice::privacy(tr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Profile,
    Section(&'static str),
    Toggle(Preference),
    Item(Item),
    Logout,
}

impl Row {
    fn is_selectable(&self) -> bool {
        !matches!(self, Row::Section(_))
    }
}

const ROWS: &[Row] = &[
    Row::Profile,
    Row::Section("appearance"),
    Row::Toggle(Preference::DarkMode),
    Row::Section("notifications"),
    Row::Toggle(Preference::Notifications),
    Row::Item(Item::Sounds),
    Row::Section("security"),
    Row::Toggle(Preference::E2ee),
    Row::Toggle(Preference::BiometricAuth),
    Row::Toggle(Preference::AutoDelete),
    Row::Section("server"),
    Row::Item(Item::ServerConfig),
    Row::Item(Item::InviteLink),
    Row::Section("about"),
    Row::Item(Item::About),
    Row::Item(Item::Terms),
    Row::Item(Item::Privacy),
    Row::Logout,
];

fn selectable_rows() -> Vec<Row> {
    ROWS.iter().copied().filter(Row::is_selectable).collect()
}

pub struct SettingsTab {
    pub preferences: Preferences,
    user_name: Option<String>,
    /// Index among selectable rows.
    selected: usize,
}

impl SettingsTab {
    pub fn new(preferences: Preferences, user_name: Option<String>) -> Self {
        Self {
            preferences,
            user_name,
            selected: 0,
        }
    }

    /// Configured user name, or the localized placeholder.
    pub fn profile_name(&self, tr: &dyn Translate) -> String {
        self.user_name
            .clone()
            .unwrap_or_else(|| tr.t("settings.profileName"))
    }

    pub fn handle_key(&mut self, key: KeyEvent, tr: &dyn Translate) -> Option<Intent> {
        let rows = selectable_rows();
        if list::handle_list_key(None, &mut self.selected, rows.len(), key) != ListInput::Activate {
            return None;
        }
        match rows.get(self.selected)? {
            Row::Profile => Some(Intent::Show(Notice::edit_profile(tr))),
            Row::Toggle(pref) => {
                self.preferences.toggle(*pref);
                None
            }
            Row::Item(item) => Some(Intent::Show(item.notice(tr))),
            Row::Logout => Some(Intent::Show(Notice::logout(tr))),
            Row::Section(_) => None,
        }
    }

    fn row_text(&self, row: Row, tr: &dyn Translate) -> (String, String) {
        match row {
            Row::Profile => (
                format!(
                    " 👤 {}  · {}",
                    self.profile_name(tr),
                    tr.t("settings.profileStatus")
                ),
                format!("{} ", tr.t("settings.editProfile")),
            ),
            Row::Section(key) => (
                format!(" {}", tr.t(&format!("settings.sections.{}", key))),
                String::new(),
            ),
            Row::Toggle(pref) => {
                let state = if self.preferences.get(pref) {
                    format!("[{}] ", tr.t("settings.on"))
                } else {
                    format!("[{}] ", tr.t("settings.off"))
                };
                (self.titled(pref.key(), true, tr), state)
            }
            Row::Item(item) => (
                self.titled(item.key(), item.has_subtitle(), tr),
                "› ".to_string(),
            ),
            Row::Logout => (format!("   {}", tr.t("settings.items.logout")), String::new()),
        }
    }

    fn titled(&self, key: &str, subtitle: bool, tr: &dyn Translate) -> String {
        let title = tr.t(&format!("settings.items.{}", key));
        if !subtitle {
            return format!("   {}", title);
        }
        let version = tr.t("app.version");
        let sub = tr.translate(
            &format!("settings.items.{}Subtitle", key),
            &[("version", version.as_str())],
        );
        format!("   {}  · {}", title, sub)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, tr: &dyn Translate, palette: &Palette) {
        let block = list::pane_block(palette, tr.t("settings.title"), true);
        let inner = block.inner(area);
        block.render(area, buf);

        let selected_row = selectable_rows().get(self.selected).copied();
        let selected_pos = ROWS
            .iter()
            .position(|r| Some(*r) == selected_row)
            .unwrap_or(0);
        let height = inner.height as usize;
        let offset = list::compute_scroll_offset(selected_pos, height, ROWS.len());

        for (i, row) in ROWS.iter().enumerate().skip(offset).take(height) {
            let y = inner.y + (i - offset) as u16;
            let (left, badge) = self.row_text(*row, tr);
            let base = list::row_style(palette, i == selected_pos);
            let (text_style, badge_style) = match row {
                Row::Section(_) => (
                    Style::default()
                        .fg(palette.text_secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default(),
                ),
                Row::Logout => (base.fg(palette.error), base),
                Row::Toggle(pref) if self.preferences.get(*pref) => (base, base.fg(palette.accent)),
                _ => (base, base.fg(palette.text_secondary)),
            };
            list::render_row(
                buf,
                Rect::new(inner.x, y, inner.width, 1),
                &left,
                &badge,
                text_style,
                badge_style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::testing::KeyEcho;
    use crate::notice::ActionStyle;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(tab: &mut SettingsTab, code: KeyCode) -> Option<Intent> {
        tab.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &KeyEcho)
    }

    #[test]
    fn test_section_headers_are_skipped() {
        let rows = selectable_rows();
        assert_eq!(rows[0], Row::Profile);
        assert_eq!(rows[1], Row::Toggle(Preference::DarkMode));
        assert!(rows.iter().all(Row::is_selectable));
        assert_eq!(rows.last(), Some(&Row::Logout));
    }

    #[test]
    fn test_enter_toggles_switch() {
        let mut tab = SettingsTab::new(Preferences::default(), None);
        press(&mut tab, KeyCode::Down);
        assert!(press(&mut tab, KeyCode::Enter).is_none());
        assert!(!tab.preferences.dark_mode);
        press(&mut tab, KeyCode::Enter);
        assert!(tab.preferences.dark_mode);
    }

    #[test]
    fn test_profile_and_logout_notices() {
        let mut tab = SettingsTab::new(Preferences::default(), None);
        match press(&mut tab, KeyCode::Enter) {
            Some(Intent::Show(n)) => assert_eq!(n.title, "settings.editProfile"),
            _ => panic!("expected edit-profile notice"),
        }
        press(&mut tab, KeyCode::End);
        match press(&mut tab, KeyCode::Enter) {
            Some(Intent::Show(n)) => {
                assert_eq!(n.actions[1].style, ActionStyle::Destructive);
            }
            _ => panic!("expected logout confirmation"),
        }
    }

    #[test]
    fn test_about_subtitle_shows_version() {
        let fr = crate::i18n::Catalog::builtin("fr").unwrap();
        let tab = SettingsTab::new(Preferences::default(), Some("Jeanne".into()));
        let (about, _) = tab.row_text(Row::Item(Item::About), &fr);
        assert!(about.contains("Version 1.0.0"));
        let (profile, _) = tab.row_text(Row::Profile, &fr);
        assert!(profile.contains("Jeanne"));
    }
}
