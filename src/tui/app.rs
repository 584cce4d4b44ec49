//! TUI application state and main event loop

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use ratatui::DefaultTerminal;

use super::calls::CallsTab;
use super::chat::{ChatInput, ChatView};
use super::contacts::ContactsTab;
use super::dialog::NoticeState;
use super::discussions::DiscussionsTab;
use super::log_capture::{DebugLog, LogBuffer};
use super::settings::SettingsTab;
use super::theme::Palette;
use super::ui;
use crate::config::Config;
use crate::i18n::Translate;
use crate::models::seed;
use crate::notice::Notice;
use crate::session::{ChatSession, TypingTimings};

/// Target frame rate for UI updates (~30 fps)
const FRAME_DURATION_MS: u64 = 33;

/// Something a pane asks the host to do.
#[derive(Debug)]
pub enum Intent {
    OpenChat { id: String, name: String },
    Show(Notice),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Discussions,
    Calls,
    Contacts,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Discussions, Tab::Calls, Tab::Contacts, Tab::Settings];

    pub fn title_key(&self) -> &'static str {
        match self {
            Tab::Discussions => "tabs.discussions",
            Tab::Calls => "tabs.calls",
            Tab::Contacts => "tabs.contacts",
            Tab::Settings => "tabs.settings",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Application state
pub struct App {
    tr: Box<dyn Translate>,
    timings: TypingTimings,
    pub tab: Tab,
    pub discussions: DiscussionsTab,
    pub calls: CallsTab,
    pub contacts: ContactsTab,
    pub settings: SettingsTab,
    /// Open conversation; `None` while a tab is shown.
    pub chat: Option<ChatView>,
    pub notice: Option<NoticeState>,
    pub show_help: bool,
    /// Only present when logs are captured in memory.
    pub debug_log: Option<DebugLog>,
    pub should_exit: bool,
}

impl App {
    pub fn new(tr: Box<dyn Translate>, config: &Config, logs: Option<LogBuffer>) -> Self {
        Self {
            tr,
            timings: config.typing_timings(),
            tab: Tab::default(),
            discussions: DiscussionsTab::new(seed::conversations()),
            calls: CallsTab::new(seed::calls()),
            contacts: ContactsTab::new(seed::contacts()),
            settings: SettingsTab::new(config.preferences.clone(), config.user_name.clone()),
            chat: None,
            notice: None,
            show_help: false,
            debug_log: logs.map(DebugLog::new),
            should_exit: false,
        }
    }

    pub fn tr(&self) -> &dyn Translate {
        self.tr.as_ref()
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.settings.preferences.dark_mode)
    }

    /// Whether the focused widget takes plain characters as text.
    fn captures_text(&self) -> bool {
        self.chat.is_some()
            || match self.tab {
                Tab::Discussions => self.discussions.search.editing,
                Tab::Contacts => self.contacts.search.editing,
                _ => false,
            }
    }

    pub fn open_chat(&mut self, id: String, name: String) {
        let name = if name.is_empty() {
            self.tr.t("chat.unknownContact")
        } else {
            name
        };
        self.go_back();
        let session = ChatSession::new(id, name, seed::chat_messages(Utc::now()), self.timings);
        self.chat = Some(ChatView::new(session));
    }

    /// Leave the chat screen, tearing its session down.
    pub fn go_back(&mut self) {
        if let Some(view) = self.chat.take() {
            view.session.close();
        }
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::OpenChat { id, name } => self.open_chat(id, name),
            Intent::Show(notice) => self.notice = Some(NoticeState::new(notice)),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        if let Some(state) = self.notice.as_mut() {
            match key.code {
                KeyCode::Left | KeyCode::BackTab => state.prev(),
                KeyCode::Right | KeyCode::Tab => state.next(),
                KeyCode::Enter => {
                    state.activate();
                    self.notice = None;
                }
                KeyCode::Esc => self.notice = None,
                _ => {}
            }
            return;
        }
        if let Some(log) = self.debug_log.as_mut() {
            match key.code {
                KeyCode::Char('d') if ctrl => {
                    log.toggle();
                    return;
                }
                KeyCode::PageUp if log.visible => {
                    log.scroll_up(10);
                    return;
                }
                KeyCode::PageDown if log.visible => {
                    log.scroll_down(10);
                    return;
                }
                _ => {}
            }
        }

        if let Some(view) = self.chat.as_mut() {
            match view.handle_key(key, self.tr.as_ref()) {
                ChatInput::Back => self.go_back(),
                ChatInput::Intent(intent) => self.apply(intent),
                ChatInput::Consumed => {}
            }
            return;
        }

        if !self.captures_text() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_exit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return;
                }
                KeyCode::Char(c @ '1'..='4') => {
                    self.tab = Tab::ALL[(c as u8 - b'1') as usize];
                    return;
                }
                KeyCode::Tab => {
                    self.tab = self.tab.next();
                    return;
                }
                KeyCode::BackTab => {
                    self.tab = self.tab.prev();
                    return;
                }
                _ => {}
            }
        }

        let intent = match self.tab {
            Tab::Discussions => self.discussions.handle_key(key),
            Tab::Calls => self.calls.handle_key(key, self.tr.as_ref()),
            Tab::Contacts => self.contacts.handle_key(key, self.tr.as_ref()),
            Tab::Settings => self.settings.handle_key(key, self.tr.as_ref()),
        };
        if let Some(intent) = intent {
            self.apply(intent);
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        ui::render(frame, self);
    }
}

/// Run the TUI application with panic-safe terminal restore
pub async fn run(tr: Box<dyn Translate>, config: &Config, logs: LogBuffer) -> Result<()> {
    let app = App::new(tr, config, Some(logs));
    let mut terminal = ratatui::init();
    let result = AssertUnwindSafe(run_app(&mut terminal, app))
        .catch_unwind()
        .await;
    ratatui::restore();

    match result {
        Ok(r) => r,
        Err(e) => std::panic::resume_unwind(e),
    }
}

async fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(FRAME_DURATION_MS));

    while !app.should_exit {
        terminal
            .draw(|frame| app.render(frame))
            .context("Failed to draw frame")?;

        // The tick redraws the typing indicator between key presses.
        tokio::select! {
            _ = tick.tick() => {}
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
        }
    }

    app.go_back();
    tracing::info!("Exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(
            Box::new(Catalog::builtin("en").unwrap()),
            &Config::default(),
            Some(LogBuffer::new()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_open_send_and_go_back() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let view = app.chat.as_ref().unwrap();
        assert_eq!(view.session.peer_name(), "Alice Martin");
        assert_eq!(view.session.messages().len(), 4);

        // 'q' is text inside the chat.
        type_text(&mut app, "  quick note ");
        assert!(!app.should_exit);
        press(&mut app, KeyCode::Enter);
        let view = app.chat.as_ref().unwrap();
        assert_eq!(view.session.messages().len(), 5);
        assert_eq!(view.session.messages()[4].text(), "quick note");
        assert!(view.session.messages()[4].is_sent());

        press(&mut app, KeyCode::Esc);
        assert!(app.chat.is_none());
        assert_eq!(app.tab, Tab::Discussions);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_indicator_on_screen() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Hi there");
        press(&mut app, KeyCode::Enter);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(screen(&app).contains("Alice Martin is typing..."));

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(!screen(&app).contains("is typing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_chat_stops_typing_timer() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Hi");
        press(&mut app, KeyCode::Enter);
        let mut typing = app.chat.as_ref().unwrap().session.subscribe_typing();
        press(&mut app, KeyCode::Esc);

        tokio::time::sleep(Duration::from_secs(5)).await;
        // Sender is gone and never published a change.
        assert!(typing.has_changed().is_err());
        assert!(!*typing.borrow());
    }

    #[test]
    fn test_tab_switching() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Contacts);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Settings);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Discussions);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Settings);
    }

    #[test]
    fn test_search_captures_global_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "q2");
        assert!(!app.should_exit);
        assert_eq!(app.tab, Tab::Discussions);
        assert_eq!(app.discussions.search.query, "q2");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit);
    }

    #[test]
    fn test_search_narrows_discussions() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "bob");
        press(&mut app, KeyCode::Enter);
        let names: Vec<String> = app
            .discussions
            .visible()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["Bob Dupont"]);

        let text = screen(&app);
        assert!(text.contains("Bob Dupont"));
        assert!(!text.contains("Alice Martin"));
    }

    #[test]
    fn test_notice_opens_and_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        let state = app.notice.as_ref().unwrap();
        assert_eq!(state.notice.title, "Video call");
        assert!(screen(&app).contains("Calling Alice Martin..."));

        // Keys go to the dialog, not the tabs.
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Calls);
        press(&mut app, KeyCode::Enter);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_settings_toggle_switches_palette() {
        let mut app = app();
        assert_eq!(app.palette(), Palette::dark());
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.palette(), Palette::light());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(screen(&app).contains("Toggle this help"));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_exit);
    }

    #[test]
    fn test_debug_log_toggle() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(app.debug_log.as_ref().unwrap().visible);
    }
}
