//! UI rendering for the TUI

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Tab};
use super::dialog;
use super::help;
use super::theme::Palette;

/// Height of the debug log pane when shown.
const DEBUG_LOG_HEIGHT: u16 = 10;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let area = frame.area();
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(palette.background)),
        area,
    );

    // Layout: header + tab strip + main content + status bar
    let [header_area, tabs_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let show_log = app.debug_log.as_ref().is_some_and(|log| log.visible);
    let [content_area, log_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(if show_log { DEBUG_LOG_HEIGHT } else { 0 }),
    ])
    .areas(main_area);

    render_header(header_area, frame.buffer_mut(), app, &palette);
    render_tabs(tabs_area, frame.buffer_mut(), app, &palette);

    let tr = app.tr();
    match app.chat {
        Some(ref view) => view.render(content_area, frame, tr, &palette),
        None => {
            let buf = frame.buffer_mut();
            match app.tab {
                Tab::Discussions => app.discussions.render(content_area, buf, tr, &palette),
                Tab::Calls => app.calls.render(content_area, buf, tr, &palette),
                Tab::Contacts => app.contacts.render(content_area, buf, tr, &palette),
                Tab::Settings => app.settings.render(content_area, buf, tr, &palette),
            }
        }
    }

    if let Some(log) = app.debug_log.as_ref().filter(|log| log.visible) {
        log.render(log_area, frame.buffer_mut(), &palette);
    }

    render_status(status_area, frame.buffer_mut(), app, &palette);

    if let Some(ref notice) = app.notice {
        dialog::render(frame, notice, &palette);
    }
    if app.show_help {
        help::render_help_popup(frame, tr, &palette);
    }
}

fn render_header(area: Rect, buf: &mut Buffer, app: &App, palette: &Palette) {
    let title = format!(" 🔒 {}", app.tr().t("app.name"));
    let right = format!("[?]  {} ", app.settings.profile_name(app.tr()));
    let pad = (area.width as usize).saturating_sub(title.width() + right.width());

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().fg(palette.text_secondary)),
    ]);
    Paragraph::new(line)
        .style(Style::default().bg(palette.card))
        .render(area, buf);
}

fn render_tabs(area: Rect, buf: &mut Buffer, app: &App, palette: &Palette) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, app.tr().t(tab.title_key()));
        let style = if *tab == app.tab && app.chat.is_none() {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_status(area: Rect, buf: &mut Buffer, app: &App, palette: &Palette) {
    let tr = app.tr();
    let sep = Span::styled(" | ", Style::default().fg(palette.border));

    let context = if let Some(ref view) = app.chat {
        let mut text = view.session.peer_name().to_string();
        if view.session.is_peer_typing() {
            text = format!("{} · {}", text, tr.t("status.typing"));
        }
        text
    } else {
        let query = match app.tab {
            Tab::Discussions => Some(&app.discussions.search.query),
            Tab::Contacts => Some(&app.contacts.search.query),
            _ => None,
        };
        match query {
            Some(q) if !q.is_empty() => tr.translate("status.searching", &[("query", q.as_str())]),
            _ => tr.t(app.tab.title_key()),
        }
    };

    let line = Line::from(vec![
        Span::styled(format!(" {}", context), Style::default().fg(palette.primary)),
        sep,
        Span::styled(tr.t("status.help"), Style::default().fg(palette.text_secondary)),
    ]);
    Paragraph::new(line)
        .style(Style::default().bg(palette.card))
        .render(area, buf);
}
