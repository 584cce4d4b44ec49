//! Help popup: keyboard shortcuts by category.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Palette;
use crate::i18n::Translate;

const POPUP_WIDTH: u16 = 72;
const POPUP_HEIGHT: u16 = 20;

/// Key binding and the string-table key of its description.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

struct Category {
    title: &'static str,
    shortcuts: &'static [Shortcut],
}

const NAVIGATION: Category = Category {
    title: "help.navigation",
    shortcuts: &[
        Shortcut {
            key: "1-4",
            desc: "help.switchTab",
        },
        Shortcut {
            key: "Tab",
            desc: "help.nextTab",
        },
        Shortcut {
            key: "Shift+Tab",
            desc: "help.prevTab",
        },
    ],
};

const LISTS: Category = Category {
    title: "help.lists",
    shortcuts: &[
        Shortcut {
            key: "Up/Down",
            desc: "help.move",
        },
        Shortcut {
            key: "Enter",
            desc: "help.open",
        },
        Shortcut {
            key: "/",
            desc: "help.search",
        },
        Shortcut {
            key: "Esc",
            desc: "help.clearSearch",
        },
        Shortcut {
            key: "a",
            desc: "help.addContact",
        },
    ],
};

const CHAT: Category = Category {
    title: "help.chat",
    shortcuts: &[
        Shortcut {
            key: "Enter",
            desc: "help.send",
        },
        Shortcut {
            key: "Esc",
            desc: "help.back",
        },
        Shortcut {
            key: "F2",
            desc: "help.audioCall",
        },
        Shortcut {
            key: "F3",
            desc: "help.videoCall",
        },
        Shortcut {
            key: "Ctrl+P",
            desc: "help.attach",
        },
        Shortcut {
            key: "Ctrl+U",
            desc: "help.clearCompose",
        },
    ],
};

const MISC: Category = Category {
    title: "help.misc",
    shortcuts: &[
        Shortcut {
            key: "Ctrl+D",
            desc: "help.debugLog",
        },
        Shortcut {
            key: "?",
            desc: "help.toggleHelp",
        },
        Shortcut {
            key: "q",
            desc: "help.quit",
        },
    ],
};

/// Draw the help popup centered over everything else.
pub fn render_help_popup(frame: &mut Frame, tr: &dyn Translate, palette: &Palette) {
    let area = frame.area();
    let popup_area = centered_rect(
        POPUP_WIDTH.min(area.width.saturating_sub(2)),
        POPUP_HEIGHT.min(area.height.saturating_sub(2)),
        area,
    );
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.card))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", tr.t("help.title")),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", tr.t("help.close")),
                Style::default().fg(palette.text_secondary),
            ),
        ]))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", tr.t("help.footer")),
            Style::default().fg(palette.text_secondary),
        )));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let [left_col, right_col] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);
    frame.render_widget(
        Paragraph::new(column_lines(&[&NAVIGATION, &LISTS], tr, palette)),
        inset(left_col, 1, 1),
    );
    frame.render_widget(
        Paragraph::new(column_lines(&[&CHAT, &MISC], tr, palette)),
        inset(right_col, 1, 1),
    );
}

fn column_lines(categories: &[&Category], tr: &dyn Translate, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, cat) in categories.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            tr.t(cat.title),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )));
        for sc in cat.shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<11}", sc.key), Style::default().fg(palette.primary)),
                Span::styled(tr.t(sc.desc), Style::default().fg(palette.text_secondary)),
            ]));
        }
    }
    lines
}

/// Centered sub-rect of the given size within `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn inset(area: Rect, h: u16, v: u16) -> Rect {
    Rect::new(
        area.x + h,
        area.y + v,
        area.width.saturating_sub(h * 2),
        area.height.saturating_sub(v * 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    #[test]
    fn test_every_help_key_is_translated() {
        let fr = Catalog::builtin("fr").unwrap();
        for cat in [&NAVIGATION, &LISTS, &CHAT, &MISC] {
            assert_ne!(fr.t(cat.title), cat.title);
            for sc in cat.shortcuts {
                assert_ne!(fr.t(sc.desc), sc.desc, "missing {}", sc.desc);
            }
        }
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(20, 4, area);
        assert_eq!(r, Rect::new(10, 3, 20, 4));
        let r = centered_rect(80, 40, area);
        assert_eq!(r, Rect::new(0, 0, 40, 10));
    }
}
