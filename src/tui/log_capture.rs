//! In-memory log sink for TUI mode and the pane that shows it.
//!
//! While the alternate screen is active, tracing output goes to a shared
//! ring of lines instead of stderr.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tracing_subscriber::fmt::MakeWriter;

use super::theme::Palette;

/// Lines kept before the oldest are dropped.
const CAPACITY: usize = 1000;

/// Shared ring of formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds usable lines.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, line: impl Into<String>) {
        let mut lines = self.lock();
        if lines.len() == CAPACITY {
            lines.pop_front();
        }
        lines.push_back(line.into());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Up to `count` lines ending `back` lines before the newest.
    pub fn window(&self, back: usize, count: usize) -> Vec<String> {
        let lines = self.lock();
        let end = lines.len().saturating_sub(back);
        let start = end.saturating_sub(count);
        lines.range(start..end).cloned().collect()
    }
}

/// Per-event writer handed out to the fmt layer.
pub struct LineWriter {
    sink: LogBuffer,
    partial: Vec<u8>,
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.extend_from_slice(buf);
        while let Some(nl) = self.partial.iter().position(|&b| b == b'\n') {
            let rest = self.partial.split_off(nl + 1);
            let line = std::mem::replace(&mut self.partial, rest);
            self.sink
                .push(String::from_utf8_lossy(&line[..nl]).trim_end().to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.sink.push(String::from_utf8_lossy(&line).into_owned());
        }
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            sink: self.clone(),
            partial: Vec::new(),
        }
    }
}

/// Toggleable pane over a [`LogBuffer`]. Offset 0 follows the newest line.
pub struct DebugLog {
    buffer: LogBuffer,
    pub visible: bool,
    back: usize,
}

impl DebugLog {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            visible: false,
            back: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.back = 0;
    }

    pub fn scroll_up(&mut self, n: usize) {
        let max = self.buffer.len().saturating_sub(1);
        self.back = (self.back + n).min(max);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.back = self.back.saturating_sub(n);
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.border))
            .title(Span::styled(
                " Debug log (C-d) ",
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .buffer
            .window(self.back, inner.height as usize)
            .into_iter()
            .map(|line| {
                let style = Style::default().fg(level_color(&line, palette));
                Line::from(Span::styled(line, style))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

fn level_color(line: &str, palette: &Palette) -> ratatui::style::Color {
    if line.contains("ERROR") {
        palette.error
    } else if line.contains("WARN") {
        palette.away
    } else if line.contains("INFO") {
        palette.online
    } else {
        palette.text_secondary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_drops_oldest() {
        let buf = LogBuffer::new();
        for i in 0..CAPACITY + 5 {
            buf.push(format!("line {}", i));
        }
        assert_eq!(buf.len(), CAPACITY);
        assert_eq!(buf.window(CAPACITY - 1, 1), vec!["line 5"]);
    }

    #[test]
    fn test_window_from_newest() {
        let buf = LogBuffer::new();
        for i in 0..10 {
            buf.push(format!("{}", i));
        }
        assert_eq!(buf.window(0, 3), vec!["7", "8", "9"]);
        assert_eq!(buf.window(2, 3), vec!["5", "6", "7"]);
        assert!(buf.window(20, 3).is_empty());
    }

    #[test]
    fn test_writer_splits_lines() {
        let buf = LogBuffer::new();
        {
            let mut w = buf.make_writer();
            write!(w, "first\nsec").unwrap();
            write!(w, "ond\ntail").unwrap();
            assert_eq!(buf.len(), 2);
        }
        assert_eq!(buf.window(0, 5), vec!["first", "second", "tail"]);
    }

    #[test]
    fn test_pane_scroll_is_clamped() {
        let buf = LogBuffer::new();
        for i in 0..5 {
            buf.push(format!("{}", i));
        }
        let mut pane = DebugLog::new(buf);
        pane.scroll_up(50);
        assert_eq!(pane.back, 4);
        pane.scroll_down(10);
        assert_eq!(pane.back, 0);
        pane.scroll_up(2);
        pane.toggle();
        assert!(pane.visible);
        assert_eq!(pane.back, 0);
    }
}
