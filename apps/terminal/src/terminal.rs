//! A [`ChatPage`] that prints the messages list to a terminal.

use std::io::Write;

use client_core::{ChatPage, DocumentPage, ListEntry};
use tracing::warn;

/// Mirrors page state in a [`DocumentPage`] and prints each new entry.
///
/// Printed lines cannot be taken back, so a typing indicator is skipped when
/// the last printed line already announces the same person typing and that
/// indicator is still showing.
pub struct TerminalPage<W: Write> {
    document: DocumentPage,
    out: W,
    last_typing_line: Option<String>,
}

impl<W: Write> TerminalPage<W> {
    pub fn new(out: W) -> Self {
        Self {
            document: DocumentPage::new(),
            out,
            last_typing_line: None,
        }
    }

    fn print(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("failed to write chat output: {err}");
        }
    }
}

/// Replaces control characters so payload text cannot drive the terminal.
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch != '\n' && ch.is_control() {
                '\u{FFFD}'
            } else {
                ch
            }
        })
        .collect()
}

fn format_entry(entry: &ListEntry) -> String {
    match entry {
        ListEntry::Message { author, text } => {
            let author = sanitize_terminal(author);
            let text = sanitize_terminal(text).replace('\n', "\n    ");
            format!("{author}: {text}")
        }
        ListEntry::Typing { name } => format!("  {} is Typing...", sanitize_terminal(name)),
        ListEntry::Notice { text } => format!("* {}", sanitize_terminal(text)),
    }
}

impl<W: Write> ChatPage for TerminalPage<W> {
    fn append_entry(&mut self, entry: ListEntry) {
        let repeat = match &entry {
            ListEntry::Typing { name } => self.last_typing_line.as_deref() == Some(name.as_str()),
            _ => false,
        };
        if !repeat {
            let line = format_entry(&entry);
            self.print(&line);
            self.last_typing_line = match &entry {
                ListEntry::Typing { name } => Some(name.clone()),
                _ => None,
            };
        }
        self.document.append_entry(entry);
    }

    fn remove_typing_indicator(&mut self) -> bool {
        let removed = self.document.remove_typing_indicator();
        if !removed {
            // Nothing was showing, so the next indicator is news again.
            self.last_typing_line = None;
        }
        removed
    }

    fn hide_placeholder(&mut self) {
        self.document.hide_placeholder();
    }

    fn scroll_to_bottom(&mut self) {
        self.document.scroll_to_bottom();
    }

    fn set_input_value(&mut self, value: &str) {
        self.document.set_input_value(value);
    }

    fn focus_input(&mut self) {
        self.document.focus_input();
    }

    fn blur_input(&mut self) {
        self.document.blur_input();
    }

    fn input_has_focus(&self) -> bool {
        self.document.input_has_focus()
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.document.set_style_property(name, value);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.document.set_submit_enabled(enabled);
    }
}
