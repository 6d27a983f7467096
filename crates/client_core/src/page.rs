//! The hosting page as seen by the controller.
//!
//! Entries are structured nodes holding plain text. Markup is only produced by
//! [`DocumentPage::render_html`], which escapes every text node, so payload
//! text can never be interpreted as elements or script.

use std::{collections::BTreeMap, fmt::Write as _};

/// One node in the messages list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Message { author: String, text: String },
    Typing { name: String },
    Notice { text: String },
}

impl ListEntry {
    pub fn is_typing(&self) -> bool {
        matches!(self, Self::Typing { .. })
    }
}

/// DOM operations the controller needs from the page.
///
/// Required elements are the form, the messages list and the message input.
/// The "no messages" placeholder and the submit button are optional and an
/// implementation without them treats the related calls as no-ops.
pub trait ChatPage {
    fn append_entry(&mut self, entry: ListEntry);
    /// Removes the typing indicator if one is shown. Returns whether one was removed.
    fn remove_typing_indicator(&mut self) -> bool;
    fn hide_placeholder(&mut self);
    fn scroll_to_bottom(&mut self);
    fn set_input_value(&mut self, value: &str);
    fn focus_input(&mut self);
    fn blur_input(&mut self);
    fn input_has_focus(&self) -> bool;
    fn set_style_property(&mut self, name: &str, value: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub text: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
}

/// In-memory page: a messages list plus the input box state.
#[derive(Debug, Clone, Default)]
pub struct DocumentPage {
    entries: Vec<ListEntry>,
    placeholder: Option<Placeholder>,
    submit_button: Option<SubmitButton>,
    input_value: String,
    input_focused: bool,
    style: BTreeMap<String, String>,
    scroll_top: usize,
}

impl DocumentPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the "no messages yet" placeholder and a submit button.
    pub fn with_placeholder(text: impl Into<String>) -> Self {
        Self {
            placeholder: Some(Placeholder {
                text: text.into(),
                hidden: false,
            }),
            submit_button: Some(SubmitButton { enabled: true }),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn typing_indicators(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_typing()).count()
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub fn submit_button(&self) -> Option<SubmitButton> {
        self.submit_button
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    /// Index of the entry scrolled into view; equals the entry count when at the bottom.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_top == self.entries.len()
    }

    pub fn render_html(&self) -> String {
        let mut html = String::from("<ul id=\"messages\">");
        if let Some(placeholder) = &self.placeholder {
            let class = if placeholder.hidden { " class=\"hidden\"" } else { "" };
            let _ = write!(
                html,
                "<li id=\"noMessages\"{class}>{}</li>",
                escape_html(&placeholder.text)
            );
        }
        for entry in &self.entries {
            render_entry(&mut html, entry);
        }
        html.push_str("</ul>");
        html
    }
}

fn render_entry(html: &mut String, entry: &ListEntry) {
    match entry {
        ListEntry::Message { author, text } => {
            let _ = write!(
                html,
                "<li class=\"message-item\"><div class=\"message\">\
                 <p class=\"message-author\">{}</p>\
                 <p class=\"message-message\">{}</p></div></li>",
                escape_html(author),
                escape_html(text)
            );
        }
        ListEntry::Typing { name } => {
            let _ = write!(
                html,
                "<p class=\"typing\"><span class=\"typing-username\">{}</span> is Typing...</p>",
                escape_html(name)
            );
        }
        ListEntry::Notice { text } => {
            let _ = write!(html, "<li class=\"notice\">{}</li>", escape_html(text));
        }
    }
}

/// Escapes text for use as HTML element content or a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl ChatPage for DocumentPage {
    fn append_entry(&mut self, entry: ListEntry) {
        self.entries.push(entry);
    }

    fn remove_typing_indicator(&mut self) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.is_typing());
        self.scroll_top = self.scroll_top.min(self.entries.len());
        before != self.entries.len()
    }

    fn hide_placeholder(&mut self) {
        if let Some(placeholder) = self.placeholder.as_mut() {
            placeholder.hidden = true;
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.entries.len();
    }

    fn set_input_value(&mut self, value: &str) {
        value.clone_into(&mut self.input_value);
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn blur_input(&mut self) {
        self.input_focused = false;
    }

    fn input_has_focus(&self) -> bool {
        self.input_focused
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        if let Some(button) = self.submit_button.as_mut() {
            button.enabled = enabled;
        }
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
