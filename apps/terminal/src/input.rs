//! Maps stdin lines onto message-box events.
//!
//! A line ending in `\` is Shift+Enter: the draft continues on the next line.
//! Any other line is Enter and submits the draft.

use client_core::{ChatController, ChatError, ChatPage, Key, KeyOutcome, RealtimeChannel};

const CONTINUATION: char = '\\';

#[derive(Debug, Default)]
pub struct LineFeeder {
    draft: String,
}

impl LineFeeder {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn feed<C: RealtimeChannel, P: ChatPage>(
        &mut self,
        chat: &mut ChatController<C, P>,
        line: &str,
    ) -> Result<KeyOutcome, ChatError> {
        chat.focus_in();

        let (text, continues) = match line.strip_suffix(CONTINUATION) {
            Some(text) => (text, true),
            None => (line, false),
        };
        if !text.is_empty() {
            self.draft.push_str(text);
            chat.input_changed(&self.draft)?;
        }

        if !continues {
            let outcome = chat.key_down(Key::Enter)?;
            chat.key_up(Key::Enter);
            self.draft.clear();
            return Ok(outcome);
        }

        chat.key_down(Key::Shift)?;
        let outcome = chat.key_down(Key::Enter)?;
        if outcome == KeyOutcome::Newline {
            self.draft.push('\n');
            chat.input_changed(&self.draft)?;
        }
        chat.key_up(Key::Enter);
        chat.key_up(Key::Shift);
        Ok(outcome)
    }
}
