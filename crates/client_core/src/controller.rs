//! Chat UI controller: binds input-box events to outbound channel events and
//! renders inbound channel events onto the page.

use shared::{
    domain::{ChatIdentity, SELF_AUTHOR_LABEL},
    protocol::{ClientEvent, IncomingMessage, OutgoingMessage, ServerEvent},
};
use tracing::{debug, info};

use crate::{
    channel::RealtimeChannel,
    composer::{ComposerMetrics, COMPOSER_PADDING_PROPERTY},
    error::ChatError,
    keys::{Key, KeyAction, KeyOutcome, KeyState},
    page::{ChatPage, ListEntry},
};

const TIMED_OUT_NOTICE: &str = "You are sending messages too quickly. Please wait.";
const TIME_OUT_FINISHED_NOTICE: &str = "You can send messages again.";

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatOptions {
    pub composer: ComposerMetrics,
    /// Whether the server already muted this user when the page loaded.
    pub timed_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Empty,
    TimedOut,
}

pub struct ChatController<C, P> {
    channel: C,
    page: P,
    identity: ChatIdentity,
    composer: ComposerMetrics,
    input: String,
    /// Present only while the message box has focus.
    key_listener: Option<KeyState>,
    timed_out: bool,
}

impl<C: RealtimeChannel, P: ChatPage> ChatController<C, P> {
    pub fn new(channel: C, mut page: P, identity: ChatIdentity, options: ChatOptions) -> Self {
        page.set_submit_enabled(!options.timed_out);
        page.scroll_to_bottom();
        let key_listener = page.input_has_focus().then(KeyState::default);
        Self {
            channel,
            page,
            identity,
            composer: options.composer,
            input: String::new(),
            key_listener,
            timed_out: options.timed_out,
        }
    }

    pub fn identity(&self) -> &ChatIdentity {
        &self.identity
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Hands back the channel and page, e.g. to close the connection on exit.
    pub fn into_parts(self) -> (C, P) {
        (self.channel, self.page)
    }

    pub fn key_listener_attached(&self) -> bool {
        self.key_listener.is_some()
    }

    /// Form submission. The input is cleared whatever the outcome.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ChatError> {
        let outcome = if self.input.trim().is_empty() {
            SubmitOutcome::Empty
        } else if self.timed_out {
            SubmitOutcome::TimedOut
        } else {
            let message = OutgoingMessage {
                message: self.input.clone(),
                author: self.identity.username.clone(),
                author_uid: self.identity.user_id.clone(),
            };
            self.emit(ClientEvent::Message(message))?;
            self.emit(ClientEvent::StopTyping)?;
            SubmitOutcome::Sent
        };
        debug!(?outcome, "message form submitted");
        self.clear_input();
        Ok(outcome)
    }

    /// The host reports the message box's new value after any edit.
    pub fn input_changed(&mut self, value: &str) -> Result<(), ChatError> {
        value.clone_into(&mut self.input);
        self.update_composer_padding();
        if self.input.is_empty() {
            self.emit(ClientEvent::StopTyping)
        } else {
            self.emit(ClientEvent::Typing(self.identity.username.clone()))
        }
    }

    pub fn focus_in(&mut self) {
        if !self.page.input_has_focus() {
            self.page.focus_input();
        }
        if self.key_listener.is_none() {
            self.key_listener = Some(KeyState::default());
        }
    }

    pub fn focus_out(&mut self) {
        if self.page.input_has_focus() {
            self.page.blur_input();
        }
        self.key_listener = None;
    }

    pub fn key_down(&mut self, key: Key) -> Result<KeyOutcome, ChatError> {
        let Some(keys) = self.key_listener.as_mut() else {
            return Ok(KeyOutcome::Ignored);
        };
        match keys.key_down(key) {
            KeyAction::Submit if self.page.input_has_focus() => {
                self.submit()?;
                self.focus_out();
                Ok(KeyOutcome::Submitted)
            }
            KeyAction::Submit => Ok(KeyOutcome::Ignored),
            KeyAction::Newline => Ok(KeyOutcome::Newline),
            KeyAction::None => Ok(KeyOutcome::Passthrough),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(keys) = self.key_listener.as_mut() {
            keys.key_up(key);
        }
    }

    pub fn handle_event(&mut self, event: ServerEvent) {
        debug!(event = event.name(), "handling realtime event");
        match event {
            ServerEvent::Message(message) => self.on_message(message),
            ServerEvent::Typing(name) => self.on_typing(name),
            ServerEvent::StopTyping => {
                self.page.remove_typing_indicator();
            }
            ServerEvent::Spam => self.set_timed_out(true),
            ServerEvent::TimeOutFinished => self.set_timed_out(false),
        }
    }

    fn on_message(&mut self, message: IncomingMessage) {
        let author = self.identity.display_author(&message.author).to_string();
        let own = author == SELF_AUTHOR_LABEL;
        self.page.append_entry(ListEntry::Message {
            author,
            text: message.message,
        });
        self.page.hide_placeholder();
        self.page.scroll_to_bottom();
        if own {
            self.focus_in();
        }
    }

    fn on_typing(&mut self, name: String) {
        self.page.remove_typing_indicator();
        self.page.append_entry(ListEntry::Typing { name });
        self.page.scroll_to_bottom();
    }

    fn set_timed_out(&mut self, timed_out: bool) {
        if self.timed_out == timed_out {
            return;
        }
        self.timed_out = timed_out;
        info!(timed_out, "send timeout changed");
        self.page.set_submit_enabled(!timed_out);
        let text = if timed_out {
            TIMED_OUT_NOTICE
        } else {
            TIME_OUT_FINISHED_NOTICE
        };
        self.page.append_entry(ListEntry::Notice {
            text: text.to_string(),
        });
        self.page.scroll_to_bottom();
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.page.set_input_value("");
        self.update_composer_padding();
    }

    fn update_composer_padding(&mut self) {
        let padding = self.composer.extra_padding(&self.input);
        self.page
            .set_style_property(COMPOSER_PADDING_PROPERTY, &padding);
    }

    fn emit(&self, event: ClientEvent) -> Result<(), ChatError> {
        let name = event.name();
        self.channel
            .emit(event)
            .map_err(|source| ChatError::emit(name, source))
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
