//! Key tracking for the message box.
//!
//! Modifier state comes from explicit key-down/key-up pairs instead of
//! remembering the previous key, so Shift+Enter is detected even when other
//! keys are pressed in between.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Shift,
    Character(char),
    Other,
}

/// What the host should do with a key-down it forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The form was submitted; the host must suppress the default newline.
    Submitted,
    /// Shift+Enter: let the newline through.
    Newline,
    /// Any other key, handled by the host as usual.
    Passthrough,
    /// No listener is attached (input not focused).
    Ignored,
}

/// Action resolved from a key-down before the controller runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Submit,
    Newline,
    None,
}

#[derive(Debug, Default, Clone)]
pub struct KeyState {
    shift_held: bool,
}

impl KeyState {
    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    pub(crate) fn key_down(&mut self, key: Key) -> KeyAction {
        match key {
            Key::Shift => {
                self.shift_held = true;
                KeyAction::None
            }
            Key::Enter if self.shift_held => KeyAction::Newline,
            Key::Enter => KeyAction::Submit,
            Key::Character(_) | Key::Other => KeyAction::None,
        }
    }

    pub(crate) fn key_up(&mut self, key: Key) {
        if key == Key::Shift {
            self.shift_held = false;
        }
    }
}
