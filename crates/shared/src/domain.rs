use serde::{Deserialize, Serialize};

/// Label shown in place of the local user's name on their own messages.
pub const SELF_AUTHOR_LABEL: &str = "You";

/// Who is chatting from this client. Both fields are opaque and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatIdentity {
    pub username: String,
    pub user_id: String,
}

impl ChatIdentity {
    pub fn new(username: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_id: user_id.into(),
        }
    }

    /// Returns the label to display for `author`, rewriting our own name.
    pub fn display_author<'a>(&self, author: &'a str) -> &'a str {
        if author == self.username {
            SELF_AUTHOR_LABEL
        } else {
            author
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_only_exact_own_username() {
        let identity = ChatIdentity::new("Alice", "uid123");
        assert_eq!(identity.display_author("Alice"), "You");
        assert_eq!(identity.display_author("alice"), "alice");
        assert_eq!(identity.display_author("Eve"), "Eve");
    }
}
