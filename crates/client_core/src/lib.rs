//! Client-side chat controller and the seams it talks through: the realtime
//! channel it emits on and the page it renders into.

pub mod channel;
pub mod composer;
pub mod controller;
pub mod error;
pub mod keys;
pub mod page;
pub mod ws;

pub use channel::RealtimeChannel;
pub use composer::ComposerMetrics;
pub use controller::{ChatController, ChatOptions, SubmitOutcome};
pub use error::{ChannelError, ChatError};
pub use keys::{Key, KeyOutcome};
pub use page::{ChatPage, DocumentPage, ListEntry};
pub use ws::WsChannel;
