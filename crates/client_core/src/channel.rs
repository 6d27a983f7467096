use std::{rc::Rc, sync::Arc};

use shared::protocol::ClientEvent;

use crate::error::ChannelError;

/// Outbound half of the realtime connection. Inbound events are delivered to
/// the controller by whoever owns the receiving side.
pub trait RealtimeChannel {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError>;
}

impl<T: RealtimeChannel + ?Sized> RealtimeChannel for &T {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError> {
        (**self).emit(event)
    }
}

impl<T: RealtimeChannel + ?Sized> RealtimeChannel for Rc<T> {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError> {
        (**self).emit(event)
    }
}

impl<T: RealtimeChannel + ?Sized> RealtimeChannel for Arc<T> {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError> {
        (**self).emit(event)
    }
}
