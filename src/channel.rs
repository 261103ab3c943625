//! Support for the channel implementations backing the work queue. If the `flume` feature is
//! enabled, then `flume` will be used, otherwise `crossbeam-channel`.

pub use prelude::bounded;
pub(crate) use prelude::*;

use std::time::Duration;

/// Possible results of calling `ReceiverExt::recv_msg_timeout()` on a `Receiver`.
#[derive(Debug, PartialEq, Eq)]
pub enum Message<T> {
    /// A message was successfully received from the channel.
    Received(T),
    /// All senders were dropped and the channel is empty.
    Disconnected,
    /// No message arrived before the timeout elapsed.
    TimedOut,
}

/// Trait implemented for all channel `Receiver` types that standardizes blocking `recv()` with a
/// deadline.
pub trait ReceiverExt<T> {
    /// Blocks for at most `timeout` waiting for a message. Returns `Message::Received` if a message
    /// was received, otherwise one of `Message`'s other variants. A disconnected channel that
    /// still holds messages yields those messages first.
    fn recv_msg_timeout(&self, timeout: Duration) -> Message<T>;
}

#[cfg(not(feature = "flume"))]
pub mod prelude {
    pub use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

    use super::{Message, ReceiverExt};
    use crossbeam_channel::RecvTimeoutError;
    use std::time::Duration;

    impl<T> ReceiverExt<T> for Receiver<T> {
        fn recv_msg_timeout(&self, timeout: Duration) -> Message<T> {
            match self.recv_timeout(timeout) {
                Ok(t) => Message::Received(t),
                Err(RecvTimeoutError::Timeout) => Message::TimedOut,
                Err(RecvTimeoutError::Disconnected) => Message::Disconnected,
            }
        }
    }
}

#[cfg(feature = "flume")]
pub mod prelude {
    pub use flume::{bounded, Receiver, Sender, TrySendError};

    use super::{Message, ReceiverExt};
    use flume::RecvTimeoutError;
    use std::time::Duration;

    impl<T> ReceiverExt<T> for Receiver<T> {
        fn recv_msg_timeout(&self, timeout: Duration) -> Message<T> {
            match self.recv_timeout(timeout) {
                Ok(t) => Message::Received(t),
                Err(RecvTimeoutError::Timeout) => Message::TimedOut,
                Err(RecvTimeoutError::Disconnected) => Message::Disconnected,
            }
        }
    }
}
