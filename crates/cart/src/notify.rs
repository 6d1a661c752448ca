//! Notification sink for user-facing messages.
//!
//! Cart operations surface failures to the user as fixed strings, one per
//! operation type - the toast layer of the UI renders them verbatim. Error
//! detail stays in the typed [`crate::CartError`] and the tracing output;
//! the sink only ever sees the collapsed message.

use tokio::sync::mpsc;

/// The fixed user-facing messages cart operations emit.
pub mod messages {
    /// Requested quantity exceeds available stock.
    pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
    /// Adding a product failed for any other reason.
    pub const ADD_FAILED: &str = "Could not add product";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Could not remove product";
    /// Changing a product quantity failed for any other reason.
    pub const UPDATE_FAILED: &str = "Could not update product quantity";
}

/// Fire-and-forget sink for user-facing messages.
///
/// Implementations must not block and must not fail: a notification that
/// cannot be delivered is dropped.
pub trait Notifier: Send + Sync {
    /// Deliver a message to the user.
    fn notify(&self, message: &str);
}

/// Notifier that routes messages to the tracing subscriber at warn level.
///
/// Useful for headless clients and as a default when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(message, "cart notification");
    }
}

/// Notifier that forwards messages over an unbounded channel.
///
/// UIs subscribe to the receiving end and render each message as a toast.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the UI consumes.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        // Receiver gone means no UI is listening; dropping is the contract.
        let _ = self.tx.send(message.to_string());
    }
}
