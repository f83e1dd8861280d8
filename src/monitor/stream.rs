//! Stream adapter over status-change notifications.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::Stream;

use super::StatusChange;
use super::listener::{Subscription, SubscriptionId};

/// A stream of connectivity transitions.
///
/// Returned by [`super::ConnectivityMonitor::changes`]. Yields one
/// [`StatusChange`] per transition and ends when the monitor is dropped.
/// Dropping the stream removes its listener from the monitor.
#[derive(Debug)]
pub struct StatusStream {
    receiver: UnboundedReceiver<StatusChange>,
    subscription: Option<Subscription>,
}

impl StatusStream {
    pub(super) const fn new(
        receiver: UnboundedReceiver<StatusChange>,
        subscription: Subscription,
    ) -> Self {
        Self {
            receiver,
            subscription: Some(subscription),
        }
    }

    /// Returns the id of the listener feeding this stream.
    #[must_use]
    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(Subscription::id)
    }
}

impl Stream for StatusStream {
    type Item = StatusChange;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for StatusStream {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
