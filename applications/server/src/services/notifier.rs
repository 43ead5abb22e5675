/// Outbound notification interface
use async_trait::async_trait;
use watchbox_core::types::{BoxId, BoxSession, FeedbackMessage, QueueItem};

/// Informs viewers of resulting state.
///
/// Delivery (websockets, push, whatever the box UI speaks) lives outside
/// this process; the command processor only hands finished state over.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A chat-style feedback line for the box
    async fn feedback(&self, message: &FeedbackMessage);

    /// The playlist changed; viewers should refresh their queue view
    async fn queue_updated(&self, session: &BoxSession);

    /// The playing item changed (or playback ran out)
    async fn now_playing(&self, scope: &BoxId, item: Option<&QueueItem>);
}

/// Tracing-backed notifier; the default until a delivery channel is wired up
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn feedback(&self, message: &FeedbackMessage) {
        tracing::info!(scope = %message.scope, "feedback: {}", message.contents);
    }

    async fn queue_updated(&self, session: &BoxSession) {
        tracing::info!(
            scope = %session.id,
            items = session.playlist.len(),
            "queue updated"
        );
    }

    async fn now_playing(&self, scope: &BoxId, item: Option<&QueueItem>) {
        match item {
            Some(item) => {
                tracing::info!(scope = %scope, video = %item.video.name, "now playing");
            }
            None => tracing::info!(scope = %scope, "playback ran out"),
        }
    }
}
