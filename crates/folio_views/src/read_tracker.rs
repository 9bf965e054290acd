use folio_core::{AnalyticsSink, ReadEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Visits shorter than this are treated as bounces and not counted.
pub const READ_DELAY: Duration = Duration::from_secs(1);

/// Counts one read of an article view.
///
/// The event is sent once, `READ_DELAY` after mounting. Unmounting (or
/// dropping) the tracker before then cancels it. Once sent, delivery runs
/// detached: failures are logged and forgotten.
pub struct ReadTracker {
    slug: String,
    timer: JoinHandle<()>,
}

impl ReadTracker {
    pub fn mount(sink: Arc<dyn AnalyticsSink>, slug: impl Into<String>) -> Self {
        Self::mount_with_delay(sink, slug, READ_DELAY)
    }

    pub fn mount_with_delay(sink: Arc<dyn AnalyticsSink>, slug: impl Into<String>, delay: Duration) -> Self {
        let slug = slug.into();
        let event = ReadEvent::read(slug.clone());
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(deliver(sink, event));
        });
        Self { slug, timer }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// True until the delay has elapsed or the tracker was cancelled.
    pub fn is_pending(&self) -> bool {
        !self.timer.is_finished()
    }

    pub fn unmount(self) {}
}

impl Drop for ReadTracker {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

async fn deliver(sink: Arc<dyn AnalyticsSink>, event: ReadEvent) {
    if let Err(e) = sink.track(&event).await {
        tracing::warn!("Failed to track read of {}: {}", event.slug, e);
    }
}
