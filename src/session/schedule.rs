//! Deferred overlay transitions owned by a session

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::overlay::Overlay;

/// Delay between a confirmed `resolved` status and the rating prompt
pub const RATING_PROMPT_DELAY: Duration = Duration::from_millis(1500);

/// At most one pending transition. Scheduling replaces the previous one;
/// dropping the slot cancels it.
#[derive(Default)]
pub struct ScheduledTransition {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTransition {
    /// Set the overlay to `target` once `delay` has elapsed
    pub fn schedule(
        &mut self,
        overlay: &Arc<watch::Sender<Overlay>>,
        target: Overlay,
        delay: Duration,
    ) {
        self.cancel();

        let deadline = Instant::now() + delay;
        let overlay = Arc::clone(overlay);
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            debug!("deferred overlay transition to {}", target);
            overlay.send_replace(target);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ScheduledTransition {
    fn drop(&mut self) {
        self.cancel();
    }
}
