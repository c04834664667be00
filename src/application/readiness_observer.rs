// Readiness observer - Waits for an opaque widget to report that it rendered
use crate::application::viz_element::VizElement;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Subscribes to the element's ready callback when it has one, otherwise
/// polls its status query. Has no deadline of its own; the caller races it
/// against a watchdog, and dropping the future disconnects it.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessObserver {
    poll_interval: Duration,
}

impl ReadinessObserver {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub async fn observe(&self, element: &mut dyn VizElement) {
        if let Some(signal) = element.take_ready_signal() {
            if signal.await.is_ok() {
                tracing::debug!(src = %element.options().src, "Ready callback fired");
                return;
            }
            // Provider dropped its callback without firing it
            tracing::debug!("Ready callback abandoned; falling back to polling");
        }

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut polls = 0u32;

        loop {
            ticker.tick().await;
            polls += 1;
            if element.has_rendered_frame().await {
                tracing::debug!(src = %element.options().src, polls, "Rendered frame observed");
                return;
            }
        }
    }
}
