// Embed lifecycle controller - Loading, ready and failed states of one preview
use crate::application::readiness_observer::ReadinessObserver;
use crate::application::script_loader::SdkScriptService;
use crate::application::viz_element::VizElementFactory;
use crate::domain::dashboard::DashboardEntry;
use crate::domain::embed::{EmbedError, EmbedStatus, EmbedStrategy, HostNode, VizOptions};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;

pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedTimings {
    /// Cosmetic delay on the iframe path before declaring ready
    pub min_display: Duration,
    /// Maximum wait on the SDK path
    pub watchdog: Duration,
    pub poll_interval: Duration,
}

impl Default for EmbedTimings {
    fn default() -> Self {
        Self {
            min_display: Duration::from_millis(500),
            watchdog: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Container the preview is rendered into; owned by one controller
#[derive(Debug, Clone, Default)]
pub struct HostContainer {
    node: Arc<Mutex<Option<HostNode>>>,
}

impl HostContainer {
    pub fn node(&self) -> Option<HostNode> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn replace(&self, node: HostNode) {
        *self.lock() = Some(node);
    }

    fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<HostNode>> {
        self.node.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome reported by an embedding mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Ready,
    Failed(EmbedError),
    Unavailable,
}

struct Session {
    generation: Generation,
    target: Option<DashboardEntry>,
    task: Option<AbortHandle>,
}

struct ControllerCore {
    session: Mutex<Session>,
    status: watch::Sender<EmbedStatus>,
    host: HostContainer,
}

impl ControllerCore {
    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Put a node in the host, unless the attempt was superseded
    fn attach(&self, generation: Generation, node: HostNode) -> bool {
        let session = self.lock_session();
        if session.generation != generation {
            tracing::debug!(generation, current = session.generation, "Discarding stale attach");
            return false;
        }
        self.host.replace(node);
        true
    }

    fn signal(&self, generation: Generation, signal: Signal) -> bool {
        let session = self.lock_session();
        if session.generation != generation {
            tracing::debug!(
                generation,
                current = session.generation,
                ?signal,
                "Discarding stale embed signal"
            );
            return false;
        }
        let loading = *self.status.borrow() == EmbedStatus::Loading;
        if !loading {
            tracing::debug!(generation, ?signal, "Embed already settled; signal ignored");
            return false;
        }

        let id = session.target.as_ref().map(|t| t.id.to_string()).unwrap_or_default();
        let status = match signal {
            Signal::Ready => {
                tracing::info!(dashboard = %id, generation, "Embed ready");
                EmbedStatus::Ready
            }
            Signal::Failed(error) => {
                tracing::warn!(
                    dashboard = %id,
                    generation,
                    kind = ?error.kind,
                    "Embed failed: {}",
                    error.message
                );
                self.host.replace(HostNode::Fallback {
                    message: error.message.clone(),
                    link: error.fallback_url.clone(),
                });
                EmbedStatus::Failed(error)
            }
            Signal::Unavailable => {
                tracing::debug!(dashboard = %id, generation, "No preview available");
                self.host.replace(HostNode::Placeholder);
                EmbedStatus::Unavailable
            }
        };
        self.status.send_replace(status);
        true
    }
}

/// Drives one preview at a time. Mounting a new target supersedes the
/// previous attempt; dropping the controller unmounts it.
pub struct EmbedController {
    sdk: Arc<SdkScriptService>,
    factory: Arc<dyn VizElementFactory>,
    timings: EmbedTimings,
    core: Arc<ControllerCore>,
}

impl EmbedController {
    pub fn new(
        sdk: Arc<SdkScriptService>,
        factory: Arc<dyn VizElementFactory>,
        timings: EmbedTimings,
    ) -> Self {
        let (status, _) = watch::channel(EmbedStatus::Initial);
        Self {
            sdk,
            factory,
            timings,
            core: Arc::new(ControllerCore {
                session: Mutex::new(Session {
                    generation: 0,
                    target: None,
                    task: None,
                }),
                status,
                host: HostContainer::default(),
            }),
        }
    }

    pub fn status(&self) -> EmbedStatus {
        self.core.status.borrow().clone()
    }

    pub fn host(&self) -> HostContainer {
        self.core.host.clone()
    }

    pub fn target(&self) -> Option<DashboardEntry> {
        self.core.lock_session().target.clone()
    }

    /// Start a fresh attempt for `entry`, cancelling any attempt in progress
    pub fn mount(&self, entry: DashboardEntry) -> Generation {
        let mut session = self.core.lock_session();
        if let Some(task) = session.task.take() {
            task.abort();
        }
        session.generation += 1;
        let generation = session.generation;
        session.target = Some(entry.clone());
        self.core.host.clear();
        self.core.status.send_replace(EmbedStatus::Loading);

        tracing::debug!(dashboard = %entry.id, generation, "Mounting embed");

        let lifecycle = Lifecycle {
            core: self.core.clone(),
            sdk: self.sdk.clone(),
            factory: self.factory.clone(),
            timings: self.timings,
            generation,
        };
        let fallback = entry.preview_url().map(str::to_string);
        let task = tokio::spawn(lifecycle.run(entry));
        session.task = Some(task.abort_handle());

        // A panicking attempt still has to settle as a failure
        let core = self.core.clone();
        tokio::spawn(async move {
            if let Err(e) = task.await {
                if e.is_panic() {
                    tracing::error!(generation, "Embed task panicked");
                    core.signal(
                        generation,
                        Signal::Failed(EmbedError::construction("embed task stopped", fallback)),
                    );
                }
            }
        });
        generation
    }

    /// Cancel timers and observers, then empty the host container
    pub fn unmount(&self) {
        let mut session = self.core.lock_session();
        if let Some(task) = session.task.take() {
            task.abort();
        }
        if session.target.take().is_some() {
            tracing::debug!(generation = session.generation, "Unmounting embed");
        }
        session.generation += 1;
        self.core.host.clear();
        self.core.status.send_replace(EmbedStatus::Initial);
    }

    /// Entry point for mechanism callbacks; returns whether a transition happened
    pub fn signal(&self, generation: Generation, signal: Signal) -> bool {
        self.core.signal(generation, signal)
    }

    /// Wait until the current attempt is terminal, or nothing is mounted
    pub async fn settled(&self) -> EmbedStatus {
        let mut rx = self.core.status.subscribe();
        let settled = rx
            .wait_for(|status| status.is_terminal() || *status == EmbedStatus::Initial)
            .await
            .map(|status| (*status).clone());
        settled.unwrap_or_else(|_| self.status())
    }
}

impl Drop for EmbedController {
    fn drop(&mut self) {
        self.unmount();
    }
}

struct Lifecycle {
    core: Arc<ControllerCore>,
    sdk: Arc<SdkScriptService>,
    factory: Arc<dyn VizElementFactory>,
    timings: EmbedTimings,
    generation: Generation,
}

impl Lifecycle {
    async fn run(self, entry: DashboardEntry) {
        match EmbedStrategy::for_entry(&entry) {
            EmbedStrategy::NoPreview => {
                self.core.signal(self.generation, Signal::Unavailable);
            }
            EmbedStrategy::Iframe { src } => {
                if !self.core.attach(self.generation, HostNode::Iframe { src }) {
                    return;
                }
                tokio::time::sleep(self.timings.min_display).await;
                self.core.signal(self.generation, Signal::Ready);
            }
            EmbedStrategy::SdkElement { options } => {
                let fallback = entry.preview_url().map(str::to_string);
                let outcome = match tokio::time::timeout(
                    self.timings.watchdog,
                    self.embed_with_sdk(options, fallback.clone()),
                )
                .await
                {
                    Ok(Ok(())) => Signal::Ready,
                    Ok(Err(error)) => Signal::Failed(error),
                    Err(_) => Signal::Failed(EmbedError::timeout(fallback)),
                };
                self.core.signal(self.generation, outcome);
            }
        }
    }

    async fn embed_with_sdk(
        &self,
        options: VizOptions,
        fallback: Option<String>,
    ) -> Result<(), EmbedError> {
        self.sdk
            .ensure_script_loaded()
            .await
            .map_err(|e| EmbedError::script_load(&e.reason, fallback.clone()))?;

        let mut element = self
            .factory
            .construct(&options)
            .map_err(|e| EmbedError::construction(e, fallback.clone()))?;

        if !self.core.attach(self.generation, HostNode::VizElement { options }) {
            return Ok(());
        }

        ReadinessObserver::new(self.timings.poll_interval)
            .observe(element.as_mut())
            .await;
        Ok(())
    }
}
