// External dependency loader - Pulls in a provider SDK once per process
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {url}: {reason}")]
pub struct ScriptLoadError {
    pub url: String,
    pub reason: String,
}

impl ScriptLoadError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Mechanism that actually fetches a third-party script
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<(), ScriptLoadError>;
}

type LoadFuture = Shared<BoxFuture<'static, Result<(), ScriptLoadError>>>;

enum LoadState {
    NotLoaded,
    Loading(LoadFuture),
    Loaded,
}

/// Process-wide guard around the SDK script.
/// Concurrent callers share one in-flight load; a success is remembered,
/// a failure is reported to everyone waiting on it and then forgotten.
pub struct SdkScriptService {
    loader: Arc<dyn ScriptLoader>,
    script_url: String,
    state: Mutex<LoadState>,
    injections: AtomicUsize,
}

impl SdkScriptService {
    pub fn new(loader: Arc<dyn ScriptLoader>, script_url: impl Into<String>) -> Self {
        Self {
            loader,
            script_url: script_url.into(),
            state: Mutex::new(LoadState::NotLoaded),
            injections: AtomicUsize::new(0),
        }
    }

    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.lock_state(), LoadState::Loaded)
    }

    /// How many times a load was actually started
    pub fn injection_count(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    pub async fn ensure_script_loaded(&self) -> Result<(), ScriptLoadError> {
        let pending = {
            let mut state = self.lock_state();
            match &*state {
                LoadState::Loaded => return Ok(()),
                LoadState::Loading(pending) => pending.clone(),
                LoadState::NotLoaded => {
                    let attempt = self.injections.fetch_add(1, Ordering::SeqCst) + 1;
                    tracing::info!(url = %self.script_url, attempt, "Injecting SDK script");

                    let loader = self.loader.clone();
                    let url = self.script_url.clone();
                    let pending = async move { loader.load(&url).await }.boxed().shared();
                    *state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut state = self.lock_state();
        // Another caller may already have replaced a failed attempt
        if let LoadState::Loading(current) = &*state {
            if Shared::ptr_eq(current, &pending) {
                *state = match &result {
                    Ok(()) => LoadState::Loaded,
                    Err(e) => {
                        tracing::warn!(error = %e, "SDK script failed to load");
                        LoadState::NotLoaded
                    }
                };
            }
        }

        result
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct CountingLoader {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl CountingLoader {
        fn new(delay: Duration, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
                fail,
            })
        }
    }

    #[async_trait]
    impl ScriptLoader for CountingLoader {
        async fn load(&self, url: &str) -> Result<(), ScriptLoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                Err(ScriptLoadError::new(url, "404"))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_calls_inject_once() {
        let loader = CountingLoader::new(Duration::from_millis(50), false);
        let service = SdkScriptService::new(loader.clone(), "https://sdk.example/tableau.js");

        service.ensure_script_loaded().await.unwrap();
        service.ensure_script_loaded().await.unwrap();

        assert!(service.is_loaded());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.injection_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_calls_share_in_flight_load() {
        let loader = CountingLoader::new(Duration::from_millis(200), false);
        let service = SdkScriptService::new(loader.clone(), "https://sdk.example/tableau.js");

        let (a, b, c) = tokio::join!(
            service.ensure_script_loaded(),
            service.ensure_script_loaded(),
            service.ensure_script_loaded()
        );

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_forgotten() {
        let loader = CountingLoader::new(Duration::from_millis(10), true);
        let service = SdkScriptService::new(loader.clone(), "https://sdk.example/missing.js");

        let err = service.ensure_script_loaded().await.unwrap_err();
        assert_eq!(err.url, "https://sdk.example/missing.js");
        assert!(!service.is_loaded());

        let _ = service.ensure_script_loaded().await;
        assert_eq!(service.injection_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_load_is_resumed_not_restarted() {
        let loader = CountingLoader::new(Duration::from_secs(1), false);
        let service = SdkScriptService::new(loader.clone(), "https://sdk.example/tableau.js");

        let abandoned =
            tokio::time::timeout(Duration::from_millis(100), service.ensure_script_loaded()).await;
        assert!(abandoned.is_err());

        service.ensure_script_loaded().await.unwrap();
        assert_eq!(service.injection_count(), 1);
    }
}
