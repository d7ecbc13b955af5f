//! Navigator
//!
//! Owns the current navigation transaction and drives it through its states.
//! Any failure before the swap falls back to a full page load of the target,
//! which is exactly what would have happened without interception.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pageswap_dom::{Host, Markers};
use pageswap_fetch::{FetchedPage, PageFetcher};
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::animator::{TransitionAnimator, TransitionTiming};
use crate::error::{HookError, NavigationError};
use crate::history::HistoryBridge;
use crate::hooks::{HookRegistry, HookResult};
use crate::request::{NavigationRequest, RequestSink};
use crate::scripts::reexecute_scripts;
use crate::transaction::{NavigationOutcome, NavigationTransaction, TransactionState};

pub struct Navigator<H: Host> {
    inner: Arc<Inner<H>>,
}

struct Inner<H: Host> {
    host: Arc<Mutex<H>>,
    fetcher: Arc<dyn PageFetcher>,
    hooks: RwLock<HookRegistry>,
    animator: TransitionAnimator<H>,
    history: HistoryBridge,
    /// Generation of the most recent request; older continuations are stale
    generation: AtomicU64,
    active: Mutex<Option<NavigationTransaction>>,
}

impl<H: Host> Navigator<H> {
    pub fn new(
        host: Arc<Mutex<H>>,
        fetcher: Arc<dyn PageFetcher>,
        markers: &Markers,
        timing: TransitionTiming,
    ) -> Self {
        let animator = TransitionAnimator::new(Arc::clone(&host), markers, timing);

        Self {
            inner: Arc::new(Inner {
                host,
                fetcher,
                hooks: RwLock::new(HookRegistry::new()),
                animator,
                history: HistoryBridge::new(markers.active_class.clone()),
                generation: AtomicU64::new(0),
                active: Mutex::new(None),
            }),
        }
    }

    pub fn host(&self) -> Arc<Mutex<H>> {
        Arc::clone(&self.inner.host)
    }

    /// Register a callback to run after every successful swap and at initial load.
    pub fn register_post_swap_hook<F>(&self, name: impl Into<String>, hook: F)
    where
        F: Fn() -> HookResult + Send + Sync + 'static,
    {
        self.inner.hooks.write().register(name, hook);
    }

    pub fn unregister_post_swap_hook(&self, name: &str) -> bool {
        self.inner.hooks.write().unregister(name)
    }

    pub fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// State of the active transaction, `Idle` when there is none.
    pub fn state(&self) -> TransactionState {
        self.inner
            .active
            .lock()
            .as_ref()
            .map(|tx| tx.state)
            .unwrap_or(TransactionState::Idle)
    }

    /// Whether the busy indicator is currently shown.
    pub fn is_busy(&self) -> bool {
        self.inner.animator.is_busy()
    }

    /// Initial page load: highlight the nav link for the current address and
    /// run the post-swap hooks once.
    pub fn on_document_loaded(&self) -> Vec<HookError> {
        {
            let mut host = self.inner.host.lock();
            let location = host.location().clone();
            self.inner.history.sync_active_link(&mut *host, &location);
        }
        self.invoke_hooks()
    }

    /// Run `request` in the background.
    pub fn spawn(&self, request: NavigationRequest) -> JoinHandle<NavigationOutcome> {
        let navigator = self.clone();
        tokio::spawn(async move { navigator.navigate(request).await })
    }

    /// Run one navigation transaction to its end.
    pub async fn navigate(&self, request: NavigationRequest) -> NavigationOutcome {
        let generation = {
            let mut host = self.inner.host.lock();
            if !host.has_container() {
                tracing::warn!(
                    url = %request.target_url,
                    "No container on the current page, loading target directly"
                );
                host.navigate_hard(&request.target_url);
                return NavigationOutcome::HardNavigated;
            }

            let generation = self.begin(request.clone());
            self.inner.animator.show_on(&mut *host);
            self.inner.animator.mark_exit(&mut *host);
            generation
        };

        let span = tracing::info_span!(
            "navigation",
            generation,
            url = %request.target_url,
            push = request.record_in_history
        );
        self.run(generation, request).instrument(span).await
    }

    /// Continuations of one transaction. Each one checks its generation under
    /// the host lock and writes to the page only while still holding it, so a
    /// newer `begin` can never interleave with a stale write.
    async fn run(&self, generation: u64, request: NavigationRequest) -> NavigationOutcome {
        tracing::debug!("Navigation started");
        self.inner.animator.settle().await;

        {
            let mut host = self.inner.host.lock();
            if !self.is_current(generation) {
                return self.superseded(generation);
            }
            if !host.has_container() {
                let error = NavigationError::MissingContainer;
                return self.abort(&mut *host, generation, &request, error);
            }
            self.advance(generation, TransactionState::Fetching);
        }

        let fetched = self.inner.fetcher.fetch(&request.target_url).await;

        let title = {
            let mut host = self.inner.host.lock();
            if !self.is_current(generation) {
                return self.superseded(generation);
            }

            let page = match fetched {
                Ok(page) => page,
                Err(e) => return self.abort(&mut *host, generation, &request, e.into()),
            };

            self.advance(generation, TransactionState::Swapping);
            self.swap(&mut *host, &request, &page);

            self.advance(generation, TransactionState::AnimatingIn);
            self.inner.animator.hide_on(&mut *host);
            self.inner.animator.begin_enter_on(&mut *host);
            page.title
        };

        // Hooks may touch the host themselves, so they run unlocked.
        self.invoke_hooks();

        self.advance(generation, TransactionState::Idle);
        self.finish(generation);

        tracing::info!(title = %title, "Navigation completed");
        NavigationOutcome::Completed { generation }
    }

    /// Start a transaction, invalidating whatever was in flight. Callers hold
    /// the host lock.
    fn begin(&self, request: NavigationRequest) -> u64 {
        let mut active = self.inner.active.lock();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = active.as_ref() {
            tracing::debug!(
                previous = previous.generation,
                next = generation,
                "Superseding in-flight navigation"
            );
        }

        *active = Some(NavigationTransaction::begin(generation, request));
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    fn advance(&self, generation: u64, next: TransactionState) {
        let mut active = self.inner.active.lock();
        if let Some(tx) = active.as_mut().filter(|tx| tx.generation == generation) {
            if let Err(e) = tx.transition_to(next) {
                tracing::error!(error = %e, "Transaction left its state machine");
            }
        }
    }

    fn finish(&self, generation: u64) {
        let mut active = self.inner.active.lock();
        if active.as_ref().map(|tx| tx.generation) == Some(generation) {
            *active = None;
        }
    }

    fn superseded(&self, generation: u64) -> NavigationOutcome {
        tracing::debug!("Discarding superseded navigation");
        NavigationOutcome::Superseded { generation }
    }

    /// Give up on a current transaction. Callers hold the host lock and have
    /// checked the generation.
    fn abort(
        &self,
        host: &mut H,
        generation: u64,
        request: &NavigationRequest,
        error: NavigationError,
    ) -> NavigationOutcome {
        tracing::error!(error = %error, "Navigation failed, falling back to a full page load");

        self.advance(generation, TransactionState::Aborted);
        self.inner.animator.hide_on(host);
        host.navigate_hard(&request.target_url);
        self.finish(generation);

        NavigationOutcome::Aborted { generation, error }
    }

    /// Put fetched content in place.
    fn swap(&self, host: &mut H, request: &NavigationRequest, page: &FetchedPage) {
        host.set_container_html(&page.content_markup);
        reexecute_scripts(host);

        if !page.title.is_empty() {
            host.set_title(&page.title);
        }

        let history = &self.inner.history;
        history.sync_active_link(host, &request.target_url);
        history.record_if_requested(host, &request.target_url, request.record_in_history);

        host.focus_container();
    }

    fn invoke_hooks(&self) -> Vec<HookError> {
        // Snapshot so a hook may register or remove hooks while running.
        let hooks = self.inner.hooks.read().clone();
        hooks.invoke_all()
    }
}

impl<H: Host> Clone for Navigator<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: Host> RequestSink for Navigator<H> {
    fn submit(&self, request: NavigationRequest) {
        drop(self.spawn(request));
    }
}
