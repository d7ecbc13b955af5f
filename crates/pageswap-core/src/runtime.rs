//! Page runtime
//!
//! Wires one document to the interceptor and navigator. The host forwards
//! click and popstate events; everything else happens inside the engine.

use std::sync::Arc;

use pageswap_dom::{ClickEvent, Host, PopStateEvent};
use pageswap_fetch::{HttpFetcher, PageFetcher};
use pageswap_navigation::{HookError, HookResult, LinkInterceptor, Navigator};
use parking_lot::Mutex;

use crate::config::Config;
use crate::Result;

/// Navigation runtime for one loaded page
///
/// Event handlers submit work to the tokio runtime, so they must be called
/// from within one.
pub struct PageSwap<H: Host> {
    config: Config,
    host: Arc<Mutex<H>>,
    navigator: Navigator<H>,
    interceptor: LinkInterceptor<Navigator<H>>,
}

impl<H: Host> PageSwap<H> {
    /// Build a runtime that fetches over HTTP from the host page's origin.
    pub fn new(host: H, config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(
            host.location(),
            &config.markers.container_selector,
            &config.fetch,
        )?;
        Ok(Self::assemble(host, Arc::new(fetcher), config))
    }

    pub fn with_fetcher(host: H, fetcher: Arc<dyn PageFetcher>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(host, fetcher, config))
    }

    fn assemble(host: H, fetcher: Arc<dyn PageFetcher>, config: Config) -> Self {
        let host = Arc::new(Mutex::new(host));
        let navigator = Navigator::new(
            Arc::clone(&host),
            fetcher,
            &config.markers,
            config.timing,
        );
        let interceptor = LinkInterceptor::new(navigator.clone(), config.markers.clone());

        Self {
            config,
            host,
            navigator,
            interceptor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> Arc<Mutex<H>> {
        Arc::clone(&self.host)
    }

    pub fn navigator(&self) -> &Navigator<H> {
        &self.navigator
    }

    pub fn register_post_swap_hook<F>(&self, name: impl Into<String>, hook: F)
    where
        F: Fn() -> HookResult + Send + Sync + 'static,
    {
        self.navigator.register_post_swap_hook(name, hook);
    }

    /// Initial document load. Call once, after hooks are registered.
    pub fn boot(&self) -> Vec<HookError> {
        let failures = self.navigator.on_document_loaded();
        tracing::info!(
            url = %self.host.lock().location(),
            hook_failures = failures.len(),
            "Page runtime booted"
        );
        failures
    }

    /// Forward a click. Returns true if the engine took over the navigation.
    pub fn handle_click(&self, event: &mut ClickEvent) -> bool {
        let location = self.host.lock().location().clone();
        self.interceptor.on_click(event, &location)
    }

    /// Forward a back/forward traversal.
    pub fn handle_pop_state(&self, event: &PopStateEvent) {
        let location = self.host.lock().location().clone();
        self.interceptor.on_pop_state(event, &location);
    }
}
