//! pageswap Core
//!
//! Runtime wiring for same-document page navigation: configuration, logging
//! and the [`PageSwap`] facade a host drives with its click and popstate
//! events.

mod config;
mod error;
mod runtime;

pub use config::Config;
pub use error::CoreError;
pub use runtime::PageSwap;

// Re-export engine components
pub use pageswap_dom::{
    ClickEvent, Document, ElementInfo, HeadlessPage, HistoryEntry, Host, Markers, PopStateEvent,
    SessionHistory,
};
pub use pageswap_fetch::{
    FetchConfig, FetchError, FetchedPage, HttpFetcher, PageFetcher, StaticFetcher,
};
pub use pageswap_navigation::{
    HookError, HookResult, NavigationError, NavigationOutcome, NavigationRequest, Navigator,
    TransactionState, TransitionTiming, EVENTS_HOOK, TIMING_HOOK,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. `RUST_LOG` wins over the configured filter.
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}
