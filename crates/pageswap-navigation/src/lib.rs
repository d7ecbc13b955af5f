//! pageswap Navigation Engine
//!
//! Runs one navigation transaction at a time:
//! ```text
//! Idle → AnimatingOut → Fetching → Swapping → AnimatingIn → Idle
//!              ↘            ↘
//!               Aborted (full page load)
//! ```
//! A newer request always wins: every transaction carries a generation token
//! and continuations of an older generation are discarded.

mod animator;
mod error;
mod history;
mod hooks;
mod interceptor;
mod navigator;
mod request;
mod scripts;
mod transaction;

#[cfg(test)]
mod test_support;

pub use animator::{TransitionAnimator, TransitionTiming, BUSY_INDICATOR_HTML};
pub use error::{HookError, NavigationError};
pub use history::HistoryBridge;
pub use hooks::{HookRegistry, HookResult, EVENTS_HOOK, TIMING_HOOK};
pub use interceptor::LinkInterceptor;
pub use navigator::Navigator;
pub use request::{NavigationRequest, RequestSink};
pub use scripts::reexecute_scripts;
pub use transaction::{NavigationOutcome, NavigationTransaction, TransactionState};

pub type Result<T> = std::result::Result<T, NavigationError>;
