//! Post-swap hook registry
//!
//! Page modules that bind to content inside the container (timing widgets,
//! per-page event wiring) register a callback here. Callbacks run once at
//! initial load and after every successful swap, in registration order.

use std::error::Error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::HookError;

/// Well-known name for the timing widget initializer.
pub const TIMING_HOOK: &str = "timing";
/// Well-known name for per-page event wiring.
pub const EVENTS_HOOK: &str = "events";

pub type HookResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;

type HookFn = Arc<dyn Fn() -> HookResult + Send + Sync>;

#[derive(Default, Clone)]
pub struct HookRegistry {
    hooks: Vec<(String, HookFn)>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under `name`. A name registered twice keeps its
    /// original position and runs the newer callback.
    pub fn register<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: Fn() -> HookResult + Send + Sync + 'static,
    {
        let name = name.into();
        let hook: HookFn = Arc::new(hook);

        match self.hooks.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = hook,
            None => self.hooks.push((name.clone(), hook)),
        }

        tracing::debug!(hook = %name, "Registered post-swap hook");
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(existing, _)| existing != name);
        before != self.hooks.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook. Failures (errors or panics) are logged and collected;
    /// they never stop the remaining hooks.
    pub fn invoke_all(&self) -> Vec<HookError> {
        let mut failures = Vec::new();

        for (name, hook) in &self.hooks {
            let failure = match catch_unwind(AssertUnwindSafe(|| hook())) {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(HookError::Failed {
                    name: name.clone(),
                    message: e.to_string(),
                }),
                Err(_) => Some(HookError::Panicked { name: name.clone() }),
            };

            if let Some(err) = failure {
                tracing::warn!(hook = %name, error = %err, "Post-swap hook failed");
                failures.push(err);
            }
        }

        failures
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}
