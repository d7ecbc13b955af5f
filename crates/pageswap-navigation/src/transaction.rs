//! Navigation transaction state machine
//!
//! ```text
//! Idle
//!   ↓ request
//! AnimatingOut ──→ Aborted
//!   ↓ exit delay       ↑
//! Fetching ────────────┘ fetch failed
//!   ↓ fetched
//! Swapping
//!   ↓ content in place
//! AnimatingIn
//!   ↓
//! Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::request::NavigationRequest;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// No transaction in flight
    Idle,
    /// Exit fade running, waiting for the settle delay
    AnimatingOut,
    /// Network round trip in flight
    Fetching,
    /// Replacing container content and syncing history
    Swapping,
    /// Hooks and enter fade
    AnimatingIn,
    /// Gave up, falling back to a full page load
    Aborted,
}

impl TransactionState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: TransactionState) -> bool {
        matches!(
            (self, target),
            (TransactionState::Idle, TransactionState::AnimatingOut)
                | (TransactionState::AnimatingOut, TransactionState::Fetching)
                | (TransactionState::AnimatingOut, TransactionState::Aborted)
                | (TransactionState::Fetching, TransactionState::Swapping)
                | (TransactionState::Fetching, TransactionState::Aborted)
                | (TransactionState::Swapping, TransactionState::AnimatingIn)
                | (TransactionState::AnimatingIn, TransactionState::Idle)
        )
    }

    /// Returns true once the transaction can no longer touch the page
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Idle | TransactionState::Aborted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Idle => "idle",
            TransactionState::AnimatingOut => "animating_out",
            TransactionState::Fetching => "fetching",
            TransactionState::Swapping => "swapping",
            TransactionState::AnimatingIn => "animating_in",
            TransactionState::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single unit of in-flight navigation work.
#[derive(Debug, Clone)]
pub struct NavigationTransaction {
    pub generation: u64,
    pub request: NavigationRequest,
    pub state: TransactionState,
}

impl NavigationTransaction {
    /// A transaction that has just left `Idle`.
    pub fn begin(generation: u64, request: NavigationRequest) -> Self {
        Self {
            generation,
            request,
            state: TransactionState::AnimatingOut,
        }
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: TransactionState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(NavigationError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            generation = self.generation,
            from = %self.state,
            to = %new_state,
            "Transaction state transition"
        );

        self.state = new_state;
        Ok(())
    }
}

/// How a navigation request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Content swapped in place
    Completed { generation: u64 },
    /// Failed and fell back to a full page load
    Aborted {
        generation: u64,
        error: NavigationError,
    },
    /// A newer request took over; nothing from this one reached the page
    Superseded { generation: u64 },
    /// No container on the current page; loaded the target directly
    HardNavigated,
}

impl NavigationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, NavigationOutcome::Completed { .. })
    }
}
