//! pageswap Document Model
//!
//! The browser surfaces the navigation engine touches, expressed as traits:
//! - [`Document`]: the swappable container, title, nav links, markers, focus
//! - [`SessionHistory`]: pushing history records
//! - DOM events the engine listens to ([`ClickEvent`], [`PopStateEvent`])
//!
//! [`HeadlessPage`] implements both traits over a parsed HTML document and an
//! in-memory history stack.

mod document;
mod error;
mod event;
mod headless;
mod history;
mod markers;

pub use document::{Document, NavLink, NodeId, ScriptElement};
pub use error::DomError;
pub use event::{ClickEvent, ElementInfo, PopStateEvent};
pub use headless::HeadlessPage;
pub use history::{HistoryEntry, SessionHistory};
pub use markers::Markers;

pub type Result<T> = std::result::Result<T, DomError>;

/// A host the navigation engine can drive: a document plus its session history.
pub trait Host: Document + SessionHistory {}

impl<T: Document + SessionHistory> Host for T {}
