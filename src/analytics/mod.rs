//! Click analytics module
//!
//! Pure, stateless analytics over recorded click events: a user-agent
//! classifier and a single-pass summarizer. Neither function touches
//! shared state, so both are safe to call from any number of tasks
//! without locking.
//!
//! Classification happens when a click is persisted; the summarizer only
//! reads the resolved labels it is handed and never re-parses user agents.

pub mod classifier;
pub mod models;
pub mod summary;

pub use classifier::{classify, Browser, Device, Os, UserAgentProfile};
pub use models::{AnalyticsSummary, ClickEvent, TopEntry};
pub use summary::summarize;
