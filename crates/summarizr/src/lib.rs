//! Core domain for summarizr.
//!
//! This crate contains every domain concept used by the action: newtype
//! identifiers, shared value types, error types, the run configuration, the
//! prompt formatter, inline-summary extraction, the port traits implemented
//! by the infrastructure crates, and the run orchestrator that sequences one
//! invocation. It performs no I/O of its own.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `CommentId`, etc.) |
//! | [`types`] | Shared value types (`Issue`, `KnowledgeRecord`, etc.) |
//! | [`errors`] | Component and top-level error types |
//! | [`config`] | Run configuration parsed once from the action inputs |
//! | [`prompt`] | Prompt assembly for the model fallback path |
//! | [`extract`] | Trigger detection and inline-summary extraction |
//! | [`ports`] | Traits implemented by the `github` and `llm` crates |
//! | [`run`] | The run orchestrator |

pub mod config;
pub mod errors;
pub mod extract;
pub mod identifiers;
pub mod ports;
pub mod prompt;
pub mod run;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{Config, ModelConfig};
pub use errors::{HostError, ModelError, StoreError, SummarizrError};
pub use extract::{InlineSummary, TRIGGER};
pub use identifiers::{
    ActorLogin, CommentId, IssueNumber, ReactionId, RepoSlug, RevisionTag, RunId,
};
pub use ports::{IssueHost, KnowledgeStore, Summarizer};
pub use run::Runner;
pub use types::{
    Issue, IssueComment, KnowledgeRecord, KnowledgeSnapshot, ReactionKind, RunOutcome, Timestamp,
    TriggerEvent,
};
