//! Summarizr GitHub infrastructure adapter.
//!
//! Implements the hosting-platform traits defined in the [`summarizr`] crate
//! ([`summarizr::IssueHost`], [`summarizr::KnowledgeStore`]) using
//! [`octocrab`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub
//! API details (routes, pagination, content encoding, status-code mapping)
//! are handled here; the [`summarizr`] crate never sees them.

pub mod host;
pub mod knowledge;

pub use host::GithubHost;
pub use knowledge::{GithubKnowledgeStore, KNOWLEDGE_PATH};

use summarizr::HostError;

/// Status code reported by the API, when the failure was an API response at
/// all (as opposed to a transport-level failure).
pub(crate) fn github_status(err: &octocrab::Error) -> Option<u16> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Maps an octocrab failure onto the domain's host error split: API
/// rejections keep the platform's message, everything else is transport.
pub(crate) fn host_error(err: octocrab::Error) -> HostError {
    match err {
        octocrab::Error::GitHub { source, .. } => HostError::Api {
            message: source.message.clone(),
        },
        other => HostError::Transport {
            message: other.to_string(),
        },
    }
}
