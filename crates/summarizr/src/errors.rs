//! Error types for the summarizr domain.
//!
//! Component-level errors ([`HostError`], [`ModelError`], [`StoreError`]) are
//! produced by the infrastructure adapters behind each port trait.
//! [`SummarizrError`] is the top-level type returned by the orchestrator and
//! reported by the binary; every component error converts into it.
//!
//! Expected negative outcomes — no trigger comment, no write access, no
//! inline summary — are **not** errors. They are ordinary
//! [`crate::RunOutcome`] values and the process exits successfully. Errors
//! here mean the run itself failed, and there are no retries anywhere.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Component-level errors
// ---------------------------------------------------------------------------

/// Failures talking to the issue-hosting platform.
#[derive(Debug, Error)]
pub enum HostError {
    /// The REST API rejected a request.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail as reported by the platform.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("GitHub transport error: {message}")]
    Transport {
        /// Underlying transport failure description.
        message: String,
    },
}

/// Failures from the selected language-model provider.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider returned a non-success status.
    #[error("model provider error: {message}")]
    Api {
        /// Response body or status detail from the provider.
        message: String,
    },

    /// The request never produced a response.
    #[error("model transport error: {0}")]
    Transport(String),

    /// The response arrived but did not contain a completion where expected.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Failures reading or writing the knowledge file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The conditional update was rejected because the revision tag no
    /// longer matches: another writer got there first. The run fails; the
    /// losing record is not silently dropped or merged.
    #[error("knowledge file changed since it was read (revision conflict)")]
    Conflict,

    /// Any other API failure on the contents endpoints. Distinct from the
    /// file simply not existing, which is [`crate::KnowledgeSnapshot::Absent`].
    #[error("knowledge store error: {message}")]
    Api {
        /// Response detail as reported by the platform.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Top-level error for one summarizr run.
///
/// Anything surfacing here marks the whole invocation as failed; the binary
/// logs it and exits non-zero. Reactions already emitted are not rolled back.
#[derive(Debug, Error)]
pub enum SummarizrError {
    /// The action inputs are missing, empty, or name an unsupported
    /// provider. Produced at parse time; the run never starts with an
    /// invalid configuration.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// A hosting-platform call failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The model provider call failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The knowledge file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SummarizrError {
    /// Convenience constructor for configuration failures.
    pub fn config(message: impl Into<String>) -> Self {
        SummarizrError::Config {
            message: message.into(),
        }
    }
}
