//! Port traits implemented by the infrastructure crates.
//!
//! The domain sees only these traits. The `github` crate supplies
//! [`IssueHost`] and [`KnowledgeStore`] over the hosting platform's REST
//! API; the `llm` crate supplies [`Summarizer`] over the configured model
//! provider. Tests supply in-memory fakes.

use async_trait::async_trait;

use crate::{
    ActorLogin, CommentId, HostError, Issue, IssueComment, IssueNumber, KnowledgeRecord,
    KnowledgeSnapshot, ModelError, ReactionId, ReactionKind, StoreError,
};

/// Issue-thread access and reaction signalling on the hosting platform.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Fetches the triggering issue.
    async fn fetch_issue(&self, number: IssueNumber) -> Result<Issue, HostError>;

    /// Lists every comment in the issue's thread, oldest first.
    async fn list_comments(&self, number: IssueNumber) -> Result<Vec<IssueComment>, HostError>;

    /// Returns whether `actor` holds write (or admin) permission on the
    /// repository. "Not a collaborator" is `Ok(false)`, not an error.
    async fn has_write_access(&self, actor: &ActorLogin) -> Result<bool, HostError>;

    /// Adds an emoji reaction to a comment and returns its id, which is
    /// needed to remove the reaction again.
    async fn add_reaction(
        &self,
        comment: CommentId,
        kind: ReactionKind,
    ) -> Result<ReactionId, HostError>;

    /// Removes a previously added reaction from a comment.
    async fn remove_reaction(
        &self,
        comment: CommentId,
        reaction: ReactionId,
    ) -> Result<(), HostError>;
}

/// A language-model backend that can summarise an issue.
///
/// Exactly one completion call per invocation; implementations do not
/// stream, retry, or validate the returned shape.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarises the issue from its full comment thread.
    async fn summarize_issue(
        &self,
        issue: &Issue,
        comments: &[IssueComment],
    ) -> Result<String, ModelError>;

    /// Summarises the issue from its title and body alone.
    async fn summarize_issue_body(&self, issue: &Issue) -> Result<String, ModelError>;
}

/// Read/append access to the knowledge file persisted in the repository.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Reads the current knowledge file.
    ///
    /// A missing file is [`KnowledgeSnapshot::Absent`]; transport and API
    /// failures are errors, never folded into `Absent`.
    async fn read(&self) -> Result<KnowledgeSnapshot, StoreError>;

    /// Appends one record: re-reads the file, joins the serialised record to
    /// the existing content, and writes back — a plain create when the file
    /// was absent, a conditional update carrying the revision tag when it
    /// existed. A revision conflict fails the call; there is no retry.
    async fn append(&self, record: &KnowledgeRecord) -> Result<(), StoreError>;
}
