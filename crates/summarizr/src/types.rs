//! Shared value types for the summarizr domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types
//! carry meaningful values: issue and comment snapshots fetched from the
//! hosting platform, the knowledge record persisted per resolved issue, and
//! the outcome reported by a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ActorLogin, CommentId, IssueNumber, RepoSlug, RevisionTag};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Issue thread snapshots
// ---------------------------------------------------------------------------

/// The triggering issue as fetched from the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: IssueNumber,
    /// Issue title.
    pub title: String,
    /// Issue body. `None` when the issue was opened without a description.
    pub body: Option<String>,
}

/// One comment within the triggering issue's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Comment identifier, required for reaction calls.
    pub id: CommentId,
    /// Login of the comment author.
    pub author: ActorLogin,
    /// Comment body. Comments deleted through the API can surface as `None`.
    pub body: Option<String>,
    /// Creation time, used to pick the most recent trigger comment.
    pub created_at: Timestamp,
}

impl IssueComment {
    /// Returns the comment body, or `""` when the body is absent.
    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Trigger event
// ---------------------------------------------------------------------------

/// The issue-comment event that started this invocation.
///
/// Built once by the composition root from the workflow environment and
/// passed to the orchestrator; nothing downstream reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Repository the event fired in.
    pub repository: RepoSlug,
    /// Issue whose thread received the comment.
    pub issue: IssueNumber,
    /// User that authored the triggering comment.
    pub actor: ActorLogin,
}

// ---------------------------------------------------------------------------
// Reactions
// ---------------------------------------------------------------------------

/// Emoji reactions used as the run's progress signal on the anchor comment.
///
/// `Eyes` marks "in progress" and is always removed at the end; exactly one
/// of `ThumbsUp` / `ThumbsDown` replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    /// Processing has started.
    Eyes,
    /// A knowledge record was appended.
    ThumbsUp,
    /// No inline summary was found; the model fallback ran instead.
    ThumbsDown,
}

impl ReactionKind {
    /// Returns the REST wire name for this reaction.
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Eyes => "eyes",
            ReactionKind::ThumbsUp => "+1",
            ReactionKind::ThumbsDown => "-1",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Knowledge records
// ---------------------------------------------------------------------------

/// One problem/solution summary persisted for a resolved issue.
///
/// Created once per successful run; never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Number of the issue this record summarises.
    pub issue: IssueNumber,
    /// Issue title at the time of the run.
    pub title: String,
    /// The reported problem.
    pub problem: String,
    /// The solution that resolved it.
    pub solution: String,
}

/// Wire shape of one knowledge-file line: a prompt/completion pair suitable
/// for fine-tuning corpora.
#[derive(Debug, Serialize, Deserialize)]
struct KnowledgeLine {
    prompt: String,
    completion: String,
}

impl KnowledgeRecord {
    /// Serialises this record as a single JSON line (no trailing newline).
    ///
    /// The prompt field embeds the issue number, title, and problem; the
    /// completion field carries the solution.
    pub fn to_line(&self) -> String {
        let line = KnowledgeLine {
            prompt: format!(
                "ID: {}\nTitle: {}\nProblem: {}",
                self.issue, self.title, self.problem
            ),
            completion: self.solution.clone(),
        };
        // Serialisation of a two-string struct cannot fail.
        serde_json::to_string(&line).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Knowledge file state
// ---------------------------------------------------------------------------

/// Result of reading the knowledge file from the backing repository.
///
/// `Absent` is an ordinary state (first run in a repository), kept distinct
/// from transport failures so callers and tests can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSnapshot {
    /// The file exists with the given content and revision tag.
    Found {
        /// Decoded file content.
        content: String,
        /// Revision tag to carry on the next conditional update.
        revision: RevisionTag,
    },
    /// The file does not exist yet; the next write must create it.
    Absent,
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// What a completed run did.
///
/// Every variant is a successful process exit; errors are reported through
/// [`crate::SummarizrError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No comment in the thread starts with the trigger token.
    NoTrigger,
    /// The triggering actor lacks write access to the repository.
    AccessDenied,
    /// An inline summary was extracted and appended to the knowledge file.
    Recorded,
    /// No inline summary was present; the model produced one, which was
    /// logged but not persisted.
    ModelFallback,
}
