//! Knowledge-file persistence via the repository contents API.
//!
//! The knowledge file is a version-controlled file inside the repository
//! itself. Reads fetch the current blob and its SHA; writes are a single
//! create-or-update commit, conditional on that SHA when the file already
//! existed. The read-then-write pair is not atomic: two concurrent runs can
//! read the same revision, and the loser's conditional update is rejected.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use octocrab::Octocrab;
use serde_json::json;
use tracing::{debug, info};

use summarizr::{
    KnowledgeRecord, KnowledgeSnapshot, KnowledgeStore, RepoSlug, RevisionTag, StoreError,
};

use crate::github_status;

/// Repository-relative path of the knowledge file.
pub const KNOWLEDGE_PATH: &str = ".github/issue_data.jsonl";

/// Commit message used for every knowledge-file write.
const COMMIT_MESSAGE: &str = "chore(summarizr): update knowledge";

/// [`KnowledgeStore`] implementation bound to one repository.
pub struct GithubKnowledgeStore {
    crab: Octocrab,
    repo: RepoSlug,
}

impl GithubKnowledgeStore {
    /// Creates a store over an authenticated octocrab client.
    pub fn new(crab: Octocrab, repo: RepoSlug) -> Self {
        Self { crab, repo }
    }

    fn contents_route(&self) -> String {
        format!(
            "/repos/{}/{}/contents/{}",
            self.repo.owner(),
            self.repo.name(),
            KNOWLEDGE_PATH
        )
    }
}

fn store_error(err: octocrab::Error) -> StoreError {
    match err {
        octocrab::Error::GitHub { source, .. } => StoreError::Api {
            message: source.message.clone(),
        },
        other => StoreError::Api {
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl KnowledgeStore for GithubKnowledgeStore {
    async fn read(&self) -> Result<KnowledgeSnapshot, StoreError> {
        let response = match self
            .crab
            .get::<serde_json::Value, _, _>(self.contents_route(), None::<&()>)
            .await
        {
            Ok(response) => response,
            Err(err) if github_status(&err) == Some(404) => {
                debug!(path = KNOWLEDGE_PATH, "knowledge file absent");
                return Ok(KnowledgeSnapshot::Absent);
            }
            Err(err) => return Err(store_error(err)),
        };

        let sha = response
            .get("sha")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let revision = RevisionTag::new(sha).ok_or_else(|| StoreError::Api {
            message: "contents response carries no revision sha".to_string(),
        })?;

        // The API base64-encodes the blob with embedded line breaks.
        let encoded: String = response
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = BASE64.decode(encoded.as_bytes()).map_err(|e| StoreError::Api {
            message: format!("knowledge file is not valid base64: {e}"),
        })?;
        let content = String::from_utf8(bytes).map_err(|e| StoreError::Api {
            message: format!("knowledge file is not valid UTF-8: {e}"),
        })?;

        Ok(KnowledgeSnapshot::Found { content, revision })
    }

    async fn append(&self, record: &KnowledgeRecord) -> Result<(), StoreError> {
        let line = record.to_line();
        let (content, revision) = match self.read().await? {
            KnowledgeSnapshot::Found { content, revision } => {
                (format!("{content}\n{line}"), Some(revision))
            }
            KnowledgeSnapshot::Absent => (line, None),
        };

        let mut body = json!({
            "message": COMMIT_MESSAGE,
            "content": BASE64.encode(content.as_bytes()),
        });
        // The revision tag makes the update conditional; a create carries none.
        if let Some(revision) = &revision {
            body["sha"] = json!(revision.as_str());
        }

        self.crab
            .put::<serde_json::Value, _, _>(self.contents_route(), Some(&body))
            .await
            .map_err(|err| match github_status(&err) {
                Some(409) => StoreError::Conflict,
                _ => store_error(err),
            })?;

        info!(
            issue = %record.issue,
            path = KNOWLEDGE_PATH,
            created = revision.is_none(),
            "knowledge record appended"
        );
        Ok(())
    }
}
