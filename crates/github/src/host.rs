//! Issue-thread access and reaction signalling over the GitHub REST API.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use summarizr::{
    ActorLogin, CommentId, HostError, Issue, IssueComment, IssueHost, IssueNumber, ReactionId,
    ReactionKind, RepoSlug, Timestamp,
};

use crate::{github_status, host_error};

/// [`IssueHost`] implementation bound to one repository.
pub struct GithubHost {
    crab: Octocrab,
    repo: RepoSlug,
}

/// The only part of a created-reaction response we need: the id that later
/// deletes it.
#[derive(Debug, Deserialize)]
struct CreatedReaction {
    id: u64,
}

impl GithubHost {
    /// Creates a host over an authenticated octocrab client.
    pub fn new(crab: Octocrab, repo: RepoSlug) -> Self {
        Self { crab, repo }
    }
}

#[async_trait]
impl IssueHost for GithubHost {
    async fn fetch_issue(&self, number: IssueNumber) -> Result<Issue, HostError> {
        let issue = self
            .crab
            .issues(self.repo.owner(), self.repo.name())
            .get(number.get())
            .await
            .map_err(host_error)?;

        Ok(Issue {
            number: IssueNumber::new(issue.number),
            title: issue.title,
            body: issue.body,
        })
    }

    async fn list_comments(&self, number: IssueNumber) -> Result<Vec<IssueComment>, HostError> {
        let page = self
            .crab
            .issues(self.repo.owner(), self.repo.name())
            .list_comments(number.get())
            .per_page(100)
            .send()
            .await
            .map_err(host_error)?;
        let raw = self.crab.all_pages(page).await.map_err(host_error)?;

        let mut comments = Vec::with_capacity(raw.len());
        for comment in raw {
            // A comment whose author login is gone cannot be attributed in
            // the conversation prompt; skip it.
            let Some(author) = ActorLogin::new(comment.user.login) else {
                continue;
            };
            comments.push(IssueComment {
                id: CommentId::new(comment.id.0),
                author,
                body: comment.body,
                created_at: Timestamp::from_utc(comment.created_at),
            });
        }
        debug!(count = comments.len(), issue = %number, "comments fetched");
        Ok(comments)
    }

    async fn has_write_access(&self, actor: &ActorLogin) -> Result<bool, HostError> {
        let route = format!(
            "/repos/{}/{}/collaborators/{}/permission",
            self.repo.owner(),
            self.repo.name(),
            actor
        );
        match self
            .crab
            .get::<serde_json::Value, _, _>(route, None::<&()>)
            .await
        {
            Ok(response) => {
                let permission = response
                    .get("permission")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                Ok(matches!(permission, "admin" | "write"))
            }
            // 404 means "not a collaborator", which is an answer, not a failure.
            Err(err) if github_status(&err) == Some(404) => Ok(false),
            Err(err) => Err(host_error(err)),
        }
    }

    async fn add_reaction(
        &self,
        comment: CommentId,
        kind: ReactionKind,
    ) -> Result<ReactionId, HostError> {
        let route = format!(
            "/repos/{}/{}/issues/comments/{}/reactions",
            self.repo.owner(),
            self.repo.name(),
            comment
        );
        let created: CreatedReaction = self
            .crab
            .post(route, Some(&json!({ "content": kind.as_str() })))
            .await
            .map_err(host_error)?;
        debug!(comment = %comment, kind = %kind, "reaction added");
        Ok(ReactionId::new(created.id))
    }

    async fn remove_reaction(
        &self,
        comment: CommentId,
        reaction: ReactionId,
    ) -> Result<(), HostError> {
        let route = format!(
            "/repos/{}/{}/issues/comments/{}/reactions/{}",
            self.repo.owner(),
            self.repo.name(),
            comment,
            reaction
        );
        let response = self
            .crab
            ._delete(route, None::<&()>)
            .await
            .map_err(host_error)?;
        if !response.status().is_success() {
            return Err(HostError::Api {
                message: format!("removing reaction failed with status {}", response.status()),
            });
        }
        Ok(())
    }
}
