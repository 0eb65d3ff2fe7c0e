//! The run orchestrator.
//!
//! One [`Runner::run`] call performs the whole sequence for a triggering
//! event: anchor lookup, permission gate, progress reaction, inline
//! extraction or model fallback, knowledge persistence, and the final
//! reaction swap. All side effects are external (reactions, repository file
//! writes); no state survives the invocation.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    extract, IssueHost, KnowledgeRecord, KnowledgeStore, ReactionKind, RunOutcome, Summarizer,
    SummarizrError, TriggerEvent,
};

/// Sequences one invocation against the injected ports.
pub struct Runner {
    host: Arc<dyn IssueHost>,
    summarizer: Arc<dyn Summarizer>,
    store: Arc<dyn KnowledgeStore>,
}

impl Runner {
    /// Creates a runner over the given port implementations.
    pub fn new(
        host: Arc<dyn IssueHost>,
        summarizer: Arc<dyn Summarizer>,
        store: Arc<dyn KnowledgeStore>,
    ) -> Self {
        Self {
            host,
            summarizer,
            store,
        }
    }

    /// Runs the full sequence for `event`.
    ///
    /// The expected negative paths (no trigger comment, no write access, no
    /// inline summary) all return `Ok`; an `Err` means the run failed and
    /// already-emitted reactions stay as they are.
    #[instrument(skip_all, fields(repo = %event.repository, issue = %event.issue, actor = %event.actor))]
    pub async fn run(&self, event: &TriggerEvent) -> Result<RunOutcome, SummarizrError> {
        let comments = self.host.list_comments(event.issue).await?;

        let Some(anchor) = extract::find_anchor(&comments) else {
            info!("no trigger comment in thread, nothing to do");
            return Ok(RunOutcome::NoTrigger);
        };
        debug!(comment = %anchor.id, "anchor comment located");

        if !self.host.has_write_access(&event.actor).await? {
            info!("actor lacks write access, aborting silently");
            return Ok(RunOutcome::AccessDenied);
        }

        let progress = self
            .host
            .add_reaction(anchor.id, ReactionKind::Eyes)
            .await?;
        let issue = self.host.fetch_issue(event.issue).await?;

        match extract::extract_summary(anchor.text()) {
            Some(summary) => {
                let record = KnowledgeRecord {
                    issue: issue.number,
                    title: issue.title.clone(),
                    problem: summary.problem,
                    solution: summary.solution,
                };
                self.store.append(&record).await?;
                info!(issue = %record.issue, "inline summary appended to knowledge file");

                tokio::try_join!(
                    self.host.add_reaction(anchor.id, ReactionKind::ThumbsUp),
                    self.host.remove_reaction(anchor.id, progress),
                )?;
                Ok(RunOutcome::Recorded)
            }
            None => {
                // The conversation prompt carries the whole thread; fall back
                // to the body prompt when the anchor is the only comment.
                let summary = if comments.len() > 1 {
                    self.summarizer.summarize_issue(&issue, &comments).await?
                } else {
                    self.summarizer.summarize_issue_body(&issue).await?
                };
                info!(summary = %summary, "model summary generated (not persisted)");

                tokio::try_join!(
                    self.host.add_reaction(anchor.id, ReactionKind::ThumbsDown),
                    self.host.remove_reaction(anchor.id, progress),
                )?;
                Ok(RunOutcome::ModelFallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ActorLogin, CommentId, HostError, Issue, IssueComment, IssueNumber, KnowledgeSnapshot,
        ModelError, ReactionId, RepoSlug, StoreError, Timestamp,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct FakeHost {
        issue: Issue,
        comments: Vec<IssueComment>,
        write_access: bool,
        added: Mutex<Vec<(CommentId, ReactionKind, ReactionId)>>,
        removed: Mutex<Vec<(CommentId, ReactionId)>>,
        next_reaction: AtomicU64,
    }

    impl FakeHost {
        fn new(issue: Issue, comments: Vec<IssueComment>, write_access: bool) -> Self {
            Self {
                issue,
                comments,
                write_access,
                added: Mutex::new(Vec::new()),
                removed: Mutex::new(Vec::new()),
                next_reaction: AtomicU64::new(100),
            }
        }

        fn added_kinds(&self) -> Vec<ReactionKind> {
            self.added.lock().unwrap().iter().map(|(_, k, _)| *k).collect()
        }
    }

    #[async_trait]
    impl IssueHost for FakeHost {
        async fn fetch_issue(&self, _number: IssueNumber) -> Result<Issue, HostError> {
            Ok(self.issue.clone())
        }

        async fn list_comments(
            &self,
            _number: IssueNumber,
        ) -> Result<Vec<IssueComment>, HostError> {
            Ok(self.comments.clone())
        }

        async fn has_write_access(&self, _actor: &ActorLogin) -> Result<bool, HostError> {
            Ok(self.write_access)
        }

        async fn add_reaction(
            &self,
            comment: CommentId,
            kind: ReactionKind,
        ) -> Result<ReactionId, HostError> {
            let id = ReactionId::new(self.next_reaction.fetch_add(1, Ordering::SeqCst));
            self.added.lock().unwrap().push((comment, kind, id));
            Ok(id)
        }

        async fn remove_reaction(
            &self,
            comment: CommentId,
            reaction: ReactionId,
        ) -> Result<(), HostError> {
            self.removed.lock().unwrap().push((comment, reaction));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeSummarizer {
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize_issue(
            &self,
            _issue: &Issue,
            _comments: &[IssueComment],
        ) -> Result<String, ModelError> {
            self.calls.lock().unwrap().push("conversation");
            Ok("Problem:\ngenerated\nSolution:\ngenerated".to_string())
        }

        async fn summarize_issue_body(&self, _issue: &Issue) -> Result<String, ModelError> {
            self.calls.lock().unwrap().push("body");
            Ok("Problem:\ngenerated\nSolution:\ngenerated".to_string())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        appended: Mutex<Vec<KnowledgeRecord>>,
        conflict: bool,
    }

    #[async_trait]
    impl KnowledgeStore for FakeStore {
        async fn read(&self) -> Result<KnowledgeSnapshot, StoreError> {
            Ok(KnowledgeSnapshot::Absent)
        }

        async fn append(&self, record: &KnowledgeRecord) -> Result<(), StoreError> {
            if self.conflict {
                return Err(StoreError::Conflict);
            }
            self.appended.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn issue() -> Issue {
        Issue {
            number: IssueNumber::new(42),
            title: "Login broken".to_string(),
            body: Some("Cannot sign in.".to_string()),
        }
    }

    fn comment(id: u64, minute: u32, body: &str) -> IssueComment {
        IssueComment {
            id: CommentId::new(id),
            author: ActorLogin::new("octocat").unwrap(),
            body: Some(body.to_string()),
            created_at: Timestamp::from_utc(
                Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
            ),
        }
    }

    fn event() -> TriggerEvent {
        TriggerEvent {
            repository: RepoSlug::parse("octocat/hello-world").unwrap(),
            issue: IssueNumber::new(42),
            actor: ActorLogin::new("octocat").unwrap(),
        }
    }

    fn runner(
        host: Arc<FakeHost>,
        summarizer: Arc<FakeSummarizer>,
        store: Arc<FakeStore>,
    ) -> Runner {
        Runner::new(host, summarizer, store)
    }

    const INLINE_BODY: &str = "/summarizr\n\nProblem:\n\nLogin fails on Safari.\n\nSolution:\n\nFixed cookie SameSite attribute.";

    #[tokio::test]
    async fn inline_summary_is_recorded_with_issue_fields() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![comment(1, 0, INLINE_BODY)],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        let outcome = runner(host.clone(), summarizer.clone(), store.clone())
            .run(&event())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Recorded);
        let appended = store.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].issue, IssueNumber::new(42));
        assert_eq!(appended[0].title, "Login broken");
        assert_eq!(appended[0].problem, "Login fails on Safari.");
        assert_eq!(appended[0].solution, "Fixed cookie SameSite attribute.");

        // Eyes first, then the success marker; eyes removed at the end.
        assert_eq!(
            host.added_kinds(),
            vec![ReactionKind::Eyes, ReactionKind::ThumbsUp]
        );
        let eyes_id = host.added.lock().unwrap()[0].2;
        assert_eq!(*host.removed.lock().unwrap(), vec![(CommentId::new(1), eyes_id)]);
        // The model is never consulted on the inline path.
        assert!(summarizer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparseable_anchor_takes_model_path_without_store_write() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![comment(1, 0, "/summarizr please help")],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        let outcome = runner(host.clone(), summarizer.clone(), store.clone())
            .run(&event())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::ModelFallback);
        assert!(store.appended.lock().unwrap().is_empty());
        assert_eq!(
            host.added_kinds(),
            vec![ReactionKind::Eyes, ReactionKind::ThumbsDown]
        );
        assert_eq!(host.removed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn anchor_only_thread_uses_the_body_prompt() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![comment(1, 0, "/summarizr")],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        runner(host, summarizer.clone(), store).run(&event()).await.unwrap();
        assert_eq!(*summarizer.calls.lock().unwrap(), vec!["body"]);
    }

    #[tokio::test]
    async fn longer_thread_uses_the_conversation_prompt() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![
                comment(1, 0, "I hit this too"),
                comment(2, 3, "/summarizr"),
            ],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        runner(host, summarizer.clone(), store).run(&event()).await.unwrap();
        assert_eq!(*summarizer.calls.lock().unwrap(), vec!["conversation"]);
    }

    #[tokio::test]
    async fn missing_trigger_aborts_without_side_effects() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![comment(1, 0, "just chatting")],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        let outcome = runner(host.clone(), summarizer, store.clone())
            .run(&event())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::NoTrigger);
        assert!(host.added.lock().unwrap().is_empty());
        assert!(store.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn denied_write_access_aborts_without_side_effects() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![comment(1, 0, INLINE_BODY)],
            false,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        let outcome = runner(host.clone(), summarizer, store.clone())
            .run(&event())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::AccessDenied);
        assert!(host.added.lock().unwrap().is_empty());
        assert!(store.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_conflict_fails_the_run_and_skips_the_success_marker() {
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![comment(1, 0, INLINE_BODY)],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore {
            conflict: true,
            ..FakeStore::default()
        });

        let err = runner(host.clone(), summarizer, store)
            .run(&event())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SummarizrError::Store(StoreError::Conflict)
        ));
        // Eyes was emitted before the failure and is left in place.
        assert_eq!(host.added_kinds(), vec![ReactionKind::Eyes]);
        assert!(host.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn anchor_is_most_recent_trigger() {
        // Two trigger comments: the newer one carries the inline block.
        let host = Arc::new(FakeHost::new(
            issue(),
            vec![
                comment(1, 0, "/summarizr please help"),
                comment(2, 5, INLINE_BODY),
            ],
            true,
        ));
        let summarizer = Arc::new(FakeSummarizer::default());
        let store = Arc::new(FakeStore::default());

        let outcome = runner(host.clone(), summarizer, store.clone())
            .run(&event())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Recorded);
        assert_eq!(host.added.lock().unwrap()[0].0, CommentId::new(2));
    }
}
