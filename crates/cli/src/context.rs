//! Trigger-event decoding from the workflow environment.
//!
//! A workflow run supplies the repository slug in `GITHUB_REPOSITORY`, the
//! triggering user in the event payload (with `GITHUB_ACTOR` as fallback),
//! and the payload itself as a JSON file at `GITHUB_EVENT_PATH`.

use std::fs;

use anyhow::{anyhow, Context as _};
use serde_json::Value;

use summarizr::{ActorLogin, IssueNumber, RepoSlug, TriggerEvent};

/// Reads the trigger event from the process environment.
pub(crate) fn trigger_event_from_env() -> anyhow::Result<TriggerEvent> {
    let repository = std::env::var("GITHUB_REPOSITORY")
        .context("GITHUB_REPOSITORY is not set")?;
    let payload_path =
        std::env::var("GITHUB_EVENT_PATH").context("GITHUB_EVENT_PATH is not set")?;
    let payload_text = fs::read_to_string(&payload_path)
        .with_context(|| format!("cannot read event payload at {payload_path}"))?;
    let payload: Value = serde_json::from_str(&payload_text)
        .with_context(|| format!("event payload at {payload_path} is not JSON"))?;

    assemble(&repository, &payload, std::env::var("GITHUB_ACTOR").ok())
}

/// Builds the [`TriggerEvent`] from the raw pieces.
///
/// Kept separate from the environment reads so the decoding rules are
/// testable without process-global state.
fn assemble(
    repository: &str,
    payload: &Value,
    actor_fallback: Option<String>,
) -> anyhow::Result<TriggerEvent> {
    let repository = RepoSlug::parse(repository)
        .ok_or_else(|| anyhow!("GITHUB_REPOSITORY is not in owner/name form: {repository}"))?;

    let issue = payload
        .get("issue")
        .and_then(|issue| issue.get("number"))
        .and_then(Value::as_u64)
        .ok_or_else(|| anyhow!("event payload carries no issue number"))?;

    let actor = payload
        .get("sender")
        .and_then(|sender| sender.get("login"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or(actor_fallback)
        .and_then(ActorLogin::new)
        .ok_or_else(|| anyhow!("event payload carries no sender login"))?;

    Ok(TriggerEvent {
        repository,
        issue: IssueNumber::new(issue),
        actor,
    })
}
