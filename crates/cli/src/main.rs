//! Summarizr action entry point.
//!
//! This binary is the composition root for the entire system:
//!
//! 1. **Wire observability** — configure `tracing-subscriber` with an
//!    `EnvFilter`; all `tracing` events from every crate in the workspace
//!    flow through it, tagged with a fresh run id.
//! 2. **Parse configuration** — build the [`summarizr::Config`] from the
//!    action's `INPUT_*` environment and the [`summarizr::TriggerEvent`]
//!    from the workflow event payload.
//! 3. **Construct infrastructure** — create the octocrab client and the
//!    concrete adapters (`GithubHost`, `GithubKnowledgeStore`,
//!    `ModelSummarizer`) and inject them into the [`summarizr::Runner`].
//! 4. **Run once and exit** — every expected outcome exits zero; only an
//!    error propagating to this level marks the action run as failed.

mod context;

use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info, info_span, Instrument as _};
use tracing_subscriber::EnvFilter;

use github::{GithubHost, GithubKnowledgeStore};
use llm::ModelSummarizer;
use summarizr::{Config, RunId, Runner};

#[tokio::main]
async fn main() {
    init_tracing();

    let run_id = RunId::new_random();
    let outcome = run().instrument(info_span!("summarizr", run = %run_id)).await;

    if let Err(err) = outcome {
        error!("run failed: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Action inputs arrive as `INPUT_<NAME>` environment variables.
fn action_input(name: &str) -> Option<String> {
    std::env::var(format!("INPUT_{}", name.to_uppercase())).ok()
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_inputs(action_input)?;
    let event = context::trigger_event_from_env()?;
    info!(repo = %event.repository, issue = %event.issue, actor = %event.actor, "event decoded");

    let crab = octocrab::Octocrab::builder()
        .personal_token(config.access_token.clone())
        .build()
        .context("cannot construct the GitHub client")?;

    let host = Arc::new(GithubHost::new(crab.clone(), event.repository.clone()));
    let store = Arc::new(GithubKnowledgeStore::new(crab, event.repository.clone()));
    let summarizer = Arc::new(ModelSummarizer::from_config(&config.model));

    let outcome = Runner::new(host, summarizer, store).run(&event).await?;
    info!(outcome = ?outcome, "run complete");
    Ok(())
}
