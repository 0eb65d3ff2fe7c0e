//! Summarizr model-provider infrastructure adapter.
//!
//! Implements the [`summarizr::Summarizer`] trait over the backend selected
//! in [`summarizr::ModelConfig`]. Additional providers are added as new
//! backend modules and enum variants in this crate without any changes to
//! the domain crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, and response
//! parsing live here. The [`summarizr`] crate sees only the `Summarizer`
//! trait; prompt content comes from [`summarizr::prompt`].

mod huggingface;
mod openai;

use async_trait::async_trait;

use summarizr::{prompt, Issue, IssueComment, ModelConfig, ModelError, Summarizer};

use huggingface::HuggingFaceClient;
use openai::OpenAiClient;

/// The closed set of provider backends.
enum Backend {
    OpenAi(OpenAiClient),
    HuggingFace(HuggingFaceClient),
}

/// [`Summarizer`] implementation dispatching to the configured backend.
///
/// One completion call per summarisation; no streaming, no retries, and no
/// validation of the returned text's shape.
pub struct ModelSummarizer {
    backend: Backend,
}

impl ModelSummarizer {
    /// Builds the summariser for the provider named in the configuration.
    pub fn from_config(config: &ModelConfig) -> Self {
        let backend = match config {
            ModelConfig::OpenAi {
                api_key,
                model,
                max_tokens,
            } => Backend::OpenAi(OpenAiClient::new(
                api_key.clone(),
                model.clone(),
                *max_tokens,
            )),
            ModelConfig::HuggingFace {
                api_key,
                model,
                max_tokens,
            } => Backend::HuggingFace(HuggingFaceClient::new(
                api_key.clone(),
                model.clone(),
                *max_tokens,
            )),
        };
        Self { backend }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        match &self.backend {
            Backend::OpenAi(client) => client.complete(prompt).await,
            Backend::HuggingFace(client) => client.complete(prompt).await,
        }
    }
}

#[async_trait]
impl Summarizer for ModelSummarizer {
    async fn summarize_issue(
        &self,
        issue: &Issue,
        comments: &[IssueComment],
    ) -> Result<String, ModelError> {
        self.complete(&prompt::conversation_prompt(issue, comments))
            .await
    }

    async fn summarize_issue_body(&self, issue: &Issue) -> Result<String, ModelError> {
        self.complete(&prompt::body_prompt(issue)).await
    }
}
