//! Run configuration.
//!
//! The composition root parses the action's named inputs exactly once into a
//! [`Config`] value and injects it into the components that need it. Nothing
//! else in the workspace reads ambient input state.
//!
//! Provider selection is a closed enumeration: an unsupported
//! `model_provider` value is rejected here, before any network client is
//! constructed.

use crate::SummarizrError;

/// Names of the action inputs, as supplied by the workflow.
pub const INPUT_ACCESS_TOKEN: &str = "access_token";
pub const INPUT_API_KEY: &str = "api_key";
pub const INPUT_MODEL_PROVIDER: &str = "model_provider";
pub const INPUT_MODEL_NAME: &str = "model_name";
pub const INPUT_MAX_TOKENS: &str = "max_tokens";

/// Complete configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Token used for every hosting-platform call (issue reads, reactions,
    /// knowledge-file writes).
    pub access_token: String,
    /// Selected model backend and its settings.
    pub model: ModelConfig,
}

/// Model backend selection, one variant per supported provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelConfig {
    /// OpenAI chat-completions backend.
    OpenAi {
        /// Provider API key.
        api_key: String,
        /// Model name, e.g. `"gpt-4o-mini"`.
        model: String,
        /// Maximum completion tokens requested per call.
        max_tokens: u32,
    },
    /// Hugging Face Inference API backend.
    HuggingFace {
        /// Provider API key.
        api_key: String,
        /// Model repository id, e.g. `"google/flan-t5-xxl"`.
        model: String,
        /// Maximum generated tokens requested per call.
        max_tokens: u32,
    },
}

impl Config {
    /// Builds a [`Config`] from a named-input lookup.
    ///
    /// `lookup` receives the input name and returns its raw value, if any;
    /// the binary passes an environment-variable lookup, tests pass a map.
    /// Missing or empty required inputs, a non-numeric `max_tokens`, and an
    /// unsupported provider all fail here.
    pub fn from_inputs<F>(lookup: F) -> Result<Self, SummarizrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = required(&lookup, INPUT_ACCESS_TOKEN)?;
        let api_key = required(&lookup, INPUT_API_KEY)?;
        let provider = required(&lookup, INPUT_MODEL_PROVIDER)?;
        let model = required(&lookup, INPUT_MODEL_NAME)?;
        let max_tokens = required(&lookup, INPUT_MAX_TOKENS)?;
        let max_tokens: u32 = max_tokens.trim().parse().map_err(|_| {
            SummarizrError::config(format!(
                "input `{INPUT_MAX_TOKENS}` must be a positive integer, got `{max_tokens}`"
            ))
        })?;

        let model = match provider.as_str() {
            "openai" => ModelConfig::OpenAi {
                api_key,
                model,
                max_tokens,
            },
            "huggingface" => ModelConfig::HuggingFace {
                api_key,
                model,
                max_tokens,
            },
            other => {
                return Err(SummarizrError::config(format!(
                    "unsupported model provider `{other}` (expected `openai` or `huggingface`)"
                )))
            }
        };

        Ok(Config {
            access_token,
            model,
        })
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, SummarizrError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SummarizrError::config(format!("missing input `{name}`"))),
    }
}
