//! Hugging Face Inference API backend.

use serde_json::json;
use tracing::debug;

use summarizr::ModelError;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

pub(crate) struct HuggingFaceClient {
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
    client: reqwest::Client,
}

impl HuggingFaceClient {
    pub(crate) fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            api_key,
            model,
            max_tokens,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub(crate) async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let request = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.max_tokens,
                "return_full_text": false,
            },
        });

        debug!(model = %self.model, "requesting text generation");
        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                message: format!("{status}: {body}"),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        data[0]["generated_text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ModelError::MalformedResponse("no generated_text in response".to_string())
            })
    }
}
