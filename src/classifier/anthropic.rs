use std::{env, time::Duration};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::Config,
    document::DocumentRecord,
    errors::{ClassificationError, InputError},
    extract::truncate_chars,
};

use super::{build_prompt, parse_classification, Classifier};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Classifies documents with a single blocking call to the Anthropic
/// messages API. Built once at startup and handed to the processor.
pub struct AnthropicClassifier {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    text_limit: usize,
    organization: Option<String>,
}

impl std::fmt::Debug for AnthropicClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClassifier")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl AnthropicClassifier {
    /// Reads the API key from the environment variable named in `config`.
    pub fn from_env(config: &Config) -> Result<Self, InputError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                InputError::ClassifierUnavailable(format!(
                    "{} environment variable is not set",
                    config.api_key_env
                ))
            })?;
        Self::new(config, api_key)
    }

    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self, InputError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| InputError::ClassifierUnavailable(err.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            text_limit: config.text_limit,
            organization: config.organization.clone(),
        })
    }

    fn request(&self, text: &str) -> Result<String, ClassificationError> {
        let prompt = build_prompt(
            truncate_chars(text, self.text_limit),
            self.organization.as_deref(),
        );
        let body = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .map_err(|err| ClassificationError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| ClassificationError::Transport(err.to_string()))?;
        reply_text(status, &body)
    }
}

/// Pulls the model's text out of a messages API response body.
fn reply_text(status: u16, body: &str) -> Result<String, ClassificationError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiError>(body)
            .map(|api| api.error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(ClassificationError::Api { status, message });
    }

    let parsed: ApiResponse = serde_json::from_str(body)?;
    let text: String = parsed
        .content
        .into_iter()
        .filter(|block| block.content_type == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(ClassificationError::EmptyResponse);
    }
    Ok(text)
}

/// Turns a reply (or the failure to get one) into a record. Every error
/// becomes [`DocumentRecord::Unknown`].
fn interpret(reply: Result<String, ClassificationError>) -> DocumentRecord {
    let outcome = reply.and_then(|reply| {
        debug!(reply = %reply, "classifier reply");
        parse_classification(&reply)
    });
    match outcome {
        Ok(record) => record,
        Err(err) => {
            warn!(error = %err, "classification failed, treating document as unknown");
            DocumentRecord::unknown()
        }
    }
}

impl Classifier for AnthropicClassifier {
    fn classify(&self, text: &str) -> DocumentRecord {
        interpret(self.request(text))
    }
}
