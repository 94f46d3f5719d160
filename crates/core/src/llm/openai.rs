use crate::config::Settings;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::{ChatCompletionClient, Provider};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const MODEL: &str = "gpt-4-turbo";
pub const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openai_api_key()?.to_string();
        let base_url = settings
            .openai_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // No timeout unless the operator asks for one.
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.openai_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn request_body(prompt: &str) -> ChatCompletionRequest<'_> {
        ChatCompletionRequest {
            model: MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            stream: false,
        }
    }

    async fn create_chat_completion(
        &self,
        req: &ChatCompletionRequest<'_>,
    ) -> anyhow::Result<(Value, ChatCompletionResponse)> {
        let res = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read OpenAI response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<Value>(&text).ok();
            let message = raw_response_json
                .as_ref()
                .and_then(|v| v["error"]["message"].as_str())
                .map(str::to_string)
                .unwrap_or_else(|| text.clone());
            return Err(LlmDiagnosticsError {
                provider: Provider::OpenAI,
                stage: "http",
                detail: format!("OpenAI HTTP {status}: {message}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("failed to parse OpenAI response JSON: {text}"))?;
        let parsed = serde_json::from_value::<ChatCompletionResponse>(raw_json.clone())
            .context("failed to decode OpenAI response into ChatCompletionResponse")?;
        Ok((raw_json, parsed))
    }

    fn response_text(raw_json: Value, res: ChatCompletionResponse) -> anyhow::Result<String> {
        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        content.ok_or_else(|| {
            LlmDiagnosticsError {
                provider: Provider::OpenAI,
                stage: "content",
                detail: "OpenAI response has no message content in choices[0]".to_string(),
                raw_output: None,
                raw_response_json: Some(raw_json),
            }
            .into()
        })
    }
}

#[async_trait::async_trait]
impl ChatCompletionClient for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let req = Self::request_body(prompt);
        let (raw_json, res) = self.create_chat_completion(&req).await?;
        Self::response_text(raw_json, res)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'static str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
