pub mod error;
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
}

/// A chat-completion backend that answers a single user prompt with text.
#[async_trait::async_trait]
pub trait ChatCompletionClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Returns the reply content exactly as the backend produced it.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
