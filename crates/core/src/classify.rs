use crate::domain::classification::{ClassificationRequest, ClassificationResponse};
use crate::llm::ChatCompletionClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct Classifier {
    llm: Arc<dyn ChatCompletionClient>,
}

impl Classifier {
    pub fn new(llm: Arc<dyn ChatCompletionClient>) -> Self {
        Self { llm }
    }

    /// Sends the filing prompt and returns the trimmed reply. No retries.
    pub async fn classify(&self, request: &ClassificationRequest) -> anyhow::Result<String> {
        let prompt = request.prompt();
        let reply = self.llm.complete(&prompt).await?;
        Ok(reply.trim().to_string())
    }

    /// Like [`Classifier::classify`] but folds failures into the response body.
    pub async fn respond(&self, request: ClassificationRequest) -> ClassificationResponse {
        match self.classify(&request).await {
            Ok(classification) => {
                tracing::info!(
                    ticker = %request.ticker,
                    filing_date = %request.filing_date,
                    provider = ?self.llm.provider(),
                    "classification completed"
                );
                ClassificationResponse::classified(request, classification)
            }
            Err(err) => {
                tracing::error!(
                    ticker = %request.ticker,
                    filing_date = %request.filing_date,
                    error = %format!("{err:#}"),
                    "classification failed"
                );
                ClassificationResponse::failed(&err)
            }
        }
    }
}
