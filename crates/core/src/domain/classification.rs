use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub ticker: String,
    pub filing_date: String,
}

impl ClassificationRequest {
    pub fn new(ticker: impl Into<String>, filing_date: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            filing_date: filing_date.into(),
        }
    }

    /// Ticker and date are passed through as given; neither is validated.
    pub fn prompt(&self) -> String {
        format!(
            "Classify the 10-K filing for {} on {} based on thematic categories.",
            self.ticker, self.filing_date
        )
    }
}

/// Body of `POST /classify`. Failures carry only `error` and are still sent
/// with a success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResponse {
    Classified {
        ticker: String,
        filing_date: String,
        classification: String,
    },
    Failed {
        error: String,
    },
}

impl ClassificationResponse {
    pub fn classified(request: ClassificationRequest, classification: String) -> Self {
        Self::Classified {
            ticker: request.ticker,
            filing_date: request.filing_date,
            classification,
        }
    }

    pub fn failed(err: &anyhow::Error) -> Self {
        Self::Failed {
            error: format!("{err:#}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Classified { .. })
    }
}
