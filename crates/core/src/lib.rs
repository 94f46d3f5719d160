pub mod classify;
pub mod domain;
pub mod llm;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub openai_api_key: Option<String>,
        pub openai_base_url: Option<String>,
        pub openai_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let openai_timeout_secs = match std::env::var("OPENAI_TIMEOUT_SECS") {
                Ok(s) => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("OPENAI_TIMEOUT_SECS is not a number: {s}"))?,
                ),
                Err(_) => None,
            };

            Ok(Self {
                openai_api_key: non_empty_var("OPENAI_API_KEY"),
                openai_base_url: non_empty_var("OPENAI_BASE_URL"),
                openai_timeout_secs,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
            self.openai_api_key.as_deref().context(
                "Missing OpenAI API Key. Ensure OPENAI_API_KEY is set as an environment variable.",
            )
        }
    }

    fn non_empty_var(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

}
