use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which classifier backend labels comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    /// One hosted model that reports a label plus per-class confidences.
    Hosted,
    /// Several independently trained models combined by majority vote.
    Ensemble,
}

impl std::fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierMode::Hosted => write!(f, "hosted"),
            ClassifierMode::Ensemble => write!(f, "ensemble"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: String,
    pub google_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub classifier_mode: ClassifierMode,
    pub classifier_url: Option<String>,
    pub ensemble_model_urls: Vec<String>,
    pub classifier_concurrency: usize,
    pub max_comments: usize,
    pub summary_top_comments: usize,
    pub request_timeout_secs: u64,
    pub analyze_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("classifier_mode", &self.classifier_mode)
            .field("classifier_url", &self.classifier_url)
            .field("ensemble_model_urls", &self.ensemble_model_urls)
            .field("classifier_concurrency", &self.classifier_concurrency)
            .field("max_comments", &self.max_comments)
            .field("summary_top_comments", &self.summary_top_comments)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("analyze_timeout_secs", &self.analyze_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
