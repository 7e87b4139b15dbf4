use crate::app_config::{AppConfig, ClassifierMode, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are optional here: a missing `YOUTUBE_API_KEY` or
/// `GOOGLE_API_KEY` leaves the matching component unconfigured, and the
/// pipeline refuses to run until it is supplied.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `KEY=` in a `.env` file does not
    // masquerade as a credential.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("YTSA_ENV", "development"))?;

    let bind_addr = or_default("YTSA_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("YTSA_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("YTSA_LOG_LEVEL", "info");

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let youtube_base_url = or_default(
        "YTSA_YOUTUBE_BASE_URL",
        "https://www.googleapis.com/youtube/v3/",
    );

    let google_api_key = optional("GOOGLE_API_KEY");
    let gemini_base_url = or_default(
        "YTSA_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com/",
    );
    let gemini_model = or_default("YTSA_GEMINI_MODEL", "gemini-1.5-flash-latest");

    let classifier_mode = parse_classifier_mode(&or_default("YTSA_CLASSIFIER_MODE", "hosted"))?;
    let classifier_url = optional("YTSA_CLASSIFIER_URL");
    let ensemble_model_urls = optional("YTSA_ENSEMBLE_MODEL_URLS")
        .map(|raw| parse_url_list(&raw))
        .unwrap_or_default();

    let classifier_concurrency = parse_positive_usize("YTSA_CLASSIFIER_CONCURRENCY", "8")?;
    let max_comments = parse_positive_usize("YTSA_MAX_COMMENTS", "30")?;
    let summary_top_comments = parse_positive_usize("YTSA_SUMMARY_TOP_COMMENTS", "30")?;
    let request_timeout_secs = parse_positive_u64("YTSA_REQUEST_TIMEOUT_SECS", "30")?;
    let analyze_timeout_secs = parse_positive_u64("YTSA_ANALYZE_TIMEOUT_SECS", "120")?;
    let user_agent = or_default("YTSA_USER_AGENT", "ytsa/0.1 (comment-analysis)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        youtube_base_url,
        google_api_key,
        gemini_base_url,
        gemini_model,
        classifier_mode,
        classifier_url,
        ensemble_model_urls,
        classifier_concurrency,
        max_comments,
        summary_top_comments,
        request_timeout_secs,
        analyze_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "YTSA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_classifier_mode(s: &str) -> Result<ClassifierMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "hosted" => Ok(ClassifierMode::Hosted),
        "ensemble" => Ok(ClassifierMode::Ensemble),
        other => Err(ConfigError::InvalidEnvVar {
            var: "YTSA_CLASSIFIER_MODE".to_string(),
            reason: format!("expected 'hosted' or 'ensemble', got '{other}'"),
        }),
    }
}

fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
