use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The AI provider keys are optional: when neither is present the service
/// still runs and generation falls back to the static template, matching
/// the degraded-but-alive behavior of the rest of the stack.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub client_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-pro".to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            client_url: optional_env("CLIENT_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Returns `None` for unset, empty, or placeholder values so a leftover
/// `GEMINI_API_KEY=YOUR_NEW_API_KEY_HERE` does not enable the provider.
fn optional_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() && !v.starts_with("YOUR_") => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_rejects_placeholder() {
        std::env::set_var("PATHFLOW_TEST_KEY_A", "YOUR_NEW_API_KEY_HERE");
        assert_eq!(optional_env("PATHFLOW_TEST_KEY_A"), None);
    }

    #[test]
    fn test_optional_env_rejects_empty() {
        std::env::set_var("PATHFLOW_TEST_KEY_B", "   ");
        assert_eq!(optional_env("PATHFLOW_TEST_KEY_B"), None);
    }

    #[test]
    fn test_optional_env_accepts_real_value() {
        std::env::set_var("PATHFLOW_TEST_KEY_C", "abc123");
        assert_eq!(optional_env("PATHFLOW_TEST_KEY_C"), Some("abc123".into()));
    }
}
