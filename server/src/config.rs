use std::time::Duration;

use serde::Deserialize;

use crate::github::DEFAULT_API_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Env {
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
    /// Used when a request carries no bearer token of its own.
    pub github_token: Option<String>,
    pub fetch_timeout_in_seconds: Option<u64>,
    /// Comma separated. Every origin is allowed when unset.
    pub cors_allowed_origins: Option<String>,
}

fn default_github_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Env {
    fn default() -> Self {
        Self {
            github_api_url: default_github_api_url(),
            github_token: None,
            fetch_timeout_in_seconds: None,
            cors_allowed_origins: None,
        }
    }
}

impl Env {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_in_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allowed_origins
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(ToString::to_string)
            .collect();
        if origins.is_empty() {
            None
        } else {
            Some(origins)
        }
    }

    pub fn fallback_token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Env {
        envy::from_iter(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn defaults() {
        let env = from_pairs(&[]);

        assert_eq!(env.github_api_url, "https://api.github.com");
        assert_eq!(env.fallback_token(), None);
        assert_eq!(env.fetch_timeout(), None);
        assert_eq!(env.allowed_origins(), None);
    }

    #[test]
    fn reads_variables() {
        let env = from_pairs(&[
            ("GITHUB_API_URL", "http://localhost:9000"),
            ("GITHUB_TOKEN", " ghp_secret "),
            ("FETCH_TIMEOUT_IN_SECONDS", "30"),
            ("CORS_ALLOWED_ORIGINS", "https://a.dev, https://b.dev,"),
        ]);

        assert_eq!(env.github_api_url, "http://localhost:9000");
        assert_eq!(env.fallback_token(), Some("ghp_secret"));
        assert_eq!(env.fetch_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            env.allowed_origins(),
            Some(vec!["https://a.dev".to_string(), "https://b.dev".to_string()])
        );
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        let env = from_pairs(&[("FETCH_TIMEOUT_IN_SECONDS", "0")]);

        assert_eq!(env.fetch_timeout(), None);
    }
}
