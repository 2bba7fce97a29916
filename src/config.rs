use anyhow::{Context, anyhow, bail};
use std::env;
use std::time::Duration;

use crate::answering::openrouter::DEFAULT_MODEL;

/// Which answering capability the process is wired to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    OpenRouter { api_key: String, model: String },
    Echo,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub append_suffix: bool,
    pub answer_timeout: Option<Duration>,
    pub backend: Backend,
}

// Keeps the API key out of startup logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.backend {
            Backend::OpenRouter { model, .. } => format!("openrouter({model})"),
            Backend::Echo => "echo".to_owned(),
        };
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("append_suffix", &self.append_suffix)
            .field("answer_timeout", &self.answer_timeout)
            .field("backend", &backend)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got {raw:?}"))?,
            None => 8080,
        };

        let append_suffix = match lookup("APPEND_SUFFIX") {
            Some(raw) => parse_bool("APPEND_SUFFIX", &raw)?,
            None => true,
        };

        let answer_timeout = match lookup("ANSWER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("ANSWER_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}")
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let backend = match lookup("ANSWER_BACKEND")
            .unwrap_or_else(|| "openrouter".to_owned())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "openrouter" => Backend::OpenRouter {
                api_key: lookup("OPENROUTER_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| anyhow!("OPENROUTER_API_KEY not set"))?,
                model: lookup("ANSWER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            },
            "echo" => Backend::Echo,
            other => bail!("ANSWER_BACKEND must be 'openrouter' or 'echo', got {other:?}"),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            append_suffix,
            answer_timeout,
            backend,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => bail!("{key} must be a boolean, got {raw:?}"),
    }
}
