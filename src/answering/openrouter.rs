use async_trait::async_trait;
use rig::{agent::Agent, completion::Prompt, providers::openrouter};
use tracing::{debug, info};

use super::AnsweringCapability;

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Answers questions through an OpenRouter-hosted chat model.
/// Built once at startup and shared for the process lifetime.
pub struct OpenRouterAnswerer {
    agent: Agent<openrouter::CompletionModel>,
    model: String,
}

impl OpenRouterAnswerer {
    pub fn new(api_key: &str, model: &str) -> Self {
        info!("Creating OpenRouter agent for model {}", model);
        let client = openrouter::Client::new(api_key);
        let agent = client.agent(model).build();
        Self {
            agent,
            model: model.to_owned(),
        }
    }
}

#[async_trait]
impl AnsweringCapability for OpenRouterAnswerer {
    async fn ask(&self, text: &str) -> anyhow::Result<String> {
        debug!("Prompting {} ({} chars)", self.model, text.len());
        let response = self.agent.prompt(text.to_owned()).await?;
        Ok(response)
    }
}
