use async_trait::async_trait;

use super::AnsweringCapability;

/// Answers every question with the question itself. Handy for running the
/// gateway without network access.
#[derive(Debug, Clone, Default)]
pub struct EchoAnswerer;

#[async_trait]
impl AnsweringCapability for EchoAnswerer {
    async fn ask(&self, text: &str) -> anyhow::Result<String> {
        Ok(text.to_owned())
    }
}
