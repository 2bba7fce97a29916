pub mod echo;
pub mod openrouter;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

pub use echo::EchoAnswerer;
pub use openrouter::OpenRouterAnswerer;

/// Something that maps question text to an answer.
///
/// Implementations are not assumed to tolerate overlapping calls; the gateway
/// always goes through [`SerializedAnswerer`].
#[async_trait]
pub trait AnsweringCapability: Send + Sync {
    async fn ask(&self, text: &str) -> anyhow::Result<String>;
}

#[derive(Debug)]
pub enum AnswerError {
    Failed(anyhow::Error),
    TimedOut(Duration),
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "answering capability failed: {err:#}"),
            Self::TimedOut(limit) => {
                write!(f, "answering capability did not respond within {limit:?}")
            }
        }
    }
}

impl std::error::Error for AnswerError {}

/// Single shared capability handle; calls into it run strictly one at a time
/// in arrival order.
///
/// Each call runs on its own task, so a caller that goes away (client
/// disconnect) does not abort a delegation already in progress.
pub struct SerializedAnswerer {
    capability: Arc<Mutex<Arc<dyn AnsweringCapability>>>,
    call_timeout: Option<Duration>,
}

impl SerializedAnswerer {
    pub fn new(capability: Arc<dyn AnsweringCapability>, call_timeout: Option<Duration>) -> Self {
        Self {
            capability: Arc::new(Mutex::new(capability)),
            call_timeout,
        }
    }

    pub async fn ask(&self, text: &str) -> Result<String, AnswerError> {
        let slot = self.capability.clone();
        let call_timeout = self.call_timeout;
        let text = text.to_owned();

        let call = tokio::spawn(async move {
            // Held until the call finishes, fails or times out.
            let capability = slot.lock_owned().await;
            debug!("Acquired answering capability");

            match call_timeout {
                Some(limit) => match timeout(limit, capability.ask(&text)).await {
                    Ok(result) => result.map_err(AnswerError::Failed),
                    Err(_) => {
                        warn!("Answering capability timed out after {:?}", limit);
                        Err(AnswerError::TimedOut(limit))
                    }
                },
                None => capability.ask(&text).await.map_err(AnswerError::Failed),
            }
        });

        call.await.map_err(|e| {
            AnswerError::Failed(anyhow::anyhow!("answering task did not complete: {e}"))
        })?
    }
}
