use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::julep::{ChatMessage, ChatResponse};
use crate::models::ResearchResponse;

/// Operations the research flow needs from the agent platform.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Create a session bound to the research agent, creating the agent
    /// first if it does not exist yet. Returns the session id.
    async fn create_session(&self, situation: &str) -> anyhow::Result<String>;

    /// Send messages to a session and return the raw platform response.
    async fn chat(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<ChatResponse>;
}

/// Failure kinds of the research flow. Each maps to one HTTP status in the
/// endpoint layer.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Session could not be established with the agent platform.
    #[error("Agent session error: {0}")]
    AgentSession(String),
    /// The chat call failed or its response was malformed.
    #[error("Research response error: {0}")]
    Response(String),
    /// Anything else unexpected during orchestration.
    #[error("Research error: {0}")]
    Other(String),
}

/// Drives one research request through the agent platform: open a session,
/// send the prompt, validate the response shape.
#[derive(Clone)]
pub struct ResearchService {
    agent: Arc<dyn AgentApi>,
}

impl ResearchService {
    pub fn new(agent: Arc<dyn AgentApi>) -> Self {
        Self { agent }
    }

    /// Research `topic` and return the result formatted per `output_format`.
    ///
    /// All-or-nothing: no retries, no partial results. Errors are wrapped
    /// exactly once — typed errors from the flow pass through unchanged and
    /// anything else becomes [`ResearchError::Other`].
    pub async fn perform_research(
        &self,
        topic: &str,
        output_format: &str,
    ) -> Result<ResearchResponse, ResearchError> {
        info!("Starting research on topic: '{topic}' in format: '{output_format}'");

        self.research_flow(topic, output_format)
            .await
            .map_err(|e| match e.downcast::<ResearchError>() {
                Ok(known) => known,
                Err(unexpected) => {
                    let msg = format!("Unexpected error in research process: {unexpected}");
                    error!("{msg}");
                    ResearchError::Other(msg)
                }
            })
    }

    async fn research_flow(
        &self,
        topic: &str,
        output_format: &str,
    ) -> anyhow::Result<ResearchResponse> {
        let situation = format!(
            "User wants to research about '{topic}' and receive \
             results in '{output_format}' format."
        );

        let session_id = self
            .agent
            .create_session(&situation)
            .await
            .map_err(|e| {
                let msg = format!("Failed to create research session: {e}");
                error!("{msg}");
                ResearchError::AgentSession(msg)
            })?;
        info!("Created research session with ID: {session_id}");

        let prompt = format!(
            "Please research the topic '{topic}' and provide the \
             information in '{output_format}' format."
        );

        let response = self
            .agent
            .chat(&session_id, vec![ChatMessage::user(prompt)])
            .await
            .map_err(|e| {
                let msg = format!("Failed to get research response: {e}");
                error!("{msg}");
                ResearchError::Response(msg)
            })?;
        info!("Successfully received research response");

        let result = extract_content(&response)?;
        info!("Research completed successfully for topic: '{topic}'");

        Ok(ResearchResponse {
            topic: topic.to_string(),
            format: output_format.to_string(),
            result,
        })
    }
}

/// Validate the response shape and pull out the text of the first choice.
fn extract_content(response: &ChatResponse) -> Result<String, ResearchError> {
    let first = response.choices.first().ok_or_else(|| {
        let msg = "Invalid response format: missing 'choices'".to_string();
        error!("{msg}");
        ResearchError::Response(msg)
    })?;

    first
        .message
        .as_ref()
        .and_then(|m| m.content.clone())
        .ok_or_else(|| {
            let msg = "Invalid response format: missing 'message.content'".to_string();
            error!("{msg}");
            ResearchError::Response(msg)
        })
}
