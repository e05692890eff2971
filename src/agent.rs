use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::Settings;
use crate::julep::{
    ChatMessage, ChatResponse, CreateAgentRequest, CreateToolRequest, JulepClient,
    ToolIntegration,
};
use crate::research::AgentApi;

const AGENT_NAME: &str = "Research Assistant";
const AGENT_ABOUT: &str = "An AI research assistant that provides information in requested formats";

// Three instruction layers: core role, primary task, tone and constraints.
const AGENT_INSTRUCTIONS: [&str; 3] = [
    "You are a helpful research assistant. Your goal is to find concise information on \
     topics provided by the user.",
    "When given a topic and an output format (e.g., 'summary', 'bullet points', 'short \
     report'), you must gather relevant information and structure it according to the \
     requested format.",
    "Maintain a neutral, objective tone. Strictly adhere to the requested output format. \
     Keep summaries to 3-4 sentences, bullet points concise (max 5 points), and short \
     reports under 150 words. If you cannot find reliable information, state that clearly.",
];

/// Manages the remote research agent.
///
/// The agent is created on first use and its id cached for the lifetime of
/// the process; a failed creation caches nothing, so the next request
/// retries. Sessions are cheap and request-scoped, so they are not cached.
pub struct AgentManager {
    julep: JulepClient,
    model: String,
    agent_id: OnceCell<String>,
}

impl AgentManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            julep: JulepClient::new(
                settings.julep_base_url.clone(),
                settings.julep_api_key.clone(),
            ),
            model: settings.julep_model.clone(),
            agent_id: OnceCell::new(),
        }
    }

    /// The research agent's id, creating the agent if it does not exist yet.
    pub async fn agent_id(&self) -> Result<&str> {
        let id = self
            .agent_id
            .get_or_try_init(|| self.create_research_agent())
            .await?;
        Ok(id.as_str())
    }

    async fn create_research_agent(&self) -> Result<String> {
        info!("Creating research assistant agent...");
        let agent = self
            .julep
            .create_agent(&CreateAgentRequest {
                name: AGENT_NAME.to_string(),
                about: AGENT_ABOUT.to_string(),
                instructions: AGENT_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
                model: self.model.clone(),
            })
            .await?;
        info!("Successfully created agent with ID: {}", agent.id);

        // Best-effort: the agent works without the search tool.
        info!("Attaching Wikipedia tool to agent: {}", agent.id);
        match self
            .julep
            .attach_tool(
                &agent.id,
                &CreateToolRequest {
                    name: "wikipedia_search".to_string(),
                    kind: "integration".to_string(),
                    integration: ToolIntegration {
                        provider: "wikipedia".to_string(),
                    },
                },
            )
            .await
        {
            Ok(()) => info!("Successfully attached Wikipedia tool to agent: {}", agent.id),
            Err(e) => {
                warn!("Error attaching Wikipedia tool to agent: {e}");
                warn!("Continuing with agent creation without Wikipedia tool");
            }
        }

        Ok(agent.id)
    }
}

#[async_trait]
impl AgentApi for AgentManager {
    async fn create_session(&self, situation: &str) -> Result<String> {
        let agent_id = self.agent_id().await?;
        info!("Creating session with situation: {situation}");
        let session = self.julep.create_session(agent_id, situation).await?;
        info!("Session created successfully with ID: {}", session.id);
        Ok(session.id)
    }

    async fn chat(&self, session_id: &str, messages: Vec<ChatMessage>) -> Result<ChatResponse> {
        info!("Sending messages to session: {session_id}");
        let response = self.julep.chat(session_id, messages).await?;
        info!("Received response from Julep");
        Ok(response)
    }
}
