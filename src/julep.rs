use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Hosted Julep platform endpoint. Override with `JULEP_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.julep.ai/api";

/// Thin HTTP client for the Julep agent platform.
///
/// Covers the four operations the service needs: create an agent, attach a
/// tool to it, open a session, and exchange messages within a session.
#[derive(Debug, Clone)]
pub struct JulepClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub about: String,
    pub instructions: Vec<String>,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct Agent {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateToolRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub integration: ToolIntegration,
}

#[derive(Debug, Serialize)]
pub struct ToolIntegration {
    pub provider: String,
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    agent: &'a str,
    situation: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
}

/// Raw chat response as returned by the platform. Shape validation is the
/// caller's job, so every nested field is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl JulepClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent> {
        let url = format!("{}/agents", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        response.json().await.context("Failed to parse agent response")
    }

    pub async fn attach_tool(&self, agent_id: &str, request: &CreateToolRequest) -> Result<()> {
        let url = format!("{}/agents/{}/tools", self.base_url, agent_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn create_session(&self, agent_id: &str, situation: &str) -> Result<Session> {
        let url = format!("{}/sessions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CreateSessionRequest {
                agent: agent_id,
                situation,
            })
            .send()
            .await?;
        let response = Self::check(response).await?;
        response.json().await.context("Failed to parse session response")
    }

    pub async fn chat(&self, session_id: &str, messages: Vec<ChatMessage>) -> Result<ChatResponse> {
        let url = format!("{}/sessions/{}/chat", self.base_url, session_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest { messages })
            .send()
            .await?;
        let response = Self::check(response).await?;
        response.json().await.context("Failed to parse chat response")
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Julep API error: status={status} body={body}");
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_user_role() {
        let message = ChatMessage::user("hello");
        assert_eq!(message.role, "user");
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn tool_request_serializes_type_field() {
        let request = CreateToolRequest {
            name: "wikipedia_search".to_string(),
            kind: "integration".to_string(),
            integration: ToolIntegration {
                provider: "wikipedia".to_string(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "integration");
        assert_eq!(value["integration"]["provider"], "wikipedia");
    }

    #[test]
    fn chat_response_parses_choices() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "text"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.as_ref().unwrap().content.as_deref(),
            Some("text")
        );
    }

    #[test]
    fn chat_response_tolerates_missing_fields() {
        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());

        let no_content: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": null}]}"#).unwrap();
        assert!(no_content.choices[0].message.is_none());
    }
}
