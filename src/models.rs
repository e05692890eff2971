use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "summary".to_string()
}

/// Body of a `POST /research` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchRequest {
    pub topic: String,
    #[serde(default = "default_format")]
    pub format: String,
}

/// Body of a successful `POST /research` response. `topic` and `format`
/// echo the request; `result` carries the agent-generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub topic: String,
    pub format: String,
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_defaults_to_summary() {
        let request: ResearchRequest =
            serde_json::from_str(r#"{"topic": "climate change"}"#).unwrap();
        assert_eq!(request.topic, "climate change");
        assert_eq!(request.format, "summary");
    }

    #[test]
    fn explicit_format_is_kept() {
        let request: ResearchRequest =
            serde_json::from_str(r#"{"topic": "ai", "format": "bullet points"}"#).unwrap();
        assert_eq!(request.format, "bullet points");
    }

    #[test]
    fn topic_is_required() {
        let result = serde_json::from_str::<ResearchRequest>(r#"{"format": "summary"}"#);
        assert!(result.is_err());
    }
}
