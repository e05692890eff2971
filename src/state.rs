use std::sync::Arc;

use crate::agent::AgentManager;
use crate::config::Settings;
use crate::research::ResearchService;

#[derive(Clone)]
pub struct AppState {
    pub research: ResearchService,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let agent = Arc::new(AgentManager::new(settings));
        Self {
            research: ResearchService::new(agent),
        }
    }
}
