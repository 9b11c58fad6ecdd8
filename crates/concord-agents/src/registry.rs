//! Agent lookup keyed by document type

use crate::agent::{BlogAgent, DefaultAgent, LegalAgent, NewsAgent, ResearchAgent, ScoringAgent};
use concord_domain::DocType;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table from document type to scoring agent
///
/// Types without a registered agent fall back to [`DefaultAgent`].
#[derive(Clone)]
pub struct AgentRegistry {
    agents: HashMap<DocType, Arc<dyn ScoringAgent>>,
    fallback: Arc<dyn ScoringAgent>,
}

impl AgentRegistry {
    /// Empty registry: every type gets the default agent
    pub fn empty() -> Self {
        Self {
            agents: HashMap::new(),
            fallback: Arc::new(DefaultAgent),
        }
    }

    /// Registry with the five standard variants
    pub fn standard() -> Self {
        Self::empty()
            .with_agent(Arc::new(ResearchAgent))
            .with_agent(Arc::new(NewsAgent))
            .with_agent(Arc::new(BlogAgent))
            .with_agent(Arc::new(LegalAgent))
            .with_agent(Arc::new(DefaultAgent))
    }

    /// Register an agent for its type, replacing any existing one
    pub fn with_agent(mut self, agent: Arc<dyn ScoringAgent>) -> Self {
        self.register(agent);
        self
    }

    /// Register an agent for its type, replacing any existing one
    pub fn register(&mut self, agent: Arc<dyn ScoringAgent>) {
        self.agents.insert(agent.doc_type(), agent);
    }

    /// Agent for a type
    pub fn get(&self, doc_type: DocType) -> Arc<dyn ScoringAgent> {
        self.agents
            .get(&doc_type)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    /// Types with a registered agent, sorted
    pub fn registered_types(&self) -> Vec<DocType> {
        let mut types: Vec<DocType> = self.agents.keys().copied().collect();
        types.sort();
        types
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}
