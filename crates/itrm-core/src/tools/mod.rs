//! Tools the research agent may call, and the registry that dispatches them.
//!
//! Tool failures are reported back to the model as plain text, never as
//! Rust errors, so a bad search never aborts the agent loop.

pub mod web;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, error};

use crate::provider::types::{ToolDefinition, ToolFunctionDef};

#[async_trait]
pub trait Tool: Send + Sync {
    /// Name used in function calls (e.g. "web_search").
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the arguments.
    fn parameters(&self) -> Value;

    async fn execute(&self, args: &Map<String, Value>) -> String;
}

/// Tools registered by name. Iteration order is by name, so the
/// definitions sent to the model are stable between requests.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!(tool = tool.name(), "Registered tool");
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub async fn execute(&self, name: &str, args: &Map<String, Value>) -> String {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None => {
                error!(tool = name, "Tool not found");
                format!("Error: Tool '{}' not found", name)
            }
        }
    }

    /// Definitions in OpenAI function-calling format.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                def_type: "function".into(),
                function: ToolFunctionDef {
                    name: tool.name().into(),
                    description: tool.description().into(),
                    parameters: tool.parameters(),
                },
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
