//! Shared test helpers: a scripted model client and a recording tool.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use reagent::agent_loop::{LoopEvent, ReactLoop};
use reagent::config::AgentConfig;
use reagent::error::AgentError;
use reagent::provider::{CompletionRequest, ModelClient};
use reagent::tools::{Tool, ToolError, ToolKind, ToolOutput, ToolRegistry};

/// Model client that replays queued replies and records every request.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::api(500, "script exhausted"))
    }
}

/// Tool that records its arguments and answers with a fixed output.
pub struct RecordingTool {
    name: &'static str,
    output: ToolOutput,
    calls: Mutex<Vec<String>>,
}

impl RecordingTool {
    pub fn new(kind: ToolKind, output: ToolOutput) -> Arc<Self> {
        Arc::new(Self {
            name: kind.action_name(),
            output,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        self.name
    }

    async fn execute(&self, argument: &str) -> Result<ToolOutput, ToolError> {
        self.calls.lock().unwrap().push(argument.to_string());
        Ok(self.output.clone())
    }
}

/// Config whose lookups point at a closed local port.
pub fn offline_config() -> AgentConfig {
    AgentConfig::default()
        .with_weather_base_url("http://127.0.0.1:9")
        .with_search_base_url("http://127.0.0.1:9")
}

pub fn builtin_registry() -> ToolRegistry {
    ToolRegistry::builtin(&offline_config()).unwrap()
}

/// Build a loop over a scripted client.
pub fn react_loop(
    config: &AgentConfig,
    client: Arc<ScriptedClient>,
    registry: ToolRegistry,
) -> ReactLoop {
    ReactLoop::new(config, client, registry).unwrap()
}

/// Event sink that collects events into a shared vector.
pub fn collecting_sink() -> (Arc<dyn Fn(LoopEvent) + Send + Sync>, Arc<Mutex<Vec<LoopEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = events.clone();
    let sink: Arc<dyn Fn(LoopEvent) + Send + Sync> =
        Arc::new(move |event: LoopEvent| captured.lock().unwrap().push(event));
    (sink, events)
}
