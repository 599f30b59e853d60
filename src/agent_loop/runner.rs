//! The reason-then-act loop.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::action::parse_action;
use crate::agent::ConversationAgent;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::prompt::system_prompt;
use crate::provider::{ModelClient, OpenAiClient};
use crate::tools::ToolRegistry;

use super::events::{EventSink, LoopEvent, LoopEventPayload};
use super::types::{LoopState, RunId, RunOutcome, RunResult};

/// Drives one question through model calls and tool calls until the model
/// answers or the turn budget runs out.
///
/// Turns are strictly sequential: a turn's model call, parse and tool call
/// all complete before the next turn starts. Each [`run`](Self::run) owns a
/// fresh conversation, so one `ReactLoop` can answer many questions.
pub struct ReactLoop {
    client: Arc<dyn ModelClient>,
    registry: ToolRegistry,
    model: String,
    temperature: f64,
    max_turns: usize,
    system_prompt: String,
    event_sink: Option<EventSink>,
}

impl ReactLoop {
    /// Build a loop around an explicit client and tool registry.
    pub fn new(
        config: &AgentConfig,
        client: Arc<dyn ModelClient>,
        registry: ToolRegistry,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            client,
            registry,
            model: config.model.clone(),
            temperature: config.temperature,
            max_turns: config.max_turns,
            system_prompt: system_prompt(),
            event_sink: None,
        })
    }

    /// Build a loop with the OpenAI client and the built-in tools.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = Arc::new(OpenAiClient::from_config(config)?);
        let registry = ToolRegistry::builtin(config)?;
        Self::new(config, client, registry)
    }

    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Override the seeded system prompt. An empty prompt seeds no system
    /// message.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Answer one question.
    ///
    /// Returns `Err(AgentError::UnknownAction)` as soon as the model names a
    /// tool outside the registry; nothing from the failed run is returned.
    pub async fn run(&self, question: &str) -> Result<RunResult, AgentError> {
        let run_id = RunId::new();
        let span = info_span!("run", %run_id, model = self.model.as_str());
        self.run_with_id(run_id, question).instrument(span).await
    }

    async fn run_with_id(&self, run_id: RunId, question: &str) -> Result<RunResult, AgentError> {
        let mut events = Emitter::new(run_id, self.event_sink.clone());
        let mut agent = ConversationAgent::new(
            self.client.clone(),
            self.model.clone(),
            self.temperature,
            self.system_prompt.clone(),
        );
        let mut turns = 0;

        events.emit(LoopEventPayload::Started {
            question: question.to_string(),
            max_turns: self.max_turns,
        });
        info!(max_turns = self.max_turns, "run started");

        let result = self
            .drive(question, &mut agent, &mut turns, &mut events)
            .await;

        match result {
            Ok(outcome) => {
                match &outcome {
                    RunOutcome::Answered { .. } => {
                        info!(turns, "run completed");
                        events.emit(LoopEventPayload::Completed { turns });
                    }
                    RunOutcome::TurnBudgetExhausted { .. } => {
                        warn!(turns, "turn budget exhausted before a final answer");
                        events.emit(LoopEventPayload::TurnBudgetExhausted { turns });
                    }
                }
                Ok(RunResult {
                    run_id,
                    outcome,
                    turns,
                    conversation: agent.into_conversation(),
                })
            }
            Err(err) => {
                warn!(turns, error = %err, "run failed");
                events.emit(LoopEventPayload::Failed {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn drive(
        &self,
        question: &str,
        agent: &mut ConversationAgent,
        turns: &mut usize,
        events: &mut Emitter,
    ) -> Result<RunOutcome, AgentError> {
        let mut state = LoopState::AwaitingModel {
            prompt: question.to_string(),
        };

        loop {
            state = match state {
                LoopState::AwaitingModel { prompt } => {
                    *turns += 1;
                    let turn = *turns;
                    let response = agent.invoke(prompt).await?;
                    debug!(turn, response = response.as_str(), "model replied");
                    events.emit(LoopEventPayload::ModelResponse {
                        turn,
                        text: response.clone(),
                    });
                    LoopState::ParsingAction { response }
                }
                LoopState::ParsingAction { response } => match parse_action(&response) {
                    Some(action) => LoopState::ExecutingTool { action, response },
                    None => LoopState::Done {
                        outcome: RunOutcome::Answered { answer: response },
                    },
                },
                LoopState::ExecutingTool { action, response } => {
                    let turn = *turns;
                    if action.kind().is_none() {
                        return Err(AgentError::unknown_action(action.name(), action.argument()));
                    }
                    events.emit(LoopEventPayload::ActionStarted {
                        turn,
                        name: action.name().to_string(),
                        argument: action.argument().to_string(),
                    });

                    let observation = self.registry.dispatch(&action).await?;
                    events.emit(LoopEventPayload::Observation {
                        turn,
                        text: observation.text().to_string(),
                    });

                    if turn >= self.max_turns {
                        LoopState::Done {
                            outcome: RunOutcome::TurnBudgetExhausted {
                                last_response: response,
                            },
                        }
                    } else {
                        LoopState::AwaitingModel {
                            prompt: observation.to_prompt(),
                        }
                    }
                }
                LoopState::Done { outcome } => return Ok(outcome),
            };
        }
    }
}

/// Stamps and numbers events for one run.
struct Emitter {
    run_id: RunId,
    seq: u64,
    sink: Option<EventSink>,
}

impl Emitter {
    fn new(run_id: RunId, sink: Option<EventSink>) -> Self {
        Self {
            run_id,
            seq: 0,
            sink,
        }
    }

    fn emit(&mut self, payload: LoopEventPayload) {
        let Some(sink) = &self.sink else {
            return;
        };
        self.seq += 1;
        sink(LoopEvent {
            run_id: self.run_id,
            seq: self.seq,
            timestamp: Utc::now(),
            payload,
        });
    }
}
