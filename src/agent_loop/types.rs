//! Run identifiers, loop states and run results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::agent::Conversation;

/// Unique identifier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the loop is within a turn.
///
/// `AwaitingModel -> ParsingAction -> (ExecutingTool -> AwaitingModel) | Done`.
/// Failure is not a state: it leaves the loop as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    AwaitingModel { prompt: String },
    ParsingAction { response: String },
    ExecutingTool { action: Action, response: String },
    Done { outcome: RunOutcome },
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The model replied without an action line; the reply is the answer.
    Answered { answer: String },
    /// Every allowed model call was spent and the last reply still asked
    /// for a tool.
    TurnBudgetExhausted { last_response: String },
}

impl RunOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answered { answer } => Some(answer),
            Self::TurnBudgetExhausted { .. } => None,
        }
    }
}

/// Result of a run that did not fail.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    /// Model invocations made.
    pub turns: usize,
    /// Full history as last sent to (and received from) the model.
    pub conversation: Conversation,
}
