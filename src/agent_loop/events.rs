//! Run event stream types.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::RunId;

/// Concrete event payloads emitted by the loop, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoopEventPayload {
    Started {
        question: String,
        max_turns: usize,
    },
    /// Raw model text for a turn.
    ModelResponse {
        turn: usize,
        text: String,
    },
    ActionStarted {
        turn: usize,
        name: String,
        argument: String,
    },
    Observation {
        turn: usize,
        text: String,
    },
    Completed {
        turns: usize,
    },
    TurnBudgetExhausted {
        turns: usize,
    },
    Failed {
        error: String,
    },
}

/// Envelope for loop events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopEvent {
    pub run_id: RunId,
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub payload: LoopEventPayload,
}

/// Callback invoked synchronously for every event.
pub type EventSink = Arc<dyn Fn(LoopEvent) + Send + Sync>;
