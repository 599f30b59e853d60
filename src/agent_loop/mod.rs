//! The orchestrator: model call, action parse, tool dispatch, repeat.

pub mod events;
pub mod runner;
pub mod types;

pub use events::{EventSink, LoopEvent, LoopEventPayload};
pub use runner::ReactLoop;
pub use types::{LoopState, RunId, RunOutcome, RunResult};
