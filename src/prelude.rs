//! Convenience re-exports for common use.

pub use crate::action::{parse_action, Action, ActionDirective};
pub use crate::agent::{Conversation, ConversationAgent};
pub use crate::agent_loop::{LoopEvent, LoopEventPayload, ReactLoop, RunOutcome, RunResult};
pub use crate::config::AgentConfig;
pub use crate::error::{AgentError, Result};
pub use crate::provider::{CompletionRequest, ModelClient};
pub use crate::tools::{Observation, Tool, ToolError, ToolKind, ToolOutput, ToolRegistry};
pub use crate::types::{Message, Role};
