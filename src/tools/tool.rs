//! Tool trait, outputs and tool-internal errors.

use async_trait::async_trait;
use thiserror::Error;

use super::calculator::ExpressionError;
use super::NO_RESULT;

/// Core tool trait. Implement to back an action name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (for logs; dispatch goes through `ToolKind`).
    fn name(&self) -> &str;

    /// Execute the tool with the raw argument text.
    async fn execute(&self, argument: &str) -> Result<ToolOutput, ToolError>;
}

/// What a tool hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Number(f64),
    /// The lookup had nothing to say.
    Absent,
}

impl std::fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            // Integral values keep one decimal place: 65 renders as 65.0.
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Absent => f.write_str(NO_RESULT),
        }
    }
}

/// Failures inside a tool. Never fatal to a run.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("lookup returned HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Other(String),
}

impl ToolError {
    /// Lookup-side failures that surface as "no result".
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Request(_) | Self::Malformed(_)
        )
    }
}
