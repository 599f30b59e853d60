//! reagent: a reason-then-act agent loop.
//!
//! A model is asked a question, thinks out loud, and may request one tool
//! per reply with an `AÇÃO: <name>: <argument>` line. The tool's result is
//! fed back as `OBSERVAÇÃO: <result>` and the model is asked again, until it
//! answers without an action or the turn budget runs out.
//!
//! # Quick Start
//!
//! ```no_run
//! use reagent::prelude::*;
//!
//! # async fn example() -> reagent::error::Result<()> {
//! let config = AgentConfig::load(None)?;
//! let run = ReactLoop::from_config(&config)?
//!     .run("Quanto custa um teclado?")
//!     .await?;
//! if let Some(answer) = run.outcome.answer() {
//!     println!("{answer}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod agent;
pub mod agent_loop;
pub mod config;
pub mod error;
pub mod prelude;
pub mod prompt;
pub mod provider;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
