//! Command-line surface and console rendering.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use crossterm::style::Stylize;
use tracing::warn;

use crate::agent_loop::{LoopEvent, LoopEventPayload};
use crate::config::AgentConfig;

/// Ask the agent a question
#[derive(Parser, Debug)]
#[command(name = "reagent", version, about = "Reason-then-act agent with a small tool belt")]
pub struct Cli {
    /// The question to answer
    pub question: String,

    /// Model identifier (overrides config and REAGENT_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum number of model calls
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Chat completions base URL (overrides OPENAI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Config file (defaults to the per-user reagent/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut config: AgentConfig) -> AgentConfig {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        config
    }
}

/// Render one loop event as console text, or `None` for events that print
/// nothing.
pub fn render_event(event: &LoopEvent, styled: bool) -> Option<String> {
    match &event.payload {
        LoopEventPayload::ModelResponse { text, .. } => Some(text.clone()),
        LoopEventPayload::ActionStarted { name, argument, .. } => {
            let line = format!(" -- executando --> {name} {argument}");
            Some(if styled { line.green().to_string() } else { line })
        }
        LoopEventPayload::Observation { text, .. } => {
            let label = "OBSERVAÇÃO:";
            let label = if styled {
                label.cyan().to_string()
            } else {
                label.to_string()
            };
            Some(format!("{label} {text}"))
        }
        _ => None,
    }
}

/// Write an event's console line, if it has one, and flush.
pub fn write_event<W: Write>(
    out: &mut W,
    event: &LoopEvent,
    styled: bool,
) -> std::io::Result<()> {
    if let Some(line) = render_event(event, styled) {
        writeln!(out, "{line}")?;
        out.flush()?;
    }
    Ok(())
}

/// Print an event to stdout. Write failures are logged, not fatal.
pub fn print_event(event: &LoopEvent) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = write_event(&mut stdout, event, true) {
        warn!(error = %e, seq = event.seq, "failed to write event to stdout");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_loop::RunId;

    fn event(payload: LoopEventPayload) -> LoopEvent {
        LoopEvent {
            run_id: RunId::new(),
            seq: 1,
            timestamp: chrono::Utc::now(),
            payload,
        }
    }

    #[test]
    fn parse_question_only() {
        let cli = Cli::try_parse_from(["reagent", "Quanto custa um teclado?"]).unwrap();
        assert_eq!(cli.question, "Quanto custa um teclado?");
        assert!(cli.model.is_none());
        assert!(cli.max_turns.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn question_is_required() {
        assert!(Cli::try_parse_from(["reagent"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "reagent",
            "--model",
            "gpt-4o",
            "--max-turns",
            "2",
            "-t",
            "0.5",
            "--base-url",
            "http://localhost:1234/v1",
            "pergunta",
        ])
        .unwrap();
        let config = cli.apply_overrides(AgentConfig::default());
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_turns, 2);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn renders_console_lines() {
        let line = render_event(
            &event(LoopEventPayload::ActionStarted {
                turn: 1,
                name: "obter_custo".into(),
                argument: "teclado".into(),
            }),
            false,
        );
        assert_eq!(line.as_deref(), Some(" -- executando --> obter_custo teclado"));

        let line = render_event(
            &event(LoopEventPayload::Observation {
                turn: 1,
                text: "Um teclado custa R$ 149,90".into(),
            }),
            false,
        );
        assert_eq!(line.as_deref(), Some("OBSERVAÇÃO: Um teclado custa R$ 149,90"));

        assert!(render_event(&event(LoopEventPayload::Completed { turns: 2 }), false).is_none());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_event_reports_write_failures() {
        let observation = event(LoopEventPayload::Observation {
            turn: 1,
            text: "65.0".into(),
        });
        let err = write_event(&mut BrokenPipe, &observation, false).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn write_event_skips_silent_events() {
        let completed = event(LoopEventPayload::Completed { turns: 2 });
        write_event(&mut BrokenPipe, &completed, false).unwrap();

        let mut out = Vec::new();
        let observation = event(LoopEventPayload::Observation {
            turn: 1,
            text: "65.0".into(),
        });
        write_event(&mut out, &observation, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "OBSERVAÇÃO: 65.0\n");
    }
}
