//! Tool system: the closed set of actions a model may request.
//!
//! A [`Tool`] maps a string argument to a [`ToolOutput`]. Failures inside a
//! tool never escape the registry: [`Observation::from_result`] folds them
//! into model-visible text, so only an unknown action name can fail a run.

pub mod calculator;
pub mod price;
pub mod registry;
pub mod search;
pub mod tool;
pub mod weather;

pub use calculator::{Calculator, ExpressionError};
pub use price::PriceTable;
pub use registry::ToolRegistry;
pub use search::WikipediaSearch;
pub use tool::{Tool, ToolError, ToolOutput};
pub use weather::WeatherLookup;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::action::OBSERVATION_PREFIX;

/// Rendering of [`ToolOutput::Absent`] inside an observation.
pub const NO_RESULT: &str = "nenhum resultado";

/// Every action name the registry knows. Adding a variant forces every match
/// on it (registry lookup, prompt rendering) to handle the new tool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum ToolKind {
    #[strum(serialize = "calcular")]
    Calculate,
    #[strum(serialize = "obter_custo")]
    LookupCost,
    #[strum(serialize = "obter_clima_atual")]
    CurrentWeather,
    #[strum(serialize = "wikipedia")]
    Wikipedia,
}

impl ToolKind {
    /// The action name as it appears after `AÇÃO:`.
    pub fn action_name(self) -> &'static str {
        self.into()
    }

    /// Sample argument shown to the model in the system prompt.
    pub fn example_argument(self) -> &'static str {
        match self {
            Self::Calculate => "4 * 7 / 3",
            Self::LookupCost => "teclado",
            Self::CurrentWeather => "Brasília",
            Self::Wikipedia => "LangChain",
        }
    }

    /// One-line description shown to the model in the system prompt.
    pub fn description(self) -> &'static str {
        match self {
            Self::Calculate => {
                "Executa um cálculo e retorna o número com duas casas decimais - use ponto como separador decimal."
            }
            Self::LookupCost => "Retorna o custo de um item de tecnologia.",
            Self::CurrentWeather => "Retorna a temperatura atual de uma cidade.",
            Self::Wikipedia => "Retorna um resumo de uma pesquisa no Wikipedia.",
        }
    }
}

/// A tool result as it is fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    text: String,
}

impl Observation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Fold a tool result into model-visible text.
    ///
    /// Lookup failures collapse into the absence marker, so a broken lookup
    /// and an empty one read the same. Other failures become `Erro: <reason>`.
    pub fn from_result(result: Result<ToolOutput, ToolError>) -> Self {
        match result {
            Ok(output) => Self::new(output.to_string()),
            Err(err) if err.is_absence() => Self::new(ToolOutput::Absent.to_string()),
            Err(err) => Self::new(format!("Erro: {err}")),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The next user prompt: `OBSERVAÇÃO: <text>`.
    pub fn to_prompt(&self) -> String {
        format!("{OBSERVATION_PREFIX}{}", self.text)
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
