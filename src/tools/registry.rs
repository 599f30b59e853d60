//! Closed mapping from [`ToolKind`] to implementations, and dispatch.

use std::sync::Arc;

use tracing::{debug, info};

use crate::action::Action;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::provider::http::build_client;

use super::{
    Calculator, Observation, PriceTable, Tool, ToolKind, WeatherLookup, WikipediaSearch,
};

/// One implementation per [`ToolKind`], fixed at construction.
///
/// There is no map to miss: every kind has a slot, and an action that names
/// no kind is rejected before lookup.
#[derive(Clone)]
pub struct ToolRegistry {
    calculate: Arc<dyn Tool>,
    lookup_cost: Arc<dyn Tool>,
    current_weather: Arc<dyn Tool>,
    wikipedia: Arc<dyn Tool>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("calculate", &self.calculate.name())
            .field("lookup_cost", &self.lookup_cost.name())
            .field("current_weather", &self.current_weather.name())
            .field("wikipedia", &self.wikipedia.name())
            .finish()
    }
}

impl ToolRegistry {
    /// The built-in tools, with lookups pointed at the configured services.
    pub fn builtin(config: &AgentConfig) -> Result<Self, AgentError> {
        let http = build_client(config)?;
        Ok(Self {
            calculate: Arc::new(Calculator),
            lookup_cost: Arc::new(PriceTable),
            current_weather: Arc::new(WeatherLookup::new(
                http.clone(),
                &config.weather_base_url,
            )?),
            wikipedia: Arc::new(WikipediaSearch::new(http, &config.search_base_url)?),
        })
    }

    /// Replace the implementation behind one kind.
    pub fn with_tool(mut self, kind: ToolKind, tool: Arc<dyn Tool>) -> Self {
        *self.slot_mut(kind) = tool;
        self
    }

    pub fn get(&self, kind: ToolKind) -> &Arc<dyn Tool> {
        match kind {
            ToolKind::Calculate => &self.calculate,
            ToolKind::LookupCost => &self.lookup_cost,
            ToolKind::CurrentWeather => &self.current_weather,
            ToolKind::Wikipedia => &self.wikipedia,
        }
    }

    fn slot_mut(&mut self, kind: ToolKind) -> &mut Arc<dyn Tool> {
        match kind {
            ToolKind::Calculate => &mut self.calculate,
            ToolKind::LookupCost => &mut self.lookup_cost,
            ToolKind::CurrentWeather => &mut self.current_weather,
            ToolKind::Wikipedia => &mut self.wikipedia,
        }
    }

    /// Run the tool an action names and return what the model should see.
    ///
    /// Only an unrecognized action name fails; tool-internal failures come
    /// back as observations.
    pub async fn dispatch(&self, action: &Action) -> Result<Observation, AgentError> {
        let kind = action
            .kind()
            .ok_or_else(|| AgentError::unknown_action(action.name(), action.argument()))?;
        let tool = self.get(kind);

        info!(tool = tool.name(), argument = action.argument(), "executing tool");
        let observation = Observation::from_result(tool.execute(action.argument()).await);
        debug!(tool = tool.name(), observation = observation.text(), "tool finished");

        Ok(observation)
    }
}
