//! `obter_clima_atual`: current temperature from a wttr.in-style JSON API.

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::AgentError;

use super::tool::{Tool, ToolError, ToolOutput};
use super::ToolKind;

pub struct WeatherLookup {
    http: reqwest::Client,
    base_url: Url,
}

impl WeatherLookup {
    /// Fails when `base_url` cannot carry a city path segment.
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, AgentError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// `<base>/<city>?format=j1`, with the city percent-encoded.
    fn report_url(&self, city: &str) -> Result<Url, ToolError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ToolError::Other(format!("cannot append path to {}", self.base_url)))?
            .pop_if_empty()
            .push(city);
        url.query_pairs_mut().append_pair("format", "j1");
        Ok(url)
    }

    async fn fetch(&self, city: &str) -> Result<ToolOutput, ToolError> {
        let url = self.report_url(city)?;
        debug!(%url, "fetching weather");

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ToolError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await?;
        let report: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ToolError::Malformed(e.to_string()))?;

        let temperature = report
            .get("current_condition")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("temp_C"));

        Ok(match temperature {
            Some(serde_json::Value::String(t)) => ToolOutput::Text(format!("{t}°C")),
            Some(serde_json::Value::Number(t)) => ToolOutput::Text(format!("{t}°C")),
            _ => ToolOutput::Absent,
        })
    }
}

#[async_trait]
impl Tool for WeatherLookup {
    fn name(&self) -> &str {
        ToolKind::CurrentWeather.action_name()
    }

    async fn execute(&self, argument: &str) -> Result<ToolOutput, ToolError> {
        let result = self.fetch(argument).await;
        if let Err(ref e) = result {
            warn!(tool = self.name(), city = argument, error = %e, "weather lookup failed");
        }
        result
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, AgentError> {
    let url = Url::parse(raw)
        .map_err(|e| AgentError::Configuration(format!("invalid lookup URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AgentError::Configuration(format!(
            "lookup URL {raw:?} cannot carry a path"
        )));
    }
    Ok(url)
}
