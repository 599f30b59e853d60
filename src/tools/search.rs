//! `wikipedia`: first search snippet from the MediaWiki search API.

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::AgentError;

use super::tool::{Tool, ToolError, ToolOutput};
use super::weather::parse_base_url;
use super::ToolKind;

pub struct WikipediaSearch {
    http: reqwest::Client,
    base_url: Url,
}

impl WikipediaSearch {
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, AgentError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn search_url(&self, term: &str) -> Result<Url, ToolError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ToolError::Other(format!("cannot append path to {}", self.base_url)))?
            .pop_if_empty()
            .extend(["w", "api.php"]);
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srsearch", term)
            .append_pair("format", "json");
        Ok(url)
    }

    async fn fetch(&self, term: &str) -> Result<ToolOutput, ToolError> {
        let url = self.search_url(term)?;
        debug!(%url, "searching");

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ToolError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await?;
        let data: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ToolError::Malformed(e.to_string()))?;
        let results = data
            .get("query")
            .ok_or_else(|| ToolError::Malformed("missing `query` object".into()))?
            .get("search")
            .and_then(|s| s.as_array());

        // The snippet keeps the API's inline search-match markup.
        let snippet = results
            .and_then(|r| r.first())
            .and_then(|hit| hit.get("snippet"))
            .and_then(|s| s.as_str());

        Ok(match snippet {
            Some(snippet) => ToolOutput::Text(snippet.to_string()),
            None => ToolOutput::Absent,
        })
    }
}

#[async_trait]
impl Tool for WikipediaSearch {
    fn name(&self) -> &str {
        ToolKind::Wikipedia.action_name()
    }

    async fn execute(&self, argument: &str) -> Result<ToolOutput, ToolError> {
        let result = self.fetch(argument).await;
        if let Err(ref e) = result {
            warn!(tool = self.name(), term = argument, error = %e, "search failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_shape() {
        let search = WikipediaSearch::new(reqwest::Client::new(), "https://en.wikipedia.org").unwrap();
        let url = search.search_url("França & Itália").unwrap();
        assert_eq!(url.path(), "/w/api.php");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("action".to_string(), "query".to_string()),
                ("list".to_string(), "search".to_string()),
                ("srsearch".to_string(), "França & Itália".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }
}
