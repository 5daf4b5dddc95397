//! `web_search` tool backed by the Brave Search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::Tool;

const BRAVE_SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";
const MAX_COUNT: u64 = 20;

pub struct WebSearchTool {
    client: Client,
    api_key: String,
    max_results: u32,
}

impl WebSearchTool {
    pub fn new(client: Client, api_key: &str, max_results: u32) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            max_results,
        }
    }
}

#[derive(Deserialize)]
struct BraveSearchResponse {
    web: Option<BraveWebResults>,
}

#[derive(Deserialize)]
struct BraveWebResults {
    results: Vec<BraveWebResult>,
}

#[derive(Deserialize)]
struct BraveWebResult {
    title: String,
    url: String,
    description: Option<String>,
}

fn format_results(response: BraveSearchResponse) -> String {
    let results = response.web.map(|w| w.results).unwrap_or_default();
    if results.is_empty() {
        return "No results found.".into();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let desc = r.description.as_deref().unwrap_or("No description");
            format!("{}. {}\n   {}\n   {}", i + 1, r.title, r.url, desc)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current product, pricing, and vendor information. Returns titles, URLs, and snippets."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "count": {
                    "type": "integer",
                    "description": "Number of results (default: 5, max: 20)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: &Map<String, Value>) -> String {
        let Some(query) = args.get("query").and_then(|v| v.as_str()) else {
            return "Error: 'query' parameter is required".into();
        };

        let count = args
            .get("count")
            .and_then(|v| v.as_u64())
            .unwrap_or(u64::from(self.max_results))
            .clamp(1, MAX_COUNT);

        debug!(query, count, "Performing web search");
        let count = count.to_string();

        let response = self
            .client
            .get(BRAVE_SEARCH_URL)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<BraveSearchResponse>().await {
                Ok(data) => format_results(data),
                Err(e) => format!("Error parsing search results: {}", e),
            },
            Ok(resp) => format!("Search API error ({})", resp.status()),
            Err(e) => format!("Search request failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_results() {
        let data: BraveSearchResponse = serde_json::from_str(
            r#"{"web": {"results": [
                {"title": "NetApp AFF", "url": "https://netapp.com/aff", "description": "All-flash arrays"},
                {"title": "Dell PowerStore", "url": "https://dell.com/powerstore"}
            ]}}"#,
        )
        .unwrap();
        let out = format_results(data);
        assert!(out.starts_with("1. NetApp AFF\n   https://netapp.com/aff\n   All-flash arrays"));
        assert!(out.contains("2. Dell PowerStore"));
        assert!(out.contains("No description"));
    }

    #[test]
    fn test_format_empty() {
        let data: BraveSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(format_results(data), "No results found.");
    }

    #[tokio::test]
    async fn test_missing_query() {
        let tool = WebSearchTool::new(Client::new(), "key", 5);
        let out = tool.execute(&Map::new()).await;
        assert!(out.contains("'query' parameter is required"));
    }
}
