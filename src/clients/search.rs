use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::{Latency, ProviderError, Unconfigured};
use crate::constants::latency;

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineSearch {
    pub query: String,
    pub engines: Vec<String>,
    pub results: BTreeMap<String, Vec<SearchHit>>,
    pub total_results: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DorkHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DorkSearch {
    pub query: String,
    pub results: Vec<DorkHit>,
    pub total_results: usize,
    pub timestamp: String,
}

/// Web search across public engines.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Runs `query` on each requested engine. Engines without results are omitted
    /// from `results` but still echoed in `engines`.
    async fn engines(&self, query: &str, engines: &[String])
    -> Result<EngineSearch, ProviderError>;

    async fn google_dork(&self, query: &str) -> Result<DorkSearch, ProviderError>;
}

pub struct DemoSearchSource {
    latency: Latency,
}

impl DemoSearchSource {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

fn hit(title: String, url: &str) -> SearchHit {
    SearchHit {
        title,
        url: url.to_string(),
    }
}

fn canned_results(engine: &str, query: &str) -> Option<Vec<SearchHit>> {
    match engine {
        "google" => Some(vec![
            hit(format!("Google Result for: {query}"), "https://example.com/1"),
            hit(
                format!("Another Google Result: {query}"),
                "https://example.com/2",
            ),
        ]),
        "bing" => Some(vec![hit(
            format!("Bing Result for: {query}"),
            "https://example.com/3",
        )]),
        _ => None,
    }
}

fn build_engine_search(query: &str, engines: &[String]) -> EngineSearch {
    let results: BTreeMap<String, Vec<SearchHit>> = engines
        .iter()
        .filter_map(|engine| {
            let engine = engine.trim().to_lowercase();
            canned_results(&engine, query).map(|hits| (engine, hits))
        })
        .collect();

    EngineSearch {
        query: query.to_string(),
        engines: engines.to_vec(),
        total_results: results.values().map(Vec::len).sum(),
        results,
        timestamp: Utc::now().to_rfc3339(),
    }
}

fn build_dork_search(query: &str) -> DorkSearch {
    let short: String = query.chars().take(30).collect();

    let results = vec![
        DorkHit {
            title: format!("Advanced result for: {query}"),
            url: "https://example.com/result1".to_string(),
            snippet: "This is a sample result that would be found using the Google dork query. Contains relevant information...".to_string(),
            domain: "example.com".to_string(),
        },
        DorkHit {
            title: format!("Security finding: {short}..."),
            url: "https://target-site.com/admin/login".to_string(),
            snippet: "Potential security exposure found through advanced search techniques. This demonstrates the power of Google dorking...".to_string(),
            domain: "target-site.com".to_string(),
        },
        DorkHit {
            title: format!("Document discovery: {query}"),
            url: "https://company.com/documents/sensitive.pdf".to_string(),
            snippet: "PDF document containing information related to the search query. Found through file type targeting...".to_string(),
            domain: "company.com".to_string(),
        },
    ];

    DorkSearch {
        query: query.to_string(),
        total_results: results.len(),
        results,
        timestamp: Utc::now().to_rfc3339(),
    }
}

#[async_trait]
impl SearchSource for DemoSearchSource {
    async fn engines(
        &self,
        query: &str,
        engines: &[String],
    ) -> Result<EngineSearch, ProviderError> {
        self.latency.simulate(latency::SHORT).await;
        Ok(build_engine_search(query, engines))
    }

    async fn google_dork(&self, query: &str) -> Result<DorkSearch, ProviderError> {
        self.latency.simulate(latency::MEDIUM).await;
        Ok(build_dork_search(query))
    }
}

#[async_trait]
impl SearchSource for Unconfigured {
    async fn engines(
        &self,
        _query: &str,
        _engines: &[String],
    ) -> Result<EngineSearch, ProviderError> {
        Err(ProviderError::NotConfigured("Search engines"))
    }

    async fn google_dork(&self, _query: &str) -> Result<DorkSearch, ProviderError> {
        Err(ProviderError::NotConfigured("Search engines"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_search_counts_only_known_engines() {
        let engines = vec!["google".to_string(), "duckduckgo".to_string()];
        let search = build_engine_search("acme", &engines);

        assert_eq!(search.engines, engines);
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.total_results, 2);
        assert_eq!(search.results["google"][0].title, "Google Result for: acme");
    }

    #[test]
    fn test_dork_title_truncates_on_char_boundary() {
        let query = "ñ".repeat(40);
        let search = build_dork_search(&query);
        assert_eq!(search.total_results, 3);
        assert_eq!(
            search.results[1].title,
            format!("Security finding: {}...", "ñ".repeat(30))
        );
    }
}
