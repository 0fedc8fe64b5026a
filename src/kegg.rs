use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::OrganismCode;
use crate::error::ExportError;

pub const KEGG_REST_BASE: &str = "https://rest.kegg.jp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayEntry {
    pub entry_id: String,
    pub description: String,
}

pub trait KeggClient: Send + Sync {
    fn list_pathways(&self, organism: &OrganismCode) -> Result<Vec<PathwayEntry>, ExportError>;
    fn reactions_by_pathway(&self, entry_id: &str) -> Result<Vec<String>, ExportError>;
    fn compounds_by_pathway(&self, entry_id: &str) -> Result<Vec<String>, ExportError>;
}

#[derive(Clone)]
pub struct KeggHttpClient {
    client: Client,
    base_url: String,
}

impl KeggHttpClient {
    pub fn new() -> Result<Self, ExportError> {
        Self::with_base_url(KEGG_REST_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ExportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!(
                "kegg-pathway-export/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .map_err(|err| ExportError::KeggHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ExportError::KeggHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn list_url(&self, organism: &OrganismCode) -> String {
        format!("{}/list/pathway/{}", self.base_url, organism.as_str())
    }

    fn link_url(&self, target_db: &str, entry_id: &str) -> String {
        format!("{}/link/{}/{}", self.base_url, target_db, entry_id)
    }

    fn fetch_text(&self, url: &str) -> Result<String, ExportError> {
        tracing::debug!(url, "kegg request");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| ExportError::KeggHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "KEGG request failed".to_string());
            return Err(ExportError::KeggStatus { status, message });
        }
        response
            .text()
            .map_err(|err| ExportError::KeggHttp(err.to_string()))
    }
}

impl KeggClient for KeggHttpClient {
    fn list_pathways(&self, organism: &OrganismCode) -> Result<Vec<PathwayEntry>, ExportError> {
        let text = self.fetch_text(&self.list_url(organism))?;
        Ok(parse_pathway_list(&text))
    }

    fn reactions_by_pathway(&self, entry_id: &str) -> Result<Vec<String>, ExportError> {
        let text = self.fetch_text(&self.link_url("rn", entry_id))?;
        Ok(parse_link_targets(&text))
    }

    fn compounds_by_pathway(&self, entry_id: &str) -> Result<Vec<String>, ExportError> {
        let text = self.fetch_text(&self.link_url("cpd", entry_id))?;
        Ok(parse_link_targets(&text))
    }
}

pub fn parse_pathway_list(text: &str) -> Vec<PathwayEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (id, description) = match line.split_once('\t') {
            Some((id, rest)) => (id, rest),
            None => (line, ""),
        };
        entries.push(PathwayEntry {
            entry_id: ensure_path_prefix(id.trim()),
            description: description.trim().to_string(),
        });
    }
    entries
}

pub fn parse_link_targets(text: &str) -> Vec<String> {
    let mut targets = Vec::new();
    for line in text.lines() {
        if let Some((_, target)) = line.split_once('\t') {
            let target = target.trim();
            if !target.is_empty() {
                targets.push(target.to_string());
            }
        }
    }
    targets
}

fn ensure_path_prefix(id: &str) -> String {
    if id.starts_with("path:") {
        id.to_string()
    } else {
        format!("path:{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_keeps_prefixed_ids() {
        let text = "path:hsa00010\tGlycolysis / Gluconeogenesis - Homo sapiens (human)\n";
        let entries = parse_pathway_list(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_id, "path:hsa00010");
        assert_eq!(
            entries[0].description,
            "Glycolysis / Gluconeogenesis - Homo sapiens (human)"
        );
    }

    #[test]
    fn parse_list_restores_missing_prefix() {
        let text = "hsa00010\tGlycolysis / Gluconeogenesis\nhsa00020\tCitrate cycle (TCA cycle)\n";
        let entries = parse_pathway_list(text);
        let ids: Vec<&str> = entries.iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["path:hsa00010", "path:hsa00020"]);
    }

    #[test]
    fn parse_list_skips_blank_lines_and_tolerates_missing_description() {
        let text = "hsa00010\n\nhsa00020\tCitrate cycle (TCA cycle)\n\n";
        let entries = parse_pathway_list(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_id, "path:hsa00010");
        assert_eq!(entries[0].description, "");
        assert_eq!(entries[1].description, "Citrate cycle (TCA cycle)");
    }

    #[test]
    fn parse_link_takes_second_column() {
        let text = "path:hsa00010\tcpd:C00022\npath:hsa00010\tcpd:C00031\n";
        let targets = parse_link_targets(text);
        assert_eq!(targets, vec!["cpd:C00022", "cpd:C00031"]);
    }

    #[test]
    fn parse_link_skips_malformed_lines() {
        let text = "no tab here\npath:hsa00010\trn:R01786\npath:hsa00010\t\n";
        let targets = parse_link_targets(text);
        assert_eq!(targets, vec!["rn:R01786"]);
    }

    #[test]
    fn urls_trim_trailing_slash() {
        let client = KeggHttpClient::with_base_url("https://example.test/").unwrap();
        let organism: OrganismCode = "hsa".parse().unwrap();
        assert_eq!(
            client.list_url(&organism),
            "https://example.test/list/pathway/hsa"
        );
        assert_eq!(
            client.link_url("cpd", "path:hsa00010"),
            "https://example.test/link/cpd/path:hsa00010"
        );
    }

    #[test]
    fn default_client_targets_public_service() {
        let client = KeggHttpClient::new().unwrap();
        let organism: OrganismCode = "hsa".parse().unwrap();
        assert_eq!(
            client.list_url(&organism),
            "https://rest.kegg.jp/list/pathway/hsa"
        );
    }
}
