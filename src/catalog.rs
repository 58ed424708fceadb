// ─── Version Catalog ───
// Maps MC release identifiers to the numeric mapping revisions published for
// them. Populated from the historical MCPBot export endpoint; when that host
// is unreachable an embedded payload covering the well-known versions is
// substituted, so offline resolution keeps working.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{RemapError, RemapResult};
use crate::http::build_http_client;

const CATALOG_URL: &str = "http://export.mcpbot.bspk.rs/versions.json";
const CATALOG_TIMEOUT: Duration = Duration::from_secs(5);

// Offline fallback covering 1.7.10 through 1.12. Substituted on any fetch or
// parse failure; a content fallback, not a retry.
const FALLBACK_JSON: &str = r#"{
    "1.12":   {"snapshot": [20171003], "stable": [39]},
    "1.11.2": {"snapshot": [20161220], "stable": [32]},
    "1.11":   {"snapshot": [20161115, 20161111, 20161104], "stable": [31, 30]},
    "1.10.2": {"snapshot": [20160518], "stable": [29]},
    "1.9.4":  {"snapshot": [20160501], "stable": [26]},
    "1.9":    {"snapshot": [20160320, 20160312, 20160305, 20160301, 20160228, 20160227, 20160226, 20160225, 20160224], "stable": [24]},
    "1.8.9":  {"snapshot": [20160301, 20151216], "stable": [22]},
    "1.8.8":  {"snapshot": [20150913], "stable": [20]},
    "1.8":    {"snapshot": [20141130, 20140925, 20140903], "stable": [18]},
    "1.7.10": {"snapshot": [20140925], "stable": [12]}
}"#;

/// Which source the last `refresh` actually loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Remote,
    Fallback,
}

/// Revisions known for one MC version.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub mc_version: String,
    pub snapshot: BTreeSet<String>,
    pub stable: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct RevisionsJson {
    #[serde(default)]
    snapshot: Vec<serde_json::Number>,
    #[serde(default)]
    stable: Vec<serde_json::Number>,
}

/// Caller-owned catalog value. Entries keep the document order of the source
/// JSON; `query` scans them in that order, so lookups for a revision shared
/// by several MC versions return the first one listed.
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    endpoint: String,
    entries: Vec<CatalogEntry>,
}

impl Default for VersionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionCatalog {
    /// Empty catalog against the default endpoint. Call `refresh` to
    /// populate it.
    pub fn new() -> Self {
        Self::with_endpoint(CATALOG_URL)
    }

    /// Empty catalog against a specific endpoint, mainly for tests.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            entries: Vec::new(),
        }
    }

    /// Re-populate from the remote endpoint, fully replacing any previous
    /// contents. Any failure substitutes the embedded fallback payload.
    pub async fn refresh(&mut self) -> CatalogSource {
        match self.fetch_remote().await {
            Ok(entries) => {
                info!(
                    "Loaded {} catalog versions from {}",
                    entries.len(),
                    self.endpoint
                );
                self.entries = entries;
                CatalogSource::Remote
            }
            Err(e) => {
                warn!(
                    "Version catalog unreachable ({}), using offline fallback data",
                    e
                );
                self.entries =
                    parse_catalog(FALLBACK_JSON).expect("embedded fallback catalog must parse");
                CatalogSource::Fallback
            }
        }
    }

    async fn fetch_remote(&self) -> RemapResult<Vec<CatalogEntry>> {
        let client = build_http_client(CATALOG_TIMEOUT, CATALOG_TIMEOUT)?;
        let response = client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemapError::DownloadFailed {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        parse_catalog(&text)
    }

    /// Find the first MC version whose snapshot or stable set contains the
    /// given revision. Accepts bare revisions (`39`), prefixed forms
    /// (`stable_39`) and cache folder names (`39-1.12`).
    pub fn query(&self, token: &str) -> Option<&str> {
        let revision = normalize_token(token);
        self.entries
            .iter()
            .find(|e| e.snapshot.contains(revision) || e.stable.contains(revision))
            .map(|e| e.mc_version.as_str())
    }

    /// MC versions in catalog order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.mc_version.as_str())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `stable_39` -> `39`, `39-1.12` -> `39`, `39` -> `39`.
fn normalize_token(token: &str) -> &str {
    if let Some((_, rest)) = token.split_once('_') {
        rest
    } else if let Some((head, _)) = token.split_once('-') {
        head
    } else {
        token
    }
}

fn parse_catalog(raw: &str) -> RemapResult<Vec<CatalogEntry>> {
    // serde_json's preserve_order feature keeps map entries in document
    // order, which `query` relies on.
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;

    let mut entries = Vec::with_capacity(map.len());
    for (mc_version, value) in map {
        let revisions: RevisionsJson = serde_json::from_value(value)?;
        entries.push(CatalogEntry {
            mc_version,
            snapshot: revisions.snapshot.iter().map(|n| n.to_string()).collect(),
            stable: revisions.stable.iter().map(|n| n.to_string()).collect(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn offline_catalog() -> VersionCatalog {
        let mut catalog = VersionCatalog::with_endpoint("http://127.0.0.1:1/versions.json");
        let source = catalog.refresh().await;
        assert_eq!(source, CatalogSource::Fallback);
        catalog
    }

    #[test]
    fn token_normalization() {
        assert_eq!(normalize_token("stable_39"), "39");
        assert_eq!(normalize_token("snapshot_20171003"), "20171003");
        assert_eq!(normalize_token("39-1.12"), "39");
        assert_eq!(normalize_token("39"), "39");
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let catalog = offline_catalog().await;
        assert!(!catalog.is_empty());
        assert_eq!(catalog.versions().next(), Some("1.12"));
    }

    #[tokio::test]
    async fn query_matches_stable_and_snapshot_revisions() {
        let catalog = offline_catalog().await;
        assert_eq!(catalog.query("39"), Some("1.12"));
        assert_eq!(catalog.query("stable_39"), Some("1.12"));
        assert_eq!(catalog.query("20171003"), Some("1.12"));
        assert_eq!(catalog.query("snapshot_20161220"), Some("1.11.2"));
        assert_eq!(catalog.query("39-1.12"), Some("1.12"));
        assert_eq!(catalog.query("99999"), None);
    }

    #[tokio::test]
    async fn query_is_catalog_order_dependent() {
        let catalog = offline_catalog().await;
        // 20160301 is a snapshot revision of both 1.9 and 1.8.9; 1.9 is
        // listed first and wins.
        assert_eq!(catalog.query("20160301"), Some("1.9"));
    }

    #[test]
    fn refresh_replaces_previous_contents() {
        let first = parse_catalog(r#"{"1.12": {"stable": [39]}}"#).unwrap();
        let second = parse_catalog(r#"{"1.11": {"stable": [32]}}"#).unwrap();

        let mut catalog = VersionCatalog::new();
        catalog.entries = first;
        assert_eq!(catalog.query("39"), Some("1.12"));

        catalog.entries = second;
        assert_eq!(catalog.query("39"), None);
        assert_eq!(catalog.query("32"), Some("1.11"));
    }

    #[test]
    fn parse_preserves_document_order() {
        let entries =
            parse_catalog(r#"{"1.9": {"stable": [24]}, "1.12": {"stable": [39]}}"#).unwrap();
        let versions: Vec<_> = entries.iter().map(|e| e.mc_version.as_str()).collect();
        assert_eq!(versions, ["1.9", "1.12"]);
    }
}
