use super::specifier::{MappingKind, Specifier};

// Known mapping archives on the Forge Maven, newest first, covering every MC
// version published with MCP-style mappings (1.7.10 through 1.16.5).
// Registration order is significant: ambiguous specifiers resolve to the
// first key that matches.
const MAPPING_ARCHIVES: &[(&str, &str)] = &[
    // 1.16.x (snapshot only)
    ("1.16.5-snapshot_20210309", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20210309-1.16.5/mcp_snapshot-20210309-1.16.5.zip"),
    ("1.16.3-snapshot_20201028", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20201028-1.16.3/mcp_snapshot-20201028-1.16.3.zip"),
    ("1.16.2-snapshot_20200916", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20200916-1.16.2/mcp_snapshot-20200916-1.16.2.zip"),
    ("1.16.1-snapshot_20200723", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20200723-1.16.1/mcp_snapshot-20200723-1.16.1.zip"),
    ("1.16-snapshot_20200514", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20200514-1.16/mcp_snapshot-20200514-1.16.zip"),
    // 1.15.x (snapshot only)
    ("1.15.1-snapshot_20200220", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20200220-1.15.1/mcp_snapshot-20200220-1.15.1.zip"),
    // 1.14.x (snapshot only)
    ("1.14.3-snapshot_20190719", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20190719-1.14.3/mcp_snapshot-20190719-1.14.3.zip"),
    ("1.14.2-snapshot_20190608", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20190608-1.14.2/mcp_snapshot-20190608-1.14.2.zip"),
    // 1.13.x (snapshot only)
    ("1.13-snapshot_20180921", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20180921-1.13/mcp_snapshot-20180921-1.13.zip"),
    ("1.13-snapshot_20180815", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20180815-1.13/mcp_snapshot-20180815-1.13.zip"),
    // 1.12.x (stable + snapshot)
    ("1.12.2-stable_39", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/39-1.12/mcp_stable-39-1.12.zip"),
    ("1.12.1-stable_39", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/39-1.12/mcp_stable-39-1.12.zip"),
    ("1.12-stable_39", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/39-1.12/mcp_stable-39-1.12.zip"),
    ("1.12-snapshot_20180814", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20180814-1.12/mcp_snapshot-20180814-1.12.zip"),
    ("1.12-snapshot_20171003", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_snapshot/20171003-1.12/mcp_snapshot-20171003-1.12.zip"),
    // 1.11.x (stable)
    ("1.11.2-stable_32", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/32-1.11/mcp_stable-32-1.11.zip"),
    ("1.11-stable_32", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/32-1.11/mcp_stable-32-1.11.zip"),
    // 1.10.x (stable)
    ("1.10.2-stable_29", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/29-1.10.2/mcp_stable-29-1.10.2.zip"),
    ("1.10-stable_29", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/29-1.10.2/mcp_stable-29-1.10.2.zip"),
    // 1.9.x (stable)
    ("1.9.4-stable_26", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/26-1.9.4/mcp_stable-26-1.9.4.zip"),
    ("1.9-stable_24", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/24-1.9/mcp_stable-24-1.9.zip"),
    // 1.8.x (stable)
    ("1.8.9-stable_22", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/22-1.8.9/mcp_stable-22-1.8.9.zip"),
    ("1.8.8-stable_20", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/20-1.8.8/mcp_stable-20-1.8.8.zip"),
    ("1.8-stable_18", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/18-1.8/mcp_stable-18-1.8.zip"),
    // 1.7.x (stable, oldest supported)
    ("1.7.10-stable_12", "https://maven.minecraftforge.net/de/oceanlabs/mcp/mcp_stable/12-1.7.10/mcp_stable-12-1.7.10.zip"),
];

/// One downloadable mapping release: an MC version, a channel, a revision and
/// the archive URL serving it.
#[derive(Debug, Clone)]
pub struct MappingKey {
    mc_version: String,
    kind: MappingKind,
    revision: String,
    url: String,
}

impl MappingKey {
    fn parse(name: &str, url: &str) -> Option<Self> {
        let (mc_version, label) = name.split_once('-')?;
        let (kind, revision) = label.split_once('_')?;
        let kind = match kind {
            "stable" => MappingKind::Stable,
            "snapshot" => MappingKind::Snapshot,
            _ => return None,
        };
        Some(Self {
            mc_version: mc_version.to_string(),
            kind,
            revision: revision.to_string(),
            url: url.to_string(),
        })
    }

    /// Canonical key text, e.g. `1.12.2-stable_39`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.mc_version, self.release_label())
    }

    /// Channel plus revision, e.g. `stable_39`.
    pub fn release_label(&self) -> String {
        format!("{}_{}", self.kind, self.revision)
    }

    pub fn mc_version(&self) -> &str {
        &self.mc_version
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Cache directory name: the pre-hyphen segment of the key. Keys sharing
    /// an MC version therefore share a directory; last writer wins.
    pub fn cache_dir_name(&self) -> &str {
        &self.mc_version
    }

    /// Strong match: the key text contains the specifier, or the specifier
    /// contains the key's release label.
    pub fn matches(&self, spec: &Specifier) -> bool {
        self.name().contains(spec.raw()) || spec.raw().contains(&self.release_label())
    }

    /// Weak match: the release label equals the specifier, or the specifier
    /// contains the bare revision.
    pub fn matches_loose(&self, spec: &Specifier) -> bool {
        self.release_label() == spec.raw() || spec.raw().contains(self.revision.as_str())
    }
}

/// Ordered table of downloadable mapping keys.
pub struct MappingRegistry {
    keys: Vec<MappingKey>,
}

impl MappingRegistry {
    pub fn builtin() -> Self {
        let keys = MAPPING_ARCHIVES
            .iter()
            .map(|(name, url)| {
                MappingKey::parse(name, url).expect("builtin mapping key must parse")
            })
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[MappingKey] {
        &self.keys
    }

    /// Find the first key matching the specifier: one full pass of strong
    /// matches, then one of weak matches. First match in registration order
    /// wins, which makes ambiguous specifiers resolve deterministically but
    /// order-dependently.
    pub fn find(&self, spec: &Specifier) -> Option<&MappingKey> {
        self.keys
            .iter()
            .find(|key| key.matches(spec))
            .or_else(|| self.keys.iter().find(|key| key.matches_loose(spec)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let registry = MappingRegistry::builtin();
        assert_eq!(registry.keys().len(), MAPPING_ARCHIVES.len());
        assert_eq!(registry.keys()[0].name(), "1.16.5-snapshot_20210309");
        assert_eq!(registry.keys()[0].kind(), MappingKind::Snapshot);
    }

    #[test]
    fn exact_specifier_finds_its_key() {
        let registry = MappingRegistry::builtin();
        let key = registry.find(&Specifier::parse("1.12.2-stable_39")).unwrap();
        assert_eq!(key.name(), "1.12.2-stable_39");
        assert_eq!(key.cache_dir_name(), "1.12.2");
    }

    #[test]
    fn ambiguous_label_takes_first_registered_key() {
        let registry = MappingRegistry::builtin();
        // 1.12.2, 1.12.1 and 1.12 all carry stable_39; 1.12.2 is registered
        // first and wins.
        let key = registry.find(&Specifier::parse("stable_39")).unwrap();
        assert_eq!(key.name(), "1.12.2-stable_39");
    }

    #[test]
    fn bare_mc_version_matches_by_containment() {
        let registry = MappingRegistry::builtin();
        let key = registry.find(&Specifier::parse("1.12.2")).unwrap();
        assert_eq!(key.name(), "1.12.2-stable_39");

        let key = registry.find(&Specifier::parse("1.10")).unwrap();
        assert_eq!(key.name(), "1.10.2-stable_29");
    }

    #[test]
    fn snapshot_date_matches() {
        let registry = MappingRegistry::builtin();
        let key = registry.find(&Specifier::parse("20171003")).unwrap();
        assert_eq!(key.name(), "1.12-snapshot_20171003");
    }

    #[test]
    fn unknown_specifier_matches_nothing() {
        let registry = MappingRegistry::builtin();
        assert!(registry.find(&Specifier::parse("totally_bogus")).is_none());
    }

    #[test]
    fn weak_match_catches_embedded_revision() {
        let key = MappingKey::parse("1.12.2-stable_39", "https://example.com/a.zip").unwrap();
        assert!(key.matches_loose(&Specifier::parse("v39-custom")));
        assert!(!key.matches_loose(&Specifier::parse("v40-custom")));
    }
}
