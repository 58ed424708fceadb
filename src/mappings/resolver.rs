use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::registry::{MappingKey, MappingRegistry};
use super::specifier::Specifier;
use crate::catalog::VersionCatalog;
use crate::error::{RemapError, RemapResult};
use crate::fetch::{ArtifactFetcher, DownloadSummary};

/// Entries extracted from a mapping archive.
pub const WANTED_FILES: &[&str] = &["fields.csv", "methods.csv", "params.csv"];
/// Files that must exist non-empty for a mapping directory to be usable.
pub const REQUIRED_FILES: &[&str] = &["fields.csv", "methods.csv"];

/// Where a resolved mapping entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSource {
    /// Explicit user-supplied directory.
    Custom,
    /// Present in the local mappings directory under the specifier's name.
    Bundled,
    /// Fetched (now or previously) from a remote archive.
    Downloaded,
    /// Found in the external Gradle MCP cache.
    External,
}

impl fmt::Display for MappingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MappingSource::Custom => "custom",
            MappingSource::Bundled => "bundled",
            MappingSource::Downloaded => "downloaded",
            MappingSource::External => "external cache",
        };
        f.write_str(label)
    }
}

/// A resolved mapping: a named directory holding the CSV name tables.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    pub name: String,
    pub directory: PathBuf,
    pub source: MappingSource,
}

impl MappingEntry {
    /// `fields.csv` and `methods.csv` exist and are non-empty.
    pub fn is_valid(&self) -> bool {
        ArtifactFetcher::has_required_files(&self.directory, REQUIRED_FILES)
    }

    pub fn fields_csv(&self) -> PathBuf {
        self.directory.join("fields.csv")
    }

    pub fn methods_csv(&self) -> PathBuf {
        self.directory.join("methods.csv")
    }

    /// Optional parameter-name table.
    pub fn params_csv(&self) -> Option<PathBuf> {
        let path = self.directory.join("params.csv");
        path.exists().then_some(path)
    }
}

impl fmt::Display for MappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.source)
    }
}

/// Resolves version specifiers to local mapping directories, consulting the
/// custom override, the local cache and the downloadable registry, in that
/// order.
pub struct MappingResolver {
    mappings_dir: PathBuf,
    external_cache_dir: PathBuf,
    custom_dir: Option<PathBuf>,
    registry: MappingRegistry,
    fetcher: ArtifactFetcher,
}

impl MappingResolver {
    pub fn new(mappings_dir: PathBuf) -> RemapResult<Self> {
        Ok(Self {
            mappings_dir,
            external_cache_dir: crate::files::gradle_mcp_cache(),
            custom_dir: None,
            registry: MappingRegistry::builtin(),
            fetcher: ArtifactFetcher::new()?,
        })
    }

    /// Resolver rooted at the default data directory.
    pub fn with_default_dirs() -> RemapResult<Self> {
        Self::new(crate::files::mappings_dir())
    }

    /// Use an explicit mapping directory instead of any other source.
    pub fn with_custom_dir(mut self, dir: PathBuf) -> Self {
        self.custom_dir = Some(dir);
        self
    }

    /// Override the external cache location, mainly for tests.
    pub fn with_external_cache(mut self, dir: PathBuf) -> Self {
        self.external_cache_dir = dir;
        self
    }

    pub fn mappings_dir(&self) -> &Path {
        &self.mappings_dir
    }

    /// Registered downloadable keys, in registration order.
    pub fn keys(&self) -> &[MappingKey] {
        self.registry.keys()
    }

    /// Resolve a specifier, first source that succeeds wins: custom
    /// override, local directory named after the specifier, then the
    /// downloadable key registry (cache-first, network last).
    pub async fn resolve(&self, specifier: &str) -> RemapResult<MappingEntry> {
        let spec = Specifier::parse(specifier);

        if let Some(custom) = &self.custom_dir {
            if !ArtifactFetcher::has_required_files(custom, REQUIRED_FILES) {
                return Err(RemapError::InvalidMappingDir(custom.clone()));
            }
            info!("Using custom mappings from {:?}", custom);
            return Ok(MappingEntry {
                name: "custom".to_string(),
                directory: custom.clone(),
                source: MappingSource::Custom,
            });
        }

        let bundled = self.mappings_dir.join(spec.raw());
        if ArtifactFetcher::has_required_files(&bundled, REQUIRED_FILES) {
            info!("Using bundled mappings: {}", spec.raw());
            return Ok(MappingEntry {
                name: spec.raw().to_string(),
                directory: bundled,
                source: MappingSource::Bundled,
            });
        }

        let Some(key) = self.registry.find(&spec) else {
            return Err(RemapError::MappingNotFound(spec.raw().to_string()));
        };

        let target = self.mappings_dir.join(key.cache_dir_name());
        if ArtifactFetcher::has_required_files(&target, REQUIRED_FILES) {
            info!("Using cached mappings: {}", key.name());
            return Ok(MappingEntry {
                name: key.name(),
                directory: target,
                source: MappingSource::Downloaded,
            });
        }

        info!("Downloading mappings: {}", key.name());
        self.fetcher
            .fetch_and_extract(key.url(), &target, WANTED_FILES, REQUIRED_FILES)
            .await?;

        Ok(MappingEntry {
            name: key.name(),
            directory: target,
            source: MappingSource::Downloaded,
        })
    }

    /// Primary resolution, then a secondary lookup through the external
    /// cache: entries whose revision the catalog knows are matched by name
    /// containment. The catalog is refreshed first if it is still empty.
    pub async fn resolve_with_fallback(
        &self,
        specifier: &str,
        catalog: &mut VersionCatalog,
    ) -> RemapResult<MappingEntry> {
        match self.resolve(specifier).await {
            Err(RemapError::MappingNotFound(_)) => {}
            other => return other,
        }

        if catalog.is_empty() {
            catalog.refresh().await;
        }

        for entry in self.list_external()? {
            let folder = entry
                .directory
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if catalog.query(&folder).is_none() {
                debug!("Ignoring unknown external mappings: {}", entry.name);
                continue;
            }
            if entry.name.contains(specifier) {
                info!("Using external cache mappings: {}", entry.name);
                return Ok(entry);
            }
        }

        Err(RemapError::MappingNotFound(specifier.to_string()))
    }

    /// Enumerate all valid local mapping directories plus external-cache
    /// entries, in directory-listing order.
    pub fn list(&self) -> RemapResult<Vec<MappingEntry>> {
        let mut entries = self.list_local()?;
        entries.extend(self.list_external()?);
        Ok(entries)
    }

    fn list_local(&self) -> RemapResult<Vec<MappingEntry>> {
        let mut out = Vec::new();
        if !self.mappings_dir.exists() {
            return Ok(out);
        }

        for entry in read_dir(&self.mappings_dir)? {
            let path = entry.path();
            if path.is_dir() && ArtifactFetcher::has_required_files(&path, REQUIRED_FILES) {
                out.push(MappingEntry {
                    name: entry.file_name().to_string_lossy().to_string(),
                    directory: path,
                    source: MappingSource::Bundled,
                });
            }
        }
        Ok(out)
    }

    // External layout: <cache>/mcp_<channel>/<revision>-<mcversion>/, e.g.
    // mcp_stable/39-1.12. Listed as `<channel>_<folder>`.
    fn list_external(&self) -> RemapResult<Vec<MappingEntry>> {
        let mut out = Vec::new();
        if !self.external_cache_dir.exists() {
            return Ok(out);
        }

        for channel_entry in read_dir(&self.external_cache_dir)? {
            let channel_path = channel_entry.path();
            let channel_name = channel_entry.file_name().to_string_lossy().to_string();
            let Some(channel) = channel_name.strip_prefix("mcp_") else {
                continue;
            };
            if !channel_path.is_dir() {
                continue;
            }

            for version_entry in read_dir(&channel_path)? {
                let version_path = version_entry.path();
                if !version_path.is_dir()
                    || !ArtifactFetcher::has_required_files(&version_path, REQUIRED_FILES)
                {
                    continue;
                }
                let folder = version_entry.file_name().to_string_lossy().to_string();
                out.push(MappingEntry {
                    name: format!("{}_{}", channel, folder),
                    directory: version_path,
                    source: MappingSource::External,
                });
            }
        }
        Ok(out)
    }

    /// Fetch every registered archive that is not already cached,
    /// sequentially. Failures are counted, never fatal.
    pub async fn download_all(&self) -> DownloadSummary {
        let mut summary = DownloadSummary::default();

        for key in self.registry.keys() {
            let target = self.mappings_dir.join(key.cache_dir_name());
            if ArtifactFetcher::has_required_files(&target, REQUIRED_FILES) {
                debug!("Already have: {}", key.name());
                summary.succeeded += 1;
                continue;
            }

            match self
                .fetcher
                .fetch_and_extract(key.url(), &target, WANTED_FILES, REQUIRED_FILES)
                .await
            {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    warn!("Failed to download {}: {}", key.name(), e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

fn read_dir(dir: &Path) -> RemapResult<impl Iterator<Item = std::fs::DirEntry>> {
    let entries = std::fs::read_dir(dir).map_err(|e| RemapError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(entries.filter_map(Result::ok))
}
