use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::coordinate::LibraryCoordinate;
use crate::error::{RemapError, RemapResult};
use crate::fetch::{ArtifactFetcher, DownloadSummary};

const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";
const CONFIG_FILE: &str = "libs.txt";

// Common libraries used in Minecraft modding, in listing order. A name in
// the user config overrides the entry here.
const BUILTIN_LIBRARIES: &[(&str, &str)] = &[
    // JSON
    ("gson", "com.google.code.gson:gson:2.8.0"),
    ("json-simple", "com.googlecode.json-simple:json-simple:1.1.1"),
    // Jackson
    ("jackson-core", "com.fasterxml.jackson.core:jackson-core:2.9.9"),
    ("jackson-databind", "com.fasterxml.jackson.core:jackson-databind:2.9.9"),
    ("jackson-annotations", "com.fasterxml.jackson.core:jackson-annotations:2.9.9"),
    // Google
    ("guava", "com.google.guava:guava:21.0"),
    // Apache Commons
    ("commons-io", "commons-io:commons-io:2.5"),
    ("commons-lang3", "org.apache.commons:commons-lang3:3.5"),
    ("commons-codec", "commons-codec:commons-codec:1.10"),
    ("commons-compress", "org.apache.commons:commons-compress:1.8.1"),
    // Apache HTTP
    ("httpclient", "org.apache.httpcomponents:httpclient:4.5.2"),
    ("httpcore", "org.apache.httpcomponents:httpcore:4.4.4"),
    // Logging
    ("log4j-api", "org.apache.logging.log4j:log4j-api:2.8.1"),
    ("log4j-core", "org.apache.logging.log4j:log4j-core:2.8.1"),
    ("slf4j-api", "org.slf4j:slf4j-api:1.7.25"),
    // Networking
    ("netty-all", "io.netty:netty-all:4.1.9.Final"),
    // Annotations
    ("jsr305", "com.google.code.findbugs:jsr305:3.0.1"),
    ("javax.annotation-api", "javax.annotation:javax.annotation-api:1.3.2"),
    ("jsr311-api", "javax.ws.rs:jsr311-api:1.1.1"),
    // LWJGL
    ("lwjgl", "org.lwjgl.lwjgl:lwjgl:2.9.3"),
    ("lwjgl_util", "org.lwjgl.lwjgl:lwjgl_util:2.9.3"),
    // Input handling
    ("jinput", "net.java.jinput:jinput:2.0.5"),
    ("jutils", "net.java.jutils:jutils:1.0.0"),
    // Collections
    ("trove4j", "net.sf.trove4j:trove4j:3.0.3"),
    ("fastutil", "it.unimi.dsi:fastutil:7.1.0"),
    // Math
    ("vecmath", "javax.vecmath:vecmath:1.5.2"),
    ("joml", "org.joml:joml:1.9.25"),
    // Internationalization
    ("icu4j", "com.ibm.icu:icu4j:60.2"),
    // Bytecode manipulation
    ("asm", "org.ow2.asm:asm:5.2"),
    ("asm-commons", "org.ow2.asm:asm-commons:5.2"),
    ("asm-tree", "org.ow2.asm:asm-tree:5.2"),
    ("asm-analysis", "org.ow2.asm:asm-analysis:5.2"),
    ("asm-util", "org.ow2.asm:asm-util:5.2"),
    // Compression
    ("lzma", "com.github.jponge:lzma-java:1.3"),
    // Native access
    ("jna", "net.java.dev.jna:jna:4.4.0"),
    ("jna-platform", "net.java.dev.jna:jna-platform:4.4.0"),
    ("oshi-core", "com.github.oshi:oshi-core:3.4.0"),
    // Cryptography
    ("bcprov-jdk15on", "org.bouncycastle:bcprov-jdk15on:1.58"),
    // Command line parsing
    ("jopt-simple", "net.sf.jopt-simple:jopt-simple:5.0.3"),
    // macOS bridge
    ("java-objc-bridge", "ca.weblite:java-objc-bridge:1.0.0"),
];

// Starting point written when no config exists. Deliberately a curated
// subset of the builtin table, not a full mirror.
const DEFAULT_CONFIG: &str = "\
# Library configuration
# Format: name=groupId:artifactId:version
# Lines starting with # are comments
# Add your own libraries below or modify versions

# === Built-in Libraries ===

# JSON
gson=com.google.code.gson:gson:2.8.0
json-simple=com.googlecode.json-simple:json-simple:1.1.1

# Google
guava=com.google.guava:guava:21.0

# Apache Commons
commons-io=commons-io:commons-io:2.5
commons-lang3=org.apache.commons:commons-lang3:3.5
commons-codec=commons-codec:commons-codec:1.10

# Logging
log4j-api=org.apache.logging.log4j:log4j-api:2.8.1
log4j-core=org.apache.logging.log4j:log4j-core:2.8.1
slf4j-api=org.slf4j:slf4j-api:1.7.25

# Networking
netty-all=io.netty:netty-all:4.1.9.Final

# Annotations
jsr305=com.google.code.findbugs:jsr305:3.0.1

# Collections
trove4j=net.sf.trove4j:trove4j:3.0.3
fastutil=it.unimi.dsi:fastutil:7.1.0

# LWJGL
lwjgl=org.lwjgl.lwjgl:lwjgl:2.9.3
lwjgl_util=org.lwjgl.lwjgl:lwjgl_util:2.9.3

# Math
vecmath=javax.vecmath:vecmath:1.5.2

# Bytecode
asm=org.ow2.asm:asm:5.2
asm-commons=org.ow2.asm:asm-commons:5.2
asm-tree=org.ow2.asm:asm-tree:5.2

# === Custom Libraries ===
# Add your own libraries below:
";

/// Resolves short library names to Maven coordinates and fetches the
/// corresponding jars into the libs directory.
///
/// The effective registry is the builtin table merged with the user config:
/// an override wins by name, builtin listing order is preserved, names only
/// present in the config are appended in file order.
pub struct LibraryResolver {
    libs_dir: PathBuf,
    config_path: PathBuf,
    repo_root: String,
    overrides: Vec<(String, String)>,
    fetcher: ArtifactFetcher,
}

impl LibraryResolver {
    pub fn new(libs_dir: PathBuf) -> RemapResult<Self> {
        let config_path = libs_dir.join(CONFIG_FILE);
        let mut resolver = Self {
            libs_dir,
            config_path,
            repo_root: MAVEN_CENTRAL.to_string(),
            overrides: Vec::new(),
            fetcher: ArtifactFetcher::new()?,
        };
        resolver.load_config()?;
        Ok(resolver)
    }

    /// Resolver rooted at the default data directory.
    pub fn with_default_dirs() -> RemapResult<Self> {
        Self::new(crate::files::libraries_dir())
    }

    /// Override the repository root, mainly for tests.
    pub fn with_repository(mut self, repo_root: impl Into<String>) -> Self {
        self.repo_root = repo_root.into();
        self
    }

    fn load_config(&mut self) -> RemapResult<()> {
        if !self.config_path.exists() {
            self.write_default_config()?;
            return Ok(());
        }

        let text = std::fs::read_to_string(&self.config_path).map_err(|e| RemapError::Io {
            path: self.config_path.clone(),
            source: e,
        })?;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, coord)) = line.split_once('=') else {
                warn!("Skipping malformed line in {}: {}", CONFIG_FILE, line);
                continue;
            };
            let name = name.trim().to_string();
            let coord = coord.trim().to_string();
            match self.overrides.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = coord,
                None => self.overrides.push((name, coord)),
            }
        }
        Ok(())
    }

    fn write_default_config(&self) -> RemapResult<()> {
        std::fs::create_dir_all(&self.libs_dir).map_err(|e| RemapError::Io {
            path: self.libs_dir.clone(),
            source: e,
        })?;
        std::fs::write(&self.config_path, DEFAULT_CONFIG).map_err(|e| RemapError::Io {
            path: self.config_path.clone(),
            source: e,
        })?;
        info!("Wrote default library config: {:?}", self.config_path);
        Ok(())
    }

    /// The effective registry as `(name, coordinate)` pairs.
    pub fn effective(&self) -> Vec<(String, String)> {
        let mut all: Vec<(String, String)> = BUILTIN_LIBRARIES
            .iter()
            .map(|(name, coord)| (name.to_string(), coord.to_string()))
            .collect();

        for (name, coord) in &self.overrides {
            match all.iter_mut().find(|(n, _)| n == name) {
                Some(existing) => existing.1 = coord.clone(),
                None => all.push((name.clone(), coord.clone())),
            }
        }
        all
    }

    /// Look up a library by its short name, override first.
    pub fn resolve_by_name(&self, name: &str) -> RemapResult<LibraryCoordinate> {
        let coord = self
            .overrides
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
            .or_else(|| {
                BUILTIN_LIBRARIES
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, c)| *c)
            })
            .ok_or_else(|| RemapError::LibraryNotFound(name.to_string()))?;

        LibraryCoordinate::parse(coord)
    }

    /// Local jar path for a coordinate.
    pub fn jar_path(&self, coord: &LibraryCoordinate) -> PathBuf {
        self.libs_dir.join(coord.filename())
    }

    /// Download one library jar, skipping when already present.
    pub async fn fetch(&self, coord: &LibraryCoordinate) -> RemapResult<PathBuf> {
        let dest = self.jar_path(coord);
        let url = coord.url(&self.repo_root);
        if self.fetcher.fetch_file(&url, &dest).await? {
            info!("Downloaded library: {}", coord);
        }
        Ok(dest)
    }

    /// Fetch every library in the effective registry, one at a time.
    /// Individual failures are counted and never abort the loop.
    pub async fn fetch_all(&self) -> DownloadSummary {
        let mut summary = DownloadSummary::default();

        for (name, coord) in self.effective() {
            let parsed = match LibraryCoordinate::parse(&coord) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    summary.failed += 1;
                    continue;
                }
            };
            match self.fetch(&parsed).await {
                Ok(_) => summary.succeeded += 1,
                Err(e) => {
                    warn!("Failed to download {}: {}", name, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Library download complete: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        summary
    }

    pub fn libs_dir(&self) -> &Path {
        &self.libs_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The immutable builtin table.
    pub fn builtin() -> &'static [(&'static str, &'static str)] {
        BUILTIN_LIBRARIES
    }
}
