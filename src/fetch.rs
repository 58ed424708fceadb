// ─── Artifact Fetcher ───
// Shared HTTP download + archive extraction with idempotent, cache-aware
// behavior. Both the mapping and the library paths go through here.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{RemapError, RemapResult};
use crate::http::build_http_client;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a bulk download loop. Individual failures are counted,
/// never fatal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Downloads artifacts one at a time, skipping anything already on disk.
pub struct ArtifactFetcher {
    client: Client,
}

impl ArtifactFetcher {
    pub fn new() -> RemapResult<Self> {
        Ok(Self {
            client: build_http_client(CONNECT_TIMEOUT, READ_TIMEOUT)?,
        })
    }

    /// Check that every file in `required` exists non-empty under `dir`.
    pub fn has_required_files(dir: &Path, required: &[&str]) -> bool {
        required.iter().all(|name| {
            std::fs::metadata(dir.join(name))
                .map(|m| m.is_file() && m.len() > 0)
                .unwrap_or(false)
        })
    }

    /// Download a zip archive from `url` and extract the `wanted` entries
    /// into `target_dir`, discarding everything else.
    ///
    /// Returns without any network call when `target_dir` already satisfies
    /// the required-files predicate. After extraction the predicate is
    /// checked again, which catches a 200 response carrying the wrong
    /// archive. Nothing is written before the status check, so a failed
    /// request leaves no partial artifacts.
    pub async fn fetch_and_extract(
        &self,
        url: &str,
        target_dir: &Path,
        wanted: &[&str],
        required: &[&str],
    ) -> RemapResult<()> {
        if Self::has_required_files(target_dir, required) {
            debug!("Already cached, skipping download: {:?}", target_dir);
            return Ok(());
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemapError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let cursor = std::io::Cursor::new(&bytes[..]);
        let mut archive = zip::ZipArchive::new(cursor)?;

        std::fs::create_dir_all(target_dir).map_err(|e| RemapError::Io {
            path: target_dir.to_path_buf(),
            source: e,
        })?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_string();
            if !wanted.contains(&name.as_str()) {
                continue;
            }

            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;

            let out_path = target_dir.join(&name);
            std::fs::write(&out_path, contents).map_err(|e| RemapError::Io {
                path: out_path.clone(),
                source: e,
            })?;
            debug!("Extracted: {}", name);
        }

        if !Self::has_required_files(target_dir, required) {
            return Err(RemapError::IncompleteArchive {
                url: url.to_string(),
                dir: target_dir.to_path_buf(),
            });
        }

        Ok(())
    }

    /// Download a single file to `dest` verbatim, skipping when it already
    /// exists. Returns `true` when a download actually occurred.
    pub async fn fetch_file(&self, url: &str, dest: &Path) -> RemapResult<bool> {
        if dest.exists() {
            debug!("Already downloaded: {:?}", dest);
            return Ok(false);
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RemapError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemapError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| RemapError::Io {
                path: dest.to_path_buf(),
                source: e,
            })?;

        debug!("Downloaded: {} -> {:?}", url, dest);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Connection refused is immediate on this port; any test hitting it
    // would fail loudly if a network call were actually attempted.
    const DEAD_URL: &str = "http://127.0.0.1:9/unreachable.zip";

    fn write_file(dir: &Path, name: &str, contents: &[u8]) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn required_files_predicate() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!ArtifactFetcher::has_required_files(
            dir.path(),
            &["fields.csv", "methods.csv"]
        ));

        write_file(dir.path(), "fields.csv", b"searge,name\n");
        write_file(dir.path(), "methods.csv", b"");
        // methods.csv exists but is empty
        assert!(!ArtifactFetcher::has_required_files(
            dir.path(),
            &["fields.csv", "methods.csv"]
        ));

        write_file(dir.path(), "methods.csv", b"searge,name\n");
        assert!(ArtifactFetcher::has_required_files(
            dir.path(),
            &["fields.csv", "methods.csv"]
        ));
    }

    #[tokio::test]
    async fn cached_target_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "fields.csv", b"a\n");
        write_file(dir.path(), "methods.csv", b"b\n");

        let fetcher = ArtifactFetcher::new().unwrap();
        fetcher
            .fetch_and_extract(
                DEAD_URL,
                dir.path(),
                &["fields.csv", "methods.csv", "params.csv"],
                &["fields.csv", "methods.csv"],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_download_leaves_no_partial_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("1.12.2");

        let fetcher = ArtifactFetcher::new().unwrap();
        let result = fetcher
            .fetch_and_extract(
                DEAD_URL,
                &target,
                &["fields.csv", "methods.csv", "params.csv"],
                &["fields.csv", "methods.csv"],
            )
            .await;

        assert!(matches!(result, Err(RemapError::Http(_))));
        assert!(!ArtifactFetcher::has_required_files(
            &target,
            &["fields.csv", "methods.csv"]
        ));
    }

    #[tokio::test]
    async fn existing_file_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gson-2.8.0.jar");
        std::fs::write(&dest, b"jar bytes").unwrap();

        let fetcher = ArtifactFetcher::new().unwrap();
        let downloaded = fetcher.fetch_file(DEAD_URL, &dest).await.unwrap();
        assert!(!downloaded);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.jar");

        let fetcher = ArtifactFetcher::new().unwrap();
        let result = fetcher.fetch_file(DEAD_URL, &dest).await;
        assert!(matches!(result, Err(RemapError::Http(_))));
        assert!(!dest.exists());
    }
}
