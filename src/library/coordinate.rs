use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RemapError, RemapResult};

/// A three-part Maven coordinate.
///
/// Only the plain `groupId:artifactId:version` form is supported; the
/// library registry has no use for classifiers or packaging overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LibraryCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl LibraryCoordinate {
    /// Parse a coordinate string.
    ///
    /// # Examples
    /// ```
    /// use remapkit::LibraryCoordinate;
    /// let c = LibraryCoordinate::parse("com.google.code.gson:gson:2.8.0").unwrap();
    /// assert_eq!(c.group_id, "com.google.code.gson");
    /// ```
    pub fn parse(coord: &str) -> RemapResult<Self> {
        let parts: Vec<&str> = coord.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self {
                    group_id: group.to_string(),
                    artifact_id: artifact.to_string(),
                    version: version.to_string(),
                })
            }
            _ => Err(RemapError::InvalidCoordinate(coord.to_string())),
        }
    }

    /// Construct the group path portion (`com/google/code/gson`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// Build the artifact filename: `artifactId-version.jar`.
    pub fn filename(&self) -> String {
        format!("{}-{}.jar", self.artifact_id, self.version)
    }

    /// Construct the full URL for this artifact under the given repository
    /// root.
    ///
    /// Template:
    /// `<repo>/<group_path>/<artifact_id>/<version>/<filename>`
    pub fn url(&self, repo_root: &str) -> String {
        let base = repo_root.trim_end_matches('/');
        format!(
            "{}/{}/{}/{}/{}",
            base,
            self.group_path(),
            self.artifact_id,
            self.version,
            self.filename()
        )
    }
}

impl fmt::Display for LibraryCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
