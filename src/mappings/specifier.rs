use std::fmt;

/// Mapping release channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Stable,
    Snapshot,
}

impl MappingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingKind::Stable => "stable",
            MappingKind::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-supplied version specifier, parsed into its structural parts.
///
/// Accepted forms:
///   `stable_39`, `snapshot_20171003`
///   `1.12.2-stable_39`, `1.12.2-snapshot_20180814`
///   `1.12.2` (bare MC version), `39` (bare revision)
///
/// The raw text is kept alongside the parts: registry matching is
/// deliberately first-match-wins over raw text (see `MappingKey`), so an
/// ambiguous specifier resolves to the earliest registered key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    raw: String,
    mc_version: Option<String>,
    kind: Option<MappingKind>,
    revision: Option<String>,
}

impl Specifier {
    pub fn parse(input: &str) -> Self {
        let raw = input.trim();

        let (head, tail) = match raw.split_once('-') {
            Some((head, tail)) => (Some(head), tail),
            None => (None, raw),
        };

        let (kind, revision) = match tail.split_once('_') {
            Some(("stable", rev)) => (Some(MappingKind::Stable), Some(rev)),
            Some(("snapshot", rev)) => (Some(MappingKind::Snapshot), Some(rev)),
            // Unknown channel name; keep the revision part for matching.
            Some((_, rev)) => (None, Some(rev)),
            None => (None, None),
        };

        let (mc_version, revision) = if head.is_some() {
            (head, revision)
        } else if kind.is_none() && revision.is_none() {
            // A bare `1.12.2` is an MC version, a bare `39` a revision.
            if tail.contains('.') {
                (Some(tail), None)
            } else {
                (None, Some(tail))
            }
        } else {
            (None, revision)
        };

        Self {
            raw: raw.to_string(),
            mc_version: mc_version.map(str::to_string),
            kind,
            revision: revision.map(str::to_string),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn mc_version(&self) -> Option<&str> {
        self.mc_version.as_deref()
    }

    pub fn kind(&self) -> Option<MappingKind> {
        self.kind
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_channel_form() {
        let spec = Specifier::parse("stable_39");
        assert_eq!(spec.mc_version(), None);
        assert_eq!(spec.kind(), Some(MappingKind::Stable));
        assert_eq!(spec.revision(), Some("39"));
    }

    #[test]
    fn parse_qualified_form() {
        let spec = Specifier::parse("1.12.2-stable_39");
        assert_eq!(spec.mc_version(), Some("1.12.2"));
        assert_eq!(spec.kind(), Some(MappingKind::Stable));
        assert_eq!(spec.revision(), Some("39"));
    }

    #[test]
    fn parse_snapshot_form() {
        let spec = Specifier::parse("snapshot_20171003");
        assert_eq!(spec.kind(), Some(MappingKind::Snapshot));
        assert_eq!(spec.revision(), Some("20171003"));
    }

    #[test]
    fn parse_bare_mc_version() {
        let spec = Specifier::parse("1.12.2");
        assert_eq!(spec.mc_version(), Some("1.12.2"));
        assert_eq!(spec.kind(), None);
        assert_eq!(spec.revision(), None);
    }

    #[test]
    fn parse_bare_revision() {
        let spec = Specifier::parse("39");
        assert_eq!(spec.mc_version(), None);
        assert_eq!(spec.revision(), Some("39"));
    }

    #[test]
    fn raw_text_is_preserved() {
        assert_eq!(Specifier::parse("  stable_39 ").raw(), "stable_39");
    }
}
