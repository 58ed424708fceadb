// ─── remapkit ───
// Acquisition backend for a JVM bytecode remapping toolchain: resolves short
// version specifiers to local mapping tables and library jars, downloading
// and caching on demand.
//
// Architecture:
//   catalog  — release-to-revision catalog with offline fallback
//   fetch    — shared HTTP download + zip extraction, cache-aware
//   mappings — specifier parsing, key registry, ranked-source resolution
//   library  — Maven coordinates, name registry, jar downloads
//   remap    — contract consumed by the remapping engine
//   files    — on-disk data layout
//
// Front ends (CLI, GUI) and the remapping engine itself live elsewhere and
// consume this crate through `MappingResolver`, `LibraryResolver` and the
// `remap` traits.

pub mod catalog;
pub mod error;
pub mod fetch;
pub mod files;
pub mod http;
pub mod library;
pub mod mappings;
pub mod remap;

pub use catalog::{CatalogEntry, CatalogSource, VersionCatalog};
pub use error::{RemapError, RemapResult};
pub use fetch::{ArtifactFetcher, DownloadSummary};
pub use library::{LibraryCoordinate, LibraryResolver};
pub use mappings::{
    MappingEntry, MappingKey, MappingKind, MappingResolver, MappingSource, Specifier,
};
pub use remap::{DiscardSink, ErrorSink, ProgressSink, Remapper, TracingSink};
