// ─── Mappings ───
// Specifier parsing, the ordered key registry and resolution against the
// ranked sources: custom override, local cache, remote archive, external
// build-tool cache.

mod registry;
mod resolver;
mod specifier;

pub use registry::{MappingKey, MappingRegistry};
pub use resolver::{
    MappingEntry, MappingResolver, MappingSource, REQUIRED_FILES, WANTED_FILES,
};
pub use specifier::{MappingKind, Specifier};
