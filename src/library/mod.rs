// ─── Libraries ───
// Short-name registry over Maven coordinates, with a user-editable override
// config and jar downloads from a Maven-layout repository.

mod coordinate;
mod resolver;

pub use coordinate::LibraryCoordinate;
pub use resolver::LibraryResolver;
