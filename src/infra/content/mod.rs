//! Markdown content source: frontmatter parsing, directory loading and the
//! in-memory post repository built from it.

mod frontmatter;
mod loader;
mod memory;

pub use frontmatter::{FrontmatterError, ParsedDocument, PostMeta, parse_document};
pub use loader::{ContentLoader, LoadDiagnostic, LoadReport};
pub use memory::InMemoryPostsRepo;
