//! Content module - scans the posts directory, parses front matter and
//! assembles post listings

mod category;
mod error;
mod field;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod scanner;

pub use category::CategoryMeta;
pub use error::{ContentError, Result};
pub use field::{ContentRecord, Field, Projection};
pub use frontmatter::{parse_date, FrontMatter, FrontMatterError};
pub use loader::{CategoryListing, ContentIndex};
pub use markdown::{html_escape, MarkdownRenderer};
pub use post::{Post, PostId, CONTENT_EXTENSIONS};
pub use scanner::{EntryKind, ScanEntry, Scanner};
