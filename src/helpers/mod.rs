//! Helper functions for page templates
//!
//! URL generation, date formatting and small HTML builders shared by the
//! generator.

mod date;
mod html;
mod list;
mod url;

pub use date::*;
pub use html::*;
pub use list::*;
pub use url::*;
