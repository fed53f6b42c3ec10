//! Category descriptors

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::{ContentError, Result};

/// Display metadata for a category, read from its descriptor file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub title: String,
    pub description: String,
}

impl CategoryMeta {
    /// Load a descriptor file. Both `title` and `description` are required.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContentError::NotFound(format!(
                    "category descriptor {}",
                    path.display()
                )));
            }
            Err(e) => return Err(ContentError::fs(path, e)),
        };

        serde_json::from_str(&data).map_err(|e| ContentError::parse(path, e))
    }
}
