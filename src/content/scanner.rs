//! Two-level content directory scanner
//!
//! The content root holds one directory per category, each holding post
//! files and a descriptor. Nothing above or below that level is visited.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::error::{ContentError, Result};
use super::post::{PostId, CONTENT_EXTENSIONS};

/// What a scanned file is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Post(PostId),
    Descriptor,
    Other,
}

/// A file found one level below a category directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub category: String,
    pub file_name: String,
    pub kind: EntryKind,
}

impl ScanEntry {
    pub fn post_id(&self) -> Option<&PostId> {
        match &self.kind {
            EntryKind::Post(id) => Some(id),
            _ => None,
        }
    }

    /// Relative path of the form `category/file_name`
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.category, self.file_name)
    }
}

/// Scans a content root for category directories and their files
pub struct Scanner<'a> {
    root: &'a Path,
    descriptor: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(root: &'a Path, descriptor: &'a str) -> Self {
        Self { root, descriptor }
    }

    /// List every file in every category, ordered by category then file name
    pub fn scan(&self) -> Result<Vec<ScanEntry>> {
        let metadata = fs::metadata(self.root).map_err(|e| ContentError::fs(self.root, e))?;
        if !metadata.is_dir() {
            return Err(ContentError::fs(
                self.root,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }

        let mut entries = Vec::new();

        let walker = WalkDir::new(self.root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.into());
                ContentError::fs(&path, io::Error::from(e))
            })?;

            // Loose files at the root and directories inside categories are not content
            if entry.depth() != 2 || !entry.file_type().is_file() {
                continue;
            }

            match self.classify(entry.path()) {
                Some(scanned) => entries.push(scanned),
                None => tracing::debug!("Skipping non UTF-8 path {:?}", entry.path()),
            }
        }

        tracing::debug!("Scanned {} entries under {:?}", entries.len(), self.root);
        Ok(entries)
    }

    /// Post identifiers only, in scan order. A slug with both an `.mdx` and
    /// an `.md` file is listed once.
    pub fn post_ids(&self) -> Result<Vec<PostId>> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for entry in self.scan()? {
            if let EntryKind::Post(id) = entry.kind {
                if seen.insert(id.clone()) {
                    ids.push(id);
                } else {
                    tracing::debug!("Duplicate source for {}, keeping one", id);
                }
            }
        }

        Ok(ids)
    }

    fn classify(&self, path: &Path) -> Option<ScanEntry> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let category = path.parent()?.file_name()?.to_str()?.to_string();

        let kind = if file_name == self.descriptor {
            EntryKind::Descriptor
        } else if is_content_file(path) {
            let slug = path.file_stem()?.to_str()?;
            EntryKind::Post(PostId::new(category.clone(), slug))
        } else {
            EntryKind::Other
        };

        Some(ScanEntry {
            category,
            file_name,
            kind,
        })
    }
}

/// Path of a category directory under the content root
pub fn category_dir(root: &Path, category: &str) -> PathBuf {
    root.join(category)
}

/// Check if a file has a content extension
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan_two_levels() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "tech/b-post.mdx");
        touch(root, "tech/a-post.md");
        touch(root, "tech/meta.json");
        touch(root, "tech/cover.png");
        touch(root, "life/moving.mdx");
        touch(root, "README.md");
        touch(root, "tech/drafts/deep.mdx");
        touch(root, ".git/config.mdx");

        let entries = Scanner::new(root, "meta.json").scan().unwrap();
        let paths: Vec<_> = entries.iter().map(ScanEntry::relative_path).collect();
        assert_eq!(
            paths,
            vec![
                "life/moving.mdx",
                "tech/a-post.md",
                "tech/b-post.mdx",
                "tech/cover.png",
                "tech/meta.json",
            ]
        );
        assert_eq!(entries[4].kind, EntryKind::Descriptor);
        assert_eq!(entries[3].kind, EntryKind::Other);
        assert_eq!(
            entries[0].post_id(),
            Some(&PostId::new("life", "moving"))
        );
    }

    #[test]
    fn test_post_ids_exclude_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "tech/hello.mdx");
        touch(dir.path(), "tech/meta.json");

        let ids = Scanner::new(dir.path(), "meta.json").post_ids().unwrap();
        assert_eq!(ids, vec![PostId::new("tech", "hello")]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scanner::new(&dir.path().join("nope"), "meta.json")
            .scan()
            .unwrap_err();
        assert!(matches!(err, ContentError::FileSystem { .. }));
    }

    #[test]
    fn test_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "posts");
        let err = Scanner::new(&dir.path().join("posts"), "meta.json")
            .scan()
            .unwrap_err();
        assert!(matches!(err, ContentError::FileSystem { .. }));
    }

    #[test]
    fn test_is_content_file() {
        assert!(is_content_file(Path::new("tech/post.mdx")));
        assert!(is_content_file(Path::new("tech/post.md")));
        assert!(!is_content_file(Path::new("tech/meta.json")));
        assert!(!is_content_file(Path::new("tech/mdx")));
    }
}
