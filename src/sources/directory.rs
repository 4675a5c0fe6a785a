//! Tables read from `<code>.json` files

use super::{parse_table, SourceError, TokenSource};
use crate::tables::RawSource;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads tables from a directory laid out like the bundled `tokens/` one:
/// one `<code>.json` per language and an optional `global.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(&self, path: &Path, error: io::Error) -> SourceError {
        SourceError::Io {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

impl TokenSource for DirectorySource {
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.io_error(&self.root, e))?;

        let mut codes = BTreeSet::new();
        for entry in entries {
            let path = entry.map_err(|e| self.io_error(&self.root, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem.chars().count() == 2 {
                    codes.insert(stem.to_string());
                }
            }
        }

        tracing::debug!(root = %self.root.display(), count = codes.len(), "listed token tables");
        Ok(codes)
    }

    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError> {
        let path = self.root.join(format!("{code}.json"));
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "no token table");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(&path, e)),
        };
        parse_table(code, &json).map(Some)
    }
}
