use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;
use regex::Regex;
use walkdir::WalkDir;

use super::{Hit, Search, ensure_dir, sort_hits};
use crate::{debug, error::SearchError, warn};

/// A readable template file, loaded once per root.
#[derive(Debug)]
struct TemplateFile {
    path: String,
    content: String,
}

/// In-process search backend: directory walk plus per-line regex scan.
///
/// Templates are read on the first search under a root and kept in memory;
/// the analyzer never writes to the templates directory.
#[derive(Debug, Default)]
pub struct Builtin {
    files: Mutex<HashMap<PathBuf, Arc<Vec<TemplateFile>>>>,
}

impl Builtin {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self, root: &Path) -> Arc<Vec<TemplateFile>> {
        let mut cache = self.files.lock();
        cache
            .entry(root.to_path_buf())
            .or_insert_with(|| Arc::new(load_files(root)))
            .clone()
    }
}

fn load_files(root: &Path) -> Vec<TemplateFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };
        // NUL marks a binary file; `rg` leaves those out of directory searches.
        if bytes.contains(&0) {
            debug!("scan"; "skipping binary file {}", path.display());
            continue;
        }
        files.push(TemplateFile {
            path: path.to_string_lossy().into_owned(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    debug!("scan"; "loaded {} files under {}", files.len(), root.display());
    files
}

impl Search for Builtin {
    fn search(&self, regex: &Regex, root: &Path) -> Result<Vec<Hit>, SearchError> {
        ensure_dir(root)?;

        let mut hits = Vec::new();
        for file in self.files(root).iter() {
            for (index, line) in file.content.lines().enumerate() {
                if regex.is_match(line) {
                    hits.push(Hit::new(file.path.clone(), index + 1, line));
                }
            }
        }

        sort_hits(&mut hits);
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}
