//! Regex search over a templates directory.
//!
//! Two interchangeable backends implement [`Search`]:
//! - [`Ripgrep`]: shells out to `rg`
//! - [`Builtin`]: walks the directory and scans lines in-process
//!
//! Both return the same [`Hit`] records, so the resolver never knows which
//! one is in use.

mod builtin;
mod ripgrep;

use std::{fmt, path::Path};

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use regex::Regex;

pub use builtin::Builtin;
pub use ripgrep::Ripgrep;

use crate::error::{AnalyzerError, SearchError};

/// Name of the external search tool looked up on `PATH`.
pub const EXTERNAL_TOOL: &str = "rg";

/// One matching line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hit {
    pub path: String,
    /// 1-based line number.
    pub line: usize,
    pub text: String,
}

impl Hit {
    pub fn new(path: impl Into<String>, line: usize, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            text: text.into(),
        }
    }

    /// `path:line`, the form shown in reports.
    pub fn location(&self) -> String {
        format!("{}:{}", self.path, self.line)
    }
}

/// Parse one `rg --null` output line: `path\0line:match`.
///
/// The NUL keeps paths containing `:` intact. After it, only the first colon
/// is significant; the match text may contain more.
pub fn parse_hit_line(line: &str) -> Option<Hit> {
    let (path, rest) = line.split_once('\0')?;
    let (line_number, text) = rest.split_once(':')?;
    if path.is_empty() {
        return None;
    }
    Some(Hit::new(path, line_number.parse().ok()?, text))
}

/// Compile a search regex. A failure here is fatal for the whole run.
pub fn compile(pattern: &str) -> Result<Regex, SearchError> {
    Regex::new(pattern).map_err(|source| SearchError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

fn ensure_dir(root: &Path) -> Result<(), SearchError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(SearchError::NotADirectory(root.to_path_buf()))
    }
}

fn sort_hits(hits: &mut [Hit]) {
    hits.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.line.cmp(&b.line)));
}

/// Search one regex under one directory.
#[enum_dispatch]
pub trait Search {
    /// Every line under `root` matching `regex`, sorted by path then line.
    ///
    /// Unreadable files are skipped, never fatal.
    fn search(&self, regex: &Regex, root: &Path) -> Result<Vec<Hit>, SearchError>;

    /// Short backend name for banners and debug output.
    fn name(&self) -> &'static str;
}

#[enum_dispatch(Search)]
#[derive(Debug)]
pub enum SearchBackend {
    Ripgrep(Ripgrep),
    Builtin(Builtin),
}

/// Which backend the operator asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchTool {
    /// Use `rg` when it is on PATH, the builtin scanner otherwise
    #[default]
    Auto,
    /// Use `rg`
    External,
    /// Use the builtin scanner
    Builtin,
}

impl fmt::Display for SearchTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchTool::Auto => write!(f, "auto"),
            SearchTool::External => write!(f, "external"),
            SearchTool::Builtin => write!(f, "builtin"),
        }
    }
}

/// Look up the external tool and pick a backend.
///
/// A failed lookup falls back to the builtin scanner with a warning, unless
/// `external` was requested without fallback.
pub fn select_backend(
    tool: SearchTool,
    allow_fallback: bool,
) -> Result<SearchBackend, AnalyzerError> {
    match tool {
        SearchTool::Builtin => Ok(Builtin::new().into()),
        SearchTool::Auto => Ok(match Ripgrep::locate() {
            Some(rg) => rg.into(),
            None => {
                crate::warn!(
                    "`{}` not found on PATH, falling back to the builtin scanner",
                    EXTERNAL_TOOL
                );
                Builtin::new().into()
            }
        }),
        SearchTool::External => match Ripgrep::locate() {
            Some(rg) => Ok(rg.into()),
            None if allow_fallback => {
                crate::warn!(
                    "--search-tool external requested but `{}` was not found on PATH, falling back to the builtin scanner",
                    EXTERNAL_TOOL
                );
                Ok(Builtin::new().into())
            }
            None => Err(AnalyzerError::DependencyMissing(format!(
                "`{}` was not found on PATH",
                EXTERNAL_TOOL
            ))),
        },
    }
}
