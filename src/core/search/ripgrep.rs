use std::{
    path::{Path, PathBuf},
    process::Command,
};

use regex::Regex;

use super::{EXTERNAL_TOOL, Hit, Search, ensure_dir, parse_hit_line, sort_hits};
use crate::{debug, error::SearchError};

/// Search backend that runs `rg`.
#[derive(Debug, Clone)]
pub struct Ripgrep {
    program: PathBuf,
}

impl Ripgrep {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Look up `rg` on `PATH`.
    pub fn locate() -> Option<Self> {
        which::which(EXTERNAL_TOOL).ok().map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, regex: &Regex, root: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "--no-config",
            "--no-heading",
            "--with-filename",
            "--null",
            "--line-number",
            "--case-sensitive",
            "--color",
            "never",
            "--hidden",
            "--no-ignore",
            "--no-messages",
            "-e",
        ])
        .arg(regex.as_str())
        .arg("--")
        .arg(root);
        cmd
    }
}

impl Search for Ripgrep {
    fn search(&self, regex: &Regex, root: &Path) -> Result<Vec<Hit>, SearchError> {
        ensure_dir(root)?;

        let output = match self.command(regex, root).output() {
            Ok(output) => output,
            Err(err) => {
                debug!("search"; "failed to run {}: {}", self.program.display(), err);
                return Ok(Vec::new());
            }
        };

        // 0 = matches, 1 = no matches. Anything else still may carry partial
        // results on stdout (e.g. some files were unreadable).
        match output.status.code() {
            Some(0) | Some(1) => {}
            code => {
                debug!(
                    "search";
                    "{} exited with {:?} for `{}`: {}",
                    EXTERNAL_TOOL,
                    code,
                    regex.as_str(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut hits: Vec<Hit> = stdout.lines().filter_map(parse_hit_line).collect();
        sort_hits(&mut hits);
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "ripgrep"
    }
}
