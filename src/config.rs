use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::{
    cli::args::Arguments,
    core::{SearchTool, default_workers},
    error::{AnalyzerError, Result},
};

pub const VALUES_FILE_NAME: &str = "values.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Validated run configuration, resolved from CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub templates_dir: PathBuf,
    pub values_file: PathBuf,
    pub filter: Option<String>,
    pub format: OutputFormat,
    pub colors: bool,
    pub quiet: bool,
    pub debug: bool,
    pub show_all_keys: bool,
    /// Exit code when unused keys are found.
    pub exit_code: u8,
    pub search_tool: SearchTool,
    pub allow_fallback: bool,
    pub workers: usize,
}

impl Config {
    pub fn from_args(args: &Arguments) -> Result<Self> {
        let config = Self {
            templates_dir: args.templates_dir.clone(),
            values_file: values_file_for(&args.templates_dir),
            filter: args.filter.clone(),
            format: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
            colors: !(args.no_colors || args.json),
            quiet: args.quiet || args.json,
            debug: args.debug,
            show_all_keys: args.show_all_keys,
            exit_code: args.exit_code,
            search_tool: args.search_tool,
            allow_fallback: !args.no_fallback,
            workers: if args.parallelism == 0 {
                default_workers()
            } else {
                args.parallelism
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check flag combinations and that the chart paths exist.
    pub fn validate(&self) -> Result<()> {
        if !self.allow_fallback && self.search_tool != SearchTool::External {
            return Err(AnalyzerError::InvalidConfig(
                "--no-fallback requires --search-tool external".to_string(),
            ));
        }

        if !self.templates_dir.exists() {
            return Err(AnalyzerError::InvalidConfig(format!(
                "templates directory does not exist: {}",
                self.templates_dir.display()
            )));
        }
        if !self.templates_dir.is_dir() {
            return Err(AnalyzerError::InvalidConfig(format!(
                "templates path is not a directory: {}",
                self.templates_dir.display()
            )));
        }

        if !self.values_file.is_file() {
            return Err(AnalyzerError::InvalidConfig(format!(
                "values file not found: {}",
                self.values_file.display()
            )));
        }
        File::open(&self.values_file).map_err(|source| AnalyzerError::Io {
            path: self.values_file.clone(),
            source,
        })?;

        Ok(())
    }
}

/// `values.yaml` next to the templates directory.
pub fn values_file_for(templates_dir: &Path) -> PathBuf {
    templates_dir.join("..").join(VALUES_FILE_NAME)
}
