//! CLI argument definitions using clap.
//!
//! `helm-unused-values [flags] <TEMPLATES_DIR>` reads
//! `<TEMPLATES_DIR>/../values.yaml` and reports keys no template uses.

use std::path::PathBuf;

use clap::Parser;

use crate::core::SearchTool;

#[derive(Debug, Clone, Parser)]
#[command(name = "helm-unused-values", author, version, about, long_about = None)]
pub struct Arguments {
    /// Chart templates directory (values are read from ../values.yaml)
    pub templates_dir: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_colors: bool,

    /// Print the report as JSON (implies --no-colors and --quiet)
    #[arg(long)]
    pub json: bool,

    /// Only print the report (no banner, progress or warnings)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print how each key was resolved
    #[arg(long)]
    pub debug: bool,

    /// Also list keys that are used, directly or via patterns
    #[arg(long)]
    pub show_all_keys: bool,

    /// Only analyze keys containing this substring
    #[arg(long, value_name = "SUBSTR")]
    pub filter: Option<String>,

    /// Exit with this code when unused keys are found
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub exit_code: u8,

    /// Search backend
    #[arg(
        long,
        value_enum,
        env = "HELM_UNUSED_VALUES_SEARCH_TOOL",
        default_value_t = SearchTool::Auto
    )]
    pub search_tool: SearchTool,

    /// Fail instead of falling back to the builtin scanner when
    /// --search-tool external cannot find `rg`
    #[arg(long)]
    pub no_fallback: bool,

    /// Number of worker threads (0 = auto)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub parallelism: usize,
}
