//! Runs one analysis: resolve flags, pick a search backend, extract keys and
//! classify them.
//!
//! # Returns
//! - `Ok(RunResult)` with the validated config and the finished analysis
//! - `Err` on invalid flags or paths, unparsable values, a missing `rg` with
//!   `--no-fallback`, a fatal search error, or an interrupt

use anyhow::{Context, Result};

use super::args::Arguments;
use crate::{
    config::Config,
    core::{Analysis, Analyzer, SearchBackend, extract_keys, select_backend},
    logger,
};

pub struct RunResult {
    pub config: Config,
    pub analysis: Analysis,
}

pub fn run(args: Arguments) -> Result<RunResult> {
    let config = Config::from_args(&args)?;

    logger::set_quiet(config.quiet);
    logger::set_debug(config.debug);
    if !config.colors {
        colored::control::set_override(false);
    }

    let backend = select_backend(config.search_tool, config.allow_fallback)?;
    match &backend {
        SearchBackend::Ripgrep(rg) => {
            crate::log!("search"; "using ripgrep ({})", rg.program().display())
        }
        SearchBackend::Builtin(_) => crate::log!("search"; "using builtin scanner"),
    }

    let keys = extract_keys(&config.values_file, config.filter.as_deref())?;
    crate::log!(
        "analyze";
        "{} keys from {}",
        keys.len(),
        config.values_file.display()
    );

    let analysis = Analyzer::new(backend, &config.templates_dir)
        .with_workers(config.workers)
        .with_progress(!config.quiet)
        .analyze(&keys)
        .with_context(|| format!("failed to analyze {}", config.templates_dir.display()))?;

    Ok(RunResult { config, analysis })
}
