//! Parallel key analysis.
//!
//! Keys are resolved on a dedicated, bounded rayon pool. Results land at the
//! index of their key, so the output order always mirrors extraction order.
//! Workers report completions on a channel drained by a progress thread,
//! which never blocks them.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
};

use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    core::{
        key_usage::{KeyUsage, UsageStatus},
        resolve::Resolver,
        search::{Search, SearchBackend},
    },
    error::{AnalyzerError, Result, SearchError},
    logger::ProgressLine,
    state,
};

/// Upper bound on the default worker count.
const MAX_DEFAULT_WORKERS: usize = 8;

/// Lower bound on the default worker count.
const MIN_DEFAULT_WORKERS: usize = 2;

/// `max(2, min(cpus, 8))`.
pub fn default_workers() -> usize {
    let cpus = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cpus.clamp(MIN_DEFAULT_WORKERS, MAX_DEFAULT_WORKERS)
}

/// Totals over a finished analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_keys: usize,
    pub used_keys: usize,
    pub unused_keys: usize,
    pub direct_keys: usize,
    pub pattern_keys: usize,
}

impl Summary {
    pub fn from_usages(usages: &[KeyUsage]) -> Self {
        let mut summary = Summary {
            total_keys: usages.len(),
            ..Default::default()
        };
        for usage in usages {
            match usage.status {
                UsageStatus::Direct => summary.direct_keys += 1,
                UsageStatus::Pattern { .. } => summary.pattern_keys += 1,
                UsageStatus::Unused => summary.unused_keys += 1,
            }
        }
        summary.used_keys = summary.direct_keys + summary.pattern_keys;
        summary
    }
}

/// Result of analyzing every key.
#[derive(Debug)]
pub struct Analysis {
    /// One usage per key, in extraction order.
    pub usages: Vec<KeyUsage>,
    used_keys: HashSet<String>,
}

impl Analysis {
    pub fn used_keys(&self) -> &HashSet<String> {
        &self.used_keys
    }

    pub fn summary(&self) -> Summary {
        Summary::from_usages(&self.usages)
    }

    pub fn has_unused(&self) -> bool {
        self.usages.iter().any(|usage| !usage.is_used())
    }
}

pub struct Analyzer {
    backend: SearchBackend,
    templates_dir: PathBuf,
    workers: usize,
    progress: bool,
}

impl Analyzer {
    pub fn new(backend: SearchBackend, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            templates_dir: templates_dir.into(),
            workers: default_workers(),
            progress: false,
        }
    }

    /// Worker count; `0` keeps the default.
    pub fn with_workers(mut self, workers: usize) -> Self {
        if workers > 0 {
            self.workers = workers;
        }
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn backend(&self) -> &SearchBackend {
        &self.backend
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Resolve every key.
    ///
    /// Stops dispatching keys once shutdown is requested or a fatal search
    /// error occurs; in both cases no partial analysis is returned.
    pub fn analyze(&self, keys: &[String]) -> Result<Analysis> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("analyze-{i}"))
            .build()
            .map_err(|e| {
                AnalyzerError::InvalidConfig(format!("failed to start worker pool: {e}"))
            })?;

        crate::debug!(
            "analyze";
            "{} keys, {} workers, {} backend",
            keys.len(),
            self.workers,
            self.backend.name()
        );

        let resolver = Resolver::new(&self.backend, &self.templates_dir);
        let used_keys = Mutex::new(HashSet::new());
        let first_error: Mutex<Option<SearchError>> = Mutex::new(None);
        let failed = AtomicBool::new(false);

        let progress = if self.progress {
            ProgressLine::new("analyze", keys.len())
        } else {
            ProgressLine::disabled("analyze", keys.len())
        };

        let mut results: Vec<Option<KeyUsage>> = Vec::with_capacity(keys.len());
        let (done_tx, done_rx) = mpsc::channel::<()>();

        thread::scope(|scope| {
            let updater = scope.spawn(move || {
                let mut done = 0;
                for () in done_rx {
                    done += 1;
                    progress.update(done);
                }
                progress.finish();
            });

            pool.install(|| {
                keys.par_iter()
                    .map_with(done_tx, |done_tx, key| {
                        if state::is_shutdown() || failed.load(Ordering::SeqCst) {
                            return None;
                        }

                        let usage = match resolver.resolve(key) {
                            Ok(usage) => usage,
                            Err(err) => {
                                failed.store(true, Ordering::SeqCst);
                                first_error.lock().get_or_insert(err);
                                return None;
                            }
                        };

                        if usage.is_used() {
                            used_keys.lock().insert(usage.key.clone());
                        }
                        done_tx.send(()).ok();
                        Some(usage)
                    })
                    .collect_into_vec(&mut results);
            });

            updater.join().ok();
        });

        if let Some(err) = first_error.into_inner() {
            return Err(err.into());
        }

        let usages = results
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(AnalyzerError::Interrupted)?;

        Ok(Analysis {
            usages,
            used_keys: used_keys.into_inner(),
        })
    }
}
