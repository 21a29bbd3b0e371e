//! helm-unused-values - find values.yaml keys no Helm template uses
//!
//! Every key in a chart's `values.yaml` is flattened to a dotted path and
//! searched for in the chart templates, first as a direct `.Values.<key>`
//! reference, then through a fixed set of helper-call patterns. Keys that
//! match neither are reported as unused.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, run, report, exit status)
//! - `config`: Flag validation and chart path resolution
//! - `core`: Key extraction, pattern registry, search backends and analysis
//! - `error`: Typed errors returned by the library
//! - `logger`: Stderr logging macros and progress line
//! - `state`: Process-wide shutdown flag

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logger;
pub mod state;
