//! Core analysis engine.
//!
//! - `values`: values.yaml → dotted keys
//! - `patterns`: the fixed registry of usage patterns
//! - `search`: regex search backends (ripgrep, builtin)
//! - `resolve`: per-key classification
//! - `analyzer`: parallel driver over all keys

pub mod analyzer;
pub mod key_usage;
pub mod patterns;
pub mod resolve;
pub mod search;
pub mod values;

pub use analyzer::{Analysis, Analyzer, Summary, default_workers};
pub use key_usage::{KeyUsage, UsageStatus};
pub use patterns::{INDIRECT_PATTERNS, Pattern, VALUES_ACCESSOR};
pub use resolve::{Resolver, rewrite_key};
pub use search::{Hit, Search, SearchBackend, SearchTool, select_backend};
pub use values::{extract_keys, extract_keys_from_str};
