//! Usage resolution for a single key.
//!
//! A key is classified in three steps:
//! 1. **Direct**: a template references `.Values.<key>` on its own
//! 2. **Pattern**: a helper pattern references the (rewritten) key, or one of
//!    its parents after dropping trailing segments
//! 3. **Unused**: neither

use std::{collections::HashSet, path::Path};

use regex::Regex;

use crate::{
    core::{
        key_usage::KeyUsage,
        patterns::{INDIRECT_PATTERNS, Pattern, VALUES_ACCESSOR},
        search::{Hit, Search, SearchBackend, compile},
    },
    debug,
    error::SearchError,
};

/// Sections of the Keycloak sub-chart that templates read through `identity`.
const KEYCLOAK_SECTIONS: &[&str] = &[
    "identityKeycloak.postgresql",
    "identityKeycloak.resources",
    "identityKeycloak.containerSecurityContext",
    "identityKeycloak.podSecurityContext",
    "identityKeycloak.ingress",
];

/// Map a values key to the name templates use to reach it.
///
/// Rules are tried in order and the first one that fires wins; the result is
/// rewritten again until stable, so `rewrite_key(rewrite_key(k)) == rewrite_key(k)`.
pub fn rewrite_key(key: &str) -> String {
    let mut current = key.to_string();
    loop {
        let next = rewrite_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn rewrite_once(key: &str) -> String {
    if KEYCLOAK_SECTIONS.iter().any(|section| key.contains(section)) {
        key.replace("identityKeycloak.", "identity.")
    } else if key.contains("zeebe-gateway") {
        key.replace("zeebe-gateway.", "zeebeGateway.")
    } else if key.contains("serviceAccount.name") {
        key.replace("serviceAccount.name", "serviceAccountName")
    } else {
        key.to_string()
    }
}

/// Resolves keys against one templates directory with one backend.
///
/// Read-only: it never touches the registry, the key list or the filesystem.
pub struct Resolver<'a> {
    backend: &'a SearchBackend,
    templates_dir: &'a Path,
}

impl<'a> Resolver<'a> {
    pub fn new(backend: &'a SearchBackend, templates_dir: &'a Path) -> Self {
        Self {
            backend,
            templates_dir,
        }
    }

    pub fn resolve(&self, key: &str) -> Result<KeyUsage, SearchError> {
        let rewritten = rewrite_key(key);

        let accessor = compile(&Pattern::Direct.compose(key))?;
        let accessor_hits = self.backend.search(&accessor, self.templates_dir)?;
        let direct = standalone_hits(&accessor_hits, &accessor, &rewritten)?;
        if !direct.is_empty() {
            debug!("resolve"; "{} -> direct ({} hits)", key, direct.len());
            return Ok(KeyUsage::direct(key, direct));
        }

        for &pattern in INDIRECT_PATTERNS {
            if !pattern.accepts(&rewritten) {
                continue;
            }
            if let Some((parent_key, hits)) = self.search_with_truncation(pattern, &rewritten)? {
                debug!(
                    "resolve";
                    "{} -> {} via {} ({} hits)",
                    key,
                    pattern,
                    parent_key,
                    hits.len()
                );
                return Ok(KeyUsage::pattern(key, pattern, parent_key, hits));
            }
        }

        debug!("resolve"; "{} -> unused", key);
        Ok(KeyUsage::unused(key))
    }

    /// Search `pattern` for `key`, then for each shorter parent of `key`
    /// until something matches or no segment is left to drop.
    ///
    /// Returns the key that matched with its hits.
    fn search_with_truncation(
        &self,
        pattern: Pattern,
        key: &str,
    ) -> Result<Option<(String, Vec<Hit>)>, SearchError> {
        let mut candidate = key;
        loop {
            let regex = compile(&pattern.compose(candidate))?;
            let hits = self.backend.search(&regex, self.templates_dir)?;
            if !hits.is_empty() {
                return Ok(Some((candidate.to_string(), hits)));
            }

            match candidate.rsplit_once('.') {
                Some((parent, _)) => candidate = parent,
                None => return Ok(None),
            }
        }
    }
}

/// Accessor hits with at least one `.Values.<key>` that no helper pattern
/// consumes.
///
/// `{{ toYaml .Values.key | nindent 4 }}` contains the accessor but is an
/// indirect usage; it is left to the pattern loop. Helpers are composed on
/// `lookup_key`, the key the pattern loop searches, so an accessor is only
/// set aside when that loop can find it again.
fn standalone_hits(
    hits: &[Hit],
    accessor: &Regex,
    lookup_key: &str,
) -> Result<Vec<Hit>, SearchError> {
    if hits.is_empty() {
        return Ok(Vec::new());
    }

    let helpers = INDIRECT_PATTERNS
        .iter()
        .filter(|pattern| pattern.accepts(lookup_key))
        .map(|pattern| compile(&pattern.compose_captured(lookup_key)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(hits
        .iter()
        .filter(|hit| has_standalone_reference(&hit.text, accessor, &helpers))
        .cloned()
        .collect())
}

/// Whether `line` references the key outside every helper match.
///
/// Helper regexes capture the key in group 1; an accessor occurrence is
/// consumed when a helper captured the key at the same offset.
fn has_standalone_reference(line: &str, accessor: &Regex, helpers: &[Regex]) -> bool {
    let consumed: HashSet<usize> = helpers
        .iter()
        .flat_map(|helper| helper.captures_iter(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.start())
        .collect();

    accessor
        .find_iter(line)
        .any(|m| !consumed.contains(&(m.start() + VALUES_ACCESSOR.len())))
}
