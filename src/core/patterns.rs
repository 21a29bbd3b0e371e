//! Usage patterns recognised in chart templates.
//!
//! Each pattern is a regex prefix that ends right before the referenced key,
//! a suffix that must follow the key, and a cheap gate on the key itself.
//! The regex actually searched for is `prefix + escape(key) + suffix`.

use std::fmt;

use serde::Serialize;

/// Literal prefix the template language uses to reference a value.
pub const VALUES_ACCESSOR: &str = ".Values.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pattern {
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "with_context")]
    WithContext,
    #[serde(rename = "toyaml")]
    ToYaml,
    #[serde(rename = "imageByParams")]
    ImageByParams,
    #[serde(rename = "subChartImagePullSecrets")]
    SubChartImagePullSecrets,
    #[serde(rename = "security_context")]
    SecurityContext,
    #[serde(rename = "include_context")]
    IncludeContext,
}

/// Indirect patterns in the order the resolver tries them.
pub const INDIRECT_PATTERNS: &[Pattern] = &[
    Pattern::WithContext,
    Pattern::ToYaml,
    Pattern::ImageByParams,
    Pattern::SubChartImagePullSecrets,
    Pattern::SecurityContext,
    Pattern::IncludeContext,
];

impl Pattern {
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Direct => "direct",
            Pattern::WithContext => "with_context",
            Pattern::ToYaml => "toyaml",
            Pattern::ImageByParams => "imageByParams",
            Pattern::SubChartImagePullSecrets => "subChartImagePullSecrets",
            Pattern::SecurityContext => "security_context",
            Pattern::IncludeContext => "include_context",
        }
    }

    /// Regex that must match right before the key. Always ends with the
    /// values accessor.
    pub fn prefix(self) -> &'static str {
        match self {
            Pattern::Direct => r"\.Values\.",
            // `{{ include "x" .Values.key }}` or `{{ with .Values.key }}`
            Pattern::WithContext => r#"(?:include\s+"[^"]+"|with)\s+\$?\.Values\."#,
            Pattern::ToYaml => r"toYaml\s+\$?\.Values\.",
            Pattern::ImageByParams => {
                r#"include\s+"[^"]*imageByParams"\s+\(dict\s+.*\$?\.Values\."#
            }
            Pattern::SubChartImagePullSecrets => {
                r#"include\s+"[^"]*subChartImagePullSecrets"\s+\(dict\s+"Values"\s+\(set\s+\(deepCopy\s+\$?\.Values\)\s+"image"\s+\$?\.Values\."#
            }
            Pattern::SecurityContext => {
                r#"include\s+"[^"]*[sS]ecurityContext"\s+\(dict\s+.*\$?\.Values\."#
            }
            Pattern::IncludeContext => {
                r#"include\s+"[^"]+"\s+\(dict\s+.*"(?:name|context)"\s+\$?\.Values\."#
            }
        }
    }

    /// Regex that must match right after the key.
    pub fn suffix(self) -> &'static str {
        match self {
            Pattern::Direct | Pattern::IncludeContext => "",
            Pattern::WithContext => r"\s+-?\}",
            Pattern::ToYaml => r"\s+\|\s+nindent",
            Pattern::ImageByParams => r"\s*",
            Pattern::SubChartImagePullSecrets => r"\)\)\s+-?\}",
            // Either a trailing `"context"` argument or the end of the dict
            Pattern::SecurityContext => r#"(?:.*"context"|\s*\))"#,
        }
    }

    /// Cheap check on the key applied before any search.
    pub fn accepts(self, key: &str) -> bool {
        match self {
            Pattern::ImageByParams => key.contains("image"),
            Pattern::SecurityContext => key.contains("SecurityContext"),
            Pattern::IncludeContext => key.contains("name"),
            Pattern::Direct
            | Pattern::WithContext
            | Pattern::ToYaml
            | Pattern::SubChartImagePullSecrets => true,
        }
    }

    /// The regex searched for when looking for `key` through this pattern.
    pub fn compose(self, key: &str) -> String {
        format!("{}{}{}", self.prefix(), regex::escape(key), self.suffix())
    }

    /// Same as [`Pattern::compose`] with the key wrapped in capture group 1.
    pub fn compose_captured(self, key: &str) -> String {
        format!("{}({}){}", self.prefix(), regex::escape(key), self.suffix())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
