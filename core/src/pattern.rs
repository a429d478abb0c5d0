//! Wildcard patterns for repeated key/value-style options.
//!
//! A pattern holds exactly one `*` marker splitting it into literal prefix
//! and suffix windows. A candidate token matches when, stripped of its
//! leading `--` and any `=value` tail, it is long enough to contain both
//! windows and they compare equal; the substring between them is the
//! captured key.

use crate::error::RegistrationError;

/// A compiled single-wildcard pattern such as `filter-*` or `set-*-mode`.
///
/// # Examples
///
/// ```
/// use argtree_core::Pattern;
///
/// let pattern = Pattern::compile("filter-*").unwrap();
/// let hit = pattern.match_token("--filter-eth0=up").unwrap();
/// assert_eq!(hit.key, "eth0");
/// assert_eq!(hit.value, Some("up"));
///
/// assert!(pattern.match_token("--other-eth0").is_none());
/// assert!(Pattern::compile("no-wildcard").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    prefix: String,
    suffix: String,
}

/// A structural pattern match: the captured key and any inline `=` value.
///
/// An empty `key` is still returned here; rejecting it is the caller's
/// responsibility so the error can carry the option path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    /// The substring matched by the wildcard portion.
    pub key: &'t str,
    /// The substring after `=` in the same token, if present.
    pub value: Option<&'t str>,
}

impl Pattern {
    /// Compiles a pattern, rejecting anything without exactly one `*`.
    pub fn compile(pattern: &str) -> Result<Self, RegistrationError> {
        let mut markers = pattern.match_indices('*');
        let (split, _) = markers
            .next()
            .ok_or_else(|| RegistrationError::MalformedPattern {
                pattern: pattern.to_string(),
            })?;
        if markers.next().is_some() {
            return Err(RegistrationError::MalformedPattern {
                pattern: pattern.to_string(),
            });
        }
        Ok(Self {
            raw: pattern.to_string(),
            prefix: pattern[..split].to_string(),
            suffix: pattern[split + 1..].to_string(),
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Attempts a structural match against one raw token.
    ///
    /// Only long-form tokens participate: the token must start with `--`.
    pub fn match_token<'t>(&self, token: &'t str) -> Option<PatternMatch<'t>> {
        let body = token.strip_prefix("--")?;
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        if name.len() < self.prefix.len() + self.suffix.len() {
            return None;
        }
        let key = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        Some(PatternMatch { key, value })
    }
}
