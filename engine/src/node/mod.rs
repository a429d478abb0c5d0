//! Leaf node kinds and the matching seam they share.
//!
//! Every leaf — flag, counter, help, valued argument, pattern option,
//! positional — implements [`Matcher`]: one attempt against the front of the
//! token stream, a post-scan bounds check, and a downcast hook for the typed
//! value accessors. The group scan loop drives these through the tree; no
//! leaf ever looks past the tokens it consumes.

mod argument;
mod flag;
mod pattern;
mod positional;

pub(crate) use argument::{ArgumentNode, MultiArgumentNode};
pub(crate) use flag::{FlagNode, HelpNode};
pub(crate) use pattern::{PatternArgumentNode, PatternFlagNode};
pub(crate) use positional::{PositionalNode, TrailingNode};

use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use argtree_core::{ParseError, ParseOutcome, ValidationError};

use crate::cursor::TokenCursor;

/// Declaration data plus mutable parse state shared by every leaf.
pub(crate) struct LeafInfo {
    pub(crate) long: Option<String>,
    pub(crate) short: Option<char>,
    pub(crate) value_name: Option<String>,
    pub(crate) description: String,
    pub(crate) min: usize,
    pub(crate) max: usize,
    pub(crate) count: usize,
    pub(crate) last_token: Option<String>,
}

impl LeafInfo {
    pub(crate) fn named(
        long: Option<String>,
        short: Option<char>,
        description: String,
        min: usize,
        max: usize,
    ) -> Self {
        Self {
            long,
            short,
            value_name: None,
            description,
            min,
            max,
            count: 0,
            last_token: None,
        }
    }

    /// The name used in dotted paths: long, else short, else value name.
    pub(crate) fn display_name(&self) -> String {
        if let Some(long) = &self.long {
            long.clone()
        } else if let Some(short) = self.short {
            short.to_string()
        } else {
            self.value_name.clone().unwrap_or_default()
        }
    }

    /// Records one occurrence, failing fast when `max` is exceeded.
    pub(crate) fn record(&mut self, path: &str, token: &str) -> Result<(), ParseError> {
        self.count += 1;
        self.last_token = Some(token.to_string());
        if self.count > self.max {
            return Err(ParseError::TooMany {
                path: path.to_string(),
                max: self.max,
            });
        }
        Ok(())
    }

    /// The deferred occurrence-bound check run by the validator.
    pub(crate) fn check_bounds(&self, path: &str) -> Result<(), ValidationError> {
        if self.count < self.min {
            return Err(ValidationError::TooFew {
                path: path.to_string(),
                min: self.min,
                count: self.count,
            });
        }
        if self.count > self.max {
            return Err(ValidationError::TooMany {
                path: path.to_string(),
                max: self.max,
                count: self.count,
            });
        }
        Ok(())
    }
}

/// One leaf's contract with the scan loop and the validator.
pub(crate) trait Matcher {
    fn info(&self) -> &LeafInfo;

    /// Attempts to match the front of the stream, consuming on success.
    fn try_match(
        &mut self,
        path: &str,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError>;

    /// Post-scan contract check; read-only and idempotent.
    fn validate(&self, path: &str) -> Result<(), ValidationError> {
        self.info().check_bounds(path)
    }

    fn as_any(&self) -> &dyn Any;
}

/// How a named option token matched.
pub(crate) enum NamedForm<'t> {
    /// `--name`; a value, if needed, comes from the next token.
    Long,
    /// `--name=value`.
    LongInline(&'t str),
    /// `-x`; a value, if needed, comes from the next token.
    Short,
    /// `-xREST`; the glued remainder is the value.
    ShortGlued(&'t str),
}

/// Matches one token against a leaf's long/short names.
///
/// Exact forms only: `-x` with exactly one character, `--name`, and their
/// value-carrying variants. Bare words never match here; those belong to
/// groups and positionals.
pub(crate) fn match_named<'t>(info: &LeafInfo, token: &'t str) -> Option<NamedForm<'t>> {
    if let Some(body) = token.strip_prefix("--") {
        let long = info.long.as_deref()?;
        if body == long {
            return Some(NamedForm::Long);
        }
        let value = body.strip_prefix(long)?.strip_prefix('=')?;
        Some(NamedForm::LongInline(value))
    } else if let Some(body) = token.strip_prefix('-') {
        let short = info.short?;
        let mut chars = body.chars();
        if chars.next()? != short {
            return None;
        }
        let glued = chars.as_str();
        if glued.is_empty() {
            Some(NamedForm::Short)
        } else {
            Some(NamedForm::ShortGlued(glued))
        }
    } else {
        None
    }
}

/// Resolves the raw value for a matched valued option.
///
/// Priority: inline `=` substring, then the glued short remainder, then the
/// next stream token; an exhausted stream is a hard error.
pub(crate) fn resolve_value<'t>(
    form: NamedForm<'t>,
    path: &str,
    cursor: &mut TokenCursor<'t>,
) -> Result<&'t str, ParseError> {
    match form {
        NamedForm::LongInline(value) => Ok(value),
        NamedForm::ShortGlued(glued) => Ok(glued.strip_prefix('=').unwrap_or(glued)),
        NamedForm::Long | NamedForm::Short => {
            cursor.bump().ok_or_else(|| ParseError::MissingValue {
                path: path.to_string(),
            })
        }
    }
}

/// Decodes a raw string through the declared type's `FromStr`.
pub(crate) fn decode<T>(raw: &str, path: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|err: T::Err| ParseError::InvalidValue {
        path: path.to_string(),
        token: raw.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(long: Option<&str>, short: Option<char>) -> LeafInfo {
        LeafInfo::named(long.map(String::from), short, String::new(), 0, 1)
    }

    #[test]
    fn test_match_named_exact_forms() {
        let leaf = info(Some("mode"), Some('m'));

        assert!(matches!(match_named(&leaf, "--mode"), Some(NamedForm::Long)));
        assert!(matches!(
            match_named(&leaf, "--mode=tabular"),
            Some(NamedForm::LongInline("tabular"))
        ));
        assert!(matches!(match_named(&leaf, "-m"), Some(NamedForm::Short)));
        assert!(matches!(
            match_named(&leaf, "-mtabular"),
            Some(NamedForm::ShortGlued("tabular"))
        ));
    }

    #[test]
    fn test_match_named_rejects_near_misses() {
        let leaf = info(Some("mode"), Some('m'));

        assert!(match_named(&leaf, "mode").is_none());
        assert!(match_named(&leaf, "--modes").is_none());
        assert!(match_named(&leaf, "--mod").is_none());
        assert!(match_named(&leaf, "-x").is_none());
        assert!(match_named(&leaf, "-").is_none());
    }

    #[test]
    fn test_record_fails_fast_past_max() {
        let mut leaf = info(Some("active"), None);

        assert!(leaf.record("active", "--active").is_ok());
        let err = leaf.record("active", "--active").unwrap_err();
        assert!(matches!(err, ParseError::TooMany { max: 1, .. }));
    }

    #[test]
    fn test_check_bounds_defers_too_few() {
        let mut leaf = info(Some("iface"), None);
        leaf.min = 1;

        assert!(matches!(
            leaf.check_bounds("iface"),
            Err(ValidationError::TooFew { min: 1, count: 0, .. })
        ));
        leaf.count = 1;
        assert!(leaf.check_bounds("iface").is_ok());
    }
}
