//! Pattern-keyed options: repeated `--<prefix><key><suffix>[=value]` forms.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use argtree_core::{
    ParseError, ParseOutcome, Pattern, PatternArgConfig, PatternFlagConfig, RegistrationError,
};

use super::{LeafInfo, Matcher, decode};
use crate::cursor::TokenCursor;

fn pattern_info(pattern: &Pattern, description: String, min: usize, max: usize) -> LeafInfo {
    let mut info = LeafInfo::named(None, None, description, min, max);
    info.value_name = Some(pattern.as_str().to_string());
    info
}

/// A repeated pattern flag; captured keys decode into an ordered sequence.
///
/// Any inline `=value` is ignored: a flag carries no value, only its key.
pub(crate) struct PatternFlagNode<T> {
    info: LeafInfo,
    pattern: Pattern,
    keys: Vec<T>,
}

impl<T> PatternFlagNode<T> {
    pub(crate) fn new(config: PatternFlagConfig) -> Result<Self, RegistrationError> {
        let pattern = Pattern::compile(&config.pattern)?;
        Ok(Self {
            info: pattern_info(&pattern, config.description, config.min, config.max),
            pattern,
            keys: Vec::new(),
        })
    }

    pub(crate) fn keys(&self) -> &[T] {
        &self.keys
    }
}

impl<T> Matcher for PatternFlagNode<T>
where
    T: FromStr + 'static,
    T::Err: Display,
{
    fn info(&self) -> &LeafInfo {
        &self.info
    }

    fn try_match(
        &mut self,
        path: &str,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        let Some(token) = cursor.peek() else {
            return Ok(ParseOutcome::NoMatch);
        };
        let Some(hit) = self.pattern.match_token(token) else {
            return Ok(ParseOutcome::NoMatch);
        };
        cursor.bump();
        self.info.record(path, token)?;
        if hit.key.is_empty() {
            return Err(ParseError::EmptyPatternCapture {
                path: path.to_string(),
                token: token.to_string(),
            });
        }
        self.keys.push(decode(hit.key, path)?);
        Ok(ParseOutcome::Match)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A repeated pattern argument; decodes a captured-key → value mapping.
pub(crate) struct PatternArgumentNode<K, V> {
    info: LeafInfo,
    pattern: Pattern,
    entries: BTreeMap<K, V>,
}

impl<K, V> PatternArgumentNode<K, V> {
    pub(crate) fn new(config: PatternArgConfig) -> Result<Self, RegistrationError> {
        let pattern = Pattern::compile(&config.pattern)?;
        let mut info = pattern_info(&pattern, config.description, config.min, config.max);
        if config.value_name.is_some() {
            info.value_name = config.value_name;
        }
        Ok(Self {
            info,
            pattern,
            entries: BTreeMap::new(),
        })
    }

    pub(crate) fn entries(&self) -> &BTreeMap<K, V> {
        &self.entries
    }
}

impl<K, V> Matcher for PatternArgumentNode<K, V>
where
    K: FromStr + Ord + 'static,
    K::Err: Display,
    V: FromStr + 'static,
    V::Err: Display,
{
    fn info(&self) -> &LeafInfo {
        &self.info
    }

    fn try_match(
        &mut self,
        path: &str,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        let Some(token) = cursor.peek() else {
            return Ok(ParseOutcome::NoMatch);
        };
        let Some(hit) = self.pattern.match_token(token) else {
            return Ok(ParseOutcome::NoMatch);
        };
        cursor.bump();
        self.info.record(path, token)?;
        if hit.key.is_empty() {
            return Err(ParseError::EmptyPatternCapture {
                path: path.to_string(),
                token: token.to_string(),
            });
        }
        let raw = match hit.value {
            Some(value) => value,
            None => cursor.bump().ok_or_else(|| ParseError::MissingValue {
                path: path.to_string(),
            })?,
        };
        let key = decode(hit.key, path)?;
        let value = decode(raw, path)?;
        self.entries.insert(key, value);
        Ok(ParseOutcome::Match)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
