//! Positional leaves: single bare words and the trailing variadic run.

use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use argtree_core::{ParseError, ParseOutcome, PositionalConfig, TrailingConfig};

use super::{LeafInfo, Matcher, decode};
use crate::cursor::TokenCursor;

fn positional_info(name: String, description: String, min: usize, max: usize) -> LeafInfo {
    let mut info = LeafInfo::named(None, None, description, min, max);
    info.value_name = Some(name);
    info
}

/// A single bare-word positional, anchored in an After or BindTo chain.
///
/// A dash-prefixed front token is left in place: if nothing else claims it,
/// the leftover-token check reports it verbatim.
pub(crate) struct PositionalNode<T> {
    info: LeafInfo,
    value: Option<T>,
}

impl<T> PositionalNode<T> {
    pub(crate) fn new(config: PositionalConfig) -> Self {
        let min = if config.required { 1 } else { 0 };
        Self {
            info: positional_info(config.name, config.description, min, 1),
            value: None,
        }
    }

    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> Matcher for PositionalNode<T>
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
        if token.starts_with('-') {
            return Ok(ParseOutcome::NoMatch);
        }
        cursor.bump();
        self.info.record(path, token)?;
        self.value = Some(decode(token, path)?);
        Ok(ParseOutcome::Match)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The trailing variadic positional: greedily consumes every remaining bare
/// word. A dash-prefixed token inside the run is a hard error — options are
/// no longer allowed once the trailing values begin.
pub(crate) struct TrailingNode<T> {
    info: LeafInfo,
    values: Vec<T>,
}

impl<T> TrailingNode<T> {
    pub(crate) fn new(config: TrailingConfig) -> Self {
        Self {
            info: positional_info(config.name, config.description, config.min, config.max),
            values: Vec::new(),
        }
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Matcher for TrailingNode<T>
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
        let mut matched = false;
        while let Some(token) = cursor.peek() {
            if token.starts_with('-') {
                return Err(ParseError::FlagInTrailing {
                    path: path.to_string(),
                    token: token.to_string(),
                });
            }
            cursor.bump();
            self.info.record(path, token)?;
            self.values.push(decode(token, path)?);
            matched = true;
        }
        Ok(if matched {
            ParseOutcome::Match
        } else {
            ParseOutcome::NoMatch
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
