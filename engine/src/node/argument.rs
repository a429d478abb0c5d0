//! Valued options: single decoded values and ordered sequences.

use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use argtree_core::{ArgConfig, ArgListConfig, ParseError, ParseOutcome, ValidationError};

use super::{LeafInfo, Matcher, decode, match_named, resolve_value};
use crate::cursor::TokenCursor;

/// A valued option decoding a single `T`, with an optional default.
pub(crate) struct ArgumentNode<T> {
    info: LeafInfo,
    default: Option<T>,
    value: Option<T>,
}

impl<T> ArgumentNode<T> {
    pub(crate) fn new(config: ArgConfig<T>) -> Self {
        let min = if config.required { 1 } else { 0 };
        let mut info = LeafInfo::named(config.long, config.short, config.description, min, 1);
        info.value_name = config.value_name;
        Self {
            info,
            default: config.default,
            value: None,
        }
    }

    /// The decoded value, falling back to the declared default.
    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref().or(self.default.as_ref())
    }
}

impl<T> Matcher for ArgumentNode<T>
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
        let Some(form) = match_named(&self.info, token) else {
            return Ok(ParseOutcome::NoMatch);
        };
        cursor.bump();
        self.info.record(path, token)?;
        let raw = resolve_value(form, path, cursor)?;
        self.value = Some(decode(raw, path)?);
        Ok(ParseOutcome::Match)
    }

    fn validate(&self, path: &str) -> Result<(), ValidationError> {
        // A default satisfies the minimum on its own.
        if self.default.is_some() {
            return Ok(());
        }
        self.info.check_bounds(path)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A valued option decoding an ordered sequence of `T`.
pub(crate) struct MultiArgumentNode<T> {
    info: LeafInfo,
    values: Vec<T>,
}

impl<T> MultiArgumentNode<T> {
    pub(crate) fn new(config: ArgListConfig) -> Self {
        let mut info = LeafInfo::named(
            config.long,
            config.short,
            config.description,
            config.min,
            config.max,
        );
        info.value_name = config.value_name;
        Self {
            info,
            values: Vec::new(),
        }
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Matcher for MultiArgumentNode<T>
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
        let Some(form) = match_named(&self.info, token) else {
            return Ok(ParseOutcome::NoMatch);
        };
        cursor.bump();
        self.info.record(path, token)?;
        let raw = resolve_value(form, path, cursor)?;
        self.values.push(decode(raw, path)?);
        Ok(ParseOutcome::Match)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn char_arg() -> ArgumentNode<char> {
        ArgumentNode::new(ArgConfig::new().long("timestamp").short('t').default_value('a'))
    }

    #[test]
    fn test_all_value_forms_decode_identically() {
        for input in [
            &["--timestamp=d"][..],
            &["--timestamp", "d"][..],
            &["-td"][..],
            &["-t", "d"][..],
        ] {
            let tokens = cursor_tokens(input);
            let mut cursor = TokenCursor::new(&tokens);
            let mut arg = char_arg();

            assert_eq!(
                arg.try_match("timestamp", &mut cursor).unwrap(),
                ParseOutcome::Match
            );
            assert_eq!(arg.value(), Some(&'d'));
            assert!(cursor.is_done());
        }
    }

    #[test]
    fn test_absent_argument_yields_default() {
        let arg = char_arg();
        assert_eq!(arg.value(), Some(&'a'));
        assert!(arg.validate("timestamp").is_ok());
    }

    #[test]
    fn test_required_argument_without_default_defers_too_few() {
        let arg: ArgumentNode<String> = ArgumentNode::new(ArgConfig::new().long("iface"));
        assert!(matches!(
            arg.validate("iface"),
            Err(ValidationError::TooFew { min: 1, count: 0, .. })
        ));
    }

    #[test]
    fn test_missing_value_at_end_of_stream() {
        let tokens = cursor_tokens(&["--timestamp"]);
        let mut cursor = TokenCursor::new(&tokens);
        let mut arg = char_arg();

        let err = arg.try_match("timestamp", &mut cursor).unwrap_err();
        assert!(matches!(err, ParseError::MissingValue { .. }));
    }

    #[test]
    fn test_conversion_failure_is_a_value_error() {
        let tokens = cursor_tokens(&["--wait", "soon"]);
        let mut cursor = TokenCursor::new(&tokens);
        let mut arg: ArgumentNode<u64> = ArgumentNode::new(ArgConfig::new().long("wait"));

        let err = arg.try_match("wait", &mut cursor).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { ref token, .. } if token == "soon"));
    }

    #[test]
    fn test_multi_argument_collects_in_order() {
        let tokens = cursor_tokens(&["-f", "name", "-f", "state"]);
        let mut cursor = TokenCursor::new(&tokens);
        let mut arg: MultiArgumentNode<String> =
            MultiArgumentNode::new(ArgListConfig::new().long("fields").short('f'));

        arg.try_match("fields", &mut cursor).unwrap();
        arg.try_match("fields", &mut cursor).unwrap();
        assert_eq!(arg.values(), ["name".to_string(), "state".to_string()]);
    }
}
