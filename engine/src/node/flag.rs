//! Presence flags, occurrence counters, and the help short-circuit.

use std::any::Any;

use argtree_core::{CounterConfig, FlagConfig, HelpConfig, ParseError, ParseOutcome};

use super::{LeafInfo, Matcher, NamedForm, match_named};
use crate::cursor::TokenCursor;

/// A presence flag, also serving as the repeatable counter kind.
///
/// Flags carry no value; the decoded result is the occurrence count. Plain
/// flags are bounded to `[0, 1]`, counters to their configured bounds.
pub(crate) struct FlagNode {
    info: LeafInfo,
}

impl FlagNode {
    pub(crate) fn from_flag(config: FlagConfig) -> Self {
        Self {
            info: LeafInfo::named(config.long, config.short, config.description, 0, 1),
        }
    }

    pub(crate) fn from_counter(config: CounterConfig) -> Self {
        Self {
            info: LeafInfo::named(
                config.long,
                config.short,
                config.description,
                config.min,
                config.max,
            ),
        }
    }

    pub(crate) fn occurrences(&self) -> usize {
        self.info.count
    }
}

impl Matcher for FlagNode {
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
        match match_named(&self.info, token) {
            Some(NamedForm::Long | NamedForm::Short) => {
                cursor.bump();
                self.info.record(path, token)?;
                Ok(ParseOutcome::Match)
            }
            // A value-carrying form is not a flag token.
            _ => Ok(ParseOutcome::NoMatch),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The `--help`/`-h` leaf of a group.
///
/// Matching yields [`ParseOutcome::HelpRequested`], which aborts the scan
/// unconditionally and skips validation and dispatch. The header and message
/// are carried for whatever renders the help text.
pub(crate) struct HelpNode {
    info: LeafInfo,
    header: String,
    message: String,
}

impl HelpNode {
    pub(crate) fn new(config: HelpConfig) -> Self {
        Self {
            info: LeafInfo::named(
                Some("help".to_string()),
                Some('h'),
                "Print help".to_string(),
                0,
                1,
            ),
            header: config.header,
            message: config.message,
        }
    }

    pub(crate) fn fired(&self) -> bool {
        self.info.count > 0
    }

    pub(crate) fn header(&self) -> &str {
        &self.header
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl Matcher for HelpNode {
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
        match match_named(&self.info, token) {
            Some(NamedForm::Long | NamedForm::Short) => {
                cursor.bump();
                self.info.record(path, token)?;
                Ok(ParseOutcome::HelpRequested)
            }
            _ => Ok(ParseOutcome::NoMatch),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
