//! The tri-state result of matching a node against the token stream.

/// Outcome of one match attempt during the scan.
///
/// `HelpRequested` is a control outcome, not an error: it aborts the scan
/// and propagates upward unconditionally, skipping both validation and
/// dispatch so help can be rendered before mandatory-option checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseOutcome {
    /// The node did not recognize the front token.
    #[default]
    NoMatch,
    /// The node consumed one or more tokens.
    Match,
    /// A help option fired; stop everything and surface help.
    HelpRequested,
}

impl ParseOutcome {
    /// Returns `true` for [`ParseOutcome::Match`].
    pub fn is_match(self) -> bool {
        self == ParseOutcome::Match
    }

    /// Returns `true` for [`ParseOutcome::HelpRequested`].
    pub fn is_help(self) -> bool {
        self == ParseOutcome::HelpRequested
    }
}
