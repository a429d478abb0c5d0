//! Error types for tree registration, scanning, validation, and dispatch.
//!
//! The engine reports failures through four enums, one per phase. The split
//! between [`ParseError`] and [`ValidationError`] is deliberate: scan-time
//! errors abort immediately, while cardinality and dependency contracts are
//! checked only after a structurally successful scan, so a `--help` request
//! can short-circuit before mandatory-option checks run.

use thiserror::Error;

/// Programmer errors raised while the option tree is being built.
///
/// These indicate a malformed grammar declaration, not bad user input, and
/// abort setup unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A named option defines neither a long nor a short name.
    #[error("option needs a long or short name")]
    MissingName,

    /// A subcommand group was declared with an empty name.
    #[error("subcommand group needs a non-empty name")]
    EmptyGroupName,

    /// Occurrence bounds are inverted (`max < min`).
    #[error("max ({max}) is less than min ({min}) for \"{name}\"")]
    InvertedBounds {
        /// Display name of the offending option.
        name: String,
        /// Declared minimum occurrence count.
        min: usize,
        /// Declared maximum occurrence count.
        max: usize,
    },

    /// A pattern does not contain exactly one `*` wildcard marker.
    #[error("pattern \"{pattern}\" must contain exactly one \"*\"")]
    MalformedPattern {
        /// The offending pattern string.
        pattern: String,
    },

    /// A help option was registered twice on one group.
    #[error("help option already registered for \"{path}\"")]
    DuplicateHelp {
        /// Dotted path of the group.
        path: String,
    },

    /// A sub-program callback was bound twice to one group.
    #[error("sub-program already bound to \"{path}\"")]
    DuplicateSubProgram {
        /// Dotted path of the group.
        path: String,
    },

    /// A trailing positional was registered twice on one group.
    #[error("trailing positional already registered for \"{path}\"")]
    DuplicateTrailing {
        /// Dotted path of the group.
        path: String,
    },

    /// A strict-order successor was declared twice after one node.
    #[error("follow-up already declared after \"{path}\"")]
    DuplicateFollowUp {
        /// Dotted path of the predecessor node.
        path: String,
    },

    /// A bound positional was declared twice for one group.
    #[error("bound positional already declared for \"{path}\"")]
    DuplicateBoundPositional {
        /// Dotted path of the group.
        path: String,
    },

    /// A group cannot hold both child subcommands and a trailing positional.
    #[error("\"{group}\" cannot hold both subcommands and a trailing positional (adding \"{child}\")")]
    GroupTrailingConflict {
        /// Dotted path of the group.
        group: String,
        /// Name of the child being added.
        child: String,
    },
}

/// Scan-time errors: syntax violations, value failures, and eager
/// too-many-occurrence detection.
///
/// Any of these aborts the token scan immediately, with no retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token matched nothing anywhere in the tree.
    #[error("unknown argument \"{token}\"")]
    UnknownArgument {
        /// The offending token, verbatim.
        token: String,
    },

    /// The root was handed an empty token stream.
    #[error("no arguments given, nothing to parse")]
    EmptyCommandLine,

    /// A subcommand name was spelled as a dash-prefixed option.
    #[error("ambiguous argument \"{token}\": \"{path}\" is a subcommand and must be a bare word")]
    AmbiguousGroupToken {
        /// Dotted path of the subcommand group.
        path: String,
        /// The offending token, verbatim.
        token: String,
    },

    /// Two distinct sibling subcommands matched in one scan stage.
    #[error("two subcommands (\"{first}\" and \"{second}\") in the same stage under \"{path}\"")]
    GroupStageConflict {
        /// Dotted path of the parent group.
        path: String,
        /// Name of the first winning subcommand.
        first: String,
        /// Name of the second, conflicting subcommand.
        second: String,
    },

    /// A dash-prefixed token appeared inside a trailing positional run.
    #[error("option \"{token}\" no longer allowed in the positional values of \"{path}\"")]
    FlagInTrailing {
        /// Dotted path of the trailing positional.
        path: String,
        /// The offending token, verbatim.
        token: String,
    },

    /// A valued option reached the end of the stream without its value.
    #[error("no value given for \"{path}\"")]
    MissingValue {
        /// Dotted path of the option.
        path: String,
    },

    /// A raw value failed to decode into the declared type.
    #[error("invalid value \"{token}\" for \"{path}\": {message}")]
    InvalidValue {
        /// Dotted path of the option.
        path: String,
        /// The raw value that failed to decode.
        token: String,
        /// The decode error, rendered.
        message: String,
    },

    /// A pattern matched structurally but captured an empty key.
    #[error("empty pattern capture in \"{token}\" for \"{path}\"")]
    EmptyPatternCapture {
        /// Dotted path of the pattern option.
        path: String,
        /// The offending token, verbatim.
        token: String,
    },

    /// An option exceeded its maximum occurrence count mid-scan.
    #[error("\"{path}\" given too many times, max is {max}")]
    TooMany {
        /// Dotted path of the option.
        path: String,
        /// Declared maximum occurrence count.
        max: usize,
    },
}

/// Post-scan contract violations found by the validation cascade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required subcommand group never matched.
    #[error("missing required subcommand \"{path}\"")]
    MissingGroup {
        /// Dotted path of the group.
        path: String,
    },

    /// An option fell short of its minimum occurrence count.
    #[error("\"{path}\" given too few times, min is {min} (got {count})")]
    TooFew {
        /// Dotted path of the option.
        path: String,
        /// Declared minimum occurrence count.
        min: usize,
        /// Observed occurrence count.
        count: usize,
    },

    /// An option exceeded its maximum occurrence count.
    ///
    /// Normally pre-empted by the eager scan-time check; kept as a backstop.
    #[error("\"{path}\" given too many times, max is {max} (got {count})")]
    TooMany {
        /// Dotted path of the option.
        path: String,
        /// Declared maximum occurrence count.
        max: usize,
        /// Observed occurrence count.
        count: usize,
    },

    /// A required After/BindTo successor of a parsed node never matched.
    #[error("missing follow-up \"{path}\" required after \"{owner}\"")]
    MissingFollowUp {
        /// Dotted path of the node that owns the successor link.
        owner: String,
        /// Dotted path of the missing successor.
        path: String,
    },
}

/// Dispatch failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No registered sub-program was bound to a parsed group.
    #[error("no sub-program matched, invoke --help for usage")]
    NoSubProgramMatched,
}

/// Umbrella error covering every phase, for callers that funnel
/// registration, parsing, validation, and dispatch into one `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Tree construction failure.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    /// Token scan failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Post-scan contract violation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Sub-program dispatch failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Convenience alias for results carrying the umbrella [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
