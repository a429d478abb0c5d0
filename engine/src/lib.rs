//! Runtime grammar engine for declarative argument trees.
//!
//! Tool authors register typed option nodes — flags, valued arguments,
//! pattern-keyed options, subcommand groups, positional chains — into a
//! [`Parser`] context, and the engine consumes a flat token stream against
//! the resulting tree:
//!
//! 1. **Scan** — fixed-point rounds per group, leaves before subcommands,
//!    one shared cursor threaded through the recursion. Sibling-subcommand
//!    ambiguity, unknown tokens, bad values, and too-many occurrences abort
//!    the scan immediately; `--help` short-circuits everything.
//! 2. **Validate** — a read-only cascade enforcing the deferred contracts:
//!    minimum occurrence counts, required subcommands, and After/BindTo
//!    follow-ups.
//! 3. **Dispatch** — the sub-programs bound to parsed groups run in
//!    registration order, stopping early on a non-zero exit code.
//!
//! Positional grammars layer over flag scanning through three links: an
//! **After** successor gets one strictly-ordered attempt per invocation of
//! its owner; a **BindTo** successor fires only immediately after its
//! group's own keyword match; a **trailing** positional greedily takes every
//! remaining bare word.
//!
//! Declaration records and the error taxonomy live in `argtree-core` and are
//! re-exported here.
//!
//! # Example
//!
//! ```
//! use argtree_engine::{FlagConfig, GroupConfig, Parser, PositionalConfig};
//!
//! let mut parser = Parser::new();
//! let root = parser.root();
//!
//! let connection = parser.group(root, GroupConfig::named("connection")).unwrap();
//! let show = parser.group(connection, GroupConfig::named("show")).unwrap();
//! let active = parser.flag(show, FlagConfig::new().long("active")).unwrap();
//! let id = parser
//!     .positional_after::<String>(show.node(), PositionalConfig::named("id"))
//!     .unwrap();
//!
//! parser.parse(["connection", "show", "--active", "id123"]).unwrap();
//! parser.validate().unwrap();
//!
//! assert!(parser.group_parsed(show));
//! assert!(parser.is_set(active));
//! assert_eq!(parser.positional(id), Some(&"id123".to_string()));
//! ```

mod cursor;
mod dispatch;
mod handle;
mod node;
mod parser;
mod scan;
mod tree;
mod validate;

pub use argtree_core::{
    ArgConfig, ArgListConfig, CounterConfig, DispatchError, Error, FlagConfig, GroupConfig,
    HelpConfig, ParseError, ParseOutcome, Pattern, PatternArgConfig, PatternFlagConfig,
    PatternMatch, PositionalConfig, RegistrationError, Result, TrailingConfig, ValidationError,
};

pub use handle::{
    ArgId, ArgListId, CounterId, FlagId, GroupId, HelpId, PatternArgId, PatternFlagId,
    PositionalId, TrailingId,
};
pub use parser::{HelpRequest, Parser, RunOutcome};
pub use tree::{NodeId, ParseTree};
