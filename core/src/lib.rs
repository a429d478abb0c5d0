//! Core declaration types for argtree option trees.
//!
//! This crate defines the passive half of the engine:
//!
//! - Configuration records ([`FlagConfig`], [`ArgConfig`], [`GroupConfig`],
//!   [`PositionalConfig`], …) — one well-typed record per node kind, with
//!   named, defaulted fields, validated at registration time.
//! - [`Pattern`] — the single-wildcard matcher behind repeated
//!   key/value-style options such as `--filter-eth0=up`.
//! - The error taxonomy ([`RegistrationError`], [`ParseError`],
//!   [`ValidationError`], [`DispatchError`]) and the umbrella [`Error`].
//! - [`ParseOutcome`] — the tri-state result of one match attempt.
//!
//! The runtime tree, scan loop, validator, and dispatcher live in
//! `argtree-engine`, which re-exports everything here.
//!
//! # Example
//!
//! ```
//! use argtree_core::{ArgConfig, FlagConfig, Pattern};
//!
//! let active = FlagConfig::new().long("active").description("Only active entries");
//! assert!(active.check().is_ok());
//!
//! let wait: ArgConfig<u64> = ArgConfig::new().long("wait").short('w').optional();
//! assert!(!wait.required);
//!
//! let filter = Pattern::compile("filter-*").unwrap();
//! assert_eq!(filter.match_token("--filter-lo=up").unwrap().key, "lo");
//! ```

mod config;
mod error;
mod outcome;
mod pattern;

pub use config::{
    ArgConfig, ArgListConfig, CounterConfig, FlagConfig, GroupConfig, HelpConfig,
    PatternArgConfig, PatternFlagConfig, PositionalConfig, TrailingConfig,
};
pub use error::{
    DispatchError, Error, ParseError, RegistrationError, Result, ValidationError,
};
pub use outcome::ParseOutcome;
pub use pattern::{Pattern, PatternMatch};
