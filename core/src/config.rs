//! Configuration records for tree registration.
//!
//! Each node kind is declared through its own record with named, defaulted
//! fields. Records are plain data: the engine validates them at registration
//! time and raises [`RegistrationError`] on malformed declarations, before
//! any parsing can start.
//!
//! # Examples
//!
//! ```
//! use argtree_core::{ArgConfig, FlagConfig, GroupConfig};
//!
//! let verbose = FlagConfig::new().long("verbose").short('v');
//! assert_eq!(verbose.long.as_deref(), Some("verbose"));
//!
//! let mode: ArgConfig<String> = ArgConfig::new()
//!     .long("mode")
//!     .short('m')
//!     .default_value("tabular".to_string());
//! assert!(mode.default.is_some());
//!
//! let show = GroupConfig::named("show");
//! assert!(show.optional);
//! ```

use crate::error::RegistrationError;

/// Checks that an option declares at least one of its two names.
pub(crate) fn ensure_named(
    long: Option<&str>,
    short: Option<char>,
) -> Result<(), RegistrationError> {
    if long.is_none() && short.is_none() {
        return Err(RegistrationError::MissingName);
    }
    Ok(())
}

/// Display label for an option, preferring the long name.
pub(crate) fn option_label(long: Option<&str>, short: Option<char>) -> String {
    match (long, short) {
        (Some(long), _) => long.to_string(),
        (None, Some(short)) => short.to_string(),
        (None, None) => String::new(),
    }
}

/// Checks the `[min, max]` occurrence bound invariant.
pub(crate) fn ensure_bounds(name: &str, min: usize, max: usize) -> Result<(), RegistrationError> {
    if max < min {
        return Err(RegistrationError::InvertedBounds {
            name: name.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// A boolean presence flag. Occurrence bounds are fixed at `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct FlagConfig {
    /// Long name, matched as `--name`.
    pub long: Option<String>,
    /// Short name, matched as `-x`.
    pub short: Option<char>,
    /// One-line description for help rendering.
    pub description: String,
}

impl FlagConfig {
    /// Creates an empty record; set at least one name before registering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the long name.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Sets the short name.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_named(self.long.as_deref(), self.short)
    }
}

/// A repeatable presence flag decoded as an occurrence count.
#[derive(Debug, Clone)]
pub struct CounterConfig {
    /// Long name, matched as `--name`.
    pub long: Option<String>,
    /// Short name, matched as `-x`.
    pub short: Option<char>,
    /// One-line description for help rendering.
    pub description: String,
    /// Minimum occurrence count, enforced at validation time.
    pub min: usize,
    /// Maximum occurrence count, enforced eagerly during the scan.
    pub max: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            long: None,
            short: None,
            description: String::new(),
            min: 0,
            max: usize::MAX,
        }
    }
}

impl CounterConfig {
    /// Creates an empty record; set at least one name before registering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the long name.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Sets the short name.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the occurrence bounds.
    pub fn bounds(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_named(self.long.as_deref(), self.short)?;
        ensure_bounds(&option_label(self.long.as_deref(), self.short), self.min, self.max)
    }
}

/// A valued option decoding a single `T`.
///
/// Without a default the option is required (min 1); `optional()` lowers the
/// minimum to zero, and a default satisfies the minimum on its own.
#[derive(Debug, Clone)]
pub struct ArgConfig<T> {
    /// Long name, matched as `--name` / `--name=value`.
    pub long: Option<String>,
    /// Short name, matched as `-x` / `-xVALUE`.
    pub short: Option<char>,
    /// Placeholder name for the value in help rendering.
    pub value_name: Option<String>,
    /// One-line description for help rendering.
    pub description: String,
    /// Value used when the option never appears.
    pub default: Option<T>,
    /// Whether the option must appear at least once.
    pub required: bool,
}

impl<T> Default for ArgConfig<T> {
    fn default() -> Self {
        Self {
            long: None,
            short: None,
            value_name: None,
            description: String::new(),
            default: None,
            required: true,
        }
    }
}

impl<T> ArgConfig<T> {
    /// Creates an empty record; set at least one name before registering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the long name.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Sets the short name.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the value placeholder name.
    pub fn value_name(mut self, value_name: &str) -> Self {
        self.value_name = Some(value_name.to_string());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Makes the option optional (minimum occurrence count zero).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_named(self.long.as_deref(), self.short)
    }
}

/// A valued option decoding an ordered sequence of values.
#[derive(Debug, Clone)]
pub struct ArgListConfig {
    /// Long name, matched as `--name` / `--name=value`.
    pub long: Option<String>,
    /// Short name, matched as `-x` / `-xVALUE`.
    pub short: Option<char>,
    /// Placeholder name for the value in help rendering.
    pub value_name: Option<String>,
    /// One-line description for help rendering.
    pub description: String,
    /// Minimum occurrence count, enforced at validation time.
    pub min: usize,
    /// Maximum occurrence count, enforced eagerly during the scan.
    pub max: usize,
}

impl Default for ArgListConfig {
    fn default() -> Self {
        Self {
            long: None,
            short: None,
            value_name: None,
            description: String::new(),
            min: 1,
            max: usize::MAX,
        }
    }
}

impl ArgListConfig {
    /// Creates an empty record; set at least one name before registering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the long name.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Sets the short name.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the value placeholder name.
    pub fn value_name(mut self, value_name: &str) -> Self {
        self.value_name = Some(value_name.to_string());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the occurrence bounds.
    pub fn bounds(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_named(self.long.as_deref(), self.short)?;
        ensure_bounds(&option_label(self.long.as_deref(), self.short), self.min, self.max)
    }
}

/// A repeated pattern-keyed flag; captured keys decode into a sequence.
#[derive(Debug, Clone)]
pub struct PatternFlagConfig {
    /// Pattern with one `*` marker, e.g. `filter-*`.
    pub pattern: String,
    /// One-line description for help rendering.
    pub description: String,
    /// Minimum occurrence count, enforced at validation time.
    pub min: usize,
    /// Maximum occurrence count, enforced eagerly during the scan.
    pub max: usize,
}

impl Default for PatternFlagConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            description: String::new(),
            min: 0,
            max: usize::MAX,
        }
    }
}

impl PatternFlagConfig {
    /// Creates a record for the given pattern.
    pub fn pattern(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the occurrence bounds.
    pub fn bounds(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_bounds(&self.pattern, self.min, self.max)
    }
}

/// A repeated pattern-keyed valued option; decodes a key-to-value mapping.
#[derive(Debug, Clone)]
pub struct PatternArgConfig {
    /// Pattern with one `*` marker, e.g. `filter-*`.
    pub pattern: String,
    /// Placeholder name for the value in help rendering.
    pub value_name: Option<String>,
    /// One-line description for help rendering.
    pub description: String,
    /// Minimum occurrence count, enforced at validation time.
    pub min: usize,
    /// Maximum occurrence count, enforced eagerly during the scan.
    pub max: usize,
}

impl Default for PatternArgConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            value_name: None,
            description: String::new(),
            min: 0,
            max: usize::MAX,
        }
    }
}

impl PatternArgConfig {
    /// Creates a record for the given pattern.
    pub fn pattern(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            ..Self::default()
        }
    }

    /// Sets the value placeholder name.
    pub fn value_name(mut self, value_name: &str) -> Self {
        self.value_name = Some(value_name.to_string());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the occurrence bounds.
    pub fn bounds(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_bounds(&self.pattern, self.min, self.max)
    }
}

/// A subcommand group, matched by its bare-word name.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Subcommand name, matched as a bare word.
    pub name: String,
    /// One-line description for help rendering.
    pub description: String,
    /// Whether the group may be absent. `false` makes it required.
    pub optional: bool,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            optional: true,
        }
    }
}

impl GroupConfig {
    /// Creates a record for the given subcommand name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Marks the group as required.
    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        if self.name.is_empty() {
            return Err(RegistrationError::EmptyGroupName);
        }
        Ok(())
    }
}

/// A single bare-word positional, anchored in an After or BindTo chain.
#[derive(Debug, Clone)]
pub struct PositionalConfig {
    /// Name used in paths and help rendering.
    pub name: String,
    /// One-line description for help rendering.
    pub description: String,
    /// Whether the positional must appear.
    pub required: bool,
}

impl Default for PositionalConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            required: true,
        }
    }
}

impl PositionalConfig {
    /// Creates a record for the given positional name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Makes the positional optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A trailing variadic positional consuming all remaining bare words.
#[derive(Debug, Clone)]
pub struct TrailingConfig {
    /// Name used in paths and help rendering.
    pub name: String,
    /// One-line description for help rendering.
    pub description: String,
    /// Minimum number of values, enforced at validation time.
    pub min: usize,
    /// Maximum number of values, enforced eagerly during the scan.
    pub max: usize,
}

impl Default for TrailingConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            min: 0,
            max: usize::MAX,
        }
    }
}

impl TrailingConfig {
    /// Creates a record for the given positional name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the value-count bounds.
    pub fn bounds(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Validates the record; called by the engine at registration time.
    pub fn check(&self) -> Result<(), RegistrationError> {
        ensure_bounds(&self.name, self.min, self.max)
    }
}

/// Help metadata attached to a group's `--help`/`-h` option.
///
/// The engine records which help option fired; rendering the text is the
/// caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct HelpConfig {
    /// Heading line shown above the option listing.
    pub header: String,
    /// Closing message shown below the option listing.
    pub message: String,
}

impl HelpConfig {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header line.
    pub fn header(mut self, header: &str) -> Self {
        self.header = header.to_string();
        self
    }

    /// Sets the closing message.
    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}
