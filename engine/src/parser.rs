//! The parser context: registration facade, scan driver, and dispatch.

use std::fmt::Display;
use std::str::FromStr;

use argtree_core::{
    ArgConfig, ArgListConfig, CounterConfig, DispatchError, Error, FlagConfig, GroupConfig,
    HelpConfig, ParseError, ParseOutcome, PatternArgConfig, PatternFlagConfig, PositionalConfig,
    RegistrationError, TrailingConfig, ValidationError,
};

use crate::cursor::TokenCursor;
use crate::dispatch::Dispatcher;
use crate::handle::{
    ArgId, ArgListId, CounterId, FlagId, GroupId, HelpId, PatternArgId, PatternFlagId,
    PositionalId, TrailingId,
};
use crate::node::{
    ArgumentNode, FlagNode, HelpNode, MultiArgumentNode, PatternArgumentNode, PatternFlagNode,
    PositionalNode, TrailingNode,
};
use crate::tree::{GroupNode, NodeId, NodeKind, ParseTree};

/// The explicit parser context.
///
/// Owns the option tree and the sub-program registry; every node is
/// registered through it before the one-shot parse → validate → dispatch
/// sequence runs. There is no process-wide registration — build one `Parser`
/// per grammar and pass it where it is needed.
///
/// # Examples
///
/// ```
/// use argtree_engine::{ArgConfig, FlagConfig, Parser, TrailingConfig};
///
/// let mut parser = Parser::new();
/// let root = parser.root();
/// let timestamp = parser
///     .argument(root, ArgConfig::new().short('t').default_value('a'))
///     .unwrap();
/// let ascii = parser.flag(root, FlagConfig::new().short('a')).unwrap();
/// let interfaces = parser
///     .trailing_positional::<String>(root, TrailingConfig::named("interface"))
///     .unwrap();
///
/// parser.parse(["-t", "d", "vcan0"]).unwrap();
/// parser.validate().unwrap();
///
/// assert_eq!(parser.value(timestamp), Some(&'d'));
/// assert!(!parser.is_set(ascii));
/// assert_eq!(parser.trailing(interfaces), ["vcan0".to_string()]);
/// ```
pub struct Parser {
    tree: ParseTree,
    dispatcher: Dispatcher,
    tokens: Vec<String>,
}

/// What a completed [`Parser::run`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Scan, validation, and dispatch finished with this exit code.
    Completed(i32),
    /// A help option fired; validation and dispatch were skipped.
    HelpRequested,
}

/// The fired help option, for whatever renders the help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest<'a> {
    /// Dotted path of the help option that fired.
    pub path: String,
    /// Declared heading line.
    pub header: &'a str,
    /// Declared closing message.
    pub message: &'a str,
}

impl Parser {
    /// Creates a context holding only the anonymous root group.
    pub fn new() -> Self {
        Self {
            tree: ParseTree::new(),
            dispatcher: Dispatcher::new(),
            tokens: Vec::new(),
        }
    }

    /// The anonymous root group, parent for top-level registrations.
    pub fn root(&self) -> GroupId {
        GroupId(ParseTree::ROOT)
    }

    /// Read access to the parsed tree, as sub-program callbacks see it.
    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// The raw token snapshot of the last `parse` call.
    pub fn raw_tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Registers a presence flag under a group.
    pub fn flag(
        &mut self,
        group: GroupId,
        config: FlagConfig,
    ) -> Result<FlagId, RegistrationError> {
        config.check()?;
        let id = self
            .tree
            .add_option(group.node(), Box::new(FlagNode::from_flag(config)));
        Ok(FlagId(id))
    }

    /// Registers an occurrence counter under a group.
    pub fn counter(
        &mut self,
        group: GroupId,
        config: CounterConfig,
    ) -> Result<CounterId, RegistrationError> {
        config.check()?;
        let id = self
            .tree
            .add_option(group.node(), Box::new(FlagNode::from_counter(config)));
        Ok(CounterId(id))
    }

    /// Registers the `--help`/`-h` option of a group; at most one per group.
    pub fn help(&mut self, group: GroupId, config: HelpConfig) -> Result<HelpId, RegistrationError> {
        let id = self
            .tree
            .add_help(group.node(), Box::new(HelpNode::new(config)))?;
        Ok(HelpId(id))
    }

    /// Registers a single-valued argument under a group.
    pub fn argument<T>(
        &mut self,
        group: GroupId,
        config: ArgConfig<T>,
    ) -> Result<ArgId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        config.check()?;
        let id = self
            .tree
            .add_option(group.node(), Box::new(ArgumentNode::new(config)));
        Ok(ArgId::new(id))
    }

    /// Registers a sequence-valued argument under a group.
    pub fn argument_list<T>(
        &mut self,
        group: GroupId,
        config: ArgListConfig,
    ) -> Result<ArgListId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        config.check()?;
        let id = self
            .tree
            .add_option(group.node(), Box::new(MultiArgumentNode::<T>::new(config)));
        Ok(ArgListId::new(id))
    }

    /// Registers a pattern flag under a group.
    ///
    /// Register exact options before pattern options that could capture
    /// their spellings — children scan in registration order.
    pub fn pattern_flag<T>(
        &mut self,
        group: GroupId,
        config: PatternFlagConfig,
    ) -> Result<PatternFlagId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        config.check()?;
        let node = PatternFlagNode::<T>::new(config)?;
        let id = self.tree.add_option(group.node(), Box::new(node));
        Ok(PatternFlagId::new(id))
    }

    /// Registers a pattern argument under a group.
    pub fn pattern_argument<K, V>(
        &mut self,
        group: GroupId,
        config: PatternArgConfig,
    ) -> Result<PatternArgId<K, V>, RegistrationError>
    where
        K: FromStr + Ord + 'static,
        K::Err: Display,
        V: FromStr + 'static,
        V::Err: Display,
    {
        config.check()?;
        let node = PatternArgumentNode::<K, V>::new(config)?;
        let id = self.tree.add_option(group.node(), Box::new(node));
        Ok(PatternArgId::new(id))
    }

    /// Registers a subcommand group under a parent group.
    pub fn group(
        &mut self,
        parent: GroupId,
        config: GroupConfig,
    ) -> Result<GroupId, RegistrationError> {
        config.check()?;
        let id = self
            .tree
            .add_child_group(parent.node(), GroupNode::from_config(config))?;
        Ok(GroupId(id))
    }

    /// Registers a subcommand group as the strict-order successor of a node.
    pub fn group_after(
        &mut self,
        prev: NodeId,
        config: GroupConfig,
    ) -> Result<GroupId, RegistrationError> {
        config.check()?;
        let id = self
            .tree
            .add_after(prev, NodeKind::Group(GroupNode::from_config(config)))?;
        Ok(GroupId(id))
    }

    /// Registers a positional as the strict-order successor of a node.
    pub fn positional_after<T>(
        &mut self,
        prev: NodeId,
        config: PositionalConfig,
    ) -> Result<PositionalId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        let id = self.tree.add_after(
            prev,
            NodeKind::Leaf(Box::new(PositionalNode::<T>::new(config))),
        )?;
        Ok(PositionalId::new(id))
    }

    /// Registers the positional bound to a group's own match.
    pub fn positional_bound<T>(
        &mut self,
        group: GroupId,
        config: PositionalConfig,
    ) -> Result<PositionalId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        let id = self
            .tree
            .add_bound(group.node(), Box::new(PositionalNode::<T>::new(config)))?;
        Ok(PositionalId::new(id))
    }

    /// Registers a group's trailing variadic positional.
    pub fn trailing_positional<T>(
        &mut self,
        group: GroupId,
        config: TrailingConfig,
    ) -> Result<TrailingId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        config.check()?;
        let id = self
            .tree
            .add_trailing(group.node(), Box::new(TrailingNode::<T>::new(config)))?;
        Ok(TrailingId::new(id))
    }

    /// Registers a trailing positional as a chain terminal.
    pub fn trailing_after<T>(
        &mut self,
        prev: NodeId,
        config: TrailingConfig,
    ) -> Result<TrailingId<T>, RegistrationError>
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        config.check()?;
        let id = self.tree.add_after(
            prev,
            NodeKind::Leaf(Box::new(TrailingNode::<T>::new(config))),
        )?;
        Ok(TrailingId::new(id))
    }

    /// Binds a sub-program callback to a group; at most one per group.
    pub fn sub_program<F>(&mut self, group: GroupId, run: F) -> Result<(), RegistrationError>
    where
        F: Fn(&ParseTree) -> i32 + 'static,
    {
        self.tree.mark_program(group.node())?;
        self.dispatcher.register(group.node(), Box::new(run));
        Ok(())
    }

    /// Scans a token stream against the registered tree.
    ///
    /// Pass the arguments after the program name. The stream must not be
    /// empty, and every token must be claimed by some node unless a help
    /// option short-circuits the scan.
    pub fn parse<I, S>(&mut self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = args.into_iter().map(Into::into).collect();
        let mut cursor = TokenCursor::new(&self.tokens);
        self.tree.scan(&mut cursor)
    }

    /// Runs the post-scan validation cascade. Read-only and idempotent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tree.validate_tree()
    }

    /// Dispatches the matched sub-programs.
    pub fn execute(&self) -> Result<i32, DispatchError> {
        self.dispatcher.execute(&self.tree)
    }

    /// One-shot driver: parse, then validate and dispatch.
    ///
    /// A fired help option stops after the scan. Dispatch is skipped when no
    /// sub-program was ever registered; the outcome then carries exit code
    /// zero.
    pub fn run<I, S>(&mut self, args: I) -> Result<RunOutcome, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.parse(args)?.is_help() {
            return Ok(RunOutcome::HelpRequested);
        }
        self.validate()?;
        if self.dispatcher.is_empty() {
            return Ok(RunOutcome::Completed(0));
        }
        Ok(RunOutcome::Completed(self.execute()?))
    }

    /// The help option that fired during the last scan, if any.
    pub fn help_request(&self) -> Option<HelpRequest<'_>> {
        self.tree.fired_help().map(|(id, help)| HelpRequest {
            path: self.tree.path(id),
            header: help.header(),
            message: help.message(),
        })
    }

    /// Whether the flag appeared. See [`ParseTree::is_set`].
    pub fn is_set(&self, flag: FlagId) -> bool {
        self.tree.is_set(flag)
    }

    /// How many times the counter appeared. See [`ParseTree::count`].
    pub fn count(&self, counter: CounterId) -> usize {
        self.tree.count(counter)
    }

    /// The decoded value of a single argument. See [`ParseTree::value`].
    pub fn value<T: 'static>(&self, arg: ArgId<T>) -> Option<&T> {
        self.tree.value(arg)
    }

    /// The decoded values of a sequence argument. See [`ParseTree::values`].
    pub fn values<T: 'static>(&self, arg: ArgListId<T>) -> &[T] {
        self.tree.values(arg)
    }

    /// The captured keys of a pattern flag. See [`ParseTree::pattern_keys`].
    pub fn pattern_keys<T: 'static>(&self, flag: PatternFlagId<T>) -> &[T] {
        self.tree.pattern_keys(flag)
    }

    /// The entries of a pattern argument. See [`ParseTree::entries`].
    pub fn entries<K: 'static, V: 'static>(
        &self,
        arg: PatternArgId<K, V>,
    ) -> &std::collections::BTreeMap<K, V> {
        self.tree.entries(arg)
    }

    /// The decoded value of a positional. See [`ParseTree::positional`].
    pub fn positional<T: 'static>(&self, positional: PositionalId<T>) -> Option<&T> {
        self.tree.positional(positional)
    }

    /// The decoded trailing values. See [`ParseTree::trailing`].
    pub fn trailing<T: 'static>(&self, trailing: TrailingId<T>) -> &[T] {
        self.tree.trailing(trailing)
    }

    /// Whether the subcommand group matched. See [`ParseTree::group_parsed`].
    pub fn group_parsed(&self, group: GroupId) -> bool {
        self.tree.group_parsed(group)
    }

    /// Whether this help option fired. See [`ParseTree::help_requested`].
    pub fn help_requested(&self, help: HelpId) -> bool {
        self.tree.help_requested(help)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
