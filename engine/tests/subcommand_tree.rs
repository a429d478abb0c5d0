//! An nmcli-style two-level subcommand tree with After/BindTo chains,
//! help short-circuiting, and sub-program dispatch.

use std::cell::Cell;
use std::rc::Rc;

use argtree_engine::{
    DispatchError, FlagConfig, FlagId, GroupConfig, GroupId, HelpConfig, ParseError, ParseOutcome,
    Parser, PositionalConfig, PositionalId, RegistrationError, RunOutcome, TrailingConfig,
    TrailingId, ValidationError,
};

struct NetGrammar {
    parser: Parser,
    show: GroupId,
    up: GroupId,
    active: FlagId,
    show_id: PositionalId<String>,
    more_ids: TrailingId<String>,
    selector: PositionalId<String>,
    up_id: PositionalId<String>,
    ifname: GroupId,
    interface: PositionalId<String>,
    ap: GroupId,
    bssid: PositionalId<String>,
}

/// connection show [--active] [ID [ID...]]
/// connection up SELECTOR ID [ifname IFACE] [ap BSSID]
fn net_grammar() -> NetGrammar {
    let mut parser = Parser::new();
    let root = parser.root();

    let connection = parser
        .group(root, GroupConfig::named("connection"))
        .unwrap();

    let show = parser.group(connection, GroupConfig::named("show")).unwrap();
    let active = parser
        .flag(show, FlagConfig::new().long("active").description("Only active connections"))
        .unwrap();
    let show_id = parser
        .positional_after::<String>(show.node(), PositionalConfig::named("id").optional())
        .unwrap();
    let more_ids = parser
        .trailing_after::<String>(show_id.node(), TrailingConfig::named("more-ids"))
        .unwrap();

    let up = parser.group(connection, GroupConfig::named("up")).unwrap();
    let selector = parser
        .positional_after::<String>(up.node(), PositionalConfig::named("selector"))
        .unwrap();
    let up_id = parser
        .positional_after::<String>(selector.node(), PositionalConfig::named("id"))
        .unwrap();
    let ifname = parser
        .group_after(up_id.node(), GroupConfig::named("ifname"))
        .unwrap();
    let interface = parser
        .positional_bound::<String>(ifname, PositionalConfig::named("interface"))
        .unwrap();
    let ap = parser
        .group_after(interface.node(), GroupConfig::named("ap"))
        .unwrap();
    let bssid = parser
        .positional_bound::<String>(ap, PositionalConfig::named("bssid"))
        .unwrap();

    NetGrammar {
        parser,
        show,
        up,
        active,
        show_id,
        more_ids,
        selector,
        up_id,
        ifname,
        interface,
        ap,
        bssid,
    }
}

#[test]
fn test_two_level_tree_dispatches_the_matched_sub_program() {
    let mut grammar = net_grammar();
    let show = grammar.show;
    let active = grammar.active;
    let show_id = grammar.show_id;

    let show_calls = Rc::new(Cell::new(0));
    let calls = Rc::clone(&show_calls);
    grammar
        .parser
        .sub_program(show, move |tree| {
            calls.set(calls.get() + 1);
            assert!(tree.is_set(active));
            assert_eq!(tree.positional(show_id), Some(&"id123".to_string()));
            0
        })
        .unwrap();
    grammar
        .parser
        .sub_program(grammar.up, |_| panic!("up must not dispatch"))
        .unwrap();

    let outcome = grammar
        .parser
        .run(["connection", "show", "--active", "id123"])
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed(0));
    assert_eq!(show_calls.get(), 1);
}

#[test]
fn test_after_chain_validates_in_strict_order() {
    // `up` alone: the selector never matched.
    let mut grammar = net_grammar();
    grammar.parser.parse(["connection", "up"]).unwrap();
    let err = grammar.parser.validate().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TooFew { ref path, min: 1, count: 0 } if path == "connection.up.selector"
    ));

    // One bare word binds the selector; the id is still missing.
    let mut grammar = net_grammar();
    grammar.parser.parse(["connection", "up", "myid"]).unwrap();
    assert_eq!(
        grammar.parser.positional(grammar.selector),
        Some(&"myid".to_string())
    );
    let err = grammar.parser.validate().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TooFew { ref path, .. } if path == "connection.up.id"
    ));
}

#[test]
fn test_bound_positional_follows_its_keyword_group() {
    let mut grammar = net_grammar();

    grammar
        .parser
        .parse(["connection", "up", "id", "home", "ifname", "eth0"])
        .unwrap();
    grammar.parser.validate().unwrap();

    assert_eq!(grammar.parser.positional(grammar.selector), Some(&"id".to_string()));
    assert_eq!(grammar.parser.positional(grammar.up_id), Some(&"home".to_string()));
    assert!(grammar.parser.group_parsed(grammar.ifname));
    assert_eq!(
        grammar.parser.positional(grammar.interface),
        Some(&"eth0".to_string())
    );
    assert!(!grammar.parser.group_parsed(grammar.ap));
}

#[test]
fn test_absent_keyword_clause_does_not_block_the_chain() {
    // `ifname` is skipped entirely; `ap` still gets its attempt.
    let mut grammar = net_grammar();

    grammar
        .parser
        .parse(["connection", "up", "id", "home", "ap", "ab:cd"])
        .unwrap();
    grammar.parser.validate().unwrap();

    assert!(!grammar.parser.group_parsed(grammar.ifname));
    assert!(grammar.parser.group_parsed(grammar.ap));
    assert_eq!(grammar.parser.positional(grammar.bssid), Some(&"ab:cd".to_string()));
}

#[test]
fn test_keyword_group_without_its_bound_value_is_a_missing_follow_up() {
    let mut grammar = net_grammar();

    grammar
        .parser
        .parse(["connection", "up", "id", "home", "ifname"])
        .unwrap();
    let err = grammar.parser.validate().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::MissingFollowUp { ref owner, ref path }
            if owner == "connection.up.ifname" && path == "connection.up.ifname.interface"
    ));
}

#[test]
fn test_trailing_chain_terminal_collects_the_rest() {
    let mut grammar = net_grammar();

    grammar
        .parser
        .parse(["connection", "show", "id1", "id2", "id3"])
        .unwrap();
    grammar.parser.validate().unwrap();

    assert_eq!(grammar.parser.positional(grammar.show_id), Some(&"id1".to_string()));
    assert_eq!(
        grammar.parser.trailing(grammar.more_ids),
        ["id2".to_string(), "id3".to_string()]
    );
}

#[test]
fn test_partial_subcommand_name_matches_nothing() {
    let mut parser = Parser::new();
    let root = parser.root();
    parser.group(root, GroupConfig::named("show")).unwrap();
    parser.group(root, GroupConfig::named("shox")).unwrap();

    let err = parser.parse(["sh"]).unwrap_err();
    assert!(matches!(err, ParseError::UnknownArgument { ref token } if token == "sh"));
}

#[test]
fn test_two_sibling_groups_in_one_stage_conflict() {
    let mut parser = Parser::new();
    let root = parser.root();
    parser.group(root, GroupConfig::named("show")).unwrap();
    parser.group(root, GroupConfig::named("up")).unwrap();

    let err = parser.parse(["show", "up"]).unwrap_err();
    assert!(matches!(
        err,
        ParseError::GroupStageConflict { ref first, ref second, .. }
            if first == "show" && second == "up"
    ));
}

#[test]
fn test_dash_spelling_of_a_subcommand_is_ambiguous() {
    let mut grammar = net_grammar();

    let err = grammar.parser.parse(["--connection"]).unwrap_err();
    assert!(matches!(
        err,
        ParseError::AmbiguousGroupToken { ref token, .. } if token == "--connection"
    ));
}

#[test]
fn test_help_short_circuits_validation_and_dispatch() {
    let mut grammar = net_grammar();
    let show = grammar.show;
    let help = grammar
        .parser
        .help(show, HelpConfig::new().header("usage: connection show [--active] [ID...]"))
        .unwrap();
    grammar
        .parser
        .sub_program(show, |_| panic!("help must pre-empt dispatch"))
        .unwrap();

    // Required chain nodes under `up` never matched, yet help wins.
    let outcome = grammar
        .parser
        .run(["connection", "show", "--help", "leftover"])
        .unwrap();

    assert_eq!(outcome, RunOutcome::HelpRequested);
    assert!(grammar.parser.help_requested(help));
    let request = grammar.parser.help_request().unwrap();
    assert_eq!(request.path, "connection.show.help");
    assert_eq!(request.header, "usage: connection show [--active] [ID...]");
}

#[test]
fn test_required_group_missing_fails_validation() {
    let mut parser = Parser::new();
    let root = parser.root();
    parser.flag(root, FlagConfig::new().short('v')).unwrap();
    parser
        .group(root, GroupConfig::named("mode").required())
        .unwrap();

    assert_eq!(parser.parse(["-v"]).unwrap(), ParseOutcome::Match);
    let err = parser.validate().unwrap_err();
    assert!(matches!(err, ValidationError::MissingGroup { ref path } if path == "mode"));
}

#[test]
fn test_dispatch_runs_every_parsed_registration_until_failure() {
    let mut parser = Parser::new();
    let root = parser.root();
    let outer = parser.group(root, GroupConfig::named("outer")).unwrap();
    let inner = parser.group(outer, GroupConfig::named("inner")).unwrap();

    let order = Rc::new(Cell::new(Vec::new()));
    let first = Rc::clone(&order);
    parser
        .sub_program(outer, move |_| {
            let mut seen = first.take();
            seen.push("outer");
            first.set(seen);
            3
        })
        .unwrap();
    let second = Rc::clone(&order);
    parser
        .sub_program(inner, move |_| {
            let mut seen = second.take();
            seen.push("inner");
            second.set(seen);
            0
        })
        .unwrap();

    parser.parse(["outer", "inner"]).unwrap();
    parser.validate().unwrap();

    // Both groups parsed; the first registration fails and stops the rest.
    assert_eq!(parser.execute().unwrap(), 3);
    assert_eq!(order.take(), vec!["outer"]);
}

#[test]
fn test_no_matching_sub_program_is_a_dispatch_error() {
    let mut parser = Parser::new();
    let root = parser.root();
    parser.flag(root, FlagConfig::new().short('v')).unwrap();
    let unused = parser.group(root, GroupConfig::named("unused")).unwrap();
    parser.sub_program(unused, |_| 0).unwrap();

    parser.parse(["-v"]).unwrap();
    parser.validate().unwrap();
    assert_eq!(parser.execute().unwrap_err(), DispatchError::NoSubProgramMatched);
}

#[test]
fn test_registration_invariants_are_enforced() {
    let mut parser = Parser::new();
    let root = parser.root();
    let group = parser.group(root, GroupConfig::named("show")).unwrap();

    parser.help(group, HelpConfig::new()).unwrap();
    assert!(matches!(
        parser.help(group, HelpConfig::new()),
        Err(RegistrationError::DuplicateHelp { .. })
    ));

    parser.sub_program(group, |_| 0).unwrap();
    assert!(matches!(
        parser.sub_program(group, |_| 0),
        Err(RegistrationError::DuplicateSubProgram { .. })
    ));

    parser
        .positional_after::<String>(group.node(), PositionalConfig::named("id"))
        .unwrap();
    assert!(matches!(
        parser.positional_after::<String>(group.node(), PositionalConfig::named("again")),
        Err(RegistrationError::DuplicateFollowUp { .. })
    ));

    parser
        .positional_bound::<String>(group, PositionalConfig::named("value"))
        .unwrap();
    assert!(matches!(
        parser.positional_bound::<String>(group, PositionalConfig::named("value")),
        Err(RegistrationError::DuplicateBoundPositional { .. })
    ));

    // Child groups and a trailing positional are mutually exclusive.
    assert!(matches!(
        parser.trailing_positional::<String>(root, TrailingConfig::named("rest")),
        Err(RegistrationError::GroupTrailingConflict { .. })
    ));
    let mut parser = Parser::new();
    let root = parser.root();
    parser
        .trailing_positional::<String>(root, TrailingConfig::named("rest"))
        .unwrap();
    assert!(matches!(
        parser.group(root, GroupConfig::named("show")),
        Err(RegistrationError::GroupTrailingConflict { .. })
    ));
}

#[test]
fn test_same_group_may_rematch_without_conflict() {
    let mut parser = Parser::new();
    let root = parser.root();
    let show = parser.group(root, GroupConfig::named("show")).unwrap();
    let active = parser.flag(show, FlagConfig::new().long("active")).unwrap();

    // Only a second *distinct* subcommand conflicts; the winner may recur.
    parser.parse(["show", "--active", "show"]).unwrap();
    parser.validate().unwrap();
    assert!(parser.is_set(active));
}
