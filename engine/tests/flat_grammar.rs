//! A candump-style flat grammar: short options, counters, defaults, and a
//! trailing interface list at the root.

use argtree_engine::{
    ArgConfig, ArgId, CounterConfig, CounterId, FlagConfig, FlagId, ParseError, ParseOutcome,
    Parser, PatternArgConfig, PatternArgId, TrailingConfig, TrailingId, ValidationError,
};

struct DumpGrammar {
    parser: Parser,
    timestamp: ArgId<char>,
    hardware: FlagId,
    color: CounterId,
    delay: ArgId<u64>,
    bridge: ArgId<String>,
    filters: PatternArgId<String, String>,
    interfaces: TrailingId<String>,
}

fn dump_grammar() -> DumpGrammar {
    let mut parser = Parser::new();
    let root = parser.root();

    let timestamp = parser
        .argument(
            root,
            ArgConfig::new()
                .long("timestamp")
                .short('t')
                .default_value('a')
                .description("Timestamp mode"),
        )
        .unwrap();
    let hardware = parser
        .flag(root, FlagConfig::new().short('H').description("Hardware timestamps"))
        .unwrap();
    let color = parser
        .counter(root, CounterConfig::new().short('c').description("Color level"))
        .unwrap();
    let delay = parser
        .argument(
            root,
            ArgConfig::new().short('u').default_value(10u64).description("Bridge delay"),
        )
        .unwrap();
    let bridge = parser
        .argument(root, ArgConfig::<String>::new().short('b').optional())
        .unwrap();
    let filters = parser
        .pattern_argument(root, PatternArgConfig::pattern("filter-*"))
        .unwrap();
    let interfaces = parser
        .trailing_positional(root, TrailingConfig::named("interface"))
        .unwrap();

    DumpGrammar {
        parser,
        timestamp,
        hardware,
        color,
        delay,
        bridge,
        filters,
        interfaces,
    }
}

#[test]
fn test_absent_options_decode_to_their_defaults() {
    let mut grammar = dump_grammar();

    grammar.parser.parse(["vcan0"]).unwrap();
    grammar.parser.validate().unwrap();

    assert_eq!(grammar.parser.value(grammar.timestamp), Some(&'a'));
    assert!(!grammar.parser.is_set(grammar.hardware));
    assert_eq!(grammar.parser.value(grammar.delay), Some(&10));
    assert_eq!(grammar.parser.value(grammar.bridge), None);
    assert_eq!(grammar.parser.trailing(grammar.interfaces), ["vcan0".to_string()]);
}

#[test]
fn test_every_value_form_decodes_identically() {
    for input in [
        &["--timestamp=d", "vcan0"][..],
        &["--timestamp", "d", "vcan0"][..],
        &["-td", "vcan0"][..],
        &["-t", "d", "vcan0"][..],
    ] {
        let mut grammar = dump_grammar();
        grammar.parser.parse(input.iter().copied()).unwrap();
        grammar.parser.validate().unwrap();
        assert_eq!(grammar.parser.value(grammar.timestamp), Some(&'d'));
    }
}

#[test]
fn test_flag_twice_fails_fast() {
    let mut grammar = dump_grammar();

    let err = grammar.parser.parse(["-H", "-H"]).unwrap_err();
    assert!(matches!(err, ParseError::TooMany { ref path, max: 1 } if path == "H"));
}

#[test]
fn test_counter_accumulates_across_the_scan() {
    let mut grammar = dump_grammar();

    grammar.parser.parse(["-c", "-c", "-c", "vcan0"]).unwrap();
    grammar.parser.validate().unwrap();
    assert_eq!(grammar.parser.count(grammar.color), 3);
}

#[test]
fn test_empty_command_line_is_a_hard_error() {
    let mut grammar = dump_grammar();

    let err = grammar.parser.parse(Vec::<String>::new()).unwrap_err();
    assert_eq!(err, ParseError::EmptyCommandLine);
}

#[test]
fn test_option_token_inside_trailing_run_is_rejected() {
    let mut grammar = dump_grammar();

    let err = grammar.parser.parse(["vcan0", "-t", "d"]).unwrap_err();
    assert!(matches!(err, ParseError::FlagInTrailing { ref token, .. } if token == "-t"));
}

#[test]
fn test_missing_value_at_end_of_stream() {
    let mut grammar = dump_grammar();

    let err = grammar.parser.parse(["-b"]).unwrap_err();
    assert!(matches!(err, ParseError::MissingValue { ref path } if path == "b"));
}

#[test]
fn test_conversion_failure_names_token_and_path() {
    let mut grammar = dump_grammar();

    let err = grammar.parser.parse(["-u", "soon"]).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidValue { ref path, ref token, .. } if path == "u" && token == "soon"
    ));
}

#[test]
fn test_pattern_argument_collects_keyed_values() {
    let mut grammar = dump_grammar();

    grammar
        .parser
        .parse(["--filter-eth0=up", "--filter-lo", "down", "vcan0"])
        .unwrap();
    grammar.parser.validate().unwrap();

    let filters = grammar.parser.entries(grammar.filters);
    assert_eq!(filters["eth0"], "up");
    assert_eq!(filters["lo"], "down");
}

#[test]
fn test_empty_pattern_capture_is_a_value_error() {
    let mut grammar = dump_grammar();

    let err = grammar.parser.parse(["--filter-=up"]).unwrap_err();
    assert!(matches!(err, ParseError::EmptyPatternCapture { .. }));
}

#[test]
fn test_unknown_argument_carries_the_offending_token() {
    // No trailing positional here, so a stray token survives to the
    // leftover check instead of the trailing run.
    let mut parser = Parser::new();
    let root = parser.root();
    parser.flag(root, FlagConfig::new().short('v')).unwrap();

    let err = parser.parse(["-v", "--nope"]).unwrap_err();
    assert!(matches!(err, ParseError::UnknownArgument { ref token } if token == "--nope"));
}

#[test]
fn test_required_argument_without_default_defers_to_validation() {
    let mut parser = Parser::new();
    let root = parser.root();
    parser.flag(root, FlagConfig::new().short('v')).unwrap();
    parser
        .argument::<String>(root, ArgConfig::new().long("iface"))
        .unwrap();

    // The scan itself succeeds; the contract fires at validation time.
    assert_eq!(parser.parse(["-v"]).unwrap(), ParseOutcome::Match);
    let err = parser.validate().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TooFew { ref path, min: 1, count: 0 } if path == "iface"
    ));
}

#[test]
fn test_validation_is_idempotent() {
    let mut grammar = dump_grammar();

    grammar.parser.parse(["-c", "-c", "vcan0"]).unwrap();
    grammar.parser.validate().unwrap();
    grammar.parser.validate().unwrap();
    assert_eq!(grammar.parser.count(grammar.color), 2);
}
