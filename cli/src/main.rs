//! Demo binary: an nmcli-style network tool grammar driven by argtree.
//!
//! Shows the full registration → parse → validate → dispatch cycle:
//!
//! ```text
//! argtree-demo connection show [--active] [--order FIELD] [ID [ID...]]
//! argtree-demo connection up SELECTOR ID [ifname IFACE] [ap BSSID]
//! ```
//!
//! Matched sub-programs print their decoded request as JSON.

use std::env;
use std::process::ExitCode;

use argtree_engine::{
    ArgConfig, Error, FlagConfig, GroupConfig, HelpConfig, Parser, PositionalConfig, RunOutcome,
    TrailingConfig,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ShowRequest {
    active_only: bool,
    order: Option<String>,
    ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UpRequest {
    selector: String,
    id: String,
    interface: Option<String>,
    bssid: Option<String>,
}

fn print_request<T: Serialize>(request: &T) -> i32 {
    match serde_json::to_string_pretty(request) {
        Ok(body) => {
            println!("{body}");
            0
        }
        Err(err) => {
            eprintln!("argtree-demo: {err}");
            1
        }
    }
}

fn build_grammar(parser: &mut Parser) -> Result<(), Error> {
    let root = parser.root();
    parser.help(
        root,
        HelpConfig::new()
            .header("usage: argtree-demo connection {show|up} ...")
            .message("Manage demo network connections."),
    )?;

    let connection = parser.group(root, GroupConfig::named("connection"))?;

    let show = parser.group(connection, GroupConfig::named("show"))?;
    let active = parser.flag(
        show,
        FlagConfig::new().long("active").description("Only active connections"),
    )?;
    let order = parser.argument::<String>(
        show,
        ArgConfig::new().long("order").value_name("FIELD").optional(),
    )?;
    let show_id =
        parser.positional_after::<String>(show.node(), PositionalConfig::named("id").optional())?;
    let more_ids = parser.trailing_after::<String>(show_id.node(), TrailingConfig::named("id"))?;
    parser.sub_program(show, move |tree| {
        let mut ids: Vec<String> = tree.positional(show_id).cloned().into_iter().collect();
        ids.extend(tree.trailing(more_ids).iter().cloned());
        print_request(&ShowRequest {
            active_only: tree.is_set(active),
            order: tree.value(order).cloned(),
            ids,
        })
    })?;

    let up = parser.group(connection, GroupConfig::named("up"))?;
    let selector = parser.positional_after::<String>(
        up.node(),
        PositionalConfig::named("selector").description("id, uuid, or path"),
    )?;
    let up_id = parser.positional_after::<String>(selector.node(), PositionalConfig::named("id"))?;
    let ifname = parser.group_after(up_id.node(), GroupConfig::named("ifname"))?;
    let interface =
        parser.positional_bound::<String>(ifname, PositionalConfig::named("interface"))?;
    let ap = parser.group_after(interface.node(), GroupConfig::named("ap"))?;
    let bssid = parser.positional_bound::<String>(ap, PositionalConfig::named("bssid"))?;
    parser.sub_program(up, move |tree| {
        print_request(&UpRequest {
            selector: tree.positional(selector).cloned().unwrap_or_default(),
            id: tree.positional(up_id).cloned().unwrap_or_default(),
            interface: tree.positional(interface).cloned(),
            bssid: tree.positional(bssid).cloned(),
        })
    })?;

    Ok(())
}

fn run(args: Vec<String>) -> Result<i32, Error> {
    let mut parser = Parser::new();
    build_grammar(&mut parser)?;
    match parser.run(args)? {
        RunOutcome::HelpRequested => {
            if let Some(request) = parser.help_request() {
                println!("{}", request.header);
                if !request.message.is_empty() {
                    println!("{}", request.message);
                }
            }
            Ok(0)
        }
        RunOutcome::Completed(code) => Ok(code),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(args) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("argtree-demo: {err}");
            ExitCode::FAILURE
        }
    }
}
