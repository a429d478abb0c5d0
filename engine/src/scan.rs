//! The token-consuming scan over the registered tree.
//!
//! Each group runs fixed-point rounds over its direct children: leaves in
//! registration order first, then child groups, first match winning the
//! round. A matched child group recurses before the parent's next round, so
//! the one shared cursor advances through the whole tree depth-first. After
//! the fixed point a group fires its BindTo successor, its trailing
//! positional, and its After chain, in that order.

use tracing::debug;

use argtree_core::{ParseError, ParseOutcome};

use crate::cursor::TokenCursor;
use crate::tree::{NodeId, ParseTree};

impl ParseTree {
    /// Scans the whole token stream from the root.
    ///
    /// An empty stream is a hard error, as is any leftover token once the
    /// scan reaches its fixed point — unless help fired, which short-circuits
    /// everything.
    pub(crate) fn scan(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        if cursor.is_done() {
            return Err(ParseError::EmptyCommandLine);
        }
        if self.scan_group(Self::ROOT, cursor)?.is_help() {
            debug!("scan stopped by help request");
            return Ok(ParseOutcome::HelpRequested);
        }
        if let Some(token) = cursor.peek() {
            return Err(ParseError::UnknownArgument {
                token: token.to_string(),
            });
        }
        Ok(ParseOutcome::Match)
    }

    /// Runs one group's scan: fixed-point rounds, then the positional steps.
    ///
    /// The caller has already consumed the group's own name token (the root
    /// has none).
    fn scan_group(
        &mut self,
        group_id: NodeId,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        let (options, groups, bind_to, trailing) = {
            let group = self.group(group_id);
            (
                group.options.clone(),
                group.groups.clone(),
                group.bind_to,
                group.trailing,
            )
        };
        let after = self.slot(group_id).after;

        let mut winner: Option<NodeId> = None;
        loop {
            let mut advanced = false;
            for &option_id in &options {
                match self.match_leaf(option_id, cursor)? {
                    ParseOutcome::Match => {
                        advanced = true;
                        break;
                    }
                    ParseOutcome::HelpRequested => return Ok(ParseOutcome::HelpRequested),
                    ParseOutcome::NoMatch => {}
                }
            }
            if !advanced && !cursor.is_done() {
                for &child_id in &groups {
                    match self.match_group(child_id, cursor)? {
                        ParseOutcome::Match => {
                            // Only one sibling subcommand may win per
                            // invocation; the same one may re-match.
                            if let Some(first) = winner {
                                if first != child_id {
                                    return Err(ParseError::GroupStageConflict {
                                        path: self.path(group_id),
                                        first: self.group(first).name.clone(),
                                        second: self.group(child_id).name.clone(),
                                    });
                                }
                            }
                            winner = Some(child_id);
                            advanced = true;
                            break;
                        }
                        ParseOutcome::HelpRequested => return Ok(ParseOutcome::HelpRequested),
                        ParseOutcome::NoMatch => {}
                    }
                }
            }
            if !advanced || cursor.is_done() {
                break;
            }
        }

        if let Some(bound) = bind_to {
            if self.attempt_chain(bound, cursor)?.is_help() {
                return Ok(ParseOutcome::HelpRequested);
            }
        }
        if let Some(trailing_id) = trailing {
            self.match_leaf(trailing_id, cursor)?;
        }
        if let Some(successor) = after {
            if self.attempt_chain(successor, cursor)?.is_help() {
                return Ok(ParseOutcome::HelpRequested);
            }
        }
        Ok(ParseOutcome::Match)
    }

    /// Matches a group's own bare-word name, recursing into its scan.
    ///
    /// A dash-prefixed spelling of the name is a hard ambiguity error rather
    /// than a near-miss: the author clearly meant this subcommand.
    fn match_group(
        &mut self,
        group_id: NodeId,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        let Some(front) = cursor.peek() else {
            return Ok(ParseOutcome::NoMatch);
        };
        let name = self.group(group_id).name.clone();
        if front == name {
            cursor.bump();
            self.group_mut(group_id).parsed = true;
            debug!(subcommand = %self.path(group_id), "subcommand matched");
            return self.scan_group(group_id, cursor);
        }
        if front.strip_prefix("--") == Some(name.as_str()) {
            return Err(ParseError::AmbiguousGroupToken {
                path: self.path(group_id),
                token: front.to_string(),
            });
        }
        Ok(ParseOutcome::NoMatch)
    }

    fn match_leaf(
        &mut self,
        leaf_id: NodeId,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        let path = self.path(leaf_id);
        self.leaf_mut(leaf_id).try_match(&path, cursor)
    }

    /// Gives every node of an After/BindTo chain its one attempt, in order.
    ///
    /// A chain group that matches takes over: its own scan already fired the
    /// rest of the chain through its successor link. An absent optional group
    /// does not block the nodes behind it.
    fn attempt_chain(
        &mut self,
        head: NodeId,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<ParseOutcome, ParseError> {
        let mut next = Some(head);
        while let Some(chain_id) = next {
            if self.is_group(chain_id) {
                match self.match_group(chain_id, cursor)? {
                    ParseOutcome::Match => break,
                    ParseOutcome::HelpRequested => return Ok(ParseOutcome::HelpRequested),
                    ParseOutcome::NoMatch => {}
                }
            } else if self.match_leaf(chain_id, cursor)?.is_help() {
                return Ok(ParseOutcome::HelpRequested);
            }
            next = self.chain_successor(chain_id);
        }
        Ok(ParseOutcome::Match)
    }
}
