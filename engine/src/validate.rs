//! The post-scan validation cascade.
//!
//! Runs once after a structurally successful scan, read-only and idempotent:
//! calling it twice reports the same result and changes no parse state.
//! Too-many violations are normally caught eagerly during the scan; this
//! walk owns the deferred side of the contract — too-few counts, missing
//! required subcommands, and missing After/BindTo follow-ups.

use argtree_core::ValidationError;

use crate::tree::{NodeId, NodeKind, ParseTree};

impl ParseTree {
    pub(crate) fn validate_tree(&self) -> Result<(), ValidationError> {
        self.validate_node(Self::ROOT)
    }

    fn validate_node(&self, id: NodeId) -> Result<(), ValidationError> {
        match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => leaf.validate(&self.path(id)),
            NodeKind::Group(group) => {
                if !group.optional && !group.parsed {
                    return Err(ValidationError::MissingGroup {
                        path: self.path(id),
                    });
                }
                // An absent group leaves its subtree unchecked.
                if !group.parsed {
                    return Ok(());
                }
                for &child in &group.options {
                    self.validate_node(child)?;
                }
                for &child in &group.groups {
                    self.validate_node(child)?;
                }
                if let Some(bound) = group.bind_to {
                    if !self.node_parsed(bound) {
                        return Err(ValidationError::MissingFollowUp {
                            owner: self.path(id),
                            path: self.path(bound),
                        });
                    }
                    self.validate_node(bound)?;
                    if let Some(successor) = self.slot(bound).after {
                        self.validate_chain(bound, successor)?;
                    }
                }
                if let Some(trailing) = group.trailing {
                    self.validate_node(trailing)?;
                }
                if let Some(successor) = self.slot(id).after {
                    self.validate_chain(id, successor)?;
                }
                Ok(())
            }
        }
    }

    /// Validates an After chain node by node.
    ///
    /// Leaves check their own occurrence bounds. A parsed chain group takes
    /// over the rest of the chain through its own successor link; a required
    /// absent one is a missing follow-up; an optional absent one is skipped
    /// without blocking the nodes behind it.
    fn validate_chain(&self, owner: NodeId, head: NodeId) -> Result<(), ValidationError> {
        let mut prev = owner;
        let mut next = Some(head);
        while let Some(chain_id) = next {
            match &self.slot(chain_id).kind {
                NodeKind::Leaf(leaf) => leaf.validate(&self.path(chain_id))?,
                NodeKind::Group(group) => {
                    if group.parsed {
                        return self.validate_node(chain_id);
                    }
                    if !group.optional {
                        return Err(ValidationError::MissingFollowUp {
                            owner: self.path(prev),
                            path: self.path(chain_id),
                        });
                    }
                }
            }
            prev = chain_id;
            next = self.chain_successor(chain_id);
        }
        Ok(())
    }
}
