//! The arena-backed option tree.
//!
//! Every node — leaf or group — lives in one flat slot arena and is referred
//! to by index. Parent back-references and After/BindTo successor links are
//! plain indices too, so ownership stays strictly parent-owns-child with no
//! cycles and no owning back-pointers. Registration happens once, before any
//! parse; scan state is mutated in place.

use std::fmt;

use argtree_core::{GroupConfig, RegistrationError};

use crate::node::Matcher;

/// Index of one node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// An interior node: a named subcommand container, or the anonymous root.
pub(crate) struct GroupNode {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) optional: bool,
    pub(crate) parsed: bool,
    /// Child leaves, scanned first each round, in registration order.
    pub(crate) options: Vec<NodeId>,
    /// Child groups, scanned when no leaf matched, in registration order.
    pub(crate) groups: Vec<NodeId>,
    pub(crate) bind_to: Option<NodeId>,
    pub(crate) trailing: Option<NodeId>,
    pub(crate) help: Option<NodeId>,
    pub(crate) has_program: bool,
}

impl GroupNode {
    pub(crate) fn from_config(config: GroupConfig) -> Self {
        Self {
            name: config.name,
            description: config.description,
            optional: config.optional,
            parsed: false,
            options: Vec::new(),
            groups: Vec::new(),
            bind_to: None,
            trailing: None,
            help: None,
            has_program: false,
        }
    }

    /// The anonymous root: nameless, required, and pre-marked parsed.
    fn root() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            optional: false,
            parsed: true,
            options: Vec::new(),
            groups: Vec::new(),
            bind_to: None,
            trailing: None,
            help: None,
            has_program: false,
        }
    }
}

/// The tagged payload of a slot: every registration knows statically
/// whether it adds a leaf or an interior group.
pub(crate) enum NodeKind {
    Leaf(Box<dyn Matcher>),
    Group(GroupNode),
}

pub(crate) struct NodeSlot {
    pub(crate) parent: Option<NodeId>,
    /// Strict-order successor (After chain link).
    pub(crate) after: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

/// The registered option tree plus all mutable parse state.
///
/// Built through [`Parser`](crate::Parser) registration calls; shared
/// read-only with sub-program callbacks so they can pull decoded values
/// through their typed handles.
pub struct ParseTree {
    pub(crate) slots: Vec<NodeSlot>,
}

impl fmt::Debug for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseTree")
            .field("nodes", &self.slots.len())
            .finish()
    }
}

impl ParseTree {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Self {
            slots: vec![NodeSlot {
                parent: None,
                after: None,
                kind: NodeKind::Group(GroupNode::root()),
            }],
        }
    }

    pub(crate) fn slot(&self, id: NodeId) -> &NodeSlot {
        &self.slots[id.0]
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut NodeSlot {
        &mut self.slots[id.0]
    }

    pub(crate) fn is_group(&self, id: NodeId) -> bool {
        matches!(self.slot(id).kind, NodeKind::Group(_))
    }

    pub(crate) fn group(&self, id: NodeId) -> &GroupNode {
        match &self.slot(id).kind {
            NodeKind::Group(group) => group,
            NodeKind::Leaf(_) => unreachable!("node {id:?} is a leaf, not a group"),
        }
    }

    pub(crate) fn group_mut(&mut self, id: NodeId) -> &mut GroupNode {
        match &mut self.slot_mut(id).kind {
            NodeKind::Group(group) => group,
            NodeKind::Leaf(_) => unreachable!("node {id:?} is a leaf, not a group"),
        }
    }

    pub(crate) fn leaf(&self, id: NodeId) -> &dyn Matcher {
        match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => leaf.as_ref(),
            NodeKind::Group(_) => unreachable!("node {id:?} is a group, not a leaf"),
        }
    }

    pub(crate) fn leaf_mut(&mut self, id: NodeId) -> &mut dyn Matcher {
        match &mut self.slot_mut(id).kind {
            NodeKind::Leaf(leaf) => leaf.as_mut(),
            NodeKind::Group(_) => unreachable!("node {id:?} is a group, not a leaf"),
        }
    }

    /// Whether the node has matched at least once.
    pub(crate) fn node_parsed(&self, id: NodeId) -> bool {
        match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => leaf.info().count > 0,
            NodeKind::Group(group) => group.parsed,
        }
    }

    fn name_of(&self, id: NodeId) -> String {
        match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => leaf.info().display_name(),
            NodeKind::Group(group) => group.name.clone(),
        }
    }

    /// The declared description of a node, for external help rendering.
    pub fn description(&self, id: NodeId) -> &str {
        match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => &leaf.info().description,
            NodeKind::Group(group) => &group.description,
        }
    }

    /// The raw token that last matched the node, if any.
    pub fn last_token(&self, id: NodeId) -> Option<&str> {
        match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => leaf.info().last_token.as_deref(),
            NodeKind::Group(group) => group.parsed.then_some(group.name.as_str()),
        }
    }

    /// The fully-qualified dotted path of a node, root omitted.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = vec![self.name_of(id)];
        let mut cursor = self.slot(id).parent;
        while let Some(parent) = cursor {
            names.push(self.name_of(parent));
            cursor = self.slot(parent).parent;
        }
        names.retain(|name| !name.is_empty());
        names.reverse();
        names.join(".")
    }

    /// The next node of an After chain, seen from `id`.
    ///
    /// Chains continue through a node's own successor link; for a group
    /// whose continuation was declared on its bound positional, the link
    /// lives there instead. Used when the group itself did not match — a
    /// matched group drives its own links from inside its scan.
    pub(crate) fn chain_successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(next) = self.slot(id).after {
            return Some(next);
        }
        match &self.slot(id).kind {
            NodeKind::Group(group) => group.bind_to.and_then(|bound| self.slot(bound).after),
            NodeKind::Leaf(_) => None,
        }
    }

    /// The nearest enclosing group: the node itself if it is one.
    pub(crate) fn owner_group(&self, id: NodeId) -> NodeId {
        let mut cursor = id;
        loop {
            if self.is_group(cursor) {
                return cursor;
            }
            cursor = self
                .slot(cursor)
                .parent
                .expect("leaf slots always have a parent group");
        }
    }

    fn push_slot(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(NodeSlot {
            parent,
            after: None,
            kind,
        });
        id
    }

    /// Registers a leaf into a group's option list.
    pub(crate) fn add_option(&mut self, parent: NodeId, node: Box<dyn Matcher>) -> NodeId {
        let id = self.push_slot(Some(parent), NodeKind::Leaf(node));
        self.group_mut(parent).options.push(id);
        id
    }

    /// Registers the help leaf of a group; at most one per group.
    pub(crate) fn add_help(
        &mut self,
        parent: NodeId,
        node: Box<dyn Matcher>,
    ) -> Result<NodeId, RegistrationError> {
        if self.group(parent).help.is_some() {
            return Err(RegistrationError::DuplicateHelp {
                path: self.path(parent),
            });
        }
        let id = self.add_option(parent, node);
        self.group_mut(parent).help = Some(id);
        Ok(id)
    }

    /// Registers a child group; rejected once a trailing positional exists.
    pub(crate) fn add_child_group(
        &mut self,
        parent: NodeId,
        group: GroupNode,
    ) -> Result<NodeId, RegistrationError> {
        if self.group(parent).trailing.is_some() {
            return Err(RegistrationError::GroupTrailingConflict {
                group: self.path(parent),
                child: group.name,
            });
        }
        let id = self.push_slot(Some(parent), NodeKind::Group(group));
        self.group_mut(parent).groups.push(id);
        Ok(id)
    }

    /// Registers a group's trailing positional; at most one, and never next
    /// to child groups.
    pub(crate) fn add_trailing(
        &mut self,
        parent: NodeId,
        node: Box<dyn Matcher>,
    ) -> Result<NodeId, RegistrationError> {
        let group = self.group(parent);
        if group.trailing.is_some() {
            return Err(RegistrationError::DuplicateTrailing {
                path: self.path(parent),
            });
        }
        if !group.groups.is_empty() {
            return Err(RegistrationError::GroupTrailingConflict {
                group: self.path(parent),
                child: node.info().display_name(),
            });
        }
        let id = self.push_slot(Some(parent), NodeKind::Leaf(node));
        self.group_mut(parent).trailing = Some(id);
        Ok(id)
    }

    /// Links a node as the strict-order successor of `prev`.
    ///
    /// The new node's parent, for path purposes, is the nearest enclosing
    /// group of its predecessor; the link itself is non-owning.
    pub(crate) fn add_after(
        &mut self,
        prev: NodeId,
        kind: NodeKind,
    ) -> Result<NodeId, RegistrationError> {
        if self.slot(prev).after.is_some() {
            return Err(RegistrationError::DuplicateFollowUp {
                path: self.path(prev),
            });
        }
        let parent = self.owner_group(prev);
        let id = self.push_slot(Some(parent), kind);
        self.slot_mut(prev).after = Some(id);
        Ok(id)
    }

    /// Registers a group's bound positional; at most one per group.
    pub(crate) fn add_bound(
        &mut self,
        group: NodeId,
        node: Box<dyn Matcher>,
    ) -> Result<NodeId, RegistrationError> {
        if self.group(group).bind_to.is_some() {
            return Err(RegistrationError::DuplicateBoundPositional {
                path: self.path(group),
            });
        }
        let id = self.push_slot(Some(group), NodeKind::Leaf(node));
        self.group_mut(group).bind_to = Some(id);
        Ok(id)
    }

    /// Marks a group as dispatch-bound; at most one callback per group.
    pub(crate) fn mark_program(&mut self, group: NodeId) -> Result<(), RegistrationError> {
        if self.group(group).has_program {
            return Err(RegistrationError::DuplicateSubProgram {
                path: self.path(group),
            });
        }
        self.group_mut(group).has_program = true;
        Ok(())
    }
}
