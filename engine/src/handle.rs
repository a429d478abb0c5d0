//! Typed handles over tree nodes and the value accessors behind them.
//!
//! Registration returns a cheap `Copy` handle per node; the handle carries
//! the declared value type as phantom data, so reading a decoded value back
//! out of the tree needs no turbofish and cannot mix kinds up.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::node::{
    ArgumentNode, FlagNode, HelpNode, MultiArgumentNode, PatternArgumentNode, PatternFlagNode,
    PositionalNode, TrailingNode,
};
use crate::tree::{NodeId, NodeKind, ParseTree};

macro_rules! plain_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) NodeId);

        impl $name {
            /// The underlying tree node, usable as a chain anchor.
            pub fn node(self) -> NodeId {
                self.0
            }
        }
    };
}

macro_rules! typed_handle {
    ($(#[$doc:meta])* $name:ident<$($param:ident),+>) => {
        $(#[$doc])*
        pub struct $name<$($param),+> {
            pub(crate) id: NodeId,
            marker: PhantomData<fn() -> ($($param),+)>,
        }

        impl<$($param),+> $name<$($param),+> {
            pub(crate) fn new(id: NodeId) -> Self {
                Self { id, marker: PhantomData }
            }

            /// The underlying tree node, usable as a chain anchor.
            pub fn node(self) -> NodeId {
                self.id
            }
        }

        impl<$($param),+> Clone for $name<$($param),+> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($param),+> Copy for $name<$($param),+> {}

        impl<$($param),+> fmt::Debug for $name<$($param),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.id).finish()
            }
        }
    };
}

plain_handle! {
    /// Handle to a presence flag.
    FlagId
}
plain_handle! {
    /// Handle to an occurrence counter.
    CounterId
}
plain_handle! {
    /// Handle to a group's help option.
    HelpId
}
plain_handle! {
    /// Handle to a subcommand group.
    GroupId
}

typed_handle! {
    /// Handle to a single-valued argument decoding `T`.
    ArgId<T>
}
typed_handle! {
    /// Handle to a sequence-valued argument decoding `T`.
    ArgListId<T>
}
typed_handle! {
    /// Handle to a pattern flag whose captured keys decode as `T`.
    PatternFlagId<T>
}
typed_handle! {
    /// Handle to a pattern argument mapping `K` keys to `V` values.
    PatternArgId<K, V>
}
typed_handle! {
    /// Handle to a single positional decoding `T`.
    PositionalId<T>
}
typed_handle! {
    /// Handle to a trailing variadic positional decoding `T`.
    TrailingId<T>
}

impl ParseTree {
    fn leaf_as<N: 'static>(&self, id: NodeId) -> &N {
        self.leaf(id)
            .as_any()
            .downcast_ref::<N>()
            .expect("typed handle always refers to its own node kind")
    }

    /// Whether the flag appeared.
    pub fn is_set(&self, flag: FlagId) -> bool {
        self.leaf_as::<FlagNode>(flag.0).occurrences() > 0
    }

    /// How many times the counter appeared.
    pub fn count(&self, counter: CounterId) -> usize {
        self.leaf_as::<FlagNode>(counter.0).occurrences()
    }

    /// The decoded value of a single argument, falling back to its default.
    pub fn value<T: 'static>(&self, arg: ArgId<T>) -> Option<&T> {
        self.leaf_as::<ArgumentNode<T>>(arg.id).value()
    }

    /// The decoded values of a sequence argument, in appearance order.
    pub fn values<T: 'static>(&self, arg: ArgListId<T>) -> &[T] {
        self.leaf_as::<MultiArgumentNode<T>>(arg.id).values()
    }

    /// The captured keys of a pattern flag, in appearance order.
    pub fn pattern_keys<T: 'static>(&self, flag: PatternFlagId<T>) -> &[T] {
        self.leaf_as::<PatternFlagNode<T>>(flag.id).keys()
    }

    /// The captured key-to-value entries of a pattern argument.
    pub fn entries<K: 'static, V: 'static>(&self, arg: PatternArgId<K, V>) -> &BTreeMap<K, V> {
        self.leaf_as::<PatternArgumentNode<K, V>>(arg.id).entries()
    }

    /// The decoded value of a single positional.
    pub fn positional<T: 'static>(&self, positional: PositionalId<T>) -> Option<&T> {
        self.leaf_as::<PositionalNode<T>>(positional.id).value()
    }

    /// The decoded values of a trailing positional, in appearance order.
    pub fn trailing<T: 'static>(&self, trailing: TrailingId<T>) -> &[T] {
        self.leaf_as::<TrailingNode<T>>(trailing.id).values()
    }

    /// Whether the subcommand group matched.
    pub fn group_parsed(&self, group: GroupId) -> bool {
        self.node_parsed(group.0)
    }

    /// Whether this specific help option fired.
    pub fn help_requested(&self, help: HelpId) -> bool {
        self.leaf_as::<HelpNode>(help.0).fired()
    }

    /// The help node that fired during the scan, if any.
    pub(crate) fn fired_help(&self) -> Option<(NodeId, &HelpNode)> {
        (0..self.slots.len()).map(NodeId).find_map(|id| match &self.slot(id).kind {
            NodeKind::Leaf(leaf) => leaf
                .as_any()
                .downcast_ref::<HelpNode>()
                .filter(|help| help.fired())
                .map(|help| (id, help)),
            NodeKind::Group(_) => None,
        })
    }
}
