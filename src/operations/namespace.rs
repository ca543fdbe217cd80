//! Compiles an operation table into a nested namespace.
//!
//! Each dotted name becomes a path through the tree: `emails.unsubscribed.add`
//! creates (or reuses) the `emails` and `unsubscribed` nodes and stores the
//! definition on the `add` node. A node can hold an operation and children
//! at the same time, so `contact` and `contact.subscribe` coexist.
//!
//! The tree is built once and is read-only afterwards.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::operations::table::{OperationDefinition, OPERATIONS};

/// A node of the compiled operation tree.
///
/// # Example
///
/// ```rust
/// use esputnik_api::operations::{Namespace, OperationDefinition};
///
/// let namespace = Namespace::compile(&[
///     OperationDefinition::new("emails.unsubscribed.add", "emails/unsubscribed/add"),
///     OperationDefinition::new("emails.unsubscribed.delete", "emails/unsubscribed/delete"),
/// ]);
///
/// let unsubscribed = namespace.child("emails").and_then(|n| n.child("unsubscribed")).unwrap();
/// assert!(unsubscribed.child("add").and_then(|n| n.operation()).is_some());
/// assert!(unsubscribed.child("delete").and_then(|n| n.operation()).is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Namespace {
    operation: Option<OperationDefinition>,
    children: BTreeMap<&'static str, Namespace>,
}

impl Namespace {
    /// Compiles definitions into a namespace tree.
    ///
    /// When two definitions share a name, the later one wins.
    #[must_use]
    pub fn compile(definitions: &[OperationDefinition]) -> Self {
        let mut root = Self::default();
        for definition in definitions {
            root.insert(*definition);
        }
        root
    }

    /// Returns the namespace compiled from [`OPERATIONS`].
    ///
    /// It is compiled on first use and shared by reference afterwards.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<Namespace> = OnceLock::new();
        STANDARD.get_or_init(|| Self::compile(OPERATIONS))
    }

    fn insert(&mut self, definition: OperationDefinition) {
        let node = definition
            .segments()
            .fold(self, |node, segment| node.children.entry(segment).or_default());

        if let Some(previous) = node.operation.replace(definition) {
            tracing::debug!(
                "Operation '{}' redefined: '{}' replaces '{}'",
                definition.name,
                definition.endpoint,
                previous.endpoint
            );
        }
    }

    /// Returns the child node for `segment`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&Self> {
        self.children.get(segment)
    }

    /// Returns the names of the direct children, in sorted order.
    pub fn segments(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.children.keys().copied()
    }

    /// Returns the operation bound to this node, if any.
    #[must_use]
    pub const fn operation(&self) -> Option<&OperationDefinition> {
        self.operation.as_ref()
    }

    /// Walks a dotted path and returns the node it ends on.
    #[must_use]
    pub fn node(&self, dotted: &str) -> Option<&Self> {
        dotted
            .split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Resolves a dotted name to its operation.
    #[must_use]
    pub fn resolve(&self, dotted: &str) -> Option<&OperationDefinition> {
        self.node(dotted).and_then(Self::operation)
    }

    /// Returns every operation in the tree, depth first in segment order.
    #[must_use]
    pub fn operations(&self) -> Vec<&OperationDefinition> {
        let mut found = Vec::new();
        self.collect(&mut found);
        found
    }

    fn collect<'a>(&'a self, found: &mut Vec<&'a OperationDefinition>) {
        if let Some(operation) = &self.operation {
            found.push(operation);
        }
        for child in self.children.values() {
            child.collect(found);
        }
    }
}
