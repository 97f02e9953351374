//! Emission node list.
//!
//! The node list is the logical order of the output. Code segments, label
//! positions, label references and alignment markers are kept in an index
//! arena and linked in both directions; new nodes are spliced in right after
//! a movable cursor. Moving the cursor back to a label and emitting more code
//! therefore inserts that code at the label without touching staged bytes.
//!
//! Each label keeps an intrusive chain of its references so the flush pass
//! can back-patch earlier references as soon as the label's offset is known.

use crate::segment::CodeSegment;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a position in the output of one compilation unit.
///
/// A label is only meaningful until the unit it was created in is flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    node: NodeId,
    generation: u32,
}

impl Label {
    pub(crate) fn new(node: NodeId, generation: u32) -> Self {
        Self { node, generation }
    }

    pub(crate) fn node(self) -> NodeId {
        self.node
    }

    /// Compilation unit this label belongs to.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// What a node contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Staged instruction bytes.
    Code(CodeSegment),
    /// A jump target. `offset` is set once, by the flush pass.
    Label {
        offset: Option<u32>,
        first_ref: Option<NodeId>,
    },
    /// A 4-byte operand holding a label's offset. `offset` is where the
    /// operand itself was written, recorded when the label was not yet known.
    Reference {
        label: NodeId,
        offset: Option<u32>,
        next_ref: Option<NodeId>,
    },
    /// Zero padding up to the next 4-byte boundary.
    Align4,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Doubly linked list of emission nodes with an insertion cursor.
#[derive(Debug, Default)]
pub struct NodeList {
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    /// Node after which the next insertion goes; None inserts at the head.
    cursor: Option<NodeId>,
}

impl NodeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in output order.
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Last node in output order.
    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Node after which the next insertion goes.
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    /// Successor of `id` in output order.
    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// Contents of a node.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Mutable contents of a node.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.node_mut(id).kind
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("node {} does not exist", id.0))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("node {} does not exist", id.0))
    }

    /// Splice a node in after the cursor and move the cursor onto it.
    pub fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node arena exhausted"));
        let next = match self.cursor {
            Some(cursor) => self.node(cursor).next,
            None => self.head,
        };
        self.nodes.push(Node {
            kind,
            prev: self.cursor,
            next,
        });

        match self.cursor {
            Some(cursor) => self.node_mut(cursor).next = Some(id),
            None => self.head = Some(id),
        }
        match next {
            Some(next) => self.node_mut(next).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.cursor = Some(id);
        id
    }

    /// Insert a reference to `label` and link it into the label's chain.
    ///
    /// # Panics
    ///
    /// Panics if `label` is not a label node.
    pub fn insert_reference(&mut self, label: NodeId) -> NodeId {
        let NodeKind::Label { first_ref, .. } = *self.kind(label) else {
            panic!("node {} is not a label", label.0);
        };
        let id = self.insert(NodeKind::Reference {
            label,
            offset: None,
            next_ref: first_ref,
        });
        if let NodeKind::Label { first_ref, .. } = self.kind_mut(label) {
            *first_ref = Some(id);
        }
        id
    }

    /// Iterate the references recorded for `label`, newest first.
    pub fn references(&self, label: NodeId) -> References<'_> {
        let next = match self.kind(label) {
            NodeKind::Label { first_ref, .. } => *first_ref,
            _ => None,
        };
        References { list: self, next }
    }

    /// Move the cursor so the next insertion follows `id`.
    pub fn seek(&mut self, id: NodeId) {
        assert!(id.index() < self.nodes.len(), "seek to missing node {}", id.0);
        self.cursor = Some(id);
    }

    /// Move the cursor to the end of the list.
    pub fn seek_end(&mut self) {
        self.cursor = self.tail;
    }

    /// Iterate node ids in output order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head, |&id| self.next_of(id))
    }

    /// Remove every node, keeping the allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.cursor = None;
    }
}

/// Iterator over a label's reference chain.
#[derive(Debug)]
pub struct References<'a> {
    list: &'a NodeList,
    next: Option<NodeId>,
}

impl Iterator for References<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = match self.list.kind(id) {
            NodeKind::Reference { next_ref, .. } => *next_ref,
            other => panic!("reference chain reached a non-reference node: {:?}", other),
        };
        Some(id)
    }
}
