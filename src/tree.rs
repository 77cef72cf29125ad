//! Construction of the Huffman tree from a [`FrequencyTable`].
//!
//! The tree is built greedily: all symbols start out as leaves in a
//! min-priority queue, and the two lightest nodes are merged until a single
//! node, the root, is left.
//!
//! Ties between nodes of equal weight are broken by insertion order. Leaves
//! are queued in ascending symbol order, each merged node is queued after
//! everything that came before it, and among equal weights the node queued
//! first is taken first. This makes the resulting codes a pure function of
//! the input.

use alloc::boxed::Box;
use alloc::collections::BinaryHeap;
use core::cmp::Ordering;

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Combine two nodes, `left` is the one taken from the queue first.
    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    NoSymbols,
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}

impl core::fmt::Display for TreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TreeError::NoSymbols => {
                write!(f, "Can't build a huffman tree without any symbols")
            }
        }
    }
}

/// Queue slot, ordered so that `BinaryHeap` (a max-heap) pops the lightest
/// node and, among equal weights, the one queued first.
struct QueueEntry {
    weight: u64,
    sequence: usize,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for every symbol with a nonzero count in `frequencies`.
    ///
    /// With a single distinct symbol no merge happens and the root is that
    /// symbol's leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, TreeError> {
        let mut queue = BinaryHeap::with_capacity(frequencies.distinct());
        let mut sequence = 0;
        for (symbol, weight) in frequencies.entries() {
            queue.push(QueueEntry {
                weight,
                sequence,
                node: Node::Leaf { symbol, weight },
            });
            sequence += 1;
        }

        let merges = queue.len().checked_sub(1).ok_or(TreeError::NoSymbols)?;
        for _ in 0..merges {
            // `merges` is one less than the queue length, so both pops succeed
            let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
                return Err(TreeError::NoSymbols);
            };
            let node = Node::merge(first.node, second.node);
            queue.push(QueueEntry {
                weight: node.weight(),
                sequence,
                node,
            });
            sequence += 1;
        }

        let root = queue.pop().ok_or(TreeError::NoSymbols)?.node;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Weight of the root, equal to the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
