//! Huffman tree nodes and the greedy tree builder

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::entropy::frequency::FrequencyMap;
use crate::error::{HuffmanError, Result};

/// Node in the Huffman tree
///
/// Leaves carry a symbol, internal nodes own exactly two children. Weights
/// are the summed frequencies below a node; trees read back from a
/// compressed stream have every weight set to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol and its frequency
    Leaf {
        /// Byte value
        symbol: u8,
        /// Occurrence count
        weight: u64,
    },
    /// Two merged subtrees
    Internal {
        /// Sum of both children's weights
        weight: u64,
        /// Subtree reached by a 0 bit
        left: Box<HuffmanNode>,
        /// Subtree reached by a 1 bit
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Create a leaf
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Merge two nodes under a new parent whose weight is their sum
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of this node
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    /// Symbol of a leaf, `None` for internal nodes
    pub fn symbol(&self) -> Option<u8> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    /// True for leaves
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of leaves in this subtree
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path; 0 for a single leaf
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        deepest
    }

    /// Same shape and same leaf symbols, ignoring weights
    pub fn same_shape(&self, other: &HuffmanNode) -> bool {
        let mut stack = vec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (HuffmanNode::Leaf { symbol: a, .. }, HuffmanNode::Leaf { symbol: b, .. }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    HuffmanNode::Internal { left: l1, right: r1, .. },
                    HuffmanNode::Internal { left: l2, right: r2, .. },
                ) => {
                    stack.push((&**r1, &**r2));
                    stack.push((&**l1, &**l2));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Heap entry ordered by weight, then by insertion sequence
#[derive(Debug)]
struct QueuedNode {
    weight: u64,
    sequence: usize,
    node: HuffmanNode,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Build a Huffman tree from symbol frequencies.
///
/// Leaves are queued in ascending symbol order; among equal weights the node
/// queued first is extracted first, and the first of each extracted pair
/// becomes the left child. A single distinct symbol yields a lone leaf.
pub fn build_tree(frequencies: &FrequencyMap) -> Result<HuffmanNode> {
    if frequencies.is_empty() {
        return Err(HuffmanError::invalid_input(
            "cannot build a Huffman tree without symbols",
        ));
    }

    let mut heap = BinaryHeap::with_capacity(frequencies.len());
    let mut sequence = 0usize;
    for (symbol, weight) in frequencies.iter() {
        heap.push(Reverse(QueuedNode {
            weight,
            sequence,
            node: HuffmanNode::leaf(symbol, weight),
        }));
        sequence += 1;
    }

    while heap.len() > 1 {
        let (Some(Reverse(first)), Some(Reverse(second))) = (heap.pop(), heap.pop()) else {
            break;
        };
        let merged = HuffmanNode::merge(first.node, second.node);
        heap.push(Reverse(QueuedNode {
            weight: merged.weight(),
            sequence,
            node: merged,
        }));
        sequence += 1;
    }

    heap.pop()
        .map(|Reverse(entry)| entry.node)
        .ok_or_else(|| HuffmanError::invalid_input("cannot build a Huffman tree without symbols"))
}
