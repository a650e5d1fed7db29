//! Bit-level tree serialization
//!
//! The tree is written in pre-order. An internal node is the bit `0`
//! followed by its left and right subtrees; a leaf is the bit `1` followed by
//! its symbol as 8 bits, most-significant first:
//!
//! ```text
//! tree     := internal | leaf
//! internal := '0' tree tree
//! leaf     := '1' byte
//! ```
//!
//! Both directions use an explicit stack, so a hostile stream cannot exhaust
//! the call stack.

use std::io::{Read, Write};

use crate::entropy::tree::HuffmanNode;
use crate::error::{HuffmanError, Result};
use crate::io::{BitReader, BitWriter};

/// Most leaves a tree over byte symbols can have
pub const MAX_LEAVES: usize = 256;

/// Most internal nodes on any root-to-leaf path
pub const MAX_DEPTH: usize = 255;

/// Write the serialized form of `root` to `writer`
pub fn serialize_tree<W: Write>(root: &HuffmanNode, writer: &mut BitWriter<W>) -> Result<()> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                writer.write_bit(true)?;
                writer.write_byte(*symbol)?;
            }
            HuffmanNode::Internal { left, right, .. } => {
                writer.write_bit(false)?;
                stack.push(right);
                stack.push(left);
            }
        }
    }
    Ok(())
}

/// Serialized form of `root` as a bit sequence
pub fn tree_bits(root: &HuffmanNode) -> Vec<bool> {
    let mut bits = Vec::with_capacity(serialized_tree_bit_len(root));
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                bits.push(true);
                bits.extend((0..8).rev().map(|shift| (symbol >> shift) & 1 == 1));
            }
            HuffmanNode::Internal { left, right, .. } => {
                bits.push(false);
                stack.push(right);
                stack.push(left);
            }
        }
    }
    bits
}

/// Number of bits [`serialize_tree`] writes for `root`.
///
/// Each leaf takes 9 bits and each of the `leaves - 1` internal nodes 1 bit.
pub fn serialized_tree_bit_len(root: &HuffmanNode) -> usize {
    10 * root.leaf_count() - 1
}

/// An internal node waiting for its children
enum Pending {
    NeedLeft,
    NeedRight(HuffmanNode),
}

/// Read one serialized tree from `reader`.
///
/// Every weight of the returned tree is 0. Running out of bits, exceeding
/// [`MAX_DEPTH`] or [`MAX_LEAVES`], or repeating a leaf symbol is reported as
/// [`HuffmanError::MalformedInput`].
pub fn deserialize_tree<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanNode> {
    let mut stack: Vec<Pending> = Vec::new();
    let mut seen = [false; 256];
    let mut leaves = 0usize;

    loop {
        let tag = reader.read_bit().map_err(|e| e.truncated("tree"))?;
        if !tag {
            if stack.len() == MAX_DEPTH {
                return Err(HuffmanError::malformed_input(format!(
                    "tree deeper than {} levels",
                    MAX_DEPTH
                )));
            }
            stack.push(Pending::NeedLeft);
            continue;
        }

        let symbol = reader.read_byte().map_err(|e| e.truncated("leaf symbol"))?;
        leaves += 1;
        if leaves > MAX_LEAVES {
            return Err(HuffmanError::malformed_input(format!(
                "tree has more than {} leaves",
                MAX_LEAVES
            )));
        }
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(HuffmanError::malformed_input(format!(
                "symbol {} appears twice in tree",
                symbol
            )));
        }

        // attach the finished subtree to the innermost pending node
        let mut node = HuffmanNode::leaf(symbol, 0);
        loop {
            match stack.pop() {
                None => return Ok(node),
                Some(Pending::NeedLeft) => {
                    stack.push(Pending::NeedRight(node));
                    break;
                }
                Some(Pending::NeedRight(left)) => {
                    node = HuffmanNode::merge(left, node);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::frequency::FrequencyMap;
    use crate::entropy::tree::build_tree;
    use std::io::Cursor;

    fn bits(pattern: &str) -> Vec<bool> {
        pattern
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c == '1')
            .collect()
    }

    fn pack(bits: &[bool]) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(bits).unwrap();
        writer.finish().unwrap()
    }

    fn read_tree(bytes: Vec<u8>) -> Result<HuffmanNode> {
        let mut reader = BitReader::new(Cursor::new(bytes));
        deserialize_tree(&mut reader)
    }

    #[test]
    fn test_single_leaf_bits() {
        let tree = HuffmanNode::leaf(b'a', 1);
        assert_eq!(tree_bits(&tree), bits("1 01100001"));
        assert_eq!(serialized_tree_bit_len(&tree), 9);
    }

    #[test]
    fn test_two_leaf_bits() {
        let tree = build_tree(&FrequencyMap::from_bytes(b"aaabbbaabbab")).unwrap();
        assert_eq!(tree_bits(&tree), bits("0 1 01100001 1 01100010"));
        assert_eq!(serialized_tree_bit_len(&tree), 19);
    }

    #[test]
    fn test_writer_matches_bit_sequence() {
        let tree = build_tree(&FrequencyMap::from_bytes(b"abracadabra")).unwrap();
        let mut writer = BitWriter::new(Vec::new());
        serialize_tree(&tree, &mut writer).unwrap();
        assert_eq!(writer.bits_written() as usize, serialized_tree_bit_len(&tree));
        assert_eq!(writer.finish().unwrap(), pack(&tree_bits(&tree)));
    }

    #[test]
    fn test_round_trip() {
        let data: Vec<u8> = (0..2000u32).map(|i| ((i * i) % 97) as u8).collect();
        let tree = build_tree(&FrequencyMap::from_bytes(&data)).unwrap();
        let decoded = read_tree(pack(&tree_bits(&tree))).unwrap();
        assert!(decoded.same_shape(&tree));
        assert_eq!(decoded.weight(), 0);
    }

    #[test]
    fn test_deserialize_leaf() {
        let tree = read_tree(pack(&bits("1 01100001"))).unwrap();
        assert_eq!(tree, HuffmanNode::leaf(b'a', 0));
    }

    #[test]
    fn test_deserialize_nested() {
        // 0 0 leaf(a) leaf(b) leaf(c)
        let tree = read_tree(pack(&bits("0 0 1 01100001 1 01100010 1 01100011"))).unwrap();
        let expected = HuffmanNode::merge(
            HuffmanNode::merge(HuffmanNode::leaf(b'a', 0), HuffmanNode::leaf(b'b', 0)),
            HuffmanNode::leaf(b'c', 0),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_truncated_tag() {
        assert!(matches!(read_tree(Vec::new()), Err(HuffmanError::MalformedInput { .. })));
        // internal node whose right subtree never arrives: 0 1 01100001 + zero padding
        // reads further internal tags from the padding and then runs dry
        assert!(matches!(
            read_tree(pack(&bits("0 1 01100001"))),
            Err(HuffmanError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_truncated_symbol() {
        // leaf tag followed by only 7 bits
        assert!(matches!(
            read_tree(vec![0b1011_0000]),
            Err(HuffmanError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let result = read_tree(pack(&bits("0 1 01100001 1 01100001")));
        assert!(matches!(result, Err(HuffmanError::MalformedInput { .. })));
    }

    #[test]
    fn test_depth_limit() {
        // 256 internal tags in a row can never form a valid byte-symbol tree
        let result = read_tree(vec![0u8; 64]);
        match result {
            Err(HuffmanError::MalformedInput { message }) => assert!(message.contains("deeper")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_deepest_valid_tree() {
        // a chain of 255 internal nodes with 256 leaves
        let mut tree = HuffmanNode::leaf(255, 0);
        for symbol in (0..255u8).rev() {
            tree = HuffmanNode::merge(HuffmanNode::leaf(symbol, 0), tree);
        }
        assert_eq!(tree.depth(), 255);

        let decoded = read_tree(pack(&tree_bits(&tree))).unwrap();
        assert!(decoded.same_shape(&tree));
        assert_eq!(decoded.leaf_count(), 256);
    }
}
