//! Code generation from a Huffman tree

use crate::entropy::frequency::FrequencyMap;
use crate::entropy::tree::HuffmanNode;

/// Bit code of every symbol in a tree.
///
/// A code is the root-to-leaf path, `false` for a left step and `true` for a
/// right step. A tree that is a single leaf gives that symbol the code `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
    len: usize,
    max_code_length: usize,
}

impl CodeTable {
    /// Generate the code table for the tree rooted at `root`
    pub fn generate(root: &HuffmanNode) -> Self {
        let mut table = Self {
            codes: vec![None; 256],
            len: 0,
            max_code_length: 0,
        };

        if let HuffmanNode::Leaf { symbol, .. } = root {
            table.insert(*symbol, vec![false]);
            return table;
        }

        let mut path = Vec::new();
        table.walk(root, &mut path);
        table
    }

    fn walk(&mut self, node: &HuffmanNode, path: &mut Vec<bool>) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                self.insert(*symbol, path.clone());
            }
            HuffmanNode::Internal { left, right, .. } => {
                path.push(false);
                self.walk(left, path);
                path.pop();

                path.push(true);
                self.walk(right, path);
                path.pop();
            }
        }
    }

    fn insert(&mut self, symbol: u8, code: Vec<bool>) {
        self.max_code_length = self.max_code_length.max(code.len());
        if self.codes[symbol as usize].replace(code).is_none() {
            self.len += 1;
        }
    }

    /// Code of `symbol`, if the tree contains it
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the table has no codes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Longest code length in bits
    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    /// `(symbol, code)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol as u8, code)))
    }

    /// Check that no code is a prefix of another
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&[bool]> = self.iter().map(|(_, code)| code).collect();
        // a prefix sorts directly before some code it prefixes
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Payload size in bits for input with the given frequencies.
    ///
    /// Symbols without a code are skipped.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyMap) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }
}
