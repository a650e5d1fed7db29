//! Huffman entropy coding primitives
//!
//! Frequency analysis, tree construction, code generation, and the bit-level
//! tree format. The [`compression`](crate::compression) module strings these together into
//! whole-stream compression.

pub mod code_table;
pub mod frequency;
pub mod tree;
pub mod tree_codec;

pub use code_table::CodeTable;
pub use frequency::FrequencyMap;
pub use tree::{build_tree, HuffmanNode};
pub use tree_codec::{deserialize_tree, serialize_tree, serialized_tree_bit_len, tree_bits};
