//! Property-based testing for the Huffman codec
//!
//! Uses proptest to check round-trip fidelity, the output layout, and the
//! optimality and prefix-freedom of generated codes over arbitrary inputs.

use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io::Cursor;

use huffstream::compression::HEADER_LEN;
use huffstream::entropy::{serialized_tree_bit_len, tree_bits};
use huffstream::{
    build_tree, compress_to_vec, decompress_to_vec, deserialize_tree, BitReader, BitWriter,
    CodeTable, FrequencyMap, HuffmanCompressor,
};

// =============================================================================
// PROPERTY TEST GENERATORS
// =============================================================================

/// Arbitrary non-empty byte strings
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..4096)
}

/// Byte strings drawn from a small alphabet, so weights repeat and tie
fn small_alphabet_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcde".to_vec()), 1..2048)
}

/// Minimum weighted path length of any prefix code over `frequencies`
fn optimal_cost(frequencies: &FrequencyMap) -> u64 {
    let mut heap: BinaryHeap<Reverse<u64>> =
        frequencies.iter().map(|(_, weight)| Reverse(weight)).collect();
    if heap.len() == 1 {
        // the lone symbol still spends one bit per occurrence
        return frequencies.total();
    }

    let mut cost = 0;
    while let (Some(Reverse(a)), Some(Reverse(b))) = (heap.pop(), heap.pop()) {
        cost += a + b;
        heap.push(Reverse(a + b));
    }
    cost
}

// =============================================================================
// ROUND-TRIP PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_round_trip(data in bytes_strategy()) {
        let compressed = compress_to_vec(&data).unwrap();
        prop_assert_eq!(decompress_to_vec(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_round_trip_with_ties(data in small_alphabet_strategy()) {
        let compressed = compress_to_vec(&data).unwrap();
        prop_assert_eq!(decompress_to_vec(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_stream_matches_slice(data in bytes_strategy()) {
        let mut streamed = Vec::new();
        HuffmanCompressor::new()
            .compress(Cursor::new(&data), &mut streamed)
            .unwrap();
        prop_assert_eq!(streamed, compress_to_vec(&data).unwrap());
    }
}

// =============================================================================
// LAYOUT PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_header_is_length(data in bytes_strategy()) {
        let compressed = compress_to_vec(&data).unwrap();
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&compressed[..HEADER_LEN]);
        prop_assert_eq!(u32::from_be_bytes(header) as usize, data.len());
    }

    #[test]
    fn prop_output_size(data in bytes_strategy()) {
        let frequencies = FrequencyMap::from_bytes(&data);
        let tree = build_tree(&frequencies).unwrap();
        let codes = CodeTable::generate(&tree);

        let bits = serialized_tree_bit_len(&tree) as u64 + codes.encoded_bit_len(&frequencies);
        let compressed = compress_to_vec(&data).unwrap();
        prop_assert_eq!(compressed.len() as u64, HEADER_LEN as u64 + (bits + 7) / 8);
    }

    #[test]
    fn prop_tree_serialization_round_trip(data in bytes_strategy()) {
        let tree = build_tree(&FrequencyMap::from_bytes(&data)).unwrap();

        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(&tree_bits(&tree)).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(bytes));
        let decoded = deserialize_tree(&mut reader).unwrap();
        prop_assert!(decoded.same_shape(&tree));
        prop_assert_eq!(reader.bits_read() as usize, serialized_tree_bit_len(&tree));
    }
}

// =============================================================================
// CODE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_codes_are_prefix_free(data in bytes_strategy()) {
        let frequencies = FrequencyMap::from_bytes(&data);
        let codes = CodeTable::generate(&build_tree(&frequencies).unwrap());
        prop_assert!(codes.is_prefix_free());
        prop_assert_eq!(codes.len(), frequencies.len());
        for (symbol, _) in frequencies.iter() {
            prop_assert!(codes.get(symbol).is_some());
        }
    }

    #[test]
    fn prop_codes_are_optimal(data in bytes_strategy()) {
        let frequencies = FrequencyMap::from_bytes(&data);
        let codes = CodeTable::generate(&build_tree(&frequencies).unwrap());
        prop_assert_eq!(codes.encoded_bit_len(&frequencies), optimal_cost(&frequencies));
    }

    #[test]
    fn prop_frequencies_sum_to_length(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let frequencies = FrequencyMap::from_bytes(&data);
        prop_assert_eq!(frequencies.total() as usize, data.len());
        let sum: u64 = frequencies.iter().map(|(_, weight)| weight).sum();
        prop_assert_eq!(sum, frequencies.total());
    }
}
