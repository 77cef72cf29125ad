use alloc::vec::Vec;
use rand::{Rng, SeedableRng};

use crate::code_table::CodeTable;
use crate::decoding::{self, UnpackError};
use crate::encoding::{self, round_trip};
use crate::frequency::FrequencyTable;
use crate::frequency_file::FrequencyFile;
use crate::tree::HuffmanTree;


/// Random data using exactly `alphabet` distinct byte values, with a skewed
/// distribution so code lengths vary.
fn skewed_input(rng: &mut impl Rng, alphabet: usize, len: usize) -> Vec<u8> {
    assert!(alphabet >= 1 && alphabet <= 256 && len >= alphabet);
    let offset: u8 = rng.gen();
    let mut data: Vec<u8> = (0..alphabet).map(|i| (i as u8).wrapping_add(offset)).collect();
    while data.len() < len {
        // squaring a uniform sample favours the low symbols
        let x: f64 = rng.gen();
        let i = ((x * x) * alphabet as f64) as usize;
        data.push((i.min(alphabet - 1) as u8).wrapping_add(offset));
    }
    // the guaranteed occurrences should not all sit at the front
    for i in (1..data.len()).rev() {
        let j = rng.gen_range(0..=i);
        data.swap(i, j);
    }
    data
}

#[test]
fn round_trip_every_alphabet_size() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    for alphabet in 1..=256 {
        let len = alphabet + rng.gen_range(0..2000);
        let data = skewed_input(&mut rng, alphabet, len);
        assert_eq!(FrequencyTable::from_bytes(&data).distinct(), alphabet);
        round_trip(&data);
    }
}

#[test]
fn generated_tables_keep_their_invariants() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(42);
    for alphabet in [1, 2, 3, 17, 128, 255, 256] {
        let data = skewed_input(&mut rng, alphabet, 5000);
        let frequencies = FrequencyTable::from_bytes(&data);
        assert_eq!(frequencies.total(), data.len() as u64);
        assert_eq!(
            frequencies.entries().map(|(_, count)| count).sum::<u64>(),
            data.len() as u64
        );

        let tree = HuffmanTree::build(&frequencies).unwrap();
        assert_eq!(tree.weight(), data.len() as u64);

        let table = CodeTable::from_tree(&tree);
        assert_eq!(table.len(), frequencies.distinct());
        assert!(table.is_prefix_free());
        for (symbol, code) in table.iter() {
            assert!(!code.is_empty());
            assert!(frequencies.get(symbol) > 0);
            assert_eq!(table.symbol(code), Some(symbol));
        }
    }
}

#[test]
fn frequent_symbols_get_short_codes() {
    let mut data = Vec::new();
    data.extend(core::iter::repeat(b'e').take(1000));
    data.extend(core::iter::repeat(b't').take(100));
    data.extend(core::iter::repeat(b'q').take(10));
    data.push(b'z');
    let table = encoding::build_code_table(&data);
    let len = |symbol: u8| table.code(symbol).unwrap().len();
    assert!(len(b'e') < len(b't'));
    assert!(len(b't') < len(b'q'));
    assert!(len(b'q') <= len(b'z'));
}

#[test]
fn single_symbol_input() {
    let data = [65u8; 1000];
    let encoded = encoding::encode_to_vec(&data).unwrap();
    assert_eq!(encoded.frequency_file.serialize(), "1000\n0:65\n");
    round_trip(&data);
}

#[test]
fn example_from_frequencies() {
    let data = [65, 65, 66, 67];
    let encoded = encoding::encode_to_vec(&data).unwrap();
    assert_eq!(encoded.frequency_file.serialize(), "4\n0:65\n10:66\n11:67\n");
    round_trip(&data);
}

#[test]
fn padding_bits_are_ignored() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
    let mut checked = 0;
    for len in 1..200 {
        let data = skewed_input(&mut rng, len.min(5), len);
        let encoded = encoding::encode_to_vec(&data).unwrap();
        if encoded.packed.bits % 8 == 0 {
            continue;
        }
        checked += 1;
        let text = encoded.frequency_file.serialize();
        let frequency_file = FrequencyFile::parse(&text).unwrap();
        let decoded = decoding::decode_to_vec(&encoded.packed.bytes, &frequency_file).unwrap();
        assert_eq!(decoded.len(), data.len());
        assert_eq!(decoded, data);
    }
    assert!(checked > 0);
}

#[test]
fn missing_last_byte_is_a_truncation() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let encoded = encoding::encode_to_vec(data).unwrap();
    let packed = &encoded.packed.bytes[..encoded.packed.bytes.len() - 1];
    assert!(matches!(
        decoding::decode_to_vec(packed, &encoded.frequency_file),
        Err(UnpackError::Truncated { expected: 43, .. })
    ));
}

#[test]
fn decoding_with_the_wrong_count() {
    let encoded = encoding::encode_to_vec(b"abcabcabc").unwrap();
    let mut frequency_file = encoded.frequency_file.clone();
    frequency_file.total = 3;
    let decoded = decoding::decode_to_vec(&encoded.packed.bytes, &frequency_file).unwrap();
    assert_eq!(decoded, b"abc");
}
