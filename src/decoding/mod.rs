//! Turning a packed bitstream back into the original bytes.
//!
//! Decoding scans the bits front to back while growing a candidate code. As
//! soon as the candidate equals a code in the table, that code's symbol is
//! emitted and the candidate starts over. Because the table is prefix-free the
//! first match is the only possible one.
//!
//! The packed stream has no end marker. Decoding stops after exactly as many
//! symbols as the frequency file records, which is what keeps the zero bits
//! padding the last byte from being read as extra symbols.
pub mod bit_reader;

use alloc::vec::Vec;
use core::fmt;

use crate::code_table::{Code, CodeTable};
use crate::frequency_file::FrequencyFile;
use bit_reader::BitReader;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnpackError {
    Truncated { decoded: u64, expected: u64 },
    NoMatchingCode { bit_offset: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for UnpackError {}

impl fmt::Display for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnpackError::Truncated { decoded, expected } => write!(
                f,
                "Packed data ended after {} of {} symbols. The packed file is truncated or does not belong to this frequency file",
                decoded, expected
            ),
            UnpackError::NoMatchingCode { bit_offset } => write!(
                f,
                "Bits starting at offset {} don't match any code in the table",
                bit_offset
            ),
        }
    }
}

/// Decode exactly `count` symbols from `packed` using `table`.
///
/// Bits left over after the last symbol are ignored.
pub fn unpack(packed: &[u8], table: &CodeTable, count: u64) -> Result<Vec<u8>, UnpackError> {
    // every symbol takes at least one bit, don't trust `count` for the allocation
    let capacity = count.min(packed.len() as u64 * 8);
    let mut output = Vec::with_capacity(capacity as usize);

    let mut br = BitReader::new(packed);
    let mut candidate = Code::new();
    let mut decoded = 0;
    while decoded < count {
        let bit = br.get_bit().ok_or(UnpackError::Truncated {
            decoded,
            expected: count,
        })?;
        candidate.push(bit);
        if let Some(symbol) = table.symbol(&candidate) {
            output.push(symbol);
            candidate.clear();
            decoded += 1;
        } else if candidate.len() >= table.max_code_len() {
            return Err(UnpackError::NoMatchingCode {
                bit_offset: br.bits_read() - candidate.len(),
            });
        }
    }

    debug_log!(
        symbols = decoded,
        bits = br.bits_read(),
        ignored_bits = br.bits_left(),
        "unpacked symbols"
    );
    Ok(output)
}

/// Decode `packed` with the table and symbol count of `frequency_file`.
pub fn decode_to_vec(packed: &[u8], frequency_file: &FrequencyFile) -> Result<Vec<u8>, UnpackError> {
    unpack(packed, &frequency_file.table, frequency_file.total)
}

#[cfg(test)]
mod tests {
    use super::{unpack, UnpackError};
    use crate::code_table::CodeTable;
    use crate::encoding::{build_code_table, encode_to_vec};

    fn example_table() -> CodeTable {
        build_code_table(&[65, 65, 66, 67])
    }

    #[test]
    fn example() {
        let decoded = unpack(&[0b0010_1100], &example_table(), 4).unwrap();
        assert_eq!(decoded, [65, 65, 66, 67]);
    }

    #[test]
    fn padding_is_not_decoded() {
        // the two padding zeros would decode as two more 'A's
        let table = example_table();
        assert_eq!(unpack(&[0b0010_1100], &table, 4).unwrap().len(), 4);
        assert_eq!(unpack(&[0b0010_1100], &table, 6).unwrap(), [65, 65, 66, 67, 65, 65]);
    }

    #[test]
    fn stops_at_count() {
        let encoded = encode_to_vec(b"mississippi").unwrap();
        let table = &encoded.frequency_file.table;
        let decoded = unpack(&encoded.packed.bytes, table, 4).unwrap();
        assert_eq!(decoded, b"miss");
    }

    #[test]
    fn zero_count_reads_nothing() {
        assert!(unpack(&[], &CodeTable::new(), 0).unwrap().is_empty());
        assert!(unpack(&[0xff], &example_table(), 0).unwrap().is_empty());
    }

    #[test]
    fn truncated() {
        let encoded = encode_to_vec(b"a somewhat longer sentence to compress").unwrap();
        let table = &encoded.frequency_file.table;
        let total = encoded.frequency_file.total;
        let cut = &encoded.packed.bytes[..encoded.packed.bytes.len() / 2];
        match unpack(cut, table, total) {
            Err(UnpackError::Truncated { decoded, expected }) => {
                assert!(decoded < expected);
                assert_eq!(expected, total);
            }
            other => panic!("expected truncation, got {:?}", other),
        }

        assert_eq!(
            unpack(&[], &example_table(), 1),
            Err(UnpackError::Truncated {
                decoded: 0,
                expected: 1
            })
        );
    }

    #[test]
    fn incomplete_table() {
        let mut table = CodeTable::new();
        table.insert(1, "00".parse().unwrap()).unwrap();
        table.insert(2, "01".parse().unwrap()).unwrap();
        // 00 01 11 -> third code does not exist
        assert_eq!(
            unpack(&[0b0001_1100], &table, 3),
            Err(UnpackError::NoMatchingCode { bit_offset: 4 })
        );
    }
}
