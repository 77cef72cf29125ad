//! Packing input bytes into a bitstream, and the in-memory compression
//! pipeline that produces both the packed data and its frequency file.
mod bit_writer;

use alloc::vec::Vec;
use core::fmt;

use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;
use crate::frequency_file::FrequencyFile;
use crate::tree::HuffmanTree;
use bit_writer::BitWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PackError {
    MissingCode { symbol: u8, offset: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for PackError {}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::MissingCode { symbol, offset } => write!(
                f,
                "Byte {} at offset {} has no code in the code table",
                symbol, offset
            ),
        }
    }
}

/// Output of [`pack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    pub bytes: Vec<u8>,
    /// Number of meaningful bits, the rest of the last byte is padding.
    pub bits: u64,
}

/// Concatenate the codes of all bytes in `data`, in order, and pack the bits
/// into bytes most significant bit first. If the bit count is not a multiple
/// of eight the last byte is filled up with zero bits.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<Packed, PackError> {
    let mut writer = BitWriter::with_capacity(data.len());
    for (offset, &symbol) in data.iter().enumerate() {
        let code = table
            .code(symbol)
            .ok_or(PackError::MissingCode { symbol, offset })?;
        writer.write_code(code);
    }
    let bits = writer.bits_written();
    Ok(Packed {
        bytes: writer.dump(),
        bits,
    })
}

/// Both artifacts of compressing a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub frequency_file: FrequencyFile,
    pub packed: Packed,
}

/// Build the code table for `data`.
///
/// Empty input has no tree and results in an empty table.
pub fn build_code_table(data: &[u8]) -> CodeTable {
    let frequencies = FrequencyTable::from_bytes(data);
    match HuffmanTree::build(&frequencies) {
        Ok(tree) => {
            debug_log!(
                symbols = frequencies.distinct(),
                weight = tree.weight(),
                depth = tree.depth(),
                "built huffman tree"
            );
            CodeTable::from_tree(&tree)
        }
        Err(_) => CodeTable::new(),
    }
}

/// Run the whole compression pipeline on `data`.
pub fn encode_to_vec(data: &[u8]) -> Result<Encoded, PackError> {
    let table = build_code_table(data);
    let packed = pack(data, &table)?;
    debug_log!(
        input = data.len(),
        packed = packed.bytes.len(),
        bits = packed.bits,
        "packed input"
    );
    Ok(Encoded {
        frequency_file: FrequencyFile::new(data.len() as u64, table),
        packed,
    })
}

/// Compress `data`, send the frequency file through its text form, decompress
/// and check that the result matches.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    let encoded = encode_to_vec(data).unwrap();
    let frequency_file = FrequencyFile::parse(&encoded.frequency_file.serialize()).unwrap();
    assert_eq!(frequency_file, encoded.frequency_file);

    let decoded = crate::decoding::decode_to_vec(&encoded.packed.bytes, &frequency_file).unwrap();
    assert_eq!(decoded, data);
    assert_eq!(
        encoded.packed.bytes.len() as u64,
        encoded.packed.bits.div_ceil(8)
    );
}
