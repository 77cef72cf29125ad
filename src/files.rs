//! Stream and path level encode/decode.
//!
//! Each operation reads its whole input into memory, runs the codec and writes
//! the results. Files are closed when their handles go out of scope on every
//! path, writers are flushed explicitly so that a failed flush is reported
//! instead of being swallowed on drop. On failure, output files may have been
//! created or partially written; they are the caller's to discard.

use alloc::vec::Vec;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::decoding;
use crate::encoding;
use crate::errors::Error;
use crate::frequency_file::FrequencyFile;

/// What [`encode`] and [`encode_stream`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Bytes read from the input, also the symbol count in the frequency file
    pub input_len: u64,
    pub packed_len: u64,
    /// Bits of actual code data in the packed output
    pub packed_bits: u64,
    pub distinct_symbols: usize,
    pub frequency_file_len: u64,
}

/// What [`decode`] and [`decode_stream`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSummary {
    pub packed_len: u64,
    pub output_len: u64,
}

/// Compress everything `input` yields, writing the packed data to `output` and
/// the frequency file to `frequency_file`.
pub fn encode_stream<R: Read, W: Write, F: Write>(
    mut input: R,
    mut output: W,
    mut frequency_file: F,
) -> Result<EncodeSummary, Error> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    let encoded = encoding::encode_to_vec(&data)?;
    let text = encoded.frequency_file.serialize();

    frequency_file.write_all(text.as_bytes())?;
    frequency_file.flush()?;
    output.write_all(&encoded.packed.bytes)?;
    output.flush()?;

    Ok(EncodeSummary {
        input_len: data.len() as u64,
        packed_len: encoded.packed.bytes.len() as u64,
        packed_bits: encoded.packed.bits,
        distinct_symbols: encoded.frequency_file.table.len(),
        frequency_file_len: text.len() as u64,
    })
}

/// Decompress `input` with the code table and symbol count read from
/// `frequency_file`, writing the original bytes to `output`.
pub fn decode_stream<R: Read, F: Read, W: Write>(
    mut input: R,
    mut frequency_file: F,
    mut output: W,
) -> Result<DecodeSummary, Error> {
    let mut raw = Vec::new();
    frequency_file.read_to_end(&mut raw)?;
    let frequency_file = FrequencyFile::parse_bytes(&raw)?;

    let mut packed = Vec::new();
    input.read_to_end(&mut packed)?;

    let decoded = decoding::decode_to_vec(&packed, &frequency_file)?;
    output.write_all(&decoded)?;
    output.flush()?;

    Ok(DecodeSummary {
        packed_len: packed.len() as u64,
        output_len: decoded.len() as u64,
    })
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<BufWriter<File>, Error> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Create {
            path: path.to_path_buf(),
            source,
        })
}

/// Compress the file at `input`, write the packed data to `output` and the
/// frequency file to `frequency_file`. Existing files are overwritten.
pub fn encode<I, O, F>(input: I, output: O, frequency_file: F) -> Result<EncodeSummary, Error>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
    F: AsRef<Path>,
{
    let input = open(input.as_ref())?;
    let frequency_file = create(frequency_file.as_ref())?;
    let output = create(output.as_ref())?;
    let summary = encode_stream(input, output, frequency_file)?;
    debug_log!(
        input = summary.input_len,
        packed = summary.packed_len,
        symbols = summary.distinct_symbols,
        "encoded file"
    );
    Ok(summary)
}

/// Decompress the file at `input` using `frequency_file` and write the
/// original bytes to `output`. Both inputs are opened before `output` is
/// created.
pub fn decode<I, O, F>(input: I, output: O, frequency_file: F) -> Result<DecodeSummary, Error>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
    F: AsRef<Path>,
{
    let input = open(input.as_ref())?;
    let frequency_file = open(frequency_file.as_ref())?;
    let output = create(output.as_ref())?;
    let summary = decode_stream(input, frequency_file, output)?;
    debug_log!(
        packed = summary.packed_len,
        output = summary.output_len,
        "decoded file"
    );
    Ok(summary)
}
