//! The frequency file, the text side channel that travels next to the packed
//! data and carries everything needed to decode it.
//!
//! ```text
//! 4
//! 0:65
//! 10:66
//! 11:67
//! ```
//!
//! The first line is the number of symbols that were encoded. Every following
//! line maps a code to the decimal value of its byte. Entries are written in
//! ascending symbol order as unsigned values, but any order is accepted when
//! reading, and so are symbols written as signed bytes (`-128..=-1`).

use alloc::string::String;
use core::fmt::{self, Write};

use crate::code_table::{Code, CodeError, CodeTable, CodeTableError};

/// Decoded contents of a frequency file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyFile {
    /// How many symbols the packed stream holds.
    pub total: u64,
    pub table: CodeTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrequencyFileError {
    MissingHeader,
    InvalidCount { found: String },
    MissingSeparator { line: usize },
    InvalidCode { line: usize, source: CodeError },
    InvalidSymbol { line: usize, found: String },
    InvalidTable { line: usize, source: CodeTableError },
    NotUtf8,
}

#[cfg(feature = "std")]
impl std::error::Error for FrequencyFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrequencyFileError::InvalidCode { source, .. } => Some(source),
            FrequencyFileError::InvalidTable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for FrequencyFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyFileError::MissingHeader => {
                write!(f, "Frequency file is empty, expected the symbol count on the first line")
            }
            FrequencyFileError::InvalidCount { found } => write!(
                f,
                "First line must be a non-negative symbol count, found: {:?}",
                found
            ),
            FrequencyFileError::MissingSeparator { line } => {
                write!(f, "Line {} is not of the form <code>:<symbol>", line)
            }
            FrequencyFileError::InvalidCode { line, source } => {
                write!(f, "Line {} has an invalid code: {}", line, source)
            }
            FrequencyFileError::InvalidSymbol { line, found } => write!(
                f,
                "Line {} has an invalid symbol {:?}, expected a byte value between -128 and 255",
                line, found
            ),
            FrequencyFileError::InvalidTable { line, source } => {
                write!(f, "Line {} conflicts with an earlier entry: {}", line, source)
            }
            FrequencyFileError::NotUtf8 => write!(f, "Frequency file is not valid UTF-8 text"),
        }
    }
}

impl FrequencyFile {
    pub fn new(total: u64, table: CodeTable) -> Self {
        FrequencyFile { total, table }
    }

    /// Render the file: the total on the first line, then one `<code>:<symbol>`
    /// line per table entry. Every line, including the last, ends in `\n`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        // writing into a String can't fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "{}", self.total)?;
        for (symbol, code) in self.table.iter() {
            writeln!(out, "{}:{}", code, symbol)?;
        }
        Ok(())
    }

    pub fn parse_bytes(raw: &[u8]) -> Result<Self, FrequencyFileError> {
        let text = core::str::from_utf8(raw).map_err(|_| FrequencyFileError::NotUtf8)?;
        Self::parse(text)
    }

    pub fn parse(text: &str) -> Result<Self, FrequencyFileError> {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .enumerate()
            .map(|(idx, line)| (idx + 1, line));

        let (_, header) = lines.next().ok_or(FrequencyFileError::MissingHeader)?;
        let total = header
            .trim()
            .parse::<u64>()
            .map_err(|_| FrequencyFileError::InvalidCount {
                found: header.into(),
            })?;

        let mut table = CodeTable::new();
        for (line, entry) in lines {
            if entry.trim().is_empty() {
                continue;
            }
            let (code, symbol) = entry
                .split_once(':')
                .ok_or(FrequencyFileError::MissingSeparator { line })?;
            let code = code
                .trim()
                .parse::<Code>()
                .map_err(|source| FrequencyFileError::InvalidCode { line, source })?;
            let symbol = parse_symbol(symbol.trim()).ok_or_else(|| {
                FrequencyFileError::InvalidSymbol {
                    line,
                    found: symbol.into(),
                }
            })?;
            table
                .insert(symbol, code)
                .map_err(|source| FrequencyFileError::InvalidTable { line, source })?;
        }

        Ok(FrequencyFile { total, table })
    }
}

impl fmt::Display for FrequencyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Unsigned bytes are taken as is, negative values are read as signed bytes.
fn parse_symbol(raw: &str) -> Option<u8> {
    let value = raw.parse::<i16>().ok()?;
    match value {
        0..=255 => Some(value as u8),
        -128..=-1 => Some((value + 256) as u8),
        _ => None,
    }
}
