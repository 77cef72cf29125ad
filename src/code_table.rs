//! Bit codes and the symbol/code mapping derived from a [`HuffmanTree`].

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::tree::{HuffmanTree, Node};

/// Longest code a tree over 256 symbols can assign.
pub const MAX_CODE_LENGTH: usize = 255;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = (MAX_CODE_LENGTH + WORD_BITS - 1) / WORD_BITS;

/// A string of up to [`MAX_CODE_LENGTH`] bits.
///
/// The first bit, the one closest to the root of the tree, sits in the most
/// significant position of the first word. Bits past `len` are always zero so
/// the derived comparisons only look at the code itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Code {
    words: [u64; WORDS],
    len: u16,
}

impl Code {
    pub const fn new() -> Self {
        Code {
            words: [0; WORDS],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a bit to the end of the code.
    ///
    /// # Panics
    /// If the code already holds [`MAX_CODE_LENGTH`] bits.
    pub fn push(&mut self, bit: bool) {
        let idx = self.len();
        assert!(
            idx < MAX_CODE_LENGTH,
            "Code can't grow past {} bits",
            MAX_CODE_LENGTH
        );
        if bit {
            self.words[idx / WORD_BITS] |= 1 << (WORD_BITS - 1 - idx % WORD_BITS);
        }
        self.len += 1;
    }

    pub fn clear(&mut self) {
        *self = Code::new();
    }

    /// The bit at `idx`, counted from the first bit.
    pub fn bit(&self, idx: usize) -> bool {
        assert!(idx < self.len());
        (self.words[idx / WORD_BITS] >> (WORD_BITS - 1 - idx % WORD_BITS)) & 1 == 1
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |idx| self.bit(idx))
    }

    /// True if `self` is a prefix of `other`. Every code is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let full_words = self.len() / WORD_BITS;
        if self.words[..full_words] != other.words[..full_words] {
            return false;
        }
        let rest = self.len() % WORD_BITS;
        if rest == 0 {
            return true;
        }
        let mask = !(u64::MAX >> rest);
        self.words[full_words] == other.words[full_words] & mask
    }

    /// This code extended by one bit.
    fn child(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodeError {
    Empty,
    InvalidBit { found: char },
    TooLong { len: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for CodeError {}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeError::Empty => write!(f, "Code must have at least one bit"),
            CodeError::InvalidBit { found } => {
                write!(f, "Codes may only contain '0' and '1', found: {:?}", found)
            }
            CodeError::TooLong { len } => write!(
                f,
                "Code has {} bits, the limit is {}",
                len, MAX_CODE_LENGTH
            ),
        }
    }
}

impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CodeError::Empty);
        }
        if s.len() > MAX_CODE_LENGTH {
            return Err(CodeError::TooLong { len: s.len() });
        }
        let mut code = Code::new();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                found => return Err(CodeError::InvalidBit { found }),
            }
        }
        Ok(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodeTableError {
    DuplicateSymbol { symbol: u8 },
    DuplicateCode { code: Code },
    NotPrefixFree { prefix: Code, code: Code },
}

#[cfg(feature = "std")]
impl std::error::Error for CodeTableError {}

impl fmt::Display for CodeTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeTableError::DuplicateSymbol { symbol } => {
                write!(f, "Symbol {} was assigned more than one code", symbol)
            }
            CodeTableError::DuplicateCode { code } => {
                write!(f, "Code {} was assigned to more than one symbol", code)
            }
            CodeTableError::NotPrefixFree { prefix, code } => write!(
                f,
                "Code {} is a prefix of code {}, the table can't be decoded unambiguously",
                prefix, code
            ),
        }
    }
}

/// Bijective mapping between symbols and their codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Index is the symbol
    codes: Vec<Option<Code>>,
    /// Reverse direction, used while decoding
    symbols: BTreeMap<Code, u8>,
    max_code_len: usize,
}

impl CodeTable {
    pub fn new() -> Self {
        CodeTable {
            codes: vec![None; 256],
            symbols: BTreeMap::new(),
            max_code_len: 0,
        }
    }

    /// Assign every leaf of `tree` its root path, 0 for left and 1 for right.
    ///
    /// A tree made of one leaf has no path at all; that symbol gets the single
    /// bit code `0` so it still occupies space in the packed stream.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => table.assign(*symbol, Code::new().child(false)),
            root => table.assign_subtree(root, Code::new()),
        }
        table
    }

    fn assign_subtree(&mut self, node: &Node, prefix: Code) {
        match node {
            Node::Leaf { symbol, .. } => self.assign(*symbol, prefix),
            Node::Internal { left, right, .. } => {
                self.assign_subtree(left, prefix.child(false));
                self.assign_subtree(right, prefix.child(true));
            }
        }
    }

    fn assign(&mut self, symbol: u8, code: Code) {
        self.max_code_len = self.max_code_len.max(code.len());
        self.codes[symbol as usize] = Some(code);
        self.symbols.insert(code, symbol);
    }

    /// Add a mapping, rejecting anything that would break the bijection or
    /// the prefix property.
    pub fn insert(&mut self, symbol: u8, code: Code) -> Result<(), CodeTableError> {
        if self.codes[symbol as usize].is_some() {
            return Err(CodeTableError::DuplicateSymbol { symbol });
        }
        if self.symbols.contains_key(&code) {
            return Err(CodeTableError::DuplicateCode { code });
        }
        for existing in self.symbols.keys() {
            if existing.is_prefix_of(&code) {
                return Err(CodeTableError::NotPrefixFree {
                    prefix: *existing,
                    code,
                });
            }
            if code.is_prefix_of(existing) {
                return Err(CodeTableError::NotPrefixFree {
                    prefix: code,
                    code: *existing,
                });
            }
        }
        self.assign(symbol, code);
        Ok(())
    }

    pub fn code(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.symbols.keys().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}
