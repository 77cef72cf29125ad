//! A static Huffman file compressor.
//!
//! Compressing a file produces two artifacts: the packed bitstream and a small
//! text "frequency file" holding the number of encoded symbols and the code of
//! every byte value that occurs in the input. Both are needed to decompress.
//!
//! The codec itself only needs `alloc`. The `std` feature (on by default) adds
//! the path and stream based [`encode`] and [`decode`] operations.
//!
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), ruhuff::Error> {
//! ruhuff::encode("photo.jpg", "photo.huff", "photo.freq")?;
//! ruhuff::decode("photo.huff", "photo_copy.jpg", "photo.freq")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

/// Emits a `tracing` debug event when the `tracing` feature is enabled and
/// expands to nothing otherwise.
macro_rules! debug_log {
    ($($x:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x)*);
    };
}

pub mod code_table;
pub mod decoding;
pub mod encoding;
pub mod frequency;
pub mod frequency_file;
pub mod tree;
#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
pub mod errors;
#[cfg(feature = "std")]
mod files;

pub use code_table::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use frequency_file::FrequencyFile;
pub use tree::HuffmanTree;

#[cfg(feature = "std")]
pub use errors::Error;
#[cfg(feature = "std")]
pub use files::{decode, decode_stream, encode, encode_stream, DecodeSummary, EncodeSummary};
