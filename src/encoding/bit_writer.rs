use alloc::vec::Vec;

use crate::code_table::Code;

/// An interface for writing single bits and whole codes into a byte buffer,
/// most significant bit first.
pub(crate) struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: u64,
}

impl BitWriter {
    /// Initialize a new writer with room for `capacity` bytes. Write new bits
    /// with `write_bit` or `write_code`, and obtain the output using `dump`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            bit_idx: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        let bit_offset = (self.bit_idx % 8) as u32;
        if bit_offset == 0 {
            self.output.push(0);
        }
        if bit {
            // the buffer grew above if this bit starts a new byte
            if let Some(last) = self.output.last_mut() {
                *last |= 0x80 >> bit_offset;
            }
        }
        self.bit_idx += 1;
    }

    pub fn write_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.write_bit(bit);
        }
    }

    /// Number of bits written so far, not counting padding.
    pub fn bits_written(&self) -> u64 {
        self.bit_idx
    }

    /// Consume the writer and return the bytes. A partially filled last byte
    /// is kept, with its unused low bits set to zero.
    pub fn dump(self) -> Vec<u8> {
        self.output
    }
}
