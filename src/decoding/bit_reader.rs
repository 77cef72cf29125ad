/// Reads single bits from a byte slice, most significant bit of each byte first.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    source: &'s [u8],
}

impl<'s> BitReader<'s> {
    pub fn new(source: &'s [u8]) -> BitReader<'s> {
        BitReader { idx: 0, source }
    }

    pub fn bits_left(&self) -> usize {
        self.source.len() * 8 - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    /// The next bit, or `None` once every bit of the source has been read.
    pub fn get_bit(&mut self) -> Option<bool> {
        let byte = *self.source.get(self.idx / 8)?;
        let bit = (byte >> (7 - self.idx % 8)) & 1 == 1;
        self.idx += 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::BitReader;
    use alloc::vec::Vec;

    #[test]
    fn reads_msb_first() {
        let source = [0b1000_0001u8, 0b0100_0000];
        let mut br = BitReader::new(&source);
        let bits: Vec<bool> = core::iter::from_fn(|| br.get_bit()).collect();
        assert_eq!(bits.len(), 16);
        assert!(bits[0]);
        assert!(bits[7]);
        assert!(bits[9]);
        assert_eq!(bits.iter().filter(|&&bit| bit).count(), 3);
        assert_eq!(br.bits_left(), 0);
        assert_eq!(br.bits_read(), 16);
        assert_eq!(br.get_bit(), None);
    }

    #[test]
    fn empty_source() {
        let mut br = BitReader::new(&[]);
        assert_eq!(br.bits_left(), 0);
        assert_eq!(br.get_bit(), None);
    }
}
